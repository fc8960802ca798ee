use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_core::identity::IdentityHeaders;
use campus_domain::pagination::{Page, PageRequest};

use crate::domain::types::{MealPackage, Package, PackageType};
use crate::error::BoardingServiceError;
use crate::state::AppState;
use crate::usecase::catalog::{
    CreateMealPackageInput, CreateMealPackageUseCase, CreatePackageInput, CreatePackageTypeInput,
    CreatePackageTypeUseCase, CreatePackageUseCase, DeleteMealPackageUseCase,
    DeletePackageTypeUseCase, DeletePackageUseCase, GetMealPackageUseCase, GetPackageTypeUseCase,
    GetPackageUseCase, ListMealPackagesUseCase, ListPackageTypesUseCase, ListPackagesUseCase,
    UpdateMealPackageInput, UpdateMealPackageUseCase, UpdatePackageInput, UpdatePackageTypeInput,
    UpdatePackageTypeUseCase, UpdatePackageUseCase,
};

fn page_request(raw_query: Option<String>) -> Result<PageRequest, BoardingServiceError> {
    raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| BoardingServiceError::MissingData)
        .map(Option::unwrap_or_default)
}

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct PackageTypeResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<PackageType> for PackageTypeResponse {
    fn from(t: PackageType) -> Self {
        Self {
            id: t.id.to_string(),
            name: t.name,
            description: t.description,
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct PackageResponse {
    pub id: String,
    pub package_type_id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Package> for PackageResponse {
    fn from(p: Package) -> Self {
        Self {
            id: p.id.to_string(),
            package_type_id: p.package_type_id.to_string(),
            name: p.name,
            description: p.description,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct MealPackageResponse {
    pub id: String,
    pub package_id: String,
    pub package_type_id: String,
    pub name: String,
    pub price: f64,
    pub note: Option<String>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<MealPackage> for MealPackageResponse {
    fn from(m: MealPackage) -> Self {
        Self {
            id: m.id.to_string(),
            package_id: m.package_id.to_string(),
            package_type_id: m.package_type_id.to_string(),
            name: m.name,
            price: m.price,
            note: m.note,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

// ── Package types ────────────────────────────────────────────────────────────

pub async fn list_package_types(
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Page<PackageTypeResponse>>, BoardingServiceError> {
    let uc = ListPackageTypesUseCase {
        repo: state.package_type_repo(),
    };
    let page = uc.execute(page_request(raw_query)?).await?;
    Ok(Json(page.map(PackageTypeResponse::from)))
}

pub async fn get_package_type(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PackageTypeResponse>, BoardingServiceError> {
    let uc = GetPackageTypeUseCase {
        repo: state.package_type_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

#[derive(Deserialize)]
pub struct CreatePackageTypeRequest {
    pub name: String,
    pub description: Option<String>,
}

pub async fn create_package_type(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreatePackageTypeRequest>,
) -> Result<(StatusCode, Json<PackageTypeResponse>), BoardingServiceError> {
    let uc = CreatePackageTypeUseCase {
        repo: state.package_type_repo(),
    };
    let package_type = uc
        .execute(CreatePackageTypeInput {
            name: body.name,
            description: body.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(package_type.into())))
}

#[derive(Deserialize)]
pub struct UpdatePackageTypeRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub async fn update_package_type(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePackageTypeRequest>,
) -> Result<Json<PackageTypeResponse>, BoardingServiceError> {
    let uc = UpdatePackageTypeUseCase {
        repo: state.package_type_repo(),
    };
    let package_type = uc
        .execute(
            id,
            UpdatePackageTypeInput {
                name: body.name,
                description: body.description,
            },
        )
        .await?;
    Ok(Json(package_type.into()))
}

pub async fn delete_package_type(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, BoardingServiceError> {
    let uc = DeletePackageTypeUseCase {
        repo: state.package_type_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Packages ─────────────────────────────────────────────────────────────────

pub async fn list_packages(
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Page<PackageResponse>>, BoardingServiceError> {
    let uc = ListPackagesUseCase {
        repo: state.package_repo(),
    };
    let page = uc.execute(page_request(raw_query)?).await?;
    Ok(Json(page.map(PackageResponse::from)))
}

pub async fn get_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PackageResponse>, BoardingServiceError> {
    let uc = GetPackageUseCase {
        repo: state.package_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

#[derive(Deserialize)]
pub struct CreatePackageRequest {
    pub package_type_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

pub async fn create_package(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreatePackageRequest>,
) -> Result<(StatusCode, Json<PackageResponse>), BoardingServiceError> {
    let uc = CreatePackageUseCase {
        repo: state.package_repo(),
        package_types: state.package_type_repo(),
    };
    let package = uc
        .execute(CreatePackageInput {
            package_type_id: body.package_type_id,
            name: body.name,
            description: body.description,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(package.into())))
}

#[derive(Deserialize)]
pub struct UpdatePackageRequest {
    pub package_type_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
}

pub async fn update_package(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdatePackageRequest>,
) -> Result<Json<PackageResponse>, BoardingServiceError> {
    let uc = UpdatePackageUseCase {
        repo: state.package_repo(),
        package_types: state.package_type_repo(),
    };
    let package = uc
        .execute(
            id,
            UpdatePackageInput {
                package_type_id: body.package_type_id,
                name: body.name,
                description: body.description,
            },
        )
        .await?;
    Ok(Json(package.into()))
}

pub async fn delete_package(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, BoardingServiceError> {
    let uc = DeletePackageUseCase {
        repo: state.package_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── Meal packages ────────────────────────────────────────────────────────────

pub async fn list_meal_packages(
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Page<MealPackageResponse>>, BoardingServiceError> {
    let uc = ListMealPackagesUseCase {
        repo: state.meal_package_repo(),
    };
    let page = uc.execute(page_request(raw_query)?).await?;
    Ok(Json(page.map(MealPackageResponse::from)))
}

pub async fn get_meal_package(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MealPackageResponse>, BoardingServiceError> {
    let uc = GetMealPackageUseCase {
        repo: state.meal_package_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

#[derive(Deserialize)]
pub struct CreateMealPackageRequest {
    pub package_id: Uuid,
    pub name: String,
    pub price: f64,
    pub note: Option<String>,
}

pub async fn create_meal_package(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateMealPackageRequest>,
) -> Result<(StatusCode, Json<MealPackageResponse>), BoardingServiceError> {
    let uc = CreateMealPackageUseCase {
        repo: state.meal_package_repo(),
        packages: state.package_repo(),
    };
    let meal_package = uc
        .execute(CreateMealPackageInput {
            package_id: body.package_id,
            name: body.name,
            price: body.price,
            note: body.note,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(meal_package.into())))
}

#[derive(Deserialize)]
pub struct UpdateMealPackageRequest {
    pub package_id: Option<Uuid>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub note: Option<String>,
}

pub async fn update_meal_package(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateMealPackageRequest>,
) -> Result<Json<MealPackageResponse>, BoardingServiceError> {
    let uc = UpdateMealPackageUseCase {
        repo: state.meal_package_repo(),
        packages: state.package_repo(),
    };
    let meal_package = uc
        .execute(
            id,
            UpdateMealPackageInput {
                package_id: body.package_id,
                name: body.name,
                price: body.price,
                note: body.note,
            },
        )
        .await?;
    Ok(Json(meal_package.into()))
}

pub async fn delete_meal_package(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, BoardingServiceError> {
    let uc = DeleteMealPackageUseCase {
        repo: state.meal_package_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
