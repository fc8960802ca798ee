use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_core::identity::IdentityHeaders;
use campus_domain::pagination::{Page, PageRequest};
use campus_domain::user::UserType;

use crate::domain::types::{
    AssignmentListFilter, AssignmentSortBy, AssignmentStatus, AssignmentSummary,
    BoardingAssignment,
};
use crate::error::BoardingServiceError;
use crate::state::AppState;
use crate::usecase::assignment::{
    CreateAssignmentInput, CreateAssignmentUseCase, DeleteAssignmentUseCase, GetAssignmentUseCase,
    GetAssignmentSummaryUseCase, ListAssignmentsUseCase, UpdateAssignmentInput,
    UpdateAssignmentUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct AssignmentResponse {
    pub id: String,
    pub user_id: String,
    pub user_type: UserType,
    pub user_name: String,
    pub meal_package_id: String,
    pub meal_package_name: String,
    pub discount_percentage: f64,
    pub original_price: f64,
    pub discount_amount: f64,
    pub final_price: f64,
    pub status: AssignmentStatus,
    pub notes: Option<String>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub assigned_date: DateTime<Utc>,
    pub assigned_by: String,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: DateTime<Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: DateTime<Utc>,
}

impl From<BoardingAssignment> for AssignmentResponse {
    fn from(a: BoardingAssignment) -> Self {
        Self {
            id: a.id.to_string(),
            user_id: a.user_id.to_string(),
            user_type: a.user_type,
            user_name: a.user_name,
            meal_package_id: a.meal_package_id.to_string(),
            meal_package_name: a.meal_package_name,
            discount_percentage: a.discount_percentage,
            original_price: a.original_price,
            discount_amount: a.discount_amount,
            final_price: a.final_price,
            status: a.status,
            notes: a.notes,
            assigned_date: a.assigned_date,
            assigned_by: a.assigned_by.to_string(),
            created_at: a.created_at,
            updated_at: a.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct SummaryResponse {
    pub total_active: u64,
    pub active_students: u64,
    pub active_teachers: u64,
    pub active_staff: u64,
    pub total_revenue: f64,
    pub average_discount: f64,
}

impl From<AssignmentSummary> for SummaryResponse {
    fn from(s: AssignmentSummary) -> Self {
        Self {
            total_active: s.total_active,
            active_students: s.active_students,
            active_teachers: s.active_teachers,
            active_staff: s.active_staff,
            total_revenue: s.total_revenue,
            average_discount: s.average_discount,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct AssignmentListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub user_type: Option<String>,
    pub status: Option<String>,
    pub meal_package_id: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
}

// ── GET /assignments ─────────────────────────────────────────────────────────

pub async fn list_assignments(
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Page<AssignmentResponse>>, BoardingServiceError> {
    let query: AssignmentListQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| BoardingServiceError::MissingData)?
        .unwrap_or_default();

    let user_type = query
        .user_type
        .as_deref()
        .map(|s| UserType::from_kebab(s).ok_or(BoardingServiceError::MissingData))
        .transpose()?;
    let status = query
        .status
        .as_deref()
        .map(|s| AssignmentStatus::from_kebab(s).ok_or(BoardingServiceError::MissingData))
        .transpose()?;
    let meal_package_id = query
        .meal_package_id
        .as_deref()
        .map(|s| s.parse::<Uuid>().map_err(|_| BoardingServiceError::MissingData))
        .transpose()?;
    let filter = AssignmentListFilter {
        user_type,
        status,
        meal_package_id,
        search: query.search,
    };
    let sort_by = query
        .sort_by
        .as_deref()
        .and_then(AssignmentSortBy::from_kebab)
        .unwrap_or_default();
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    };

    let uc = ListAssignmentsUseCase {
        repo: state.assignment_repo(),
    };
    let result = uc.execute(&filter, sort_by, page).await?;
    Ok(Json(result.map(AssignmentResponse::from)))
}

// ── GET /assignments/summary ─────────────────────────────────────────────────

pub async fn get_assignment_summary(
    State(state): State<AppState>,
) -> Result<Json<SummaryResponse>, BoardingServiceError> {
    let uc = GetAssignmentSummaryUseCase {
        repo: state.assignment_repo(),
    };
    Ok(Json(uc.execute().await?.into()))
}

// ── GET /assignments/{id} ────────────────────────────────────────────────────

pub async fn get_assignment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<AssignmentResponse>, BoardingServiceError> {
    let uc = GetAssignmentUseCase {
        repo: state.assignment_repo(),
    };
    Ok(Json(uc.execute(id).await?.into()))
}

// ── POST /assignments ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateAssignmentRequest {
    pub user_id: Uuid,
    pub user_type: UserType,
    pub meal_package_id: Uuid,
    #[serde(default)]
    pub discount_percentage: f64,
    pub notes: Option<String>,
    pub status: Option<AssignmentStatus>,
    pub assigned_date: Option<DateTime<Utc>>,
}

pub async fn create_assignment(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateAssignmentRequest>,
) -> Result<(StatusCode, Json<AssignmentResponse>), BoardingServiceError> {
    let uc = CreateAssignmentUseCase {
        repo: state.assignment_repo(),
        directory: state.user_directory(),
        meal_packages: state.meal_package_repo(),
    };
    let assignment = uc
        .execute(CreateAssignmentInput {
            user_id: body.user_id,
            user_type: body.user_type,
            meal_package_id: body.meal_package_id,
            discount_percentage: body.discount_percentage,
            notes: body.notes,
            status: body.status,
            assigned_date: body.assigned_date,
            assigned_by: identity.user_id,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(assignment.into())))
}

// ── PATCH /assignments/{id} ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateAssignmentRequest {
    pub meal_package_id: Option<Uuid>,
    pub discount_percentage: Option<f64>,
    pub notes: Option<String>,
    pub status: Option<AssignmentStatus>,
}

pub async fn update_assignment(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateAssignmentRequest>,
) -> Result<Json<AssignmentResponse>, BoardingServiceError> {
    let uc = UpdateAssignmentUseCase {
        repo: state.assignment_repo(),
        meal_packages: state.meal_package_repo(),
    };
    let assignment = uc
        .execute(
            id,
            UpdateAssignmentInput {
                meal_package_id: body.meal_package_id,
                discount_percentage: body.discount_percentage,
                notes: body.notes,
                status: body.status,
            },
        )
        .await?;
    Ok(Json(assignment.into()))
}

// ── DELETE /assignments/{id} ─────────────────────────────────────────────────

pub async fn delete_assignment(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, BoardingServiceError> {
    let uc = DeleteAssignmentUseCase {
        repo: state.assignment_repo(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
