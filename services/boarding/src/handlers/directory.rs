use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use campus_core::identity::IdentityHeaders;
use campus_domain::pagination::{Page, PageRequest};
use campus_domain::user::{UserStatus, UserType};

use crate::domain::types::{AssignableUser, UserListFilter, UserProfile, UserRecord, UserSortBy};
use crate::error::BoardingServiceError;
use crate::state::AppState;
use crate::usecase::directory::{
    CreateUserInput, CreateUserUseCase, DeleteUserUseCase, GetUserUseCase,
    ListAssignableUsersUseCase, ListUsersUseCase, UpdateUserInput, UpdateUserUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub user_type: UserType,
    pub status: UserStatus,
    pub profile: UserProfile,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "campus_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserRecord> for UserResponse {
    fn from(user: UserRecord) -> Self {
        Self {
            id: user.id.to_string(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            photo_url: user.photo_url,
            user_type: user.user_type,
            status: user.status,
            profile: user.profile,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct AssignableUserResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub is_assigned: bool,
}

impl From<AssignableUser> for AssignableUserResponse {
    fn from(entry: AssignableUser) -> Self {
        Self {
            user: entry.user.into(),
            is_assigned: entry.is_assigned,
        }
    }
}

// ── Query params ─────────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct UserListQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
    pub user_type: Option<String>,
    pub status: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<String>,
}

fn parse_query(raw_query: Option<String>) -> Result<UserListQuery, BoardingServiceError> {
    raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| BoardingServiceError::MissingData)
        .map(Option::unwrap_or_default)
}

fn filter_from_query(query: &UserListQuery) -> Result<UserListFilter, BoardingServiceError> {
    let user_type = query
        .user_type
        .as_deref()
        .map(|s| UserType::from_kebab(s).ok_or(BoardingServiceError::MissingData))
        .transpose()?;
    let status = query
        .status
        .as_deref()
        .map(|s| UserStatus::from_kebab(s).ok_or(BoardingServiceError::MissingData))
        .transpose()?;
    Ok(UserListFilter {
        user_type,
        status,
        search: query.search.clone(),
    })
}

fn page_from_query(query: &UserListQuery) -> PageRequest {
    PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    }
}

// ── GET /users ───────────────────────────────────────────────────────────────

pub async fn list_users(
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Page<UserResponse>>, BoardingServiceError> {
    let query = parse_query(raw_query)?;
    let filter = filter_from_query(&query)?;
    let sort_by = query
        .sort_by
        .as_deref()
        .and_then(UserSortBy::from_kebab)
        .unwrap_or_default();

    let uc = ListUsersUseCase {
        directory: state.user_directory(),
    };
    let page = uc.execute(&filter, sort_by, page_from_query(&query)).await?;
    Ok(Json(page.map(UserResponse::from)))
}

// ── GET /users/assignable ────────────────────────────────────────────────────

pub async fn list_assignable_users(
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<Json<Vec<AssignableUserResponse>>, BoardingServiceError> {
    let query = parse_query(raw_query)?;
    let filter = filter_from_query(&query)?;

    let uc = ListAssignableUsersUseCase {
        directory: state.user_directory(),
        assignments: state.assignment_repo(),
    };
    let pool = uc.execute(&filter).await?;
    Ok(Json(pool.into_iter().map(AssignableUserResponse::from).collect()))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserResponse>, BoardingServiceError> {
    let uc = GetUserUseCase {
        directory: state.user_directory(),
    };
    let user = uc.execute(id).await?;
    Ok(Json(user.into()))
}

// ── POST /users ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub user_type: UserType,
    pub status: Option<UserStatus>,
    pub profile: UserProfile,
}

pub async fn create_user(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), BoardingServiceError> {
    let uc = CreateUserUseCase {
        directory: state.user_directory(),
    };
    let user = uc
        .execute(CreateUserInput {
            first_name: body.first_name,
            last_name: body.last_name,
            email: body.email,
            photo_url: body.photo_url,
            user_type: body.user_type,
            status: body.status,
            profile: body.profile,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── PATCH /users/{id} ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub status: Option<UserStatus>,
    pub profile: Option<UserProfile>,
}

pub async fn update_user(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, BoardingServiceError> {
    let uc = UpdateUserUseCase {
        directory: state.user_directory(),
    };
    let user = uc
        .execute(
            id,
            UpdateUserInput {
                first_name: body.first_name,
                last_name: body.last_name,
                email: body.email,
                photo_url: body.photo_url,
                status: body.status,
                profile: body.profile,
            },
        )
        .await?;
    Ok(Json(user.into()))
}

// ── DELETE /users/{id} ───────────────────────────────────────────────────────

pub async fn delete_user(
    _identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, BoardingServiceError> {
    let uc = DeleteUserUseCase {
        directory: state.user_directory(),
    };
    uc.execute(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
