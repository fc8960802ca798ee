use chrono::Utc;
use uuid::Uuid;

use campus_domain::pagination::{Page, PageRequest};
use campus_domain::user::{UserStatus, UserType, validate_email};

use crate::domain::pricing;
use crate::domain::repository::{AssignmentRepository, UserDirectory};
use crate::domain::types::{AssignableUser, UserListFilter, UserProfile, UserRecord, UserSortBy};
use crate::error::BoardingServiceError;

// ── ListUsers ────────────────────────────────────────────────────────────────

pub struct ListUsersUseCase<D: UserDirectory> {
    pub directory: D,
}

impl<D: UserDirectory> ListUsersUseCase<D> {
    pub async fn execute(
        &self,
        filter: &UserListFilter,
        sort_by: UserSortBy,
        page: PageRequest,
    ) -> Result<Page<UserRecord>, BoardingServiceError> {
        self.directory.list(filter, sort_by, page).await
    }
}

// ── ListAssignableUsers ──────────────────────────────────────────────────────

/// Derives the pool of users eligible for a new assignment: active-status
/// users annotated with whether they already hold an active assignment.
pub struct ListAssignableUsersUseCase<D: UserDirectory, A: AssignmentRepository> {
    pub directory: D,
    pub assignments: A,
}

impl<D: UserDirectory, A: AssignmentRepository> ListAssignableUsersUseCase<D, A> {
    pub async fn execute(
        &self,
        filter: &UserListFilter,
    ) -> Result<Vec<AssignableUser>, BoardingServiceError> {
        let users = self.directory.all().await?;
        let assignments = self.assignments.all().await?;
        Ok(pricing::assignable_users(users, &assignments)
            .into_iter()
            .filter(|entry| filter.matches(&entry.user))
            .collect())
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<D: UserDirectory> {
    pub directory: D,
}

impl<D: UserDirectory> GetUserUseCase<D> {
    pub async fn execute(&self, user_id: Uuid) -> Result<UserRecord, BoardingServiceError> {
        self.directory
            .find_by_id(user_id)
            .await?
            .ok_or(BoardingServiceError::UserNotFound)
    }
}

// ── CreateUser ───────────────────────────────────────────────────────────────

pub struct CreateUserInput {
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub user_type: UserType,
    pub status: Option<UserStatus>,
    pub profile: UserProfile,
}

pub struct CreateUserUseCase<D: UserDirectory> {
    pub directory: D,
}

impl<D: UserDirectory> CreateUserUseCase<D> {
    pub async fn execute(&self, input: CreateUserInput) -> Result<UserRecord, BoardingServiceError> {
        if input.first_name.trim().is_empty() || input.last_name.trim().is_empty() {
            return Err(BoardingServiceError::MissingData);
        }
        if let Some(ref email) = input.email {
            if !validate_email(email) {
                return Err(BoardingServiceError::InvalidEmail);
            }
        }
        if !input.profile.matches_user_type(input.user_type) {
            return Err(BoardingServiceError::InvalidProfile);
        }
        let now = Utc::now();
        let user = UserRecord {
            id: Uuid::now_v7(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            photo_url: input.photo_url,
            user_type: input.user_type,
            status: input.status.unwrap_or(UserStatus::Active),
            profile: input.profile,
            created_at: now,
            updated_at: now,
        };
        self.directory.create(&user).await?;
        Ok(user)
    }
}

// ── UpdateUser ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateUserInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub photo_url: Option<String>,
    pub status: Option<UserStatus>,
    pub profile: Option<UserProfile>,
}

impl UpdateUserInput {
    fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.photo_url.is_none()
            && self.status.is_none()
            && self.profile.is_none()
    }
}

/// Partial update. `user_type` is immutable; a profile patch must keep the
/// variant matching the record's type.
pub struct UpdateUserUseCase<D: UserDirectory> {
    pub directory: D,
}

impl<D: UserDirectory> UpdateUserUseCase<D> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: UpdateUserInput,
    ) -> Result<UserRecord, BoardingServiceError> {
        if input.is_empty() {
            return Err(BoardingServiceError::MissingData);
        }
        if let Some(ref email) = input.email {
            if !validate_email(email) {
                return Err(BoardingServiceError::InvalidEmail);
            }
        }
        let mut user = self
            .directory
            .find_by_id(user_id)
            .await?
            .ok_or(BoardingServiceError::UserNotFound)?;
        if let Some(ref profile) = input.profile {
            if !profile.matches_user_type(user.user_type) {
                return Err(BoardingServiceError::InvalidProfile);
            }
        }
        if let Some(first_name) = input.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = last_name;
        }
        if let Some(email) = input.email {
            user.email = Some(email);
        }
        if let Some(photo_url) = input.photo_url {
            user.photo_url = Some(photo_url);
        }
        if let Some(status) = input.status {
            user.status = status;
        }
        if let Some(profile) = input.profile {
            user.profile = profile;
        }
        user.updated_at = Utc::now();
        self.directory.update(&user).await?;
        Ok(user)
    }
}

// ── DeleteUser ───────────────────────────────────────────────────────────────

pub struct DeleteUserUseCase<D: UserDirectory> {
    pub directory: D,
}

impl<D: UserDirectory> DeleteUserUseCase<D> {
    pub async fn execute(&self, user_id: Uuid) -> Result<(), BoardingServiceError> {
        if self.directory.delete(user_id).await? {
            Ok(())
        } else {
            Err(BoardingServiceError::UserNotFound)
        }
    }
}
