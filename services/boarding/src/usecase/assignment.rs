use chrono::{DateTime, Utc};
use uuid::Uuid;

use campus_domain::pagination::{Page, PageRequest};
use campus_domain::user::UserType;

use crate::domain::pricing;
use crate::domain::repository::{AssignmentRepository, MealPackageRepository, UserDirectory};
use crate::domain::types::{
    AssignmentListFilter, AssignmentSortBy, AssignmentStatus, AssignmentSummary,
    BoardingAssignment,
};
use crate::error::BoardingServiceError;

// ── ListAssignments ──────────────────────────────────────────────────────────

pub struct ListAssignmentsUseCase<A: AssignmentRepository> {
    pub repo: A,
}

impl<A: AssignmentRepository> ListAssignmentsUseCase<A> {
    pub async fn execute(
        &self,
        filter: &AssignmentListFilter,
        sort_by: AssignmentSortBy,
        page: PageRequest,
    ) -> Result<Page<BoardingAssignment>, BoardingServiceError> {
        self.repo.list(filter, sort_by, page).await
    }
}

// ── GetAssignment ────────────────────────────────────────────────────────────

pub struct GetAssignmentUseCase<A: AssignmentRepository> {
    pub repo: A,
}

impl<A: AssignmentRepository> GetAssignmentUseCase<A> {
    pub async fn execute(&self, id: Uuid) -> Result<BoardingAssignment, BoardingServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(BoardingServiceError::AssignmentNotFound)
    }
}

// ── CreateAssignment ─────────────────────────────────────────────────────────

pub struct CreateAssignmentInput {
    pub user_id: Uuid,
    pub user_type: UserType,
    pub meal_package_id: Uuid,
    pub discount_percentage: f64,
    pub notes: Option<String>,
    pub status: Option<AssignmentStatus>,
    pub assigned_date: Option<DateTime<Utc>>,
    pub assigned_by: Uuid,
}

/// Matches a user to a meal package. Resolves both referents from the
/// current directory and catalog, derives the price breakdown, and
/// snapshots the user and package names onto the record.
pub struct CreateAssignmentUseCase<A: AssignmentRepository, D: UserDirectory, M: MealPackageRepository>
{
    pub repo: A,
    pub directory: D,
    pub meal_packages: M,
}

impl<A: AssignmentRepository, D: UserDirectory, M: MealPackageRepository>
    CreateAssignmentUseCase<A, D, M>
{
    pub async fn execute(
        &self,
        input: CreateAssignmentInput,
    ) -> Result<BoardingAssignment, BoardingServiceError> {
        if !pricing::is_valid_discount(input.discount_percentage) {
            return Err(BoardingServiceError::InvalidDiscount);
        }
        let user = self
            .directory
            .find_by_id(input.user_id)
            .await?
            .filter(|u| u.user_type == input.user_type)
            .ok_or(BoardingServiceError::UserNotFound)?;
        let meal_package = self
            .meal_packages
            .find_by_id(input.meal_package_id)
            .await?
            .ok_or(BoardingServiceError::MealPackageNotFound)?;

        let breakdown =
            pricing::price_breakdown(Some(meal_package.price), input.discount_percentage);
        let now = Utc::now();
        let assignment = BoardingAssignment {
            id: Uuid::now_v7(),
            user_id: user.id,
            user_type: user.user_type,
            user_name: user.display_name(),
            meal_package_id: meal_package.id,
            meal_package_name: meal_package.name,
            discount_percentage: input.discount_percentage,
            original_price: breakdown.original_price,
            discount_amount: breakdown.discount_amount,
            final_price: breakdown.final_price,
            status: input.status.unwrap_or(AssignmentStatus::Active),
            notes: input.notes,
            assigned_date: input.assigned_date.unwrap_or(now),
            assigned_by: input.assigned_by,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&assignment).await?;
        Ok(assignment)
    }
}

// ── UpdateAssignment ─────────────────────────────────────────────────────────

#[derive(Default)]
pub struct UpdateAssignmentInput {
    pub meal_package_id: Option<Uuid>,
    pub discount_percentage: Option<f64>,
    pub notes: Option<String>,
    pub status: Option<AssignmentStatus>,
}

impl UpdateAssignmentInput {
    fn is_empty(&self) -> bool {
        self.meal_package_id.is_none()
            && self.discount_percentage.is_none()
            && self.notes.is_none()
            && self.status.is_none()
    }
}

/// Partial update. Status transitions are free-form. When the meal package
/// changes, the name/price snapshot is refreshed from the current catalog;
/// the breakdown is recomputed whenever package or discount change.
pub struct UpdateAssignmentUseCase<A: AssignmentRepository, M: MealPackageRepository> {
    pub repo: A,
    pub meal_packages: M,
}

impl<A: AssignmentRepository, M: MealPackageRepository> UpdateAssignmentUseCase<A, M> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateAssignmentInput,
    ) -> Result<BoardingAssignment, BoardingServiceError> {
        if input.is_empty() {
            return Err(BoardingServiceError::MissingData);
        }
        if let Some(discount) = input.discount_percentage {
            if !pricing::is_valid_discount(discount) {
                return Err(BoardingServiceError::InvalidDiscount);
            }
        }
        let mut assignment = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(BoardingServiceError::AssignmentNotFound)?;

        let mut reprice = false;
        if let Some(meal_package_id) = input.meal_package_id {
            if meal_package_id != assignment.meal_package_id {
                let meal_package = self
                    .meal_packages
                    .find_by_id(meal_package_id)
                    .await?
                    .ok_or(BoardingServiceError::MealPackageNotFound)?;
                assignment.meal_package_id = meal_package.id;
                assignment.meal_package_name = meal_package.name;
                assignment.original_price = meal_package.price;
                reprice = true;
            }
        }
        if let Some(discount) = input.discount_percentage {
            assignment.discount_percentage = discount;
            reprice = true;
        }
        if reprice {
            let breakdown = pricing::price_breakdown(
                Some(assignment.original_price),
                assignment.discount_percentage,
            );
            assignment.discount_amount = breakdown.discount_amount;
            assignment.final_price = breakdown.final_price;
        }
        if let Some(notes) = input.notes {
            assignment.notes = Some(notes);
        }
        if let Some(status) = input.status {
            assignment.status = status;
        }
        assignment.updated_at = Utc::now();
        self.repo.update(&assignment).await?;
        Ok(assignment)
    }
}

// ── DeleteAssignment ─────────────────────────────────────────────────────────

pub struct DeleteAssignmentUseCase<A: AssignmentRepository> {
    pub repo: A,
}

impl<A: AssignmentRepository> DeleteAssignmentUseCase<A> {
    pub async fn execute(&self, id: Uuid) -> Result<(), BoardingServiceError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(BoardingServiceError::AssignmentNotFound)
        }
    }
}

// ── GetAssignmentSummary ─────────────────────────────────────────────────────

pub struct GetAssignmentSummaryUseCase<A: AssignmentRepository> {
    pub repo: A,
}

impl<A: AssignmentRepository> GetAssignmentSummaryUseCase<A> {
    pub async fn execute(&self) -> Result<AssignmentSummary, BoardingServiceError> {
        let assignments = self.repo.all().await?;
        Ok(pricing::summarize(&assignments))
    }
}
