#![allow(async_fn_in_trait)]

use uuid::Uuid;

use campus_domain::pagination::{Page, PageRequest};

use crate::domain::types::{
    AssignmentListFilter, AssignmentSortBy, BoardingAssignment, MealPackage, Package, PackageType,
    UserListFilter, UserRecord, UserSortBy,
};
use crate::error::BoardingServiceError;

/// Unified directory over the three user sources (students, teachers, staff).
pub trait UserDirectory: Send + Sync {
    async fn list(
        &self,
        filter: &UserListFilter,
        sort_by: UserSortBy,
        page: PageRequest,
    ) -> Result<Page<UserRecord>, BoardingServiceError>;

    /// Every record, unpaginated. The eligibility derivation consumes the
    /// whole directory at once.
    async fn all(&self) -> Result<Vec<UserRecord>, BoardingServiceError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, BoardingServiceError>;

    async fn create(&self, user: &UserRecord) -> Result<(), BoardingServiceError>;

    /// Whole-record save. Fails with `UserNotFound` if the id is gone.
    async fn update(&self, user: &UserRecord) -> Result<(), BoardingServiceError>;

    /// Delete a record. Returns `true` if a record was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, BoardingServiceError>;
}

/// Repository for package types (top of the catalog hierarchy).
pub trait PackageTypeRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> Result<Page<PackageType>, BoardingServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<PackageType>, BoardingServiceError>;
    async fn exists(&self, id: Uuid) -> Result<bool, BoardingServiceError>;
    async fn create(&self, package_type: &PackageType) -> Result<(), BoardingServiceError>;
    async fn update(&self, package_type: &PackageType) -> Result<(), BoardingServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, BoardingServiceError>;
}

/// Repository for packages.
pub trait PackageRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> Result<Page<Package>, BoardingServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Package>, BoardingServiceError>;
    async fn create(&self, package: &Package) -> Result<(), BoardingServiceError>;
    async fn update(&self, package: &Package) -> Result<(), BoardingServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, BoardingServiceError>;
}

/// Repository for meal packages (priced catalog items).
pub trait MealPackageRepository: Send + Sync {
    async fn list(&self, page: PageRequest) -> Result<Page<MealPackage>, BoardingServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<MealPackage>, BoardingServiceError>;
    async fn create(&self, meal_package: &MealPackage) -> Result<(), BoardingServiceError>;
    async fn update(&self, meal_package: &MealPackage) -> Result<(), BoardingServiceError>;
    async fn delete(&self, id: Uuid) -> Result<bool, BoardingServiceError>;
}

/// Repository for boarding assignments.
pub trait AssignmentRepository: Send + Sync {
    async fn list(
        &self,
        filter: &AssignmentListFilter,
        sort_by: AssignmentSortBy,
        page: PageRequest,
    ) -> Result<Page<BoardingAssignment>, BoardingServiceError>;

    /// Every assignment, unpaginated, for summary and eligibility derivation.
    async fn all(&self) -> Result<Vec<BoardingAssignment>, BoardingServiceError>;

    async fn find_by_id(&self, id: Uuid)
    -> Result<Option<BoardingAssignment>, BoardingServiceError>;

    /// Insert a new assignment. Fails with `UserAlreadyAssigned` when an
    /// active assignment for the same `(user_id, user_type)` already exists;
    /// the check and the insert happen under one write lock.
    async fn create(&self, assignment: &BoardingAssignment) -> Result<(), BoardingServiceError>;

    /// Whole-record save. Fails with `AssignmentNotFound` if the id is gone.
    async fn update(&self, assignment: &BoardingAssignment) -> Result<(), BoardingServiceError>;

    /// Hard delete. Returns `true` if a record was deleted.
    async fn delete(&self, id: Uuid) -> Result<bool, BoardingServiceError>;
}
