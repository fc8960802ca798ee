//! In-memory repositories.
//!
//! The store is the service-side successor of the original mock API's
//! seeded arrays: plain vectors behind `RwLock`s, shared via `Arc`. Locks
//! are never held across await points. The repository traits keep the seam
//! open for a database-backed implementation.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use uuid::Uuid;

use campus_domain::pagination::{Page, PageRequest, Sort};

use crate::domain::repository::{
    AssignmentRepository, MealPackageRepository, PackageRepository, PackageTypeRepository,
    UserDirectory,
};
use crate::domain::types::{
    AssignmentListFilter, AssignmentSortBy, AssignmentStatus, BoardingAssignment, MealPackage,
    Package, PackageType, UserListFilter, UserRecord, UserSortBy,
};
use crate::error::BoardingServiceError;

/// Shared in-memory store. Cloning is cheap; all clones see the same data.
#[derive(Clone, Default)]
pub struct MemStore {
    users: Arc<RwLock<Vec<UserRecord>>>,
    package_types: Arc<RwLock<Vec<PackageType>>>,
    packages: Arc<RwLock<Vec<Package>>>,
    meal_packages: Arc<RwLock<Vec<MealPackage>>>,
    assignments: Arc<RwLock<Vec<BoardingAssignment>>>,
}

impl MemStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn read<'a, T>(
    lock: &'a RwLock<Vec<T>>,
    what: &str,
) -> Result<RwLockReadGuard<'a, Vec<T>>, BoardingServiceError> {
    lock.read()
        .map_err(|_| BoardingServiceError::Internal(anyhow::anyhow!("{what} lock poisoned")))
}

fn write<'a, T>(
    lock: &'a RwLock<Vec<T>>,
    what: &str,
) -> Result<RwLockWriteGuard<'a, Vec<T>>, BoardingServiceError> {
    lock.write()
        .map_err(|_| BoardingServiceError::Internal(anyhow::anyhow!("{what} lock poisoned")))
}

// ── User directory ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemUserDirectory {
    pub store: MemStore,
}

impl UserDirectory for MemUserDirectory {
    async fn list(
        &self,
        filter: &UserListFilter,
        sort_by: UserSortBy,
        page: PageRequest,
    ) -> Result<Page<UserRecord>, BoardingServiceError> {
        let users = read(&self.store.users, "users")?;
        let mut matched: Vec<UserRecord> = users.iter().filter(|u| filter.matches(u)).cloned().collect();
        drop(users);
        match sort_by {
            UserSortBy::CreatedAt(Sort::Desc) => {
                matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            UserSortBy::CreatedAt(Sort::Asc) => {
                matched.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            }
            UserSortBy::Name(dir) => {
                matched.sort_by(|a, b| {
                    let ka = (a.last_name.to_lowercase(), a.first_name.to_lowercase());
                    let kb = (b.last_name.to_lowercase(), b.first_name.to_lowercase());
                    match dir {
                        Sort::Asc => ka.cmp(&kb),
                        Sort::Desc => kb.cmp(&ka),
                    }
                });
            }
        }
        Ok(Page::from_items(matched, page))
    }

    async fn all(&self) -> Result<Vec<UserRecord>, BoardingServiceError> {
        Ok(read(&self.store.users, "users")?.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserRecord>, BoardingServiceError> {
        Ok(read(&self.store.users, "users")?
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create(&self, user: &UserRecord) -> Result<(), BoardingServiceError> {
        write(&self.store.users, "users")?.push(user.clone());
        Ok(())
    }

    async fn update(&self, user: &UserRecord) -> Result<(), BoardingServiceError> {
        let mut users = write(&self.store.users, "users")?;
        let slot = users
            .iter_mut()
            .find(|u| u.id == user.id)
            .ok_or(BoardingServiceError::UserNotFound)?;
        *slot = user.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, BoardingServiceError> {
        let mut users = write(&self.store.users, "users")?;
        let before = users.len();
        users.retain(|u| u.id != id);
        Ok(users.len() < before)
    }
}

// ── Package type repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemPackageTypeRepository {
    pub store: MemStore,
}

impl PackageTypeRepository for MemPackageTypeRepository {
    async fn list(&self, page: PageRequest) -> Result<Page<PackageType>, BoardingServiceError> {
        let mut items = read(&self.store.package_types, "package_types")?.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Page::from_items(items, page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<PackageType>, BoardingServiceError> {
        Ok(read(&self.store.package_types, "package_types")?
            .iter()
            .find(|t| t.id == id)
            .cloned())
    }

    async fn exists(&self, id: Uuid) -> Result<bool, BoardingServiceError> {
        Ok(read(&self.store.package_types, "package_types")?
            .iter()
            .any(|t| t.id == id))
    }

    async fn create(&self, package_type: &PackageType) -> Result<(), BoardingServiceError> {
        write(&self.store.package_types, "package_types")?.push(package_type.clone());
        Ok(())
    }

    async fn update(&self, package_type: &PackageType) -> Result<(), BoardingServiceError> {
        let mut items = write(&self.store.package_types, "package_types")?;
        let slot = items
            .iter_mut()
            .find(|t| t.id == package_type.id)
            .ok_or(BoardingServiceError::PackageTypeNotFound)?;
        *slot = package_type.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, BoardingServiceError> {
        let mut items = write(&self.store.package_types, "package_types")?;
        let before = items.len();
        items.retain(|t| t.id != id);
        Ok(items.len() < before)
    }
}

// ── Package repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemPackageRepository {
    pub store: MemStore,
}

impl PackageRepository for MemPackageRepository {
    async fn list(&self, page: PageRequest) -> Result<Page<Package>, BoardingServiceError> {
        let mut items = read(&self.store.packages, "packages")?.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Page::from_items(items, page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Package>, BoardingServiceError> {
        Ok(read(&self.store.packages, "packages")?
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn create(&self, package: &Package) -> Result<(), BoardingServiceError> {
        write(&self.store.packages, "packages")?.push(package.clone());
        Ok(())
    }

    async fn update(&self, package: &Package) -> Result<(), BoardingServiceError> {
        let mut items = write(&self.store.packages, "packages")?;
        let slot = items
            .iter_mut()
            .find(|p| p.id == package.id)
            .ok_or(BoardingServiceError::PackageNotFound)?;
        *slot = package.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, BoardingServiceError> {
        let mut items = write(&self.store.packages, "packages")?;
        let before = items.len();
        items.retain(|p| p.id != id);
        Ok(items.len() < before)
    }
}

// ── Meal package repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemMealPackageRepository {
    pub store: MemStore,
}

impl MealPackageRepository for MemMealPackageRepository {
    async fn list(&self, page: PageRequest) -> Result<Page<MealPackage>, BoardingServiceError> {
        let mut items = read(&self.store.meal_packages, "meal_packages")?.clone();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(Page::from_items(items, page))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<MealPackage>, BoardingServiceError> {
        Ok(read(&self.store.meal_packages, "meal_packages")?
            .iter()
            .find(|m| m.id == id)
            .cloned())
    }

    async fn create(&self, meal_package: &MealPackage) -> Result<(), BoardingServiceError> {
        write(&self.store.meal_packages, "meal_packages")?.push(meal_package.clone());
        Ok(())
    }

    async fn update(&self, meal_package: &MealPackage) -> Result<(), BoardingServiceError> {
        let mut items = write(&self.store.meal_packages, "meal_packages")?;
        let slot = items
            .iter_mut()
            .find(|m| m.id == meal_package.id)
            .ok_or(BoardingServiceError::MealPackageNotFound)?;
        *slot = meal_package.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, BoardingServiceError> {
        let mut items = write(&self.store.meal_packages, "meal_packages")?;
        let before = items.len();
        items.retain(|m| m.id != id);
        Ok(items.len() < before)
    }
}

// ── Assignment repository ────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MemAssignmentRepository {
    pub store: MemStore,
}

impl AssignmentRepository for MemAssignmentRepository {
    async fn list(
        &self,
        filter: &AssignmentListFilter,
        sort_by: AssignmentSortBy,
        page: PageRequest,
    ) -> Result<Page<BoardingAssignment>, BoardingServiceError> {
        let assignments = read(&self.store.assignments, "assignments")?;
        let mut matched: Vec<BoardingAssignment> = assignments
            .iter()
            .filter(|a| filter.matches(a))
            .cloned()
            .collect();
        drop(assignments);
        match sort_by {
            AssignmentSortBy::AssignedDate(Sort::Desc) => {
                matched.sort_by(|a, b| b.assigned_date.cmp(&a.assigned_date));
            }
            AssignmentSortBy::AssignedDate(Sort::Asc) => {
                matched.sort_by(|a, b| a.assigned_date.cmp(&b.assigned_date));
            }
            AssignmentSortBy::CreatedAt(Sort::Desc) => {
                matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            AssignmentSortBy::CreatedAt(Sort::Asc) => {
                matched.sort_by(|a, b| a.created_at.cmp(&b.created_at));
            }
        }
        Ok(Page::from_items(matched, page))
    }

    async fn all(&self) -> Result<Vec<BoardingAssignment>, BoardingServiceError> {
        Ok(read(&self.store.assignments, "assignments")?.clone())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<BoardingAssignment>, BoardingServiceError> {
        Ok(read(&self.store.assignments, "assignments")?
            .iter()
            .find(|a| a.id == id)
            .cloned())
    }

    async fn create(&self, assignment: &BoardingAssignment) -> Result<(), BoardingServiceError> {
        // Conflict check and insert under one write lock. Creation is
        // refused whenever the user already holds an active assignment,
        // whatever the status of the new record.
        let mut assignments = write(&self.store.assignments, "assignments")?;
        if assignments.iter().any(|a| {
            a.status == AssignmentStatus::Active
                && a.user_id == assignment.user_id
                && a.user_type == assignment.user_type
        }) {
            return Err(BoardingServiceError::UserAlreadyAssigned);
        }
        assignments.push(assignment.clone());
        Ok(())
    }

    async fn update(&self, assignment: &BoardingAssignment) -> Result<(), BoardingServiceError> {
        let mut assignments = write(&self.store.assignments, "assignments")?;
        let slot = assignments
            .iter_mut()
            .find(|a| a.id == assignment.id)
            .ok_or(BoardingServiceError::AssignmentNotFound)?;
        *slot = assignment.clone();
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, BoardingServiceError> {
        let mut assignments = write(&self.store.assignments, "assignments")?;
        let before = assignments.len();
        assignments.retain(|a| a.id != id);
        Ok(assignments.len() < before)
    }
}
