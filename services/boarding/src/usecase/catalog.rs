//! Master-catalog operations: package types, packages, meal packages.
//!
//! Referential checks run against the current catalog at write time; rows
//! are never cascaded into assignments, which carry their own snapshots.

use chrono::Utc;
use uuid::Uuid;

use campus_domain::pagination::{Page, PageRequest};

use crate::domain::repository::{MealPackageRepository, PackageRepository, PackageTypeRepository};
use crate::domain::types::{MealPackage, Package, PackageType};
use crate::error::BoardingServiceError;

fn valid_price(price: f64) -> bool {
    price.is_finite() && price >= 0.0
}

// ── Package types ────────────────────────────────────────────────────────────

pub struct ListPackageTypesUseCase<R: PackageTypeRepository> {
    pub repo: R,
}

impl<R: PackageTypeRepository> ListPackageTypesUseCase<R> {
    pub async fn execute(
        &self,
        page: PageRequest,
    ) -> Result<Page<PackageType>, BoardingServiceError> {
        self.repo.list(page).await
    }
}

pub struct GetPackageTypeUseCase<R: PackageTypeRepository> {
    pub repo: R,
}

impl<R: PackageTypeRepository> GetPackageTypeUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<PackageType, BoardingServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(BoardingServiceError::PackageTypeNotFound)
    }
}

pub struct CreatePackageTypeInput {
    pub name: String,
    pub description: Option<String>,
}

pub struct CreatePackageTypeUseCase<R: PackageTypeRepository> {
    pub repo: R,
}

impl<R: PackageTypeRepository> CreatePackageTypeUseCase<R> {
    pub async fn execute(
        &self,
        input: CreatePackageTypeInput,
    ) -> Result<PackageType, BoardingServiceError> {
        if input.name.trim().is_empty() {
            return Err(BoardingServiceError::MissingData);
        }
        let now = Utc::now();
        let package_type = PackageType {
            id: Uuid::now_v7(),
            name: input.name,
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&package_type).await?;
        Ok(package_type)
    }
}

#[derive(Default)]
pub struct UpdatePackageTypeInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

pub struct UpdatePackageTypeUseCase<R: PackageTypeRepository> {
    pub repo: R,
}

impl<R: PackageTypeRepository> UpdatePackageTypeUseCase<R> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdatePackageTypeInput,
    ) -> Result<PackageType, BoardingServiceError> {
        if input.name.is_none() && input.description.is_none() {
            return Err(BoardingServiceError::MissingData);
        }
        let mut package_type = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(BoardingServiceError::PackageTypeNotFound)?;
        if let Some(name) = input.name {
            if name.trim().is_empty() {
                return Err(BoardingServiceError::MissingData);
            }
            package_type.name = name;
        }
        if let Some(description) = input.description {
            package_type.description = Some(description);
        }
        package_type.updated_at = Utc::now();
        self.repo.update(&package_type).await?;
        Ok(package_type)
    }
}

pub struct DeletePackageTypeUseCase<R: PackageTypeRepository> {
    pub repo: R,
}

impl<R: PackageTypeRepository> DeletePackageTypeUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), BoardingServiceError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(BoardingServiceError::PackageTypeNotFound)
        }
    }
}

// ── Packages ─────────────────────────────────────────────────────────────────

pub struct ListPackagesUseCase<R: PackageRepository> {
    pub repo: R,
}

impl<R: PackageRepository> ListPackagesUseCase<R> {
    pub async fn execute(&self, page: PageRequest) -> Result<Page<Package>, BoardingServiceError> {
        self.repo.list(page).await
    }
}

pub struct GetPackageUseCase<R: PackageRepository> {
    pub repo: R,
}

impl<R: PackageRepository> GetPackageUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<Package, BoardingServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(BoardingServiceError::PackageNotFound)
    }
}

pub struct CreatePackageInput {
    pub package_type_id: Uuid,
    pub name: String,
    pub description: Option<String>,
}

pub struct CreatePackageUseCase<R: PackageRepository, T: PackageTypeRepository> {
    pub repo: R,
    pub package_types: T,
}

impl<R: PackageRepository, T: PackageTypeRepository> CreatePackageUseCase<R, T> {
    pub async fn execute(&self, input: CreatePackageInput) -> Result<Package, BoardingServiceError> {
        if input.name.trim().is_empty() {
            return Err(BoardingServiceError::MissingData);
        }
        if !self.package_types.exists(input.package_type_id).await? {
            return Err(BoardingServiceError::PackageTypeNotFound);
        }
        let now = Utc::now();
        let package = Package {
            id: Uuid::now_v7(),
            package_type_id: input.package_type_id,
            name: input.name,
            description: input.description,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&package).await?;
        Ok(package)
    }
}

#[derive(Default)]
pub struct UpdatePackageInput {
    pub package_type_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
}

pub struct UpdatePackageUseCase<R: PackageRepository, T: PackageTypeRepository> {
    pub repo: R,
    pub package_types: T,
}

impl<R: PackageRepository, T: PackageTypeRepository> UpdatePackageUseCase<R, T> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdatePackageInput,
    ) -> Result<Package, BoardingServiceError> {
        if input.package_type_id.is_none() && input.name.is_none() && input.description.is_none() {
            return Err(BoardingServiceError::MissingData);
        }
        let mut package = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(BoardingServiceError::PackageNotFound)?;
        if let Some(package_type_id) = input.package_type_id {
            if !self.package_types.exists(package_type_id).await? {
                return Err(BoardingServiceError::PackageTypeNotFound);
            }
            package.package_type_id = package_type_id;
        }
        if let Some(name) = input.name {
            if name.trim().is_empty() {
                return Err(BoardingServiceError::MissingData);
            }
            package.name = name;
        }
        if let Some(description) = input.description {
            package.description = Some(description);
        }
        package.updated_at = Utc::now();
        self.repo.update(&package).await?;
        Ok(package)
    }
}

pub struct DeletePackageUseCase<R: PackageRepository> {
    pub repo: R,
}

impl<R: PackageRepository> DeletePackageUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), BoardingServiceError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(BoardingServiceError::PackageNotFound)
        }
    }
}

// ── Meal packages ────────────────────────────────────────────────────────────

pub struct ListMealPackagesUseCase<R: MealPackageRepository> {
    pub repo: R,
}

impl<R: MealPackageRepository> ListMealPackagesUseCase<R> {
    pub async fn execute(
        &self,
        page: PageRequest,
    ) -> Result<Page<MealPackage>, BoardingServiceError> {
        self.repo.list(page).await
    }
}

pub struct GetMealPackageUseCase<R: MealPackageRepository> {
    pub repo: R,
}

impl<R: MealPackageRepository> GetMealPackageUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<MealPackage, BoardingServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(BoardingServiceError::MealPackageNotFound)
    }
}

pub struct CreateMealPackageInput {
    pub package_id: Uuid,
    pub name: String,
    pub price: f64,
    pub note: Option<String>,
}

pub struct CreateMealPackageUseCase<R: MealPackageRepository, P: PackageRepository> {
    pub repo: R,
    pub packages: P,
}

impl<R: MealPackageRepository, P: PackageRepository> CreateMealPackageUseCase<R, P> {
    pub async fn execute(
        &self,
        input: CreateMealPackageInput,
    ) -> Result<MealPackage, BoardingServiceError> {
        if input.name.trim().is_empty() {
            return Err(BoardingServiceError::MissingData);
        }
        if !valid_price(input.price) {
            return Err(BoardingServiceError::InvalidPrice);
        }
        let package = self
            .packages
            .find_by_id(input.package_id)
            .await?
            .ok_or(BoardingServiceError::PackageNotFound)?;
        let now = Utc::now();
        let meal_package = MealPackage {
            id: Uuid::now_v7(),
            package_id: package.id,
            package_type_id: package.package_type_id,
            name: input.name,
            price: input.price,
            note: input.note,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&meal_package).await?;
        Ok(meal_package)
    }
}

#[derive(Default)]
pub struct UpdateMealPackageInput {
    pub package_id: Option<Uuid>,
    pub name: Option<String>,
    pub price: Option<f64>,
    pub note: Option<String>,
}

pub struct UpdateMealPackageUseCase<R: MealPackageRepository, P: PackageRepository> {
    pub repo: R,
    pub packages: P,
}

impl<R: MealPackageRepository, P: PackageRepository> UpdateMealPackageUseCase<R, P> {
    pub async fn execute(
        &self,
        id: Uuid,
        input: UpdateMealPackageInput,
    ) -> Result<MealPackage, BoardingServiceError> {
        if input.package_id.is_none()
            && input.name.is_none()
            && input.price.is_none()
            && input.note.is_none()
        {
            return Err(BoardingServiceError::MissingData);
        }
        if let Some(price) = input.price {
            if !valid_price(price) {
                return Err(BoardingServiceError::InvalidPrice);
            }
        }
        let mut meal_package = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(BoardingServiceError::MealPackageNotFound)?;
        if let Some(package_id) = input.package_id {
            let package = self
                .packages
                .find_by_id(package_id)
                .await?
                .ok_or(BoardingServiceError::PackageNotFound)?;
            meal_package.package_id = package.id;
            meal_package.package_type_id = package.package_type_id;
        }
        if let Some(name) = input.name {
            if name.trim().is_empty() {
                return Err(BoardingServiceError::MissingData);
            }
            meal_package.name = name;
        }
        if let Some(price) = input.price {
            meal_package.price = price;
        }
        if let Some(note) = input.note {
            meal_package.note = Some(note);
        }
        meal_package.updated_at = Utc::now();
        self.repo.update(&meal_package).await?;
        Ok(meal_package)
    }
}

pub struct DeleteMealPackageUseCase<R: MealPackageRepository> {
    pub repo: R,
}

impl<R: MealPackageRepository> DeleteMealPackageUseCase<R> {
    pub async fn execute(&self, id: Uuid) -> Result<(), BoardingServiceError> {
        if self.repo.delete(id).await? {
            Ok(())
        } else {
            Err(BoardingServiceError::MealPackageNotFound)
        }
    }
}
