use crate::infra::mem::{
    MemAssignmentRepository, MemMealPackageRepository, MemPackageRepository,
    MemPackageTypeRepository, MemStore, MemUserDirectory,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub store: MemStore,
}

impl AppState {
    pub fn user_directory(&self) -> MemUserDirectory {
        MemUserDirectory {
            store: self.store.clone(),
        }
    }

    pub fn package_type_repo(&self) -> MemPackageTypeRepository {
        MemPackageTypeRepository {
            store: self.store.clone(),
        }
    }

    pub fn package_repo(&self) -> MemPackageRepository {
        MemPackageRepository {
            store: self.store.clone(),
        }
    }

    pub fn meal_package_repo(&self) -> MemMealPackageRepository {
        MemMealPackageRepository {
            store: self.store.clone(),
        }
    }

    pub fn assignment_repo(&self) -> MemAssignmentRepository {
        MemAssignmentRepository {
            store: self.store.clone(),
        }
    }
}
