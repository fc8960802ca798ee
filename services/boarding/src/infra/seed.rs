//! Demo fixtures for local development, gated behind `BOARDING_SEED_DEMO`.

use anyhow::Context as _;
use uuid::Uuid;

use campus_domain::user::UserType;

use crate::domain::types::UserProfile;
use crate::error::BoardingServiceError;
use crate::state::AppState;
use crate::usecase::assignment::{CreateAssignmentInput, CreateAssignmentUseCase};
use crate::usecase::catalog::{
    CreateMealPackageInput, CreateMealPackageUseCase, CreatePackageInput, CreatePackageTypeInput,
    CreatePackageTypeUseCase, CreatePackageUseCase,
};
use crate::usecase::directory::{CreateUserInput, CreateUserUseCase};

/// Populate an empty store with a small demo data set: a boarding package
/// hierarchy, a handful of users across the three directories, and one
/// discounted assignment.
pub async fn seed_demo_data(state: &AppState) -> Result<(), BoardingServiceError> {
    let package_type = CreatePackageTypeUseCase {
        repo: state.package_type_repo(),
    }
    .execute(CreatePackageTypeInput {
        name: "Boarding".to_owned(),
        description: Some("Residential boarding packages".to_owned()),
    })
    .await
    .context("seed package type")?;

    let package = CreatePackageUseCase {
        repo: state.package_repo(),
        package_types: state.package_type_repo(),
    }
    .execute(CreatePackageInput {
        package_type_id: package_type.id,
        name: "Term Boarding".to_owned(),
        description: None,
    })
    .await
    .context("seed package")?;

    let full_board = CreateMealPackageUseCase {
        repo: state.meal_package_repo(),
        packages: state.package_repo(),
    }
    .execute(CreateMealPackageInput {
        package_id: package.id,
        name: "Full Board".to_owned(),
        price: 150.0,
        note: Some("Three meals a day".to_owned()),
    })
    .await
    .context("seed full board")?;

    CreateMealPackageUseCase {
        repo: state.meal_package_repo(),
        packages: state.package_repo(),
    }
    .execute(CreateMealPackageInput {
        package_id: package.id,
        name: "Half Board".to_owned(),
        price: 95.0,
        note: None,
    })
    .await
    .context("seed half board")?;

    let create_user = CreateUserUseCase {
        directory: state.user_directory(),
    };
    let student = create_user
        .execute(CreateUserInput {
            first_name: "Mina".to_owned(),
            last_name: "Park".to_owned(),
            email: Some("mina.park@example.edu".to_owned()),
            photo_url: None,
            user_type: UserType::Student,
            status: None,
            profile: UserProfile::Student {
                roll_number: "R-101".to_owned(),
            },
        })
        .await
        .context("seed student")?;
    create_user
        .execute(CreateUserInput {
            first_name: "Tomas".to_owned(),
            last_name: "Riva".to_owned(),
            email: Some("tomas.riva@example.edu".to_owned()),
            photo_url: None,
            user_type: UserType::Teacher,
            status: None,
            profile: UserProfile::Teacher {
                subjects: vec!["mathematics".to_owned(), "physics".to_owned()],
                years_of_experience: 9,
                designation: Some("Head of Sciences".to_owned()),
            },
        })
        .await
        .context("seed teacher")?;
    create_user
        .execute(CreateUserInput {
            first_name: "Ana".to_owned(),
            last_name: "Sousa".to_owned(),
            email: None,
            photo_url: None,
            user_type: UserType::Staff,
            status: None,
            profile: UserProfile::Staff {
                designation: "Warden".to_owned(),
                years_of_experience: 4,
            },
        })
        .await
        .context("seed staff")?;

    CreateAssignmentUseCase {
        repo: state.assignment_repo(),
        directory: state.user_directory(),
        meal_packages: state.meal_package_repo(),
    }
    .execute(CreateAssignmentInput {
        user_id: student.id,
        user_type: UserType::Student,
        meal_package_id: full_board.id,
        discount_percentage: 10.0,
        notes: Some("Sibling discount".to_owned()),
        status: None,
        assigned_date: None,
        assigned_by: Uuid::nil(),
    })
    .await
    .context("seed assignment")?;

    Ok(())
}
