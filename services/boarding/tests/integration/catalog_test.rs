use uuid::Uuid;

use campus_boarding::error::BoardingServiceError;
use campus_boarding::usecase::catalog::{
    CreateMealPackageInput, CreateMealPackageUseCase, CreatePackageInput, CreatePackageUseCase,
    DeleteMealPackageUseCase, GetMealPackageUseCase, GetPackageUseCase, ListMealPackagesUseCase,
    UpdateMealPackageInput, UpdateMealPackageUseCase,
};
use campus_domain::pagination::PageRequest;

use crate::helpers::{seed_meal_package, test_state};

#[tokio::test]
async fn should_reject_package_under_unknown_package_type() {
    let state = test_state();
    let result = CreatePackageUseCase {
        repo: state.package_repo(),
        package_types: state.package_type_repo(),
    }
    .execute(CreatePackageInput {
        package_type_id: Uuid::now_v7(),
        name: "Orphan".to_owned(),
        description: None,
    })
    .await;
    assert!(matches!(
        result,
        Err(BoardingServiceError::PackageTypeNotFound)
    ));
}

#[tokio::test]
async fn should_reject_meal_package_under_unknown_package() {
    let state = test_state();
    let result = CreateMealPackageUseCase {
        repo: state.meal_package_repo(),
        packages: state.package_repo(),
    }
    .execute(CreateMealPackageInput {
        package_id: Uuid::now_v7(),
        name: "Orphan".to_owned(),
        price: 10.0,
        note: None,
    })
    .await;
    assert!(matches!(result, Err(BoardingServiceError::PackageNotFound)));
}

#[tokio::test]
async fn should_copy_package_type_from_parent_package() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;

    let package = GetPackageUseCase {
        repo: state.package_repo(),
    }
    .execute(meal_package.package_id)
    .await
    .unwrap();
    assert_eq!(meal_package.package_type_id, package.package_type_id);
}

#[tokio::test]
async fn should_reject_negative_or_non_finite_price() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;

    for price in [-0.01, f64::NAN, f64::INFINITY] {
        let result = CreateMealPackageUseCase {
            repo: state.meal_package_repo(),
            packages: state.package_repo(),
        }
        .execute(CreateMealPackageInput {
            package_id: meal_package.package_id,
            name: "Bad Price".to_owned(),
            price,
            note: None,
        })
        .await;
        assert!(
            matches!(result, Err(BoardingServiceError::InvalidPrice)),
            "price {price} should be rejected"
        );

        let update = UpdateMealPackageUseCase {
            repo: state.meal_package_repo(),
            packages: state.package_repo(),
        }
        .execute(
            meal_package.id,
            UpdateMealPackageInput {
                price: Some(price),
                ..Default::default()
            },
        )
        .await;
        assert!(matches!(update, Err(BoardingServiceError::InvalidPrice)));
    }
}

#[tokio::test]
async fn should_reject_empty_meal_package_patch() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;

    let result = UpdateMealPackageUseCase {
        repo: state.meal_package_repo(),
        packages: state.package_repo(),
    }
    .execute(meal_package.id, UpdateMealPackageInput::default())
    .await;
    assert!(matches!(result, Err(BoardingServiceError::MissingData)));
}

#[tokio::test]
async fn should_update_meal_package_price() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;

    let updated = UpdateMealPackageUseCase {
        repo: state.meal_package_repo(),
        packages: state.package_repo(),
    }
    .execute(
        meal_package.id,
        UpdateMealPackageInput {
            price: Some(175.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!((updated.price - 175.0).abs() < 1e-9);
    assert!(updated.updated_at >= meal_package.updated_at);
}

#[tokio::test]
async fn should_delete_meal_package_then_404_on_get() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;

    DeleteMealPackageUseCase {
        repo: state.meal_package_repo(),
    }
    .execute(meal_package.id)
    .await
    .unwrap();

    let result = GetMealPackageUseCase {
        repo: state.meal_package_repo(),
    }
    .execute(meal_package.id)
    .await;
    assert!(matches!(
        result,
        Err(BoardingServiceError::MealPackageNotFound)
    ));
}

#[tokio::test]
async fn should_paginate_meal_packages() {
    let state = test_state();
    let first = seed_meal_package(&state).await;
    for i in 0..4 {
        crate::helpers::add_meal_package(&state, &first, &format!("Plan {i}"), 50.0 + i as f64)
            .await;
    }

    let page = ListMealPackagesUseCase {
        repo: state.meal_package_repo(),
    }
    .execute(PageRequest {
        per_page: 2,
        page: 2,
    })
    .await
    .unwrap();

    assert_eq!(page.total, 5);
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.limit, 2);
    assert_eq!(page.total_pages, 3);
}
