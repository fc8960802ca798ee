use uuid::Uuid;

use campus_boarding::domain::types::AssignmentStatus;
use campus_boarding::error::BoardingServiceError;
use campus_boarding::usecase::assignment::{
    CreateAssignmentInput, CreateAssignmentUseCase, DeleteAssignmentUseCase,
    GetAssignmentSummaryUseCase, UpdateAssignmentInput, UpdateAssignmentUseCase,
};
use campus_domain::user::UserType;

use crate::helpers::{add_meal_package, admin_id, create_user, seed_meal_package, test_state};

const EPSILON: f64 = 1e-9;

fn create_input(
    user_id: Uuid,
    user_type: UserType,
    meal_package_id: Uuid,
    discount: f64,
) -> CreateAssignmentInput {
    CreateAssignmentInput {
        user_id,
        user_type,
        meal_package_id,
        discount_percentage: discount,
        notes: None,
        status: None,
        assigned_date: None,
        assigned_by: admin_id(),
    }
}

#[tokio::test]
async fn should_create_assignment_with_derived_price_breakdown() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;
    let student = create_user(&state, UserType::Student, "Mina", "Park").await;

    let uc = CreateAssignmentUseCase {
        repo: state.assignment_repo(),
        directory: state.user_directory(),
        meal_packages: state.meal_package_repo(),
    };
    let assignment = uc
        .execute(create_input(
            student.id,
            UserType::Student,
            meal_package.id,
            10.0,
        ))
        .await
        .unwrap();

    assert!((assignment.original_price - 150.0).abs() < EPSILON);
    assert!((assignment.discount_amount - 15.0).abs() < EPSILON);
    assert!((assignment.final_price - 135.0).abs() < EPSILON);
    assert_eq!(assignment.status, AssignmentStatus::Active);
    assert_eq!(assignment.user_name, "Mina Park");
    assert_eq!(assignment.meal_package_name, "Full Board");
    assert_eq!(assignment.assigned_by, admin_id());
}

#[tokio::test]
async fn should_reject_second_active_assignment_for_same_user() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;
    let student = create_user(&state, UserType::Student, "Mina", "Park").await;

    let uc = CreateAssignmentUseCase {
        repo: state.assignment_repo(),
        directory: state.user_directory(),
        meal_packages: state.meal_package_repo(),
    };
    uc.execute(create_input(
        student.id,
        UserType::Student,
        meal_package.id,
        0.0,
    ))
    .await
    .unwrap();

    let second = uc
        .execute(create_input(
            student.id,
            UserType::Student,
            meal_package.id,
            0.0,
        ))
        .await;
    assert!(
        matches!(second, Err(BoardingServiceError::UserAlreadyAssigned)),
        "expected UserAlreadyAssigned, got {second:?}"
    );
}

#[tokio::test]
async fn should_allow_new_assignment_after_prior_set_inactive() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;
    let student = create_user(&state, UserType::Student, "Mina", "Park").await;

    let create = CreateAssignmentUseCase {
        repo: state.assignment_repo(),
        directory: state.user_directory(),
        meal_packages: state.meal_package_repo(),
    };
    let first = create
        .execute(create_input(
            student.id,
            UserType::Student,
            meal_package.id,
            0.0,
        ))
        .await
        .unwrap();

    UpdateAssignmentUseCase {
        repo: state.assignment_repo(),
        meal_packages: state.meal_package_repo(),
    }
    .execute(
        first.id,
        UpdateAssignmentInput {
            status: Some(AssignmentStatus::Inactive),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let second = create
        .execute(create_input(
            student.id,
            UserType::Student,
            meal_package.id,
            0.0,
        ))
        .await;
    assert!(second.is_ok(), "expected success, got {second:?}");
}

#[tokio::test]
async fn should_not_conflict_across_user_types() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;
    let student = create_user(&state, UserType::Student, "Mina", "Park").await;
    let teacher = create_user(&state, UserType::Teacher, "Tomas", "Riva").await;

    let uc = CreateAssignmentUseCase {
        repo: state.assignment_repo(),
        directory: state.user_directory(),
        meal_packages: state.meal_package_repo(),
    };
    uc.execute(create_input(
        student.id,
        UserType::Student,
        meal_package.id,
        0.0,
    ))
    .await
    .unwrap();
    let other = uc
        .execute(create_input(
            teacher.id,
            UserType::Teacher,
            meal_package.id,
            0.0,
        ))
        .await;
    assert!(other.is_ok());
}

#[tokio::test]
async fn should_reject_discount_out_of_range() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;
    let student = create_user(&state, UserType::Student, "Mina", "Park").await;

    let uc = CreateAssignmentUseCase {
        repo: state.assignment_repo(),
        directory: state.user_directory(),
        meal_packages: state.meal_package_repo(),
    };
    for discount in [-1.0, 100.5, f64::NAN] {
        let result = uc
            .execute(create_input(
                student.id,
                UserType::Student,
                meal_package.id,
                discount,
            ))
            .await;
        assert!(
            matches!(result, Err(BoardingServiceError::InvalidDiscount)),
            "discount {discount} should be rejected"
        );
    }
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_or_mismatched_user() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;
    let student = create_user(&state, UserType::Student, "Mina", "Park").await;

    let uc = CreateAssignmentUseCase {
        repo: state.assignment_repo(),
        directory: state.user_directory(),
        meal_packages: state.meal_package_repo(),
    };

    let unknown = uc
        .execute(create_input(
            Uuid::now_v7(),
            UserType::Student,
            meal_package.id,
            0.0,
        ))
        .await;
    assert!(matches!(unknown, Err(BoardingServiceError::UserNotFound)));

    // Existing id presented under the wrong user type is not a match.
    let mismatched = uc
        .execute(create_input(
            student.id,
            UserType::Teacher,
            meal_package.id,
            0.0,
        ))
        .await;
    assert!(matches!(
        mismatched,
        Err(BoardingServiceError::UserNotFound)
    ));
}

#[tokio::test]
async fn should_return_meal_package_not_found_for_unknown_package() {
    let state = test_state();
    seed_meal_package(&state).await;
    let student = create_user(&state, UserType::Student, "Mina", "Park").await;

    let uc = CreateAssignmentUseCase {
        repo: state.assignment_repo(),
        directory: state.user_directory(),
        meal_packages: state.meal_package_repo(),
    };
    let result = uc
        .execute(create_input(
            student.id,
            UserType::Student,
            Uuid::now_v7(),
            0.0,
        ))
        .await;
    assert!(matches!(
        result,
        Err(BoardingServiceError::MealPackageNotFound)
    ));
}

#[tokio::test]
async fn should_refresh_snapshot_when_meal_package_changes() {
    let state = test_state();
    let full_board = seed_meal_package(&state).await;
    let half_board = add_meal_package(&state, &full_board, "Half Board", 95.0).await;
    let student = create_user(&state, UserType::Student, "Mina", "Park").await;

    let assignment = CreateAssignmentUseCase {
        repo: state.assignment_repo(),
        directory: state.user_directory(),
        meal_packages: state.meal_package_repo(),
    }
    .execute(create_input(
        student.id,
        UserType::Student,
        full_board.id,
        20.0,
    ))
    .await
    .unwrap();

    let updated = UpdateAssignmentUseCase {
        repo: state.assignment_repo(),
        meal_packages: state.meal_package_repo(),
    }
    .execute(
        assignment.id,
        UpdateAssignmentInput {
            meal_package_id: Some(half_board.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.meal_package_id, half_board.id);
    assert_eq!(updated.meal_package_name, "Half Board");
    assert!((updated.original_price - 95.0).abs() < EPSILON);
    // Discount is kept and reapplied over the refreshed price.
    assert!((updated.discount_amount - 19.0).abs() < EPSILON);
    assert!((updated.final_price - 76.0).abs() < EPSILON);
}

#[tokio::test]
async fn should_recompute_breakdown_when_only_discount_changes() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;
    let student = create_user(&state, UserType::Student, "Mina", "Park").await;

    let assignment = CreateAssignmentUseCase {
        repo: state.assignment_repo(),
        directory: state.user_directory(),
        meal_packages: state.meal_package_repo(),
    }
    .execute(create_input(
        student.id,
        UserType::Student,
        meal_package.id,
        0.0,
    ))
    .await
    .unwrap();

    let updated = UpdateAssignmentUseCase {
        repo: state.assignment_repo(),
        meal_packages: state.meal_package_repo(),
    }
    .execute(
        assignment.id,
        UpdateAssignmentInput {
            discount_percentage: Some(100.0),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert!((updated.original_price - 150.0).abs() < EPSILON);
    assert!((updated.discount_amount - 150.0).abs() < EPSILON);
    assert!(updated.final_price.abs() < EPSILON);
}

#[tokio::test]
async fn should_reject_empty_assignment_patch() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;
    let student = create_user(&state, UserType::Student, "Mina", "Park").await;

    let assignment = CreateAssignmentUseCase {
        repo: state.assignment_repo(),
        directory: state.user_directory(),
        meal_packages: state.meal_package_repo(),
    }
    .execute(create_input(
        student.id,
        UserType::Student,
        meal_package.id,
        0.0,
    ))
    .await
    .unwrap();

    let result = UpdateAssignmentUseCase {
        repo: state.assignment_repo(),
        meal_packages: state.meal_package_repo(),
    }
    .execute(assignment.id, UpdateAssignmentInput::default())
    .await;
    assert!(matches!(result, Err(BoardingServiceError::MissingData)));
}

#[tokio::test]
async fn should_reflect_deletion_in_summary() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;
    let student = create_user(&state, UserType::Student, "Mina", "Park").await;
    let teacher = create_user(&state, UserType::Teacher, "Tomas", "Riva").await;

    let create = CreateAssignmentUseCase {
        repo: state.assignment_repo(),
        directory: state.user_directory(),
        meal_packages: state.meal_package_repo(),
    };
    let kept = create
        .execute(create_input(
            student.id,
            UserType::Student,
            meal_package.id,
            10.0,
        ))
        .await
        .unwrap();
    let dropped = create
        .execute(create_input(
            teacher.id,
            UserType::Teacher,
            meal_package.id,
            0.0,
        ))
        .await
        .unwrap();

    let summary_uc = GetAssignmentSummaryUseCase {
        repo: state.assignment_repo(),
    };
    let before = summary_uc.execute().await.unwrap();
    assert_eq!(before.total_active, 2);
    assert!((before.total_revenue - (135.0 + 150.0)).abs() < EPSILON);

    DeleteAssignmentUseCase {
        repo: state.assignment_repo(),
    }
    .execute(dropped.id)
    .await
    .unwrap();

    let after = summary_uc.execute().await.unwrap();
    assert_eq!(after.total_active, 1);
    assert_eq!(after.active_students, 1);
    assert_eq!(after.active_teachers, 0);
    assert!((after.total_revenue - kept.final_price).abs() < EPSILON);
    assert!((after.average_discount - 10.0).abs() < EPSILON);
}

#[tokio::test]
async fn should_return_not_found_when_deleting_twice() {
    let state = test_state();
    let meal_package = seed_meal_package(&state).await;
    let student = create_user(&state, UserType::Student, "Mina", "Park").await;

    let assignment = CreateAssignmentUseCase {
        repo: state.assignment_repo(),
        directory: state.user_directory(),
        meal_packages: state.meal_package_repo(),
    }
    .execute(create_input(
        student.id,
        UserType::Student,
        meal_package.id,
        0.0,
    ))
    .await
    .unwrap();

    let delete = DeleteAssignmentUseCase {
        repo: state.assignment_repo(),
    };
    delete.execute(assignment.id).await.unwrap();
    let second = delete.execute(assignment.id).await;
    assert!(matches!(
        second,
        Err(BoardingServiceError::AssignmentNotFound)
    ));
}
