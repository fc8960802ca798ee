//! End-to-end tests through the real router and in-memory store.

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};

use campus_boarding::router::build_router;

use crate::helpers::{ADMIN_ID, test_state};

fn server() -> TestServer {
    TestServer::new(build_router(test_state())).unwrap()
}

async fn post_authed(server: &TestServer, path: &str, body: Value) -> axum_test::TestResponse {
    server
        .post(path)
        .add_header("x-campus-user-id", ADMIN_ID)
        .add_header("x-campus-user-role", "1")
        .json(&body)
        .await
}

async fn patch_authed(server: &TestServer, path: &str, body: Value) -> axum_test::TestResponse {
    server
        .patch(path)
        .add_header("x-campus-user-id", ADMIN_ID)
        .add_header("x-campus-user-role", "1")
        .json(&body)
        .await
}

/// Seed the catalog over HTTP and return the meal package id.
async fn seed_catalog(server: &TestServer) -> String {
    let package_type = post_authed(
        server,
        "/package-types",
        json!({"name": "Boarding", "description": "Residential boarding"}),
    )
    .await;
    package_type.assert_status(StatusCode::CREATED);
    let package_type_id = package_type.json::<Value>()["id"]
        .as_str()
        .unwrap()
        .to_owned();

    let package = post_authed(
        server,
        "/packages",
        json!({"package_type_id": package_type_id, "name": "Term Boarding"}),
    )
    .await;
    package.assert_status(StatusCode::CREATED);
    let package_id = package.json::<Value>()["id"].as_str().unwrap().to_owned();

    let meal_package = post_authed(
        server,
        "/meal-packages",
        json!({"package_id": package_id, "name": "Full Board", "price": 150.0}),
    )
    .await;
    meal_package.assert_status(StatusCode::CREATED);
    meal_package.json::<Value>()["id"].as_str().unwrap().to_owned()
}

async fn seed_student(server: &TestServer) -> String {
    let user = post_authed(
        server,
        "/users",
        json!({
            "first_name": "Mina",
            "last_name": "Park",
            "email": "mina.park@example.edu",
            "user_type": "student",
            "profile": {"kind": "student", "roll_number": "R-101"}
        }),
    )
    .await;
    user.assert_status(StatusCode::CREATED);
    user.json::<Value>()["id"].as_str().unwrap().to_owned()
}

#[tokio::test]
async fn should_answer_health_checks() {
    let server = server();
    server.get("/healthz").await.assert_status_ok();
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_reject_unauthenticated_writes() {
    let server = server();
    let response = server
        .post("/users")
        .json(&json!({
            "first_name": "Mina",
            "last_name": "Park",
            "user_type": "student",
            "profile": {"kind": "student", "roll_number": "R-101"}
        }))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_walk_assignment_lifecycle_over_http() {
    let server = server();
    let meal_package_id = seed_catalog(&server).await;
    let user_id = seed_student(&server).await;

    // Eligible before any assignment.
    let pool = server.get("/users/assignable").await.json::<Value>();
    assert_eq!(pool.as_array().unwrap().len(), 1);
    assert_eq!(pool[0]["is_assigned"], false);

    // Create with a 10% discount: 150 → 15 off → 135.
    let created = post_authed(
        &server,
        "/assignments",
        json!({
            "user_id": user_id,
            "user_type": "student",
            "meal_package_id": meal_package_id,
            "discount_percentage": 10.0,
            "notes": "Sibling discount"
        }),
    )
    .await;
    created.assert_status(StatusCode::CREATED);
    let assignment = created.json::<Value>();
    assert_eq!(assignment["original_price"], 150.0);
    assert_eq!(assignment["discount_amount"], 15.0);
    assert_eq!(assignment["final_price"], 135.0);
    assert_eq!(assignment["user_name"], "Mina Park");
    assert_eq!(assignment["meal_package_name"], "Full Board");
    assert_eq!(assignment["status"], "active");
    let assignment_id = assignment["id"].as_str().unwrap().to_owned();

    // Now excluded from the eligible pool.
    let pool = server.get("/users/assignable").await.json::<Value>();
    assert_eq!(pool[0]["is_assigned"], true);

    // Second active assignment conflicts.
    let conflict = post_authed(
        &server,
        "/assignments",
        json!({
            "user_id": user_id,
            "user_type": "student",
            "meal_package_id": meal_package_id
        }),
    )
    .await;
    conflict.assert_status(StatusCode::CONFLICT);
    let body = conflict.json::<Value>();
    assert_eq!(body["kind"], "USER_ALREADY_ASSIGNED");
    assert_eq!(
        body["message"],
        "user is already assigned to an active boarding package"
    );

    // Deactivate, then a fresh assignment succeeds.
    patch_authed(
        &server,
        &format!("/assignments/{assignment_id}"),
        json!({"status": "inactive"}),
    )
    .await
    .assert_status_ok();

    let again = post_authed(
        &server,
        "/assignments",
        json!({
            "user_id": user_id,
            "user_type": "student",
            "meal_package_id": meal_package_id
        }),
    )
    .await;
    again.assert_status(StatusCode::CREATED);
    let second_id = again.json::<Value>()["id"].as_str().unwrap().to_owned();

    // Summary counts only the active assignment (no discount this time).
    let summary = server.get("/assignments/summary").await.json::<Value>();
    assert_eq!(summary["total_active"], 1);
    assert_eq!(summary["active_students"], 1);
    assert_eq!(summary["total_revenue"], 150.0);

    // Hard delete drops it from list and summary.
    let deleted = server
        .delete(&format!("/assignments/{second_id}"))
        .add_header("x-campus-user-id", ADMIN_ID)
        .add_header("x-campus-user-role", "1")
        .await;
    deleted.assert_status(StatusCode::NO_CONTENT);

    let summary = server.get("/assignments/summary").await.json::<Value>();
    assert_eq!(summary["total_active"], 0);
    assert_eq!(summary["total_revenue"], 0.0);

    let listed = server.get("/assignments").await.json::<Value>();
    assert_eq!(listed["total"], 1); // only the inactive record remains
    assert_eq!(listed["data"][0]["status"], "inactive");
}

#[tokio::test]
async fn should_return_paginated_envelope() {
    let server = server();
    seed_catalog(&server).await;

    let page = server.get("/meal-packages?per-page=1&page=1").await;
    page.assert_status_ok();
    let body = page.json::<Value>();
    assert_eq!(body["total"], 1);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 1);
    assert_eq!(body["total_pages"], 1);
    assert_eq!(body["data"][0]["name"], "Full Board");
}

#[tokio::test]
async fn should_reject_unknown_filter_values() {
    let server = server();
    let response = server.get("/users?user-type=wizard").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "MISSING_DATA");
}

#[tokio::test]
async fn should_return_404_with_error_body_for_unknown_user() {
    let server = server();
    let response = server
        .get("/users/00000000-0000-0000-0000-00000000dead")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body = response.json::<Value>();
    assert_eq!(body["kind"], "USER_NOT_FOUND");
    assert_eq!(body["message"], "user not found");
}

#[tokio::test]
async fn should_reject_out_of_range_discount_over_http() {
    let server = server();
    let meal_package_id = seed_catalog(&server).await;
    let user_id = seed_student(&server).await;

    let response = post_authed(
        &server,
        "/assignments",
        json!({
            "user_id": user_id,
            "user_type": "student",
            "meal_package_id": meal_package_id,
            "discount_percentage": 120.0
        }),
    )
    .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>()["kind"], "INVALID_DISCOUNT");
}
