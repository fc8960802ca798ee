use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use campus_core::health::{healthz, readyz};
use campus_core::middleware::request_id_layer;

use crate::handlers::{
    assignment::{
        create_assignment, delete_assignment, get_assignment, get_assignment_summary,
        list_assignments, update_assignment,
    },
    catalog::{
        create_meal_package, create_package, create_package_type, delete_meal_package,
        delete_package, delete_package_type, get_meal_package, get_package, get_package_type,
        list_meal_packages, list_package_types, list_packages, update_meal_package,
        update_package, update_package_type,
    },
    directory::{
        create_user, delete_user, get_user, list_assignable_users, list_users, update_user,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Directory
        .route("/users", get(list_users))
        .route("/users", post(create_user))
        .route("/users/assignable", get(list_assignable_users))
        .route("/users/{id}", get(get_user))
        .route("/users/{id}", patch(update_user))
        .route("/users/{id}", delete(delete_user))
        // Package types
        .route("/package-types", get(list_package_types))
        .route("/package-types", post(create_package_type))
        .route("/package-types/{id}", get(get_package_type))
        .route("/package-types/{id}", patch(update_package_type))
        .route("/package-types/{id}", delete(delete_package_type))
        // Packages
        .route("/packages", get(list_packages))
        .route("/packages", post(create_package))
        .route("/packages/{id}", get(get_package))
        .route("/packages/{id}", patch(update_package))
        .route("/packages/{id}", delete(delete_package))
        // Meal packages
        .route("/meal-packages", get(list_meal_packages))
        .route("/meal-packages", post(create_meal_package))
        .route("/meal-packages/{id}", get(get_meal_package))
        .route("/meal-packages/{id}", patch(update_meal_package))
        .route("/meal-packages/{id}", delete(delete_meal_package))
        // Assignments
        .route("/assignments", get(list_assignments))
        .route("/assignments", post(create_assignment))
        .route("/assignments/summary", get(get_assignment_summary))
        .route("/assignments/{id}", get(get_assignment))
        .route("/assignments/{id}", patch(update_assignment))
        .route("/assignments/{id}", delete(delete_assignment))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
