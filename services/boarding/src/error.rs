use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Boarding service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum BoardingServiceError {
    #[error("user not found")]
    UserNotFound,
    #[error("package type not found")]
    PackageTypeNotFound,
    #[error("package not found")]
    PackageNotFound,
    #[error("meal package not found")]
    MealPackageNotFound,
    #[error("assignment not found")]
    AssignmentNotFound,
    #[error("user is already assigned to an active boarding package")]
    UserAlreadyAssigned,
    #[error("discount percentage must be between 0 and 100")]
    InvalidDiscount,
    #[error("price must be a non-negative number")]
    InvalidPrice,
    #[error("invalid email")]
    InvalidEmail,
    #[error("profile does not match user type")]
    InvalidProfile,
    #[error("missing data")]
    MissingData,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl BoardingServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PackageTypeNotFound => "PACKAGE_TYPE_NOT_FOUND",
            Self::PackageNotFound => "PACKAGE_NOT_FOUND",
            Self::MealPackageNotFound => "MEAL_PACKAGE_NOT_FOUND",
            Self::AssignmentNotFound => "ASSIGNMENT_NOT_FOUND",
            Self::UserAlreadyAssigned => "USER_ALREADY_ASSIGNED",
            Self::InvalidDiscount => "INVALID_DISCOUNT",
            Self::InvalidPrice => "INVALID_PRICE",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::InvalidProfile => "INVALID_PROFILE",
            Self::MissingData => "MISSING_DATA",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for BoardingServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::PackageTypeNotFound
            | Self::PackageNotFound
            | Self::MealPackageNotFound
            | Self::AssignmentNotFound => StatusCode::NOT_FOUND,
            Self::UserAlreadyAssigned => StatusCode::CONFLICT,
            Self::InvalidDiscount
            | Self::InvalidPrice
            | Self::InvalidEmail
            | Self::InvalidProfile
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
