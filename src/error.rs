use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Please login")]
    Unauthenticated,

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0} is required")]
    MissingField(String),

    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Cannot move application from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username or email already exists")]
    DuplicateUser,

    #[error("You have already applied to this job")]
    DuplicateApplication,

    #[error("Interview already scheduled for this application")]
    AlreadyScheduled,

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable machine-readable kind carried in failure bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Config(_) => "config",
            Error::Unauthenticated => "unauthenticated",
            Error::Unauthorized(_) => "unauthorized",
            Error::MissingField(_) => "missing_field",
            Error::InvalidStatus(_) => "invalid_status",
            Error::InvalidTransition { .. } => "invalid_transition",
            Error::BadRequest(_) => "bad_request",
            Error::InvalidCredentials => "invalid_credentials",
            Error::DuplicateUser => "duplicate_user",
            Error::DuplicateApplication => "duplicate_application",
            Error::AlreadyScheduled => "already_scheduled",
            Error::NotFound(_) => "not_found",
            Error::Database(_) => "storage_failure",
            Error::Validation(_) => "validation",
            Error::Json(_) => "bad_request",
            Error::Internal(_) => "internal",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::Unauthenticated | Error::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Error::Unauthorized(_) => StatusCode::FORBIDDEN,
            Error::MissingField(_)
            | Error::InvalidStatus(_)
            | Error::BadRequest(_)
            | Error::Validation(_)
            | Error::Json(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::DuplicateUser
            | Error::DuplicateApplication
            | Error::AlreadyScheduled
            | Error::InvalidTransition { .. } => StatusCode::CONFLICT,
            Error::Config(_) | Error::Database(_) | Error::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let status = self.status_code();
        let message = match &self {
            Error::Database(err) => {
                tracing::error!(error = ?err, "storage failure");
                "Storage operation failed".to_string()
            }
            Error::Internal(msg) | Error::Config(msg) => {
                tracing::error!(error = %msg, "internal error");
                "An unexpected error occurred".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "success": false,
            "error": self.kind(),
            "message": message,
        }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => Error::NotFound("Resource not found".to_string()),
            other => Error::Database(other),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Error::BadRequest(rejection.body_text())
    }
}
