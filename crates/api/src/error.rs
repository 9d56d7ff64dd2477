use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use parky_core::error::CoreError;
use parky_core::model_state::ModelState;
use parky_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// errors, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses of the form
/// `{ "error": ..., "code": ..., "errors": { key: [messages] } }`.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `parky_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persistence error from one of the stores.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request was refused with the given status; the accumulated
    /// messages are returned to the client.
    #[error("Rejected with {status}: {model_state}")]
    Rejected {
        status: StatusCode,
        model_state: ModelState,
    },

    /// The path did not name a valid resource (e.g. a non-numeric id).
    #[error("No route matches {0}")]
    RouteNotMatched(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn rejected(status: StatusCode, model_state: ModelState) -> Self {
        AppError::Rejected {
            status,
            model_state,
        }
    }
}

const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, model_state) = match self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    record_message(format!("{entity} with id {id} not found")),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", record_message(msg))
                }
                CoreError::Conflict(msg) => {
                    (StatusCode::CONFLICT, "CONFLICT", record_message(msg))
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    internal()
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(&err),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "BAD_REQUEST", record_message(msg))
            }
            AppError::Rejected {
                status,
                model_state,
            } => (status, code_for_status(status), model_state),
            AppError::RouteNotMatched(path) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                record_message(format!("No route matches {path}")),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                internal()
            }
        };

        let body = json!({
            "error": model_state.summary(),
            "code": code,
            "errors": model_state,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn record_message(message: impl Into<String>) -> ModelState {
    ModelState::new().with_record_error(message)
}

fn internal() -> (StatusCode, &'static str, ModelState) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        record_message(INTERNAL_MESSAGE),
    )
}

/// Error code reported alongside a [`AppError::Rejected`] status.
fn code_for_status(status: StatusCode) -> &'static str {
    match status {
        StatusCode::BAD_REQUEST => "VALIDATION_ERROR",
        StatusCode::NOT_FOUND => "NOT_FOUND",
        StatusCode::CONFLICT => "CONFLICT",
        s if s.is_server_error() => "INTERNAL_ERROR",
        _ => "ERROR",
    }
}

/// Classify a store error into an HTTP status, error code, and messages.
///
/// - Unique-name violations map to 409.
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 500 with a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, ModelState) {
    if err.is_unique_violation() {
        let message = match err {
            StoreError::Database(sqlx::Error::Database(db_err)) => format!(
                "Duplicate value violates unique constraint: {}",
                db_err.constraint().unwrap_or("unknown")
            ),
            other => other.to_string(),
        };
        return (StatusCode::CONFLICT, "CONFLICT", record_message(message));
    }

    match err {
        StoreError::Database(sqlx::Error::RowNotFound) => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            record_message("Resource not found"),
        ),
        other => {
            tracing::error!(error = %other, "Store error");
            internal()
        }
    }
}
