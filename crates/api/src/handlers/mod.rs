//! Request handlers.
//!
//! Every handler owns a [`ModelState`] for the duration of the request and
//! drains it into the error body when it rejects the request.

pub mod park;
pub mod trail;

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::Json;
use parky_core::model_state::ModelState;
use validator::Validate;

use crate::error::AppError;
use crate::state::AppState;

/// Unwrap a JSON body. A missing, malformed or `null` body is recorded in
/// `model_state` and rejected with 400.
pub(crate) fn read_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    model_state: &mut ModelState,
) -> Result<T, AppError> {
    match payload {
        Ok(Json(input)) => Ok(input),
        Err(rejection) => {
            model_state.add_record_error(rejection.body_text());
            Err(bad_request(model_state))
        }
    }
}

/// Run field validation, recording every violation in `model_state`.
pub(crate) fn validate<T: Validate>(
    input: &T,
    model_state: &mut ModelState,
) -> Result<(), AppError> {
    if let Err(errors) = input.validate() {
        model_state.merge(ModelState::from(&errors));
    }
    if model_state.is_valid() {
        Ok(())
    } else {
        Err(bad_request(model_state))
    }
}

/// Reject when the body's id differs from the path id.
pub(crate) fn check_id_matches(
    path_id: i64,
    body_id: i64,
    model_state: &mut ModelState,
) -> Result<(), AppError> {
    if path_id == body_id {
        return Ok(());
    }
    model_state.add_error(
        "id",
        format!("Body id {body_id} does not match path id {path_id}"),
    );
    Err(bad_request(model_state))
}

pub(crate) fn bad_request(model_state: &mut ModelState) -> AppError {
    AppError::rejected(StatusCode::BAD_REQUEST, std::mem::take(model_state))
}

/// Duplicate-name rejection; the status depends on the compatibility mode.
pub(crate) fn conflict(
    state: &AppState,
    model_state: &mut ModelState,
    message: impl Into<String>,
) -> AppError {
    model_state.add_record_error(message);
    AppError::rejected(state.config.conflict_status(), std::mem::take(model_state))
}

/// A mutating store call failed; the message names the affected record.
pub(crate) fn persistence_failure(
    model_state: &mut ModelState,
    message: impl Into<String>,
) -> AppError {
    model_state.add_record_error(message);
    AppError::rejected(
        StatusCode::INTERNAL_SERVER_ERROR,
        std::mem::take(model_state),
    )
}
