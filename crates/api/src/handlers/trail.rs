//! Handlers for the `/trails` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use parky_core::error::CoreError;
use parky_core::model_state::ModelState;
use parky_db::mapper::TrailMapper;
use parky_db::models::trail::{CreateTrail, TrailDto, UpdateTrail};

use super::{check_id_matches, conflict, persistence_failure, read_body, validate};
use crate::error::{AppError, AppResult};
use crate::extract::RecordId;
use crate::routes::API_PREFIX;
use crate::state::AppState;

fn not_found(id: i64) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Trail",
        id,
    })
}

/// GET /api/v1/trails
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<TrailDto>>> {
    let trails = state.trails.list().await?;
    Ok(Json(trails.into_iter().map(TrailMapper::to_dto).collect()))
}

/// GET /api/v1/trails/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<TrailDto>> {
    let trail = state
        .trails
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(TrailMapper::to_dto(trail)))
}

/// POST /api/v1/trails
///
/// Responds 201 with a `Location` header, or 200 without one when legacy
/// status codes are enabled. The body is the created entity either way.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTrail>, JsonRejection>,
) -> AppResult<Response> {
    let mut model_state = ModelState::new();
    let input = read_body(payload, &mut model_state)?;
    validate(&input, &mut model_state)?;

    if state.trails.exists_by_name(&input.name).await? {
        tracing::warn!(name = %input.name, "Trail name already exists");
        return Err(conflict(&state, &mut model_state, "Trail Exists!"));
    }

    let trail = TrailMapper::from_create(input);

    let created = match state.trails.create(&trail).await {
        Ok(created) => created,
        Err(err) if err.is_unique_violation() => {
            tracing::warn!(name = %trail.name, "Trail name taken by a concurrent create");
            return Err(conflict(&state, &mut model_state, "Trail Exists!"));
        }
        Err(err) => {
            tracing::error!(
                error = %err,
                name = %trail.name,
                park_id = trail.park_id,
                "Failed to save trail"
            );
            return Err(persistence_failure(
                &mut model_state,
                format!("Something went wrong when saving the record {}", trail.name),
            ));
        }
    };

    tracing::info!(
        trail_id = created.id,
        park_id = created.park_id,
        name = %created.name,
        "Trail created"
    );

    let status = state.config.trail_created_status();
    if status == StatusCode::CREATED {
        let location = format!("{API_PREFIX}/trails/{}", created.id);
        Ok((status, [(header::LOCATION, location)], Json(created)).into_response())
    } else {
        Ok((status, Json(created)).into_response())
    }
}

/// PATCH /api/v1/trails/{id}
pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    payload: Result<Json<UpdateTrail>, JsonRejection>,
) -> AppResult<StatusCode> {
    let mut model_state = ModelState::new();
    let input = read_body(payload, &mut model_state)?;
    check_id_matches(id, input.id, &mut model_state)?;
    validate(&input, &mut model_state)?;

    let trail = TrailMapper::from_update(input);

    match state.trails.update(&trail).await {
        Ok(true) => {
            tracing::info!(trail_id = trail.id, name = %trail.name, "Trail updated");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => {
            tracing::warn!(trail_id = trail.id, "Trail update matched no row");
            Err(persistence_failure(
                &mut model_state,
                format!("Something went wrong when updating the record {}", trail.name),
            ))
        }
        Err(err) if err.is_unique_violation() => {
            Err(conflict(&state, &mut model_state, "Trail Exists!"))
        }
        Err(err) => {
            tracing::error!(error = %err, trail_id = trail.id, "Failed to update trail");
            Err(persistence_failure(
                &mut model_state,
                format!("Something went wrong when updating the record {}", trail.name),
            ))
        }
    }
}

/// DELETE /api/v1/trails/{id}
pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<StatusCode> {
    if !state.trails.exists_by_id(id).await? {
        return Err(not_found(id));
    }

    let trail = state
        .trails
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let mut model_state = ModelState::new();
    match state.trails.delete(&trail).await {
        Ok(true) => {
            tracing::info!(trail_id = id, name = %trail.name, "Trail deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(not_found(id)),
        Err(err) => {
            tracing::error!(error = %err, trail_id = id, "Failed to delete trail");
            Err(persistence_failure(
                &mut model_state,
                format!("Something went wrong when deleting the record {}", trail.name),
            ))
        }
    }
}
