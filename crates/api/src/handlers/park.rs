//! Handlers for the `/parks` resource.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{header, HeaderName, StatusCode};
use axum::Json;
use parky_core::error::CoreError;
use parky_core::model_state::ModelState;
use parky_db::mapper::ParkMapper;
use parky_db::models::park::{Park, ParkDto};

use super::{check_id_matches, conflict, persistence_failure, read_body, validate};
use crate::error::{AppError, AppResult};
use crate::extract::RecordId;
use crate::routes::API_PREFIX;
use crate::state::AppState;

fn not_found(id: i64) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Park", id })
}

/// GET /api/v1/parks
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<ParkDto>>> {
    let parks = state.parks.list().await?;
    Ok(Json(parks.into_iter().map(ParkMapper::to_dto).collect()))
}

/// GET /api/v1/parks/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<Json<ParkDto>> {
    let park = state.parks.find_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(ParkMapper::to_dto(park)))
}

/// POST /api/v1/parks
///
/// Responds 201 with a `Location` header pointing at the new park.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<ParkDto>, JsonRejection>,
) -> AppResult<(StatusCode, [(HeaderName, String); 1], Json<Park>)> {
    let mut model_state = ModelState::new();
    let input = read_body(payload, &mut model_state)?;
    validate(&input, &mut model_state)?;

    if state.parks.exists_by_name(&input.name).await? {
        tracing::warn!(name = %input.name, "Park name already exists");
        return Err(conflict(&state, &mut model_state, "National Park Exists!"));
    }

    let park = ParkMapper::to_entity(input);

    let created = match state.parks.create(&park).await {
        Ok(created) => created,
        Err(err) if err.is_unique_violation() => {
            tracing::warn!(name = %park.name, "Park name taken by a concurrent create");
            return Err(conflict(&state, &mut model_state, "National Park Exists!"));
        }
        Err(err) => {
            tracing::error!(error = %err, name = %park.name, "Failed to save park");
            return Err(persistence_failure(
                &mut model_state,
                format!("Something went wrong when saving the record {}", park.name),
            ));
        }
    };

    tracing::info!(park_id = created.id, name = %created.name, "Park created");
    let location = format!("{API_PREFIX}/parks/{}", created.id);
    Ok((StatusCode::CREATED, [(header::LOCATION, location)], Json(created)))
}

/// PATCH /api/v1/parks/{id}
pub async fn update(
    State(state): State<AppState>,
    RecordId(id): RecordId,
    payload: Result<Json<ParkDto>, JsonRejection>,
) -> AppResult<StatusCode> {
    let mut model_state = ModelState::new();
    let input = read_body(payload, &mut model_state)?;
    check_id_matches(id, input.id, &mut model_state)?;
    validate(&input, &mut model_state)?;

    let park = ParkMapper::to_entity(input);

    match state.parks.update(&park).await {
        Ok(true) => {
            tracing::info!(park_id = park.id, name = %park.name, "Park updated");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => {
            tracing::warn!(park_id = park.id, "Park update matched no row");
            Err(persistence_failure(
                &mut model_state,
                format!("Something went wrong when updating the record {}", park.name),
            ))
        }
        Err(err) if err.is_unique_violation() => {
            Err(conflict(&state, &mut model_state, "National Park Exists!"))
        }
        Err(err) => {
            tracing::error!(error = %err, park_id = park.id, "Failed to update park");
            Err(persistence_failure(
                &mut model_state,
                format!("Something went wrong when updating the record {}", park.name),
            ))
        }
    }
}

/// DELETE /api/v1/parks/{id}
pub async fn delete(
    State(state): State<AppState>,
    RecordId(id): RecordId,
) -> AppResult<StatusCode> {
    if !state.parks.exists_by_id(id).await? {
        return Err(not_found(id));
    }

    // A concurrent delete can remove the row between the checks.
    let park = state.parks.find_by_id(id).await?.ok_or_else(|| not_found(id))?;

    let mut model_state = ModelState::new();
    match state.parks.delete(&park).await {
        Ok(true) => {
            tracing::info!(park_id = id, name = %park.name, "Park deleted");
            Ok(StatusCode::NO_CONTENT)
        }
        Ok(false) => Err(not_found(id)),
        Err(err) => {
            tracing::error!(error = %err, park_id = id, "Failed to delete park");
            Err(persistence_failure(
                &mut model_state,
                format!("Something went wrong when deleting the record {}", park.name),
            ))
        }
    }
}
