//! Conversions between entities and their transfer shapes.
//!
//! Every function is a plain field-by-field copy with no validation.

use chrono::Utc;

use crate::models::park::{Park, ParkDto};
use crate::models::trail::{CreateTrail, Trail, TrailDto, UpdateTrail};

pub struct ParkMapper;

impl ParkMapper {
    pub fn to_dto(park: Park) -> ParkDto {
        ParkDto {
            id: park.id,
            name: park.name,
            state: park.state,
            picture: park.picture,
            established: park.established,
            created: Some(park.created),
        }
    }

    /// A missing `created` is filled with the current time; the store
    /// overwrites it on insert anyway.
    pub fn to_entity(dto: ParkDto) -> Park {
        Park {
            id: dto.id,
            name: dto.name,
            state: dto.state,
            picture: dto.picture,
            established: dto.established,
            created: dto.created.unwrap_or_else(Utc::now),
        }
    }
}

pub struct TrailMapper;

impl TrailMapper {
    pub fn to_dto(trail: Trail) -> TrailDto {
        TrailDto {
            id: trail.id,
            name: trail.name,
            distance: trail.distance,
            elevation: trail.elevation,
            difficulty: trail.difficulty,
            park_id: trail.park_id,
            date_created: trail.date_created,
            park: trail.park.map(ParkMapper::to_dto),
        }
    }

    pub fn to_entity(dto: TrailDto) -> Trail {
        Trail {
            id: dto.id,
            name: dto.name,
            distance: dto.distance,
            elevation: dto.elevation,
            difficulty: dto.difficulty,
            park_id: dto.park_id,
            date_created: dto.date_created,
            park: dto.park.map(ParkMapper::to_entity),
        }
    }

    /// The returned trail has id 0 until the store assigns one.
    pub fn from_create(input: CreateTrail) -> Trail {
        Trail {
            id: 0,
            name: input.name,
            distance: input.distance,
            elevation: input.elevation,
            difficulty: input.difficulty,
            park_id: input.park_id,
            date_created: Utc::now(),
            park: None,
        }
    }

    /// `date_created` is not part of the update shape and is left untouched
    /// by the store's update.
    pub fn from_update(input: UpdateTrail) -> Trail {
        Trail {
            id: input.id,
            name: input.name,
            distance: input.distance,
            elevation: input.elevation,
            difficulty: input.difficulty,
            park_id: input.park_id,
            date_created: Utc::now(),
            park: None,
        }
    }

    pub fn to_create(trail: Trail) -> CreateTrail {
        CreateTrail {
            name: trail.name,
            distance: trail.distance,
            elevation: trail.elevation,
            difficulty: trail.difficulty,
            park_id: trail.park_id,
        }
    }

    pub fn to_update(trail: Trail) -> UpdateTrail {
        UpdateTrail {
            id: trail.id,
            name: trail.name,
            distance: trail.distance,
            elevation: trail.elevation,
            difficulty: trail.difficulty,
            park_id: trail.park_id,
        }
    }
}
