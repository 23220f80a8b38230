//! Handlers for the `/persons` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use dishnote_core::person::{Credentials, LoginOutcome, NewPerson};
use dishnote_core::person_service::PersonService;
use dishnote_core::store::PersonStore;
use dishnote_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::response::{CreatedId, DataResponse};

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `PATCH /persons/{id}/position`. Any label is accepted,
/// including the empty string.
#[derive(Debug, Deserialize)]
pub struct ChangePositionRequest {
    pub position: String,
}

/// Response body for `PATCH /persons/{id}/position`.
#[derive(Debug, Serialize)]
pub struct PositionResponse {
    pub position: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/persons
pub async fn create<S: PersonStore>(
    State(service): State<PersonService<S>>,
    AppJson(input): AppJson<NewPerson>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedId>>)> {
    let id = service.create_person(input).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedId { id },
        }),
    ))
}

/// POST /api/v1/persons/login
pub async fn log_in<S: PersonStore>(
    State(service): State<PersonService<S>>,
    AppJson(credentials): AppJson<Credentials>,
) -> AppResult<Json<DataResponse<LoginOutcome>>> {
    let outcome = service.log_in(credentials).await?;
    Ok(Json(DataResponse { data: outcome }))
}

/// PATCH /api/v1/persons/{id}/position
pub async fn change_position<S: PersonStore>(
    State(service): State<PersonService<S>>,
    Path(id): Path<DbId>,
    AppJson(input): AppJson<ChangePositionRequest>,
) -> AppResult<Json<DataResponse<PositionResponse>>> {
    let position = service.change_position(id, input.position).await?;
    Ok(Json(DataResponse {
        data: PositionResponse { position },
    }))
}
