//! Handlers shared by every record resource (`/notes`, `/dishes`).
//!
//! Each handler is generic over the record kind `K`; the routes module
//! instantiates them once per kind.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use dishnote_core::record::{Record, RecordKind};
use dishnote_core::service::EntityService;
use dishnote_core::store::{PersonStore, RecordStore};
use dishnote_core::types::DbId;

use crate::error::AppResult;
use crate::extract::AppJson;
use crate::query::AuthorFilter;
use crate::response::{CreatedId, DataResponse};

/// POST /api/v1/{kind}
pub async fn create<K, S>(
    State(service): State<EntityService<K, S>>,
    AppJson(info): AppJson<K::Info>,
) -> AppResult<(StatusCode, Json<DataResponse<CreatedId>>)>
where
    K: RecordKind,
    S: RecordStore<K> + PersonStore,
{
    let id = service.create(info).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: CreatedId { id },
        }),
    ))
}

/// GET /api/v1/{kind}?author=
pub async fn list<K, S>(
    State(service): State<EntityService<K, S>>,
    Query(filter): Query<AuthorFilter>,
) -> AppResult<Json<DataResponse<Vec<Record<K::Info>>>>>
where
    K: RecordKind,
    S: RecordStore<K> + PersonStore,
{
    let records = service.list(filter.author).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/{kind}/{id}
pub async fn get_by_id<K, S>(
    State(service): State<EntityService<K, S>>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Record<K::Info>>>>
where
    K: RecordKind,
    S: RecordStore<K> + PersonStore,
{
    let record = service.get(id).await?;
    Ok(Json(DataResponse { data: record }))
}

/// PATCH /api/v1/{kind}/{id}
///
/// Only fields present in the body are changed.
pub async fn update<K, S>(
    State(service): State<EntityService<K, S>>,
    Path(id): Path<DbId>,
    AppJson(patch): AppJson<K::Patch>,
) -> AppResult<StatusCode>
where
    K: RecordKind,
    S: RecordStore<K> + PersonStore,
{
    service.update(id, patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/{kind}/{id}
pub async fn delete<K, S>(
    State(service): State<EntityService<K, S>>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode>
where
    K: RecordKind,
    S: RecordStore<K> + PersonStore,
{
    service.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
