//! AQ record endpoints
//!
//! | Method+Path      | Input                    | Success              |
//! |------------------|--------------------------|----------------------|
//! | GET  /aq/list    | `aq`, `limit`, `offset`  | 200 + records        |
//! | GET  /aq/get     | `aq` (required)          | 200 + record         |
//! | POST /aq/create  | record body              | 201 + stored record  |
//! | POST /aq/update  | record body              | 200 + stored record  |
//! | POST /aq/delete  | `aq` (required)          | 200 + rows affected  |

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};

use crate::http::codec::{Accepts, Encoded, Wire};
use crate::http::error::ApiError;
use crate::http::extractors::{ListQueryParams, RequiredKey};
use crate::http::server::AppState;
use crate::models::AqRecord;

/// Delete response
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub aq: String,
    /// 0 when the key did not exist; still a success
    pub rows_affected: u64,
}

/// GET /aq/list - filtered, paginated records ordered by key
async fn list_aq(
    State(state): State<Arc<AppState>>,
    Accepts(format): Accepts,
    ListQueryParams(query): ListQueryParams,
) -> Result<Encoded<Vec<AqRecord>>, ApiError> {
    let records = state.store.list(&query).await?;
    Ok(format.respond(StatusCode::OK, records))
}

/// GET /aq/get - single record by exact key
async fn get_aq(
    State(state): State<Arc<AppState>>,
    Accepts(format): Accepts,
    RequiredKey(key): RequiredKey,
) -> Result<Encoded<AqRecord>, ApiError> {
    let record = state.store.get(&key).await?;
    Ok(format.respond(StatusCode::OK, record))
}

/// POST /aq/create - insert a full record
async fn create_aq(
    State(state): State<Arc<AppState>>,
    Accepts(format): Accepts,
    Wire(record): Wire<AqRecord>,
) -> Result<Encoded<AqRecord>, ApiError> {
    let key = record.key()?;
    let created = state.store.create(&record).await?;
    tracing::info!(aq = %key.as_str(), "Created aq record");
    Ok(format.respond(StatusCode::CREATED, created))
}

/// POST /aq/update - replace every client-writable column of a record
async fn update_aq(
    State(state): State<Arc<AppState>>,
    Accepts(format): Accepts,
    Wire(record): Wire<AqRecord>,
) -> Result<Encoded<AqRecord>, ApiError> {
    let key = record.key()?;
    let updated = state.store.update(&record).await?;
    tracing::info!(aq = %key.as_str(), "Updated aq record");
    Ok(format.respond(StatusCode::OK, updated))
}

/// POST /aq/delete - delete by exact key, succeeding when absent
async fn delete_aq(
    State(state): State<Arc<AppState>>,
    Accepts(format): Accepts,
    RequiredKey(key): RequiredKey,
) -> Result<Encoded<DeleteResponse>, ApiError> {
    let rows_affected = state.store.delete(&key).await?;
    tracing::info!(aq = %key.as_str(), rows_affected, "Deleted aq record");
    Ok(format.respond(
        StatusCode::OK,
        DeleteResponse {
            aq: key.into_string(),
            rows_affected,
        },
    ))
}

/// AQ routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/aq/list", get(list_aq))
        .route("/aq/get", get(get_aq))
        .route("/aq/create", post(create_aq))
        .route("/aq/update", post(update_aq))
        .route("/aq/delete", post(delete_aq))
}
