//! Decision tree HTTP routes.
//!
//! GET    /health
//! POST   /v1/decision-trees/validate     { tree }        -> { tree, fingerprint }
//! POST   /v1/decision-trees              { name, tree }  -> 201 { id, revision }
//! GET    /v1/decision-trees?skip&take                    -> [summary]
//! GET    /v1/decision-trees/{id}                         -> record
//! PATCH  /v1/decision-trees/{id}         { name?, tree? } -> { id, revision }
//! DELETE /v1/decision-trees/{id}                         -> 204

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use dtree_core::determinism::tree_fingerprint;
use dtree_core::model::ValidatedTree;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::error::ApiError;
use crate::extract::{JsonBody, PathParam, QueryParams};
use crate::request::{extract_name, extract_tree};
use crate::state::AppState;
use crate::store::{Page, TreePatch, TreeRecord, TreeSummary};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/v1/decision-trees/validate", post(validate))
        .route("/v1/decision-trees", post(create).get(list))
        .route(
            "/v1/decision-trees/{id}",
            get(fetch).patch(update).delete(remove),
        )
}

#[derive(Debug, Serialize)]
pub struct HealthOut {
    pub status: &'static str,
}

async fn health() -> Json<HealthOut> {
    Json(HealthOut { status: "ok" })
}

#[derive(Debug, Serialize)]
pub struct ValidateOut {
    pub tree: ValidatedTree,
    pub fingerprint: String,
}

async fn validate(JsonBody(body): JsonBody<Value>) -> Result<Json<ValidateOut>, ApiError> {
    let tree = required_tree(&body)?;
    let fingerprint = tree_fingerprint(&tree).map_err(|e| ApiError::Internal(e.to_string()))?;
    Ok(Json(ValidateOut { tree, fingerprint }))
}

#[derive(Debug, Serialize)]
pub struct WriteOut {
    pub id: Uuid,
    pub revision: String,
}

async fn create(
    State(state): State<AppState>,
    JsonBody(body): JsonBody<Value>,
) -> Result<(StatusCode, Json<WriteOut>), ApiError> {
    let name = extract_name(&body, true)?
        .ok_or_else(|| ApiError::bad_request("The \"name\" field must have a value"))?;
    let tree = required_tree(&body)?;

    let rec = state.store.insert(name, tree)?;
    tracing::info!(id = %rec.id, nodes = rec.tree.nodes().len(), "decision tree created");

    Ok((
        StatusCode::CREATED,
        Json(WriteOut {
            id: rec.id,
            revision: rec.revision,
        }),
    ))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub skip: Option<usize>,
    pub take: Option<usize>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryOut {
    pub id: Uuid,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<TreeSummary> for SummaryOut {
    type Error = ApiError;

    fn try_from(s: TreeSummary) -> Result<Self, Self::Error> {
        Ok(Self {
            id: s.id,
            name: s.name,
            created_at: rfc3339(s.created_at)?,
            updated_at: rfc3339(s.updated_at)?,
        })
    }
}

async fn list(
    State(state): State<AppState>,
    QueryParams(q): QueryParams<ListQuery>,
) -> Result<Json<Vec<SummaryOut>>, ApiError> {
    let max = state.config.max_page_size;
    let take = q.take.unwrap_or(state.config.default_page_size);
    if take > max {
        return Err(ApiError::bad_request(format!(
            "take must be between 0 and {max}"
        )));
    }

    let page = Page {
        skip: q.skip.unwrap_or(0),
        take,
    };
    let out = state
        .store
        .list(page)?
        .into_iter()
        .map(SummaryOut::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Json(out))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordOut {
    pub id: Uuid,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    pub revision: String,
    pub tree: ValidatedTree,
}

impl TryFrom<TreeRecord> for RecordOut {
    type Error = ApiError;

    fn try_from(r: TreeRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: r.id,
            name: r.name,
            created_at: rfc3339(r.created_at)?,
            updated_at: rfc3339(r.updated_at)?,
            revision: r.revision,
            tree: r.tree,
        })
    }
}

async fn fetch(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<Json<RecordOut>, ApiError> {
    let rec = state.store.get(id)?.ok_or_else(|| not_found(id))?;
    Ok(Json(RecordOut::try_from(rec)?))
}

async fn update(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
    JsonBody(body): JsonBody<Value>,
) -> Result<Json<WriteOut>, ApiError> {
    let patch = TreePatch {
        name: extract_name(&body, false)?,
        tree: extract_tree(&body, false)?,
    };
    if patch.is_empty() {
        return Err(ApiError::bad_request(
            "Request must contain at least one of values: [\"name\", \"tree\"]",
        ));
    }

    let rec = state.store.update(id, patch)?.ok_or_else(|| not_found(id))?;
    tracing::info!(id = %rec.id, "decision tree updated");

    Ok(Json(WriteOut {
        id: rec.id,
        revision: rec.revision,
    }))
}

async fn remove(
    State(state): State<AppState>,
    PathParam(id): PathParam<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.store.delete(id)? {
        return Err(not_found(id));
    }
    tracing::info!(%id, "decision tree deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn required_tree(body: &Value) -> Result<ValidatedTree, ApiError> {
    extract_tree(body, true)?
        .ok_or_else(|| ApiError::bad_request("The \"tree\" field must have a value"))
}

fn not_found(id: Uuid) -> ApiError {
    ApiError::NotFound(format!("Decision tree with id {id} is not found"))
}

fn rfc3339(t: OffsetDateTime) -> Result<String, ApiError> {
    t.format(&Rfc3339)
        .map_err(|e| ApiError::Internal(format!("failed to format timestamp: {e}")))
}
