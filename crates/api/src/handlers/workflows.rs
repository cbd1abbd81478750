//! Read-only workflow endpoints. Authoring happens in the surrounding
//! application, not through this API.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use db::repository::workflows as wf_repo;

use super::AppState;

pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<Vec<db::models::WorkflowRow>>, StatusCode> {
    match wf_repo::list_workflows(&state.pool).await {
        Ok(workflows) => Ok(Json(workflows)),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}

pub async fn get(
    Path(id): Path<Uuid>,
    State(state): State<AppState>,
) -> Result<Json<db::models::WorkflowRow>, StatusCode> {
    match wf_repo::get_workflow(&state.pool, id).await {
        Ok(wf) => Ok(Json(wf)),
        Err(db::DbError::NotFound) => Err(StatusCode::NOT_FOUND),
        Err(_) => Err(StatusCode::INTERNAL_SERVER_ERROR),
    }
}
