use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::api::InstanceQuery;
use crate::handlers::helpers::render_template;
use crate::models::AppState;
use crate::services::spawn_instance_query;
use crate::templates::{ProgressRow, QueryProgressTemplate};

/// Starts an instance query in the background; progress is reported by
/// `query_progress`.
pub async fn instance_query_post(
    State(state): State<AppState>,
    Path(region): Path<String>,
    Json(query): Json<InstanceQuery>,
) -> impl IntoResponse {
    spawn_instance_query(state.clone(), region, query);
    StatusCode::ACCEPTED
}

pub async fn query_progress(State(state): State<AppState>) -> Response {
    let rows = state
        .progress
        .rows()
        .into_iter()
        .map(|(checkbox_id, label, checked)| ProgressRow { checkbox_id, label, checked })
        .collect();
    render_template(QueryProgressTemplate {
        rows,
        complete: state.progress.is_complete(),
    })
}

pub async fn query_progress_json(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "complete": state.progress.is_complete(),
        "queries": state.progress.rows().into_iter().map(|(id, label, checked)| {
            serde_json::json!({ "id": id, "label": label, "checked": checked })
        }).collect::<Vec<_>>(),
    }))
}
