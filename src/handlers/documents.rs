use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::document::{Document, DocumentPatch};
use crate::models::AppState;

pub async fn document_get(State(state): State<AppState>, Path(region): Path<String>) -> impl IntoResponse {
    Json(state.document(&region).snapshot())
}

pub async fn document_put(
    State(state): State<AppState>,
    Path(region): Path<String>,
    Json(mut document): Json<Document>,
) -> impl IntoResponse {
    document.normalize();
    tracing::info!(%region, instances = document.instances.len(), "Document replaced");
    state.document(&region).replace(document);
    state.redraw(&region);
    StatusCode::NO_CONTENT
}

/// Merges a partial document, e.g. records pasted from another diagram.
pub async fn document_merge(
    State(state): State<AppState>,
    Path(region): Path<String>,
    Json(patch): Json<DocumentPatch>,
) -> impl IntoResponse {
    state.document(&region).update(|document| document.load(patch));
    state.redraw(&region);
    StatusCode::NO_CONTENT
}
