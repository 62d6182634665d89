use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::models::AppState;

pub async fn canvas_svg(State(state): State<AppState>, Path(region): Path<String>) -> Response {
    let canvas = state.redraw(&region);
    match canvas.to_svg() {
        Ok(svg) => ([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response(),
        Err(e) => {
            tracing::error!(%e, %region, "Canvas render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

/// The draw list itself, for clients that render on their side.
pub async fn canvas_json(State(state): State<AppState>, Path(region): Path<String>) -> impl IntoResponse {
    Json(state.redraw(&region))
}
