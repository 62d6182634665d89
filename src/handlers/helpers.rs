use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Json;

use crate::error::{DocumentError, PropertyError};

pub fn render_template<T: askama::Template>(t: T) -> Response {
    match t.render() {
        Ok(body) => Html(body).into_response(),
        Err(e) => {
            tracing::error!(%e, "Template render error");
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
    }
}

pub fn error_body(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

pub fn document_error_response(e: DocumentError) -> Response {
    let status = match e {
        DocumentError::NotFound { .. } => StatusCode::NOT_FOUND,
        DocumentError::InvalidDropTarget { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        DocumentError::Json(_) => StatusCode::BAD_REQUEST,
        DocumentError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %e, "Document operation failed");
    }
    error_body(status, e.to_string())
}

pub fn property_error_response(e: PropertyError) -> Response {
    match e {
        PropertyError::Document(e) => document_error_response(e),
        other => error_body(StatusCode::BAD_REQUEST, other.to_string()),
    }
}
