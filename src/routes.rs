use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use axum::http::header::CACHE_CONTROL;
use axum::http::HeaderValue;

use crate::models::AppState;
use crate::handlers;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/regions/:region/canvas.svg", get(handlers::canvas::canvas_svg))
        .route("/regions/:region/canvas", get(handlers::canvas::canvas_json))
        .route(
            "/regions/:region/document",
            get(handlers::documents::document_get)
                .put(handlers::documents::document_put)
                .patch(handlers::documents::document_merge),
        )
        .route("/regions/:region/instances", post(handlers::instances::instance_drop))
        .route(
            "/regions/:region/instances/:instance_id",
            get(handlers::instances::instance_get)
                .patch(handlers::instances::instance_patch)
                .delete(handlers::instances::instance_delete),
        )
        .route(
            "/regions/:region/instances/:instance_id/properties",
            get(handlers::instances::instance_properties_get).post(handlers::instances::instance_properties_post),
        )
        .route("/regions/:region/query/instances", post(handlers::query::instance_query_post))
        .route("/query/progress", get(handlers::query::query_progress))
        .route("/query/progress.json", get(handlers::query::query_progress_json))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(SetResponseHeaderLayer::if_not_present(
                    CACHE_CONTROL,
                    HeaderValue::from_static("no-store"),
                )),
        )
        .with_state(state)
}
