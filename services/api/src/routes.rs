use crate::infra::{AppState, Pages};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json};
use fellows::error::AppError;
use fellows::pages::opportunity_router;
use fellows::site::{robots_txt, sitemap_xml};
use serde_json::json;
use std::sync::Arc;

/// Page API plus the operational and crawler endpoints.
pub(crate) fn with_site_routes(pages: Arc<Pages>) -> axum::Router {
    opportunity_router(pages.clone())
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/robots.txt", get(robots_endpoint))
        .route("/sitemap.xml", get(sitemap_endpoint))
        .layer(Extension(pages))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn robots_endpoint(Extension(pages): Extension<Arc<Pages>>) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime::TEXT_PLAIN_UTF_8.as_ref())],
        robots_txt(&pages.site().base_url),
    )
        .into_response()
}

pub(crate) async fn sitemap_endpoint(
    Extension(pages): Extension<Arc<Pages>>,
) -> Result<Response, AppError> {
    let ids = pages.opportunity_ids()?;
    let body = sitemap_xml(&pages.site().base_url, &ids);
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, mime::TEXT_XML.as_ref())],
        body,
    )
        .into_response())
}
