use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use serde_json::json;

use super::service::{BrowseQuery, OpportunityService, OpportunityServiceError};
use crate::catalog::{OpportunityCategory, OpportunityId, OpportunityRepository};
use crate::deadline::start_of_day;

/// Router builder exposing the catalog's page endpoints.
pub fn opportunity_router<R>(service: Arc<OpportunityService<R>>) -> Router
where
    R: OpportunityRepository + 'static,
{
    Router::new()
        .route("/api/v1/home", get(home_handler::<R>))
        .route("/api/v1/opportunities", get(browse_handler::<R>))
        .route("/api/v1/opportunities/:id", get(page_handler::<R>))
        .route("/api/v1/timeline", get(timeline_handler::<R>))
        .route("/api/v1/site/navigation", get(navigation_handler::<R>))
        .with_state(service)
}

/// `today=YYYY-MM-DD` pins the evaluation instant to midnight UTC.
#[derive(Debug, Default, Deserialize)]
pub struct EvaluationParams {
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub today: Option<NaiveDate>,
}

impl EvaluationParams {
    pub fn now(&self) -> DateTime<Utc> {
        self.today.map(start_of_day).unwrap_or_else(Utc::now)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct BrowseParams {
    #[serde(default)]
    pub category: Option<OpportunityCategory>,
    #[serde(default)]
    pub tag: Option<String>,
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub include_closed: bool,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub today: Option<NaiveDate>,
}

impl BrowseParams {
    fn into_query(self) -> (BrowseQuery, EvaluationParams) {
        let query = BrowseQuery {
            category: self.category,
            tag: self.tag.filter(|tag| !tag.trim().is_empty()),
            search: self.q.filter(|q| !q.trim().is_empty()),
            include_closed: self.include_closed,
        };
        (query, EvaluationParams { today: self.today })
    }
}

pub(crate) async fn page_handler<R>(
    State(service): State<Arc<OpportunityService<R>>>,
    Path(id): Path<String>,
    Query(params): Query<EvaluationParams>,
) -> Response
where
    R: OpportunityRepository + 'static,
{
    let id = OpportunityId(id);
    match service.page(&id, params.now()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn browse_handler<R>(
    State(service): State<Arc<OpportunityService<R>>>,
    Query(params): Query<BrowseParams>,
) -> Response
where
    R: OpportunityRepository + 'static,
{
    let (query, evaluation) = params.into_query();
    match service.browse(&query, evaluation.now()) {
        Ok(cards) => (StatusCode::OK, axum::Json(cards)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn timeline_handler<R>(
    State(service): State<Arc<OpportunityService<R>>>,
    Query(params): Query<EvaluationParams>,
) -> Response
where
    R: OpportunityRepository + 'static,
{
    match service.timeline(params.now()) {
        Ok(cards) => (StatusCode::OK, axum::Json(cards)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn home_handler<R>(
    State(service): State<Arc<OpportunityService<R>>>,
    Query(params): Query<EvaluationParams>,
) -> Response
where
    R: OpportunityRepository + 'static,
{
    match service.home(params.now()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn navigation_handler<R>(
    State(service): State<Arc<OpportunityService<R>>>,
    Query(params): Query<EvaluationParams>,
) -> Response
where
    R: OpportunityRepository + 'static,
{
    axum::Json(service.navigation(params.now())).into_response()
}

fn error_response(error: OpportunityServiceError) -> Response {
    match error {
        OpportunityServiceError::NotFound(id) => {
            let payload = json!({
                "error": "opportunity not found",
                "id": id.0,
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        other => {
            let payload = json!({
                "error": other.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
