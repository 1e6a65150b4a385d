// file: src/server/routes.rs
// description: /ask and /health handlers and router assembly
// reference: https://docs.rs/axum

use super::error::ApiError;
use crate::models::AnswerSource;
use crate::service::QueryService;
use crate::utils::{HealthCheck, HealthReport, OperationTimer};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tower_http::trace::TraceLayer;
use tracing::debug;

pub const ANSWER_SOURCE_HEADER: &str = "x-answer-source";

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    #[serde(default)]
    pub question: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

pub fn router(service: QueryService) -> Router {
    Router::new()
        .route("/ask", post(ask))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

/// A body that is not JSON, or has no string `question`, is treated as an
/// empty question so the readiness check still runs first.
pub async fn ask(
    State(service): State<QueryService>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let question = match payload {
        Ok(Json(request)) => request.question.unwrap_or_default(),
        Err(rejection) => {
            debug!("Rejected /ask body: {}", rejection);
            String::new()
        }
    };

    let timer = OperationTimer::new("ask");
    let answer = service.answer(&question).await?;
    timer.finish();

    let mut response = Json(AskResponse {
        answer: answer.text,
    })
    .into_response();

    let source = match answer.source {
        AnswerSource::Keyword => "keyword",
        AnswerSource::Semantic => "semantic",
    };
    response
        .headers_mut()
        .insert(ANSWER_SOURCE_HEADER, HeaderValue::from_static(source));

    Ok(response)
}

pub async fn health(State(service): State<QueryService>) -> (StatusCode, Json<HealthReport>) {
    let start = Instant::now();

    let index_check = match service.index() {
        Some(index) => HealthCheck::healthy(
            "index",
            Some(format!("{} chunks", index.chunk_count())),
            start.elapsed(),
        ),
        None => HealthCheck::unhealthy("index", "Index not loaded".to_string(), start.elapsed()),
    };

    let corpus_check = match service.corpus_root() {
        root if root.is_dir() => HealthCheck::healthy("corpus", None, start.elapsed()),
        root => HealthCheck::degraded(
            "corpus",
            format!("{} is not readable", root.display()),
            start.elapsed(),
        ),
    };

    let report = HealthReport::new(
        vec![index_check, corpus_check],
        env!("CARGO_PKG_VERSION").to_string(),
    );

    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(report))
}
