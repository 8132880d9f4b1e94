//! HTTP boundary.
//!
//! # Responsibility
//! - Read the raw request body as a GraphQL document and execute it.
//! - Serialize results into the `{"data": ...}` / `{"message": ...}` envelopes.
//!
//! # Invariants
//! - Handlers never panic on caller input; every failure becomes a 400.
//! - Only the first execution error is reported.

use crate::schema::MusicSchema;
use async_graphql::http::GraphiQLSource;
use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{DefaultBodyLimit, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use log::{debug, info, warn};
use serde::Serialize;
use std::time::Instant;

pub const GRAPHQL_PATH: &str = "/graphql";
pub const PING_PATH: &str = "/ping";

/// Success envelope.
#[derive(Debug, Serialize)]
struct DataEnvelope {
    data: async_graphql::Value,
}

/// Failure envelope carrying a single human-readable message.
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    message: String,
}

/// Builds the application router over `schema`.
pub fn router(schema: MusicSchema) -> Router {
    Router::new()
        .route(GRAPHQL_PATH, post(graphql_handler).get(graphiql))
        .route(PING_PATH, get(ping))
        .layer(DefaultBodyLimit::disable())
        .with_state(schema)
}

async fn graphql_handler(
    State(schema): State<MusicSchema>,
    body: Result<Bytes, BytesRejection>,
) -> Response {
    let body = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(
                "event=graphql_execute module=http status=error error_code=body_read_failed error={rejection}"
            );
            return respond_err(StatusCode::BAD_REQUEST, "Invalid body");
        }
    };
    let Ok(query) = std::str::from_utf8(&body) else {
        warn!("event=graphql_execute module=http status=error error_code=invalid_body");
        return respond_err(StatusCode::BAD_REQUEST, "Invalid body");
    };

    match execute_query(&schema, query).await {
        Ok(data) => (StatusCode::OK, Json(DataEnvelope { data })).into_response(),
        Err(message) => respond_err(StatusCode::BAD_REQUEST, message),
    }
}

/// Executes `query` and returns its data, or the first error message.
async fn execute_query(schema: &MusicSchema, query: &str) -> Result<async_graphql::Value, String> {
    let started_at = Instant::now();
    debug!(
        "event=graphql_execute module=http status=start bytes={}",
        query.len()
    );

    let response = schema.execute(async_graphql::Request::new(query)).await;

    if let Some(first) = response.errors.first() {
        warn!(
            "event=graphql_execute module=http status=error duration_ms={} error_count={} error={}",
            started_at.elapsed().as_millis(),
            response.errors.len(),
            first.message
        );
        return Err(first.message.clone());
    }

    info!(
        "event=graphql_execute module=http status=ok duration_ms={}",
        started_at.elapsed().as_millis()
    );
    Ok(response.data)
}

fn respond_err(status: StatusCode, message: impl Into<String>) -> Response {
    let envelope = ErrorEnvelope {
        message: message.into(),
    };
    (status, Json(envelope)).into_response()
}

async fn graphiql() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

async fn ping() -> &'static str {
    graphmusic_core::ping()
}
