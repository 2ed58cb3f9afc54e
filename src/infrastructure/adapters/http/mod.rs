//! HTTP adapter
//!
//! Routes:
//! - `GET /` - Redirect to the listing
//! - `GET /messages?status=` - List messages, optionally by status
//! - `GET|POST /messages/send?text=` - Dispatch a send command

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::application::services::{ListingService, MessageView};
use crate::domain::entities::SendMessage;
use crate::domain::traits::Dispatcher;

pub mod error;

pub use error::{AppError, Result};

pub const LIST_PATH: &str = "/messages";

/// Shared application state, injected explicitly into every handler
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<dyn Dispatcher>,
    pub listing: ListingService,
}

impl AppState {
    pub fn new(dispatcher: Arc<dyn Dispatcher>, listing: ListingService) -> Self {
        Self { dispatcher, listing }
    }
}

/// Build the router with tracing middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route(LIST_PATH, get(list_messages))
        .route("/messages/send", get(send_message).post(send_message))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Serve until ctrl-c, then return so queued work can drain
pub async fn serve(listener: TcpListener, state: AppState) -> std::io::Result<()> {
    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown requested");
}

async fn index() -> Response {
    (StatusCode::FOUND, [(header::LOCATION, LIST_PATH)]).into_response()
}

/// Raw query pairs in arrival order; repeated keys are legal
type QueryPairs = Vec<(String, String)>;

/// Last value given for `key`, matching how form frameworks resolve repeats
fn last_value(pairs: QueryPairs, key: &str) -> Option<String> {
    pairs.into_iter().rev().find(|(k, _)| k == key).map(|(_, v)| v)
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    messages: Vec<MessageView>,
}

/// GET /messages - pretty-printed `{"messages": [...]}`
async fn list_messages(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Response> {
    let status = last_value(pairs, "status");
    let messages = state.listing.list(status.as_deref()).await?;
    let body = serde_json::to_string_pretty(&ListResponse { messages })?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}

/// GET /messages/send - validate, dispatch, reply 204
///
/// Query values arrive as strings, so `123` or `true` are sent verbatim.
async fn send_message(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> Result<Response> {
    let command = SendMessage::new(last_value(pairs, "text").unwrap_or_default())?;

    state.dispatcher.dispatch(command).await?;

    // hyper drops the body of a 204 on the wire
    Ok((StatusCode::NO_CONTENT, "Successfully sent").into_response())
}
