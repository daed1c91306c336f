// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A thin `axum` surface over [`AdminApi`]. This is reference wiring, not
//! the contract itself — any HTTP (or other) carrier can sit in front of
//! [`AdminApi`] instead.

use crate::api::{parse_level_token, AdminApi};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::sse::{Event, Sse};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::StreamExt;
use rk_core::{Level, LogFilter, LogRecord};
use rk_runtime::EventBus;
use serde::Deserialize;
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tokio_util::sync::CancellationToken;

const TOPIC_LOGS: &str = "telemetry.logs";
const KEEP_ALIVE_INTERVAL: Duration = Duration::from_secs(10);
const SSE_BUFFER: usize = 64;

#[derive(Clone)]
struct RouterState {
    admin: Arc<dyn AdminApi>,
    bus: Arc<EventBus>,
}

/// Builds the `/admin/*` surface described in the admin endpoint
/// contract, dispatching every handler to `admin` (and, for the log
/// stream, subscribing directly to `bus`).
pub fn build(admin: Arc<dyn AdminApi>, bus: Arc<EventBus>) -> Router {
    let state = RouterState { admin, bus };
    Router::new()
        .route("/admin/health", get(health))
        .route("/admin/kernels", get(kernels))
        .route("/admin/kernels/{id}/restart", post(restart))
        .route("/admin/kernels/{id}/drain", post(drain))
        .route("/admin/logs/stream", get(logs_stream))
        .route("/admin/telemetry", post(telemetry))
        .with_state(state)
}

async fn health(State(state): State<RouterState>) -> impl IntoResponse {
    Json(state.admin.health_report().await)
}

async fn kernels(State(state): State<RouterState>) -> impl IntoResponse {
    let mut list = state.admin.kernels().await;
    list.sort_by(|a, b| a.id.cmp(&b.id));
    Json(list)
}

async fn restart(State(state): State<RouterState>, Path(id): Path<String>) -> impl IntoResponse {
    state.admin.restart(&id).await;
    (StatusCode::ACCEPTED, Json(json!({"status": "accepted", "action": "restart", "id": id})))
}

async fn drain(State(state): State<RouterState>, Path(id): Path<String>) -> impl IntoResponse {
    state.admin.drain(&id).await;
    (StatusCode::ACCEPTED, Json(json!({"status": "accepted", "action": "drain", "id": id})))
}

#[derive(Debug, Deserialize)]
struct TelemetryRequest {
    level: String,
}

async fn telemetry(State(state): State<RouterState>, Json(body): Json<TelemetryRequest>) -> impl IntoResponse {
    match parse_level_token(&body.level) {
        Ok(level) => {
            state.admin.set_log_level(level);
            (StatusCode::OK, Json(json!({"ok": "true", "level": body.level.to_ascii_uppercase()}))).into_response()
        }
        Err(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
    }
}

#[derive(Debug, Default, Deserialize)]
struct LogStreamParams {
    level: Option<String>,
    kernel: Option<String>,
    scope: Option<String>,
    component: Option<String>,
}

impl LogStreamParams {
    fn into_filter(self) -> LogFilter {
        LogFilter {
            level_min: self.level.as_deref().map(Level::parse_lenient),
            kernel_id: Some(self.kernel.unwrap_or_default()),
            scope: Some(self.scope.unwrap_or_default()),
            component: Some(self.component.unwrap_or_default()),
        }
    }
}

async fn logs_stream(
    State(state): State<RouterState>,
    Query(params): Query<LogStreamParams>,
) -> Sse<impl futures::Stream<Item = Result<Event, Infallible>>> {
    let filter = params.into_filter();
    let scope_topic = filter.scope.clone().filter(|s| !s.is_empty()).map(|s| format!("{TOPIC_LOGS}.{s}"));

    let ctx = CancellationToken::new();
    let mut all_rx = state.bus.subscribe(TOPIC_LOGS, ctx.clone());
    let mut scope_rx = scope_topic.map(|topic| state.bus.subscribe(&topic, ctx.clone()));

    let (tx, rx) = mpsc::channel::<Event>(SSE_BUFFER);
    tokio::spawn(async move {
        let _ctx = ctx;
        let ts = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_secs();
        if let Ok(hello) = Event::default().event("hello").json_data(json!({"status": "ok", "ts": ts.to_string()})) {
            if tx.send(hello).await.is_err() {
                return;
            }
        }

        let mut keep_alive = tokio::time::interval(KEEP_ALIVE_INTERVAL);
        keep_alive.tick().await;

        loop {
            tokio::select! {
                _ = tx.closed() => return,
                _ = keep_alive.tick() => {
                    if tx.send(Event::default().comment("keep-alive")).await.is_err() {
                        return;
                    }
                }
                message = all_rx.rx.recv() => {
                    if !forward_if_matching(&tx, &filter, message).await {
                        return;
                    }
                }
                message = recv_optional(&mut scope_rx) => {
                    if !forward_if_matching(&tx, &filter, message).await {
                        return;
                    }
                }
            }
        }
    });

    Sse::new(ReceiverStream::new(rx).map(Ok))
}

/// Forwards `message` as a `log` SSE event when it downcasts to a
/// [`LogRecord`] matching `filter`. Returns `false` when the channel to
/// the client has closed, signalling the caller to stop the loop.
async fn forward_if_matching(tx: &mpsc::Sender<Event>, filter: &LogFilter, message: Option<rk_runtime::Message>) -> bool {
    let Some(record) = message.and_then(|m| m.downcast::<LogRecord>().ok()) else {
        return true;
    };
    if !filter.matches(&record) {
        return true;
    }
    match Event::default().event("log").json_data(&*record) {
        Ok(event) => tx.send(event).await.is_ok(),
        Err(_) => true,
    }
}

async fn recv_optional(receiver: &mut Option<rk_runtime::Receiver>) -> Option<rk_runtime::Message> {
    match receiver {
        Some(receiver) => receiver.rx.recv().await,
        None => std::future::pending().await,
    }
}

#[cfg(test)]
#[path = "router_tests.rs"]
mod tests;
