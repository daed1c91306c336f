// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The carrier-free admin contract: what the root kernel's operator
//! surface can do, independent of HTTP/gRPC/anything else. [`router`]
//! wires an `axum` surface over this trait; nothing below imports axum.

use crate::error::AdminError;
use async_trait::async_trait;
use rk_core::{Health, KernelRecord, Level};
use serde::Serialize;
use std::collections::HashMap;
use std::time::SystemTime;

/// The payload for `GET /admin/health`: an aggregate summary plus the
/// per-kernel breakdown it was folded from.
#[derive(Debug, Clone, Serialize)]
pub struct HealthReport {
    pub summary: Health,
    pub kernels: HashMap<String, Health>,
    pub generated_at: SystemTime,
}

#[async_trait]
pub trait AdminApi: Send + Sync {
    /// The aggregator's last snapshot if one is attached, otherwise the
    /// registry's live aggregate.
    async fn health_report(&self) -> HealthReport;

    /// Every registered kernel, in no particular order — callers that
    /// need a stable order (e.g. the HTTP list endpoint) sort it.
    async fn kernels(&self) -> Vec<KernelRecord>;

    /// No-op if `id` is not registered, matching the registry's own
    /// `update_health` semantics.
    async fn restart(&self, id: &str);

    /// No-op if `id` is not registered.
    async fn drain(&self, id: &str);

    fn log_level(&self) -> Level;
    fn set_log_level(&self, level: Level);
}

/// Parses the case-insensitive `DEBUG`/`INFO`/`WARN`/`ERROR` token the
/// telemetry endpoint's request body carries. Unlike
/// [`rk_core::Level::parse_lenient`] (used for log *records*, where an
/// unrecognized token silently means "info"), an admin-facing level
/// change rejects anything it doesn't recognize.
pub fn parse_level_token(raw: &str) -> Result<Level, AdminError> {
    match raw.to_ascii_uppercase().as_str() {
        "DEBUG" => Ok(Level::Debug),
        "INFO" => Ok(Level::Info),
        "WARN" => Ok(Level::Warn),
        "ERROR" => Ok(Level::Error),
        other => Err(AdminError::InvalidLevel(other.to_string())),
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod tests;
