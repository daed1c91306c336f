// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the telemetry pipeline.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DialError {
    #[error("dial timed out after {0:?}")]
    Timeout(std::time::Duration),
    #[error("dial failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink closed")]
    Closed,
    #[error("send failed: {0}")]
    SendFailed(String),
}
