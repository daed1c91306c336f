// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the event bus, supervisor, and lifecycle FSM.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BusError {
    #[error("event bus is closed")]
    Closed,
}

#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("worker {0:?} already exists")]
    AlreadyExists(String),
    #[error("worker name must not be empty")]
    EmptyName,
    #[error("worker {0:?} not found")]
    NotFound(String),
}

#[derive(Debug, Error)]
pub enum FsmError {
    #[error("{phase} failed: {source}")]
    HookFailed {
        phase: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
