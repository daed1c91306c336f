// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rk-core: data model and shared primitives for the root-kernel runtime.
//!
//! This crate has no async runtime dependency: it describes state, not
//! behavior. `rk-runtime`, `rk-telemetry`, `rk-registry`, and `rk-domain`
//! build the live system on top of these types.

pub mod backoff;
pub mod domain_spec;
pub mod error;
pub mod exports;
pub mod health;
pub mod host;
pub mod imports;
pub mod kernel_record;
pub mod lifecycle;
pub mod log_record;
pub mod manifest;
pub mod scope;
pub mod worker_spec;

pub use backoff::BackoffPolicy;
pub use domain_spec::{DomainSpec, LaunchMode};
pub use error::Error;
pub use exports::{CliCommand, EventSpec, Exports, LocalService, NetworkEndpoint, StreamSpec};
pub use health::{Health, HealthStatus};
pub use host::{Host, Logger};
pub use imports::Imports;
pub use kernel_record::KernelRecord;
pub use lifecycle::LifecycleState;
pub use log_record::{Level, LogFilter, LogRecord};
pub use manifest::Manifest;
pub use scope::Scope;
pub use worker_spec::{RestartPolicy, WorkerSpec};
