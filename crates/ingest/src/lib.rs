// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rk-ingest: the log ingest contract and its in-process reference sink.

pub mod error;
pub mod hub_sink;
pub mod sink;

pub use error::IngestError;
pub use hub_sink::HubIngestSink;
pub use sink::{AckStream, IngestAck, LogIngestSink, LogStream};
