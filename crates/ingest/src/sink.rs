// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The carrier-free log ingest contract: a client streams [`LogRecord`]s
//! in, the sink publishes each to the local bus and streams back
//! periodic [`IngestAck`]s. No gRPC/tonic dependency here — `rk-ingest`
//! ships only the in-process reference sink; a real RPC carrier plugs in
//! by adapting its wire frames to this same `LogStream`/`AckStream` pair.

use crate::error::IngestError;
use async_trait::async_trait;
use futures::Stream;
use serde::Serialize;
use std::pin::Pin;

/// The client-to-server half of the stream: an unbounded sequence of log
/// records, terminated by the underlying stream ending or erroring.
pub type LogStream = Pin<Box<dyn Stream<Item = Result<rk_core::LogRecord, IngestError>> + Send>>;

/// The server-to-client half: acks emitted on the configured interval,
/// with a final ack once `records` is exhausted.
pub type AckStream = Pin<Box<dyn Stream<Item = IngestAck> + Send>>;

/// Mirrors the wire ack `{status: "ok", received: uint64}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngestAck {
    pub status: String,
    pub received: u64,
}

impl IngestAck {
    pub fn ok(received: u64) -> Self {
        Self { status: "ok".to_string(), received }
    }
}

#[async_trait]
pub trait LogIngestSink: Send + Sync {
    /// Consumes `records`, publishing each to the bus via the root hub,
    /// and returns the ack stream for this push.
    async fn push_logs(&self, records: LogStream) -> AckStream;
}
