// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The in-process reference [`LogIngestSink`]: feeds every received
//! record straight into a [`SafeLogHub`], with no RPC carrier in
//! between. A real gRPC/tonic gateway would sit in front of this same
//! sink, translating wire frames to [`LogStream`] items.

use crate::sink::{AckStream, IngestAck, LogIngestSink, LogStream};
use async_trait::async_trait;
use futures::StreamExt;
use rk_telemetry::SafeLogHub;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;

const DEFAULT_ACK_INTERVAL: Duration = Duration::from_secs(1);
const ACK_BUFFER: usize = 16;

pub struct HubIngestSink {
    hub: Arc<SafeLogHub>,
    ack_interval: Duration,
}

impl HubIngestSink {
    pub fn new(hub: Arc<SafeLogHub>) -> Self {
        Self { hub, ack_interval: DEFAULT_ACK_INTERVAL }
    }

    pub fn with_ack_interval(mut self, interval: Duration) -> Self {
        self.ack_interval = if interval.is_zero() { DEFAULT_ACK_INTERVAL } else { interval };
        self
    }
}

#[async_trait]
impl LogIngestSink for HubIngestSink {
    async fn push_logs(&self, mut records: LogStream) -> AckStream {
        let hub = self.hub.clone();
        let interval = self.ack_interval;
        let (tx, rx) = mpsc::channel::<IngestAck>(ACK_BUFFER);

        tokio::spawn(async move {
            let mut received: u64 = 0;
            let mut ticker = tokio::time::interval(interval);
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if tx.send(IngestAck::ok(received)).await.is_err() {
                            return;
                        }
                    }
                    record = records.next() => {
                        match record {
                            Some(Ok(record)) => {
                                hub.publish(record);
                                received += 1;
                            }
                            Some(Err(err)) => {
                                tracing::warn!(error = %err, "log ingest stream terminated on receive error");
                                let _ = tx.send(IngestAck::ok(received)).await;
                                return;
                            }
                            None => {
                                let _ = tx.send(IngestAck::ok(received)).await;
                                return;
                            }
                        }
                    }
                }
            }
        });

        Box::pin(ReceiverStream::new(rx))
    }
}

#[cfg(test)]
#[path = "hub_sink_tests.rs"]
mod tests;
