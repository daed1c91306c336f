// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("log ingest stream receive error: {0}")]
    Recv(String),
}
