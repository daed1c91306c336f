// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#[derive(Debug, thiserror::Error)]
pub enum AdminError {
    #[error("invalid log level: {0}")]
    InvalidLevel(String),
}
