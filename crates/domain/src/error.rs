// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use rk_runtime::ModuleError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("no factory registered for kind {0:?}")]
    UnknownKind(String),
    #[error("launch failed for {id}: {source}")]
    LaunchFailed { id: String, #[source] source: ModuleError },
}
