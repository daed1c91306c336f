// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod error;
pub mod log_forwarder;
pub mod safe_log_hub;
pub mod scoped_logger;

pub use error::{DialError, SinkError};
pub use log_forwarder::{ConnectionState, Dialer, Forwarder, LogSink, LoopGuard};
pub use safe_log_hub::{SafeLogHub, SafeLogHubOptions, Stats as SafeLogHubStats};
pub use scoped_logger::{ScopedLogger, TOPIC_LOGS};
