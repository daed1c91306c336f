// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The telemetry record shape shared by the scoped logger, the safe log
//! hub, and the log forwarder.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::SystemTime;

/// Severity of a [`LogRecord`]. Ordered `Debug < Info < Warn < Error`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl Level {
    /// Case-insensitive parse. Unknown tokens map to `Info`, matching the
    /// scoped logger's "unknown levels map to info" rule.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "debug" => Level::Debug,
            "warn" | "warning" => Level::Warn,
            "error" | "err" => Level::Error,
            _ => Level::Info,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        };
        f.write_str(s)
    }
}

/// An immutable, fully-materialized log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub time: SystemTime,
    pub level: Level,
    pub kernel_id: String,
    pub scope: String,
    pub component: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trace: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub fields: HashMap<String, serde_json::Value>,
}

/// A predicate used to select records for the admin log stream and the
/// forwarder's loop-avoidance check.
#[derive(Debug, Clone, Default)]
pub struct LogFilter {
    pub level_min: Option<Level>,
    pub kernel_id: Option<String>,
    pub scope: Option<String>,
    pub component: Option<String>,
}

impl LogFilter {
    /// `true` when `record` satisfies every set field of this filter.
    /// `component` matches by prefix; unset fields mean "don't care".
    pub fn matches(&self, record: &LogRecord) -> bool {
        if let Some(min) = self.level_min {
            if record.level < min {
                return false;
            }
        }
        if let Some(id) = &self.kernel_id {
            if !id.is_empty() && record.kernel_id != *id {
                return false;
            }
        }
        if let Some(scope) = &self.scope {
            if !scope.is_empty() && record.scope != *scope {
                return false;
            }
        }
        if let Some(prefix) = &self.component {
            if !prefix.is_empty() && !record.component.starts_with(prefix.as_str()) {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
#[path = "log_record_tests.rs"]
mod tests;
