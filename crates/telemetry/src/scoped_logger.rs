// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! A logger that tees every record to the in-process event bus and
//! (optionally) delegates to a wrapped logger, so a kernel's own
//! diagnostic sink keeps working even when nothing is subscribed to the
//! bus yet.

use rk_core::host::Logger as HostLogger;
use rk_core::{Level, LogRecord};
use rk_runtime::EventBus;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

pub const TOPIC_LOGS: &str = "telemetry.logs";

/// Publishes to `telemetry.logs` unconditionally, and to
/// `telemetry.logs.<scope>` whenever `scope` is non-empty. `component`
/// identifies the subsystem within the kernel (e.g. `"http"`).
pub struct ScopedLogger {
    bus: Arc<EventBus>,
    kernel_id: String,
    scope: String,
    component: String,
    delegate: Option<Arc<dyn HostLogger>>,
}

impl ScopedLogger {
    pub fn new(bus: Arc<EventBus>, kernel_id: impl Into<String>, scope: impl Into<String>, component: impl Into<String>) -> Self {
        Self { bus, kernel_id: kernel_id.into(), scope: scope.into(), component: component.into(), delegate: None }
    }

    pub fn with_delegate(mut self, delegate: Arc<dyn HostLogger>) -> Self {
        self.delegate = Some(delegate);
        self
    }

    fn scope_topic(&self) -> Option<String> {
        if self.scope.is_empty() {
            None
        } else {
            Some(format!("{TOPIC_LOGS}.{}", self.scope))
        }
    }
}

impl HostLogger for ScopedLogger {
    fn log(&self, level: &str, message: &str, fields: &HashMap<String, Value>) {
        if let Some(delegate) = &self.delegate {
            delegate.log(level, message, fields);
        }

        let record = LogRecord {
            time: SystemTime::now(),
            level: Level::parse_lenient(level),
            kernel_id: self.kernel_id.clone(),
            scope: self.scope.clone(),
            component: self.component.clone(),
            trace: None,
            message: message.to_string(),
            fields: fields.clone(),
        };
        let record: Arc<dyn std::any::Any + Send + Sync> = Arc::new(record);

        self.bus.publish(TOPIC_LOGS, record.clone());
        if let Some(topic) = self.scope_topic() {
            self.bus.publish(&topic, record);
        }
    }
}

#[cfg(test)]
#[path = "scoped_logger_tests.rs"]
mod tests;
