// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The read-only dependency-injection envelope handed to every kernel at
//! construction time.

use crate::scope::Scope;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// A no-op logger used as `Host`'s default so callers never need to
/// special-case a missing logger.
pub trait Logger: Send + Sync {
    fn log(&self, level: &str, message: &str, fields: &HashMap<String, Value>);
}

struct NoopLogger;

impl Logger for NoopLogger {
    fn log(&self, _level: &str, _message: &str, _fields: &HashMap<String, Value>) {}
}

/// Everything a kernel is given at construction. `Host` never exposes
/// mutable access to shared state directly — `rpc`/`event_bus`/`stream`
/// are opaque handles owned by `rk-runtime`/`rk-registry`, and `config`
/// is a defensive copy so a kernel can never mutate its siblings' view.
#[derive(Clone)]
pub struct Host {
    pub id: String,
    pub scope: Scope,
    pub logger: Arc<dyn Logger>,
    pub rpc: Option<Arc<dyn std::any::Any + Send + Sync>>,
    pub event_bus: Option<Arc<dyn std::any::Any + Send + Sync>>,
    pub stream: Option<Arc<dyn std::any::Any + Send + Sync>>,
    config: HashMap<String, Value>,
}

impl Host {
    pub fn new(id: impl Into<String>, scope: Scope) -> Self {
        Self {
            id: id.into(),
            scope,
            logger: Arc::new(NoopLogger),
            rpc: None,
            event_bus: None,
            stream: None,
            config: HashMap::new(),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn with_config(mut self, config: HashMap<String, Value>) -> Self {
        self.config = config;
        self
    }

    pub fn with_event_bus(mut self, event_bus: Arc<dyn std::any::Any + Send + Sync>) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn with_rpc(mut self, rpc: Arc<dyn std::any::Any + Send + Sync>) -> Self {
        self.rpc = Some(rpc);
        self
    }

    pub fn with_stream(mut self, stream: Arc<dyn std::any::Any + Send + Sync>) -> Self {
        self.stream = Some(stream);
        self
    }

    /// A defensive copy of the configuration bag; mutating the result
    /// never affects this `Host` or any other kernel's view of it.
    pub fn config(&self) -> HashMap<String, Value> {
        self.config.clone()
    }

    pub fn config_str(&self, key: &str) -> Option<String> {
        self.config.get(key).and_then(Value::as_str).map(str::to_string)
    }
}

#[cfg(test)]
#[path = "host_tests.rs"]
mod tests;
