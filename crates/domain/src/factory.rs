// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Function-pointer factories per domain kind, so the manager never needs
//! to know about a kind's concrete module type.

use rk_core::Host;
use rk_runtime::KernelModule;
use std::collections::HashMap;
use std::sync::Arc;

pub type DomainFactory = Arc<dyn Fn(&str, Host) -> Box<dyn KernelModule> + Send + Sync>;

/// Maps a domain spec's `kind` to the factory that builds it. Built once
/// at startup and treated as read-only by the manager thereafter.
#[derive(Default, Clone)]
pub struct FactoryRegistry {
    factories: HashMap<String, DomainFactory>,
}

impl FactoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: impl Into<String>, factory: DomainFactory) {
        self.factories.insert(kind.into(), factory);
    }

    pub fn get(&self, kind: &str) -> Option<DomainFactory> {
        self.factories.get(kind).cloned()
    }

    pub fn registered_kinds(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}

#[cfg(test)]
#[path = "factory_tests.rs"]
mod tests;
