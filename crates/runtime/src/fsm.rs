// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The uniform lifecycle state machine every kernel runs through:
//! Load → Init → Configure → Start → Ready, with Drain/Stop as
//! explicit follow-on operations and Failed as the universal error sink.

use async_trait::async_trait;
use parking_lot::RwLock;
use rk_core::{Health, LifecycleState, Manifest};
use serde_json::Value;
use std::collections::HashMap;
use std::error::Error as StdError;

pub type ModuleError = Box<dyn StdError + Send + Sync>;

/// The contract every kernel module implements. `on_ready` defaults to a
/// no-op since most modules have nothing to do once started; a failure
/// from it is logged by the FSM's transition hook but never demotes the
/// module out of `Ready`.
#[async_trait]
pub trait KernelModule: Send + Sync {
    fn manifest(&self) -> Manifest;
    async fn on_load(&mut self) -> Result<(), ModuleError>;
    async fn on_init(&mut self) -> Result<(), ModuleError>;
    async fn on_configure(&mut self, config: &HashMap<String, Value>) -> Result<(), ModuleError>;
    async fn on_start(&mut self) -> Result<(), ModuleError>;
    async fn on_ready(&mut self) -> Result<(), ModuleError> {
        Ok(())
    }
    async fn on_drain(&mut self) -> Result<(), ModuleError>;
    async fn on_stop(&mut self) -> Result<(), ModuleError>;
    fn health(&self) -> Health;
}

#[async_trait]
impl KernelModule for Box<dyn KernelModule> {
    fn manifest(&self) -> Manifest {
        (**self).manifest()
    }
    async fn on_load(&mut self) -> Result<(), ModuleError> {
        (**self).on_load().await
    }
    async fn on_init(&mut self) -> Result<(), ModuleError> {
        (**self).on_init().await
    }
    async fn on_configure(&mut self, config: &HashMap<String, Value>) -> Result<(), ModuleError> {
        (**self).on_configure(config).await
    }
    async fn on_start(&mut self) -> Result<(), ModuleError> {
        (**self).on_start().await
    }
    async fn on_ready(&mut self) -> Result<(), ModuleError> {
        (**self).on_ready().await
    }
    async fn on_drain(&mut self) -> Result<(), ModuleError> {
        (**self).on_drain().await
    }
    async fn on_stop(&mut self) -> Result<(), ModuleError> {
        (**self).on_stop().await
    }
    fn health(&self) -> Health {
        (**self).health()
    }
}

/// Called on every state transition, including the terminal hook-error
/// case where `err` is set but the state still advanced (the `on_ready`
/// exception).
pub type TransitionHook = Box<dyn Fn(LifecycleState, LifecycleState, Option<&ModuleError>) + Send + Sync>;

/// Drives one [`KernelModule`] through its lifecycle. Exactly one FSM
/// exists per module instance; the registry and supervisor never share
/// one across instances.
pub struct Fsm<M: KernelModule> {
    state: RwLock<LifecycleState>,
    module: M,
    on_transition: Option<TransitionHook>,
}

impl<M: KernelModule> Fsm<M> {
    pub fn new(module: M) -> Self {
        Self { state: RwLock::new(LifecycleState::Load), module, on_transition: None }
    }

    pub fn with_transition_hook(mut self, hook: TransitionHook) -> Self {
        self.on_transition = Some(hook);
        self
    }

    pub fn state(&self) -> LifecycleState {
        *self.state.read()
    }

    pub fn module(&self) -> &M {
        &self.module
    }

    fn set(&self, to: LifecycleState, err: Option<&ModuleError>) {
        let from = {
            let mut guard = self.state.write();
            let from = *guard;
            *guard = to;
            from
        };
        if let Some(hook) = &self.on_transition {
            hook(from, to, err);
        }
    }

    /// Runs Load→Init→Configure→Start→Ready in sequence. Any hook error
    /// before Start completes moves the FSM to `Failed` and returns the
    /// error; an `on_ready` error is reported through the transition
    /// hook but does not move the FSM out of `Ready`.
    pub async fn run(&mut self, config: &HashMap<String, Value>) -> Result<(), ModuleError> {
        if let Err(err) = self.module.on_load().await {
            self.set(LifecycleState::Failed, Some(&err));
            return Err(err);
        }
        self.set(LifecycleState::Init, None);

        if let Err(err) = self.module.on_init().await {
            self.set(LifecycleState::Failed, Some(&err));
            return Err(err);
        }
        self.set(LifecycleState::Configure, None);

        if let Err(err) = self.module.on_configure(config).await {
            self.set(LifecycleState::Failed, Some(&err));
            return Err(err);
        }
        self.set(LifecycleState::Start, None);

        if let Err(err) = self.module.on_start().await {
            self.set(LifecycleState::Failed, Some(&err));
            return Err(err);
        }
        self.set(LifecycleState::Ready, None);

        if let Err(err) = self.module.on_ready().await {
            // Reported, not fatal: the module is still Ready.
            if let Some(hook) = &self.on_transition {
                hook(LifecycleState::Ready, LifecycleState::Ready, Some(&err));
            }
        }

        Ok(())
    }

    pub async fn drain(&mut self) -> Result<(), ModuleError> {
        self.set(LifecycleState::Draining, None);
        if let Err(err) = self.module.on_drain().await {
            self.set(LifecycleState::Failed, Some(&err));
            return Err(err);
        }
        Ok(())
    }

    pub async fn stop(&mut self) -> Result<(), ModuleError> {
        if let Err(err) = self.module.on_stop().await {
            self.set(LifecycleState::Failed, Some(&err));
            return Err(err);
        }
        self.set(LifecycleState::Stopped, None);
        Ok(())
    }
}

#[cfg(test)]
#[path = "fsm_tests.rs"]
mod tests;
