// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use rk_core::{HealthStatus, Scope};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

#[derive(Default)]
struct RecordingModule {
    fail_at: Option<&'static str>,
    ready_fails: bool,
    calls: Vec<&'static str>,
}

#[async_trait]
impl KernelModule for RecordingModule {
    fn manifest(&self) -> Manifest {
        Manifest::new("test", "0.1.0", Scope::Function)
    }

    async fn on_load(&mut self) -> Result<(), ModuleError> {
        self.calls.push("load");
        fail_if(self.fail_at, "load")
    }

    async fn on_init(&mut self) -> Result<(), ModuleError> {
        self.calls.push("init");
        fail_if(self.fail_at, "init")
    }

    async fn on_configure(&mut self, _config: &HashMap<String, Value>) -> Result<(), ModuleError> {
        self.calls.push("configure");
        fail_if(self.fail_at, "configure")
    }

    async fn on_start(&mut self) -> Result<(), ModuleError> {
        self.calls.push("start");
        fail_if(self.fail_at, "start")
    }

    async fn on_ready(&mut self) -> Result<(), ModuleError> {
        self.calls.push("ready");
        if self.ready_fails {
            fail_if(Some("ready"), "ready")
        } else {
            Ok(())
        }
    }

    async fn on_drain(&mut self) -> Result<(), ModuleError> {
        self.calls.push("drain");
        Ok(())
    }

    async fn on_stop(&mut self) -> Result<(), ModuleError> {
        self.calls.push("stop");
        Ok(())
    }

    fn health(&self) -> Health {
        Health::new(HealthStatus::Ready, SystemTime::now())
    }
}

fn fail_if(fail_at: Option<&'static str>, phase: &'static str) -> Result<(), ModuleError> {
    if fail_at == Some(phase) {
        Err(format!("{phase} failed").into())
    } else {
        Ok(())
    }
}

#[tokio::test]
async fn successful_run_reaches_ready() {
    let mut fsm = Fsm::new(RecordingModule::default());
    fsm.run(&HashMap::new()).await.unwrap();
    assert_eq!(fsm.state(), LifecycleState::Ready);
    assert_eq!(fsm.module().calls, vec!["load", "init", "configure", "start", "ready"]);
}

#[tokio::test]
async fn hook_failure_before_start_moves_to_failed() {
    let mut fsm = Fsm::new(RecordingModule { fail_at: Some("configure"), ..Default::default() });
    let err = fsm.run(&HashMap::new()).await;
    assert!(err.is_err());
    assert_eq!(fsm.state(), LifecycleState::Failed);
}

#[tokio::test]
async fn on_ready_failure_is_reported_but_does_not_demote_state() {
    let seen_ready_error = Arc::new(AtomicUsize::new(0));
    let flag = seen_ready_error.clone();
    let mut fsm = Fsm::new(RecordingModule { ready_fails: true, ..Default::default() })
        .with_transition_hook(Box::new(move |from, to, err| {
            if from == LifecycleState::Ready && to == LifecycleState::Ready && err.is_some() {
                flag.fetch_add(1, Ordering::SeqCst);
            }
        }));
    fsm.run(&HashMap::new()).await.unwrap();
    assert_eq!(fsm.state(), LifecycleState::Ready);
    assert_eq!(seen_ready_error.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn drain_then_stop_reaches_stopped() {
    let mut fsm = Fsm::new(RecordingModule::default());
    fsm.run(&HashMap::new()).await.unwrap();
    fsm.drain().await.unwrap();
    assert_eq!(fsm.state(), LifecycleState::Draining);
    fsm.stop().await.unwrap();
    assert_eq!(fsm.state(), LifecycleState::Stopped);
}

#[tokio::test]
async fn boxed_dyn_module_runs_through_the_same_fsm() {
    let boxed: Box<dyn KernelModule> = Box::new(RecordingModule::default());
    let mut fsm = Fsm::new(boxed);
    fsm.run(&HashMap::new()).await.unwrap();
    assert_eq!(fsm.state(), LifecycleState::Ready);
}

#[tokio::test]
async fn transition_hook_observes_every_state_change() {
    let transitions = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let recorded = transitions.clone();
    let mut fsm = Fsm::new(RecordingModule::default()).with_transition_hook(Box::new(move |from, to, _| {
        recorded.lock().push((from, to));
    }));
    fsm.run(&HashMap::new()).await.unwrap();
    let seen = transitions.lock().clone();
    assert_eq!(
        seen,
        vec![
            (LifecycleState::Load, LifecycleState::Init),
            (LifecycleState::Init, LifecycleState::Configure),
            (LifecycleState::Configure, LifecycleState::Start),
            (LifecycleState::Start, LifecycleState::Ready),
        ]
    );
}
