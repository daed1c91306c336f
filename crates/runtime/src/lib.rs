// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rk-runtime: the event bus, lifecycle FSM, and worker supervisor that
//! bring `rk-core`'s data model to life.

pub mod error;
pub mod event_bus;
pub mod fsm;
pub mod supervisor;

pub use error::{BusError, FsmError, SupervisorError};
pub use event_bus::{EventBus, Message, Receiver};
pub use fsm::{Fsm, KernelModule, ModuleError, TransitionHook};
pub use supervisor::{Event, EventKind, OnEvent, Supervisor, WorkerFn};
