// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn stopped_is_the_only_terminal_state() {
    for state in [
        LifecycleState::Load,
        LifecycleState::Init,
        LifecycleState::Configure,
        LifecycleState::Start,
        LifecycleState::Ready,
        LifecycleState::Degraded,
        LifecycleState::Failed,
        LifecycleState::Draining,
    ] {
        assert!(!state.is_terminal(), "{state} should not be terminal");
    }
    assert!(LifecycleState::Stopped.is_terminal());
}

#[test]
fn default_is_load() {
    assert_eq!(LifecycleState::default(), LifecycleState::Load);
}
