// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn display_matches_as_str() {
    assert_eq!(Scope::Root.to_string(), "root");
    assert_eq!(Scope::Domain.to_string(), "domain");
    assert_eq!(Scope::Function.to_string(), "function");
}

#[test]
fn serde_round_trip() {
    for scope in [Scope::Root, Scope::Domain, Scope::Function] {
        let json = serde_json::to_string(&scope).unwrap();
        let back: Scope = serde_json::from_str(&json).unwrap();
        assert_eq!(scope, back);
    }
}
