// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn single_http_builds_one_network_endpoint() {
    let ex = Exports::single_http("hello", ":8081");
    assert_eq!(ex.network.len(), 1);
    assert_eq!(ex.network[0].protocol, "http");
    assert_eq!(ex.network[0].address, ":8081");
}

#[test]
fn deep_equality_holds_across_clone() {
    let ex = Exports::single_http("hello", ":8081");
    assert_eq!(ex, ex.clone());
}

#[test]
fn empty_exports_equal_default() {
    assert_eq!(Exports::default(), Exports::default());
}
