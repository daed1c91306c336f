// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn parses_every_known_level_case_insensitively() {
    assert_eq!(parse_level_token("debug").unwrap(), Level::Debug);
    assert_eq!(parse_level_token("Info").unwrap(), Level::Info);
    assert_eq!(parse_level_token("WARN").unwrap(), Level::Warn);
    assert_eq!(parse_level_token("error").unwrap(), Level::Error);
}

#[test]
fn rejects_an_unknown_level() {
    let err = parse_level_token("trace").unwrap_err();
    assert!(matches!(err, AdminError::InvalidLevel(token) if token == "TRACE"));
}
