// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

fn record(level: Level, kernel_id: &str, scope: &str, component: &str) -> LogRecord {
    LogRecord {
        time: SystemTime::now(),
        level,
        kernel_id: kernel_id.to_string(),
        scope: scope.to_string(),
        component: component.to_string(),
        trace: None,
        message: "hi".to_string(),
        fields: HashMap::new(),
    }
}

#[test]
fn parse_lenient_is_case_insensitive() {
    assert_eq!(Level::parse_lenient("WARN"), Level::Warn);
    assert_eq!(Level::parse_lenient("Error"), Level::Error);
    assert_eq!(Level::parse_lenient("debug"), Level::Debug);
}

#[test]
fn parse_lenient_defaults_unknown_to_info() {
    assert_eq!(Level::parse_lenient("trace"), Level::Info);
    assert_eq!(Level::parse_lenient(""), Level::Info);
}

#[test]
fn ordering_is_severity_increasing() {
    assert!(Level::Debug < Level::Info);
    assert!(Level::Info < Level::Warn);
    assert!(Level::Warn < Level::Error);
}

#[test]
fn filter_level_min_excludes_lower_severity() {
    let filter = LogFilter {
        level_min: Some(Level::Error),
        ..Default::default()
    };
    assert!(!filter.matches(&record(Level::Warn, "site", "domain", "http")));
    assert!(filter.matches(&record(Level::Error, "site", "domain", "http")));
}

#[test]
fn filter_component_matches_by_prefix() {
    let filter = LogFilter {
        component: Some("http".to_string()),
        ..Default::default()
    };
    assert!(filter.matches(&record(Level::Info, "site", "domain", "http.server")));
    assert!(!filter.matches(&record(Level::Info, "site", "domain", "queue")));
}

#[test]
fn empty_filter_matches_everything() {
    let filter = LogFilter::default();
    assert!(filter.matches(&record(Level::Debug, "site", "domain", "anything")));
}
