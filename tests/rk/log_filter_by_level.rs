//! Log-filter-by-level specs
//!
//! The admin log stream only forwards records at or above the level
//! requested in its query string; records below that level never reach
//! the subscriber.

use crate::prelude::*;
use futures_util::StreamExt;
use reqwest_eventsource::{Event as SseClientEvent, EventSource};
use rk_core::{Level, LogRecord};
use std::time::{Duration, SystemTime};
use tokio::time::timeout;

fn record(level: Level, message: &str) -> LogRecord {
    LogRecord {
        time: SystemTime::now(),
        level,
        kernel_id: "site-1".to_string(),
        scope: "domain".to_string(),
        component: "http".to_string(),
        trace: None,
        message: message.to_string(),
        fields: Default::default(),
    }
}

async fn next_log_message(source: &mut EventSource) -> String {
    loop {
        let event = timeout(Duration::from_secs(2), source.next()).await.expect("event within timeout").expect("stream open").expect("ok");
        if let SseClientEvent::Message(message) = event {
            if message.event == "log" {
                return message.data;
            }
        }
    }
}

#[tokio::test]
async fn subscribing_at_warn_only_forwards_warn_and_error_records() {
    let cfg = config_with_domains(vec![]);
    let running = RunningKernel::start(cfg).await;

    let mut source = EventSource::get(running.url("/admin/logs/stream?level=warn"));
    let hello = timeout(Duration::from_secs(2), source.next()).await.expect("hello within timeout").expect("hello event").expect("ok");
    assert!(matches!(hello, SseClientEvent::Message(ref m) if m.event == "hello"));

    assert!(running.kernel.hub.publish(record(Level::Debug, "too quiet")));
    assert!(running.kernel.hub.publish(record(Level::Info, "still too quiet")));
    assert!(running.kernel.hub.publish(record(Level::Warn, "loud enough")));
    assert!(running.kernel.hub.publish(record(Level::Error, "very loud")));

    let first = next_log_message(&mut source).await;
    assert!(first.contains("loud enough"), "debug/info records must not reach a warn subscriber, got: {first}");

    let second = next_log_message(&mut source).await;
    assert!(second.contains("very loud"));

    running.shutdown().await;
}
