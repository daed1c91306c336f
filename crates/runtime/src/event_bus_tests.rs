// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::time::Duration;

#[tokio::test]
async fn subscriber_receives_published_message() {
    let bus = EventBus::new(4);
    let mut rx = bus.subscribe("telemetry.logs", CancellationToken::new());
    bus.publish("telemetry.logs", Arc::new(42i32));
    let msg = rx.rx.recv().await.expect("message");
    assert_eq!(*msg.downcast::<i32>().unwrap(), 42);
}

#[tokio::test]
async fn empty_topic_normalizes_to_default_on_subscribe() {
    let bus = EventBus::new(4);
    let mut rx = bus.subscribe("", CancellationToken::new());
    bus.publish("default", Arc::new("hello"));
    let msg = rx.rx.recv().await.expect("message");
    assert_eq!(*msg.downcast::<&str>().unwrap(), "hello");
}

#[tokio::test]
async fn publish_to_empty_topic_reaches_no_one() {
    let bus = EventBus::new(4);
    let mut rx = bus.subscribe("default", CancellationToken::new());
    bus.publish("", Arc::new(1i32));
    tokio::time::timeout(Duration::from_millis(20), rx.rx.recv())
        .await
        .expect_err("no message should arrive");
}

#[tokio::test]
async fn full_subscriber_buffer_drops_message_without_blocking() {
    let bus = EventBus::new(1);
    let rx = bus.subscribe("t", CancellationToken::new());
    bus.publish("t", Arc::new(1i32));
    bus.publish("t", Arc::new(2i32)); // dropped: buffer already full
    drop(rx);
}

#[tokio::test]
async fn cancel_is_idempotent() {
    let bus = EventBus::new(4);
    let rx = bus.subscribe("t", CancellationToken::new());
    rx.cancel();
    rx.cancel();
}

#[tokio::test]
async fn context_cancellation_unsubscribes() {
    let bus = EventBus::new(4);
    let ctx = CancellationToken::new();
    let mut rx = bus.subscribe("t", ctx.clone());
    ctx.cancel();
    tokio::task::yield_now().await;
    tokio::time::sleep(Duration::from_millis(10)).await;
    bus.publish("t", Arc::new(1i32));
    tokio::time::timeout(Duration::from_millis(20), rx.rx.recv())
        .await
        .expect_err("unsubscribed receiver should not see new publishes");
}

#[tokio::test]
async fn subscribing_with_already_cancelled_context_yields_empty_receiver() {
    let bus = EventBus::new(4);
    let ctx = CancellationToken::new();
    ctx.cancel();
    let mut rx = bus.subscribe("t", ctx);
    bus.publish("t", Arc::new(1i32));
    tokio::time::timeout(Duration::from_millis(20), rx.rx.recv())
        .await
        .expect_err("pre-cancelled subscribe should never observe publishes");
}
