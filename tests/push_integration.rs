//! Push channel tests against a real WebSocket server

mod common;

use common::{fast_reconnect, snapshot_payload, start_push_server, target_json};
use sitewatch::push::{PushChannel, PushEvent};
use sitewatch::snapshot::TargetStatus;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

async fn next_event(rx: &mut mpsc::Receiver<PushEvent>) -> PushEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("push event within 5s")
        .expect("push channel still running")
}

#[tokio::test]
async fn test_snapshots_delivered_in_arrival_order() {
    let server = start_push_server(vec![
        snapshot_payload(&[target_json("https://a.test", "UP", true)]),
        snapshot_payload(&[
            target_json("https://a.test", "DOWN", false),
            target_json("https://b.test", "200 OK", true),
        ]),
    ])
    .await;

    let (tx, mut rx) = mpsc::channel(16);
    let cancel = CancellationToken::new();
    let handle = PushChannel::new(server.url.clone(), fast_reconnect()).start(tx, cancel.clone());

    assert_eq!(next_event(&mut rx).await, PushEvent::Connected);

    match next_event(&mut rx).await {
        PushEvent::Snapshot(snapshot) => {
            assert_eq!(snapshot.len(), 1);
            assert_eq!(snapshot.targets()[0].status, TargetStatus::Up);
        }
        other => panic!("Expected first snapshot, got {:?}", other),
    }

    match next_event(&mut rx).await {
        PushEvent::Snapshot(snapshot) => {
            assert_eq!(snapshot.len(), 2);
            assert_eq!(snapshot.targets()[0].status, TargetStatus::Down);
            assert_eq!(snapshot.targets()[1].status, TargetStatus::Ok(200));
        }
        other => panic!("Expected second snapshot, got {:?}", other),
    }

    cancel.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_reconnects_after_server_closes() {
    let server = start_push_server(vec![snapshot_payload(&[target_json(
        "https://a.test",
        "UP",
        true,
    )])])
    .await;

    let (tx, mut rx) = mpsc::channel(16);
    let cancel = CancellationToken::new();
    let handle = PushChannel::new(server.url.clone(), fast_reconnect()).start(tx, cancel.clone());

    let mut connects = 0;
    let mut snapshots = 0;
    let mut disconnects = Vec::new();
    while connects < 2 || snapshots < 2 {
        match next_event(&mut rx).await {
            PushEvent::Connected => connects += 1,
            PushEvent::Snapshot(_) => snapshots += 1,
            PushEvent::Disconnected { retry_in, .. } => disconnects.push(retry_in),
        }
    }

    cancel.cancel();
    handle.await.unwrap();

    assert!(server.connections() >= 2);
    // A session that connected resets the backoff
    assert_eq!(disconnects[0], Duration::from_millis(10));
    assert!(disconnects.iter().all(|d| *d == Duration::from_millis(10)));
}

#[tokio::test]
async fn test_malformed_payload_is_skipped() {
    let server = start_push_server(vec![
        "not json".to_string(),
        r#"{"update_type":"backend_status"}"#.to_string(),
        snapshot_payload(&[target_json("https://a.test", "UP", true)]),
    ])
    .await;

    let (tx, mut rx) = mpsc::channel(16);
    let cancel = CancellationToken::new();
    let handle = PushChannel::new(server.url.clone(), fast_reconnect()).start(tx, cancel.clone());

    assert_eq!(next_event(&mut rx).await, PushEvent::Connected);
    match next_event(&mut rx).await {
        PushEvent::Snapshot(snapshot) => assert_eq!(snapshot.targets()[0].url, "https://a.test"),
        other => panic!("Expected the valid snapshot, got {:?}", other),
    }

    cancel.cancel();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_stops_when_receiver_dropped() {
    let server = start_push_server(vec![snapshot_payload(&[])]).await;

    let (tx, rx) = mpsc::channel(1);
    drop(rx);
    let handle = PushChannel::new(server.url.clone(), fast_reconnect())
        .start(tx, CancellationToken::new());

    tokio::time::timeout(Duration::from_secs(5), handle)
        .await
        .expect("channel stops without a receiver")
        .unwrap();
}
