use std::time::Duration;

use tempfile::{TempDir, tempdir};

use super::{QueueNames, QueueStore, SledQueue};

fn open_store() -> (SledQueue, TempDir) {
    let dir = tempdir().expect("Failed to create temp dir");
    let store = SledQueue::open(dir.path().to_str().unwrap()).expect("Failed to open store");
    (store, dir)
}

#[test]
fn test_queue_names_derivation() {
    let names = QueueNames::new("jobs");
    assert_eq!(names.primary(), "jobs");
    assert_eq!(names.retry(), "jobs_retry");
    assert_eq!(names.dead_letter(), "jobs_dlq");
}

#[test]
fn test_pop_is_fifo() {
    let (store, _dir) = open_store();
    store.push("q", b"first").unwrap();
    store.push("q", b"second").unwrap();
    store.push("q", b"third").unwrap();

    assert_eq!(store.try_pop("q").unwrap().as_deref(), Some(&b"first"[..]));
    assert_eq!(store.try_pop("q").unwrap().as_deref(), Some(&b"second"[..]));
    assert_eq!(store.try_pop("q").unwrap().as_deref(), Some(&b"third"[..]));
    assert_eq!(store.try_pop("q").unwrap(), None);
}

#[test]
fn test_len_tracks_entries() {
    let (store, _dir) = open_store();
    assert_eq!(store.len("q").unwrap(), 0);
    store.push("q", b"a").unwrap();
    store.push("q", b"b").unwrap();
    assert_eq!(store.len("q").unwrap(), 2);
    store.try_pop("q").unwrap();
    assert_eq!(store.len("q").unwrap(), 1);
}

#[test]
fn test_queues_are_independent() {
    let (store, _dir) = open_store();
    let names = QueueNames::new("jobs");
    store.push(names.primary(), b"fresh").unwrap();
    store.push(names.retry(), b"retrying").unwrap();
    store.push(names.dead_letter(), b"parked").unwrap();

    assert_eq!(store.len(names.primary()).unwrap(), 1);
    assert_eq!(store.len(names.retry()).unwrap(), 1);
    assert_eq!(store.len(names.dead_letter()).unwrap(), 1);
    assert_eq!(
        store.try_pop(names.retry()).unwrap().as_deref(),
        Some(&b"retrying"[..])
    );
    assert_eq!(store.len(names.primary()).unwrap(), 1);
}

#[test]
fn test_entries_survive_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().to_str().unwrap().to_string();
    {
        let store = SledQueue::open(&path).unwrap();
        store.push("q", b"durable").unwrap();
    }
    let store = SledQueue::open(&path).unwrap();
    assert_eq!(store.try_pop("q").unwrap().as_deref(), Some(&b"durable"[..]));
}

#[tokio::test]
async fn test_pop_wait_returns_immediately_when_entry_present() {
    let (store, _dir) = open_store();
    store.push("q", b"ready").unwrap();
    let got = store.pop_wait("q", Duration::from_secs(5)).await.unwrap();
    assert_eq!(got.as_deref(), Some(&b"ready"[..]));
}

#[tokio::test]
async fn test_pop_wait_wakes_on_push() {
    let (store, _dir) = open_store();
    let producer = store.clone();
    let pusher = tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        producer.push("q", b"late").unwrap();
    });

    let got = store.pop_wait("q", Duration::from_secs(5)).await.unwrap();
    assert_eq!(got.as_deref(), Some(&b"late"[..]));
    pusher.await.unwrap();
}

#[tokio::test]
async fn test_pop_wait_timeout_is_not_an_error() {
    let (store, _dir) = open_store();
    let got = store.pop_wait("q", Duration::from_millis(50)).await.unwrap();
    assert_eq!(got, None);
}
