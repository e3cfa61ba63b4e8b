use jiff::{SignedDuration, Timestamp};
use shortlink_core::{Clock, ManualClock, ShortenedRecord};
use shortlink_history::{FileStorage, HistorySettings, HistoryStore, InsertOutcome};

fn start() -> Timestamp {
    Timestamp::from_second(1_700_000_000).unwrap()
}

async fn open_at(path: &std::path::Path, clock: &ManualClock) -> HistoryStore<FileStorage, ManualClock> {
    HistoryStore::open(FileStorage::new(path), clock.clone(), HistorySettings::default()).await
}

#[tokio::test]
async fn history_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let clock = ManualClock::new(start());

    {
        let mut store = open_at(&path, &clock).await;
        store
            .insert(ShortenedRecord::new("https://example.com", "abc123", clock.now()))
            .await;
        store
            .insert(ShortenedRecord::new("https://rust-lang.org", "rst", clock.now()))
            .await;
    }

    let store = open_at(&path, &clock).await;
    let urls: Vec<_> = store.records().iter().map(|r| r.short_url.as_str()).collect();
    assert_eq!(urls, vec!["rst", "abc123"]);
}

#[tokio::test]
async fn reopen_after_retention_window_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let clock = ManualClock::new(start());

    {
        let mut store = open_at(&path, &clock).await;
        let outcome = store
            .insert(ShortenedRecord::new("https://example.com", "abc123", clock.now()))
            .await;
        assert_eq!(outcome, InsertOutcome::Inserted { evicted: None });
    }

    clock.advance(SignedDuration::from_hours(7 * 24 + 1));
    let store = open_at(&path, &clock).await;
    assert!(store.collection().is_empty());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
}

#[tokio::test]
async fn garbage_file_loads_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    std::fs::write(&path, "\u{0}\u{1}garbage").unwrap();
    let clock = ManualClock::new(start());

    let mut store = open_at(&path, &clock).await;
    assert!(store.collection().is_empty());

    store
        .insert(ShortenedRecord::new("https://example.com", "abc123", clock.now()))
        .await;
    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("\"short_url\":\"abc123\""));
}

#[tokio::test]
async fn clear_removes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history.json");
    let clock = ManualClock::new(start());

    let mut store = open_at(&path, &clock).await;
    store
        .insert(ShortenedRecord::new("https://example.com", "abc123", clock.now()))
        .await;
    assert!(path.exists());

    store.clear().await;
    assert!(!path.exists());
}
