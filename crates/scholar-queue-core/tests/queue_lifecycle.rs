//! End-to-end queue lifecycle over the on-disk store.

use std::time::{Duration, Instant};

use scholar_queue_core::queue::QUEUE_KEY;
use scholar_queue_core::{
    FileStore, KeyValueStore, Library, MachineConfig, NavigateError, Navigator, PageActions,
    Presenter, QueueSnapshot, QueueStore, Session, Trigger,
};

/// Host that opens nothing and records what the session asked for.
struct Recorder {
    visited: Vec<String>,
    highlighted: Vec<String>,
    library: Library,
    last_render: Option<QueueSnapshot>,
}

impl Navigator for Recorder {
    fn navigate(&mut self, url: &str) -> Result<(), NavigateError> {
        self.visited.push(url.to_string());
        Ok(())
    }
}

impl PageActions for Recorder {
    fn click_save(&mut self, query: &str) {
        self.library.click_save(query);
    }

    fn highlight_save(&mut self, query: &str) {
        self.highlighted.push(query.to_string());
    }
}

impl Presenter for Recorder {
    fn render(&mut self, snapshot: &QueueSnapshot) {
        self.last_render = Some(snapshot.clone());
    }
}

fn recorder(dir: &std::path::Path) -> Recorder {
    Recorder {
        visited: Vec::new(),
        highlighted: Vec::new(),
        library: Library::in_dir(dir),
        last_render: None,
    }
}

#[test]
fn queue_survives_reopening_the_store() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = QueueStore::new(FileStore::new(dir.path()));
    first
        .replace(["Attention Is All You Need", "https://doi.org/10.1000/xyz123"])
        .unwrap();
    drop(first);

    let mut second = QueueStore::new(FileStore::new(dir.path()));
    assert_eq!(
        second.load(),
        vec!["Attention Is All You Need", "https://doi.org/10.1000/xyz123"]
    );
    second.advance().unwrap();

    let third = QueueStore::new(FileStore::new(dir.path()));
    assert_eq!(third.peek().as_deref(), Some("https://doi.org/10.1000/xyz123"));
    assert_eq!(third.peek_next(), None);
}

#[test]
fn corrupt_file_reads_as_empty_and_is_replaceable() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(format!("{}.json", QUEUE_KEY)), "[\"unterminated").unwrap();

    let mut store = QueueStore::new(FileStore::new(dir.path()));
    assert!(store.load().is_empty());
    assert_eq!(store.advance().unwrap(), None);

    store.replace(["fresh"]).unwrap();
    assert_eq!(store.load(), vec!["fresh"]);
}

#[test]
fn clear_deletes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = QueueStore::new(FileStore::new(dir.path()));
    store.replace(["a"]).unwrap();
    assert!(dir.path().join(format!("{}.json", QUEUE_KEY)).exists());

    store.clear().unwrap();
    assert!(!dir.path().join(format!("{}.json", QUEUE_KEY)).exists());
    assert_eq!(store.backend().get(QUEUE_KEY).unwrap(), None);
    assert_eq!(store.peek(), None);
}

#[test]
fn full_session_walkthrough() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(
        QueueStore::new(FileStore::new(dir.path())),
        MachineConfig::default(),
    );
    let mut host = recorder(dir.path());

    session
        .dispatch(
            Trigger::Begin("10.1/abcd\nSome Title\n\nhttps://doi.org/10.1145/3442188.3445922\n".into()),
            &mut host,
        )
        .unwrap();
    assert_eq!(
        host.last_render,
        Some(QueueSnapshot {
            current: Some("10.1/abcd".into()),
            next: Some("Some Title".into()),
            remaining: 3,
        })
    );

    session.poll_timers(Instant::now() + Duration::from_secs(1), &mut host);
    assert_eq!(host.highlighted, vec!["10.1/abcd"]);

    session.dispatch(Trigger::Save, &mut host).unwrap();
    session.dispatch(Trigger::Save, &mut host).unwrap();
    session.dispatch(Trigger::Next, &mut host).unwrap();
    session.dispatch(Trigger::Next, &mut host).unwrap();
    session.dispatch(Trigger::Save, &mut host).unwrap();

    assert_eq!(
        host.visited,
        vec![
            "https://scholar.google.com/scholar?q=10.1%2Fabcd",
            "https://scholar.google.com/scholar?q=Some%20Title",
            "https://scholar.google.com/scholar?q=doi%3A10.1145%2F3442188.3445922",
        ]
    );

    let saved: Vec<_> = host
        .library
        .entries()
        .into_iter()
        .map(|e| e.search)
        .collect();
    assert_eq!(saved, vec!["10.1/abcd", "doi:10.1145/3442188.3445922"]);

    let snap = session.dispatch(Trigger::Next, &mut host).unwrap();
    assert!(snap.is_empty());
    let snap = session.dispatch(Trigger::Next, &mut host).unwrap();
    assert!(snap.is_empty());
    assert_eq!(host.visited.len(), 3);

    session.dispatch(Trigger::Clear, &mut host).unwrap();
    assert_eq!(host.last_render, Some(QueueSnapshot::default()));
}
