use milky_core::db::open_db_in_memory;
use milky_core::{FocusStore, LogKind, SqliteKvRepository, MILKY_LOG_CAP, WELCOME_LINE};

#[test]
fn fresh_store_starts_with_the_welcome_bubble() {
    let conn = open_db_in_memory().unwrap();
    let store = open_store(&conn);

    assert_eq!(store.logs().len(), 1);
    assert_eq!(store.logs()[0].text, WELCOME_LINE);
    assert_eq!(store.logs()[0].kind, LogKind::Milky);
}

#[test]
fn log_is_capped_and_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    for n in 0..25 {
        store.add_log(format!("message {n}"), LogKind::User).unwrap();
    }

    assert_eq!(store.logs().len(), MILKY_LOG_CAP);
    assert_eq!(store.logs()[0].text, "message 24");
    assert_eq!(store.logs()[MILKY_LOG_CAP - 1].text, "message 15");
}

#[test]
fn update_by_id_replaces_only_the_targeted_bubble() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    store.add_log("How do I start?", LogKind::User).unwrap();
    let placeholder = store.add_milky_log("Thinking...").unwrap();
    // Entries keep arriving while the reply is in flight.
    store.add_log("never mind", LogKind::User).unwrap();
    store.add_milky_log("Noted.").unwrap();

    store
        .update_log_content(placeholder, "Start with two minutes.")
        .unwrap();

    let texts: Vec<&str> = store.logs().iter().map(|entry| entry.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Noted.",
            "never mind",
            "Start with two minutes.",
            "How do I start?",
            WELCOME_LINE,
        ]
    );
}

#[test]
fn update_after_eviction_is_a_silent_no_op() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let doomed = store.add_milky_log("Thinking...").unwrap();
    for n in 0..MILKY_LOG_CAP {
        store.add_log(format!("filler {n}"), LogKind::User).unwrap();
    }
    assert!(store.logs().iter().all(|entry| entry.id != doomed));

    let before: Vec<String> = store.logs().iter().map(|entry| entry.text.clone()).collect();
    store.update_log_content(doomed, "too late").unwrap();
    let after: Vec<String> = store.logs().iter().map(|entry| entry.text.clone()).collect();

    assert_eq!(before, after);
}

#[test]
fn log_survives_reload_with_ids_intact() {
    let conn = open_db_in_memory().unwrap();

    let placeholder = {
        let mut store = open_store(&conn);
        store.add_log("hello", LogKind::User).unwrap();
        store.add_milky_log("Thinking...").unwrap()
    };

    // A reply resolving after a reload still lands in the right bubble.
    let mut reloaded = open_store(&conn);
    reloaded
        .update_log_content(placeholder, "Welcome back.")
        .unwrap();

    assert_eq!(reloaded.logs()[0].text, "Welcome back.");
    assert_eq!(reloaded.logs()[1].text, "hello");
}

fn open_store(conn: &rusqlite::Connection) -> FocusStore<SqliteKvRepository<'_>> {
    let repo = SqliteKvRepository::try_new(conn).unwrap();
    FocusStore::open(repo).unwrap()
}
