use milky_core::db::open_db_in_memory;
use milky_core::{
    FocusStore, LastSessionSnapshot, Mood, SqliteKvRepository, TimerMode,
};

#[test]
fn completed_sessions_are_prepended_with_fresh_stamps() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let first = store
        .add_to_history(1500, TimerMode::Focus, Some(Mood::Good))
        .unwrap();
    let second = store.add_to_history(300, TimerMode::ShortBreak, None).unwrap();

    let history = store.history();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].id, second.id);
    assert_eq!(history[1].id, first.id);

    assert_eq!(history[1].duration_secs, 1500);
    assert_eq!(history[1].mode, TimerMode::Focus);
    assert_eq!(history[1].mood, Some(Mood::Good));
    assert!(!history[1].id.is_nil());
    assert!(history[1].timestamp_ms > 0);
}

#[test]
fn zero_duration_is_recorded_as_given() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let record = store.add_to_history(0, TimerMode::Hyperfocus, None).unwrap();
    assert_eq!(record.duration_secs, 0);
    assert_eq!(store.history()[0].duration_secs, 0);
}

#[test]
fn history_survives_reload() {
    let conn = open_db_in_memory().unwrap();

    let expected = {
        let mut store = open_store(&conn);
        store
            .add_to_history(1500, TimerMode::Focus, Some(Mood::Tired))
            .unwrap();
        store.add_to_history(900, TimerMode::LongBreak, None).unwrap();
        store.history().to_vec()
    };

    let reloaded = open_store(&conn);
    assert_eq!(reloaded.history(), expected.as_slice());
}

#[test]
fn last_session_snapshot_is_ephemeral() {
    let conn = open_db_in_memory().unwrap();

    {
        let mut store = open_store(&conn);
        assert_eq!(store.last_session(), &LastSessionSnapshot::default());

        store.set_last_session(LastSessionSnapshot {
            duration_secs: 1500,
            mode: TimerMode::Focus,
            mood: Some(Mood::Great),
        });
        assert_eq!(store.last_session().duration_secs, 1500);
        assert_eq!(store.last_session().mood, Some(Mood::Great));
    }

    // A reload starts from the default snapshot; it is never persisted.
    let reloaded = open_store(&conn);
    assert_eq!(reloaded.last_session(), &LastSessionSnapshot::default());
}

fn open_store(conn: &rusqlite::Connection) -> FocusStore<SqliteKvRepository<'_>> {
    let repo = SqliteKvRepository::try_new(conn).unwrap();
    FocusStore::open(repo).unwrap()
}
