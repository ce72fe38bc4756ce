use milky_core::db::open_db_in_memory;
use milky_core::{fresh_id, FocusStore, Quadrant, SqliteKvRepository, StoreError};

#[test]
fn add_task_appends_and_announces() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let task = store.add_task("Email client", Quadrant::DoFirst).unwrap();

    assert_eq!(store.tasks().len(), 1);
    assert_eq!(store.tasks()[0].id, task.id);
    assert_eq!(store.tasks()[0].quadrant, Quadrant::DoFirst);
    assert!(!store.tasks()[0].completed);
    assert!(store.tasks()[0].ai_steps.is_empty());

    assert_eq!(store.logs()[0].text, "Added to DO FIRST: \"Email client\"");
}

#[test]
fn rapid_double_entry_yields_distinct_ids() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let first = store.add_task("water plants", Quadrant::Schedule).unwrap();
    let second = store.add_task("water plants", Quadrant::Schedule).unwrap();

    assert_ne!(first.id, second.id);
    assert_eq!(store.tasks().len(), 2);
}

#[test]
fn add_task_rejects_blank_text() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let err = store.add_task("   ", Quadrant::Eliminate).unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(store.tasks().is_empty());
}

#[test]
fn remove_task_reports_whether_anything_happened() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let task = store.add_task("old chore", Quadrant::Delegate).unwrap();

    assert!(store.remove_task(task.id).unwrap());
    assert!(store.tasks().is_empty());
    assert!(!store.remove_task(task.id).unwrap());
    assert!(!store.remove_task(fresh_id()).unwrap());
}

#[test]
fn toggle_flips_completion_and_is_silent_on_absent_ids() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let task = store.add_task("stretch", Quadrant::DoFirst).unwrap();
    let logs_before = store.logs().len();

    store.toggle_task_complete(task.id).unwrap();
    assert!(store.tasks()[0].completed);

    store.toggle_task_complete(task.id).unwrap();
    assert!(!store.tasks()[0].completed);

    // Toggling emits no log entry; praise ordering is the caller's concern.
    assert_eq!(store.logs().len(), logs_before);

    store.toggle_task_complete(fresh_id()).unwrap();
    assert_eq!(store.tasks().len(), 1);
}

#[test]
fn ai_steps_accumulate_in_order() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    let task = store.add_task("write report", Quadrant::DoFirst).unwrap();

    store
        .append_task_ai_step(task.id, "Open the document")
        .unwrap();
    store
        .append_task_ai_step(task.id, "Write one sentence")
        .unwrap();
    store.append_task_ai_step(fresh_id(), "lost step").unwrap();

    assert_eq!(
        store.tasks()[0].ai_steps,
        vec!["Open the document", "Write one sentence"]
    );
}

#[test]
fn tasks_filter_by_quadrant_in_insertion_order() {
    let conn = open_db_in_memory().unwrap();
    let mut store = open_store(&conn);

    store.add_task("a", Quadrant::DoFirst).unwrap();
    store.add_task("b", Quadrant::Schedule).unwrap();
    store.add_task("c", Quadrant::DoFirst).unwrap();

    let do_first: Vec<&str> = store
        .tasks_in_quadrant(Quadrant::DoFirst)
        .map(|task| task.text.as_str())
        .collect();
    assert_eq!(do_first, vec!["a", "c"]);
}

#[test]
fn task_list_round_trips_across_reload() {
    let conn = open_db_in_memory().unwrap();

    let expected = {
        let mut store = open_store(&conn);
        let first = store.add_task("Email client", Quadrant::DoFirst).unwrap();
        store.add_task("File taxes", Quadrant::Schedule).unwrap();
        store.toggle_task_complete(first.id).unwrap();
        store
            .append_task_ai_step(first.id, "Open the thread")
            .unwrap();
        store.tasks().to_vec()
    };

    let reloaded = open_store(&conn);
    assert_eq!(reloaded.tasks(), expected.as_slice());
}

fn open_store(conn: &rusqlite::Connection) -> FocusStore<SqliteKvRepository<'_>> {
    let repo = SqliteKvRepository::try_new(conn).unwrap();
    FocusStore::open(repo).unwrap()
}
