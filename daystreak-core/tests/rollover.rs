use chrono::NaiveDate;
use daystreak_core::persist::{
    CURRENT_STREAK_KEY, LAST_ACTIVE_DATE_KEY, LAST_COMPLETED_DATE_KEY, TASKS_KEY, load,
};
use daystreak_core::{Day, FixedClock, KeyValueStore, MemoryStore, Rollover, TaskId, Tracker};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn store_with(
    tasks: &str,
    streak: u32,
    completed: Option<&str>,
    active: Option<&str>,
) -> MemoryStore {
    let mut store = MemoryStore::new()
        .with_entry(TASKS_KEY, tasks)
        .with_entry(CURRENT_STREAK_KEY, streak.to_string());
    if let Some(completed) = completed {
        store = store.with_entry(LAST_COMPLETED_DATE_KEY, completed);
    }
    if let Some(active) = active {
        store = store.with_entry(LAST_ACTIVE_DATE_KEY, active);
    }
    store
}

#[test]
fn first_run_records_active_date_only() {
    let store = store_with(
        r#"[{"id": 1, "text": "A", "day": "Monday", "completed": false}]"#,
        0,
        None,
        None,
    );
    let tracker = Tracker::open(store, FixedClock(date(2024, 1, 1))).unwrap();

    assert_eq!(tracker.rollover(), Rollover::FirstRun);
    assert_eq!(tracker.current_streak(), 0);
    assert_eq!(tracker.engine().tasks().len(), 1);
    assert_eq!(
        tracker.store().get(LAST_ACTIVE_DATE_KEY).unwrap().as_deref(),
        Some("2024-01-01")
    );
}

#[test]
fn completed_day_is_credited_on_rollover() {
    let store = store_with(
        r#"[
            {"id": 1, "text": "Run", "day": "Monday", "completed": true},
            {"id": 2, "text": "Swim", "day": "Tuesday", "completed": true}
        ]"#,
        0,
        None,
        Some("2024-01-01"),
    );
    let tracker = Tracker::open(store, FixedClock(date(2024, 1, 2))).unwrap();

    assert_eq!(tracker.rollover(), Rollover::Credited { streak: 1 });
    let streak = tracker.engine().streak();
    assert_eq!(streak.current_streak, 1);
    assert_eq!(streak.last_completed_date, Some(date(2024, 1, 1)));
    assert_eq!(streak.last_active_date, Some(date(2024, 1, 2)));

    let tasks = tracker.engine().tasks();
    assert!(!tasks.get(TaskId(2)).unwrap().completed);
    assert!(tasks.get(TaskId(1)).unwrap().completed);

    let persisted = load(tracker.store());
    assert_eq!(persisted.streak(), streak);
}

#[test]
fn incomplete_day_breaks_streak_on_rollover() {
    let store = store_with(
        r#"[
            {"id": 1, "text": "Run", "day": "Monday", "completed": true},
            {"id": 2, "text": "Read", "day": "Monday", "completed": false}
        ]"#,
        5,
        Some("2023-12-31"),
        Some("2024-01-01"),
    );
    let tracker = Tracker::open(store, FixedClock(date(2024, 1, 2))).unwrap();

    assert_eq!(tracker.rollover(), Rollover::Broken);
    assert_eq!(tracker.current_streak(), 0);
}

#[test]
fn completed_day_is_credited_after_days_away() {
    let store = store_with(
        r#"[
            {"id": 1, "text": "Run", "day": "Monday", "completed": true},
            {"id": 2, "text": "Swim", "day": "Thursday", "completed": true}
        ]"#,
        3,
        Some("2023-12-31"),
        Some("2024-01-01"),
    );
    let tracker = Tracker::open(store, FixedClock(date(2024, 1, 4))).unwrap();

    assert_eq!(tracker.rollover(), Rollover::Credited { streak: 4 });
    let streak = tracker.engine().streak();
    assert_eq!(streak.current_streak, 4);
    assert_eq!(streak.last_completed_date, Some(date(2024, 1, 1)));
    assert_eq!(streak.last_active_date, Some(date(2024, 1, 4)));
    assert!(!tracker.engine().tasks().get(TaskId(2)).unwrap().completed);
}

#[test]
fn empty_day_breaks_streak_on_rollover() {
    let store = store_with("[]", 2, Some("2023-12-31"), Some("2024-01-01"));
    let tracker = Tracker::open(store, FixedClock(date(2024, 1, 2))).unwrap();

    assert_eq!(tracker.current_streak(), 0);
}

#[test]
fn streak_grows_one_per_day() {
    let mut store = MemoryStore::new();
    let mut last_id = None;

    for (offset, day) in [Day::Monday, Day::Tuesday, Day::Wednesday].into_iter().enumerate() {
        let today = date(2024, 1, 1 + offset as u32);
        let mut tracker = Tracker::open(store, FixedClock(today)).unwrap();
        if let Some(id) = last_id {
            assert!(tracker.engine().tasks().get(id).is_some());
        }

        let id = tracker.add("Daily", day).unwrap().id;
        let toggled = tracker.toggle(id).unwrap();
        assert!(toggled.credited);
        assert_eq!(tracker.current_streak(), offset as u32 + 1);
        assert_eq!(tracker.completion_percentage(), 100);

        last_id = Some(id);
        store = tracker.store().clone();
    }

    let thursday = Tracker::open(store, FixedClock(date(2024, 1, 4))).unwrap();
    assert_eq!(thursday.rollover(), Rollover::AlreadyCredited);
    assert_eq!(thursday.current_streak(), 3);
    assert_eq!(thursday.completion_percentage(), 0);
}

#[test]
fn ids_stay_unique_across_reloads() {
    let mut tracker = Tracker::open(MemoryStore::new(), FixedClock(date(2024, 1, 1))).unwrap();
    let first = tracker.add("one", Day::Monday).unwrap().id;
    let second = tracker.add("two", Day::Monday).unwrap().id;
    tracker.delete(first).unwrap();

    let mut reopened =
        Tracker::open(tracker.store().clone(), FixedClock(date(2024, 1, 1))).unwrap();
    let third = reopened.add("three", Day::Monday).unwrap().id;

    assert_ne!(third, second);
    assert_ne!(third, first);
}

#[test]
fn deleting_missing_task_is_reported_without_change() {
    let mut tracker = Tracker::open(MemoryStore::new(), FixedClock(date(2024, 1, 1))).unwrap();
    tracker.add("keep", Day::Monday).unwrap();
    let before = tracker.store().entries().clone();

    assert!(!tracker.delete(TaskId(404)).unwrap());
    assert_eq!(tracker.store().entries(), &before);
}

#[test]
fn corrupt_store_starts_fresh() {
    let store = MemoryStore::new()
        .with_entry(TASKS_KEY, "<html>")
        .with_entry(CURRENT_STREAK_KEY, "-3")
        .with_entry(LAST_ACTIVE_DATE_KEY, "not-a-date");
    let tracker = Tracker::open(store, FixedClock(date(2024, 1, 1))).unwrap();

    assert_eq!(tracker.rollover(), Rollover::FirstRun);
    assert_eq!(tracker.current_streak(), 0);
    assert!(tracker.today_tasks().is_empty());
}

#[test]
fn extreme_stored_numbers_do_not_panic() {
    let store = store_with(
        r#"[
            {"id": 18446744073709551615, "text": "Too far", "day": "Monday", "completed": false},
            {"id": 4, "text": "Run", "day": "Monday", "completed": false}
        ]"#,
        u32::MAX,
        Some("2023-12-31"),
        Some("2024-01-01"),
    );
    let mut tracker = Tracker::open(store, FixedClock(date(2024, 1, 1))).unwrap();

    assert_eq!(tracker.engine().tasks().len(), 1);
    assert!(tracker.toggle(TaskId(4)).unwrap().credited);
    assert_eq!(tracker.current_streak(), u32::MAX);
    assert_eq!(tracker.add("next", Day::Monday).unwrap().id, TaskId(5));
}
