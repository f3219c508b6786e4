use dayflow::commands::*;
use dayflow::models::TaskStatus;
use dayflow::storage::{export_json, load_data};
use dayflow::store::get_record;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

// Use a mutex to ensure tests run serially since they modify the environment variable
static TEST_MUTEX: Mutex<()> = Mutex::new(());

fn with_test_db<F>(test_name: &str, f: F)
where
    F: FnOnce(PathBuf),
{
    let _guard = TEST_MUTEX.lock().unwrap();

    let mut db_path = env::temp_dir();
    db_path.push(format!("dayflow_test_{}.json", test_name));

    // Set env var
    env::set_var("DAYFLOW_DB", db_path.to_str().unwrap());

    // Clean up before test
    if db_path.exists() {
        fs::remove_file(&db_path).unwrap();
    }

    // Run test
    f(db_path.clone());

    // Clean up after test
    if db_path.exists() {
        fs::remove_file(&db_path).unwrap();
    }
    env::remove_var("DAYFLOW_DB");
}

fn today() -> String {
    dayflow::dates::today_string()
}

#[test]
fn test_add_and_complete_task() {
    with_test_db("add_complete", |_path| {
        cmd_add("Write tests".into(), Some("Work".into()), Some("high".into()), None, true);

        let data = load_data();
        let record = get_record(&data, &today());
        assert_eq!(record.tasks.len(), 1);
        assert_eq!(record.tasks[0].title, "Write tests");
        assert_eq!(record.tasks[0].status, TaskStatus::Pending);

        let id = record.tasks[0].id.clone();
        cmd_status(id, "completed".into(), None, true);

        let data = load_data();
        let record = get_record(&data, &today());
        assert_eq!(record.tasks[0].status, TaskStatus::Completed);
    });
}

#[test]
fn test_invalid_priority_adds_nothing() {
    with_test_db("bad_priority", |_path| {
        cmd_add("Task".into(), None, Some("urgent".into()), None, true);
        let data = load_data();
        assert!(get_record(&data, &today()).tasks.is_empty());
    });
}

#[test]
fn test_move_task_reorders() {
    with_test_db("move", |_path| {
        cmd_add("first".into(), None, None, None, true);
        cmd_add("second".into(), None, None, None, true);
        cmd_add("third".into(), None, None, None, true);

        let data = load_data();
        let id = get_record(&data, &today()).tasks[2].id.clone();
        cmd_move(id, 0, None, true);

        let data = load_data();
        let titles: Vec<String> = get_record(&data, &today())
            .tasks
            .iter()
            .map(|t| t.title.clone())
            .collect();
        assert_eq!(titles, vec!["third", "first", "second"]);
    });
}

#[test]
fn test_habit_toggle_and_remove() {
    with_test_db("habit", |_path| {
        cmd_habit_add("Morning run".into(), "weekdays".into(), None, true);

        let data = load_data();
        assert_eq!(data.routine_habits.len(), 1);
        let id = data.routine_habits[0].id.clone();

        cmd_habit_done(id.clone(), Some("2024-01-08".into()), true);
        let data = load_data();
        assert_eq!(data.routine_completions.len(), 1);

        // Toggling again removes the completion fact.
        cmd_habit_done(id.clone(), Some("2024-01-08".into()), true);
        let data = load_data();
        assert!(data.routine_completions.is_empty());

        cmd_habit_done(id.clone(), Some("2024-01-08".into()), true);
        cmd_habit_remove(id, true);
        let data = load_data();
        assert!(data.routine_habits.is_empty());
        assert!(data.routine_completions.is_empty());
    });
}

#[test]
fn test_export_import_round_trip() {
    with_test_db("round_trip", |path| {
        cmd_add("Task".into(), None, None, None, true);
        cmd_habit_add("Read".into(), "daily".into(), None, true);
        let data = load_data();
        let id = data.routine_habits[0].id.clone();
        cmd_habit_done(id, None, true);

        let before = load_data();
        let mut export_path = path.clone();
        export_path.set_extension("export.json");
        cmd_export(Some(export_path.clone()), true);

        // Wipe the database, then import the export back.
        fs::remove_file(&path).unwrap();
        assert_eq!(load_data(), dayflow::models::AppData::default());

        cmd_import(export_path.clone(), true);
        assert_eq!(load_data(), before);

        fs::remove_file(&export_path).unwrap();
    });
}

#[test]
fn test_malformed_import_leaves_data_untouched() {
    with_test_db("bad_import", |path| {
        cmd_add("Keep me".into(), None, None, None, true);
        let before = load_data();

        let mut bad_path = path.clone();
        bad_path.set_extension("bad.json");
        fs::write(&bad_path, "{ not json").unwrap();
        cmd_import(bad_path.clone(), true);
        assert_eq!(load_data(), before);

        // A non-object payload is rejected too.
        fs::write(&bad_path, "[1, 2, 3]").unwrap();
        cmd_import(bad_path.clone(), true);
        assert_eq!(load_data(), before);

        fs::remove_file(&bad_path).unwrap();
    });
}

#[test]
fn test_corrupt_database_loads_defaults() {
    with_test_db("corrupt", |path| {
        fs::write(&path, "garbage").unwrap();
        assert_eq!(load_data(), dayflow::models::AppData::default());
    });
}

#[test]
fn test_category_add_is_unique() {
    with_test_db("category", |_path| {
        cmd_category_add("Reading".into(), "#abcdef".into(), true);
        cmd_category_add("reading".into(), "#000000".into(), true);

        let data = load_data();
        assert_eq!(data.categories.len(), 5);

        cmd_category_remove("Reading".into(), true);
        let data = load_data();
        assert_eq!(data.categories.len(), 4);
    });
}

#[test]
fn test_export_reproduces_snapshot_bytes() {
    with_test_db("export_bytes", |_path| {
        cmd_add("Task".into(), None, None, None, true);
        let data = load_data();
        let a = export_json(&data);
        let b = export_json(&load_data());
        assert_eq!(a, b);
    });
}
