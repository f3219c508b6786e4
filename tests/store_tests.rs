use dayflow::models::{AppData, DailyRecord, Priority, Task, TaskStatus};
use dayflow::score::productivity_score;
use dayflow::store::{get_record, upsert_record};

fn task(id: &str, status: TaskStatus) -> Task {
    Task {
        id: id.into(),
        title: format!("Task {id}"),
        status,
        category: "Work".into(),
        priority: Priority::Medium,
        created_at: "2024-01-01T09:00:00+00:00".into(),
        timer_seconds: 0,
        timer_running: false,
    }
}

fn record(date: &str, statuses: &[TaskStatus]) -> DailyRecord {
    DailyRecord {
        date: date.into(),
        tasks: statuses
            .iter()
            .enumerate()
            .map(|(i, s)| task(&i.to_string(), *s))
            .collect(),
    }
}

#[test]
fn test_upsert_then_get_returns_the_record() {
    let data = AppData::default();
    let r = record("2024-02-10", &[TaskStatus::Pending, TaskStatus::Completed]);
    let data = upsert_record(&data, r.clone());
    assert_eq!(get_record(&data, "2024-02-10"), r);
}

#[test]
fn test_upsert_sequence_keeps_one_record_per_date() {
    let mut data = AppData::default();
    let dates = [
        "2024-02-10",
        "2024-02-11",
        "2024-02-10",
        "2024-02-12",
        "2024-02-11",
        "2024-02-10",
    ];
    for (i, date) in dates.iter().enumerate() {
        data = upsert_record(&data, record(date, &vec![TaskStatus::Pending; i + 1]));
    }
    let mut seen: Vec<&str> = data.daily_records.iter().map(|r| r.date.as_str()).collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), data.daily_records.len());
    // The last upsert for a date wins.
    assert_eq!(get_record(&data, "2024-02-10").tasks.len(), 6);
}

#[test]
fn test_score_stays_in_bounds() {
    assert_eq!(productivity_score(&record("2024-02-10", &[])), 0);
    assert_eq!(
        productivity_score(&record("2024-02-10", &[TaskStatus::Pending; 5])),
        0
    );
    assert_eq!(
        productivity_score(&record("2024-02-10", &[TaskStatus::Completed; 5])),
        100
    );
    // round(100 * 2 / 3) = 67
    let r = record(
        "2024-02-10",
        &[
            TaskStatus::Completed,
            TaskStatus::Completed,
            TaskStatus::Pending,
        ],
    );
    assert_eq!(productivity_score(&r), 67);
}

#[test]
fn test_in_progress_does_not_count_as_completed() {
    let r = record(
        "2024-02-10",
        &[TaskStatus::InProgress, TaskStatus::Completed],
    );
    assert_eq!(productivity_score(&r), 50);
}
