use dayflow::dates::parse_date;
use dayflow::models::{Frequency, RoutineCompletion, RoutineHabit};
use dayflow::streak::habit_streak_at;

fn habit(created: &str, frequency: Frequency) -> RoutineHabit {
    RoutineHabit {
        id: "h".into(),
        title: "Habit".into(),
        frequency,
        category: "Health".into(),
        created_at: created.into(),
    }
}

fn completions(dates: &[&str]) -> Vec<RoutineCompletion> {
    dates
        .iter()
        .map(|d| RoutineCompletion {
            habit_id: "h".into(),
            date: (*d).into(),
        })
        .collect()
}

#[test]
fn test_completing_today_extends_current_by_one() {
    // Continuous up to yesterday; completing today adds exactly 1.
    let h = habit("2024-01-01", Frequency::Daily);
    let today = parse_date("2024-01-04").unwrap();
    let done = completions(&["2024-01-01", "2024-01-02", "2024-01-03"]);

    let before = habit_streak_at(today, &h, &done);
    let mut done = done;
    done.push(RoutineCompletion {
        habit_id: "h".into(),
        date: "2024-01-04".into(),
    });
    let after = habit_streak_at(today, &h, &done);

    assert_eq!(before.current, 3);
    assert_eq!(after.current, before.current + 1);
}

#[test]
fn test_missed_day_breaks_current_but_longest_survives() {
    let h = habit("2024-01-01", Frequency::Daily);
    let today = parse_date("2024-01-07").unwrap();
    // Four-day run, a miss on the 5th, then two more days.
    let done = completions(&[
        "2024-01-01",
        "2024-01-02",
        "2024-01-03",
        "2024-01-04",
        "2024-01-06",
        "2024-01-07",
    ]);
    let stats = habit_streak_at(today, &h, &done);
    assert_eq!(stats.current, 2);
    assert_eq!(stats.longest, 4);
}

#[test]
fn test_weekend_absence_is_invisible_to_weekday_habits() {
    // Mon 2024-01-08 .. Fri 2024-01-12 completed, nothing on the weekend,
    // checked the following Monday after completing it.
    let h = habit("2024-01-08", Frequency::Weekdays);
    let today = parse_date("2024-01-15").unwrap();
    let done = completions(&[
        "2024-01-08",
        "2024-01-09",
        "2024-01-10",
        "2024-01-11",
        "2024-01-12",
        "2024-01-15",
    ]);
    let stats = habit_streak_at(today, &h, &done);
    assert_eq!(stats.current, 6);
    assert_eq!(stats.longest, 6);
    assert_eq!(stats.consistency, 100);
}

#[test]
fn test_consistency_counts_only_relevant_dates() {
    let h = habit("2024-01-01", Frequency::Daily);
    let today = parse_date("2024-01-10").unwrap();
    // 5 of 10 relevant days.
    let done = completions(&[
        "2024-01-01",
        "2024-01-03",
        "2024-01-05",
        "2024-01-07",
        "2024-01-09",
    ]);
    let stats = habit_streak_at(today, &h, &done);
    assert_eq!(stats.consistency, 50);
}
