//! Pure operations over the `AppData` snapshot.
//!
//! Nothing here mutates a snapshot in place: every write operation takes a
//! snapshot by reference and returns a new one. Callers are expected to
//! route all mutation through these functions, which is what keeps the
//! snapshot invariants (one record per date, one completion per habit/date
//! pair) holding by construction.

use crate::models::{
    AppData, CategoryTag, DailyRecord, RoutineCompletion, RoutineHabit, Task, Theme,
};

/// Returns the record for `date`, or a synthetic empty record if the
/// snapshot has none. Absence of a record is the same as an empty day.
pub fn get_record(data: &AppData, date: &str) -> DailyRecord {
    data.daily_records
        .iter()
        .find(|r| r.date == date)
        .cloned()
        .unwrap_or_else(|| DailyRecord::empty(date))
}

/// Replaces the record with the same date, or appends it. Afterwards the
/// snapshot still holds at most one record per date.
pub fn upsert_record(data: &AppData, record: DailyRecord) -> AppData {
    let mut next = data.clone();
    match next.daily_records.iter_mut().find(|r| r.date == record.date) {
        Some(existing) => *existing = record,
        None => next.daily_records.push(record),
    }
    next
}

/// Appends a task to the record for `date` (creating the record lazily).
pub fn add_task(data: &AppData, date: &str, task: Task) -> AppData {
    let mut record = get_record(data, date);
    record.tasks.push(task);
    upsert_record(data, record)
}

/// Applies `edit` to the task with the given id on `date`, if present.
pub fn update_task<F>(data: &AppData, date: &str, task_id: &str, edit: F) -> AppData
where
    F: FnOnce(&mut Task),
{
    let mut record = get_record(data, date);
    if let Some(task) = record.tasks.iter_mut().find(|t| t.id == task_id) {
        edit(task);
    }
    upsert_record(data, record)
}

/// Removes the task with the given id from the record for `date`.
pub fn delete_task(data: &AppData, date: &str, task_id: &str) -> AppData {
    let mut record = get_record(data, date);
    record.tasks.retain(|t| t.id != task_id);
    upsert_record(data, record)
}

/// Moves a task to `position` within its day, preserving the order of the
/// others. Positions past the end clamp to the end.
pub fn move_task(data: &AppData, date: &str, task_id: &str, position: usize) -> AppData {
    let mut record = get_record(data, date);
    if let Some(from) = record.tasks.iter().position(|t| t.id == task_id) {
        let task = record.tasks.remove(from);
        let to = position.min(record.tasks.len());
        record.tasks.insert(to, task);
    }
    upsert_record(data, record)
}

/// Flips the timer of one task on `date`.
pub fn toggle_timer(data: &AppData, date: &str, task_id: &str) -> AppData {
    update_task(data, date, task_id, |t| t.timer_running = !t.timer_running)
}

/// True if any task on `date` has a running timer.
pub fn has_running_timer(data: &AppData, date: &str) -> bool {
    data.daily_records
        .iter()
        .find(|r| r.date == date)
        .map(|r| r.tasks.iter().any(|t| t.timer_running))
        .unwrap_or(false)
}

/// Adds `seconds` to every running timer on `date`. Returns an unchanged
/// snapshot when nothing is running, so an idle tick is a no-op.
pub fn advance_timers(data: &AppData, date: &str, seconds: u64) -> AppData {
    if !has_running_timer(data, date) {
        return data.clone();
    }
    let mut record = get_record(data, date);
    for task in record.tasks.iter_mut().filter(|t| t.timer_running) {
        task.timer_seconds += seconds;
    }
    upsert_record(data, record)
}

/// Appends a new habit.
pub fn add_habit(data: &AppData, habit: RoutineHabit) -> AppData {
    let mut next = data.clone();
    next.routine_habits.push(habit);
    next
}

/// Removes a habit and every completion recorded for it.
pub fn remove_habit(data: &AppData, habit_id: &str) -> AppData {
    let mut next = data.clone();
    next.routine_habits.retain(|h| h.id != habit_id);
    next.routine_completions.retain(|c| c.habit_id != habit_id);
    next
}

/// True if the (habit, date) completion fact exists.
pub fn is_completed(data: &AppData, habit_id: &str, date: &str) -> bool {
    data.routine_completions
        .iter()
        .any(|c| c.habit_id == habit_id && c.date == date)
}

/// Inserts the (habit, date) completion fact, or removes it if already
/// present. Set semantics: at most one per pair either way.
pub fn toggle_completion(data: &AppData, habit_id: &str, date: &str) -> AppData {
    let mut next = data.clone();
    if is_completed(data, habit_id, date) {
        next.routine_completions
            .retain(|c| !(c.habit_id == habit_id && c.date == date));
    } else {
        next.routine_completions.push(RoutineCompletion {
            habit_id: habit_id.into(),
            date: date.into(),
        });
    }
    next
}

/// Adds a category unless a same-named one (case-insensitive) exists.
/// Returns `None` on a duplicate.
pub fn add_category(data: &AppData, category: CategoryTag) -> Option<AppData> {
    let duplicate = data
        .categories
        .iter()
        .any(|c| c.name.eq_ignore_ascii_case(&category.name));
    if duplicate {
        return None;
    }
    let mut next = data.clone();
    next.categories.push(category);
    Some(next)
}

/// Removes a category by name. Tasks and habits referencing it keep their
/// category string; there is no cascade.
pub fn remove_category(data: &AppData, name: &str) -> AppData {
    let mut next = data.clone();
    next.categories.retain(|c| c.name != name);
    next
}

/// Looks up a category's color by name.
pub fn category_color<'a>(data: &'a AppData, name: &str) -> Option<&'a str> {
    data.categories
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.color.as_str())
}

pub fn set_theme(data: &AppData, theme: Theme) -> AppData {
    let mut next = data.clone();
    next.theme = theme;
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Priority, TaskStatus};

    fn task(id: &str) -> Task {
        Task {
            id: id.into(),
            title: format!("Task {id}"),
            status: TaskStatus::Pending,
            category: "Work".into(),
            priority: Priority::Medium,
            created_at: "2024-01-01T09:00:00+00:00".into(),
            timer_seconds: 0,
            timer_running: false,
        }
    }

    #[test]
    fn get_record_synthesizes_empty_for_missing_date() {
        let data = AppData::default();
        let rec = get_record(&data, "2024-01-01");
        assert_eq!(rec.date, "2024-01-01");
        assert!(rec.tasks.is_empty());
        assert!(data.daily_records.is_empty());
    }

    #[test]
    fn upsert_keeps_one_record_per_date() {
        let data = AppData::default();
        let data = add_task(&data, "2024-01-01", task("a"));
        let data = add_task(&data, "2024-01-01", task("b"));
        let data = add_task(&data, "2024-01-02", task("c"));
        assert_eq!(data.daily_records.len(), 2);
        assert_eq!(get_record(&data, "2024-01-01").tasks.len(), 2);
    }

    #[test]
    fn move_task_reorders_within_day() {
        let data = AppData::default();
        let data = add_task(&data, "2024-01-01", task("a"));
        let data = add_task(&data, "2024-01-01", task("b"));
        let data = add_task(&data, "2024-01-01", task("c"));
        let data = move_task(&data, "2024-01-01", "c", 0);
        let ids: Vec<_> = get_record(&data, "2024-01-01")
            .tasks
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
        // Past-the-end positions clamp.
        let data = move_task(&data, "2024-01-01", "c", 99);
        let ids: Vec<_> = get_record(&data, "2024-01-01")
            .tasks
            .iter()
            .map(|t| t.id.clone())
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn toggle_completion_is_a_set_operation() {
        let data = AppData::default();
        let data = toggle_completion(&data, "h1", "2024-01-01");
        assert!(is_completed(&data, "h1", "2024-01-01"));
        assert_eq!(data.routine_completions.len(), 1);
        let data = toggle_completion(&data, "h1", "2024-01-01");
        assert!(!is_completed(&data, "h1", "2024-01-01"));
        assert!(data.routine_completions.is_empty());
    }

    #[test]
    fn remove_habit_drops_its_completions() {
        let data = AppData::default();
        let data = add_habit(
            &data,
            RoutineHabit {
                id: "h1".into(),
                title: "Run".into(),
                frequency: crate::models::Frequency::Daily,
                category: "Health".into(),
                created_at: "2024-01-01".into(),
            },
        );
        let data = toggle_completion(&data, "h1", "2024-01-01");
        let data = toggle_completion(&data, "h2", "2024-01-01");
        let data = remove_habit(&data, "h1");
        assert!(data.routine_habits.is_empty());
        assert_eq!(data.routine_completions.len(), 1);
        assert_eq!(data.routine_completions[0].habit_id, "h2");
    }

    #[test]
    fn duplicate_category_names_are_rejected_case_insensitively() {
        let data = AppData::default();
        let dup = CategoryTag {
            name: "work".into(),
            color: "#fff".into(),
        };
        assert!(add_category(&data, dup).is_none());
        let fresh = CategoryTag {
            name: "Reading".into(),
            color: "#fff".into(),
        };
        assert_eq!(add_category(&data, fresh).unwrap().categories.len(), 5);
    }

    #[test]
    fn remove_category_leaves_task_references_alone() {
        let data = AppData::default();
        let data = add_task(&data, "2024-01-01", task("a"));
        let data = remove_category(&data, "Work");
        assert_eq!(get_record(&data, "2024-01-01").tasks[0].category, "Work");
        assert!(category_color(&data, "Work").is_none());
    }

    #[test]
    fn advance_timers_only_touches_running_tasks() {
        let data = AppData::default();
        let data = add_task(&data, "2024-01-01", task("a"));
        let data = add_task(&data, "2024-01-01", task("b"));
        // Idle tick changes nothing.
        let ticked = advance_timers(&data, "2024-01-01", 1);
        assert_eq!(ticked, data);

        let data = toggle_timer(&data, "2024-01-01", "a");
        assert!(has_running_timer(&data, "2024-01-01"));
        let data = advance_timers(&data, "2024-01-01", 3);
        let rec = get_record(&data, "2024-01-01");
        assert_eq!(rec.tasks[0].timer_seconds, 3);
        assert_eq!(rec.tasks[1].timer_seconds, 0);
    }
}
