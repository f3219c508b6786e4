use crate::models::{DailyRecord, TaskStatus};

/// Productivity score for one day: the percentage of the record's tasks
/// that are completed, rounded to the nearest integer.
///
/// # Returns
/// - `0` for a record with no tasks (no division by zero).
/// - Otherwise `round(100 * completed / total)`, always in `0..=100`.
pub fn productivity_score(record: &DailyRecord) -> u8 {
    if record.tasks.is_empty() {
        return 0;
    }
    let completed = record
        .tasks
        .iter()
        .filter(|t| t.status == TaskStatus::Completed)
        .count();
    ((completed as f64 / record.tasks.len() as f64) * 100.0).round() as u8
}
