use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// Completion state of a task within a daily record.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

/// Task priority, a display hint only; it does not affect scoring.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A single task belonging to one daily record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task.
    pub id: String,
    /// The name or description of the task.
    pub title: String,
    /// Current completion state.
    pub status: TaskStatus,
    /// Name of the category tag this task belongs to. A string reference,
    /// kept even if the category is later deleted.
    pub category: String,
    /// Task priority.
    pub priority: Priority,
    /// Timestamp when the task was created (RFC 3339).
    pub created_at: String,
    /// Seconds accumulated by the task timer.
    #[serde(default)]
    pub timer_seconds: u64,
    /// Whether the task timer is currently running.
    #[serde(default)]
    pub timer_running: bool,
}

/// All tasks logged for one calendar day. Task order is user-chosen and
/// preserved.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DailyRecord {
    /// Canonical date string, `YYYY-MM-DD`. Unique within a snapshot.
    pub date: String,
    pub tasks: Vec<Task>,
}

impl DailyRecord {
    /// An empty record for a date that has no stored entry yet.
    pub fn empty(date: impl Into<String>) -> Self {
        DailyRecord {
            date: date.into(),
            tasks: Vec::new(),
        }
    }
}

/// Which calendar dates a habit expects an action on.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every calendar day.
    Daily,
    /// Monday through Friday only.
    Weekdays,
}

/// A recurring habit tracked on the routine screen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoutineHabit {
    /// Unique identifier for the habit.
    pub id: String,
    pub title: String,
    pub frequency: Frequency,
    /// Category tag name (string reference, no ownership link).
    pub category: String,
    /// Date the habit was created, `YYYY-MM-DD`. Streaks start here.
    pub created_at: String,
}

/// The fact "habit `habit_id` was completed on `date`". At most one exists
/// per (habit, date) pair.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoutineCompletion {
    pub habit_id: String,
    pub date: String,
}

/// A named color tag that tasks and habits reference by name.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CategoryTag {
    /// Unique name (case-insensitive for duplicate checks).
    pub name: String,
    /// Hex color, e.g. `#6366f1`.
    pub color: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

/// The whole application snapshot. This is the single persisted aggregate;
/// every mutation goes through `store` and produces a new snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    #[serde(default)]
    pub daily_records: Vec<DailyRecord>,
    #[serde(default)]
    pub routine_habits: Vec<RoutineHabit>,
    #[serde(default)]
    pub routine_completions: Vec<RoutineCompletion>,
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryTag>,
    #[serde(default)]
    pub theme: Theme,
}

impl Default for AppData {
    fn default() -> Self {
        AppData {
            daily_records: Vec::new(),
            routine_habits: Vec::new(),
            routine_completions: Vec::new(),
            categories: default_categories(),
            theme: Theme::Dark,
        }
    }
}

/// The category set a fresh snapshot starts with.
pub fn default_categories() -> Vec<CategoryTag> {
    vec![
        CategoryTag { name: "Work".into(), color: "#6366f1".into() },
        CategoryTag { name: "Health".into(), color: "#22c55e".into() },
        CategoryTag { name: "Learning".into(), color: "#eab308".into() },
        CategoryTag { name: "Personal".into(), color: "#3b82f6".into() },
    ]
}

static ID_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Generates a unique string id for new tasks and habits: millisecond
/// timestamp in base 36 plus a process-local counter suffix.
pub fn generate_id() -> String {
    let millis = chrono::Local::now().timestamp_millis().max(0) as u64;
    let n = ID_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", to_base36(millis), to_base36(n))
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".into();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8(out).unwrap()
}
