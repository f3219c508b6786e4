use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color, ContentArrangement, Table};

use crate::analytics;
use crate::dates::{self, DAY_NAMES};
use crate::models::{
    generate_id, CategoryTag, Frequency, Priority, RoutineHabit, Task, TaskStatus, Theme,
};
use crate::score::productivity_score;
use crate::storage::{delete_database, export_json, import_json, load_data, save_data};
use crate::store;
use crate::streak::habit_streak;

fn parse_priority(s: &str) -> Option<Priority> {
    match s.to_lowercase().as_str() {
        "high" => Some(Priority::High),
        "medium" => Some(Priority::Medium),
        "low" => Some(Priority::Low),
        _ => None,
    }
}

fn parse_status(s: &str) -> Option<TaskStatus> {
    match s.to_lowercase().as_str() {
        "pending" => Some(TaskStatus::Pending),
        "in-progress" => Some(TaskStatus::InProgress),
        "completed" | "done" => Some(TaskStatus::Completed),
        _ => None,
    }
}

fn parse_frequency(s: &str) -> Option<Frequency> {
    match s.to_lowercase().as_str() {
        "daily" => Some(Frequency::Daily),
        "weekdays" => Some(Frequency::Weekdays),
        _ => None,
    }
}

fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "Pending",
        TaskStatus::InProgress => "In Progress",
        TaskStatus::Completed => "Done",
    }
}

/// Resolves an optional `--date` argument, defaulting to today. Rejects
/// strings that are not canonical `YYYY-MM-DD` dates.
fn resolve_date(date: Option<String>, silent: bool) -> Option<String> {
    match date {
        None => Some(dates::today_string()),
        Some(d) => {
            if dates::parse_date(&d).is_some() {
                Some(d)
            } else {
                if !silent {
                    eprintln!("Invalid date '{}'. Use YYYY-MM-DD.", d);
                }
                None
            }
        }
    }
}

fn format_timer(seconds: u64) -> String {
    format!("{:02}:{:02}:{:02}", seconds / 3600, (seconds % 3600) / 60, seconds % 60)
}

/// Adds a new task to the record for the given date (today by default).
///
/// The category defaults to the first configured category; the priority
/// defaults to medium.
pub fn cmd_add(
    title: String,
    category: Option<String>,
    priority: Option<String>,
    date: Option<String>,
    silent: bool,
) {
    let Some(date) = resolve_date(date, silent) else { return };
    let priority = match priority {
        Some(p) => match parse_priority(&p) {
            Some(p) => p,
            None => {
                if !silent {
                    eprintln!("Invalid priority '{}'. Use high, medium or low.", p);
                }
                return;
            }
        },
        None => Priority::Medium,
    };

    let data = load_data();
    let category = category
        .or_else(|| data.categories.first().map(|c| c.name.clone()))
        .unwrap_or_default();

    let task = Task {
        id: generate_id(),
        title: title.trim().to_string(),
        status: TaskStatus::Pending,
        category,
        priority,
        created_at: chrono::Local::now().to_rfc3339(),
        timer_seconds: 0,
        timer_running: false,
    };
    let id = task.id.clone();
    let next = store::add_task(&data, &date, task);
    if let Err(e) = save_data(&next) {
        if !silent { eprintln!("Failed to save data: {}", e); }
    } else if !silent {
        println!("Task added to {} (id = {})", date, id);
    }
}

/// Lists the tasks of one day in a formatted table, with the day's
/// productivity score underneath.
pub fn cmd_list(date: Option<String>) {
    let Some(date) = resolve_date(date, false) else { return };
    let data = load_data();
    let record = store::get_record(&data, &date);
    if record.tasks.is_empty() {
        println!("No tasks for {}.", date);
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("#").add_attribute(Attribute::Bold),
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Priority").add_attribute(Attribute::Bold),
            Cell::new("Timer").add_attribute(Attribute::Bold),
            Cell::new("Status").add_attribute(Attribute::Bold),
        ]);

    for (idx, t) in record.tasks.iter().enumerate() {
        let priority_color = match t.priority {
            Priority::High => Color::Red,
            Priority::Medium => Color::Yellow,
            Priority::Low => Color::Green,
        };
        let status_color = match t.status {
            TaskStatus::Completed => Color::Green,
            TaskStatus::InProgress => Color::Cyan,
            TaskStatus::Pending => Color::Yellow,
        };
        let timer = if t.timer_running {
            format!("{} *", format_timer(t.timer_seconds))
        } else {
            format_timer(t.timer_seconds)
        };
        table.add_row(vec![
            Cell::new(idx),
            Cell::new(&t.id),
            Cell::new(&t.title),
            Cell::new(&t.category),
            Cell::new(format!("{:?}", t.priority)).fg(priority_color),
            Cell::new(timer),
            Cell::new(status_label(t.status)).fg(status_color),
        ]);
    }

    println!("{table}");
    println!("Score for {}: {}%", date, productivity_score(&record));
}

/// Sets the status of a task on the given date.
pub fn cmd_status(id: String, status: String, date: Option<String>, silent: bool) {
    let Some(date) = resolve_date(date, silent) else { return };
    let Some(status) = parse_status(&status) else {
        if !silent {
            eprintln!("Invalid status '{}'. Use pending, in-progress or completed.", status);
        }
        return;
    };
    let data = load_data();
    if !store::get_record(&data, &date).tasks.iter().any(|t| t.id == id) {
        if !silent { eprintln!("Task '{}' not found on {}.", id, date); }
        return;
    }
    let next = store::update_task(&data, &date, &id, |t| t.status = status);
    if let Err(e) = save_data(&next) {
        if !silent { eprintln!("Failed to save data: {}", e); }
    } else if !silent {
        println!("Task '{}' is now {}.", id, status_label(status).to_lowercase());
    }
}

/// Edits an existing task's title, category or priority.
pub fn cmd_edit(
    id: String,
    title: Option<String>,
    category: Option<String>,
    priority: Option<String>,
    date: Option<String>,
    silent: bool,
) {
    let Some(date) = resolve_date(date, silent) else { return };
    let priority = match priority {
        Some(p) => match parse_priority(&p) {
            Some(p) => Some(p),
            None => {
                if !silent {
                    eprintln!("Invalid priority '{}'. Use high, medium or low.", p);
                }
                return;
            }
        },
        None => None,
    };
    let data = load_data();
    if !store::get_record(&data, &date).tasks.iter().any(|t| t.id == id) {
        if !silent { eprintln!("Task '{}' not found on {}.", id, date); }
        return;
    }
    let next = store::update_task(&data, &date, &id, |t| {
        if let Some(title) = title { t.title = title; }
        if let Some(category) = category { t.category = category; }
        if let Some(priority) = priority { t.priority = priority; }
    });
    if let Err(e) = save_data(&next) {
        if !silent { eprintln!("Failed to save data: {}", e); }
    } else if !silent {
        println!("Task '{}' updated.", id);
    }
}

/// Removes a task from the given date's record.
pub fn cmd_remove(id: String, date: Option<String>, silent: bool) {
    let Some(date) = resolve_date(date, silent) else { return };
    let data = load_data();
    if !store::get_record(&data, &date).tasks.iter().any(|t| t.id == id) {
        if !silent { eprintln!("Task '{}' not found on {}.", id, date); }
        return;
    }
    let next = store::delete_task(&data, &date, &id);
    if let Err(e) = save_data(&next) {
        if !silent { eprintln!("Failed to save data: {}", e); }
    } else if !silent {
        println!("Task '{}' removed.", id);
    }
}

/// Moves a task to a new position within its day.
pub fn cmd_move(id: String, position: usize, date: Option<String>, silent: bool) {
    let Some(date) = resolve_date(date, silent) else { return };
    let data = load_data();
    if !store::get_record(&data, &date).tasks.iter().any(|t| t.id == id) {
        if !silent { eprintln!("Task '{}' not found on {}.", id, date); }
        return;
    }
    let next = store::move_task(&data, &date, &id, position);
    if let Err(e) = save_data(&next) {
        if !silent { eprintln!("Failed to save data: {}", e); }
    } else if !silent {
        println!("Task '{}' moved to position {}.", id, position);
    }
}

/// Starts or stops a task's timer.
pub fn cmd_timer(id: String, date: Option<String>, silent: bool) {
    let Some(date) = resolve_date(date, silent) else { return };
    let data = load_data();
    let running = match store::get_record(&data, &date).tasks.iter().find(|t| t.id == id) {
        Some(t) => t.timer_running,
        None => {
            if !silent { eprintln!("Task '{}' not found on {}.", id, date); }
            return;
        }
    };
    let next = store::toggle_timer(&data, &date, &id);
    if let Err(e) = save_data(&next) {
        if !silent { eprintln!("Failed to save data: {}", e); }
    } else if !silent {
        println!("Timer {} for task '{}'.", if running { "stopped" } else { "started" }, id);
    }
}

/// Adds a new habit.
pub fn cmd_habit_add(title: String, frequency: String, category: Option<String>, silent: bool) {
    let Some(frequency) = parse_frequency(&frequency) else {
        if !silent {
            eprintln!("Invalid frequency '{}'. Use daily or weekdays.", frequency);
        }
        return;
    };
    let data = load_data();
    let category = category
        .or_else(|| data.categories.first().map(|c| c.name.clone()))
        .unwrap_or_default();
    let habit = RoutineHabit {
        id: generate_id(),
        title: title.trim().to_string(),
        frequency,
        category,
        created_at: dates::today_string(),
    };
    let id = habit.id.clone();
    let next = store::add_habit(&data, habit);
    if let Err(e) = save_data(&next) {
        if !silent { eprintln!("Failed to save data: {}", e); }
    } else if !silent {
        println!("Habit added (id = {})", id);
    }
}

/// Lists habits with their streak statistics.
pub fn cmd_habit_list() {
    let data = load_data();
    if data.routine_habits.is_empty() {
        println!("No habits found.");
        return;
    }
    let today = dates::today_string();

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("ID").add_attribute(Attribute::Bold),
            Cell::new("Title").add_attribute(Attribute::Bold),
            Cell::new("Frequency").add_attribute(Attribute::Bold),
            Cell::new("Category").add_attribute(Attribute::Bold),
            Cell::new("Today").add_attribute(Attribute::Bold),
            Cell::new("Current").add_attribute(Attribute::Bold),
            Cell::new("Longest").add_attribute(Attribute::Bold),
            Cell::new("Consistency").add_attribute(Attribute::Bold),
        ]);

    for h in &data.routine_habits {
        let stats = habit_streak(h, &data.routine_completions);
        let done_today = store::is_completed(&data, &h.id, &today);
        let streak_color = if stats.current > 0 { Color::Green } else { Color::Grey };
        table.add_row(vec![
            Cell::new(&h.id),
            Cell::new(&h.title),
            Cell::new(format!("{:?}", h.frequency).to_lowercase()),
            Cell::new(&h.category),
            Cell::new(if done_today { "✓" } else { "" }).fg(Color::Green),
            Cell::new(stats.current).fg(streak_color),
            Cell::new(stats.longest),
            Cell::new(format!("{}%", stats.consistency)),
        ]);
    }
    println!("{table}");
}

/// Toggles a habit completion for the given date (today by default).
pub fn cmd_habit_done(id: String, date: Option<String>, silent: bool) {
    let Some(date) = resolve_date(date, silent) else { return };
    let data = load_data();
    if !data.routine_habits.iter().any(|h| h.id == id) {
        if !silent { eprintln!("Habit '{}' not found.", id); }
        return;
    }
    let was_done = store::is_completed(&data, &id, &date);
    let next = store::toggle_completion(&data, &id, &date);
    if let Err(e) = save_data(&next) {
        if !silent { eprintln!("Failed to save data: {}", e); }
    } else if !silent {
        if was_done {
            println!("Completion removed for {} on {}.", id, date);
        } else {
            println!("Habit '{}' completed on {}.", id, date);
        }
    }
}

/// Removes a habit and all of its completions.
pub fn cmd_habit_remove(id: String, silent: bool) {
    let data = load_data();
    if !data.routine_habits.iter().any(|h| h.id == id) {
        if !silent { eprintln!("Habit '{}' not found.", id); }
        return;
    }
    let next = store::remove_habit(&data, &id);
    if let Err(e) = save_data(&next) {
        if !silent { eprintln!("Failed to save data: {}", e); }
    } else if !silent {
        println!("Habit '{}' removed.", id);
    }
}

/// Adds a category tag.
pub fn cmd_category_add(name: String, color: String, silent: bool) {
    let data = load_data();
    let tag = CategoryTag { name: name.clone(), color };
    match store::add_category(&data, tag) {
        Some(next) => {
            if let Err(e) = save_data(&next) {
                if !silent { eprintln!("Failed to save data: {}", e); }
            } else if !silent {
                println!("Category '{}' added.", name);
            }
        }
        None => {
            if !silent { eprintln!("Category '{}' already exists.", name); }
        }
    }
}

/// Lists category tags.
pub fn cmd_category_list() {
    let data = load_data();
    if data.categories.is_empty() {
        println!("No categories found.");
        return;
    }
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Name", "Color"]);
    for c in &data.categories {
        table.add_row(vec![c.name.clone(), c.color.clone()]);
    }
    println!("{table}");
}

/// Removes a category tag. Tasks and habits keep their reference.
pub fn cmd_category_remove(name: String, silent: bool) {
    let data = load_data();
    if !data.categories.iter().any(|c| c.name == name) {
        if !silent { eprintln!("Category '{}' not found.", name); }
        return;
    }
    let next = store::remove_category(&data, &name);
    if let Err(e) = save_data(&next) {
        if !silent { eprintln!("Failed to save data: {}", e); }
    } else if !silent {
        println!("Category '{}' removed.", name);
    }
}

/// Prints the analytics summary: insight values and the weekly averages.
/// With `json`, emits the whole summary as JSON instead (including the
/// score series and heatmap cells).
pub fn cmd_stats(json: bool) {
    let data = load_data();
    let summary = analytics::summary(&data);

    if json {
        match serde_json::to_string_pretty(&summary) {
            Ok(s) => println!("{s}"),
            Err(e) => eprintln!("Failed to serialize summary: {}", e),
        }
        return;
    }

    let mut insights = Table::new();
    insights
        .load_preset(UTF8_FULL)
        .set_header(vec![
            Cell::new("Monthly Avg").add_attribute(Attribute::Bold),
            Cell::new("Best Day").add_attribute(Attribute::Bold),
            Cell::new("Weekly Rate").add_attribute(Attribute::Bold),
            Cell::new("Longest Streak").add_attribute(Attribute::Bold),
        ]);
    insights.add_row(vec![
        Cell::new(format!("{}%", summary.monthly_average)),
        Cell::new(DAY_NAMES[summary.best_day.day_of_week as usize]),
        Cell::new(format!("{}%", summary.weekly_completion_rate)),
        Cell::new(summary.longest_streak).fg(Color::Yellow),
    ]);
    println!("{insights}");

    let mut weeks = Table::new();
    weeks
        .load_preset(UTF8_FULL)
        .set_header(vec![
            Cell::new("Week").add_attribute(Attribute::Bold),
            Cell::new("Average").add_attribute(Attribute::Bold),
        ]);
    for w in &summary.weekly_averages {
        let color = if w.average >= 70 {
            Color::Green
        } else if w.average >= 40 {
            Color::Yellow
        } else {
            Color::Red
        };
        weeks.add_row(vec![
            Cell::new(&w.week),
            Cell::new(format!("{}%", w.average)).fg(color),
        ]);
    }
    println!("{weeks}");
}

/// Prints the 90-day activity heatmap as a 7-row grid (one row per day of
/// week, Sunday first, oldest column on the left).
pub fn cmd_heatmap() {
    let data = load_data();
    let cells = analytics::heatmap_at(dates::today(), &data);

    // Column = calendar week; align the first column on its day of week.
    let lead = cells.first().map(|c| c.day_of_week as usize).unwrap_or(0);
    let columns = (lead + cells.len()).div_ceil(7);
    let mut grid = vec![vec![' '; columns]; 7];
    for (i, cell) in cells.iter().enumerate() {
        let slot = lead + i;
        let shade = match cell.score {
            0 => '·',
            1..=29 => '░',
            30..=59 => '▒',
            60..=79 => '▓',
            _ => '█',
        };
        grid[cell.day_of_week as usize][slot / 7] = shade;
    }
    for (dow, row) in grid.iter().enumerate() {
        let line: String = row.iter().collect();
        println!("{} {}", DAY_NAMES[dow], line);
    }
    println!("    · none  ░ <30%  ▒ <60%  ▓ <80%  █ ≥80%");
}

/// Switches the color theme (dark or light).
pub fn cmd_theme(theme: String, silent: bool) {
    let theme = match theme.to_lowercase().as_str() {
        "dark" => Theme::Dark,
        "light" => Theme::Light,
        other => {
            if !silent { eprintln!("Invalid theme '{}'. Use dark or light.", other); }
            return;
        }
    };
    let data = load_data();
    let next = store::set_theme(&data, theme);
    if let Err(e) = save_data(&next) {
        if !silent { eprintln!("Failed to save data: {}", e); }
    } else if !silent {
        println!("Theme set to {:?}.", theme);
    }
}

/// Exports the full snapshot as pretty-printed JSON, to stdout or a file.
pub fn cmd_export(output: Option<PathBuf>, silent: bool) {
    let data = load_data();
    let json = export_json(&data);
    match output {
        Some(path) => {
            if let Err(e) = fs::write(&path, &json) {
                if !silent { eprintln!("Failed to write {}: {}", path.display(), e); }
            } else if !silent {
                println!("Exported to {}.", path.display());
            }
        }
        None => println!("{json}"),
    }
}

/// Imports a snapshot from a JSON file, replacing the stored one.
///
/// A file that fails to parse is rejected and the existing snapshot stays
/// untouched.
pub fn cmd_import(file: PathBuf, silent: bool) {
    let json = match fs::read_to_string(&file) {
        Ok(s) => s,
        Err(e) => {
            if !silent { eprintln!("Failed to read {}: {}", file.display(), e); }
            return;
        }
    };
    let data = match import_json(&json) {
        Ok(d) => d,
        Err(e) => {
            if !silent { eprintln!("Invalid file: {}", e); }
            return;
        }
    };
    if let Err(e) = save_data(&data) {
        if !silent { eprintln!("Failed to save data: {}", e); }
    } else if !silent {
        println!("Data imported successfully.");
    }
}

/// Resets the database by deleting the snapshot file.
pub fn cmd_reset(force: bool) {
    if !force {
        print!("Are you sure you want to delete all data? This cannot be undone. [y/N] ");
        let _ = io::stdout().flush();
        let mut input = String::new();
        if io::stdin().read_line(&mut input).is_err() {
            return;
        }
        if input.trim().to_lowercase() != "y" {
            println!("Aborted.");
            return;
        }
    }
    if let Err(e) = delete_database() {
        eprintln!("Failed to reset database: {}", e);
    } else {
        println!("Database reset successfully.");
    }
}
