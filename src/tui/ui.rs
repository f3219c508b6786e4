use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Sparkline, Table},
    Frame,
};

use super::app::{App, InputMode, PendingInput, ViewMode};
use crate::dates::DAY_NAMES;
use crate::models::{Priority, TaskStatus};
use crate::score::productivity_score;
use crate::store;
use crate::streak::habit_streak;

pub fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Main view
            Constraint::Length(3), // Help
        ])
        .split(f.area());

    match app.view_mode {
        ViewMode::Today => draw_today(f, app, chunks[0]),
        ViewMode::Habits => draw_habits(f, app, chunks[0]),
        ViewMode::Stats => draw_stats(f, app, chunks[0]),
    }

    let help_text = match app.view_mode {
        ViewMode::Today => {
            "q quit | Tab view | j/k move | a add | Space status | e edit | t timer | J/K reorder | d delete"
        }
        ViewMode::Habits => {
            "q quit | Tab view | j/k move | a add daily | w add weekdays | Space toggle today | d delete"
        }
        ViewMode::Stats => "q quit | Tab view",
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);

    if app.input_mode == InputMode::Editing {
        draw_input(f, app);
    }
}

fn draw_today(f: &mut Frame, app: &mut App, area: Rect) {
    let record = app.record();
    let score = productivity_score(&record);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Dayflow - {}", app.today)),
        )
        .gauge_style(Style::default().fg(if score >= 70 {
            Color::Green
        } else if score >= 40 {
            Color::Yellow
        } else {
            Color::Red
        }))
        .percent(score as u16)
        .label(format!("{score}% done"));
    f.render_widget(gauge, chunks[0]);

    let rows: Vec<Row> = record
        .tasks
        .iter()
        .map(|t| {
            let style = match t.status {
                TaskStatus::Completed => Style::default().fg(Color::Green),
                TaskStatus::InProgress => Style::default().fg(Color::Cyan),
                TaskStatus::Pending => Style::default().fg(Color::Gray),
            };
            let timer = format!(
                "{:02}:{:02}:{:02}{}",
                t.timer_seconds / 3600,
                (t.timer_seconds % 3600) / 60,
                t.timer_seconds % 60,
                if t.timer_running { " *" } else { "" }
            );
            Row::new(vec![
                Cell::from(status_symbol(t.status)),
                Cell::from(t.title.clone()),
                Cell::from(t.category.clone()),
                Cell::from(priority_label(t.priority)),
                Cell::from(timer),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["", "Title", "Category", "Priority", "Timer"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title("Tasks"))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");
    f.render_stateful_widget(table, chunks[1], &mut app.task_state);
}

fn draw_habits(f: &mut Frame, app: &mut App, area: Rect) {
    let today = app.today.clone();
    let rows: Vec<Row> = app
        .data
        .routine_habits
        .iter()
        .map(|h| {
            let stats = habit_streak(h, &app.data.routine_completions);
            let done_today = store::is_completed(&app.data, &h.id, &today);
            let style = if done_today {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            Row::new(vec![
                Cell::from(if done_today { "✓" } else { " " }),
                Cell::from(h.title.clone()),
                Cell::from(frequency_label(h.frequency)),
                Cell::from(h.category.clone()),
                Cell::from(format!("{}", stats.current)),
                Cell::from(format!("{}", stats.longest)),
                Cell::from(format!("{}%", stats.consistency)),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(3),
        Constraint::Min(20),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(12),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["", "Habit", "Freq", "Category", "Current", "Longest", "Consistency"])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .bottom_margin(1),
        )
        .block(Block::default().borders(Borders::ALL).title("Habits"))
        .row_highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::DarkGray))
        .highlight_symbol(">> ");
    f.render_stateful_widget(table, area, &mut app.habit_state);
}

fn draw_stats(f: &mut Frame, app: &mut App, area: Rect) {
    let summary = app.summary().clone();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Sparkline
            Constraint::Length(4), // Insights
            Constraint::Min(0),    // Weekly averages
        ])
        .split(area);

    let scores: Vec<u64> = summary.scores.iter().map(|p| p.score as u64).collect();
    let sparkline = Sparkline::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Daily Score (Last 30 Days)"),
        )
        .data(&scores)
        .max(100)
        .style(Style::default().fg(Color::Cyan));
    f.render_widget(sparkline, chunks[0]);

    let insights = format!(
        "Monthly avg: {}%   Best day: {}   Weekly rate: {}%   Longest streak: {}",
        summary.monthly_average,
        DAY_NAMES[summary.best_day.day_of_week as usize],
        summary.weekly_completion_rate,
        summary.longest_streak,
    );
    let insights = Paragraph::new(insights)
        .block(Block::default().borders(Borders::ALL).title("Insights"));
    f.render_widget(insights, chunks[1]);

    let rows: Vec<Row> = summary
        .weekly_averages
        .iter()
        .map(|w| {
            let color = if w.average >= 70 {
                Color::Green
            } else if w.average >= 40 {
                Color::Yellow
            } else {
                Color::Red
            };
            Row::new(vec![
                Cell::from(w.week.clone()),
                Cell::from(format!("{}%", w.average)).style(Style::default().fg(color)),
                Cell::from("▇".repeat((w.average / 5) as usize)),
            ])
        })
        .collect();
    let widths = [
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Min(20),
    ];
    let table = Table::new(rows, widths)
        .header(
            Row::new(vec!["Week", "Avg", ""])
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        )
        .block(Block::default().borders(Borders::ALL).title("Weekly Averages"));
    f.render_widget(table, chunks[2]);
}

fn draw_input(f: &mut Frame, app: &App) {
    let title = match &app.pending {
        PendingInput::NewTask => "New task title",
        PendingInput::NewHabit(_) => "New habit title",
        PendingInput::EditTitle(_) => "Edit title",
        PendingInput::None => "",
    };
    let area = centered_rect(50, f.area());
    let input = Paragraph::new(app.input_buffer.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(Clear, area);
    f.render_widget(input, area);
}

fn centered_rect(percent_x: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(45),
            Constraint::Length(3),
            Constraint::Percentage(45),
        ])
        .split(r);
    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);
    horizontal[1]
}

fn status_symbol(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "[ ]",
        TaskStatus::InProgress => "[~]",
        TaskStatus::Completed => "[x]",
    }
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "High",
        Priority::Medium => "Medium",
        Priority::Low => "Low",
    }
}

fn frequency_label(frequency: crate::models::Frequency) -> &'static str {
    match frequency {
        crate::models::Frequency::Daily => "daily",
        crate::models::Frequency::Weekdays => "weekdays",
    }
}
