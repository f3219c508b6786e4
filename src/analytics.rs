//! Derived read-only views over a snapshot.
//!
//! Every function here is pure and anchored at an explicit `today` in its
//! `*_at` form; the plain form uses the local calendar date. Callers that
//! render repeatedly should cache the [`Summary`] and recompute it only
//! when the snapshot changes.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::dates::{day_of_week, format_date, today};
use crate::models::{AppData, TaskStatus};
use crate::score::productivity_score;
use crate::store::get_record;
use crate::streak::habit_streak_at;

/// One point in the daily score series.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScorePoint {
    pub date: String,
    pub score: u8,
}

/// Average completion over one trailing 7-day window.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WeeklyAverage {
    pub week: String,
    pub average: u8,
}

/// One cell of the 90-day activity heatmap.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct HeatmapCell {
    pub date: String,
    pub score: u8,
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u8,
}

/// The day of week with the highest average score.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct BestDay {
    /// 0 = Sunday .. 6 = Saturday.
    pub day_of_week: u8,
    pub average: u8,
}

/// Everything the stats views need, computed in one pass.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Summary {
    pub scores: Vec<ScorePoint>,
    pub weekly_averages: Vec<WeeklyAverage>,
    pub monthly_average: u8,
    pub heatmap: Vec<HeatmapCell>,
    pub best_day: BestDay,
    pub weekly_completion_rate: u8,
    /// Longest streak across all habits.
    pub longest_streak: u32,
}

/// Scores for the 30 most recent dates, oldest first. Dates without a
/// record score 0.
pub fn last_30_days_scores(data: &AppData) -> Vec<ScorePoint> {
    last_30_days_scores_at(today(), data)
}

pub fn last_30_days_scores_at(today: NaiveDate, data: &AppData) -> Vec<ScorePoint> {
    let mut scores = Vec::with_capacity(30);
    for offset in (0..30).rev() {
        let date = format_date(today - Duration::days(offset));
        let score = productivity_score(&get_record(data, &date));
        scores.push(ScorePoint { date, score });
    }
    scores
}

/// Average score of the 4 trailing 7-day windows, oldest window first.
/// Only days with at least one task enter an average; a window with no
/// task-bearing days averages to 0.
pub fn weekly_averages_at(today: NaiveDate, data: &AppData) -> Vec<WeeklyAverage> {
    let mut averages = Vec::with_capacity(4);
    for window in (0..4).rev() {
        let mut total = 0u32;
        let mut count = 0u32;
        for day in 0..7 {
            let date = format_date(today - Duration::days(window * 7 + day));
            let record = get_record(data, &date);
            if !record.tasks.is_empty() {
                total += productivity_score(&record) as u32;
                count += 1;
            }
        }
        let average = if count > 0 {
            (total as f64 / count as f64).round() as u8
        } else {
            0
        };
        averages.push(WeeklyAverage {
            week: format!("Week {}", 4 - window),
            average,
        });
    }
    averages
}

/// Mean score of the task-bearing days in the last 30. A day with tasks
/// and a genuine 0% completion counts; a day with no tasks does not.
pub fn monthly_average_at(today: NaiveDate, data: &AppData) -> u8 {
    let mut total = 0u32;
    let mut count = 0u32;
    for offset in 0..30 {
        let date = format_date(today - Duration::days(offset));
        let record = get_record(data, &date);
        if !record.tasks.is_empty() {
            total += productivity_score(&record) as u32;
            count += 1;
        }
    }
    if count > 0 {
        (total as f64 / count as f64).round() as u8
    } else {
        0
    }
}

/// Score and day-of-week for each of the 90 most recent dates, oldest
/// first. Zero-task days are included at score 0.
pub fn heatmap_at(today: NaiveDate, data: &AppData) -> Vec<HeatmapCell> {
    let mut cells = Vec::with_capacity(90);
    for offset in (0..90).rev() {
        let date = today - Duration::days(offset);
        let key = format_date(date);
        let score = productivity_score(&get_record(data, &key));
        cells.push(HeatmapCell {
            date: key,
            score,
            day_of_week: day_of_week(date),
        });
    }
    cells
}

/// Partitions the last 30 days by day-of-week, averages the task-bearing
/// days of each partition, and returns the highest. Comparison is strict,
/// so an exact tie goes to the lowest day index.
pub fn best_day_of_week_at(today: NaiveDate, data: &AppData) -> BestDay {
    let mut totals = [0u32; 7];
    let mut counts = [0u32; 7];
    for offset in 0..30 {
        let date = today - Duration::days(offset);
        let record = get_record(data, &format_date(date));
        if !record.tasks.is_empty() {
            let dow = day_of_week(date) as usize;
            totals[dow] += productivity_score(&record) as u32;
            counts[dow] += 1;
        }
    }
    let mut best = BestDay {
        day_of_week: 0,
        average: 0,
    };
    let mut best_average = 0.0f64;
    for dow in 0..7 {
        if counts[dow] == 0 {
            continue;
        }
        let average = totals[dow] as f64 / counts[dow] as f64;
        if average > best_average {
            best_average = average;
            best = BestDay {
                day_of_week: dow as u8,
                average: average.round() as u8,
            };
        }
    }
    best
}

/// Completed tasks over total tasks across the trailing 7 days (today
/// inclusive), pooled rather than averaged per day. 0 when the window
/// holds no tasks.
pub fn weekly_completion_rate_at(today: NaiveDate, data: &AppData) -> u8 {
    let mut completed = 0usize;
    let mut total = 0usize;
    for offset in 0..7 {
        let date = format_date(today - Duration::days(offset));
        let record = get_record(data, &date);
        total += record.tasks.len();
        completed += record
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count();
    }
    if total > 0 {
        ((completed as f64 / total as f64) * 100.0).round() as u8
    } else {
        0
    }
}

/// Builds the full stats summary against today's date.
pub fn summary(data: &AppData) -> Summary {
    summary_at(today(), data)
}

pub fn summary_at(today: NaiveDate, data: &AppData) -> Summary {
    let longest_streak = data
        .routine_habits
        .iter()
        .map(|h| habit_streak_at(today, h, &data.routine_completions).longest)
        .max()
        .unwrap_or(0);

    Summary {
        scores: last_30_days_scores_at(today, data),
        weekly_averages: weekly_averages_at(today, data),
        monthly_average: monthly_average_at(today, data),
        heatmap: heatmap_at(today, data),
        best_day: best_day_of_week_at(today, data),
        weekly_completion_rate: weekly_completion_rate_at(today, data),
        longest_streak,
    }
}
