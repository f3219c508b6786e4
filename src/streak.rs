use chrono::NaiveDate;
use std::collections::HashSet;

use crate::dates::{day_of_week, parse_date, today};
use crate::models::{Frequency, RoutineCompletion, RoutineHabit};

/// Derived streak statistics for one habit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StreakStats {
    /// Consecutive relevant dates completed, counting back from the most
    /// recent relevant date. A today that is still pending is skipped, not
    /// counted as a break.
    pub current: u32,
    /// Longest run of consecutive completed relevant dates ever.
    pub longest: u32,
    /// Percentage of relevant past dates that were completed, 0..=100.
    pub consistency: u8,
}

/// Computes streak statistics for `habit` against today's date.
pub fn habit_streak(habit: &RoutineHabit, completions: &[RoutineCompletion]) -> StreakStats {
    habit_streak_at(today(), habit, completions)
}

/// Computes streak statistics anchored at an explicit `today`.
///
/// Only *relevant* dates are considered: every date from the habit's
/// creation date through `today` that its frequency schedule covers. For a
/// `weekdays` habit a weekend neither breaks nor extends a streak, and
/// weekend completions never count toward consistency.
pub fn habit_streak_at(
    today: NaiveDate,
    habit: &RoutineHabit,
    completions: &[RoutineCompletion],
) -> StreakStats {
    let hits: HashSet<NaiveDate> = completions
        .iter()
        .filter(|c| c.habit_id == habit.id)
        .filter_map(|c| parse_date(&c.date))
        .collect();

    if hits.is_empty() {
        return StreakStats::default();
    }

    let relevant = relevant_dates(habit, today);

    let mut longest = 0u32;
    let mut run = 0u32;
    for date in &relevant {
        if hits.contains(date) {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }

    // A today that has not been completed yet does not break the streak;
    // it just does not count. Any earlier absent relevant date does break.
    let mut current = 0u32;
    let mut remaining = relevant.iter().rev().peekable();
    if let Some(&&last) = remaining.peek() {
        if last == today && !hits.contains(&last) {
            remaining.next();
        }
    }
    for date in remaining {
        if hits.contains(date) {
            current += 1;
        } else {
            break;
        }
    }

    let completed = relevant.iter().filter(|d| hits.contains(d)).count();
    let consistency = if relevant.is_empty() {
        0
    } else {
        let pct = ((completed as f64 / relevant.len() as f64) * 100.0).round() as u32;
        pct.min(100) as u8
    };

    StreakStats {
        current,
        longest,
        consistency,
    }
}

/// Every date from the habit's creation through `today` (inclusive) that
/// the habit's frequency schedule applies to, in chronological order.
fn relevant_dates(habit: &RoutineHabit, today: NaiveDate) -> Vec<NaiveDate> {
    let Some(start) = parse_date(&habit.created_at) else {
        return Vec::new();
    };
    let mut dates = Vec::new();
    let mut date = start;
    while date <= today {
        let applies = match habit.frequency {
            Frequency::Daily => true,
            Frequency::Weekdays => (1..=5).contains(&day_of_week(date)),
        };
        if applies {
            dates.push(date);
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    dates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;

    fn habit(id: &str, created: &str, frequency: Frequency) -> RoutineHabit {
        RoutineHabit {
            id: id.into(),
            title: "Habit".into(),
            frequency,
            category: "Health".into(),
            created_at: created.into(),
        }
    }

    fn done(id: &str, dates: &[&str]) -> Vec<RoutineCompletion> {
        dates
            .iter()
            .map(|d| RoutineCompletion {
                habit_id: id.into(),
                date: (*d).into(),
            })
            .collect()
    }

    fn at(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn no_completions_short_circuits_to_zero() {
        let h = habit("a", "2024-01-01", Frequency::Daily);
        let stats = habit_streak_at(at("2024-01-10"), &h, &[]);
        assert_eq!(stats, StreakStats::default());
    }

    #[test]
    fn missed_day_resets_current_but_not_longest() {
        // Created Monday 2024-01-01, done 01..03, missed 04, done 05.
        let h = habit("a", "2024-01-01", Frequency::Daily);
        let c = done("a", &["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-05"]);
        let stats = habit_streak_at(at("2024-01-05"), &h, &c);
        assert_eq!(stats.current, 1);
        assert_eq!(stats.longest, 3);
        // 4 of 5 relevant days completed.
        assert_eq!(stats.consistency, 80);
    }

    #[test]
    fn weekend_gap_does_not_break_weekday_streak() {
        // 2024-01-05 is a Friday, 2024-01-08 a Monday.
        let h = habit("a", "2024-01-04", Frequency::Weekdays);
        let c = done("a", &["2024-01-04", "2024-01-05", "2024-01-08"]);
        let stats = habit_streak_at(at("2024-01-08"), &h, &c);
        assert_eq!(stats.current, 3);
        assert_eq!(stats.longest, 3);
        assert_eq!(stats.consistency, 100);
    }

    #[test]
    fn weekend_completions_are_ignored_for_weekday_habits() {
        let h = habit("a", "2024-01-04", Frequency::Weekdays);
        // Thursday and Friday done, plus a Saturday completion that is not
        // a relevant date.
        let c = done("a", &["2024-01-04", "2024-01-05", "2024-01-06"]);
        let stats = habit_streak_at(at("2024-01-07"), &h, &c);
        assert_eq!(stats.current, 2);
        assert_eq!(stats.longest, 2);
        assert_eq!(stats.consistency, 100);
    }

    #[test]
    fn other_habits_completions_do_not_count() {
        let h = habit("a", "2024-01-01", Frequency::Daily);
        let c = done("b", &["2024-01-01", "2024-01-02"]);
        let stats = habit_streak_at(at("2024-01-02"), &h, &c);
        assert_eq!(stats, StreakStats::default());
    }

    #[test]
    fn habit_created_today_with_completion_counts_one() {
        let h = habit("a", "2024-03-15", Frequency::Daily);
        let c = done("a", &["2024-03-15"]);
        let stats = habit_streak_at(at("2024-03-15"), &h, &c);
        assert_eq!(stats.current, 1);
        assert_eq!(stats.longest, 1);
        assert_eq!(stats.consistency, 100);
    }

    #[test]
    fn pending_today_keeps_yesterdays_streak() {
        let h = habit("a", "2024-01-01", Frequency::Daily);
        let c = done("a", &["2024-01-01", "2024-01-02", "2024-01-03"]);
        let stats = habit_streak_at(at("2024-01-04"), &h, &c);
        assert_eq!(stats.current, 3);
        // Completing today then extends the run by exactly one.
        let mut c = c;
        c.extend(done("a", &["2024-01-04"]));
        let stats = habit_streak_at(at("2024-01-04"), &h, &c);
        assert_eq!(stats.current, 4);
    }

    #[test]
    fn pending_today_does_not_revive_a_broken_streak() {
        // Missed yesterday; an uncompleted today is forgiven but the
        // earlier gap still resets the run.
        let h = habit("a", "2024-01-01", Frequency::Daily);
        let c = done("a", &["2024-01-01", "2024-01-02", "2024-01-03"]);
        let stats = habit_streak_at(at("2024-01-05"), &h, &c);
        assert_eq!(stats.current, 0);
        assert_eq!(stats.longest, 3);
    }

    #[test]
    fn unparseable_created_at_yields_zero() {
        let h = habit("a", "someday", Frequency::Daily);
        let c = done("a", &["2024-01-01"]);
        let stats = habit_streak_at(at("2024-01-02"), &h, &c);
        assert_eq!(stats, StreakStats::default());
    }
}
