use crate::domain::habit::HabitLogEntry;
use crate::domain::id::HabitId;
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

/// Current and best consecutive-day runs for a habit
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Streak {
    pub current: u32,
    pub best: u32,
}

/// Computes the streaks of `habit_id` as of the calendar day `as_of`.
///
/// Only hit entries count. The current streak is the run of hit days ending
/// at `as_of`; it is 0 whenever `as_of` itself has no hit, even if the day
/// before did. The best streak is the longest run anywhere in the history.
/// Entries without a readable date are ignored.
pub fn compute_streak(habit_id: &HabitId, entries: &[HabitLogEntry], as_of: NaiveDate) -> Streak {
    let hit_days = hit_days(habit_id, entries);

    Streak {
        current: current_run(&hit_days, as_of),
        best: longest_run(&hit_days),
    }
}

fn hit_days(habit_id: &HabitId, entries: &[HabitLogEntry]) -> BTreeSet<NaiveDate> {
    entries
        .iter()
        .filter(|entry| &entry.habit_id == habit_id && entry.is_hit())
        .filter_map(|entry| entry.date)
        .collect()
}

fn current_run(hit_days: &BTreeSet<NaiveDate>, as_of: NaiveDate) -> u32 {
    let mut run = 0;
    let mut day = Some(as_of);
    while let Some(current) = day.filter(|d| hit_days.contains(d)) {
        run += 1;
        day = current.pred_opt();
    }
    run
}

fn longest_run(hit_days: &BTreeSet<NaiveDate>) -> u32 {
    let mut days = hit_days.iter().rev();
    let Some(mut previous) = days.next().copied() else {
        return 0;
    };

    let mut best = 1;
    let mut run = 1;
    for &day in days {
        if previous - day == Duration::days(1) {
            run += 1;
        } else {
            run = 1;
        }
        best = best.max(run);
        previous = day;
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn hit(habit: &str, date: NaiveDate) -> HabitLogEntry {
        HabitLogEntry::new(HabitId::from(habit), date).completed(true)
    }

    fn hits(habit: &str, dates: &[&str]) -> Vec<HabitLogEntry> {
        dates.iter().map(|d| hit(habit, day(d))).collect()
    }

    #[test]
    fn test_no_hits() {
        let habit = HabitId::from("h");
        let today = day("2024-01-05");

        assert_eq!(compute_streak(&habit, &[], today), Streak { current: 0, best: 0 });

        let misses = vec![
            HabitLogEntry::new(habit.clone(), today).completed(false),
            HabitLogEntry::new(habit.clone(), today).with_quantity(0.0),
        ];
        assert_eq!(
            compute_streak(&habit, &misses, today),
            Streak { current: 0, best: 0 }
        );
    }

    #[test]
    fn test_single_hit_today() {
        let today = day("2024-01-05");
        let logs = hits("h", &["2024-01-05"]);

        assert_eq!(
            compute_streak(&HabitId::from("h"), &logs, today),
            Streak { current: 1, best: 1 }
        );
    }

    #[test]
    fn test_three_consecutive_days_ending_today() {
        let today = day("2024-01-05");
        let logs = hits("h", &["2024-01-05", "2024-01-04", "2024-01-03"]);

        assert_eq!(
            compute_streak(&HabitId::from("h"), &logs, today),
            Streak { current: 3, best: 3 }
        );
    }

    #[test]
    fn test_missing_today_resets_current() {
        let today = day("2024-01-05");
        let logs = hits("h", &["2024-01-04", "2024-01-02"]);

        assert_eq!(
            compute_streak(&HabitId::from("h"), &logs, today),
            Streak { current: 0, best: 1 }
        );
    }

    #[test]
    fn test_best_of_two_runs() {
        let today = day("2024-03-01");
        let logs = hits(
            "h",
            &[
                "2024-01-01",
                "2024-01-02",
                "2024-02-10",
                "2024-02-11",
                "2024-02-12",
                "2024-02-13",
            ],
        );

        assert_eq!(
            compute_streak(&HabitId::from("h"), &logs, today),
            Streak { current: 0, best: 4 }
        );
    }

    #[test]
    fn test_gap_before_today() {
        let today = day("2024-01-05");
        let logs = hits(
            "h",
            &["2024-01-01", "2024-01-02", "2024-01-03", "2024-01-05"],
        );

        assert_eq!(
            compute_streak(&HabitId::from("h"), &logs, today),
            Streak { current: 1, best: 3 }
        );
    }

    #[test]
    fn test_ignores_other_habits_and_misses() {
        let today = day("2024-01-05");
        let mut logs = hits("h", &["2024-01-05"]);
        logs.extend(hits("other", &["2024-01-04", "2024-01-03"]));
        logs.push(HabitLogEntry::new(HabitId::from("h"), day("2024-01-04")).completed(false));

        assert_eq!(
            compute_streak(&HabitId::from("h"), &logs, today),
            Streak { current: 1, best: 1 }
        );
    }

    #[test]
    fn test_quantity_hits_count() {
        let habit = HabitId::from("h");
        let today = day("2024-01-05");
        let logs = vec![
            HabitLogEntry::new(habit.clone(), today).with_quantity(2.5),
            HabitLogEntry::new(habit.clone(), day("2024-01-04")).with_quantity(1.0),
        ];

        assert_eq!(
            compute_streak(&habit, &logs, today),
            Streak { current: 2, best: 2 }
        );
    }

    #[test]
    fn test_duplicate_days_counted_once() {
        let today = day("2024-01-05");
        let logs = hits("h", &["2024-01-05", "2024-01-05", "2024-01-04"]);

        assert_eq!(
            compute_streak(&HabitId::from("h"), &logs, today),
            Streak { current: 2, best: 2 }
        );
    }

    #[test]
    fn test_runs_across_month_and_year_boundaries() {
        let today = day("2024-03-01");
        let logs = hits(
            "h",
            &["2023-12-31", "2024-01-01", "2024-02-28", "2024-02-29", "2024-03-01"],
        );

        assert_eq!(
            compute_streak(&HabitId::from("h"), &logs, today),
            Streak { current: 3, best: 3 }
        );
    }

    #[test]
    fn test_entries_without_date_are_excluded() {
        let habit = HabitId::from("h");
        let today = day("2024-01-05");
        let mut undated = hit("h", today);
        undated.date = None;
        let logs = vec![undated, hit("h", day("2024-01-04"))];

        assert_eq!(
            compute_streak(&habit, &logs, today),
            Streak { current: 0, best: 1 }
        );
    }

    #[test]
    fn test_future_hits_do_not_extend_current() {
        let today = day("2024-01-05");
        let logs = hits("h", &["2024-01-06", "2024-01-05"]);

        let streak = compute_streak(&HabitId::from("h"), &logs, today);
        assert_eq!(streak.current, 1);
        assert_eq!(streak.best, 2);
    }

    #[test]
    fn test_run_reaching_earliest_date_stops() {
        let first = NaiveDate::MIN;
        let second = first.succ_opt().unwrap();
        let logs = vec![hit("h", first), hit("h", second)];

        let streak = compute_streak(&HabitId::from("h"), &logs, second);
        assert_eq!(streak, Streak { current: 2, best: 2 });
        assert_eq!(compute_streak(&HabitId::from("h"), &logs, first).current, 1);
    }
}
