use chrono::{DateTime, Utc};

use crate::model::stats::Stats;
use crate::model::task::Task;
use crate::time::same_calendar_day;

/// Aggregate a snapshot of the collection.
///
/// Bucket classification is first-match-wins in a fixed order:
/// before-safe (strict, with time of day), on-safe (calendar day),
/// on-deadline (calendar day), after-deadline (strict). A completed task
/// that falls strictly between the safe date and the deadline on neither
/// calendar day matches no rule; it still counts toward `completed_count`.
pub fn compute_stats(tasks: &[Task], now: DateTime<Utc>) -> Stats {
    let total_tasks = tasks.len();
    let completed_count = tasks.iter().filter(|t| t.completed).count();
    let completion_rate = if total_tasks > 0 {
        completed_count as f64 / total_tasks as f64 * 100.0
    } else {
        0.0
    };

    let mut stats = Stats {
        total_tasks,
        completed_count,
        completion_rate,
        ..Stats::default()
    };

    for task in tasks {
        if task.completed {
            if let Some(done) = task.completion_date {
                if done < task.safe_date {
                    stats.before_safe_date += 1;
                } else if same_calendar_day(done, task.safe_date) {
                    stats.on_safe_date += 1;
                } else if same_calendar_day(done, task.deadline_date) {
                    stats.on_deadline += 1;
                } else if done > task.deadline_date {
                    stats.after_deadline += 1;
                }
            }
        } else if now > task.deadline_date {
            stats.still_incomplete_after_deadline += 1;
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    fn task(safe: DateTime<Utc>, deadline: DateTime<Utc>) -> Task {
        Task::new(
            "t".to_string(),
            "d".to_string(),
            deadline,
            safe,
            utc(2025, 1, 1, 0),
        )
    }

    fn completed(safe: DateTime<Utc>, deadline: DateTime<Utc>, done: DateTime<Utc>) -> Task {
        task(safe, deadline).completing(done)
    }

    #[test]
    fn empty_collection_has_zero_rate() {
        let stats = compute_stats(&[], utc(2025, 1, 1, 0));
        assert_eq!(stats.total_tasks, 0);
        assert_eq!(stats.completion_rate, 0.0);
    }

    #[test]
    fn completion_rate_is_exact() {
        let now = utc(2025, 1, 1, 0);
        let safe = utc(2025, 1, 5, 0);
        let deadline = utc(2025, 1, 10, 0);
        let tasks = vec![
            completed(safe, deadline, utc(2025, 1, 2, 0)),
            task(safe, deadline),
            task(safe, deadline),
            task(safe, deadline),
        ];
        let stats = compute_stats(&tasks, now);
        assert_eq!(stats.total_tasks, 4);
        assert_eq!(stats.completed_count, 1);
        assert_eq!(stats.completion_rate, 25.0);
    }

    #[test]
    fn completion_before_safe_date_is_strict_with_time_of_day() {
        let safe = utc(2025, 1, 5, 12);
        let deadline = utc(2025, 1, 10, 0);
        // Same calendar day as the safe date, but strictly earlier.
        let stats = compute_stats(&[completed(safe, deadline, utc(2025, 1, 5, 8))], safe);
        assert_eq!(stats.before_safe_date, 1);
        assert_eq!(stats.on_safe_date, 0);
    }

    #[test]
    fn completion_later_on_safe_day_lands_in_on_safe_date() {
        let safe = utc(2025, 1, 5, 8);
        let deadline = utc(2025, 1, 10, 0);
        let stats = compute_stats(&[completed(safe, deadline, utc(2025, 1, 5, 20))], safe);
        assert_eq!(stats.before_safe_date, 0);
        assert_eq!(stats.on_safe_date, 1);
    }

    #[test]
    fn safe_date_equal_to_deadline_classifies_as_on_safe_date() {
        let day = utc(2025, 1, 10, 9);
        let stats = compute_stats(&[completed(day, day, utc(2025, 1, 10, 11))], day);
        assert_eq!(stats.on_safe_date, 1);
        assert_eq!(stats.on_deadline, 0);
    }

    #[test]
    fn completion_on_deadline_day() {
        let safe = utc(2025, 1, 5, 0);
        let deadline = utc(2025, 1, 10, 18);
        let stats = compute_stats(&[completed(safe, deadline, utc(2025, 1, 10, 9))], deadline);
        assert_eq!(stats.on_deadline, 1);
    }

    #[test]
    fn completion_after_deadline() {
        let safe = utc(2025, 1, 5, 0);
        let deadline = utc(2025, 1, 10, 18);
        let stats = compute_stats(&[completed(safe, deadline, utc(2025, 1, 12, 9))], deadline);
        assert_eq!(stats.after_deadline, 1);
    }

    #[test]
    fn completion_between_the_dates_matches_no_bucket() {
        let safe = utc(2025, 1, 5, 12);
        let deadline = utc(2025, 1, 8, 12);
        let done = utc(2025, 1, 6, 13);
        let stats = compute_stats(&[completed(safe, deadline, done)], deadline);
        assert_eq!(stats.completed_count, 1);
        assert_eq!(
            stats.before_safe_date
                + stats.on_safe_date
                + stats.on_deadline
                + stats.after_deadline,
            0
        );
    }

    #[test]
    fn buckets_are_mutually_exclusive() {
        let safe = utc(2025, 1, 5, 12);
        let deadline = utc(2025, 1, 10, 12);
        let tasks = vec![
            completed(safe, deadline, utc(2025, 1, 3, 0)),
            completed(safe, deadline, utc(2025, 1, 5, 15)),
            completed(safe, deadline, utc(2025, 1, 10, 9)),
            completed(safe, deadline, utc(2025, 1, 12, 0)),
        ];
        let stats = compute_stats(&tasks, deadline);
        assert_eq!(stats.before_safe_date, 1);
        assert_eq!(stats.on_safe_date, 1);
        assert_eq!(stats.on_deadline, 1);
        assert_eq!(stats.after_deadline, 1);
    }

    #[test]
    fn reversed_date_order_still_classifies_by_the_rules() {
        // safe date after the deadline; rule order still applies.
        let safe = utc(2025, 1, 10, 0);
        let deadline = utc(2025, 1, 5, 0);
        let stats = compute_stats(&[completed(safe, deadline, utc(2025, 1, 5, 9))], safe);
        // Before the safe date strictly, so rule 1 wins over on-deadline.
        assert_eq!(stats.before_safe_date, 1);
        assert_eq!(stats.on_deadline, 0);
    }

    #[test]
    fn overdue_open_tasks_are_counted() {
        let safe = utc(2025, 1, 5, 0);
        let deadline = utc(2025, 1, 10, 0);
        let tasks = vec![task(safe, deadline), task(safe, utc(2025, 2, 1, 0))];
        let stats = compute_stats(&tasks, utc(2025, 1, 11, 0));
        assert_eq!(stats.still_incomplete_after_deadline, 1);

        // Exactly at the deadline is not yet past it.
        let stats = compute_stats(&tasks, deadline);
        assert_eq!(stats.still_incomplete_after_deadline, 0);
    }
}
