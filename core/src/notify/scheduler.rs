use chrono::{DateTime, Utc};
use tracing::warn;

use crate::model::task::Task;
use crate::notify::{NotificationPlatform, NotificationRequest, CHANNEL_ID};
use crate::time::at_hour;

const REMINDER_HOURS: [u32; 3] = [8, 12, 18];

/// Derive the full notification batch for one task.
///
/// With a future deadline this is five requests: three fixed-time
/// reminders on `now`'s date plus the safe-date and deadline triggers.
/// Past the deadline only the latter two remain. Pure; every call yields
/// a fresh batch and nothing is deduplicated against earlier batches.
pub fn schedule_for(task: &Task, now: DateTime<Utc>) -> Vec<NotificationRequest> {
    let days_left = task.remaining_days(now);
    let mut requests = Vec::new();

    // The reminders are anchored to today's date, not to the deadline.
    // They do not recur on later days.
    if days_left > 0 {
        for hour in REMINDER_HOURS {
            requests.push(NotificationRequest {
                title: "Task reminder".to_string(),
                body: format!("\"{}\" is due in {} day(s)", task.name, days_left),
                channel_id: CHANNEL_ID.to_string(),
                trigger_at: at_hour(now, hour),
            });
        }
    }

    requests.push(NotificationRequest {
        title: "Safe date reached".to_string(),
        body: format!("\"{}\" is due today", task.name),
        channel_id: CHANNEL_ID.to_string(),
        trigger_at: task.safe_date,
    });

    requests.push(NotificationRequest {
        title: "Deadline".to_string(),
        body: format!("\"{}\" has {} day(s) left", task.name, days_left),
        channel_id: CHANNEL_ID.to_string(),
        trigger_at: task.deadline_date,
    });

    requests
}

/// Hand the batch for `task` to the platform, fire-and-forget: failures
/// are logged and swallowed, never retried, never surfaced.
pub fn dispatch<P: NotificationPlatform>(platform: &P, task: &Task, now: DateTime<Utc>) {
    for request in schedule_for(task, now) {
        if let Err(err) = platform.schedule(&request) {
            warn!(task_id = task.id, error = %err, "failed to schedule notification");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::at_hour;
    use anyhow::{anyhow, Result};
    use chrono::TimeZone;
    use std::cell::RefCell;

    fn utc(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    fn report_task(now: DateTime<Utc>) -> Task {
        Task::new(
            "Write report".to_string(),
            "Quarterly numbers".to_string(),
            utc(2025, 1, 10, 0),
            utc(2025, 1, 5, 0),
            now,
        )
    }

    #[test]
    fn future_deadline_emits_five_requests() {
        let now = utc(2025, 1, 1, 0);
        let task = report_task(now);
        let requests = schedule_for(&task, now);

        assert_eq!(requests.len(), 5);

        // Three reminders on today's date at the fixed hours.
        let reminder_times: Vec<_> = requests[..3].iter().map(|r| r.trigger_at).collect();
        assert_eq!(
            reminder_times,
            vec![at_hour(now, 8), at_hour(now, 12), at_hour(now, 18)]
        );
        for request in &requests[..3] {
            assert!(request.body.contains("Write report"));
            assert!(request.body.contains('9'));
        }

        assert_eq!(requests[3].trigger_at, task.safe_date);
        assert!(requests[3].body.contains("due today"));
        assert_eq!(requests[4].trigger_at, task.deadline_date);
    }

    #[test]
    fn past_deadline_emits_only_safe_and_deadline_triggers() {
        let now = utc(2025, 2, 1, 0);
        let task = report_task(utc(2025, 1, 1, 0));
        let requests = schedule_for(&task, now);

        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].trigger_at, task.safe_date);
        assert_eq!(requests[1].trigger_at, task.deadline_date);
    }

    #[test]
    fn deadline_exactly_now_skips_reminders() {
        let now = utc(2025, 1, 10, 0);
        let mut task = report_task(utc(2025, 1, 1, 0));
        task.deadline_date = now;
        assert_eq!(schedule_for(&task, now).len(), 2);
    }

    #[test]
    fn repeated_calls_layer_fresh_batches() {
        let now = utc(2025, 1, 1, 0);
        let task = report_task(now);
        let first = schedule_for(&task, now);
        let second = schedule_for(&task, now);
        assert_eq!(first, second);
    }

    struct FailingPlatform {
        attempts: RefCell<usize>,
    }

    impl NotificationPlatform for FailingPlatform {
        fn register_channel(&self, _channel: &crate::notify::Channel) -> Result<()> {
            Ok(())
        }

        fn request_permission(&self) -> Result<crate::notify::PermissionStatus> {
            Ok(crate::notify::PermissionStatus::Granted)
        }

        fn schedule(&self, _request: &NotificationRequest) -> Result<()> {
            *self.attempts.borrow_mut() += 1;
            Err(anyhow!("platform unavailable"))
        }
    }

    #[test]
    fn dispatch_swallows_platform_failures() {
        let now = utc(2025, 1, 1, 0);
        let task = report_task(now);
        let platform = FailingPlatform {
            attempts: RefCell::new(0),
        };
        // Must not panic or propagate; one attempt per request, no retry.
        dispatch(&platform, &task, now);
        assert_eq!(*platform.attempts.borrow(), 5);
    }
}
