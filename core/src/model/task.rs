use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::time::remaining_days;

/// The single trackable unit: a name, a description, a safe date, a hard
/// deadline and a completion marker.
///
/// Transitions never mutate in place; each one builds a new value from the
/// old with only the specified fields changed. The store relies on that to
/// keep `completed` and `completion_date` in lockstep.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    /// Epoch-millisecond creation timestamp, unique in the collection,
    /// never reassigned.
    pub id: i64,
    pub name: String,
    pub description: String,
    pub deadline_date: DateTime<Utc>,
    /// Intended to precede the deadline. Not validated; all downstream
    /// logic stays well-defined when the order is violated.
    pub safe_date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<DateTime<Utc>>,
}

impl Task {
    pub fn new(
        name: String,
        description: String,
        deadline_date: DateTime<Utc>,
        safe_date: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: now.timestamp_millis(),
            name,
            description,
            deadline_date,
            safe_date,
            completed: false,
            completion_date: None,
        }
    }

    /// Ceiling of days until the deadline, measured from `now`.
    pub fn remaining_days(&self, now: DateTime<Utc>) -> i64 {
        remaining_days(self.deadline_date, now)
    }

    /// The completed copy of this task, stamped at `now`.
    pub fn completing(&self, now: DateTime<Utc>) -> Self {
        Self {
            completed: true,
            completion_date: Some(now),
            ..self.clone()
        }
    }

    /// The re-opened copy: completion flag and date both cleared.
    pub fn restored(&self) -> Self {
        Self {
            completed: false,
            completion_date: None,
            ..self.clone()
        }
    }

    /// The edited copy: everything replaced except `id` and the completion
    /// state, which survive the edit untouched.
    pub fn with_details(
        &self,
        name: String,
        description: String,
        deadline_date: DateTime<Utc>,
        safe_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: self.id,
            name,
            description,
            deadline_date,
            safe_date,
            completed: self.completed,
            completion_date: self.completion_date,
        }
    }
}
