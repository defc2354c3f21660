use serde::{Deserialize, Serialize};

/// Immutable aggregate snapshot of a task collection.
///
/// The four buckets classify completed tasks by when they were finished
/// relative to their safe date and deadline. They are mutually exclusive
/// but not exhaustive: a task completed strictly between the two dates
/// (on neither calendar day) lands in no bucket at all.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct Stats {
    pub total_tasks: usize,
    pub completed_count: usize,
    /// Percentage, 0.0 when the collection is empty.
    pub completion_rate: f64,
    pub before_safe_date: usize,
    pub on_safe_date: usize,
    pub on_deadline: usize,
    pub after_deadline: usize,
    /// Open tasks whose deadline has already passed.
    pub still_incomplete_after_deadline: usize,
}
