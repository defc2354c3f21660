use crate::model::task::Task;
use anyhow::Result;

/// Whole-collection persistence contract.
///
/// The persisted store is a single document holding every task; there is
/// no incremental update path. The in-memory collection owned by the task
/// store is authoritative and the stored copy is a derived mirror.
pub trait TaskRepository {
    /// Missing backing data yields an empty collection. Unreadable or
    /// unparseable data is an error; callers decide how to recover.
    fn load(&self) -> Result<Vec<Task>>;

    /// Replaces the stored document with the given collection.
    fn save(&self, tasks: &[Task]) -> Result<()>;
}
