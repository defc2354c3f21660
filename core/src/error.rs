use thiserror::Error;

/// The two user-visible failure kinds of the task store.
///
/// Scheduling failures are deliberately absent: the notification platform
/// is fire-and-forget and its errors are only logged.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Persisted data was unreadable or unparseable. The in-memory
    /// collection has been reset to empty.
    #[error("failed to load tasks: {0}")]
    Load(anyhow::Error),

    /// The persistence write failed. The in-memory collection keeps the
    /// mutation; the stored copy is stale until the next successful save.
    #[error("failed to save tasks: {0}")]
    Save(anyhow::Error),
}
