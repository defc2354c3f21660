use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::StoreError;
use crate::model::task::Task;
use crate::notify::{self, NotificationPlatform};
use crate::repository::TaskRepository;

pub type ChangeListener = Box<dyn Fn(&[Task])>;

/// Exclusive owner of the in-memory task collection.
///
/// Every mutation rewrites the whole collection through the repository
/// and notifies subscribers. A failed write surfaces as
/// [`StoreError::Save`] but the in-memory change stays in place; the
/// stored mirror catches up on the next successful save. Add and edit
/// also hand a fresh notification batch to the platform; prior batches
/// for the same task are never cancelled.
pub struct TaskStore<R: TaskRepository, P: NotificationPlatform> {
    repo: R,
    platform: P,
    tasks: Vec<Task>,
    listeners: Vec<ChangeListener>,
}

impl<R: TaskRepository, P: NotificationPlatform> TaskStore<R, P> {
    pub fn new(repo: R, platform: P) -> Self {
        Self {
            repo,
            platform,
            tasks: Vec::new(),
            listeners: Vec::new(),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Register a callback invoked with the full collection after every
    /// change, including loads.
    pub fn subscribe(&mut self, listener: ChangeListener) {
        self.listeners.push(listener);
    }

    fn notify_change(&self) {
        for listener in &self.listeners {
            listener(&self.tasks);
        }
    }

    /// Ids are creation timestamps; rapid adds within one millisecond get
    /// bumped past the collision so ids stay pairwise distinct.
    fn unique_id(&self, candidate: i64) -> i64 {
        let mut id = candidate;
        while self.tasks.iter().any(|t| t.id == id) {
            id += 1;
        }
        id
    }

    /// Append a new task. Whatever completion state the input carries is
    /// forced off; the id is derived from `now`.
    pub fn add(&mut self, task: Task, now: DateTime<Utc>) -> Result<i64, StoreError> {
        let task = Task {
            id: self.unique_id(now.timestamp_millis()),
            completed: false,
            completion_date: None,
            ..task
        };
        let id = task.id;
        self.tasks.push(task);
        self.notify_change();
        if let Some(added) = self.tasks.last() {
            notify::dispatch(&self.platform, added, now);
        }
        self.persist()?;
        Ok(id)
    }

    /// Replace name, description and both dates of the task with the
    /// matching id. `completed` and `completion_date` are carried over
    /// from the existing record. Unknown id is a no-op. Notifications for
    /// the previous version are not cancelled; a fresh batch is layered
    /// on top.
    pub fn edit(&mut self, updated: Task, now: DateTime<Utc>) -> Result<(), StoreError> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == updated.id) else {
            return Ok(());
        };
        self.tasks[pos] = self.tasks[pos].with_details(
            updated.name,
            updated.description,
            updated.deadline_date,
            updated.safe_date,
        );
        self.notify_change();
        notify::dispatch(&self.platform, &self.tasks[pos], now);
        self.persist()
    }

    /// Mark the task completed at `now`. Unknown id is a no-op.
    pub fn complete(&mut self, id: i64, now: DateTime<Utc>) -> Result<(), StoreError> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(());
        };
        self.tasks[pos] = self.tasks[pos].completing(now);
        self.notify_change();
        self.persist()
    }

    /// Reopen a completed task: flag and completion date both cleared.
    /// Unknown id is a no-op.
    pub fn restore(&mut self, id: i64) -> Result<(), StoreError> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            return Ok(());
        };
        self.tasks[pos] = self.tasks[pos].restored();
        self.notify_change();
        self.persist()
    }

    /// Remove the task permanently. No tombstone, and any notifications
    /// already scheduled for it keep firing. Unknown id is a no-op.
    pub fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return Ok(());
        }
        self.notify_change();
        self.persist()
    }

    /// Read the persisted collection. Missing data loads as empty; a
    /// read or parse failure resets the collection to empty and reports
    /// [`StoreError::Load`]. There is no partial recovery.
    pub fn load(&mut self) -> Result<(), StoreError> {
        match self.repo.load() {
            Ok(tasks) => {
                self.tasks = tasks;
                self.notify_change();
                Ok(())
            }
            Err(err) => {
                self.tasks.clear();
                self.notify_change();
                Err(StoreError::Load(err))
            }
        }
    }

    /// Write the whole collection to the persisted store. On failure the
    /// in-memory state is not reverted.
    pub fn persist(&self) -> Result<(), StoreError> {
        self.repo.save(&self.tasks).map_err(StoreError::Save)?;
        debug!(count = self.tasks.len(), "persisted task collection");
        Ok(())
    }
}
