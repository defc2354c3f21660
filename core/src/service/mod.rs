pub mod stats;
pub mod task_store;
