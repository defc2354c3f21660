pub mod error;
pub mod model;
pub mod notify;
pub mod repository;
pub mod service;
pub mod time;

pub use error::StoreError;
pub use model::stats::Stats;
pub use model::task::Task;
pub use notify::{
    schedule_for, Channel, DeliveryEvent, Importance, NoopPlatform, NotificationPlatform,
    NotificationRequest, PermissionStatus,
};
pub use repository::{FileTaskRepository, TaskRepository};
pub use service::stats::compute_stats;
pub use service::task_store::TaskStore;
pub use time::{parse_human_date, remaining_days};
