use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod scheduler;

pub use scheduler::{dispatch, schedule_for};

pub const CHANNEL_ID: &str = "duetrack-reminders";
pub const CHANNEL_NAME: &str = "Task reminders";

/// Ordinal delivery severity understood by the platform. Reminders use
/// the highest level.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Importance {
    Low,
    Default,
    High,
    Max,
}

/// A named notification category, registered once with the platform.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Channel {
    pub id: String,
    pub name: String,
    pub importance: Importance,
}

impl Channel {
    pub fn reminders() -> Self {
        Self {
            id: CHANNEL_ID.to_string(),
            name: CHANNEL_NAME.to_string(),
            importance: Importance::Max,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Foreground/background delivery callback payloads. Consumed only for
/// logging; nothing in the core reacts to them. Wiring the platform's
/// press/dismiss callbacks into [`handle_delivery_event`] is the
/// embedding platform's job — a sink with no delivery feedback (like a
/// plain log sink) simply never produces events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryEvent {
    Pressed,
    Dismissed,
}

/// One scheduled message: fires at or after `trigger_at`. Nothing
/// stronger is assumed of the platform, and no request is ever cancelled.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub title: String,
    pub body: String,
    pub channel_id: String,
    pub trigger_at: DateTime<Utc>,
}

impl NotificationRequest {
    /// Epoch-millisecond trigger for the platform's schedule-at primitive.
    pub fn trigger_epoch_millis(&self) -> i64 {
        self.trigger_at.timestamp_millis()
    }
}

/// Black-box delivery collaborator (OS notification service, test double,
/// or a plain log sink).
pub trait NotificationPlatform {
    fn register_channel(&self, channel: &Channel) -> Result<()>;
    fn request_permission(&self) -> Result<PermissionStatus>;
    fn schedule(&self, request: &NotificationRequest) -> Result<()>;
}

/// Platform that accepts everything and delivers nothing.
pub struct NoopPlatform;

impl NotificationPlatform for NoopPlatform {
    fn register_channel(&self, _channel: &Channel) -> Result<()> {
        Ok(())
    }

    fn request_permission(&self) -> Result<PermissionStatus> {
        Ok(PermissionStatus::Granted)
    }

    fn schedule(&self, _request: &NotificationRequest) -> Result<()> {
        Ok(())
    }
}

/// Press/dismiss callbacks are logged and otherwise ignored.
pub fn handle_delivery_event(event: DeliveryEvent) {
    match event {
        DeliveryEvent::Pressed => tracing::info!("notification pressed"),
        DeliveryEvent::Dismissed => tracing::debug!("notification dismissed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reminder_channel_uses_highest_importance() {
        let channel = Channel::reminders();
        assert_eq!(channel.id, CHANNEL_ID);
        assert_eq!(channel.importance, Importance::Max);
        assert!(Importance::Max > Importance::High);
    }

    #[test]
    fn trigger_epoch_millis_matches_timestamp() {
        use chrono::TimeZone;
        let at = Utc.with_ymd_and_hms(2025, 1, 5, 8, 0, 0).unwrap();
        let request = NotificationRequest {
            title: "t".to_string(),
            body: "b".to_string(),
            channel_id: CHANNEL_ID.to_string(),
            trigger_at: at,
        };
        assert_eq!(request.trigger_epoch_millis(), at.timestamp_millis());
    }

    #[test]
    fn delivery_events_are_absorbed() {
        handle_delivery_event(DeliveryEvent::Pressed);
        handle_delivery_event(DeliveryEvent::Dismissed);
    }
}
