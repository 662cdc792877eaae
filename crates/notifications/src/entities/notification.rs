use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// An alert directed at one identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub priority: NotificationPriority,
    pub timestamp: DateTime<Utc>,
    /// Once set, never cleared
    pub read: bool,
    /// Id of the only identity allowed to see this notification
    pub recipient_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPriority {
    Low,
    Medium,
    High,
}

/// Caller-supplied part of a notification; the feed fills in the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNotification {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub priority: NotificationPriority,
    #[serde(default)]
    pub action_url: Option<String>,
}

impl NewNotification {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        kind: NotificationKind,
        priority: NotificationPriority,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            kind,
            priority,
            action_url: None,
        }
    }

    pub fn with_action_url(mut self, url: impl Into<String>) -> Self {
        self.action_url = Some(url.into());
        self
    }

    /// High priority and error notifications are raised on the alert surface.
    pub fn is_urgent(&self) -> bool {
        self.priority == NotificationPriority::High || self.kind == NotificationKind::Error
    }
}

impl Notification {
    /// Materialize an unread notification for `recipient_id`.
    pub fn create(
        new: NewNotification,
        recipient_id: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: new.title,
            message: new.message,
            kind: new.kind,
            priority: new.priority,
            timestamp,
            read: false,
            recipient_id: recipient_id.into(),
            action_url: new.action_url,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseNotificationError {
    #[error("unknown notification kind: {0}")]
    Kind(String),

    #[error("unknown notification priority: {0}")]
    Priority(String),
}

impl std::str::FromStr for NotificationKind {
    type Err = ParseNotificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(NotificationKind::Info),
            "success" => Ok(NotificationKind::Success),
            "warning" => Ok(NotificationKind::Warning),
            "error" => Ok(NotificationKind::Error),
            _ => Err(ParseNotificationError::Kind(s.to_string())),
        }
    }
}

impl std::str::FromStr for NotificationPriority {
    type Err = ParseNotificationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(NotificationPriority::Low),
            "medium" => Ok(NotificationPriority::Medium),
            "high" => Ok(NotificationPriority::High),
            _ => Err(ParseNotificationError::Priority(s.to_string())),
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Warning => "warning",
            NotificationKind::Error => "error",
        };
        f.pad(name)
    }
}

impl std::fmt::Display for NotificationPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NotificationPriority::Low => "low",
            NotificationPriority::Medium => "medium",
            NotificationPriority::High => "high",
        };
        f.pad(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urgency_follows_priority_or_error_kind() {
        let plain = NewNotification::new("t", "m", NotificationKind::Info, NotificationPriority::Medium);
        assert!(!plain.is_urgent());

        let high = NewNotification {
            priority: NotificationPriority::High,
            ..plain.clone()
        };
        assert!(high.is_urgent());

        let error = NewNotification {
            kind: NotificationKind::Error,
            priority: NotificationPriority::Low,
            ..plain
        };
        assert!(error.is_urgent());
    }

    #[test]
    fn created_notification_is_unread_and_addressed() {
        let now = Utc::now();
        let new = NewNotification::new("t", "m", NotificationKind::Success, NotificationPriority::Low)
            .with_action_url("/payments");

        let notification = Notification::create(new, "42", now);

        assert!(!notification.read);
        assert_eq!(notification.recipient_id, "42");
        assert_eq!(notification.timestamp, now);
        assert_eq!(notification.action_url.as_deref(), Some("/payments"));
        assert!(!notification.id.is_empty());
    }

    #[test]
    fn kind_and_priority_parse_case_insensitively() {
        assert_eq!("Warning".parse::<NotificationKind>(), Ok(NotificationKind::Warning));
        assert_eq!("HIGH".parse::<NotificationPriority>(), Ok(NotificationPriority::High));
        assert_eq!(
            "urgent".parse::<NotificationPriority>(),
            Err(ParseNotificationError::Priority("urgent".to_string()))
        );
        assert_eq!(
            "panic".parse::<NotificationKind>().unwrap_err().to_string(),
            "unknown notification kind: panic"
        );
    }
}
