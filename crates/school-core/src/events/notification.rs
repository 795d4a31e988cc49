//! Notification events - messages handed to the notification gateway
//!
//! A notification is produced after a successful attendance transition or a
//! welcome request and is delivered out of band (email). The payload is
//! self-contained so a mailer can render it without querying the database.

use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value_objects::SubjectType;

/// Format used for the human-readable event time, e.g.
/// `Wednesday, 10 January, 2024 09:00 AM`
pub const DISPLAY_TIME_FORMAT: &str = "%A, %d %B, %Y %I:%M %p";

/// Who receives the message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NotificationKind {
    CheckIn,
    CheckOut,
    Welcome,
}

impl NotificationKind {
    /// Email subject line
    pub const fn subject_line(self) -> &'static str {
        match self {
            Self::CheckIn => "Check In Notification",
            Self::CheckOut => "Check Out Notification",
            Self::Welcome => "Welcome",
        }
    }
}

/// File attached to a notification (the QR badge for welcome messages)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub subject_type: SubjectType,
    pub subject_code: String,
    pub subject_name: String,
    pub recipients: Vec<Recipient>,
    pub occurred_at: DateTime<Utc>,
    pub display_time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<NotificationAttachment>,
}

impl Notification {
    pub fn new(
        kind: NotificationKind,
        subject_type: SubjectType,
        subject_code: impl Into<String>,
        subject_name: impl Into<String>,
        recipients: Vec<Recipient>,
        at: DateTime<Local>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            subject_type,
            subject_code: subject_code.into(),
            subject_name: subject_name.into(),
            recipients,
            occurred_at: at.with_timezone(&Utc),
            display_time: at.format(DISPLAY_TIME_FORMAT).to_string(),
            attachment: None,
        }
    }

    pub fn with_attachment(mut self, attachment: NotificationAttachment) -> Self {
        self.attachment = Some(attachment);
        self
    }

    #[inline]
    pub fn has_recipients(&self) -> bool {
        !self.recipients.is_empty()
    }
}
