//! Events emitted by attendance workflows

mod notification;

pub use notification::{Notification, NotificationAttachment, NotificationKind, Recipient};
