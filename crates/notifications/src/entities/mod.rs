pub mod notification;

pub use notification::{
    NewNotification, Notification, NotificationKind, NotificationPriority, ParseNotificationError,
};
