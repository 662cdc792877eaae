//! # EcoleManager Notifications Crate
//!
//! A per-user alert queue derived from the signed-in identity, with read state,
//! deletion, explicit additions and a background trickle of synthetic events.
//!
//! The feed follows the auth service through a `watch` receiver: whenever the
//! session changes the queue is rebuilt from the seed fixture for the new
//! recipient, and logging out empties it.

pub mod clock;
pub mod entities;
pub mod feed;
pub mod generator;
pub mod seed;
pub mod source;

pub use clock::{Clock, ManualClock, SystemClock};
pub use entities::{
    NewNotification, Notification, NotificationKind, NotificationPriority, ParseNotificationError,
};
pub use feed::NotificationFeed;
pub use generator::{spawn_generator, GeneratorHandle};
pub use seed::seed_notifications;
pub use source::{EventSource, RandomTrickle};
