//! The per-recipient notification queue.

use std::sync::Arc;

use ecole_auth::{AlertSink, Identity, Notice};
use tokio::sync::{watch, Mutex};
use tracing::{debug, info};

use crate::clock::Clock;
use crate::entities::{NewNotification, Notification, NotificationKind};
use crate::seed::seed_notifications;
use crate::source::EventSource;

/// Notifications visible to the signed-in identity, newest additions first.
///
/// Every operation first catches up with the session: if the identity changed since
/// the last call, the queue is rebuilt from the fixture for the new recipient.
pub struct NotificationFeed {
    state: Mutex<FeedState>,
    fixture: Vec<Notification>,
    clock: Arc<dyn Clock>,
    alerts: Arc<dyn AlertSink>,
}

struct FeedState {
    session: watch::Receiver<Option<Identity>>,
    recipient: Option<String>,
    items: Vec<Notification>,
}

impl FeedState {
    fn catch_up(&mut self, fixture: &[Notification]) {
        if !self.session.has_changed().unwrap_or(false) {
            return;
        }
        let recipient = self.session.borrow_and_update().as_ref().map(|i| i.id.clone());
        self.reset(recipient, fixture);
    }

    fn reset(&mut self, recipient: Option<String>, fixture: &[Notification]) {
        self.items = match &recipient {
            Some(id) => fixture
                .iter()
                .filter(|n| &n.recipient_id == id)
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        debug!(recipient = ?recipient, count = self.items.len(), "rebuilt notification feed");
        self.recipient = recipient;
    }
}

impl NotificationFeed {
    /// Feed over the built-in fixture.
    pub fn new(
        session: watch::Receiver<Option<Identity>>,
        clock: Arc<dyn Clock>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        let fixture = seed_notifications(clock.now());
        Self::with_fixture(session, fixture, clock, alerts)
    }

    pub fn with_fixture(
        mut session: watch::Receiver<Option<Identity>>,
        fixture: Vec<Notification>,
        clock: Arc<dyn Clock>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        let recipient = session.borrow_and_update().as_ref().map(|i| i.id.clone());
        let mut state = FeedState {
            session,
            recipient: None,
            items: Vec::new(),
        };
        state.reset(recipient, &fixture);

        Self {
            state: Mutex::new(state),
            fixture,
            clock,
            alerts,
        }
    }

    pub async fn list(&self) -> Vec<Notification> {
        let mut state = self.state.lock().await;
        state.catch_up(&self.fixture);
        state.items.clone()
    }

    pub async fn unread_count(&self) -> usize {
        let mut state = self.state.lock().await;
        state.catch_up(&self.fixture);
        state.items.iter().filter(|n| !n.read).count()
    }

    pub async fn recipient(&self) -> Option<String> {
        let mut state = self.state.lock().await;
        state.catch_up(&self.fixture);
        state.recipient.clone()
    }

    /// Returns whether a notification with `id` exists.
    pub async fn mark_as_read(&self, id: &str) -> bool {
        let mut state = self.state.lock().await;
        state.catch_up(&self.fixture);
        match state.items.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.read = true;
                true
            }
            None => false,
        }
    }

    /// Returns how many notifications flipped to read.
    pub async fn mark_all_as_read(&self) -> usize {
        let mut state = self.state.lock().await;
        state.catch_up(&self.fixture);
        let mut flipped = 0;
        for notification in state.items.iter_mut().filter(|n| !n.read) {
            notification.read = true;
            flipped += 1;
        }
        flipped
    }

    /// Returns whether anything was removed.
    pub async fn delete(&self, id: &str) -> bool {
        let mut state = self.state.lock().await;
        state.catch_up(&self.fixture);
        let before = state.items.len();
        state.items.retain(|n| n.id != id);
        let removed = state.items.len() != before;
        if removed {
            debug!(id, "deleted notification");
        }
        removed
    }

    /// Prepend a notification for the signed-in identity. Without a session nothing happens.
    pub async fn add(&self, new: NewNotification) -> Option<Notification> {
        let mut state = self.state.lock().await;
        state.catch_up(&self.fixture);
        let recipient = state.recipient.clone()?;

        let urgent = new.is_urgent();
        let notification = Notification::create(new, recipient, self.clock.now());
        state.items.insert(0, notification.clone());
        drop(state);

        info!(
            id = %notification.id,
            recipient = %notification.recipient_id,
            kind = %notification.kind,
            priority = %notification.priority,
            "added notification"
        );

        if urgent {
            let notice = if notification.kind == NotificationKind::Error {
                Notice::destructive(&notification.title, &notification.message)
            } else {
                Notice::new(&notification.title, &notification.message)
            };
            self.alerts.notify(notice);
        }

        Some(notification)
    }

    /// Run one generator tick: poll the source while a session exists.
    pub async fn tick(&self, source: &mut dyn EventSource) -> Option<Notification> {
        if self.recipient().await.is_none() {
            return None;
        }
        let new = source.poll()?;
        self.add(new).await
    }
}
