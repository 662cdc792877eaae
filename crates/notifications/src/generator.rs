//! Background task that trickles synthetic notifications into a feed.

use std::sync::Arc;
use std::time::Duration;

use ecole_auth::Identity;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::debug;

use crate::feed::NotificationFeed;
use crate::source::EventSource;

/// Owns the generator task; dropping it stops the task.
#[derive(Debug)]
pub struct GeneratorHandle {
    task: JoinHandle<()>,
}

impl GeneratorHandle {
    pub fn stop(self) {
        self.task.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for GeneratorHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Poll `source` every `period` while someone is signed in.
///
/// The interval restarts whenever the session changes, and no ticks happen while
/// signed out. The task ends when the session sender goes away.
pub fn spawn_generator(
    feed: Arc<NotificationFeed>,
    mut session: watch::Receiver<Option<Identity>>,
    mut source: Box<dyn EventSource>,
    period: Duration,
) -> GeneratorHandle {
    let task = tokio::spawn(async move {
        loop {
            let signed_in = session.wait_for(|identity| identity.is_some()).await.is_ok();
            if !signed_in {
                break;
            }
            debug!(period_secs = period.as_secs(), "notification generator running");

            let mut ticker = interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Some(notification) = feed.tick(source.as_mut()).await {
                            debug!(id = %notification.id, "generated notification");
                        }
                    }
                    changed = session.changed() => {
                        if changed.is_err() {
                            return;
                        }
                        break;
                    }
                }
            }
            debug!("notification generator paused");
        }
    });

    GeneratorHandle { task }
}
