use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use ecole_auth::{AlertSink, AuthService, Directory, FileStore, KeyValueStore, MemoryStore, SessionStore};
use ecole_config::{AppConfig, StorageBackend};
use ecole_notifications::{
    spawn_generator, Clock, GeneratorHandle, NotificationFeed, RandomTrickle, SystemClock,
};
use tracing::info;

pub mod telemetry {
    use anyhow::Result;
    use tracing::Level;
    use tracing_subscriber::{fmt::SubscriberBuilder, EnvFilter};

    pub fn init_tracing() -> Result<()> {
        let env_filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = SubscriberBuilder::default()
            .with_max_level(Level::INFO)
            .with_env_filter(env_filter)
            .finish();

        tracing::subscriber::set_global_default(subscriber)
            .map_err(|error| anyhow::anyhow!("failed to set tracing subscriber: {error}"))
    }
}

/// The auth service, the notification feed and the generator feeding it.
pub struct EcoleServices {
    pub auth: Arc<AuthService>,
    pub feed: Arc<NotificationFeed>,
    generator: Option<GeneratorHandle>,
}

impl EcoleServices {
    /// Wire everything from configuration. Must run inside a tokio runtime.
    pub fn initialise(config: &AppConfig, alerts: Arc<dyn AlertSink>) -> Result<Self> {
        Self::initialise_with_clock(config, alerts, Arc::new(SystemClock))
    }

    pub fn initialise_with_clock(
        config: &AppConfig,
        alerts: Arc<dyn AlertSink>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        let store = open_store(config).context("failed to open session storage")?;
        let sessions = SessionStore::new(store, config.auth.session_slot.clone());

        let auth = Arc::new(AuthService::new(
            &config.auth,
            Directory::seeded(),
            sessions,
            alerts.clone(),
        ));
        let feed = Arc::new(NotificationFeed::new(auth.subscribe(), clock, alerts));

        let generator = if config.notifications.enabled {
            let period = Duration::from_secs(config.notifications.poll_interval_seconds.max(1));
            let source = RandomTrickle::from_config(&config.notifications);
            info!(
                period_secs = period.as_secs(),
                probability = source.probability(),
                "starting notification generator"
            );
            Some(spawn_generator(
                feed.clone(),
                auth.subscribe(),
                Box::new(source),
                period,
            ))
        } else {
            info!("notification generator disabled");
            None
        };

        Ok(Self {
            auth,
            feed,
            generator,
        })
    }

    pub fn generator_running(&self) -> bool {
        self.generator
            .as_ref()
            .is_some_and(|generator| !generator.is_finished())
    }
}

fn open_store(config: &AppConfig) -> Result<Arc<dyn KeyValueStore>> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryStore::new())),
        StorageBackend::File => {
            let root = PathBuf::from(&config.storage.directory);
            std::fs::create_dir_all(&root)
                .with_context(|| format!("failed to create storage directory {}", root.display()))?;
            info!(path = %root.display(), "using file session storage");
            Ok(Arc::new(FileStore::new(root)))
        }
    }
}

pub async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        tracing::warn!(?error, "failed to listen for shutdown signal");
    }
    info!("shutdown signal received");
}
