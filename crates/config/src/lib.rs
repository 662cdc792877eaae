use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::debug;

const DEFAULT_CONFIG_FILES: &[&str] = &[
    "ecole.toml",
    "config/ecole.toml",
    "crates/config/ecole.toml",
    "../ecole.toml",
    "../config/ecole.toml",
];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub notifications: NotificationConfig,
}

/// Settings for the authentication service.
///
/// ```
/// use ecole_config::AuthConfig;
///
/// let auth = AuthConfig::default();
/// assert_eq!(auth.login_latency_ms, 1_000);
/// assert_eq!(auth.session_slot, "auth_user");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Artificial delay applied to login and registration so callers can show a pending state.
    #[serde(default = "AuthConfig::default_login_latency")]
    pub login_latency_ms: u64,
    /// The single password accepted for every account. Demo behaviour only.
    #[serde(default = "AuthConfig::default_shared_password")]
    pub shared_password: String,
    #[serde(default = "AuthConfig::default_session_slot")]
    pub session_slot: String,
}

impl AuthConfig {
    const fn default_login_latency() -> u64 {
        1_000
    }

    fn default_shared_password() -> String {
        "password123".to_string()
    }

    fn default_session_slot() -> String {
        "auth_user".to_string()
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            login_latency_ms: Self::default_login_latency(),
            shared_password: Self::default_shared_password(),
            session_slot: Self::default_session_slot(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    File,
    Memory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "StorageConfig::default_backend")]
    pub backend: StorageBackend,
    /// Root directory of the file backend.
    #[serde(default = "StorageConfig::default_directory")]
    pub directory: String,
}

impl StorageConfig {
    const fn default_backend() -> StorageBackend {
        StorageBackend::File
    }

    fn default_directory() -> String {
        ".ecole".to_string()
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: Self::default_backend(),
            directory: Self::default_directory(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationConfig {
    #[serde(default = "NotificationConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default = "NotificationConfig::default_poll_interval")]
    pub poll_interval_seconds: u64,
    /// Chance that a generator tick produces a notification.
    #[serde(default = "NotificationConfig::default_event_probability")]
    pub event_probability: f64,
    #[serde(default)]
    pub rng_seed: Option<u64>,
}

impl NotificationConfig {
    const fn default_enabled() -> bool {
        true
    }

    const fn default_poll_interval() -> u64 {
        30
    }

    const fn default_event_probability() -> f64 {
        0.1
    }
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            poll_interval_seconds: Self::default_poll_interval(),
            event_probability: Self::default_event_probability(),
            rng_seed: None,
        }
    }
}

/// Load the application configuration by combining defaults, files, and environment overrides.
///
/// ```
/// use ecole_config::load;
///
/// std::env::remove_var("ECOLE_CONFIG");
///
/// let config = load().expect("configuration should load with defaults");
/// assert!(!config.auth.session_slot.is_empty());
/// ```
pub fn load() -> anyhow::Result<AppConfig> {
    let defaults = AppConfig::default();

    let mut builder = config::Config::builder()
        .set_default(
            "auth.login_latency_ms",
            i64::try_from(defaults.auth.login_latency_ms).unwrap_or(i64::MAX),
        )?
        .set_default("auth.shared_password", defaults.auth.shared_password.clone())?
        .set_default("auth.session_slot", defaults.auth.session_slot.clone())?
        .set_default("storage.backend", "file")?
        .set_default("storage.directory", defaults.storage.directory.clone())?
        .set_default("notifications.enabled", defaults.notifications.enabled)?
        .set_default(
            "notifications.poll_interval_seconds",
            i64::try_from(defaults.notifications.poll_interval_seconds).unwrap_or(i64::MAX),
        )?
        .set_default(
            "notifications.event_probability",
            defaults.notifications.event_probability,
        )?;

    let environment_overrides = config::Environment::with_prefix("ECOLE").separator("__");

    let mut config_file_attached = false;

    if let Ok(path) = std::env::var("ECOLE_CONFIG") {
        builder = builder.add_source(config::File::from(PathBuf::from(&path)));
        config_file_attached = true;
        debug!(path, "loading configuration via ECOLE_CONFIG");
    } else if let Ok(cwd) = std::env::current_dir() {
        let fallback = DEFAULT_CONFIG_FILES
            .iter()
            .map(|candidate| cwd.join(candidate))
            .find(|path| path.exists());

        if let Some(path) = fallback {
            debug!(path = %path.display(), "loading configuration file");
            builder = builder.add_source(config::File::from(path));
            config_file_attached = true;
        }
    }

    if !config_file_attached {
        debug!("no configuration file found, relying on defaults and environment overrides");
    }

    builder = builder.add_source(environment_overrides);

    let cfg = builder.build().context("unable to build configuration")?;

    let mut config = cfg
        .try_deserialize::<AppConfig>()
        .context("invalid configuration")?;

    let probability = config.notifications.event_probability;
    config.notifications.event_probability = if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    };

    if config.notifications.poll_interval_seconds == 0 {
        config.notifications.poll_interval_seconds = 1;
    }

    debug!(?config, "loaded configuration");
    Ok(config)
}
