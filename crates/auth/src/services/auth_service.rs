//! Authentication service owning the identity directory and the session lifecycle.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use ecole_config::AuthConfig;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::entities::{Identity, RegisterRequest, Role};
use crate::repositories::{Directory, SessionStore};
use crate::types::{AlertSink, AuthError, AuthResult, Notice};

/// Login, registration, logout and permission queries over one session.
///
/// Concurrent logins are not serialized; whichever completes last owns the session.
pub struct AuthService {
    directory: Directory,
    sessions: SessionStore,
    current: watch::Sender<Option<Identity>>,
    pending: Arc<AtomicUsize>,
    alerts: Arc<dyn AlertSink>,
    shared_password: String,
    latency: Duration,
}

/// Marks an operation as in flight until dropped.
struct PendingGuard(Arc<AtomicUsize>);

impl PendingGuard {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter.clone())
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl AuthService {
    /// Build the service and rehydrate any persisted session.
    pub fn new(
        config: &AuthConfig,
        directory: Directory,
        sessions: SessionStore,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        let restored = sessions.load();
        match &restored {
            Some(identity) => info!(user = %identity.id, role = %identity.role, "restored session"),
            None => debug!(slot = %sessions.slot(), "no stored session"),
        }

        let (current, _) = watch::channel(restored);

        Self {
            directory,
            sessions,
            current,
            pending: Arc::new(AtomicUsize::new(0)),
            alerts,
            shared_password: config.shared_password.clone(),
            latency: Duration::from_millis(config.login_latency_ms),
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    /// Snapshot of the signed-in identity.
    pub fn current(&self) -> Option<Identity> {
        self.current.borrow().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.borrow().is_some()
    }

    /// Receiver that observes every session change.
    pub fn subscribe(&self) -> watch::Receiver<Option<Identity>> {
        self.current.subscribe()
    }

    /// True while a login or registration is suspended.
    pub fn is_loading(&self) -> bool {
        self.pending.load(Ordering::SeqCst) > 0
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthResult<Identity> {
        let _pending = PendingGuard::enter(&self.pending);
        self.simulate_latency().await;

        let found = self.directory.find_by_email(email).await;
        let identity = match found {
            Some(identity) if password == self.shared_password => identity,
            _ => {
                warn!(email, "login rejected");
                let error = AuthError::InvalidCredentials;
                self.alerts
                    .notify(Notice::destructive("Erreur de connexion", error.user_message()));
                return Err(error);
            }
        };

        self.establish(identity.clone());
        info!(user = %identity.id, role = %identity.role, "user logged in");
        self.alerts.notify(Notice::new(
            "Connexion réussie",
            format!("Bienvenue {}", identity.name),
        ));

        Ok(identity)
    }

    pub async fn register(&self, request: RegisterRequest) -> AuthResult<Identity> {
        let _pending = PendingGuard::enter(&self.pending);
        self.simulate_latency().await;

        let identity = Identity::from_registration(&request);
        if let Err(error) = self.directory.insert(identity.clone()).await {
            warn!(email = %request.email, %error, "registration rejected");
            self.alerts
                .notify(Notice::destructive("Erreur d'inscription", error.user_message()));
            return Err(error);
        }

        self.establish(identity.clone());
        info!(user = %identity.id, role = %identity.role, "user registered");
        self.alerts.notify(Notice::new(
            "Inscription réussie",
            format!("Bienvenue {}", identity.name),
        ));

        Ok(identity)
    }

    /// Clear the session and its persisted slot. Does nothing without a session.
    pub fn logout(&self) {
        let previous = self.current.send_replace(None);
        let Some(identity) = previous else {
            return;
        };

        if let Err(error) = self.sessions.clear() {
            warn!(%error, "failed to clear persisted session");
        }

        info!(user = %identity.id, "user logged out");
        self.alerts.notify(Notice::new(
            "Déconnexion",
            "Vous avez été déconnecté avec succès",
        ));
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.current
            .borrow()
            .as_ref()
            .is_some_and(|identity| identity.has_permission(permission))
    }

    pub fn is_role(&self, role: Role) -> bool {
        self.current
            .borrow()
            .as_ref()
            .is_some_and(|identity| identity.role == role)
    }

    fn establish(&self, identity: Identity) {
        if let Err(error) = self.sessions.save(&identity) {
            warn!(user = %identity.id, %error, "failed to persist session");
        }
        self.current.send_replace(Some(identity));
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}
