//! # EcoleManager Auth Crate
//!
//! Identity directory, session persistence and role-based authorization for the
//! EcoleManager dashboard.
//!
//! ## Architecture
//!
//! - **Entities**: `Identity`, `Role` and the fixed role to permission table
//! - **Repositories**: the identity `Directory`, key-value stores and the `SessionStore`
//! - **Services**: `AuthService` (login, register, logout, permission checks) and access guards
//! - **Types**: errors and the alert surface used for user-facing notices
//! - **Utils**: registration form validation
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use ecole_auth::{AuthService, Directory, MemoryStore, SessionStore, TracingAlerts};
//! use ecole_config::AuthConfig;
//!
//! # tokio_test_block_on(async {
//! let config = AuthConfig { login_latency_ms: 0, ..AuthConfig::default() };
//! let sessions = SessionStore::new(Arc::new(MemoryStore::new()), &config.session_slot);
//! let auth = AuthService::new(&config, Directory::seeded(), sessions, Arc::new(TracingAlerts));
//!
//! assert!(auth.login("admin@ecole.fr", "password123").await.is_ok());
//! assert!(auth.has_permission("manage_users"));
//! # });
//! # fn tokio_test_block_on<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().enable_time().build().unwrap().block_on(f)
//! # }
//! ```

pub mod entities;
pub mod repositories;
pub mod seed;
pub mod services;
pub mod types;
pub mod utils;

pub use entities::{permissions, Identity, ParseRoleError, RegisterRequest, Role};
pub use repositories::{Directory, FileStore, KeyValueStore, MemoryStore, SessionStore};
pub use seed::{demo_accounts, seed_identities, DemoAccount, DEMO_PASSWORD};
pub use services::{AccessDecision, AccessRequirement, AuthService};
pub use types::{AlertSink, AuthError, AuthResult, MemoryAlerts, Notice, Severity, StoreError, TracingAlerts};
pub use utils::{RegistrationForm, ValidationError};
