//! Business logic: the auth service and access guards built on it.

pub mod auth_service;
pub mod guard;

pub use auth_service::AuthService;
pub use guard::{AccessDecision, AccessRequirement};
