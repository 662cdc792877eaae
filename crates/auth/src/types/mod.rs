//! Shared error types and the alert surface.

pub mod alerts;
pub mod errors;

pub use alerts::{AlertSink, MemoryAlerts, Notice, Severity, TracingAlerts};
pub use errors::{AuthError, AuthResult, StoreError};
