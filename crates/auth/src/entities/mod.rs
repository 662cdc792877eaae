//! Domain entities for authentication and authorization.

pub mod identity;
pub mod role;

pub use identity::{Identity, RegisterRequest};
pub use role::{permissions, ParseRoleError, Role};
