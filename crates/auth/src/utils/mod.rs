//! Helpers used by presentation layers in front of the auth service.

pub mod validation;

pub use validation::{RegistrationForm, ValidationError};
