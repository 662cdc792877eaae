//! Registration form validation.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::entities::{RegisterRequest, Role};

static EMAIL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").ok());

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("invalid email format")]
    InvalidEmail,

    #[error("password cannot be empty")]
    EmptyPassword,

    #[error("passwords do not match")]
    PasswordMismatch,
}

/// Raw values typed into the registration form.
#[derive(Debug, Clone)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub role: Role,
    pub school_id: String,
    pub class_id: String,
}

impl RegistrationForm {
    pub fn new(role: Role) -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: String::new(),
            confirm_password: String::new(),
            role,
            school_id: "school-1".to_string(),
            class_id: String::new(),
        }
    }

    /// Turn the form into a register request. A class is only kept for roles that have one.
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }

        let email = self.email.trim();
        let well_formed = EMAIL.as_ref().is_some_and(|regex| regex.is_match(email));
        if !well_formed || email.len() > 255 {
            return Err(ValidationError::InvalidEmail);
        }

        if self.password.is_empty() {
            return Err(ValidationError::EmptyPassword);
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }

        let class_id = Some(self.class_id.trim())
            .filter(|class| self.role.has_class() && !class.is_empty())
            .map(str::to_string);

        Ok(RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: self.password.clone(),
            role: self.role,
            school_id: self.school_id.clone(),
            class_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(role: Role) -> RegistrationForm {
        RegistrationForm {
            name: " Lucas Martin ".into(),
            email: "lucas.martin@ecole.fr".into(),
            password: "password123".into(),
            confirm_password: "password123".into(),
            class_id: "premiere-s".into(),
            ..RegistrationForm::new(role)
        }
    }

    #[test]
    fn valid_form_produces_trimmed_request() {
        let request = filled(Role::Teacher).validate().unwrap();

        assert_eq!(request.name, "Lucas Martin");
        assert_eq!(request.class_id.as_deref(), Some("premiere-s"));
        assert_eq!(request.school_id, "school-1");
    }

    #[test]
    fn class_is_dropped_for_roles_without_one() {
        let request = filled(Role::Parent).validate().unwrap();
        assert_eq!(request.class_id, None);

        let mut student = filled(Role::Student);
        student.class_id = "  ".into();
        assert_eq!(student.validate().unwrap().class_id, None);
    }

    #[test]
    fn mismatched_confirmation_is_rejected() {
        let mut form = filled(Role::Student);
        form.confirm_password = "password124".into();

        assert_eq!(form.validate().unwrap_err(), ValidationError::PasswordMismatch);
    }

    #[test]
    fn malformed_email_and_blank_name_are_rejected() {
        let mut form = filled(Role::Admin);
        form.email = "not-an-email".into();
        assert_eq!(form.validate().unwrap_err(), ValidationError::InvalidEmail);

        let mut form = filled(Role::Admin);
        form.name = "   ".into();
        assert_eq!(form.validate().unwrap_err(), ValidationError::EmptyName);
    }
}
