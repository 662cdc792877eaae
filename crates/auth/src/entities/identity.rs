use std::collections::BTreeSet;

use cuid2::CuidConstructor;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::role::Role;

static CUID: Lazy<CuidConstructor> = Lazy::new(CuidConstructor::new);

/// An authenticated principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Opaque id, immutable once assigned
    pub id: String,
    /// Login key, unique across the directory
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub permissions: BTreeSet<String>,
    /// Tenant scope
    pub school_id: String,
    /// Set for teachers and students
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_id: Option<String>,
    /// Children of a parent account
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub student_ids: Option<Vec<String>>,
}

/// Input for creating a new account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub school_id: String,
    #[serde(default)]
    pub class_id: Option<String>,
}

impl Identity {
    /// Build an identity whose permissions come from the role table.
    pub fn with_role(
        id: impl Into<String>,
        email: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        school_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            role,
            avatar: None,
            permissions: role
                .default_permissions()
                .iter()
                .map(|permission| permission.to_string())
                .collect(),
            school_id: school_id.into(),
            class_id: None,
            student_ids: None,
        }
    }

    /// Synthesize a fresh identity for a registration.
    pub fn from_registration(request: &RegisterRequest) -> Self {
        let mut identity = Self::with_role(
            new_identity_id(),
            request.email.clone(),
            request.name.clone(),
            request.role,
            request.school_id.clone(),
        );
        identity.class_id = request.class_id.clone();
        identity
    }

    pub fn has_permission(&self, permission: &str) -> bool {
        self.permissions.contains(permission)
    }
}

fn new_identity_id() -> String {
    CUID.create_id()
}
