//! View gating by role and permission.

use serde::{Deserialize, Serialize};

use super::auth_service::AuthService;
use crate::entities::Role;

/// What a gated view demands of the signed-in identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequirement {
    pub role: Option<Role>,
    pub permission: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessDecision {
    /// Nobody is signed in; the login flow takes over.
    Unauthenticated,
    Granted,
    RoleDenied(Role),
    PermissionDenied(String),
}

impl AccessRequirement {
    pub fn role(role: Role) -> Self {
        Self {
            role: Some(role),
            permission: None,
        }
    }

    pub fn permission(permission: impl Into<String>) -> Self {
        Self {
            role: None,
            permission: Some(permission.into()),
        }
    }

    pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
        self.permission = Some(permission.into());
        self
    }

    /// Role is checked before permission.
    pub fn evaluate(&self, auth: &AuthService) -> AccessDecision {
        if !auth.is_authenticated() {
            return AccessDecision::Unauthenticated;
        }

        if let Some(role) = self.role {
            if !auth.is_role(role) {
                return AccessDecision::RoleDenied(role);
            }
        }

        if let Some(permission) = &self.permission {
            if !auth.has_permission(permission) {
                return AccessDecision::PermissionDenied(permission.clone());
            }
        }

        AccessDecision::Granted
    }
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }

    /// Title and body of the denial card, if access was refused.
    pub fn denial(&self) -> Option<(&'static str, String)> {
        match self {
            AccessDecision::Unauthenticated | AccessDecision::Granted => None,
            AccessDecision::RoleDenied(_) => Some((
                "Accès non autorisé",
                "Vous n'avez pas les permissions nécessaires pour accéder à cette section."
                    .to_string(),
            )),
            AccessDecision::PermissionDenied(permission) => Some((
                "Permission requise",
                format!(
                    "Vous n'avez pas la permission '{permission}' pour accéder à cette fonctionnalité."
                ),
            )),
        }
    }
}
