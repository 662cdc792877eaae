use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Permission tokens checked by view gating.
pub mod permissions {
    pub const MANAGE_USERS: &str = "manage_users";
    pub const MANAGE_SCHOOL: &str = "manage_school";
    pub const VIEW_ALL: &str = "view_all";
    pub const MANAGE_PAYMENTS: &str = "manage_payments";
    pub const MANAGE_TRANSPORT: &str = "manage_transport";
    pub const MANAGE_CLASSES: &str = "manage_classes";
    pub const VIEW_STUDENTS: &str = "view_students";
    pub const MANAGE_GRADES: &str = "manage_grades";
    pub const VIEW_SCHEDULE: &str = "view_schedule";
    pub const VIEW_CHILD_INFO: &str = "view_child_info";
    pub const VIEW_PAYMENTS: &str = "view_payments";
    pub const VIEW_OWN_INFO: &str = "view_own_info";
    pub const VIEW_GRADES: &str = "view_grades";
}

/// Closed set of roles a school account can hold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Teacher,
    Parent,
    Student,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

impl Role {
    pub const ALL: [Role; 4] = [Role::Admin, Role::Teacher, Role::Parent, Role::Student];

    /// Permissions granted to every account created with this role.
    pub fn default_permissions(self) -> &'static [&'static str] {
        use permissions::*;

        match self {
            Role::Admin => &[
                MANAGE_USERS,
                MANAGE_SCHOOL,
                VIEW_ALL,
                MANAGE_PAYMENTS,
                MANAGE_TRANSPORT,
            ],
            Role::Teacher => &[MANAGE_CLASSES, VIEW_STUDENTS, MANAGE_GRADES, VIEW_SCHEDULE],
            Role::Parent => &[VIEW_CHILD_INFO, VIEW_PAYMENTS, VIEW_SCHEDULE],
            Role::Student => &[VIEW_OWN_INFO, VIEW_SCHEDULE, VIEW_GRADES],
        }
    }

    /// Display label shown on login and registration screens.
    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrateur",
            Role::Teacher => "Professeur",
            Role::Parent => "Parent",
            Role::Student => "Élève",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Teacher => "teacher",
            Role::Parent => "parent",
            Role::Student => "student",
        }
    }

    /// Whether accounts of this role are attached to a class.
    pub fn has_class(self) -> bool {
        matches!(self, Role::Teacher | Role::Student)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = ParseRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "admin" => Ok(Role::Admin),
            "teacher" => Ok(Role::Teacher),
            "parent" => Ok(Role::Parent),
            "student" => Ok(Role::Student),
            _ => Err(ParseRoleError(s.to_string())),
        }
    }
}
