//! Demo accounts shipped with the dashboard.

use crate::entities::{Identity, Role};

/// Password accepted by the demo accounts.
pub const DEMO_PASSWORD: &str = "password123";

const DEFAULT_AVATAR: &str = "/placeholder.svg?height=40&width=40";
const SCHOOL_ID: &str = "school-1";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoAccount {
    pub role: Role,
    pub email: &'static str,
    pub password: &'static str,
}

impl DemoAccount {
    pub fn label(&self) -> &'static str {
        self.role.label()
    }
}

pub fn seed_identities() -> Vec<Identity> {
    let mut admin = Identity::with_role(
        "1",
        "admin@ecole.fr",
        "Administrateur Principal",
        Role::Admin,
        SCHOOL_ID,
    );
    admin.avatar = Some(DEFAULT_AVATAR.to_string());

    let mut teacher = Identity::with_role(
        "2",
        "pierre.moreau@ecole.fr",
        "Dr. Pierre Moreau",
        Role::Teacher,
        SCHOOL_ID,
    );
    teacher.avatar = Some(DEFAULT_AVATAR.to_string());
    teacher.class_id = Some("terminale-s".to_string());

    let mut parent = Identity::with_role(
        "3",
        "marie.dubois@parent.fr",
        "Marie Dubois",
        Role::Parent,
        SCHOOL_ID,
    );
    parent.avatar = Some(DEFAULT_AVATAR.to_string());
    parent.student_ids = Some(vec!["student-1".to_string()]);

    let mut student = Identity::with_role(
        "4",
        "emma.rousseau@student.fr",
        "Emma Rousseau",
        Role::Student,
        SCHOOL_ID,
    );
    student.avatar = Some(DEFAULT_AVATAR.to_string());
    student.class_id = Some("seconde".to_string());

    vec![admin, teacher, parent, student]
}

pub fn demo_accounts() -> Vec<DemoAccount> {
    [
        (Role::Admin, "admin@ecole.fr"),
        (Role::Teacher, "pierre.moreau@ecole.fr"),
        (Role::Parent, "marie.dubois@parent.fr"),
        (Role::Student, "emma.rousseau@student.fr"),
    ]
    .into_iter()
    .map(|(role, email)| DemoAccount {
        role,
        email,
        password: DEMO_PASSWORD,
    })
    .collect()
}
