//! In-memory identity directory owned by the auth service.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::entities::Identity;
use crate::seed::seed_identities;
use crate::types::{AuthError, AuthResult};

/// Authoritative collection of identities, unique by email.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    identities: Arc<RwLock<Vec<Identity>>>,
}

impl Directory {
    pub fn new(identities: Vec<Identity>) -> Self {
        Self {
            identities: Arc::new(RwLock::new(identities)),
        }
    }

    /// Directory holding the four demo accounts.
    pub fn seeded() -> Self {
        Self::new(seed_identities())
    }

    pub async fn find_by_email(&self, email: &str) -> Option<Identity> {
        let identities = self.identities.read().await;
        identities.iter().find(|i| i.email == email).cloned()
    }

    pub async fn email_exists(&self, email: &str) -> bool {
        self.find_by_email(email).await.is_some()
    }

    /// Append an identity; the email check and the append happen under one lock.
    pub async fn insert(&self, identity: Identity) -> AuthResult<()> {
        let mut identities = self.identities.write().await;
        if identities.iter().any(|i| i.email == identity.email) {
            return Err(AuthError::DuplicateEmail);
        }
        identities.push(identity);
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.identities.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Role;

    #[tokio::test]
    async fn seeded_directory_holds_demo_accounts() {
        let directory = Directory::seeded();

        assert_eq!(directory.len().await, 4);
        let teacher = directory
            .find_by_email("pierre.moreau@ecole.fr")
            .await
            .expect("teacher should be seeded");
        assert_eq!(teacher.role, Role::Teacher);
        assert_eq!(teacher.class_id.as_deref(), Some("terminale-s"));
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_email() {
        let directory = Directory::seeded();
        let duplicate = Identity::with_role("99", "admin@ecole.fr", "Copy", Role::Student, "school-1");

        assert_eq!(directory.insert(duplicate).await, Err(AuthError::DuplicateEmail));
        assert_eq!(directory.len().await, 4);
    }

    #[tokio::test]
    async fn email_lookup_is_exact() {
        let directory = Directory::seeded();

        assert!(directory.email_exists("admin@ecole.fr").await);
        assert!(!directory.email_exists("ADMIN@ecole.fr").await);
        assert!(!directory.email_exists(" admin@ecole.fr").await);
    }
}
