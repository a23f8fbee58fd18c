//! In-memory identity provider and document store.

use async_trait::async_trait;
use dashmap::DashMap;
use sha2::{Digest, Sha256};

use crate::identity::{AuthError, DocumentStore, Identity, IdentityError, IdentityPatch, IdentityProvider};

#[derive(Debug, Clone)]
struct Account {
    uid: String,
    secret_digest: String,
}

/// Credentials keyed by lowercased identifier; secrets kept as SHA-256 digests.
#[derive(Debug, Default)]
pub struct InMemoryIdentityProvider {
    accounts: DashMap<String, Account>,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute the salted digest of a secret
    fn digest(uid: &str, secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(uid.as_bytes());
        hasher.update(b":");
        hasher.update(secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn key(identifier: &str) -> String {
        identifier.trim().to_lowercase()
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<String, AuthError> {
        let account = self
            .accounts
            .get(&Self::key(identifier))
            .map(|a| a.value().clone())
            .ok_or(AuthError::InvalidCredentials)?;

        if Self::digest(&account.uid, secret) == account.secret_digest {
            Ok(account.uid)
        } else {
            Err(AuthError::InvalidCredentials)
        }
    }

    async fn register(&self, identifier: &str, secret: &str) -> Result<String, AuthError> {
        use dashmap::mapref::entry::Entry;

        let key = Self::key(identifier);
        if key.is_empty() {
            return Err(AuthError::Provider("identifier is empty".to_string()));
        }

        match self.accounts.entry(key) {
            Entry::Occupied(_) => Err(AuthError::IdentifierTaken(identifier.to_string())),
            Entry::Vacant(entry) => {
                let uid = uuid::Uuid::new_v4().to_string();
                entry.insert(Account {
                    secret_digest: Self::digest(&uid, secret),
                    uid: uid.clone(),
                });
                Ok(uid)
            }
        }
    }
}

/// Identity documents keyed by uid.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    documents: DashMap<String, Identity>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, uid: &str) -> Result<Option<Identity>, IdentityError> {
        Ok(self.documents.get(uid).map(|d| d.value().clone()))
    }

    async fn set(&self, identity: Identity) -> Result<(), IdentityError> {
        self.documents.insert(identity.uid.clone(), identity);
        Ok(())
    }

    async fn update(&self, uid: &str, patch: &IdentityPatch) -> Result<Identity, IdentityError> {
        let mut document = self
            .documents
            .get_mut(uid)
            .ok_or_else(|| IdentityError::NotFound(uid.to_string()))?;
        patch.apply(&mut document);
        Ok(document.clone())
    }

    async fn list(&self) -> Result<Vec<Identity>, IdentityError> {
        let mut all: Vec<Identity> = self.documents.iter().map(|d| d.value().clone()).collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.uid.cmp(&b.uid)));
        Ok(all)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::Profile;

    #[tokio::test]
    async fn test_secrets_are_not_stored_in_clear() {
        let provider = InMemoryIdentityProvider::new();
        provider.register("a@example.com", "hunter2").await.unwrap();

        let account = provider.accounts.get("a@example.com").unwrap();
        assert_eq!(account.secret_digest.len(), 64);
        assert!(!account.secret_digest.contains("hunter2"));
    }

    #[tokio::test]
    async fn test_identifier_is_case_insensitive() {
        let provider = InMemoryIdentityProvider::new();
        let uid = provider.register("A@Example.com", "pw").await.unwrap();
        assert_eq!(provider.authenticate("a@example.com ", "pw").await.unwrap(), uid);
        tokio_test::assert_err!(provider.authenticate("nobody@example.com", "pw").await);
    }

    #[tokio::test]
    async fn test_store_update() {
        let store = InMemoryDocumentStore::new();
        store.set(Identity::pending("u1", Profile::default())).await.unwrap();

        let patch = IdentityPatch {
            approved: Some(true),
            ..Default::default()
        };
        let updated = tokio_test::assert_ok!(store.update("u1", &patch).await);
        assert!(updated.approved);
        assert!(matches!(
            store.update("missing", &patch).await,
            Err(IdentityError::NotFound(_))
        ));
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
