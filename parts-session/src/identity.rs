//! Identity gateway.
//!
//! Login, registration and the admin approval workflow over two opaque
//! ports: an [`IdentityProvider`] that checks credentials and a
//! [`DocumentStore`] that keeps identity documents.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use catalog::{brand_by_name, AccessScope, CatalogError, Role};

use crate::config::BootstrapConfig;

/// Error types for identity documents.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    /// No document for this uid
    #[error("Identity not found: {0}")]
    NotFound(String),

    /// Acting identity may not perform this operation
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Allow-list names a brand outside the catalogue
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Underlying store failed
    #[error("Store error: {0}")]
    Store(String),
}

/// Error types for authentication.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    /// Identifier or secret wrong
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Identifier already registered
    #[error("Identifier already registered: {0}")]
    IdentifierTaken(String),

    /// Identity exists but is waiting for admin approval
    #[error("Account is waiting for administrator approval")]
    NotApproved,

    /// Provider failed
    #[error("Identity provider error: {0}")]
    Provider(String),

    /// Document store failed
    #[error(transparent)]
    Store(#[from] IdentityError),
}

/// Profile data entered at registration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub username: String,
    pub email: String,
}

impl Profile {
    /// Placeholder profile for an account whose document went missing.
    ///
    /// The username is the identifier's local part, or `user` if it has none.
    pub fn recovered(identifier: &str) -> Self {
        let identifier = identifier.trim();
        let username = identifier
            .split('@')
            .next()
            .filter(|local| !local.is_empty())
            .unwrap_or("user");

        Self {
            name: "Yeni Kullanıcı".to_string(),
            username: username.to_string(),
            email: identifier.to_string(),
        }
    }
}

/// An identity document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Provider-assigned id, the document key
    pub uid: String,
    #[serde(default)]
    pub profile: Profile,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub approved: bool,
    /// Brands a standard identity may open; empty means all
    #[serde(default)]
    pub allowed_brands: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl Identity {
    /// Fresh unapproved standard identity.
    pub fn pending(uid: impl Into<String>, profile: Profile) -> Self {
        Self {
            uid: uid.into(),
            profile,
            role: Role::Standard,
            approved: false,
            allowed_brands: Vec::new(),
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// Access filter input for this identity.
    pub fn scope(&self) -> AccessScope {
        AccessScope {
            role: self.role,
            allowed_brands: self.allowed_brands.clone(),
        }
    }
}

/// Partial update of an identity document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityPatch {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub approved: Option<bool>,
    pub allowed_brands: Option<Vec<String>>,
}

impl IdentityPatch {
    pub fn apply(&self, identity: &mut Identity) {
        if let Some(name) = &self.name {
            identity.profile.name = name.clone();
        }
        if let Some(username) = &self.username {
            identity.profile.username = username.clone();
        }
        if let Some(email) = &self.email {
            identity.profile.email = email.clone();
        }
        if let Some(role) = self.role {
            identity.role = role;
        }
        if let Some(approved) = self.approved {
            identity.approved = approved;
        }
        if let Some(brands) = &self.allowed_brands {
            identity.allowed_brands = brands.clone();
        }
    }
}

/// Self-service profile fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
}

impl From<ProfileUpdate> for IdentityPatch {
    fn from(update: ProfileUpdate) -> Self {
        Self {
            name: update.name,
            username: update.username,
            email: update.email,
            ..Default::default()
        }
    }
}

/// Credential checking port.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Check credentials and return the uid.
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<String, AuthError>;

    /// Create credentials and return the new uid.
    async fn register(&self, identifier: &str, secret: &str) -> Result<String, AuthError>;
}

/// Identity document port.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn get(&self, uid: &str) -> Result<Option<Identity>, IdentityError>;

    async fn set(&self, identity: Identity) -> Result<(), IdentityError>;

    /// Apply a patch and return the updated document.
    async fn update(&self, uid: &str, patch: &IdentityPatch) -> Result<Identity, IdentityError>;

    async fn list(&self) -> Result<Vec<Identity>, IdentityError>;
}

/// Login, registration and admin operations.
pub struct IdentityGateway {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn DocumentStore>,
    bootstrap_admin: Option<String>,
}

impl IdentityGateway {
    pub fn new(provider: Arc<dyn IdentityProvider>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            provider,
            store,
            bootstrap_admin: None,
        }
    }

    /// Apply the admin bootstrap setting.
    pub fn with_bootstrap(mut self, bootstrap: &BootstrapConfig) -> Self {
        self.bootstrap_admin = bootstrap
            .admin_identifier
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase);
        self
    }

    /// Register a new identity. It starts unapproved with no allow-list.
    pub async fn register(&self, identifier: &str, secret: &str, profile: Profile) -> Result<Identity, AuthError> {
        let uid = self.provider.register(identifier, secret).await?;
        let identity = Identity::pending(uid, profile);
        self.store.set(identity.clone()).await?;

        info!(uid = %identity.uid, "Registered identity, awaiting approval");
        Ok(identity)
    }

    /// Authenticate and load the identity document.
    ///
    /// A missing document is recreated as a pending identity. Unapproved
    /// non-admin identities are rejected.
    pub async fn login(&self, identifier: &str, secret: &str) -> Result<Identity, AuthError> {
        let uid = self.provider.authenticate(identifier, secret).await?;

        let mut identity = match self.store.get(&uid).await? {
            Some(identity) => identity,
            None => {
                warn!(uid = %uid, "Identity document missing, recreating");
                let identity = Identity::pending(uid.clone(), Profile::recovered(identifier));
                self.store.set(identity.clone()).await?;
                identity
            }
        };

        if self.is_bootstrap_admin(identifier) && !(identity.approved && identity.is_admin()) {
            let patch = IdentityPatch {
                role: Some(Role::Admin),
                approved: Some(true),
                ..Default::default()
            };
            identity = self.store.update(&uid, &patch).await?;
            info!(uid = %uid, "Bootstrap admin promoted");
        }

        if !identity.approved && !identity.is_admin() {
            info!(uid = %uid, "Login rejected, identity not approved");
            return Err(AuthError::NotApproved);
        }

        Ok(identity)
    }

    fn is_bootstrap_admin(&self, identifier: &str) -> bool {
        self.bootstrap_admin
            .as_deref()
            .is_some_and(|admin| admin == identifier.trim().to_lowercase())
    }

    /// All identities.
    pub async fn list_all(&self, actor: &Identity) -> Result<Vec<Identity>, IdentityError> {
        self.require_admin(actor).await?;
        self.store.list().await
    }

    /// Identities waiting for approval.
    pub async fn list_pending(&self, actor: &Identity) -> Result<Vec<Identity>, IdentityError> {
        self.require_admin(actor).await?;
        Ok(self
            .store
            .list()
            .await?
            .into_iter()
            .filter(|i| !i.approved)
            .collect())
    }

    pub async fn approve(&self, actor: &Identity, uid: &str) -> Result<Identity, IdentityError> {
        self.admin_update(
            actor,
            uid,
            IdentityPatch {
                approved: Some(true),
                ..Default::default()
            },
        )
        .await
    }

    pub async fn set_role(&self, actor: &Identity, uid: &str, role: Role) -> Result<Identity, IdentityError> {
        self.admin_update(
            actor,
            uid,
            IdentityPatch {
                role: Some(role),
                ..Default::default()
            },
        )
        .await
    }

    /// Replace the brand allow-list. Every name must be a catalogue brand.
    pub async fn set_allowed_brands(
        &self,
        actor: &Identity,
        uid: &str,
        brands: Vec<String>,
    ) -> Result<Identity, IdentityError> {
        for brand in &brands {
            brand_by_name(brand).ok_or_else(|| CatalogError::UnknownBrand(brand.clone()))?;
        }
        self.admin_update(
            actor,
            uid,
            IdentityPatch {
                allowed_brands: Some(brands),
                ..Default::default()
            },
        )
        .await
    }

    /// Self-service profile edit. Admins may edit anyone.
    pub async fn update_profile(
        &self,
        actor: &Identity,
        uid: &str,
        update: ProfileUpdate,
    ) -> Result<Identity, IdentityError> {
        if actor.uid != uid {
            self.require_admin(actor).await?;
        }
        self.store.update(uid, &IdentityPatch::from(update)).await
    }

    async fn admin_update(&self, actor: &Identity, uid: &str, patch: IdentityPatch) -> Result<Identity, IdentityError> {
        self.require_admin(actor).await?;
        let updated = self.store.update(uid, &patch).await?;
        info!(actor = %actor.uid, uid = %uid, "Identity updated by admin");
        Ok(updated)
    }

    /// Check the acting identity's current stored role.
    async fn require_admin(&self, actor: &Identity) -> Result<(), IdentityError> {
        let current = self
            .store
            .get(&actor.uid)
            .await?
            .ok_or_else(|| IdentityError::NotFound(actor.uid.clone()))?;
        if current.is_admin() {
            Ok(())
        } else {
            Err(IdentityError::Forbidden(format!("{} is not an admin", actor.uid)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{InMemoryDocumentStore, InMemoryIdentityProvider};

    fn gateway(bootstrap: Option<&str>) -> (IdentityGateway, Arc<InMemoryDocumentStore>) {
        let store = Arc::new(InMemoryDocumentStore::new());
        let gateway = IdentityGateway::new(Arc::new(InMemoryIdentityProvider::new()), store.clone())
            .with_bootstrap(&BootstrapConfig {
                admin_identifier: bootstrap.map(str::to_string),
            });
        (gateway, store)
    }

    fn profile(email: &str) -> Profile {
        Profile {
            name: "Ayşe".to_string(),
            username: "ayse".to_string(),
            email: email.to_string(),
        }
    }

    #[tokio::test]
    async fn test_registered_identity_waits_for_approval() {
        let (gateway, _) = gateway(None);
        let identity = gateway.register("a@example.com", "secret", profile("a@example.com")).await.unwrap();

        assert!(!identity.approved);
        assert_eq!(identity.role, Role::Standard);
        assert!(identity.allowed_brands.is_empty());
        assert_eq!(
            gateway.login("a@example.com", "secret").await.unwrap_err(),
            AuthError::NotApproved
        );
    }

    #[tokio::test]
    async fn test_invalid_credentials() {
        let (gateway, _) = gateway(None);
        gateway.register("a@example.com", "secret", profile("a@example.com")).await.unwrap();

        assert_eq!(
            gateway.login("a@example.com", "wrong").await.unwrap_err(),
            AuthError::InvalidCredentials
        );
        assert!(matches!(
            gateway.register("A@example.com", "x", Profile::default()).await,
            Err(AuthError::IdentifierTaken(_))
        ));
    }

    #[tokio::test]
    async fn test_bootstrap_admin_promoted() {
        let (gateway, _) = gateway(Some("Root@Example.com"));
        gateway.register("root@example.com", "pw", profile("root@example.com")).await.unwrap();

        let admin = gateway.login("root@example.com", "pw").await.unwrap();
        assert!(admin.approved);
        assert!(admin.is_admin());
    }

    #[tokio::test]
    async fn test_no_bootstrap_by_default() {
        let (gateway, _) = gateway(None);
        gateway.register("root@example.com", "pw", profile("root@example.com")).await.unwrap();
        assert!(gateway.login("root@example.com", "pw").await.is_err());
    }

    #[tokio::test]
    async fn test_missing_document_self_heals() {
        let provider = Arc::new(InMemoryIdentityProvider::new());
        let store = Arc::new(InMemoryDocumentStore::new());
        let uid = provider.register("b@example.com", "pw").await.unwrap();
        let gateway = IdentityGateway::new(provider, store.clone());

        assert_eq!(gateway.login("b@example.com", "pw").await.unwrap_err(), AuthError::NotApproved);

        let healed = store.get(&uid).await.unwrap().unwrap();
        assert!(!healed.approved);
        assert_eq!(healed.profile.email, "b@example.com");
        assert_eq!(healed.profile.username, "b");
        assert_eq!(healed.profile.name, "Yeni Kullanıcı");
    }

    #[test]
    fn test_recovered_profile_username() {
        assert_eq!(Profile::recovered("Ayse.K@example.com").username, "Ayse.K");
        assert_eq!(Profile::recovered("@example.com").username, "user");
        assert_eq!(Profile::recovered("").username, "user");
    }

    #[tokio::test]
    async fn test_admin_workflow() {
        let (gateway, _) = gateway(Some("root@example.com"));
        gateway.register("root@example.com", "pw", profile("root@example.com")).await.unwrap();
        let admin = gateway.login("root@example.com", "pw").await.unwrap();
        let user = gateway.register("u@example.com", "pw", profile("u@example.com")).await.unwrap();

        let pending = gateway.list_pending(&admin).await.unwrap();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].uid, user.uid);

        gateway.approve(&admin, &user.uid).await.unwrap();
        let restricted = gateway
            .set_allowed_brands(&admin, &user.uid, vec!["BMW".to_string()])
            .await
            .unwrap();
        assert_eq!(restricted.allowed_brands, vec!["BMW".to_string()]);
        assert!(matches!(
            gateway.set_allowed_brands(&admin, &user.uid, vec!["Lada".to_string()]).await,
            Err(IdentityError::Catalog(_))
        ));

        let logged_in = gateway.login("u@example.com", "pw").await.unwrap();
        assert!(catalog::is_blocked("Audi", &logged_in.scope()));

        assert_eq!(gateway.list_all(&admin).await.unwrap().len(), 2);
        let promoted = gateway.set_role(&admin, &user.uid, Role::Admin).await.unwrap();
        assert!(!catalog::is_blocked("Audi", &promoted.scope()));
    }

    #[tokio::test]
    async fn test_standard_identity_cannot_administer() {
        let (gateway, store) = gateway(None);
        let user = gateway.register("u@example.com", "pw", profile("u@example.com")).await.unwrap();
        let other = gateway.register("o@example.com", "pw", profile("o@example.com")).await.unwrap();

        assert!(matches!(
            gateway.approve(&user, &user.uid).await,
            Err(IdentityError::Forbidden(_))
        ));
        assert!(matches!(gateway.list_all(&user).await, Err(IdentityError::Forbidden(_))));

        // a stale snapshot claiming admin is not trusted
        let mut forged = user.clone();
        forged.role = Role::Admin;
        assert!(gateway.approve(&forged, &other.uid).await.is_err());
        assert!(!store.get(&other.uid).await.unwrap().unwrap().approved);
    }

    #[tokio::test]
    async fn test_profile_update() {
        let (gateway, _) = gateway(None);
        let user = gateway.register("u@example.com", "pw", profile("u@example.com")).await.unwrap();
        let other = gateway.register("o@example.com", "pw", profile("o@example.com")).await.unwrap();

        let update = ProfileUpdate {
            name: Some("Ayşe Yılmaz".to_string()),
            ..Default::default()
        };
        let updated = gateway.update_profile(&user, &user.uid, update.clone()).await.unwrap();
        assert_eq!(updated.profile.name, "Ayşe Yılmaz");
        assert_eq!(updated.profile.username, "ayse");
        assert!(!updated.approved);

        assert!(matches!(
            gateway.update_profile(&user, &other.uid, update).await,
            Err(IdentityError::Forbidden(_))
        ));
    }
}
