use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use sha2::{Digest, Sha256};
use std::convert::Infallible;
use subtle::ConstantTimeEq;
use tracing::{debug, warn};

use crate::{config::AdminConfig, error::ApiError, state::AppState};

pub const ADMIN_KEY_HEADER: &str = "x-admin-key";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    View,
    Sync,
}

/// Roles granted to one presented credential. Empty means rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoleSet {
    view: bool,
    sync: bool,
}

impl RoleSet {
    pub fn contains(&self, role: Role) -> bool {
        match role {
            Role::View => self.view,
            Role::Sync => self.sync,
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.view && !self.sync
    }
}

/// Configured admin secrets.
#[derive(Debug, Clone)]
pub struct AdminKeys {
    view: Option<String>,
    sync: Option<String>,
}

impl FromRef<AppState> for AdminKeys {
    fn from_ref(state: &AppState) -> Self {
        AdminKeys::from(&state.config.admin)
    }
}

impl From<&AdminConfig> for AdminKeys {
    fn from(cfg: &AdminConfig) -> Self {
        Self {
            view: cfg.view_key.clone(),
            sync: cfg.sync_key.clone(),
        }
    }
}

impl AdminKeys {
    pub fn resolve(&self, credential: &str) -> RoleSet {
        if credential.is_empty() {
            return RoleSet::default();
        }
        // Digests first so the comparison runs over equal lengths.
        let presented = Sha256::digest(credential.as_bytes());
        let matches = |key: &Option<String>| {
            key.as_deref().is_some_and(|k| {
                bool::from(Sha256::digest(k.as_bytes()).as_slice().ct_eq(presented.as_slice()))
            })
        };
        RoleSet {
            view: matches(&self.view),
            sync: matches(&self.sync),
        }
    }
}

/// Roles of the caller, resolved from the `x-admin-key` header on every
/// request. Resolution never rejects; operations check the role they need.
#[derive(Debug, Clone, Copy)]
pub struct AdminCaller(pub RoleSet);

impl AdminCaller {
    pub fn require(&self, role: Role) -> Result<(), ApiError> {
        if self.0.contains(role) {
            Ok(())
        } else {
            debug!(?role, "admin role check failed");
            Err(ApiError::Unauthorized)
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AdminCaller
where
    S: Send + Sync,
    AdminKeys: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = AdminKeys::from_ref(state);
        let credential = parts
            .headers
            .get(ADMIN_KEY_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");
        let roles = keys.resolve(credential);
        if roles.is_empty() && !credential.is_empty() {
            warn!("unrecognized admin credential");
        }
        Ok(AdminCaller(roles))
    }
}
