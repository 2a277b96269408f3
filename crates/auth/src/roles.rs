use std::borrow::Cow;

use serde::{Deserialize, Serialize};

use crate::permissions::{CatalogPermission, Permission};

/// Role identifier used for RBAC.
///
/// Roles are opaque strings; `Role::permissions` is the built-in mapping used
/// when no external policy source is configured.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(Cow<'static, str>);

impl Role {
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Permissions granted by this role. Unknown roles grant nothing.
    pub fn permissions(&self) -> Vec<Permission> {
        use CatalogPermission::*;

        let granted: &[CatalogPermission] = match self.as_str() {
            "admin" => return vec![Permission::WILDCARD],
            "catalog-manager" => &[Read, Update, Delete],
            "catalog-editor" => &[Read, Update],
            "catalog-viewer" => &[Read],
            _ => &[],
        };
        granted.iter().map(|p| p.permission()).collect()
    }
}

impl core::fmt::Display for Role {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
