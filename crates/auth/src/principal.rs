use core::str::FromStr;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use catalog_core::CatalogId;

use crate::{Permission, Role};

/// Identity of an authenticated principal (human user, service account, etc).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(Uuid);

impl PrincipalId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PrincipalId {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for PrincipalId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::from_str(s)?))
    }
}

/// Catalogs a principal may act on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogScope {
    All,
    Only(BTreeSet<CatalogId>),
}

impl CatalogScope {
    pub fn only(catalogs: impl IntoIterator<Item = CatalogId>) -> Self {
        Self::Only(catalogs.into_iter().collect())
    }

    pub fn allows(&self, catalog_id: &CatalogId) -> bool {
        match self {
            CatalogScope::All => true,
            CatalogScope::Only(set) => set.contains(catalog_id),
        }
    }

    pub fn is_unrestricted(&self) -> bool {
        matches!(self, CatalogScope::All)
    }
}

/// Roles, effective permissions and catalog scope granted to a principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogMembership {
    pub roles: Vec<Role>,
    pub permissions: Vec<Permission>,
    pub scope: CatalogScope,
}

impl CatalogMembership {
    /// Membership whose permissions are derived from `roles`.
    pub fn from_roles(roles: Vec<Role>, scope: CatalogScope) -> Self {
        let mut permissions: Vec<Permission> = Vec::new();
        for perm in roles.iter().flat_map(Role::permissions) {
            if !permissions.contains(&perm) {
                permissions.push(perm);
            }
        }
        Self {
            roles,
            permissions,
            scope,
        }
    }
}
