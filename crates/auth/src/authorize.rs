use std::collections::HashSet;

use thiserror::Error;

use catalog_core::CatalogId;

use crate::{CatalogMembership, Permission, PrincipalId};

/// A fully resolved principal for authorization decisions.
///
/// Construction is decoupled from transport: the API derives it from gateway
/// headers, workers may build it from configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    pub principal_id: PrincipalId,
    pub membership: CatalogMembership,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: missing permission '{0}'")]
    Forbidden(String),

    #[error("forbidden: catalog '{0}' is outside the principal's scope")]
    OutOfScope(CatalogId),

    #[error("forbidden: an unscoped request requires access to all catalogs")]
    ScopeRequired,
}

/// Check that `principal` holds `required` (or the wildcard).
///
/// - No IO
/// - No panics
pub fn authorize(principal: &Principal, required: &Permission) -> Result<(), AuthzError> {
    let perms: HashSet<&str> = principal
        .membership
        .permissions
        .iter()
        .map(|p| p.as_str())
        .collect();

    if perms.contains("*") || perms.contains(required.as_str()) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(required.as_str().to_string()))
    }
}

/// Check `required` and that every catalog in `catalogs` is within scope.
pub fn authorize_catalogs<'a>(
    principal: &Principal,
    required: &Permission,
    catalogs: impl IntoIterator<Item = &'a CatalogId>,
) -> Result<(), AuthzError> {
    authorize(principal, required)?;

    for catalog_id in catalogs {
        if !principal.membership.scope.allows(catalog_id) {
            return Err(AuthzError::OutOfScope(catalog_id.clone()));
        }
    }
    Ok(())
}

/// Check `required` for a request that may not name a catalog.
///
/// A request without a catalog filter spans every catalog, so it is only
/// allowed for principals with an unrestricted scope.
pub fn authorize_optional_catalog(
    principal: &Principal,
    required: &Permission,
    catalog_id: Option<&CatalogId>,
) -> Result<(), AuthzError> {
    match catalog_id {
        Some(id) => authorize_catalogs(principal, required, [id]),
        None => {
            authorize(principal, required)?;
            if principal.membership.scope.is_unrestricted() {
                Ok(())
            } else {
                Err(AuthzError::ScopeRequired)
            }
        }
    }
}
