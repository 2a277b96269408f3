use async_trait::async_trait;
use tracing::debug;

use catalog_auth::{CatalogPermission, Principal, authorize_catalogs, authorize_optional_catalog};
use catalog_core::AdapterError;

use super::r#trait::{AuthorizationGate, AuthorizationSubject};

/// Gate backed by a resolved `Principal` and the role/scope policy in
/// `catalog-auth`.
///
/// - criteria and move requests are checked against the catalog they name
///   (no catalog means every catalog); explicit `object_ids` in criteria are
///   not resolved here, so they are only as restricted as the named catalog
/// - loaded entries are checked against each entity's owning catalog, which
///   for a move means the catalogs the entries leave
#[derive(Debug, Clone)]
pub struct PrincipalGate {
    principal: Principal,
}

impl PrincipalGate {
    pub fn new(principal: Principal) -> Self {
        Self { principal }
    }

    pub fn principal(&self) -> &Principal {
        &self.principal
    }
}

#[async_trait]
impl AuthorizationGate for PrincipalGate {
    async fn authorize(
        &self,
        subject: AuthorizationSubject<'_>,
        permission: CatalogPermission,
    ) -> Result<bool, AdapterError> {
        let required = permission.permission();
        let decision = match subject {
            AuthorizationSubject::Criteria(criteria) => {
                authorize_optional_catalog(&self.principal, &required, criteria.catalog_id.as_ref())
            }
            AuthorizationSubject::Entries(entries) => {
                authorize_catalogs(&self.principal, &required, entries.catalog_ids())
            }
            AuthorizationSubject::Move(request) => {
                authorize_optional_catalog(&self.principal, &required, request.catalog_id.as_ref())
            }
        };

        match decision {
            Ok(()) => Ok(true),
            Err(reason) => {
                debug!(principal_id = %self.principal.principal_id, %reason, "principal gate refused");
                Ok(false)
            }
        }
    }
}
