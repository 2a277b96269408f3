use catalog_auth::{CatalogMembership, CatalogScope, Principal, PrincipalId, Role};

/// Principal context for a request (authenticated identity, roles, catalog scope).
///
/// Inserted by the principal middleware; present for every `/api` route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrincipalContext {
    principal_id: PrincipalId,
    roles: Vec<Role>,
    scope: CatalogScope,
}

impl PrincipalContext {
    pub fn new(principal_id: PrincipalId, roles: Vec<Role>, scope: CatalogScope) -> Self {
        Self {
            principal_id,
            roles,
            scope,
        }
    }

    pub fn principal_id(&self) -> PrincipalId {
        self.principal_id
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn scope(&self) -> &CatalogScope {
        &self.scope
    }

    /// Resolve roles into effective permissions for authorization.
    pub fn to_principal(&self) -> Principal {
        Principal {
            principal_id: self.principal_id,
            membership: CatalogMembership::from_roles(self.roles.clone(), self.scope.clone()),
        }
    }
}
