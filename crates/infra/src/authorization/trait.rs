use async_trait::async_trait;

use catalog_auth::CatalogPermission;
use catalog_core::AdapterError;
use catalog_model::{LoadedEntries, MoveRequest, SearchCriteria};

/// What a permission is being checked against.
///
/// Mutations are authorized against the entities actually loaded, not the
/// ids the caller sent.
#[derive(Debug, Clone, Copy)]
pub enum AuthorizationSubject<'a> {
    Criteria(&'a SearchCriteria),
    Entries(&'a LoadedEntries),
    Move(&'a MoveRequest),
}

impl AuthorizationSubject<'_> {
    pub fn describe(&self) -> &'static str {
        match self {
            AuthorizationSubject::Criteria(_) => "criteria",
            AuthorizationSubject::Entries(_) => "entries",
            AuthorizationSubject::Move(_) => "move",
        }
    }
}

/// Decides whether the current caller holds `permission` for `subject`.
///
/// `Ok(false)` is a denial; `Err` means the decision could not be made.
#[async_trait]
pub trait AuthorizationGate: Send + Sync {
    async fn authorize(
        &self,
        subject: AuthorizationSubject<'_>,
        permission: CatalogPermission,
    ) -> Result<bool, AdapterError>;
}
