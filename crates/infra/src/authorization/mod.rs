//! Authorization port consulted before every list-entry operation.

pub mod principal_gate;
pub mod r#trait;

pub use principal_gate::PrincipalGate;
pub use r#trait::{AuthorizationGate, AuthorizationSubject};

use tracing::warn;

use catalog_auth::CatalogPermission;
use catalog_core::{CatalogError, CatalogResult};

/// Ask `gate` about `subject`, turning a refusal into `AuthorizationDenied`.
///
/// Gate failures are adapter errors, not denials.
pub async fn ensure_authorized(
    gate: &dyn AuthorizationGate,
    subject: AuthorizationSubject<'_>,
    permission: CatalogPermission,
) -> CatalogResult<()> {
    if gate.authorize(subject, permission).await? {
        Ok(())
    } else {
        warn!(%permission, subject = subject.describe(), "authorization denied");
        Err(CatalogError::denied(permission.to_string()))
    }
}
