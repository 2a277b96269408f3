//! `catalog-auth`: pure authorization policy for catalog operations.
//!
//! Decoupled from HTTP and storage: callers resolve a `Principal`, this crate
//! decides whether a permission holds for a set of catalogs.

pub mod authorize;
pub mod permissions;
pub mod principal;
pub mod roles;

pub use authorize::{AuthzError, Principal, authorize, authorize_catalogs, authorize_optional_catalog};
pub use permissions::{CatalogPermission, Permission};
pub use principal::{CatalogMembership, CatalogScope, PrincipalId};
pub use roles::Role;
