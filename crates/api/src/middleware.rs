use axum::{
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use catalog_auth::{CatalogScope, PrincipalId, Role};
use catalog_core::CatalogId;

use crate::context::PrincipalContext;

pub const PRINCIPAL_ID_HEADER: &str = "x-principal-id";
pub const PRINCIPAL_ROLES_HEADER: &str = "x-principal-roles";
pub const PRINCIPAL_CATALOGS_HEADER: &str = "x-principal-catalogs";

/// Resolve the caller from headers set by the authenticating gateway.
///
/// - `x-principal-id`: UUID, required
/// - `x-principal-roles`: comma separated role names
/// - `x-principal-catalogs`: comma separated catalog ids; absent or `*` means all
pub async fn principal_middleware(
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let principal = extract_principal(req.headers())?;
    req.extensions_mut().insert(principal);
    Ok(next.run(req).await)
}

fn header<'a>(headers: &'a HeaderMap, name: &str) -> Result<Option<&'a str>, StatusCode> {
    headers
        .get(name)
        .map(|v| v.to_str().map_err(|_| StatusCode::UNAUTHORIZED))
        .transpose()
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn extract_principal(headers: &HeaderMap) -> Result<PrincipalContext, StatusCode> {
    let principal_id: PrincipalId = header(headers, PRINCIPAL_ID_HEADER)?
        .ok_or(StatusCode::UNAUTHORIZED)?
        .trim()
        .parse()
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let roles = header(headers, PRINCIPAL_ROLES_HEADER)?
        .map(|raw| split_list(raw).map(|r| Role::new(r.to_string())).collect())
        .unwrap_or_default();

    let scope = match header(headers, PRINCIPAL_CATALOGS_HEADER)?.map(str::trim) {
        None | Some("*") => CatalogScope::All,
        Some(raw) => CatalogScope::only(split_list(raw).map(CatalogId::from)),
    };

    Ok(PrincipalContext::new(principal_id, roles, scope))
}
