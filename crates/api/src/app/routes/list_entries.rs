use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use catalog_model::{BulkLinkRequest, LinkRequest, MoveRequest, SearchCriteria};

use crate::app::errors;
use crate::app::services::AppServices;
use crate::context::PrincipalContext;

pub async fn search(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(criteria): Json<SearchCriteria>,
) -> axum::response::Response {
    match services.for_principal(&principal).search(&criteria).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn create_links(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(links): Json<Vec<LinkRequest>>,
) -> axum::response::Response {
    match services.for_principal(&principal).create_links(&links).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn bulk_create_links(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(request): Json<BulkLinkRequest>,
) -> axum::response::Response {
    match services.for_principal(&principal).bulk_create_links(&request).await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn delete_links(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(links): Json<Vec<LinkRequest>>,
) -> axum::response::Response {
    match services.for_principal(&principal).delete_links(&links).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn move_entries(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(request): Json<MoveRequest>,
) -> axum::response::Response {
    match services.for_principal(&principal).move_entries(&request).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

pub async fn delete(
    Extension(services): Extension<Arc<AppServices>>,
    Extension(principal): Extension<PrincipalContext>,
    Json(criteria): Json<SearchCriteria>,
) -> axum::response::Response {
    match services.for_principal(&principal).delete_by_criteria(&criteria).await {
        Ok(_) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}
