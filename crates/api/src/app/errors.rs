use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use catalog_core::CatalogError;

pub fn catalog_error_to_response(err: CatalogError) -> axum::response::Response {
    match err {
        CatalogError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        CatalogError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        CatalogError::AuthorizationDenied(permission) => json_error(
            StatusCode::FORBIDDEN,
            "forbidden",
            format!("missing permission '{permission}'"),
        ),
        err @ CatalogError::NotFound { .. } => {
            json_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
        }
        CatalogError::Adapter(e) => {
            tracing::error!(error = %e, "adapter failure");
            json_error(StatusCode::BAD_GATEWAY, "adapter_error", e.to_string())
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::AdapterError;

    #[test]
    fn errors_map_to_status_codes() {
        let cases = [
            (CatalogError::validation("x"), StatusCode::BAD_REQUEST),
            (CatalogError::invalid_id("x"), StatusCode::BAD_REQUEST),
            (CatalogError::denied("catalog:read"), StatusCode::FORBIDDEN),
            (CatalogError::not_found("product", "p-1"), StatusCode::NOT_FOUND),
            (
                CatalogError::Adapter(AdapterError::Index("down".into())),
                StatusCode::BAD_GATEWAY,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(catalog_error_to_response(err).status(), status);
        }
    }
}
