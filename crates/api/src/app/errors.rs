use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use catalog_core::DomainError;
use catalog_infra::CatalogError;

pub fn catalog_error_to_response(err: CatalogError) -> Response {
    match err {
        CatalogError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, "validation_error", msg),
        CatalogError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "product not found"),
        CatalogError::Store(e) => {
            tracing::error!(error = %e, "product store failure");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "store_error", e.to_string())
        }
    }
}

pub fn domain_error_to_response(err: DomainError) -> Response {
    match err {
        DomainError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        other => catalog_error_to_response(other.into()),
    }
}

/// Body extraction failures: a missing/wrong content type is 415, anything
/// unparseable is a plain validation error.
pub fn json_rejection_to_response(rejection: JsonRejection) -> Response {
    match rejection {
        JsonRejection::MissingJsonContentType(_) => json_error(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "unsupported_media_type",
            "Content-Type must be application/json",
        ),
        other => json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            format!(
                "Invalid product: body of request contained bad or no data: {}",
                other.body_text()
            ),
        ),
    }
}

pub fn json_error(status: StatusCode, code: &'static str, message: impl Into<String>) -> Response {
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

    #[test]
    fn maps_catalog_errors_to_status_codes() {
        let cases = [
            (CatalogError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (CatalogError::NotFound, StatusCode::NOT_FOUND),
            (
                CatalogError::Store(catalog_infra::StoreError::Poisoned),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(catalog_error_to_response(err).status(), status);
        }
    }

    #[test]
    fn invalid_id_is_a_bad_request() {
        let resp = domain_error_to_response(DomainError::invalid_id("ProductId: nope"));
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
