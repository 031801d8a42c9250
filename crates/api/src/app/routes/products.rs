use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Path, Query},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use tracing::instrument;

use catalog_infra::{catalog, CatalogResult, ProductStore};
use catalog_products::{Product, ProductFilter};

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", post(create_product).get(list_products))
        .route("/:id", get(get_product).put(update_product).delete(delete_product))
        .route("/name/:name", get(list_by_name))
        .route("/category/:category", get(list_by_category))
        .route("/availability/:available", get(list_by_availability))
        .route("/price/:price", get(list_by_price))
}

#[instrument(skip_all)]
pub async fn create_product(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };
    let mut product = match Product::from_mapping(&body) {
        Ok(p) => p,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let id = match catalog::create(services.store(), &mut product).await {
        Ok(id) => id,
        Err(e) => return errors::catalog_error_to_response(e),
    };

    (
        StatusCode::CREATED,
        [(header::LOCATION, dto::product_location(&headers, id))],
        Json(dto::product_to_json(&product)),
    )
        .into_response()
}

#[instrument(skip_all)]
pub async fn list_products(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::ListProductsQuery>,
) -> Response {
    let filter = match query.into_filter() {
        Ok(filter) => filter,
        Err(e) => return errors::domain_error_to_response(e),
    };
    list_response(select(services.store(), filter).await)
}

#[instrument(skip_all)]
pub async fn get_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match dto::parse_product_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    match catalog::find(services.store(), id).await {
        Ok(Some(product)) => Json(dto::product_to_json(&product)).into_response(),
        Ok(None) => errors::json_error(
            StatusCode::NOT_FOUND,
            "not_found",
            format!("Product with id '{id}' was not found."),
        ),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

/// Keys present in the body replace the stored values; omitted keys are kept.
#[instrument(skip_all)]
pub async fn update_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let id = match dto::parse_product_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return errors::json_rejection_to_response(rejection),
    };

    let mut product = match catalog::find(services.store(), id).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            return errors::json_error(
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Product with id '{id}' was not found."),
            )
        }
        Err(e) => return errors::catalog_error_to_response(e),
    };
    if let Err(e) = product.apply_changes(&body) {
        return errors::domain_error_to_response(e);
    }

    match catalog::update(services.store(), &product).await {
        Ok(()) => Json(dto::product_to_json(&product)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

#[instrument(skip_all)]
pub async fn delete_product(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> Response {
    let id = match dto::parse_product_id(&id) {
        Ok(id) => id,
        Err(e) => return errors::domain_error_to_response(e),
    };

    let product = match catalog::find(services.store(), id).await {
        Ok(Some(product)) => product,
        Ok(None) => {
            return errors::json_error(
                StatusCode::NOT_FOUND,
                "not_found",
                format!("Product with id '{id}' was not found."),
            )
        }
        Err(e) => return errors::catalog_error_to_response(e),
    };

    match catalog::delete(services.store(), &product).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}

#[instrument(skip_all)]
pub async fn list_by_name(
    Extension(services): Extension<Arc<AppServices>>,
    Path(name): Path<String>,
) -> Response {
    list_response(catalog::find_by_name(services.store(), &name).await)
}

#[instrument(skip_all)]
pub async fn list_by_category(
    Extension(services): Extension<Arc<AppServices>>,
    Path(category): Path<String>,
) -> Response {
    let category = match dto::parse_category(&category) {
        Ok(category) => category,
        Err(e) => return errors::domain_error_to_response(e),
    };
    list_response(catalog::find_by_category(services.store(), category).await)
}

#[instrument(skip_all)]
pub async fn list_by_availability(
    Extension(services): Extension<Arc<AppServices>>,
    Path(available): Path<String>,
) -> Response {
    let available = match dto::parse_availability(&available) {
        Ok(available) => available,
        Err(e) => return errors::domain_error_to_response(e),
    };
    list_response(catalog::find_by_availability(services.store(), available).await)
}

#[instrument(skip_all)]
pub async fn list_by_price(
    Extension(services): Extension<Arc<AppServices>>,
    Path(price): Path<String>,
) -> Response {
    list_response(catalog::find_by_price(services.store(), price).await)
}

async fn select(store: &dyn ProductStore, filter: ProductFilter) -> CatalogResult<Vec<Product>> {
    match filter {
        ProductFilter::All => catalog::all(store).await,
        ProductFilter::Name(name) => catalog::find_by_name(store, &name).await,
        ProductFilter::Category(category) => catalog::find_by_category(store, category).await,
        ProductFilter::Availability(available) => catalog::find_by_availability(store, available).await,
        ProductFilter::Price(price) => catalog::find_by_price(store, price).await,
    }
}

fn list_response(result: CatalogResult<Vec<Product>>) -> Response {
    match result {
        Ok(products) => Json(dto::products_to_json(&products)).into_response(),
        Err(e) => errors::catalog_error_to_response(e),
    }
}
