// SPDX-License-Identifier: AGPL-3.0-or-later

//! Product endpoints. Listing is public; creation sits behind the
//! authentication and admin-role layers wired up in the router.

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::{
    auth::Auth,
    error::ApiError,
    models::{CreateProductRequest, Product},
    state::AppState,
    store::ProductRepository,
};

fn validate_create(req: &CreateProductRequest) -> Vec<String> {
    let mut issues = Vec::new();
    if req.name.trim().is_empty() {
        issues.push("name must not be empty".to_string());
    }
    if req.price < 0 {
        issues.push("price must not be negative".to_string());
    }
    if matches!(&req.sku, Some(sku) if sku.trim().is_empty()) {
        issues.push("sku must not be empty when provided".to_string());
    }
    issues
}

/// List all products, oldest first.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Catalog",
    responses(
        (status = 200, description = "All products", body = [Product]),
    )
)]
pub async fn list_products(State(state): State<AppState>) -> Result<Json<Vec<Product>>, ApiError> {
    let products = ProductRepository::list(&state.pool).await?;
    Ok(Json(products))
}

/// Create a product. Admin only.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = CreateProductRequest,
    tag = "Catalog",
    security(("bearer" = [])),
    responses(
        (status = 201, description = "Product created", body = Product),
        (status = 400, description = "Malformed input or unknown category"),
        (status = 401, description = "Missing or invalid session"),
        (status = 403, description = "Caller is not an admin"),
        (status = 409, description = "SKU already in use"),
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    Auth(user): Auth,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let issues = validate_create(&request);
    if !issues.is_empty() {
        return Err(ApiError::validation(issues));
    }

    let product = Product {
        id: Uuid::new_v4().to_string(),
        name: request.name,
        sku: request.sku,
        description: request.description,
        price: request.price,
        category_id: request.category_id,
        created_by: user.id,
        created_at: Utc::now(),
    };

    ProductRepository::insert(&state.pool, &product)
        .await
        .map_err(|e| {
            if e.is_unique_violation() {
                ApiError::conflict("A product with this SKU already exists")
            } else if e.is_foreign_key_violation() {
                ApiError::bad_request("Unknown category")
            } else {
                ApiError::from(e)
            }
        })?;

    Ok((StatusCode::CREATED, Json(product)))
}
