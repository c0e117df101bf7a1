//! Product handlers
//!
//! Endpoints for catalog management.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Product, ProductDetails, ProductId};
use crate::error::AppError;
use crate::AppState;

/// Request body for creating or replacing a product
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub stock: i64,
}

impl From<ProductRequest> for ProductDetails {
    fn from(request: ProductRequest) -> Self {
        ProductDetails {
            name: request.name,
            description: request.description,
            price: request.price,
            stock: request.stock,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        ProductResponse {
            id: product.id.to_string(),
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
        }
    }
}

/// GET /api/v1/products
pub async fn list_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = state.product_service.list_products().await?;
    Ok(Json(products.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/products
pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    let Json(request) = payload?;
    let product = state.product_service.create_product(request.into()).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// GET /api/v1/products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = state
        .product_service
        .get_product(&ProductId::from(id))
        .await?;
    Ok(Json(product.into()))
}

/// PUT /api/v1/products/:id
///
/// Replaces name, description, price and stock wholesale.
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<ProductResponse>, AppError> {
    let Json(request) = payload?;
    let product = state
        .product_service
        .update_product(&ProductId::from(id), request.into())
        .await?;
    Ok(Json(product.into()))
}

/// DELETE /api/v1/products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state
        .product_service
        .delete_product(&ProductId::from(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
