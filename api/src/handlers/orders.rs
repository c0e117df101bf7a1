//! Order handlers
//!
//! Endpoints for placing and viewing orders.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{NewOrder, Order, OrderId, OrderItem};
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderItemPayload {
    pub product_id: String,
    pub quantity: i64,
}

/// Request body for placing an order
#[derive(Debug, Deserialize)]
pub struct PlaceOrderRequest {
    pub user_id: String,
    pub items: Vec<OrderItemPayload>,
}

impl From<PlaceOrderRequest> for NewOrder {
    fn from(request: PlaceOrderRequest) -> Self {
        NewOrder::new(
            request.user_id,
            request
                .items
                .into_iter()
                .map(|item| OrderItem::new(item.product_id, item.quantity))
                .collect(),
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OrderResponse {
    pub id: String,
    pub user_id: String,
    pub items: Vec<OrderItemPayload>,
    pub total: f64,
    /// RFC 3339, UTC
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        OrderResponse {
            id: order.id.to_string(),
            user_id: order.user_id.to_string(),
            items: order
                .items
                .into_iter()
                .map(|item| OrderItemPayload {
                    product_id: item.product_id.to_string(),
                    quantity: item.quantity,
                })
                .collect(),
            total: order.total,
            created_at: order.created_at.to_rfc3339(),
        }
    }
}

/// GET /api/v1/orders
pub async fn list_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = state.order_service.list_orders().await?;
    Ok(Json(orders.into_iter().map(Into::into).collect()))
}

/// POST /api/v1/orders
///
/// Places an order, decrementing stock for every item.
pub async fn place_order(
    State(state): State<AppState>,
    payload: Result<Json<PlaceOrderRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    let Json(request) = payload?;
    let order = state.order_service.place_order(request.into()).await?;
    Ok((StatusCode::CREATED, Json(order.into())))
}

/// GET /api/v1/orders/:id
pub async fn get_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state.order_service.get_order(&OrderId::from(id)).await?;
    Ok(Json(order.into()))
}
