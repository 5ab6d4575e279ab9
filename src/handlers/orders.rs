use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{money, Orders, PageParams, PageResponse};
use crate::domain::order::{CartLine, OrderView, PlaceOrder, DEFAULT_PAYMENT_METHOD};
use crate::errors::AppError;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub customer_id: Uuid,
    /// Employee of record for the sale.
    pub employee_id: Uuid,
    /// Defaults to "Credit".
    pub payment_method: Option<String>,
    #[serde(default)]
    pub items: Vec<CartItemRequest>,
}

impl From<PlaceOrderRequest> for PlaceOrder {
    fn from(r: PlaceOrderRequest) -> Self {
        PlaceOrder {
            customer_id: r.customer_id,
            employee_id: r.employee_id,
            payment_method: r
                .payment_method
                .unwrap_or_else(|| DEFAULT_PAYMENT_METHOD.to_string()),
            items: r
                .items
                .into_iter()
                .map(|i| CartLine {
                    product_id: i.product_id,
                    quantity: i.quantity,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderResponse {
    pub order_id: Uuid,
    /// Decimal string, e.g. "70.00".
    pub total_amount: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineResponse {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: Option<String>,
    pub quantity: i32,
    pub unit_price: String,
    pub subtotal: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub employee_id: Uuid,
    pub payment_method: String,
    pub status: String,
    pub total_amount: String,
    pub placed_at: String,
    pub lines: Vec<OrderLineResponse>,
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        OrderResponse {
            id: o.id,
            customer_id: o.customer_id,
            employee_id: o.employee_id,
            payment_method: o.payment_method,
            status: o.status.to_string(),
            total_amount: money(&o.total_amount),
            placed_at: o.placed_at.to_rfc3339(),
            lines: o
                .lines
                .into_iter()
                .map(|l| OrderLineResponse {
                    id: l.id,
                    product_id: l.product_id,
                    product_name: l.product_name,
                    quantity: l.quantity,
                    unit_price: money(&l.unit_price),
                    subtotal: money(&l.subtotal),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    /// Pending, Confirmed, Processing, Shipped, Completed or Cancelled. The
    /// console's short labels (Confirm, Process, Done, Cancel) are accepted.
    pub status: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/transactions
///
/// Places an order. Stock checks, stock decrements, the order header and its
/// lines are written in one database transaction; any insufficient line rolls
/// the whole order back.
#[utoipa::path(
    post,
    path = "/api/transactions",
    request_body = PlaceOrderRequest,
    responses(
        (status = 200, description = "Order placed", body = PlaceOrderResponse),
        (status = 400, description = "Empty cart, invalid line or insufficient stock"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "transactions"
)]
pub async fn place_order(
    orders: web::Data<Orders>,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let order: PlaceOrder = body.into_inner().into();

    let placed = web::block(move || orders.place_order(order)).await??;

    Ok(HttpResponse::Ok().json(PlaceOrderResponse {
        order_id: placed.order_id,
        total_amount: money(&placed.total_amount),
    }))
}

/// GET /api/transactions
///
/// Returns a paginated list of orders with their lines, newest first.
#[utoipa::path(
    get,
    path = "/api/transactions",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = PageResponse<OrderResponse>),
        (status = 500, description = "Internal server error"),
    ),
    tag = "transactions"
)]
pub async fn list_orders(
    orders: web::Data<Orders>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let (page, limit) = query.clamped();

    let result = web::block(move || orders.list_orders(page, limit)).await??;

    Ok(HttpResponse::Ok().json(PageResponse {
        items: result
            .items
            .into_iter()
            .map(OrderResponse::from)
            .collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// GET /api/transactions/{id}
#[utoipa::path(
    get,
    path = "/api/transactions/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "transactions"
)]
pub async fn get_order(
    orders: web::Data<Orders>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let order = web::block(move || orders.get_order(order_id)).await??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// PUT /api/transactions/{id}/status
#[utoipa::path(
    put,
    path = "/api/transactions/{id}/status",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
    ),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Status updated", body = OrderResponse),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Order not found"),
    ),
    tag = "transactions"
)]
pub async fn update_status(
    orders: web::Data<Orders>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let status = body.into_inner().status;

    let order = web::block(move || orders.update_status(order_id, &status)).await??;

    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
