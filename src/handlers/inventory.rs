use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::products::{to_responses, ProductResponse};
use super::Inventory;
use crate::errors::AppError;

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LowStockParams {
    /// Products with at most this many units are listed. Defaults to the
    /// configured threshold.
    pub threshold: Option<i32>,
}

/// New absolute stock level: either a bare integer or `{"quantity": n}`.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum StockUpdate {
    Bare(i32),
    Wrapped { quantity: i32 },
}

impl StockUpdate {
    pub fn quantity(&self) -> i32 {
        match self {
            StockUpdate::Bare(q) | StockUpdate::Wrapped { quantity: q } => *q,
        }
    }
}

/// GET /api/inventory
#[utoipa::path(
    get,
    path = "/api/inventory",
    responses(
        (status = 200, description = "Every product with its stock level", body = [ProductResponse]),
    ),
    tag = "inventory"
)]
pub async fn list_inventory(inventory: web::Data<Inventory>) -> Result<HttpResponse, AppError> {
    let products = web::block(move || inventory.list()).await??;

    Ok(HttpResponse::Ok().json(to_responses(products)))
}

/// GET /api/inventory/low-stock
#[utoipa::path(
    get,
    path = "/api/inventory/low-stock",
    params(LowStockParams),
    responses(
        (status = 200, description = "Products at or below the threshold, scarcest first", body = [ProductResponse]),
    ),
    tag = "inventory"
)]
pub async fn low_stock(
    inventory: web::Data<Inventory>,
    query: web::Query<LowStockParams>,
) -> Result<HttpResponse, AppError> {
    let threshold = query.into_inner().threshold;

    let products = web::block(move || inventory.low_stock(threshold)).await??;

    Ok(HttpResponse::Ok().json(to_responses(products)))
}

/// PUT /api/inventory/{id}/stock
///
/// Replaces the stock level of a product. Negative values are rejected.
#[utoipa::path(
    put,
    path = "/api/inventory/{id}/stock",
    params(("id" = Uuid, Path, description = "Product UUID")),
    request_body = StockUpdate,
    responses(
        (status = 200, description = "Stock updated", body = ProductResponse),
        (status = 400, description = "Negative quantity"),
        (status = 404, description = "Product not found"),
    ),
    tag = "inventory"
)]
pub async fn update_stock(
    inventory: web::Data<Inventory>,
    path: web::Path<Uuid>,
    body: web::Json<StockUpdate>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let quantity = body.quantity();

    let product = web::block(move || inventory.update_stock(id, quantity)).await??;

    Ok(HttpResponse::Ok().json(ProductResponse::from(product)))
}
