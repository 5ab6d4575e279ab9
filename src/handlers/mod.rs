pub mod auth;
pub mod inventory;
pub mod orders;
pub mod products;
pub mod users;

use std::str::FromStr;

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::{AuthService, InventoryService, OrderService, ProductService, UserService};
use crate::errors::AppError;
use crate::infrastructure::{
    DieselCustomerRepository, DieselEmployeeRepository, DieselOrderRepository,
    DieselProductRepository,
};

pub type Orders = OrderService<DieselOrderRepository>;
pub type Products = ProductService<DieselProductRepository>;
pub type Inventory = InventoryService<DieselProductRepository>;
pub type Users = UserService<DieselCustomerRepository, DieselEmployeeRepository>;
pub type Auth = AuthService<DieselCustomerRepository, DieselEmployeeRepository>;

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct PageParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    20
}

impl PageParams {
    pub fn clamped(&self) -> (i64, i64) {
        (self.page.max(1), self.limit.clamp(1, 100))
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PageResponse<T> {
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// ── Money ────────────────────────────────────────────────────────────────────

/// A decimal amount sent either as a JSON string (`"9.99"`, preferred) or as
/// a JSON number.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Money {
    Text(String),
    Number(serde_json::Number),
}

impl Money {
    pub fn parse(&self, field: &str) -> Result<BigDecimal, AppError> {
        let raw = match self {
            Money::Text(s) => s.trim().to_string(),
            Money::Number(n) => n.to_string(),
        };
        BigDecimal::from_str(&raw)
            .map_err(|e| AppError::BadRequest(format!("Invalid {} '{}': {}", field, raw, e)))
    }
}

/// Renders an amount with two decimal places.
pub fn money(amount: &BigDecimal) -> String {
    amount.with_scale(2).to_string()
}
