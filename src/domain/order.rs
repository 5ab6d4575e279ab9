use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;

pub const DEFAULT_PAYMENT_METHOD: &str = "Credit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Processing,
    Shipped,
    Completed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Confirmed",
            OrderStatus::Processing => "Processing",
            OrderStatus::Shipped => "Shipped",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the canonical names as well as the short labels the management
/// console sends (`Confirm`, `Process`, `Done`, `Cancel`).
impl FromStr for OrderStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "confirmed" | "confirm" => Ok(OrderStatus::Confirmed),
            "processing" | "process" => Ok(OrderStatus::Processing),
            "shipped" => Ok(OrderStatus::Shipped),
            "completed" | "done" => Ok(OrderStatus::Completed),
            "cancelled" | "canceled" | "cancel" => Ok(OrderStatus::Cancelled),
            _ => Err(DomainError::invalid(format!("Unknown order status '{}'", s))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CartLine {
    pub product_id: Uuid,
    pub quantity: i32,
}

#[derive(Debug, Clone)]
pub struct PlaceOrder {
    pub customer_id: Uuid,
    pub employee_id: Uuid,
    pub payment_method: String,
    pub items: Vec<CartLine>,
}

impl PlaceOrder {
    /// Rejects requests that must never reach the store.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.items.is_empty() {
            return Err(DomainError::invalid("Cart is empty."));
        }
        if let Some(line) = self.items.iter().find(|l| l.quantity < 1) {
            return Err(DomainError::invalid(format!(
                "Quantity for product {} must be at least 1.",
                line.product_id
            )));
        }
        if self.payment_method.trim().is_empty() {
            return Err(DomainError::invalid("Payment method is required."));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacedOrder {
    pub order_id: Uuid,
    pub total_amount: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderLineView {
    pub id: Uuid,
    pub product_id: Uuid,
    pub product_name: Option<String>,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub subtotal: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub employee_id: Uuid,
    pub payment_method: String,
    pub status: OrderStatus,
    pub total_amount: BigDecimal,
    pub placed_at: DateTime<Utc>,
    pub lines: Vec<OrderLineView>,
}
