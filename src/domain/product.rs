use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;
use super::money;

#[derive(Debug, Clone)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub supplier: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields an employee supplies when creating or replacing a product.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub category: Option<String>,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub stock_quantity: i32,
    pub supplier: Option<String>,
}

impl ProductInput {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid("Product name is required."));
        }
        money::validate_price(&self.price)?;
        validate_stock(self.stock_quantity)
    }
}

pub fn validate_stock(quantity: i32) -> Result<(), DomainError> {
    if quantity < 0 {
        return Err(DomainError::invalid("Stock quantity must not be negative."));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProductSort {
    #[default]
    Name,
    PriceAsc,
    PriceDesc,
    Stock,
}

#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub search: Option<String>,
    /// Exact category match.
    pub category: Option<String>,
    pub sort: ProductSort,
}

impl ProductFilter {
    /// Blank strings count as "no filter".
    pub fn normalized(self) -> Self {
        fn keep(s: Option<String>) -> Option<String> {
            s.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
        }
        Self {
            search: keep(self.search),
            category: keep(self.category),
            sort: self.sort,
        }
    }
}
