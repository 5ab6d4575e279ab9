use uuid::Uuid;

use super::errors::DomainError;
use super::order::{OrderStatus, OrderView, PlaceOrder, PlacedOrder};
use super::product::{Product, ProductFilter, ProductInput};
use super::user::{Customer, CustomerInput, Employee, EmployeeInput};

/// One page of a listing plus the total number of matching rows.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}

/// Row offset of the 1-based `page` at `limit` rows per page.
pub fn page_offset(page: i64, limit: i64) -> Result<i64, DomainError> {
    (page.max(1) - 1)
        .checked_mul(limit.max(0))
        .ok_or_else(|| DomainError::invalid("Page number is too large."))
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Runs the checkout as a single unit of work: either every write
    /// (header, lines, stock decrements) commits or none does.
    fn place(&self, order: &PlaceOrder) -> Result<PlacedOrder, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError>;
    fn list(&self, page: i64, limit: i64) -> Result<Page<OrderView>, DomainError>;
    fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<OrderView>, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, DomainError>;
    fn low_stock(&self, threshold: i32) -> Result<Vec<Product>, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError>;
    fn create(&self, input: ProductInput) -> Result<Product, DomainError>;
    fn update(&self, id: Uuid, input: ProductInput) -> Result<Option<Product>, DomainError>;
    fn set_stock(&self, id: Uuid, quantity: i32) -> Result<Option<Product>, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

pub trait CustomerRepository: Send + Sync + 'static {
    fn list(&self, page: i64, limit: i64) -> Result<Page<Customer>, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError>;
    /// Case-insensitive lookup.
    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError>;
    fn create(&self, input: CustomerInput) -> Result<Customer, DomainError>;
    fn update(&self, id: Uuid, input: CustomerInput) -> Result<Option<Customer>, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}

pub trait EmployeeRepository: Send + Sync + 'static {
    fn list(&self, page: i64, limit: i64) -> Result<Page<Employee>, DomainError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, DomainError>;
    /// Case-insensitive lookup.
    fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError>;
    fn create(&self, input: EmployeeInput) -> Result<Employee, DomainError>;
    fn update(&self, id: Uuid, input: EmployeeInput) -> Result<Option<Employee>, DomainError>;
    fn delete(&self, id: Uuid) -> Result<bool, DomainError>;
}
