use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::order::{OrderStatus, OrderView, PlaceOrder, PlacedOrder};
use crate::domain::ports::{OrderRepository, Page};

pub struct OrderService<R> {
    repo: R,
}

impl<R: OrderRepository> OrderService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates the cart, then hands it to the repository's checkout unit of
    /// work. Nothing touches the store when validation fails.
    pub fn place_order(&self, order: PlaceOrder) -> Result<PlacedOrder, DomainError> {
        order.validate()?;

        match self.repo.place(&order) {
            Ok(placed) => {
                log::info!(
                    "Order {} placed for customer {} (total {})",
                    placed.order_id,
                    order.customer_id,
                    placed.total_amount
                );
                Ok(placed)
            }
            Err(e) => {
                log::warn!("Order for customer {} rejected: {}", order.customer_id, e);
                Err(e)
            }
        }
    }

    pub fn get_order(&self, id: Uuid) -> Result<OrderView, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Order"))
    }

    pub fn list_orders(&self, page: i64, limit: i64) -> Result<Page<OrderView>, DomainError> {
        self.repo.list(page, limit)
    }

    pub fn update_status(&self, id: Uuid, status: &str) -> Result<OrderView, DomainError> {
        let status: OrderStatus = status.parse()?;
        let order = self
            .repo
            .update_status(id, status)?
            .ok_or(DomainError::NotFound("Order"))?;
        log::info!("Order {} moved to {}", id, status);
        Ok(order)
    }
}
