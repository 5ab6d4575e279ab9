use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{validate_stock, Product, ProductFilter};

pub struct InventoryService<R> {
    repo: R,
    low_stock_threshold: i32,
}

impl<R: ProductRepository> InventoryService<R> {
    pub fn new(repo: R, low_stock_threshold: i32) -> Self {
        Self {
            repo,
            low_stock_threshold,
        }
    }

    /// Every product, ordered by name.
    pub fn list(&self) -> Result<Vec<Product>, DomainError> {
        self.repo.list(&ProductFilter::default())
    }

    /// Products at or below `threshold` units, scarcest first. Falls back to
    /// the configured threshold.
    pub fn low_stock(&self, threshold: Option<i32>) -> Result<Vec<Product>, DomainError> {
        self.repo
            .low_stock(threshold.unwrap_or(self.low_stock_threshold))
    }

    pub fn update_stock(&self, id: Uuid, quantity: i32) -> Result<Product, DomainError> {
        validate_stock(quantity)?;
        let product = self
            .repo
            .set_stock(id, quantity)?
            .ok_or(DomainError::NotFound("Product"))?;
        log::info!("Stock for product {} set to {}", id, quantity);
        Ok(product)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::memory::{MemoryState, MemoryStore};

    fn service() -> (InventoryService<MemoryStore>, Vec<Uuid>) {
        let mut state = MemoryState::default();
        let ids = vec![
            state.add_product("Racket", "80.00", 12),
            state.add_product("Grip Tape", "4.00", 3),
            state.add_product("Shuttlecock", "1.50", 10),
        ];
        (InventoryService::new(MemoryStore::new(state), 10), ids)
    }

    #[test]
    fn list_orders_by_name() {
        let (service, _) = service();
        let names: Vec<String> = service.list().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["Grip Tape", "Racket", "Shuttlecock"]);
    }

    #[test]
    fn low_stock_uses_inclusive_default_threshold() {
        let (service, _) = service();
        let stock: Vec<i32> = service
            .low_stock(None)
            .unwrap()
            .into_iter()
            .map(|p| p.stock_quantity)
            .collect();
        assert_eq!(stock, vec![3, 10]);
    }

    #[test]
    fn low_stock_honours_explicit_threshold() {
        let (service, _) = service();
        assert_eq!(service.low_stock(Some(3)).unwrap().len(), 1);
        assert_eq!(service.low_stock(Some(100)).unwrap().len(), 3);
    }

    #[test]
    fn update_stock_sets_quantity() {
        let (service, ids) = service();
        let product = service.update_stock(ids[0], 0).unwrap();
        assert_eq!(product.stock_quantity, 0);
    }

    #[test]
    fn negative_stock_is_rejected() {
        let (service, ids) = service();
        assert!(matches!(
            service.update_stock(ids[0], -5),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn unknown_product_is_not_found() {
        let (service, _) = service();
        assert!(matches!(
            service.update_stock(Uuid::new_v4(), 1),
            Err(DomainError::NotFound("Product"))
        ));
    }
}
