use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{Product, ProductFilter, ProductInput};

pub struct ProductService<R> {
    repo: R,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list(&self, filter: ProductFilter) -> Result<Vec<Product>, DomainError> {
        self.repo.list(&filter.normalized())
    }

    pub fn get(&self, id: Uuid) -> Result<Product, DomainError> {
        self.repo
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Product"))
    }

    pub fn create(&self, input: ProductInput) -> Result<Product, DomainError> {
        input.validate()?;
        let product = self.repo.create(input)?;
        log::info!("Product {} created ({})", product.id, product.name);
        Ok(product)
    }

    pub fn update(&self, id: Uuid, input: ProductInput) -> Result<Product, DomainError> {
        input.validate()?;
        self.repo
            .update(id, input)?
            .ok_or(DomainError::NotFound("Product"))
    }

    pub fn delete(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.repo.delete(id)? {
            return Err(DomainError::NotFound("Product"));
        }
        log::info!("Product {} deleted", id);
        Ok(())
    }
}
