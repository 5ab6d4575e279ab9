use chrono::Utc;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::domain::product::{Product, ProductFilter, ProductInput, ProductSort};
use crate::schema::products;

use super::models::{NewProductRow, ProductChangeset, ProductRow};

#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Escapes `LIKE` metacharacters so the search term matches literally.
fn like_pattern(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

impl ProductRepository for DieselProductRepository {
    fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let mut query = products::table.into_boxed();
        if let Some(search) = &filter.search {
            query = query.filter(products::name.ilike(like_pattern(search)));
        }
        if let Some(category) = &filter.category {
            query = query.filter(products::category.eq(category));
        }
        query = match filter.sort {
            ProductSort::Name => query.order((products::name.asc(), products::id)),
            ProductSort::PriceAsc => query.order((products::price.asc(), products::name)),
            ProductSort::PriceDesc => query.order((products::price.desc(), products::name)),
            ProductSort::Stock => query.order((products::stock_quantity.asc(), products::name)),
        };

        let rows = query.select(ProductRow::as_select()).load(&mut conn)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    fn low_stock(&self, threshold: i32) -> Result<Vec<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = products::table
            .filter(products::stock_quantity.le(threshold))
            .order((products::stock_quantity.asc(), products::name))
            .select(ProductRow::as_select())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Product::from).collect())
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = products::table
            .find(id)
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Product::from))
    }

    fn create(&self, input: ProductInput) -> Result<Product, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(products::table)
            .values(&NewProductRow {
                id: Uuid::new_v4(),
                name: input.name,
                category: input.category,
                description: input.description,
                price: input.price,
                stock_quantity: input.stock_quantity,
                supplier: input.supplier,
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn update(&self, id: Uuid, input: ProductInput) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(products::table.find(id))
            .set(&ProductChangeset {
                name: input.name,
                category: input.category,
                description: input.description,
                price: input.price,
                stock_quantity: input.stock_quantity,
                supplier: input.supplier,
                updated_at: Utc::now(),
            })
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        Ok(row.map(Product::from))
    }

    fn set_stock(&self, id: Uuid, quantity: i32) -> Result<Option<Product>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(products::table.find(id))
            .set((
                products::stock_quantity.eq(quantity),
                products::updated_at.eq(Utc::now()),
            ))
            .returning(ProductRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        Ok(row.map(Product::from))
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(products::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }
}
