//! In-memory store used by unit tests in place of Postgres.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use super::checkout::{self, CheckoutLedger, OrderHeader, RecordedLine, StockedProduct};
use super::errors::DomainError;
use super::order::{OrderLineView, OrderStatus, OrderView, PlaceOrder, PlacedOrder};
use super::ports::{
    page_offset, CustomerRepository, EmployeeRepository, OrderRepository, Page, ProductRepository,
};
use super::product::{Product, ProductFilter, ProductInput, ProductSort};
use super::user::{Customer, CustomerInput, Employee, EmployeeInput};

#[derive(Debug, Clone, Default)]
pub struct MemoryState {
    pub products: BTreeMap<Uuid, Product>,
    pub customers: Vec<Customer>,
    pub employees: Vec<Employee>,
    pub orders: Vec<OrderView>,
}

impl MemoryState {
    /// A state holding one customer and one employee to place orders with.
    pub fn with_people() -> Self {
        let mut state = Self::default();
        state.customers.push(customer("shopper@example.test"));
        state.employees.push(employee("clerk@example.test"));
        state
    }

    pub fn add_product(&mut self, name: &str, price: &str, stock: i32) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.products.insert(
            id,
            Product {
                id,
                name: name.to_string(),
                category: None,
                description: None,
                price: BigDecimal::from_str(price).expect("valid decimal"),
                stock_quantity: stock,
                supplier: None,
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    pub fn product(&self, id: Uuid) -> &Product {
        &self.products[&id]
    }
}

pub fn customer(email: &str) -> Customer {
    Customer {
        id: Uuid::new_v4(),
        first_name: Some("Sam".to_string()),
        last_name: Some("Shopper".to_string()),
        email: email.to_string(),
        password: "hunter2".to_string(),
        address: None,
        city: None,
        state: None,
        zipcode: None,
        phone: None,
        registered_at: Utc::now(),
    }
}

pub fn employee(email: &str) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        first_name: Some("Casey".to_string()),
        last_name: Some("Clerk".to_string()),
        email: email.to_string(),
        password: "s3cret".to_string(),
        phone: None,
        role: Some("Manager".to_string()),
        hired_at: Utc::now(),
    }
}

impl CheckoutLedger for MemoryState {
    fn customer_exists(&mut self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.customers.iter().any(|c| c.id == id))
    }

    fn employee_exists(&mut self, id: Uuid) -> Result<bool, DomainError> {
        Ok(self.employees.iter().any(|e| e.id == id))
    }

    fn open_order(&mut self, header: &OrderHeader<'_>) -> Result<(), DomainError> {
        self.orders.push(OrderView {
            id: header.id,
            customer_id: header.customer_id,
            employee_id: header.employee_id,
            payment_method: header.payment_method.to_string(),
            status: header.status,
            total_amount: BigDecimal::from(0),
            placed_at: Utc::now(),
            lines: vec![],
        });
        Ok(())
    }

    fn lock_products(&mut self, _ids: &[Uuid]) -> Result<(), DomainError> {
        Ok(())
    }

    fn read_product(&mut self, id: Uuid) -> Result<Option<StockedProduct>, DomainError> {
        Ok(self.products.get(&id).map(|p| StockedProduct {
            id: p.id,
            name: p.name.clone(),
            price: p.price.clone(),
            stock_quantity: p.stock_quantity,
        }))
    }

    fn take_stock(&mut self, product_id: Uuid, quantity: i32) -> Result<(), DomainError> {
        let product = self
            .products
            .get_mut(&product_id)
            .ok_or(DomainError::NotFound("Product"))?;
        product.stock_quantity -= quantity;
        Ok(())
    }

    fn record_line(&mut self, line: &RecordedLine) -> Result<(), DomainError> {
        let name = self.products.get(&line.product_id).map(|p| p.name.clone());
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == line.order_id)
            .ok_or(DomainError::NotFound("Order"))?;
        order.lines.push(OrderLineView {
            id: line.id,
            product_id: line.product_id,
            product_name: name,
            quantity: line.quantity,
            unit_price: line.unit_price.clone(),
            subtotal: line.subtotal.clone(),
        });
        Ok(())
    }

    fn close_order(&mut self, order_id: Uuid, total: &BigDecimal) -> Result<(), DomainError> {
        let order = self
            .orders
            .iter_mut()
            .find(|o| o.id == order_id)
            .ok_or(DomainError::NotFound("Order"))?;
        order.total_amount = total.clone();
        Ok(())
    }
}

/// Shared handle implementing every repository port. A checkout runs on a
/// copy of the state that replaces the live state only on success.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryStore {
    pub fn new(state: MemoryState) -> Self {
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    pub fn snapshot(&self) -> MemoryState {
        self.state.lock().unwrap().clone()
    }
}

fn paginate<T: Clone>(items: &[T], page: i64, limit: i64) -> Result<Page<T>, DomainError> {
    let offset = usize::try_from(page_offset(page, limit)?).unwrap_or(usize::MAX);
    Ok(Page {
        items: items
            .iter()
            .skip(offset)
            .take(limit as usize)
            .cloned()
            .collect(),
        total: items.len() as i64,
    })
}

impl OrderRepository for MemoryStore {
    fn place(&self, order: &PlaceOrder) -> Result<PlacedOrder, DomainError> {
        let mut guard = self.state.lock().unwrap();
        let mut work = guard.clone();
        let placed = checkout::place_order(&mut work, order)?;
        *guard = work;
        Ok(placed)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.orders.iter().find(|o| o.id == id).cloned())
    }

    fn list(&self, page: i64, limit: i64) -> Result<Page<OrderView>, DomainError> {
        let state = self.state.lock().unwrap();
        let newest_first: Vec<OrderView> = state.orders.iter().rev().cloned().collect();
        paginate(&newest_first, page, limit)
    }

    fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<OrderView>, DomainError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.orders.iter_mut().find(|o| o.id == id).map(|o| {
            o.status = status;
            o.clone()
        }))
    }
}

impl ProductRepository for MemoryStore {
    fn list(&self, filter: &ProductFilter) -> Result<Vec<Product>, DomainError> {
        let state = self.state.lock().unwrap();
        let search = filter.search.as_ref().map(|s| s.to_lowercase());
        let mut items: Vec<Product> = state
            .products
            .values()
            .filter(|p| {
                search
                    .as_ref()
                    .map_or(true, |s| p.name.to_lowercase().contains(s))
            })
            .filter(|p| {
                filter
                    .category
                    .as_ref()
                    .map_or(true, |c| p.category.as_ref() == Some(c))
            })
            .cloned()
            .collect();
        match filter.sort {
            ProductSort::Name => items.sort_by(|a, b| a.name.cmp(&b.name)),
            ProductSort::PriceAsc => items.sort_by(|a, b| a.price.cmp(&b.price)),
            ProductSort::PriceDesc => items.sort_by(|a, b| b.price.cmp(&a.price)),
            ProductSort::Stock => items.sort_by_key(|p| p.stock_quantity),
        }
        Ok(items)
    }

    fn low_stock(&self, threshold: i32) -> Result<Vec<Product>, DomainError> {
        let state = self.state.lock().unwrap();
        let mut items: Vec<Product> = state
            .products
            .values()
            .filter(|p| p.stock_quantity <= threshold)
            .cloned()
            .collect();
        items.sort_by_key(|p| p.stock_quantity);
        Ok(items)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DomainError> {
        Ok(self.state.lock().unwrap().products.get(&id).cloned())
    }

    fn create(&self, input: ProductInput) -> Result<Product, DomainError> {
        let now = Utc::now();
        let product = Product {
            id: Uuid::new_v4(),
            name: input.name,
            category: input.category,
            description: input.description,
            price: input.price,
            stock_quantity: input.stock_quantity,
            supplier: input.supplier,
            created_at: now,
            updated_at: now,
        };
        self.state
            .lock()
            .unwrap()
            .products
            .insert(product.id, product.clone());
        Ok(product)
    }

    fn update(&self, id: Uuid, input: ProductInput) -> Result<Option<Product>, DomainError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.products.get_mut(&id).map(|p| {
            p.name = input.name;
            p.category = input.category;
            p.description = input.description;
            p.price = input.price;
            p.stock_quantity = input.stock_quantity;
            p.supplier = input.supplier;
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    fn set_stock(&self, id: Uuid, quantity: i32) -> Result<Option<Product>, DomainError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.products.get_mut(&id).map(|p| {
            p.stock_quantity = quantity;
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.state.lock().unwrap();
        let referenced = state
            .orders
            .iter()
            .any(|o| o.lines.iter().any(|l| l.product_id == id));
        if referenced {
            return Err(DomainError::InUse);
        }
        Ok(state.products.remove(&id).is_some())
    }
}

impl CustomerRepository for MemoryStore {
    fn list(&self, page: i64, limit: i64) -> Result<Page<Customer>, DomainError> {
        let mut items = self.state.lock().unwrap().customers.clone();
        items.sort_by(|a, b| (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name)));
        paginate(&items, page, limit)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.customers.iter().find(|c| c.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .customers
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn create(&self, input: CustomerInput) -> Result<Customer, DomainError> {
        let mut state = self.state.lock().unwrap();
        if state
            .customers
            .iter()
            .any(|c| c.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(DomainError::DuplicateEmail);
        }
        let created = Customer {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: input.password,
            address: input.address,
            city: input.city,
            state: input.state,
            zipcode: input.zipcode,
            phone: input.phone,
            registered_at: Utc::now(),
        };
        state.customers.push(created.clone());
        Ok(created)
    }

    fn update(&self, id: Uuid, input: CustomerInput) -> Result<Option<Customer>, DomainError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.customers.iter_mut().find(|c| c.id == id).map(|c| {
            c.first_name = input.first_name;
            c.last_name = input.last_name;
            c.email = input.email;
            c.password = input.password;
            c.address = input.address;
            c.city = input.city;
            c.state = input.state;
            c.zipcode = input.zipcode;
            c.phone = input.phone;
            c.clone()
        }))
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.orders.iter().any(|o| o.customer_id == id) {
            return Err(DomainError::InUse);
        }
        let before = state.customers.len();
        state.customers.retain(|c| c.id != id);
        Ok(state.customers.len() != before)
    }
}

impl EmployeeRepository for MemoryStore {
    fn list(&self, page: i64, limit: i64) -> Result<Page<Employee>, DomainError> {
        let mut items = self.state.lock().unwrap().employees.clone();
        items.sort_by(|a, b| (&a.last_name, &a.first_name).cmp(&(&b.last_name, &b.first_name)));
        paginate(&items, page, limit)
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state.employees.iter().find(|e| e.id == id).cloned())
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError> {
        let state = self.state.lock().unwrap();
        Ok(state
            .employees
            .iter()
            .find(|e| e.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    fn create(&self, input: EmployeeInput) -> Result<Employee, DomainError> {
        let mut state = self.state.lock().unwrap();
        if state
            .employees
            .iter()
            .any(|e| e.email.eq_ignore_ascii_case(&input.email))
        {
            return Err(DomainError::DuplicateEmail);
        }
        let created = Employee {
            id: Uuid::new_v4(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            password: input.password,
            phone: input.phone,
            role: input.role,
            hired_at: Utc::now(),
        };
        state.employees.push(created.clone());
        Ok(created)
    }

    fn update(&self, id: Uuid, input: EmployeeInput) -> Result<Option<Employee>, DomainError> {
        let mut state = self.state.lock().unwrap();
        Ok(state.employees.iter_mut().find(|e| e.id == id).map(|e| {
            e.first_name = input.first_name;
            e.last_name = input.last_name;
            e.email = input.email;
            e.password = input.password;
            e.phone = input.phone;
            e.role = input.role;
            e.clone()
        }))
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut state = self.state.lock().unwrap();
        if state.orders.iter().any(|o| o.employee_id == id) {
            return Err(DomainError::InUse);
        }
        let before = state.employees.len();
        state.employees.retain(|e| e.id != id);
        Ok(state.employees.len() != before)
    }
}
