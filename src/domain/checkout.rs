//! Order placement.
//!
//! The checkout locks every product in the cart in ascending id order, then
//! walks the cart in list order against a [`CheckoutLedger`], which the
//! caller backs with a single database transaction. Returning an error
//! from [`place_order`] is the rollback signal: the caller must discard every
//! write the ledger has seen, including the order header.

use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::errors::DomainError;
use super::money;
use super::order::{OrderStatus, PlaceOrder, PlacedOrder};

/// The product fields the checkout needs, read under a row lock.
#[derive(Debug, Clone)]
pub struct StockedProduct {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
    pub stock_quantity: i32,
}

#[derive(Debug, Clone)]
pub struct OrderHeader<'a> {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub employee_id: Uuid,
    pub payment_method: &'a str,
    pub status: OrderStatus,
}

#[derive(Debug, Clone)]
pub struct RecordedLine {
    pub id: Uuid,
    pub order_id: Uuid,
    pub line_no: i32,
    pub product_id: Uuid,
    pub quantity: i32,
    pub unit_price: BigDecimal,
    pub subtotal: BigDecimal,
}

/// Writes performed by a checkout, all inside one unit of work.
pub trait CheckoutLedger {
    fn customer_exists(&mut self, id: Uuid) -> Result<bool, DomainError>;
    fn employee_exists(&mut self, id: Uuid) -> Result<bool, DomainError>;
    fn open_order(&mut self, header: &OrderHeader<'_>) -> Result<(), DomainError>;
    /// Holds the given products against concurrent checkouts until the unit
    /// of work ends. `ids` arrive sorted and distinct, so two checkouts never
    /// wait on each other's locks in opposite order. Unknown ids are ignored.
    fn lock_products(&mut self, ids: &[Uuid]) -> Result<(), DomainError>;
    /// Reads a product previously passed to `lock_products`.
    fn read_product(&mut self, id: Uuid) -> Result<Option<StockedProduct>, DomainError>;
    fn take_stock(&mut self, product_id: Uuid, quantity: i32) -> Result<(), DomainError>;
    fn record_line(&mut self, line: &RecordedLine) -> Result<(), DomainError>;
    fn close_order(&mut self, order_id: Uuid, total: &BigDecimal) -> Result<(), DomainError>;
}

/// Places `order` through `ledger`. The request must already have passed
/// [`PlaceOrder::validate`].
///
/// Lines naming an unknown product are skipped. A line asking for more than
/// the product's stock fails the whole order.
pub fn place_order<L>(ledger: &mut L, order: &PlaceOrder) -> Result<PlacedOrder, DomainError>
where
    L: CheckoutLedger + ?Sized,
{
    if !ledger.customer_exists(order.customer_id)? {
        return Err(DomainError::invalid(format!(
            "Unknown customer {}.",
            order.customer_id
        )));
    }
    if !ledger.employee_exists(order.employee_id)? {
        return Err(DomainError::invalid(format!(
            "Unknown employee {}.",
            order.employee_id
        )));
    }

    let mut product_ids: Vec<Uuid> = order.items.iter().map(|i| i.product_id).collect();
    product_ids.sort_unstable();
    product_ids.dedup();
    ledger.lock_products(&product_ids)?;

    let order_id = Uuid::new_v4();
    ledger.open_order(&OrderHeader {
        id: order_id,
        customer_id: order.customer_id,
        employee_id: order.employee_id,
        payment_method: order.payment_method.trim(),
        status: OrderStatus::Pending,
    })?;

    let mut total = BigDecimal::from(0);
    let mut line_no = 0;

    for item in &order.items {
        let Some(product) = ledger.read_product(item.product_id)? else {
            log::warn!(
                "Order {}: skipping unknown product {}",
                order_id,
                item.product_id
            );
            continue;
        };

        if product.stock_quantity < item.quantity {
            return Err(DomainError::InsufficientStock {
                product: product.name,
            });
        }

        ledger.take_stock(product.id, item.quantity)?;

        let subtotal = &product.price * BigDecimal::from(item.quantity);
        if !money::fits(&subtotal) {
            return Err(DomainError::invalid(format!(
                "Line total for {} is too large.",
                product.name
            )));
        }
        line_no += 1;
        ledger.record_line(&RecordedLine {
            id: Uuid::new_v4(),
            order_id,
            line_no,
            product_id: product.id,
            quantity: item.quantity,
            unit_price: product.price,
            subtotal: subtotal.clone(),
        })?;
        total += &subtotal;
        if !money::fits(&total) {
            return Err(DomainError::invalid("Order total is too large."));
        }
    }

    if line_no == 0 {
        return Err(DomainError::invalid("No valid items in cart."));
    }

    ledger.close_order(order_id, &total)?;

    Ok(PlacedOrder {
        order_id,
        total_amount: total,
    })
}
