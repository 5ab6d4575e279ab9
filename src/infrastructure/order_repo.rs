use std::collections::HashMap;

use bigdecimal::BigDecimal;
use chrono::Utc;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::checkout::{self, CheckoutLedger, OrderHeader, RecordedLine, StockedProduct};
use crate::domain::errors::DomainError;
use crate::domain::order::{OrderLineView, OrderStatus, OrderView, PlaceOrder, PlacedOrder};
use crate::domain::ports::{page_offset, OrderRepository, Page};
use crate::schema::{customers, employees, order_lines, orders, products};

use super::models::{NewOrderLineRow, NewOrderRow, OrderLineRow, OrderRow};

// ── Checkout ledger ──────────────────────────────────────────────────────────

/// Checkout writes against a connection that is already inside a transaction.
struct PgCheckoutLedger<'c> {
    conn: &'c mut PgConnection,
}

impl CheckoutLedger for PgCheckoutLedger<'_> {
    fn customer_exists(&mut self, id: Uuid) -> Result<bool, DomainError> {
        let found = customers::table
            .find(id)
            .select(customers::id)
            .first::<Uuid>(self.conn)
            .optional()?;
        Ok(found.is_some())
    }

    fn employee_exists(&mut self, id: Uuid) -> Result<bool, DomainError> {
        let found = employees::table
            .find(id)
            .select(employees::id)
            .first::<Uuid>(self.conn)
            .optional()?;
        Ok(found.is_some())
    }

    fn open_order(&mut self, header: &OrderHeader<'_>) -> Result<(), DomainError> {
        diesel::insert_into(orders::table)
            .values(&NewOrderRow {
                id: header.id,
                customer_id: header.customer_id,
                employee_id: header.employee_id,
                payment_method: header.payment_method,
                status: header.status.as_str(),
                total_amount: BigDecimal::from(0),
            })
            .execute(self.conn)?;
        Ok(())
    }

    fn lock_products(&mut self, ids: &[Uuid]) -> Result<(), DomainError> {
        // Row locks are taken in ORDER BY order.
        products::table
            .filter(products::id.eq_any(ids))
            .order(products::id)
            .select(products::id)
            .for_update()
            .load::<Uuid>(self.conn)?;
        Ok(())
    }

    fn read_product(&mut self, id: Uuid) -> Result<Option<StockedProduct>, DomainError> {
        let row = products::table
            .find(id)
            .select((
                products::id,
                products::name,
                products::price,
                products::stock_quantity,
            ))
            .first::<(Uuid, String, BigDecimal, i32)>(self.conn)
            .optional()?;

        Ok(row.map(|(id, name, price, stock_quantity)| StockedProduct {
            id,
            name,
            price,
            stock_quantity,
        }))
    }

    fn take_stock(&mut self, product_id: Uuid, quantity: i32) -> Result<(), DomainError> {
        diesel::update(products::table.find(product_id))
            .set((
                products::stock_quantity.eq(products::stock_quantity - quantity),
                products::updated_at.eq(Utc::now()),
            ))
            .execute(self.conn)?;
        Ok(())
    }

    fn record_line(&mut self, line: &RecordedLine) -> Result<(), DomainError> {
        diesel::insert_into(order_lines::table)
            .values(&NewOrderLineRow {
                id: line.id,
                order_id: line.order_id,
                line_no: line.line_no,
                product_id: line.product_id,
                quantity: line.quantity,
                unit_price: line.unit_price.clone(),
                subtotal: line.subtotal.clone(),
            })
            .execute(self.conn)?;
        Ok(())
    }

    fn close_order(&mut self, order_id: Uuid, total: &BigDecimal) -> Result<(), DomainError> {
        diesel::update(orders::table.find(order_id))
            .set(orders::total_amount.eq(total))
            .execute(self.conn)?;
        Ok(())
    }
}

// ── Repository ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_view(order: OrderRow, lines: Vec<(OrderLineRow, String)>) -> Result<OrderView, DomainError> {
    let status: OrderStatus = order.status.parse().map_err(|_| {
        DomainError::Internal(format!(
            "order {} has unknown status '{}'",
            order.id, order.status
        ))
    })?;

    Ok(OrderView {
        id: order.id,
        customer_id: order.customer_id,
        employee_id: order.employee_id,
        payment_method: order.payment_method,
        status,
        total_amount: order.total_amount,
        placed_at: order.placed_at,
        lines: lines
            .into_iter()
            .map(|(l, product_name)| OrderLineView {
                id: l.id,
                product_id: l.product_id,
                product_name: Some(product_name),
                quantity: l.quantity,
                unit_price: l.unit_price,
                subtotal: l.subtotal,
            })
            .collect(),
    })
}

/// Loads the lines of `orders` in one query, grouped by order id.
fn load_lines(
    conn: &mut PgConnection,
    order_ids: &[Uuid],
) -> Result<HashMap<Uuid, Vec<(OrderLineRow, String)>>, DomainError> {
    let rows = order_lines::table
        .inner_join(products::table)
        .filter(order_lines::order_id.eq_any(order_ids))
        .order((order_lines::order_id, order_lines::line_no))
        .select((OrderLineRow::as_select(), products::name))
        .load::<(OrderLineRow, String)>(conn)?;

    let mut grouped: HashMap<Uuid, Vec<(OrderLineRow, String)>> = HashMap::new();
    for (line, name) in rows {
        grouped.entry(line.order_id).or_default().push((line, name));
    }
    Ok(grouped)
}

fn find_order(conn: &mut PgConnection, id: Uuid) -> Result<Option<OrderView>, DomainError> {
    let order = orders::table
        .find(id)
        .select(OrderRow::as_select())
        .first(conn)
        .optional()?;

    let Some(order) = order else {
        return Ok(None);
    };

    let mut lines = load_lines(conn, &[order.id])?;
    let lines = lines.remove(&order.id).unwrap_or_default();
    to_view(order, lines).map(Some)
}

impl OrderRepository for DieselOrderRepository {
    fn place(&self, order: &PlaceOrder) -> Result<PlacedOrder, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let mut ledger = PgCheckoutLedger { conn };
            checkout::place_order(&mut ledger, order)
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;
        find_order(&mut conn, id)
    }

    fn list(&self, page: i64, limit: i64) -> Result<Page<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = page_offset(page, limit)?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = orders::table.count().get_result(conn)?;

            let rows = orders::table
                .select(OrderRow::as_select())
                .order((orders::placed_at.desc(), orders::id))
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            let ids: Vec<Uuid> = rows.iter().map(|o| o.id).collect();
            let mut lines = load_lines(conn, &ids)?;

            let items = rows
                .into_iter()
                .map(|o| {
                    let order_lines = lines.remove(&o.id).unwrap_or_default();
                    to_view(o, order_lines)
                })
                .collect::<Result<Vec<_>, _>>()?;

            Ok(Page { items, total })
        })
    }

    fn update_status(
        &self,
        id: Uuid,
        status: OrderStatus,
    ) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            let updated = diesel::update(orders::table.find(id))
                .set((
                    orders::status.eq(status.as_str()),
                    orders::updated_at.eq(Utc::now()),
                ))
                .execute(conn)?;

            if updated == 0 {
                return Ok(None);
            }
            find_order(conn, id)
        })
    }
}
