use diesel::prelude::*;
use diesel::sql_types::Text;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::{page_offset, CustomerRepository, EmployeeRepository, Page};
use crate::domain::user::{Customer, CustomerInput, Employee, EmployeeInput};
use crate::schema::{customers, employees};

use super::models::{
    CustomerChanges, CustomerRow, EmployeeChanges, EmployeeRow, NewCustomerRow, NewEmployeeRow,
};

diesel::define_sql_function! {
    /// SQL `LOWER()`, matching the expression the email indexes are built on.
    fn lower(x: Text) -> Text;
}

// ── Customers ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselCustomerRepository {
    pool: DbPool,
}

impl DieselCustomerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CustomerRepository for DieselCustomerRepository {
    fn list(&self, page: i64, limit: i64) -> Result<Page<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = page_offset(page, limit)?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = customers::table.count().get_result(conn)?;
            let rows = customers::table
                .select(CustomerRow::as_select())
                .order((
                    customers::last_name.asc(),
                    customers::first_name.asc(),
                    customers::id,
                ))
                .limit(limit)
                .offset(offset)
                .load(conn)?;
            Ok(Page {
                items: rows.into_iter().map(Customer::from).collect(),
                total,
            })
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = customers::table
            .find(id)
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Customer::from))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = customers::table
            .filter(lower(customers::email).eq(email.trim().to_lowercase()))
            .select(CustomerRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Customer::from))
    }

    fn create(&self, input: CustomerInput) -> Result<Customer, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(customers::table)
            .values(&NewCustomerRow {
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
            })
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn update(&self, id: Uuid, input: CustomerInput) -> Result<Option<Customer>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(customers::table.find(id))
            .set(&CustomerChanges {
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password: input.password,
                address: input.address,
                city: input.city,
                state: input.state,
                zipcode: input.zipcode,
                phone: input.phone,
            })
            .returning(CustomerRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        Ok(row.map(Customer::from))
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(customers::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }
}

// ── Employees ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselEmployeeRepository {
    pool: DbPool,
}

impl DieselEmployeeRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl EmployeeRepository for DieselEmployeeRepository {
    fn list(&self, page: i64, limit: i64) -> Result<Page<Employee>, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = page_offset(page, limit)?;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = employees::table.count().get_result(conn)?;
            let rows = employees::table
                .select(EmployeeRow::as_select())
                .order((
                    employees::last_name.asc(),
                    employees::first_name.asc(),
                    employees::id,
                ))
                .limit(limit)
                .offset(offset)
                .load(conn)?;
            Ok(Page {
                items: rows.into_iter().map(Employee::from).collect(),
                total,
            })
        })
    }

    fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = employees::table
            .find(id)
            .select(EmployeeRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Employee::from))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<Employee>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = employees::table
            .filter(lower(employees::email).eq(email.trim().to_lowercase()))
            .select(EmployeeRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(row.map(Employee::from))
    }

    fn create(&self, input: EmployeeInput) -> Result<Employee, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(employees::table)
            .values(&NewEmployeeRow {
                id: Uuid::new_v4(),
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password: input.password,
                phone: input.phone,
                role: input.role,
            })
            .returning(EmployeeRow::as_returning())
            .get_result(&mut conn)?;
        Ok(row.into())
    }

    fn update(&self, id: Uuid, input: EmployeeInput) -> Result<Option<Employee>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::update(employees::table.find(id))
            .set(&EmployeeChanges {
                first_name: input.first_name,
                last_name: input.last_name,
                email: input.email,
                password: input.password,
                phone: input.phone,
                role: input.role,
            })
            .returning(EmployeeRow::as_returning())
            .get_result(&mut conn)
            .optional()?;
        Ok(row.map(Employee::from))
    }

    fn delete(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(employees::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }
}
