use uuid::Uuid;

use crate::domain::errors::DomainError;
use crate::domain::ports::{CustomerRepository, EmployeeRepository, Page};
use crate::domain::user::{normalize_email, Customer, CustomerInput, Employee, EmployeeInput};

fn require_password(password: &str) -> Result<(), DomainError> {
    if password.trim().is_empty() {
        return Err(DomainError::invalid("Password is required."));
    }
    Ok(())
}

/// Account management for both customers and employees. Email addresses are
/// unique per table, compared without regard to case.
pub struct UserService<C, E> {
    customers: C,
    employees: E,
}

impl<C: CustomerRepository, E: EmployeeRepository> UserService<C, E> {
    pub fn new(customers: C, employees: E) -> Self {
        Self {
            customers,
            employees,
        }
    }

    pub fn list_customers(&self, page: i64, limit: i64) -> Result<Page<Customer>, DomainError> {
        self.customers.list(page, limit)
    }

    pub fn create_customer(&self, mut input: CustomerInput) -> Result<Customer, DomainError> {
        input.email = normalize_email(&input.email)?;
        require_password(&input.password)?;
        if self.customers.find_by_email(&input.email)?.is_some() {
            return Err(DomainError::DuplicateEmail);
        }
        let customer = self.customers.create(input)?;
        log::info!("Customer {} registered", customer.id);
        Ok(customer)
    }

    pub fn update_customer(
        &self,
        id: Uuid,
        mut input: CustomerInput,
    ) -> Result<Customer, DomainError> {
        input.email = normalize_email(&input.email)?;
        let existing = self
            .customers
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Customer"))?;
        if let Some(owner) = self.customers.find_by_email(&input.email)? {
            if owner.id != id {
                return Err(DomainError::DuplicateEmail);
            }
        }
        // A blank password on update keeps the current one.
        if input.password.trim().is_empty() {
            input.password = existing.password;
        }
        self.customers
            .update(id, input)?
            .ok_or(DomainError::NotFound("Customer"))
    }

    pub fn delete_customer(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.customers.delete(id)? {
            return Err(DomainError::NotFound("Customer"));
        }
        Ok(())
    }

    pub fn list_employees(&self, page: i64, limit: i64) -> Result<Page<Employee>, DomainError> {
        self.employees.list(page, limit)
    }

    pub fn create_employee(&self, mut input: EmployeeInput) -> Result<Employee, DomainError> {
        input.email = normalize_email(&input.email)?;
        require_password(&input.password)?;
        if self.employees.find_by_email(&input.email)?.is_some() {
            return Err(DomainError::DuplicateEmail);
        }
        let employee = self.employees.create(input)?;
        log::info!("Employee {} created", employee.id);
        Ok(employee)
    }

    pub fn update_employee(
        &self,
        id: Uuid,
        mut input: EmployeeInput,
    ) -> Result<Employee, DomainError> {
        input.email = normalize_email(&input.email)?;
        let existing = self
            .employees
            .find_by_id(id)?
            .ok_or(DomainError::NotFound("Employee"))?;
        if let Some(owner) = self.employees.find_by_email(&input.email)? {
            if owner.id != id {
                return Err(DomainError::DuplicateEmail);
            }
        }
        // A blank password on update keeps the current one.
        if input.password.trim().is_empty() {
            input.password = existing.password;
        }
        self.employees
            .update(id, input)?
            .ok_or(DomainError::NotFound("Employee"))
    }

    pub fn delete_employee(&self, id: Uuid) -> Result<(), DomainError> {
        if !self.employees.delete(id)? {
            return Err(DomainError::NotFound("Employee"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::memory::MemoryStore;

    fn customer_input(email: &str, last: &str) -> CustomerInput {
        CustomerInput {
            first_name: Some("Jo".to_string()),
            last_name: Some(last.to_string()),
            email: email.to_string(),
            password: "pw".to_string(),
            address: None,
            city: None,
            state: None,
            zipcode: None,
            phone: None,
        }
    }

    fn employee_input(email: &str) -> EmployeeInput {
        EmployeeInput {
            first_name: Some("Pat".to_string()),
            last_name: Some("Staff".to_string()),
            email: email.to_string(),
            password: "pw".to_string(),
            phone: None,
            role: Some("Cashier".to_string()),
        }
    }

    fn service() -> UserService<MemoryStore, MemoryStore> {
        let store = MemoryStore::default();
        UserService::new(store.clone(), store)
    }

    #[test]
    fn duplicate_customer_email_is_rejected_regardless_of_case() {
        let service = service();
        service
            .create_customer(customer_input("ann@shop.test", "Lee"))
            .unwrap();

        let err = service
            .create_customer(customer_input("  ANN@Shop.Test ", "Other"))
            .unwrap_err();

        assert!(matches!(err, DomainError::DuplicateEmail));
    }

    #[test]
    fn blank_email_is_rejected() {
        let service = service();
        assert!(matches!(
            service.create_customer(customer_input(" ", "Lee")),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn created_email_is_trimmed() {
        let service = service();
        let c = service
            .create_customer(customer_input("  bo@shop.test\t", "Bo"))
            .unwrap();
        assert_eq!(c.email, "bo@shop.test");
    }

    #[test]
    fn update_may_keep_own_email_with_different_case() {
        let service = service();
        let c = service
            .create_customer(customer_input("cy@shop.test", "Cy"))
            .unwrap();
        let updated = service
            .update_customer(c.id, customer_input("CY@shop.test", "Cyrus"))
            .unwrap();
        assert_eq!(updated.last_name.as_deref(), Some("Cyrus"));
        assert_eq!(updated.email, "CY@shop.test");
    }

    #[test]
    fn update_cannot_take_another_customers_email() {
        let service = service();
        service
            .create_customer(customer_input("taken@shop.test", "A"))
            .unwrap();
        let c = service
            .create_customer(customer_input("mine@shop.test", "B"))
            .unwrap();
        assert!(matches!(
            service.update_customer(c.id, customer_input("Taken@shop.test", "B")),
            Err(DomainError::DuplicateEmail)
        ));
    }

    #[test]
    fn create_requires_a_password() {
        let service = service();
        let mut input = customer_input("np@shop.test", "Np");
        input.password = "  ".to_string();
        assert!(matches!(
            service.create_customer(input),
            Err(DomainError::InvalidInput(_))
        ));
    }

    #[test]
    fn blank_password_on_update_keeps_the_old_one() {
        let service = service();
        let e = service.create_employee(employee_input("keep@shop.test")).unwrap();
        let mut input = employee_input("keep@shop.test");
        input.password = String::new();
        let updated = service.update_employee(e.id, input).unwrap();
        assert_eq!(updated.password, "pw");
    }

    #[test]
    fn update_unknown_customer_is_not_found() {
        let service = service();
        assert!(matches!(
            service.update_customer(Uuid::new_v4(), customer_input("x@shop.test", "X")),
            Err(DomainError::NotFound("Customer"))
        ));
    }

    #[test]
    fn customers_are_listed_by_last_name() {
        let service = service();
        service.create_customer(customer_input("z@shop.test", "Zed")).unwrap();
        service.create_customer(customer_input("a@shop.test", "Abe")).unwrap();
        let page = service.list_customers(1, 20).unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].last_name.as_deref(), Some("Abe"));
    }

    #[test]
    fn delete_unknown_customer_is_not_found() {
        let service = service();
        assert!(matches!(
            service.delete_customer(Uuid::new_v4()),
            Err(DomainError::NotFound("Customer"))
        ));
    }

    #[test]
    fn employee_emails_are_unique_but_independent_of_customers() {
        let service = service();
        service
            .create_customer(customer_input("same@shop.test", "C"))
            .unwrap();
        service.create_employee(employee_input("same@shop.test")).unwrap();
        assert!(matches!(
            service.create_employee(employee_input("SAME@shop.test")),
            Err(DomainError::DuplicateEmail)
        ));
    }

    #[test]
    fn update_and_delete_employee() {
        let service = service();
        let e = service.create_employee(employee_input("e@shop.test")).unwrap();
        let mut input = employee_input("e@shop.test");
        input.role = Some("Manager".to_string());
        assert_eq!(
            service.update_employee(e.id, input).unwrap().role.as_deref(),
            Some("Manager")
        );
        service.delete_employee(e.id).unwrap();
        assert_eq!(service.list_employees(1, 20).unwrap().total, 0);
    }
}
