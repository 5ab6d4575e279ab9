use crate::domain::errors::DomainError;
use crate::domain::ports::{CustomerRepository, EmployeeRepository};
use crate::domain::user::Principal;

/// Credential check against the employee and customer tables.
///
/// Employees are matched first, so an address present in both tables logs in
/// as the employee. A failed attempt never says which part was wrong.
pub struct AuthService<C, E> {
    customers: C,
    employees: E,
}

impl<C: CustomerRepository, E: EmployeeRepository> AuthService<C, E> {
    pub fn new(customers: C, employees: E) -> Self {
        Self {
            customers,
            employees,
        }
    }

    pub fn login(&self, email: &str, password: &str) -> Result<Principal, DomainError> {
        let email = email.trim();
        if email.is_empty() || password.is_empty() {
            return Err(DomainError::invalid("Email and password are required."));
        }

        if let Some(employee) = self.employees.find_by_email(email)? {
            if employee.password == password {
                return Ok(Principal::from(&employee));
            }
            log::warn!("Failed login for {}", email);
            return Err(DomainError::Unauthorized);
        }

        match self.customers.find_by_email(email)? {
            Some(customer) if customer.password == password => Ok(Principal::from(&customer)),
            _ => {
                log::warn!("Failed login for {}", email);
                Err(DomainError::Unauthorized)
            }
        }
    }
}
