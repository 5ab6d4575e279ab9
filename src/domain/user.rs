use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::errors::DomainError;

#[derive(Debug, Clone)]
pub struct Customer {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub phone: Option<String>,
    pub registered_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CustomerInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zipcode: Option<String>,
    pub phone: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Employee {
    pub id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub hired_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct EmployeeInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
    pub role: Option<String>,
}

/// Trims the address and rejects a blank one. Case is preserved for storage;
/// comparisons are done case-insensitively by the repositories.
pub fn normalize_email(email: &str) -> Result<String, DomainError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(DomainError::invalid("Email is required."));
    }
    Ok(trimmed.to_string())
}

pub fn display_name(first: Option<&str>, last: Option<&str>) -> String {
    [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserType {
    Customer,
    Employee,
}

impl UserType {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserType::Customer => "Customer",
            UserType::Employee => "Employee",
        }
    }
}

/// Who a successful login resolved to.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_type: UserType,
    pub id: Uuid,
    pub name: String,
    pub role: Option<String>,
}

impl From<&Customer> for Principal {
    fn from(c: &Customer) -> Self {
        Principal {
            user_type: UserType::Customer,
            id: c.id,
            name: display_name(c.first_name.as_deref(), c.last_name.as_deref()),
            role: None,
        }
    }
}

impl From<&Employee> for Principal {
    fn from(e: &Employee) -> Self {
        Principal {
            user_type: UserType::Employee,
            id: e.id,
            name: display_name(e.first_name.as_deref(), e.last_name.as_deref()),
            role: e.role.clone(),
        }
    }
}
