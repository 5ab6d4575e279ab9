pub mod models;
pub mod order_repo;
pub mod product_repo;
pub mod user_repo;

#[cfg(test)]
pub(crate) mod test_db;

pub use order_repo::DieselOrderRepository;
pub use product_repo::DieselProductRepository;
pub use user_repo::{DieselCustomerRepository, DieselEmployeeRepository};

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::domain::errors::DomainError;

const CONSTRAINT_MESSAGE: &str = "Value violates a data constraint.";

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<DieselError> for DomainError {
    fn from(e: DieselError) -> Self {
        match e {
            // The only unique indexes besides primary keys are the email ones.
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                DomainError::DuplicateEmail
            }
            DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
                DomainError::InUse
            }
            DieselError::DatabaseError(DatabaseErrorKind::CheckViolation, info) => {
                log::warn!(
                    "Check constraint {} rejected a write: {}",
                    info.constraint_name().unwrap_or("?"),
                    info.message()
                );
                DomainError::invalid(CONSTRAINT_MESSAGE)
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}
