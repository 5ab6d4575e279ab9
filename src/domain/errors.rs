use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Email already registered.")]
    DuplicateEmail,
    #[error("Not enough stock for {product}.")]
    InsufficientStock { product: String },
    #[error("Record is still referenced by existing orders")]
    InUse,
    #[error("Invalid email or password.")]
    Unauthorized,
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        DomainError::InvalidInput(msg.into())
    }
}
