pub mod checkout;
pub mod errors;
pub mod money;
pub mod order;
pub mod ports;
pub mod product;
pub mod user;

#[cfg(test)]
pub(crate) mod memory;
