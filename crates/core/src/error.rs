use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum CoreError {
    #[error("product name must not be empty")]
    EmptyName,

    #[error("invalid price: {0:?}")]
    InvalidPrice(String),

    #[error("invalid stock quantity: {0:?}")]
    InvalidStock(String),
}
