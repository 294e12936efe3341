use catalog_core::CoreError;
use catalog_storage::StorageError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("core error: {0}")]
    Core(#[from] CoreError),

    #[error("invalid configuration: {0}")]
    Config(String),
}

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote catalog returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
}
