use std::time::Duration;

use catalog_storage::PRODUCTS_KEY;

use crate::error::CatalogError;

pub const DEFAULT_IMPORT_URL: &str = "https://fakestoreapi.com/products";

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    /// SQLite database file; `None` keeps the catalog in memory.
    pub database_path: Option<String>,
    /// Key under which the product list is stored.
    pub storage_key: String,
    /// Endpoint queried by the import bridge.
    pub import_url: String,
    /// Request timeout for imports. `None` waits indefinitely.
    pub import_timeout: Option<Duration>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            database_path: None,
            storage_key: PRODUCTS_KEY.to_string(),
            import_url: DEFAULT_IMPORT_URL.to_string(),
            import_timeout: None,
        }
    }
}

impl CatalogConfig {
    /// Defaults overridden by `CATALOG_DATABASE_PATH`, `CATALOG_STORAGE_KEY`,
    /// `CATALOG_IMPORT_URL` and `CATALOG_IMPORT_TIMEOUT_SECS`.
    pub fn from_env() -> Result<Self, CatalogError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CatalogError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let import_timeout = match get("CATALOG_IMPORT_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw.trim().parse::<u64>().map_err(|e| {
                    CatalogError::Config(format!(
                        "invalid CATALOG_IMPORT_TIMEOUT_SECS {raw:?}: {e}"
                    ))
                })?;
                Some(Duration::from_secs(secs))
            }
            None => defaults.import_timeout,
        };

        let config = Self {
            database_path: get("CATALOG_DATABASE_PATH").or(defaults.database_path),
            storage_key: get("CATALOG_STORAGE_KEY").unwrap_or(defaults.storage_key),
            import_url: get("CATALOG_IMPORT_URL").unwrap_or(defaults.import_url),
            import_timeout,
        };
        tracing::debug!(?config, "catalog configuration loaded");
        Ok(config)
    }
}
