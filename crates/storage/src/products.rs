use catalog_core::Product;

use crate::error::StorageError;
use crate::traits::KeyValueStore;

pub const PRODUCTS_KEY: &str = "products";

/// The whole product collection stored as one JSON array under one key.
///
/// There are no partial writes: callers load everything, edit in memory and
/// save everything back.
pub struct ProductStore<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> ProductStore<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, PRODUCTS_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn inner(&self) -> &S {
        &self.store
    }

    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Raw blob as persisted, or `None` if nothing has been saved yet.
    pub fn load_raw(&self) -> Result<Option<String>, StorageError> {
        self.store.get_item(&self.key)
    }

    /// All products in stored order. An absent key is an empty catalog; a
    /// present but unparseable blob is an error and is left untouched.
    pub fn load(&self) -> Result<Vec<Product>, StorageError> {
        let Some(raw) = self.load_raw()? else {
            return Ok(Vec::new());
        };
        serde_json::from_str(&raw).map_err(|source| {
            tracing::error!(key = %self.key, error = %source, "stored catalog is corrupt");
            StorageError::Corrupt {
                key: self.key.clone(),
                source,
            }
        })
    }

    pub fn save(&mut self, products: &[Product]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(products)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.store.set_item(&self.key, &raw)?;
        tracing::trace!(
            key = %self.key,
            count = products.len(),
            bytes = raw.len(),
            "saved catalog"
        );
        Ok(())
    }
}
