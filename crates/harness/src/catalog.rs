use catalog_core::{NewProduct, NewVariant, Product, ProductId, Variant, VariantAttributes};
use catalog_engine::{Catalog, CatalogConfig, CatalogError};
use catalog_storage::KeyValueStore;
use tempfile::TempDir;

/// A catalog under test, either in memory or backed by a temporary database
/// file that lives as long as this value.
pub struct TestCatalog {
    pub catalog: Catalog,
    config: CatalogConfig,
    _dir: Option<TempDir>,
}

impl TestCatalog {
    pub fn new() -> Result<Self, CatalogError> {
        let config = CatalogConfig::default();
        Ok(Self {
            catalog: Catalog::open(&config)?,
            config,
            _dir: None,
        })
    }

    pub fn on_disk() -> Result<Self, Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("catalog.db");
        let config = CatalogConfig {
            database_path: Some(path.to_str().ok_or("non-utf8 temp path")?.to_string()),
            ..CatalogConfig::default()
        };
        Ok(Self {
            catalog: Catalog::open(&config)?,
            config,
            _dir: Some(dir),
        })
    }

    /// A second, independent handle on the same database file.
    pub fn reopen(&self) -> Result<Catalog, CatalogError> {
        Catalog::open(&self.config)
    }

    /// The persisted blob, byte for byte.
    pub fn raw(&self) -> Result<Option<String>, CatalogError> {
        Ok(self.catalog.store().load_raw()?)
    }

    /// Overwrites the persisted blob directly, bypassing the repository.
    pub fn write_raw(&mut self, raw: &str) -> Result<(), CatalogError> {
        let key = self.catalog.store().key().to_string();
        self.catalog.store_mut().inner_mut().set_item(&key, raw)?;
        Ok(())
    }

    pub fn add_product(&mut self, name: &str, description: &str) -> Result<Product, CatalogError> {
        self.catalog.add_product(NewProduct::new(name, description))
    }

    /// Adds a variant that must succeed; a missing product is an error here.
    pub fn add_variant(
        &mut self,
        product_id: &ProductId,
        price: f64,
        stock: u32,
        sku: &str,
    ) -> Result<Variant, Box<dyn std::error::Error>> {
        let input = NewVariant {
            attributes: VariantAttributes::default(),
            price,
            sku: sku.to_string(),
            stock,
        };
        let variant = self
            .catalog
            .add_variant(product_id, input)?
            .ok_or_else(|| format!("product {product_id} not found"))?;
        Ok(variant)
    }

    pub fn product(&self, product_id: &ProductId) -> Result<Option<Product>, CatalogError> {
        self.catalog.get_product(product_id)
    }
}
