use catalog_core::{
    NewProduct, NewVariant, Product, ProductId, ProductPatch, Variant, VariantId, VariantPatch,
};
use catalog_storage::{KeyValueStore, SqliteStorage};

use crate::error::{CatalogError, ImportError};
use crate::import::{ImportReport, RemoteSource};
use crate::Catalog;

/// Cached view of the product list for UI consumers.
///
/// Reads are served from the cache until a mutation goes through, after which
/// the next read refetches. This only guards against stale reads; concurrent
/// writers to the same store still overwrite each other.
pub struct ProductsQuery<S = SqliteStorage> {
    catalog: Catalog<S>,
    cache: Option<Vec<Product>>,
}

impl<S: KeyValueStore> ProductsQuery<S> {
    pub fn new(catalog: Catalog<S>) -> Self {
        Self { catalog, cache: None }
    }

    pub fn catalog(&self) -> &Catalog<S> {
        &self.catalog
    }

    pub fn is_stale(&self) -> bool {
        self.cache.is_none()
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    pub fn products(&mut self) -> Result<&[Product], CatalogError> {
        if self.cache.is_none() {
            self.cache = Some(self.catalog.get_all()?);
        }
        Ok(self.cache.as_deref().unwrap_or_default())
    }

    /// Products whose name or description contains `term`, ignoring case,
    /// in catalog order. Served from the cache like [`Self::products`].
    pub fn search(&mut self, term: &str) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products()?.iter().filter(|p| p.matches(term)).cloned().collect())
    }

    pub fn add_product(&mut self, input: NewProduct) -> Result<Product, CatalogError> {
        let result = self.catalog.add_product(input)?;
        self.invalidate();
        Ok(result)
    }

    pub fn update_product(
        &mut self,
        product_id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, CatalogError> {
        let result = self.catalog.update_product(product_id, patch)?;
        self.invalidate();
        Ok(result)
    }

    pub fn delete_product(&mut self, product_id: &ProductId) -> Result<bool, CatalogError> {
        let result = self.catalog.delete_product(product_id)?;
        self.invalidate();
        Ok(result)
    }

    pub fn add_variant(
        &mut self,
        product_id: &ProductId,
        input: NewVariant,
    ) -> Result<Option<Variant>, CatalogError> {
        let result = self.catalog.add_variant(product_id, input)?;
        self.invalidate();
        Ok(result)
    }

    pub fn update_variant(
        &mut self,
        product_id: &ProductId,
        variant_id: &VariantId,
        patch: VariantPatch,
    ) -> Result<Option<Variant>, CatalogError> {
        let result = self.catalog.update_variant(product_id, variant_id, patch)?;
        self.invalidate();
        Ok(result)
    }

    pub fn delete_variant(
        &mut self,
        product_id: &ProductId,
        variant_id: &VariantId,
    ) -> Result<bool, CatalogError> {
        let result = self.catalog.delete_variant(product_id, variant_id)?;
        self.invalidate();
        Ok(result)
    }

    pub async fn import_external<R: RemoteSource>(&mut self, source: &R) -> bool {
        let imported = self.catalog.import_external(source).await;
        self.invalidate();
        imported
    }

    pub async fn import_report<R: RemoteSource>(
        &mut self,
        source: &R,
    ) -> Result<ImportReport, ImportError> {
        let report = self.catalog.import_report(source).await;
        self.invalidate();
        report
    }
}
