pub mod config;
pub mod error;
pub mod import;
pub mod query;

pub use config::CatalogConfig;
pub use error::{CatalogError, ImportError};
pub use import::{FakeStoreClient, ImportReport, RemoteProduct, RemoteSource};
pub use query::ProductsQuery;

use catalog_core::{
    NewProduct, NewVariant, Product, ProductId, ProductPatch, Variant, VariantId, VariantPatch,
    clock,
};
use catalog_storage::{KeyValueStore, ProductStore, SqliteStorage};

/// Product and variant CRUD over a [`ProductStore`].
///
/// Every operation loads the full collection and, when something changed,
/// writes the full collection back. Lookups take the first matching id.
/// Input is trusted: name, price and stock checks belong to the caller
/// (see `catalog_core::validate`).
pub struct Catalog<S = SqliteStorage> {
    store: ProductStore<S>,
}

impl Catalog<SqliteStorage> {
    pub fn open(config: &CatalogConfig) -> Result<Self, CatalogError> {
        let storage = match &config.database_path {
            Some(path) => SqliteStorage::open(path)?,
            None => SqliteStorage::open_in_memory()?,
        };
        Ok(Self::with_store(ProductStore::with_key(storage, config.storage_key.clone())))
    }

    pub fn open_in_memory() -> Result<Self, CatalogError> {
        Self::open(&CatalogConfig::default())
    }
}

impl<S: KeyValueStore> Catalog<S> {
    pub fn new(storage: S) -> Self {
        Self::with_store(ProductStore::new(storage))
    }

    pub fn with_store(store: ProductStore<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &ProductStore<S> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut ProductStore<S> {
        &mut self.store
    }

    pub fn get_all(&self) -> Result<Vec<Product>, CatalogError> {
        let products = self.store.load()?;
        tracing::debug!(count = products.len(), "loaded catalog");
        Ok(products)
    }

    pub fn get_product(&self, product_id: &ProductId) -> Result<Option<Product>, CatalogError> {
        Ok(self.store.load()?.into_iter().find(|p| &p.id == product_id))
    }

    /// Appends a new product with a fresh id and no variants.
    pub fn add_product(&mut self, input: NewProduct) -> Result<Product, CatalogError> {
        let mut products = self.store.load()?;
        let product = input.into_product(ProductId::new(), clock::now());
        products.push(product.clone());
        self.store.save(&products)?;
        tracing::info!(product_id = %product.id, name = %product.name, "product added");
        Ok(product)
    }

    /// Returns `None` without writing if no product has this id.
    pub fn update_product(
        &mut self,
        product_id: &ProductId,
        patch: ProductPatch,
    ) -> Result<Option<Product>, CatalogError> {
        let mut products = self.store.load()?;
        let Some(product) = products.iter_mut().find(|p| &p.id == product_id) else {
            tracing::debug!(%product_id, "update_product: not found");
            return Ok(None);
        };
        patch.apply(product, clock::now());
        let updated = product.clone();
        self.store.save(&products)?;
        tracing::info!(%product_id, "product updated");
        Ok(Some(updated))
    }

    /// Removes the product together with its variants. Returns `false`
    /// without writing if nothing matched.
    pub fn delete_product(&mut self, product_id: &ProductId) -> Result<bool, CatalogError> {
        let mut products = self.store.load()?;
        let before = products.len();
        products.retain(|p| &p.id != product_id);
        if products.len() == before {
            tracing::debug!(%product_id, "delete_product: not found");
            return Ok(false);
        }
        self.store.save(&products)?;
        tracing::info!(%product_id, "product deleted");
        Ok(true)
    }

    /// Appends a variant to the product. A blank SKU becomes `SKU-<epoch-ms>`.
    pub fn add_variant(
        &mut self,
        product_id: &ProductId,
        input: NewVariant,
    ) -> Result<Option<Variant>, CatalogError> {
        let mut products = self.store.load()?;
        let Some(product) = products.iter_mut().find(|p| &p.id == product_id) else {
            tracing::debug!(%product_id, "add_variant: product not found");
            return Ok(None);
        };
        let variant = input.into_variant(VariantId::new(), product_id.clone(), clock::now());
        product.variants.push(variant.clone());
        self.store.save(&products)?;
        tracing::info!(%product_id, variant_id = %variant.id, sku = %variant.sku, "variant added");
        Ok(Some(variant))
    }

    pub fn update_variant(
        &mut self,
        product_id: &ProductId,
        variant_id: &VariantId,
        patch: VariantPatch,
    ) -> Result<Option<Variant>, CatalogError> {
        let mut products = self.store.load()?;
        let Some(variant) = products
            .iter_mut()
            .find(|p| &p.id == product_id)
            .and_then(|p| p.variants.iter_mut().find(|v| &v.id == variant_id))
        else {
            tracing::debug!(%product_id, %variant_id, "update_variant: not found");
            return Ok(None);
        };
        patch.apply(variant, clock::now());
        let updated = variant.clone();
        self.store.save(&products)?;
        tracing::info!(%product_id, %variant_id, "variant updated");
        Ok(Some(updated))
    }

    pub fn delete_variant(
        &mut self,
        product_id: &ProductId,
        variant_id: &VariantId,
    ) -> Result<bool, CatalogError> {
        let mut products = self.store.load()?;
        let Some(product) = products.iter_mut().find(|p| &p.id == product_id) else {
            tracing::debug!(%product_id, "delete_variant: product not found");
            return Ok(false);
        };
        let before = product.variants.len();
        product.variants.retain(|v| &v.id != variant_id);
        if product.variants.len() == before {
            tracing::debug!(%product_id, %variant_id, "delete_variant: variant not found");
            return Ok(false);
        }
        self.store.save(&products)?;
        tracing::info!(%product_id, %variant_id, "variant deleted");
        Ok(true)
    }

    /// Pulls the remote catalog into this store. See [`import::import_external`].
    pub async fn import_external<R: RemoteSource>(&mut self, source: &R) -> bool {
        import::import_external(&mut self.store, source).await
    }

    pub async fn import_report<R: RemoteSource>(
        &mut self,
        source: &R,
    ) -> Result<ImportReport, ImportError> {
        import::import_report(&mut self.store, source).await
    }
}

#[cfg(test)]
mod tests {
    use catalog_core::{CoreError, VariantAttributes};
    use catalog_storage::StorageError;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::open_in_memory().unwrap()
    }

    fn variant_input(price: f64, stock: u32) -> NewVariant {
        NewVariant {
            attributes: VariantAttributes::default(),
            price,
            sku: String::new(),
            stock,
        }
    }

    #[test]
    fn products_are_appended_in_order() {
        let mut c = catalog();
        let a = c.add_product(NewProduct::new("A", "")).unwrap();
        let b = c.add_product(NewProduct::new("B", "")).unwrap();
        let ids: Vec<_> = c.get_all().unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
    }

    #[test]
    fn update_keeps_position() {
        let mut c = catalog();
        c.add_product(NewProduct::new("A", "")).unwrap();
        let b = c.add_product(NewProduct::new("B", "")).unwrap();
        c.add_product(NewProduct::new("C", "")).unwrap();

        c.update_product(&b.id, ProductPatch::default().name("B2")).unwrap().unwrap();
        let names: Vec<_> = c.get_all().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["A", "B2", "C"]);
    }

    #[test]
    fn update_missing_product_returns_none() {
        let mut c = catalog();
        let result = c
            .update_product(&ProductId::from("nope"), ProductPatch::default().name("x"))
            .unwrap();
        assert!(result.is_none());
        assert_eq!(c.store().load_raw().unwrap(), None);
    }

    #[test]
    fn get_product_finds_by_id() {
        let mut c = catalog();
        let p = c.add_product(NewProduct::new("A", "d")).unwrap();
        assert_eq!(c.get_product(&p.id).unwrap(), Some(p));
        assert_eq!(c.get_product(&ProductId::from("missing")).unwrap(), None);
    }

    #[test]
    fn variant_lifecycle() {
        let mut c = catalog();
        let p = c.add_product(NewProduct::new("Shoe", "")).unwrap();
        let v = c.add_variant(&p.id, variant_input(20.0, 5)).unwrap().unwrap();
        assert_eq!(v.product_id, p.id);
        assert!(v.sku.starts_with("SKU-"));

        let updated = c
            .update_variant(&p.id, &v.id, VariantPatch::default().price(25.0))
            .unwrap()
            .unwrap();
        assert_eq!(updated.price, 25.0);
        assert_eq!(updated.stock, 5);
        assert_eq!(updated.created_at, v.created_at);

        assert!(c.delete_variant(&p.id, &v.id).unwrap());
        assert!(!c.delete_variant(&p.id, &v.id).unwrap());
        assert!(c.get_product(&p.id).unwrap().unwrap().variants.is_empty());
    }

    #[test]
    fn variant_ops_on_missing_parent() {
        let mut c = catalog();
        let ghost = ProductId::from("ghost");
        assert!(c.add_variant(&ghost, variant_input(1.0, 1)).unwrap().is_none());
        assert!(
            c.update_variant(&ghost, &VariantId::from("v"), VariantPatch::default().stock(1))
                .unwrap()
                .is_none()
        );
        assert!(!c.delete_variant(&ghost, &VariantId::from("v")).unwrap());
        assert_eq!(c.store().load_raw().unwrap(), None);
    }

    #[test]
    fn first_match_wins_on_duplicate_ids() {
        let mut c = catalog();
        let now = clock::now();
        let dup = vec![
            NewProduct::new("first", "").into_product(ProductId::from("x"), now),
            NewProduct::new("second", "").into_product(ProductId::from("x"), now),
        ];
        c.store_mut().save(&dup).unwrap();

        c.update_product(&ProductId::from("x"), ProductPatch::default().name("renamed")).unwrap();
        let names: Vec<_> = c.get_all().unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, vec!["renamed", "second"]);
    }

    #[test]
    fn corrupt_store_is_fatal() {
        let mut c = catalog();
        c.store_mut().inner_mut().set_item("products", "not json").unwrap();
        let err = c.add_product(NewProduct::new("A", "")).unwrap_err();
        assert!(matches!(err, CatalogError::Storage(StorageError::Corrupt { .. })));
        assert_eq!(c.store().load_raw().unwrap().as_deref(), Some("not json"));
    }

    #[test]
    fn validation_errors_convert() {
        fn add(c: &mut Catalog, name: &str) -> Result<Product, CatalogError> {
            c.add_product(NewProduct::from_form(name, "")?)
        }
        let mut c = catalog();
        assert!(matches!(add(&mut c, "  "), Err(CatalogError::Core(CoreError::EmptyName))));
        assert_eq!(add(&mut c, " Ok ").unwrap().name, "Ok");
        assert_eq!(c.get_all().unwrap().len(), 1);
    }
}
