//! One-shot import of a public demo catalog into the local store.
//!
//! The import writes straight into the [`ProductStore`], next to the
//! repository rather than through it, and only ever appends products whose
//! ids are not already present.

use std::collections::HashSet;
use std::future::Future;

use catalog_core::{Product, ProductId, Variant, VariantAttributes, VariantId, clock};
use catalog_storage::{KeyValueStore, ProductStore};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Deserialize;

use crate::config::CatalogConfig;
use crate::error::ImportError;

/// Inclusive bounds of the stock count assigned to imported variants.
pub const IMPORTED_STOCK_RANGE: std::ops::RangeInclusive<u32> = 1..=50;

/// One record of the remote catalog. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteProduct {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    pub price: f64,
}

/// Where imported products come from.
pub trait RemoteSource {
    fn fetch(&self) -> impl Future<Output = Result<Vec<RemoteProduct>, ImportError>> + Send;
}

/// HTTP client for the fakestoreapi.com product listing. No auth, no
/// pagination, no retry.
#[derive(Debug, Clone)]
pub struct FakeStoreClient {
    client: reqwest::Client,
    url: String,
}

impl FakeStoreClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    pub fn from_config(config: &CatalogConfig) -> Result<Self, ImportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.import_timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url: config.import_url.clone(),
        })
    }
}

impl RemoteSource for FakeStoreClient {
    async fn fetch(&self) -> Result<Vec<RemoteProduct>, ImportError> {
        let resp = self.client.get(&self.url).send().await?;
        if !resp.status().is_success() {
            return Err(ImportError::Status(resp.status()));
        }
        Ok(resp.json::<Vec<RemoteProduct>>().await?)
    }
}

/// Maps a remote record to a local product with a single variant carrying
/// the price, a random stock count and the category as a free-form attribute.
pub fn to_product(remote: RemoteProduct, now: DateTime<Utc>, rng: &mut impl Rng) -> Product {
    let product_id = ProductId::from(remote.id.to_string());
    let mut attributes = VariantAttributes::default();
    attributes.extra.insert("category".to_string(), remote.category);

    let variant = Variant {
        id: VariantId::from(format!("variant-{}-1", remote.id)),
        product_id: product_id.clone(),
        attributes,
        price: remote.price,
        sku: format!("SKU-{}", remote.id),
        stock: rng.gen_range(IMPORTED_STOCK_RANGE),
        created_at: now,
        updated_at: now,
    };

    Product {
        id: product_id,
        name: remote.title,
        description: remote.description,
        created_at: now,
        updated_at: now,
        variants: vec![variant],
    }
}

/// Fetches and maps the remote catalog. Any transport or decoding failure is
/// logged and yields an empty list.
pub async fn fetch_external<R: RemoteSource>(source: &R) -> Vec<Product> {
    match source.fetch().await {
        Ok(records) => {
            let now = clock::now();
            let mut rng = rand::thread_rng();
            records.into_iter().map(|r| to_product(r, now, &mut rng)).collect()
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to fetch remote catalog");
            Vec::new()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Products returned by the remote source.
    pub fetched: usize,
    /// Products appended to the local catalog.
    pub added: usize,
    /// Products skipped because their id already existed locally.
    pub skipped: usize,
}

/// Appends the products whose ids are not yet in `existing`, keeping the
/// fetched order. Returns how many were appended.
pub fn merge_new(existing: &mut Vec<Product>, fetched: Vec<Product>) -> usize {
    let known: HashSet<ProductId> = existing.iter().map(|p| p.id.clone()).collect();
    let before = existing.len();
    existing.extend(fetched.into_iter().filter(|p| !known.contains(&p.id)));
    existing.len() - before
}

/// Fetch, de-duplicate by id and persist, reporting what happened. Nothing is
/// written when the fetch comes back empty.
pub async fn import_report<S, R>(
    store: &mut ProductStore<S>,
    source: &R,
) -> Result<ImportReport, ImportError>
where
    S: KeyValueStore,
    R: RemoteSource,
{
    let fetched = fetch_external(source).await;
    if fetched.is_empty() {
        return Ok(ImportReport::default());
    }

    let total = fetched.len();
    let mut products = store.load()?;
    let added = merge_new(&mut products, fetched);
    store.save(&products)?;

    let report = ImportReport {
        fetched: total,
        added,
        skipped: total - added,
    };
    tracing::info!(
        fetched = report.fetched,
        added = report.added,
        skipped = report.skipped,
        "remote catalog imported"
    );
    Ok(report)
}

/// `false` when nothing was fetched or persisting failed. `true` once the
/// merged catalog is saved, even if every fetched product already existed.
pub async fn import_external<S, R>(store: &mut ProductStore<S>, source: &R) -> bool
where
    S: KeyValueStore,
    R: RemoteSource,
{
    match import_report(store, source).await {
        Ok(report) => report.fetched > 0,
        Err(e) => {
            tracing::warn!(error = %e, "import failed");
            false
        }
    }
}
