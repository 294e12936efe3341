use std::sync::atomic::{AtomicUsize, Ordering};

use catalog_engine::{ImportError, RemoteProduct, RemoteSource};

/// Serves a fixed list of remote records and counts how often it was asked.
#[derive(Debug, Default)]
pub struct StaticSource {
    records: Vec<RemoteProduct>,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn new(records: Vec<RemoteProduct>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
        }
    }

    /// Records with the given ids and otherwise generic content.
    pub fn with_ids(ids: &[u64]) -> Self {
        Self::new(ids.iter().copied().map(remote_product).collect())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl RemoteSource for StaticSource {
    async fn fetch(&self) -> Result<Vec<RemoteProduct>, ImportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.records.clone())
    }
}

/// Always fails as if the endpoint answered 503.
#[derive(Debug, Default)]
pub struct FailingSource;

impl RemoteSource for FailingSource {
    async fn fetch(&self) -> Result<Vec<RemoteProduct>, ImportError> {
        Err(ImportError::Status(reqwest::StatusCode::SERVICE_UNAVAILABLE))
    }
}

pub fn remote_product(id: u64) -> RemoteProduct {
    RemoteProduct {
        id,
        title: format!("Remote item {id}"),
        description: format!("Imported record {id}"),
        category: "jewelery".to_string(),
        price: 10.0 + id as f64,
    }
}
