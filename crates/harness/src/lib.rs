pub mod catalog;
pub mod remote;

pub use catalog::TestCatalog;
pub use remote::{FailingSource, StaticSource, remote_product};

/// Installs a fmt subscriber filtered by `RUST_LOG` (default `warn`). Safe to
/// call from every test.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
