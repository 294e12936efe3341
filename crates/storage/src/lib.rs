pub mod error;
pub mod products;
pub mod schema;
pub mod sqlite;
pub mod traits;

pub use error::StorageError;
pub use products::{PRODUCTS_KEY, ProductStore};
pub use sqlite::SqliteStorage;
pub use traits::*;
