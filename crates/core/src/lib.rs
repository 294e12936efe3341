pub mod clock;
pub mod error;
pub mod ids;
pub mod input;
pub mod model;
pub mod validate;

pub use error::CoreError;
pub use ids::*;
pub use input::{NewProduct, NewVariant, ProductPatch, VariantPatch};
pub use model::{Product, ProductSummary, Variant, VariantAttributes};
