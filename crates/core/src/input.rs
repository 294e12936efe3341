use chrono::{DateTime, Utc};

use crate::clock;
use crate::ids::{ProductId, VariantId};
use crate::model::{Product, Variant, VariantAttributes};

/// Fields a caller supplies when creating a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }

    pub fn into_product(self, id: ProductId, now: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            created_at: now,
            updated_at: now,
            variants: Vec::new(),
        }
    }
}

/// Fields a caller supplies when creating a variant. A blank `sku` is
/// replaced with a synthetic one at creation time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewVariant {
    pub attributes: VariantAttributes,
    pub price: f64,
    pub sku: String,
    pub stock: u32,
}

impl NewVariant {
    pub fn into_variant(self, id: VariantId, product_id: ProductId, now: DateTime<Utc>) -> Variant {
        let sku = if self.sku.trim().is_empty() {
            clock::synthetic_sku(now)
        } else {
            self.sku
        };
        Variant {
            id,
            product_id,
            attributes: self.attributes,
            price: self.price,
            sku,
            stock: self.stock,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial product update. `None` leaves the field as it is; `Some("")`
/// explicitly clears a description.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl ProductPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none()
    }

    /// Shallow merge over `product`, always refreshing `updated_at`.
    pub fn apply(self, product: &mut Product, now: DateTime<Utc>) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        product.updated_at = now;
    }
}

/// Partial variant update. `attributes` replaces the whole attribute map when
/// present.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VariantPatch {
    pub attributes: Option<VariantAttributes>,
    pub price: Option<f64>,
    pub sku: Option<String>,
    pub stock: Option<u32>,
}

impl VariantPatch {
    pub fn attributes(mut self, attributes: VariantAttributes) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn sku(mut self, sku: impl Into<String>) -> Self {
        self.sku = Some(sku.into());
        self
    }

    pub fn stock(mut self, stock: u32) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_none()
            && self.price.is_none()
            && self.sku.is_none()
            && self.stock.is_none()
    }

    pub fn apply(self, variant: &mut Variant, now: DateTime<Utc>) {
        if let Some(attributes) = self.attributes {
            variant.attributes = attributes;
        }
        if let Some(price) = self.price {
            variant.price = price;
        }
        if let Some(sku) = self.sku {
            variant.sku = sku;
        }
        if let Some(stock) = self.stock {
            variant.stock = stock;
        }
        variant.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(ms: i64) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(ms).unwrap()
    }

    #[test]
    fn new_product_sets_equal_timestamps() {
        let p = NewProduct::new("Shoe", "d").into_product(ProductId::from("p"), at(5));
        assert_eq!(p.created_at, p.updated_at);
        assert!(p.variants.is_empty());
    }

    #[test]
    fn blank_sku_is_synthesized() {
        let input = NewVariant {
            price: 20.0,
            sku: "   ".into(),
            stock: 5,
            ..Default::default()
        };
        let v = input.into_variant(
            VariantId::from("v"),
            ProductId::from("p"),
            at(1_714_557_600_000),
        );
        assert_eq!(v.sku, "SKU-1714557600000");
        assert_eq!(v.product_id, ProductId::from("p"));
    }

    #[test]
    fn explicit_sku_is_kept() {
        let input = NewVariant {
            price: 1.0,
            sku: "ABC-1".into(),
            ..Default::default()
        };
        let v = input.into_variant(VariantId::from("v"), ProductId::from("p"), at(0));
        assert_eq!(v.sku, "ABC-1");
    }

    #[test]
    fn product_patch_only_touches_present_fields() {
        let mut p = NewProduct::new("Shoe", "old").into_product(ProductId::from("p"), at(10));
        ProductPatch::default().description("").apply(&mut p, at(20));
        assert_eq!(p.name, "Shoe");
        assert_eq!(p.description, "");
        assert_eq!(p.created_at, at(10));
        assert_eq!(p.updated_at, at(20));
    }

    #[test]
    fn variant_patch_distinguishes_zero_from_absent() {
        let input = NewVariant {
            price: 3.0,
            sku: "S".into(),
            stock: 7,
            ..Default::default()
        };
        let mut v = input.into_variant(VariantId::from("v"), ProductId::from("p"), at(10));
        VariantPatch::default().stock(0).apply(&mut v, at(30));
        assert_eq!(v.stock, 0);
        assert_eq!(v.price, 3.0);
        assert_eq!(v.sku, "S");
        assert_eq!(v.updated_at, at(30));
        assert!(VariantPatch::default().is_empty());
    }
}
