use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::de::{self, Deserializer, Unexpected, Visitor};
use serde::{Deserialize, Serialize};

use crate::clock::iso_millis;
use crate::ids::{ProductId, VariantId};

/// A catalog entry. Variants are owned by value, so removing a product
/// removes its variants with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    pub id: VariantId,
    pub product_id: ProductId,
    #[serde(default)]
    pub attributes: VariantAttributes,
    pub price: f64,
    pub sku: String,
    #[serde(deserialize_with = "stock_count")]
    pub stock: u32,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "iso_millis")]
    pub updated_at: DateTime<Utc>,
}

/// Distinguishing attributes of a variant: three well-known keys plus any
/// number of free-form ones (the import path stores `category` here).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl VariantAttributes {
    pub fn is_empty(&self) -> bool {
        self.size.is_none()
            && self.color.is_none()
            && self.material.is_none()
            && self.extra.is_empty()
    }

    /// Look up any attribute by key, well-known or free-form.
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "size" => self.size.as_deref(),
            "color" => self.color.as_deref(),
            "material" => self.material.as_deref(),
            other => self.extra.get(other).map(String::as_str),
        }
    }

    /// All present attributes in display order: size, color, material, then
    /// free-form keys alphabetically.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        [
            ("size", self.size.as_deref()),
            ("color", self.color.as_deref()),
            ("material", self.material.as_deref()),
        ]
        .into_iter()
        .filter_map(|(k, v)| v.map(|v| (k, v)))
        .chain(self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str())))
    }
}

/// Aggregate figures shown next to a product.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProductSummary {
    pub variant_count: usize,
    pub total_stock: u64,
    pub lowest_price: f64,
    pub highest_price: f64,
}

impl Product {
    /// Case-insensitive substring match on name or description. An empty
    /// term matches every product.
    pub fn matches(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term) || self.description.to_lowercase().contains(&term)
    }

    /// Prices are 0 when the product has no variants.
    pub fn summary(&self) -> ProductSummary {
        let total_stock = self.variants.iter().map(|v| u64::from(v.stock)).sum();
        let (lowest_price, highest_price) = if self.variants.is_empty() {
            (0.0, 0.0)
        } else {
            self.variants.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
                (lo.min(v.price), hi.max(v.price))
            })
        };
        ProductSummary {
            variant_count: self.variants.len(),
            total_stock,
            lowest_price,
            highest_price,
        }
    }
}

/// Stock as stored by older browser forms may be fractional (`2.5`); it is
/// truncated toward zero. Negative and out-of-range values are rejected.
fn stock_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    struct StockVisitor;

    impl<'de> Visitor<'de> for StockVisitor {
        type Value = u32;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a non-negative stock count")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u32, E> {
            u32::try_from(v).map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u32, E> {
            if (0.0..=f64::from(u32::MAX)).contains(&v) {
                Ok(v.trunc() as u32)
            } else {
                Err(E::invalid_value(Unexpected::Float(v), &self))
            }
        }
    }

    deserializer.deserialize_any(StockVisitor)
}
