//! Checks performed at the input boundary before the repository is called.
//! The repository itself trusts what it is given.

use crate::error::CoreError;
use crate::input::{NewProduct, NewVariant, ProductPatch, VariantPatch};
use crate::model::VariantAttributes;

/// Trimmed product name; empty or whitespace-only names are rejected.
pub fn product_name(raw: &str) -> Result<String, CoreError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(CoreError::EmptyName);
    }
    Ok(name.to_string())
}

/// A price must be a finite number greater than zero.
pub fn price(raw: &str) -> Result<f64, CoreError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(p) if p.is_finite() && p > 0.0 => Ok(p),
        _ => Err(CoreError::InvalidPrice(raw.to_string())),
    }
}

/// A stock quantity must be a whole number, zero or more.
pub fn stock(raw: &str) -> Result<u32, CoreError> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| CoreError::InvalidStock(raw.to_string()))
}

fn optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl NewProduct {
    pub fn from_form(name: &str, description: &str) -> Result<Self, CoreError> {
        Ok(Self {
            name: product_name(name)?,
            description: description.trim().to_string(),
        })
    }
}

impl ProductPatch {
    /// Edit-form submission: both fields are sent, name must be non-empty.
    pub fn from_form(name: &str, description: &str) -> Result<Self, CoreError> {
        Ok(Self {
            name: Some(product_name(name)?),
            description: Some(description.trim().to_string()),
        })
    }
}

/// Raw text of the variant add/edit form.
#[derive(Debug, Clone, Default)]
pub struct VariantForm {
    pub size: String,
    pub color: String,
    pub material: String,
    pub price: String,
    pub sku: String,
    pub stock: String,
}

impl VariantForm {
    fn attributes(&self) -> VariantAttributes {
        VariantAttributes {
            size: optional(&self.size),
            color: optional(&self.color),
            material: optional(&self.material),
            ..Default::default()
        }
    }

    /// Blank attributes become absent; a blank SKU is left blank so the
    /// repository synthesizes one.
    pub fn into_new_variant(self) -> Result<NewVariant, CoreError> {
        let price = price(&self.price)?;
        let stock = stock(&self.stock)?;
        Ok(NewVariant {
            attributes: self.attributes(),
            price,
            sku: self.sku.trim().to_string(),
            stock,
        })
    }

    /// Edit-form submission. Every field is sent, so every field is present
    /// in the patch; a blank SKU is replaced with a synthetic one.
    pub fn into_patch(self) -> Result<VariantPatch, CoreError> {
        let price = price(&self.price)?;
        let stock = stock(&self.stock)?;
        let sku = optional(&self.sku)
            .unwrap_or_else(|| crate::clock::synthetic_sku(crate::clock::now()));
        Ok(VariantPatch {
            attributes: Some(self.attributes()),
            price: Some(price),
            sku: Some(sku),
            stock: Some(stock),
        })
    }
}
