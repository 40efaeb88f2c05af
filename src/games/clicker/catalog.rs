//! Upgrade catalog: the static definitions the store is populated from.
//!
//! All numbers are integers. JSON keys are camelCase, matching the names
//! item templates use for `{{field}}` placeholders.

use serde::Deserialize;
use thiserror::Error;

use super::template::{self, TemplateError};

const EMBEDDED_CATALOG: &str = include_str!("../../../assets/items.json");

/// Placeholder names an item description may reference.
pub const TEMPLATE_FIELDS: &[&str] = &[
    "name",
    "price",
    "quantity",
    "maxQuantity",
    "cpsAdder",
    "cpsAdderMultiplier",
    "clicksAdder",
];

/// One purchasable upgrade as defined in the catalog. Never mutated.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    /// Description template with `{{field}}` placeholders.
    #[serde(default)]
    pub text: String,
    /// Price of the first unit.
    pub price: u64,
    /// `None` means the item can be bought forever.
    #[serde(default)]
    pub max_quantity: Option<u32>,
    /// Passive clicks per tick granted by the first unit.
    #[serde(default)]
    pub cps_adder: u64,
    /// Factor the passive grant grows by after each purchase.
    #[serde(default = "default_cps_adder_multiplier")]
    pub cps_adder_multiplier: u64,
    /// Click bonus granted by every unit.
    #[serde(default)]
    pub clicks_adder: u64,
}

fn default_cps_adder_multiplier() -> u64 {
    2
}

impl CatalogEntry {
    #[cfg(test)]
    pub fn new(name: &str, text: &str, price: u64) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            price,
            max_quantity: None,
            cps_adder: 0,
            cps_adder_multiplier: default_cps_adder_multiplier(),
            clicks_adder: 0,
        }
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.price == 0 {
            return Err(CatalogError::ZeroPrice(self.name.clone()));
        }
        if self.max_quantity == Some(0) {
            return Err(CatalogError::ZeroMaxQuantity(self.name.clone()));
        }
        if self.cps_adder_multiplier == 0 {
            return Err(CatalogError::ZeroMultiplier(self.name.clone()));
        }
        let fields = template::fields(&self.text).map_err(|source| CatalogError::Template {
            item: self.name.clone(),
            source,
        })?;
        if let Some(unknown) = fields.into_iter().find(|f| !TEMPLATE_FIELDS.contains(f)) {
            return Err(CatalogError::Template {
                item: self.name.clone(),
                source: TemplateError::UnknownField(unknown.to_string()),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("item `{0}` must have a price greater than zero")]
    ZeroPrice(String),
    #[error("item `{0}` has maxQuantity 0; omit it for unlimited")]
    ZeroMaxQuantity(String),
    #[error("item `{0}` has cpsAdderMultiplier 0")]
    ZeroMultiplier(String),
    #[error("item `{item}` has a bad description: {source}")]
    Template {
        item: String,
        #[source]
        source: TemplateError,
    },
}

/// Parse and validate a catalog. Order is preserved; it is the display order.
pub fn parse_catalog(json: &str) -> Result<Vec<CatalogEntry>, CatalogError> {
    let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
    for entry in &entries {
        entry.validate()?;
    }
    Ok(entries)
}

/// The catalog shipped with the game. An invalid asset yields an empty store.
pub fn default_catalog() -> Vec<CatalogEntry> {
    match parse_catalog(EMBEDDED_CATALOG) {
        Ok(entries) => entries,
        Err(e) => {
            log::error!("embedded catalog rejected, store will be empty: {e}");
            Vec::new()
        }
    }
}
