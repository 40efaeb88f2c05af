//! Ordered registry of store items. Insertion order is display order.

use super::catalog::CatalogEntry;
use super::store_item::{ItemStatus, PurchaseOutcome, StoreItem};
use super::wallet::Wallet;

/// Everything the renderer needs to draw one store row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemView {
    pub name: String,
    pub price: u64,
    pub quantity: u32,
    pub max_quantity: Option<u32>,
    pub text: String,
    pub affordable: bool,
    pub depleted: bool,
}

#[derive(Default)]
pub struct Store {
    items: Vec<StoreItem>,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_catalog(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let mut store = Self::new();
        for entry in entries {
            store.add_item(entry);
        }
        store
    }

    /// Append a fresh item for `entry`. Returns its index.
    pub fn add_item(&mut self, entry: CatalogEntry) -> usize {
        log::debug!("store: added {} at {}", entry.name, entry.price);
        self.items.push(StoreItem::new(entry));
        self.items.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&StoreItem> {
        self.items.get(index)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Views of every item in display order, judged against `balance`.
    pub fn render_all(&self, balance: u64) -> Vec<ItemView> {
        self.items
            .iter()
            .map(|item| ItemView {
                name: item.name().to_string(),
                price: item.price(),
                quantity: item.quantity(),
                max_quantity: item.max_quantity(),
                text: item.render_text(),
                affordable: item.can_afford(balance),
                depleted: item.status() == ItemStatus::Depleted,
            })
            .collect()
    }

    /// Route a buy action to the item at `index`.
    pub fn purchase(&mut self, index: usize, wallet: &mut dyn Wallet) -> PurchaseOutcome {
        match self.items.get_mut(index) {
            Some(item) => item.purchase(wallet),
            None => PurchaseOutcome::UnknownItem,
        }
    }
}
