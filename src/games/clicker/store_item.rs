//! One purchasable upgrade: its price curve and the purchase transaction.

use super::catalog::CatalogEntry;
use super::template;
use super::wallet::Wallet;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ItemStatus {
    Available,
    /// Max quantity reached. Irreversible.
    Depleted,
}

/// Result of a buy attempt. Every variant except `Purchased` means nothing
/// changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PurchaseOutcome {
    Purchased { paid: u64, quantity: u32 },
    Unaffordable { price: u64, balance: u64 },
    Depleted,
    UnknownItem,
    /// The session is over; the store no longer trades.
    GameOver,
}

#[derive(Clone, Debug)]
pub struct StoreItem {
    entry: CatalogEntry,
    price: u64,
    quantity: u32,
    /// Passive income the next unit grants; compounds after each purchase.
    cps_adder: u64,
}

impl StoreItem {
    pub fn new(entry: CatalogEntry) -> Self {
        Self {
            price: entry.price,
            quantity: 0,
            cps_adder: entry.cps_adder,
            entry,
        }
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    /// Current price of the next unit.
    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn max_quantity(&self) -> Option<u32> {
        self.entry.max_quantity
    }

    #[cfg(test)]
    pub fn cps_adder(&self) -> u64 {
        self.cps_adder
    }

    pub fn status(&self) -> ItemStatus {
        match self.entry.max_quantity {
            Some(max) if self.quantity >= max => ItemStatus::Depleted,
            _ => ItemStatus::Available,
        }
    }

    pub fn can_afford(&self, balance: u64) -> bool {
        balance >= self.price
    }

    /// Buy one unit, paying from `wallet`.
    ///
    /// Either every effect is applied or none is: the debit, the passive and
    /// click grants, the quantity bump, the compounding of the passive grant
    /// and the new price `base_price * (quantity + 1)`.
    pub fn purchase(&mut self, wallet: &mut dyn Wallet) -> PurchaseOutcome {
        if self.status() == ItemStatus::Depleted {
            return PurchaseOutcome::Depleted;
        }
        let balance = wallet.balance();
        if !self.can_afford(balance) || !wallet.debit(self.price) {
            return PurchaseOutcome::Unaffordable {
                price: self.price,
                balance,
            };
        }

        if self.cps_adder > 0 {
            wallet.grant_passive_income(self.cps_adder);
        }
        if self.entry.clicks_adder > 0 {
            wallet.grant_click_bonus(self.entry.clicks_adder);
        }

        let paid = self.price;
        self.quantity += 1;
        self.cps_adder = self.cps_adder.saturating_mul(self.entry.cps_adder_multiplier);
        self.price = self
            .entry
            .price
            .saturating_mul(u64::from(self.quantity) + 1);

        PurchaseOutcome::Purchased {
            paid,
            quantity: self.quantity,
        }
    }

    /// Current value of a template field, by its catalog name.
    pub fn field(&self, name: &str) -> Option<String> {
        match name {
            "name" => Some(self.entry.name.clone()),
            "price" => Some(self.price.to_string()),
            "quantity" => Some(self.quantity.to_string()),
            "maxQuantity" => Some(
                self.entry
                    .max_quantity
                    .map_or_else(|| "∞".to_string(), |m| m.to_string()),
            ),
            "cpsAdder" => Some(self.cps_adder.to_string()),
            "cpsAdderMultiplier" => Some(self.entry.cps_adder_multiplier.to_string()),
            "clicksAdder" => Some(self.entry.clicks_adder.to_string()),
            _ => None,
        }
    }

    /// The item's description with current values filled in.
    ///
    /// The catalog loader rejects bad templates up front, so the strict
    /// renderer normally succeeds. If it doesn't, unknown placeholders render
    /// blank rather than failing the whole row.
    pub fn render_text(&self) -> String {
        match template::render(&self.entry.text, |f| self.field(f)) {
            Ok(text) => text,
            Err(err) => {
                log::debug!("{}: {}, blanking", self.entry.name, err);
                template::render_or_blank(&self.entry.text, |f| self.field(f)).0
            }
        }
    }
}
