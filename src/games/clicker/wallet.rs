//! The capability a store item needs from the game to complete a purchase.
//!
//! Store items never see the game state directly. They check the balance,
//! debit it, and hand out the upgrade's effects through this trait.

pub trait Wallet {
    /// Clicks currently available to spend.
    fn balance(&self) -> u64;

    /// Remove `amount` from the balance. Returns false, leaving the balance
    /// unchanged, if the balance is too small.
    fn debit(&mut self, amount: u64) -> bool;

    /// Raise the passive income paid on every timer tick.
    fn grant_passive_income(&mut self, amount: u64);

    /// Raise the bonus applied to every manual click.
    fn grant_click_bonus(&mut self, amount: u64);
}

/// Plain counters, for exercising purchases without a game around them.
#[cfg(test)]
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TestWallet {
    pub balance: u64,
    pub passive_income: u64,
    pub click_bonus: u64,
}

#[cfg(test)]
impl TestWallet {
    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance,
            ..Self::default()
        }
    }
}

#[cfg(test)]
impl Wallet for TestWallet {
    fn balance(&self) -> u64 {
        self.balance
    }

    fn debit(&mut self, amount: u64) -> bool {
        match self.balance.checked_sub(amount) {
            Some(rest) => {
                self.balance = rest;
                true
            }
            None => false,
        }
    }

    fn grant_passive_income(&mut self, amount: u64) {
        self.passive_income += amount;
    }

    fn grant_click_bonus(&mut self, amount: u64) {
        self.click_bonus += amount;
    }
}
