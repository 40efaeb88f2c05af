//! Clicker game state definitions.

use std::collections::VecDeque;

use super::config::GameConfig;
use super::strategy::{self, CheatHeuristic, CheatReason, ClickValueStrategy};
use super::wallet::Wallet;

/// Whether the session still accepts input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Active,
    /// Cheating was detected. Irreversible for the session.
    Terminated,
}

/// Log entry for the message panel.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub is_important: bool,
}

/// Full state of a clicker session.
pub struct ClickerState {
    /// Clicks available to spend.
    pub total_clicks: u64,
    /// Accumulated click bonus; its meaning depends on `click_policy`.
    pub click_bonus: u64,
    /// Clicks paid out on every passive timer tick.
    pub passive_income_per_tick: u64,
    /// Host timestamp of the previous manual click.
    pub last_click_at: Option<u64>,
    /// Recent inter-click durations (ms), oldest first.
    pub click_intervals: VecDeque<u64>,
    pub history_capacity: usize,
    pub regularity_strikes: u32,
    pub phase: Phase,
    pub cheat_reason: Option<CheatReason>,
    pub click_policy: Box<dyn ClickValueStrategy>,
    pub heuristic: Box<dyn CheatHeuristic>,
    /// Manual clicks this session (stats only).
    pub manual_clicks: u64,
    /// Passive ticks paid this session (stats only).
    pub passive_ticks: u64,
    pub log: Vec<LogEntry>,
    /// Animation frames of button highlight left after a click.
    pub click_flash: u32,
    /// Animation frames of store highlight left after a purchase.
    pub purchase_flash: u32,
    /// Animation frames of "can't buy" highlight left after a rejection.
    pub reject_flash: u32,
}

impl ClickerState {
    pub fn new(config: &GameConfig) -> Self {
        let click_value = strategy::click_value_strategy(config.click_value);
        let heuristic = strategy::cheat_heuristic(config);
        Self {
            total_clicks: 0,
            click_bonus: click_value.initial_bonus(),
            passive_income_per_tick: 0,
            last_click_at: None,
            click_intervals: VecDeque::with_capacity(config.history_capacity),
            history_capacity: config.history_capacity,
            regularity_strikes: 0,
            phase: Phase::Active,
            cheat_reason: None,
            click_policy: click_value,
            heuristic,
            manual_clicks: 0,
            passive_ticks: 0,
            log: vec![LogEntry {
                text: "Welcome! Click to earn, spend clicks in the store.".into(),
                is_important: true,
            }],
            click_flash: 0,
            purchase_flash: 0,
            reject_flash: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// What the next manual click is worth.
    pub fn click_value(&self) -> u64 {
        self.click_policy.click_value(self.click_bonus)
    }

    /// Append an interval, evicting the oldest beyond capacity.
    pub fn record_interval(&mut self, interval_ms: u64) {
        self.click_intervals.push_back(interval_ms);
        while self.click_intervals.len() > self.history_capacity {
            self.click_intervals.pop_front();
        }
    }

    /// Put every game counter back to its starting value. Phase, the log and
    /// the cheat reason are left alone.
    pub fn reset_counters(&mut self) {
        self.total_clicks = 0;
        self.click_bonus = self.click_policy.initial_bonus();
        self.passive_income_per_tick = 0;
        self.last_click_at = None;
        self.click_intervals.clear();
        self.regularity_strikes = 0;
        self.manual_clicks = 0;
        self.passive_ticks = 0;
        self.click_flash = 0;
        self.purchase_flash = 0;
        self.reject_flash = 0;
    }

    pub fn add_log(&mut self, text: &str, is_important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            is_important,
        });
        if self.log.len() > 50 {
            self.log.remove(0);
        }
    }
}

impl Wallet for ClickerState {
    fn balance(&self) -> u64 {
        self.total_clicks
    }

    fn debit(&mut self, amount: u64) -> bool {
        match self.total_clicks.checked_sub(amount) {
            Some(rest) => {
                self.total_clicks = rest;
                true
            }
            None => false,
        }
    }

    fn grant_passive_income(&mut self, amount: u64) {
        self.passive_income_per_tick = self.passive_income_per_tick.saturating_add(amount);
    }

    fn grant_click_bonus(&mut self, amount: u64) {
        self.click_bonus = self.click_bonus.saturating_add(amount);
    }
}
