//! Clicker game logic. Pure functions over the state, fully testable.
//!
//! Nothing here reads a clock. Click timestamps arrive with the input event
//! and passive ticks are counted by the caller's timer.

use super::state::{ClickerState, Phase};
use super::store::Store;
use super::store_item::PurchaseOutcome;
use super::strategy::{self, CheatReason, ClickSample, Verdict};

/// Animation frames (10/s) a highlight stays on.
const CLICK_FLASH_FRAMES: u32 = 2;
const PURCHASE_FLASH_FRAMES: u32 = 5;
const REJECT_FLASH_FRAMES: u32 = 4;

#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// The click was counted and earned `value` clicks.
    Counted { value: u64 },
    /// The session is over; the click was dropped.
    Ignored,
    /// The click tripped the cheat heuristic and ended the session.
    Cheating(CheatReason),
}

/// Manual click at host time `at_ms`.
///
/// Records the interval since the previous click, pays out the current click
/// value, then judges the click. A flagged click ends the session.
pub fn register_click(state: &mut ClickerState, at_ms: u64, trusted: bool) -> ClickOutcome {
    if !state.is_active() {
        return ClickOutcome::Ignored;
    }

    let elapsed = state.last_click_at.map(|prev| at_ms.saturating_sub(prev));
    if let Some(interval) = elapsed {
        state.record_interval(interval);
    }

    let value = state.click_value();
    state.total_clicks = state.total_clicks.saturating_add(value);
    state.manual_clicks += 1;
    state.last_click_at = Some(at_ms);
    state.click_flash = CLICK_FLASH_FRAMES;

    match run_cheat_heuristic(state, elapsed, trusted) {
        Some(reason) => {
            terminate(state, reason.clone());
            ClickOutcome::Cheating(reason)
        }
        None => ClickOutcome::Counted { value },
    }
}

/// Judge the click just recorded. Strikes are tallied on the state; the
/// returned reason means the session must end.
pub fn run_cheat_heuristic(
    state: &mut ClickerState,
    elapsed_ms: Option<u64>,
    trusted: bool,
) -> Option<CheatReason> {
    if let Verdict::Cheating(reason) = strategy::trust_check(trusted) {
        return Some(reason);
    }

    let verdict = state.heuristic.assess(&ClickSample {
        elapsed_ms,
        intervals: &state.click_intervals,
        capacity: state.history_capacity,
        strikes: state.regularity_strikes,
    });
    match verdict {
        Verdict::Clean => None,
        Verdict::Strike => {
            state.regularity_strikes += 1;
            log::debug!("regular click window, strike {}", state.regularity_strikes);
            None
        }
        Verdict::Cheating(reason) => Some(reason),
    }
}

/// End the session: counters back to zero, no more input or income.
pub fn terminate(state: &mut ClickerState, reason: CheatReason) {
    if state.phase == Phase::Terminated {
        return;
    }
    log::warn!("cheating detected: {}", reason.describe());
    state.reset_counters();
    state.phase = Phase::Terminated;
    state.add_log(&format!("Cheating detected: {}", reason.describe()), true);
    state.cheat_reason = Some(reason);
}

/// Pay one passive tick.
pub fn apply_passive_tick(state: &mut ClickerState) {
    if !state.is_active() {
        return;
    }
    state.total_clicks = state.total_clicks.saturating_add(state.passive_income_per_tick);
    state.passive_ticks += 1;
}

/// Pay `delta_ticks` passive ticks.
pub fn tick(state: &mut ClickerState, delta_ticks: u32) {
    for _ in 0..delta_ticks {
        apply_passive_tick(state);
    }
}

/// Count down highlight timers by `frames` animation frames.
pub fn decay_flashes(state: &mut ClickerState, frames: u32) {
    state.click_flash = state.click_flash.saturating_sub(frames);
    state.purchase_flash = state.purchase_flash.saturating_sub(frames);
    state.reject_flash = state.reject_flash.saturating_sub(frames);
}

/// Try to buy the store item at `index`, logging the result.
pub fn buy_item(state: &mut ClickerState, store: &mut Store, index: usize) -> PurchaseOutcome {
    if !state.is_active() {
        return PurchaseOutcome::GameOver;
    }
    let outcome = store.purchase(index, &mut *state);
    let name = store
        .get(index)
        .map(|item| item.name().to_string())
        .unwrap_or_default();
    match &outcome {
        PurchaseOutcome::Purchased { paid, quantity } => {
            state.purchase_flash = PURCHASE_FLASH_FRAMES;
            state.add_log(
                &format!("Bought {} for {} ({} owned)", name, format_number(*paid), quantity),
                false,
            );
        }
        PurchaseOutcome::Unaffordable { price, balance } => {
            state.reject_flash = REJECT_FLASH_FRAMES;
            state.add_log(&shortfall_message(&name, *price, *balance), false);
        }
        PurchaseOutcome::Depleted => {
            state.reject_flash = REJECT_FLASH_FRAMES;
            state.add_log(&format!("{}: max quantity reached", name), false);
        }
        PurchaseOutcome::UnknownItem | PurchaseOutcome::GameOver => {}
    }
    outcome
}

fn shortfall_message(name: &str, price: u64, balance: u64) -> String {
    // A wallet may refuse a debit it could cover; never report a negative gap.
    let short = price.saturating_sub(balance).max(1);
    format!("Can't afford {}: {} more clicks needed", name, format_number(short))
}

/// Format a number with commas (e.g. 1234567 → "1,234,567").
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result
}
