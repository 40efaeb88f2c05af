//! Semantic action IDs for clicker click targets.
//!
//! These IDs are registered during render and dispatched via `InputKind::Click`.

/// The big click button.
pub const CLICK_BUTTON: u16 = 0;

/// Buy a store item (base + store index).
pub const BUY_ITEM_BASE: u16 = 100;

/// Store index for a buy action ID, if it is one.
pub fn buy_index(action_id: u16) -> Option<usize> {
    action_id
        .checked_sub(BUY_ITEM_BASE)
        .map(usize::from)
}
