//! Click Store: click a button, spend clicks on upgrades, don't cheat.

pub mod actions;
pub mod catalog;
pub mod config;
pub mod logic;
pub mod render;
pub mod state;
pub mod store;
pub mod store_item;
pub mod strategy;
pub mod template;
pub mod wallet;

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::games::Game;
use crate::input::{ClickState, InputEvent, InputKind};
use crate::time::Ticker;

use catalog::CatalogEntry;
use config::GameConfig;
use logic::ClickOutcome;
use state::ClickerState;
use store::Store;

/// Highlight animations run at a fixed 10 frames per second.
const ANIM_FRAMES_PER_SEC: u32 = 10;

pub struct ClickerGame {
    pub state: ClickerState,
    pub store: Store,
    /// Drives passive income. Stopped for good when cheating is detected.
    passive_timer: Ticker,
    anim_clock: Ticker,
}

impl ClickerGame {
    /// Build a session around an injected passive timer. The game owns the
    /// timer's lifecycle from here on: it starts it now and stops it on
    /// termination.
    pub fn new(config: &GameConfig, catalog: Vec<CatalogEntry>, mut passive_timer: Ticker) -> Self {
        passive_timer.start();
        Self {
            state: ClickerState::new(config),
            store: Store::from_catalog(catalog),
            passive_timer,
            anim_clock: Ticker::per_second(ANIM_FRAMES_PER_SEC),
        }
    }

    /// The shipped config and catalog with a wall-clock passive timer.
    ///
    /// The timer keeps time across slow frames and hidden tabs, so income
    /// accrues once per interval however often the page repaints.
    pub fn with_defaults() -> Self {
        let config = GameConfig::load();
        let timer = Ticker::catching_up(config.tick_interval_ms, config.max_catchup_ticks);
        Self::new(&config, catalog::default_catalog(), timer)
    }

    #[cfg(test)]
    pub fn passive_timer(&self) -> &Ticker {
        &self.passive_timer
    }

    /// Pay `delta_ticks` passive ticks, as if the timer had fired.
    pub fn tick(&mut self, delta_ticks: u32) {
        logic::tick(&mut self.state, delta_ticks);
    }

    fn click(&mut self, event: &InputEvent) {
        if let ClickOutcome::Cheating(_) =
            logic::register_click(&mut self.state, event.at_ms, event.trusted)
        {
            if self.passive_timer.stop() {
                log::info!(
                    "passive timer stopped after {} ticks",
                    self.passive_timer.total_ticks
                );
            }
        }
    }
}

impl Game for ClickerGame {
    fn handle_input(&mut self, event: &InputEvent) -> bool {
        // A held key is one press, not a stream of perfectly regular clicks.
        if !self.state.is_active() || event.repeat {
            return false;
        }
        match event.kind {
            InputKind::Key('c') | InputKind::Key(' ') | InputKind::Click(actions::CLICK_BUTTON) => {
                self.click(event);
                true
            }
            InputKind::Key(key @ '1'..='9') => {
                let index = (key as u8 - b'1') as usize;
                logic::buy_item(&mut self.state, &mut self.store, index);
                true
            }
            InputKind::Click(id) => match actions::buy_index(id) {
                Some(index) => {
                    logic::buy_item(&mut self.state, &mut self.store, index);
                    true
                }
                None => false,
            },
            InputKind::Key(_) => false,
        }
    }

    fn advance(&mut self, now_ms: f64) {
        let frames = self.anim_clock.update(now_ms);
        logic::decay_flashes(&mut self.state, frames);
        let ticks = self.passive_timer.update(now_ms);
        self.tick(ticks);
    }

    fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, &self.store, f, area, click_state);
    }
}
