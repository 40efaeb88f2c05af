mod games;
mod input;
mod logging;
mod time;
mod widgets;

use std::cell::{Cell, RefCell};
use std::{io, rc::Rc};

use games::clicker::ClickerGame;
use games::Game;
use input::{pixel_x_to_col, pixel_y_to_row, ClickState, InputEvent};
use ratzilla::event::{KeyCode, MouseButton, MouseEventKind};
use ratzilla::ratatui::Terminal;
use ratzilla::{DomBackend, WebRenderer};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// DOM events whose `isTrusted` flag the trust probe records.
const PROBED_EVENTS: &[&str] = &[
    "mousedown",
    "mouseup",
    "click",
    "pointerdown",
    "touchstart",
    "keydown",
];

/// Host clock in milliseconds. `performance.now()` when available.
fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// Flags of the most recent DOM input event that ratzilla's events drop.
struct LastDomEvent {
    trusted: Cell<bool>,
    /// Keyboard auto-repeat. Always false for pointer events.
    repeat: Cell<bool>,
}

/// Record `Event.isTrusted` (and `KeyboardEvent.repeat`) of every input
/// event before ratzilla sees it.
///
/// The listeners run in the capture phase on `window`, so they fire ahead of
/// the terminal's own handlers for the same event. ratzilla's event types do
/// not carry these flags, so the handlers read them back from `last`.
fn install_trust_probe(last: Rc<LastDomEvent>) {
    let Some(window) = web_sys::window() else {
        log::warn!("no window; trust probe not installed");
        return;
    };
    let probe = Closure::<dyn FnMut(web_sys::Event)>::new(move |event: web_sys::Event| {
        last.trusted.set(event.is_trusted());
        let repeat = event
            .dyn_ref::<web_sys::KeyboardEvent>()
            .is_some_and(|key| key.repeat());
        last.repeat.set(repeat);
    });
    for name in PROBED_EVENTS {
        if let Err(err) = window.add_event_listener_with_callback_and_bool(
            name,
            probe.as_ref().unchecked_ref(),
            true,
        ) {
            log::error!("trust probe for {} failed: {:?}", name, err);
        }
    }
    // Lives for the whole page.
    probe.forget();
}

/// Convert a mouse position to a terminal cell using the grid's bounding rect.
fn dom_pixel_to_cell(mouse_x: u32, mouse_y: u32, cs: &ClickState) -> Option<(u16, u16)> {
    let document = web_sys::window()?.document()?;

    // DomBackend creates a <div> as the grid container inside <body>.
    let grid = document.query_selector("body > div").ok()??;
    let rect = grid.get_bounding_client_rect();

    let col = pixel_x_to_col(mouse_x as f64 - rect.left(), rect.width(), cs.terminal_cols)?;
    let row = pixel_y_to_row(mouse_y as f64 - rect.top(), rect.height(), cs.terminal_rows)?;
    Some((col, row))
}

fn main() -> io::Result<()> {
    console_error_panic_hook::set_once();
    logging::init(log::LevelFilter::Info);

    let game = Rc::new(RefCell::new(ClickerGame::with_defaults()));
    let click_state = Rc::new(RefCell::new(ClickState::new()));
    let last_event = Rc::new(LastDomEvent {
        trusted: Cell::new(true),
        repeat: Cell::new(false),
    });
    install_trust_probe(last_event.clone());

    let backend = DomBackend::new()?;
    let terminal = Terminal::new(backend)?;

    terminal.on_mouse_event({
        let game = game.clone();
        let click_state = click_state.clone();
        let last_event = last_event.clone();
        move |mouse_event| {
            if mouse_event.event != MouseEventKind::Pressed
                || mouse_event.button != MouseButton::Left
            {
                return;
            }

            let cs = click_state.borrow();
            if cs.terminal_rows == 0 || cs.terminal_cols == 0 {
                return;
            }
            let Some((col, row)) = dom_pixel_to_cell(mouse_event.x, mouse_event.y, &cs) else {
                return;
            };
            let action = cs.hit_test(col, row);
            drop(cs);

            log::debug!("click at ({}, {}) -> {:?}", col, row, action);
            if let Some(action_id) = action {
                let event = InputEvent::click(action_id, now_ms() as u64)
                    .with_trust(last_event.trusted.get());
                game.borrow_mut().handle_input(&event);
            }
        }
    });

    terminal.on_key_event({
        let game = game.clone();
        move |key_event| {
            if let KeyCode::Char(c) = key_event.code {
                let event = InputEvent::key(c.to_ascii_lowercase(), now_ms() as u64)
                    .with_trust(last_event.trusted.get())
                    .with_repeat(last_event.repeat.get());
                game.borrow_mut().handle_input(&event);
            }
        }
    });

    terminal.draw_web({
        let click_state = click_state.clone();
        move |f| {
            let size = f.area();
            {
                let mut cs = click_state.borrow_mut();
                cs.terminal_cols = size.width;
                cs.terminal_rows = size.height;
                cs.clear_targets();
            }

            game.borrow_mut().advance(now_ms());
            game.borrow().render(f, size, &click_state);
        }
    });

    Ok(())
}
