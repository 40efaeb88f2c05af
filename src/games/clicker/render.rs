//! Click Store rendering: counter, click button, store list and log.

use std::cell::RefCell;
use std::rc::Rc;

use ratzilla::ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::ClickableList;

use super::actions::{CLICK_BUTTON, BUY_ITEM_BASE};
use super::logic::format_number;
use super::state::{ClickerState, Phase};
use super::store::{ItemView, Store};

pub fn render(
    state: &ClickerState,
    store: &Store,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    if state.phase == Phase::Terminated {
        render_terminated(state, f, area);
        return;
    }

    // Log panel on the right when wide enough (>= 80 cols)
    let (main_area, log_area) = if area.width >= 80 {
        let h_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(area);
        (h_chunks[0], Some(h_chunks[1]))
    } else {
        (area, None)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Length(6), // counter + button
            Constraint::Min(5),    // store
        ])
        .split(main_area);

    render_title(f, chunks[0]);
    render_counter(state, f, chunks[1], click_state);
    render_store(state, store, f, chunks[2], click_state);

    if let Some(log_area) = log_area {
        render_log(state, f, log_area);
    }
}

fn panel_borders(width: u16) -> Borders {
    if is_narrow_layout(width) {
        Borders::TOP | Borders::BOTTOM
    } else {
        Borders::ALL
    }
}

fn render_title(f: &mut Frame, area: Rect) {
    let widget = Paragraph::new(Line::from(Span::styled(
        "CLICK STORE",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )))
    .centered()
    .block(
        Block::default()
            .borders(panel_borders(area.width))
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(widget, area);
}

fn render_counter(
    state: &ClickerState,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let button_style = if state.click_flash > 0 {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    };

    let mut cl = ClickableList::new();
    cl.push(Line::from(vec![
        Span::styled("Clicks: ", Style::default().fg(Color::White)),
        Span::styled(
            format_number(state.total_clicks),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
    ]));
    cl.push(Line::from(vec![
        Span::styled(
            format!("+{}/click", format_number(state.click_value())),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            format!("+{}/s", format_number(state.passive_income_per_tick)),
            Style::default().fg(Color::Green),
        ),
    ]));
    cl.push(Line::from(Span::styled(
        format!(
            "{} clicked, {} paid out",
            format_number(state.manual_clicks),
            format_number(state.passive_ticks)
        ),
        Style::default().fg(Color::DarkGray),
    )));
    cl.push_clickable(
        Line::from(Span::styled(" [C] Click! ", button_style)),
        CLICK_BUTTON,
    );

    let borders = panel_borders(area.width);
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    let top = inner.y - area.y;
    let bottom = (area.y + area.height).saturating_sub(inner.y + inner.height);
    cl.register_targets(area, &mut click_state.borrow_mut(), top, bottom, 0, 0);

    f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
}

fn store_line(index: usize, view: &ItemView, rejected: bool) -> Line<'static> {
    if view.depleted {
        return Line::from(vec![
            Span::styled(
                format!("    {} x{} ", view.name, view.quantity),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(
                "Max quantity reached",
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]);
    }

    let key_style = if view.affordable {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else if rejected {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let text_style = if view.affordable {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![
        Span::styled(format!("[{}] ", index + 1), key_style),
        Span::styled(format!("{} - {} ", view.name, format_number(view.price)), text_style),
    ];
    if !view.text.is_empty() {
        spans.push(Span::styled(
            format!("({}) ", view.text),
            Style::default().fg(Color::Cyan),
        ));
    }
    let qty = match view.max_quantity {
        Some(max) => format!("x{}/{}", view.quantity, max),
        None => format!("x{}", view.quantity),
    };
    spans.push(Span::styled(qty, Style::default().fg(Color::Green)));
    Line::from(spans)
}

fn render_store(
    state: &ClickerState,
    store: &Store,
    f: &mut Frame,
    area: Rect,
    click_state: &Rc<RefCell<ClickState>>,
) {
    let rejected = state.reject_flash > 0;
    let mut cl = ClickableList::new();
    if store.is_empty() {
        cl.push(Line::from(Span::styled(
            "Nothing for sale.",
            Style::default().fg(Color::DarkGray),
        )));
    }
    for (i, view) in store.render_all(state.total_clicks).iter().enumerate() {
        let line = store_line(i, view, rejected);
        if view.depleted {
            cl.push(line);
        } else {
            cl.push_clickable(line, BUY_ITEM_BASE + i as u16);
        }
    }

    let border_color = if state.purchase_flash > 0 {
        Color::Yellow
    } else if rejected {
        Color::Red
    } else {
        Color::Green
    };
    let borders = panel_borders(area.width);
    let block = Block::default()
        .borders(borders)
        .border_style(Style::default().fg(border_color))
        .title(" Store [1-9] to buy ");
    let inner = block.inner(area);
    let top = inner.y - area.y;
    let bottom = (area.y + area.height).saturating_sub(inner.y + inner.height);
    cl.register_targets(
        area,
        &mut click_state.borrow_mut(),
        top,
        bottom,
        0,
        inner.width,
    );

    let widget = Paragraph::new(cl.into_lines())
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}

fn log_line(text: &str, is_important: bool, is_recent: bool) -> Line<'_> {
    let style = match (is_important, is_recent) {
        (true, true) => Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Yellow),
        (false, true) => Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
        (false, false) => Style::default().fg(Color::DarkGray),
    };
    Line::from(Span::styled(text, style))
}

/// Oldest at the top, scrolled so the newest entry sits on the last row.
fn render_log(state: &ClickerState, f: &mut Frame, area: Rect) {
    let total = state.log.len();
    let log_lines: Vec<Line> = state
        .log
        .iter()
        .enumerate()
        .map(|(i, entry)| log_line(&entry.text, entry.is_important, total - i <= 3))
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Blue))
        .title(" Log ");
    let inner = block.inner(area);
    let widget = Paragraph::new(log_lines).wrap(Wrap { trim: false });
    let rendered = widget.line_count(inner.width) as u16;
    let scroll = rendered.saturating_sub(inner.height);
    f.render_widget(widget.scroll((scroll, 0)).block(block), area);
}

fn render_terminated(state: &ClickerState, f: &mut Frame, area: Rect) {
    let reason = state
        .cheat_reason
        .as_ref()
        .map(|r| r.describe())
        .unwrap_or_default();
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "You're cheating, shame on you!",
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(reason, Style::default().fg(Color::DarkGray))),
        Line::from(""),
        Line::from(Span::styled(
            "Reload the page to start over.",
            Style::default().fg(Color::White),
        )),
    ];
    let widget = Paragraph::new(lines)
        .centered()
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title(" Game Over "),
        );
    f.render_widget(widget, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(affordable: bool, depleted: bool) -> ItemView {
        ItemView {
            name: "Developer".into(),
            price: 1_200,
            quantity: 3,
            max_quantity: None,
            text: "+ 8/s".into(),
            affordable,
            depleted,
        }
    }

    fn plain(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn store_line_shows_key_price_text_and_quantity() {
        let text = plain(&store_line(1, &view(true, false), false));
        assert_eq!(text, "[2] Developer - 1,200 (+ 8/s) x3");
    }

    #[test]
    fn depleted_line_has_no_key() {
        let text = plain(&store_line(0, &view(true, true), false));
        assert!(!text.contains('['));
        assert!(text.contains("Max quantity reached"));
    }

    #[test]
    fn capped_quantity_shows_max() {
        let mut v = view(false, false);
        v.max_quantity = Some(5);
        assert!(plain(&store_line(0, &v, false)).ends_with("x3/5"));
    }

    #[test]
    fn recent_log_lines_are_bold() {
        let line = log_line("hi", false, true);
        assert!(line.spans[0].style.add_modifier.contains(Modifier::BOLD));
        let old = log_line("hi", false, false);
        assert_eq!(old.spans[0].style.fg, Some(Color::DarkGray));
    }
}
