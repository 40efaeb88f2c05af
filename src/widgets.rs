//! Clickable UI building blocks.
//!
//! A component renders its lines and registers the matching click targets in
//! one place, so a row on screen and its hit region cannot drift apart.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::text::Line;

use crate::input::ClickState;

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with the action each clickable row triggers.
///
/// Mark a line clickable when you add it, then call
/// [`register_targets`](ClickableList::register_targets) once with the widget
/// area. Rows are derived from line positions, so inserting a header above a
/// store row moves its target with it.
///
/// ```ignore
/// let mut cl = ClickableList::new();
/// cl.push(Line::from("Clicks: 42"));
/// cl.push_clickable(Line::from("[1] Server - 10"), BUY_ITEM_BASE);
/// cl.register_targets(area, &mut cs, 1, 1, 0, 0);
/// f.render_widget(Paragraph::new(cl.into_lines()).block(block), area);
/// ```
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line_index, action_id)` pairs, indexing into `lines`.
    actions: Vec<(u16, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add a non-clickable line.
    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    /// Add a clickable line with a semantic action ID.
    ///
    /// The action follows the line to whatever row it ends up on.
    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        let idx = self.lines.len() as u16;
        self.actions.push((idx, action_id));
        self.lines.push(line);
    }

    /// Total number of lines.
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Consume the builder, returning the lines for rendering.
    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register click targets for all clickable lines.
    ///
    /// * `area`: the widget area, borders included.
    /// * `top_offset` / `bottom_offset`: rows taken by borders above and below.
    /// * `scroll`: vertical scroll offset in visual rows.
    /// * `inner_width`: content width for wrapped widgets, or `0` when every
    ///   line is exactly one row.
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top_offset: u16,
        bottom_offset: u16,
        scroll: u16,
        inner_width: u16,
    ) {
        let content_y = area.y + top_offset;
        let content_end = area.y + area.height.saturating_sub(bottom_offset);

        // Visual row each logical line starts on, and how many rows it spans.
        let mut spans: Vec<(u16, u16)> = Vec::with_capacity(self.lines.len());
        let mut next_row: u16 = 0;
        for line in &self.lines {
            let height = match inner_width as usize {
                0 => 1,
                w => line.width().max(1).div_ceil(w) as u16,
            };
            spans.push((next_row, height));
            next_row = next_row.saturating_add(height);
        }

        for &(line_idx, action_id) in &self.actions {
            let Some(&(start, height)) = spans.get(line_idx as usize) else {
                continue;
            };
            for visual in start..start + height {
                if visual < scroll {
                    continue;
                }
                let row = content_y + (visual - scroll);
                if row >= content_end {
                    break;
                }
                cs.add_row_target(area, row, action_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ClickState;

    fn store_list(items: usize) -> ClickableList<'static> {
        let mut cl = ClickableList::new();
        cl.push(Line::from("Clicks: 0"));
        for i in 0..items {
            cl.push_clickable(Line::from(format!("[{}] item", i + 1)), 100 + i as u16);
        }
        cl
    }

    #[test]
    fn rows_follow_line_positions() {
        let cl = store_list(2);
        assert_eq!(cl.len(), 3);

        // bordered panel at y=5: content starts at 6, header takes row 6
        let area = Rect::new(0, 5, 40, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);

        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(3, 6), None);
        assert_eq!(cs.hit_test(3, 7), Some(100));
        assert_eq!(cs.hit_test(3, 8), Some(101));
        assert_eq!(cs.hit_test(3, 9), None);
    }

    #[test]
    fn scrolled_rows_are_skipped() {
        let cl = store_list(4);
        let area = Rect::new(0, 10, 40, 6);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 2, 0);

        // lines 0 and 1 are scrolled off; line 2 lands on the first row
        assert_eq!(cs.hit_test(0, 10), Some(101));
        assert_eq!(cs.hit_test(0, 11), Some(102));
        assert_eq!(cs.hit_test(0, 12), Some(103));
        assert_eq!(cs.targets.len(), 3);
    }

    #[test]
    fn rows_past_the_bottom_border_are_dropped() {
        let cl = store_list(10);
        let area = Rect::new(0, 0, 40, 5);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 1, 1, 0, 0);

        // 3 content rows, one of them the header
        assert_eq!(cs.targets.len(), 2);
        assert_eq!(cs.hit_test(0, 4), None);
    }

    #[test]
    fn empty_list_registers_nothing() {
        let cl = ClickableList::new();
        let mut cs = ClickState::new();
        cl.register_targets(Rect::new(0, 0, 40, 10), &mut cs, 1, 1, 0, 0);
        assert!(cs.targets.is_empty());
        assert!(cl.into_lines().is_empty());
    }

    #[test]
    fn wrapped_lines_push_later_rows_down() {
        let mut cl = ClickableList::new();
        cl.push(Line::from("a description twenty"));
        cl.push_clickable(Line::from("[1] x"), 7);

        let area = Rect::new(0, 0, 10, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 0, 10);

        assert_eq!(cs.hit_test(0, 1), None);
        assert_eq!(cs.hit_test(0, 2), Some(7));
    }

    #[test]
    fn wrapped_clickable_covers_every_row() {
        let mut cl = ClickableList::new();
        cl.push_clickable(Line::from("x".repeat(25)), 9);

        let area = Rect::new(0, 0, 10, 10);
        let mut cs = ClickState::new();
        cl.register_targets(area, &mut cs, 0, 0, 1, 10);

        // 3 visual rows, the first scrolled away
        assert_eq!(cs.hit_test(0, 0), Some(9));
        assert_eq!(cs.hit_test(0, 1), Some(9));
        assert_eq!(cs.hit_test(0, 2), None);
    }
}
