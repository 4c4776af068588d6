//! Sidebar date-range picker.
//!
//! Holds the selected range and which bound the arrow keys move. Every
//! action keeps the range inside the dataset bounds with `start <= end`.

use bikeshare_core::formatting::format_count;
use bikeshare_core::models::DateRange;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// Which bound of the range is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Start,
    End,
}

impl Focus {
    pub fn toggle(self) -> Self {
        match self {
            Focus::Start => Focus::End,
            Focus::End => Focus::Start,
        }
    }
}

/// Edits the picker understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    ToggleFocus,
    ShiftDays(i64),
    ShiftMonths(i32),
    /// Jump the focused bound to the dataset's first or last date.
    JumpToMin,
    JumpToMax,
    Reset,
}

/// Selected range plus the dataset bounds it must stay within.
#[derive(Debug, Clone, PartialEq)]
pub struct DatePicker {
    bounds: DateRange,
    range: DateRange,
    focus: Focus,
}

impl DatePicker {
    pub fn new(bounds: DateRange, range: DateRange) -> Self {
        Self {
            bounds,
            range: range.clamp_to(&bounds),
            focus: Focus::Start,
        }
    }

    pub fn bounds(&self) -> DateRange {
        self.bounds
    }

    pub fn range(&self) -> DateRange {
        self.range
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Apply `action`; returns `true` when the selected range changed.
    pub fn apply(&mut self, action: PickerAction) -> bool {
        let before = self.range;
        let bounds = self.bounds;

        self.range = match (action, self.focus) {
            (PickerAction::ToggleFocus, _) => {
                self.focus = self.focus.toggle();
                before
            }
            (PickerAction::ShiftDays(n), Focus::Start) => before.shift_start(n, &bounds),
            (PickerAction::ShiftDays(n), Focus::End) => before.shift_end(n, &bounds),
            (PickerAction::ShiftMonths(n), Focus::Start) => before.shift_start_months(n, &bounds),
            (PickerAction::ShiftMonths(n), Focus::End) => before.shift_end_months(n, &bounds),
            (PickerAction::JumpToMin, Focus::Start) => {
                DateRange::new(bounds.start(), before.end())
            }
            (PickerAction::JumpToMin, Focus::End) => DateRange::single_day(before.start()),
            (PickerAction::JumpToMax, Focus::Start) => DateRange::single_day(before.end()),
            (PickerAction::JumpToMax, Focus::End) => DateRange::new(before.start(), bounds.end()),
            (PickerAction::Reset, _) => bounds,
        };

        self.range != before
    }

    /// Sidebar text: the two bounds, the dataset limits and the key hints.
    pub fn to_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        let bound_line = |name: &'static str, date: String, focused: bool| {
            let marker = if focused { "▶ " } else { "  " };
            Line::from(vec![
                Span::styled(marker, theme.info),
                Span::styled(format!("{name:<6}"), theme.label),
                Span::styled(format!(" {date} "), theme.picker_style(focused)),
            ])
        };
        let hint = |keys: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<9}"), theme.bold),
                Span::styled(what, theme.dim),
            ])
        };

        let days = self.range.num_days().max(0) as u64;
        vec![
            Line::from(Span::styled("🚲 Date range", theme.section_title)),
            Line::from(""),
            bound_line(
                "Start",
                self.range.start().format("%Y-%m-%d").to_string(),
                self.focus == Focus::Start,
            ),
            bound_line(
                "End",
                self.range.end().format("%Y-%m-%d").to_string(),
                self.focus == Focus::End,
            ),
            Line::from(Span::styled(
                format!("  {} days selected", format_count(days)),
                theme.dim,
            )),
            Line::from(""),
            Line::from(Span::styled("Available", theme.section_title)),
            Line::from(Span::styled(
                format!("  {}", self.bounds.start().format("%Y-%m-%d")),
                theme.text,
            )),
            Line::from(Span::styled(
                format!("  {}", self.bounds.end().format("%Y-%m-%d")),
                theme.text,
            )),
            Line::from(""),
            Line::from(Span::styled("Keys", theme.section_title)),
            hint("Tab", "switch bound"),
            hint("←/→", "±1 day"),
            hint("↑/↓", "±1 month"),
            hint("Home/End", "min / max"),
            hint("r", "reset"),
            hint("q/Esc", "quit"),
        ]
    }
}

/// Render the picker into the sidebar `area`.
pub fn render_date_picker(frame: &mut Frame, area: Rect, picker: &DatePicker, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(" Filter ");
    frame.render_widget(Paragraph::new(picker.to_lines(theme)).block(block), area);
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn picker() -> DatePicker {
        let bounds = DateRange::new(day(2011, 1, 1), day(2012, 12, 31));
        DatePicker::new(bounds, bounds)
    }

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_new_clamps_initial_range() {
        let bounds = DateRange::new(day(2011, 1, 1), day(2012, 12, 31));
        let p = DatePicker::new(bounds, DateRange::new(day(2010, 1, 1), day(2011, 3, 1)));
        assert_eq!(p.range().start(), day(2011, 1, 1));
        assert_eq!(p.range().end(), day(2011, 3, 1));
        assert_eq!(p.focus(), Focus::Start);
    }

    #[test]
    fn test_toggle_focus_does_not_change_range() {
        let mut p = picker();
        assert!(!p.apply(PickerAction::ToggleFocus));
        assert_eq!(p.focus(), Focus::End);
        p.apply(PickerAction::ToggleFocus);
        assert_eq!(p.focus(), Focus::Start);
    }

    #[test]
    fn test_shift_start_days() {
        let mut p = picker();
        assert!(p.apply(PickerAction::ShiftDays(1)));
        assert_eq!(p.range().start(), day(2011, 1, 2));
        assert_eq!(p.range().end(), day(2012, 12, 31));
    }

    #[test]
    fn test_shift_start_below_min_is_noop() {
        let mut p = picker();
        assert!(!p.apply(PickerAction::ShiftDays(-1)));
        assert_eq!(p.range(), p.bounds());
    }

    #[test]
    fn test_shift_end_months() {
        let mut p = picker();
        p.apply(PickerAction::ToggleFocus);
        assert!(p.apply(PickerAction::ShiftMonths(-1)));
        assert_eq!(p.range().end(), day(2012, 11, 30));
    }

    #[test]
    fn test_end_never_passes_start() {
        let mut p = picker();
        p.apply(PickerAction::JumpToMax);
        assert_eq!(p.range(), DateRange::single_day(day(2012, 12, 31)));

        p.apply(PickerAction::ToggleFocus);
        assert!(!p.apply(PickerAction::ShiftDays(-5)));
        assert_eq!(p.range().start(), p.range().end());
    }

    #[test]
    fn test_jump_and_reset() {
        let mut p = picker();
        p.apply(PickerAction::ShiftMonths(3));
        p.apply(PickerAction::ToggleFocus);
        p.apply(PickerAction::ShiftMonths(-3));
        assert_eq!(p.range(), DateRange::new(day(2011, 4, 1), day(2012, 9, 30)));

        p.apply(PickerAction::JumpToMax);
        assert_eq!(p.range().end(), day(2012, 12, 31));

        assert!(p.apply(PickerAction::Reset));
        assert_eq!(p.range(), p.bounds());
        assert!(!p.apply(PickerAction::Reset));
    }

    #[test]
    fn test_lines_mark_focused_bound() {
        let mut p = picker();
        let theme = Theme::dark();

        let lines = p.to_lines(&theme);
        assert_eq!(line_text(&lines[2]), "▶ Start  2011-01-01 ");
        assert_eq!(line_text(&lines[3]), "  End    2012-12-31 ");
        assert_eq!(lines[2].spans[2].style, theme.picker_focused);

        p.apply(PickerAction::ToggleFocus);
        let lines = p.to_lines(&theme);
        assert_eq!(lines[3].spans[2].style, theme.picker_focused);
        assert_eq!(lines[2].spans[2].style, theme.picker_idle);
    }

    #[test]
    fn test_lines_show_selected_day_count() {
        let p = picker();
        let lines = p.to_lines(&Theme::dark());
        assert_eq!(line_text(&lines[4]), "  731 days selected");
    }
}
