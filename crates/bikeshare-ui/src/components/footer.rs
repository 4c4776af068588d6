//! One-line caption shown under the dashboard.

use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

pub const CAPTION: &str = "Copyright © Muhammad Hadi 2023";
pub const KEY_HINTS: &str = "Tab ⇄ bound · ←/→ day · ↑/↓ month · r reset · q quit";

/// Caption on the left, key hints on the right, padded to `width` columns.
///
/// Hints are dropped when both do not fit; the caption is never cut.
pub fn footer_line(width: u16, theme: &Theme) -> Line<'static> {
    let width = usize::from(width);
    let caption_width = CAPTION.width();
    let hints_width = KEY_HINTS.width();

    if caption_width + 1 + hints_width > width {
        return Line::from(Span::styled(CAPTION, theme.dim));
    }

    let gap = width - caption_width - hints_width;
    Line::from(vec![
        Span::styled(CAPTION, theme.dim),
        Span::raw(" ".repeat(gap)),
        Span::styled(KEY_HINTS, theme.label),
    ])
}
