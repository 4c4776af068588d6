use bikeshare_core::formatting::format_count;
use bikeshare_core::models::DateRange;
use ratatui::text::{Line, Span};

use crate::themes::Theme;

/// Decorative sparkle string placed either side of the dashboard title.
pub const SPARKLES: &str = "✦ ✧ ✦ ✧";

/// Dashboard header rendering four lines:
///
/// 1. Dashboard title with sparkle decorations (ALL CAPS).
/// 2. A 60-column `=` separator.
/// 3. Selected range and record count in `[ range | N records ]` format.
/// 4. An empty line.
pub struct Header<'a> {
    /// Date range currently selected in the sidebar.
    pub range: DateRange,
    /// Number of records inside `range`.
    pub records: usize,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(range: DateRange, records: usize, theme: &'a Theme) -> Self {
        Self {
            range,
            records,
            theme,
        }
    }

    /// Render the header as exactly four lines, e.g.
    ///
    /// 1. `"✦ ✧ ✦ ✧ BIKE SHARING DASHBOARD ✦ ✧ ✦ ✧"`
    /// 2. `"============================================================"`
    /// 3. `"[ 2011-01-01 .. 2012-12-31 | 17,379 records ]"`
    /// 4. `""`
    pub fn to_lines(&self) -> Vec<Line<'a>> {
        let noun = if self.records == 1 { "record" } else { "records" };

        vec![
            Line::from(vec![
                Span::styled(SPARKLES, self.theme.header_sparkle),
                Span::styled(" BIKE SHARING DASHBOARD ", self.theme.header),
                Span::styled(SPARKLES, self.theme.header_sparkle),
            ]),
            Line::from(Span::styled("=".repeat(60), self.theme.separator)),
            Line::from(vec![
                Span::styled("[ ", self.theme.label),
                Span::styled(self.range.to_string(), self.theme.value),
                Span::styled(" | ", self.theme.label),
                Span::styled(
                    format!("{} {}", format_count(self.records as u64), noun),
                    self.theme.value,
                ),
                Span::styled(" ]", self.theme.label),
            ]),
            Line::from(""),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
