use bikeshare_core::models::Measure;
use ratatui::style::{Color, Modifier, Style};

/// Terminal background type detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BackgroundType {
    Dark,
    Light,
    Unknown,
}

/// Detect terminal background type from the `COLORFGBG` environment variable.
///
/// The variable has the format `"foreground;background"`.  Background values
/// 0–6 are considered dark; 7–15 are considered light.  If the variable is
/// absent or unparseable, `BackgroundType::Dark` is returned.
pub fn detect_background() -> BackgroundType {
    if let Ok(val) = std::env::var("COLORFGBG") {
        if let Some(bg) = val.split(';').next_back() {
            if let Ok(bg_num) = bg.parse::<u8>() {
                return if bg_num <= 6 {
                    BackgroundType::Dark
                } else {
                    BackgroundType::Light
                };
            }
        }
    }
    BackgroundType::Dark
}

/// Complete theme definition carrying all UI styles used by the dashboard.
#[derive(Debug, Clone)]
pub struct Theme {
    // ── Header ───────────────────────────────────────────────────────────────
    pub header: Style,
    pub header_sparkle: Style,
    pub separator: Style,

    // ── Text ─────────────────────────────────────────────────────────────────
    pub text: Style,
    pub dim: Style,
    pub bold: Style,
    pub label: Style,
    pub value: Style,

    // ── Status ───────────────────────────────────────────────────────────────
    pub info: Style,
    pub warning: Style,

    // ── Series (one per measure) ─────────────────────────────────────────────
    pub series_casual: Style,
    pub series_registered: Style,
    pub series_total: Style,

    // ── Charts and panels ────────────────────────────────────────────────────
    pub border: Style,
    pub axis: Style,
    pub bar_value: Style,
    pub section_title: Style,

    // ── Sidebar date picker ──────────────────────────────────────────────────
    /// Bound currently moved by the arrow keys.
    pub picker_focused: Style,
    /// The other bound.
    pub picker_idle: Style,
}

impl Theme {
    // ── Constructors ─────────────────────────────────────────────────────────

    /// Dark-background terminal theme (default).
    pub fn dark() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Yellow),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::Gray),
            value: Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),

            series_casual: Style::default().fg(Color::LightBlue),
            series_registered: Style::default().fg(Color::LightRed),
            series_total: Style::default().fg(Color::LightGreen),

            border: Style::default().fg(Color::DarkGray),
            axis: Style::default().fg(Color::Gray),
            bar_value: Style::default().fg(Color::Black).bg(Color::Gray),
            section_title: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),

            picker_focused: Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            picker_idle: Style::default().fg(Color::White),
        }
    }

    /// Light-background terminal theme.
    ///
    /// Uses dark colours for text so that content remains legible against a
    /// white/light-grey terminal canvas.
    pub fn light() -> Self {
        Self {
            header: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            header_sparkle: Style::default().fg(Color::Magenta),
            separator: Style::default().fg(Color::Gray),

            text: Style::default().fg(Color::Black),
            dim: Style::default().fg(Color::Gray),
            bold: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
            label: Style::default().fg(Color::DarkGray),
            value: Style::default()
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),

            info: Style::default().fg(Color::Blue),
            warning: Style::default().fg(Color::Red),

            series_casual: Style::default().fg(Color::Blue),
            series_registered: Style::default().fg(Color::Red),
            series_total: Style::default().fg(Color::Green),

            border: Style::default().fg(Color::Gray),
            axis: Style::default().fg(Color::DarkGray),
            bar_value: Style::default().fg(Color::White).bg(Color::DarkGray),
            section_title: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),

            picker_focused: Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            picker_idle: Style::default().fg(Color::Black),
        }
    }

    /// Classic terminal theme using only the basic 8-colour ANSI palette.
    ///
    /// Avoids bold modifiers to maximise compatibility with minimal terminal
    /// emulators.
    pub fn classic() -> Self {
        Self {
            header: Style::default().fg(Color::Cyan),
            header_sparkle: Style::default().fg(Color::White),
            separator: Style::default().fg(Color::DarkGray),

            text: Style::default().fg(Color::White),
            dim: Style::default().fg(Color::DarkGray),
            bold: Style::default().fg(Color::White),
            label: Style::default().fg(Color::Gray),
            value: Style::default().fg(Color::White),

            info: Style::default().fg(Color::Cyan),
            warning: Style::default().fg(Color::Yellow),

            series_casual: Style::default().fg(Color::Blue),
            series_registered: Style::default().fg(Color::Red),
            series_total: Style::default().fg(Color::Green),

            border: Style::default().fg(Color::DarkGray),
            axis: Style::default().fg(Color::White),
            bar_value: Style::default().fg(Color::Black).bg(Color::White),
            section_title: Style::default().fg(Color::Cyan),

            picker_focused: Style::default().fg(Color::Black).bg(Color::Cyan),
            picker_idle: Style::default().fg(Color::White),
        }
    }

    /// Choose a theme automatically based on the detected terminal background.
    pub fn auto_detect() -> Self {
        match detect_background() {
            BackgroundType::Light => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Construct a theme by name.  Falls back to `auto_detect` for unknown
    /// names.
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "dark" => Self::dark(),
            "classic" => Self::classic(),
            _ => Self::auto_detect(),
        }
    }

    // ── Style helpers ────────────────────────────────────────────────────────

    /// Series colour for a measure, shared by line and bar charts.
    pub fn measure_style(&self, measure: Measure) -> Style {
        match measure {
            Measure::Casual => self.series_casual,
            Measure::Registered => self.series_registered,
            Measure::Total => self.series_total,
        }
    }

    /// Style of a date-picker bound.
    pub fn picker_style(&self, focused: bool) -> Style {
        if focused {
            self.picker_focused
        } else {
            self.picker_idle
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
