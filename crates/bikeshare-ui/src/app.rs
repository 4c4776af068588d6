//! Main application state and TUI event loop for the bike-sharing dashboard.
//!
//! [`App`] owns the loaded context, the theme and the sidebar picker. Each
//! frame recomputes the whole report from the dataset; nothing computed for
//! one frame is reused by the next.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use tracing::{debug, info};

use bikeshare_core::error::{DashboardError, Result};
use bikeshare_core::models::DateRange;
use bikeshare_data::analysis::DashboardReport;
use bikeshare_data::context::DashboardContext;

use crate::components::date_picker::{DatePicker, PickerAction};
use crate::dashboard_view::render_dashboard;
use crate::themes::Theme;

/// Outcome of a single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Nothing visible changed.
    Ignored,
    /// The frame must be redrawn.
    Redraw,
    Quit,
}

/// Map a key press to a picker action.
pub fn picker_action(key: &KeyEvent) -> Option<PickerAction> {
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => Some(PickerAction::ToggleFocus),
        KeyCode::Left => Some(PickerAction::ShiftDays(-1)),
        KeyCode::Right => Some(PickerAction::ShiftDays(1)),
        KeyCode::Up => Some(PickerAction::ShiftMonths(1)),
        KeyCode::Down => Some(PickerAction::ShiftMonths(-1)),
        KeyCode::Home => Some(PickerAction::JumpToMin),
        KeyCode::End => Some(PickerAction::JumpToMax),
        KeyCode::Char('r') | KeyCode::Char('R') => Some(PickerAction::Reset),
        _ => None,
    }
}

fn is_quit(key: &KeyEvent) -> bool {
    match key.code {
        KeyCode::Char('c') => key.modifiers.contains(KeyModifiers::CONTROL),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => true,
        _ => false,
    }
}

/// Turn a failed terminal mode switch into [`DashboardError::Terminal`],
/// naming the step that failed.
fn terminal_error(step: &'static str) -> impl FnOnce(io::Error) -> DashboardError {
    move |e| DashboardError::Terminal(format!("{step}: {e}"))
}

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    context: DashboardContext,
    picker: DatePicker,
}

impl App {
    /// Build the app with `initial_range` clamped into the dataset bounds.
    pub fn new(context: DashboardContext, initial_range: DateRange, theme_name: &str) -> Self {
        let picker = DatePicker::new(context.bounds(), initial_range);
        Self {
            theme: Theme::from_name(theme_name),
            context,
            picker,
        }
    }

    pub fn range(&self) -> DateRange {
        self.picker.range()
    }

    /// Compute the report for the currently selected range.
    pub fn report(&self) -> DashboardReport {
        self.context.report_for(&self.picker.range())
    }

    /// Apply one key press; a range change asks for a redraw.
    pub fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        if key.kind != KeyEventKind::Press {
            return KeyOutcome::Ignored;
        }
        if is_quit(&key) {
            return KeyOutcome::Quit;
        }
        let Some(action) = picker_action(&key) else {
            return KeyOutcome::Ignored;
        };

        if self.picker.apply(action) {
            debug!("Range changed to {}", self.picker.range());
            KeyOutcome::Redraw
        } else if action == PickerAction::ToggleFocus {
            KeyOutcome::Redraw
        } else {
            KeyOutcome::Ignored
        }
    }

    /// Run the dashboard until the user quits.
    ///
    /// The loop polls `crossterm` with a 250 ms timeout and only redraws
    /// after a key press changed something or the terminal was resized.
    /// Mode switches fail with [`DashboardError::Terminal`]; I/O errors
    /// inside the loop surface as [`DashboardError::Io`] once the terminal
    /// has been restored.
    pub fn run(mut self) -> Result<()> {
        enable_raw_mode().map_err(terminal_error("enable raw mode"))?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(terminal_error("enter alternate screen"))?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(terminal_error("create terminal"))?;

        info!("Dashboard started for {}", self.range());
        let result = self.event_loop(&mut terminal);

        // Restore terminal state unconditionally.
        disable_raw_mode().map_err(terminal_error("disable raw mode"))?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .map_err(terminal_error("leave alternate screen"))?;
        terminal.show_cursor().map_err(terminal_error("show cursor"))?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
        let tick_rate = Duration::from_millis(250);
        let mut dirty = true;

        loop {
            if dirty {
                terminal.draw(|frame| self.render(frame))?;
                dirty = false;
            }

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) => match self.handle_key(key) {
                        KeyOutcome::Quit => return Ok(()),
                        KeyOutcome::Redraw => dirty = true,
                        KeyOutcome::Ignored => {}
                    },
                    Event::Resize(_, _) => dirty = true,
                    _ => {}
                }
            }
        }
    }

    /// Recompute the report and render it into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let report = self.report();
        render_dashboard(frame, area, &report, &self.picker, &self.theme);
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
