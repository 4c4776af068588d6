//! Full-screen dashboard layout.
//!
//! ```text
//! ┌ header ─────────────────────────────────────────────┐
//! │ sidebar │ metric cards                               │
//! │         │ monthly line chart                         │
//! │         │ working days hourly │ weekends hourly      │
//! │         │ seasons                                    │
//! └ footer ─────────────────────────────────────────────┘
//! ```

use bikeshare_core::models::GroupKey;
use bikeshare_data::analysis::DashboardReport;
use ratatui::{
    layout::{Constraint, Layout, Rect},
    widgets::Paragraph,
    Frame,
};

use crate::charts::{render_monthly_chart, EmptyReason, GroupOrder, GroupedBars};
use crate::components::date_picker::{render_date_picker, DatePicker};
use crate::components::footer::footer_line;
use crate::components::header::Header;
use crate::components::metric::render_metric_row;
use crate::themes::Theme;

/// Columns reserved for the date-range sidebar.
pub const SIDEBAR_WIDTH: u16 = 30;

const WORKING_DAYS: GroupedBars<'static> = GroupedBars {
    title: "Working days",
    axis_label: GroupKey::Hour.label(),
    order: GroupOrder::Ascending,
    mirrored: false,
};

const NON_WORKING_DAYS: GroupedBars<'static> = GroupedBars {
    title: "Weekends & holidays",
    axis_label: GroupKey::Hour.label(),
    order: GroupOrder::Descending,
    mirrored: true,
};

const SEASONS: GroupedBars<'static> = GroupedBars {
    title: "Rentals by season",
    axis_label: GroupKey::Season.label(),
    order: GroupOrder::Summary,
    mirrored: false,
};

/// Render one complete frame for `report`.
pub fn render_dashboard(
    frame: &mut Frame,
    area: Rect,
    report: &DashboardReport,
    picker: &DatePicker,
    theme: &Theme,
) {
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    let header = Header::new(report.range, report.records_in_range, theme);
    frame.render_widget(Paragraph::new(header.to_lines()), header_area);

    let [sidebar_area, main_area] =
        Layout::horizontal([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .areas(body_area);
    render_date_picker(frame, sidebar_area, picker, theme);
    render_sections(frame, main_area, report, theme);

    frame.render_widget(
        Paragraph::new(footer_line(footer_area.width, theme)),
        footer_area,
    );
}

/// The three report sections stacked top to bottom.
fn render_sections(frame: &mut Frame, area: Rect, report: &DashboardReport, theme: &Theme) {
    let [metrics_area, monthly_area, hourly_area, season_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Fill(3),
        Constraint::Fill(3),
        Constraint::Fill(2),
    ])
    .areas(area);

    render_metric_row(frame, metrics_area, &report.monthly_totals, theme);
    render_monthly_chart(frame, monthly_area, &report.monthly, theme);

    let [working_area, non_working_area] =
        Layout::horizontal([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)]).areas(hourly_area);
    let hourly_empty = hourly_empty_reason(report);
    WORKING_DAYS.render(frame, working_area, &report.working_day_hourly, hourly_empty, theme);
    NON_WORKING_DAYS.render(
        frame,
        non_working_area,
        &report.non_working_day_hourly,
        hourly_empty,
        theme,
    );

    SEASONS.render(frame, season_area, &report.seasonal, EmptyReason::NoRentals, theme);
}

/// Placeholder for the hourly charts: a range with records but no hours
/// points at the dataset, not the range.
fn hourly_empty_reason(report: &DashboardReport) -> EmptyReason {
    if !report.is_empty() && !report.has_hourly_data() {
        EmptyReason::NoHourlyData
    } else {
        EmptyReason::NoRentals
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use bikeshare_core::models::{DateRange, RentalRecord};
    use bikeshare_data::context::DashboardContext;
    use bikeshare_data::reader::Dataset;
    use chrono::NaiveDate;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn make_context() -> DashboardContext {
        let mut records = Vec::new();
        for (date, working_day, season) in [
            (day(2011, 1, 1), false, "Winter"),
            (day(2011, 1, 3), true, "Winter"),
            (day(2011, 7, 4), false, "Summer"),
            (day(2011, 7, 5), true, "Summer"),
        ] {
            for hour in [0u8, 8, 17] {
                records.push(RentalRecord {
                    date,
                    hour: Some(hour),
                    working_day,
                    season: season.to_string(),
                    casual: u64::from(hour) + 1,
                    registered: 40,
                    total: u64::from(hour) + 41,
                });
            }
        }
        DashboardContext::new(Dataset::from_records(records, "mem.csv").unwrap())
    }

    fn draw(ctx: &DashboardContext, range: DateRange, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        let theme = Theme::dark();
        let picker = DatePicker::new(ctx.bounds(), range);
        let report = ctx.report_for(&range);
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_dashboard(frame, area, &report, &picker, &theme);
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_render_full_range() {
        let ctx = make_context();
        let text = draw(&ctx, ctx.bounds(), 180, 50);
        assert!(text.contains("BIKE SHARING DASHBOARD"));
        assert!(text.contains("Monthly rentals"));
        assert!(text.contains("Working days"));
        assert!(text.contains("Weekends & holidays"));
        assert!(text.contains("Rentals by season"));
        assert!(text.contains("Copyright © Muhammad Hadi 2023"));
        assert!(!text.contains("No rentals in range"));
    }

    #[test]
    fn test_render_empty_range_shows_placeholders() {
        let ctx = make_context();
        let text = draw(&ctx, DateRange::single_day(day(2011, 1, 2)), 180, 50);
        assert!(text.contains("No rentals in range"));
        assert!(text.contains("0 records"));
    }

    #[test]
    fn test_render_dataset_without_hours_explains_hourly_charts() {
        let records = [(day(2011, 1, 3), true), (day(2011, 1, 8), false)]
            .into_iter()
            .map(|(date, working_day)| RentalRecord {
                date,
                hour: None,
                working_day,
                season: "Winter".to_string(),
                casual: 5,
                registered: 20,
                total: 25,
            })
            .collect();
        let ctx = DashboardContext::new(Dataset::from_records(records, "daily.csv").unwrap());
        let text = draw(&ctx, ctx.bounds(), 180, 50);

        assert!(text.contains("No hourly data in this dataset"));
        assert!(!text.contains("No rentals in range"));
        assert!(text.contains("Rentals by season"));
    }

    #[test]
    fn test_hourly_empty_reason() {
        let ctx = make_context();
        let full = ctx.report_for(&ctx.bounds());
        assert_eq!(hourly_empty_reason(&full), EmptyReason::NoRentals);
        let empty = ctx.report_for(&DateRange::single_day(day(2011, 1, 2)));
        assert_eq!(hourly_empty_reason(&empty), EmptyReason::NoRentals);
    }

    #[test]
    fn test_render_tiny_terminal_does_not_panic() {
        let ctx = make_context();
        draw(&ctx, ctx.bounds(), 20, 6);
    }
}
