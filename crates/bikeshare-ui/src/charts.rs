//! Chart widgets for the three dashboard sections.
//!
//! The monthly trend is a line chart with one series per measure. Hour and
//! season breakdowns are grouped bar charts built from long-form rows, one
//! bar per measure inside each group.

use bikeshare_core::formatting::format_compact;
use bikeshare_core::models::{GroupValue, LongFormRow, Measure, MeasureTotals, SummaryRow};
use ratatui::{
    layout::{Alignment, Rect},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, LegendPosition,
        Paragraph,
    },
    Frame,
};

use crate::themes::Theme;

/// Series drawn by the monthly line chart, in legend order.
pub const MONTHLY_SERIES: [Measure; 3] = [Measure::Total, Measure::Casual, Measure::Registered];

// ── Monthly line chart ───────────────────────────────────────────────────────

/// `(x, y)` points per series: x is the row index, y the measure's sum.
pub fn monthly_series(rows: &[SummaryRow<String>]) -> Vec<(Measure, Vec<(f64, f64)>)> {
    MONTHLY_SERIES
        .iter()
        .map(|&measure| {
            let points = rows
                .iter()
                .enumerate()
                .map(|(i, row)| (i as f64, row.totals.get(measure) as f64))
                .collect();
            (measure, points)
        })
        .collect()
}

/// Render the monthly trend into `area`.
pub fn render_monthly_chart(
    frame: &mut Frame,
    area: Rect,
    rows: &[SummaryRow<String>],
    theme: &Theme,
) {
    let block = section_block(Line::from(section_title("Monthly rentals", theme)), theme);
    if rows.is_empty() {
        render_empty(frame, area, block, EmptyReason::NoRentals, theme);
        return;
    }

    let series = monthly_series(rows);
    // A line needs two points; a lone month is drawn as a dot.
    let graph_type = if rows.len() == 1 {
        GraphType::Scatter
    } else {
        GraphType::Line
    };
    let datasets: Vec<Dataset> = series
        .iter()
        .map(|(measure, points)| {
            Dataset::default()
                .name(measure.as_str())
                .marker(Marker::Braille)
                .graph_type(graph_type)
                .style(theme.measure_style(*measure))
                .data(points)
        })
        .collect();

    let y_max = rows.iter().map(|r| r.totals.total).max().unwrap_or(0).max(1);
    let x_max = rows.len().saturating_sub(1).max(1) as f64;

    let x_labels: Vec<Span> = rows
        .iter()
        .map(|r| Span::styled(short_month(&r.key), theme.axis))
        .collect();
    let y_labels: Vec<Span> = [0, y_max / 2, y_max]
        .iter()
        .map(|&v| Span::styled(format_compact(v), theme.axis))
        .collect();

    let chart = Chart::new(datasets)
        .block(block)
        .x_axis(
            Axis::default()
                .title(Span::styled("Month", theme.axis))
                .style(theme.axis)
                .bounds([0.0, x_max])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title(Span::styled("Rentals", theme.axis))
                .style(theme.axis)
                .bounds([0.0, y_max as f64])
                .labels(y_labels),
        )
        .legend_position(Some(LegendPosition::TopLeft));

    frame.render_widget(chart, area);
}

fn short_month(name: &str) -> String {
    name.chars().take(3).collect()
}

// ── Placeholders ─────────────────────────────────────────────────────────────

/// Why a chart has nothing to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyReason {
    /// The selected range holds no records.
    NoRentals,
    /// Records exist but none carries an hour.
    NoHourlyData,
}

impl EmptyReason {
    /// Headline and hint shown in the placeholder.
    pub const fn messages(self) -> (&'static str, &'static str) {
        match self {
            EmptyReason::NoRentals => ("No rentals in range", "Widen the date range in the sidebar."),
            EmptyReason::NoHourlyData => (
                "No hourly data in this dataset",
                "Load a file with an hour column for this view.",
            ),
        }
    }
}

// ── Grouped bar charts ───────────────────────────────────────────────────────

/// The three measure values of one group, rebuilt from long-form rows.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupBars {
    pub key: GroupValue,
    pub values: MeasureTotals,
}

/// How groups are laid out left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupOrder {
    /// Natural key order (hour 0 first).
    Ascending,
    /// Reverse key order.
    Descending,
    /// Keep the summary order (largest total first).
    Summary,
}

/// Pivot long-form rows back to one entry per group.
///
/// Groups appear in the order their first row appears.
pub fn pivot_long_form(rows: &[LongFormRow<GroupValue>]) -> Vec<GroupBars> {
    let mut groups: Vec<GroupBars> = Vec::new();
    for row in rows {
        let slot = match groups.iter().position(|g| g.key == row.key) {
            Some(i) => i,
            None => {
                groups.push(GroupBars {
                    key: row.key.clone(),
                    values: MeasureTotals::default(),
                });
                groups.len() - 1
            }
        };
        let values = &mut groups[slot].values;
        match row.measure {
            Measure::Casual => values.casual = row.value,
            Measure::Registered => values.registered = row.value,
            Measure::Total => values.total = row.value,
        }
    }
    groups
}

/// Apply `order` to pivoted groups.
pub fn order_groups(mut groups: Vec<GroupBars>, order: GroupOrder) -> Vec<GroupBars> {
    match order {
        GroupOrder::Ascending => groups.sort_by(|a, b| a.key.cmp(&b.key)),
        GroupOrder::Descending => groups.sort_by(|a, b| b.key.cmp(&a.key)),
        GroupOrder::Summary => {}
    }
    groups
}

/// Bar width and gap between groups for `groups` groups of three bars.
///
/// Groups are separated by one column when there is room; bars are at least
/// one column wide.
pub fn bar_geometry(inner_width: u16, groups: usize) -> (u16, u16) {
    let groups = u16::try_from(groups.max(1)).unwrap_or(u16::MAX);
    let bars = groups.saturating_mul(3);
    let gaps = groups - 1;
    let group_gap = if inner_width >= bars.saturating_add(gaps) {
        1
    } else {
        0
    };
    let bar_width = (inner_width.saturating_sub(group_gap * gaps) / bars).max(1);
    (bar_width, group_gap)
}

/// A grouped bar chart section.
#[derive(Debug, Clone, Copy)]
pub struct GroupedBars<'a> {
    pub title: &'a str,
    /// Axis caption under the chart, e.g. `"Hour"`.
    pub axis_label: &'a str,
    pub order: GroupOrder,
    /// Title and legend sit on the right edge instead of the left.
    pub mirrored: bool,
}

impl<'a> GroupedBars<'a> {
    /// Render `rows` into `area`, or a placeholder explaining `empty` when
    /// there are none.
    pub fn render(
        &self,
        frame: &mut Frame,
        area: Rect,
        rows: &[LongFormRow<GroupValue>],
        empty: EmptyReason,
        theme: &Theme,
    ) {
        let mut title = section_title(self.title, theme);
        title.extend(legend_spans(theme));
        let alignment = if self.mirrored {
            Alignment::Right
        } else {
            Alignment::Left
        };
        let block = section_block(Line::from(title), theme)
            .title_alignment(alignment)
            .title_bottom(Line::from(Span::styled(self.axis_label.to_string(), theme.axis)).centered());

        let groups = order_groups(pivot_long_form(rows), self.order);
        if groups.is_empty() {
            render_empty(frame, area, block, empty, theme);
            return;
        }

        let (bar_width, group_gap) = bar_geometry(area.width.saturating_sub(2), groups.len());
        let max = groups.iter().map(|g| g.values.total).max().unwrap_or(0).max(1);

        let mut chart = BarChart::default()
            .block(block)
            .bar_width(bar_width)
            .bar_gap(0)
            .group_gap(group_gap)
            .max(max);

        for group in &groups {
            let bars: Vec<Bar> = Measure::ALL
                .iter()
                .map(|&measure| {
                    let value = group.values.get(measure);
                    Bar::default()
                        .value(value)
                        .text_value(format_compact(value))
                        .style(theme.measure_style(measure))
                        .value_style(theme.bar_value)
                })
                .collect();
            chart = chart.data(
                BarGroup::default()
                    .label(Line::from(group.key.to_string()))
                    .bars(&bars),
            );
        }

        frame.render_widget(chart, area);
    }
}

// ── Shared helpers ───────────────────────────────────────────────────────────

fn section_title(title: &str, theme: &Theme) -> Vec<Span<'static>> {
    vec![Span::styled(format!(" {title} "), theme.section_title)]
}

/// `■ casual ■ registered ■ total` in series colours.
fn legend_spans(theme: &Theme) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for measure in Measure::ALL {
        spans.push(Span::styled("■ ", theme.measure_style(measure)));
        spans.push(Span::styled(format!("{measure} "), theme.label));
    }
    spans
}

fn section_block<'a>(title: Line<'a>, theme: &Theme) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(theme.border)
        .title(title)
}

fn render_empty(frame: &mut Frame, area: Rect, block: Block, reason: EmptyReason, theme: &Theme) {
    let (headline, hint) = reason.messages();
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(headline, theme.warning)),
        Line::from(Span::styled(hint, theme.dim)),
    ];
    frame.render_widget(
        Paragraph::new(text).alignment(Alignment::Center).block(block),
        area,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn long_rows(groups: &[(GroupValue, u64, u64)]) -> Vec<LongFormRow<GroupValue>> {
        let mut rows = Vec::new();
        for measure in Measure::ALL {
            for (key, casual, registered) in groups {
                let value = match measure {
                    Measure::Casual => *casual,
                    Measure::Registered => *registered,
                    Measure::Total => casual + registered,
                };
                rows.push(LongFormRow {
                    key: key.clone(),
                    measure,
                    value,
                });
            }
        }
        rows
    }

    fn monthly_rows() -> Vec<SummaryRow<String>> {
        [("January", 4, 8), ("February", 10, 20), ("March", 7, 3)]
            .iter()
            .map(|(name, casual, registered)| SummaryRow {
                key: name.to_string(),
                totals: MeasureTotals {
                    casual: *casual,
                    registered: *registered,
                    total: casual + registered,
                },
            })
            .collect()
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_monthly_series_order_and_points() {
        let series = monthly_series(&monthly_rows());
        let measures: Vec<Measure> = series.iter().map(|(m, _)| *m).collect();
        assert_eq!(
            measures,
            vec![Measure::Total, Measure::Casual, Measure::Registered]
        );
        assert_eq!(series[0].1, vec![(0.0, 12.0), (1.0, 30.0), (2.0, 10.0)]);
        assert_eq!(series[1].1[1], (1.0, 10.0));
    }

    #[test]
    fn test_short_month() {
        assert_eq!(short_month("September"), "Sep");
        assert_eq!(short_month("May"), "May");
    }

    #[test]
    fn test_pivot_restores_wide_values() {
        let rows = long_rows(&[
            (GroupValue::Hour(17), 50, 300),
            (GroupValue::Hour(8), 20, 200),
        ]);
        let groups = pivot_long_form(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].key, GroupValue::Hour(17));
        assert_eq!(
            groups[0].values,
            MeasureTotals {
                casual: 50,
                registered: 300,
                total: 350,
            }
        );
        assert_eq!(groups[1].values.total, 220);
    }

    #[test]
    fn test_order_groups() {
        let rows = long_rows(&[
            (GroupValue::Hour(17), 50, 300),
            (GroupValue::Hour(0), 1, 1),
            (GroupValue::Hour(8), 20, 200),
        ]);
        let keys = |order| -> Vec<GroupValue> {
            order_groups(pivot_long_form(&rows), order)
                .into_iter()
                .map(|g| g.key)
                .collect()
        };
        assert_eq!(
            keys(GroupOrder::Ascending),
            vec![GroupValue::Hour(0), GroupValue::Hour(8), GroupValue::Hour(17)]
        );
        assert_eq!(
            keys(GroupOrder::Descending),
            vec![GroupValue::Hour(17), GroupValue::Hour(8), GroupValue::Hour(0)]
        );
        assert_eq!(
            keys(GroupOrder::Summary),
            vec![GroupValue::Hour(17), GroupValue::Hour(0), GroupValue::Hour(8)]
        );
    }

    #[test]
    fn test_bar_geometry() {
        // 24 hours in 100 columns: 72 bars + 23 gaps fit.
        assert_eq!(bar_geometry(100, 24), (1, 1));
        // 24 hours in 80 columns: gaps dropped.
        assert_eq!(bar_geometry(80, 24), (1, 0));
        // 4 seasons in 60 columns: (60 - 3) / 12 = 4.
        assert_eq!(bar_geometry(60, 4), (4, 1));
        // Degenerate inputs never yield a zero-width bar.
        assert_eq!(bar_geometry(0, 0), (1, 0));
    }

    #[test]
    fn test_render_monthly_chart_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_monthly_chart(frame, area, &monthly_rows(), &theme);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("Monthly rentals"));
    }

    #[test]
    fn test_render_monthly_chart_single_month() {
        let mut terminal = Terminal::new(TestBackend::new(60, 12)).unwrap();
        let theme = Theme::dark();
        let rows = vec![monthly_rows().remove(0)];
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_monthly_chart(frame, area, &rows, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_monthly_chart_empty_shows_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let theme = Theme::dark();
        terminal
            .draw(|frame| {
                let area = frame.area();
                render_monthly_chart(frame, area, &[], &theme);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("No rentals in range"));
    }

    #[test]
    fn test_render_grouped_bars_does_not_panic() {
        let mut terminal = Terminal::new(TestBackend::new(120, 16)).unwrap();
        let theme = Theme::light();
        let hours: Vec<(GroupValue, u64, u64)> =
            (0..24).map(|h| (GroupValue::Hour(h), u64::from(h), 100)).collect();
        let rows = long_rows(&hours);
        let chart = GroupedBars {
            title: "Working days",
            axis_label: "Hour",
            order: GroupOrder::Descending,
            mirrored: true,
        };
        terminal
            .draw(|frame| {
                let area = frame.area();
                chart.render(frame, area, &rows, EmptyReason::NoRentals, &theme);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("Working days"));
        assert!(text.contains("registered"));
    }

    #[test]
    fn test_render_grouped_bars_narrow_area() {
        let mut terminal = Terminal::new(TestBackend::new(20, 8)).unwrap();
        let theme = Theme::dark();
        let rows = long_rows(&[(GroupValue::Season("Fall".to_string()), 10, 20)]);
        let chart = GroupedBars {
            title: "Seasons",
            axis_label: "Season",
            order: GroupOrder::Summary,
            mirrored: false,
        };
        terminal
            .draw(|frame| {
                let area = frame.area();
                chart.render(frame, area, &rows, EmptyReason::NoRentals, &theme);
            })
            .unwrap();
    }

    #[test]
    fn test_render_grouped_bars_empty_shows_placeholder() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let theme = Theme::dark();
        let chart = GroupedBars {
            title: "Weekends",
            axis_label: "Hour",
            order: GroupOrder::Ascending,
            mirrored: false,
        };
        terminal
            .draw(|frame| {
                let area = frame.area();
                chart.render(frame, area, &[], EmptyReason::NoRentals, &theme);
            })
            .unwrap();
        assert!(buffer_text(&terminal).contains("No rentals in range"));
    }

    #[test]
    fn test_render_grouped_bars_without_hours_names_missing_column() {
        let mut terminal = Terminal::new(TestBackend::new(60, 10)).unwrap();
        let theme = Theme::dark();
        let chart = GroupedBars {
            title: "Working days",
            axis_label: "Hour",
            order: GroupOrder::Ascending,
            mirrored: false,
        };
        terminal
            .draw(|frame| {
                let area = frame.area();
                chart.render(frame, area, &[], EmptyReason::NoHourlyData, &theme);
            })
            .unwrap();
        let text = buffer_text(&terminal);
        assert!(text.contains("No hourly data in this dataset"));
        assert!(!text.contains("No rentals in range"));
    }
}
