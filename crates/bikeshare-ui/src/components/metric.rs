//! Headline metric cards shown above the monthly chart.

use bikeshare_core::formatting::{format_count, percentage};
use bikeshare_core::models::{Measure, MeasureTotals};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::themes::Theme;

/// One headline number with an optional secondary line.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricCard {
    pub label: &'static str,
    pub measure: Measure,
    /// Count formatted with thousands separators.
    pub value: String,
    /// Secondary line, e.g. share of the total.
    pub caption: String,
}

impl MetricCard {
    /// Build the three cards (casual, registered, total) from the totals of
    /// the monthly summary.
    pub fn from_totals(totals: &MeasureTotals) -> [MetricCard; 3] {
        let whole = totals.total as f64;
        let share = |part: u64| format!("{:.1}% of total", percentage(part as f64, whole, 1));

        [
            MetricCard {
                label: "Total Casual",
                measure: Measure::Casual,
                value: format_count(totals.casual),
                caption: share(totals.casual),
            },
            MetricCard {
                label: "Total Registered",
                measure: Measure::Registered,
                value: format_count(totals.registered),
                caption: share(totals.registered),
            },
            MetricCard {
                label: "Total",
                measure: Measure::Total,
                value: format_count(totals.total),
                caption: "rentals in range".to_string(),
            },
        ]
    }

    /// Body lines: the value in its series colour, then the caption.
    pub fn to_lines(&self, theme: &Theme) -> Vec<Line<'static>> {
        vec![
            Line::from(Span::styled(
                self.value.clone(),
                theme.measure_style(self.measure).patch(theme.value),
            )),
            Line::from(Span::styled(self.caption.clone(), theme.dim)),
        ]
    }
}

/// Render the three cards side by side in equal columns.
pub fn render_metric_row(frame: &mut Frame, area: Rect, totals: &MeasureTotals, theme: &Theme) {
    let cards = MetricCard::from_totals(totals);
    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);

    for (card, column) in cards.iter().zip(columns.iter()) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border)
            .title(Span::styled(format!(" {} ", card.label), theme.label));
        let body = Paragraph::new(card.to_lines(theme))
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(body, *column);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn totals() -> MeasureTotals {
        MeasureTotals {
            casual: 620_017,
            registered: 2_672_662,
            total: 3_292_679,
        }
    }

    #[test]
    fn test_cards_in_measure_order() {
        let cards = MetricCard::from_totals(&totals());
        let measures: Vec<Measure> = cards.iter().map(|c| c.measure).collect();
        assert_eq!(
            measures,
            vec![Measure::Casual, Measure::Registered, Measure::Total]
        );
        assert_eq!(cards[0].label, "Total Casual");
        assert_eq!(cards[2].label, "Total");
    }

    #[test]
    fn test_card_values_use_thousands_separators() {
        let cards = MetricCard::from_totals(&totals());
        assert_eq!(cards[0].value, "620,017");
        assert_eq!(cards[1].value, "2,672,662");
        assert_eq!(cards[2].value, "3,292,679");
    }

    #[test]
    fn test_card_shares() {
        let cards = MetricCard::from_totals(&totals());
        assert_eq!(cards[0].caption, "18.8% of total");
        assert_eq!(cards[1].caption, "81.2% of total");
    }

    #[test]
    fn test_zero_totals_show_zero_share() {
        let cards = MetricCard::from_totals(&MeasureTotals::default());
        assert_eq!(cards[0].value, "0");
        assert_eq!(cards[0].caption, "0.0% of total");
    }

    #[test]
    fn test_render_metric_row_shows_values() {
        let backend = TestBackend::new(90, 4);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::dark();

        terminal
            .draw(|frame| {
                let area = frame.area();
                render_metric_row(frame, area, &totals(), &theme);
            })
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("620,017"));
        assert!(text.contains("3,292,679"));
        assert!(text.contains("Total Registered"));
    }
}
