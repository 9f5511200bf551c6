use crate::chart::{bar, sparkline};
use crate::currency::CurrencyFormat;
use analytics::{CategorySummary, DashboardReport, ScoreDistribution};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use serde::Serialize;

const TITLE: &str = "E-Commerce Dataset Dashboard";
const BAR_WIDTH: usize = 30;
const SPARKLINE_WIDTH: usize = 60;
/// Above this many days the per-day table is replaced by the sparkline alone.
const MAX_DAILY_ROWS: usize = 31;
const MODE_MARKER: &str = "◀ most frequent";

/// Renders a `DashboardReport` for the terminal or as JSON.
///
/// The renderer only reads the report; it never aggregates.
#[derive(Debug, Clone, Default)]
pub struct Renderer {
    currency: CurrencyFormat,
    color: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    currency: &'a str,
    total_revenue_formatted: String,
    #[serde(flatten)]
    report: &'a DashboardReport,
}

impl Renderer {
    pub fn new(currency: CurrencyFormat) -> Self {
        Self {
            currency,
            color: false,
        }
    }

    /// Enables ANSI styling (the highlighted mode score, bold headers).
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn currency(&self) -> &CurrencyFormat {
        &self.currency
    }

    pub fn render(&self, report: &DashboardReport) -> String {
        let sections = [
            self.render_title(report),
            self.render_daily(report),
            self.render_categories(report),
            self.render_scores(&report.scores),
        ];
        let mut out = sections.join("\n\n");
        out.push('\n');
        out
    }

    pub fn render_json(&self, report: &DashboardReport) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&JsonReport {
            currency: &self.currency.code,
            total_revenue_formatted: self.currency.format(report.daily.total_revenue),
            report,
        })
    }

    fn render_title(&self, report: &DashboardReport) -> String {
        let selection = match report.range {
            Some(range) if range.is_empty() => {
                format!("Selected range {} is empty", range)
            }
            Some(range) => format!(
                "Orders approved {} ({} rows)",
                range,
                self.currency.format_count(report.rows)
            ),
            None => "No approved orders to select from".to_string(),
        };
        format!("{}\n{}", TITLE, selection)
    }

    fn render_daily(&self, report: &DashboardReport) -> String {
        let daily = &report.daily;
        let mut headline = self.table(&["Total Order", "Total Revenue"]);
        headline.add_row(vec![
            self.number(self.currency.format_count(daily.total_orders)),
            self.number(self.currency.format(daily.total_revenue)),
        ]);

        let mut lines = vec!["Daily Orders".to_string(), headline.to_string()];

        let (Some(first), Some(last)) = (daily.days.first(), daily.days.last()) else {
            lines.push("No orders in the selected range.".to_string());
            return lines.join("\n");
        };

        let counts: Vec<usize> = daily.days.iter().map(|d| d.order_count).collect();
        lines.push(format!(
            "{} {} {}",
            first.day,
            sparkline(&counts, SPARKLINE_WIDTH),
            last.day
        ));
        if let Some(peak) = daily
            .days
            .iter()
            .max_by(|a, b| a.order_count.cmp(&b.order_count).then(b.day.cmp(&a.day)))
        {
            lines.push(format!(
                "Peak: {} with {} orders",
                peak.day,
                self.currency.format_count(peak.order_count)
            ));
        }

        if daily.days.len() <= MAX_DAILY_ROWS {
            let max = counts.iter().copied().max().unwrap_or(0);
            let mut table = self.table(&["Day", "Orders", "Revenue", ""]);
            for day in &daily.days {
                table.add_row(vec![
                    Cell::new(day.day),
                    self.number(self.currency.format_count(day.order_count)),
                    self.number(self.currency.format(day.revenue)),
                    Cell::new(bar(day.order_count, max, BAR_WIDTH)),
                ]);
            }
            lines.push(table.to_string());
        }

        lines.join("\n")
    }

    fn render_categories(&self, report: &DashboardReport) -> String {
        let n = report.top_categories.len();
        let lines = [
            "Product Sales".to_string(),
            format!("Top {} categories by items sold", n),
            self.category_table(&report.top_categories),
            format!("Bottom {} categories by items sold", report.bottom_categories.len()),
            self.category_table(&report.bottom_categories),
        ];
        lines.join("\n")
    }

    fn category_table(&self, categories: &[CategorySummary]) -> String {
        if categories.is_empty() {
            return "No categories in the selected range.".to_string();
        }
        let max = categories.iter().map(|c| c.products).max().unwrap_or(0);
        let mut table = self.table(&["Category", "Products", ""]);
        for category in categories {
            table.add_row(vec![
                Cell::new(&category.category),
                self.number(self.currency.format_count(category.products)),
                Cell::new(bar(category.products, max, BAR_WIDTH)),
            ]);
        }
        table.to_string()
    }

    fn render_scores(&self, scores: &ScoreDistribution) -> String {
        let mut lines = vec!["Customer Ratings".to_string()];
        if scores.is_empty() {
            lines.push("No review scores in the selected range.".to_string());
            return lines.join("\n");
        }

        let max = scores.counts.first().map_or(0, |c| c.count);
        let mut table = self.table(&["Rating", "Frequency", "", ""]);
        for entry in &scores.counts {
            let is_mode = scores.mode == Some(entry.score);
            let mut rating = Cell::new(entry.score);
            let mut chart = Cell::new(bar(entry.count, max, BAR_WIDTH));
            if is_mode && self.color {
                rating = rating.fg(Color::Blue).add_attribute(Attribute::Bold);
                chart = chart.fg(Color::Blue);
            }
            table.add_row(vec![
                rating,
                self.number(self.currency.format_count(entry.count)),
                chart,
                Cell::new(if is_mode { MODE_MARKER } else { "" }),
            ]);
        }
        lines.push(table.to_string());

        if scores.unscored > 0 {
            lines.push(format!(
                "{} rows have no review score.",
                self.currency.format_count(scores.unscored)
            ));
        }
        lines.join("\n")
    }

    fn table(&self, header: &[&str]) -> Table {
        let mut table = Table::new();
        table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if self.color {
            table.enforce_styling();
            table.set_header(header.iter().map(|h| Cell::new(h).add_attribute(Attribute::Bold)));
        } else {
            table.force_no_tty();
            table.set_header(header.to_vec());
        }
        table
    }

    fn number(&self, text: String) -> Cell {
        Cell::new(text).set_alignment(CellAlignment::Right)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::AnalyticsEngine;
    use chrono::NaiveDate;
    use core_types::{DateRange, OrderRecord, OrderTimestamps, ReviewScore};
    use rust_decimal_macros::dec;

    fn rows() -> Vec<OrderRecord> {
        let day = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
        let specs = [
            ("a", 0, "toys", 5, dec!(10)),
            ("b", 0, "toys", 5, dec!(20)),
            ("c", 0, "auto", 5, dec!(30)),
            ("d", 1, "garden_tools", 4, dec!(5)),
            ("e", 1, "auto", 1, dec!(1234.5)),
        ];
        specs
            .iter()
            .map(|&(id, offset, category, score, payment)| OrderRecord {
                row_index: 0,
                order_id: id.to_string(),
                product_id: Some(format!("p-{}", id)),
                category: Some(category.to_string()),
                review_score: ReviewScore::new(score).ok(),
                payment_value: Some(payment),
                timestamps: OrderTimestamps {
                    approved_at: (day + chrono::Days::new(offset)).and_hms_opt(9, 0, 0),
                    ..OrderTimestamps::default()
                },
            })
            .collect()
    }

    fn report(rows: &[OrderRecord]) -> DashboardReport {
        let mut report = AnalyticsEngine::new().calculate(rows, 10).unwrap();
        report.range = Some(DateRange::new(
            NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2018, 1, 2).unwrap(),
        ));
        report
    }

    #[test]
    fn test_render_shows_headlines_and_sections() {
        let text = Renderer::default().render(&report(&rows()));

        assert!(text.starts_with(TITLE));
        assert!(text.contains("Total Order"));
        assert!(text.contains("Rp 1.299,50"));
        assert!(text.contains("2018-01-01"));
        assert!(text.contains("Top 3 categories"));
        assert!(text.contains("garden_tools"));
        assert!(!text.contains('\u{1b}'), "plain rendering must not emit ANSI codes");
    }

    #[test]
    fn test_mode_row_is_marked() {
        let text = Renderer::default().render(&report(&rows()));
        let marked: Vec<&str> = text.lines().filter(|l| l.contains(MODE_MARKER)).collect();
        assert_eq!(marked.len(), 1);
        assert!(marked[0].contains(" 5 "));
    }

    #[test]
    fn test_empty_selection_renders_zeroes() {
        let mut empty = AnalyticsEngine::new().calculate(&[], 10).unwrap();
        empty.range = Some(DateRange::new(
            NaiveDate::from_ymd_opt(2018, 2, 1).unwrap(),
            NaiveDate::from_ymd_opt(2018, 1, 1).unwrap(),
        ));
        let text = Renderer::default().render(&empty);

        assert!(text.contains("is empty"));
        assert!(text.contains("Rp 0,00"));
        assert!(text.contains("No orders in the selected range."));
        assert!(text.contains("No categories in the selected range."));
        assert!(text.contains("No review scores in the selected range."));
    }

    #[test]
    fn test_json_output_carries_formatted_revenue() {
        let json = Renderer::default().render_json(&report(&rows())).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["currency"], "IDR");
        assert_eq!(value["total_revenue_formatted"], "Rp 1.299,50");
        assert_eq!(value["rows"], 5);
        assert_eq!(value["daily"]["total_orders"], 5);
        assert_eq!(value["scores"]["mode"], 5);
        assert_eq!(value["top_categories"][0]["category"], "auto");
    }
}
