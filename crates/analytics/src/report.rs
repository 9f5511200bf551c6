use chrono::NaiveDate;
use core_types::{DateRange, ReviewScore};
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Group name for rows that carry no category label.
pub const UNKNOWN_CATEGORY: &str = "unknown";

/// Orders approved on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub day: NaiveDate,
    /// Distinct order ids approved that day.
    pub order_count: usize,
    /// Sum of payment values of every row approved that day.
    pub revenue: Decimal,
}

/// The daily order series, ascending by day, with its headline totals.
///
/// Days without any approved row are absent rather than zero-filled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DailyOrders {
    pub days: Vec<DailySummary>,
    /// Sum of the per-day distinct order counts.
    pub total_orders: usize,
    pub total_revenue: Decimal,
}

impl DailyOrders {
    pub fn from_days(days: Vec<DailySummary>) -> Self {
        let total_orders = days.iter().map(|d| d.order_count).sum();
        let total_revenue = days.iter().map(|d| d.revenue).sum();
        Self {
            days,
            total_orders,
            total_revenue,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub category: String,
    /// Order-item rows in this category.
    pub products: usize,
}

/// Row counts per category name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategorySales {
    counts: BTreeMap<String, usize>,
}

impl CategorySales {
    pub fn from_counts(counts: BTreeMap<String, usize>) -> Self {
        Self { counts }
    }

    pub fn counts(&self) -> &BTreeMap<String, usize> {
        &self.counts
    }

    pub fn get(&self, category: &str) -> Option<usize> {
        self.counts.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of every category's count, i.e. the number of rows aggregated.
    pub fn total_rows(&self) -> usize {
        self.counts.values().sum()
    }

    /// The `n` best-selling categories, highest count first.
    /// Equal counts are ordered by category name.
    pub fn top(&self, n: usize) -> Vec<CategorySummary> {
        let mut ranked = self.summaries();
        ranked.sort_by(|a, b| {
            b.products
                .cmp(&a.products)
                .then_with(|| a.category.cmp(&b.category))
        });
        ranked.truncate(n);
        ranked
    }

    /// The `n` worst-selling categories, lowest count first.
    /// Equal counts are ordered by category name.
    pub fn bottom(&self, n: usize) -> Vec<CategorySummary> {
        let mut ranked = self.summaries();
        ranked.sort_by(|a, b| {
            a.products
                .cmp(&b.products)
                .then_with(|| a.category.cmp(&b.category))
        });
        ranked.truncate(n);
        ranked
    }

    fn summaries(&self) -> Vec<CategorySummary> {
        self.counts
            .iter()
            .map(|(category, &products)| CategorySummary {
                category: category.clone(),
                products,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreCount {
    pub score: ReviewScore,
    pub count: usize,
}

/// How often each review score occurs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScoreDistribution {
    /// Scores that occur at least once, highest count first. Equal counts
    /// list the higher score first.
    pub counts: Vec<ScoreCount>,
    /// The most frequent score; the first entry of `counts`.
    pub mode: Option<ReviewScore>,
    /// Rows without a review score.
    pub unscored: usize,
}

impl ScoreDistribution {
    pub fn count_for(&self, score: ReviewScore) -> usize {
        self.counts
            .iter()
            .find(|c| c.score == score)
            .map_or(0, |c| c.count)
    }

    pub fn total_scored(&self) -> usize {
        self.counts.iter().map(|c| c.count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// Everything one dashboard refresh shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardReport {
    /// The date range the rows were selected with, if any.
    pub range: Option<DateRange>,
    /// Number of rows aggregated.
    pub rows: usize,
    pub daily: DailyOrders,
    pub top_categories: Vec<CategorySummary>,
    pub bottom_categories: Vec<CategorySummary>,
    pub category_count: usize,
    pub scores: ScoreDistribution,
}

impl DashboardReport {
    pub fn is_empty(&self) -> bool {
        self.rows == 0
    }
}
