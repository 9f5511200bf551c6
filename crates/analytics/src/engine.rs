use crate::error::AnalyticsError;
use crate::report::{
    CategorySales, DailyOrders, DailySummary, DashboardReport, ScoreCount, ScoreDistribution,
    UNKNOWN_CATEGORY,
};
use chrono::NaiveDate;
use core_types::{OrderRecord, ReviewScore};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

/// A stateless calculator for the dashboard's derived views.
///
/// Every method is a pure function of the rows it is handed; calling it twice
/// on the same slice yields the same result.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnalyticsEngine {}

impl AnalyticsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs all three aggregations over `rows`.
    ///
    /// # Arguments
    ///
    /// * `rows` - The order rows to aggregate, usually a date-filtered slice.
    /// * `top_n` - How many categories the top and bottom rankings keep.
    ///
    /// # Returns
    ///
    /// A `DashboardReport` with `range` unset, or `InvalidCutoff` if `top_n` is zero.
    pub fn calculate(
        &self,
        rows: &[OrderRecord],
        top_n: usize,
    ) -> Result<DashboardReport, AnalyticsError> {
        if top_n == 0 {
            return Err(AnalyticsError::InvalidCutoff(top_n));
        }

        let daily = self.daily_orders(rows);
        let categories = self.category_sales(rows);
        let scores = self.review_scores(rows);

        debug!(
            rows = rows.len(),
            days = daily.days.len(),
            categories = categories.len(),
            "Aggregated dashboard views"
        );

        Ok(DashboardReport {
            range: None,
            rows: rows.len(),
            daily,
            top_categories: categories.top(top_n),
            bottom_categories: categories.bottom(top_n),
            category_count: categories.len(),
            scores,
        })
    }

    /// Buckets rows by approval day: distinct orders and summed payments per day.
    ///
    /// Rows without an approval timestamp are ignored and a missing payment
    /// counts as zero.
    pub fn daily_orders(&self, rows: &[OrderRecord]) -> DailyOrders {
        let mut buckets: BTreeMap<NaiveDate, (HashSet<&str>, Decimal)> = BTreeMap::new();

        for row in rows {
            let Some(day) = row.approval_day() else {
                continue;
            };
            let (orders, revenue) = buckets.entry(day).or_default();
            orders.insert(row.order_id.as_str());
            *revenue += row.payment_value.unwrap_or(Decimal::ZERO);
        }

        let days = buckets
            .into_iter()
            .map(|(day, (orders, revenue))| DailySummary {
                day,
                order_count: orders.len(),
                revenue,
            })
            .collect();

        DailyOrders::from_days(days)
    }

    /// Counts rows per category. Rows without a category count towards
    /// `UNKNOWN_CATEGORY`.
    pub fn category_sales(&self, rows: &[OrderRecord]) -> CategorySales {
        let mut counts: BTreeMap<String, usize> = BTreeMap::new();

        for row in rows {
            let category = row.category.as_deref().unwrap_or(UNKNOWN_CATEGORY);
            match counts.get_mut(category) {
                Some(count) => *count += 1,
                None => {
                    counts.insert(category.to_string(), 1);
                }
            }
        }

        CategorySales::from_counts(counts)
    }

    /// Counts occurrences of each review score and picks the most frequent one.
    ///
    /// Ties on count go to the higher score, both in the ordering and for the mode.
    pub fn review_scores(&self, rows: &[OrderRecord]) -> ScoreDistribution {
        let mut tally = [0usize; ReviewScore::MAX as usize];
        let mut unscored = 0;

        for row in rows {
            match row.review_score {
                Some(score) => tally[(score.value() - ReviewScore::MIN) as usize] += 1,
                None => unscored += 1,
            }
        }

        let mut counts: Vec<ScoreCount> = (ReviewScore::MIN..=ReviewScore::MAX)
            .zip(tally)
            .filter(|&(_, count)| count > 0)
            .filter_map(|(value, count)| {
                ReviewScore::new(value)
                    .ok()
                    .map(|score| ScoreCount { score, count })
            })
            .collect();
        counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| b.score.cmp(&a.score)));

        ScoreDistribution {
            mode: counts.first().map(|c| c.score),
            counts,
            unscored,
        }
    }
}
