use core_types::{DateRange, OrderRecord, OrderTable};
use tracing::debug;

/// Selects the rows approved within `range`, both end days included.
///
/// An inverted range selects nothing. Rows without an approval timestamp are
/// never selected.
pub fn filter_by_date<'a>(table: &'a OrderTable, range: &DateRange) -> &'a [OrderRecord] {
    table.approved_within(range)
}

/// The date selection of one dashboard session.
///
/// Created from a table's approval bounds; the requested range is always
/// clamped into those bounds. A `FilterState` must only be applied to the
/// table it was created from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    bounds: Option<DateRange>,
    range: Option<DateRange>,
}

impl FilterState {
    /// Starts with the full approval range of `table` selected.
    pub fn new(table: &OrderTable) -> Self {
        let bounds = table.approval_bounds();
        Self {
            bounds,
            range: bounds,
        }
    }

    /// The first and last approval day, or `None` for a table with no approved rows.
    pub fn bounds(&self) -> Option<DateRange> {
        self.bounds
    }

    pub fn range(&self) -> Option<DateRange> {
        self.range
    }

    /// Selects `requested`, clamped into the bounds, and returns the effective range.
    pub fn set_range(&mut self, requested: DateRange) -> Option<DateRange> {
        self.range = self.bounds.map(|bounds| requested.clamp_to(&bounds));
        debug!(requested = %requested, effective = ?self.range, "Date range changed");
        self.range
    }

    /// Selects the full approval range again.
    pub fn reset(&mut self) {
        self.range = self.bounds;
    }

    /// The rows of `table` the current selection covers.
    pub fn apply<'a>(&self, table: &'a OrderTable) -> &'a [OrderRecord] {
        match &self.range {
            Some(range) => filter_by_date(table, range),
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use core_types::OrderTimestamps;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, m, d).unwrap()
    }

    fn at(m: u32, d: u32, h: u32) -> NaiveDateTime {
        date(m, d).and_hms_opt(h, 0, 0).unwrap()
    }

    fn table() -> OrderTable {
        let approvals = [
            Some(at(1, 1, 0)),
            Some(at(1, 1, 23)),
            Some(at(1, 2, 12)),
            Some(at(1, 5, 6)),
            Some(at(1, 31, 23)),
            None,
        ];
        OrderTable::from_records(
            approvals
                .iter()
                .enumerate()
                .map(|(i, &approved_at)| OrderRecord {
                    row_index: 0,
                    order_id: format!("o{}", i),
                    product_id: None,
                    category: None,
                    review_score: None,
                    payment_value: None,
                    timestamps: OrderTimestamps {
                        approved_at,
                        ..OrderTimestamps::default()
                    },
                })
                .collect(),
        )
    }

    #[test]
    fn test_every_filtered_row_is_inside_the_range() {
        let table = table();
        for (start, end) in [(1, 1), (1, 2), (2, 5), (3, 31), (1, 31), (6, 30)] {
            let range = DateRange::new(date(1, start), date(1, end));
            let selected = filter_by_date(&table, &range);
            assert!(selected
                .iter()
                .all(|r| r.approval_day().is_some_and(|day| range.contains(day))));

            let expected = table
                .records()
                .iter()
                .filter(|r| r.approval_day().is_some_and(|day| range.contains(day)))
                .count();
            assert_eq!(selected.len(), expected, "range {}", range);
        }
    }

    #[test]
    fn test_end_day_is_fully_included() {
        let table = table();
        let selected = filter_by_date(&table, &DateRange::new(date(1, 1), date(1, 1)));
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_inverted_range_selects_nothing() {
        let table = table();
        assert!(filter_by_date(&table, &DateRange::new(date(1, 5), date(1, 1))).is_empty());
    }

    #[test]
    fn test_filter_state_defaults_to_full_bounds() {
        let table = table();
        let state = FilterState::new(&table);
        assert_eq!(state.bounds(), Some(DateRange::new(date(1, 1), date(1, 31))));
        assert_eq!(state.apply(&table).len(), 5);
    }

    #[test]
    fn test_filter_state_clamps_and_resets() {
        let table = table();
        let mut state = FilterState::new(&table);

        let effective = state.set_range(DateRange::new(date(1, 2), date(12, 31)));
        assert_eq!(effective, Some(DateRange::new(date(1, 2), date(1, 31))));
        assert_eq!(state.apply(&table).len(), 3);

        state.set_range(DateRange::new(date(1, 10), date(1, 3)));
        assert!(state.apply(&table).is_empty());

        state.reset();
        assert_eq!(state.range(), state.bounds());
        assert_eq!(state.apply(&table).len(), 5);
    }

    #[test]
    fn test_filter_state_on_empty_table() {
        let table = OrderTable::default();
        let mut state = FilterState::new(&table);
        assert_eq!(state.bounds(), None);
        assert_eq!(state.set_range(DateRange::new(date(1, 1), date(1, 2))), None);
        assert!(state.apply(&table).is_empty());
    }
}
