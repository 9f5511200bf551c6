use crate::range::DateRange;
use crate::structs::OrderRecord;

/// The loaded dataset: every order row, sorted ascending by approval timestamp.
///
/// Rows without an approval timestamp sort after all others. The table is
/// immutable once built; filtered views are borrowed slices of it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderTable {
    records: Vec<OrderRecord>,
}

impl OrderTable {
    /// Builds a table from unsorted records.
    ///
    /// The sort is stable, so rows sharing an approval timestamp keep their
    /// input order. `row_index` is reassigned densely from zero.
    pub fn from_records(mut records: Vec<OrderRecord>) -> Self {
        records.sort_by_key(|r| (r.approved_at().is_none(), r.approved_at()));
        for (index, record) in records.iter_mut().enumerate() {
            record.row_index = index;
        }
        Self { records }
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of rows that have an approval timestamp.
    pub fn approved_len(&self) -> usize {
        self.records.partition_point(|r| r.approved_at().is_some())
    }

    /// The first and last approval day in the table, or `None` if no row is approved.
    pub fn approval_bounds(&self) -> Option<DateRange> {
        let approved = &self.records[..self.approved_len()];
        let first = approved.first()?.approval_day()?;
        let last = approved.last()?.approval_day()?;
        Some(DateRange::new(first, last))
    }

    /// The contiguous run of rows whose approval day falls inside `range`.
    pub fn approved_within(&self, range: &DateRange) -> &[OrderRecord] {
        if range.is_empty() {
            return &[];
        }
        let lo = self
            .records
            .partition_point(|r| matches!(r.approval_day(), Some(day) if day < range.start));
        let hi = self
            .records
            .partition_point(|r| matches!(r.approval_day(), Some(day) if day <= range.end));
        &self.records[lo..hi.max(lo)]
    }
}
