use crate::enums::TimestampColumn;
use crate::error::CoreError;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A customer satisfaction rating. Only values 1 through 5 can be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct ReviewScore(u8);

impl ReviewScore {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, CoreError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CoreError::InvalidInput(
                "review_score".to_string(),
                format!("{} is outside {}..={}", value, Self::MIN, Self::MAX),
            ))
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for ReviewScore {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ReviewScore> for u8 {
    fn from(score: ReviewScore) -> Self {
        score.0
    }
}

impl fmt::Display for ReviewScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The date-time fields of an order row. A `None` is an empty cell in the source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderTimestamps {
    pub approved_at: Option<NaiveDateTime>,
    pub delivered_carrier_at: Option<NaiveDateTime>,
    pub delivered_customer_at: Option<NaiveDateTime>,
    pub estimated_delivery_at: Option<NaiveDateTime>,
    pub purchased_at: Option<NaiveDateTime>,
    pub shipping_limit_at: Option<NaiveDateTime>,
}

impl OrderTimestamps {
    pub fn get(&self, column: TimestampColumn) -> Option<NaiveDateTime> {
        match column {
            TimestampColumn::ApprovedAt => self.approved_at,
            TimestampColumn::DeliveredCarrierAt => self.delivered_carrier_at,
            TimestampColumn::DeliveredCustomerAt => self.delivered_customer_at,
            TimestampColumn::EstimatedDeliveryAt => self.estimated_delivery_at,
            TimestampColumn::PurchasedAt => self.purchased_at,
            TimestampColumn::ShippingLimitAt => self.shipping_limit_at,
        }
    }

    pub fn set(&mut self, column: TimestampColumn, value: Option<NaiveDateTime>) {
        let slot = match column {
            TimestampColumn::ApprovedAt => &mut self.approved_at,
            TimestampColumn::DeliveredCarrierAt => &mut self.delivered_carrier_at,
            TimestampColumn::DeliveredCustomerAt => &mut self.delivered_customer_at,
            TimestampColumn::EstimatedDeliveryAt => &mut self.estimated_delivery_at,
            TimestampColumn::PurchasedAt => &mut self.purchased_at,
            TimestampColumn::ShippingLimitAt => &mut self.shipping_limit_at,
        };
        *slot = value;
    }
}

/// One order-item line of the dataset.
///
/// Records are validated when the dataset is loaded: `order_id` is never empty,
/// `payment_value` is never negative and every timestamp is already parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRecord {
    /// Position in the approval-sorted table. Assigned by `OrderTable`.
    pub row_index: usize,
    pub order_id: String,
    pub product_id: Option<String>,
    /// English product category label.
    pub category: Option<String>,
    pub review_score: Option<ReviewScore>,
    pub payment_value: Option<Decimal>,
    pub timestamps: OrderTimestamps,
}

impl OrderRecord {
    pub fn approved_at(&self) -> Option<NaiveDateTime> {
        self.timestamps.approved_at
    }

    /// The calendar day the order's payment was approved.
    pub fn approval_day(&self) -> Option<NaiveDate> {
        self.timestamps.approved_at.map(|ts| ts.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_score_accepts_one_to_five() {
        for value in 1..=5 {
            assert_eq!(ReviewScore::new(value).map(|s| s.value()), Ok(value));
        }
    }

    #[test]
    fn test_review_score_rejects_out_of_range() {
        assert!(ReviewScore::new(0).is_err());
        assert!(ReviewScore::new(6).is_err());
        assert!(ReviewScore::try_from(255).is_err());
    }

    #[test]
    fn test_timestamps_get_and_set_cover_every_column() {
        let mut timestamps = OrderTimestamps::default();
        let ts = NaiveDate::from_ymd_opt(2018, 1, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        for column in TimestampColumn::ALL {
            assert_eq!(timestamps.get(column), None);
            timestamps.set(column, Some(ts));
            assert_eq!(timestamps.get(column), Some(ts));
        }
    }
}
