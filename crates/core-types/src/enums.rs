/// The six date-time columns of an order row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimestampColumn {
    ApprovedAt,
    DeliveredCarrierAt,
    DeliveredCustomerAt,
    EstimatedDeliveryAt,
    PurchasedAt,
    ShippingLimitAt,
}

impl TimestampColumn {
    pub const ALL: [TimestampColumn; 6] = [
        TimestampColumn::ApprovedAt,
        TimestampColumn::DeliveredCarrierAt,
        TimestampColumn::DeliveredCustomerAt,
        TimestampColumn::EstimatedDeliveryAt,
        TimestampColumn::PurchasedAt,
        TimestampColumn::ShippingLimitAt,
    ];

    /// The header name of this column in the source CSV.
    pub fn column_name(&self) -> &'static str {
        match self {
            TimestampColumn::ApprovedAt => "order_approved_at",
            TimestampColumn::DeliveredCarrierAt => "order_delivered_carrier_date",
            TimestampColumn::DeliveredCustomerAt => "order_delivered_customer_date",
            TimestampColumn::EstimatedDeliveryAt => "order_estimated_delivery_date",
            TimestampColumn::PurchasedAt => "order_purchase_timestamp",
            TimestampColumn::ShippingLimitAt => "shipping_limit_date",
        }
    }
}
