// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! The order-level building blocks of a [`super::Position`]: one [`Order`] per open or close
//! attempt, the [`OrderStatus`] a venue callback reports against it, and the [`Fill`] payload
//! carried by a `Filled`/`FilledPartially` callback.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Venue reference handed back by [`super::Position`]'s open/close operations, identifying the
/// order a later `update_opening`/`update_closing` callback refers to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderTransactionContext {
    /// Order id assigned by the venue at acknowledgement time.
    pub exchange_order_id: String,
}

impl OrderTransactionContext {
    pub fn new(exchange_order_id: impl Into<String>) -> Self {
        Self {
            exchange_order_id: exchange_order_id.into(),
        }
    }
}

/// Status a venue callback reports for one order.
///
/// `Sent` and `RequestedCancel` are set by [`super::Position`] itself the moment it submits an
/// order or a cancel request; a callback reporting either is a caller bug, not a position state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Sent,
    RequestedCancel,
    Submitted,
    FilledPartially,
    Filled,
    Error,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    /// Statuses that end an order's ability to receive further fills.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Error | Self::Cancelled | Self::Rejected)
    }
}

/// A single fill reported alongside a `Filled`/`FilledPartially` callback.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub price: Decimal,
    pub quantity: Decimal,
}

/// One order submitted on either the open or close side of a [`super::Position`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub submission_time: DateTime<Utc>,
    pub is_active: bool,
    pub is_canceled: bool,
    /// `None` for a market order.
    pub limit_price: Option<Decimal>,
    pub planned_qty: Decimal,
    pub transaction_context: Option<OrderTransactionContext>,
    pub executed_qty: Decimal,
    pub commission: Decimal,
    /// A terminal status delivered before the fills it implies have all arrived. Held back until
    /// `executed_qty` reconciles with the remaining quantity it reported, then resolved by the
    /// reconciling fill. See [`super::Position::update_opening`].
    pub(crate) pending_terminal: Option<(OrderStatus, Decimal)>,
}

impl Order {
    pub fn new(submission_time: DateTime<Utc>, limit_price: Option<Decimal>, planned_qty: Decimal) -> Self {
        Self {
            submission_time,
            is_active: true,
            is_canceled: false,
            limit_price,
            planned_qty,
            transaction_context: None,
            executed_qty: Decimal::ZERO,
            commission: Decimal::ZERO,
            pending_terminal: None,
        }
    }

    pub fn remaining_qty(&self) -> Decimal {
        self.planned_qty - self.executed_qty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn remaining_qty_accounts_for_executed_qty() {
        let mut order = Order::new(Utc.timestamp_opt(0, 0).unwrap(), None, dec!(11));
        assert_eq!(order.remaining_qty(), dec!(11));
        order.executed_qty = dec!(6);
        assert_eq!(order.remaining_qty(), dec!(5));
    }
}
