// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! Accumulated state for one side (open or close) of a [`super::Position`].

use super::order::{Fill, Order};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The running totals and order history for either the open side or the close side of a
/// [`super::Position`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectionData {
    pub start_price: Decimal,
    pub first_trade_time: Option<DateTime<Utc>>,
    pub cumulative_volume: Decimal,
    pub cumulative_qty: Decimal,
    pub number_of_trades: u64,
    pub last_trade_price: Decimal,
    pub orders: Vec<Order>,
}

impl DirectionData {
    pub fn new(start_price: Decimal) -> Self {
        Self {
            start_price,
            first_trade_time: None,
            cumulative_volume: Decimal::ZERO,
            cumulative_qty: Decimal::ZERO,
            number_of_trades: 0,
            last_trade_price: Decimal::ZERO,
            orders: Vec::new(),
        }
    }

    pub fn has_active_orders(&self) -> bool {
        self.orders.last().is_some_and(|order| order.is_active)
    }

    pub fn is_canceling(&self) -> bool {
        self.orders
            .last()
            .is_some_and(|order| order.is_active && order.is_canceled)
    }

    pub fn avg_price(&self) -> Decimal {
        if self.cumulative_qty.is_zero() {
            Decimal::ZERO
        } else {
            self.cumulative_volume / self.cumulative_qty
        }
    }

    /// Folds a fill into the running totals and marks `time` as the first-trade milestone if
    /// this is the side's first one.
    pub(super) fn apply_fill(&mut self, fill: Fill, time: DateTime<Utc>) {
        self.cumulative_volume += fill.price * fill.quantity;
        self.cumulative_qty += fill.quantity;
        self.number_of_trades += 1;
        self.last_trade_price = fill.price;
        if self.first_trade_time.is_none() {
            self.first_trade_time = Some(time);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn avg_price_is_zero_with_no_fills() {
        let direction = DirectionData::new(dec!(100));
        assert_eq!(direction.avg_price(), Decimal::ZERO);
    }

    #[test]
    fn avg_price_is_volume_weighted() {
        let mut direction = DirectionData::new(dec!(100));
        let time = chrono::Utc::now();
        direction.apply_fill(
            Fill {
                price: dec!(10),
                quantity: dec!(2),
            },
            time,
        );
        direction.apply_fill(
            Fill {
                price: dec!(20),
                quantity: dec!(2),
            },
            time,
        );
        assert_eq!(direction.avg_price(), dec!(15));
        assert_eq!(direction.number_of_trades, 2);
        assert_eq!(direction.first_trade_time, Some(time));
    }
}
