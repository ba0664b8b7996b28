// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! A single fill reported by the venue for a (partially or fully) open order.

use crate::order::id::OrderId;
use chrono::{DateTime, Utc};
use derive_more::{Constructor, From};
use meridian_markets::Side;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use smol_str::SmolStr;
use std::fmt::{Display, Formatter};

/// Venue-assigned identifier for a [`Trade`], unique per exchange.
#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, From, Constructor,
)]
pub struct TradeId<T = SmolStr>(pub T);

/// A single fill: the venue confirming that (part of) an order's quantity executed at a price.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Constructor)]
pub struct Trade<AssetKey, InstrumentKey> {
    pub id: TradeId,
    pub instrument: InstrumentKey,
    pub order_id: OrderId,
    pub time_exchange: DateTime<Utc>,
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
    pub fees: AssetFees<AssetKey>,
}

impl<AssetKey, InstrumentKey> Trade<AssetKey, InstrumentKey> {
    pub fn value_quote(&self) -> Decimal {
        self.price * self.quantity.abs()
    }
}

impl<AssetKey, InstrumentKey> Display for Trade<AssetKey, InstrumentKey>
where
    AssetKey: Display,
    InstrumentKey: Display,
{
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{{ instrument: {}, side: {}, price: {}, quantity: {}, time: {} }}",
            self.instrument, self.side, self.price, self.quantity, self.time_exchange
        )
    }
}

/// Commission charged for a [`Trade`], denominated in `AssetKey` (the venue's fee asset).
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Constructor)]
pub struct AssetFees<AssetKey> {
    pub asset: Option<AssetKey>,
    pub fees: Decimal,
}

impl<AssetKey> Default for AssetFees<AssetKey> {
    fn default() -> Self {
        Self {
            asset: None,
            fees: Decimal::ZERO,
        }
    }
}
