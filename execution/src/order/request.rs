// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! Request/response payloads exchanged with an [`ExecutionClient`](crate::client::ExecutionClient):
//! [`OrderRequestOpen`] & [`OrderRequestCancel`] are sent, [`OrderResponseCancel`] (and the
//! `Result<Open, OrderError>` state on a returned [`Order`](super::Order)) come back.

use crate::{
    compat::{AssetIndex, AssetNameExchange, ExchangeIndex, InstrumentIndex, InstrumentNameExchange},
    error::OrderError,
    order::{id::OrderId, state::Cancelled, OrderEvent, OrderKind, TimeInForce},
};
use derive_more::Constructor;
use meridian_markets::{ExchangeId, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// An [`OrderEvent`] requesting a new order be opened.
pub type OrderRequestOpen<ExchangeKey = ExchangeIndex, InstrumentKey = InstrumentIndex> =
    OrderEvent<RequestOpen, ExchangeKey, InstrumentKey>;

/// An [`OrderEvent`] requesting an open order be cancelled.
pub type OrderRequestCancel<ExchangeKey = ExchangeIndex, InstrumentKey = InstrumentIndex> =
    OrderEvent<RequestCancel, ExchangeKey, InstrumentKey>;

/// Venue response to an [`OrderRequestCancel`].
pub type OrderResponseCancel<
    ExchangeKey = ExchangeIndex,
    AssetKey = AssetIndex,
    InstrumentKey = InstrumentIndex,
> = OrderEvent<Result<Cancelled, OrderError<AssetKey, InstrumentKey>>, ExchangeKey, InstrumentKey>;

/// [`OrderResponseCancel`] keyed by the raw venue-native exchange/asset/instrument names.
pub type UnindexedOrderResponseCancel =
    OrderResponseCancel<ExchangeId, AssetNameExchange, InstrumentNameExchange>;

/// Terms of a new order request.
#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Constructor,
)]
pub struct RequestOpen {
    pub side: Side,
    pub price: Decimal,
    pub quantity: Decimal,
    pub kind: OrderKind,
    pub time_in_force: TimeInForce,
}

/// Identifies which order to cancel. `id: None` lets the venue cancel by [`ClientOrderId`]
/// alone, for requests sent before the venue [`OrderId`] was known.
///
/// [`ClientOrderId`]: super::id::ClientOrderId
#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default, Deserialize, Serialize, Constructor,
)]
pub struct RequestCancel {
    pub id: Option<OrderId>,
}
