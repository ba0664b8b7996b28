//! The [`ExecutionClient`] trait: one venue integration's account/order surface.
//!
//! Every concrete venue (`b3`, `xmlgw_adapter`) implements this against its own wire protocol;
//! callers above this module never match on which venue they're talking to.

pub mod b3;
pub mod xmlgw_adapter;

use crate::{
    balance::AssetBalance,
    compat::{AssetNameExchange, InstrumentNameExchange, QuoteAsset},
    error::{UnindexedClientError, UnindexedOrderError},
    order::{
        request::{OrderRequestCancel, OrderRequestOpen, UnindexedOrderResponseCancel},
        state::Open,
        Order,
    },
    trade::Trade,
    UnindexedAccountEvent, UnindexedAccountSnapshot,
};
use chrono::{DateTime, Utc};
use futures::Stream;
use meridian_markets::ExchangeId;

/// A venue's execution surface: account/balance/order queries, a live account event stream, and
/// order placement/cancellation.
///
/// Implementors own their own connection/session state; `new` takes whatever venue-specific
/// [`ExecutionClient::Config`] that requires.
pub trait ExecutionClient {
    /// The exchange this client talks to.
    const EXCHANGE: ExchangeId;

    /// Venue-specific connection configuration (credentials, endpoints, ...).
    type Config;

    /// Stream of [`UnindexedAccountEvent`]s produced by [`ExecutionClient::account_stream`].
    type AccountStream: Stream<Item = UnindexedAccountEvent> + Send;

    fn new(config: Self::Config) -> Self;

    async fn fetch_balances(
        &self,
    ) -> Result<Vec<AssetBalance<AssetNameExchange>>, UnindexedClientError>;

    async fn fetch_open_orders(
        &self,
    ) -> Result<Vec<Order<ExchangeId, InstrumentNameExchange, Open>>, UnindexedClientError>;

    async fn fetch_trades(
        &self,
        time_since: DateTime<Utc>,
    ) -> Result<Vec<Trade<QuoteAsset, InstrumentNameExchange>>, UnindexedClientError>;

    async fn account_snapshot(
        &self,
        assets: &[AssetNameExchange],
        instruments: &[InstrumentNameExchange],
    ) -> Result<UnindexedAccountSnapshot, UnindexedClientError>;

    async fn account_stream(
        &self,
        assets: &[AssetNameExchange],
        instruments: &[InstrumentNameExchange],
    ) -> Result<Self::AccountStream, UnindexedClientError>;

    async fn cancel_order(
        &self,
        request: OrderRequestCancel<ExchangeId, &InstrumentNameExchange>,
    ) -> Option<UnindexedOrderResponseCancel>;

    async fn open_order(
        &self,
        request: OrderRequestOpen<ExchangeId, &InstrumentNameExchange>,
    ) -> Option<Order<ExchangeId, InstrumentNameExchange, Result<Open, UnindexedOrderError>>>;
}
