// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! Error taxonomy for the execution crate.
//!
//! Mirrors the Protocol / Communication / Business split used across the Meridian framework:
//! [`ConnectivityError`] covers transport-level failures (socket drops, timeouts, venue
//! outages), [`ApiError`] covers business-rule rejections the venue itself reports (invalid
//! asset, insufficient balance, order already cancelled), and [`ClientError`] /
//! [`ExecutionError`] aggregate both for callers that don't need to distinguish them.

use crate::compat::{AssetIndex, AssetNameExchange, InstrumentIndex, InstrumentNameExchange};
use meridian_markets::ExchangeId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// [`ClientError`] keyed by the internal (indexed) asset/instrument representation.
pub type IndexedClientError = ClientError<AssetIndex, InstrumentIndex>;

/// [`ClientError`] keyed by the raw venue-native asset/instrument names.
pub type UnindexedClientError = ClientError<AssetNameExchange, InstrumentNameExchange>;

/// [`ApiError`] keyed by the internal (indexed) asset/instrument representation.
pub type IndexedApiError = ApiError<AssetIndex, InstrumentIndex>;

/// [`ApiError`] keyed by the raw venue-native asset/instrument names.
pub type UnindexedApiError = ApiError<AssetNameExchange, InstrumentNameExchange>;

/// [`OrderError`] keyed by the internal (indexed) asset/instrument representation.
pub type IndexedOrderError = OrderError<AssetIndex, InstrumentIndex>;

/// [`OrderError`] keyed by the raw venue-native asset/instrument names.
pub type UnindexedOrderError = OrderError<AssetNameExchange, InstrumentNameExchange>;

/// Aggregate execution error surfaced to [`meridian_core::error::MeridianError`].
pub type ExecutionError = IndexedClientError;

/// Errors a [`client::ExecutionClient`](crate::client::ExecutionClient) implementation can
/// return for any of its operations.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Error)]
pub enum ClientError<AssetKey, InstrumentKey> {
    #[error("Connectivity: {0}")]
    Connectivity(#[from] ConnectivityError),

    #[error("API: {0}")]
    Api(#[from] ApiError<AssetKey, InstrumentKey>),

    #[error("failed to fetch AccountSnapshot: {0}")]
    AccountSnapshot(String),

    #[error("failed to init AccountStream: {0}")]
    AccountStream(String),
}

/// Transport-level failure: the venue connection dropped, timed out, or never opened.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Error)]
pub enum ConnectivityError {
    #[error("exchange offline: {0}")]
    ExchangeOffline(ExchangeId),

    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Socket(String),
}

/// Business-rule rejection reported by the venue itself (as opposed to a transport failure).
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Error)]
pub enum ApiError<AssetKey, InstrumentKey> {
    #[error("rate limit exceeded")]
    RateLimit,
    #[error("asset {0} invalid: {1}")]
    AssetInvalid(AssetKey, String),
    #[error("instrument {0} invalid: {1}")]
    InstrumentInvalid(InstrumentKey, String),
    #[error("asset {0} balance insufficient: {1}")]
    BalanceInsufficient(AssetKey, String),
    #[error("order rejected: {0}")]
    OrderRejected(String),
    #[error("order already cancelled")]
    OrderAlreadyCancelled,
    #[error("order already fully filled")]
    OrderAlreadyFullyFilled,
    #[error("{0}")]
    Other(String),
}

impl<AssetKey, InstrumentKey> ApiError<AssetKey, InstrumentKey> {
    /// Construct an [`ApiError::Other`] from a free-form message, for venue adapters that
    /// cannot yet classify a rejection into one of the structured variants.
    pub fn new(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

/// Outcome of a single order-open or order-cancel request that was rejected by the venue or
/// never reached it.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Error)]
pub enum OrderError<AssetKey, InstrumentKey> {
    #[error("Connectivity: {0}")]
    Connectivity(#[from] ConnectivityError),
    #[error("API: {0}")]
    Api(#[from] ApiError<AssetKey, InstrumentKey>),
}

/// Failure to resolve an [`ExchangeId`], asset, or instrument key during indexing.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Error)]
pub enum KeyError {
    #[error("ExchangeId: {0}")]
    ExchangeId(String),

    #[error("AssetKey: {0}")]
    AssetKey(String),

    #[error("InstrumentKey: {0}")]
    InstrumentKey(String),
}
