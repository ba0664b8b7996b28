// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
use crate::subscription::SubKind;
use meridian_integration::{error::SocketError, subscription::SubscriptionId};
use meridian_markets::ExchangeId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All errors generated in Data.
#[derive(Debug, Clone, Deserialize, Serialize, Error)]
pub enum DataError {
    #[error("failed to initialise reconnecting MarketStream due to empty subscriptions")]
    SubscriptionsEmpty,

    #[error("unsupported DynamicStreams Subscription SubKind: {0}")]
    UnsupportedSubKind(SubKind),

    #[error("initial snapshot missing for: {0}")]
    InitialSnapshotMissing(SubscriptionId),

    #[error("initial snapshot invalid: {0}")]
    InitialSnapshotInvalid(String),

    #[error("SocketError: {0}")]
    Socket(String),

    #[error("unsupported dynamic Subscription for exchange: {exchange}, kind: {sub_kind}")]
    Unsupported {
        exchange: ExchangeId,
        sub_kind: SubKind,
    },

    #[error(
        "InvalidSequence: first_update_id {first_update_id} does not follow on from the \
         prev_last_update_id {prev_last_update_id}"
    )]
    InvalidSequence {
        prev_last_update_id: u64,
        first_update_id: u64,
    },
}

impl DataError {
    /// Determine if an error requires a `MarketStream` to re-initialise.
    #[allow(clippy::match_like_matches_macro)]
    pub fn is_terminal(&self) -> bool {
        match self {
            DataError::InvalidSequence { .. } => true,
            _ => false,
        }
    }
}

impl From<SocketError> for DataError {
    fn from(value: SocketError) -> Self {
        Self::Socket(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_sequence_is_terminal() {
        let error = DataError::InvalidSequence {
            prev_last_update_id: 0,
            first_update_id: 0,
        };
        assert!(error.is_terminal());
    }

    #[test]
    fn socket_error_is_not_terminal() {
        let error = DataError::from(SocketError::Sink);
        assert!(!error.is_terminal());
    }
}
