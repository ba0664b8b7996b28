// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! Socket-level error taxonomy shared by every protocol adapter (WebSocket, REST) in the
//! Meridian ecosystem.

use crate::subscription::SubscriptionId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// All socket IO related errors generated while running a protocol adapter.
#[derive(Debug, Clone, Error)]
pub enum SocketError {
    #[error("Sink error")]
    Sink,

    #[error("Deserialising JSON error: {error} for payload: {payload}")]
    Deserialise {
        error: std::sync::Arc<serde_json::Error>,
        payload: String,
    },

    #[error("Serialising JSON error: {0}")]
    Serialise(std::sync::Arc<serde_json::Error>),

    #[error("SerDe Query String serialisation error: {0}")]
    QueryParams(#[from] serde_qs::Error),

    #[error("SerDe url encoding serialisation error: {0}")]
    UrlEncoded(#[from] serde_urlencoded::ser::Error),

    #[error("error parsing Url: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("error subscribing to resources over the socket: {0}")]
    Subscribe(String),

    #[error("ExchangeStream terminated with closing frame: {0}")]
    Terminated(String),

    #[error("{entity} does not support: {item}")]
    Unsupported { entity: &'static str, item: String },

    #[error("WebSocket error: {0}")]
    WebSocket(std::sync::Arc<tokio_tungstenite::tungstenite::Error>),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("HTTP request timed out")]
    HttpTimeout,

    #[error("HTTP response (status={0}) error: {1}")]
    HttpResponse(u16, String),

    #[error("consumed unidentifiable message: {0}")]
    Unidentifiable(SubscriptionId),

    #[error("consumed error message from exchange: {0}")]
    Exchange(String),
}

impl From<serde_json::Error> for SocketError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialise(std::sync::Arc::new(error))
    }
}

impl From<reqwest::Error> for SocketError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::HttpTimeout
        } else {
            Self::Http(error.to_string())
        }
    }
}
