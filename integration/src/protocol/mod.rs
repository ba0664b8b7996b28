// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! Protocol specific logic for transforming raw communication protocol messages into a
//! normalised `Output` data structure.

use crate::error::SocketError;
use futures::Stream;

/// Protocol specific WebSocket logic.
pub mod websocket;

/// Determines how to parse a raw `Self::Message` from a `Self::Stream` into an `Option<Result<Output, SocketError>>`.
///
/// None represents a message that is not relevant and can be filtered out (eg/ a WebSocket
/// ping/pong heartbeat).
pub trait StreamParser<Output = serde_json::Value> {
    type Stream: Stream;
    type Message;
    type Error;

    fn parse(input: Result<Self::Message, Self::Error>) -> Option<Result<Output, SocketError>>
    where
        Output: for<'de> serde::Deserialize<'de>;
}
