// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! `WebSocket` connection utilities built on [`tokio_tungstenite`], plus a [`StreamParser`]
//! implementation that decodes text/binary frames as JSON and filters out protocol-level
//! Ping/Pong/Close frames.

use crate::{error::SocketError, protocol::StreamParser};
use futures::{stream::SplitStream, SinkExt, StreamExt};
use serde::Deserialize;
use std::marker::PhantomData;
use tokio::net::TcpStream;
use tokio_tungstenite::{
    tungstenite::{self, handshake::client::Response},
    MaybeTlsStream, WebSocketStream,
};
use tracing::debug;

/// Convenient type alias for a tungstenite `WebSocket` connection over TCP with TLS support.
pub type WebSocket = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Convenient type alias for the write half of a [`WebSocket`].
pub type WsSink = futures::stream::SplitSink<WebSocket, WsMessage>;

/// Convenient type alias for the read half of a [`WebSocket`].
pub type WsStream = SplitStream<WebSocket>;

/// Communicative type alias for the [`tungstenite`] `Message` sent and received over a
/// [`WebSocket`].
pub type WsMessage = tungstenite::Message;

/// Communicative type alias for a [`tungstenite`] `Error` produced when operating on a
/// [`WebSocket`].
pub type WsError = tungstenite::Error;

/// Establish a [`WebSocket`] connection to a server, returning the connection and the HTTP
/// upgrade [`Response`].
pub async fn connect<R>(request: R) -> Result<(WebSocket, Response), SocketError>
where
    R: tokio_tungstenite::tungstenite::client::IntoClientRequest + Unpin,
{
    tokio_tungstenite::connect_async(request)
        .await
        .map_err(|error| SocketError::WebSocket(std::sync::Arc::new(error)))
}

/// Determine if a [`WsError`] indicates the [`WebSocket`] connection has terminated.
pub fn is_websocket_disconnected(error: &WsError) -> bool {
    matches!(
        error,
        WsError::ConnectionClosed
            | WsError::AlreadyClosed
            | WsError::Io(_)
            | WsError::Protocol(_)
    )
}

/// [`StreamParser`] implementation for a generic text/binary JSON payload sent over a
/// [`WebSocket`] `Stream`.
#[derive(Debug)]
pub struct WebSocketParser<Output = serde_json::Value> {
    phantom: PhantomData<Output>,
}

impl<Output> StreamParser<Output> for WebSocketParser<Output>
where
    Output: for<'de> Deserialize<'de>,
{
    type Stream = WsStream;
    type Message = WsMessage;
    type Error = WsError;

    fn parse(input: Result<Self::Message, Self::Error>) -> Option<Result<Output, SocketError>> {
        match input {
            Ok(ws_message) => match ws_message {
                WsMessage::Text(text) => process_text(text),
                WsMessage::Binary(binary) => process_binary(binary),
                WsMessage::Ping(ping) => process_ping(ping),
                WsMessage::Pong(pong) => process_pong(pong),
                WsMessage::Close(close_frame) => process_close_frame(close_frame),
                WsMessage::Frame(frame) => process_frame(frame),
            },
            Err(ws_err) => Some(Err(SocketError::WebSocket(std::sync::Arc::new(ws_err)))),
        }
    }
}

/// Deserialise a [`WsMessage::Text`] payload as JSON.
pub fn process_text<ExchangeMessage>(
    payload: impl AsRef<str>,
) -> Option<Result<ExchangeMessage, SocketError>>
where
    ExchangeMessage: for<'de> Deserialize<'de>,
{
    Some(
        serde_json::from_str::<ExchangeMessage>(payload.as_ref()).map_err(|error| {
            SocketError::Deserialise {
                error: std::sync::Arc::new(error),
                payload: payload.as_ref().to_owned(),
            }
        }),
    )
}

/// Deserialise a [`WsMessage::Binary`] payload as JSON.
pub fn process_binary<ExchangeMessage>(
    payload: impl AsRef<[u8]>,
) -> Option<Result<ExchangeMessage, SocketError>>
where
    ExchangeMessage: for<'de> Deserialize<'de>,
{
    Some(
        serde_json::from_slice::<ExchangeMessage>(payload.as_ref()).map_err(|error| {
            SocketError::Deserialise {
                error: std::sync::Arc::new(error),
                payload: String::from_utf8_lossy(payload.as_ref()).into_owned(),
            }
        }),
    )
}

/// Filter out [`WsMessage::Ping`] frames - handled transparently by the underlying connection.
pub fn process_ping<ExchangeMessage>(
    ping: impl AsRef<[u8]>,
) -> Option<Result<ExchangeMessage, SocketError>> {
    debug!(payload = ?ping.as_ref(), "received Ping WebSocket message");
    None
}

/// Filter out [`WsMessage::Pong`] frames.
pub fn process_pong<ExchangeMessage>(
    pong: impl AsRef<[u8]>,
) -> Option<Result<ExchangeMessage, SocketError>> {
    debug!(payload = ?pong.as_ref(), "received Pong WebSocket message");
    None
}

/// Translate a [`WsMessage::Close`] frame into a terminal [`SocketError`].
pub fn process_close_frame<ExchangeMessage>(
    close_frame: Option<tungstenite::protocol::CloseFrame>,
) -> Option<Result<ExchangeMessage, SocketError>> {
    let close_frame = format!("{close_frame:?}");
    Some(Err(SocketError::Terminated(close_frame)))
}

/// Filter out raw [`WsMessage::Frame`] messages - never surfaced by a standard client.
pub fn process_frame<ExchangeMessage>(
    frame: tungstenite::protocol::frame::Frame,
) -> Option<Result<ExchangeMessage, SocketError>> {
    debug!(?frame, "received raw Frame WebSocket message");
    None
}

/// Split a [`WebSocket`] connection into its write ([`WsSink`]) and read ([`WsStream`]) halves.
pub fn split(socket: WebSocket) -> (WsSink, WsStream) {
    socket.split()
}

/// Send a single [`WsMessage`] over a `Sink` of [`WsMessage`]s (eg/ a [`WsSink`]).
pub async fn send<S>(sink: &mut S, message: WsMessage) -> Result<(), SocketError>
where
    S: futures::Sink<WsMessage, Error = WsError> + Unpin,
{
    sink.send(message)
        .await
        .map_err(|error| SocketError::WebSocket(std::sync::Arc::new(error)))
}
