// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! Channel abstractions used to decouple protocol adapters from the consumer of their output.

use futures::Sink;
use std::{
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::mpsc;

/// Abstraction over different channel sender kinds (eg/ `tokio::mpsc::UnboundedSender`).
pub trait Tx<T> {
    type Error;
    fn send(&self, item: T) -> Result<(), Self::Error>;
}

/// Unbounded channel sender that's also a `Sink`, for use in `Stream` combinators that expect one.
#[derive(Debug, Clone)]
pub struct UnboundedTx<T, Error> {
    pub tx: mpsc::UnboundedSender<T>,
    pub phantom: std::marker::PhantomData<Error>,
}

impl<T, Error> Tx<T> for UnboundedTx<T, Error>
where
    Error: From<mpsc::error::SendError<T>>,
{
    type Error = Error;

    fn send(&self, item: T) -> Result<(), Self::Error> {
        self.tx.send(item).map_err(Error::from)
    }
}

impl<T, Error> Sink<T> for UnboundedTx<T, Error>
where
    Error: From<mpsc::error::SendError<T>> + Unpin,
    T: Unpin,
{
    type Error = Error;

    fn poll_ready(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn start_send(self: Pin<&mut Self>, item: T) -> Result<(), Self::Error> {
        Tx::send(&*self, item)
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn poll_close(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }
}

/// Unbounded channel receiver, convertible to an `Iterator` or a `Stream`.
#[derive(Debug)]
pub struct UnboundedRx<T> {
    pub rx: mpsc::UnboundedReceiver<T>,
}

impl<T> UnboundedRx<T> {
    pub fn new(rx: mpsc::UnboundedReceiver<T>) -> Self {
        Self { rx }
    }

    pub fn into_stream(self) -> tokio_stream::wrappers::UnboundedReceiverStream<T> {
        tokio_stream::wrappers::UnboundedReceiverStream::new(self.rx)
    }
}

impl<T> Iterator for UnboundedRx<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.rx.try_recv().ok()
    }
}

/// Convenience constructor for an unbounded mpsc channel paired as `(UnboundedTx, UnboundedRx)`.
pub fn mpsc_unbounded<T, Error>() -> (UnboundedTx<T, Error>, UnboundedRx<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (
        UnboundedTx {
            tx,
            phantom: std::marker::PhantomData,
        },
        UnboundedRx::new(rx),
    )
}

/// Unbounded (sender, receiver) pair for a single exchange/output combination. Kept in a
/// `HashMap` keyed by exchange so each exchange gets its own channel, and new entries can be
/// created lazily via `Entry::or_default`.
#[derive(Debug)]
pub struct Channel<T> {
    pub tx: mpsc::UnboundedSender<T>,
    pub rx: UnboundedRx<T>,
}

impl<T> Default for Channel<T> {
    fn default() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: UnboundedRx::new(rx),
        }
    }
}

/// Wraps a channel `Tx` so it can be disabled at runtime (eg/ after a fatal error), turning
/// further sends into cheap no-ops instead of panicking or propagating send errors upstream.
#[derive(Debug, Clone)]
pub struct ChannelTxDroppable<ChannelTx> {
    pub state: ChannelState<ChannelTx>,
}

impl<ChannelTx> ChannelTxDroppable<ChannelTx> {
    pub fn new(tx: ChannelTx) -> Self {
        Self {
            state: ChannelState::Active(tx),
        }
    }
}

impl<T, ChannelTx> Tx<T> for ChannelTxDroppable<ChannelTx>
where
    ChannelTx: Tx<T>,
{
    type Error = ChannelTx::Error;

    fn send(&self, item: T) -> Result<(), Self::Error> {
        match &self.state {
            ChannelState::Active(tx) => tx.send(item),
            ChannelState::Disabled => Ok(()),
        }
    }
}

#[derive(Debug, Clone)]
pub enum ChannelState<Tx> {
    Active(Tx),
    Disabled,
}
