// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! Market-data connector contract: `CreateNewSecurityObject`/`SubscribeToSecurities`, and the
//! `OnNewTick`/`OnLevel1Update`/`OnBookUpdate` callbacks a concrete connector dispatches into as
//! ticks, level-1 updates and book snapshots arrive from the venue.

use crate::error::DataError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use meridian_markets::{Book, BookLevel, Instrument, Level1Update, Symbol};
use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

/// Lightweight latency instrumentation carried alongside a market-data callback, recording when
/// the local connector first observed the event. A concrete connector may extend this with
/// further named instants (wire receive, parse complete, dispatch complete) without changing the
/// callback signatures below.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingMilestones {
    pub received_at: DateTime<Utc>,
}

impl TimingMilestones {
    pub fn now(received_at: DateTime<Utc>) -> Self {
        Self { received_at }
    }

    pub fn latency_since(&self, reference: DateTime<Utc>) -> chrono::Duration {
        self.received_at - reference
    }
}

/// Registry of [`Instrument`]s a connector has created, keyed by [`Symbol`].
///
/// `CreateNewSecurityObject` is idempotent: requesting the same symbol twice returns the same
/// shared instrument rather than creating a second, disconnected one.
#[derive(Debug, Default)]
pub struct SecurityRegistry {
    instruments: RwLock<HashMap<Symbol, Arc<Instrument>>>,
}

impl SecurityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing instrument for `symbol`, creating and registering one if none
    /// exists yet.
    pub fn create_new_security_object(&self, symbol: Symbol) -> Arc<Instrument> {
        if let Some(existing) = self.instruments.read().get(&symbol) {
            return Arc::clone(existing);
        }
        let mut instruments = self.instruments.write();
        instruments
            .entry(symbol.clone())
            .or_insert_with(|| Arc::new(Instrument::new(symbol)))
            .clone()
    }

    pub fn get(&self, symbol: &Symbol) -> Option<Arc<Instrument>> {
        self.instruments.read().get(symbol).cloned()
    }

    pub fn securities(&self) -> Vec<Arc<Instrument>> {
        self.instruments.read().values().cloned().collect()
    }
}

/// Connection parameters handed to [`MarketDataConnector::connect`]. Deliberately minimal: a
/// concrete connector extends this with whatever venue-specific fields it needs (host, port,
/// credentials), matching the INI-section style configuration the rest of the workspace uses for
/// connector setup.
#[derive(Debug, Clone, Default)]
pub struct MarketDataConnectorConfig {
    pub endpoint: String,
}

/// The venue-facing half of the market-data connector contract: connect, register the symbols
/// this process cares about, and subscribe to them in one batched request.
#[async_trait]
pub trait MarketDataConnector: Send + Sync {
    /// Establishes the venue connection. Implementations should be idempotent: calling
    /// `connect` while already connected is a no-op rather than an error.
    async fn connect(&self, config: MarketDataConnectorConfig) -> Result<(), DataError>;

    /// Registers `symbol` for market data, returning the shared [`Instrument`] object that will
    /// receive published ticks/level-1/book updates. Safe to call before `subscribe_to_securities`
    /// — the registration itself does not open a subscription.
    fn create_new_security_object(&self, symbol: Symbol) -> Arc<Instrument>;

    /// Subscribes to every symbol registered so far via `create_new_security_object`, in one
    /// batched request to the venue.
    async fn subscribe_to_securities(&self) -> Result<(), DataError>;
}

/// Callbacks a concrete [`MarketDataConnector`] dispatches into as data arrives. Kept separate
/// from the connector trait itself so a strategy/service can implement just the callbacks it
/// cares about without also owning the connection lifecycle.
pub trait MarketDataCallbacks: Send + Sync {
    /// A single trade print.
    fn on_new_tick(
        &self,
        time: DateTime<Utc>,
        board: &str,
        symbol: &str,
        price: Decimal,
        qty: Decimal,
        milestones: TimingMilestones,
    );

    /// A level-1 (best bid/ask) update. Any field may be `None`, meaning that side didn't change.
    #[allow(clippy::too_many_arguments)]
    fn on_level1_update(
        &self,
        board: &str,
        symbol: &str,
        bid_price: Option<Decimal>,
        bid_qty: Option<Decimal>,
        ask_price: Option<Decimal>,
        ask_qty: Option<Decimal>,
        milestones: TimingMilestones,
    );

    /// A full depth-of-book snapshot for `security`.
    fn on_book_update(&self, security: &Instrument, book: Book, milestones: TimingMilestones);
}

/// Default [`MarketDataCallbacks`] implementation: publishes straight into the
/// [`Instrument`]'s own level-1/book state rather than forwarding to a strategy, which is the
/// behaviour every concrete connector needs before any strategy-specific dispatch happens on
/// top of it.
pub struct PublishingCallbacks {
    registry: Arc<SecurityRegistry>,
}

impl PublishingCallbacks {
    pub fn new(registry: Arc<SecurityRegistry>) -> Self {
        Self { registry }
    }

    fn instrument_for(&self, board: &str, symbol: &str) -> Option<Arc<Instrument>> {
        self.registry
            .securities()
            .into_iter()
            .find(|instrument| {
                instrument.symbol().base == symbol && instrument.symbol().venue.as_str() == board
            })
    }
}

impl MarketDataCallbacks for PublishingCallbacks {
    fn on_new_tick(
        &self,
        _time: DateTime<Utc>,
        board: &str,
        symbol: &str,
        price: Decimal,
        qty: Decimal,
        _milestones: TimingMilestones,
    ) {
        let Some(instrument) = self.instrument_for(board, symbol) else {
            tracing::warn!(board, symbol, "tick for unregistered security, dropping");
            return;
        };
        instrument.publish_level1(Level1Update {
            last_price: Some(price),
            traded_volume: Some(qty),
            ..Default::default()
        });
    }

    fn on_level1_update(
        &self,
        board: &str,
        symbol: &str,
        bid_price: Option<Decimal>,
        bid_qty: Option<Decimal>,
        ask_price: Option<Decimal>,
        ask_qty: Option<Decimal>,
        _milestones: TimingMilestones,
    ) {
        let Some(instrument) = self.instrument_for(board, symbol) else {
            tracing::warn!(board, symbol, "level1 update for unregistered security, dropping");
            return;
        };
        instrument.publish_level1(Level1Update {
            bid_price,
            bid_qty,
            ask_price,
            ask_qty,
            ..Default::default()
        });
    }

    fn on_book_update(&self, security: &Instrument, book: Book, _milestones: TimingMilestones) {
        let bids: Vec<BookLevel> = book.bids;
        let asks: Vec<BookLevel> = book.asks;
        security.publish_book(bids, asks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_markets::{ExchangeId, SecurityType};

    fn petr4() -> Symbol {
        Symbol::new("PETR4", "BRL", SecurityType::Spot, ExchangeId::B3)
    }

    #[test]
    fn create_new_security_object_is_idempotent() {
        let registry = SecurityRegistry::new();
        let first = registry.create_new_security_object(petr4());
        let second = registry.create_new_security_object(petr4());
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(registry.securities().len(), 1);
    }

    #[test]
    fn on_new_tick_publishes_last_price_on_the_matching_instrument() {
        let registry = Arc::new(SecurityRegistry::new());
        registry.create_new_security_object(petr4());
        let callbacks = PublishingCallbacks::new(registry.clone());

        callbacks.on_new_tick(
            Utc::now(),
            "B3",
            "PETR4",
            Decimal::new(1037, 2),
            Decimal::from(100),
            TimingMilestones::now(Utc::now()),
        );

        let instrument = registry.get(&petr4()).unwrap();
        assert_eq!(instrument.last_price(), Ok(Decimal::new(1037, 2)));
    }

    #[test]
    fn on_level1_update_only_touches_provided_fields() {
        let registry = Arc::new(SecurityRegistry::new());
        registry.create_new_security_object(petr4());
        let callbacks = PublishingCallbacks::new(registry.clone());

        callbacks.on_level1_update(
            "B3",
            "PETR4",
            Some(Decimal::from(10)),
            Some(Decimal::from(200)),
            None,
            None,
            TimingMilestones::now(Utc::now()),
        );

        let instrument = registry.get(&petr4()).unwrap();
        assert_eq!(instrument.bid_price(), Ok(Decimal::from(10)));
        assert!(instrument.ask_price().is_err());
    }

    #[test]
    fn on_book_update_publishes_into_the_given_instrument() {
        let instrument = Instrument::new(petr4());
        let registry = Arc::new(SecurityRegistry::new());
        let callbacks = PublishingCallbacks::new(registry);

        callbacks.on_book_update(
            &instrument,
            Book {
                bids: vec![BookLevel { price: Decimal::from(10), qty: Decimal::from(5) }],
                asks: vec![BookLevel { price: Decimal::from(11), qty: Decimal::from(5) }],
            },
            TimingMilestones::now(Utc::now()),
        );

        let book = instrument.book();
        assert_eq!(book.bids[0].price, Decimal::from(10));
    }
}
