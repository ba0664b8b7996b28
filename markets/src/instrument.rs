// Mini-Disclaimer: Uso educacional/experimental; sem recomendação de investimento, afiliação ou remuneração de terceiros; veja README & DISCLAIMER.
//! Instrument (security) model: symbol identity, price-scale precision, subscription flags, and
//! the level-1/book snapshots published by the owning market-data connector.
//!
//! A single [`Instrument`] is created once per symbol per connector and mutated only by that
//! connector; every other reader sees an atomically-consistent snapshot through the
//! [`parking_lot::RwLock`]-guarded state plus an [`std::sync::atomic::AtomicU64`] revision
//! counter bumped on every publish.

use crate::exchange::ExchangeId;
use chrono::NaiveDate;
use parking_lot::RwLock;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicU64, Ordering};

/// Lightweight instrument-identity trait, distinct from [`Instrument`] (the stateful security
/// object below): implementors just need to name a symbol and a market, used by the catalog
/// types in the `data` crate.
pub trait InstrumentIdentity {
    type Symbol: Display + Clone;

    fn symbol(&self) -> &Self::Symbol;
    fn market(&self) -> &str;
}

/// Basic instrument types
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InstrumentKind {
    Spot,
    Future,
    Option,
    Perpetual,
}

impl Display for InstrumentKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            InstrumentKind::Spot => write!(f, "spot"),
            InstrumentKind::Future => write!(f, "future"),
            InstrumentKind::Option => write!(f, "option"),
            InstrumentKind::Perpetual => write!(f, "perpetual"),
        }
    }
}

/// Simple market data instrument struct: a subscription-time identity (symbol + kind), as
/// distinct from a running [`Instrument`]'s live book/level-1 state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MarketDataInstrument {
    pub symbol: String,
    pub kind: InstrumentKind,
}

impl MarketDataInstrument {
    pub fn new(symbol: String, kind: InstrumentKind) -> Self {
        Self { symbol, kind }
    }
}

impl<S> From<(S, S, InstrumentKind)> for MarketDataInstrument
where
    S: Into<String>,
{
    fn from((base, _quote, kind): (S, S, InstrumentKind)) -> Self {
        Self {
            symbol: base.into(),
            kind,
        }
    }
}

/// Security type of a [`Symbol`], as distinguished by trading calendar, settlement and
/// tick-size conventions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityType {
    Spot,
    Futures,
    Options,
    Crypto,
}

/// Immutable symbol identity: {baseSymbol, quoteSymbol, securityType, venue, optional
/// expiration}. Equality is by all components.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol {
    pub base: String,
    pub quote: String,
    pub security_type: SecurityType,
    pub venue: ExchangeId,
    pub expiration: Option<NaiveDate>,
}

impl Symbol {
    pub fn new(base: impl Into<String>, quote: impl Into<String>, security_type: SecurityType, venue: ExchangeId) -> Self {
        Self {
            base: base.into(),
            quote: quote.into(),
            security_type,
            venue,
            expiration: None,
        }
    }

    pub fn with_expiration(mut self, expiration: NaiveDate) -> Self {
        self.expiration = Some(expiration);
        self
    }
}

impl Display for Symbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}@{}", self.base, self.quote, self.venue)
    }
}

/// Market-data subscription kinds an [`Instrument`] can be subscribed to, tracked as a bitset so
/// `Subscribe` stays idempotent without an extra lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SubscriptionKinds(u8);

impl SubscriptionKinds {
    pub const NONE: Self = Self(0);
    pub const LEVEL1_TICKS: Self = Self(1 << 0);
    pub const BOOK_UPDATES: Self = Self(1 << 1);
    pub const TRADES: Self = Self(1 << 2);
    pub const BAR_UPDATES: Self = Self(1 << 3);

    pub fn contains(self, kind: Self) -> bool {
        self.0 & kind.0 == kind.0
    }

    pub fn insert(&mut self, kind: Self) {
        self.0 |= kind.0;
    }
}

impl std::ops::BitOr for SubscriptionKinds {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Read failure for a level-1 field that has never been published.
#[derive(Debug, thiserror::Error, Clone, Copy, PartialEq, Eq)]
pub enum MarketDataError {
    #[error("market data value does not exist")]
    MarketDataValueDoesNotExist,
}

/// Latest published bid/ask/last snapshot. Every field starts unset; a read of an unset field
/// fails with [`MarketDataError::MarketDataValueDoesNotExist`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Level1Snapshot {
    pub bid_price: Option<Decimal>,
    pub bid_qty: Option<Decimal>,
    pub ask_price: Option<Decimal>,
    pub ask_qty: Option<Decimal>,
    pub last_price: Option<Decimal>,
    pub traded_volume: Option<Decimal>,
}

/// Fields of a level-1 update; `None` for a field means "unchanged", not "unset" — the owning
/// connector only publishes the fields it actually received.
#[derive(Debug, Clone, Copy, Default)]
pub struct Level1Update {
    pub bid_price: Option<Decimal>,
    pub bid_qty: Option<Decimal>,
    pub ask_price: Option<Decimal>,
    pub ask_qty: Option<Decimal>,
    pub last_price: Option<Decimal>,
    pub traded_volume: Option<Decimal>,
}

/// One price level of a [`Book`] side: price>0, qty>0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BookLevel {
    pub price: Decimal,
    pub qty: Decimal,
}

/// Depth-ordered book snapshot: bids sorted strictly descending by price, asks strictly
/// ascending.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Book {
    pub bids: Vec<BookLevel>,
    pub asks: Vec<BookLevel>,
}

/// Per-security-type tick/precision table. `ScalePrice`/`DescalePrice` round-trip losslessly
/// within this precision: `descale(scale(x)) ≈ x`.
///
/// Grounded on `markets/src/b3.rs`'s per-asset tick metadata (`B3Stock` trades in centavos,
/// `B3Future` carries its own `tick_size`), generalized here into a per-[`SecurityType`] default
/// table rather than hardcoded B3 constants, since the venue-neutral representative adapter is
/// only one of potentially several.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePrecision {
    /// Number of fractional decimal digits retained by `ScalePrice`/`DescalePrice`.
    pub scale: u32,
}

impl PricePrecision {
    pub const fn new(scale: u32) -> Self {
        Self { scale }
    }

    /// Default precision for a security type absent any venue-specific override.
    pub fn default_for(security_type: SecurityType) -> Self {
        match security_type {
            SecurityType::Spot => Self::new(2),     // B3 equities quote in centavos
            SecurityType::Futures => Self::new(0),  // B3 index/FX futures quote in whole points
            SecurityType::Options => Self::new(2),
            SecurityType::Crypto => Self::new(8),
        }
    }

    /// Lossless (within `scale`) round-trip to an integer tick count.
    pub fn scale_price(&self, price: f64) -> i64 {
        (price * 10f64.powi(self.scale as i32)).round() as i64
    }

    pub fn descale_price(&self, scaled: i64) -> f64 {
        scaled as f64 / 10f64.powi(self.scale as i32)
    }
}

/// A single security: symbol identity, scale precision, subscription bitset, and the level-1/book
/// state published by its owning market-data connector.
///
/// Created once per symbol per connector; mutated only by that connector via
/// [`Instrument::publish_level1`]/[`Instrument::publish_book`]. All other readers go through the
/// `&self` getters, which take a short-lived read lock and never block a writer for long.
#[derive(Debug)]
pub struct Instrument {
    symbol: Symbol,
    precision: PricePrecision,
    subscriptions: RwLock<SubscriptionKinds>,
    snapshot: RwLock<Level1Snapshot>,
    book: RwLock<Book>,
    revision: AtomicU64,
}

impl Instrument {
    pub fn new(symbol: Symbol) -> Self {
        let precision = PricePrecision::default_for(symbol.security_type);
        Self {
            symbol,
            precision,
            subscriptions: RwLock::new(SubscriptionKinds::NONE),
            snapshot: RwLock::new(Level1Snapshot::default()),
            book: RwLock::new(Book::default()),
            revision: AtomicU64::new(0),
        }
    }

    pub fn with_precision(mut self, precision: PricePrecision) -> Self {
        self.precision = precision;
        self
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn precision(&self) -> PricePrecision {
        self.precision
    }

    /// Registers `kind` in the subscription bitset. Idempotent: subscribing twice to the same
    /// kind is a no-op.
    pub fn subscribe(&self, kind: SubscriptionKinds) {
        self.subscriptions.write().insert(kind);
    }

    pub fn is_subscribed(&self, kind: SubscriptionKinds) -> bool {
        self.subscriptions.read().contains(kind)
    }

    /// Monotonically increasing publish counter; bumped once per `publish_level1`/`publish_book`
    /// call, letting a caller cheaply detect "nothing changed since I last looked".
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::Acquire)
    }

    pub fn bid_price(&self) -> Result<Decimal, MarketDataError> {
        self.snapshot
            .read()
            .bid_price
            .ok_or(MarketDataError::MarketDataValueDoesNotExist)
    }

    pub fn ask_price(&self) -> Result<Decimal, MarketDataError> {
        self.snapshot
            .read()
            .ask_price
            .ok_or(MarketDataError::MarketDataValueDoesNotExist)
    }

    pub fn last_price(&self) -> Result<Decimal, MarketDataError> {
        self.snapshot
            .read()
            .last_price
            .ok_or(MarketDataError::MarketDataValueDoesNotExist)
    }

    pub fn bid_qty(&self) -> Result<Decimal, MarketDataError> {
        self.snapshot
            .read()
            .bid_qty
            .ok_or(MarketDataError::MarketDataValueDoesNotExist)
    }

    pub fn ask_qty(&self) -> Result<Decimal, MarketDataError> {
        self.snapshot
            .read()
            .ask_qty
            .ok_or(MarketDataError::MarketDataValueDoesNotExist)
    }

    /// Snapshot of the depth-ordered book: bids descending, asks ascending.
    pub fn book(&self) -> Book {
        self.book.read().clone()
    }

    /// Owning-connector-only write path: merges whichever fields `update` carries into the
    /// published snapshot and bumps [`Instrument::revision`]. Never fails; a connector always
    /// succeeds in publishing what it received.
    pub fn publish_level1(&self, update: Level1Update) {
        {
            let mut snapshot = self.snapshot.write();
            if let Some(price) = update.bid_price {
                snapshot.bid_price = Some(price);
            }
            if let Some(qty) = update.bid_qty {
                snapshot.bid_qty = Some(qty);
            }
            if let Some(price) = update.ask_price {
                snapshot.ask_price = Some(price);
            }
            if let Some(qty) = update.ask_qty {
                snapshot.ask_qty = Some(qty);
            }
            if let Some(price) = update.last_price {
                snapshot.last_price = Some(price);
            }
            if let Some(volume) = update.traded_volume {
                snapshot.traded_volume = Some(volume);
            }
        }
        self.revision.fetch_add(1, Ordering::Release);
    }

    /// Owning-connector-only write path: replaces the book with `bids`/`asks`, sorting into the
    /// required depth order (bids descending, asks ascending) before publishing.
    pub fn publish_book(&self, mut bids: Vec<BookLevel>, mut asks: Vec<BookLevel>) {
        bids.sort_by(|a, b| b.price.cmp(&a.price));
        asks.sort_by(|a, b| a.price.cmp(&b.price));
        *self.book.write() = Book { bids, asks };
        self.revision.fetch_add(1, Ordering::Release);
    }

    pub fn scale_price(&self, price: f64) -> i64 {
        self.precision.scale_price(price)
    }

    pub fn descale_price(&self, scaled: i64) -> f64 {
        self.precision.descale_price(scaled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_instrument() -> Instrument {
        Instrument::new(Symbol::new("PETR4", "BRL", SecurityType::Spot, ExchangeId::B3))
    }

    #[test]
    fn unset_level1_fields_fail_with_market_data_value_does_not_exist() {
        let instrument = new_instrument();
        assert_eq!(instrument.bid_price(), Err(MarketDataError::MarketDataValueDoesNotExist));
        assert_eq!(instrument.last_price(), Err(MarketDataError::MarketDataValueDoesNotExist));
    }

    #[test]
    fn publish_level1_only_touches_the_fields_it_carries() {
        let instrument = new_instrument();
        instrument.publish_level1(Level1Update {
            bid_price: Some(Decimal::from(10)),
            ask_price: Some(Decimal::from(11)),
            ..Default::default()
        });
        assert_eq!(instrument.bid_price(), Ok(Decimal::from(10)));
        assert_eq!(instrument.ask_price(), Ok(Decimal::from(11)));
        assert_eq!(instrument.bid_qty(), Err(MarketDataError::MarketDataValueDoesNotExist));

        instrument.publish_level1(Level1Update {
            bid_price: Some(Decimal::from(12)),
            ..Default::default()
        });
        assert_eq!(instrument.bid_price(), Ok(Decimal::from(12)));
        // Ask price survives the second, narrower publish.
        assert_eq!(instrument.ask_price(), Ok(Decimal::from(11)));
    }

    #[test]
    fn book_publishes_in_depth_order() {
        let instrument = new_instrument();
        instrument.publish_book(
            vec![
                BookLevel { price: Decimal::from(9), qty: Decimal::from(100) },
                BookLevel { price: Decimal::from(10), qty: Decimal::from(50) },
            ],
            vec![
                BookLevel { price: Decimal::from(12), qty: Decimal::from(40) },
                BookLevel { price: Decimal::from(11), qty: Decimal::from(60) },
            ],
        );
        let book = instrument.book();
        assert_eq!(book.bids[0].price, Decimal::from(10));
        assert_eq!(book.bids[1].price, Decimal::from(9));
        assert_eq!(book.asks[0].price, Decimal::from(11));
        assert_eq!(book.asks[1].price, Decimal::from(12));
    }

    #[test]
    fn revision_bumps_once_per_publish() {
        let instrument = new_instrument();
        assert_eq!(instrument.revision(), 0);
        instrument.publish_level1(Level1Update::default());
        assert_eq!(instrument.revision(), 1);
        instrument.publish_book(Vec::new(), Vec::new());
        assert_eq!(instrument.revision(), 2);
    }

    #[test]
    fn subscribe_is_idempotent() {
        let instrument = new_instrument();
        instrument.subscribe(SubscriptionKinds::LEVEL1_TICKS);
        instrument.subscribe(SubscriptionKinds::LEVEL1_TICKS);
        assert!(instrument.is_subscribed(SubscriptionKinds::LEVEL1_TICKS));
        assert!(!instrument.is_subscribed(SubscriptionKinds::BOOK_UPDATES));

        instrument.subscribe(SubscriptionKinds::BOOK_UPDATES | SubscriptionKinds::TRADES);
        assert!(instrument.is_subscribed(SubscriptionKinds::BOOK_UPDATES));
        assert!(instrument.is_subscribed(SubscriptionKinds::TRADES));
    }

    #[test]
    fn scale_descale_round_trips_within_precision() {
        let instrument = new_instrument(); // Spot -> 2 decimal digits
        let scaled = instrument.scale_price(10.37);
        assert_eq!(scaled, 1037);
        let descaled = instrument.descale_price(scaled);
        assert!((descaled - 10.37).abs() < 1e-9);
    }
}
