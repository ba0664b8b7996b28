
//! "meridian" facade crate
//!
//! Provides a single entry point that re-exports the main modules
//! of the Meridian ecosystem. Useful for users who prefer to depend on
//! just one crate.
//!
//! # Example
//! ```rust
//! use meridian::core; // access modules via re-export
//! use meridian::markets::ExchangeId; // market enum
//! let _exchange: ExchangeId = ExchangeId::B3;
//! // Position accounting lives at meridian::core::position.
//! ```

// Re-export of internal crates with organized namespaces
pub use meridian_analytics as analytics;
pub use meridian_core as core;
pub use meridian_data as data;
pub use meridian_execution as execution;
pub use meridian_markets as markets;
pub use meridian_integration as integration;
pub use meridian_risk as risk;
pub use meridian_strategies as strategies;
pub use meridian_trader as trader;

// Flat (shallow) re-export of very frequently used symbols
pub use meridian_core::Sequence;
pub use meridian_markets::{ExchangeId, Side};

// Optional prelude for single import
pub mod prelude {
    pub use crate::core::{position::Position, Sequence};
    pub use crate::execution::{order, trade};
    pub use crate::markets::{ExchangeId, Side};
    pub use crate::trader::{algo::AlgoStrategy, on_trading_disabled::OnTradingDisabled};
}
