
#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cognitive_complexity,
    unused_crate_dependencies,
    unused_extern_crates,
    clippy::unused_self,
    clippy::useless_let_if_seq,
    missing_debug_implementations,
    rust_2018_idioms
)]
#![allow(clippy::type_complexity, clippy::too_many_arguments, type_alias_bounds)]

//! # 🧠 Core - Position / Order-Lifecycle Engine of the Meridian Framework
//!
//! Houses the part of the trading system that models one directional exposure
//! (long or short) in one instrument at one venue: the ordered sequences of
//! open-side and close-side orders, the aggregation of fills into opened/closed
//! quantities and average prices, realized/unrealized P&L, and the small set of
//! imperative operations a strategy/controller drives a [`position::Position`]
//! through.
//!
//! ## 🛩️ Integrated Components
//!
//! - **[`position`]**: Position/order lifecycle state machine and P&L.
//! - **[`error`]**: Aggregated error type for the core crate.
//! - **[`logging`]**: `tracing` initialisers shared across the workspace.
//! - **[`shutdown`]**: Graceful-shutdown traits for long-running components.

use chrono::{DateTime, Utc};
use derive_more::Constructor;
use serde::{Deserialize, Serialize};

/// Defines all possible errors in Core.
pub mod error;

/// Provides default Core Tracing logging initialisers.
pub mod logging;

/// The position / order-lifecycle engine: [`position::Position`], [`position::DirectionData`],
/// [`position::Order`] and the update-on-venue-callback algorithm.
pub mod position;

/// Traits and types related to component shutdowns.
pub mod shutdown;

/// RiskManager interface for reviewing and optionally filtering algorithmic cancel and open
/// order requests.
pub use meridian_risk as risk;

/// Statistical algorithms for analysing datasets, financial metrics and financial summaries.
pub use meridian_analytics as analytics;

/// A timed value.
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Deserialize,
    Serialize,
    Constructor,
)]
pub struct Timed<T> {
    pub value: T,
    pub time: DateTime<Utc>,
}

/// Monotonically increasing event sequence. Used to track processing order of venue callbacks.
#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Constructor,
)]
pub struct Sequence(pub u64);

impl Sequence {
    pub fn value(&self) -> u64 {
        self.0
    }

    pub fn fetch_add(&mut self) -> Sequence {
        let sequence = *self;
        self.0 += 1;
        sequence
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    pub fn f64_is_eq(actual: f64, expected: f64, epsilon: f64) -> bool {
        if actual.is_nan() && expected.is_nan() {
            true
        } else if actual.is_infinite() && expected.is_infinite() {
            actual.is_sign_positive() == expected.is_sign_positive()
        } else if actual.is_nan()
            || expected.is_nan()
            || actual.is_infinite()
            || expected.is_infinite()
        {
            false
        } else {
            (actual - expected).abs() < epsilon
        }
    }
}
