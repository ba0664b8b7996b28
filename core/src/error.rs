
//! # Core Error Types
//!
//! This module defines the main error types used in the core module of the Meridian framework.
//! It provides a centralized error handling system aggregating errors from various subsystems:
//! execution, market data, and indexing.
//!
//! ## Error Hierarchy
//!
//! The main type `MeridianError` includes:
//! - **IndexError**: Indexing errors for asset / instrument / exchange
//! - **ExecutionBuilder**: Errors during initialization of the execution subsystem
//! - **ExecutionRxDropped**: Communication channel whose receiver was dropped
//! - **MarketData**: Errors from the data module (streaming, parsing, subscription)
//! - **Execution**: Execution errors (orders, balances, liquidations)
//! - **JoinError**: Failures when awaiting async tasks (join)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use meridian_core::error::MeridianError;
//!
//! fn handle_trading_error(error: MeridianError) {
//!     match error {
//!         MeridianError::MarketData(data_err) => {
//!             eprintln!("Market data problem: {}", data_err);
//!         }
//!         MeridianError::Execution(exec_err) => {
//!             eprintln!("Execution problem: {}", exec_err);
//!         }
//!         _ => eprintln!("Other error: {}", error),
//!     }
//! }
//! ```

use meridian_data::error::DataError;
use meridian_execution::{error::ExecutionError, IndexError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Central error type for the core module of the Meridian framework.
///
/// Enum that aggregates all possible errors of the core trading system,
/// providing a unified handling interface between subsystems.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Error)]
pub enum MeridianError {
    /// Indexing errors for asset, instrument, or exchange.
    #[error("IndexError: {0}")]
    IndexError(#[from] IndexError),

    /// Configuration errors (builder) of the execution system.
    #[error("ExecutionBuilder: {0}")]
    ExecutionBuilder(String),

    /// The receiver side of a communication channel between core components was dropped.
    #[error("ExecutionRxDropped: {0}")]
    ExecutionRxDropped(#[from] RxDropped),

    /// Errors surfaced by the market-data subsystem (streaming, parsing, subscription).
    #[error("MarketData: {0}")]
    MarketData(#[from] DataError),

    /// Errors surfaced by the execution subsystem (orders, balances, cancels).
    #[error("Execution: {0}")]
    Execution(#[from] ExecutionError),

    /// Failure while awaiting a spawned async task.
    #[error("JoinError: {0}")]
    JoinError(String),
}

/// Indicates that the receiver side of a communication channel was dropped.
///
/// Typical scenarios:
/// - `ExecutionRequest` receiver from a connector task dropped
/// - Channels between controller components were closed
/// - Asynchronous tasks ended unexpectedly, dropping receivers
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Error)]
#[error("RxDropped")]
pub struct RxDropped;

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for RxDropped {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        Self
    }
}

impl<T> From<tokio::sync::mpsc::error::SendError<T>> for MeridianError {
    fn from(_: tokio::sync::mpsc::error::SendError<T>) -> Self {
        Self::ExecutionRxDropped(RxDropped)
    }
}

impl From<tokio::task::JoinError> for MeridianError {
    fn from(value: tokio::task::JoinError) -> Self {
        Self::JoinError(format!("{value:?}"))
    }
}
