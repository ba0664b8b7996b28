// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! Errors raised while driving a [`super::Position`] through its operations or while applying a
//! venue callback to one of its orders.

use crate::position::order::OrderStatus;
use thiserror::Error;

/// Failure surfaced by a [`super::Position`] operation or by
/// [`super::Position::update_opening`]/[`super::Position::update_closing`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("position already started")]
    AlreadyStarted,

    #[error("position not opened")]
    NotOpened,

    #[error("position already closed")]
    AlreadyClosed,

    #[error("position already marked as completed")]
    AlreadyCompleted,

    #[error("position has no active order on this side")]
    NoActiveOrder,

    #[error("unknown order id: {0}")]
    UnknownOrderId(String),

    #[error("{0:?} may only be set by Position itself, a venue callback cannot report it")]
    InternalOnlyStatus(OrderStatus),

    #[error("a Filled/FilledPartially callback without a fill carries no new information")]
    FilledWithoutFill,

    #[error("cannot restore open state while cancelling")]
    RestoreWhileCancelling,
}
