// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! States an [`Order`](super::Order) can occupy between submission and its terminal outcome.

use crate::{error::ConnectivityError, order::id::OrderId};
use chrono::{DateTime, Utc};
use derive_more::{Constructor, From};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Current state of an [`Order`](super::Order): either still [`ActiveOrderState`] (able to
/// receive fills or be cancelled) or [`InactiveOrderState`] (terminal).
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, From)]
pub enum OrderState {
    Active(ActiveOrderState),
    Inactive(InactiveOrderState),
}

impl OrderState {
    pub fn open_in_flight(state: OpenInFlight) -> Self {
        Self::Active(ActiveOrderState::OpenInFlight(state))
    }

    pub fn open(state: Open) -> Self {
        Self::Active(ActiveOrderState::Open(state))
    }

    pub fn cancel_in_flight(state: CancelInFlight) -> Self {
        Self::Active(ActiveOrderState::CancelInFlight(state))
    }

    pub fn cancelled(state: Cancelled) -> Self {
        Self::Inactive(InactiveOrderState::Cancelled(state))
    }

    pub fn fully_filled() -> Self {
        Self::Inactive(InactiveOrderState::FullyFilled)
    }

    pub fn failed(state: Failed) -> Self {
        Self::Inactive(InactiveOrderState::Failed(state))
    }

    pub fn expired() -> Self {
        Self::Inactive(InactiveOrderState::Expired)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    pub fn time_exchange(&self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active(ActiveOrderState::Open(open)) => Some(open.time_exchange),
            Self::Inactive(InactiveOrderState::Cancelled(cancelled)) => {
                Some(cancelled.time_exchange)
            }
            _ => None,
        }
    }
}

/// States an order passes through while still live at the venue.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, From)]
pub enum ActiveOrderState {
    OpenInFlight(OpenInFlight),
    Open(Open),
    CancelInFlight(CancelInFlight),
}

impl ActiveOrderState {
    pub fn order_id(&self) -> Option<OrderId> {
        match self {
            ActiveOrderState::OpenInFlight(_) => None,
            ActiveOrderState::Open(state) => Some(state.id.clone()),
            ActiveOrderState::CancelInFlight(state) => state.id.clone(),
        }
    }

    pub fn is_open_or_in_flight(&self) -> bool {
        matches!(
            self,
            ActiveOrderState::OpenInFlight(_) | ActiveOrderState::Open(_)
        )
    }
}

/// Request submitted to the venue, not yet acknowledged.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize)]
pub struct OpenInFlight;

/// Order acknowledged and resting at the venue, possibly partially filled.
#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Constructor,
)]
pub struct Open {
    pub id: OrderId,
    pub time_exchange: DateTime<Utc>,
    pub price: Decimal,
    pub quantity: Decimal,
    pub filled_quantity: Decimal,
}

impl Open {
    pub fn quantity_remaining(&self) -> Decimal {
        self.quantity - self.filled_quantity
    }
}

/// Cancel request submitted for an open order, not yet acknowledged.
#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Constructor,
)]
pub struct CancelInFlight {
    pub id: Option<OrderId>,
}

/// Terminal states an order can settle into.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, From)]
pub enum InactiveOrderState {
    Cancelled(Cancelled),
    FullyFilled,
    Failed(Failed),
    Expired,
}

/// Order cancelled by the venue, with the remaining (unfilled) quantity released.
#[derive(
    Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, Constructor,
)]
pub struct Cancelled {
    pub id: OrderId,
    pub time_exchange: DateTime<Utc>,
}

/// Reason an order never reached, or fell out of, [`ActiveOrderState`].
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Deserialize, Serialize, From)]
pub enum Failed {
    Rejected(Option<String>),
    Connectivity(ConnectivityError),
}
