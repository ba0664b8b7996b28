// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! # 🧠 Position / order-lifecycle engine
//!
//! A [`Position`] models one directional exposure (long or short) in one instrument at one
//! venue: the ordered sequence of open-side orders, the ordered sequence of close-side orders,
//! the fills folded into each side's [`DirectionData`], and the small set of imperative
//! operations ([`Position::open`], [`Position::close`], ...) a strategy/controller drives it
//! through.
//!
//! State only changes in two ways: a strategy calls one of the open/close operations (moving an
//! order from nonexistent to `Sent`), or a venue reports a callback through
//! [`Position::update_opening`]/[`Position::update_closing`] (moving that order from `Sent`
//! onward). Both paths are synchronous and exclusive by construction — callers are expected to
//! hold a `Position` behind the same per-strategy lock the rest of that strategy's state lives
//! behind, the same way the rest of the Meridian engine serialises mutation of shared state.
//!
//! ```text
//!               open()/open_at_market_price()/open_immediately_or_cancel()
//!  Idle ────────────────────────────────────────────────────────────▶ Opening
//!   │                                                                    │  │
//!   │ MarkAsCompleted                                    Filled, remaining=0
//!   │                                                                    │  │
//!   ▼                                                                    ▼  ▼
//! Completed ◀──────────────────────────────────────── Errored      Opened
//!   ▲                                  Error callback      ▲          │
//!   │                                                       │   close()/close_at_market_price()
//!   │                                                       │  /close_immediately_or_cancel()
//!   │                                                       │          ▼
//!   └────────────────────────── MarkAsCompleted ─────── Closing ◀──────┘
//!                                                          │
//!                                          Filled, remaining=0
//!                                                          ▼
//!                                                        Closed
//! ```
//! `Completed` is terminal and reachable from any other state via [`Position::mark_as_completed`].
//! A partial close (`Closing` with `remaining > 0` at cancellation) returns the position to
//! `Opened` rather than advancing it to `Closed`.

pub mod direction;
pub mod error;
pub mod order;

pub use direction::DirectionData;
pub use error::PositionError;
pub use order::{Fill, Order, OrderStatus, OrderTransactionContext};

use chrono::{DateTime, Utc};
use meridian_execution::order::TimeInForce;
use meridian_markets::{ExchangeId, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

/// Direction of the exposure a [`Position`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionSide {
    Long,
    Short,
}

impl PositionSide {
    pub fn open_order_side(self) -> Side {
        match self {
            Self::Long => Side::Buy,
            Self::Short => Side::Sell,
        }
    }

    pub fn close_order_side(self) -> Side {
        match self {
            Self::Long => Side::Sell,
            Self::Short => Side::Buy,
        }
    }
}

/// Why a position's close side was (or will be) driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CloseReason {
    /// A strategy signal asked to exit.
    Signal,
    /// Attached risk checks or a stop-loss algorithm requested the exit.
    StopLoss,
    TakeProfit,
    /// The venue or transport reported an unrecoverable error.
    SystemError,
    /// Engine or strategy shutdown in progress.
    Shutdown,
}

/// Default parameters applied to open/close orders submitted on behalf of this position when
/// the operation call site doesn't override them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderParams {
    pub time_in_force: Option<TimeInForce>,
    pub client_order_id_prefix: Option<String>,
}

/// One directional exposure in one instrument at one venue, and the order-lifecycle state
/// machine that opens, closes and marks it completed.
///
/// `instrument`/`strategy_id` are left as plain [`String`]s rather than the engine's indexed key
/// types: a `Position` is a leaf record owned by exactly one strategy and doesn't need to
/// participate in the indexing machinery `meridian-execution`/`meridian-markets` use for
/// multi-instrument routing.
pub struct Position {
    pub operation_id: Uuid,
    pub sub_operation_id: i64,
    pub strategy_id: String,
    pub exchange: ExchangeId,
    pub instrument: String,
    pub currency: String,
    pub planned_qty: Decimal,
    pub side: PositionSide,
    pub expiration: Option<DateTime<Utc>>,
    pub default_order_params: OrderParams,

    open: DirectionData,
    close: DirectionData,
    close_reason: Option<CloseReason>,
    is_marked_completed: bool,
    is_error: bool,
    is_inactive: bool,

    algos: Vec<Arc<dyn Fn(&Position) + Send + Sync>>,
    subscribers: parking_lot::Mutex<Vec<Box<dyn Fn(&Position) + Send>>>,
}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Position")
            .field("operation_id", &self.operation_id)
            .field("sub_operation_id", &self.sub_operation_id)
            .field("strategy_id", &self.strategy_id)
            .field("exchange", &self.exchange)
            .field("instrument", &self.instrument)
            .field("side", &self.side)
            .field("planned_qty", &self.planned_qty)
            .field("opened_qty", &self.opened_qty())
            .field("closed_qty", &self.closed_qty())
            .field("close_reason", &self.close_reason)
            .field("is_error", &self.is_error)
            .field("is_inactive", &self.is_inactive)
            .finish()
    }
}

impl Position {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        operation_id: Uuid,
        sub_operation_id: i64,
        strategy_id: impl Into<String>,
        exchange: ExchangeId,
        instrument: impl Into<String>,
        currency: impl Into<String>,
        planned_qty: Decimal,
        side: PositionSide,
        start_price: Decimal,
        expiration: Option<DateTime<Utc>>,
    ) -> Self {
        assert!(planned_qty > Decimal::ZERO, "planned_qty must be positive");
        Self {
            operation_id,
            sub_operation_id,
            strategy_id: strategy_id.into(),
            exchange,
            instrument: instrument.into(),
            currency: currency.into(),
            planned_qty,
            side,
            expiration,
            default_order_params: OrderParams::default(),
            open: DirectionData::new(start_price),
            close: DirectionData::new(Decimal::ZERO),
            close_reason: None,
            is_marked_completed: false,
            is_error: false,
            is_inactive: false,
            algos: Vec::new(),
            subscribers: parking_lot::Mutex::new(Vec::new()),
        }
    }

    // ---- attached algorithms --------------------------------------------------------------

    /// Attaches an algorithm run by [`Position::run_algos`] on every price update, as long as
    /// the position is not [`Position::is_cancelling`].
    pub fn add_algo(&mut self, algo: Arc<dyn Fn(&Position) + Send + Sync>) {
        self.algos.push(algo);
    }

    pub fn remove_algos(&mut self) {
        self.algos.clear();
    }

    pub fn run_algos(&self) {
        if self.is_cancelling() {
            return;
        }
        for algo in &self.algos {
            algo(self);
        }
    }

    // ---- subscription -----------------------------------------------------------------------

    /// Registers a callback invoked after every state-changing update (see
    /// [`Position::update_opening`]/[`Position::update_closing`]/[`Position::mark_as_completed`]).
    pub fn subscribe(&self, callback: Box<dyn Fn(&Position) + Send>) {
        self.subscribers.lock().push(callback);
    }

    fn emit_update(&self) {
        for callback in self.subscribers.lock().iter() {
            callback(self);
        }
    }

    // ---- predicates ---------------------------------------------------------------------------

    pub fn is_started(&self) -> bool {
        !self.open.orders.is_empty()
    }

    pub fn is_fully_opened(&self) -> bool {
        self.active_qty() >= self.planned_qty
    }

    pub fn is_opened(&self) -> bool {
        !self.has_active_open_orders() && self.opened_qty() > Decimal::ZERO
    }

    pub fn is_closed(&self) -> bool {
        !self.has_active_orders() && self.opened_qty() > Decimal::ZERO && self.active_qty().is_zero()
    }

    pub fn is_completed(&self) -> bool {
        self.is_marked_completed
            || (self.is_started() && !self.has_active_orders() && self.active_qty().is_zero())
    }

    pub fn is_marked_completed(&self) -> bool {
        self.is_marked_completed
    }

    pub fn is_error(&self) -> bool {
        self.is_error
    }

    pub fn is_inactive(&self) -> bool {
        self.is_inactive
    }

    pub fn is_cancelling(&self) -> bool {
        self.open.is_canceling() || self.close.is_canceling()
    }

    pub fn has_active_open_orders(&self) -> bool {
        self.open.has_active_orders()
    }

    pub fn has_active_close_orders(&self) -> bool {
        self.close.has_active_orders()
    }

    pub fn has_active_orders(&self) -> bool {
        self.has_active_open_orders() || self.has_active_close_orders()
    }

    pub fn close_reason(&self) -> Option<CloseReason> {
        self.close_reason
    }

    // ---- quantities & prices --------------------------------------------------------------

    pub fn opened_qty(&self) -> Decimal {
        self.open.cumulative_qty
    }

    pub fn closed_qty(&self) -> Decimal {
        self.close.cumulative_qty
    }

    pub fn active_qty(&self) -> Decimal {
        let active = self.opened_qty() - self.closed_qty();
        debug_assert!(active >= Decimal::ZERO, "closed_qty must never exceed opened_qty");
        active
    }

    pub fn open_avg_price(&self) -> Decimal {
        self.open.avg_price()
    }

    pub fn close_avg_price(&self) -> Decimal {
        self.close.avg_price()
    }

    // ---- close-reason lifecycle -------------------------------------------------------------

    /// Sets the close reason only if one was not already set. May complete the position
    /// immediately if it has no active quantity and no active orders left.
    pub fn set_close_reason(&mut self, reason: CloseReason) {
        if self.close_reason.is_none() {
            self.close_reason = Some(reason);
        }
    }

    /// Sets or replaces the close reason unconditionally.
    pub fn reset_close_reason(&mut self, reason: Option<CloseReason>) {
        self.close_reason = reason;
    }

    pub fn mark_as_completed(&mut self) {
        assert!(!self.is_marked_completed, "position already marked as completed");
        self.is_marked_completed = true;
        self.emit_update();
    }

    // ---- open/close operations --------------------------------------------------------------
    //
    // Each of these submits a new [`Order`] in the `Sent` state and returns the
    // [`OrderTransactionContext`] the caller should remember to correlate a later
    // `update_opening`/`update_closing` callback. They do not themselves talk to a venue — that
    // is the execution layer's job; a `Position` only tracks the order lifecycle once a request
    // has been accepted for submission.

    fn start_open_order(
        &mut self,
        qty: Decimal,
        limit_price: Option<Decimal>,
        submission_time: DateTime<Utc>,
    ) -> Result<(), PositionError> {
        if self.is_opened() || self.is_closed() {
            return Err(PositionError::AlreadyStarted);
        }
        self.open.orders.push(Order::new(submission_time, limit_price, qty));
        Ok(())
    }

    pub fn open_at_market_price(&mut self, submission_time: DateTime<Utc>) -> Result<(), PositionError> {
        self.start_open_order(self.planned_qty, None, submission_time)
    }

    pub fn open(
        &mut self,
        price: Decimal,
        submission_time: DateTime<Utc>,
    ) -> Result<(), PositionError> {
        self.start_open_order(self.planned_qty, Some(price), submission_time)
    }

    pub fn open_immediately_or_cancel(
        &mut self,
        price: Decimal,
        submission_time: DateTime<Utc>,
    ) -> Result<(), PositionError> {
        self.start_open_order(self.planned_qty, Some(price), submission_time)
    }

    fn start_close_order(
        &mut self,
        qty: Decimal,
        limit_price: Option<Decimal>,
        submission_time: DateTime<Utc>,
    ) -> Result<(), PositionError> {
        if !self.is_opened() {
            return Err(PositionError::NotOpened);
        }
        if self.is_closed() {
            return Err(PositionError::AlreadyClosed);
        }
        let qty = qty.min(self.active_qty());
        self.close.orders.push(Order::new(submission_time, limit_price, qty));
        Ok(())
    }

    pub fn close_at_market_price(&mut self, submission_time: DateTime<Utc>) -> Result<(), PositionError> {
        self.start_close_order(self.active_qty(), None, submission_time)
    }

    pub fn close(
        &mut self,
        price: Decimal,
        max_qty: Decimal,
        submission_time: DateTime<Utc>,
    ) -> Result<(), PositionError> {
        self.start_close_order(max_qty, Some(price), submission_time)
    }

    pub fn close_immediately_or_cancel(
        &mut self,
        price: Decimal,
        submission_time: DateTime<Utc>,
    ) -> Result<(), PositionError> {
        self.start_close_order(self.active_qty(), Some(price), submission_time)
    }

    /// Restores a position already opened on the venue into [`PositionSide`]'s opened state
    /// without submitting any order. Bypasses the subscriber notification path: callers
    /// reconstructing state at startup are expected to already hold whatever lock normally
    /// guards this position, the same way [`Position::mark_as_completed`] does.
    pub fn restore_open_state(
        &mut self,
        open_start_time: DateTime<Utc>,
        open_price: Decimal,
        opening_context: Option<OrderTransactionContext>,
    ) -> Result<(), PositionError> {
        if self.is_cancelling() {
            return Err(PositionError::RestoreWhileCancelling);
        }
        if self.is_opened() || !self.close.orders.is_empty() || self.is_error {
            return Err(PositionError::AlreadyStarted);
        }

        let mut order = Order::new(open_start_time, None, self.planned_qty);
        order.is_active = false;
        order.executed_qty = self.planned_qty;
        order.transaction_context = opening_context;
        self.open.orders.push(order);
        self.open.apply_fill(
            Fill {
                price: open_price,
                quantity: self.planned_qty,
            },
            open_start_time,
        );
        Ok(())
    }

    /// Requests cancellation of every active order on whichever side currently has one. Returns
    /// `true` if a cancel request was (conceptually) sent for at least one order.
    pub fn cancel_all_orders(&mut self) -> bool {
        let mut requested = false;
        if let Some(order) = self.open.orders.last_mut() {
            if order.is_active && !order.is_canceled {
                order.is_canceled = true;
                requested = true;
            }
        }
        if let Some(order) = self.close.orders.last_mut() {
            if order.is_active && !order.is_canceled {
                order.is_canceled = true;
                requested = true;
            }
        }
        requested
    }

    // ---- venue callback dispatch -----------------------------------------------------------

    /// Applies a venue callback against the most recent open-side order.
    ///
    /// Five steps, run in order:
    /// 1. the callback's `order_id` is matched against the order's [`OrderTransactionContext`];
    /// 2. any reported commission is folded into the order unconditionally, before the status
    ///    dispatch below;
    /// 3. the callback is dispatched by [`OrderStatus`];
    /// 4. on the transition from active to inactive, the side's first-trade milestone is set if
    ///    not already;
    /// 5. if the callback produced new information the subscriber signal fires exactly once.
    ///
    /// Returns `Ok(true)` if the callback produced an update (and so fired the signal),
    /// `Ok(false)` if it was a duplicate/no-op redelivery carrying nothing new.
    #[instrument(name = "position_update", skip(self, fill))]
    pub fn update_opening(
        &mut self,
        order_id: &str,
        status: OrderStatus,
        remaining_qty: Decimal,
        commission: Option<Decimal>,
        fill: Option<Fill>,
        time_exchange: DateTime<Utc>,
    ) -> Result<bool, PositionError> {
        let produced_update =
            Self::apply_callback(&mut self.open, order_id, status, remaining_qty, commission, fill, time_exchange)?;
        if status == OrderStatus::Error {
            self.is_error = true;
        }
        if produced_update {
            self.emit_update();
        }
        Ok(produced_update)
    }

    /// As [`Position::update_opening`], but against the most recent close-side order.
    #[instrument(name = "position_update", skip(self, fill))]
    pub fn update_closing(
        &mut self,
        order_id: &str,
        status: OrderStatus,
        remaining_qty: Decimal,
        commission: Option<Decimal>,
        fill: Option<Fill>,
        time_exchange: DateTime<Utc>,
    ) -> Result<bool, PositionError> {
        let produced_update =
            Self::apply_callback(&mut self.close, order_id, status, remaining_qty, commission, fill, time_exchange)?;
        if status == OrderStatus::Error {
            self.is_error = true;
        }
        if produced_update {
            self.emit_update();
        }
        Ok(produced_update)
    }

    fn apply_callback(
        side: &mut DirectionData,
        order_id: &str,
        status: OrderStatus,
        remaining_qty: Decimal,
        commission: Option<Decimal>,
        fill: Option<Fill>,
        time_exchange: DateTime<Utc>,
    ) -> Result<bool, PositionError> {
        if matches!(status, OrderStatus::Sent | OrderStatus::RequestedCancel) {
            return Err(PositionError::InternalOnlyStatus(status));
        }

        let order = side.orders.last_mut().ok_or(PositionError::NoActiveOrder)?;

        match &order.transaction_context {
            Some(context) if context.exchange_order_id == order_id => {}
            _ => return Err(PositionError::UnknownOrderId(order_id.to_string())),
        }

        // Step 2: commission accumulates regardless of what the status dispatch below decides.
        if let Some(commission) = commission {
            order.commission += commission;
        }

        // Step 3: dispatch by status.
        let produced_update = match status {
            OrderStatus::Sent | OrderStatus::RequestedCancel => unreachable!("handled above"),
            OrderStatus::Submitted => {
                debug!(remaining = %remaining_qty, "order submitted");
                true
            }
            OrderStatus::Filled | OrderStatus::FilledPartially => {
                let Some(fill) = fill else {
                    // A status-only redelivery of a fill callback carries nothing new.
                    return Ok(false);
                };
                side.apply_fill(fill, time_exchange);
                order.executed_qty += fill.quantity;
                order.is_active = remaining_qty > Decimal::ZERO;

                if let Some((pending_status, pending_remaining)) = order.pending_terminal {
                    if order.executed_qty + pending_remaining == order.planned_qty {
                        order.is_active = false;
                        order.pending_terminal = None;
                        warn!(?pending_status, "reconciled a terminal callback delayed by late fills");
                    }
                }
                true
            }
            terminal @ (OrderStatus::Error | OrderStatus::Cancelled | OrderStatus::Rejected) => {
                Self::dispatch_terminal(order, terminal, remaining_qty)
            }
        };

        Ok(produced_update)
    }

    /// Shared handling for `Error`/`Cancelled`/`Rejected`: if the reported `remaining_qty`
    /// reconciles with what's locally known to be executed, the order goes inactive immediately;
    /// otherwise the terminal status is held pending until a later fill reconciles it (see
    /// [`Order::pending_terminal`]).
    fn dispatch_terminal(order: &mut Order, status: OrderStatus, remaining_qty: Decimal) -> bool {
        let reconciled = order.executed_qty + remaining_qty == order.planned_qty;
        if !reconciled {
            order.pending_terminal = Some((status, remaining_qty));
            return false;
        }
        let was_active = order.is_active;
        order.is_active = false;
        was_active
    }

    // ---- P&L ----------------------------------------------------------------------------------

    /// Realized P&L from the `closed_qty` portion of the position, in quote currency.
    pub fn realized_pnl(&self) -> Decimal {
        let closed = self.closed_qty();
        if closed.is_zero() {
            return Decimal::ZERO;
        }
        match self.side {
            PositionSide::Long => (self.close_avg_price() - self.open_avg_price()) * closed,
            PositionSide::Short => (self.open_avg_price() - self.close_avg_price()) * closed,
        }
    }

    /// Unrealized P&L on the still-open `active_qty`, marked against `market_price`.
    pub fn unrealized_pnl(&self, market_price: Decimal) -> Decimal {
        let active = self.active_qty();
        if active.is_zero() {
            return Decimal::ZERO;
        }
        match self.side {
            PositionSide::Long => (market_price - self.open_avg_price()) * active,
            PositionSide::Short => (self.open_avg_price() - market_price) * active,
        }
    }

    /// `realized_pnl + unrealized_pnl(market_price)`.
    pub fn planned_pnl(&self, market_price: Decimal) -> Decimal {
        self.realized_pnl() + self.unrealized_pnl(market_price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn t(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(seconds, 0).unwrap()
    }

    fn new_position(planned_qty: Decimal) -> Position {
        Position::new(
            Uuid::nil(),
            1,
            "strategy-1",
            ExchangeId::B3,
            "PETR4",
            "BRL",
            planned_qty,
            PositionSide::Long,
            dec!(123),
            None,
        )
    }

    fn submit_and_ack(position: &mut Position, order_id: &str) {
        position.open_at_market_price(t(0)).unwrap();
        position.open.orders.last_mut().unwrap().transaction_context =
            Some(OrderTransactionContext::new(order_id));
    }

    // Scenario: cancelled without trades.
    #[test]
    fn cancelled_without_trades_reports_once_then_is_idempotent() {
        let mut position = new_position(dec!(11));
        submit_and_ack(&mut position, "999");

        assert!(position
            .update_opening("999", OrderStatus::Submitted, dec!(11), None, None, t(1))
            .unwrap());
        assert!(position
            .update_opening("999", OrderStatus::Cancelled, dec!(11), None, None, t(2))
            .unwrap());
        // Redelivery of the same terminal status once already inactive: no new information.
        assert!(!position
            .update_opening("999", OrderStatus::Cancelled, Decimal::ZERO, None, None, t(3))
            .unwrap());

        assert!(!position.has_active_open_orders());
        assert_eq!(position.opened_qty(), Decimal::ZERO);
    }

    // Scenario: filled with one full trade.
    #[test]
    fn filled_with_one_trade_reports_submitted_then_fill_then_is_idempotent() {
        let mut position = new_position(dec!(11));
        submit_and_ack(&mut position, "1000");

        assert!(position
            .update_opening("1000", OrderStatus::Submitted, dec!(11), None, None, t(1))
            .unwrap());
        assert!(position
            .update_opening(
                "1000",
                OrderStatus::Filled,
                Decimal::ZERO,
                None,
                Some(Fill {
                    price: dec!(665),
                    quantity: dec!(11)
                }),
                t(2),
            )
            .unwrap());
        assert!(!position
            .update_opening("1000", OrderStatus::Filled, Decimal::ZERO, None, None, t(3))
            .unwrap());

        assert_eq!(position.opened_qty(), dec!(11));
        assert_eq!(position.open_avg_price(), dec!(665));
        assert!(position.is_opened());
    }

    // Scenario: cancelled after two trades.
    #[test]
    fn cancelled_after_two_trades_reconciles_immediately() {
        let mut position = new_position(dec!(11));
        submit_and_ack(&mut position, "1001");

        position
            .update_opening("1001", OrderStatus::Submitted, dec!(11), None, None, t(1))
            .unwrap();
        position
            .update_opening(
                "1001",
                OrderStatus::FilledPartially,
                dec!(10),
                None,
                Some(Fill {
                    price: dec!(100),
                    quantity: dec!(1),
                }),
                t(2),
            )
            .unwrap();
        position
            .update_opening(
                "1001",
                OrderStatus::FilledPartially,
                dec!(5),
                None,
                Some(Fill {
                    price: dec!(100),
                    quantity: dec!(5),
                }),
                t(3),
            )
            .unwrap();

        assert!(position
            .update_opening("1001", OrderStatus::Cancelled, dec!(5), None, None, t(4))
            .unwrap());
        assert!(!position
            .update_opening("1001", OrderStatus::Cancelled, dec!(1), None, None, t(5))
            .unwrap());

        assert_eq!(position.opened_qty(), dec!(6));
    }

    // Scenario: cancelled before trades, but the reconciling trade arrives late.
    #[test]
    fn cancelled_before_reconciling_trade_arrives_is_held_pending() {
        let mut position = new_position(dec!(11));
        submit_and_ack(&mut position, "1002");

        position
            .update_opening("1002", OrderStatus::Submitted, dec!(11), None, None, t(1))
            .unwrap();
        position
            .update_opening(
                "1002",
                OrderStatus::FilledPartially,
                dec!(10),
                None,
                Some(Fill {
                    price: dec!(100),
                    quantity: dec!(1),
                }),
                t(2),
            )
            .unwrap();

        // Venue's remaining=5 implies 6 executed, but we've only recorded 1 so far: held back.
        assert!(!position
            .update_opening("1002", OrderStatus::Cancelled, dec!(5), None, None, t(3))
            .unwrap());
        assert!(position.has_active_open_orders());

        // The late trade reconciles executed_qty (1+5=6) against the pending remaining (5).
        assert!(position
            .update_opening(
                "1002",
                OrderStatus::FilledPartially,
                dec!(5),
                None,
                Some(Fill {
                    price: dec!(100),
                    quantity: dec!(5),
                }),
                t(4),
            )
            .unwrap());
        assert!(!position.has_active_open_orders());

        assert!(!position
            .update_opening("1002", OrderStatus::Cancelled, dec!(1), None, None, t(5))
            .unwrap());
    }

    // Scenario: an early Filled signal, followed by the trades that actually fill it.
    #[test]
    fn early_filled_signal_without_a_fill_is_a_no_op() {
        let mut position = new_position(dec!(11));
        submit_and_ack(&mut position, "1003");

        position
            .update_opening("1003", OrderStatus::Submitted, dec!(11), None, None, t(1))
            .unwrap();

        assert!(!position
            .update_opening("1003", OrderStatus::Filled, Decimal::ZERO, None, None, t(2))
            .unwrap());

        let fills = [dec!(1), dec!(5), dec!(4), dec!(1)];
        let mut remaining = dec!(11);
        for (i, qty) in fills.iter().enumerate() {
            remaining -= *qty;
            let status = if remaining.is_zero() {
                OrderStatus::Filled
            } else {
                OrderStatus::FilledPartially
            };
            assert!(position
                .update_opening(
                    "1003",
                    status,
                    remaining,
                    None,
                    Some(Fill {
                        price: dec!(100),
                        quantity: *qty
                    }),
                    t(3 + i as i64),
                )
                .unwrap());
        }

        assert_eq!(position.opened_qty(), dec!(11));
        assert!(!position.has_active_open_orders());
    }

    #[test]
    fn unknown_order_id_is_rejected() {
        let mut position = new_position(dec!(11));
        submit_and_ack(&mut position, "999");
        let err = position
            .update_opening("not-999", OrderStatus::Submitted, dec!(11), None, None, t(1))
            .unwrap_err();
        assert_eq!(err, PositionError::UnknownOrderId("not-999".to_string()));
    }

    #[test]
    fn pnl_reflects_avg_prices_for_a_long_position() {
        let mut position = new_position(dec!(10));
        submit_and_ack(&mut position, "1");
        position
            .update_opening(
                "1",
                OrderStatus::Filled,
                Decimal::ZERO,
                None,
                Some(Fill {
                    price: dec!(100),
                    quantity: dec!(10),
                }),
                t(1),
            )
            .unwrap();

        assert_eq!(position.unrealized_pnl(dec!(110)), dec!(100));

        position.close_at_market_price(t(2)).unwrap();
        position.close.orders.last_mut().unwrap().transaction_context =
            Some(OrderTransactionContext::new("2"));
        position
            .update_closing(
                "2",
                OrderStatus::Filled,
                Decimal::ZERO,
                None,
                Some(Fill {
                    price: dec!(110),
                    quantity: dec!(10),
                }),
                t(3),
            )
            .unwrap();

        assert_eq!(position.realized_pnl(), dec!(100));
        assert!(position.is_closed());
        assert!(position.is_completed());
    }

    #[test]
    fn mark_as_completed_is_terminal_from_any_state() {
        let mut position = new_position(dec!(10));
        submit_and_ack(&mut position, "1");
        assert!(!position.is_completed());
        position.mark_as_completed();
        assert!(position.is_completed());
    }

    /// Deterministic seeded sequence generator: applies a fixed pseudo-random walk of statuses
    /// and fills to a position and checks the invariants hold after every step.
    #[test]
    fn random_walk_of_callbacks_preserves_invariants() {
        let mut state = 0x2545F4914F6CDD1Du64;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        let mut position = new_position(dec!(100));
        submit_and_ack(&mut position, "seed");
        let mut remaining = dec!(100);
        let mut seconds = 0;

        for _ in 0..200 {
            if remaining.is_zero() {
                break;
            }
            seconds += 1;
            let step = Decimal::from(1 + (next() % 7));
            let qty = step.min(remaining);
            remaining -= qty;
            let status = if remaining.is_zero() {
                OrderStatus::Filled
            } else {
                OrderStatus::FilledPartially
            };
            position
                .update_opening(
                    "seed",
                    status,
                    remaining,
                    None,
                    Some(Fill {
                        price: dec!(10),
                        quantity: qty,
                    }),
                    t(seconds),
                )
                .unwrap();

            assert!(position.opened_qty() >= position.closed_qty());
            assert!(position.active_qty() >= Decimal::ZERO);
            assert!(!(position.has_active_open_orders() && position.has_active_close_orders()));
        }

        assert_eq!(position.opened_qty(), dec!(100));
        assert!(position.is_opened());
    }
}
