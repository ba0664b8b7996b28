//! Strategy base: event dispatch, one-shot scheduling, the open-position registry, and the
//! fatal `Block` state shared by every concrete strategy, independent of the narrower
//! [`crate::AlgoStrategy`]/[`crate::OnDisconnectStrategy`]/[`crate::OnTradingDisabled`] hooks a
//! strategy also implements.

use chrono::{DateTime, Utc};
use meridian_core::position::Position;
use meridian_markets::{Book, Instrument};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Reason a strategy was permanently blocked.
#[derive(Debug, Clone)]
pub struct BlockReason(pub String);

impl std::fmt::Display for BlockReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One event fed into [`StrategyBase::dispatch`].
#[derive(Debug)]
pub enum StrategyEvent<'a> {
    InstrumentStart(&'a Instrument),
    Level1(&'a Instrument),
    Book(&'a Instrument, &'a Book),
    ServiceData(&'a str),
    PositionUpdate(&'a Position),
    PositionsCloseRequest,
}

/// Handlers a concrete strategy implements to react to [`StrategyEvent`]s. Every default is a
/// no-op, matching `OnDisconnectStrategy`/`OnTradingDisabled`'s thin-hook style: a strategy
/// overrides only the events it cares about.
pub trait StrategyEvents: Send + Sync {
    fn on_instrument_start(&self, _instrument: &Instrument) {}
    fn on_level1(&self, _instrument: &Instrument) {}
    fn on_book(&self, _instrument: &Instrument, _book: &Book) {}
    fn on_service_data(&self, _service_name: &str) {}
    fn on_position_update(&self, _position: &Position) {}
    fn on_positions_close_request(&self) {}
    /// Called instead of any other handler once the strategy has been [`StrategyBase::block`]ed.
    fn on_blocked(&self, _reason: &BlockReason) {}
}

struct ScheduledTask {
    due_at: DateTime<Utc>,
    task: Box<dyn FnOnce() + Send>,
}

/// Shared machinery every concrete strategy is built on top of.
///
/// `register`/`unregister` track the open positions this strategy currently owns.
/// `lock_for_other_threads` serializes one decision at a time against this strategy's state the
/// same way `Position`'s own internal mutability (`parking_lot::Mutex`, see
/// `core/src/position/mod.rs`) serializes state mutation — a strategy takes this lock for the
/// duration of one decision so a second event arriving mid-decision waits rather than
/// interleaving. `block` is a one-way trapdoor: once tripped, every further
/// `lock_for_other_threads` call (and therefore every `dispatch`) is refused for the rest of the
/// process — there is no unblock, matching a fatal-error condition rather than a retryable one.
pub struct StrategyBase {
    decision_lock: Mutex<()>,
    positions: RwLock<HashMap<Uuid, Arc<Position>>>,
    scheduled: Mutex<Vec<ScheduledTask>>,
    blocked: RwLock<Option<BlockReason>>,
}

impl Default for StrategyBase {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for StrategyBase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyBase")
            .field("positions", &self.positions.read().len())
            .field("scheduled", &self.scheduled.lock().len())
            .field("blocked", &self.blocked.read().is_some())
            .finish()
    }
}

impl StrategyBase {
    pub fn new() -> Self {
        Self {
            decision_lock: Mutex::new(()),
            positions: RwLock::new(HashMap::new()),
            scheduled: Mutex::new(Vec::new()),
            blocked: RwLock::new(None),
        }
    }

    /// Takes the decision lock for the duration of `f`. Returns `None` without running `f` if
    /// the strategy is already blocked.
    pub fn lock_for_other_threads<R>(&self, f: impl FnOnce() -> R) -> Option<R> {
        if self.is_blocked() {
            return None;
        }
        let _guard = self.decision_lock.lock();
        if self.is_blocked() {
            return None;
        }
        Some(f())
    }

    /// Dispatches `event` to `handler` under [`Self::lock_for_other_threads`]. If the strategy
    /// is blocked, calls `handler.on_blocked` instead and runs nothing else.
    pub fn dispatch(&self, handler: &dyn StrategyEvents, event: StrategyEvent<'_>) {
        if let Some(reason) = self.block_reason() {
            handler.on_blocked(&reason);
            return;
        }
        self.lock_for_other_threads(|| match event {
            StrategyEvent::InstrumentStart(instrument) => handler.on_instrument_start(instrument),
            StrategyEvent::Level1(instrument) => handler.on_level1(instrument),
            StrategyEvent::Book(instrument, book) => handler.on_book(instrument, book),
            StrategyEvent::ServiceData(name) => handler.on_service_data(name),
            StrategyEvent::PositionUpdate(position) => handler.on_position_update(position),
            StrategyEvent::PositionsCloseRequest => handler.on_positions_close_request(),
        });
    }

    pub fn register(&self, position: Arc<Position>) {
        self.positions.write().insert(position.operation_id, position);
    }

    pub fn unregister(&self, operation_id: Uuid) -> Option<Arc<Position>> {
        self.positions.write().remove(&operation_id)
    }

    pub fn registered_positions(&self) -> Vec<Arc<Position>> {
        self.positions.read().values().cloned().collect()
    }

    /// Schedules `f` to run the next time [`Self::run_due_tasks`] is polled after `delay` has
    /// elapsed. There is no background timer here: a concrete strategy's own event loop calls
    /// `run_due_tasks` once per tick, matching the rest of the workspace's poll-driven dispatch
    /// rather than spawning one task per `schedule` call.
    pub fn schedule(&self, delay: Duration, f: impl FnOnce() + Send + 'static) {
        let delay = chrono::Duration::from_std(delay).unwrap_or_else(|_| chrono::Duration::zero());
        let due_at = Utc::now() + delay;
        self.scheduled.lock().push(ScheduledTask { due_at, task: Box::new(f) });
    }

    /// Runs (and removes) every scheduled task whose delay has elapsed as of `now`.
    pub fn run_due_tasks(&self, now: DateTime<Utc>) {
        let due = {
            let mut scheduled = self.scheduled.lock();
            let (due, pending): (Vec<_>, Vec<_>) =
                scheduled.drain(..).partition(|task| task.due_at <= now);
            *scheduled = pending;
            due
        };
        for task in due {
            (task.task)();
        }
    }

    /// Permanently blocks the strategy. Every subsequent `lock_for_other_threads`/`dispatch`
    /// call is refused from here on.
    pub fn block(&self, reason: impl Into<String>) -> BlockReason {
        let reason = BlockReason(reason.into());
        *self.blocked.write() = Some(reason.clone());
        reason
    }

    pub fn is_blocked(&self) -> bool {
        self.blocked.read().is_some()
    }

    pub fn block_reason(&self) -> Option<BlockReason> {
        self.blocked.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_markets::ExchangeId;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn register_and_unregister_track_positions_by_operation_id() {
        let base = StrategyBase::new();
        let id = Uuid::new_v4();
        let position = Arc::new(Position::new(
            id,
            1,
            "ema-crossover",
            ExchangeId::B3,
            "PETR4",
            "BRL",
            Decimal::from(100),
            meridian_core::position::PositionSide::Long,
            Decimal::from(10),
            None,
        ));

        base.register(Arc::clone(&position));
        assert_eq!(base.registered_positions().len(), 1);
        let removed = base.unregister(id);
        assert!(removed.is_some());
        assert!(base.registered_positions().is_empty());
    }

    #[test]
    fn blocking_refuses_further_lock_for_other_threads_calls() {
        let base = StrategyBase::new();
        assert_eq!(base.lock_for_other_threads(|| 1), Some(1));
        base.block("venue rejected every order this session");
        assert_eq!(base.lock_for_other_threads(|| 1), None);
        assert!(base.is_blocked());
    }

    #[test]
    fn dispatch_calls_on_blocked_once_blocked_instead_of_the_usual_handler() {
        struct Recorder {
            close_requests: AtomicUsize,
            blocked_calls: AtomicUsize,
        }
        impl StrategyEvents for Recorder {
            fn on_positions_close_request(&self) {
                self.close_requests.fetch_add(1, Ordering::Relaxed);
            }
            fn on_blocked(&self, _reason: &BlockReason) {
                self.blocked_calls.fetch_add(1, Ordering::Relaxed);
            }
        }

        let base = StrategyBase::new();
        let handler = Recorder { close_requests: AtomicUsize::new(0), blocked_calls: AtomicUsize::new(0) };

        base.dispatch(&handler, StrategyEvent::PositionsCloseRequest);
        assert_eq!(handler.close_requests.load(Ordering::Relaxed), 1);

        base.block("fatal venue error");
        base.dispatch(&handler, StrategyEvent::PositionsCloseRequest);
        assert_eq!(handler.close_requests.load(Ordering::Relaxed), 1);
        assert_eq!(handler.blocked_calls.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn scheduled_tasks_only_run_once_due() {
        let base = StrategyBase::new();
        let ran = Arc::new(AtomicUsize::new(0));
        let ran_clone = ran.clone();
        base.schedule(Duration::from_secs(60), move || {
            ran_clone.fetch_add(1, Ordering::Relaxed);
        });

        base.run_due_tasks(Utc::now());
        assert_eq!(ran.load(Ordering::Relaxed), 0);

        base.run_due_tasks(Utc::now() + chrono::Duration::seconds(61));
        assert_eq!(ran.load(Ordering::Relaxed), 1);

        // Already-run tasks don't fire again.
        base.run_due_tasks(Utc::now() + chrono::Duration::seconds(120));
        assert_eq!(ran.load(Ordering::Relaxed), 1);
    }
}
