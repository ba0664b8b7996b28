//! Sits between a strategy and the [`Position`] engine: chooses which venue carries a position
//! when more than one trades the same symbol, and bounds how many times a submission is retried
//! before the position is abandoned.

use meridian_core::position::Position;
use meridian_risk::RiskCheck;
use rust_decimal::Decimal;
use std::time::Duration;
use tracing::warn;

/// Total submission attempts (open and close combined) allowed before a position is abandoned.
pub const MAX_SUBMISSION_ATTEMPTS: u32 = 11;

/// One venue candidate for a planned submission, as validated by a [`BestSecurityChecker`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecurityCandidate<Venue> {
    pub venue: Venue,
    pub price: Decimal,
    pub quantity: Decimal,
    pub is_connected: bool,
}

/// Validates qty bounds, price sanity and connectivity for one venue candidate.
///
/// Any [`RiskCheck`] over [`SecurityCandidate<Venue>`] qualifies; there's nothing
/// controller-specific about the shape, it's the same check interface the rest of the workspace
/// uses for order-level risk checks.
pub trait BestSecurityChecker<Venue>: RiskCheck<Input = SecurityCandidate<Venue>> {}

impl<Venue, T> BestSecurityChecker<Venue> for T where T: RiskCheck<Input = SecurityCandidate<Venue>> {}

/// Tracks how many submission attempts a single position has used, across both its open and
/// close sides.
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryBudget {
    attempts: u32,
}

impl RetryBudget {
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn is_exhausted(&self) -> bool {
        self.attempts >= MAX_SUBMISSION_ATTEMPTS
    }

    fn record_attempt(&mut self) {
        self.attempts += 1;
    }
}

/// Outcome of [`Controller::handle_submission_failure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOutcome {
    /// Attempts remain; retry after this long.
    RetryAfter(Duration),
    /// Attempts are exhausted; the position was marked completed (`isError` preserved, whatever
    /// it already was).
    Abandoned,
}

/// Close-path decision returned by [`Controller::plan_close`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosePlan {
    /// Nothing left to close; the position was marked completed.
    AlreadyFlat,
    /// `Decimal` quantity still active; the caller should select a venue and issue a close.
    Remaining(Decimal),
}

/// Retry/venue-selection policy applied uniformly to every position a strategy opens.
#[derive(Debug)]
pub struct Controller<Checker> {
    checker: Checker,
    default_polling_interval: Duration,
}

impl<Checker> Controller<Checker> {
    pub fn new(checker: Checker, default_polling_interval: Duration) -> Self {
        Self {
            checker,
            default_polling_interval,
        }
    }

    /// Picks the first `candidates` venue the checker accepts for this price/quantity,
    /// `is_connected` included in the candidate so the checker can reject an offline venue.
    pub fn select_venue<Venue>(
        &self,
        candidates: impl IntoIterator<Item = SecurityCandidate<Venue>>,
    ) -> Option<Venue>
    where
        Checker: BestSecurityChecker<Venue>,
    {
        candidates
            .into_iter()
            .find(|candidate| self.checker.check(candidate).is_ok())
            .map(|candidate| candidate.venue)
    }

    /// Records a communication failure on a submission attempt (open or close). Once
    /// [`MAX_SUBMISSION_ATTEMPTS`] is reached, marks `position` completed (its `isError` state is
    /// whatever venue callbacks already set it to — the controller never sets it itself) and
    /// returns [`RetryOutcome::Abandoned`]; otherwise returns a time-based backoff.
    pub fn handle_submission_failure(
        &self,
        position: &mut Position,
        budget: &mut RetryBudget,
    ) -> RetryOutcome {
        budget.record_attempt();
        if budget.is_exhausted() {
            warn!(
                attempts = budget.attempts(),
                instrument = %position.instrument,
                "submission retries exhausted, abandoning position"
            );
            if !position.is_completed() {
                position.mark_as_completed();
            }
            RetryOutcome::Abandoned
        } else {
            RetryOutcome::RetryAfter(self.default_polling_interval)
        }
    }

    /// Close-path decision: with no active quantity left the position is simply marked
    /// completed; otherwise the caller selects a venue and issues a close for the remaining
    /// quantity.
    pub fn plan_close(&self, position: &mut Position) -> ClosePlan {
        let remaining = position.active_qty();
        if remaining.is_zero() {
            if !position.is_completed() {
                position.mark_as_completed();
            }
            ClosePlan::AlreadyFlat
        } else {
            ClosePlan::Remaining(remaining)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_core::position::PositionSide;
    use meridian_markets::ExchangeId;
    use meridian_risk::CheckHigherThan;
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn new_position(planned_qty: Decimal) -> Position {
        Position::new(
            Uuid::new_v4(),
            0,
            "strategy",
            ExchangeId::B3,
            "PETR4",
            "BRL",
            planned_qty,
            PositionSide::Long,
            dec!(10),
            None,
        )
    }

    #[derive(Debug)]
    struct MaxQtyChecker(CheckHigherThan<Decimal>);

    impl RiskCheck for MaxQtyChecker {
        type Input = SecurityCandidate<&'static str>;
        type Error = ();

        fn name() -> &'static str {
            "MaxQtyChecker"
        }

        fn check(&self, input: &Self::Input) -> Result<(), Self::Error> {
            if !input.is_connected {
                return Err(());
            }
            self.0.check(&input.quantity).map_err(|_| ())
        }
    }

    #[test]
    fn select_venue_skips_offline_and_oversized_candidates() {
        let controller = Controller::new(
            MaxQtyChecker(CheckHigherThan { limit: dec!(100) }),
            Duration::from_secs(1),
        );

        let venue = controller.select_venue([
            SecurityCandidate {
                venue: "venue-a",
                price: dec!(10),
                quantity: dec!(500),
                is_connected: true,
            },
            SecurityCandidate {
                venue: "venue-b",
                price: dec!(10),
                quantity: dec!(50),
                is_connected: false,
            },
            SecurityCandidate {
                venue: "venue-c",
                price: dec!(10),
                quantity: dec!(50),
                is_connected: true,
            },
        ]);

        assert_eq!(venue, Some("venue-c"));
    }

    #[test]
    fn retry_budget_abandons_position_after_max_attempts() {
        let controller = Controller::new(
            MaxQtyChecker(CheckHigherThan { limit: dec!(100) }),
            Duration::from_millis(50),
        );
        let mut position = new_position(dec!(10));
        let mut budget = RetryBudget::default();

        for _ in 0..MAX_SUBMISSION_ATTEMPTS - 1 {
            let outcome = controller.handle_submission_failure(&mut position, &mut budget);
            assert_eq!(outcome, RetryOutcome::RetryAfter(Duration::from_millis(50)));
        }
        assert!(!position.is_completed());

        let outcome = controller.handle_submission_failure(&mut position, &mut budget);
        assert_eq!(outcome, RetryOutcome::Abandoned);
        assert!(position.is_completed());
    }

    #[test]
    fn plan_close_marks_completed_when_nothing_active() {
        let controller = Controller::new(
            MaxQtyChecker(CheckHigherThan { limit: dec!(100) }),
            Duration::from_secs(1),
        );
        let mut position = new_position(dec!(10));
        assert_eq!(controller.plan_close(&mut position), ClosePlan::AlreadyFlat);
        assert!(position.is_completed());
    }
}
