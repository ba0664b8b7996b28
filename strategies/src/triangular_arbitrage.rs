// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! Triangular arbitrage across three legs (base/mid, mid/quote, base/quote).
//!
//! Each level-1 update enumerates allowed venue triples, prices the leg product, clamps leg
//! quantities against the configured volume envelope, validates every leg through a best-security
//! checker, and launches the best-scoring opportunity's legs when trading is enabled.

use meridian_markets::Side;
use meridian_risk::RiskCheck;
use meridian_trader::controller::{BestSecurityChecker, SecurityCandidate};
use meridian_trader::operation::{LimitIocOrderPolicy, Operation, OrderPolicy};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;
use uuid::Uuid;

type InstrumentIndex = meridian_execution::InstrumentIndex;
type ExchangeIndex = meridian_execution::ExchangeIndex;

/// Which side a leg trades, fixing whether its price enters the leg product directly or as its
/// reciprocal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegSide {
    /// Sells the quote asset for the base asset; contributes `price` to the leg product.
    Short,
    /// Buys the quote asset with the base asset; contributes `1 / price` to the leg product.
    Long,
}

impl LegSide {
    fn calc_x(self, price: Decimal) -> Decimal {
        match self {
            LegSide::Short => price,
            LegSide::Long => Decimal::ONE / price,
        }
    }

    fn order_side(self) -> Side {
        match self {
            LegSide::Short => Side::Sell,
            LegSide::Long => Side::Buy,
        }
    }
}

/// Static configuration for one leg: its instrument, its side, and the venues allowed to fill it.
#[derive(Debug, Clone)]
pub struct LegConfig {
    pub instrument: InstrumentIndex,
    pub side: LegSide,
    pub allowed_venues: Vec<ExchangeIndex>,
}

/// One venue's current top-of-book and tradable balance for a leg, as observed by the caller.
#[derive(Debug, Clone)]
pub struct LegQuote {
    pub venue: ExchangeIndex,
    pub price: Decimal,
    pub book_qty: Decimal,
    pub balance_qty: Decimal,
    pub is_connected: bool,
}

/// One fully-priced, qty-clamped leg of a candidate triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub venue: ExchangeIndex,
    pub price: Decimal,
    pub qty: Decimal,
}

/// A priced triple, scored and ready to be checked and, if signaled, launched.
#[derive(Debug, Clone)]
pub struct Opportunity {
    pub targets: [Target; 3],
    pub pnl_ratio: Decimal,
    /// `None` mirrors the source's "NaN pnlVolume" case (leg1/leg3 notional is zero); numeric
    /// values always sort ahead of these, per the source's comparator.
    pub pnl_volume: Option<Decimal>,
    pub check_error: Option<&'static str>,
}

impl Opportunity {
    fn is_signaled(&self, min_profit_ratio: Decimal) -> bool {
        self.check_error.is_none() && self.pnl_ratio >= min_profit_ratio
    }
}

#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriangularArbitrageError {
    #[error("one or more legs don't have any configured venue securities")]
    NoSecurities,
    #[error("leg configuration is wrong: 3rd leg volume doesn't reconcile with 1st leg volume")]
    WrongLegsConfiguration,
}

/// Quantity-clamp step: scales leg1's qty to the `{min_volume, max_volume}` envelope against
/// leg1's own book qty, then propagates the resulting notional down through legs 2 and 3, clamping
/// against each venue's tradable balance along the way so all three legs share one consistent
/// notional.
fn clamp_leg_qtys(
    min_volume: Decimal,
    max_volume: Decimal,
    prices: [Decimal; 3],
    book_qtys: [Decimal; 3],
    balance_qtys: [Decimal; 3],
) -> [Decimal; 3] {
    if prices[0].is_zero() || prices[1].is_zero() {
        return [Decimal::ZERO; 3];
    }

    let min_leg1_qty = min_volume / prices[0];
    let mut leg1_qty = (max_volume / prices[0]).min(book_qtys[0]);
    let is_leg1_forced = leg1_qty < min_leg1_qty;
    if is_leg1_forced {
        leg1_qty = min_leg1_qty;
    }
    leg1_qty = leg1_qty.min(balance_qtys[0]);
    if leg1_qty.is_zero() {
        return [Decimal::ZERO; 3];
    }

    let mut leg2_qty = leg1_qty / prices[1];
    if !is_leg1_forced {
        let actual_leg2_qty = (min_leg1_qty / prices[1]).max(book_qtys[1].min(book_qtys[2]));
        if actual_leg2_qty < leg2_qty {
            leg2_qty = actual_leg2_qty;
        }
    }
    let lowest_allowed_qty = balance_qtys[1].min(balance_qtys[2]);
    if lowest_allowed_qty < leg2_qty {
        leg2_qty = lowest_allowed_qty;
    }
    let leg3_qty = leg2_qty;
    if leg2_qty.is_zero() {
        return [Decimal::ZERO, Decimal::ZERO, Decimal::ZERO];
    }

    let leg1_notional = leg2_qty * prices[1];
    if leg1_notional < leg1_qty {
        leg1_qty = leg1_notional;
    }

    [leg1_qty, leg2_qty, leg3_qty]
}

/// Checks leg1/leg3 notionals reconcile within 50%-150% tolerance; returns the pnl volume (leg3
/// notional minus leg1 notional) or `None` when either notional is zero (a "NaN" opportunity the
/// source still scores, just always after numeric ones).
fn calc_pnl_volume(targets: &[Target; 3]) -> Result<Option<Decimal>, TriangularArbitrageError> {
    let leg1_volume = targets[0].qty * targets[0].price;
    let leg3_volume = targets[2].qty * targets[2].price;
    if leg1_volume.is_zero() || leg3_volume.is_zero() {
        return Ok(None);
    }
    let half = Decimal::new(5, 1);
    let one_and_half = Decimal::new(15, 1);
    if leg3_volume < leg1_volume * half || leg1_volume * one_and_half < leg3_volume {
        return Err(TriangularArbitrageError::WrongLegsConfiguration);
    }
    Ok(Some(leg3_volume - leg1_volume))
}

/// Decision-cycle configuration: the three legs, the volume envelope, the profitability
/// threshold, and the trading-enabled switch.
#[derive(Debug, Clone)]
pub struct TriangularArbitrageConfig {
    pub legs: [LegConfig; 3],
    pub min_volume: Decimal,
    pub max_volume: Decimal,
    pub min_profit_ratio: Decimal,
    pub is_trading_enabled: bool,
}

/// Enumerates every allowed venue triple, prices and qty-clamps it, scores it, and returns the
/// opportunities sorted best-first (numeric `pnl_volume` descending, then the "NaN" ones).
pub fn evaluate_opportunities<Checker>(
    config: &TriangularArbitrageConfig,
    quotes: &[Vec<LegQuote>; 3],
    checker: &Checker,
) -> Result<Vec<Opportunity>, TriangularArbitrageError>
where
    Checker: BestSecurityChecker<ExchangeIndex>,
{
    let mut opportunities = Vec::new();
    let mut configuration_error = None;

    for leg1 in allowed_quotes(&quotes[0], &config.legs[0]) {
        for leg2 in allowed_quotes(&quotes[1], &config.legs[1]) {
            for leg3 in allowed_quotes(&quotes[2], &config.legs[2]) {
                let prices = [leg1.price, leg2.price, leg3.price];
                let qtys = clamp_leg_qtys(
                    config.min_volume,
                    config.max_volume,
                    prices,
                    [leg1.book_qty, leg2.book_qty, leg3.book_qty],
                    [leg1.balance_qty, leg2.balance_qty, leg3.balance_qty],
                );
                let targets = [
                    Target { venue: leg1.venue.clone(), price: prices[0], qty: qtys[0] },
                    Target { venue: leg2.venue.clone(), price: prices[1], qty: qtys[1] },
                    Target { venue: leg3.venue.clone(), price: prices[2], qty: qtys[2] },
                ];

                let check_error = check_targets(&targets, checker);

                let pnl_volume = match calc_pnl_volume(&targets) {
                    Ok(volume) => volume,
                    Err(error) => {
                        configuration_error.get_or_insert(error);
                        None
                    }
                };

                let pnl_ratio = config.legs[0].side.calc_x(prices[0])
                    * config.legs[1].side.calc_x(prices[1])
                    * config.legs[2].side.calc_x(prices[2])
                    - Decimal::ONE;

                opportunities.push(Opportunity { targets, pnl_ratio, pnl_volume, check_error });
            }
        }
    }

    if opportunities.is_empty() {
        return Err(TriangularArbitrageError::NoSecurities);
    }

    opportunities.sort_by(|a, b| match (a.pnl_volume, b.pnl_volume) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    if let Some(error) = configuration_error {
        return Err(error);
    }

    Ok(opportunities)
}

fn allowed_quotes<'a>(quotes: &'a [LegQuote], leg: &'a LegConfig) -> impl Iterator<Item = &'a LegQuote> {
    quotes
        .iter()
        .filter(move |quote| leg.allowed_venues.is_empty() || leg.allowed_venues.contains(&quote.venue))
}

fn check_targets<Checker>(targets: &[Target; 3], checker: &Checker) -> Option<&'static str>
where
    Checker: BestSecurityChecker<ExchangeIndex>,
{
    for target in targets.iter() {
        let candidate = SecurityCandidate {
            venue: target.venue.clone(),
            price: target.price,
            quantity: target.qty,
            is_connected: true,
        };
        if checker.check(&candidate).is_err() {
            return Some("security check rejected leg");
        }
    }
    None
}

/// Picks the best signaled opportunity (first by score, since [`evaluate_opportunities`] already
/// sorted best-first) if trading is enabled and it clears the profit threshold.
pub fn select_opportunity<'a>(
    config: &TriangularArbitrageConfig,
    opportunities: &'a [Opportunity],
) -> Option<&'a Opportunity> {
    if !config.is_trading_enabled {
        return None;
    }
    opportunities.iter().find(|opportunity| opportunity.is_signaled(config.min_profit_ratio))
}

/// One triangular-arbitrage trade: the three priced legs plus the order policy shared by every
/// leg's position.
#[derive(Debug)]
pub struct TriangularArbitrageOperation {
    id: Uuid,
    legs: [LegConfig; 3],
    targets: [Target; 3],
    policy: LimitIocOrderPolicy,
}

impl TriangularArbitrageOperation {
    pub fn new(id: Uuid, legs: [LegConfig; 3], targets: [Target; 3]) -> Self {
        Self { id, legs, targets, policy: LimitIocOrderPolicy }
    }

    fn leg_index(&self, instrument: &str) -> Option<usize> {
        self.legs.iter().position(|leg| leg.instrument == instrument)
    }

    pub fn target(&self, leg: usize) -> &Target {
        &self.targets[leg]
    }

    pub fn side(&self, leg: usize) -> Side {
        self.legs[leg].side.order_side()
    }
}

impl Operation for TriangularArbitrageOperation {
    fn id(&self) -> Uuid {
        self.id
    }

    fn open_order_policy(&self) -> &dyn OrderPolicy {
        &self.policy
    }

    fn close_order_policy(&self) -> &dyn OrderPolicy {
        &self.policy
    }

    fn is_long(&self, instrument: &str) -> bool {
        self.leg_index(instrument).is_some_and(|leg| self.legs[leg].side == LegSide::Long)
    }

    fn planned_qty(&self, instrument: &str) -> Decimal {
        self.leg_index(instrument).map(|leg| self.targets[leg].qty).unwrap_or(Decimal::ZERO)
    }

    fn has_close_signal(&self, _position: &meridian_core::position::Position) -> bool {
        // An arbitrage leg closes only through the controller's explicit close-on-failure path
        // (see `open_legs`); there's no independent per-position close signal.
        false
    }
}

/// Per-leg launch decision derived from how many of a triple's venues are on the blocked list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchDecision {
    Launch { blocked_leg: Option<usize> },
    SkipTwoOrMoreBlocked,
}

pub fn decide_launch(blocked_legs: &HashSet<usize>) -> LaunchDecision {
    match blocked_legs.len() {
        0 => LaunchDecision::Launch { blocked_leg: None },
        1 => LaunchDecision::Launch { blocked_leg: blocked_legs.iter().copied().next() },
        _ => LaunchDecision::SkipTwoOrMoreBlocked,
    }
}

/// Opens (and, on partial failure, closes) one leg of a launched triple. Implementors own the
/// actual order submission against a venue; `open_legs` only sequences calls into this trait.
pub trait LegOpener {
    type Error: std::fmt::Debug + Send;

    fn open_leg(&self, leg: usize, target: Target) -> impl Future<Output = Result<(), Self::Error>> + Send;
    fn close_leg_after_open_failure(&self, leg: usize, target: Target) -> impl Future<Output = ()> + Send;
}

/// Per-leg open outcome of one [`open_legs`] call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LaunchReport {
    pub opened: [bool; 3],
}

impl LaunchReport {
    pub fn has_failures(&self) -> bool {
        self.opened.iter().any(|&opened| !opened)
    }
}

/// Opens a launched triple's legs per [`LaunchDecision::Launch`]'s ordering: the blocked leg (if
/// any) opens synchronously first and aborts the whole launch on failure; the remaining legs open
/// concurrently (one inline, the rest as spawned tasks joined with [`futures::future::join_all`]),
/// each leg's failure reported independently. Any failure closes the legs that did open, with
/// `closeReason = OpenFailed` left to the caller (via `close_leg_after_open_failure`).
pub async fn open_legs<O>(opener: Arc<O>, targets: [Target; 3], blocked_leg: Option<usize>) -> LaunchReport
where
    O: LegOpener + Send + Sync + 'static,
{
    let mut report = LaunchReport::default();

    if let Some(blocked) = blocked_leg {
        if opener.open_leg(blocked, targets[blocked].clone()).await.is_err() {
            return report;
        }
        report.opened[blocked] = true;

        let others: [usize; 2] = {
            let mut iter = (0..3).filter(|&leg| leg != blocked);
            [iter.next().unwrap(), iter.next().unwrap()]
        };
        let (sync_leg, async_leg) = (others[0], others[1]);

        let async_opener = Arc::clone(&opener);
        let async_target = targets[async_leg].clone();
        let async_handle = tokio::spawn(async move { async_opener.open_leg(async_leg, async_target).await });

        let sync_result = opener.open_leg(sync_leg, targets[sync_leg].clone()).await;
        report.opened[sync_leg] = sync_result.is_ok();
        report.opened[async_leg] = matches!(async_handle.await, Ok(Ok(())));
    } else {
        let handles = (0..3).map(|leg| {
            let opener = Arc::clone(&opener);
            let target = targets[leg].clone();
            tokio::spawn(async move { opener.open_leg(leg, target).await })
        });
        let results = futures::future::join_all(handles).await;
        for (leg, result) in results.into_iter().enumerate() {
            report.opened[leg] = matches!(result, Ok(Ok(())));
        }
    }

    if report.has_failures() {
        for leg in 0..3 {
            if report.opened[leg] {
                opener.close_leg_after_open_failure(leg, targets[leg].clone()).await;
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use meridian_risk::{CheckHigherThan, RiskCheck};
    use rust_decimal_macros::dec;
    use tokio::sync::Mutex;

    #[derive(Debug)]
    struct AlwaysConnectedChecker(CheckHigherThan<Decimal>);

    impl RiskCheck for AlwaysConnectedChecker {
        type Input = SecurityCandidate<ExchangeIndex>;
        type Error = ();

        fn name() -> &'static str {
            "AlwaysConnectedChecker"
        }

        fn check(&self, input: &Self::Input) -> Result<(), Self::Error> {
            self.0.check(&input.quantity).map_err(|_| ())
        }
    }

    fn leg(side: LegSide, instrument: &str) -> LegConfig {
        LegConfig { instrument: instrument.to_string(), side, allowed_venues: vec![] }
    }

    fn quote(venue: &str, price: Decimal, qty: Decimal) -> LegQuote {
        LegQuote {
            venue: venue.to_string(),
            price,
            book_qty: qty,
            balance_qty: qty,
            is_connected: true,
        }
    }

    #[test]
    fn clamps_leg_qtys_to_a_single_consistent_notional() {
        let qtys = clamp_leg_qtys(
            dec!(0),
            dec!(1000),
            [dec!(10), dec!(2), dec!(5)],
            [dec!(500), dec!(500), dec!(500)],
            [dec!(500), dec!(500), dec!(500)],
        );
        assert_eq!(qtys[1], qtys[2]);
        assert!(qtys[0] * dec!(10) <= dec!(1000));
    }

    #[test]
    fn signaled_opportunity_clears_the_configured_profit_ratio() {
        let config = TriangularArbitrageConfig {
            legs: [leg(LegSide::Short, "A/B"), leg(LegSide::Short, "B/C"), leg(LegSide::Long, "A/C")],
            min_volume: dec!(0),
            max_volume: dec!(1000),
            min_profit_ratio: dec!(0.01),
            is_trading_enabled: true,
        };
        let quotes = [
            vec![quote("v1", dec!(1.015), dec!(100))],
            vec![quote("v1", dec!(1), dec!(100))],
            vec![quote("v1", dec!(1), dec!(100))],
        ];
        let checker = AlwaysConnectedChecker(CheckHigherThan { limit: dec!(1000) });

        let opportunities = evaluate_opportunities(&config, &quotes, &checker).unwrap();
        let best = select_opportunity(&config, &opportunities).expect("should be signaled");
        assert!(best.pnl_ratio >= dec!(0.01));
    }

    #[test]
    fn blocked_leg_count_decides_launch_shape() {
        assert_eq!(decide_launch(&HashSet::new()), LaunchDecision::Launch { blocked_leg: None });
        assert_eq!(
            decide_launch(&HashSet::from([1])),
            LaunchDecision::Launch { blocked_leg: Some(1) }
        );
        assert_eq!(decide_launch(&HashSet::from([0, 2])), LaunchDecision::SkipTwoOrMoreBlocked);
    }

    #[derive(Debug, Default)]
    struct RecordingOpener {
        fail_leg: Option<usize>,
        closed: Mutex<Vec<usize>>,
    }

    impl LegOpener for RecordingOpener {
        type Error = ();

        async fn open_leg(&self, leg: usize, _target: Target) -> Result<(), Self::Error> {
            if self.fail_leg == Some(leg) {
                Err(())
            } else {
                Ok(())
            }
        }

        async fn close_leg_after_open_failure(&self, leg: usize, _target: Target) {
            self.closed.lock().await.push(leg);
        }
    }

    fn sample_targets() -> [Target; 3] {
        [
            Target { venue: "v1".to_string(), price: dec!(10), qty: dec!(1) },
            Target { venue: "v1".to_string(), price: dec!(10), qty: dec!(1) },
            Target { venue: "v1".to_string(), price: dec!(10), qty: dec!(1) },
        ]
    }

    #[tokio::test]
    async fn one_failing_leg_closes_the_rest_with_no_blocked_leg() {
        let opener = Arc::new(RecordingOpener { fail_leg: Some(1), ..Default::default() });
        let report = open_legs(Arc::clone(&opener), sample_targets(), None).await;
        assert_eq!(report.opened, [true, false, true]);
        let closed = opener.closed.lock().await.clone();
        assert_eq!(closed.len(), 2);
        assert!(closed.contains(&0) && closed.contains(&2));
    }

    #[tokio::test]
    async fn blocked_leg_failure_aborts_before_the_others_are_attempted() {
        let opener = Arc::new(RecordingOpener { fail_leg: Some(0), ..Default::default() });
        let report = open_legs(Arc::clone(&opener), sample_targets(), Some(0)).await;
        assert_eq!(report.opened, [false, false, false]);
        assert!(opener.closed.lock().await.is_empty());
    }
}
