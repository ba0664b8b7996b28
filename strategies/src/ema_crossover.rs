// Mini-Disclaimer: Educational/experimental use; not investment advice or affiliation; see README & DISCLAIMER.
//! EMA crossover on a single instrument: holds at most one position, opening long on an
//! up-crossing of the fast EMA over the slow one, short on a down-crossing, and reversing on an
//! opposite crossing while a position is open.

use meridian_analytics::service::MovingAverageService;
use meridian_core::position::PositionSide;
use rust_decimal::Decimal;

/// Edge-triggered direction of the fast EMA relative to the slow one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Level,
    Down,
}

/// Tracks the fast/slow EMA pair and the last reported [`Direction`], detecting crossings one
/// update at a time.
#[derive(Debug)]
pub struct EmaCrossoverDetector {
    fast: MovingAverageService,
    slow: MovingAverageService,
    last_direction: Direction,
}

impl EmaCrossoverDetector {
    pub fn new(fast_period: u32, slow_period: u32) -> Self {
        Self {
            fast: MovingAverageService::new("fast", fast_period),
            slow: MovingAverageService::new("slow", slow_period),
            last_direction: Direction::Level,
        }
    }

    /// Folds one new price into both EMAs and returns the direction *transition* detected by this
    /// update: `Level` both when the EMAs are equal and when the direction hasn't changed since
    /// the last update (no new signal either way).
    ///
    /// Mirrors the source's `UpdateDirection`: when the fast/slow comparison itself crosses
    /// through equality between two updates (fast-vs-slow direction was `Level` at the previous
    /// update), the crossing that *caused* that equality is reported now rather than lost.
    pub fn update(&mut self, price: Decimal) -> Direction {
        self.fast.update(price);
        self.slow.update(price);
        self.update_direction()
    }

    fn update_direction(&mut self) -> Direction {
        let fast = self.fast.value().unwrap_or_default();
        let slow = self.slow.value().unwrap_or_default();

        let current_direction = if fast == slow {
            Direction::Level
        } else if fast > slow {
            Direction::Up
        } else {
            Direction::Down
        };

        if self.last_direction == current_direction {
            return Direction::Level;
        }

        let previous_direction = std::mem::replace(&mut self.last_direction, current_direction);

        match current_direction {
            Direction::Level => {
                // Intersection happened at this update; report it only once, at the update that
                // produces the next real direction.
                Direction::Level
            }
            _ => match previous_direction {
                Direction::Up | Direction::Down => previous_direction,
                // Intersection happened at the previous update: the direction that actually
                // crossed is the opposite of the one just detected.
                Direction::Level => {
                    if current_direction == Direction::Down {
                        Direction::Up
                    } else {
                        Direction::Down
                    }
                }
            },
        }
    }
}

/// Escalation hook for a lingering passive close order. The source names this behavior in a
/// comment ("if too slow: cancel passive order and send aggressive here") but never implements a
/// trigger condition for it; kept here as an explicit no-op so the hook is documented rather than
/// silently absent.
pub trait CloseEscalation {
    fn should_escalate_to_aggressive(&self, time_since_close_request: std::time::Duration) -> bool;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverEscalate;

impl CloseEscalation for NeverEscalate {
    fn should_escalate_to_aggressive(&self, _time_since_close_request: std::time::Duration) -> bool {
        false
    }
}

/// Decision produced by one [`EmaCrossoverStrategy::on_price`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// No position open; open one on the given side.
    Open(PositionSide),
    /// A position is open on the opposite side of the new crossing; close it, then open the new
    /// side next cycle (mirrors the source closing via the opposite book side before reversing).
    Reverse(PositionSide),
    /// Either no crossing, or the open position already matches the crossing direction.
    Hold,
}

/// Single-instrument EMA crossover state machine.
#[derive(Debug)]
pub struct EmaCrossoverStrategy {
    detector: EmaCrossoverDetector,
    open_side: Option<PositionSide>,
}

impl EmaCrossoverStrategy {
    pub fn new(fast_period: u32, slow_period: u32) -> Self {
        Self {
            detector: EmaCrossoverDetector::new(fast_period, slow_period),
            open_side: None,
        }
    }

    pub fn on_price(&mut self, price: Decimal) -> Signal {
        let direction = self.detector.update(price);
        let crossing_side = match direction {
            Direction::Up => Some(PositionSide::Long),
            Direction::Down => Some(PositionSide::Short),
            Direction::Level => None,
        };

        match (self.open_side, crossing_side) {
            (None, Some(side)) => {
                self.open_side = Some(side);
                Signal::Open(side)
            }
            (Some(current), Some(side)) if current != side => {
                self.open_side = Some(side);
                Signal::Reverse(side)
            }
            _ => Signal::Hold,
        }
    }

    pub fn open_side(&self) -> Option<PositionSide> {
        self.open_side
    }

    /// Called once the controller has closed the currently open position (e.g. after a
    /// [`Signal::Reverse`] is acted on), so the next matching crossing opens fresh instead of
    /// being swallowed as a no-op.
    pub fn clear_open_side(&mut self) {
        self.open_side = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn no_signal_while_fast_and_slow_agree() {
        let mut strategy = EmaCrossoverStrategy::new(3, 9);
        for _ in 0..5 {
            assert_eq!(strategy.on_price(dec!(100)), Signal::Hold);
        }
    }

    #[test]
    fn up_crossing_opens_long_from_flat() {
        let mut strategy = EmaCrossoverStrategy::new(2, 20);
        strategy.on_price(dec!(100));
        let mut last = Signal::Hold;
        for price in [dec!(100), dec!(110), dec!(120), dec!(130), dec!(140)] {
            last = strategy.on_price(price);
            if last != Signal::Hold {
                break;
            }
        }
        assert_eq!(last, Signal::Open(PositionSide::Long));
        assert_eq!(strategy.open_side(), Some(PositionSide::Long));
    }

    #[test]
    fn opposite_crossing_reverses_an_open_position() {
        let mut strategy = EmaCrossoverStrategy::new(2, 20);
        for price in [dec!(100), dec!(110), dec!(120), dec!(130), dec!(140)] {
            strategy.on_price(price);
        }
        assert_eq!(strategy.open_side(), Some(PositionSide::Long));

        let mut reversed = false;
        for price in [dec!(130), dec!(110), dec!(90), dec!(70), dec!(50)] {
            if strategy.on_price(price) == Signal::Reverse(PositionSide::Short) {
                reversed = true;
                break;
            }
        }
        assert!(reversed);
        assert_eq!(strategy.open_side(), Some(PositionSide::Short));
    }

    #[test]
    fn escalation_hook_never_fires_by_default() {
        let escalation = NeverEscalate;
        assert!(!escalation.should_escalate_to_aggressive(std::time::Duration::from_secs(3600)));
    }
}
