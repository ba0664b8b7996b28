//! Incrementally-updated exponential moving average, the smoothing primitive strategies consume
//! by tag (conventionally `"fast"` / `"slow"`) to detect direction crossings.

use rust_decimal::Decimal;

/// One EMA series: a tag identifying its role to subscribers, a smoothing factor derived from its
/// period, and the running value.
#[derive(Debug, Clone)]
pub struct MovingAverageService {
    tag: String,
    alpha: Decimal,
    value: Option<Decimal>,
}

impl MovingAverageService {
    /// `period` is the smoothing window in updates; `alpha = 2 / (period + 1)`.
    pub fn new(tag: impl Into<String>, period: u32) -> Self {
        assert!(period > 0, "period must be positive");
        let alpha = Decimal::from(2) / Decimal::from(period + 1);
        Self {
            tag: tag.into(),
            alpha,
            value: None,
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The last computed value, `None` before the first [`Self::update`].
    pub fn value(&self) -> Option<Decimal> {
        self.value
    }

    /// Folds one new price into the series, seeding the average with the first price seen.
    pub fn update(&mut self, price: Decimal) -> Decimal {
        let next = match self.value {
            Some(previous) => self.alpha * price + (Decimal::ONE - self.alpha) * previous,
            None => price,
        };
        self.value = Some(next);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn seeds_with_the_first_price() {
        let mut ema = MovingAverageService::new("fast", 3);
        assert_eq!(ema.update(dec!(10)), dec!(10));
    }

    #[test]
    fn smooths_toward_new_prices_without_overshooting() {
        let mut ema = MovingAverageService::new("slow", 9);
        ema.update(dec!(10));
        let next = ema.update(dec!(20));
        assert!(next > dec!(10) && next < dec!(20));
    }
}
