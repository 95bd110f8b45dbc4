//! Functions over calculation nodes: aggregates, absolute value, rounding
//! and null/NaN replacement

use formtype_types::RoundMode;
use formtype_types::decimal;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::item::{CalcItem, Number};
use crate::value::CalcValue;

// ============================================================================
// AGGREGATES
// ============================================================================

/// Aggregate applied by [`Aggregate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateFunction {
    Avg,
    Min,
    Max,
    Sum,
}

impl AggregateFunction {
    /// Result over numbers known to be non-empty.
    fn fold(self, numbers: &[f64]) -> f64 {
        match self {
            Self::Avg => numbers.iter().sum::<f64>() / numbers.len() as f64,
            Self::Min => numbers.iter().copied().fold(f64::INFINITY, f64::min),
            Self::Max => numbers.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Self::Sum => numbers.iter().sum(),
        }
    }

    /// Result when there is nothing to aggregate.
    #[must_use]
    pub fn empty_value(self) -> CalcValue {
        match self {
            Self::Sum => CalcValue::Number(0.0),
            Self::Avg | Self::Min | Self::Max => CalcValue::NaN,
        }
    }
}

/// An aggregate over the values of its children.
///
/// Children are flattened through [`CalcItem::values`], so a
/// [`List`](crate::List) contributes each member. `Null` values are left
/// out; a single `NaN` makes the result `NaN`. With no numbers left, the
/// function's [`empty_value`](AggregateFunction::empty_value) applies.
///
/// ```rust
/// use formtype_calc::{Aggregate, CalcItem, CalcValue, List, Null, Number};
///
/// let avg = Aggregate::avg()
///     .with([2.0, 4.0].into_iter().collect::<List>())
///     .with(Number(6.0))
///     .with(Null);
/// assert_eq!(avg.evaluate().unwrap(), CalcValue::Number(4.0));
/// assert_eq!(Aggregate::avg().evaluate().unwrap(), CalcValue::NaN);
/// assert_eq!(Aggregate::sum().evaluate().unwrap(), CalcValue::Number(0.0));
/// ```
#[derive(Debug)]
pub struct Aggregate {
    function: AggregateFunction,
    items: Vec<Box<dyn CalcItem>>,
}

impl Aggregate {
    pub fn new(function: AggregateFunction) -> Self {
        Self {
            function,
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn avg() -> Self {
        Self::new(AggregateFunction::Avg)
    }

    #[must_use]
    pub fn min() -> Self {
        Self::new(AggregateFunction::Min)
    }

    #[must_use]
    pub fn max() -> Self {
        Self::new(AggregateFunction::Max)
    }

    #[must_use]
    pub fn sum() -> Self {
        Self::new(AggregateFunction::Sum)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, item: impl CalcItem + 'static) -> Self {
        self.items.push(Box::new(item));
        self
    }

    pub fn push(&mut self, item: Box<dyn CalcItem>) {
        self.items.push(item);
    }

    #[must_use]
    pub fn function(&self) -> AggregateFunction {
        self.function
    }
}

impl CalcItem for Aggregate {
    fn evaluate(&self) -> Result<CalcValue, CalcError> {
        let mut numbers = Vec::new();
        for item in &self.items {
            for value in item.values()? {
                match value {
                    CalcValue::Number(n) => numbers.push(n),
                    CalcValue::Null => {}
                    CalcValue::NaN => return Ok(CalcValue::NaN),
                }
            }
        }
        if numbers.is_empty() {
            return Ok(self.function.empty_value());
        }
        Ok(CalcValue::number(self.function.fold(&numbers)))
    }
}

// ============================================================================
// SINGLE-ARGUMENT FUNCTIONS
// ============================================================================

/// Absolute value of a node. `Null` and `NaN` pass through.
#[derive(Debug)]
pub struct Abs {
    item: Box<dyn CalcItem>,
}

impl Abs {
    pub fn new(item: impl CalcItem + 'static) -> Self {
        Self {
            item: Box::new(item),
        }
    }
}

impl CalcItem for Abs {
    fn evaluate(&self) -> Result<CalcValue, CalcError> {
        Ok(match self.item.evaluate()? {
            CalcValue::Number(n) => CalcValue::Number(n.abs()),
            other => other,
        })
    }
}

/// Rounds a node to a number of decimal places.
///
/// Rounding works on the decimal digits, the same way numeric type
/// managers round, so `1.005` rounds half away from zero to `1.01`.
#[derive(Debug)]
pub struct Round {
    item: Box<dyn CalcItem>,
    decimals: u32,
    mode: RoundMode,
}

impl Round {
    /// Rounds to whole numbers, half away from zero.
    pub fn new(item: impl CalcItem + 'static) -> Self {
        Self {
            item: Box::new(item),
            decimals: 0,
            mode: RoundMode::default(),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_decimals(mut self, decimals: u32) -> Self {
        self.decimals = decimals;
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn with_mode(mut self, mode: RoundMode) -> Self {
        self.mode = mode;
        self
    }
}

impl CalcItem for Round {
    fn evaluate(&self) -> Result<CalcValue, CalcError> {
        Ok(match self.item.evaluate()? {
            CalcValue::Number(n) => CalcValue::number(decimal::round(n, self.decimals, self.mode)),
            other => other,
        })
    }
}

/// Substitutes other nodes for `Null` and `NaN` results.
///
/// Both replacements default to zero.
///
/// ```rust
/// use formtype_calc::{CalcItem, CalcValue, Fix, NaN, Null, Number};
///
/// assert_eq!(Fix::new(Null).evaluate().unwrap(), CalcValue::Number(0.0));
/// let fixed = Fix::new(NaN).when_nan(Null);
/// assert_eq!(fixed.evaluate().unwrap(), CalcValue::Null);
/// assert_eq!(Fix::new(Number(3.0)).evaluate().unwrap(), CalcValue::Number(3.0));
/// ```
#[derive(Debug)]
pub struct Fix {
    item: Box<dyn CalcItem>,
    value_when_null: Box<dyn CalcItem>,
    value_when_nan: Box<dyn CalcItem>,
}

impl Fix {
    pub fn new(item: impl CalcItem + 'static) -> Self {
        Self {
            item: Box::new(item),
            value_when_null: Box::new(Number(0.0)),
            value_when_nan: Box::new(Number(0.0)),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn when_null(mut self, item: impl CalcItem + 'static) -> Self {
        self.value_when_null = Box::new(item);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn when_nan(mut self, item: impl CalcItem + 'static) -> Self {
        self.value_when_nan = Box::new(item);
        self
    }
}

impl CalcItem for Fix {
    fn evaluate(&self) -> Result<CalcValue, CalcError> {
        match self.item.evaluate()? {
            CalcValue::Null => self.value_when_null.evaluate(),
            CalcValue::NaN => self.value_when_nan.evaluate(),
            number => Ok(number),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{List, NaN, Null};
    use proptest::prelude::*;
    use rstest::rstest;

    fn numbers(values: &[f64]) -> List {
        values.iter().copied().collect()
    }

    #[test]
    fn avg_of_two_four_six() {
        let avg = Aggregate::avg().with(numbers(&[2.0, 4.0, 6.0]));
        assert_eq!(avg.evaluate().unwrap(), CalcValue::Number(4.0));
    }

    #[rstest]
    #[case(AggregateFunction::Avg, CalcValue::NaN)]
    #[case(AggregateFunction::Min, CalcValue::NaN)]
    #[case(AggregateFunction::Max, CalcValue::NaN)]
    #[case(AggregateFunction::Sum, CalcValue::Number(0.0))]
    fn empty_inputs(#[case] function: AggregateFunction, #[case] expected: CalcValue) {
        assert_eq!(Aggregate::new(function).evaluate().unwrap(), expected);
        let only_nulls = Aggregate::new(function).with(Null).with(List::new().with(Null));
        assert_eq!(only_nulls.evaluate().unwrap(), expected);
    }

    #[rstest]
    #[case(AggregateFunction::Min, -3.0)]
    #[case(AggregateFunction::Max, 8.0)]
    #[case(AggregateFunction::Sum, 7.0)]
    fn over_nested_children(#[case] function: AggregateFunction, #[case] expected: f64) {
        let aggregate = Aggregate::new(function)
            .with(numbers(&[2.0, -3.0]))
            .with(Null)
            .with(List::new().with(numbers(&[8.0])).with(Number(0.0)));
        assert_eq!(aggregate.evaluate().unwrap(), CalcValue::Number(expected));
    }

    #[test]
    fn nan_poisons_aggregates() {
        let sum = Aggregate::sum().with(Number(1.0)).with(NaN);
        assert_eq!(sum.evaluate().unwrap(), CalcValue::NaN);
    }

    #[test]
    fn abs_passes_specials() {
        assert_eq!(Abs::new(Number(-2.5)).evaluate().unwrap(), CalcValue::Number(2.5));
        assert_eq!(Abs::new(Null).evaluate().unwrap(), CalcValue::Null);
        assert_eq!(Abs::new(NaN).evaluate().unwrap(), CalcValue::NaN);
    }

    #[rstest]
    #[case(RoundMode::HalfAwayFromZero, 2, 1.005, 1.01)]
    #[case(RoundMode::HalfEven, 0, 2.5, 2.0)]
    #[case(RoundMode::Truncate, 1, -1.99, -1.9)]
    #[case(RoundMode::Ceiling, 0, 1.1, 2.0)]
    #[case(RoundMode::Floor, 0, -1.1, -2.0)]
    fn rounding(
        #[case] mode: RoundMode,
        #[case] decimals: u32,
        #[case] input: f64,
        #[case] expected: f64,
    ) {
        let round = Round::new(Number(input)).with_decimals(decimals).with_mode(mode);
        assert_eq!(round.evaluate().unwrap(), CalcValue::Number(expected));
    }

    #[test]
    fn round_passes_specials() {
        assert_eq!(Round::new(Null).evaluate().unwrap(), CalcValue::Null);
        assert_eq!(Round::new(NaN).with_decimals(2).evaluate().unwrap(), CalcValue::NaN);
    }

    #[test]
    fn fix_replacements_are_nodes() {
        let fixed = Fix::new(NaN).when_nan(Aggregate::sum().with(numbers(&[1.0, 2.0])));
        assert_eq!(fixed.evaluate().unwrap(), CalcValue::Number(3.0));
        let fixed = Fix::new(Null).when_null(Number(-1.0));
        assert_eq!(fixed.evaluate().unwrap(), CalcValue::Number(-1.0));
    }

    proptest! {
        #[test]
        fn min_max_bracket_avg(values in proptest::collection::vec(-1e6_f64..1e6, 1..20)) {
            let min = Aggregate::min().with(numbers(&values)).evaluate().unwrap();
            let max = Aggregate::max().with(numbers(&values)).evaluate().unwrap();
            let avg = Aggregate::avg().with(numbers(&values)).evaluate().unwrap();
            let (min, max, avg) = (
                min.as_number().unwrap(),
                max.as_number().unwrap(),
                avg.as_number().unwrap(),
            );
            prop_assert!(min <= avg + 1e-6 && avg <= max + 1e-6);
        }
    }
}
