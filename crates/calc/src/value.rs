//! Results of calculation nodes and the arithmetic between them

use std::fmt;
use std::str::FromStr;

use formtype_types::ConfigError;
use serde::{Deserialize, Serialize};

/// What a calculation node evaluates to.
///
/// `NaN` is a failure that spreads through any arithmetic it touches.
/// `Null` means there was nothing to compute; arithmetic skips it.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum CalcValue {
    Number(f64),
    NaN,
    #[default]
    Null,
}

impl CalcValue {
    /// Wraps a float. Non-finite results become [`CalcValue::NaN`].
    #[must_use]
    pub fn number(n: f64) -> Self {
        if n.is_finite() { Self::Number(n) } else { Self::NaN }
    }

    #[must_use]
    pub fn is_nan(&self) -> bool {
        matches!(self, Self::NaN)
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }
}

impl From<f64> for CalcValue {
    fn from(n: f64) -> Self {
        Self::number(n)
    }
}

impl From<Option<f64>> for CalcValue {
    fn from(n: Option<f64>) -> Self {
        n.map_or(Self::Null, Self::number)
    }
}

impl fmt::Display for CalcValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::NaN => write!(f, "NaN"),
            Self::Null => write!(f, "null"),
        }
    }
}

// ============================================================================
// OPERATOR
// ============================================================================

/// Arithmetic operator joining the members of a [`Group`](crate::Group).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Operator {
    #[default]
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl Operator {
    /// `left <op> right`. Division by zero is [`CalcValue::NaN`].
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> CalcValue {
        match self {
            Self::Add => CalcValue::number(left + right),
            Self::Subtract => CalcValue::number(left - right),
            Self::Multiply => CalcValue::number(left * right),
            Self::Divide if right == 0.0 => CalcValue::NaN,
            Self::Divide => CalcValue::number(left / right),
        }
    }

    #[must_use]
    pub fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Self::Add),
            "-" => Ok(Self::Subtract),
            "*" => Ok(Self::Multiply),
            "/" => Ok(Self::Divide),
            other => Err(ConfigError::invalid_option(
                "operator",
                format!("unknown operator `{other}`"),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Operator::Add, 6.0, 3.0, CalcValue::Number(9.0))]
    #[case(Operator::Subtract, 6.0, 3.0, CalcValue::Number(3.0))]
    #[case(Operator::Multiply, 6.0, 3.0, CalcValue::Number(18.0))]
    #[case(Operator::Divide, 6.0, 3.0, CalcValue::Number(2.0))]
    #[case(Operator::Divide, 6.0, 0.0, CalcValue::NaN)]
    #[case(Operator::Multiply, f64::MAX, 2.0, CalcValue::NaN)]
    fn arithmetic(
        #[case] op: Operator,
        #[case] left: f64,
        #[case] right: f64,
        #[case] expected: CalcValue,
    ) {
        assert_eq!(op.apply(left, right), expected);
    }

    #[test]
    fn operators_parse_and_serialize() {
        assert_eq!("*".parse::<Operator>().unwrap(), Operator::Multiply);
        assert_eq!("%".parse::<Operator>().unwrap_err().code(), "CONFIG_INVALID_OPTION");
        assert_eq!(serde_json::to_string(&Operator::Divide).unwrap(), r#""/""#);
    }

    #[test]
    fn non_finite_numbers_are_nan() {
        assert_eq!(CalcValue::number(f64::INFINITY), CalcValue::NaN);
        assert_eq!(CalcValue::from(None), CalcValue::Null);
        assert_eq!(CalcValue::from(Some(2.5)).to_string(), "2.5");
    }
}
