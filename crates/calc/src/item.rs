//! The [`CalcItem`] trait and constant nodes

use std::fmt;

use crate::error::CalcError;
use crate::value::{CalcValue, Operator};

/// A node of a calculation tree.
pub trait CalcItem: fmt::Debug + Send + Sync {
    fn evaluate(&self) -> Result<CalcValue, CalcError>;

    /// Values this node contributes to an aggregate. A single value for
    /// most nodes; [`List`] contributes each member.
    fn values(&self) -> Result<Vec<CalcValue>, CalcError> {
        Ok(vec![self.evaluate()?])
    }
}

impl<T: CalcItem + ?Sized> CalcItem for Box<T> {
    fn evaluate(&self) -> Result<CalcValue, CalcError> {
        (**self).evaluate()
    }

    fn values(&self) -> Result<Vec<CalcValue>, CalcError> {
        (**self).values()
    }
}

/// A value is its own node.
impl CalcItem for CalcValue {
    fn evaluate(&self) -> Result<CalcValue, CalcError> {
        Ok(*self)
    }
}

/// A fixed number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Number(pub f64);

impl CalcItem for Number {
    fn evaluate(&self) -> Result<CalcValue, CalcError> {
        Ok(CalcValue::number(self.0))
    }
}

/// Always [`CalcValue::NaN`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NaN;

impl CalcItem for NaN {
    fn evaluate(&self) -> Result<CalcValue, CalcError> {
        Ok(CalcValue::NaN)
    }
}

/// Always [`CalcValue::Null`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Null;

impl CalcItem for Null {
    fn evaluate(&self) -> Result<CalcValue, CalcError> {
        Ok(CalcValue::Null)
    }
}

/// Several nodes handed to an aggregate as separate values.
///
/// Nested lists are flattened. Used directly as an operand, a list adds up
/// its members with the same null and NaN rules as a
/// [`Group`](crate::Group).
#[derive(Debug, Default)]
pub struct List {
    items: Vec<Box<dyn CalcItem>>,
}

impl List {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
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
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl CalcItem for List {
    fn evaluate(&self) -> Result<CalcValue, CalcError> {
        let mut total = CalcValue::Null;
        for value in self.values()? {
            total = match (total, value) {
                (CalcValue::NaN, _) | (_, CalcValue::NaN) => return Ok(CalcValue::NaN),
                (total, CalcValue::Null) => total,
                (CalcValue::Null, CalcValue::Number(n)) => CalcValue::Number(n),
                (CalcValue::Number(sum), CalcValue::Number(n)) => Operator::Add.apply(sum, n),
            };
        }
        Ok(total)
    }

    fn values(&self) -> Result<Vec<CalcValue>, CalcError> {
        let mut values = Vec::with_capacity(self.items.len());
        for item in &self.items {
            values.extend(item.values()?);
        }
        Ok(values)
    }
}

impl FromIterator<f64> for List {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Self {
            items: iter
                .into_iter()
                .map(|n| Box::new(Number(n)) as Box<dyn CalcItem>)
                .collect(),
        }
    }
}
