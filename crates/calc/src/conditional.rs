//! Choosing a branch by evaluating a condition

use formtype_condition::{Condition, ConditionResult};
use tracing::trace;

use crate::error::CalcError;
use crate::item::{CalcItem, Null};
use crate::value::CalcValue;

/// Evaluates one of three nodes depending on a condition's result.
///
/// The cannot-evaluate branch defaults to `Null`, so an undecidable
/// condition drops out of surrounding arithmetic.
#[derive(Debug)]
pub struct Conditional {
    condition: Box<dyn Condition>,
    success: Box<dyn CalcItem>,
    failed: Box<dyn CalcItem>,
    cannot_evaluate: Box<dyn CalcItem>,
}

impl Conditional {
    pub fn new(
        condition: impl Condition + 'static,
        success: impl CalcItem + 'static,
        failed: impl CalcItem + 'static,
    ) -> Self {
        Self {
            condition: Box::new(condition),
            success: Box::new(success),
            failed: Box::new(failed),
            cannot_evaluate: Box::new(Null),
        }
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn when_cannot_evaluate(mut self, item: impl CalcItem + 'static) -> Self {
        self.cannot_evaluate = Box::new(item);
        self
    }
}

impl CalcItem for Conditional {
    fn evaluate(&self) -> Result<CalcValue, CalcError> {
        let result = self.condition.evaluate()?;
        trace!(condition = self.condition.name(), %result, "choosing branch");
        match result {
            ConditionResult::Success => self.success.evaluate(),
            ConditionResult::Failed => self.failed.evaluate(),
            ConditionResult::CannotEvaluate => self.cannot_evaluate.evaluate(),
        }
    }
}
