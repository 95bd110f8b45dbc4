//! Combining conditions with AND / OR

use serde::{Deserialize, Serialize};

use crate::condition::{Condition, ConditionOptions, condition_options};
use crate::error::ConditionError;
use crate::result::ConditionResult;

/// How [`BooleanLogic`] combines its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LogicOperator {
    /// Every evaluated child must succeed.
    #[default]
    And,
    /// At least one evaluated child must succeed.
    Or,
}

/// Combines child conditions.
///
/// Children that cannot be evaluated are left out. If none remain, the
/// combination cannot be evaluated either. Evaluation stops at the first
/// child that decides the outcome.
#[derive(Debug)]
pub struct BooleanLogic {
    operator: LogicOperator,
    conditions: Vec<Box<dyn Condition>>,
    options: ConditionOptions,
}

impl BooleanLogic {
    pub fn new(operator: LogicOperator) -> Self {
        Self {
            operator,
            conditions: Vec::new(),
            options: ConditionOptions::default(),
        }
    }

    #[must_use]
    pub fn and() -> Self {
        Self::new(LogicOperator::And)
    }

    #[must_use]
    pub fn or() -> Self {
        Self::new(LogicOperator::Or)
    }

    /// Adds a child.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, condition: impl Condition + 'static) -> Self {
        self.conditions.push(Box::new(condition));
        self
    }

    pub fn push(&mut self, condition: Box<dyn Condition>) {
        self.conditions.push(condition);
    }

    #[must_use]
    pub fn operator(&self) -> LogicOperator {
        self.operator
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.conditions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl Condition for BooleanLogic {
    fn name(&self) -> &'static str {
        "BooleanLogic"
    }

    fn options(&self) -> &ConditionOptions {
        &self.options
    }

    fn can_evaluate(&self) -> bool {
        !self.conditions.is_empty()
    }

    fn evaluate_rule(&self) -> Result<ConditionResult, ConditionError> {
        // the result that ends the loop early
        let decisive = match self.operator {
            LogicOperator::And => ConditionResult::Failed,
            LogicOperator::Or => ConditionResult::Success,
        };
        let mut evaluated = false;
        for condition in &self.conditions {
            match condition.evaluate()? {
                ConditionResult::CannotEvaluate => {}
                result if result == decisive => return Ok(decisive),
                _ => evaluated = true,
            }
        }
        Ok(if evaluated {
            decisive.invert()
        } else {
            ConditionResult::CannotEvaluate
        })
    }
}

condition_options!(BooleanLogic);
