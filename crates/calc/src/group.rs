//! Arithmetic over a sequence of nodes

use tracing::trace;

use crate::error::CalcError;
use crate::item::CalcItem;
use crate::value::{CalcValue, Operator};

/// Members joined by operators, evaluated strictly left to right.
///
/// `Null` members are skipped and any `NaN` member makes the whole group
/// `NaN`. A group whose members are all `Null` is `Null`. The first
/// number starts the total; a leading subtraction negates it.
///
/// ```rust
/// use formtype_calc::{CalcItem, CalcValue, Group, Null, Number};
///
/// // 2 + 3 * 4, left to right
/// let group = Group::new()
///     .plus(Number(2.0))
///     .plus(Number(3.0))
///     .times(Number(4.0))
///     .plus(Null);
/// assert_eq!(group.evaluate().unwrap(), CalcValue::Number(20.0));
/// ```
#[derive(Debug, Default)]
pub struct Group {
    members: Vec<(Operator, Box<dyn CalcItem>)>,
}

impl Group {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `item` joined by `operator`.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, operator: Operator, item: impl CalcItem + 'static) -> Self {
        self.members.push((operator, Box::new(item)));
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn plus(self, item: impl CalcItem + 'static) -> Self {
        self.with(Operator::Add, item)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn minus(self, item: impl CalcItem + 'static) -> Self {
        self.with(Operator::Subtract, item)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn times(self, item: impl CalcItem + 'static) -> Self {
        self.with(Operator::Multiply, item)
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn divided_by(self, item: impl CalcItem + 'static) -> Self {
        self.with(Operator::Divide, item)
    }

    pub fn push(&mut self, operator: Operator, item: Box<dyn CalcItem>) {
        self.members.push((operator, item));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl CalcItem for Group {
    fn evaluate(&self) -> Result<CalcValue, CalcError> {
        let mut total: Option<f64> = None;
        for (operator, item) in &self.members {
            let n = match item.evaluate()? {
                CalcValue::Null => continue,
                CalcValue::NaN => return Ok(CalcValue::NaN),
                CalcValue::Number(n) => n,
            };
            let next = match total {
                None if *operator == Operator::Subtract => CalcValue::number(-n),
                None => CalcValue::Number(n),
                Some(left) => operator.apply(left, n),
            };
            match next {
                CalcValue::Number(n) => total = Some(n),
                _ => {
                    trace!(%operator, "group arithmetic produced NaN");
                    return Ok(CalcValue::NaN);
                }
            }
        }
        Ok(total.into())
    }
}
