//! Reading numbers from form fields

use std::sync::Arc;

use formtype_condition::Connection;
use formtype_types::{TypeError, TypeManager, Value};
use tracing::trace;

use crate::error::CalcError;
use crate::item::{CalcItem, NaN, Number};
use crate::value::CalcValue;

/// The numeric value of a field.
///
/// The field's text is converted by its type manager and turned into a
/// number with [`TypeManager::to_number`]. An empty field evaluates the
/// `value_when_null` node (zero unless changed); text the manager rejects
/// evaluates `value_when_invalid` (NaN unless changed).
///
/// ```rust
/// use std::sync::Arc;
/// use formtype_calc::{CalcItem, CalcValue, Element, Null};
/// use formtype_condition::MemoryConnection;
/// use formtype_types::prelude::*;
///
/// let price = Arc::new(MemoryConnection::new("price").with_text("$12.50"));
/// let element = Element::new(price.clone())
///     .with_type_manager(Arc::new(Currency::new(CultureInfo::en_us().into())))
///     .when_null(Null);
/// assert_eq!(element.evaluate().unwrap(), CalcValue::Number(12.5));
/// price.set_text("");
/// assert_eq!(element.evaluate().unwrap(), CalcValue::Null);
/// ```
#[derive(Debug)]
pub struct Element {
    connection: Arc<dyn Connection>,
    manager: Option<Arc<dyn TypeManager>>,
    value_when_null: Box<dyn CalcItem>,
    value_when_invalid: Box<dyn CalcItem>,
}

impl Element {
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self {
            connection,
            manager: None,
            value_when_null: Box::new(Number(0.0)),
            value_when_invalid: Box::new(NaN),
        }
    }

    /// Uses `manager` instead of the connection's.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_type_manager(mut self, manager: Arc<dyn TypeManager>) -> Self {
        self.manager = Some(manager);
        self
    }

    /// Node evaluated when the field is empty.
    #[must_use = "builder methods must be chained or built"]
    pub fn when_null(mut self, item: impl CalcItem + 'static) -> Self {
        self.value_when_null = Box::new(item);
        self
    }

    /// Node evaluated when the field's text does not convert.
    #[must_use = "builder methods must be chained or built"]
    pub fn when_invalid(mut self, item: impl CalcItem + 'static) -> Self {
        self.value_when_invalid = Box::new(item);
        self
    }

    fn manager(&self) -> Result<Arc<dyn TypeManager>, CalcError> {
        self.manager
            .clone()
            .or_else(|| self.connection.type_manager())
            .ok_or_else(|| CalcError::MissingTypeManager {
                connection: self.connection.id().to_owned(),
            })
    }
}

impl CalcItem for Element {
    fn evaluate(&self) -> Result<CalcValue, CalcError> {
        let manager = self.manager()?;
        if self.connection.is_null_value(true) {
            return self.value_when_null.evaluate();
        }
        let value = match self.connection.typed_value(manager.as_ref()) {
            Ok(Value::Null) => return self.value_when_null.evaluate(),
            Ok(value) => value,
            Err(TypeError::Input(e)) => {
                trace!(connection = self.connection.id(), code = %e.code, "input rejected");
                return self.value_when_invalid.evaluate();
            }
            Err(TypeError::Config(e)) => return Err(e.into()),
        };
        manager
            .to_number(&value)
            .map(CalcValue::number)
            .ok_or_else(|| CalcError::NotNumeric {
                manager: manager.name().to_owned(),
            })
    }
}
