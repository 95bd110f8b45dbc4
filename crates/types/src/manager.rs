//! The `TypeManager` contract
//!
//! Every concrete manager implements a small set of hooks; the public
//! conversion operations are provided methods that route through those hooks
//! so null handling and the final [`review_value`](TypeManager::review_value)
//! check happen the same way for every type.
//!
//! ```text
//!   "1,234" ──parse──▶ Integer(1234) ──review_value──▶ Integer(1234)
//!   Float(2.0) ──accept_native──▶ Integer(2) ──review_value──▶ Integer(2)
//! ```

use std::cmp::Ordering;
use std::fmt;

use formtype_culture::CultureInfo;

use crate::{ConfigError, InputError, TypeResult, Value};

// ============================================================================
// TYPE MANAGER
// ============================================================================

/// Converter, comparer and validator bound to one native data kind.
///
/// Implementations are immutable after construction and may be shared
/// freely between conditions and calculations.
///
/// # Examples
///
/// ```rust
/// use formtype_types::prelude::*;
///
/// let integer = Integer::new(CultureInfo::en_us().into());
/// assert_eq!(integer.to_value_str("1,234").unwrap(), Value::Integer(1234));
/// assert_eq!(integer.to_text(&Value::Integer(-5)).unwrap(), "-5");
/// assert_eq!(integer.to_text_neutral(&Value::Integer(1234)).unwrap(), "1234");
/// ```
pub trait TypeManager: fmt::Debug + Send + Sync {
    /// Registry tag of the manager (`"Integer"`, `"Email"`, ...).
    fn name(&self) -> &'static str;

    /// Kind of native value produced (`"integer"`, `"date"`, ...).
    fn data_type_name(&self) -> &'static str;

    /// Culture used for display strings.
    fn culture(&self) -> &CultureInfo;

    // ------------------------------------------------------------------
    // Hooks
    // ------------------------------------------------------------------

    /// Converts non-empty, culture-formatted text into a native value.
    fn parse(&self, text: &str) -> TypeResult<Value>;

    /// Formats a reviewed, non-null native value for display.
    fn format(&self, value: &Value) -> TypeResult<String>;

    /// Converts non-empty culture-neutral text into a native value.
    fn parse_neutral(&self, text: &str) -> TypeResult<Value>;

    /// Formats a reviewed, non-null native value in the neutral format.
    fn format_neutral(&self, value: &Value) -> TypeResult<String>;

    /// Normalizes a native value handed in directly (for example a whole
    /// `Float` given to the integer manager). Wrong kinds are a
    /// [`ConfigError::TypeMismatch`].
    fn accept_native(&self, value: Value) -> TypeResult<Value>;

    /// Final range and shape check run by every conversion path.
    fn review_value(&self, value: Value) -> TypeResult<Value> {
        Ok(value)
    }

    /// Whether a single character may appear in input. Used for live input
    /// filtering.
    fn is_valid_char(&self, ch: char) -> bool;

    /// Orders two reviewed, non-null native values.
    fn compare_native(&self, a: &Value, b: &Value) -> Ordering;

    /// Best-effort numeric projection; `None` when not meaningful.
    fn to_number(&self, value: &Value) -> Option<f64> {
        let _ = value;
        None
    }

    // ------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------

    /// Converts text or an already-native value into a reviewed native
    /// value. Empty text yields [`Value::Null`].
    fn to_value(&self, input: &Value) -> TypeResult<Value> {
        match input {
            Value::Null => Ok(Value::Null),
            Value::String(text) => self.to_value_str(text),
            other => {
                let native = self.accept_native(other.clone())?;
                if native.is_null() {
                    return Ok(Value::Null);
                }
                self.review_value(native)
            }
        }
    }

    /// Converts culture-formatted text into a reviewed native value.
    fn to_value_str(&self, text: &str) -> TypeResult<Value> {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        let native = self.parse(text)?;
        if native.is_null() {
            return Ok(Value::Null);
        }
        self.review_value(native)
    }

    /// Formats a value for display. Null yields an empty string.
    fn to_text(&self, value: &Value) -> TypeResult<String> {
        let native = self.to_value(value)?;
        if native.is_null() {
            return Ok(String::new());
        }
        self.format(&native)
    }

    /// Converts culture-neutral text into a reviewed native value.
    fn to_value_neutral(&self, text: &str) -> TypeResult<Value> {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        let native = self.parse_neutral(text.trim())?;
        if native.is_null() {
            return Ok(Value::Null);
        }
        self.review_value(native)
    }

    /// Formats a value in the culture-neutral storage format.
    fn to_text_neutral(&self, value: &Value) -> TypeResult<String> {
        let native = self.to_value(value)?;
        if native.is_null() {
            return Ok(String::new());
        }
        self.format_neutral(&native)
    }

    /// Compares two values of any form [`to_value`](Self::to_value)
    /// accepts. A null operand is an input error.
    fn compare(&self, a: &Value, b: &Value) -> TypeResult<Ordering> {
        let a = self.to_value(a)?;
        let b = self.to_value(b)?;
        if a.is_null() || b.is_null() {
            return Err(InputError::new("null_value", "Cannot compare a null value").into());
        }
        Ok(self.compare_native(&a, &b))
    }

    /// Returns true if the text converts without an input error.
    fn is_valid(&self, text: &str) -> TypeResult<bool> {
        match self.to_value_str(text) {
            Ok(_) => Ok(true),
            Err(crate::TypeError::Input(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

/// Builds the type mismatch error for `accept_native` implementations.
pub(crate) fn mismatch(expected: &str, actual: &Value) -> crate::TypeError {
    ConfigError::TypeMismatch {
        expected: expected.to_string(),
        actual: actual.kind_name().to_string(),
    }
    .into()
}
