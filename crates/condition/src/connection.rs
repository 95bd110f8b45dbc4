//! Connections: the bridge between a condition and a form field
//!
//! A condition never reads a widget directly. It asks a [`Connection`] for
//! the field's text, whether it is empty, and optionally for the type
//! manager attached to the field. Hosts implement the trait over their own
//! widgets; [`MemoryConnection`] keeps the value in memory.

use std::fmt;
use std::sync::Arc;

use formtype_types::{TypeManager, TypeResult, Value};
use parking_lot::RwLock;

/// Read access to one form field.
pub trait Connection: fmt::Debug + Send + Sync {
    /// Identifier used in error messages and logs.
    fn id(&self) -> &str;

    /// Current text of the field.
    fn text_value(&self) -> String;

    /// Returns true when the field holds nothing. With `trim`, whitespace
    /// only counts as nothing.
    fn is_null_value(&self, trim: bool) -> bool {
        let text = self.text_value();
        if trim { text.trim().is_empty() } else { text.is_empty() }
    }

    /// Non-editable fields can be skipped by counting conditions.
    fn is_editable(&self) -> bool {
        true
    }

    /// Type manager attached to the field, if any.
    fn type_manager(&self) -> Option<Arc<dyn TypeManager>> {
        None
    }

    /// Converts the field's content with `manager`.
    fn typed_value(&self, manager: &dyn TypeManager) -> TypeResult<Value> {
        manager.to_value_str(&self.text_value())
    }

    /// Number of selected items for list-like fields.
    fn selection_count(&self) -> Option<usize> {
        None
    }
}

// ============================================================================
// MEMORY CONNECTION
// ============================================================================

/// A connection whose content lives in memory.
///
/// The content may be text, as typed by a user, or an already-native
/// value. It can be replaced through a shared reference, so one
/// `Arc<MemoryConnection>` can back several conditions while a host
/// updates it.
///
/// # Examples
///
/// ```rust
/// use formtype_condition::{Connection, MemoryConnection};
///
/// let name = MemoryConnection::new("name").with_text("  ");
/// assert!(name.is_null_value(true));
/// name.set_text("Ada");
/// assert_eq!(name.text_value(), "Ada");
/// ```
pub struct MemoryConnection {
    id: String,
    content: RwLock<Value>,
    editable: bool,
    manager: Option<Arc<dyn TypeManager>>,
    selections: Option<RwLock<usize>>,
}

impl MemoryConnection {
    /// Creates an empty, editable connection.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: RwLock::new(Value::Null),
            editable: true,
            manager: None,
            selections: None,
        }
    }

    /// Sets the initial text.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.set_text(text);
        self
    }

    /// Sets an initial native value.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_value(self, value: impl Into<Value>) -> Self {
        self.set_value(value);
        self
    }

    /// Attaches a type manager.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_type_manager(mut self, manager: Arc<dyn TypeManager>) -> Self {
        self.manager = Some(manager);
        self
    }

    /// Marks the field read-only.
    #[must_use = "builder methods must be chained or built"]
    pub fn read_only(mut self) -> Self {
        self.editable = false;
        self
    }

    /// Makes the field list-like with `count` selected items.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_selections(mut self, count: usize) -> Self {
        self.selections = Some(RwLock::new(count));
        self
    }

    /// Replaces the content with text.
    pub fn set_text(&self, text: impl Into<String>) {
        *self.content.write() = Value::String(text.into());
    }

    /// Replaces the content with a native value.
    pub fn set_value(&self, value: impl Into<Value>) {
        *self.content.write() = value.into();
    }

    /// Updates the selection count. Ignored unless the field is list-like.
    pub fn set_selections(&self, count: usize) {
        if let Some(selections) = &self.selections {
            *selections.write() = count;
        }
    }

    /// Snapshot of the current content.
    #[must_use]
    pub fn value(&self) -> Value {
        self.content.read().clone()
    }
}

impl fmt::Debug for MemoryConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryConnection")
            .field("id", &self.id)
            .field("content", &*self.content.read())
            .field("editable", &self.editable)
            .field("manager", &self.manager.as_ref().map(|m| m.name()))
            .finish_non_exhaustive()
    }
}

impl Connection for MemoryConnection {
    fn id(&self) -> &str {
        &self.id
    }

    fn text_value(&self) -> String {
        match &*self.content.read() {
            Value::Null => String::new(),
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    fn is_null_value(&self, trim: bool) -> bool {
        match &*self.content.read() {
            Value::Null => true,
            Value::String(text) if trim => text.trim().is_empty(),
            Value::String(text) => text.is_empty(),
            _ => false,
        }
    }

    fn is_editable(&self) -> bool {
        self.editable
    }

    fn type_manager(&self) -> Option<Arc<dyn TypeManager>> {
        self.manager.clone()
    }

    fn typed_value(&self, manager: &dyn TypeManager) -> TypeResult<Value> {
        manager.to_value(&self.content.read())
    }

    fn selection_count(&self) -> Option<usize> {
        self.selections.as_ref().map(|count| *count.read())
    }
}
