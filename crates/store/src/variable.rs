//! A named, typed value or list of values.

use std::fmt;
use std::sync::Arc;

use crate::handler::Handler;
use crate::value::Value;

/// One named entry of a [`Store`](crate::Store): a chain of one or
/// more payloads sharing a name and a handler.
///
/// A chain of length 1 is a scalar; length 2 or more is a list. The
/// serialized form preserves that distinction with a `list="true"`
/// marker, so a one-element chain always comes back as a scalar.
#[derive(Clone)]
pub struct Variable {
    name: String,
    handler: Arc<dyn Handler>,
    no_save: bool,
    values: Vec<Value>,
}

impl Variable {
    pub(crate) fn new(name: &str, handler: Arc<dyn Handler>, values: Vec<Value>) -> Self {
        Self {
            name: name.to_string(),
            handler,
            no_save: false,
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handler(&self) -> &Arc<dyn Handler> {
        &self.handler
    }

    /// Entries flagged `no_save` stay in memory but never reach the
    /// serialized form.
    pub fn no_save(&self) -> bool {
        self.no_save
    }

    pub fn set_no_save(&mut self, no_save: bool) {
        self.no_save = no_save;
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    /// Mutable view of the chain.
    ///
    /// Callers must keep every payload consistent with the variable's
    /// handler; typed access through [`Store`](crate::Store) is the
    /// safer path.
    pub fn values_mut(&mut self) -> &mut [Value] {
        &mut self.values
    }

    /// Appends a payload to the chain, turning a scalar into a list.
    pub fn push(&mut self, value: Value) {
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn is_list(&self) -> bool {
        self.values.len() >= 2
    }

    pub(crate) fn reset(&mut self, values: Vec<Value>) {
        self.values = values;
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("name", &self.name)
            .field("type", &self.handler.name())
            .field("no_save", &self.no_save)
            .field("values", &self.values)
            .finish()
    }
}

/// Observational equality: same name, type, flags and payloads. The
/// handler itself is compared by name only.
impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.handler.name() == other.handler.name()
            && self.no_save == other.no_save
            && self.values == other.values
    }
}
