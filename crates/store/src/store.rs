//! The store proper: an insertion-ordered namespace of variable chains.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::StoreError;
use crate::handler::Handler;
use crate::registry::{Registry, STORE_TYPE};
use crate::value::{Color, Value};
use crate::variable::Variable;

/// A flat namespace of named, typed values, possibly containing nested
/// stores.
///
/// Iteration follows insertion order, which is also the order of the
/// serialized form. A store holds a shared handle to its [`Registry`];
/// nested stores created through it share that same handle.
///
/// Stores are plain owned data: duplicating one is `Clone`, dropping
/// one releases its whole subtree. Nothing here is synchronized, so
/// concurrent mutation needs external exclusion.
#[derive(Clone)]
pub struct Store {
    registry: Arc<Registry>,
    variables: Vec<Variable>,
    index: HashMap<String, usize>,
}

impl Store {
    /// Creates an empty store bound to `registry`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            variables: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// The registry this store resolves type names against.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates over all chains in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.iter()
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.index.get(name).map(|&i| &self.variables[i])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        let i = *self.index.get(name)?;
        Some(&mut self.variables[i])
    }

    /// Creates a new chain head with a default-constructed payload.
    ///
    /// Fails if a chain with this name already exists or the name
    /// cannot appear as an XML element name.
    pub fn add_empty(
        &mut self,
        handler: &Arc<dyn Handler>,
        name: &str,
    ) -> Result<&mut Variable, StoreError> {
        validate_name(name)?;
        if self.index.contains_key(name) {
            return Err(StoreError::DuplicateName {
                name: name.to_string(),
            });
        }
        let value = handler.construct(&self.registry);
        let i = self.variables.len();
        self.index.insert(name.to_string(), i);
        self.variables
            .push(Variable::new(name, handler.clone(), vec![value]));
        Ok(&mut self.variables[i])
    }

    /// Removes the whole chain for `name`. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(i) = self.index.remove(name) else {
            return false;
        };
        self.variables.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        true
    }

    /// Flags or unflags an entry as excluded from serialization.
    /// Returns whether the entry existed.
    pub fn set_no_save(&mut self, name: &str, no_save: bool) -> bool {
        match self.get_mut(name) {
            Some(variable) => {
                variable.set_no_save(no_save);
                true
            }
            None => false,
        }
    }

    fn head(&self, name: &str) -> Option<&Value> {
        self.get(name)?.values().first()
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.head(name)?.as_bool()
    }

    pub fn get_bool_or(&self, name: &str, default: bool) -> bool {
        self.get_bool(name).unwrap_or(default)
    }

    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.head(name)?.as_i32()
    }

    pub fn get_i32_or(&self, name: &str, default: i32) -> i32 {
        self.get_i32(name).unwrap_or(default)
    }

    pub fn get_f32(&self, name: &str) -> Option<f32> {
        self.head(name)?.as_f32()
    }

    pub fn get_f32_or(&self, name: &str, default: f32) -> f32 {
        self.get_f32(name).unwrap_or(default)
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.head(name)?.as_str()
    }

    pub fn get_str_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get_str(name).unwrap_or(default)
    }

    pub fn get_color(&self, name: &str) -> Option<Color> {
        self.head(name)?.as_color()
    }

    pub fn get_color_or(&self, name: &str, default: Color) -> Color {
        self.get_color(name).unwrap_or(default)
    }

    /// The nested store under `name`, if present and store-typed.
    pub fn get_store(&self, name: &str) -> Option<&Store> {
        self.head(name)?.as_store()
    }

    pub fn get_store_mut(&mut self, name: &str) -> Option<&mut Store> {
        self.get_mut(name)?.values_mut().first_mut()?.as_store_mut()
    }

    pub fn get_i32_list(&self, name: &str) -> Option<Vec<i32>> {
        self.get(name)?.values().iter().map(Value::as_i32).collect()
    }

    pub fn get_f32_list(&self, name: &str) -> Option<Vec<f32>> {
        self.get(name)?.values().iter().map(Value::as_f32).collect()
    }

    pub fn get_str_list(&self, name: &str) -> Option<Vec<&str>> {
        self.get(name)?.values().iter().map(Value::as_str).collect()
    }

    pub fn get_color_list(&self, name: &str) -> Option<Vec<Color>> {
        self.get(name)?
            .values()
            .iter()
            .map(Value::as_color)
            .collect()
    }

    pub fn set_bool(&mut self, name: &str, value: bool) -> Result<(), StoreError> {
        self.set_values("bool", name, vec![Value::Bool(value)])
    }

    pub fn set_i32(&mut self, name: &str, value: i32) -> Result<(), StoreError> {
        self.set_values("int32", name, vec![Value::Int(value)])
    }

    pub fn set_f32(&mut self, name: &str, value: f32) -> Result<(), StoreError> {
        self.set_values("float", name, vec![Value::Float(value)])
    }

    pub fn set_string(&mut self, name: &str, value: impl Into<String>) -> Result<(), StoreError> {
        self.set_values("string", name, vec![Value::String(value.into())])
    }

    pub fn set_color(&mut self, name: &str, value: Color) -> Result<(), StoreError> {
        self.set_values("color", name, vec![Value::Color(value)])
    }

    /// Replaces `name` with a list of integers. An empty list removes
    /// the entry, matching the serialized form where declared-empty
    /// lists do not exist.
    pub fn set_i32_list<I>(&mut self, name: &str, values: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = i32>,
    {
        self.set_values("int32", name, values.into_iter().map(Value::Int).collect())
    }

    pub fn set_f32_list<I>(&mut self, name: &str, values: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = f32>,
    {
        self.set_values(
            "float",
            name,
            values.into_iter().map(Value::Float).collect(),
        )
    }

    pub fn set_string_list<I>(&mut self, name: &str, values: I) -> Result<(), StoreError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.set_values(
            "string",
            name,
            values
                .into_iter()
                .map(|value| Value::String(value.into()))
                .collect(),
        )
    }

    pub fn set_color_list<I>(&mut self, name: &str, values: I) -> Result<(), StoreError>
    where
        I: IntoIterator<Item = Color>,
    {
        self.set_values(
            "color",
            name,
            values.into_iter().map(Value::Color).collect(),
        )
    }

    /// Returns the nested store under `name`, creating it if absent.
    pub fn get_or_create_store(&mut self, name: &str) -> Result<&mut Store, StoreError> {
        let i = match self.index.get(name).copied() {
            Some(i) => {
                let existing = self.variables[i].handler().name();
                if existing != STORE_TYPE {
                    return Err(StoreError::TypeMismatch {
                        name: name.to_string(),
                        existing: existing.to_string(),
                    });
                }
                i
            }
            None => {
                let handler =
                    self.registry
                        .lookup(STORE_TYPE)
                        .ok_or_else(|| StoreError::UnknownType {
                            type_name: STORE_TYPE.to_string(),
                        })?;
                self.add_empty(&handler, name)?;
                self.variables.len() - 1
            }
        };
        match self.variables[i].values_mut().first_mut() {
            Some(Value::Store(store)) => Ok(store),
            _ => Err(StoreError::TypeMismatch {
                name: name.to_string(),
                existing: STORE_TYPE.to_string(),
            }),
        }
    }

    fn set_values(
        &mut self,
        type_name: &str,
        name: &str,
        values: Vec<Value>,
    ) -> Result<(), StoreError> {
        if values.is_empty() {
            self.remove(name);
            return Ok(());
        }
        match self.index.get(name).copied() {
            Some(i) => {
                let variable = &mut self.variables[i];
                if variable.handler().name() != type_name {
                    return Err(StoreError::TypeMismatch {
                        name: name.to_string(),
                        existing: variable.handler().name().to_string(),
                    });
                }
                variable.reset(values);
                Ok(())
            }
            None => {
                let handler =
                    self.registry
                        .lookup(type_name)
                        .ok_or_else(|| StoreError::UnknownType {
                            type_name: type_name.to_string(),
                        })?;
                validate_name(name)?;
                self.index.insert(name.to_string(), self.variables.len());
                self.variables.push(Variable::new(name, handler, values));
                Ok(())
            }
        }
    }
}

/// Observational equality: same entries in the same order. The
/// registry handle is not compared.
impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        self.variables == other.variables
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.variables.iter()).finish()
    }
}

/// Names become XML element names, so they are restricted to what can
/// appear there: a letter or underscore first, then letters, digits,
/// `_`, `-` and `.`.
fn validate_name(name: &str) -> Result<(), StoreError> {
    let mut chars = name.chars();
    let valid_start = chars
        .next()
        .map(|c| c.is_alphabetic() || c == '_')
        .unwrap_or(false);
    let valid_rest = chars.all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(StoreError::InvalidName {
            name: name.to_string(),
        })
    }
}
