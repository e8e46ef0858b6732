//! The shared catalog of type handlers.

use std::collections::HashMap;
use std::sync::Arc;

use crate::handler::{
    BoolHandler, ColorHandler, FloatHandler, Handler, Int32Handler, StoreHandler, StringHandler,
};

/// Conventional type name of the nested-store handler.
pub const STORE_TYPE: &str = "store";

/// Immutable catalog mapping a type name to its [`Handler`].
///
/// One registry is shared by a whole store tree: creating a nested
/// store clones the `Arc`, never the catalog, so type semantics are
/// identical at every nesting depth. The registry is built once at
/// application startup, before any store is created or parsed.
pub struct Registry {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl Registry {
    /// Starts an empty registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            handlers: HashMap::new(),
        }
    }

    /// A registry with the standard handler set: `bool`, `int32`,
    /// `float`, `string`, `color` and the nested-store handler.
    pub fn with_defaults() -> Arc<Self> {
        Self::builder()
            .register(BoolHandler)
            .register(Int32Handler)
            .register(FloatHandler)
            .register(StringHandler)
            .register(ColorHandler)
            .register(StoreHandler)
            .build()
    }

    /// Looks up a handler by exact type name.
    ///
    /// Absence is a normal outcome: settings written by another version
    /// of the application may carry types this build does not know.
    pub fn lookup(&self, name: &str) -> Option<Arc<dyn Handler>> {
        self.handlers.get(name).cloned()
    }

    /// Whether `handler` is the nested-store handler.
    pub fn is_store_handler(handler: &dyn Handler) -> bool {
        handler.name() == STORE_TYPE
    }
}

/// Builder for a [`Registry`].
pub struct RegistryBuilder {
    handlers: HashMap<String, Arc<dyn Handler>>,
}

impl RegistryBuilder {
    /// Registers a handler under its own name. A later registration
    /// with the same name replaces the earlier one.
    pub fn register<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers
            .insert(handler.name().to_string(), Arc::new(handler));
        self
    }

    pub fn build(self) -> Arc<Registry> {
        Arc::new(Registry {
            handlers: self.handlers,
        })
    }
}
