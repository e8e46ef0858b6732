//! Core data model for the chroma settings store.
//!
//! A [`Store`] is a flat, insertion-ordered namespace of named, typed
//! values. Type behavior is dispatched through a shared [`Registry`] of
//! [`Handler`]s, one per value type, so the set of storable types is
//! decided by the application at startup rather than baked into the
//! store. An entry may be a scalar, a list of same-typed values, or a
//! whole nested [`Store`], which is how the settings tree of the color
//! manager is composed.
//!
//! Persistence lives in the `chroma-serde` crate; this crate only
//! defines the in-memory model and its typed accessors.
//!
//! ```
//! use chroma_store::{Registry, Store};
//!
//! let mut store = Store::new(Registry::with_defaults());
//! store.set_i32("zoom", 120)?;
//! store.set_bool("imprecision_postfix", true)?;
//!
//! assert_eq!(store.get_i32("zoom"), Some(120));
//! assert_eq!(store.get_bool_or("imprecision_postfix", false), true);
//! assert_eq!(store.get_i32("missing"), None);
//! # Ok::<(), chroma_store::StoreError>(())
//! ```

pub mod error;
pub mod handler;
pub mod registry;
pub mod store;
pub mod value;
pub mod variable;

pub use error::StoreError;
pub use handler::Handler;
pub use registry::{Registry, RegistryBuilder, STORE_TYPE};
pub use store::Store;
pub use value::{Color, Value};
pub use variable::Variable;
