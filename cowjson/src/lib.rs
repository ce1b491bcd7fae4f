//! An in-memory JSON value engine with copy-on-write sharing.
//!
//! A [`Json`] handle owns a reference-counted node. Cloning a handle is
//! cheap and shares the node; the first mutation through either handle
//! copies the node, so holders never observe each other's changes. Nodes
//! are recycled through a per-thread pool and object keys are interned
//! per thread.
//!
//! ```
//! use cowjson::Json;
//!
//! let mut config = Json::parse(r#"{"retries": 3}"#)?;
//! let snapshot = config.clone();
//!
//! config.insert("retries", 5)?;
//! assert_eq!(config.field("retries")?.as_f64()?, 5.0);
//! assert_eq!(snapshot.field("retries")?.as_f64()?, 3.0);
//! # Ok::<(), cowjson::JsonError>(())
//! ```

mod convert;
mod error;
mod intern;
mod iter;
mod map;
mod node;
mod parse;
mod pool;
mod stringify;
mod value;

pub use convert::FromJson;
pub use error::{JsonError, JsonType};
pub use iter::{Entries, EntriesMut};
pub use map::JsonMap;
pub use value::Json;

/// Result type used throughout this crate.
pub type Result<T, E = JsonError> = std::result::Result<T, E>;
