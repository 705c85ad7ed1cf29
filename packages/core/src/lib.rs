//! dotkey core: flat, delimiter-keyed views of nested structured data.
//!
//! A nested tree of maps, arrays, and scalars is flattened into a
//! [`FlatStore`] - a mapping from delimiter-joined leaf paths (e.g.
//! `"a.b.0.c"`) to scalar values - alongside a [`KeyIndex`] that maps
//! every key prefix to the full keys beneath it, so subtree lookups and
//! deletions never scan the whole container. The inverse rebuild, and a
//! last-writer-wins [`merge`] over several stores, complete the core.
//!
//! Stores are single-threaded by design: no operation suspends, blocks,
//! or takes locks.
//!
//! # Example
//!
//! ```rust
//! use dotkey_core::{Entry, FlatStore, Value};
//!
//! let mut store = FlatStore::new();
//! store.add("server.host", "localhost");
//! store.add("server.port", 8080);
//!
//! // Exact keys resolve to leaves, prefixes to owned sub-stores.
//! assert_eq!(store.get("server.host"), Some(Entry::Leaf(Value::from("localhost"))));
//! let server = store.get("server").unwrap().into_branch().unwrap();
//! assert_eq!(server.get("port"), Some(Entry::Leaf(Value::Integer(8080))));
//! ```

mod error;
mod flatten;
mod index;
mod merge;
mod store;
mod value;

pub use error::{Error, Result};
pub use flatten::{flatten, rebuild};
pub use index::KeyIndex;
pub use merge::merge;
pub use store::{Entry, FlatStore};
pub use value::Value;
