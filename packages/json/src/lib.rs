//! JSON boundary for dotkey stores.
//!
//! Decode JSON text into an indexed [`FlatStore`](dotkey_core::FlatStore),
//! serialize a store back to text, and convert between `Value` trees,
//! `serde_json::Value`, and arbitrary serde types.

pub mod codec;
pub mod convert;

pub use codec::{from_json, to_json};
pub use convert::{from_value, to_value, value_from_json, value_into_json};
