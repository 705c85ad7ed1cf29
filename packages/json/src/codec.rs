//! The JSON text boundary for flat stores.
//!
//! Decoding and encoding are the only points where this workspace touches
//! a wire format; everything past this file works on `Value` trees and
//! flat keys.

use dotkey_core::{Error, FlatStore, Result};

use crate::convert::{value_from_json, value_into_json};

/// Build a store by decoding and flattening a JSON document.
///
/// # Errors
///
/// Malformed text surfaces as `Error::Decode`, wrapped from the
/// underlying decoder. A well-formed document whose root is a scalar
/// surfaces as `Error::InvalidInput` from the flattener; the two are
/// distinct and callers can match on them.
pub fn from_json(text: &str) -> Result<FlatStore> {
    log::debug!("Decoding {} bytes of JSON...", text.len());

    let json: serde_json::Value =
        serde_json::from_str(text).map_err(|e| Error::decode(e.to_string()))?;

    FlatStore::from_value(value_from_json(json))
}

/// Serialize a store's nested form to JSON text.
///
/// With `with_namespace` set, the configured namespace is rendered as the
/// outermost levels of the document.
///
/// # Errors
///
/// Encoding failures surface as `Error::Encode` rather than an empty
/// document, so callers can tell a failed encode from an empty store.
pub fn to_json(store: &FlatStore, with_namespace: bool) -> Result<String> {
    log::debug!("Encoding {} flat keys to JSON...", store.len());

    let nested = value_into_json(store.to_nested(with_namespace));
    serde_json::to_string(&nested).map_err(|e| Error::encode(e.to_string()))
}
