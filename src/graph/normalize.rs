//! Converts catalog collections into graph nodes
//!
//! Normalization is all-or-nothing: the first missing collection or bad record
//! fails the whole pass and no nodes are returned.

use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use thiserror::Error;

use super::Node;
use crate::catalog::{CatalogDocument, NodeType};

/// Errors that can occur while normalizing a catalog document
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NormalizationError {
    /// The document has no collection for a node type
    #[error("Catalog is missing the '{collection}' collection for {node_type} nodes")]
    MissingCollection {
        node_type: NodeType,
        collection: &'static str,
    },

    /// The collection exists but is not an array
    #[error("Catalog collection '{collection}' is not an array")]
    NotACollection { collection: &'static str },

    /// A collection element is not a JSON object
    #[error("Record {index} in '{collection}' is not an object")]
    MalformedRecord {
        collection: &'static str,
        index: usize,
    },

    /// A record has neither a usable `uid` nor `id`
    #[error("Record {index} of type {node_type} has no uid or id")]
    MissingIdentifier { node_type: NodeType, index: usize },
}

/// Resolves a record's node id: `uid` when present, else `id`
///
/// Only a missing or null `uid` falls back to `id`; a `uid` of any other
/// unusable type makes the record unidentifiable. String ids are used
/// verbatim, numeric ids in decimal form.
pub fn resolve_id(record: &Map<String, Value>) -> Option<String> {
    match record.get("uid") {
        None | Some(Value::Null) => record.get("id").and_then(resolve_id_value),
        Some(uid) => resolve_id_value(uid),
    }
}

/// Reads a single JSON value as a node id
pub(crate) fn resolve_id_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// SHA-256 of a record's JSON serialization, lowercase hex
pub fn content_digest(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Builds nodes for every record of every node type
///
/// Nodes come out in [`NodeType::ALL`] order, then in collection order.
pub fn normalize(doc: &CatalogDocument) -> Result<Vec<Node>, NormalizationError> {
    let mut nodes = Vec::new();

    for node_type in NodeType::ALL {
        let collection = node_type.collection_name();
        let records = doc
            .collection(collection)
            .ok_or(NormalizationError::MissingCollection {
                node_type,
                collection,
            })?
            .as_array()
            .ok_or(NormalizationError::NotACollection { collection })?;

        for (index, raw) in records.iter().enumerate() {
            let record = raw
                .as_object()
                .ok_or(NormalizationError::MalformedRecord { collection, index })?;
            nodes.push(build_node(node_type, index, record)?);
        }

        tracing::debug!(%node_type, count = records.len(), "normalized collection");
    }

    Ok(nodes)
}

fn build_node(
    node_type: NodeType,
    index: usize,
    record: &Map<String, Value>,
) -> Result<Node, NormalizationError> {
    let id = resolve_id(record).ok_or(NormalizationError::MissingIdentifier { node_type, index })?;
    // Serializing a map of JSON values cannot fail
    let content = Value::Object(record.clone()).to_string();
    let content_digest = content_digest(&content);

    Ok(Node {
        id,
        node_type,
        fields: record.clone(),
        content,
        content_digest,
        parent: None,
        children: Vec::new(),
    })
}
