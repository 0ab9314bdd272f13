//! Graph nodes built from catalog records
//!
//! [`normalize`] turns a catalog document into [`Node`]s, [`schema`] declares
//! which node fields link to other nodes by identifier, and [`NodeStore`] is
//! the boundary to whatever store keeps the nodes and resolves those links.

pub mod normalize;
pub mod schema;
mod store;

pub use normalize::{content_digest, normalize, resolve_id, NormalizationError};
pub(crate) use normalize::resolve_id_value;
pub use schema::{link, links_for, Cardinality, LinkDeclaration, LINKS};
pub use store::MemoryNodeStore;

use serde_json::{json, Map, Value};

use crate::catalog::NodeType;

/// One normalized catalog record
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Identifier, unique across every node type
    pub id: String,
    pub node_type: NodeType,
    /// The raw record, untouched
    pub fields: Map<String, Value>,
    /// JSON serialization of the raw record
    pub content: String,
    /// SHA-256 of `content`, lowercase hex
    pub content_digest: String,
    /// Always `None` on creation; tree ownership belongs to the node store
    pub parent: Option<String>,
    /// Always empty on creation
    pub children: Vec<String>,
}

impl Node {
    /// Renders the record handed to a node store
    ///
    /// Raw fields come first, then `id`, `parent`, `children` and `internal`
    /// overwrite any raw field of the same name.
    pub fn to_record(&self) -> Value {
        let mut record = self.fields.clone();
        record.insert("id".to_string(), Value::String(self.id.clone()));
        record.insert("parent".to_string(), json!(self.parent));
        record.insert("children".to_string(), json!(self.children));
        record.insert(
            "internal".to_string(),
            json!({
                "type": self.node_type.type_name(),
                "content": self.content,
                "contentDigest": self.content_digest,
            }),
        );
        Value::Object(record)
    }
}

/// The host store that receives nodes and the link schema
pub trait NodeStore {
    /// Registers link semantics; calling it again with the same table is a no-op
    fn declare_schema(&mut self, links: &'static [LinkDeclaration]);

    fn create_node(&mut self, node: Node);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_record_shape() {
        let mut fields = Map::new();
        fields.insert("uid".to_string(), json!("learn.m1"));
        fields.insert("id".to_string(), json!("raw-id"));
        fields.insert("title".to_string(), json!("X"));
        let node = Node {
            id: "learn.m1".to_string(),
            node_type: NodeType::Module,
            fields,
            content: "{}".to_string(),
            content_digest: "abc".to_string(),
            parent: None,
            children: Vec::new(),
        };

        let record = node.to_record();
        assert_eq!(record["id"], json!("learn.m1"));
        assert_eq!(record["uid"], json!("learn.m1"));
        assert_eq!(record["title"], json!("X"));
        assert_eq!(record["parent"], Value::Null);
        assert_eq!(record["children"], json!([]));
        assert_eq!(record["internal"]["type"], json!("module"));
        assert_eq!(record["internal"]["contentDigest"], json!("abc"));
        // The raw id survives in the node's own fields
        assert_eq!(node.fields["id"], json!("raw-id"));
    }
}
