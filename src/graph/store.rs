//! In-process node store

use serde_json::Value;
use std::collections::HashMap;

use super::{resolve_id_value, Cardinality, LinkDeclaration, Node, NodeStore};
use crate::catalog::NodeType;

/// Keeps nodes in memory and resolves declared links on demand
#[derive(Debug, Default)]
pub struct MemoryNodeStore {
    nodes: HashMap<String, Node>,
    /// Node ids in first-insertion order
    order: Vec<String>,
    links: Vec<LinkDeclaration>,
}

impl MemoryNodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// All nodes in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.order.iter().filter_map(|id| self.nodes.get(id))
    }

    pub fn nodes_of_type(&self, node_type: NodeType) -> impl Iterator<Item = &Node> {
        self.nodes().filter(move |n| n.node_type == node_type)
    }

    /// Declared links, without duplicates
    pub fn links(&self) -> &[LinkDeclaration] {
        &self.links
    }

    /// Follows the link declared for `field` on the node `node_id`
    ///
    /// Returns nothing when the node, the declaration or the field is missing.
    /// Ids that do not resolve to a node of the declared target type are skipped.
    pub fn resolve(&self, node_id: &str, field: &str) -> Vec<&Node> {
        let Some(node) = self.nodes.get(node_id) else {
            return Vec::new();
        };
        let Some(decl) = self
            .links
            .iter()
            .find(|l| l.owner == node.node_type && l.field == field)
        else {
            return Vec::new();
        };

        let ids: Vec<String> = match (decl.cardinality, node.fields.get(field)) {
            (_, None) | (_, Some(Value::Null)) => Vec::new(),
            (Cardinality::Many, Some(Value::Array(items))) => {
                items.iter().filter_map(resolve_id_value).collect()
            }
            (_, Some(value)) => resolve_id_value(value).into_iter().collect(),
        };

        ids.iter()
            .filter_map(|id| self.nodes.get(id))
            .filter(|target| target.node_type == decl.target)
            .collect()
    }
}

impl NodeStore for MemoryNodeStore {
    fn declare_schema(&mut self, links: &'static [LinkDeclaration]) {
        for decl in links {
            if !self.links.contains(decl) {
                self.links.push(*decl);
            }
        }
    }

    fn create_node(&mut self, node: Node) {
        if self.nodes.contains_key(&node.id) {
            tracing::debug!(id = %node.id, "replacing existing node");
        } else {
            self.order.push(node.id.clone());
        }
        self.nodes.insert(node.id.clone(), node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogDocument;
    use crate::graph::{normalize, LINKS};
    use serde_json::json;

    fn populated_store() -> MemoryNodeStore {
        let doc: CatalogDocument = serde_json::from_value(json!({
            "certifications": [{ "uid": "cert-az900", "levels": ["beginner"] }],
            "learningPaths": [],
            "modules": [{ "uid": "m1", "units": ["u1", "u2", "missing"], "levels": ["beginner"] }],
            "units": [{ "uid": "u1" }, { "uid": "u2" }],
            "exams": [{ "uid": "exam-az900", "certification": "cert-az900" }],
            "courses": [{ "uid": "course-az900", "exam": "exam-az900", "roles": ["m1"] }],
            "levels": [{ "id": "beginner" }],
            "roles": [],
            "products": []
        }))
        .unwrap();

        let mut store = MemoryNodeStore::new();
        store.declare_schema(&LINKS);
        for node in normalize(&doc).unwrap() {
            store.create_node(node);
        }
        store
    }

    #[test]
    fn test_declare_schema_is_idempotent() {
        let mut store = MemoryNodeStore::new();
        store.declare_schema(&LINKS);
        store.declare_schema(&LINKS);
        assert_eq!(store.links().len(), LINKS.len());
    }

    #[test]
    fn test_resolve_many_skips_dangling_ids() {
        let store = populated_store();
        let units: Vec<_> = store.resolve("m1", "units").iter().map(|n| n.id.as_str()).collect();
        assert_eq!(units, vec!["u1", "u2"]);
    }

    #[test]
    fn test_resolve_course_exam_certification() {
        let store = populated_store();

        let exam = store.resolve("course-az900", "exam");
        assert_eq!(exam.len(), 1);
        assert_eq!(exam[0].id, "exam-az900");

        let cert = store.resolve(&exam[0].id, "certification");
        assert_eq!(cert.len(), 1);
        assert_eq!(cert[0].node_type, NodeType::Certification);
    }

    #[test]
    fn test_resolve_skips_wrong_target_type() {
        let store = populated_store();
        // "m1" exists but is a module, not a role
        assert!(store.resolve("course-az900", "roles").is_empty());
    }

    #[test]
    fn test_resolve_undeclared_field() {
        let store = populated_store();
        assert!(store.resolve("m1", "title").is_empty());
        assert!(store.resolve("nope", "units").is_empty());
    }

    #[test]
    fn test_nodes_of_type_and_order() {
        let store = populated_store();
        assert_eq!(store.len(), 7);
        let ids: Vec<_> = store.nodes_of_type(NodeType::Unit).map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["u1", "u2"]);
        assert_eq!(store.nodes().next().map(|n| n.id.as_str()), Some("cert-az900"));
    }

    #[test]
    fn test_create_node_replaces_on_same_id() {
        let mut store = populated_store();
        let mut node = store.node("u1").cloned().unwrap();
        node.content_digest = "changed".to_string();
        store.create_node(node);

        assert_eq!(store.len(), 7);
        assert_eq!(store.node("u1").unwrap().content_digest, "changed");
    }
}
