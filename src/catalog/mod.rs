//! Catalog document and node type definitions
//!
//! The upstream catalog is a single JSON object whose top-level keys are
//! collection names ("modules", "learningPaths", ...) each holding an array of
//! raw records. [`NodeType`] names the nine record kinds the pipeline knows
//! about and maps each one to its collection.

pub mod fetcher;

pub use fetcher::{CatalogSource, FetchError, LearnClient, DEFAULT_ENDPOINT};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The raw catalog payload: collection name to array of records
///
/// Only lives between fetch (or cache read) and normalization.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CatalogDocument(Map<String, Value>);

impl CatalogDocument {
    pub fn new(collections: Map<String, Value>) -> Self {
        Self(collections)
    }

    /// Looks up a top-level collection by name
    pub fn collection(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Number of top-level collections
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The record kinds sourced from the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    Certification,
    LearningPath,
    Module,
    Unit,
    Exam,
    Course,
    Level,
    Role,
    Product,
}

impl NodeType {
    /// Every node type, in the order collections are normalized
    pub const ALL: [NodeType; 9] = [
        NodeType::Certification,
        NodeType::LearningPath,
        NodeType::Module,
        NodeType::Unit,
        NodeType::Exam,
        NodeType::Course,
        NodeType::Level,
        NodeType::Role,
        NodeType::Product,
    ];

    /// Type tag carried on every node of this type
    pub fn type_name(self) -> &'static str {
        match self {
            NodeType::Certification => "certification",
            NodeType::LearningPath => "learningPath",
            NodeType::Module => "module",
            NodeType::Unit => "unit",
            NodeType::Exam => "exam",
            NodeType::Course => "course",
            NodeType::Level => "level",
            NodeType::Role => "role",
            NodeType::Product => "product",
        }
    }

    /// Key of this type's collection in the catalog document
    pub fn collection_name(self) -> &'static str {
        match self {
            NodeType::Certification => "certifications",
            NodeType::LearningPath => "learningPaths",
            NodeType::Module => "modules",
            NodeType::Unit => "units",
            NodeType::Exam => "exams",
            NodeType::Course => "courses",
            NodeType::Level => "levels",
            NodeType::Role => "roles",
            NodeType::Product => "products",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

impl FromStr for NodeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NodeType::ALL
            .into_iter()
            .find(|t| t.type_name() == s)
            .ok_or_else(|| format!("unknown node type '{}'", s))
    }
}
