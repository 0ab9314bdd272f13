//! Link schema between node types
//!
//! Each [`LinkDeclaration`] says that a field on one node type holds the id (or
//! list of ids) of nodes of another type. The table is static and independent
//! of any fetched data; a node store consults it when resolving links.

use serde::Serialize;

use crate::catalog::NodeType;

/// How many nodes a link field points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    One,
    Many,
}

/// A field on `owner` nodes that references `target` nodes by id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LinkDeclaration {
    pub owner: NodeType,
    pub field: &'static str,
    pub target: NodeType,
    pub cardinality: Cardinality,
}

const fn many(owner: NodeType, field: &'static str, target: NodeType) -> LinkDeclaration {
    LinkDeclaration {
        owner,
        field,
        target,
        cardinality: Cardinality::Many,
    }
}

const fn one(owner: NodeType, field: &'static str, target: NodeType) -> LinkDeclaration {
    LinkDeclaration {
        owner,
        field,
        target,
        cardinality: Cardinality::One,
    }
}

use NodeType::*;

/// Every declared link
pub static LINKS: [LinkDeclaration; 22] = [
    many(Certification, "levels", Level),
    many(Certification, "roles", Role),
    many(Certification, "products", Product),
    many(Certification, "exams", Exam),
    many(Certification, "courses", Course),
    many(LearningPath, "levels", Level),
    many(LearningPath, "roles", Role),
    many(LearningPath, "products", Product),
    many(LearningPath, "modules", Module),
    many(Module, "levels", Level),
    many(Module, "roles", Role),
    many(Module, "products", Product),
    many(Module, "units", Unit),
    many(Exam, "levels", Level),
    many(Exam, "roles", Role),
    many(Exam, "products", Product),
    many(Exam, "courses", Course),
    one(Exam, "certification", Certification),
    many(Course, "levels", Level),
    many(Course, "roles", Role),
    many(Course, "products", Product),
    one(Course, "exam", Exam),
];

/// Links declared on one node type, in table order
pub fn links_for(owner: NodeType) -> impl Iterator<Item = &'static LinkDeclaration> {
    LINKS.iter().filter(move |l| l.owner == owner)
}

/// The link declared for `field` on `owner`, if any
pub fn link(owner: NodeType, field: &str) -> Option<&'static LinkDeclaration> {
    links_for(owner).find(|l| l.field == field)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_no_duplicate_fields_per_owner() {
        let pairs: HashSet<_> = LINKS.iter().map(|l| (l.owner, l.field)).collect();
        assert_eq!(pairs.len(), LINKS.len());
    }

    #[test]
    fn test_leaf_types_have_no_links() {
        for t in [Unit, Level, Role, Product] {
            assert_eq!(links_for(t).count(), 0, "{} should have no links", t);
        }
    }

    #[test]
    fn test_module_links_units() {
        let l = link(Module, "units").unwrap();
        assert_eq!(l.target, Unit);
        assert_eq!(l.cardinality, Cardinality::Many);
    }

    #[test]
    fn test_course_exam_certification_chain() {
        let exam = link(Course, "exam").unwrap();
        assert_eq!((exam.target, exam.cardinality), (Exam, Cardinality::One));

        let cert = link(exam.target, "certification").unwrap();
        assert_eq!((cert.target, cert.cardinality), (Certification, Cardinality::One));
    }

    #[test]
    fn test_unknown_field_has_no_link() {
        assert!(link(Module, "title").is_none());
        assert!(link(Unit, "units").is_none());
    }

    #[test]
    fn test_declaration_serializes() {
        let value = serde_json::to_value(link(LearningPath, "modules").unwrap()).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "owner": "learningPath",
                "field": "modules",
                "target": "module",
                "cardinality": "many",
            })
        );
    }
}
