//! # mesh-types
//!
//! Type definitions for MeSH (Medical Subject Headings) descriptor data.
//!
//! This crate provides Rust type definitions for concept records parsed from
//! the MeSH ASCII descriptor format, the top-level category table that roots
//! the MeSH trees, and helpers for working with tree positions.
//!
//! ## Features
//!
//! - `serde` (default): Enables serialization/deserialization support via serde.
//!   Disable this feature for zero-dependency usage.
//!
//! ## Usage
//!
//! ```rust
//! use mesh_types::{tree, CategoryTable, ConceptRecord};
//!
//! let record = ConceptRecord {
//!     id: "D000001".to_string(),
//!     name: "Calcimycin".to_string(),
//!     synonyms: vec!["A-23187".to_string()],
//!     tree_positions: vec!["D03.633.100.221.173".to_string()],
//! };
//! assert_eq!(record.synonyms, ["A-23187"]);
//!
//! // Tree positions locate a concept; their parent is found by truncation.
//! assert_eq!(tree::parent_position("D03.633.100"), Some("D03.633"));
//! assert_eq!(tree::top_level_code("D03"), Some("D"));
//!
//! // The sixteen MeSH categories root every tree.
//! let categories = CategoryTable::mesh_default();
//! assert_eq!(categories.len(), 16);
//! assert_eq!(categories.name_of('C'), Some("Diseases"));
//! ```

#![warn(missing_docs)]

mod category;
mod concept;
pub mod tree;
pub mod well_known;

// Re-export all public types at crate root
pub use category::{CategoryTable, TopLevelCategory};
pub use concept::ConceptRecord;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_types_are_exported() {
        let category = TopLevelCategory::new('A', "Anatomy");
        let record = ConceptRecord::from_category(&category);
        assert_eq!(record.id, "A");
        let _table = CategoryTable::mesh_default();
    }

    #[test]
    fn test_well_known_accessible() {
        assert_eq!(well_known::RECORD_SEPARATOR, "*NEWRECORD");
        assert_eq!(well_known::FIELD_SEPARATOR, " = ");
        assert_eq!(well_known::UNIQUE_ID, "UI");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_roundtrip() {
        let record = ConceptRecord {
            id: "D000123".to_string(),
            name: "Example Concept".to_string(),
            synonyms: vec!["Example Syn".to_string()],
            tree_positions: vec!["C06.198.100".to_string()],
        };

        let json = serde_json::to_string(&record).unwrap();
        let parsed: ConceptRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(record, parsed);
    }
}
