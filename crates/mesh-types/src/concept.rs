//! MeSH concept record type.
//!
//! This module provides the `ConceptRecord` struct representing one
//! descriptor block of a MeSH file, or one synthetic top-level category.

use crate::TopLevelCategory;

/// A MeSH concept, either parsed from a `*NEWRECORD` block or synthesized
/// from a top-level category.
///
/// # Examples
///
/// ```
/// use mesh_types::ConceptRecord;
///
/// let record = ConceptRecord {
///     id: "D000123".to_string(),
///     name: "Example Concept".to_string(),
///     synonyms: vec!["Example Syn".to_string()],
///     tree_positions: vec!["C06.198.100".to_string(), "C23.550".to_string()],
/// };
///
/// assert_eq!(record.tree_positions.len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConceptRecord {
    /// Unique identifier (the first `UI` value, or a category code).
    pub id: String,
    /// Preferred label (the first `MH` value).
    pub name: String,
    /// Entry terms with their `|` qualifier suffix removed, in source order.
    pub synonyms: Vec<String>,
    /// Dot-delimited tree positions (`MN` values), in source order.
    pub tree_positions: Vec<String>,
}

impl ConceptRecord {
    /// Creates the synthetic record for a top-level category.
    pub fn from_category(category: &TopLevelCategory) -> Self {
        Self {
            id: category.code.to_string(),
            name: category.name.clone(),
            synonyms: Vec::new(),
            tree_positions: Vec::new(),
        }
    }
}
