//! Top-level MeSH categories.
//!
//! MeSH trees are rooted in sixteen single-letter categories (`A` Anatomy,
//! `C` Diseases, ...). These roots are not present in the descriptor file;
//! they are injected as synthetic records ahead of the parsed data.

use crate::well_known;

/// A single top-level category: a one-character code and its display name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopLevelCategory {
    /// Category code, the first character of every tree position below it.
    pub code: char,
    /// Display name used as the OBO term name.
    pub name: String,
}

impl TopLevelCategory {
    /// Creates a new category.
    pub fn new(code: char, name: impl Into<String>) -> Self {
        Self {
            code,
            name: name.into(),
        }
    }
}

/// An ordered table of top-level categories.
///
/// The order of the table is the order in which the synthetic records are
/// emitted.
///
/// # Examples
///
/// ```
/// use mesh_types::{CategoryTable, TopLevelCategory};
///
/// let table = CategoryTable::new(vec![TopLevelCategory::new('A', "Anatomy")]);
/// assert_eq!(table.name_of('A'), Some("Anatomy"));
/// assert!(!table.contains('B'));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CategoryTable {
    categories: Vec<TopLevelCategory>,
}

impl CategoryTable {
    /// Creates a table from categories in emission order.
    pub fn new(categories: Vec<TopLevelCategory>) -> Self {
        Self { categories }
    }

    /// The sixteen categories of the MeSH descriptor trees.
    pub fn mesh_default() -> Self {
        Self::new(
            well_known::MESH_CATEGORIES
                .iter()
                .map(|&(code, name)| TopLevelCategory::new(code, name))
                .collect(),
        )
    }

    /// Returns the display name for a category code.
    pub fn name_of(&self, code: char) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.code == code)
            .map(|c| c.name.as_str())
    }

    /// Returns true if the table has a category with this code.
    pub fn contains(&self, code: char) -> bool {
        self.categories.iter().any(|c| c.code == code)
    }

    /// Iterates over categories in emission order.
    pub fn iter(&self) -> impl Iterator<Item = &TopLevelCategory> {
        self.categories.iter()
    }

    /// Number of categories.
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    /// Returns true if there are no categories.
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl FromIterator<TopLevelCategory> for CategoryTable {
    fn from_iter<I: IntoIterator<Item = TopLevelCategory>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
