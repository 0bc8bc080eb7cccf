//! Well-known MeSH format tokens and category codes.
//!
//! This module provides constants for the tokens of the MeSH ASCII descriptor
//! format and the table of top-level tree categories.
//!
//! # Examples
//!
//! ```
//! use mesh_types::well_known;
//!
//! let line = "UI = D000001";
//! let (key, value) = line.split_once(well_known::FIELD_SEPARATOR).unwrap();
//! assert_eq!(key, well_known::UNIQUE_ID);
//! assert_eq!(value, "D000001");
//! ```

// =============================================================================
// Record Structure
// =============================================================================

/// Line that closes the current record and opens a new one.
pub const RECORD_SEPARATOR: &str = "*NEWRECORD";

/// Separator between a field key and its value.
pub const FIELD_SEPARATOR: &str = " = ";

/// Separator between an entry term and its trailing qualifier data.
pub const ENTRY_QUALIFIER_SEPARATOR: char = '|';

/// Separator between the segments of a tree position.
pub const TREE_SEPARATOR: char = '.';

// =============================================================================
// Field Keys
// =============================================================================

/// Unique identifier of the descriptor (e.g. `D000001`).
pub const UNIQUE_ID: &str = "UI";

/// Main heading, the preferred label.
pub const MAIN_HEADING: &str = "MH";

/// Entry term, a synonym optionally followed by `|` qualifier data.
pub const ENTRY: &str = "ENTRY";

/// Tree number, the position of the descriptor in a MeSH tree.
pub const TREE_NUMBER: &str = "MN";

// =============================================================================
// Top-Level Categories
// =============================================================================

/// Anatomy - A.
pub const ANATOMY: char = 'A';

/// Organisms - B.
pub const ORGANISMS: char = 'B';

/// Diseases - C.
pub const DISEASES: char = 'C';

/// Chemicals and Drugs - D.
pub const CHEMICALS_AND_DRUGS: char = 'D';

/// Geographicals - Z.
pub const GEOGRAPHICALS: char = 'Z';

/// The sixteen MeSH tree categories in emission order.
pub const MESH_CATEGORIES: &[(char, &str)] = &[
    (ANATOMY, "Anatomy"),
    (ORGANISMS, "Organisms"),
    (DISEASES, "Diseases"),
    (CHEMICALS_AND_DRUGS, "Chemicals and Drugs"),
    (
        'E',
        "Analytical, Diagnostic and Therapeutic Techniques, and Equipment",
    ),
    ('F', "Psychiatry and Psychology"),
    ('G', "Phenomena and Processes"),
    ('H', "Disciplines and Occupations"),
    (
        'I',
        "Anthropology, Education, Sociology, and Social Phenomena",
    ),
    ('J', "Technology, Industry, and Agriculture"),
    ('K', "Humanities"),
    ('L', "Information Science"),
    ('M', "Named Groups"),
    ('N', "Health Care"),
    ('V', "Publication Characteristics"),
    (GEOGRAPHICALS, "Geographicals"),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_codes_are_unique() {
        let mut codes: Vec<char> = MESH_CATEGORIES.iter().map(|&(c, _)| c).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), MESH_CATEGORIES.len());
    }
}
