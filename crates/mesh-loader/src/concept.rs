//! MeSH descriptor record conversion.
//!
//! Builds [`ConceptRecord`]s from `UI`, `MH`, `ENTRY` and `MN` fields.

use mesh_types::well_known::{
    ENTRY, ENTRY_QUALIFIER_SEPARATOR, MAIN_HEADING, TREE_NUMBER, UNIQUE_ID,
};
use mesh_types::{tree, ConceptRecord, TopLevelCategory};

use crate::parser::MeshRecord;
use crate::record::RawRecord;
use crate::types::{MeshError, MeshResult};

impl MeshRecord for ConceptRecord {
    fn from_raw(raw: &RawRecord) -> MeshResult<Self> {
        let id = required(raw, UNIQUE_ID)?;
        let name = required(raw, MAIN_HEADING)?;

        let synonyms = raw
            .values(ENTRY)
            .iter()
            .map(|entry| strip_qualifier(entry).to_string())
            .collect();

        let tree_positions = raw.values(TREE_NUMBER).to_vec();
        if let Some(position) = tree_positions.iter().find(|p| !tree::is_well_formed(p)) {
            return Err(MeshError::InvalidTreePosition {
                id: id.to_string(),
                position: position.clone(),
            });
        }

        Ok(ConceptRecord {
            id: id.to_string(),
            name: name.to_string(),
            synonyms,
            tree_positions,
        })
    }

    fn from_category(category: &TopLevelCategory) -> Self {
        ConceptRecord::from_category(category)
    }
}

/// First non-empty value of a required field.
fn required<'a>(raw: &'a RawRecord, field: &'static str) -> MeshResult<&'a str> {
    raw.first(field)
        .filter(|value| !value.is_empty())
        .ok_or(MeshError::MissingField {
            field,
            line: raw.line(),
        })
}

/// Removes the `|`-separated qualifier data from an entry term.
///
/// `"Foo Bar|T123|NON"` becomes `"Foo Bar"`.
pub fn strip_qualifier(entry: &str) -> &str {
    entry
        .split_once(ENTRY_QUALIFIER_SEPARATOR)
        .map_or(entry, |(term, _)| term)
}
