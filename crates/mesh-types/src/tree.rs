//! Tree position helpers.
//!
//! A tree position (MeSH "tree number") such as `C06.198.100` is a
//! dot-delimited path. The position of the parent node is obtained by dropping
//! the final segment. A root-level position like `C06` has no dotted parent;
//! it hangs off the top-level category named by its first character.

use crate::well_known::TREE_SEPARATOR;

/// Length in characters of a well-formed root-level tree position (`C06`).
pub const ROOT_POSITION_LEN: usize = 3;

/// Returns true if `position` is a non-empty dot-delimited path of non-empty
/// ASCII alphanumeric segments.
///
/// ```
/// use mesh_types::tree::is_well_formed;
///
/// assert!(is_well_formed("C06.198"));
/// assert!(!is_well_formed("C06..198"));
/// assert!(!is_well_formed("C06 198"));
/// ```
pub fn is_well_formed(position: &str) -> bool {
    !position.is_empty()
        && position.split(TREE_SEPARATOR).all(|segment| {
            !segment.is_empty() && segment.chars().all(|c| c.is_ascii_alphanumeric())
        })
}

/// Returns the position of the parent node, or `None` for a root-level
/// position.
///
/// ```
/// use mesh_types::tree::parent_position;
///
/// assert_eq!(parent_position("C06.198.100"), Some("C06.198"));
/// assert_eq!(parent_position("C06"), None);
/// ```
pub fn parent_position(position: &str) -> Option<&str> {
    position
        .rsplit_once(TREE_SEPARATOR)
        .map(|(parent, _)| parent)
}

/// Returns the top-level category code of a root-level position.
///
/// Only positions without a dot and exactly three characters long qualify;
/// anything else returns `None`.
///
/// ```
/// use mesh_types::tree::top_level_code;
///
/// assert_eq!(top_level_code("C06"), Some("C"));
/// assert_eq!(top_level_code("C6"), None);
/// assert_eq!(top_level_code("C06.198"), None);
/// ```
pub fn top_level_code(position: &str) -> Option<&str> {
    if position.contains(TREE_SEPARATOR) || position.chars().count() != ROOT_POSITION_LEN {
        return None;
    }
    let end = position.char_indices().nth(1).map(|(i, _)| i)?;
    Some(&position[..end])
}
