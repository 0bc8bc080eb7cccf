//! Tree position index.
//!
//! MeSH places a concept in its trees through tree positions, which do not
//! identify concepts by themselves. The index maps every tree position to the
//! id of the record that declared it, so the parent of a position can be
//! turned into a parent concept.
//!
//! The mapping is lossy: all positions of one concept collapse onto its id,
//! and a position declared by two records keeps only the last one.
//!
//! ```ignore
//! let records = MeshParser::<_, ConceptRecord>::from_path(path, &categories, config)?.parse_all()?;
//! let index = TreePositionIndex::build(&records)?;
//!
//! match index.parent_of("C06.198.100") {
//!     ParentLookup::Resolved(id) => println!("is_a: {id}"),
//!     ParentLookup::Root => {}
//!     ParentLookup::Dangling { parent_position } => eprintln!("{parent_position} is undefined"),
//! }
//! ```

use std::collections::{HashMap, HashSet};

use mesh_types::{tree, ConceptRecord};
use tracing::debug;

use crate::types::{MeshError, MeshResult};

/// Outcome of looking up the parent concept of a tree position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentLookup<'a> {
    /// The parent concept id.
    Resolved(&'a str),
    /// A root-level position that is not three characters long; it has no
    /// parent.
    Root,
    /// No record declares the parent position.
    Dangling {
        /// The truncated position that was looked up.
        parent_position: &'a str,
    },
}

/// Immutable map from tree position to concept id.
#[derive(Debug, Clone, Default)]
pub struct TreePositionIndex {
    positions: HashMap<String, String>,
    overwritten: usize,
}

impl TreePositionIndex {
    /// Builds the index over every record.
    ///
    /// A tree position claimed by more than one record maps to the last of
    /// them.
    ///
    /// # Errors
    /// Returns [`MeshError::DuplicateId`] if two records share an id.
    pub fn build<'r, I>(records: I) -> MeshResult<Self>
    where
        I: IntoIterator<Item = &'r ConceptRecord>,
    {
        let mut seen: HashSet<&'r str> = HashSet::new();
        let mut positions: HashMap<String, String> = HashMap::new();
        let mut overwritten = 0;

        for record in records {
            if !seen.insert(record.id.as_str()) {
                return Err(MeshError::DuplicateId {
                    id: record.id.clone(),
                });
            }

            for position in &record.tree_positions {
                if let Some(previous) = positions.insert(position.clone(), record.id.clone()) {
                    if previous != record.id {
                        debug!(
                            position = %position,
                            previous = %previous,
                            current = %record.id,
                            "Tree position claimed twice, keeping last"
                        );
                        overwritten += 1;
                    }
                }
            }
        }

        Ok(Self {
            positions,
            overwritten,
        })
    }

    /// Returns the concept id that declared `position`.
    pub fn get(&self, position: &str) -> Option<&str> {
        self.positions.get(position).map(String::as_str)
    }

    /// Looks up the parent concept of a tree position.
    ///
    /// A position without a dot is a root-level position: if it is three
    /// characters long its parent is the category named by its first
    /// character, whatever the index holds; otherwise it has no parent.
    /// Any other position resolves through the index entry of its truncated
    /// parent position.
    pub fn parent_of<'a>(&'a self, position: &'a str) -> ParentLookup<'a> {
        match tree::parent_position(position) {
            None => match tree::top_level_code(position) {
                Some(code) => ParentLookup::Resolved(code),
                None => ParentLookup::Root,
            },
            Some(parent_position) => match self.get(parent_position) {
                Some(id) => ParentLookup::Resolved(id),
                None => ParentLookup::Dangling { parent_position },
            },
        }
    }

    /// Number of tree positions that had their owner replaced during build.
    pub fn overwritten_positions(&self) -> usize {
        self.overwritten
    }

    /// Number of distinct tree positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns true if no record declared a tree position.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}
