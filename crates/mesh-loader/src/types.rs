//! Loader-specific types for MeSH conversion.

use serde::Serialize;
use thiserror::Error;

/// Errors that can occur while converting MeSH to OBO.
#[derive(Error, Debug)]
pub enum MeshError {
    /// I/O error reading the descriptor file or writing the ontology.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing error in a category table.
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// File not found.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Line without a field separator, rejected by the parser configuration.
    #[error("Malformed line {line}: {content:?}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// The offending line.
        content: String,
    },

    /// A record lacks a required field.
    #[error("Record starting at line {line} has no {field} value")]
    MissingField {
        /// The field key.
        field: &'static str,
        /// Line on which the record started.
        line: usize,
    },

    /// A tree position that is not a dot-delimited alphanumeric path.
    #[error("Invalid tree position {position:?} on record {id}")]
    InvalidTreePosition {
        /// The record that carries the position.
        id: String,
        /// The invalid position.
        position: String,
    },

    /// Two records share the same unique identifier.
    #[error("Duplicate concept id: {id}")]
    DuplicateId {
        /// The repeated identifier.
        id: String,
    },

    /// The parent position of a tree position is not defined by any record.
    #[error("Record {id}: parent {parent_position} of tree position {position} is not defined")]
    DanglingParent {
        /// The record being emitted.
        id: String,
        /// The tree position being resolved.
        position: String,
        /// The truncated position that was looked up.
        parent_position: String,
    },

    /// Invalid entry in a category table.
    #[error("Invalid category at line {line}: {reason}")]
    InvalidCategory {
        /// 1-based line number in the table file.
        line: u64,
        /// What was wrong with the entry.
        reason: String,
    },

    /// The finished output could not be moved to its destination.
    #[error("Could not write {path}: {source}")]
    Persist {
        /// Destination path.
        path: String,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Result type for MeSH operations.
pub type MeshResult<T> = Result<T, MeshError>;

/// What to do with a line that has no ` = ` separator and is not a record
/// separator, or that appears before the first record separator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MalformedLinePolicy {
    /// Keep the whole line as a field key with an empty value, or discard
    /// it when no record is open.
    #[default]
    Lenient,
    /// Fail with [`MeshError::MalformedLine`].
    Reject,
}

/// What to do when a tree position's parent position has no record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DanglingParentPolicy {
    /// Omit the `is_a` relation, log a warning and count it.
    #[default]
    Skip,
    /// Abort the conversion with [`MeshError::DanglingParent`].
    Fail,
}

/// Configuration for parsing MeSH descriptor files.
#[derive(Debug, Clone, Default)]
pub struct ParserConfig {
    /// Handling of lines without a field separator.
    pub malformed_lines: MalformedLinePolicy,
}

/// Configuration for a full MeSH to OBO conversion.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Base parser configuration.
    pub parser: ParserConfig,
    /// Handling of undefined parent positions.
    pub dangling_parents: DanglingParentPolicy,
    /// Whether to write an OBO header before the first stanza.
    pub write_header: bool,
    /// Ontology name used in the header.
    pub ontology: String,
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            dangling_parents: DanglingParentPolicy::Skip,
            write_header: false,
            ontology: "mesh".to_string(),
        }
    }
}

impl ConvertConfig {
    /// Creates a config that rejects malformed lines and dangling parents.
    pub fn strict() -> Self {
        Self {
            parser: ParserConfig {
                malformed_lines: MalformedLinePolicy::Reject,
            },
            dangling_parents: DanglingParentPolicy::Fail,
            ..Default::default()
        }
    }
}

/// Statistics from a conversion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConversionStats {
    /// Stanzas written, top-level categories included.
    pub records: usize,
    /// Synthetic top-level category stanzas.
    pub top_level_records: usize,
    /// Synonym lines written.
    pub synonyms: usize,
    /// `is_a` lines written.
    pub is_a_relations: usize,
    /// Relations omitted because the parent position was undefined.
    pub dangling_parents: usize,
    /// Root-level positions that are not three characters long and so have
    /// no parent.
    pub root_positions: usize,
    /// Tree positions claimed by more than one record (last one wins).
    pub overwritten_positions: usize,
    /// Lines without a separator kept as empty-valued fields, plus lines
    /// discarded before the first record separator.
    pub malformed_lines: usize,
}

impl ConversionStats {
    /// Stanzas written for parsed descriptors, excluding top-level categories.
    pub fn descriptor_records(&self) -> usize {
        self.records - self.top_level_records
    }
}
