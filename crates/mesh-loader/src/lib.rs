//! # mesh-loader
//!
//! Parser for MeSH ASCII descriptor files and writer for OBO ontologies.
//!
//! Conversion is a two-phase pipeline: every record is parsed and indexed by
//! tree position first, then each record is written as an OBO `[Term]` whose
//! `is_a` parents come from the finished index.
//!
//! ```ignore
//! use mesh_loader::{convert_file, ConvertConfig};
//! use mesh_loader::mesh_types::CategoryTable;
//!
//! let stats = convert_file(
//!     "d2024.bin",
//!     "mesh.obo",
//!     &CategoryTable::mesh_default(),
//!     &ConvertConfig::default(),
//! )?;
//! println!("{} terms, {} is_a relations", stats.records, stats.is_a_relations);
//! ```

#![warn(missing_docs)]

pub mod categories;
mod concept;
pub mod convert;
pub mod index;
pub mod obo;
pub mod parser;
pub mod record;
pub mod types;

// Re-export mesh-types for convenience
pub use mesh_types;

pub use categories::{load_category_file, parse_categories};
pub use concept::strip_qualifier;
pub use convert::{convert, convert_file};
pub use index::{ParentLookup, TreePositionIndex};
pub use obo::{OboWriter, TermEmitter};
pub use parser::{MeshParser, MeshRecord};
pub use record::RawRecord;
pub use types::{
    ConversionStats, ConvertConfig, DanglingParentPolicy, MalformedLinePolicy, MeshError,
    MeshResult, ParserConfig,
};
