//! Two-phase MeSH to OBO conversion.
//!
//! 1. Parse every record (categories first) and build the
//!    [`TreePositionIndex`] over the buffered records.
//! 2. Emit one stanza per record, in parse order, resolving parents through
//!    the finished index.
//!
//! [`convert_file`] writes to a temporary file next to the destination and
//! renames it into place only once every stanza has been flushed, so a failed
//! run never leaves an output that looks complete.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use mesh_types::{CategoryTable, ConceptRecord};
use tempfile::NamedTempFile;
use tracing::info;

use crate::index::TreePositionIndex;
use crate::obo::{OboWriter, TermEmitter};
use crate::parser::MeshParser;
use crate::types::{ConversionStats, ConvertConfig, MeshError, MeshResult};

/// Converts MeSH descriptors read from `reader` into OBO written to `writer`.
pub fn convert<R: BufRead, W: Write>(
    reader: R,
    writer: W,
    categories: &CategoryTable,
    config: &ConvertConfig,
) -> MeshResult<ConversionStats> {
    let mut parser =
        MeshParser::<_, ConceptRecord>::from_reader(reader, categories, config.parser.clone());
    let records: Vec<ConceptRecord> = parser.by_ref().collect::<MeshResult<_>>()?;
    info!(
        "Parsed {} descriptors and {} top-level categories",
        parser.records_read(),
        categories.len()
    );

    let index = TreePositionIndex::build(&records)?;
    info!(
        "Indexed {} tree positions ({} claimed by more than one record)",
        index.len(),
        index.overwritten_positions()
    );

    let mut emitter = TermEmitter::new(OboWriter::new(writer), &index, config.dangling_parents);
    if config.write_header {
        emitter.write_header(&config.ontology)?;
    }
    for record in &records {
        emitter.emit(record)?;
    }
    let (_, mut stats) = emitter.finish()?;

    stats.top_level_records = categories.len();
    stats.malformed_lines = parser.malformed_lines();
    stats.overwritten_positions = index.overwritten_positions();

    info!(
        "Wrote {} terms with {} is_a relations ({} skipped)",
        stats.records, stats.is_a_relations, stats.dangling_parents
    );
    Ok(stats)
}

/// Converts a MeSH descriptor file into an OBO file.
///
/// # Errors
/// Returns an error if the input cannot be read, the conversion fails, or
/// the output cannot be written. The destination is left untouched on error.
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    categories: &CategoryTable,
    config: &ConvertConfig,
) -> MeshResult<ConversionStats> {
    let input = input.as_ref();
    let output = output.as_ref();

    if !input.exists() {
        return Err(MeshError::FileNotFound {
            path: input.display().to_string(),
        });
    }

    info!("Converting {} to {}", input.display(), output.display());
    let reader = BufReader::new(File::open(input)?);

    let directory = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let temporary = NamedTempFile::new_in(directory)?;

    let stats = convert(reader, BufWriter::new(temporary.as_file()), categories, config)?;
    temporary.as_file().sync_all()?;

    temporary
        .persist(output)
        .map_err(|e| MeshError::Persist {
            path: output.display().to_string(),
            source: e.error,
        })?;

    Ok(stats)
}
