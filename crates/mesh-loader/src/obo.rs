//! OBO output.
//!
//! [`OboWriter`] renders `[Term]` stanzas; [`TermEmitter`] resolves each
//! record's parents through a [`TreePositionIndex`] before handing it to the
//! writer.
//!
//! ```text
//! [Term]
//! id: D000123
//! name: Example Concept
//! synonym: "Example Syn" EXACT []
//! is_a: D000099
//!
//! ```

use std::borrow::Cow;
use std::io::{self, Write};

use mesh_types::ConceptRecord;
use tracing::{trace, warn};

use crate::index::{ParentLookup, TreePositionIndex};
use crate::types::{ConversionStats, DanglingParentPolicy, MeshError, MeshResult};

/// OBO format version written in the header.
pub const OBO_FORMAT_VERSION: &str = "1.2";

/// Writes OBO stanzas to an underlying writer.
pub struct OboWriter<W: Write> {
    writer: W,
    terms_written: usize,
}

impl<W: Write> OboWriter<W> {
    /// Creates a writer. Nothing is written until the first call.
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            terms_written: 0,
        }
    }

    /// Writes the `format-version` and `ontology` header lines.
    pub fn write_header(&mut self, ontology: &str) -> io::Result<()> {
        writeln!(self.writer, "format-version: {OBO_FORMAT_VERSION}")?;
        writeln!(self.writer, "ontology: {ontology}")?;
        writeln!(self.writer)
    }

    /// Writes one `[Term]` stanza followed by a blank line.
    pub fn write_term(&mut self, record: &ConceptRecord, parents: &[&str]) -> io::Result<()> {
        writeln!(self.writer, "[Term]")?;
        writeln!(self.writer, "id: {}", record.id)?;
        writeln!(self.writer, "name: {}", record.name)?;
        for synonym in &record.synonyms {
            writeln!(self.writer, "synonym: \"{}\" EXACT []", escape_quoted(synonym))?;
        }
        for parent in parents {
            writeln!(self.writer, "is_a: {parent}")?;
        }
        writeln!(self.writer)?;
        self.terms_written += 1;
        Ok(())
    }

    /// Number of stanzas written.
    pub fn terms_written(&self) -> usize {
        self.terms_written
    }

    /// Flushes and returns the underlying writer.
    pub fn finish(mut self) -> io::Result<W> {
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Escapes `\` and `"` for an OBO quoted string.
fn escape_quoted(text: &str) -> Cow<'_, str> {
    if !text.contains(['\\', '"']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 2);
    for c in text.chars() {
        if matches!(c, '\\' | '"') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    Cow::Owned(escaped)
}

/// Emits records as OBO terms with `is_a` parents from the index.
pub struct TermEmitter<'a, W: Write> {
    writer: OboWriter<W>,
    index: &'a TreePositionIndex,
    policy: DanglingParentPolicy,
    stats: ConversionStats,
}

impl<'a, W: Write> TermEmitter<'a, W> {
    /// Creates an emitter over a finished index.
    pub fn new(
        writer: OboWriter<W>,
        index: &'a TreePositionIndex,
        policy: DanglingParentPolicy,
    ) -> Self {
        Self {
            writer,
            index,
            policy,
            stats: ConversionStats::default(),
        }
    }

    /// Writes the OBO header.
    pub fn write_header(&mut self, ontology: &str) -> MeshResult<()> {
        self.writer.write_header(ontology)?;
        Ok(())
    }

    /// Writes the stanza for one record.
    pub fn emit(&mut self, record: &ConceptRecord) -> MeshResult<()> {
        let parents = self.resolve_parents(record)?;
        trace!(id = %record.id, parents = parents.len(), "Writing term");
        self.writer.write_term(record, &parents)?;

        self.stats.records += 1;
        self.stats.synonyms += record.synonyms.len();
        self.stats.is_a_relations += parents.len();
        Ok(())
    }

    /// Resolves the distinct parents of a record in first-seen order.
    ///
    /// Positions whose parent is already listed contribute nothing, so two
    /// tree positions under the same parent concept give one relation.
    pub fn resolve_parents<'r>(&mut self, record: &'r ConceptRecord) -> MeshResult<Vec<&'r str>>
    where
        'a: 'r,
    {
        let index: &'a TreePositionIndex = self.index;
        let mut parents: Vec<&'r str> = Vec::with_capacity(record.tree_positions.len());

        for position in &record.tree_positions {
            match index.parent_of(position) {
                ParentLookup::Resolved(parent) => {
                    if !parents.contains(&parent) {
                        parents.push(parent);
                    }
                }
                ParentLookup::Root => {
                    self.stats.root_positions += 1;
                }
                ParentLookup::Dangling { parent_position } => match self.policy {
                    DanglingParentPolicy::Skip => {
                        warn!(
                            id = %record.id,
                            position = %position,
                            "Parent position {} is not defined, skipping relation",
                            parent_position
                        );
                        self.stats.dangling_parents += 1;
                    }
                    DanglingParentPolicy::Fail => {
                        return Err(MeshError::DanglingParent {
                            id: record.id.clone(),
                            position: position.clone(),
                            parent_position: parent_position.to_string(),
                        });
                    }
                },
            }
        }

        Ok(parents)
    }

    /// Statistics gathered so far.
    pub fn stats(&self) -> &ConversionStats {
        &self.stats
    }

    /// Flushes the writer and returns it with the statistics.
    pub fn finish(self) -> MeshResult<(W, ConversionStats)> {
        let writer = self.writer.finish()?;
        Ok((writer, self.stats))
    }
}
