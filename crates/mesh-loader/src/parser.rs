//! MeSH ASCII descriptor parser.
//!
//! Provides a streaming parser for `*NEWRECORD` delimited descriptor files.
//! The top-level categories are yielded first, as synthetic records, so that
//! they precede every parsed descriptor.

use std::fs::File;
use std::io::{BufRead, BufReader, Lines};
use std::marker::PhantomData;
use std::path::Path;

use mesh_types::well_known::{FIELD_SEPARATOR, RECORD_SEPARATOR};
use mesh_types::{CategoryTable, TopLevelCategory};
use tracing::{trace, warn};

use crate::record::RawRecord;
use crate::types::{MalformedLinePolicy, MeshError, MeshResult, ParserConfig};

/// Trait for types that can be built from MeSH record blocks.
pub trait MeshRecord: Sized {
    /// Builds a record from the fields of one block.
    fn from_raw(raw: &RawRecord) -> MeshResult<Self>;

    /// Builds the synthetic record for a top-level category.
    fn from_category(category: &TopLevelCategory) -> Self;
}

/// A streaming parser for MeSH descriptor files.
///
/// The parser consumes its line source; a second pass needs a fresh parser
/// over a fresh reader, or the records buffered with [`MeshParser::parse_all`].
pub struct MeshParser<R: BufRead, T: MeshRecord> {
    lines: Lines<R>,
    categories: std::vec::IntoIter<TopLevelCategory>,
    config: ParserConfig,
    current: Option<RawRecord>,
    line_number: usize,
    records_read: usize,
    malformed_lines: usize,
    finished: bool,
    _marker: PhantomData<T>,
}

impl<T: MeshRecord> MeshParser<BufReader<File>, T> {
    /// Creates a new parser from a file path.
    ///
    /// # Errors
    /// Returns an error if the file does not exist or cannot be opened.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        categories: &CategoryTable,
        config: ParserConfig,
    ) -> MeshResult<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(MeshError::FileNotFound {
                path: path.display().to_string(),
            });
        }

        let file = File::open(path)?;
        Ok(Self::from_reader(BufReader::new(file), categories, config))
    }
}

impl<R: BufRead, T: MeshRecord> MeshParser<R, T> {
    /// Creates a new parser from a reader.
    pub fn from_reader(reader: R, categories: &CategoryTable, config: ParserConfig) -> Self {
        Self {
            lines: reader.lines(),
            categories: categories.iter().cloned().collect::<Vec<_>>().into_iter(),
            config,
            current: None,
            line_number: 0,
            records_read: 0,
            malformed_lines: 0,
            finished: false,
            _marker: PhantomData,
        }
    }

    /// Returns the number of descriptor records read so far.
    pub fn records_read(&self) -> usize {
        self.records_read
    }

    /// Returns the number of malformed lines, whether kept as empty-valued
    /// fields or discarded because no record was open.
    pub fn malformed_lines(&self) -> usize {
        self.malformed_lines
    }

    /// Returns the parser configuration.
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parses all records into a Vec, stopping at the first error.
    pub fn parse_all(mut self) -> MeshResult<Vec<T>> {
        self.by_ref().collect()
    }

    /// Handles one line, returning a record if the line closed one.
    fn process_line(&mut self, line: &str) -> MeshResult<Option<RawRecord>> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        if trimmed == RECORD_SEPARATOR {
            let closed = self.current.replace(RawRecord::new(self.line_number));
            return Ok(closed.filter(|record| !record.is_empty()));
        }

        // Only the sentinel opens a record
        let Some(record) = self.current.as_mut() else {
            return match self.config.malformed_lines {
                MalformedLinePolicy::Lenient => {
                    warn!(line = self.line_number, "Discarding {:?} outside any record", line);
                    self.malformed_lines += 1;
                    Ok(None)
                }
                MalformedLinePolicy::Reject => Err(MeshError::MalformedLine {
                    line: self.line_number,
                    content: line.to_string(),
                }),
            };
        };

        let (key, value) = match line.split_once(FIELD_SEPARATOR) {
            Some(pair) => pair,
            None => match self.config.malformed_lines {
                MalformedLinePolicy::Lenient => {
                    warn!(line = self.line_number, "No field separator in {:?}", line);
                    self.malformed_lines += 1;
                    (line, "")
                }
                MalformedLinePolicy::Reject => {
                    return Err(MeshError::MalformedLine {
                        line: self.line_number,
                        content: line.to_string(),
                    });
                }
            },
        };

        record.push(key, value);
        Ok(None)
    }

    fn finish_record(&mut self, raw: RawRecord) -> MeshResult<T> {
        self.records_read += 1;
        trace!(line = raw.line(), "Closing record");
        T::from_raw(&raw)
    }
}

impl<R: BufRead, T: MeshRecord> Iterator for MeshParser<R, T> {
    type Item = MeshResult<T>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(category) = self.categories.next() {
            return Some(Ok(T::from_category(&category)));
        }

        if self.finished {
            return None;
        }

        loop {
            match self.lines.next() {
                Some(Ok(line)) => {
                    self.line_number += 1;
                    let line = if self.line_number == 1 {
                        line.trim_start_matches('\u{feff}')
                    } else {
                        line.as_str()
                    };
                    match self.process_line(line) {
                        Ok(Some(raw)) => return Some(self.finish_record(raw)),
                        Ok(None) => continue,
                        Err(e) => {
                            self.finished = true;
                            return Some(Err(e));
                        }
                    }
                }
                Some(Err(e)) => {
                    self.finished = true;
                    return Some(Err(e.into()));
                }
                None => {
                    // End of input closes the open record
                    self.finished = true;
                    return self
                        .current
                        .take()
                        .filter(|record| !record.is_empty())
                        .map(|raw| self.finish_record(raw));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mesh_types::ConceptRecord;

    fn parse(input: &str, categories: &CategoryTable) -> MeshResult<Vec<ConceptRecord>> {
        MeshParser::<_, ConceptRecord>::from_reader(
            input.as_bytes(),
            categories,
            ParserConfig::default(),
        )
        .parse_all()
    }

    /// Collects the raw field buffers, bypassing record validation.
    struct Fields(RawRecord);

    impl MeshRecord for Fields {
        fn from_raw(raw: &RawRecord) -> MeshResult<Self> {
            Ok(Fields(raw.clone()))
        }

        fn from_category(category: &TopLevelCategory) -> Self {
            let mut raw = RawRecord::new(0);
            raw.push("UI", &category.code.to_string());
            Fields(raw)
        }
    }

    fn parse_fields(input: &str, config: ParserConfig) -> MeshResult<Vec<RawRecord>> {
        MeshParser::<_, Fields>::from_reader(input.as_bytes(), &CategoryTable::default(), config)
            .map(|r| r.map(|Fields(raw)| raw))
            .collect()
    }

    #[test]
    fn test_parse_records() {
        let input = "\
*NEWRECORD
UI = D000001
MH = Calcimycin
ENTRY = A-23187|T109|T195|LAB|NRW|NLM (1991)|900308|abbcdef
ENTRY = A23187
MN = D03.633.100.221.173

*NEWRECORD
UI = D000002
MH = Temefos
MN = D02.705.400.625.800
MN = D02.886.300.692.800
";
        let records = parse(input, &CategoryTable::default()).unwrap();
        assert_eq!(records.len(), 2);

        assert_eq!(records[0].id, "D000001");
        assert_eq!(records[0].name, "Calcimycin");
        assert_eq!(records[0].synonyms, ["A-23187", "A23187"]);
        assert_eq!(records[0].tree_positions, ["D03.633.100.221.173"]);

        assert_eq!(records[1].id, "D000002");
        assert!(records[1].synonyms.is_empty());
        assert_eq!(
            records[1].tree_positions,
            ["D02.705.400.625.800", "D02.886.300.692.800"]
        );
    }

    #[test]
    fn test_categories_come_first() {
        let categories = CategoryTable::new(vec![
            TopLevelCategory::new('A', "Anatomy"),
            TopLevelCategory::new('C', "Diseases"),
        ]);
        let input = "*NEWRECORD\nUI = D000001\nMH = Calcimycin\n";

        let records = parse(input, &categories).unwrap();
        let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, ["A", "C", "D000001"]);
        assert_eq!(records[1].name, "Diseases");
    }

    #[test]
    fn test_categories_without_input() {
        let categories = CategoryTable::new(vec![TopLevelCategory::new('A', "Anatomy")]);
        let records = parse("", &categories).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "A");
        assert_eq!(records[0].name, "Anatomy");
    }

    #[test]
    fn test_blank_lines_and_empty_blocks_are_skipped() {
        let input = "\n\n*NEWRECORD\n\n*NEWRECORD\nUI = D1\n\nMH = One\n*NEWRECORD\n   \n";
        let records = parse_fields(input, ParserConfig::default()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first("UI"), Some("D1"));
        assert_eq!(records[0].first("MH"), Some("One"));
    }

    #[test]
    fn test_last_record_without_trailing_newline() {
        let input = "*NEWRECORD\nUI = D1\nMH = One\n*NEWRECORD\nUI = D2\nMH = Two";
        let records = parse_fields(input, ParserConfig::default()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].first("MH"), Some("Two"));
        assert_eq!(records[1].line(), 4);
    }

    #[test]
    fn test_lines_before_first_separator() {
        let input = "UI = D1\nMH = One\n*NEWRECORD\nUI = D2\nMH = Two\n";
        let mut parser = MeshParser::<_, Fields>::from_reader(
            input.as_bytes(),
            &CategoryTable::default(),
            ParserConfig::default(),
        );

        let Fields(raw) = parser.next().unwrap().unwrap();
        assert_eq!(raw.first("UI"), Some("D2"));
        assert!(parser.next().is_none());
        assert_eq!(parser.malformed_lines(), 2);
    }

    #[test]
    fn test_leading_banner_is_discarded() {
        let input = "MeSH descriptors 2024\n*NEWRECORD\nUI = D1\nMH = One\n";
        let mut parser = MeshParser::<_, ConceptRecord>::from_reader(
            input.as_bytes(),
            &CategoryTable::default(),
            ParserConfig::default(),
        );

        let record = parser.next().unwrap().unwrap();
        assert_eq!(record.id, "D1");
        assert!(parser.next().is_none());
        assert_eq!(parser.malformed_lines(), 1);
        assert_eq!(parser.records_read(), 1);
    }

    #[test]
    fn test_leading_banner_rejected() {
        let input = "MeSH descriptors 2024\n*NEWRECORD\nUI = D1\nMH = One\n";
        let config = ParserConfig {
            malformed_lines: MalformedLinePolicy::Reject,
        };

        match parse_fields(input, config).unwrap_err() {
            MeshError::MalformedLine { line, content } => {
                assert_eq!(line, 1);
                assert_eq!(content, "MeSH descriptors 2024");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_byte_order_mark_is_stripped() {
        let input = "\u{feff}*NEWRECORD\nUI = D1\nMH = One\n";
        let config = ParserConfig {
            malformed_lines: MalformedLinePolicy::Reject,
        };
        let records = parse_fields(input, config).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].first("UI"), Some("D1"));

        let mut parser = MeshParser::<_, Fields>::from_reader(
            input.as_bytes(),
            &CategoryTable::default(),
            ParserConfig::default(),
        );
        assert!(parser.next().unwrap().is_ok());
        assert!(parser.next().is_none());
        assert_eq!(parser.malformed_lines(), 0);
    }

    #[test]
    fn test_split_on_first_separator_only() {
        let input = "*NEWRECORD\nSCN = a = b\n";
        let records = parse_fields(input, ParserConfig::default()).unwrap();
        assert_eq!(records[0].first("SCN"), Some("a = b"));
    }

    #[test]
    fn test_crlf_line_endings() {
        let input = "*NEWRECORD\r\nUI = D1\r\nMH = One\r\n";
        let records = parse_fields(input, ParserConfig::default()).unwrap();
        assert_eq!(records[0].first("UI"), Some("D1"));
        assert_eq!(records[0].first("MH"), Some("One"));
    }

    #[test]
    fn test_malformed_line_lenient() {
        let input = "*NEWRECORD\nUI = D1\nGARBAGE\nMH = One\n";
        let mut parser = MeshParser::<_, Fields>::from_reader(
            input.as_bytes(),
            &CategoryTable::default(),
            ParserConfig::default(),
        );

        let Fields(raw) = parser.next().unwrap().unwrap();
        assert_eq!(raw.values("GARBAGE"), [""]);
        assert_eq!(raw.first("MH"), Some("One"));
        assert!(parser.next().is_none());
        assert_eq!(parser.malformed_lines(), 1);
        assert_eq!(parser.records_read(), 1);
        assert_eq!(parser.config().malformed_lines, MalformedLinePolicy::Lenient);
    }

    #[test]
    fn test_malformed_line_rejected() {
        let input = "*NEWRECORD\nUI = D1\nGARBAGE\nMH = One\n";
        let config = ParserConfig {
            malformed_lines: MalformedLinePolicy::Reject,
        };

        let err = parse_fields(input, config).unwrap_err();
        match err {
            MeshError::MalformedLine { line, content } => {
                assert_eq!(line, 3);
                assert_eq!(content, "GARBAGE");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_parser_stops_after_error() {
        let input = "*NEWRECORD\nGARBAGE\n*NEWRECORD\nUI = D2\n";
        let config = ParserConfig {
            malformed_lines: MalformedLinePolicy::Reject,
        };
        let mut parser =
            MeshParser::<_, Fields>::from_reader(input.as_bytes(), &CategoryTable::default(), config);

        assert!(parser.next().unwrap().is_err());
        assert!(parser.next().is_none());
    }

    #[test]
    fn test_from_path_missing_file() {
        let result = MeshParser::<_, ConceptRecord>::from_path(
            "/nonexistent/d2024.bin",
            &CategoryTable::default(),
            ParserConfig::default(),
        );
        assert!(matches!(result, Err(MeshError::FileNotFound { .. })));
    }
}
