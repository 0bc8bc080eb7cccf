//! Category table loader.
//!
//! Reads a replacement for the built-in top-level category table from a
//! tab-separated file with one `code<TAB>name` entry per line:
//!
//! ```text
//! # code	name
//! A	Anatomy
//! B	Organisms
//! ```

use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use mesh_types::{CategoryTable, TopLevelCategory};

use crate::types::{MeshError, MeshResult};

/// Loads a category table from a tab-separated file.
pub fn load_category_file<P: AsRef<Path>>(path: P) -> MeshResult<CategoryTable> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MeshError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let file = std::fs::File::open(path)?;
    parse_categories(file)
}

/// Parses a category table from tab-separated data.
///
/// Codes must be a single ASCII letter and must not repeat; names must be
/// non-empty. Lines starting with `#` are ignored.
pub fn parse_categories<R: Read>(reader: R) -> MeshResult<CategoryTable> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .comment(Some(b'#'))
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut categories: Vec<TopLevelCategory> = Vec::new();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());

        if record.len() != 2 {
            return Err(MeshError::InvalidCategory {
                line,
                reason: format!("expected 2 columns, found {}", record.len()),
            });
        }

        let code_field = record.get(0).unwrap_or("");
        let name = record.get(1).unwrap_or("");

        let mut chars = code_field.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => c,
            _ => {
                return Err(MeshError::InvalidCategory {
                    line,
                    reason: format!("code {code_field:?} is not a single letter"),
                });
            }
        };

        if name.is_empty() {
            return Err(MeshError::InvalidCategory {
                line,
                reason: format!("category {code} has no name"),
            });
        }

        if categories.iter().any(|c| c.code == code) {
            return Err(MeshError::InvalidCategory {
                line,
                reason: format!("category {code} is defined twice"),
            });
        }

        categories.push(TopLevelCategory::new(code, name));
    }

    Ok(CategoryTable::new(categories))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_categories() {
        let data = "# code\tname\nA\tAnatomy\nC\tDiseases\n";
        let table = parse_categories(data.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.name_of('A'), Some("Anatomy"));
        assert_eq!(table.name_of('C'), Some("Diseases"));
        let codes: Vec<char> = table.iter().map(|c| c.code).collect();
        assert_eq!(codes, ['A', 'C']);
    }

    #[test]
    fn test_names_with_commas() {
        let data = "E\tAnalytical, Diagnostic and Therapeutic Techniques, and Equipment\n";
        let table = parse_categories(data.as_bytes()).unwrap();
        assert_eq!(
            table.name_of('E'),
            Some("Analytical, Diagnostic and Therapeutic Techniques, and Equipment")
        );
    }

    #[test]
    fn test_reject_long_code() {
        let err = parse_categories("AB\tAnatomy\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::InvalidCategory { line: 1, .. }));
    }

    #[test]
    fn test_reject_duplicate_code() {
        let err = parse_categories("A\tAnatomy\nA\tAgain\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::InvalidCategory { line: 2, .. }));
    }

    #[test]
    fn test_reject_missing_name() {
        let err = parse_categories("A\n".as_bytes()).unwrap_err();
        assert!(matches!(err, MeshError::InvalidCategory { .. }));
    }

    #[test]
    fn test_load_category_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Z\tGeographicals").unwrap();
        file.flush().unwrap();

        let table = load_category_file(file.path()).unwrap();
        assert_eq!(table.name_of('Z'), Some("Geographicals"));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_category_file("/nonexistent/categories.tsv").unwrap_err();
        assert!(matches!(err, MeshError::FileNotFound { .. }));
    }
}
