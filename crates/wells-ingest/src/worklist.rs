//! Worklist parsing
//!
//! A worklist is a CSV-like list of API numbers. The first line is a header;
//! every later line contributes its first comma-separated field.

use crate::IngestError;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;
use wells_domain::ApiNumber;

/// Read a worklist file
pub fn read_worklist<P: AsRef<Path>>(path: P) -> Result<Vec<ApiNumber>, IngestError> {
    let path = path.as_ref();
    let worklist_error = |source| IngestError::Worklist {
        path: path.to_path_buf(),
        source,
    };

    let file = File::open(path).map_err(worklist_error)?;
    let items = parse_worklist(BufReader::new(file)).map_err(|e| match e {
        IngestError::Io(source) => worklist_error(source),
        other => other,
    })?;

    debug!(path = %path.display(), items = items.len(), "worklist loaded");
    Ok(items)
}

/// Parse a worklist from any buffered reader
///
/// # Examples
///
/// ```
/// use wells_ingest::parse_worklist;
///
/// let csv = "API,Operator\n30-015-20001,ACME\n\n\"30-015-20002\",ACME\n";
/// let items = parse_worklist(csv.as_bytes()).unwrap();
/// let ids: Vec<&str> = items.iter().map(|a| a.as_str()).collect();
/// assert_eq!(ids, vec!["30-015-20001", "30-015-20002"]);
/// ```
pub fn parse_worklist<R: BufRead>(reader: R) -> Result<Vec<ApiNumber>, IngestError> {
    let mut items = Vec::new();
    for line in reader.lines().skip(1) {
        let line = line?;
        if let Some(api) = first_field(&line) {
            items.push(api);
        }
    }
    Ok(items)
}

fn first_field(line: &str) -> Option<ApiNumber> {
    let field = line.split(',').next().unwrap_or_default().trim();
    let field = field.trim_matches('"').trim();
    ApiNumber::parse(field).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn ids(items: &[ApiNumber]) -> Vec<&str> {
        items.iter().map(ApiNumber::as_str).collect()
    }

    #[test]
    fn test_header_is_skipped() {
        let items = parse_worklist("30-015-00000\n30-015-00001\n".as_bytes()).unwrap();
        assert_eq!(ids(&items), vec!["30-015-00001"]);
    }

    #[test]
    fn test_first_field_only() {
        let csv = "API,Operator,County\n 30-015-20001 , ACME, Eddy\n30-025-1,\n";
        let items = parse_worklist(csv.as_bytes()).unwrap();
        assert_eq!(ids(&items), vec!["30-015-20001", "30-025-1"]);
    }

    #[test]
    fn test_blank_and_empty_fields_skipped() {
        let csv = "API\n\n   \n,orphan\n\"\"\n30-015-20001\n";
        let items = parse_worklist(csv.as_bytes()).unwrap();
        assert_eq!(ids(&items), vec!["30-015-20001"]);
    }

    #[test]
    fn test_windows_line_endings() {
        let items = parse_worklist("API\r\n30-015-20001\r\n30-015-20002\r\n".as_bytes()).unwrap();
        assert_eq!(ids(&items), vec!["30-015-20001", "30-015-20002"]);
    }

    #[test]
    fn test_duplicates_preserved_in_order() {
        let items = parse_worklist("API\nb\na\nb\n".as_bytes()).unwrap();
        assert_eq!(ids(&items), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_header_only_and_empty_input() {
        assert!(parse_worklist("API\n".as_bytes()).unwrap().is_empty());
        assert!(parse_worklist("".as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_read_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "API").unwrap();
        writeln!(file, "30-015-20001").unwrap();

        let items = read_worklist(file.path()).unwrap();
        assert_eq!(ids(&items), vec!["30-015-20001"]);
    }

    #[test]
    fn test_missing_file() {
        let err = read_worklist("/nonexistent/worklist.csv").unwrap_err();
        assert!(matches!(err, IngestError::Worklist { .. }));
        assert!(err.to_string().contains("/nonexistent/worklist.csv"));
    }
}
