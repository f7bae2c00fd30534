//! Parsing of the solver's RESULT lines.
//!
//! In summary mode the solver prints, among free-form log lines, one line of
//! the form `RESULT obj=118 bound=118 nodes=0 status=OPT time=0.42`. Keys are
//! solver-defined; only a handful are consumed by the report.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Token opening a marker line
pub const RESULT_SENTINEL: &str = "RESULT";

/// Value used by the solver when a metric is not available
pub const NOT_AVAILABLE: &str = "NA";

/// Key/value metrics reported by one solver invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResultRecord {
    values: BTreeMap<String, String>,
}

impl ResultRecord {
    pub fn new() -> Self {
        ResultRecord::default()
    }

    pub fn insert(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Raw value for `key`, or `"NA"` when the solver did not report it
    pub fn value_or_na(&self, key: &str) -> &str {
        self.get(key).unwrap_or(NOT_AVAILABLE)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for ResultRecord {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        ResultRecord {
            values: iter.into_iter().collect(),
        }
    }
}

/// Parse one line of solver output.
///
/// Returns `None` unless the line starts with the sentinel followed by
/// whitespace. Tokens without `=` (or with an empty key) are skipped; the
/// value is everything after the first `=`. A marker line with no valid
/// token yields an empty record, which callers must not accept.
pub fn parse_result_line(line: &str) -> Option<ResultRecord> {
    let rest = line.strip_prefix(RESULT_SENTINEL)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let mut record = ResultRecord::new();
    for token in rest.split_whitespace() {
        match token.split_once('=') {
            Some((key, value)) if !key.is_empty() => record.insert(key, value),
            _ => log::trace!("Skipping malformed RESULT token {:?}", token),
        }
    }

    Some(record)
}

/// Find the first usable RESULT record in a block of output.
///
/// Marker lines that parse to an empty record are ignored and scanning
/// continues; when several usable marker lines appear the first one wins.
pub fn scan_output(output: &str) -> Option<ResultRecord> {
    for line in output.lines() {
        match parse_result_line(line) {
            Some(record) if !record.is_empty() => return Some(record),
            Some(_) => log::warn!("Ignoring RESULT line without key=value pairs: {:?}", line),
            None => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> ResultRecord {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_valid_line() {
        let parsed = parse_result_line("RESULT a=1 b=2.5").unwrap();
        assert_eq!(parsed, record(&[("a", "1"), ("b", "2.5")]));
    }

    #[test]
    fn test_non_marker_lines() {
        assert_eq!(parse_result_line("Succes! (Status: 2)"), None);
        assert_eq!(parse_result_line("RESULTS a=1"), None);
        assert_eq!(parse_result_line(" RESULT a=1"), None);
        assert_eq!(parse_result_line("RESULT"), None);
        assert_eq!(parse_result_line(""), None);
    }

    #[test]
    fn test_malformed_tokens_are_dropped() {
        let parsed = parse_result_line("RESULT a=1 bad b=2").unwrap();
        assert_eq!(parsed, record(&[("a", "1"), ("b", "2")]));

        let parsed = parse_result_line("RESULT =3 c=4").unwrap();
        assert_eq!(parsed, record(&[("c", "4")]));
    }

    #[test]
    fn test_value_keeps_extra_separators() {
        let parsed = parse_result_line("RESULT expr=a=b empty=").unwrap();
        assert_eq!(parsed.get("expr"), Some("a=b"));
        assert_eq!(parsed.get("empty"), Some(""));
    }

    #[test]
    fn test_marker_without_pairs_is_empty() {
        let parsed = parse_result_line("RESULT nothing here").unwrap();
        assert!(parsed.is_empty());
    }

    #[test]
    fn test_tab_after_sentinel_and_crlf() {
        let parsed = parse_result_line("RESULT\tobj=7 time=0.5\r").unwrap();
        assert_eq!(parsed.get("obj"), Some("7"));
        assert_eq!(parsed.get("time"), Some("0.5"));
    }

    #[test]
    fn test_scan_first_usable_line_wins() {
        let output = "Reading br17.atsp\nRESULT junk\nRESULT obj=39 status=OPT\nRESULT obj=40\n";
        let parsed = scan_output(output).unwrap();
        assert_eq!(parsed, record(&[("obj", "39"), ("status", "OPT")]));
    }

    #[test]
    fn test_scan_without_marker() {
        assert_eq!(scan_output("Optimize a model with 17 rows\nSucces!\n"), None);
        assert_eq!(scan_output("RESULT\nRESULT nothing\n"), None);
    }

    #[test]
    fn test_serializes_as_flat_map() {
        let parsed = parse_result_line("RESULT time=0.1 obj=5").unwrap();
        assert_eq!(serde_json::to_string(&parsed).unwrap(), r#"{"obj":"5","time":"0.1"}"#);
    }

    #[test]
    fn test_value_or_na() {
        let parsed = record(&[("obj", "12")]);
        assert_eq!(parsed.value_or_na("obj"), "12");
        assert_eq!(parsed.value_or_na("bound"), NOT_AVAILABLE);
    }
}
