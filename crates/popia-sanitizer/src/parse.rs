//! # Lenient CSV Parsing
//!
//! Reads header-keyed records with the `csv` crate. Parsing never fails as
//! a whole:
//!
//! - a row that cannot be decoded (e.g. invalid UTF-8) is skipped and
//!   counted in [`ParseReport::skipped_malformed`];
//! - a row whose cells are all empty is skipped and counted in
//!   [`ParseReport::skipped_empty`];
//! - rows with fewer or more cells than the header are accepted; missing
//!   cells are absent and surplus cells are ignored;
//! - an unreadable header yields zero records.
//!
//! Only rows that produced a record count toward the list total.

use serde::{Deserialize, Serialize};

use crate::fields::ContactRecord;

/// Row accounting for one parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    /// Rows that produced a record.
    pub parsed: usize,
    /// Rows skipped because every cell was empty.
    pub skipped_empty: usize,
    /// Rows skipped because they could not be decoded.
    pub skipped_malformed: usize,
}

/// Records produced by [`parse_contacts`] and the accounting behind them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedContacts {
    /// Successfully parsed, non-empty rows in file order.
    pub records: Vec<ContactRecord>,
    /// Row accounting.
    pub report: ParseReport,
}

/// Parse CSV bytes with a header row into contact records.
pub fn parse_contacts(input: &[u8]) -> ParsedContacts {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input);

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(err) => {
            tracing::warn!(error = %err, "unreadable CSV header; treating list as empty");
            return ParsedContacts::default();
        }
    };

    let mut parsed = ParsedContacts::default();
    for row in reader.records() {
        let row = match row {
            Ok(row) => row,
            Err(err) => {
                let line = err.position().map(|p| p.line());
                if matches!(err.kind(), csv::ErrorKind::Io(_)) {
                    tracing::warn!(error = %err, "CSV read aborted");
                    break;
                }
                tracing::warn!(?line, error = %err, "skipping malformed CSV row");
                parsed.report.skipped_malformed += 1;
                continue;
            }
        };

        let line = row.position().map(|p| p.line());
        let record = ContactRecord::new(line, headers.iter().zip(row.iter()));

        if record.is_blank() {
            parsed.report.skipped_empty += 1;
            continue;
        }
        parsed.records.push(record);
    }

    parsed.report.parsed = parsed.records.len();
    tracing::debug!(
        parsed = parsed.report.parsed,
        skipped_empty = parsed.report.skipped_empty,
        skipped_malformed = parsed.report.skipped_malformed,
        "parsed contact list"
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_header_keyed_rows() {
        let parsed = parse_contacts(b"Name,Email,Consent\nAlice,alice@example.com,yes\n");
        assert_eq!(parsed.records.len(), 1);
        let r = &parsed.records[0];
        assert_eq!(r.get("name"), Some("Alice"));
        assert_eq!(r.get("EMAIL"), Some("alice@example.com"));
        assert_eq!(r.line, Some(2));
    }

    #[test]
    fn test_trims_cells() {
        let parsed = parse_contacts(b"Name , Consent\n  Alice  ,  YES \n");
        assert_eq!(parsed.records[0].get("consent"), Some("YES"));
        assert_eq!(parsed.records[0].get("name"), Some("Alice"));
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        let parsed = parse_contacts(b"");
        assert!(parsed.records.is_empty());
        assert_eq!(parsed.report, ParseReport::default());
    }

    #[test]
    fn test_header_only_yields_no_records() {
        let parsed = parse_contacts(b"Name,Email,Consent\n");
        assert!(parsed.records.is_empty());
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let parsed = parse_contacts(b"Name,Email,Consent\nAlice,a@x.co,yes\n,,\nBob,b@x.co,no\n");
        assert_eq!(parsed.report.parsed, 2);
        assert_eq!(parsed.report.skipped_empty, 1);
    }

    #[test]
    fn test_malformed_row_is_skipped_without_aborting() {
        let mut input = b"Name,Consent\nAlice,yes\n".to_vec();
        input.extend_from_slice(b"\xff\xfe,yes\n");
        input.extend_from_slice(b"Bob,no\n");
        let parsed = parse_contacts(&input);
        assert_eq!(parsed.report.parsed, 2);
        assert_eq!(parsed.report.skipped_malformed, 1);
        assert_eq!(parsed.records[1].get("name"), Some("Bob"));
    }

    #[test]
    fn test_ragged_rows_are_accepted() {
        let parsed = parse_contacts(b"Name,Email,Consent\nAlice\nBob,b@x.co,yes,extra\n");
        assert_eq!(parsed.report.parsed, 2);
        assert_eq!(parsed.records[0].get("consent"), None);
        assert_eq!(parsed.records[1].get("consent"), Some("yes"));
    }
}
