//! Response envelope parsing and classification.
//!
//! The search API wraps results in a JSON envelope of the shape
//! `{"docs": [...], "numFound": 42, "start": 0}`. This module decodes that
//! envelope and computes the "more available" flag, and classifies the raw
//! transport outcome (status code plus body) into the search error taxonomy.

use serde::de::Deserializer;
use serde::Deserialize;

use crate::domain::{BibliofindError, BookRecord, Result};

/// Fallback message when the transport failed without a usable detail.
const GENERIC_FETCH_FAILURE: &str = "Something went wrong during fetch.";

/// Status code the host reports when the transport itself failed before an
/// HTTP response was produced.
const TRANSPORT_FAILURE_STATUS: u16 = 0;

/// The decoded search response envelope.
///
/// All fields are tolerant of absence: `docs` missing or not an array is
/// treated as an empty page, `numFound` defaults to zero, and a missing
/// `start` is reconstructed from the page number at pagination time.
#[derive(Debug, Default, Deserialize)]
pub struct SearchEnvelope {
    /// Result records for this page.
    #[serde(default, deserialize_with = "docs_or_empty")]
    pub docs: Vec<BookRecord>,

    /// Total number of matching records across all pages.
    #[serde(default, rename = "numFound")]
    pub num_found: u64,

    /// Offset of the first record in this page within the full result set.
    #[serde(default)]
    pub start: Option<u64>,
}

impl SearchEnvelope {
    /// Converts the envelope into a page of records plus the pagination flag.
    ///
    /// `has_more` is true exactly when `start + len(docs) < numFound`. A
    /// missing `start` defaults to `(page - 1) * len(docs)`.
    #[must_use]
    pub fn into_page(self, page: u32) -> SearchPage {
        let len = self.docs.len() as u64;
        let start = self
            .start
            .unwrap_or_else(|| u64::from(page.saturating_sub(1)) * len);
        let has_more = start + len < self.num_found;
        SearchPage {
            records: self.docs,
            has_more,
        }
    }
}

/// One fetched page of normalized results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPage {
    /// Records in arrival order.
    pub records: Vec<BookRecord>,

    /// Whether further pages exist beyond this one.
    pub has_more: bool,
}

/// Classifies a raw response into a page of results or a search error.
///
/// - Status 0 means the host transport failed before an HTTP response
///   existed; the body carries the host's failure detail when it has one.
/// - Any non-2xx status is an HTTP failure with the code embedded in the
///   message.
/// - A 2xx body that does not decode as an envelope is a distinct parse
///   failure rather than being folded into the transport error.
///
/// # Errors
///
/// Returns [`BibliofindError::Network`], [`BibliofindError::Http`], or
/// [`BibliofindError::Parse`] as classified above.
pub fn parse_response(status: u16, body: &[u8], page: u32) -> Result<SearchPage> {
    if status == TRANSPORT_FAILURE_STATUS {
        let detail = String::from_utf8_lossy(body).trim().to_string();
        let message = if detail.is_empty() {
            GENERIC_FETCH_FAILURE.to_string()
        } else {
            detail
        };
        return Err(BibliofindError::Network(message));
    }

    if !(200..300).contains(&status) {
        return Err(BibliofindError::Http(status));
    }

    let envelope: SearchEnvelope =
        serde_json::from_slice(body).map_err(|e| BibliofindError::Parse(e.to_string()))?;

    Ok(envelope.into_page(page))
}

/// Deserializes `docs` leniently: anything that is not an array becomes an
/// empty list, and array entries that are not objects are skipped.
fn docs_or_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<BookRecord>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ok_page(body: &str, page: u32) -> SearchPage {
        parse_response(200, body.as_bytes(), page).expect("response should parse")
    }

    #[test]
    fn decodes_a_full_envelope() {
        let page = ok_page(
            r#"{
                "docs": [{
                    "key": "/works/OL1W",
                    "title": "Harry Potter",
                    "author_name": ["J.K. Rowling"],
                    "first_publish_year": 1997,
                    "cover_i": 123
                }],
                "numFound": 1,
                "start": 0
            }"#,
            1,
        );

        assert_eq!(page.records.len(), 1);
        assert_eq!(page.records[0].title, "Harry Potter");
        assert_eq!(page.records[0].first_publish_year, Some(1997));
        assert!(!page.has_more);
    }

    #[test]
    fn has_more_tracks_the_start_offset() {
        let more = ok_page(r#"{"docs": [{"title": "A"}], "numFound": 2, "start": 0}"#, 1);
        assert!(more.has_more);

        let done = ok_page(r#"{"docs": [{"title": "B"}], "numFound": 2, "start": 1}"#, 2);
        assert!(!done.has_more);

        let past_end = ok_page(r#"{"docs": [], "numFound": 2, "start": 2}"#, 3);
        assert!(!past_end.has_more);
    }

    #[test]
    fn missing_start_defaults_from_the_page_number() {
        let docs: Vec<String> = (0..100).map(|i| format!(r#"{{"title": "B{i}"}}"#)).collect();

        // page 2 with 100 docs implies start = 100; exactly 200 found ends it
        let body = format!(r#"{{"docs": [{}], "numFound": 200}}"#, docs.join(","));
        let page = ok_page(&body, 2);
        assert!(!page.has_more);

        let body = format!(r#"{{"docs": [{}], "numFound": 201}}"#, docs.join(","));
        let page = ok_page(&body, 2);
        assert!(page.has_more);

        let body = format!(r#"{{"docs": [{}], "numFound": 150}}"#, docs.join(","));
        let page = ok_page(&body, 1);
        assert!(page.has_more);
    }

    #[test]
    fn missing_num_found_means_no_further_pages() {
        let page = ok_page(r#"{"docs": [{"title": "A"}]}"#, 1);
        assert!(!page.has_more);
    }

    #[test]
    fn absent_or_malformed_docs_become_an_empty_page() {
        let absent = ok_page(r#"{"numFound": 0}"#, 1);
        assert!(absent.records.is_empty());

        let not_an_array = ok_page(r#"{"docs": "nope", "numFound": 3}"#, 1);
        assert!(not_an_array.records.is_empty());
    }

    #[test]
    fn http_failures_embed_the_status_code() {
        let err = parse_response(503, b"unavailable", 1).unwrap_err();
        assert_eq!(err.to_string(), "API returned status 503");
    }

    #[test]
    fn transport_failures_surface_the_host_detail() {
        let err = parse_response(0, b"dns error: no such host", 1).unwrap_err();
        assert_eq!(err.to_string(), "dns error: no such host");

        let err = parse_response(0, b"", 1).unwrap_err();
        assert_eq!(err.to_string(), "Something went wrong during fetch.");
    }

    #[test]
    fn undecodable_bodies_are_parse_failures() {
        let err = parse_response(200, b"<html>not json</html>", 1).unwrap_err();
        assert!(matches!(err, BibliofindError::Parse(_)));
        assert!(err.to_string().starts_with("Failed to decode search results:"));
    }
}
