//! Book record models and the derived-key identity rule.
//!
//! This module defines the two record shapes the plugin works with:
//! [`BookRecord`], the raw search result as received from the Open Library
//! envelope, and [`FavoriteRecord`], the trimmed projection persisted to the
//! favorites slot. Both carry display helpers used by the UI layer.
//!
//! Records are addressed by a derived key with a fallback chain: the work
//! `key` if present, else `cover_edition_key`, else `"{title}-{year}"` with
//! an empty year segment when the publish year is absent. Two records with
//! the same derived key are treated as the same book for favoriting, even
//! though the final fallback is not guaranteed unique (two undated books
//! sharing a title collide).

use serde::{Deserialize, Serialize};

/// Base URL for the Open Library cover image service.
pub const COVERS_BASE: &str = "https://covers.openlibrary.org/b/id";

/// Base URL for outbound Open Library record links.
pub const OPEN_LIBRARY_BASE: &str = "https://openlibrary.org";

/// A book record as received from the search API.
///
/// Only the attributes the plugin consumes are modeled; everything else in
/// the envelope's `docs` entries is ignored during deserialization. All
/// fields except `title` are routinely absent in real responses, so each one
/// defaults independently.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookRecord {
    /// Opaque work identifier (e.g. `/works/OL1W`), may be absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    /// Alternate edition identifier used as a key fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_edition_key: Option<String>,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Ordered author names, absent when the record carries none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<Vec<String>>,

    /// Year of first publication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i64>,

    /// Cover image id for the covers service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_i: Option<i64>,
}

impl BookRecord {
    /// Computes the stable key used to address this record.
    ///
    /// Fallback chain: `key`, then `cover_edition_key`, then
    /// `"{title}-{first_publish_year}"` where an absent year leaves the
    /// segment after the dash empty. Pure function of the four inputs.
    #[must_use]
    pub fn derived_key(&self) -> String {
        if let Some(key) = &self.key {
            return key.clone();
        }
        if let Some(key) = &self.cover_edition_key {
            return key.clone();
        }
        let year = self
            .first_publish_year
            .map(|y| y.to_string())
            .unwrap_or_default();
        format!("{}-{year}", self.title)
    }

    /// Returns the medium cover image URL, if the record has a cover id.
    #[must_use]
    pub fn cover_url(&self) -> Option<String> {
        self.cover_i.map(|id| format!("{COVERS_BASE}/{id}-M.jpg"))
    }

    /// Returns the outbound Open Library URL, if the record has a work key.
    #[must_use]
    pub fn open_library_url(&self) -> Option<String> {
        self.key
            .as_ref()
            .map(|key| format!("{OPEN_LIBRARY_BASE}{key}"))
    }

    /// All authors joined with commas, or "Unknown author" when absent.
    #[must_use]
    pub fn display_authors(&self) -> String {
        self.author_name
            .as_ref()
            .filter(|names| !names.is_empty())
            .map_or_else(|| "Unknown author".to_string(), |names| names.join(", "))
    }
}

/// Formats a first-publish year for display, using an em-dash when absent.
#[must_use]
pub fn format_year(year: Option<i64>) -> String {
    year.map_or_else(|| "\u{2014}".to_string(), |y| y.to_string())
}

/// A favorited book as persisted in the favorites slot.
///
/// Projection of [`BookRecord`] retaining only the fields the favorites
/// panel renders. The `key` field stores the *derived* key, not the raw work
/// key, so removal matches whatever identity the record was saved under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    /// Derived key the favorite is stored under.
    pub key: String,

    /// Display title.
    #[serde(default)]
    pub title: String,

    /// Ordered author names.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<Vec<String>>,

    /// Year of first publication.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_publish_year: Option<i64>,

    /// Cover image id for the covers service.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_i: Option<i64>,
}

impl FavoriteRecord {
    /// Projects a search result into its persisted favorite form.
    #[must_use]
    pub fn from_book(book: &BookRecord) -> Self {
        Self {
            key: book.derived_key(),
            title: book.title.clone(),
            author_name: book.author_name.clone(),
            first_publish_year: book.first_publish_year,
            cover_i: book.cover_i,
        }
    }

    /// Returns the small thumbnail URL used by the favorites panel.
    #[must_use]
    pub fn thumbnail_url(&self) -> Option<String> {
        self.cover_i.map(|id| format!("{COVERS_BASE}/{id}-S.jpg"))
    }

    /// Returns the outbound Open Library URL when the stored key is a
    /// site-relative work key (the first two fallbacks of the derived-key
    /// chain). Title-year fallback keys have no page to link to.
    #[must_use]
    pub fn open_library_url(&self) -> Option<String> {
        if self.key.starts_with('/') {
            Some(format!("{OPEN_LIBRARY_BASE}{}", self.key))
        } else {
            None
        }
    }

    /// The first two authors joined with commas, or "Unknown author".
    #[must_use]
    pub fn display_authors(&self) -> String {
        self.author_name
            .as_ref()
            .filter(|names| !names.is_empty())
            .map_or_else(
                || "Unknown author".to_string(),
                |names| {
                    names
                        .iter()
                        .take(2)
                        .cloned()
                        .collect::<Vec<_>>()
                        .join(", ")
                },
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(
        key: Option<&str>,
        cover_edition_key: Option<&str>,
        title: &str,
        year: Option<i64>,
    ) -> BookRecord {
        BookRecord {
            key: key.map(str::to_string),
            cover_edition_key: cover_edition_key.map(str::to_string),
            title: title.to_string(),
            first_publish_year: year,
            ..BookRecord::default()
        }
    }

    #[test]
    fn derived_key_prefers_work_key() {
        let record = book(Some("/works/OL1W"), Some("OL1M"), "Dune", Some(1965));
        assert_eq!(record.derived_key(), "/works/OL1W");
    }

    #[test]
    fn derived_key_falls_back_to_cover_edition_key() {
        let record = book(None, Some("OL1M"), "Dune", Some(1965));
        assert_eq!(record.derived_key(), "OL1M");
    }

    #[test]
    fn derived_key_falls_back_to_title_and_year() {
        let record = book(None, None, "Dune", Some(1965));
        assert_eq!(record.derived_key(), "Dune-1965");
    }

    #[test]
    fn derived_key_with_absent_year_keeps_trailing_dash() {
        let record = book(None, None, "Untitled", None);
        assert_eq!(record.derived_key(), "Untitled-");
    }

    #[test]
    fn derived_key_is_stable_across_calls() {
        let record = book(None, None, "", None);
        assert_eq!(record.derived_key(), record.derived_key());
        assert_eq!(record.derived_key(), "-");
    }

    #[test]
    fn favorite_projection_stores_derived_key() {
        let record = BookRecord {
            key: None,
            cover_edition_key: None,
            title: "Untitled".to_string(),
            author_name: Some(vec!["A".to_string(), "B".to_string(), "C".to_string()]),
            first_publish_year: None,
            cover_i: Some(42),
        };
        let favorite = FavoriteRecord::from_book(&record);
        assert_eq!(favorite.key, "Untitled-");
        assert_eq!(favorite.title, "Untitled");
        assert_eq!(favorite.cover_i, Some(42));
        assert_eq!(favorite.display_authors(), "A, B");
    }

    #[test]
    fn display_authors_handles_absent_names() {
        let record = book(None, None, "Dune", None);
        assert_eq!(record.display_authors(), "Unknown author");

        let favorite = FavoriteRecord::from_book(&record);
        assert_eq!(favorite.display_authors(), "Unknown author");
    }

    #[test]
    fn year_formatting_uses_em_dash_when_absent() {
        assert_eq!(format_year(Some(1997)), "1997");
        assert_eq!(format_year(None), "\u{2014}");
    }

    #[test]
    fn cover_urls_use_the_covers_service() {
        let mut record = book(Some("/works/OL1W"), None, "Dune", None);
        record.cover_i = Some(123);
        assert_eq!(
            record.cover_url().as_deref(),
            Some("https://covers.openlibrary.org/b/id/123-M.jpg")
        );
        assert_eq!(
            FavoriteRecord::from_book(&record).thumbnail_url().as_deref(),
            Some("https://covers.openlibrary.org/b/id/123-S.jpg")
        );

        record.cover_i = None;
        assert!(record.cover_url().is_none());
    }

    #[test]
    fn open_library_urls_require_a_work_key() {
        let with_key = book(Some("/works/OL1W"), None, "Dune", None);
        assert_eq!(
            with_key.open_library_url().as_deref(),
            Some("https://openlibrary.org/works/OL1W")
        );

        let without_key = book(None, None, "Dune", Some(1965));
        assert!(without_key.open_library_url().is_none());
        assert!(FavoriteRecord::from_book(&without_key)
            .open_library_url()
            .is_none());
    }
}
