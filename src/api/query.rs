//! Search URL construction and the query field selector.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

/// Which bibliographic attribute a search targets.
///
/// Constrains which upstream query parameter is populated: `title=`,
/// `author=`, or the general `q=`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchField {
    /// Search by work title (`title=`).
    #[default]
    Title,
    /// Search by author name (`author=`).
    Author,
    /// General full-record search (`q=`).
    General,
}

impl SearchField {
    /// The upstream query parameter name for this field.
    #[must_use]
    pub const fn query_param(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Author => "author",
            Self::General => "q",
        }
    }

    /// Short label shown next to the search input.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "Title",
            Self::Author => "Author",
            Self::General => "Any",
        }
    }

    /// The next selector in the Tab-cycle order.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Title => Self::Author,
            Self::Author => Self::General,
            Self::General => Self::Title,
        }
    }

    /// Parses a configuration value into a field selector.
    ///
    /// Accepts the query parameter names as well as the labels, case
    /// insensitively. Returns `None` for unknown values.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "title" => Some(Self::Title),
            "author" => Some(Self::Author),
            "q" | "any" | "general" => Some(Self::General),
            _ => None,
        }
    }
}

/// Builds the search request URL for one page of results.
///
/// The term is trimmed and percent-encoded; the field selector picks the
/// query parameter. The caller is responsible for rejecting empty terms
/// before building a URL.
#[must_use]
pub fn build_search_url(base: &str, term: &str, field: SearchField, page: u32) -> String {
    format!(
        "{base}/search.json?{}={}&page={page}",
        field.query_param(),
        encode_component(term.trim())
    )
}

fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, NON_ALPHANUMERIC).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://openlibrary.org";

    #[test]
    fn builds_title_urls() {
        assert_eq!(
            build_search_url(BASE, "harry potter", SearchField::Title, 1),
            "https://openlibrary.org/search.json?title=harry%20potter&page=1"
        );
    }

    #[test]
    fn builds_author_and_general_urls() {
        assert_eq!(
            build_search_url(BASE, "asimov", SearchField::Author, 1),
            "https://openlibrary.org/search.json?author=asimov&page=1"
        );
        assert_eq!(
            build_search_url(BASE, "asimov", SearchField::General, 3),
            "https://openlibrary.org/search.json?q=asimov&page=3"
        );
    }

    #[test]
    fn trims_and_encodes_the_term() {
        assert_eq!(
            build_search_url(BASE, "  el niño & co.  ", SearchField::Title, 2),
            "https://openlibrary.org/search.json?title=el%20ni%C3%B1o%20%26%20co%2E&page=2"
        );
    }

    #[test]
    fn field_cycle_covers_all_selectors() {
        assert_eq!(SearchField::Title.next(), SearchField::Author);
        assert_eq!(SearchField::Author.next(), SearchField::General);
        assert_eq!(SearchField::General.next(), SearchField::Title);
    }

    #[test]
    fn parses_field_names_from_configuration() {
        assert_eq!(SearchField::from_name("Title"), Some(SearchField::Title));
        assert_eq!(SearchField::from_name("author"), Some(SearchField::Author));
        assert_eq!(SearchField::from_name("q"), Some(SearchField::General));
        assert_eq!(SearchField::from_name("any"), Some(SearchField::General));
        assert_eq!(SearchField::from_name("isbn"), None);
    }
}
