//! Search client for the Open Library search API.
//!
//! This module owns the request/response halves of a single search call:
//! [`query`] builds the percent-encoded request URL from the term, field
//! selector, and page number, and [`envelope`] classifies the raw response
//! (status code plus body bytes) into either a page of records with a
//! "more available" flag or one of the search error variants.
//!
//! The plugin issues exactly one network call per user action and never
//! retries; the actual transport is the Zellij host's web request facility,
//! driven from the plugin shim. Everything in this module is pure and
//! synchronous, which keeps it testable without a network.

pub mod envelope;
pub mod query;

pub use envelope::{parse_response, SearchEnvelope, SearchPage};
pub use query::{build_search_url, SearchField};
