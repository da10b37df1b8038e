//! Verse API client.
//!
//! Talks to a Blessings365-style verse API:
//!
//! - `GET {base}/{translation}/multiple?verses=...` — verse text for a
//!   comma-separated list of reading ranges
//! - `GET {base}/{translation}/headings?book=...` — pericope headings for
//!   one book
//!
//! Failure handling follows the comparison contract: a failed verses fetch
//! is fatal for that translation and surfaces to the caller; a failed
//! headings fetch degrades to an empty heading set, and heading-less
//! display proceeds.

use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{HeadingsMap, Passage, VerseRecord};
use crate::plan::extract_unique_books;

/// Errors from verse fetches.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to fetch verses: {0}")]
    BadStatus(u16),
}

/// Result type for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// One heading span within a chapter: the heading text and the verse that
/// starts the pericope it introduces.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadingSpan {
    #[serde(deserialize_with = "crate::model::de_flexible_u32")]
    pub start: u32,
    pub heading: String,
}

/// Headings response for one book: chapter number → heading spans.
#[derive(Debug, Clone, Deserialize)]
pub struct HeadingsResponse {
    pub book: String,
    #[serde(default)]
    pub headings: HashMap<String, Vec<HeadingSpan>>,
}

impl HeadingsResponse {
    /// An empty response, the degraded form of a failed headings fetch.
    pub fn empty(book: impl Into<String>) -> Self {
        Self {
            book: book.into(),
            headings: HashMap::new(),
        }
    }
}

/// Flattens a headings response into the map the alignment engine consumes:
/// `"{book} {chapter}:{start}"` → heading text.
pub fn build_headings_map(response: &HeadingsResponse) -> HeadingsMap {
    let mut map = HeadingsMap::new();
    for (chapter, spans) in &response.headings {
        for span in spans {
            let key = format!("{} {}:{}", response.book, chapter, span.start);
            map.insert(key, span.heading.clone());
        }
    }
    map
}

/// Blocking client for the verse API.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    http: reqwest::blocking::Client,
}

impl Client {
    /// Creates a client for the given API base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Fetches verse records for a comma-separated verses string.
    ///
    /// Fatal on any transport or status failure: without verse text there
    /// is nothing to align for this translation.
    pub fn fetch_verses(&self, translation: &str, verses_string: &str) -> ApiResult<Vec<VerseRecord>> {
        let url = format!("{}/{}/multiple", self.base_url, translation);
        let response = self.http.get(url).query(&[("verses", verses_string)]).send()?;
        if !response.status().is_success() {
            return Err(ApiError::BadStatus(response.status().as_u16()));
        }
        Ok(response.json()?)
    }

    /// Fetches pericope headings for one book.
    ///
    /// Degrades to an empty response on any failure; headings are optional
    /// decoration and must never sink a comparison.
    pub fn fetch_headings(&self, translation: &str, book: &str) -> HeadingsResponse {
        let url = format!("{}/{}/headings", self.base_url, translation);
        let result = self
            .http
            .get(url)
            .query(&[("book", book)])
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json::<HeadingsResponse>());
        match result {
            Ok(response) => response,
            Err(_) => HeadingsResponse::empty(book),
        }
    }

    /// Fetches one translation's full data for a day: verses plus the
    /// merged headings of every book the verses string touches.
    pub fn fetch_day_data(&self, translation: &str, verses_string: &str) -> ApiResult<Passage> {
        let verses = self.fetch_verses(translation, verses_string)?;

        let mut headings = HeadingsMap::new();
        for book in extract_unique_books(verses_string) {
            let response = self.fetch_headings(translation, &book);
            headings.extend(build_headings_map(&response));
        }

        Ok(Passage::new(verses, headings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verses_payload() {
        let json = r#"[
            {"book": "Genesis", "chapter": 1, "verse": 1, "content": "In the beginning..."},
            {"book": "Genesis", "chapter": "1", "verse": "2", "content": "The earth was..."}
        ]"#;
        let verses: Vec<VerseRecord> = serde_json::from_str(json).unwrap();
        assert_eq!(verses.len(), 2);
        assert_eq!(verses[1].chapter, 1);
        assert_eq!(verses[1].verse, 2);
    }

    #[test]
    fn test_parse_headings_payload() {
        let json = r#"{
            "book": "Genesis",
            "headings": {
                "1": [
                    {"start": 1, "heading": "The Creation of the World"},
                    {"start": "26", "heading": "The Creation of Man"}
                ],
                "2": [{"start": 4, "heading": "The Garden of Eden"}]
            }
        }"#;
        let response: HeadingsResponse = serde_json::from_str(json).unwrap();
        let map = build_headings_map(&response);

        assert_eq!(map.len(), 3);
        assert_eq!(
            map.get("Genesis 1:1").map(String::as_str),
            Some("The Creation of the World")
        );
        assert_eq!(
            map.get("Genesis 1:26").map(String::as_str),
            Some("The Creation of Man")
        );
        assert_eq!(
            map.get("Genesis 2:4").map(String::as_str),
            Some("The Garden of Eden")
        );
    }

    #[test]
    fn test_parse_headings_payload_without_headings_field() {
        let response: HeadingsResponse = serde_json::from_str(r#"{"book": "Jude"}"#).unwrap();
        assert!(build_headings_map(&response).is_empty());
    }

    #[test]
    fn test_empty_response_has_no_headings() {
        let response = HeadingsResponse::empty("Genesis");
        assert_eq!(response.book, "Genesis");
        assert!(build_headings_map(&response).is_empty());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = Client::new("https://api.example.test/");
        assert_eq!(client.base_url, "https://api.example.test");
    }
}
