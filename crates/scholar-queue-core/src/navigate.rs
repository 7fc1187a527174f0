use crate::NavigateError;
use crate::normalize::normalize_query;

/// Google Scholar's search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "https://scholar.google.com/scholar";

/// The search engine queries are sent to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchEngine {
    base_url: String,
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new(DEFAULT_SEARCH_URL)
    }
}

impl SearchEngine {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `<base>?q=<percent-encoded query>`.
    pub fn query_url(&self, query: &str) -> String {
        format!("{}?q={}", self.base_url, urlencoding::encode(query))
    }

    /// URL for a raw queue line: normalized first, then encoded.
    pub fn search_url(&self, raw: &str) -> String {
        self.query_url(&normalize_query(raw))
    }
}

/// Performs a full navigation to a URL (opening it in a browser, printing it, ...).
pub trait Navigator {
    fn navigate(&mut self, url: &str) -> Result<(), NavigateError>;
}

/// Navigator that records URLs instead of visiting them.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    pub visited: Vec<String>,
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, url: &str) -> Result<(), NavigateError> {
        self.visited.push(url.to_string());
        Ok(())
    }
}
