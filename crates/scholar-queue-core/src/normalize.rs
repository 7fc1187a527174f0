use once_cell::sync::Lazy;
use regex::Regex;

/// How a queued line will be searched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryKind {
    /// A DOI was found somewhere in the line.
    Doi(String),
    /// No DOI; the line is searched as a free-text title.
    Title(String),
}

// `-u`: digits and case folding stay ASCII.
static DOI_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i-u)10\.\d{4,9}/[-._;()/:A-Z0-9]+").unwrap());

/// Find the first DOI in `text`.
///
/// Handles bare DOIs (`10.1234/example`), prefixed ones (`doi:10.1234/example`)
/// and resolver URLs (`https://doi.org/10.1234/example`). Only the first match
/// is returned; a second DOI on the same line is ignored.
pub fn extract_doi(text: &str) -> Option<&str> {
    DOI_RE.find(text).map(|m| m.as_str())
}

/// Rewrite a raw queue line into the query sent to the search engine.
///
/// A line containing a DOI collapses to `doi:<doi>`; anything else is returned
/// unchanged and searched as a title.
pub fn normalize_query(raw: &str) -> String {
    match extract_doi(raw) {
        Some(doi) => format!("doi:{}", doi),
        None => raw.to_string(),
    }
}

/// Classify a raw queue line.
pub fn classify(raw: &str) -> QueryKind {
    match extract_doi(raw) {
        Some(doi) => QueryKind::Doi(doi.to_string()),
        None => QueryKind::Title(raw.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_doi() {
        assert_eq!(normalize_query("10.1000/xyz123"), "doi:10.1000/xyz123");
    }

    #[test]
    fn resolver_url_collapses_to_doi() {
        assert_eq!(
            normalize_query("https://doi.org/10.1000/xyz123"),
            "doi:10.1000/xyz123"
        );
        assert_eq!(
            normalize_query("see http://dx.doi.org/10.1145/3183713.3196894 for details"),
            "doi:10.1145/3183713.3196894"
        );
    }

    #[test]
    fn title_passes_through() {
        assert_eq!(
            normalize_query("Attention Is All You Need"),
            "Attention Is All You Need"
        );
    }

    #[test]
    fn doi_is_case_insensitive() {
        assert_eq!(
            normalize_query("10.1002/ANIE.201915678"),
            "doi:10.1002/ANIE.201915678"
        );
        assert_eq!(extract_doi("10.1002/anie.201915678"), Some("10.1002/anie.201915678"));
    }

    #[test]
    fn doi_with_parentheses_and_colons() {
        assert_eq!(
            extract_doi("J Chronic Dis 10.1016/0021-9681(87)90171-8."),
            Some("10.1016/0021-9681(87)90171-8.")
        );
        assert_eq!(
            extract_doi("10.1002/(SICI)1097-4571:AID"),
            Some("10.1002/(SICI)1097-4571:AID")
        );
    }

    #[test]
    fn registrant_needs_four_to_nine_digits() {
        assert_eq!(extract_doi("10.123/abc"), None);
        assert_eq!(extract_doi("10.1234/abc"), Some("10.1234/abc"));
        // Ten digits: the scan still finds nothing anchored at `10.` because
        // the slash must follow within nine digits.
        assert_eq!(extract_doi("10.1234567890/abc"), None);
    }

    #[test]
    fn first_match_wins() {
        assert_eq!(
            normalize_query("10.1000/first and 10.2000/second"),
            "doi:10.1000/first"
        );
    }

    #[test]
    fn whitespace_ends_the_doi() {
        assert_eq!(
            normalize_query("Some Title 10.1000/abc123 (2020)"),
            "doi:10.1000/abc123"
        );
    }

    #[test]
    fn short_registrant_is_a_title() {
        // `10.1/abcd` has a single-digit registrant so it is searched verbatim.
        assert_eq!(normalize_query("10.1/abcd"), "10.1/abcd");
        assert_eq!(classify("10.1/abcd"), QueryKind::Title("10.1/abcd".into()));
    }

    #[test]
    fn doi_match_is_ascii_only() {
        // Arabic-Indic and fullwidth digits are not a registrant
        let arabic = "10.\u{661}\u{662}\u{663}\u{664}/abc";
        assert_eq!(normalize_query(arabic), arabic);
        let fullwidth = "10.\u{ff11}\u{ff12}\u{ff13}\u{ff14}/abc";
        assert_eq!(normalize_query(fullwidth), fullwidth);
        // Kelvin sign and long s fold to K/S under Unicode rules; here they end the DOI
        assert_eq!(extract_doi("10.1000/ab\u{212a}\u{17f}"), Some("10.1000/ab"));
        assert_eq!(extract_doi("10.1000/abKs"), Some("10.1000/abKs"));
    }

    #[test]
    fn classify_doi() {
        assert_eq!(
            classify("https://doi.org/10.1000/xyz123"),
            QueryKind::Doi("10.1000/xyz123".into())
        );
    }
}
