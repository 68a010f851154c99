//! Business-rule validation of extracted identifiers.
//!
//! Deliberately permissive: a query without a crisp identifier is still
//! accepted when it reads like a general question or carries any weak
//! domain signal. Only queries with no signal at all get MISSING_HEADER.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use contractnl_core::{
    EntityFilter, Header, ValidationError, ERROR_INVALID_HEADER, ERROR_MISSING_HEADER,
};

/// Substrings that make a query answerable in aggregate.
const GENERAL_QUERY_WORDS: &[&str] = &[
    "all", "list", "show", "status", "details", "expired", "active", "created", "contracts",
    "parts",
];

/// Substrings hinting at a domain query even without an identifier.
const DOMAIN_HINT_WORDS: &[&str] = &["contract", "part", "customer", "account", "number"];

static SHORT_ALNUM_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-z]{1,4}\d+[a-z0-9]*\b").unwrap());
static DIGIT_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d{4,}").unwrap());

pub const MISSING_HEADER_MESSAGE: &str = "Please include at least one identifier (contract, part or customer number, customer name, creator) or a filter such as a status or date";

/// Validate one query. `lower` is the lowercased query text.
pub fn validate(
    issues: &[String],
    header: &Header,
    entities: &[EntityFilter],
    lower: &str,
) -> Vec<ValidationError> {
    let mut errors: Vec<ValidationError> = issues
        .iter()
        .map(|issue| ValidationError::blocker(ERROR_INVALID_HEADER, issue.as_str()))
        .collect();

    let has_valid_header = header.has_identifier();
    let general = is_general_query(lower, entities);

    if !has_valid_header && entities.is_empty() && !general && !has_domain_evidence(lower) {
        errors.push(ValidationError::blocker(ERROR_MISSING_HEADER, MISSING_HEADER_MESSAGE));
    }

    debug!(
        has_valid_header,
        general,
        errors = errors.len(),
        "Validated query"
    );
    errors
}

/// Broad signal that the query asks for an aggregate answer.
pub fn is_general_query(lower: &str, entities: &[EntityFilter]) -> bool {
    !entities.is_empty() || GENERAL_QUERY_WORDS.iter().any(|w| lower.contains(w))
}

fn has_domain_evidence(lower: &str) -> bool {
    DOMAIN_HINT_WORDS.iter().any(|w| lower.contains(w))
        || SHORT_ALNUM_RE.is_match(lower)
        || DIGIT_RUN_RE.is_match(lower)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contractnl_core::Severity;

    #[test]
    fn test_issues_become_blockers() {
        let issues = vec!["Contract number '123' must be 6+ digits".to_string()];
        let errors = validate(&issues, &Header::default(), &[], "show contract 123");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "INVALID_HEADER");
        assert_eq!(errors[0].severity, Severity::Blocker);
        assert!(errors[0].message.contains("123"));
    }

    #[test]
    fn test_general_query_accepted() {
        assert!(validate(&[], &Header::default(), &[], "show all contracts").is_empty());
    }

    #[test]
    fn test_entities_make_query_valid() {
        let entities = vec![EntityFilter::new("STATUS", "=", "PENDING", "status_keyword")];
        assert!(validate(&[], &Header::default(), &entities, "pending ones").is_empty());
    }

    #[test]
    fn test_weak_domain_evidence_accepted() {
        assert!(validate(&[], &Header::default(), &[], "what about the customer").is_empty());
        assert!(validate(&[], &Header::default(), &[], "anything on x12").is_empty());
        assert!(validate(&[], &Header::default(), &[], "what is 98765").is_empty());
    }

    #[test]
    fn test_missing_header() {
        let errors = validate(&[], &Header::default(), &[], "hello there");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, "MISSING_HEADER");
        assert!(errors[0].severity.is_blocker());
    }

    #[test]
    fn test_header_present() {
        let header = Header {
            created_by: Some("vinod".into()),
            ..Default::default()
        };
        assert!(validate(&[], &header, &[], "by vinod").is_empty());
    }
}
