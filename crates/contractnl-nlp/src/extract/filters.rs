//! Filter entity extraction: status and date predicates from keyword triggers.
//!
//! Runs over the full lowercase query, independent of tokenization. Entities
//! are appended in detection order.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use contractnl_core::EntityFilter;

pub const ATTR_CREATED_DATE: &str = "CREATED_DATE";
pub const ATTR_STATUS: &str = "STATUS";

pub const OP_EQUALS: &str = "=";
pub const OP_BETWEEN: &str = "between";

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:19|20)\d{2}\b").unwrap());
static IN_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bin\s").unwrap());
static RANGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:after|before|between)\b").unwrap());

/// Day-month-year, month-year, or a bare year; leftmost match wins.
static DATE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"\b\d{1,2}-\w{3}-\d{4}\b|\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*\s+\d{4}\b|\b(?:19|20)\d{2}\b",
    )
    .unwrap()
});

static STATUS_TRIGGER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:status|expired|active|inactive|pending)\b").unwrap());

/// Status values in priority order.
static STATUS_VALUES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"\bexpired\b").unwrap(), "EXPIRED"),
        (Regex::new(r"\bactive\b").unwrap(), "ACTIVE"),
        (Regex::new(r"\binactive\b").unwrap(), "INACTIVE"),
        (Regex::new(r"\bpending\b").unwrap(), "PENDING"),
    ]
});

const FAILURE_KEYWORDS: &[&str] = &["failed", "failure", "issues", "defect"];

/// Extract filter entities from the lowercase query text.
pub fn extract_entities(lower: &str) -> Vec<EntityFilter> {
    let mut entities = Vec::new();

    if let Some(year) = YEAR_RE.find(lower) {
        if lower.contains("created in") || IN_WORD_RE.is_match(lower) {
            entities.push(EntityFilter::new(
                ATTR_CREATED_DATE,
                OP_EQUALS,
                year.as_str(),
                "year_pattern",
            ));
        }
    }

    if RANGE_RE.is_match(lower) {
        if let Some(date) = DATE_TOKEN_RE.find(lower) {
            entities.push(EntityFilter::new(
                ATTR_CREATED_DATE,
                OP_BETWEEN,
                date.as_str(),
                "date_range",
            ));
        }
    }

    if STATUS_TRIGGER_RE.is_match(lower) {
        if let Some((_, status)) = STATUS_VALUES.iter().find(|(re, _)| re.is_match(lower)) {
            entities.push(EntityFilter::new(ATTR_STATUS, OP_EQUALS, *status, "status_keyword"));
        }
    }

    if FAILURE_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
        entities.push(EntityFilter::new(ATTR_STATUS, OP_EQUALS, "FAILED", "failure_keyword"));
    }

    debug!(count = entities.len(), "Extracted filter entities");
    entities
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_status() {
        let entities = extract_entities("expired contracts");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].attribute, "STATUS");
        assert_eq!(entities[0].operation, "=");
        assert_eq!(entities[0].value, "EXPIRED");
    }

    #[test]
    fn test_status_priority() {
        let entities = extract_entities("inactive contracts");
        assert_eq!(entities[0].value, "INACTIVE");

        let entities = extract_entities("active or expired contracts");
        assert_eq!(entities[0].value, "EXPIRED");

        // A bare "status" has no value to filter on.
        assert!(extract_entities("contract 123456 status").is_empty());
    }

    #[test]
    fn test_created_in_year() {
        let entities = extract_entities("contracts created in 2020");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].attribute, "CREATED_DATE");
        assert_eq!(entities[0].operation, "=");
        assert_eq!(entities[0].value, "2020");

        // A year without "in" is not a created-date filter on its own.
        assert!(extract_entities("contract 2020 summary").is_empty());
    }

    #[test]
    fn test_date_range() {
        let entities = extract_entities("contracts created by vinod after 1-jan-2020");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].attribute, "CREATED_DATE");
        assert_eq!(entities[0].operation, "between");
        assert_eq!(entities[0].value, "1-jan-2020");

        let entities = extract_entities("contracts before march 2021");
        assert_eq!(entities[0].value, "march 2021");

        // No date-like text: nothing to bound the range with.
        assert!(extract_entities("contracts after renewal").is_empty());
    }

    #[test]
    fn test_failure_adds_to_status() {
        let entities = extract_entities("show expired contract 123456 failed parts");
        let values: Vec<&str> = entities.iter().map(|e| e.value.as_str()).collect();
        assert_eq!(values, vec!["EXPIRED", "FAILED"]);
        assert_eq!(entities[1].source, "failure_keyword");
    }

    #[test]
    fn test_detection_order() {
        let entities = extract_entities("active contracts created in 2019 between 2019 and 2021 with defects");
        let attrs: Vec<(&str, &str)> = entities
            .iter()
            .map(|e| (e.attribute.as_str(), e.operation.as_str()))
            .collect();
        assert_eq!(
            attrs,
            vec![
                ("CREATED_DATE", "="),
                ("CREATED_DATE", "between"),
                ("STATUS", "="),
                ("STATUS", "="),
            ]
        );
    }
}
