//! Identifier and filter extraction.
//!
//! Two independent passes over the same query: `header` reads identifiers
//! (contract/part/customer numbers, customer and creator names) from the
//! tokens, `filters` reads status and date predicates from the full
//! lowercase text by keyword triggers.

pub mod filters;
pub mod header;

use contractnl_core::{EntityFilter, Header};
use serde::Serialize;

use crate::tokenize::Token;

pub use filters::extract_entities;
pub use header::{extract_header, HeaderExtraction, QueryContext};

/// Combined extraction result for one query.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Extraction {
    pub header: Header,
    /// Format problems found on identifier-shaped tokens.
    pub issues: Vec<String>,
    pub entities: Vec<EntityFilter>,
}

/// Run both extraction passes. `lower` is the lowercased query text.
pub fn extract_all(lower: &str, tokens: &[Token]) -> Extraction {
    let HeaderExtraction { header, issues } = extract_header(lower, tokens);
    let entities = extract_entities(lower);
    Extraction {
        header,
        issues,
        entities,
    }
}
