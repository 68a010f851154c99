//! Response assembly: packages pipeline output into a `QueryResult`.
//!
//! Pure data transformation; no routing or validation decisions here.

use contractnl_core::{
    ActionType, EntityFilter, Header, InputTracking, QueryMetadata, QueryResult, QueryType,
    ValidationError, ERROR_MISSING_HEADER, ERROR_PROCESSING,
};

use crate::route::Route;
use crate::spell::CorrectionResult;

/// Display fields requested by keyword, checked in this order.
const REQUESTED_FIELDS: &[(&[&str], &str)] = &[
    (&["effective date"], "EFFECTIVE_DATE"),
    (&["status"], "STATUS"),
    (&["expiration", "expiry"], "EXPIRATION_DATE"),
    (&["price", "cost"], "TOTAL_VALUE"),
    (&["customer number", "account number"], "CUSTOMER_NUMBER"),
    (&["created by", "creator"], "CREATED_BY"),
    (&["created date", "creation date", "create date"], "CREATED_DATE"),
    (&["description"], "DESCRIPTION"),
    (&["lead time"], "LEAD_TIME"),
    (&["moq", "minimum order"], "MOQ"),
    (&["uom", "unit of measure"], "UOM"),
    (&["payment terms"], "PAYMENT_TERMS"),
    (&["incoterms"], "INCOTERMS"),
];

/// Everything the assembler packages for one query.
pub struct AssemblyInput<'a> {
    pub correction: &'a CorrectionResult,
    /// Lowercased text the later stages read.
    pub lower: &'a str,
    pub header: Header,
    pub entities: Vec<EntityFilter>,
    pub errors: Vec<ValidationError>,
    pub route: Route,
    pub processing_time_ms: f64,
}

/// Build the final result.
pub fn assemble(input: AssemblyInput<'_>) -> QueryResult {
    let display_entities = display_entities(input.route.query_type, &input.entities, input.lower);

    let mut header = input.header;
    header.input_tracking = InputTracking {
        original_input: input.correction.original.clone(),
        corrected_input: input.correction.corrected.clone(),
        correction_confidence: input.correction.confidence,
    };

    QueryResult {
        header,
        query_metadata: QueryMetadata {
            query_type: input.route.query_type,
            action_type: input.route.action_type,
            processing_time_ms: input.processing_time_ms,
        },
        entities: input.entities,
        display_entities,
        errors: input.errors,
    }
}

/// Defaults for the query type, then entity attributes, then requested
/// fields; deduplicated in first-seen order.
pub fn display_entities(query_type: QueryType, entities: &[EntityFilter], lower: &str) -> Vec<String> {
    let defaults: &[&str] = match query_type {
        QueryType::Contracts => &["CONTRACT_NUMBER", "CUSTOMER_NAME"],
        QueryType::Parts => &["PART_NUMBER", "DESCRIPTION"],
    };

    let mut fields: Vec<String> = Vec::new();
    let mut push = |field: &str| {
        if !fields.iter().any(|f| f == field) {
            fields.push(field.to_string());
        }
    };

    defaults.iter().for_each(|f| push(f));
    entities.iter().for_each(|e| push(&e.attribute));
    for (keywords, field) in REQUESTED_FIELDS {
        if keywords.iter().any(|kw| lower.contains(kw)) {
            push(field);
        }
    }

    fields
}

/// Result for empty input: one BLOCKER, nothing else populated.
pub fn empty_input_result(original: &str, processing_time_ms: f64) -> QueryResult {
    error_result(
        original,
        ValidationError::blocker(ERROR_MISSING_HEADER, "Query text is empty"),
        processing_time_ms,
    )
}

/// Fixed-shape result for an internal failure caught at the pipeline boundary.
pub fn processing_error_result(original: &str, message: &str, processing_time_ms: f64) -> QueryResult {
    error_result(
        original,
        ValidationError::blocker(ERROR_PROCESSING, format!("Error processing query: {}", message)),
        processing_time_ms,
    )
}

fn error_result(original: &str, error: ValidationError, processing_time_ms: f64) -> QueryResult {
    QueryResult {
        header: Header {
            input_tracking: InputTracking::uncorrected(original),
            ..Default::default()
        },
        query_metadata: QueryMetadata {
            query_type: QueryType::Contracts,
            action_type: ActionType::Error,
            processing_time_ms,
        },
        entities: Vec::new(),
        display_entities: Vec::new(),
        errors: vec![error],
    }
}
