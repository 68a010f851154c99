//! Query result model: the JSON shape handed to the UI layer.
//!
//! Every optional field serializes as an explicit `null`; consumers rely on
//! the keys always being present.

use serde::{Deserialize, Serialize};

use crate::error::Result;

pub const ERROR_INVALID_HEADER: &str = "INVALID_HEADER";
pub const ERROR_MISSING_HEADER: &str = "MISSING_HEADER";
pub const ERROR_PROCESSING: &str = "PROCESSING_ERROR";

/// Top-level result of processing one query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub header: Header,
    #[serde(rename = "queryMetadata")]
    pub query_metadata: QueryMetadata,
    pub entities: Vec<EntityFilter>,
    #[serde(rename = "displayEntities")]
    pub display_entities: Vec<String>,
    pub errors: Vec<ValidationError>,
}

impl QueryResult {
    /// True if any error carries BLOCKER severity.
    pub fn has_blocker(&self) -> bool {
        self.errors.iter().any(|e| e.severity.is_blocker())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Structured identifiers extracted from a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Header {
    #[serde(rename = "contractNumber")]
    pub contract_number: Option<String>,
    #[serde(rename = "partNumber")]
    pub part_number: Option<String>,
    #[serde(rename = "customerNumber")]
    pub customer_number: Option<String>,
    #[serde(rename = "customerName")]
    pub customer_name: Option<String>,
    #[serde(rename = "createdBy")]
    pub created_by: Option<String>,
    #[serde(rename = "inputTracking")]
    pub input_tracking: InputTracking,
}

impl Header {
    /// True if any identifier field is set.
    pub fn has_identifier(&self) -> bool {
        self.contract_number.is_some()
            || self.part_number.is_some()
            || self.customer_number.is_some()
            || self.customer_name.is_some()
            || self.created_by.is_some()
    }
}

/// Original and spell-corrected input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InputTracking {
    #[serde(rename = "originalInput")]
    pub original_input: String,
    /// `None` means no word was corrected.
    #[serde(rename = "correctedInput")]
    pub corrected_input: Option<String>,
    /// Fraction of words replaced, in `[0, 1]`.
    #[serde(rename = "correctionConfidence")]
    pub correction_confidence: f64,
}

impl InputTracking {
    pub fn uncorrected(original: impl Into<String>) -> Self {
        Self {
            original_input: original.into(),
            corrected_input: None,
            correction_confidence: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryMetadata {
    #[serde(rename = "queryType")]
    pub query_type: QueryType,
    #[serde(rename = "actionType")]
    pub action_type: ActionType,
    /// Wall time of the pipeline run. Informational only.
    #[serde(rename = "processingTimeMs")]
    pub processing_time_ms: f64,
}

/// Which data family a query targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QueryType {
    Contracts,
    Parts,
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            QueryType::Contracts => write!(f, "CONTRACTS"),
            QueryType::Parts => write!(f, "PARTS"),
        }
    }
}

/// Routing tag selecting the downstream data operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionType {
    #[serde(rename = "error")]
    Error,
    #[serde(rename = "contracts_by_contractNumber")]
    ContractsByContractNumber,
    #[serde(rename = "parts_by_partNumber")]
    PartsByPartNumber,
    #[serde(rename = "contracts_by_customerNumber")]
    ContractsByCustomerNumber,
    #[serde(rename = "contracts_by_customerName")]
    ContractsByCustomerName,
    #[serde(rename = "contracts_by_createdBy")]
    ContractsByCreatedBy,
    #[serde(rename = "contracts_by_date")]
    ContractsByDate,
    #[serde(rename = "contracts_by_status")]
    ContractsByStatus,
    #[serde(rename = "contracts_by_filter")]
    ContractsByFilter,
    #[serde(rename = "general_query")]
    GeneralQuery,
}

impl ActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Error => "error",
            ActionType::ContractsByContractNumber => "contracts_by_contractNumber",
            ActionType::PartsByPartNumber => "parts_by_partNumber",
            ActionType::ContractsByCustomerNumber => "contracts_by_customerNumber",
            ActionType::ContractsByCustomerName => "contracts_by_customerName",
            ActionType::ContractsByCreatedBy => "contracts_by_createdBy",
            ActionType::ContractsByDate => "contracts_by_date",
            ActionType::ContractsByStatus => "contracts_by_status",
            ActionType::ContractsByFilter => "contracts_by_filter",
            ActionType::GeneralQuery => "general_query",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A non-identifier predicate such as a status or date constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityFilter {
    pub attribute: String,
    pub operation: String,
    pub value: String,
    pub source: String,
}

impl EntityFilter {
    pub fn new(
        attribute: impl Into<String>,
        operation: impl Into<String>,
        value: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            operation: operation.into(),
            value: value.into(),
            source: source.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// The query cannot be routed to a data operation.
    Blocker,
    Info,
}

impl Severity {
    pub fn is_blocker(&self) -> bool {
        matches!(self, Severity::Blocker)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    pub code: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationError {
    pub fn blocker(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            severity: Severity::Blocker,
        }
    }
}
