//! Coarse intent classification: contract lookup, parts lookup, help, or a
//! request to create parts (never allowed through this interface).
//!
//! "create a contract" is a help request, while "contracts created by vinod"
//! is an informational lookup. The past-tense override distinguishes them:
//! "created" next to a temporal preposition never counts as a creation request.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::lexicon;
use crate::tokenize::tokenize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    Contract,
    Parts,
    Help,
    PartsCreateError,
    Error,
}

/// Classification outcome with an optional canned reply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentOutcome {
    pub intent: Intent,
    pub message: Option<String>,
    /// Share of tokens that are domain words. Telemetry only.
    #[serde(rename = "contextScore")]
    pub context_score: f64,
}

pub const CONTRACT_CREATE_HELP: &str = "To create a contract: 1) open Contracts and choose Create Contract, \
2) enter the customer account and contract dates, 3) add price list and terms, \
4) save and submit the contract for approval.";

pub const PARTS_CREATE_ERROR_MESSAGE: &str = "Parts cannot be created through this assistant. \
Parts are added to a contract by loading them through the contract's parts upload; \
ask about an existing part number or contract instead.";

pub const EMPTY_QUERY_MESSAGE: &str = "Query text is empty";

const PARTS_KEYWORDS: &[&str] = &[
    "part", "parts", "component", "components", "item", "items", "sku", "moq", "uom",
];

const CREATE_KEYWORDS: &[&str] = &[
    "create", "creating", "created", "creation", "new", "make", "add", "generate", "setup", "build",
];

const TEMPORAL_PREPOSITIONS: &[&str] = &["by", "in", "after", "before", "between", "during"];

const HELP_PHRASES: &[&str] = &["help", "how to", "how do i", "how can i", "steps to", "guide"];

const DOMAIN_WORDS: &[&str] = &[
    "contract", "contracts", "part", "parts", "customer", "account", "number", "status",
    "price", "expired", "active", "created",
];

/// Classify a raw query into an intent.
pub fn classify_intent(text: &str) -> IntentOutcome {
    let lower = text.trim().to_lowercase();
    if lower.is_empty() {
        return IntentOutcome {
            intent: Intent::Error,
            message: Some(EMPTY_QUERY_MESSAGE.into()),
            context_score: 0.0,
        };
    }

    let tokens = tokenize(&lower);
    let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
    let has = |set: &[&str]| words.iter().any(|w| set.contains(w));

    let has_parts = has(PARTS_KEYWORDS);
    let past_tense = words.contains(&"created") && has(TEMPORAL_PREPOSITIONS);
    let create_request = has(CREATE_KEYWORDS) && !past_tense;
    let help_request = HELP_PHRASES.iter().any(|p| lower.contains(p));

    let (intent, message) = if create_request && has_parts {
        (Intent::PartsCreateError, Some(PARTS_CREATE_ERROR_MESSAGE.to_string()))
    } else if create_request || help_request {
        (Intent::Help, Some(CONTRACT_CREATE_HELP.to_string()))
    } else if has_parts {
        (Intent::Parts, None)
    } else {
        (Intent::Contract, None)
    };

    let context_score = context_score(&words);
    debug!(?intent, past_tense, context_score, "Classified intent");

    IntentOutcome {
        intent,
        message,
        context_score,
    }
}

fn context_score(words: &[&str]) -> f64 {
    if words.is_empty() {
        return 0.0;
    }
    let domain = words
        .iter()
        .filter(|&&w| {
            DOMAIN_WORDS.contains(&w)
                || (!lexicon::is_command_word(w) && w.chars().any(|c| c.is_ascii_digit()))
        })
        .count();
    domain as f64 / words.len() as f64
}
