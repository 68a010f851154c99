//! The query processor: one pass through every stage, in order.
//!
//! spell → tokenize → extract → validate → route → assemble
//!
//! Each call is independent and holds no mutable state, so a single
//! `QueryProcessor` can be shared across threads.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;

use contractnl_core::{PipelineConfig, QueryResult, Result};
use tracing::{debug, info, warn};

use crate::assemble::{self, AssemblyInput};
use crate::extract::{extract_all, Extraction};
use crate::intent::{self, IntentOutcome};
use crate::route::route;
use crate::spell::{self, CorrectionResult};
use crate::tokenize::tokenize;
use crate::validate::validate;

#[derive(Debug, Clone, Copy, Default)]
pub struct QueryProcessor {
    config: PipelineConfig,
}

impl QueryProcessor {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> PipelineConfig {
        self.config
    }

    /// Process one query. Never fails: internal faults come back as a
    /// result carrying a single PROCESSING_ERROR blocker.
    pub fn process(&self, input: &str) -> QueryResult {
        self.process_with(input, |input, start| self.run_stages(input, start))
    }

    /// The failure boundary around a stage runner.
    fn process_with<F>(&self, input: &str, stages: F) -> QueryResult
    where
        F: FnOnce(&str, Instant) -> QueryResult,
    {
        let start = Instant::now();

        if input.trim().is_empty() {
            return assemble::empty_input_result(input, elapsed_ms(start));
        }

        match catch_unwind(AssertUnwindSafe(|| stages(input, start))) {
            Ok(result) => {
                info!(
                    query_type = %result.query_metadata.query_type,
                    action = %result.query_metadata.action_type,
                    errors = result.errors.len(),
                    elapsed_ms = result.query_metadata.processing_time_ms,
                    "Processed query"
                );
                result
            }
            Err(panic) => {
                let message = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "internal error".to_string());
                warn!(error = %message, "Query processing failed");
                assemble::processing_error_result(input, &message, elapsed_ms(start))
            }
        }
    }

    /// Process one query and serialize the result.
    pub fn process_json(&self, input: &str) -> Result<String> {
        self.process(input).to_json()
    }

    /// Coarse intent for a raw query; independent of `process`.
    pub fn classify_intent(&self, input: &str) -> IntentOutcome {
        intent::classify_intent(input)
    }

    fn run_stages(&self, input: &str, start: Instant) -> QueryResult {
        let correction = if self.config.spell_correction {
            spell::correct(input)
        } else {
            CorrectionResult::unchanged(input)
        };
        let text = correction.effective_text();

        let tokens = tokenize(text);
        let lower = text.to_lowercase();
        debug!(tokens = tokens.len(), corrected = correction.corrected.is_some(), "Tokenized query");

        let Extraction {
            header,
            issues,
            entities,
        } = extract_all(&lower, &tokens);
        let errors = validate(&issues, &header, &entities, &lower);
        let route = route(&header, &entities, &errors);

        assemble::assemble(AssemblyInput {
            correction: &correction,
            lower: &lower,
            header,
            entities,
            errors,
            route,
            processing_time_ms: elapsed_ms(start),
        })
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
