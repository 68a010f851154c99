//! Natural-language query understanding for contract and parts lookups.
//!
//! A free-text query goes through a fixed sequence of stages and comes out
//! as a [`QueryResult`](contractnl_core::QueryResult): identifiers in the
//! header, status/date predicates as entities, a query type and action tag
//! for the caller to dispatch on, and any validation errors.
//!
//! ```no_run
//! use contractnl_nlp::QueryProcessor;
//!
//! let result = QueryProcessor::default().process("shwo contrct 123456");
//! assert_eq!(result.header.contract_number.as_deref(), Some("123456"));
//! ```

pub mod assemble;
pub mod extract;
pub mod intent;
pub mod lexicon;
pub mod pipeline;
pub mod route;
pub mod spell;
pub mod tokenize;
pub mod validate;

pub use intent::{classify_intent, Intent, IntentOutcome};
pub use pipeline::QueryProcessor;
pub use route::Route;
pub use spell::CorrectionResult;
pub use tokenize::{Token, TokenKind};
