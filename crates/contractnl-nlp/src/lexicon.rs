//! Process-wide word sets shared by the pipeline stages.
//!
//! All sets are built once on first use and never mutated.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Words that must never be read as identifier values.
pub static COMMAND_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Verbs
        "show", "get", "list", "display", "find", "search", "lookup", "give", "fetch",
        "tell", "view", "see", "check", "open", "pull", "bring", "provide", "need", "want",
        "create", "created", "creating", "make", "add", "help", "please",
        // Function words
        "the", "of", "for", "all", "me", "my", "a", "an", "and", "or", "in", "on", "at",
        "by", "to", "from", "with", "under", "is", "are", "was", "were", "what", "which",
        "whose", "where", "who", "how", "many", "much", "any", "this", "that", "these",
        "those", "can", "you", "i", "it", "its", "do", "does", "about", "after", "before",
        "between", "during", "since", "than", "last", "next", "no", "num", "id",
        // Domain nouns
        "contract", "contracts", "part", "parts", "customer", "customers", "account",
        "accounts", "client", "clients", "number", "numbers", "name", "names", "status",
        "details", "detail", "info", "information", "summary", "date", "dates", "price",
        "prices", "cost", "value", "effective", "expiration", "expiry", "description",
        "lead", "time", "moq", "uom", "payment", "terms", "incoterms", "rule", "rules",
        // Status and failure words
        "expired", "active", "inactive", "pending", "failed", "failure", "failures",
        "issues", "issue", "defect", "defects", "error", "errors",
    ]
    .into_iter()
    .collect()
});

/// Tokens signalling the query is about a customer or account.
pub static CUSTOMER_CONTEXT_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["customer", "customers", "account", "accounts", "client", "clients"]
        .into_iter()
        .collect()
});

/// Words a run like `contractsiemensunderaccount` may decompose into.
/// Ordered longest first so greedy prefix matching prefers `parts` over `part`.
pub const SPLIT_VOCABULARY: &[&str] = &[
    "information", "customer", "summary", "details", "account", "expired", "siemens",
    "number", "status", "detail", "parts", "under", "info", "part", "list", "for", "by",
];

/// Month names and abbreviations; date pieces, never identifiers.
const MONTHS: &[&str] = &[
    "jan", "january", "feb", "february", "mar", "march", "apr", "april", "may", "jun", "june",
    "jul", "july", "aug", "august", "sep", "sept", "september", "oct", "october", "nov",
    "november", "dec", "december",
];

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(?:19|20)\d{2}$").unwrap());

pub fn is_command_word(word: &str) -> bool {
    COMMAND_WORDS.contains(word)
}

/// A command word or split-vocabulary word.
pub fn is_known_word(word: &str) -> bool {
    COMMAND_WORDS.contains(word) || SPLIT_VOCABULARY.contains(&word)
}

pub fn is_customer_word(word: &str) -> bool {
    CUSTOMER_CONTEXT_WORDS.contains(word)
}

pub fn is_month(word: &str) -> bool {
    MONTHS.contains(&word)
}

/// A bare 19xx/20xx year.
pub fn is_year(word: &str) -> bool {
    YEAR_RE.is_match(word)
}
