//! Header extraction: contract, part and customer numbers plus names.
//!
//! Standalone numbers are ambiguous; the query-wide context flags decide
//! which identifier they become. Ambiguous short numbers are dropped rather
//! than rejected.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use tracing::debug;

use contractnl_core::Header;

use crate::lexicon;
use crate::tokenize::{Token, TokenKind};

static CONTRACT_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6,}$").unwrap());
static PART_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9]{3,}$").unwrap());
static CUSTOMER_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4,8}$").unwrap());

/// A single token carrying its own prefix, e.g. `part_ab12` or `contract:123456`.
static PREFIXED_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(contract|part|customer|account)[_:]?([a-z0-9]*\d[a-z0-9]*)$").unwrap());
static DIGITS_THEN_LETTERS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[a-z]+$").unwrap());

static CREATED_BY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:created\s+by|by)\s+([a-zA-Z]+)\b").unwrap());
static QUOTED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"["']([^"']+)["']"#).unwrap());
static CUSTOMER_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:account\s+name|customer\s+name)\s+(?:is\s+|:\s*)?([a-zA-Z]+)").unwrap()
});

/// Words allowed between a prefix keyword and its value ("contract number 123456").
const PREFIX_FILLERS: &[&str] = &["number", "no", "num", "id"];

/// Query-wide context computed once before the token pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryContext {
    pub has_customer_context: bool,
    pub has_creator_context: bool,
    pub has_contract_context: bool,
}

impl QueryContext {
    pub fn detect(lower: &str, tokens: &[Token]) -> Self {
        let has_customer_context = tokens.iter().any(|t| lexicon::is_customer_word(&t.text))
            || lower.contains("account name")
            || lower.contains("customer name");
        let padded = format!(" {} ", lower);
        Self {
            has_customer_context,
            has_creator_context: lower.contains("created by") || padded.contains(" by "),
            has_contract_context: lower.contains("contract"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IdentifierKind {
    Contract,
    Part,
    Customer,
}

impl IdentifierKind {
    fn from_prefix(prefix: &str) -> Option<Self> {
        match prefix {
            "contract" => Some(Self::Contract),
            "part" => Some(Self::Part),
            "customer" | "account" => Some(Self::Customer),
            _ => None,
        }
    }

    /// Whether a value token directly after this prefix belongs to it.
    fn accepts(self, token: &Token) -> bool {
        match self {
            Self::Contract | Self::Customer => token.kind == TokenKind::Number,
            Self::Part => {
                token.text.chars().all(|c| c.is_ascii_alphanumeric())
                    && token.text.chars().any(|c| c.is_ascii_digit())
            }
        }
    }
}

/// Header fields plus the issues found on identifier-shaped tokens.
#[derive(Debug, Clone, Default)]
pub struct HeaderExtraction {
    pub header: Header,
    pub issues: Vec<String>,
}

impl HeaderExtraction {
    /// Validate `value` as `kind` and set the header field, first value wins.
    fn apply(&mut self, kind: IdentifierKind, value: &str) {
        let value = value.to_lowercase();
        match kind {
            IdentifierKind::Contract => {
                if !CONTRACT_NUMBER_RE.is_match(&value) {
                    self.issues
                        .push(format!("Contract number '{}' must be 6+ digits", value));
                } else if self.header.contract_number.is_none() {
                    self.header.contract_number = Some(value);
                }
            }
            IdentifierKind::Part => {
                if !PART_NUMBER_RE.is_match(&value) {
                    self.issues.push(format!(
                        "Part number '{}' must be 3+ alphanumeric characters",
                        value.to_uppercase()
                    ));
                } else if self.header.part_number.is_none() {
                    self.header.part_number = Some(value.to_uppercase());
                }
            }
            IdentifierKind::Customer => {
                if !CUSTOMER_NUMBER_RE.is_match(&value) {
                    self.issues
                        .push(format!("Customer number '{}' must be 4-8 digits", value));
                } else if self.header.customer_number.is_none() {
                    self.header.customer_number = Some(value);
                }
            }
        }
    }

    /// Resolve a bare all-digit token by context priority.
    fn apply_standalone_number(&mut self, value: &str, ctx: &QueryContext) {
        let len = value.len();
        let no_contract = self.header.contract_number.is_none();
        let no_customer = self.header.customer_number.is_none();

        if ctx.has_customer_context && (4..=8).contains(&len) {
            // Customer-shaped numbers in customer context stay customer numbers.
            if no_customer {
                self.header.customer_number = Some(value.to_string());
            }
        } else if ctx.has_contract_context && len >= 6 && no_contract {
            self.header.contract_number = Some(value.to_string());
        } else if ctx.has_contract_context && len >= 3 && no_contract {
            // Weak fallback: still a contract number, so the length rule reports it.
            self.apply(IdentifierKind::Contract, value);
        } else if len >= 6 && no_contract {
            self.header.contract_number = Some(value.to_string());
        } else if (4..=8).contains(&len) && no_customer && !ctx.has_contract_context {
            self.header.customer_number = Some(value.to_string());
        }
    }
}

/// Extract header identifiers from tokens. `lower` is the lowercased query text.
pub fn extract_header(lower: &str, tokens: &[Token]) -> HeaderExtraction {
    let ctx = QueryContext::detect(lower, tokens);
    debug!(?ctx, tokens = tokens.len(), "Extracting header");

    let mut out = HeaderExtraction::default();
    out.header.customer_name = extract_customer_name(lower);
    if ctx.has_creator_context {
        out.header.created_by = extract_created_by(lower);
    }

    let name_words: HashSet<String> = out
        .header
        .customer_name
        .iter()
        .chain(out.header.created_by.iter())
        .flat_map(|name| name.split_whitespace().map(str::to_string))
        .collect();

    for (i, token) in tokens.iter().enumerate() {
        let text = token.text.to_lowercase();
        if lexicon::is_command_word(&text)
            || lexicon::is_year(&text)
            || lexicon::is_month(&text)
            || name_words.contains(&text)
        {
            continue;
        }

        if let Some(caps) = PREFIXED_TOKEN_RE.captures(&text) {
            if let Some(kind) = IdentifierKind::from_prefix(&caps[1]) {
                out.apply(kind, &caps[2]);
                continue;
            }
        }

        if let Some(kind) = preceding_prefix(tokens, i) {
            if kind.accepts(token) {
                out.apply(kind, &text);
                continue;
            }
        }

        if token.kind == TokenKind::Number {
            out.apply_standalone_number(&text, &ctx);
        } else if out.header.part_number.is_none() && is_part_candidate(token, &ctx) {
            out.header.part_number = Some(token.text.to_uppercase());
        }
    }

    debug!(header = ?out.header, issues = out.issues.len(), "Header extracted");
    out
}

/// The prefix keyword governing token `i`, looking back past filler words.
fn preceding_prefix(tokens: &[Token], i: usize) -> Option<IdentifierKind> {
    tokens[..i]
        .iter()
        .rev()
        .map(|t| t.text.as_str())
        .find(|text| !PREFIX_FILLERS.contains(text))
        .and_then(IdentifierKind::from_prefix)
}

/// Mixed letters and digits, all-uppercase, or containing `_`/`-`, 3+ chars.
fn is_part_candidate(token: &Token, ctx: &QueryContext) -> bool {
    let raw = token.raw.as_str();
    if raw.chars().count() < 3 {
        return false;
    }
    if token.kind == TokenKind::PartNumber {
        return true;
    }
    if !raw
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return false;
    }

    let has_letter = raw.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = raw.chars().any(|c| c.is_ascii_digit());
    let all_upper = has_letter && !raw.chars().any(|c| c.is_ascii_lowercase());
    let joined = raw.contains('_') || raw.contains('-');

    if !((has_letter && has_digit) || all_upper || joined) {
        return false;
    }

    // A trailing word glued to a number reads better as a suffix than a part.
    !(ctx.has_contract_context && DIGITS_THEN_LETTERS_RE.is_match(&token.text))
}

/// First alphabetic word after "created by" / "by" that is not a command word.
fn extract_created_by(lower: &str) -> Option<String> {
    CREATED_BY_RE
        .captures_iter(lower)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .find(|name| !lexicon::is_command_word(name))
}

/// Quoted text first, then the word after "account name" / "customer name".
fn extract_customer_name(lower: &str) -> Option<String> {
    let quoted = QUOTED_RE
        .captures_iter(lower)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_lowercase())
        .find(|name| !name.is_empty());
    if quoted.is_some() {
        return quoted;
    }

    CUSTOMER_NAME_RE
        .captures_iter(lower)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_lowercase())
        .find(|name| !lexicon::is_command_word(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::tokenize;

    fn extract(input: &str) -> HeaderExtraction {
        let tokens = tokenize(input);
        extract_header(&input.to_lowercase(), &tokens)
    }

    #[test]
    fn test_contract_number_after_keyword() {
        let out = extract("show contract 123456");
        assert_eq!(out.header.contract_number.as_deref(), Some("123456"));
        assert_eq!(out.header.part_number, None);
        assert_eq!(out.header.customer_number, None);
        assert!(out.issues.is_empty());
    }

    #[test]
    fn test_short_contract_number_is_an_issue() {
        let out = extract("show contract 123");
        assert_eq!(out.header.contract_number, None);
        assert_eq!(out.issues.len(), 1);
        assert!(out.issues[0].contains("'123'"));
    }

    #[test]
    fn test_command_words_never_identifiers() {
        let out = extract("SHOW LIST DISPLAY FIND get");
        assert!(!out.header.has_identifier());
        assert!(out.issues.is_empty());
    }

    #[test]
    fn test_glued_contract_number() {
        let out = extract("contract123456 details");
        assert_eq!(out.header.contract_number.as_deref(), Some("123456"));
    }

    #[test]
    fn test_customer_context_number() {
        let out = extract("contracts for customer 45678");
        assert_eq!(out.header.customer_number.as_deref(), Some("45678"));
        assert_eq!(out.header.contract_number, None);

        let out = extract("account number 12345678 contracts");
        assert_eq!(out.header.customer_number.as_deref(), Some("12345678"));
    }

    #[test]
    fn test_invalid_customer_number() {
        let out = extract("customer 12");
        assert_eq!(out.header.customer_number, None);
        assert!(out.issues[0].contains("4-8 digits"));
    }

    #[test]
    fn test_contract_and_customer_together() {
        let out = extract("contract 123456 for customer 5678");
        assert_eq!(out.header.contract_number.as_deref(), Some("123456"));
        assert_eq!(out.header.customer_number.as_deref(), Some("5678"));
    }

    #[test]
    fn test_standalone_numbers_without_context() {
        assert_eq!(extract("show 1234567").header.contract_number.as_deref(), Some("1234567"));
        assert_eq!(extract("show 4567").header.customer_number.as_deref(), Some("4567"));
        // Too short to mean anything; ignored rather than rejected.
        let out = extract("show 12");
        assert!(!out.header.has_identifier());
        assert!(out.issues.is_empty());
    }

    #[test]
    fn test_years_are_not_identifiers() {
        let out = extract("contracts created in 2020");
        assert!(!out.header.has_identifier());
        assert!(out.issues.is_empty());
    }

    #[test]
    fn test_date_months_are_not_parts() {
        let out = extract("contracts created after 15-JAN-2020");
        assert!(!out.header.has_identifier());
        assert!(out.issues.is_empty());

        let out = extract("contracts expiring before MAR 2021");
        assert_eq!(out.header.part_number, None);
    }

    #[test]
    fn test_second_customer_number_is_dropped() {
        let out = extract("contracts for customers 1234 and 5678");
        assert_eq!(out.header.customer_number.as_deref(), Some("1234"));
        assert_eq!(out.header.contract_number, None);
        assert!(out.issues.is_empty());
    }

    #[test]
    fn test_hyphenated_part_number() {
        let out = extract("what is the moq and uom of BC-2210");
        assert_eq!(out.header.part_number.as_deref(), Some("BC-2210"));
        assert_eq!(out.header.customer_number, None);

        let out = extract("part BC-2210 price");
        assert_eq!(out.header.part_number.as_deref(), Some("BC-2210"));
        assert!(out.issues.is_empty());
    }

    #[test]
    fn test_part_number_candidates() {
        assert_eq!(extract("show AE125 details").header.part_number.as_deref(), Some("AE125"));
        assert_eq!(extract("lead time for ae125b").header.part_number.as_deref(), Some("AE125B"));
        assert_eq!(extract("part_ab12 price").header.part_number.as_deref(), Some("AB12"));
        assert_eq!(extract("pn_4410 price").header.part_number.as_deref(), Some("PN_4410"));
        assert_eq!(extract("part 3000 price").header.part_number.as_deref(), Some("3000"));
    }

    #[test]
    fn test_part_with_contract() {
        let out = extract("contractAE125status");
        assert_eq!(out.header.part_number.as_deref(), Some("AE125"));
        assert_eq!(out.header.contract_number, None);
        assert!(out.issues.is_empty());

        let out = extract("part AE125 in contract 123456");
        assert_eq!(out.header.part_number.as_deref(), Some("AE125"));
        assert_eq!(out.header.contract_number.as_deref(), Some("123456"));
    }

    #[test]
    fn test_created_by() {
        let out = extract("contracts created by vinod after 1-Jan-2020");
        assert_eq!(out.header.created_by.as_deref(), Some("vinod"));
        assert_eq!(out.header.part_number, None);
        assert!(out.issues.is_empty());

        let out = extract("contracts sorted by status");
        assert_eq!(out.header.created_by, None);

        // "by" must stand alone and the name must be a whole word.
        let out = extract("parts by AE125");
        assert_eq!(out.header.created_by, None);
        assert_eq!(out.header.part_number.as_deref(), Some("AE125"));
        assert_eq!(extract_created_by("lobby systems contracts"), None);
    }

    #[test]
    fn test_customer_name() {
        let out = extract("contracts for 'Siemens Energy'");
        assert_eq!(out.header.customer_name.as_deref(), Some("siemens energy"));

        let out = extract("contracts with customer name HONEYWELL");
        assert_eq!(out.header.customer_name.as_deref(), Some("honeywell"));
        // The name is not also read as an all-caps part number.
        assert_eq!(out.header.part_number, None);
    }

    #[test]
    fn test_context_flags() {
        let lower = "contracts created by vinod for account 1234";
        let ctx = QueryContext::detect(lower, &tokenize(lower));
        assert!(ctx.has_customer_context);
        assert!(ctx.has_creator_context);
        assert!(ctx.has_contract_context);

        let lower = "parts list";
        let ctx = QueryContext::detect(lower, &tokenize(lower));
        assert_eq!(ctx, QueryContext::default());
    }
}
