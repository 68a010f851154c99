//! Query tokenizer with concatenated-word splitting.
//!
//! Users type identifiers glued to keywords ("contract123sumry",
//! "456789status", "customerabc1234"). After the primary split on
//! delimiters, each word is tried against an ordered table of split rules;
//! the first rule that applies decomposes it and the pieces are split again.
//! Words no rule claims are kept whole.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::lexicon::{self, SPLIT_VOCABULARY};

/// Characters that separate primary tokens, besides whitespace.
pub const DELIMITERS: &str = ";,&@#$|+-*/()[]{}?!:.=\"'";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Letters only.
    Word,
    /// Digits only.
    Number,
    /// A piece a split rule identified as a part number.
    PartNumber,
    /// Anything else: mixed letters/digits, underscores.
    Mixed,
}

/// A normalized query token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    /// Normalized text: lowercase, or uppercase for part-number pieces.
    pub text: String,
    /// The piece as typed.
    pub raw: String,
    pub kind: TokenKind,
}

impl Token {
    fn new(raw: &str) -> Self {
        let kind = if raw.chars().all(|c| c.is_ascii_digit()) {
            TokenKind::Number
        } else if raw.chars().all(|c| c.is_alphabetic()) {
            TokenKind::Word
        } else {
            TokenKind::Mixed
        };
        Self {
            text: raw.to_lowercase(),
            raw: raw.to_string(),
            kind,
        }
    }

    fn part_number(raw: &str) -> Self {
        Self {
            text: raw.to_uppercase(),
            raw: raw.to_string(),
            kind: TokenKind::PartNumber,
        }
    }
}

pub fn is_delimiter(c: char) -> bool {
    c.is_whitespace() || DELIMITERS.contains(c)
}

/// Split query text into normalized tokens.
///
/// Hyphens are held back from the primary split so that a hyphenated part
/// number such as `BC-2210` survives as one token; any other hyphenated
/// chunk is split on its hyphens afterwards.
pub fn tokenize(text: &str) -> Vec<Token> {
    text.split(|c: char| c != '-' && is_delimiter(c))
        .filter(|chunk| !chunk.is_empty())
        .flat_map(|chunk| {
            if is_hyphenated_part(chunk) {
                vec![Token::part_number(chunk)]
            } else {
                chunk
                    .split('-')
                    .filter(|w| !w.is_empty())
                    .flat_map(split_word)
                    .collect()
            }
        })
        .collect()
}

/// Letter-and-digit segments joined by hyphens, not a date, with no
/// segment that is a lexicon word (`contract-123456` is a prefix and value).
fn is_hyphenated_part(chunk: &str) -> bool {
    HYPHENATED_PART_RE.is_match(chunk)
        && chunk.chars().any(|c| c.is_ascii_alphabetic())
        && chunk.chars().any(|c| c.is_ascii_digit())
        && !HYPHENATED_DATE_RE.is_match(chunk)
        && !chunk
            .split('-')
            .any(|segment| lexicon::is_known_word(&segment.to_lowercase()))
}

/// Convenience view of the normalized token texts.
pub fn token_texts(tokens: &[Token]) -> Vec<&str> {
    tokens.iter().map(|t| t.text.as_str()).collect()
}

fn split_word(word: &str) -> Vec<Token> {
    for rule in SPLIT_RULES {
        if let Some(pieces) = rule.apply(word) {
            return pieces
                .into_iter()
                .flat_map(|piece| match piece {
                    Piece::Part(p) => vec![Token::part_number(&p)],
                    // Pieces are strictly shorter than the word, so this terminates.
                    Piece::Plain(p) if p.len() < word.len() => split_word(&p),
                    Piece::Plain(p) => vec![Token::new(&p)],
                })
                .collect();
        }
    }
    vec![Token::new(word)]
}

enum Piece {
    Plain(String),
    Part(String),
}

/// Decomposition strategies, tried in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SplitRule {
    /// `contract<letters>` where the letters are all vocabulary words.
    ContractCompound,
    /// `customer<letters>?<digits><letters>?`.
    CustomerNumber,
    /// `contract<letters><digits><suffix>?` with a part-number-like middle.
    ContractPart,
    /// `<digits><letters>`.
    DigitsLetters,
    /// `[A-Z]+\d+` followed by a lowercase word.
    PartSuffix,
    /// `<known word><digits><letters>?`, known word at least 3 letters.
    KnownWordNumber,
}

const SPLIT_RULES: &[SplitRule] = &[
    SplitRule::ContractCompound,
    SplitRule::CustomerNumber,
    SplitRule::ContractPart,
    SplitRule::DigitsLetters,
    SplitRule::PartSuffix,
    SplitRule::KnownWordNumber,
];

static HYPHENATED_PART_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+(?:-[A-Za-z0-9]+)+$").unwrap());
static HYPHENATED_DATE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:\d{1,2}-)?(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)[a-z]*-\d{2,4}$")
        .unwrap()
});
static CONTRACT_COMPOUND_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^contract([a-z]+)$").unwrap());
static CUSTOMER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^customer([a-z]*)(\d+)([a-z]*)$").unwrap());
static CONTRACT_PART_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^contract([a-z]+\d+)([a-z0-9]*)$").unwrap());
static DIGITS_LETTERS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(\d+)([a-z]+)$").unwrap());
static PART_SUFFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([A-Z]+\d+)([a-z]{3,})$").unwrap());
static KNOWN_WORD_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([a-z]+)(\d+)([a-z]*)$").unwrap());

impl SplitRule {
    fn apply(self, word: &str) -> Option<Vec<Piece>> {
        let lower = word.to_lowercase();
        match self {
            SplitRule::ContractCompound => {
                let caps = CONTRACT_COMPOUND_RE.captures(&lower)?;
                let words = decompose(&caps[1])?;
                let mut pieces = vec![Piece::Plain("contract".into())];
                pieces.extend(words.into_iter().map(|w| Piece::Plain(w.to_string())));
                Some(pieces)
            }
            SplitRule::CustomerNumber => {
                let caps = CUSTOMER_RE.captures(&lower)?;
                Some(non_empty_pieces(&["customer", &caps[1], &caps[2], &caps[3]]))
            }
            SplitRule::ContractPart => {
                let caps = CONTRACT_PART_RE.captures(&lower)?;
                let tail = &caps[2];
                if tail.is_empty() || lexicon::is_known_word(tail) {
                    let mut pieces = vec![
                        Piece::Plain("contract".into()),
                        Piece::Part(caps[1].to_string()),
                    ];
                    if !tail.is_empty() {
                        pieces.push(Piece::Plain(tail.to_string()));
                    }
                    Some(pieces)
                } else {
                    Some(vec![
                        Piece::Plain("contract".into()),
                        Piece::Part(format!("{}{}", &caps[1], tail)),
                    ])
                }
            }
            SplitRule::DigitsLetters => {
                let caps = DIGITS_LETTERS_RE.captures(&lower)?;
                Some(non_empty_pieces(&[&caps[1], &caps[2]]))
            }
            SplitRule::PartSuffix => {
                let caps = PART_SUFFIX_RE.captures(word)?;
                Some(vec![
                    Piece::Part(caps[1].to_string()),
                    Piece::Plain(caps[2].to_string()),
                ])
            }
            SplitRule::KnownWordNumber => {
                let caps = KNOWN_WORD_NUMBER_RE.captures(&lower)?;
                // Short stop words like "a" or "no" would break part numbers such as A123.
                if caps[1].len() < 3 || !lexicon::is_known_word(&caps[1]) {
                    return None;
                }
                Some(non_empty_pieces(&[&caps[1], &caps[2], &caps[3]]))
            }
        }
    }
}

fn non_empty_pieces(parts: &[&str]) -> Vec<Piece> {
    parts
        .iter()
        .filter(|p| !p.is_empty())
        .map(|p| Piece::Plain(p.to_string()))
        .collect()
}

/// Decompose `rest` entirely into vocabulary words, preferring the longest
/// word at each position. `None` if any remainder is left over.
///
/// Iterative over byte offsets: `next[i]` holds the word chosen at offset `i`
/// when the suffix from `i` decomposes. Filled right to left, so the choice
/// at each offset matches a longest-first search with backtracking.
fn decompose(rest: &str) -> Option<Vec<&'static str>> {
    let n = rest.len();
    let mut next: Vec<Option<&'static str>> = vec![None; n + 1];
    let reachable = |next: &[Option<&'static str>], i: usize| i == n || next[i].is_some();

    for i in (0..n).rev() {
        let choice = SPLIT_VOCABULARY
            .iter()
            .copied()
            .find(|word| rest[i..].starts_with(word) && reachable(&next, i + word.len()));
        next[i] = choice;
    }

    let mut words = Vec::new();
    let mut i = 0;
    while i < n {
        let word = next[i]?;
        words.push(word);
        i += word.len();
    }
    Some(words)
}
