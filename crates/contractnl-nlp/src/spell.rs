//! Dictionary-based spell correction for single words.
//!
//! Each whitespace-separated word is stripped of punctuation and looked up
//! case-insensitively in a misspelling → canonical map. Unknown words pass
//! through exactly as typed.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// Misspelling → canonical word. No canonical word is itself a key, so a
/// corrected text never changes on a second pass.
pub static SPELL_CORRECTIONS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let entries: &[(&str, &[&str])] = &[
        ("contract", &["contrct", "contarct", "conract", "contrat", "cntract", "contact", "contrac", "kontract", "contracr"]),
        ("contracts", &["contrcts", "contarcts", "conracts", "contrats", "cntracts", "contacts", "kontracts"]),
        ("part", &["prt", "pasrt", "aprt"]),
        ("parts", &["prts", "partz", "pasrts", "aprts", "prats"]),
        ("customer", &["custmer", "custommer", "cusotmer", "customr", "costumer", "cstomer", "custoemr"]),
        ("customers", &["custmers", "custommers", "cusotmers", "costumers"]),
        ("account", &["acount", "accnt", "acct", "acocunt", "accoutn"]),
        ("number", &["numbr", "nmber", "numer", "nubmer", "numbre"]),
        ("status", &["staus", "statuss", "sttus", "stauts", "statsu"]),
        ("show", &["shwo", "shw", "sho", "hsow"]),
        ("list", &["lsit", "lst", "lis"]),
        ("details", &["detials", "detals", "deatils", "detalis"]),
        ("summary", &["sumry", "summry", "summery", "sumary"]),
        ("expired", &["expird", "expried", "exipred", "expiered"]),
        ("active", &["actve", "activ", "actvie"]),
        ("inactive", &["inactve", "inactiv", "inacitve"]),
        ("created", &["creatd", "craeted", "crated", "creted"]),
        ("failed", &["faild", "failded", "fialed", "falied"]),
        ("effective", &["effectve", "efective", "effecitve"]),
        ("expiration", &["expiraton", "expiratoin", "expiraion"]),
        ("price", &["pric", "prise", "prcie"]),
        ("pending", &["pendng", "pendign"]),
        ("between", &["betwen", "btween", "betweeen"]),
        ("after", &["aftr", "afer"]),
        ("before", &["befor", "bfore"]),
        ("description", &["descripton", "discription", "desciption"]),
    ];
    for (canonical, typos) in entries {
        for typo in *typos {
            m.insert(*typo, *canonical);
        }
    }
    m
});

/// Result of correcting one input text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrectionResult {
    pub original: String,
    /// `None` when no word was replaced.
    pub corrected: Option<String>,
    /// Replaced words / total words; 0.0 for empty input.
    pub confidence: f64,
}

impl CorrectionResult {
    /// The text later stages should read: corrected if anything changed, original otherwise.
    pub fn effective_text(&self) -> &str {
        self.corrected.as_deref().unwrap_or(&self.original)
    }

    /// Pass-through result used when nothing was replaced or correction is disabled.
    pub fn unchanged(text: &str) -> Self {
        Self {
            original: text.to_string(),
            corrected: None,
            confidence: 0.0,
        }
    }
}

/// Correct a whole query text word by word.
pub fn correct(text: &str) -> CorrectionResult {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return CorrectionResult::unchanged(text);
    }

    let mut replaced = 0usize;
    let corrected_words: Vec<String> = words
        .iter()
        .map(|word| match correct_word(word) {
            Some(fixed) => {
                replaced += 1;
                fixed
            }
            None => word.to_string(),
        })
        .collect();

    if replaced == 0 {
        return CorrectionResult::unchanged(text);
    }

    CorrectionResult {
        original: text.to_string(),
        corrected: Some(corrected_words.join(" ")),
        confidence: replaced as f64 / words.len() as f64,
    }
}

/// Replacement for a single word, keeping its leading and trailing punctuation.
fn correct_word(word: &str) -> Option<String> {
    let key: String = word
        .chars()
        .filter(|c| c.is_alphanumeric())
        .collect::<String>()
        .to_lowercase();
    let canonical = SPELL_CORRECTIONS.get(key.as_str())?;

    let core_start = word.find(|c: char| c.is_alphanumeric()).unwrap_or(0);
    let core_end = word
        .rfind(|c: char| c.is_alphanumeric())
        .map(|i| i + word[i..].chars().next().map_or(1, |c| c.len_utf8()))
        .unwrap_or(word.len());

    Some(format!(
        "{}{}{}",
        &word[..core_start],
        canonical,
        &word[core_end..]
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corrects_known_typo() {
        let result = correct("show contrct 123456");
        assert_eq!(result.corrected.as_deref(), Some("show contract 123456"));
        assert!((result.confidence - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(result.original, "show contrct 123456");
    }

    #[test]
    fn test_no_change_is_null() {
        let result = correct("show contract 123456");
        assert_eq!(result.corrected, None);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.effective_text(), "show contract 123456");
    }

    #[test]
    fn test_empty_input() {
        let result = correct("   ");
        assert_eq!(result.corrected, None);
        assert_eq!(result.confidence, 0.0);
    }

    #[test]
    fn test_case_and_punctuation() {
        let result = correct("Shwo CONTRCT, please");
        assert_eq!(result.corrected.as_deref(), Some("show contract, please"));
        assert!((result.confidence - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_words_keep_casing() {
        let result = correct("prts for AE125B");
        assert_eq!(result.corrected.as_deref(), Some("parts for AE125B"));
    }

    #[test]
    fn test_fixed_point() {
        for canonical in SPELL_CORRECTIONS.values() {
            assert!(
                !SPELL_CORRECTIONS.contains_key(canonical),
                "{} is both a typo and a correction",
                canonical
            );
        }
        let first = correct("shwo custmer acount numbr 4567 staus");
        let second = correct(first.effective_text());
        assert!(second.corrected.is_none());
        assert_eq!(second.confidence, 0.0);
    }
}
