//! Text Normalizer - email body canonicalization
//!
//! Training and serving MUST run the exact same steps in the exact same
//! order: the vocabulary's document frequencies were counted on this output.

use once_cell::sync::Lazy;
use regex::Regex;

static URL_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"http\S+|www\S+").expect("valid url regex"));
static TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<.*?>").expect("valid tag regex"));
static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("valid digit regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Email text normalizer
///
/// Steps, in order:
/// 1. lowercase
/// 2. drop `http…` / `www…` tokens up to the next whitespace
/// 3. drop `<…>` tag-like substrings (not spanning lines)
/// 4. drop digit runs
/// 5. drop ASCII punctuation
/// 6. collapse whitespace runs to one space, trim
#[derive(Debug, Clone, Copy, Default)]
pub struct TextNormalizer;

impl TextNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn normalize(&self, text: &str) -> String {
        normalize(text)
    }
}

/// Free-function form of [`TextNormalizer::normalize`]
pub fn normalize(text: &str) -> String {
    let text = text.to_lowercase();
    let text = URL_TOKEN.replace_all(&text, "");
    let text = TAG.replace_all(&text, "");
    let text = DIGITS.replace_all(&text, "");
    let text: String = text.chars().filter(|c| !c.is_ascii_punctuation()).collect();
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().to_string()
}
