use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    static ref SEPARATORS: Regex = Regex::new(r"[-_/]").expect("valid regex");
    static ref NON_ALNUM: Regex = Regex::new(r"[^a-z0-9\s]").expect("valid regex");
    static ref WHITESPACE: Regex = Regex::new(r"\s+").expect("valid regex");
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in",
            "is", "it", "its", "of", "on", "that", "the", "to", "was", "were", "will", "with",
            "this", "these", "those",
        ];
        words.iter().copied().collect()
    };
}

/// Suffixes tested in priority order by the heuristic stemmer.
const STEM_SUFFIXES: &[&str] = &["ing", "edly", "ed", "ly", "ies", "es", "s"];

/// Irregular forms the lemmatizer resolves before its suffix rules.
const IRREGULAR_FORMS: &[(&str, &str)] = &[
    ("mice", "mouse"),
    ("men", "man"),
    ("children", "child"),
    ("geese", "goose"),
];

/// Tokenization options. Validated by construction: every combination of
/// flags is meaningful, and `custom_stopwords` replaces the default set
/// entirely when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerConfig {
    pub remove_stopwords: bool,
    pub apply_stemming: bool,
    pub apply_lemmatization: bool,
    pub custom_stopwords: Option<HashSet<String>>,
}

impl Default for TokenizerConfig {
    fn default() -> Self {
        Self {
            remove_stopwords: true,
            apply_stemming: false,
            apply_lemmatization: true,
            custom_stopwords: None,
        }
    }
}

impl TokenizerConfig {
    fn is_stopword(&self, token: &str) -> bool {
        match &self.custom_stopwords {
            Some(set) => set.contains(token),
            None => STOPWORDS.contains(token),
        }
    }
}

/// Lowercase the text, break separator punctuation into spaces, replace
/// everything outside `[a-z0-9 ]` with a space, and collapse whitespace.
fn normalize(text: &str) -> String {
    let text = text.nfkc().collect::<String>().to_lowercase();
    let text = SEPARATORS.replace_all(&text, " ");
    let text = NON_ALNUM.replace_all(&text, " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Strip the first matching suffix, but only when the remaining stem keeps
/// length > 1; a token no rule applies to passes through unchanged.
fn stem(token: &str) -> &str {
    for suffix in STEM_SUFFIXES {
        if token.ends_with(suffix) && token.len() > suffix.len() + 1 {
            return &token[..token.len() - suffix.len()];
        }
    }
    token
}

/// Rule-based lemmatization: irregular lookup first, then ordered suffix
/// rewrites.
fn lemmatize(token: &str) -> String {
    for (form, lemma) in IRREGULAR_FORMS {
        if token == *form {
            return (*lemma).to_string();
        }
    }
    if token.ends_with("ies") && token.len() > 3 {
        return format!("{}y", &token[..token.len() - 3]);
    }
    if token.ends_with("ves") {
        return format!("{}f", &token[..token.len() - 3]);
    }
    if token.ends_with('s') && !token.ends_with("ss") && token.len() > 3 {
        return token[..token.len() - 1].to_string();
    }
    token.to_string()
}

/// Tokenize text into normalized word tokens. Deterministic: the same text
/// and configuration always produce the same sequence. Empty input yields an
/// empty sequence; no stage ever emits an empty token.
pub fn tokenize(text: &str, config: &TokenizerConfig) -> Vec<String> {
    let normalized = normalize(text);
    let mut tokens = Vec::new();
    for raw in normalized.split_whitespace() {
        if config.remove_stopwords && config.is_stopword(raw) {
            continue;
        }
        let mut token = raw.to_string();
        if config.apply_stemming {
            token = stem(&token).to_string();
        }
        if config.apply_lemmatization {
            token = lemmatize(&token);
        }
        tokens.push(token);
    }
    tokens
}
