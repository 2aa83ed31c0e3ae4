//! Text analyzers built from Tantivy tokenizer filters.

use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, StopWordFilter,
    TextAnalyzer, TokenStream,
};

/// Tokens longer than this are dropped before stemming.
pub const MAX_TOKEN_LEN: usize = 40;

/// Build an analyzer that lower-cases, removes stop words and stems for
/// `language`.
///
/// Languages without a bundled stop-word list skip that stage.
pub fn stemming_analyzer(language: Language) -> TextAnalyzer {
    let builder = TextAnalyzer::builder(SimpleTokenizer::default())
        .filter(RemoveLongFilter::limit(MAX_TOKEN_LEN))
        .filter(LowerCaser);

    match StopWordFilter::new(language) {
        Some(stop_words) => builder
            .filter(stop_words)
            .filter(Stemmer::new(language))
            .build(),
        None => builder.filter(Stemmer::new(language)).build(),
    }
}

/// The analyzer used when no language plugin is attached.
pub fn baseline_analyzer() -> TextAnalyzer {
    stemming_analyzer(Language::English)
}

/// Run `text` through `analyzer` and collect the resulting terms.
pub fn analyze(analyzer: &mut TextAnalyzer, text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut stream = analyzer.token_stream(text);
    while let Some(token) = stream.next() {
        tokens.push(token.text.clone());
    }
    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_analyzer_stems_english() {
        let mut analyzer = baseline_analyzer();
        let terms = analyze(&mut analyzer, "Running runners");
        assert_eq!(terms, vec!["run", "runner"]);
    }

    #[test]
    fn test_baseline_analyzer_removes_stop_words() {
        let mut analyzer = baseline_analyzer();
        let terms = analyze(&mut analyzer, "the harmony of the spheres");
        assert!(!terms.contains(&"the".to_string()));
        assert!(terms.contains(&"harmoni".to_string()));
    }

    #[test]
    fn test_french_analyzer() {
        let mut analyzer = stemming_analyzer(Language::French);
        let terms = analyze(&mut analyzer, "les chansons");
        assert!(!terms.contains(&"les".to_string()));
        assert_eq!(terms.len(), 1);
        assert!(terms[0].starts_with("chanson"));
    }

    #[test]
    fn test_long_tokens_dropped() {
        let mut analyzer = baseline_analyzer();
        let long = "a".repeat(MAX_TOKEN_LEN + 5);
        let terms = analyze(&mut analyzer, &format!("{long} alan"));
        assert_eq!(terms, vec!["alan"]);
    }

    #[test]
    fn test_analyze_empty() {
        let mut analyzer = baseline_analyzer();
        assert!(analyze(&mut analyzer, "").is_empty());
    }
}
