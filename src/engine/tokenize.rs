//! Tokenization and normalization.
//!
//! The tokenizer is the leaf of the pipeline: it lower-cases the message and
//! extracts word tokens. Every later stage that compares tokens against
//! trigger words or question words operates on this exact token sequence, so
//! the boundary rules here are the single source of truth for "what is a
//! word" in the engine.
//!
//! Boundary rules: a token is a maximal run of ASCII alphanumerics, with
//! embedded apostrophes kept (`there's` stays one token). Punctuation and
//! whitespace never appear in tokens; trigger words are expected to be
//! lower-cased words of the same shape.

/// Split `text` into normalized (lower-cased) word tokens.
///
/// Empty or whitespace-only input yields an empty sequence; there are no
/// failure modes.
pub fn tokenize(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    regex!(r"[a-z0-9]+(?:'[a-z0-9]+)*").find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \t\n").is_empty());
    }

    #[test]
    fn lowercases_and_strips_punctuation() {
        assert_eq!(tokenize("When is the UPDATE?"), vec!["when", "is", "the", "update"]);
        assert_eq!(tokenize("Hello, world!"), vec!["hello", "world"]);
    }

    #[test]
    fn keeps_embedded_apostrophes() {
        assert_eq!(tokenize("There's an exploiter"), vec!["there's", "an", "exploiter"]);
        // A leading or trailing apostrophe is not part of a word.
        assert_eq!(tokenize("'quoted'"), vec!["quoted"]);
    }

    #[test]
    fn digits_are_tokens() {
        assert_eq!(tokenize("v2 update"), vec!["v2", "update"]);
    }
}
