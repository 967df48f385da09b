//! Message signal scanning (input pre-classification).
//!
//! This module inspects the raw message and its token sequence and produces
//! the coarse signals the resolver needs to derive an intent. The scan is
//! cheap and infallible; it never looks at trigger words, only at the
//! question-word vocabulary and the shape of the raw text.

use bitflags::bitflags;
use std::collections::HashSet;

bitflags! {
    /// Coarse question signals detected in a message.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct SignalMask: u8 {
        /// The trimmed raw message ends with `?`.
        const TRAILING_QUESTION_MARK = 1 << 0;
        /// At least one token is in the rule set's question-word vocabulary.
        const QUESTION_WORD          = 1 << 1;
    }
}

/// Signals detected from one message.
#[derive(Debug, Clone)]
pub struct MessageSignals {
    pub mask: SignalMask,
}

impl MessageSignals {
    /// Scan `raw` text and its `tokens` against the question-word vocabulary.
    ///
    /// `tokens` must come from the engine tokenizer so that question-word
    /// comparison uses the same word boundaries as trigger matching.
    pub fn scan(raw: &str, tokens: &[String], question_words: &HashSet<String>) -> Self {
        let mut mask = SignalMask::empty();

        if raw.trim_end().ends_with('?') {
            mask |= SignalMask::TRAILING_QUESTION_MARK;
        }
        if tokens.iter().any(|token| question_words.contains(token)) {
            mask |= SignalMask::QUESTION_WORD;
        }

        MessageSignals { mask }
    }

    /// True when the message reads as a question.
    pub fn is_question(&self) -> bool {
        !self.mask.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tokenize::tokenize;

    fn question_words() -> HashSet<String> {
        ["when", "what", "how"].iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn trailing_question_mark_is_a_question() {
        let raw = "the update is out?  ";
        let tokens = tokenize(raw);
        let signals = MessageSignals::scan(raw, &tokens, &question_words());
        assert!(signals.mask.contains(SignalMask::TRAILING_QUESTION_MARK));
        assert!(signals.is_question());
    }

    #[test]
    fn question_word_token_is_a_question() {
        let raw = "when is the update";
        let tokens = tokenize(raw);
        let signals = MessageSignals::scan(raw, &tokens, &question_words());
        assert!(signals.mask.contains(SignalMask::QUESTION_WORD));
        assert!(!signals.mask.contains(SignalMask::TRAILING_QUESTION_MARK));
        assert!(signals.is_question());
    }

    #[test]
    fn question_words_match_whole_tokens_only() {
        // "whenever" must not count as the question word "when".
        let raw = "whenever the update lands";
        let tokens = tokenize(raw);
        let signals = MessageSignals::scan(raw, &tokens, &question_words());
        assert!(!signals.is_question());
    }

    #[test]
    fn plain_statement_has_no_signals() {
        let raw = "the update is out";
        let tokens = tokenize(raw);
        let signals = MessageSignals::scan(raw, &tokens, &question_words());
        assert!(signals.mask.is_empty());
        assert!(!signals.is_question());
    }
}
