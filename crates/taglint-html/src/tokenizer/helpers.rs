//! Helper functions for the tag scanner.
//!
//! This module contains utility methods used throughout the scanner:
//! - State transitions ("Switch to", "Reconsume in")
//! - Input/character handling with line and column tracking
//! - Token emission and abandonment
//! - Attribute helpers for duplicate detection

use taglint_common::warning::warn_once;

use super::core::{TagTokenizer, TokenizerState};
use super::token::{Span, TagToken};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl TagTokenizer {
    /// "Switch to the X state"
    ///
    /// Transitions to a new state. The next character will be consumed on the
    /// next iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: TokenizerState) {
        self.state = new_state;
    }

    /// "Reconsume in the X state"
    ///
    /// Transitions to a new state without consuming the current character.
    /// The same character will be processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: TokenizerState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl TagTokenizer {
    /// Consume the next input character.
    ///
    /// Returns the character at the current position and advances the
    /// position, recording the consumed character's byte offset and
    /// line/column so tokens can carry accurate spans. Returns None at the
    /// end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        if let Some(c) = self.input[self.current_pos..].chars().next() {
            self.char_start = self.current_pos;
            self.char_line = self.line;
            self.char_column = self.column;
            self.current_pos += c.len_utf8();
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
            Some(c)
        } else {
            None
        }
    }

    /// ASCII whitespace per the tokenization states: tab, LF, FF, space.
    pub(super) const fn is_whitespace_char(input_char: char) -> bool {
        matches!(input_char, ' ' | '\t' | '\n' | '\x0C')
    }
}

// =============================================================================
// Token Emission Helpers
// =============================================================================

impl TagTokenizer {
    /// Take the span recorded for the pending tag's `<`.
    ///
    /// # Panics
    ///
    /// Panics if no `<` position was recorded, indicating a scanner bug:
    /// tokens are only created from states reached via the data state.
    pub(super) fn take_tag_start(&mut self) -> Span {
        self.tag_start
            .take()
            .expect("tag token created without a recorded '<' position")
    }

    /// Emit the current tag token, patching its span to cover up to and
    /// including the `>` just consumed. Duplicate attributes are dropped
    /// here: their values had to be scanned before they could be discarded.
    pub(super) fn emit_tag(&mut self) {
        if let Some(mut token) = self.current_token.take() {
            token.remove_duplicate_attributes();
            token.span.end = self.current_pos;
            self.token_stream.push(token);
        }
    }

    /// Discard the pending tag: the `<` turned out not to start a tag-like
    /// token, or the token was malformed.
    pub(super) fn abandon_tag(&mut self) {
        self.tag_start = None;
        self.current_token = None;
    }

    /// End of input in the middle of a tag. The partial token is dropped
    /// rather than reported; an unterminated `<` is never fatal.
    pub(super) fn eof_in_tag(&mut self) {
        self.log_skip("unterminated tag at end of input");
        self.abandon_tag();
        self.at_eof = true;
    }
}

// =============================================================================
// Attribute Helpers
// =============================================================================

impl TagTokenizer {
    /// On leaving the attribute name state, warn if the attribute's name
    /// repeats an earlier one on the same token. The duplicate is removed
    /// when the token is emitted, after its value has been scanned.
    pub(super) fn check_duplicate_attribute(&mut self) {
        let is_duplicate = self
            .current_token
            .as_ref()
            .is_some_and(TagToken::current_attribute_name_is_duplicate);

        if is_duplicate {
            self.log_skip("duplicate attribute");
        }
    }
}

// =============================================================================
// Warning Plumbing
// =============================================================================

impl TagTokenizer {
    /// Log a skipped or malformed construct through the shared warning
    /// system. Deduplicated, so a document full of the same defect warns
    /// once.
    pub(super) fn log_skip(&self, what: &str) {
        warn_once(
            "Tokenizer",
            &format!(
                "{what} at line {}, column {} (in {} state)",
                self.char_line, self.char_column, self.state
            ),
        );
    }
}
