use strum_macros::Display;

use super::token::{Span, TagKind, TagToken};

/// Scanner states, a subset of the [WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization)
/// tokenizer states. Only the states reachable while extracting tag-like
/// tokens exist; everything outside a tag is handled by [`TokenizerState::Data`].
#[derive(Debug, PartialEq, Eq, Display)]
pub enum TokenizerState {
    /// Outside any tag. Text is skipped; `<` starts a token.
    Data,
    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    TagOpen,
    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    EndTagOpen,
    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    TagName,
    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    BeforeAttributeName,
    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    AttributeName,
    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    AfterAttributeName,
    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    BeforeAttributeValue,
    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    AttributeValueDoubleQuoted,
    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    AttributeValueSingleQuoted,
    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    AttributeValueUnquoted,
    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    AfterAttributeValueQuoted,
    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    SelfClosingStartTag,
}

/// The tag scanner state machine.
///
/// Walks the input once, left to right, and collects every tag-like token
/// (`<` optional `/` then an ASCII-letter-initial name, attributes, `>`)
/// into a token stream. A `<` that does not begin such a token is ordinary
/// text: scanning resumes at the next character, so nothing inside comments
/// or CDATA is treated specially. Malformed tokens (unterminated at EOF,
/// `</>`) are dropped with a warning, never fatal.
pub struct TagTokenizer {
    pub(super) state: TokenizerState,
    pub(super) input: String,
    pub(super) current_pos: usize,
    pub(super) current_input_character: Option<char>,
    pub(super) current_token: Option<TagToken>,
    pub(super) token_stream: Vec<TagToken>,
    pub(super) at_eof: bool,
    // When true, the next iteration of the main loop will not consume a new
    // character. "Reconsume in the X state" sets this flag.
    pub(super) reconsume: bool,

    // 1-based location of the next character to consume.
    pub(super) line: usize,
    pub(super) column: usize,

    // Location of current_input_character, captured by consume().
    pub(super) char_start: usize,
    pub(super) char_line: usize,
    pub(super) char_column: usize,

    // Span of the pending tag's `<`, recorded in the data state and carried
    // into the token when it is created. `end` is patched at emission.
    pub(super) tag_start: Option<Span>,
}

impl TagTokenizer {
    /// Create a new scanner for the given input. The initial state is the
    /// data state.
    #[must_use]
    pub fn new(input: String) -> Self {
        Self {
            state: TokenizerState::Data,
            input,
            current_pos: 0,
            current_input_character: None,
            current_token: None,
            token_stream: Vec::new(),
            at_eof: false,
            reconsume: false,
            line: 1,
            column: 1,
            char_start: 0,
            char_line: 1,
            char_column: 1,
            tag_start: None,
        }
    }

    /// Consume the scanner and return the token stream.
    /// Call this after [`TagTokenizer::run`] to get the tokens for the checker.
    #[must_use]
    pub fn into_tokens(self) -> Vec<TagToken> {
        self.token_stream
    }

    /// Run the scanner to the end of the input.
    pub fn run(&mut self) {
        loop {
            // Each state begins by consuming the next input character,
            // unless we're reconsuming from a previous state transition.
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume();
            }

            if self.current_input_character.is_none() && self.at_eof {
                break;
            }

            match self.state {
                TokenizerState::Data => self.handle_data_state(),
                TokenizerState::TagOpen => self.handle_tag_open_state(),
                TokenizerState::EndTagOpen => self.handle_end_tag_open_state(),
                TokenizerState::TagName => self.handle_tag_name_state(),
                TokenizerState::BeforeAttributeName => self.handle_before_attribute_name_state(),
                TokenizerState::AttributeName => self.handle_attribute_name_state(),
                TokenizerState::AfterAttributeName => self.handle_after_attribute_name_state(),
                TokenizerState::BeforeAttributeValue => self.handle_before_attribute_value_state(),
                TokenizerState::AttributeValueDoubleQuoted => {
                    self.handle_attribute_value_double_quoted_state();
                }
                TokenizerState::AttributeValueSingleQuoted => {
                    self.handle_attribute_value_single_quoted_state();
                }
                TokenizerState::AttributeValueUnquoted => {
                    self.handle_attribute_value_unquoted_state();
                }
                TokenizerState::AfterAttributeValueQuoted => {
                    self.handle_after_attribute_value_quoted_state();
                }
                TokenizerState::SelfClosingStartTag => self.handle_self_closing_start_tag_state(),
            }
        }
    }

    /// Everything outside a tag. Text is irrelevant to balance checking, so
    /// only `<` does anything here.
    fn handle_data_state(&mut self) {
        match self.current_input_character {
            Some('<') => {
                self.tag_start = Some(Span::new(
                    self.char_start,
                    self.char_start,
                    self.char_line,
                    self.char_column,
                ));
                self.switch_to(TokenizerState::TagOpen);
            }
            None => {
                self.at_eof = true;
            }
            Some(_) => {}
        }
    }

    /// [§ 13.2.5.6 Tag open state](https://html.spec.whatwg.org/multipage/parsing.html#tag-open-state)
    ///
    /// Only `/` and ASCII letters continue a token from here. Markup
    /// declarations (`<!`), processing instructions (`<?`), and anything
    /// else mean the `<` was ordinary text.
    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            Some('/') => {
                self.switch_to(TokenizerState::EndTagOpen);
            }
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(TagToken::new(TagKind::Open, self.take_tag_start()));
                self.reconsume_in(TokenizerState::TagName);
            }
            None => {
                self.log_skip("end of input after '<'");
                self.abandon_tag();
                self.at_eof = true;
            }
            Some(_) => {
                self.abandon_tag();
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.7 End tag open state](https://html.spec.whatwg.org/multipage/parsing.html#end-tag-open-state)
    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if c.is_ascii_alphabetic() => {
                self.current_token = Some(TagToken::new(TagKind::Close, self.take_tag_start()));
                self.reconsume_in(TokenizerState::TagName);
            }
            // "</>" has no tag name to match against anything; skip it.
            Some('>') => {
                self.log_skip("closing tag with no name");
                self.abandon_tag();
                self.switch_to(TokenizerState::Data);
            }
            None => {
                self.log_skip("end of input after '</'");
                self.abandon_tag();
                self.at_eof = true;
            }
            Some(_) => {
                self.log_skip("invalid first character of closing tag name");
                self.abandon_tag();
                self.reconsume_in(TokenizerState::Data);
            }
        }
    }

    /// [§ 13.2.5.8 Tag name state](https://html.spec.whatwg.org/multipage/parsing.html#tag-name-state)
    ///
    /// Tag names are ASCII-lowercased here, which is what makes the balance
    /// checker case-insensitive.
    fn handle_tag_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            Some(c) if c.is_ascii_uppercase() => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_name(c.to_ascii_lowercase());
                }
            }
            Some('\0') => {
                self.log_skip("NUL in tag name");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_name('\u{FFFD}');
                }
            }
            None => {
                self.eof_in_tag();
            }
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_name(c);
                }
            }
        }
    }

    /// [§ 13.2.5.40 Self-closing start tag state](https://html.spec.whatwg.org/multipage/parsing.html#self-closing-start-tag-state)
    ///
    /// A `/>` on an open tag makes the token self-closing. The slash means
    /// nothing on a closing tag (`</div/>`), so there it is skipped.
    fn handle_self_closing_start_tag_state(&mut self) {
        match self.current_input_character {
            Some('>') => {
                let is_close = self
                    .current_token
                    .as_ref()
                    .is_some_and(|token| token.kind == TagKind::Close);
                if is_close {
                    self.log_skip("self-closing slash on a closing tag");
                } else if let Some(ref mut token) = self.current_token {
                    token.set_self_closing();
                }
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            None => {
                self.eof_in_tag();
            }
            Some(_) => {
                self.log_skip("stray '/' inside tag");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }

    /// [§ 13.2.5.32 Before attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-name-state)
    fn handle_before_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/' | '>') | None => {
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            // "=foo" before any attribute name; the '=' becomes part of the name.
            Some('=') => {
                self.log_skip("'=' before attribute name");
                if let Some(ref mut token) = self.current_token {
                    token.start_new_attribute();
                    token.append_to_current_attribute_name('=');
                }
                self.switch_to(TokenizerState::AttributeName);
            }
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.start_new_attribute();
                }
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.33 Attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-name-state)
    fn handle_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some('/' | '>') | None => {
                self.check_duplicate_attribute();
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some(c) if Self::is_whitespace_char(c) => {
                self.check_duplicate_attribute();
                self.reconsume_in(TokenizerState::AfterAttributeName);
            }
            Some('=') => {
                self.check_duplicate_attribute();
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some(c) if c.is_ascii_uppercase() => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name(c.to_ascii_lowercase());
                }
            }
            Some('\0') => {
                self.log_skip("NUL in attribute name");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name('\u{FFFD}');
                }
            }
            Some(c @ ('"' | '\'' | '<')) => {
                self.log_skip("unexpected character in attribute name");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name(c);
                }
            }
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_name(c);
                }
            }
        }
    }

    /// [§ 13.2.5.34 After attribute name state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-name-state)
    fn handle_after_attribute_name_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('=') => {
                self.switch_to(TokenizerState::BeforeAttributeValue);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            None => {
                self.eof_in_tag();
            }
            Some(_) => {
                if let Some(ref mut token) = self.current_token {
                    token.start_new_attribute();
                }
                self.reconsume_in(TokenizerState::AttributeName);
            }
        }
    }

    /// [§ 13.2.5.35 Before attribute value state](https://html.spec.whatwg.org/multipage/parsing.html#before-attribute-value-state)
    fn handle_before_attribute_value_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => {
                self.switch_to(TokenizerState::AttributeValueDoubleQuoted);
            }
            Some('\'') => {
                self.switch_to(TokenizerState::AttributeValueSingleQuoted);
            }
            Some('>') => {
                self.log_skip("missing attribute value");
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            _ => {
                self.reconsume_in(TokenizerState::AttributeValueUnquoted);
            }
        }
    }

    /// [§ 13.2.5.36 Attribute value (double-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(double-quoted)-state)
    ///
    /// A `>` in here is attribute data, not the end of the tag. Character
    /// references are left undecoded; the checker never reads values.
    fn handle_attribute_value_double_quoted_state(&mut self) {
        match self.current_input_character {
            Some('"') => {
                self.switch_to(TokenizerState::AfterAttributeValueQuoted);
            }
            Some('\0') => {
                self.log_skip("NUL in attribute value");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value('\u{FFFD}');
                }
            }
            None => {
                self.eof_in_tag();
            }
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value(c);
                }
            }
        }
    }

    /// [§ 13.2.5.37 Attribute value (single-quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(single-quoted)-state)
    fn handle_attribute_value_single_quoted_state(&mut self) {
        match self.current_input_character {
            Some('\'') => {
                self.switch_to(TokenizerState::AfterAttributeValueQuoted);
            }
            Some('\0') => {
                self.log_skip("NUL in attribute value");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value('\u{FFFD}');
                }
            }
            None => {
                self.eof_in_tag();
            }
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value(c);
                }
            }
        }
    }

    /// [§ 13.2.5.38 Attribute value (unquoted) state](https://html.spec.whatwg.org/multipage/parsing.html#attribute-value-(unquoted)-state)
    fn handle_attribute_value_unquoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            Some('\0') => {
                self.log_skip("NUL in attribute value");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value('\u{FFFD}');
                }
            }
            Some(c @ ('"' | '\'' | '<' | '=' | '`')) => {
                self.log_skip("unexpected character in unquoted attribute value");
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value(c);
                }
            }
            None => {
                self.eof_in_tag();
            }
            Some(c) => {
                if let Some(ref mut token) = self.current_token {
                    token.append_to_current_attribute_value(c);
                }
            }
        }
    }

    /// [§ 13.2.5.39 After attribute value (quoted) state](https://html.spec.whatwg.org/multipage/parsing.html#after-attribute-value-(quoted)-state)
    fn handle_after_attribute_value_quoted_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.switch_to(TokenizerState::BeforeAttributeName);
            }
            Some('/') => {
                self.switch_to(TokenizerState::SelfClosingStartTag);
            }
            Some('>') => {
                self.switch_to(TokenizerState::Data);
                self.emit_tag();
            }
            None => {
                self.eof_in_tag();
            }
            Some(_) => {
                self.log_skip("missing whitespace between attributes");
                self.reconsume_in(TokenizerState::BeforeAttributeName);
            }
        }
    }
}
