//! Tag scanner and balance checker for HTML and template documents.
//!
//! # Scope
//!
//! This crate implements:
//! - **Tag Scanner** - a pared-down version of the tag states from
//!   [WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization),
//!   extracting open, close, and self-closing tag tokens with their source
//!   positions. Text between tags is skipped; attribute scanning exists so
//!   that a `>` inside a quoted attribute value does not end the tag.
//! - **Balance Checker** - a stack walk over the token stream that reports
//!   mismatched closing tags and unclosed open tags, with a configurable
//!   set of void elements that never take a closing tag.
//!
//! # Not Implemented
//!
//! - Comment, CDATA, and script/style raw-text handling: a `<` that does
//!   not begin a tag-like token is treated as ordinary text, so tag-like
//!   tokens inside comments are still scanned.
//! - Character reference decoding (irrelevant to balance).
//! - DOM construction.

/// Balance checking over the scanned token stream.
pub mod checker;
/// Tag scanner for converting input text into tag tokens.
pub mod tokenizer;

pub use checker::{
    BalanceChecker, BalanceReport, Mismatch, MismatchKind, OpenTag, VoidElements, check,
};
pub use tokenizer::{Attribute, Span, TagKind, TagToken, TagTokenizer};
