use core::fmt;
use std::collections::HashSet;

use serde::Serialize;

use crate::tokenizer::{Span, TagKind, TagToken, TagTokenizer};

/// Tag names that never take a closing tag.
///
/// An explicit configuration parameter of the checker: the default set is
/// the WHATWG void-element list, but callers can start from an empty set or
/// extend either. Names are matched ASCII-case-insensitively (the scanner
/// lowercases tag names; this set lowercases on insert).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoidElements {
    names: HashSet<String>,
}

/// The void elements of the HTML Living Standard
/// ([§ 13.1.2](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)).
const HTML_VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

impl Default for VoidElements {
    /// The WHATWG void-element list.
    fn default() -> Self {
        HTML_VOID_ELEMENTS.into_iter().collect()
    }
}

impl VoidElements {
    /// A set containing no void elements: every tag is expected to have a
    /// matching close tag.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            names: HashSet::new(),
        }
    }

    /// Whether the given tag name is a void element.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(&name.to_ascii_lowercase())
    }

    /// Add a tag name to the set.
    pub fn insert<S: Into<String>>(&mut self, name: S) {
        let _ = self.names.insert(name.into().to_ascii_lowercase());
    }
}

impl<S: Into<String>> FromIterator<S> for VoidElements {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::empty();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// An open tag sitting on the checker's stack, or left unclosed at the end
/// of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenTag {
    /// The tag name.
    pub name: String,
    /// Where the tag was opened.
    pub span: Span,
}

impl fmt::Display for OpenTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unclosed tag <{}>", self.name)
    }
}

/// What went wrong at a closing tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum MismatchKind {
    /// A closing tag arrived with nothing open. Nothing is popped.
    StrayClosingTag,
    /// The closing tag's name differs from the tag popped off the stack.
    MismatchedClosingTag {
        /// The name of the open tag that was popped.
        expected: String,
        /// Where that open tag was opened.
        opened: Span,
    },
}

/// A closing tag that did not match the document structure.
///
/// Mismatches are the expected output of an unbalanced document, not
/// errors: the checker records them and keeps scanning so every mismatch in
/// the document is reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mismatch {
    /// The closing tag's name as written in the document.
    pub found: String,
    /// Where the closing tag sits.
    pub span: Span,
    /// Which way it failed to match.
    pub kind: MismatchKind,
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            MismatchKind::StrayClosingTag => {
                write!(f, "stray closing tag </{}>: nothing is open", self.found)
            }
            MismatchKind::MismatchedClosingTag { expected, .. } => {
                write!(
                    f,
                    "mismatched closing tag </{}>: expected </{expected}>",
                    self.found
                )
            }
        }
    }
}

/// The checker's verdict on a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceReport {
    /// Every mismatched closing tag, in document order.
    pub mismatches: Vec<Mismatch>,
    /// Tags still open at the end of input, innermost first (LIFO).
    pub unclosed: Vec<OpenTag>,
}

impl BalanceReport {
    /// A document is balanced when nothing mismatched and nothing is left
    /// open. An empty document is balanced.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.mismatches.is_empty() && self.unclosed.is_empty()
    }

    /// Total number of findings, for summary lines.
    #[must_use]
    pub fn problem_count(&self) -> usize {
        self.mismatches.len() + self.unclosed.len()
    }
}

/// The tag balance checker.
///
/// Maintains a stack of open tag names: open tags push, closing tags pop,
/// void elements and self-closing tags are ignored. After all tokens are
/// processed the stack is empty if and only if the document is balanced.
///
/// A closing tag always consumes exactly one stack frame when one is
/// available; if the popped name differs, a mismatch is recorded and
/// checking continues. A closing tag against an empty stack records a
/// stray-closing-tag mismatch and pops nothing.
pub struct BalanceChecker {
    void_elements: VoidElements,
    stack: Vec<OpenTag>,
    mismatches: Vec<Mismatch>,
}

impl BalanceChecker {
    /// Create a checker with the given void-element set.
    #[must_use]
    pub fn new(void_elements: VoidElements) -> Self {
        Self {
            void_elements,
            stack: Vec::new(),
            mismatches: Vec::new(),
        }
    }

    /// Feed one scanned token to the checker.
    pub fn process(&mut self, token: &TagToken) {
        // Void elements never take a closing tag; ignore them entirely,
        // whichever way they were written.
        if self.void_elements.contains(&token.name) {
            return;
        }
        match token.kind {
            // A self-closing tag opens and closes itself.
            TagKind::SelfClosing => {}
            TagKind::Open => {
                self.stack.push(OpenTag {
                    name: token.name.clone(),
                    span: token.span,
                });
            }
            TagKind::Close => match self.stack.pop() {
                None => {
                    self.mismatches.push(Mismatch {
                        found: token.name.clone(),
                        span: token.span,
                        kind: MismatchKind::StrayClosingTag,
                    });
                }
                Some(open) => {
                    if open.name != token.name {
                        self.mismatches.push(Mismatch {
                            found: token.name.clone(),
                            span: token.span,
                            kind: MismatchKind::MismatchedClosingTag {
                                expected: open.name,
                                opened: open.span,
                            },
                        });
                    }
                }
            },
        }
    }

    /// Finish checking and produce the report. Whatever is still on the
    /// stack becomes the unclosed list, innermost first.
    #[must_use]
    pub fn finish(mut self) -> BalanceReport {
        let mut unclosed = Vec::with_capacity(self.stack.len());
        while let Some(open) = self.stack.pop() {
            unclosed.push(open);
        }
        BalanceReport {
            mismatches: self.mismatches,
            unclosed,
        }
    }
}

/// Scan a document and check its tag balance in one call.
///
/// This is the main entry point: it runs the scanner over the document,
/// feeds every token to a [`BalanceChecker`], and returns the report.
/// Checking the same document twice yields equal reports.
#[must_use]
pub fn check(document: &str, void_elements: &VoidElements) -> BalanceReport {
    let mut tokenizer = TagTokenizer::new(document.to_string());
    tokenizer.run();
    let tokens = tokenizer.into_tokens();

    let mut checker = BalanceChecker::new(void_elements.clone());
    for token in &tokens {
        checker.process(token);
    }
    checker.finish()
}
