use core::fmt;
use std::collections::HashSet;

use serde::Serialize;
use strum_macros::Display;

/// A position range in the source document.
///
/// `start` and `end` are byte offsets: `start` points at the `<` that opened
/// the token and `end` just past its `>`. `line` and `column` are the
/// 1-based location of the `<`, for human-readable reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    /// Byte offset of the token's `<`.
    pub start: usize,
    /// Byte offset just past the token's `>`.
    pub end: usize,
    /// 1-based line of the token's `<`.
    pub line: usize,
    /// 1-based column of the token's `<`.
    pub column: usize,
}

impl Span {
    /// Create a new span.
    #[must_use]
    pub const fn new(start: usize, end: usize, line: usize, column: usize) -> Self {
        Self {
            start,
            end,
            line,
            column,
        }
    }
}

/// An attribute on a tag token, with a name and a value.
///
/// Attributes are scanned only so that characters like `>` inside quoted
/// values do not terminate the tag; the checker never looks at them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    /// The attribute name, ASCII-lowercased.
    pub name: String,
    /// The attribute value, empty for boolean attributes.
    pub value: String,
}

impl Attribute {
    /// Create a new attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self { name, value }
    }
}

/// The three kinds of tag-like token the scanner produces.
///
/// Self-closing syntax (`<br />`) is detected directly from the slash in
/// the token, so self-closing tags need no per-name exception list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
pub enum TagKind {
    /// An opening tag: `<div>`.
    Open,
    /// A closing tag: `</div>`.
    Close,
    /// A self-closing tag: `<br/>`. Opens and closes itself; the balance
    /// checker ignores it.
    SelfClosing,
}

/// A tag-like token extracted from the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagToken {
    /// Whether this token opens, closes, or self-closes.
    pub kind: TagKind,
    /// The tag name, ASCII-lowercased during scanning.
    pub name: String,
    /// Scanned attributes, in source order.
    pub attributes: Vec<Attribute>,
    /// Where the token sits in the source document.
    pub span: Span,
}

impl TagToken {
    /// Create a new tag token with an empty name and no attributes.
    ///
    /// The span's `end` is patched by the scanner when the token's `>` is
    /// consumed.
    #[must_use]
    pub const fn new(kind: TagKind, span: Span) -> Self {
        Self {
            kind,
            name: String::new(),
            attributes: Vec::new(),
            span,
        }
    }

    /// Append a character to the tag name.
    pub fn append_to_name(&mut self, c: char) {
        self.name.push(c);
    }

    /// Turn an open tag into a self-closing one when the scanner sees the
    /// `/>` sequence.
    ///
    /// # Panics
    ///
    /// Panics if called on a non-open token, indicating a scanner bug; the
    /// scanner checks the kind before calling this.
    pub fn set_self_closing(&mut self) {
        match self.kind {
            TagKind::Open => self.kind = TagKind::SelfClosing,
            TagKind::Close | TagKind::SelfClosing => {
                panic!("set_self_closing called on a non-open tag token");
            }
        }
    }

    /// Start a new attribute with an empty name and value.
    pub fn start_new_attribute(&mut self) {
        self.attributes.push(Attribute::new(String::new(), String::new()));
    }

    /// Append a character to the current (last) attribute's name.
    pub fn append_to_current_attribute_name(&mut self, c: char) {
        if let Some(attr) = self.attributes.last_mut() {
            attr.name.push(c);
        }
    }

    /// Append a character to the current (last) attribute's value.
    pub fn append_to_current_attribute_value(&mut self, c: char) {
        if let Some(attr) = self.attributes.last_mut() {
            attr.value.push(c);
        }
    }

    /// Check whether the current (last) attribute's name repeats an earlier
    /// attribute on the same token.
    #[must_use]
    pub fn current_attribute_name_is_duplicate(&self) -> bool {
        self.attributes.last().is_some_and(|current| {
            self.attributes[..self.attributes.len() - 1]
                .iter()
                .any(|attr| attr.name == current.name)
        })
    }

    /// Drop every attribute whose name repeats an earlier one, keeping the
    /// first occurrence. Called at emission: a duplicate's value still has
    /// to be scanned before the attribute can be discarded.
    pub fn remove_duplicate_attributes(&mut self) {
        let mut seen = HashSet::new();
        self.attributes.retain(|attr| seen.insert(attr.name.clone()));
    }
}

impl fmt::Display for TagToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TagKind::Close => write!(f, "</{}>", self.name),
            TagKind::Open | TagKind::SelfClosing => {
                write!(f, "<{}", self.name)?;
                for attr in &self.attributes {
                    write!(f, " {}=\"{}\"", attr.name, attr.value)?;
                }
                if self.kind == TagKind::SelfClosing {
                    write!(f, " /")?;
                }
                write!(f, ">")
            }
        }
    }
}
