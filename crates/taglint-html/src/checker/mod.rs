//! Balance checker module.
//!
//! Walks the scanned token stream with a stack of open tags and reports
//! mismatched closing tags and unclosed open tags.

/// Balance checker implementation.
pub mod core;

pub use self::core::{
    BalanceChecker, BalanceReport, Mismatch, MismatchKind, OpenTag, VoidElements, check,
};
