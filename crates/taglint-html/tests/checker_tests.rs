//! Integration tests for the balance checker.

use taglint_html::{BalanceReport, MismatchKind, VoidElements, check};

/// Helper to check a document against an empty void-element set
fn check_strict(document: &str) -> BalanceReport {
    check(document, &VoidElements::empty())
}

#[test]
fn test_balanced_document() {
    let report = check_strict("<div><span></span></div>");
    assert!(report.is_balanced());
    assert!(report.mismatches.is_empty());
    assert!(report.unclosed.is_empty());
}

#[test]
fn test_empty_document() {
    let report = check_strict("");
    assert!(report.is_balanced());
}

#[test]
fn test_text_only_document() {
    let report = check_strict("no tags here, just prose");
    assert!(report.is_balanced());
}

#[test]
fn test_mismatched_close() {
    // The close tag pops <span> and reports the name clash; <div> stays
    // open and ends up unclosed.
    let report = check_strict("<div><span></div>");
    assert_eq!(report.mismatches.len(), 1);

    let mismatch = &report.mismatches[0];
    assert_eq!(mismatch.found, "div");
    match &mismatch.kind {
        MismatchKind::MismatchedClosingTag { expected, opened } => {
            assert_eq!(expected, "span");
            assert_eq!(opened.start, 5);
        }
        MismatchKind::StrayClosingTag => panic!("Expected MismatchedClosingTag"),
    }
    // Position of the `</div>` token itself
    assert_eq!(mismatch.span.start, 11);

    assert_eq!(report.unclosed.len(), 1);
    assert_eq!(report.unclosed[0].name, "div");
}

#[test]
fn test_stray_close() {
    let report = check_strict("</div>");
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.mismatches[0].found, "div");
    assert_eq!(report.mismatches[0].kind, MismatchKind::StrayClosingTag);
    assert!(report.unclosed.is_empty());
}

#[test]
fn test_unclosed_tags_reported_lifo() {
    let report = check_strict("<a><b>");
    assert!(report.mismatches.is_empty());

    let names: Vec<&str> = report.unclosed.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["b", "a"]);
}

#[test]
fn test_void_element_ignored() {
    let void_elements: VoidElements = ["img"].into_iter().collect();
    let report = check("<img>", &void_elements);
    assert!(report.is_balanced());
}

#[test]
fn test_void_element_not_in_set_is_unclosed() {
    let report = check_strict("<img>");
    assert_eq!(report.unclosed.len(), 1);
    assert_eq!(report.unclosed[0].name, "img");
}

#[test]
fn test_default_void_elements() {
    let report = check("<p><br><hr><img src=x></p>", &VoidElements::default());
    assert!(report.is_balanced());
}

#[test]
fn test_closing_a_void_element_is_ignored() {
    // "</br>" names a void element, so it is skipped rather than treated
    // as a stray close.
    let report = check("<div></br></div>", &VoidElements::default());
    assert!(report.is_balanced());
}

#[test]
fn test_self_closing_is_ignored() {
    let report = check_strict("<div><Widget /></div>");
    assert!(report.is_balanced());
}

#[test]
fn test_case_insensitive_matching() {
    let report = check_strict("<DIV></div>");
    assert!(report.is_balanced());
}

#[test]
fn test_all_mismatches_reported() {
    // Checking continues past the first mismatch.
    let report = check_strict("<a></b><c></d></e>");
    assert_eq!(report.mismatches.len(), 3);
    assert_eq!(report.mismatches[0].found, "b");
    assert_eq!(report.mismatches[1].found, "d");
    assert_eq!(report.mismatches[2].found, "e");
    assert_eq!(report.mismatches[2].kind, MismatchKind::StrayClosingTag);
    assert!(report.unclosed.is_empty());
}

#[test]
fn test_gt_in_attribute_does_not_unbalance() {
    let report = check_strict(r#"<div data-x="a>b"></div>"#);
    assert!(report.is_balanced());
}

#[test]
fn test_tag_inside_comment_is_counted() {
    // No comment handling: the scanner sees the <div> inside the comment.
    let report = check_strict("<!-- <div> -->");
    assert_eq!(report.unclosed.len(), 1);
    assert_eq!(report.unclosed[0].name, "div");
}

#[test]
fn test_mismatch_positions_line_and_column() {
    let report = check_strict("<a>\n  <b>\n</a>");
    assert_eq!(report.mismatches.len(), 1);
    assert_eq!(report.mismatches[0].span.line, 3);
    assert_eq!(report.mismatches[0].span.column, 1);
    match &report.mismatches[0].kind {
        MismatchKind::MismatchedClosingTag { expected, opened } => {
            assert_eq!(expected, "b");
            assert_eq!((opened.line, opened.column), (2, 3));
        }
        MismatchKind::StrayClosingTag => panic!("Expected MismatchedClosingTag"),
    }
}

#[test]
fn test_check_is_idempotent() {
    let document = "<div><span></div><p>";
    let first = check_strict(document);
    let second = check_strict(document);
    assert_eq!(first, second);
}

#[test]
fn test_report_serializes_to_json() {
    let report = check_strict("<a><b>");
    let json = serde_json::to_string(&report).expect("report should serialize");
    assert!(json.contains("\"unclosed\""));
    assert!(json.contains("\"b\""));
}

#[test]
fn test_mismatch_display() {
    let report = check_strict("<span></div></p>");
    assert_eq!(
        report.mismatches[0].to_string(),
        "mismatched closing tag </div>: expected </span>"
    );
    assert_eq!(
        report.mismatches[1].to_string(),
        "stray closing tag </p>: nothing is open"
    );
}
