//! Integration tests for the tag scanner.

use taglint_html::{TagKind, TagToken, TagTokenizer};

/// Helper to scan a string and return the tag tokens
fn tokenize(input: &str) -> Vec<TagToken> {
    let mut tokenizer = TagTokenizer::new(input.to_string());
    tokenizer.run();
    tokenizer.into_tokens()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("Hello, world");
    assert!(tokens.is_empty());
}

#[test]
fn test_open_tag() {
    let tokens = tokenize("<div>");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TagKind::Open);
    assert_eq!(tokens[0].name, "div");
    assert!(tokens[0].attributes.is_empty());
}

#[test]
fn test_close_tag() {
    let tokens = tokenize("</div>");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TagKind::Close);
    assert_eq!(tokens[0].name, "div");
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TagKind::SelfClosing);
    assert_eq!(tokens[0].name, "br");
}

#[test]
fn test_self_closing_tag_with_space() {
    let tokens = tokenize("<Tag />");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TagKind::SelfClosing);
    assert_eq!(tokens[0].name, "tag");
}

#[test]
fn test_uppercase_names_are_lowercased() {
    let tokens = tokenize("<DIV CLASS=x></Div>");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].name, "div");
    assert_eq!(tokens[0].attributes[0].name, "class");
    assert_eq!(tokens[1].name, "div");
}

#[test]
fn test_attribute_double_quoted() {
    let tokens = tokenize(r#"<div class="foo">"#);
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].attributes.len(), 1);
    assert_eq!(tokens[0].attributes[0].name, "class");
    assert_eq!(tokens[0].attributes[0].value, "foo");
}

#[test]
fn test_attribute_single_quoted() {
    let tokens = tokenize("<div class='bar'>");
    assert_eq!(tokens[0].attributes.len(), 1);
    assert_eq!(tokens[0].attributes[0].value, "bar");
}

#[test]
fn test_attribute_unquoted() {
    let tokens = tokenize("<div class=baz>");
    assert_eq!(tokens[0].attributes.len(), 1);
    assert_eq!(tokens[0].attributes[0].value, "baz");
}

#[test]
fn test_boolean_attribute() {
    let tokens = tokenize("<input disabled>");
    assert_eq!(tokens[0].attributes.len(), 1);
    assert_eq!(tokens[0].attributes[0].name, "disabled");
    assert_eq!(tokens[0].attributes[0].value, "");
}

#[test]
fn test_gt_inside_quoted_attribute_value() {
    // The '>' inside the quotes is attribute data, not the end of the tag.
    let tokens = tokenize(r#"<div data-x="a>b"><span>"#);
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].name, "div");
    assert_eq!(tokens[0].attributes[0].value, "a>b");
    assert_eq!(tokens[1].name, "span");
}

#[test]
fn test_duplicate_attribute_is_dropped() {
    let tokens = tokenize(r#"<div class="a" class="b">"#);
    assert_eq!(tokens[0].attributes.len(), 1);
    assert_eq!(tokens[0].attributes[0].value, "a");
}

#[test]
fn test_lone_lt_is_text() {
    // "<" followed by a non-letter never starts a token.
    let tokens = tokenize("a < b and c <3 d");
    assert!(tokens.is_empty());
}

#[test]
fn test_markup_declaration_is_text() {
    // No comment handling: "<!--" is not a token start, but the tag-like
    // token inside is still scanned.
    let tokens = tokenize("<!-- <div> -->");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].name, "div");
}

#[test]
fn test_empty_close_tag_is_skipped() {
    let tokens = tokenize("</>");
    assert!(tokens.is_empty());
}

#[test]
fn test_unterminated_tag_is_dropped() {
    let tokens = tokenize("<div class=");
    assert!(tokens.is_empty());
}

#[test]
fn test_unterminated_lt_at_eof_is_dropped() {
    let tokens = tokenize("text <");
    assert!(tokens.is_empty());
}

#[test]
fn test_slash_on_close_tag_is_ignored() {
    let tokens = tokenize("</div/>");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TagKind::Close);
    assert_eq!(tokens[0].name, "div");
}

#[test]
fn test_token_order() {
    let tokens = tokenize("<a>text<b>more</b></a>");
    let names: Vec<&str> = tokens.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["a", "b", "b", "a"]);
    assert_eq!(tokens[0].kind, TagKind::Open);
    assert_eq!(tokens[2].kind, TagKind::Close);
}

#[test]
fn test_spans_byte_offsets() {
    let tokens = tokenize("ab<div>cd</div>");
    assert_eq!(tokens[0].span.start, 2);
    assert_eq!(tokens[0].span.end, 7);
    assert_eq!(tokens[1].span.start, 9);
    assert_eq!(tokens[1].span.end, 15);
}

#[test]
fn test_spans_line_and_column() {
    let tokens = tokenize("<a>\n  <b>\n</a>");
    assert_eq!((tokens[0].span.line, tokens[0].span.column), (1, 1));
    assert_eq!((tokens[1].span.line, tokens[1].span.column), (2, 3));
    assert_eq!((tokens[2].span.line, tokens[2].span.column), (3, 1));
}

#[test]
fn test_display_round_trips_shape() {
    let tokens = tokenize(r#"<div class="foo"><br/></div>"#);
    assert_eq!(tokens[0].to_string(), r#"<div class="foo">"#);
    assert_eq!(tokens[1].to_string(), "<br />");
    assert_eq!(tokens[2].to_string(), "</div>");
}
