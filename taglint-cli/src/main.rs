//! taglint CLI
//!
//! Checks a document's tag balance: every mismatched closing tag and every
//! tag left open at the end of input is reported with its position.

use anyhow::Result;
use clap::Parser;
use owo_colors::OwoColorize;
use taglint_common::source::read_document;
use taglint_html::{BalanceReport, MismatchKind, TagTokenizer, VoidElements, check};

/// taglint — tag balance checker for HTML and template documents
#[derive(Parser, Debug)]
#[command(name = "taglint")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Check a file
    taglint index.html

    # Check an inline snippet
    taglint --html '<div><span></div>'

    # Treat every tag as requiring a close tag
    taglint --no-default-voids index.html

    # Extend the void-element set for a template dialect
    taglint --void include,partial page.tmpl

    # Machine-readable output
    taglint --json index.html
"#)]
struct Cli {
    /// Path to the document to check
    #[arg(value_name = "FILE")]
    path: Option<String>,

    /// Check a document string directly instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Additional void-element names (comma-separated)
    #[arg(long, value_name = "NAMES", value_delimiter = ',')]
    void: Vec<String>,

    /// Start from an empty void-element set instead of the WHATWG defaults
    #[arg(long)]
    no_default_voids: bool,

    /// Print the scanned tag tokens before the report
    #[arg(long)]
    tokens: bool,

    /// Emit the report as JSON
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let (document, source_name) = if let Some(ref html) = cli.html {
        (html.clone(), "<inline>".to_string())
    } else if let Some(ref path) = cli.path {
        (read_document(path)?, path.clone())
    } else {
        eprintln!("Usage: taglint <file.html>");
        eprintln!("       taglint --html '<div>...</div>'");
        std::process::exit(2);
    };

    let mut void_elements = if cli.no_default_voids {
        VoidElements::empty()
    } else {
        VoidElements::default()
    };
    for name in &cli.void {
        void_elements.insert(name.as_str());
    }

    if cli.tokens {
        print_tokens(&document);
    }

    let report = check(&document, &void_elements);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&source_name, &report);
    }

    if !report.is_balanced() {
        std::process::exit(1);
    }
    Ok(())
}

/// Debug dump of the scanned tag tokens with their positions.
fn print_tokens(document: &str) {
    let mut tokenizer = TagTokenizer::new(document.to_string());
    tokenizer.run();

    println!("=== Tag Tokens ===");
    for token in tokenizer.into_tokens() {
        println!("{:>4}:{:<4} {token}", token.span.line, token.span.column);
    }
    println!();
}

/// Human-readable report, one `path:line:col: message` line per finding.
fn print_report(source_name: &str, report: &BalanceReport) {
    for mismatch in &report.mismatches {
        println!(
            "{source_name}:{}:{}: {}",
            mismatch.span.line,
            mismatch.span.column,
            mismatch.red()
        );
        if let MismatchKind::MismatchedClosingTag { opened, .. } = &mismatch.kind {
            println!(
                "    opened at {source_name}:{}:{}",
                opened.line, opened.column
            );
        }
    }
    for open in &report.unclosed {
        println!(
            "{source_name}:{}:{}: {}",
            open.span.line,
            open.span.column,
            open.yellow()
        );
    }

    if report.is_balanced() {
        println!("{}", "✓ tags are balanced".green());
    } else {
        let count = report.problem_count();
        let noun = if count == 1 { "problem" } else { "problems" };
        println!("{}", format!("✗ {count} {noun}").red());
    }
}
