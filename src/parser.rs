use std::sync::OnceLock;

use regex::Regex;

use crate::block::BlockKind;
use crate::error::{Error, Result};

/// Split a document into trimmed, non-empty blocks separated by blank lines.
pub fn segment(markdown: &str) -> Vec<String> {
    let markdown = markdown.replace("\r\n", "\n");
    markdown
        .split("\n\n")
        .map(str::trim)
        .filter(|block| !block.is_empty())
        .map(str::to_string)
        .collect()
}

fn heading_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#{1,6} ").expect("Invalid heading regex"))
}

fn code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)^```.*```$").expect("Invalid code fence regex"))
}

fn ordered_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\. ").expect("Invalid ordered list regex"))
}

/// Classify a block by its leading syntax. First match wins and anything
/// unrecognised is a paragraph.
pub fn classify(block: &str) -> BlockKind {
    if heading_re().is_match(block) {
        BlockKind::Heading
    } else if code_re().is_match(block) {
        BlockKind::Code
    } else if block.starts_with("> ") {
        BlockKind::Quote
    } else if block.starts_with("- ") {
        BlockKind::UnorderedList
    } else if ordered_item_re().is_match(block) {
        BlockKind::OrderedList
    } else {
        BlockKind::Paragraph
    }
}

/// Text of the first single-line level-1 heading (`# Title`) in the
/// document.
pub fn extract_title(markdown: &str) -> Result<String> {
    segment(markdown)
        .iter()
        .filter(|block| !block.contains('\n'))
        .find_map(|block| block.strip_prefix("# ").map(|title| title.trim().to_string()))
        .ok_or(Error::MissingHeader)
}
