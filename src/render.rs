use std::sync::OnceLock;

use regex::Regex;

use crate::block::{BlockKind, Span};
use crate::error::{Error, Result};
use crate::html::{HtmlNode, LeafNode, ParentNode};
use crate::inline::lex_with;
use crate::parser::{classify, segment};

/// Knobs for the block renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Emit `h1`..`h6` matching the heading's `#` count. When false every
    /// heading becomes `h1`.
    pub heading_levels: bool,
    /// Reject odd delimiter counts instead of splitting leniently.
    pub strict_delimiters: bool,
    /// Strip the `>` marker from every quote line and join multi-line
    /// headings with spaces. When false only the block's leading `> ` is
    /// removed and heading line breaks are kept.
    pub continuation_lines: bool,
}

/// Render a whole document into a `div` holding one node per block.
pub fn markdown_to_html_node(markdown: &str, options: &RenderOptions) -> Result<ParentNode> {
    let children = segment(markdown)
        .iter()
        .map(|block| render_block(block, classify(block), options).map(HtmlNode::from))
        .collect::<Result<Vec<_>>>()?;
    Ok(ParentNode::new("div", children))
}

/// Render one classified block.
pub fn render_block(block: &str, kind: BlockKind, options: &RenderOptions) -> Result<ParentNode> {
    match kind {
        BlockKind::Heading => heading_to_node(block, options),
        BlockKind::Code => code_to_node(block),
        BlockKind::Quote => quote_to_node(block, options),
        BlockKind::UnorderedList | BlockKind::OrderedList => list_to_node(block, kind, options),
        BlockKind::Paragraph => paragraph_to_node(block, options),
    }
}

pub fn span_to_node(span: Span) -> HtmlNode {
    let leaf = match span {
        Span::Plain(text) => LeafNode::raw(text),
        Span::Bold(text) => LeafNode::new("b", text),
        Span::Italic(text) => LeafNode::new("i", text),
        Span::Code(text) => LeafNode::new("code", html_escape::encode_text(&text)),
        Span::Link { content, target } => LeafNode::new("a", content).with_attribute("href", target),
        Span::Image { content, target } => LeafNode::new("img", "")
            .with_attribute("src", target)
            .with_attribute("alt", content),
    };
    leaf.into()
}

fn text_to_children(text: &str, options: &RenderOptions) -> Result<Vec<HtmlNode>> {
    Ok(lex_with(text, options.strict_delimiters)?
        .into_iter()
        .map(span_to_node)
        .collect())
}

fn missing_syntax(kind: BlockKind, block: &str) -> Error {
    Error::StructuralInvariant(format!(
        "block classified as {} lacks its syntax: {:?}",
        kind.name(),
        block
    ))
}

fn heading_to_node(block: &str, options: &RenderOptions) -> Result<ParentNode> {
    let level = block.bytes().take_while(|&b| b == b'#').count();
    let text = block[level..]
        .strip_prefix(' ')
        .filter(|_| (1..=6).contains(&level))
        .ok_or_else(|| missing_syntax(BlockKind::Heading, block))?;

    let tag = if options.heading_levels {
        format!("h{level}")
    } else {
        "h1".to_string()
    };
    let text = if options.continuation_lines {
        text.replace('\n', " ")
    } else {
        text.to_string()
    };
    Ok(ParentNode::new(&tag, text_to_children(&text, options)?))
}

fn code_to_node(block: &str) -> Result<ParentNode> {
    let inner = block
        .strip_prefix("```")
        .and_then(|rest| rest.strip_suffix("```"))
        .ok_or_else(|| missing_syntax(BlockKind::Code, block))?;

    // The fence line may carry an info string; a one-line block has none.
    let (info, body) = match inner.split_once('\n') {
        Some((info, body)) => (info.trim(), body),
        None => ("", inner),
    };

    let mut code = LeafNode::new("code", html_escape::encode_text(body));
    if !info.is_empty() {
        code = code.with_attribute("class", format!("language-{info}"));
    }
    Ok(ParentNode::new("pre", vec![code.into()]))
}

fn quote_to_node(block: &str, options: &RenderOptions) -> Result<ParentNode> {
    let rest = block
        .strip_prefix("> ")
        .ok_or_else(|| missing_syntax(BlockKind::Quote, block))?;

    if !options.continuation_lines {
        return Ok(ParentNode::new("blockquote", text_to_children(rest, options)?));
    }

    let text = rest
        .lines()
        .map(|line| match line.strip_prefix('>') {
            Some(marked) => marked.strip_prefix(' ').unwrap_or(marked),
            None => line,
        })
        .collect::<Vec<_>>()
        .join("\n");
    Ok(ParentNode::new("blockquote", text_to_children(&text, options)?))
}

fn ordered_item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\. (.*)$").expect("Invalid ordered item regex"))
}

/// Text of a list line, or `None` when the line is not an item of `kind`.
fn list_item_text(line: &str, kind: BlockKind) -> Option<&str> {
    match kind {
        BlockKind::UnorderedList => line.strip_prefix("- "),
        BlockKind::OrderedList => ordered_item_re()
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|text| text.as_str()),
        _ => None,
    }
}

fn list_to_node(block: &str, kind: BlockKind, options: &RenderOptions) -> Result<ParentNode> {
    let tag = match kind {
        BlockKind::UnorderedList => "ul",
        BlockKind::OrderedList => "ol",
        _ => return Err(missing_syntax(kind, block)),
    };

    // Lines that are not items are skipped; numbering is not checked.
    let items = block
        .lines()
        .filter_map(|line| list_item_text(line, kind))
        .map(|text| Ok(ParentNode::new("li", text_to_children(text, options)?).into()))
        .collect::<Result<Vec<HtmlNode>>>()?;
    Ok(ParentNode::new(tag, items))
}

fn paragraph_to_node(block: &str, options: &RenderOptions) -> Result<ParentNode> {
    let text = block.replace('\n', " ");
    Ok(ParentNode::new("p", text_to_children(&text, options)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn render(markdown: &str) -> String {
        crate::markdown_to_html(markdown).unwrap()
    }

    fn render_with(markdown: &str, options: RenderOptions) -> String {
        crate::markdown_to_html_with(markdown, &options).unwrap()
    }

    #[test]
    fn paragraph() {
        assert_eq!(render("hello"), "<div><p>hello</p></div>");
    }

    #[test]
    fn empty_document() {
        assert_eq!(render(""), "<div></div>");
        assert_eq!(render("\n\n  \n"), "<div></div>");
    }

    #[test]
    fn paragraphs_collapse_newlines() {
        let md = "\nThis is **bolded** paragraph\ntext in a p\ntag here\n\nThis is another paragraph with _italic_ text and `code` here\n\n";
        assert_eq!(
            render(md),
            "<div><p>This is <b>bolded</b> paragraph text in a p tag here</p>\
             <p>This is another paragraph with <i>italic</i> text and <code>code</code> here</p></div>"
        );
    }

    #[test]
    fn heading() {
        assert_eq!(render("# Title"), "<div><h1>Title</h1></div>");
    }

    #[test]
    fn heading_levels_collapse_to_h1_by_default() {
        assert_eq!(
            render("## Sub\n\n###### Deep"),
            "<div><h1>Sub</h1><h1>Deep</h1></div>"
        );
    }

    #[test]
    fn heading_levels_when_enabled() {
        let options = RenderOptions {
            heading_levels: true,
            ..Default::default()
        };
        assert_eq!(
            render_with("# One\n\n### Three\n\n###### Six", options),
            "<div><h1>One</h1><h3>Three</h3><h6>Six</h6></div>"
        );
    }

    #[test]
    fn heading_with_inline_markup() {
        assert_eq!(
            render("# The **best** [site](/)"),
            r#"<div><h1>The <b>best</b> <a href="/">site</a></h1></div>"#
        );
    }

    #[test]
    fn code_block_is_not_lexed() {
        let md = "```\nThis is text that _should_ remain\nthe **same** even with inline stuff\n```";
        assert_eq!(
            render(md),
            "<div><pre><code>This is text that _should_ remain\nthe **same** even with inline stuff\n</code></pre></div>"
        );
    }

    #[test]
    fn code_block_with_language() {
        assert_eq!(
            render("```rust\nif a < b {}\n```"),
            r#"<div><pre><code class="language-rust">if a &lt; b {}
</code></pre></div>"#
        );
    }

    #[test]
    fn single_line_code_block() {
        assert_eq!(render("```x = 1```"), "<div><pre><code>x = 1</code></pre></div>");
    }

    #[test]
    fn quote_strips_only_leading_marker() {
        assert_eq!(
            render("> All that is gold\n> does not _glitter_"),
            "<div><blockquote>All that is gold\n> does not <i>glitter</i></blockquote></div>"
        );
    }

    #[test]
    fn quote_strips_every_marker_with_continuation_lines() {
        let options = RenderOptions {
            continuation_lines: true,
            ..Default::default()
        };
        assert_eq!(
            render_with("> All that is gold\n> does not _glitter_\n>\n>tight", options),
            "<div><blockquote>All that is gold\ndoes not <i>glitter</i>\n\ntight</blockquote></div>"
        );
    }

    #[test]
    fn multi_line_heading_keeps_line_breaks() {
        assert_eq!(render("# a\nb"), "<div><h1>a\nb</h1></div>");
    }

    #[test]
    fn multi_line_heading_joined_with_continuation_lines() {
        let options = RenderOptions {
            continuation_lines: true,
            ..Default::default()
        };
        assert_eq!(render_with("# a\nb", options), "<div><h1>a b</h1></div>");
    }

    #[test]
    fn document_tree_has_one_child_per_block() {
        let options = RenderOptions {
            heading_levels: true,
            ..Default::default()
        };
        let node = crate::markdown_to_html_node_with("## Sub\n\n- a\n- b\n\ntext", &options)
            .unwrap();
        assert_eq!(node.tag.as_deref(), Some("div"));
        assert_eq!(node.children().len(), 3);
        assert_eq!(node.children()[0].to_html().unwrap(), "<h2>Sub</h2>");
        assert_eq!(crate::markdown_to_html_node("text").unwrap().children().len(), 1);
    }

    #[test]
    fn unordered_list() {
        assert_eq!(
            render("- one\n- **two**\nstray line\n- three"),
            "<div><ul><li>one</li><li><b>two</b></li><li>three</li></ul></div>"
        );
    }

    #[test]
    fn ordered_list_does_not_check_numbering() {
        assert_eq!(
            render("1. one\n1. two\n7. three"),
            "<div><ol><li>one</li><li>two</li><li>three</li></ol></div>"
        );
    }

    #[test]
    fn links_and_images() {
        assert_eq!(
            render("See [home](/) and ![logo](/logo.png)"),
            r#"<div><p>See <a href="/">home</a> and <img src="/logo.png" alt="logo"></img></p></div>"#
        );
    }

    #[test]
    fn inline_code_is_escaped() {
        assert_eq!(
            render("use `<br>` here"),
            "<div><p>use <code>&lt;br&gt;</code> here</p></div>"
        );
    }

    #[test]
    fn mixed_document() {
        let md = "# Tolkien Fan Club\n\n\
                  ![JRR Tolkien sitting](/images/tolkien.png)\n\n\
                  Here's the deal, **I like Tolkien**.\n\n\
                  > \"I am in fact a Hobbit in all but size.\"\n\n\
                  ## Reasons\n\n\
                  1. Great world\n2. Great prose\n\n\
                  - Elves\n- Dwarves\n\n\
                  ```\nfn main() {}\n```";
        assert_eq!(
            render(md),
            "<div><h1>Tolkien Fan Club</h1>\
             <p><img src=\"/images/tolkien.png\" alt=\"JRR Tolkien sitting\"></img></p>\
             <p>Here's the deal, <b>I like Tolkien</b>.</p>\
             <blockquote>\"I am in fact a Hobbit in all but size.\"</blockquote>\
             <h1>Reasons</h1>\
             <ol><li>Great world</li><li>Great prose</li></ol>\
             <ul><li>Elves</li><li>Dwarves</li></ul>\
             <pre><code>fn main() {}\n</code></pre></div>"
        );
    }

    #[test]
    fn rendering_is_deterministic() {
        let md = "# A\n\n- b\n- _c_\n\n[d](/e)";
        assert_eq!(render(md), render(md));
    }

    #[test]
    fn malformed_link_fails_document() {
        assert!(matches!(
            crate::markdown_to_html("fine\n\nbroken [text]"),
            Err(Error::MalformedInline { kind: "link", .. })
        ));
    }

    #[test]
    fn strict_delimiters_fail_document() {
        let options = RenderOptions {
            strict_delimiters: true,
            ..Default::default()
        };
        assert!(matches!(
            crate::markdown_to_html_with("a **b", &options),
            Err(Error::UnbalancedDelimiter { .. })
        ));
    }

    #[test]
    fn misclassified_block_is_an_invariant_violation() {
        let options = RenderOptions::default();
        for (block, kind) in [
            ("plain", BlockKind::Heading),
            ("####### seven", BlockKind::Heading),
            ("plain", BlockKind::Code),
            ("plain", BlockKind::Quote),
        ] {
            assert!(
                matches!(
                    render_block(block, kind, &options),
                    Err(Error::StructuralInvariant(_))
                ),
                "{block:?} as {kind:?}"
            );
        }
    }

    #[test]
    fn list_without_items_is_empty() {
        let node = render_block("no bullets", BlockKind::UnorderedList, &RenderOptions::default())
            .unwrap();
        assert_eq!(node.to_html().unwrap(), "<ul></ul>");
    }
}
