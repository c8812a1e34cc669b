mod block;
mod config;
mod error;
mod html;
mod inline;
mod parser;
mod render;
mod site;

pub use block::{BlockKind, Span};
pub use config::{Config, PathsConfig, RenderConfig, SiteConfig};
pub use error::{Error, Result, SiteError};
pub use html::{HtmlNode, LeafNode, ParentNode};
pub use inline::{lex, lex_with, split_delimiter};
pub use parser::{classify, extract_title, segment};
pub use render::{RenderOptions, render_block, span_to_node};
pub use site::{BuildSummary, Template, build_site, copy_static, generate_page, generate_pages};

/// Convert markdown to an HTML tree using default options.
pub fn markdown_to_html_node(markdown: &str) -> Result<ParentNode> {
    render::markdown_to_html_node(markdown, &RenderOptions::default())
}

/// Convert markdown to an HTML tree with custom options.
pub fn markdown_to_html_node_with(markdown: &str, options: &RenderOptions) -> Result<ParentNode> {
    render::markdown_to_html_node(markdown, options)
}

/// Convert markdown to an HTML string using default options.
pub fn markdown_to_html(markdown: &str) -> Result<String> {
    markdown_to_html_with(markdown, &RenderOptions::default())
}

/// Convert markdown to an HTML string with custom options.
pub fn markdown_to_html_with(markdown: &str, options: &RenderOptions) -> Result<String> {
    render::markdown_to_html_node(markdown, options)?.to_html()
}
