/// Inline text spans produced by the lexer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Span {
    Plain(String),
    Bold(String),
    Italic(String),
    Code(String),
    Link { content: String, target: String },
    Image { content: String, target: String },
}

impl Span {
    /// Display text (alt text for images).
    pub fn content(&self) -> &str {
        match self {
            Span::Plain(text) | Span::Bold(text) | Span::Italic(text) | Span::Code(text) => text,
            Span::Link { content, .. } | Span::Image { content, .. } => content,
        }
    }

    /// URL carried by links and images.
    pub fn target(&self) -> Option<&str> {
        match self {
            Span::Link { target, .. } | Span::Image { target, .. } => Some(target),
            _ => None,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Span::Plain(_))
    }
}

/// Block-level structure of a trimmed markdown chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    Heading,
    Quote,
    Code,
    UnorderedList,
    OrderedList,
}

impl BlockKind {
    pub fn name(self) -> &'static str {
        match self {
            BlockKind::Paragraph => "paragraph",
            BlockKind::Heading => "heading",
            BlockKind::Quote => "quote",
            BlockKind::Code => "code",
            BlockKind::UnorderedList => "unordered list",
            BlockKind::OrderedList => "ordered list",
        }
    }
}
