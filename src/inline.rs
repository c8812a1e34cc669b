use std::sync::OnceLock;

use regex::Regex;

use crate::block::Span;
use crate::error::{Error, Result};

/// Split `text` into typed spans using the lenient delimiter rules.
pub fn lex(text: &str) -> Result<Vec<Span>> {
    lex_with(text, false)
}

/// Split `text` into typed spans.
///
/// Passes run in a fixed order (bold, italic, code, image, link) and each
/// only looks at spans that are still plain, so text claimed by an earlier
/// pass is never re-scanned. With `strict_delimiters` an odd number of a
/// delimiter inside one plain run is an error instead of being split
/// even/odd.
pub fn lex_with(text: &str, strict_delimiters: bool) -> Result<Vec<Span>> {
    let spans = vec![Span::Plain(text.to_string())];
    let spans = split_delimiter(spans, "**", Span::Bold, strict_delimiters)?;
    let spans = split_delimiter(spans, "_", Span::Italic, strict_delimiters)?;
    let spans = split_delimiter(spans, "`", Span::Code, strict_delimiters)?;
    let spans = split_embeds(spans, Embed::Image)?;
    split_embeds(spans, Embed::Link)
}

/// One delimiter pass: odd segments between occurrences of `delimiter`
/// become `wrap(segment)`, even ones stay plain, empty ones are dropped.
pub fn split_delimiter(
    spans: Vec<Span>,
    delimiter: &'static str,
    wrap: fn(String) -> Span,
    strict: bool,
) -> Result<Vec<Span>> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let Span::Plain(text) = span else {
            out.push(span);
            continue;
        };

        if strict && text.matches(delimiter).count() % 2 == 1 {
            return Err(Error::UnbalancedDelimiter { delimiter, text });
        }

        for (index, segment) in text.split(delimiter).enumerate() {
            if segment.is_empty() {
                continue;
            }
            if index % 2 == 0 {
                out.push(Span::Plain(segment.to_string()));
            } else {
                out.push(wrap(segment.to_string()));
            }
        }
    }

    Ok(out)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Embed {
    Image,
    Link,
}

impl Embed {
    fn name(self) -> &'static str {
        match self {
            Embed::Image => "image",
            Embed::Link => "link",
        }
    }

    /// Bracketed text, `![alt]` or `[text]`.
    fn opener(self) -> &'static Regex {
        static IMAGE: OnceLock<Regex> = OnceLock::new();
        static LINK: OnceLock<Regex> = OnceLock::new();
        match self {
            Embed::Image => IMAGE
                .get_or_init(|| Regex::new(r"!\[[^\[\]]*\]").expect("Invalid image opener regex")),
            Embed::Link => LINK
                .get_or_init(|| Regex::new(r"\[[^\[\]]*\]").expect("Invalid link opener regex")),
        }
    }

    /// Full syntax anchored at an opener: bracketed text then `(url)`.
    fn pattern(self) -> &'static Regex {
        static IMAGE: OnceLock<Regex> = OnceLock::new();
        static LINK: OnceLock<Regex> = OnceLock::new();
        match self {
            Embed::Image => IMAGE.get_or_init(|| {
                Regex::new(r"^!\[([^\[\]]*)\]\(([^()]*)\)").expect("Invalid image regex")
            }),
            Embed::Link => LINK.get_or_init(|| {
                Regex::new(r"^\[([^\[\]]*)\]\(([^()]*)\)").expect("Invalid link regex")
            }),
        }
    }

    fn span(self, content: String, target: String) -> Span {
        match self {
            Embed::Image => Span::Image { content, target },
            Embed::Link => Span::Link { content, target },
        }
    }
}

fn split_embeds(spans: Vec<Span>, embed: Embed) -> Result<Vec<Span>> {
    let mut out = Vec::with_capacity(spans.len());

    for span in spans {
        let Span::Plain(text) = span else {
            out.push(span);
            continue;
        };

        let mut rest = 0;
        let mut cursor = 0;
        while let Some(opener) = embed.opener().find_at(&text, cursor) {
            let start = opener.start();

            // `![..]` belongs to the image pass
            if embed == Embed::Link && text[..start].ends_with('!') {
                cursor = start + 1;
                continue;
            }

            let Some(caps) = embed.pattern().captures(&text[start..]) else {
                return Err(Error::MalformedInline {
                    kind: embed.name(),
                    snippet: text[start..].chars().take(40).collect(),
                });
            };

            if start > rest {
                out.push(Span::Plain(text[rest..start].to_string()));
            }
            out.push(embed.span(caps[1].to_string(), caps[2].to_string()));

            rest = start + caps[0].len();
            cursor = rest;
        }

        if rest < text.len() {
            out.push(Span::Plain(text[rest..].to_string()));
        }
    }

    Ok(out)
}
