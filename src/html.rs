use crate::error::{Error, Result};

/// A render-time HTML tree. Children are owned by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HtmlNode {
    Leaf(LeafNode),
    Parent(ParentNode),
}

/// Element with a text value and no children. Without a tag, the value is
/// emitted as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeafNode {
    tag: Option<String>,
    value: String,
    attributes: Vec<(String, String)>,
}

/// Element wrapping an ordered list of child nodes.
///
/// Fields are public so partially built nodes can exist; `to_html` checks
/// that both `tag` and `children` are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParentNode {
    pub tag: Option<String>,
    pub children: Option<Vec<HtmlNode>>,
    pub attributes: Vec<(String, String)>,
}

impl LeafNode {
    /// Build a leaf, failing when `value` is absent.
    pub fn try_new(tag: Option<&str>, value: Option<String>) -> Result<Self> {
        let value = value.ok_or_else(|| {
            Error::StructuralInvariant(format!(
                "leaf node <{}> requires a value",
                tag.unwrap_or("raw")
            ))
        })?;
        Ok(Self {
            tag: tag.map(str::to_string),
            value,
            attributes: Vec::new(),
        })
    }

    pub fn new(tag: &str, value: impl Into<String>) -> Self {
        Self {
            tag: Some(tag.to_string()),
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    /// Untagged leaf, rendered as its bare value.
    pub fn raw(value: impl Into<String>) -> Self {
        Self {
            tag: None,
            value: value.into(),
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.push((name.to_string(), value.into()));
        self
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    fn write_html(&self, out: &mut String) {
        match &self.tag {
            None => out.push_str(&self.value),
            Some(tag) => {
                open_tag(tag, &self.attributes, out);
                out.push_str(&self.value);
                close_tag(tag, out);
            }
        }
    }
}

impl ParentNode {
    pub fn new(tag: &str, children: Vec<HtmlNode>) -> Self {
        Self {
            tag: Some(tag.to_string()),
            children: Some(children),
            attributes: Vec::new(),
        }
    }

    /// Children of a well-formed node; empty when none were set.
    pub fn children(&self) -> &[HtmlNode] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        let tag = self.tag.as_deref().ok_or_else(|| {
            Error::StructuralInvariant("parent node requires a tag".to_string())
        })?;
        let children = self.children.as_ref().ok_or_else(|| {
            Error::StructuralInvariant(format!("parent node <{tag}> requires children"))
        })?;

        open_tag(tag, &self.attributes, out);
        for child in children {
            child.write_html(out)?;
        }
        close_tag(tag, out);
        Ok(())
    }
}

impl HtmlNode {
    pub fn to_html(&self) -> Result<String> {
        let mut out = String::new();
        self.write_html(&mut out)?;
        Ok(out)
    }

    fn write_html(&self, out: &mut String) -> Result<()> {
        match self {
            HtmlNode::Leaf(leaf) => {
                leaf.write_html(out);
                Ok(())
            }
            HtmlNode::Parent(parent) => parent.write_html(out),
        }
    }
}

impl From<LeafNode> for HtmlNode {
    fn from(leaf: LeafNode) -> Self {
        HtmlNode::Leaf(leaf)
    }
}

impl From<ParentNode> for HtmlNode {
    fn from(parent: ParentNode) -> Self {
        HtmlNode::Parent(parent)
    }
}

fn open_tag(tag: &str, attributes: &[(String, String)], out: &mut String) {
    out.push('<');
    out.push_str(tag);
    for (name, value) in attributes {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&html_escape::encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');
}

fn close_tag(tag: &str, out: &mut String) {
    out.push_str("</");
    out.push_str(tag);
    out.push('>');
}
