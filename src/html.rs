//! Write-only HTML node model.
//!
//! The report is built as a tree of [`HtmlNode`]s (elements and text runs)
//! and serialized once, depth-first, straight into the output stream. There
//! is no parser: the tag vocabulary is the fixed set the report emits.
//!
//! Emptiness is lazy and recursive. A node marked skip-empty vanishes from
//! the output when it has nothing to say, and an element marked skip-empty
//! vanishes when *all* of its children do. Nodes without the flag always
//! render, which is how structural placeholders (empty layout divs) survive.

use std::io;
use std::io::Write as _;

/// The fixed set of tags the report vocabulary uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    A,
    Article,
    Body,
    Br,
    Code,
    Details,
    Div,
    H1,
    H2,
    H3,
    H4,
    Head,
    Hr,
    Html,
    Img,
    Input,
    Label,
    Link,
    Meta,
    Pre,
    Script,
    Section,
    Span,
    Style,
    Summary,
    Table,
    Tbody,
    Td,
    Tfoot,
    Th,
    Thead,
    Title,
    Tr,
}

impl Tag {
    /// Lowercase tag name as written to the output.
    pub fn name(self) -> &'static str {
        match self {
            Tag::A => "a",
            Tag::Article => "article",
            Tag::Body => "body",
            Tag::Br => "br",
            Tag::Code => "code",
            Tag::Details => "details",
            Tag::Div => "div",
            Tag::H1 => "h1",
            Tag::H2 => "h2",
            Tag::H3 => "h3",
            Tag::H4 => "h4",
            Tag::Head => "head",
            Tag::Hr => "hr",
            Tag::Html => "html",
            Tag::Img => "img",
            Tag::Input => "input",
            Tag::Label => "label",
            Tag::Link => "link",
            Tag::Meta => "meta",
            Tag::Pre => "pre",
            Tag::Script => "script",
            Tag::Section => "section",
            Tag::Span => "span",
            Tag::Style => "style",
            Tag::Summary => "summary",
            Tag::Table => "table",
            Tag::Tbody => "tbody",
            Tag::Td => "td",
            Tag::Tfoot => "tfoot",
            Tag::Th => "th",
            Tag::Thead => "thead",
            Tag::Title => "title",
            Tag::Tr => "tr",
        }
    }

    /// Void tags never take children and never get a closing tag pair.
    pub fn is_void(self) -> bool {
        matches!(
            self,
            Tag::Br | Tag::Hr | Tag::Img | Tag::Input | Tag::Link | Tag::Meta
        )
    }

    /// Legacy void tags written as a bare `>` instead of `/>`.
    fn closes_bare(self) -> bool {
        matches!(self, Tag::Br | Tag::Img)
    }
}

/// A node in the markup tree: an element or a text run.
#[derive(Debug, Clone)]
pub enum HtmlNode {
    Element(Element),
    Text(Text),
}

impl HtmlNode {
    /// Whether this node serializes to nothing.
    ///
    /// Computed at write time, never cached: children may report empty only
    /// once fully built, and a skip-empty grandparent must vanish when every
    /// descendant does.
    pub fn is_empty(&self) -> bool {
        match self {
            HtmlNode::Element(el) => el.is_empty(),
            HtmlNode::Text(text) => text.is_empty(),
        }
    }

    /// Serialize this node and its subtree to `out`, depth-first pre-order.
    ///
    /// Empty nodes write zero bytes. No buffering happens here beyond the
    /// underlying stream; the tree itself is the only in-memory form of the
    /// document.
    pub fn write(&self, out: &mut dyn io::Write) -> io::Result<()> {
        match self {
            HtmlNode::Element(el) => el.write(out),
            HtmlNode::Text(text) => text.write(out),
        }
    }

    /// Serialize into an owned string. Handy for inline fragments that end
    /// up embedded in other text, such as decorated step names.
    pub fn to_html_string(&self) -> String {
        let mut buf = Vec::new();
        // Vec<u8> writes cannot fail.
        let _ = self.write(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl From<Element> for HtmlNode {
    fn from(el: Element) -> Self {
        HtmlNode::Element(el)
    }
}

impl From<Text> for HtmlNode {
    fn from(text: Text) -> Self {
        HtmlNode::Text(text)
    }
}

/// An element: tag, attributes, class tokens, children.
///
/// Construction is a fluent mutating builder. Every call returns the same
/// logical node moved through the chain; there is no copy-on-write.
#[derive(Debug, Clone)]
pub struct Element {
    tag: Tag,
    attributes: Vec<(&'static str, Option<String>)>,
    classes: Vec<String>,
    children: Vec<HtmlNode>,
    skip_empty: bool,
    pad_before: bool,
    pad_after: bool,
}

/// Start an element for `tag`.
pub fn tag(tag: Tag) -> Element {
    Element::new(tag)
}

/// An `<input type="checkbox">` element.
pub fn checkbox() -> Element {
    Element::new(Tag::Input).attr("type", "checkbox")
}

/// An `<input type="radio">` element.
pub fn radio() -> Element {
    Element::new(Tag::Input).attr("type", "radio")
}

/// A node that always serializes to nothing.
pub fn nothing() -> HtmlNode {
    Element::new(Tag::Div).skip_empty().into()
}

/// A raw `<br>` line break injected as unescaped text.
pub fn br() -> HtmlNode {
    Text::new("<br>").into()
}

impl Element {
    pub fn new(tag: Tag) -> Self {
        Element {
            tag,
            attributes: Vec::new(),
            classes: Vec::new(),
            children: Vec::new(),
            skip_empty: false,
            pad_before: false,
            pad_after: false,
        }
    }

    pub fn tag_name(&self) -> Tag {
        self.tag
    }

    /// Append an attribute. Attribute order is preserved in the output.
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, Some(value.into())));
        self
    }

    /// Append a valueless attribute, written as the bare name.
    pub fn bare_attr(mut self, name: &'static str) -> Self {
        self.attributes.push((name, None));
        self
    }

    /// Add one or more space-separated class tokens. Additive; tokens are
    /// rendered space-joined in a single `class` attribute.
    pub fn class(mut self, tokens: impl Into<String>) -> Self {
        self.classes.push(tokens.into());
        self
    }

    /// Append a child node. Void tags cannot nest children.
    pub fn child(mut self, node: impl Into<HtmlNode>) -> Self {
        assert!(
            !self.tag.is_void(),
            "void element <{}> cannot take children",
            self.tag.name()
        );
        self.children.push(node.into());
        self
    }

    /// Append a sequence of child nodes.
    pub fn children<I, N>(mut self, nodes: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<HtmlNode>,
    {
        assert!(
            !self.tag.is_void(),
            "void element <{}> cannot take children",
            self.tag.name()
        );
        self.children.extend(nodes.into_iter().map(Into::into));
        self
    }

    /// Append an escaped text child.
    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(Text::new(content).escaped())
    }

    /// Append an unescaped text child. The caller vouches for the content;
    /// used for embedded styles, scripts and prebuilt fragments.
    pub fn raw_text(self, content: impl Into<String>) -> Self {
        self.child(Text::new(content))
    }

    /// Drop the whole element from the output when every child is empty.
    pub fn skip_empty(mut self) -> Self {
        self.skip_empty = true;
        self
    }

    /// Emit a single space before the element, unless it is skipped.
    pub fn space_before(mut self) -> Self {
        self.pad_before = true;
        self
    }

    /// Emit a single space after the element, unless it is skipped.
    pub fn space_after(mut self) -> Self {
        self.pad_after = true;
        self
    }

    // -- Attribute shorthands -------------------------------------------

    pub fn id(self, id: impl Into<String>) -> Self {
        self.attr("id", id)
    }

    pub fn href(self, href: impl Into<String>) -> Self {
        self.attr("href", href)
    }

    pub fn for_id(self, id: impl Into<String>) -> Self {
        self.attr("for", id)
    }

    pub fn name_attr(self, name: impl Into<String>) -> Self {
        self.attr("name", name)
    }

    pub fn on_click(self, script: impl Into<String>) -> Self {
        self.attr("onclick", script)
    }

    /// Mark a checkbox or radio as initially checked.
    pub fn checked(self, checked: bool) -> Self {
        if checked { self.bare_attr("checked") } else { self }
    }

    /// Whether this element would serialize to nothing.
    pub fn is_empty(&self) -> bool {
        self.skip_empty && self.children.iter().all(HtmlNode::is_empty)
    }

    fn write(&self, out: &mut dyn io::Write) -> io::Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        if self.pad_before {
            out.write_all(b" ")?;
        }

        write!(out, "<{}", self.tag.name())?;
        if !self.classes.is_empty() {
            out.write_all(b" class=\"")?;
            for (i, token) in self.classes.iter().enumerate() {
                if i > 0 {
                    out.write_all(b" ")?;
                }
                write_escaped(out, token)?;
            }
            out.write_all(b"\"")?;
        }
        for (name, value) in &self.attributes {
            write!(out, " {name}")?;
            if let Some(value) = value {
                out.write_all(b"=\"")?;
                write_escaped(out, value)?;
                out.write_all(b"\"")?;
            }
        }

        if self.tag.is_void() {
            out.write_all(if self.tag.closes_bare() { b">" } else { b"/>" })?;
        } else {
            out.write_all(b">")?;
            for child in &self.children {
                child.write(out)?;
            }
            write!(out, "</{}>", self.tag.name())?;
        }

        if self.pad_after {
            out.write_all(b" ")?;
        }
        Ok(())
    }
}

/// A text run. Unescaped and always rendered unless flagged otherwise.
#[derive(Debug, Clone)]
pub struct Text {
    text: String,
    escape: bool,
    skip_empty: bool,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Text {
            text: text.into(),
            escape: false,
            skip_empty: false,
        }
    }

    /// HTML-entity-escape the payload on write.
    pub fn escaped(mut self) -> Self {
        self.escape = true;
        self
    }

    /// Treat an empty payload as an absent node.
    pub fn skip_if_empty(mut self) -> Self {
        self.skip_empty = true;
        self
    }

    /// Trim surrounding whitespace from the payload now.
    pub fn trimmed(mut self) -> Self {
        self.text = self.text.trim().to_string();
        self
    }

    pub fn is_empty(&self) -> bool {
        self.skip_empty && self.text.is_empty()
    }

    fn write(&self, out: &mut dyn io::Write) -> io::Result<()> {
        if self.is_empty() {
            return Ok(());
        }
        if self.escape {
            write_escaped(out, &self.text)
        } else {
            out.write_all(self.text.as_bytes())
        }
    }
}

/// Escape HTML special characters into `out`.
///
/// Applied to attribute values always, and to text runs flagged for
/// escaping. Tag and attribute names are trusted vocabulary and bypass this.
fn write_escaped(out: &mut dyn io::Write, text: &str) -> io::Result<()> {
    let mut rest = text;
    while let Some(pos) = rest.find(['&', '<', '>', '"']) {
        out.write_all(rest[..pos].as_bytes())?;
        out.write_all(match rest.as_bytes()[pos] {
            b'&' => b"&amp;".as_slice(),
            b'<' => b"&lt;",
            b'>' => b"&gt;",
            _ => b"&quot;",
        })?;
        rest = &rest[pos + 1..];
    }
    out.write_all(rest.as_bytes())
}

/// Escape HTML special characters into an owned string.
pub fn escape_html(text: &str) -> String {
    let mut buf = Vec::with_capacity(text.len());
    let _ = write_escaped(&mut buf, text);
    String::from_utf8_lossy(&buf).into_owned()
}
