//! Minimal XML tree built from `quick-xml` events.
//!
//! Element names are stored by local name only, so `w:p`, `a:p` and `p`
//! compare equal. Whitespace-only character data is dropped while building
//! the tree unless it sits in a `t` text element or under
//! `xml:space="preserve"`; CDATA sections are always kept. Entity references
//! that cannot be resolved stay in the text as written.

use crate::error::XmlError;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// A node in the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum XmlNode {
    /// Element with its children in document order
    Element(XmlElement),
    /// Character data (entities already resolved) or CDATA
    Text(String),
}

/// An element, identified by its namespace-stripped name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Local name; empty for the synthetic document root
    pub name: String,
    /// Child nodes in document order
    pub children: Vec<XmlNode>,
}

impl XmlElement {
    fn from_start(start: &BytesStart<'_>) -> Self {
        Self {
            name: String::from_utf8_lossy(start.local_name().as_ref()).into_owned(),
            children: Vec::new(),
        }
    }

    /// `Some(true)` for `xml:space="preserve"`, `Some(false)` for
    /// `xml:space="default"`, `None` when the attribute is absent.
    fn space_preserve(start: &BytesStart<'_>) -> Option<bool> {
        start
            .attributes()
            .flatten()
            .find(|attr| attr.key.as_ref() == b"xml:space")
            .map(|attr| attr.value.as_ref() == b"preserve")
    }

    /// First child element with the given local name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&XmlElement> {
        self.elements().find(|el| el.name == name)
    }

    /// Child elements, skipping text.
    pub fn elements(&self) -> impl Iterator<Item = &XmlElement> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }
}

/// Parse `xml` into a tree rooted at a synthetic, unnamed element whose
/// children are the document's top-level nodes.
pub fn parse_document(xml: &str) -> Result<XmlElement, XmlError> {
    let xml = xml.strip_prefix('\u{feff}').unwrap_or(xml);
    let mut reader = Reader::from_str(xml);
    let mut stack = vec![XmlElement::default()];
    // xml:space is inherited, so track it alongside the open elements
    let mut preserve = vec![false];

    loop {
        match reader.read_event()? {
            Event::Start(start) => {
                let inherited = preserve.last().copied().unwrap_or(false);
                preserve.push(XmlElement::space_preserve(&start).unwrap_or(inherited));
                stack.push(XmlElement::from_start(&start));
            }
            Event::Empty(start) => {
                append(&mut stack, XmlNode::Element(XmlElement::from_start(&start)));
            }
            Event::End(end) => {
                if stack.len() < 2 {
                    return Err(XmlError::UnexpectedEnd(
                        String::from_utf8_lossy(end.local_name().as_ref()).into_owned(),
                    ));
                }
                preserve.pop();
                if let Some(element) = stack.pop() {
                    append(&mut stack, XmlNode::Element(element));
                }
            }
            Event::Text(text) => {
                let text = unescape_lenient(&String::from_utf8_lossy(&text));
                let keep_whitespace = preserve.last().copied().unwrap_or(false)
                    || stack.last().is_some_and(|el| el.name == "t");
                if keep_whitespace || !is_xml_whitespace(&text) {
                    append(&mut stack, XmlNode::Text(text));
                }
            }
            Event::CData(data) => {
                let data = data.into_inner();
                append(
                    &mut stack,
                    XmlNode::Text(String::from_utf8_lossy(&data).into_owned()),
                );
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if stack.len() > 1 {
        let open = stack.pop().map(|el| el.name).unwrap_or_default();
        return Err(XmlError::Unclosed(open));
    }

    Ok(stack.pop().unwrap_or_default())
}

fn append(stack: &mut [XmlElement], node: XmlNode) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

/// Resolve predefined and character references one at a time. A reference
/// that does not resolve (HTML names, DTD-declared entities, a stray `&`) is
/// kept verbatim.
fn unescape_lenient(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;

    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let end = rest[1..]
            .find(|c: char| c == ';' || c == '&' || c.is_whitespace())
            .map(|pos| pos + 1);
        let Some(semi) = end.filter(|&pos| rest.as_bytes()[pos] == b';') else {
            out.push('&');
            rest = &rest[1..];
            continue;
        };
        let reference = &rest[..=semi];
        match unescape(reference) {
            Ok(resolved) => out.push_str(&resolved),
            Err(_) => out.push_str(reference),
        }
        rest = &rest[semi + 1..];
    }

    out.push_str(rest);
    out
}

fn is_xml_whitespace(text: &str) -> bool {
    text.bytes()
        .all(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
}

/// True when `out` is empty or already ends in a space, newline or tab.
pub(crate) fn at_whitespace_boundary(out: &str) -> bool {
    matches!(out.as_bytes().last(), None | Some(b' ' | b'\n' | b'\t'))
}
