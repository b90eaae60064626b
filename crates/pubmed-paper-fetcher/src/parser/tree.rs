//! Minimal in-memory XML element tree built from `quick-xml` events.
//!
//! Only element names, text and nesting are kept; attributes, comments,
//! processing instructions and the DOCTYPE are dropped.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{ParseError, ParseResult};

/// Deepest element nesting accepted by [`parse_document`].
///
/// Tree walks recurse once per level, so the limit also bounds stack use.
/// Real `efetch` records stay well under 20 levels.
pub const MAX_DEPTH: usize = 512;

/// Child of an element: a nested element or a run of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// Nested element.
    Element(Element),
    /// Unescaped character data.
    Text(String),
}

/// An XML element and its children in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    name: String,
    children: Vec<Node>,
}

impl Element {
    fn from_start(start: &BytesStart<'_>) -> Self {
        Self {
            name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
            children: Vec::new(),
        }
    }

    /// Direct child elements.
    pub fn elements(&self) -> impl Iterator<Item = &Self> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Whether this element has at least one child element.
    #[must_use]
    pub fn has_elements(&self) -> bool {
        self.elements().next().is_some()
    }

    /// First direct child with the given name.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.elements().find(|el| el.name == name)
    }

    /// First descendant (excluding `self`) with the given name, in document order.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<&Self> {
        for el in self.elements() {
            if el.name == name {
                return Some(el);
            }
            if let Some(found) = el.find(name) {
                return Some(found);
            }
        }
        None
    }

    /// All descendants (excluding `self`) with the given name, in document order.
    #[must_use]
    pub fn find_all(&self, name: &str) -> Vec<&Self> {
        let mut found = Vec::new();
        self.collect_named(name, &mut found);
        found
    }

    fn collect_named<'a>(&'a self, name: &str, found: &mut Vec<&'a Self>) {
        for el in self.elements() {
            if el.name == name {
                found.push(el);
            }
            el.collect_named(name, found);
        }
    }

    /// Concatenated text of this element and all its descendants.
    #[must_use]
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }

    fn push_text(&self, out: &mut String) {
        for node in &self.children {
            match node {
                Node::Text(text) => out.push_str(text),
                Node::Element(el) => el.push_text(out),
            }
        }
    }
}

/// Parse a complete XML document into its root element.
///
/// Fails on syntax errors, mismatched or unclosed tags, a missing root,
/// content after the root element, or nesting deeper than [`MAX_DEPTH`].
pub fn parse_document(xml: &str) -> ParseResult<Element> {
    let mut reader = Reader::from_str(xml);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader.read_event().map_err(|source| ParseError::Syntax {
            position: reader.buffer_position().try_into().unwrap_or(u64::MAX),
            source,
        })?;

        match event {
            Event::Start(start) => {
                check_depth(stack.len() + 1)?;
                stack.push(Element::from_start(&start));
            }
            Event::Empty(start) => {
                check_depth(stack.len() + 1)?;
                attach(&mut stack, &mut root, Element::from_start(&start))?;
            }
            Event::End(_) => {
                let el = stack
                    .pop()
                    .ok_or_else(|| ParseError::Structure("closing tag without opening tag".into()))?;
                attach(&mut stack, &mut root, el)?;
            }
            Event::Text(text) => {
                let text = text.unescape().map_err(|source| ParseError::Syntax {
                    position: reader.buffer_position().try_into().unwrap_or(u64::MAX),
                    source,
                })?;
                push_text(&mut stack, &text)?;
            }
            Event::CData(data) => {
                let bytes = data.into_inner();
                push_text(&mut stack, &String::from_utf8_lossy(&bytes))?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::Structure(format!("unclosed element <{}>", open.name)));
    }
    root.ok_or_else(|| ParseError::Structure("no root element".into()))
}

fn check_depth(depth: usize) -> ParseResult<()> {
    if depth > MAX_DEPTH {
        return Err(ParseError::Structure(format!("elements nested deeper than {MAX_DEPTH} levels")));
    }
    Ok(())
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, el: Element) -> ParseResult<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(Node::Element(el));
        return Ok(());
    }
    if root.is_some() {
        return Err(ParseError::Structure(format!(
            "second root element <{}> after document element",
            el.name
        )));
    }
    *root = Some(el);
    Ok(())
}

fn push_text(stack: &mut [Element], text: &str) -> ParseResult<()> {
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(Node::Text(text.to_string()));
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(ParseError::Structure("text outside the root element".into())),
    }
}
