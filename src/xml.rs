//! Output XML tree and writer
//!
//! Generators build [`Element`] fragments; the engine attaches them to a
//! [`Document`]. Serialization is a small hand-rolled writer with attribute
//! and text escaping; the emitted trees are plain Jenkins `config.xml`
//! structures with no namespaces or processing instructions.

use std::fmt::Write;

/// A child of an element
#[derive(Debug, Clone, PartialEq)]
pub enum XmlNode {
    Element(Element),
    Text(String),
}

/// One XML element: name, attributes, ordered children
#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<XmlNode>,
}

impl Element {
    pub fn new(name: &str) -> Self {
        Element {
            name: name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set an attribute (builder style)
    pub fn with_attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    /// Append a text child (builder style)
    pub fn with_text(mut self, text: &str) -> Self {
        self.children.push(XmlNode::Text(text.to_string()));
        self
    }

    /// Append an element child (builder style)
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(XmlNode::Element(child));
        self
    }

    /// Shorthand for a `<name>text</name>` child
    pub fn with_text_child(self, name: &str, text: &str) -> Self {
        self.with_child(Element::new(name).with_text(text))
    }

    pub fn push_child(&mut self, child: Element) {
        self.children.push(XmlNode::Element(child));
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Child elements in order
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            XmlNode::Element(el) => Some(el),
            XmlNode::Text(_) => None,
        })
    }

    /// First child element with the given name
    pub fn find_child(&self, name: &str) -> Option<&Element> {
        self.child_elements().find(|el| el.name == name)
    }

    /// Find or create a direct child element with the given name
    pub fn ensure_child(&mut self, name: &str) -> &mut Element {
        let pos = self.children.iter().position(|node| {
            matches!(node, XmlNode::Element(el) if el.name == name)
        });
        let pos = match pos {
            Some(pos) => pos,
            None => {
                self.children.push(XmlNode::Element(Element::new(name)));
                self.children.len() - 1
            }
        };
        match &mut self.children[pos] {
            XmlNode::Element(el) => el,
            XmlNode::Text(_) => unreachable!("position matched an element"),
        }
    }

    /// Concatenated text content of this element and its descendants
    pub fn text(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        for child in &self.children {
            match child {
                XmlNode::Text(t) => out.push_str(t),
                XmlNode::Element(el) => el.collect_text(out),
            }
        }
    }

    fn has_element_children(&self) -> bool {
        self.children
            .iter()
            .any(|c| matches!(c, XmlNode::Element(_)))
    }

    fn write(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = write!(out, "{}<{}", indent, self.name);
        for (name, value) in &self.attributes {
            let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
        }

        if self.children.is_empty() {
            out.push_str("/>\n");
            return;
        }

        if !self.has_element_children() {
            // Text-only content stays on one line: <spec>H/10 * * * *</spec>
            out.push('>');
            for child in &self.children {
                if let XmlNode::Text(t) = child {
                    out.push_str(&escape_text(t));
                }
            }
            let _ = writeln!(out, "</{}>", self.name);
            return;
        }

        out.push_str(">\n");
        for child in &self.children {
            match child {
                XmlNode::Element(el) => el.write(out, depth + 1),
                XmlNode::Text(t) => {
                    let _ = writeln!(out, "{}  {}", indent, escape_text(t));
                }
            }
        }
        let _ = writeln!(out, "{}</{}>", indent, self.name);
    }
}

/// The output document one compilation call builds into
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Create a document with an empty root element
    pub fn new(root_name: &str) -> Self {
        Document {
            root: Element::new(root_name),
        }
    }

    /// Create a document from a prepared root element
    pub fn with_root(root: Element) -> Self {
        Document { root }
    }

    pub fn root(&self) -> &Element {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Element {
        &mut self.root
    }

    /// Serialize with XML declaration and two-space indentation
    pub fn to_xml(&self) -> String {
        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        self.root.write(&mut out, 0);
        out
    }
}

/// Escape special characters in attribute values
fn escape_attr(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            _ => result.push(c),
        }
    }
    result
}

/// Escape special characters in text content
fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            _ => result.push(c),
        }
    }
    result
}
