// SPDX-License-Identifier: MPL-2.0
//! Arena-backed in-memory document.
//!
//! [`MemoryDocument`] implements the [`Document`] port without a browser. It
//! keeps element and text children in order, stores inline style in the
//! `style` attribute like the DOM does, and has no layout engine: geometry is
//! whatever the caller assigns with [`MemoryDocument::set_layout_bottom`].

use crate::application::port::{Document, ElementId};

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

#[derive(Debug, Clone)]
enum Child {
    Element(ElementId),
    Text(String),
}

/// Work item for the stack-based tree walks.
enum Emit<'a> {
    Element(ElementId),
    Text(&'a str),
    Close(&'a str),
}

impl<'a> From<&'a Child> for Emit<'a> {
    fn from(child: &'a Child) -> Self {
        match child {
            Child::Element(id) => Emit::Element(*id),
            Child::Text(text) => Emit::Text(text),
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attributes: Vec<(String, String)>,
    children: Vec<Child>,
    parent: Option<ElementId>,
    layout_bottom: Option<f32>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            attributes: Vec::new(),
            children: Vec::new(),
            parent: None,
            layout_bottom: None,
        }
    }

    fn element_children(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.children.iter().filter_map(|child| match child {
            Child::Element(id) => Some(*id),
            Child::Text(_) => None,
        })
    }
}

/// In-memory page tree implementing [`Document`].
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    root: ElementId,
    focused: Option<ElementId>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// Creates `<html><head></head><body></body></html>`.
    #[must_use]
    pub fn new() -> Self {
        let mut doc = Self::with_root("html");
        let root = doc.root;
        doc.append_element(root, "head", &[]);
        doc.append_element(root, "body", &[]);
        doc
    }

    /// Creates a document whose only element is `tag`.
    #[must_use]
    pub fn with_root(tag: &str) -> Self {
        Self {
            nodes: vec![Node::new(tag)],
            root: ElementId::new(0),
            focused: None,
        }
    }

    /// Creates an element with attributes and appends it to `parent`.
    pub fn append_element(
        &mut self,
        parent: ElementId,
        tag: &str,
        attributes: &[(&str, &str)],
    ) -> ElementId {
        let element = self.create_element(tag);
        for (name, value) in attributes {
            self.set_attribute(element, name, value);
        }
        self.append_child(parent, element);
        element
    }

    /// Appends a text node to `parent`.
    pub fn append_text(&mut self, parent: ElementId, text: &str) {
        if let Some(node) = self.node_mut(parent) {
            node.children.push(Child::Text(text.to_string()));
        }
    }

    /// Assigns the viewport bottom edge reported by [`Document::bounding_bottom`].
    pub fn set_layout_bottom(&mut self, element: ElementId, bottom: Option<f32>) {
        if let Some(node) = self.node_mut(element) {
            node.layout_bottom = bottom;
        }
    }

    /// Number of elements ever created, attached or not.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.nodes.len()
    }

    /// Serializes the element and its subtree as HTML.
    #[must_use]
    pub fn outer_html(&self, element: ElementId) -> String {
        let mut out = String::new();
        self.write_html(element, &mut out);
        out
    }

    fn write_html(&self, element: ElementId, out: &mut String) {
        let mut pending = vec![Emit::Element(element)];
        while let Some(item) = pending.pop() {
            let node = match item {
                Emit::Text(text) => {
                    out.push_str(&escape(text, false));
                    continue;
                }
                Emit::Close(tag) => {
                    out.push_str("</");
                    out.push_str(tag);
                    out.push('>');
                    continue;
                }
                Emit::Element(id) => match self.node(id) {
                    Some(node) => node,
                    None => continue,
                },
            };
            out.push('<');
            out.push_str(&node.tag);
            for (name, value) in &node.attributes {
                out.push(' ');
                out.push_str(name);
                out.push_str("=\"");
                out.push_str(&escape(value, true));
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&node.tag.as_str()) {
                continue;
            }
            pending.push(Emit::Close(&node.tag));
            pending.extend(node.children.iter().rev().map(Emit::from));
        }
    }

    fn node(&self, element: ElementId) -> Option<&Node> {
        self.nodes.get(element.index())
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(element.index())
    }

    fn detach(&mut self, element: ElementId) {
        let Some(parent) = self.node(element).and_then(|node| node.parent) else {
            return;
        };
        if let Some(parent_node) = self.node_mut(parent) {
            parent_node
                .children
                .retain(|child| !matches!(child, Child::Element(id) if *id == element));
        }
        if let Some(node) = self.node_mut(element) {
            node.parent = None;
        }
        if self.focused.is_some_and(|focused| self.is_within(focused, element)) {
            self.focused = None;
        }
    }

    fn collect_descendants(&self, element: ElementId, out: &mut Vec<ElementId>) {
        let mut pending: Vec<ElementId> = match self.node(element) {
            Some(node) => node.element_children().collect(),
            None => return,
        };
        pending.reverse();
        while let Some(current) = pending.pop() {
            out.push(current);
            if let Some(node) = self.node(current) {
                let start = pending.len();
                pending.extend(node.element_children());
                pending[start..].reverse();
            }
        }
    }

    fn collect_text(&self, element: ElementId, out: &mut String) {
        let mut pending = vec![Emit::Element(element)];
        while let Some(item) = pending.pop() {
            match item {
                Emit::Text(text) => out.push_str(text),
                Emit::Element(id) => {
                    if let Some(node) = self.node(id) {
                        pending.extend(node.children.iter().rev().map(Emit::from));
                    }
                }
                Emit::Close(_) => {}
            }
        }
    }

    fn sibling(&self, element: ElementId, offset: isize) -> Option<ElementId> {
        let parent = self.node(element)?.parent?;
        let siblings: Vec<ElementId> = self.node(parent)?.element_children().collect();
        let position = siblings.iter().position(|&id| id == element)?;
        let target = position.checked_add_signed(offset)?;
        siblings.get(target).copied()
    }
}

fn escape(text: &str, in_attribute: bool) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' if !in_attribute => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            '"' if in_attribute => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

fn parse_declarations(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|declaration| {
            let (property, value) = declaration.split_once(':')?;
            let property = property.trim();
            (!property.is_empty()).then(|| (property.to_string(), value.trim().to_string()))
        })
        .collect()
}

impl Document for MemoryDocument {
    fn root(&self) -> ElementId {
        self.root
    }

    fn body(&self) -> Option<ElementId> {
        self.node(self.root)?
            .element_children()
            .find(|&child| self.tag_name(child) == Some("body"))
    }

    fn element_by_id(&self, id: &str) -> Option<ElementId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .find(|&element| self.attribute(element, "id") == Some(id))
    }

    fn descendants(&self, element: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        self.collect_descendants(element, &mut out);
        out
    }

    fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element)?.parent
    }

    fn previous_element_sibling(&self, element: ElementId) -> Option<ElementId> {
        self.sibling(element, -1)
    }

    fn next_element_sibling(&self, element: ElementId) -> Option<ElementId> {
        self.sibling(element, 1)
    }

    fn is_connected(&self, element: ElementId) -> bool {
        self.node(element).is_some() && self.is_within(element, self.root)
    }

    fn tag_name(&self, element: ElementId) -> Option<&str> {
        self.node(element).map(|node| node.tag.as_str())
    }

    fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.node(element)?
            .attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        let Some(node) = self.node_mut(element) else {
            return;
        };
        match node.attributes.iter_mut().find(|(key, _)| key == name) {
            Some((_, existing)) => *existing = value.to_string(),
            None => node.attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attribute(&mut self, element: ElementId, name: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attributes.retain(|(key, _)| key != name);
        }
    }

    fn text_content(&self, element: ElementId) -> String {
        let mut out = String::new();
        self.collect_text(element, &mut out);
        out
    }

    fn set_text_content(&mut self, element: ElementId, text: &str) {
        let children: Vec<ElementId> = match self.node(element) {
            Some(node) => node.element_children().collect(),
            None => return,
        };
        for child in children {
            self.detach(child);
        }
        if let Some(node) = self.node_mut(element) {
            node.children.clear();
            if !text.is_empty() {
                node.children.push(Child::Text(text.to_string()));
            }
        }
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Node::new(tag));
        ElementId::new(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        let Some(child_node) = self.node(child) else {
            return;
        };
        // Only an element with children can be a strict ancestor of `parent`.
        let may_contain = child_node.element_children().next().is_some();
        if self.node(parent).is_none()
            || parent == child
            || (may_contain && self.is_within(parent, child))
        {
            return;
        }
        self.detach(child);
        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(Child::Element(child));
        }
    }

    fn remove(&mut self, element: ElementId) {
        if element != self.root {
            self.detach(element);
        }
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if self.node(element).is_none() {
            return;
        }
        let mut declarations = parse_declarations(self.attribute(element, "style").unwrap_or(""));
        declarations.retain(|(name, _)| name != property);
        if !value.is_empty() {
            declarations.push((property.to_string(), value.to_string()));
        }
        if declarations.is_empty() {
            self.remove_attribute(element, "style");
        } else {
            let style = declarations
                .iter()
                .map(|(name, value)| format!("{name}: {value};"))
                .collect::<Vec<_>>()
                .join(" ");
            self.set_attribute(element, "style", &style);
        }
    }

    fn style(&self, element: ElementId, property: &str) -> Option<String> {
        parse_declarations(self.attribute(element, "style")?)
            .into_iter()
            .find(|(name, _)| name == property)
            .map(|(_, value)| value)
    }

    fn focus(&mut self, element: ElementId) {
        if self.is_connected(element) {
            self.focused = Some(element);
        }
    }

    fn active_element(&self) -> Option<ElementId> {
        self.focused
            .filter(|&element| self.is_connected(element))
            .or_else(|| self.body())
    }

    fn bounding_bottom(&self, element: ElementId) -> Option<f32> {
        self.node(element)?.layout_bottom
    }
}
