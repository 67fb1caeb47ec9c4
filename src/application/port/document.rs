// SPDX-License-Identifier: MPL-2.0
//! Host document port definition.
//!
//! This module defines the [`Document`] trait through which the viewer reads
//! the gallery markup and manipulates its overlay. It mirrors the small slice
//! of the DOM the viewer needs: tree traversal, attributes, text, inline
//! style, focus and one geometric query.

use std::fmt;

// =============================================================================
// ElementId
// =============================================================================

/// Opaque handle to an element of a [`Document`].
///
/// Handles stay valid after the element is removed from the tree; use
/// [`Document::is_connected`] to check whether it is still part of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

impl ElementId {
    /// Creates a handle from an adapter-specific index.
    #[must_use]
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Returns the adapter-specific index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// =============================================================================
// Document Trait
// =============================================================================

/// Port for the page hosting one or more galleries.
///
/// Query methods never fail: unknown or detached handles yield `None`,
/// empty collections or `false`. Mutating methods on detached or unknown
/// handles are silently ignored, except where noted.
pub trait Document {
    /// The document element (`<html>` for parsed pages).
    fn root(&self) -> ElementId;

    /// The `<body>` element, if the document has one.
    fn body(&self) -> Option<ElementId>;

    /// First connected element whose `id` attribute equals `id`.
    fn element_by_id(&self, id: &str) -> Option<ElementId>;

    /// All element descendants of `element` in document order, excluding itself.
    fn descendants(&self, element: ElementId) -> Vec<ElementId>;

    /// Parent element, if any.
    fn parent(&self, element: ElementId) -> Option<ElementId>;

    /// Closest preceding sibling that is an element.
    fn previous_element_sibling(&self, element: ElementId) -> Option<ElementId>;

    /// Closest following sibling that is an element.
    fn next_element_sibling(&self, element: ElementId) -> Option<ElementId>;

    /// Whether the element is attached to the document tree.
    fn is_connected(&self, element: ElementId) -> bool;

    /// Lowercase tag name.
    fn tag_name(&self, element: ElementId) -> Option<&str>;

    fn attribute(&self, element: ElementId, name: &str) -> Option<&str>;

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str);

    fn remove_attribute(&mut self, element: ElementId, name: &str);

    /// Concatenated text of the element and all of its descendants.
    fn text_content(&self, element: ElementId) -> String;

    /// Replaces every child of the element with a single text node.
    fn set_text_content(&mut self, element: ElementId, text: &str);

    /// Creates a detached element. Works on any document.
    fn create_element(&mut self, tag: &str) -> ElementId;

    /// Appends `child` as the last child of `parent`, detaching it first.
    fn append_child(&mut self, parent: ElementId, child: ElementId);

    /// Detaches the element and its subtree from the document.
    fn remove(&mut self, element: ElementId);

    /// Sets an inline style property. An empty value removes the property.
    fn set_style(&mut self, element: ElementId, property: &str, value: &str);

    /// Reads an inline style property.
    fn style(&self, element: ElementId, property: &str) -> Option<String>;

    /// Moves keyboard focus to a connected element.
    fn focus(&mut self, element: ElementId);

    /// Element holding keyboard focus, if any.
    fn active_element(&self) -> Option<ElementId>;

    /// Bottom edge of the element's box in viewport pixels.
    fn bounding_bottom(&self, element: ElementId) -> Option<f32>;

    // =========================================================================
    // Provided helpers
    // =========================================================================

    /// Whether the element's `class` attribute lists `class`.
    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.attribute(element, "class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Connected elements carrying `class`, in document order.
    fn elements_with_class(&self, class: &str) -> Vec<ElementId> {
        let root = self.root();
        std::iter::once(root)
            .chain(self.descendants(root))
            .filter(|&element| self.has_class(element, class))
            .collect()
    }

    /// Whether `element` is `ancestor` or one of its descendants.
    fn is_within(&self, element: ElementId, ancestor: ElementId) -> bool {
        let mut current = Some(element);
        while let Some(node) = current {
            if node == ancestor {
                return true;
            }
            current = self.parent(node);
        }
        false
    }

    /// Closest inclusive ancestor whose tag is one of `tags`.
    fn closest_with_tag(&self, element: ElementId, tags: &[&str]) -> Option<ElementId> {
        let mut current = Some(element);
        while let Some(node) = current {
            if self.tag_name(node).is_some_and(|tag| tags.contains(&tag)) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// First descendant, in document order, with the given tag.
    fn find_descendant(&self, element: ElementId, tag: &str) -> Option<ElementId> {
        self.descendants(element)
            .into_iter()
            .find(|&node| self.tag_name(node) == Some(tag))
    }
}
