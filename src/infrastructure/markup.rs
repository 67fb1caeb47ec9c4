// SPDX-License-Identifier: MPL-2.0
//! Loads server-rendered gallery markup into a [`MemoryDocument`].
//!
//! Parsing goes through `scraper` (html5ever), so fragments get the usual
//! `<html><head></head><body>` wrapper and malformed markup is repaired the
//! way a browser would. Comments, doctypes and processing instructions are
//! dropped; element order, attributes and text are preserved verbatim.

use crate::application::port::{Document, ElementId};
use crate::error::{Error, Result};
use crate::infrastructure::memory_dom::MemoryDocument;
use scraper::{ElementRef, Html, Node};
use std::fs;
use std::path::Path;

/// Parses an HTML page or fragment.
#[must_use]
pub fn parse_page(html: &str) -> MemoryDocument {
    let parsed = Html::parse_document(html);
    let root = parsed.root_element();
    let mut doc = MemoryDocument::with_root(root.value().name());
    let target = doc.root();
    copy_attributes(&mut doc, target, root);
    copy_children(&mut doc, target, root);
    doc
}

/// Reads and parses an HTML file.
///
/// # Errors
///
/// Returns [`Error::Markup`] if the file cannot be read.
pub fn load_page(path: &Path) -> Result<MemoryDocument> {
    let html = fs::read_to_string(path)
        .map_err(|err| Error::Markup(format!("{}: {}", path.display(), err)))?;
    let doc = parse_page(&html);
    tracing::debug!(path = %path.display(), elements = doc.element_count(), "page loaded");
    Ok(doc)
}

fn copy_attributes(doc: &mut MemoryDocument, target: ElementId, source: ElementRef<'_>) {
    for (name, value) in source.value().attrs() {
        doc.set_attribute(target, name, value);
    }
}

/// Mirrors the subtree under `source` into `target`, one element at a time.
fn copy_children(doc: &mut MemoryDocument, target: ElementId, source: ElementRef<'_>) {
    let mut pending = vec![(target, source)];
    while let Some((target, source)) = pending.pop() {
        let mut nested = Vec::new();
        for child in source.children() {
            match child.value() {
                Node::Element(element) => {
                    let Some(child_ref) = ElementRef::wrap(child) else {
                        continue;
                    };
                    let created = doc.append_element(target, element.name(), &[]);
                    copy_attributes(doc, created, child_ref);
                    nested.push((created, child_ref));
                }
                Node::Text(text) => doc.append_text(target, text),
                _ => {}
            }
        }
        pending.extend(nested.into_iter().rev());
    }
}
