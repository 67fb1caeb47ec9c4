// SPDX-License-Identifier: MPL-2.0
//! Keeps keyboard focus inside the overlay.
//!
//! While the overlay is open every tabbable element of the page, except those
//! inside the overlay or the fixed host toolbar, gets `tabindex="-1"`. The
//! prior value (or its absence) is recorded so [`FocusTrap::restore`] can put
//! the page back exactly as it was.

use crate::application::port::{Document, ElementId};
use indexmap::IndexMap;

/// Form controls that are tabbable unless disabled.
const FORM_CONTROLS: &[&str] = &["button", "input", "select", "textarea", "summary"];

/// Whether `element` is currently reachable with the Tab key.
pub fn is_focusable<D: Document + ?Sized>(doc: &D, element: ElementId) -> bool {
    if doc.attribute(element, "aria-hidden") == Some("true")
        || doc.attribute(element, "disabled").is_some()
    {
        return false;
    }

    let tabindex = doc.attribute(element, "tabindex");
    if tabindex.is_some_and(|value| value.trim().parse::<i32>().is_ok_and(|index| index < 0)) {
        return false;
    }

    match doc.tag_name(element) {
        Some("a") => doc.attribute(element, "href").is_some() || tabindex.is_some(),
        Some(tag) if FORM_CONTROLS.contains(&tag) => true,
        _ => tabindex.is_some(),
    }
}

/// Session-scoped record of tabindex values taken away from the page.
///
/// Entries keep insertion order so restoration walks the page in the same
/// order it was trapped.
#[derive(Debug, Clone, Default)]
pub struct FocusTrap {
    saved: IndexMap<ElementId, Option<String>>,
}

impl FocusTrap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes every focusable element outside `excluded` subtrees from the
    /// tab order. Elements already recorded are left alone, so repeated calls
    /// never overwrite the original values.
    ///
    /// Returns the number of elements newly trapped.
    pub fn trap<D: Document + ?Sized>(&mut self, doc: &mut D, excluded: &[ElementId]) -> usize {
        let root = doc.root();
        let candidates: Vec<ElementId> = std::iter::once(root)
            .chain(doc.descendants(root))
            .filter(|&element| {
                !self.saved.contains_key(&element)
                    && is_focusable(&*doc, element)
                    && !excluded.iter().any(|&area| doc.is_within(element, area))
            })
            .collect();

        for &element in &candidates {
            let original = doc.attribute(element, "tabindex").map(str::to_string);
            self.saved.insert(element, original);
            doc.set_attribute(element, "tabindex", "-1");
        }

        tracing::trace!(trapped = candidates.len(), total = self.saved.len(), "focus trapped");
        candidates.len()
    }

    /// Puts back every recorded tabindex and forgets them all.
    ///
    /// Elements no longer in the document are skipped. Returns the number of
    /// elements actually restored.
    pub fn restore<D: Document + ?Sized>(&mut self, doc: &mut D) -> usize {
        let mut restored = 0;
        for (element, original) in self.saved.drain(..) {
            if !doc.is_connected(element) {
                continue;
            }
            match original {
                Some(value) => doc.set_attribute(element, "tabindex", &value),
                None => doc.remove_attribute(element, "tabindex"),
            }
            restored += 1;
        }
        tracing::trace!(restored, "focus restored");
        restored
    }

    /// Number of elements currently held out of the tab order.
    #[must_use]
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    /// Trapped elements in the order they were taken out of the tab order.
    pub fn elements(&self) -> impl Iterator<Item = ElementId> + '_ {
        self.saved.keys().copied()
    }

    #[must_use]
    pub fn is_trapped(&self, element: ElementId) -> bool {
        self.saved.contains_key(&element)
    }
}
