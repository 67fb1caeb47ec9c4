// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//!
//! # Available Ports
//!
//! - [`document`]: The host page the viewer reads slides from and renders into
//!
//! # Design Notes
//!
//! - Traits use plain ids and strings only (no browser or toolkit handles)
//! - All methods are synchronous; time is modelled by the viewer's transitions
//!
//! # Example
//!
//! ```ignore
//! use lightbox_gallery::application::port::{Document, ElementId};
//!
//! fn caption_of(doc: &impl Document, figure: ElementId) -> Option<String> {
//!     doc.find_descendant(figure, "figcaption")
//!         .map(|caption| doc.text_content(caption))
//! }
//! ```

pub mod document;

// Re-export main types for convenience
pub use document::{Document, ElementId};
