// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`.
//!
//! # Available Adapters
//!
//! - [`memory_dom`]: In-memory page tree (implements [`Document`])
//! - [`markup`]: Builds a [`MemoryDocument`] from server-rendered HTML via `scraper`
//!
//! [`Document`]: crate::application::port::Document

pub mod markup;
pub mod memory_dom;

// Re-export main types for convenience
pub use markup::{load_page, parse_page};
pub use memory_dom::MemoryDocument;
