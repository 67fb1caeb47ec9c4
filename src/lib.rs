// SPDX-License-Identifier: MPL-2.0
//! `lightbox_gallery` is an accessible modal viewer for server-rendered image
//! galleries.
//!
//! Links inside gallery slides open a full-page overlay that shows one image
//! at a time with its caption, previous/next controls and keyboard shortcuts,
//! while the rest of the page is taken out of the tab order. The page itself
//! is reached through the [`application::port::Document`] trait, so the same
//! viewer runs against a browser binding or the in-memory page in
//! [`infrastructure`].

pub mod app;
pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod i18n;
pub mod infrastructure;
pub mod lightbox;
