// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core types of the lightbox viewer with no framework dependencies.
//!
//! # Modules
//!
//! - [`gallery`]: Slide content ([`Slide`](gallery::Slide)) and keyboard
//!   shortcuts ([`Key`](gallery::Key))
//! - [`ui`]: UI value objects ([`FadeDuration`](ui::newtypes::FadeDuration))

pub mod gallery;
pub mod ui;
