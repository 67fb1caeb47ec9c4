// SPDX-License-Identifier: MPL-2.0
//! Gallery domain types.
//!
//! A gallery is never materialized as a collection: its order is the sibling
//! order of the slide elements in the host document. These types describe what
//! a single slide shows and which keys drive the viewer.

pub mod key;
pub mod slide;

pub use key::Key;
pub use slide::Slide;
