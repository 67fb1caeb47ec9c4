// SPDX-License-Identifier: MPL-2.0
//! Application layer - Ports the viewer depends on.
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - The viewer core in [`crate::lightbox`] only ever talks to ports

pub mod port;
