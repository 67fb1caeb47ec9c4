// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the viewer. Constants are organized by category.
//!
//! # Categories
//!
//! - **Markup contract**: ids and classes shared with the server renderer
//! - **Controls**: classes applied to the overlay's interactive controls
//! - **Fade**: overlay transition timing

// ==========================================================================
// Markup Contract
// ==========================================================================

/// Id of the overlay element inserted into the page body.
pub const OVERLAY_ID: &str = "wp-block-lightbox-gallery-overlay";

/// Class of the overlay element.
pub const OVERLAY_CLASS: &str = "wp-block-lightbox-gallery-overlay";

/// Class of the figure wrapping the overlay's image and caption.
pub const OVERLAY_FIGURE_CLASS: &str = "image-wrapper";

/// Id of the fixed host toolbar the overlay must sit below.
pub const TOOLBAR_ID: &str = "wpadminbar";

/// Class of every gallery container emitted by the server renderer.
pub const GALLERY_CLASS: &str = "wp-block-lightbox-gallery-gallery";

/// Class of each slide (image block) inside a gallery.
pub const IMAGE_CLASS: &str = "wp-block-image";

/// Marker the renderer prepends to image alt text on activation links.
pub const ALT_PREFIX: &str = "View image: ";

// ==========================================================================
// Controls
// ==========================================================================

/// Class shared by every overlay control.
pub const BUTTON_CLASS: &str = "lightbox-button";

/// Class of the close control.
pub const CLOSE_CLASS: &str = "lightbox-close";

/// Class shared by the previous and next controls.
pub const NAV_CLASS: &str = "lightbox-nav";

/// Class of the previous control.
pub const PREV_CLASS: &str = "lightbox-prev";

/// Class of the next control.
pub const NEXT_CLASS: &str = "lightbox-next";

// ==========================================================================
// Fade Defaults
// ==========================================================================

/// Default fade-in/fade-out duration of the overlay (in milliseconds).
pub const DEFAULT_FADE_DURATION_MS: u64 = 300;

/// Minimum fade duration (instant transition).
pub const MIN_FADE_DURATION_MS: u64 = 0;

/// Maximum fade duration.
pub const MAX_FADE_DURATION_MS: u64 = 5_000;
