// SPDX-License-Identifier: MPL-2.0
//! UI newtypes.
//!
//! This module provides type-safe wrappers for UI values,
//! ensuring they are always within valid ranges.

use crate::config::defaults;
use std::time::Duration;

// =============================================================================
// Fade Bounds
// =============================================================================

/// Fade transition bounds (0 to 5000 milliseconds).
pub mod fade_bounds {
    use crate::config::defaults;

    /// Minimum fade duration in milliseconds (instant).
    pub const MIN_MS: u64 = defaults::MIN_FADE_DURATION_MS;
    /// Maximum fade duration in milliseconds.
    pub const MAX_MS: u64 = defaults::MAX_FADE_DURATION_MS;
    /// Default fade duration in milliseconds.
    pub const DEFAULT_MS: u64 = defaults::DEFAULT_FADE_DURATION_MS;
}

// =============================================================================
// FadeDuration
// =============================================================================

/// Duration of the overlay fade-in and fade-out transitions.
///
/// This newtype enforces validity at the type level, ensuring the value
/// is always within the valid range (0–5000 ms). A zero duration still
/// goes through the two-phase transition; the host simply completes it
/// on the next turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FadeDuration(u64);

impl FadeDuration {
    /// Creates a new fade duration, clamping to the valid range.
    #[must_use]
    pub fn from_millis(millis: u64) -> Self {
        Self(millis.clamp(fade_bounds::MIN_MS, fade_bounds::MAX_MS))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn millis(self) -> u64 {
        self.0
    }

    /// Returns the fade as a Duration.
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }
}

impl Default for FadeDuration {
    fn default() -> Self {
        Self(defaults::DEFAULT_FADE_DURATION_MS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fade_duration_clamps_to_max() {
        assert_eq!(FadeDuration::from_millis(60_000).millis(), fade_bounds::MAX_MS);
    }

    #[test]
    fn fade_duration_default_matches_reference_timing() {
        assert_eq!(FadeDuration::default().millis(), 300);
        assert_eq!(
            FadeDuration::default().as_duration(),
            Duration::from_millis(300)
        );
    }

    #[test]
    fn zero_fade_is_allowed() {
        assert_eq!(FadeDuration::from_millis(0).as_duration(), Duration::ZERO);
    }
}
