// SPDX-License-Identifier: MPL-2.0
//! Two-phase fade transitions.
//!
//! Starting a fade hands the host a [`Transition`]; the host reports back with
//! its token once the fade has run for `duration`. Work that must wait for the
//! animation (overlay removal, focus return) only ever runs on that report.
//! At most one transition is pending: beginning a new one invalidates the
//! previous token.

use std::fmt;
use std::time::Duration;

/// Identifies one started transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionToken(u64);

impl fmt::Display for TransitionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

/// Direction of an overlay fade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fade {
    In,
    Out,
}

/// A fade the host must run and then acknowledge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub token: TransitionToken,
    pub fade: Fade,
    pub duration: Duration,
}

/// Issues transition tokens and tracks the pending one.
#[derive(Debug, Clone, Default)]
pub struct TransitionTracker {
    issued: u64,
    pending: Option<Transition>,
}

impl TransitionTracker {
    /// Starts a transition, superseding any pending one.
    pub fn begin(&mut self, fade: Fade, duration: Duration) -> Transition {
        self.issued += 1;
        let transition = Transition {
            token: TransitionToken(self.issued),
            fade,
            duration,
        };
        if let Some(superseded) = self.pending.replace(transition) {
            tracing::trace!(token = %superseded.token, "transition superseded");
        }
        transition
    }

    /// Completes the pending transition if `token` names it.
    ///
    /// Stale or unknown tokens return `None` and leave the pending transition
    /// untouched.
    pub fn complete(&mut self, token: TransitionToken) -> Option<Transition> {
        if self.pending.is_some_and(|pending| pending.token == token) {
            self.pending.take()
        } else {
            None
        }
    }

    /// Drops the pending transition without completing it.
    pub fn cancel(&mut self) -> Option<Transition> {
        self.pending.take()
    }

    #[must_use]
    pub fn pending(&self) -> Option<Transition> {
        self.pending
    }
}
