// SPDX-License-Identifier: MPL-2.0
//! Events the host delivers to the viewer and the effects it gets back.

use crate::application::port::ElementId;
use crate::domain::gallery::Key;
use crate::lightbox::transition::{Transition, TransitionToken};

/// Input delivered by the host page.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A pointer click whose innermost target is the given element.
    Click(ElementId),
    /// A key press anywhere in the document.
    KeyDown(Key),
    /// The window was resized.
    Resize,
    /// A transition previously returned in [`Effect::BeginTransition`] has run.
    TransitionEnd(TransitionToken),
}

/// What the host must do after delivering an [`Event`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The viewer did not act on the event.
    Ignored,
    /// The viewer acted on the event. For clicks on activation links the
    /// host must suppress the default navigation.
    Consumed,
    /// The viewer acted and started a fade. The host runs it and delivers
    /// [`Event::TransitionEnd`] with its token once `duration` has elapsed.
    BeginTransition(Transition),
}

impl Effect {
    /// Whether the viewer acted on the event.
    #[must_use]
    pub fn is_handled(self) -> bool {
        !matches!(self, Effect::Ignored)
    }

    /// The transition the host must run, if any.
    #[must_use]
    pub fn transition(self) -> Option<Transition> {
        match self {
            Effect::BeginTransition(transition) => Some(transition),
            Effect::Ignored | Effect::Consumed => None,
        }
    }
}
