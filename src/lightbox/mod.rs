// SPDX-License-Identifier: MPL-2.0
//! Modal lightbox viewer for image galleries.
//!
//! [`Lightbox`] is the entry point: it binds the activation links of every
//! gallery on the page and routes host [`Event`]s to the overlay.
//!
//! ## Architecture
//!
//! ```text
//! Lightbox (entry point, event routing)
//!     └── overlay      - Lifecycle, scroll lock, offset, fades
//!         ├── focus_trap  - Tab order outside the overlay
//!         └── navigation  - Slide rendering, controls, shortcuts
//! ```
//!
//! ## Example
//!
//! ```
//! use lightbox_gallery::infrastructure::parse_page;
//! use lightbox_gallery::lightbox::{Event, Lightbox, Phase};
//!
//! let mut doc = parse_page(
//!     r#"<figure class="wp-block-lightbox-gallery-gallery">
//!          <figure class="wp-block-image"><a href="a.jpg"><img src="a.jpg" alt=""></a></figure>
//!        </figure>"#,
//! );
//! let mut lightbox = Lightbox::default();
//! lightbox.bind_galleries(&doc);
//!
//! let link = lightbox.activation_links()[0];
//! let effect = lightbox.handle(&mut doc, Event::Click(link));
//! let fade_in = effect.transition().unwrap();
//! lightbox.handle(&mut doc, Event::TransitionEnd(fade_in.token));
//! assert_eq!(lightbox.phase(), Phase::Open);
//! ```

pub mod event;
pub mod focus_trap;
pub mod navigation;
pub mod overlay;
pub mod transition;

pub use event::{Effect, Event};
pub use focus_trap::FocusTrap;
pub use navigation::{ControlLabels, OverlayParts};
pub use overlay::{OverlayController, OverlaySession, Phase};
pub use transition::{Fade, Transition, TransitionToken};

use crate::application::port::{Document, ElementId};
use crate::config::LightboxSettings;

/// Link that opens the overlay on its slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Activator {
    link: ElementId,
    slide: ElementId,
}

/// Viewer bound to the galleries of one page.
#[derive(Debug, Clone)]
pub struct Lightbox {
    overlay: OverlayController,
    activators: Vec<Activator>,
}

impl Default for Lightbox {
    fn default() -> Self {
        Self::new(LightboxSettings::default(), ControlLabels::default())
    }
}

impl Lightbox {
    #[must_use]
    pub fn new(settings: LightboxSettings, labels: ControlLabels) -> Self {
        Self {
            overlay: OverlayController::new(settings, labels),
            activators: Vec::new(),
        }
    }

    /// Binds every link inside every slide of every gallery currently on the
    /// page. Links bound by an earlier call are skipped.
    ///
    /// Returns the number of links newly bound.
    pub fn bind_galleries<D: Document + ?Sized>(&mut self, doc: &D) -> usize {
        let settings = self.overlay.settings();
        let mut found = Vec::new();
        for gallery in doc.elements_with_class(&settings.gallery_class) {
            for slide in doc.descendants(gallery) {
                if !doc.has_class(slide, &settings.image_class) {
                    continue;
                }
                for link in doc.descendants(slide) {
                    if doc.tag_name(link) == Some("a")
                        && !self.activators.iter().any(|a| a.link == link)
                        && !found.iter().any(|a: &Activator| a.link == link)
                    {
                        found.push(Activator { link, slide });
                    }
                }
            }
        }
        let bound = found.len();
        self.activators.extend(found);
        tracing::debug!(bound, total = self.activators.len(), "gallery links bound");
        bound
    }

    /// Activation links in binding order.
    #[must_use]
    pub fn activation_links(&self) -> Vec<ElementId> {
        self.activators.iter().map(|a| a.link).collect()
    }

    /// Routes one host event.
    pub fn handle<D: Document + ?Sized>(&mut self, doc: &mut D, event: Event) -> Effect {
        match event {
            Event::Click(target) => self.handle_click(doc, target),
            Event::KeyDown(key) => self.overlay.handle_key(doc, &key),
            Event::Resize => {
                if self.overlay.update_offset(doc) {
                    Effect::Consumed
                } else {
                    Effect::Ignored
                }
            }
            Event::TransitionEnd(token) => self.overlay.transition_finished(doc, token),
        }
    }

    fn handle_click<D: Document + ?Sized>(&mut self, doc: &mut D, target: ElementId) -> Effect {
        let inside_overlay = self
            .overlay
            .session()
            .is_some_and(|session| doc.is_within(target, session.parts().container));
        if inside_overlay {
            return self.overlay.handle_click(doc, target);
        }

        match self
            .activators
            .iter()
            .find(|activator| doc.is_within(target, activator.link))
        {
            Some(activator) => {
                let slide = activator.slide;
                self.overlay.open(doc, slide)
            }
            None => Effect::Ignored,
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.overlay.phase()
    }

    #[must_use]
    pub fn session(&self) -> Option<&OverlaySession> {
        self.overlay.session()
    }

    #[must_use]
    pub fn pending_transition(&self) -> Option<Transition> {
        self.overlay.pending_transition()
    }

    #[must_use]
    pub fn overlay(&self) -> &OverlayController {
        &self.overlay
    }
}
