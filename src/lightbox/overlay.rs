// SPDX-License-Identifier: MPL-2.0
//! Overlay lifecycle: `Closed → Opening → Open → Closing → Closed`.
//!
//! Opening locks page scroll, inserts the overlay, positions it below the host
//! toolbar, traps focus, renders the first slide and starts a fade-in.
//! Closing restores focus order and scroll right away, but the overlay is only
//! removed, and focus only handed back to the slide's link, once the fade-out
//! has been acknowledged by the host.

use crate::application::port::{Document, ElementId};
use crate::config::{defaults, LightboxSettings};
use crate::domain::gallery::{Key, Slide};
use crate::lightbox::event::Effect;
use crate::lightbox::focus_trap::FocusTrap;
use crate::lightbox::navigation::{self, Action, Bindings, ControlLabels, Neighbors, OverlayParts};
use crate::lightbox::transition::{Fade, Transition, TransitionToken, TransitionTracker};

/// Observable lifecycle phase of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Closed,
    Opening,
    Open,
    Closing,
}

impl Phase {
    /// Whether controls and shortcuts respond.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(self, Phase::Opening | Phase::Open)
    }
}

/// State owned by one open-to-close interaction.
#[derive(Debug, Clone)]
pub struct OverlaySession {
    parts: OverlayParts,
    current: ElementId,
    slide: Slide,
    neighbors: Neighbors,
    origin_focus_target: Option<ElementId>,
    focus_trap: FocusTrap,
    bindings: Bindings,
}

impl OverlaySession {
    #[must_use]
    pub fn parts(&self) -> OverlayParts {
        self.parts
    }

    /// Element of the slide currently shown.
    #[must_use]
    pub fn current(&self) -> ElementId {
        self.current
    }

    #[must_use]
    pub fn slide(&self) -> &Slide {
        &self.slide
    }

    #[must_use]
    pub fn neighbors(&self) -> Neighbors {
        self.neighbors
    }

    /// Link that receives focus once the overlay is gone.
    #[must_use]
    pub fn origin_focus_target(&self) -> Option<ElementId> {
        self.origin_focus_target
    }

    #[must_use]
    pub fn focus_trap(&self) -> &FocusTrap {
        &self.focus_trap
    }

    #[must_use]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }
}

/// Drives the overlay through its lifecycle.
#[derive(Debug, Clone)]
pub struct OverlayController {
    settings: LightboxSettings,
    labels: ControlLabels,
    phase: Phase,
    session: Option<OverlaySession>,
    transitions: TransitionTracker,
}

impl OverlayController {
    #[must_use]
    pub fn new(settings: LightboxSettings, labels: ControlLabels) -> Self {
        Self {
            settings,
            labels,
            phase: Phase::Closed,
            session: None,
            transitions: TransitionTracker::default(),
        }
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn session(&self) -> Option<&OverlaySession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn pending_transition(&self) -> Option<Transition> {
        self.transitions.pending()
    }

    #[must_use]
    pub fn settings(&self) -> &LightboxSettings {
        &self.settings
    }

    /// Opens the overlay on `slide`.
    ///
    /// Ignored (but consumed) while already opening or open. While a close is
    /// still fading out, that teardown is finished on the spot and the new
    /// session starts normally.
    pub fn open<D: Document + ?Sized>(&mut self, doc: &mut D, slide: ElementId) -> Effect {
        match self.phase {
            Phase::Opening | Phase::Open => {
                tracing::debug!(slide = %slide, "overlay already open; ignoring activation");
                return Effect::Consumed;
            }
            Phase::Closing => {
                tracing::debug!("activation during fade-out; finishing previous teardown");
                self.transitions.cancel();
                self.teardown(doc, false);
            }
            Phase::Closed => {}
        }

        if let Some(body) = doc.body() {
            doc.set_style(body, "overflow", "hidden");
        }

        let parts = self.build_overlay(doc);
        self.update_offset(doc);

        let mut focus_trap = FocusTrap::new();
        let mut excluded = vec![parts.container];
        excluded.extend(doc.element_by_id(&self.settings.toolbar_id));
        focus_trap.trap(doc, &excluded);

        let mut bindings = Bindings::default();
        let (content, neighbors) = navigation::render_slide(
            doc,
            parts,
            &mut bindings,
            slide,
            &self.settings.alt_prefix,
            &self.labels,
        );

        self.session = Some(OverlaySession {
            parts,
            current: slide,
            slide: content,
            neighbors,
            origin_focus_target: doc.find_descendant(slide, "a"),
            focus_trap,
            bindings,
        });
        self.phase = Phase::Opening;

        let transition = self
            .transitions
            .begin(Fade::In, self.settings.fade.as_duration());
        tracing::debug!(slide = %slide, token = %transition.token, "overlay opening");
        Effect::BeginTransition(transition)
    }

    /// Starts closing the overlay. Only valid while opening or open.
    pub fn close<D: Document + ?Sized>(&mut self, doc: &mut D) -> Effect {
        if !self.phase.is_interactive() {
            return Effect::Ignored;
        }
        let Some(session) = self.session.as_mut() else {
            return Effect::Ignored;
        };

        session.focus_trap.restore(doc);
        session.bindings.release_keys();
        if let Some(body) = doc.body() {
            doc.set_style(body, "overflow", "");
        }

        self.phase = Phase::Closing;
        let transition = self
            .transitions
            .begin(Fade::Out, self.settings.fade.as_duration());
        tracing::debug!(token = %transition.token, "overlay closing");
        Effect::BeginTransition(transition)
    }

    /// Shows another slide in the open overlay.
    pub fn show<D: Document + ?Sized>(&mut self, doc: &mut D, slide: ElementId) -> Effect {
        if !self.phase.is_interactive() {
            return Effect::Ignored;
        }
        let Some(session) = self.session.as_mut() else {
            return Effect::Ignored;
        };

        let (content, neighbors) = navigation::render_slide(
            doc,
            session.parts,
            &mut session.bindings,
            slide,
            &self.settings.alt_prefix,
            &self.labels,
        );
        session.current = slide;
        session.slide = content;
        session.neighbors = neighbors;
        session.origin_focus_target = doc.find_descendant(slide, "a");
        Effect::Consumed
    }

    /// Runs the continuation of the transition named by `token`.
    pub fn transition_finished<D: Document + ?Sized>(
        &mut self,
        doc: &mut D,
        token: TransitionToken,
    ) -> Effect {
        let Some(transition) = self.transitions.complete(token) else {
            tracing::trace!(token = %token, "stale transition ignored");
            return Effect::Ignored;
        };

        match (self.phase, transition.fade) {
            (Phase::Opening, Fade::In) => {
                self.phase = Phase::Open;
                tracing::debug!("overlay open");
                Effect::Consumed
            }
            (Phase::Closing, Fade::Out) => {
                self.teardown(doc, true);
                Effect::Consumed
            }
            _ => Effect::Ignored,
        }
    }

    /// Handles a click whose target lies inside the overlay.
    pub fn handle_click<D: Document + ?Sized>(&mut self, doc: &mut D, target: ElementId) -> Effect {
        if !self.phase.is_interactive() {
            return Effect::Ignored;
        }
        let Some(session) = self.session.as_ref() else {
            return Effect::Ignored;
        };
        if !doc.is_within(target, session.parts.container) {
            return Effect::Ignored;
        }

        if let Some(action) = session.bindings.action_for_click(&*doc, target) {
            return self.apply(doc, action);
        }

        if doc
            .closest_with_tag(target, &["img", "figcaption", "button"])
            .is_none()
        {
            return self.close(doc);
        }
        Effect::Ignored
    }

    /// Handles a key press.
    pub fn handle_key<D: Document + ?Sized>(&mut self, doc: &mut D, key: &Key) -> Effect {
        if !self.phase.is_interactive() {
            return Effect::Ignored;
        }
        let action = self
            .session
            .as_ref()
            .and_then(|session| session.bindings.action_for_key(key));
        match action {
            Some(action) => self.apply(doc, action),
            None => Effect::Ignored,
        }
    }

    /// Places the overlay flush with the bottom of the host toolbar.
    ///
    /// Does nothing unless both elements exist and the toolbar has layout.
    pub fn update_offset<D: Document + ?Sized>(&self, doc: &mut D) -> bool {
        let Some(toolbar) = doc.element_by_id(&self.settings.toolbar_id) else {
            return false;
        };
        let Some(overlay) = doc.element_by_id(&self.settings.overlay_id) else {
            return false;
        };
        let Some(bottom) = doc.bounding_bottom(toolbar) else {
            return false;
        };
        doc.set_style(overlay, "top", &format!("{bottom}px"));
        true
    }

    fn apply<D: Document + ?Sized>(&mut self, doc: &mut D, action: Action) -> Effect {
        match action {
            Action::Close => self.close(doc),
            Action::Show(slide) => self.show(doc, slide),
        }
    }

    fn build_overlay<D: Document + ?Sized>(&self, doc: &mut D) -> OverlayParts {
        let container = doc.create_element("div");
        doc.set_attribute(container, "class", defaults::OVERLAY_CLASS);
        doc.set_attribute(container, "id", &self.settings.overlay_id);

        let wrapper = doc.create_element("figure");
        doc.set_attribute(wrapper, "class", defaults::OVERLAY_FIGURE_CLASS);
        let image = doc.create_element("img");
        doc.set_attribute(image, "alt", "");
        let caption = doc.create_element("figcaption");

        doc.append_child(wrapper, image);
        doc.append_child(wrapper, caption);
        doc.append_child(container, wrapper);
        let host = doc.body().unwrap_or_else(|| doc.root());
        doc.append_child(host, container);

        OverlayParts {
            container,
            image,
            caption,
        }
    }

    fn teardown<D: Document + ?Sized>(&mut self, doc: &mut D, return_focus: bool) {
        let Some(mut session) = self.session.take() else {
            self.phase = Phase::Closed;
            return;
        };
        session.focus_trap.restore(doc);
        session.bindings.unbind(doc, session.parts.container);
        doc.remove(session.parts.container);

        if return_focus {
            if let Some(target) = session
                .origin_focus_target
                .filter(|&target| doc.is_connected(target))
            {
                doc.focus(target);
            }
        }
        self.phase = Phase::Closed;
        tracing::debug!(return_focus, "overlay closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryDocument;

    struct Page {
        doc: MemoryDocument,
        slides: Vec<ElementId>,
        links: Vec<ElementId>,
        toolbar: ElementId,
    }

    fn page(count: usize) -> Page {
        let mut doc = MemoryDocument::new();
        let body = doc.body().expect("body");
        let toolbar = doc.append_element(body, "div", &[("id", defaults::TOOLBAR_ID)]);
        doc.set_layout_bottom(toolbar, Some(32.0));
        let gallery = doc.append_element(body, "figure", &[("class", defaults::GALLERY_CLASS)]);
        let mut slides = Vec::new();
        let mut links = Vec::new();
        for i in 0..count {
            let figure = doc.append_element(gallery, "figure", &[("class", defaults::IMAGE_CLASS)]);
            let src = format!("{i}.jpg");
            let link = doc.append_element(figure, "a", &[("href", src.as_str())]);
            doc.append_element(link, "img", &[("src", src.as_str()), ("alt", "")]);
            slides.push(figure);
            links.push(link);
        }
        Page {
            doc,
            slides,
            links,
            toolbar,
        }
    }

    fn controller() -> OverlayController {
        OverlayController::new(LightboxSettings::default(), ControlLabels::default())
    }

    fn finish(controller: &mut OverlayController, doc: &mut MemoryDocument, effect: Effect) {
        let transition = effect.transition().expect("transition");
        assert!(controller
            .transition_finished(doc, transition.token)
            .is_handled());
    }

    #[test]
    fn open_runs_entry_sequence() {
        let mut page = page(2);
        let mut controller = controller();

        let effect = controller.open(&mut page.doc, page.slides[0]);

        let transition = effect.transition().expect("fade-in");
        assert_eq!(transition.fade, Fade::In);
        assert_eq!(transition.duration.as_millis(), 300);
        assert_eq!(controller.phase(), Phase::Opening);

        let body = page.doc.body().expect("body");
        assert_eq!(page.doc.style(body, "overflow").as_deref(), Some("hidden"));
        let overlay = page.doc.element_by_id(defaults::OVERLAY_ID).expect("overlay");
        assert_eq!(page.doc.parent(overlay), Some(body));
        assert_eq!(page.doc.style(overlay, "top").as_deref(), Some("32px"));
        assert_eq!(page.doc.attribute(page.links[1], "tabindex"), Some("-1"));

        finish(&mut controller, &mut page.doc, effect);
        assert_eq!(controller.phase(), Phase::Open);
    }

    #[test]
    fn navigation_works_before_fade_in_completes() {
        let mut page = page(2);
        let mut controller = controller();
        controller.open(&mut page.doc, page.slides[0]);

        let effect = controller.handle_key(&mut page.doc, &Key::ArrowRight);

        assert_eq!(effect, Effect::Consumed);
        let session = controller.session().expect("session");
        assert_eq!(session.current(), page.slides[1]);
        assert_eq!(session.slide().image_source(), "1.jpg");
    }

    #[test]
    fn close_defers_removal_and_focus_until_fade_out() {
        let mut page = page(2);
        let mut controller = controller();
        let opened = controller.open(&mut page.doc, page.slides[1]);
        finish(&mut controller, &mut page.doc, opened);

        let closing = controller.handle_key(&mut page.doc, &Key::Escape);
        let transition = closing.transition().expect("fade-out");
        assert_eq!(transition.fade, Fade::Out);
        assert_eq!(controller.phase(), Phase::Closing);

        let body = page.doc.body().expect("body");
        assert_eq!(page.doc.style(body, "overflow"), None);
        assert_eq!(page.doc.attribute(page.links[0], "tabindex"), None);
        assert!(page.doc.element_by_id(defaults::OVERLAY_ID).is_some());
        assert_ne!(page.doc.active_element(), Some(page.links[1]));

        finish(&mut controller, &mut page.doc, closing);
        assert_eq!(controller.phase(), Phase::Closed);
        assert!(controller.session().is_none());
        assert!(page.doc.element_by_id(defaults::OVERLAY_ID).is_none());
        assert_eq!(page.doc.active_element(), Some(page.links[1]));
    }

    #[test]
    fn second_open_while_open_is_ignored() {
        let mut page = page(2);
        let mut controller = controller();
        controller.open(&mut page.doc, page.slides[0]);

        let effect = controller.open(&mut page.doc, page.slides[1]);

        assert_eq!(effect, Effect::Consumed);
        assert_eq!(controller.session().expect("session").current(), page.slides[0]);
        assert_eq!(page.doc.elements_with_class(defaults::OVERLAY_CLASS).len(), 1);
    }

    #[test]
    fn open_during_fade_out_restarts_cleanly() {
        let mut page = page(2);
        let mut controller = controller();
        let opened = controller.open(&mut page.doc, page.slides[0]);
        finish(&mut controller, &mut page.doc, opened);
        let closing = controller.close(&mut page.doc);
        let stale = closing.transition().expect("fade-out").token;

        let reopened = controller.open(&mut page.doc, page.slides[1]);

        assert!(reopened.transition().is_some());
        assert_eq!(page.doc.elements_with_class(defaults::OVERLAY_CLASS).len(), 1);
        assert_eq!(
            controller.transition_finished(&mut page.doc, stale),
            Effect::Ignored
        );
        assert_eq!(controller.phase(), Phase::Opening);
        let session = controller.session().expect("session");
        assert_eq!(session.current(), page.slides[1]);
        assert_eq!(session.focus_trap().len(), 2);
    }

    #[test]
    fn close_during_fade_in_supersedes_it() {
        let mut page = page(1);
        let mut controller = controller();
        let opening = controller.open(&mut page.doc, page.slides[0]);
        let closing = controller.close(&mut page.doc);

        assert_eq!(
            controller.transition_finished(&mut page.doc, opening.transition().expect("in").token),
            Effect::Ignored
        );
        finish(&mut controller, &mut page.doc, closing);
        assert_eq!(controller.phase(), Phase::Closed);
    }

    #[test]
    fn close_while_closed_or_closing_is_ignored() {
        let mut page = page(1);
        let mut controller = controller();
        assert_eq!(controller.close(&mut page.doc), Effect::Ignored);

        controller.open(&mut page.doc, page.slides[0]);
        controller.close(&mut page.doc);
        assert_eq!(controller.close(&mut page.doc), Effect::Ignored);
        assert_eq!(controller.handle_key(&mut page.doc, &Key::Escape), Effect::Ignored);
    }

    #[test]
    fn offset_requires_toolbar_with_layout() {
        let mut page = page(1);
        let controller = controller();
        assert!(!controller.update_offset(&mut page.doc));

        page.doc.set_layout_bottom(page.toolbar, None);
        let mut controller = controller;
        controller.open(&mut page.doc, page.slides[0]);
        let overlay = page.doc.element_by_id(defaults::OVERLAY_ID).expect("overlay");
        assert_eq!(page.doc.style(overlay, "top"), None);

        page.doc.set_layout_bottom(page.toolbar, Some(46.5));
        assert!(controller.update_offset(&mut page.doc));
        assert_eq!(page.doc.style(overlay, "top").as_deref(), Some("46.5px"));
    }

    #[test]
    fn background_click_closes_but_image_click_does_not() {
        let mut page = page(1);
        let mut controller = controller();
        controller.open(&mut page.doc, page.slides[0]);
        let parts = controller.session().expect("session").parts();

        assert_eq!(controller.handle_click(&mut page.doc, parts.image), Effect::Ignored);
        assert_eq!(controller.handle_click(&mut page.doc, parts.caption), Effect::Ignored);
        let wrapper = page.doc.parent(parts.image).expect("wrapper");
        assert!(controller.handle_click(&mut page.doc, wrapper).transition().is_some());
        assert_eq!(controller.phase(), Phase::Closing);
    }
}
