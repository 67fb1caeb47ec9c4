// SPDX-License-Identifier: MPL-2.0
//! Slide navigation: shows one slide in the overlay and rebinds its controls.
//!
//! Every render starts by unbinding everything the previous render bound
//! (control elements and keyboard shortcuts), then binds a close control,
//! plus previous/next controls only when the slide has such a neighbour.
//! Gallery order is the sibling order of the slide elements; there is no
//! wraparound.

use crate::application::port::{Document, ElementId};
use crate::config::defaults;
use crate::domain::gallery::{Key, Slide};

/// Accessible labels of the overlay controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlLabels {
    pub close: String,
    pub previous: String,
    pub next: String,
}

impl Default for ControlLabels {
    fn default() -> Self {
        Self {
            close: "Close lightbox".to_string(),
            previous: "Previous image".to_string(),
            next: "Next image".to_string(),
        }
    }
}

/// What a bound control or shortcut does when activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Close,
    /// Show the slide rooted at the given element.
    Show(ElementId),
}

/// The overlay elements a slide is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayParts {
    pub container: ElementId,
    pub image: ElementId,
    pub caption: ElementId,
}

/// Immediate neighbours of a slide in gallery order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Neighbors {
    pub previous: Option<ElementId>,
    pub next: Option<ElementId>,
}

impl Neighbors {
    pub fn of<D: Document + ?Sized>(doc: &D, slide: ElementId) -> Self {
        Self {
            previous: doc.previous_element_sibling(slide),
            next: doc.next_element_sibling(slide),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NavControl {
    button: ElementId,
    target: ElementId,
}

/// Control buttons created during a session. Renders re-attach these
/// instead of building new ones.
#[derive(Debug, Clone, Copy, Default)]
struct ControlPool {
    close: Option<ElementId>,
    previous: Option<ElementId>,
    next: Option<ElementId>,
}

/// Controls and shortcuts bound for the slide currently shown.
#[derive(Debug, Clone, Default)]
pub struct Bindings {
    close: Option<ElementId>,
    previous: Option<NavControl>,
    next: Option<NavControl>,
    keys: Vec<(Key, Action)>,
    pool: ControlPool,
}

impl Bindings {
    /// Action of the control containing `target`, if any.
    pub fn action_for_click<D: Document + ?Sized>(
        &self,
        doc: &D,
        target: ElementId,
    ) -> Option<Action> {
        if self.close.is_some_and(|button| doc.is_within(target, button)) {
            return Some(Action::Close);
        }
        [self.previous, self.next]
            .into_iter()
            .flatten()
            .find(|control| doc.is_within(target, control.button))
            .map(|control| Action::Show(control.target))
    }

    /// Action bound to `key`, if any.
    #[must_use]
    pub fn action_for_key(&self, key: &Key) -> Option<Action> {
        self.keys
            .iter()
            .find(|(bound, _)| bound == key)
            .map(|(_, action)| *action)
    }

    #[must_use]
    pub fn close_control(&self) -> Option<ElementId> {
        self.close
    }

    #[must_use]
    pub fn previous_control(&self) -> Option<ElementId> {
        self.previous.map(|control| control.button)
    }

    #[must_use]
    pub fn next_control(&self) -> Option<ElementId> {
        self.next.map(|control| control.button)
    }

    /// Keys that currently trigger an action.
    pub fn bound_keys(&self) -> impl Iterator<Item = &Key> {
        self.keys.iter().map(|(key, _)| key)
    }

    /// Drops keyboard shortcuts while leaving the controls in place.
    pub fn release_keys(&mut self) {
        self.keys.clear();
    }

    /// Removes every control element and shortcut, including stray control
    /// elements left in `container` by an earlier render.
    pub fn unbind<D: Document + ?Sized>(&mut self, doc: &mut D, container: ElementId) {
        self.detach_controls(doc, container);
        let pool = std::mem::take(&mut self.pool);
        for element in [pool.close, pool.previous, pool.next].into_iter().flatten() {
            doc.remove(element);
        }
    }

    /// Takes every control out of `container` and drops all bindings. Pooled
    /// buttons stay available for the next render.
    fn detach_controls<D: Document + ?Sized>(&mut self, doc: &mut D, container: ElementId) {
        let tracked = [
            self.close.take(),
            self.previous.take().map(|control| control.button),
            self.next.take().map(|control| control.button),
        ];
        let strays: Vec<ElementId> = doc
            .descendants(container)
            .into_iter()
            .filter(|&element| {
                doc.has_class(element, defaults::CLOSE_CLASS)
                    || doc.has_class(element, defaults::NAV_CLASS)
            })
            .collect();
        for element in tracked.into_iter().flatten().chain(strays) {
            doc.remove(element);
        }
        self.keys.clear();
    }
}

/// Reads the content of the slide rooted at `slide`.
pub fn read_slide<D: Document + ?Sized>(doc: &D, slide: ElementId, alt_prefix: &str) -> Slide {
    let image = doc.find_descendant(slide, "img");
    let caption = doc
        .find_descendant(slide, "figcaption")
        .map(|caption| doc.text_content(caption));
    Slide::new(
        image.and_then(|img| doc.attribute(img, "src")),
        image.and_then(|img| doc.attribute(img, "alt")),
        caption.as_deref(),
        alt_prefix,
    )
}

/// Shows `slide` in the overlay and rebinds controls and shortcuts for it.
///
/// Returns the displayed content and the slide's neighbours.
pub fn render_slide<D: Document + ?Sized>(
    doc: &mut D,
    parts: OverlayParts,
    bindings: &mut Bindings,
    slide: ElementId,
    alt_prefix: &str,
    labels: &ControlLabels,
) -> (Slide, Neighbors) {
    let neighbors = Neighbors::of(&*doc, slide);
    let content = read_slide(&*doc, slide, alt_prefix);

    doc.set_attribute(parts.image, "src", content.image_source());
    doc.set_attribute(parts.image, "alt", content.image_alt_text());
    doc.set_text_content(parts.caption, content.caption_text());

    bindings.detach_controls(doc, parts.container);

    let close = attach_control(
        doc,
        &mut bindings.pool.close,
        parts.container,
        &[defaults::CLOSE_CLASS],
        &labels.close,
    );
    bindings.close = Some(close);
    bindings.keys.push((Key::Escape, Action::Close));

    if let Some(previous) = neighbors.previous {
        let button = attach_control(
            doc,
            &mut bindings.pool.previous,
            parts.container,
            &[defaults::NAV_CLASS, defaults::PREV_CLASS],
            &labels.previous,
        );
        bindings.previous = Some(NavControl {
            button,
            target: previous,
        });
        bindings.keys.push((Key::ArrowLeft, Action::Show(previous)));
    }

    if let Some(next) = neighbors.next {
        let button = attach_control(
            doc,
            &mut bindings.pool.next,
            parts.container,
            &[defaults::NAV_CLASS, defaults::NEXT_CLASS],
            &labels.next,
        );
        bindings.next = Some(NavControl {
            button,
            target: next,
        });
        bindings.keys.push((Key::ArrowRight, Action::Show(next)));
    }

    tracing::debug!(
        slide = %slide,
        src = content.image_source(),
        has_previous = neighbors.previous.is_some(),
        has_next = neighbors.next.is_some(),
        "slide rendered"
    );
    (content, neighbors)
}

/// Appends the pooled button in `slot` to `container`, creating it on first use.
fn attach_control<D: Document + ?Sized>(
    doc: &mut D,
    slot: &mut Option<ElementId>,
    container: ElementId,
    classes: &[&str],
    label: &str,
) -> ElementId {
    let button = match *slot {
        Some(button) => button,
        None => {
            let button = create_control(doc, classes);
            *slot = Some(button);
            button
        }
    };
    doc.set_attribute(button, "aria-label", label);
    doc.append_child(container, button);
    button
}

/// Builds `<button class="lightbox-button ..."><span></span><span></span></button>`.
fn create_control<D: Document + ?Sized>(doc: &mut D, classes: &[&str]) -> ElementId {
    let button = doc.create_element("button");
    let class = std::iter::once(defaults::BUTTON_CLASS)
        .chain(classes.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    doc.set_attribute(button, "class", &class);
    for _ in 0..2 {
        let bar = doc.create_element("span");
        doc.append_child(button, bar);
    }
    button
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryDocument;

    struct Fixture {
        doc: MemoryDocument,
        parts: OverlayParts,
        slides: Vec<ElementId>,
    }

    fn fixture(count: usize) -> Fixture {
        let mut doc = MemoryDocument::new();
        let body = doc.body().expect("body");
        let gallery = doc.append_element(body, "figure", &[("class", defaults::GALLERY_CLASS)]);
        let slides = (0..count)
            .map(|i| {
                let figure =
                    doc.append_element(gallery, "figure", &[("class", defaults::IMAGE_CLASS)]);
                let src = format!("{i}.jpg");
                let alt = format!("View image: Photo {i}");
                let link = doc.append_element(figure, "a", &[("href", src.as_str())]);
                doc.append_element(link, "img", &[("src", src.as_str()), ("alt", alt.as_str())]);
                let caption = doc.append_element(figure, "figcaption", &[]);
                doc.append_text(caption, &format!("  Caption {i}  "));
                figure
            })
            .collect();
        let container = doc.append_element(body, "div", &[("id", defaults::OVERLAY_ID)]);
        let wrapper = doc.append_element(container, "figure", &[]);
        let image = doc.append_element(wrapper, "img", &[("alt", "")]);
        let caption = doc.append_element(wrapper, "figcaption", &[]);
        Fixture {
            doc,
            parts: OverlayParts {
                container,
                image,
                caption,
            },
            slides,
        }
    }

    fn render(fx: &mut Fixture, bindings: &mut Bindings, index: usize) -> (Slide, Neighbors) {
        render_slide(
            &mut fx.doc,
            fx.parts,
            bindings,
            fx.slides[index],
            defaults::ALT_PREFIX,
            &ControlLabels::default(),
        )
    }

    #[test]
    fn render_updates_image_and_caption() {
        let mut fx = fixture(3);
        let mut bindings = Bindings::default();

        let (slide, _) = render(&mut fx, &mut bindings, 1);

        assert_eq!(slide.image_source(), "1.jpg");
        assert_eq!(fx.doc.attribute(fx.parts.image, "src"), Some("1.jpg"));
        assert_eq!(fx.doc.attribute(fx.parts.image, "alt"), Some("Photo 1"));
        assert_eq!(fx.doc.text_content(fx.parts.caption), "Caption 1");
    }

    #[test]
    fn middle_slide_binds_all_controls() {
        let mut fx = fixture(3);
        let mut bindings = Bindings::default();

        let (_, neighbors) = render(&mut fx, &mut bindings, 1);

        assert_eq!(neighbors.previous, Some(fx.slides[0]));
        assert_eq!(neighbors.next, Some(fx.slides[2]));
        assert_eq!(bindings.action_for_key(&Key::Escape), Some(Action::Close));
        assert_eq!(
            bindings.action_for_key(&Key::ArrowLeft),
            Some(Action::Show(fx.slides[0]))
        );
        assert_eq!(
            bindings.action_for_key(&Key::ArrowRight),
            Some(Action::Show(fx.slides[2]))
        );
        let prev = bindings.previous_control().expect("prev control");
        assert_eq!(
            fx.doc.attribute(prev, "class"),
            Some("lightbox-button lightbox-nav lightbox-prev")
        );
        assert_eq!(fx.doc.attribute(prev, "aria-label"), Some("Previous image"));
    }

    #[test]
    fn edges_have_no_missing_neighbour_affordance() {
        let mut fx = fixture(3);
        let mut bindings = Bindings::default();

        render(&mut fx, &mut bindings, 0);
        assert!(bindings.previous_control().is_none());
        assert_eq!(bindings.action_for_key(&Key::ArrowLeft), None);
        assert!(bindings.next_control().is_some());

        render(&mut fx, &mut bindings, 2);
        assert!(bindings.next_control().is_none());
        assert_eq!(bindings.action_for_key(&Key::ArrowRight), None);
        assert!(bindings.previous_control().is_some());
    }

    #[test]
    fn rerender_does_not_accumulate_controls() {
        let mut fx = fixture(3);
        let mut bindings = Bindings::default();

        for index in [1, 0, 1, 2, 1] {
            render(&mut fx, &mut bindings, index);
        }

        let buttons: Vec<ElementId> = fx
            .doc
            .descendants(fx.parts.container)
            .into_iter()
            .filter(|&element| fx.doc.has_class(element, defaults::BUTTON_CLASS))
            .collect();
        assert_eq!(buttons.len(), 3);
        assert_eq!(bindings.bound_keys().count(), 3);
    }

    #[test]
    fn repeated_renders_reuse_control_elements() {
        let mut fx = fixture(3);
        let mut bindings = Bindings::default();
        render(&mut fx, &mut bindings, 1);
        let next = bindings.next_control();
        let created = fx.doc.element_count();

        for _ in 0..500 {
            render(&mut fx, &mut bindings, 2);
            render(&mut fx, &mut bindings, 1);
        }

        assert_eq!(fx.doc.element_count(), created);
        assert_eq!(bindings.next_control(), next);
    }

    #[test]
    fn edge_render_detaches_unused_pooled_control() {
        let mut fx = fixture(3);
        let mut bindings = Bindings::default();
        render(&mut fx, &mut bindings, 1);
        let next = bindings.next_control().expect("next");

        render(&mut fx, &mut bindings, 2);
        assert!(!fx.doc.is_within(next, fx.parts.container));
        assert_eq!(bindings.action_for_click(&fx.doc, next), None);

        render(&mut fx, &mut bindings, 0);
        assert_eq!(bindings.next_control(), Some(next));
        assert!(fx.doc.is_within(next, fx.parts.container));
    }

    #[test]
    fn unbind_removes_pooled_controls() {
        let mut fx = fixture(3);
        let mut bindings = Bindings::default();
        render(&mut fx, &mut bindings, 1);
        render(&mut fx, &mut bindings, 2);

        bindings.unbind(&mut fx.doc, fx.parts.container);
        render(&mut fx, &mut bindings, 1);

        let buttons = fx
            .doc
            .descendants(fx.parts.container)
            .into_iter()
            .filter(|&element| fx.doc.has_class(element, defaults::BUTTON_CLASS))
            .count();
        assert_eq!(buttons, 3);
    }

    #[test]
    fn clicks_inside_controls_resolve_to_actions() {
        let mut fx = fixture(2);
        let mut bindings = Bindings::default();
        render(&mut fx, &mut bindings, 0);

        let close = bindings.close_control().expect("close");
        let bar = fx.doc.find_descendant(close, "span").expect("span");
        assert_eq!(bindings.action_for_click(&fx.doc, bar), Some(Action::Close));

        let next = bindings.next_control().expect("next");
        assert_eq!(
            bindings.action_for_click(&fx.doc, next),
            Some(Action::Show(fx.slides[1]))
        );
        assert_eq!(bindings.action_for_click(&fx.doc, fx.parts.image), None);
    }

    #[test]
    fn slide_without_image_or_caption_renders_empty() {
        let mut fx = fixture(1);
        let gallery = fx.doc.parent(fx.slides[0]).expect("gallery");
        let bare = fx
            .doc
            .append_element(gallery, "figure", &[("class", defaults::IMAGE_CLASS)]);
        let content = read_slide(&fx.doc, bare, defaults::ALT_PREFIX);
        assert_eq!(content, Slide::default());
    }
}
