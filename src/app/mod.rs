// SPDX-License-Identifier: MPL-2.0
//! Application root: wires configuration, localization, a loaded page and the
//! viewer, then plays scripted interactions against them.
//!
//! The viewer never sleeps. Every fade it starts comes back as a transition
//! with a duration; `App` keeps those as deadlines on the tokio clock and
//! delivers the matching `TransitionEnd` once one is reached.

pub mod script;

pub use script::{parse_script, Step};

use crate::application::port::{Document, ElementId};
use crate::config::{self, defaults, Config, LightboxSettings};
use crate::error::{Error, Result};
use crate::i18n::fluent::I18n;
use crate::infrastructure::{load_page, MemoryDocument};
use crate::lightbox::{Effect, Event, Lightbox, OverlaySession, Phase, TransitionToken};
use std::fmt;
use std::path::PathBuf;
use tokio::time::Instant;

/// Command-line options for the viewer driver.
#[derive(Debug, Default, Clone)]
pub struct Flags {
    /// Optional locale override (e.g. `fr`).
    pub lang: Option<String>,
    /// Gallery page to load.
    pub page: PathBuf,
    /// Settings file to read instead of the per-user default.
    pub config_path: Option<PathBuf>,
    /// Bottom edge of the host toolbar, in pixels.
    pub toolbar_bottom: Option<f32>,
}

/// Observable viewer state after one scripted step.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub step: String,
    pub effect: Effect,
    pub phase: Phase,
    pub image_source: Option<String>,
    pub image_alt_text: Option<String>,
    pub caption_text: Option<String>,
    pub has_previous: bool,
    pub has_next: bool,
    /// Short selector-like description of the focused element.
    pub focused: Option<String>,
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let effect = match self.effect {
            Effect::Ignored => "ignored",
            Effect::Consumed => "consumed",
            Effect::BeginTransition(_) => "fading",
        };
        write!(f, "{:<16} {:<9} {:<8}", self.step, effect, format!("{:?}", self.phase))?;
        if let Some(src) = &self.image_source {
            write!(f, " src={}", src)?;
        }
        if let Some(alt) = &self.image_alt_text {
            write!(f, " alt={:?}", alt)?;
        }
        if let Some(caption) = &self.caption_text {
            write!(f, " caption={:?}", caption)?;
        }
        if self.image_source.is_some() {
            write!(
                f,
                " prev={} next={}",
                if self.has_previous { "yes" } else { "no" },
                if self.has_next { "yes" } else { "no" }
            )?;
        }
        if let Some(focused) = &self.focused {
            write!(f, " focus={}", focused)?;
        }
        Ok(())
    }
}

/// Page, viewer and pending fades for one run.
pub struct App {
    pub i18n: I18n,
    document: MemoryDocument,
    lightbox: Lightbox,
    deadlines: Vec<(Instant, TransitionToken)>,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("locale", self.i18n.current_locale())
            .field("phase", &self.lightbox.phase())
            .field("pending", &self.lightbox.pending_transition())
            .field("deadlines", &self.deadlines.len())
            .finish_non_exhaustive()
    }
}

impl App {
    /// Loads settings and the page named by `flags`, then binds the galleries.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be read or the settings file cannot
    /// be accessed.
    pub fn new(flags: Flags) -> Result<Self> {
        let config = match &flags.config_path {
            Some(path) if path.exists() => config::load_from_path(path)?,
            Some(path) => {
                tracing::info!(path = %path.display(), "settings file not found; using defaults");
                Config::default()
            }
            None => config::load()?,
        };
        let document = load_page(&flags.page)?;
        let mut app = Self::with_document(document, &config, flags.lang);
        if let Some(bottom) = flags.toolbar_bottom {
            app.place_toolbar(bottom);
        }
        tracing::info!(
            page = %flags.page.display(),
            links = app.lightbox.activation_links().len(),
            locale = %app.i18n.current_locale(),
            "page loaded"
        );
        Ok(app)
    }

    /// Builds an app around an already parsed page.
    #[must_use]
    pub fn with_document(document: MemoryDocument, config: &Config, lang: Option<String>) -> Self {
        let i18n = I18n::new(lang, config);
        let mut lightbox = Lightbox::new(LightboxSettings::from(config), i18n.control_labels());
        lightbox.bind_galleries(&document);
        Self {
            i18n,
            document,
            lightbox,
            deadlines: Vec::new(),
        }
    }

    #[must_use]
    pub fn document(&self) -> &MemoryDocument {
        &self.document
    }

    #[must_use]
    pub fn lightbox(&self) -> &Lightbox {
        &self.lightbox
    }

    /// Markup of the overlay while it is in the page.
    #[must_use]
    pub fn overlay_html(&self) -> Option<String> {
        let overlay_id = &self.lightbox.overlay().settings().overlay_id;
        self.document
            .element_by_id(overlay_id)
            .map(|overlay| self.document.outer_html(overlay))
    }

    /// Gives the host toolbar a layout, inserting one if the page has none.
    pub fn place_toolbar(&mut self, bottom: f32) {
        let toolbar = match self.document.element_by_id(defaults::TOOLBAR_ID) {
            Some(toolbar) => toolbar,
            None => {
                let Some(body) = self.document.body() else {
                    return;
                };
                self.document
                    .append_element(body, "div", &[("id", defaults::TOOLBAR_ID)])
            }
        };
        self.document.set_layout_bottom(toolbar, Some(bottom));
    }

    /// Plays every step, then lets outstanding fades finish.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Script`] when a step names a link that does not exist.
    pub async fn run(&mut self, steps: &[Step]) -> Result<Vec<Snapshot>> {
        let mut snapshots = Vec::with_capacity(steps.len() + 1);
        for step in steps {
            snapshots.push(self.step(step).await?);
        }
        if !self.deadlines.is_empty() {
            let mut effect = Effect::Ignored;
            while let Some(settled) = self.wait().await {
                effect = settled;
            }
            snapshots.push(self.snapshot("(settled)".to_string(), effect));
        }
        Ok(snapshots)
    }

    /// Plays one step.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Script`] when `Step::Open` is out of range.
    pub async fn step(&mut self, step: &Step) -> Result<Snapshot> {
        let effect = match step {
            Step::Open(index) => {
                let links = self.lightbox.activation_links();
                let link = links.get(*index).copied().ok_or_else(|| {
                    Error::Script(format!(
                        "`{}` is out of range, the page has {} gallery links",
                        step,
                        links.len()
                    ))
                })?;
                self.dispatch(Event::Click(link))
            }
            Step::Close => self.click_control(|session| session.bindings().close_control()),
            Step::Previous => self.click_control(|session| session.bindings().previous_control()),
            Step::Next => self.click_control(|session| session.bindings().next_control()),
            Step::Background => self.click_control(|session| Some(session.parts().container)),
            Step::Key(key) => self.dispatch(Event::KeyDown(key.clone())),
            Step::Resize => self.dispatch(Event::Resize),
            Step::Wait => self.wait().await.unwrap_or(Effect::Ignored),
        };
        Ok(self.snapshot(step.to_string(), effect))
    }

    /// Delivers one event and records the deadline of any fade it starts.
    pub fn dispatch(&mut self, event: Event) -> Effect {
        let effect = self.lightbox.handle(&mut self.document, event);
        if let Some(transition) = effect.transition() {
            tracing::debug!(
                token = %transition.token,
                fade = ?transition.fade,
                millis = transition.duration.as_millis() as u64,
                "fade started"
            );
            self.deadlines
                .push((Instant::now() + transition.duration, transition.token));
        }
        effect
    }

    /// Sleeps until the earliest recorded fade ends and acknowledges it. A
    /// fade the viewer no longer waits for is dropped without sleeping.
    ///
    /// Returns `None` when nothing is recorded.
    pub async fn wait(&mut self) -> Option<Effect> {
        let (position, _) = self
            .deadlines
            .iter()
            .enumerate()
            .min_by_key(|(_, (deadline, _))| *deadline)?;
        let (deadline, token) = self.deadlines.remove(position);
        let current = self
            .lightbox
            .pending_transition()
            .is_some_and(|pending| pending.token == token);
        if !current {
            tracing::debug!(%token, "superseded fade dropped");
            return Some(Effect::Ignored);
        }
        tokio::time::sleep_until(deadline).await;
        Some(self.dispatch(Event::TransitionEnd(token)))
    }

    fn click_control(
        &mut self,
        control: impl FnOnce(&OverlaySession) -> Option<ElementId>,
    ) -> Effect {
        match self.lightbox.session().and_then(control) {
            Some(target) => self.dispatch(Event::Click(target)),
            None => Effect::Ignored,
        }
    }

    /// Current observable state, labelled with `step`.
    #[must_use]
    pub fn snapshot(&self, step: String, effect: Effect) -> Snapshot {
        let session = self.lightbox.session();
        let slide = session.map(|session| session.slide());
        let neighbors = session.map(|session| session.neighbors());
        Snapshot {
            step,
            effect,
            phase: self.lightbox.phase(),
            image_source: slide.map(|s| s.image_source().to_string()),
            image_alt_text: slide.map(|s| s.image_alt_text().to_string()),
            caption_text: slide
                .filter(|s| s.has_caption())
                .map(|s| s.caption_text().to_string()),
            has_previous: neighbors.is_some_and(|n| n.previous.is_some()),
            has_next: neighbors.is_some_and(|n| n.next.is_some()),
            focused: self
                .document
                .active_element()
                .map(|element| describe(&self.document, element)),
        }
    }
}

fn describe<D: Document + ?Sized>(doc: &D, element: ElementId) -> String {
    let mut label = doc.tag_name(element).unwrap_or("?").to_string();
    if let Some(class) = doc.attribute(element, "class") {
        for name in class.split_whitespace() {
            label.push('.');
            label.push_str(name);
        }
    }
    if let Some(href) = doc.attribute(element, "href") {
        label.push_str(&format!("[href={}]", href));
    }
    label
}
