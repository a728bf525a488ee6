//! In-page suggestion engine.
//!
//! One [`Engine`] exists per injected page. It owns the snippet cache, the
//! binding to the host's input element and the suggestion overlay; the host
//! document is lent to it for the duration of each event.

pub mod binder;
pub mod cache;
pub mod detector;
pub mod editor;
pub mod insert;
pub mod navigator;
pub mod overlay;

use crate::domain::dom::{Document, ListenerKind, NodeId};
use crate::domain::snippets::{StoreChange, StoreSnapshot};
use binder::{BindOutcome, InputBinder, DEFAULT_HOST_INPUT_ID};
use cache::SnippetCache;
use detector::Verdict;
use editor::Editor;
use navigator::{Key, NavOutcome};
use overlay::{PanelMetrics, SuggestionOverlay, DEFAULT_COMMIT_HINT};

#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub host_input_id: String,
    pub panel: PanelMetrics,
    pub commit_hint: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host_input_id: DEFAULT_HOST_INPUT_ID.to_string(),
            panel: PanelMetrics::default(),
            commit_hint: DEFAULT_COMMIT_HINT.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    /// The host's DOM changed structurally (one notification per batch).
    Mutations,
    Input { target: NodeId },
    KeyDown { target: NodeId, key: Key },
    /// Pointer click; `None` when it landed outside any element.
    Click { target: Option<NodeId> },
    Resize,
    /// Scroll of the window or of any container (`target`).
    Scroll { target: Option<NodeId> },
    StoreChanged(StoreChange),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    PassThrough,
    DefaultPrevented,
}

#[derive(Debug, Clone)]
pub struct Engine {
    cache: SnippetCache,
    binder: InputBinder,
    overlay: SuggestionOverlay,
    /// Element whose post-commit input notification has not arrived yet.
    echo: Option<NodeId>,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig, snapshot: &StoreSnapshot) -> Self {
        Self {
            cache: SnippetCache::from_snapshot(snapshot),
            binder: InputBinder::new(config.host_input_id),
            overlay: SuggestionOverlay::new(config.panel, config.commit_hint),
            echo: None,
        }
    }

    /// Looks for the host input once, for pages where it already exists.
    pub fn start(&mut self, doc: &mut Document) {
        self.observe(doc);
    }

    pub fn cache(&self) -> &SnippetCache {
        &self.cache
    }

    pub fn overlay(&self) -> &SuggestionOverlay {
        &self.overlay
    }

    pub fn active_element(&self) -> Option<NodeId> {
        self.binder.active()
    }

    /// Shape of the bound element, if it is still usable.
    pub fn editor(&self, doc: &Document) -> Option<Editor> {
        self.binder
            .active()
            .and_then(|el| Editor::detect(doc, el).ok())
    }

    pub fn handle(&mut self, doc: &mut Document, event: HostEvent) -> Dispatch {
        match event {
            HostEvent::Mutations => {
                self.observe(doc);
                Dispatch::PassThrough
            }
            HostEvent::Input { target } => {
                if self.binder.owns(doc, target, ListenerKind::Input) {
                    let echo = self.echo.take();
                    if echo.is_some() && echo == self.binder.active() {
                        tracing::debug!("skipping the notification of our own insert");
                    } else {
                        self.on_input(doc);
                    }
                }
                Dispatch::PassThrough
            }
            HostEvent::KeyDown { target, key } => {
                self.echo = None;
                if self.binder.owns(doc, target, ListenerKind::KeyDown) {
                    self.on_key_down(doc, key)
                } else {
                    Dispatch::PassThrough
                }
            }
            HostEvent::Click { target } => {
                self.on_click(doc, target);
                Dispatch::PassThrough
            }
            HostEvent::Resize => {
                self.close(doc);
                Dispatch::PassThrough
            }
            HostEvent::Scroll { target } => {
                let inside_panel = target.is_some_and(|t| self.overlay.contains(doc, t));
                if !inside_panel {
                    self.close(doc);
                }
                Dispatch::PassThrough
            }
            HostEvent::StoreChanged(change) => {
                self.on_store_change(doc, &change);
                Dispatch::PassThrough
            }
        }
    }

    /// Rebinds to a new element, dropping the overlay that belonged to the old one.
    pub fn bind(&mut self, doc: &mut Document, element: NodeId) {
        let outcome = self.binder.bind(doc, element);
        self.after_bind(doc, outcome);
    }

    fn observe(&mut self, doc: &mut Document) {
        let outcome = self.binder.observe(doc);
        self.after_bind(doc, outcome);
    }

    fn after_bind(&mut self, doc: &mut Document, outcome: BindOutcome) {
        match outcome {
            BindOutcome::Bound {
                previous: Some(_), ..
            }
            | BindOutcome::Unbound { .. } => self.overlay.remove(doc),
            BindOutcome::Bound { previous: None, .. } | BindOutcome::Unchanged => {}
        }
    }

    fn on_input(&mut self, doc: &mut Document) {
        let Some(element) = self.binder.active() else {
            return;
        };
        let read = {
            let doc: &Document = doc;
            Editor::detect(doc, element).and_then(|editor| editor.read_text(doc))
        };
        let text = match read {
            Ok(text) => text,
            Err(err) => {
                tracing::debug!(%err, "cannot read host input");
                self.close(doc);
                return;
            }
        };

        match detector::evaluate(&text, self.cache.trigger(), self.cache.snippets()) {
            Verdict::Open => {
                tracing::debug!(rows = self.cache.snippets().len(), "opening suggestions");
                self.overlay.open(doc, element, self.cache.snippets());
            }
            Verdict::Close => self.close(doc),
        }
    }

    fn on_key_down(&mut self, doc: &mut Document, key: Key) -> Dispatch {
        match navigator::navigate(&mut self.overlay, doc, key) {
            NavOutcome::PassThrough | NavOutcome::Dismissed => Dispatch::PassThrough,
            NavOutcome::Moved => Dispatch::DefaultPrevented,
            NavOutcome::Commit {
                index,
                append_newline,
            } => {
                self.commit(doc, index, append_newline);
                Dispatch::DefaultPrevented
            }
        }
    }

    fn on_click(&mut self, doc: &mut Document, target: Option<NodeId>) {
        if !self.overlay.is_visible() {
            return;
        }
        match target {
            Some(t) if self.overlay.contains(doc, t) => {
                if let Some(index) = self.overlay.row_at(doc, t) {
                    self.commit(doc, index, false);
                }
            }
            Some(t) if self.binder.active().is_some_and(|el| doc.contains(el, t)) => {}
            _ => self.close(doc),
        }
    }

    fn on_store_change(&mut self, doc: &mut Document, change: &StoreChange) {
        let update = self.cache.apply(change);
        tracing::debug!(
            snippets_changed = update.snippets_changed,
            trigger_changed = update.trigger_changed,
            trigger = %self.cache.trigger(),
            "snippet store changed"
        );
        if self.cache.snippets().is_empty() {
            self.close(doc);
        }
    }

    /// Inserts row `index` and closes the overlay, even when the insert fails.
    /// The overlay stays closed through the input notification the insert
    /// queues, whatever text it leaves behind.
    fn commit(&mut self, doc: &mut Document, index: usize, append_newline: bool) {
        let snippet = self.overlay.rows().get(index).cloned();
        if let (Some(element), Some(snippet)) = (self.binder.active(), snippet) {
            match insert::insert_snippet(
                doc,
                element,
                self.cache.trigger(),
                &snippet,
                append_newline,
            ) {
                Ok(_) => self.echo = Some(element),
                Err(err) => tracing::debug!(%err, "snippet insert skipped"),
            }
        }
        self.close(doc);
    }

    fn close(&mut self, doc: &mut Document) {
        self.overlay.hide(doc);
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
