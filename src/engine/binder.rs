use crate::domain::dom::{Document, ListenerKind, NodeId};

pub const DEFAULT_HOST_INPUT_ID: &str = "prompt-textarea";

const LISTENERS: [ListenerKind; 2] = [ListenerKind::Input, ListenerKind::KeyDown];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateChange {
    Found(NodeId),
    Lost,
}

/// Turns raw mutation batches into "the host's input changed" notifications.
/// Only an actual change of node reference is reported.
#[derive(Debug, Clone)]
pub struct CandidateWatcher {
    host_input_id: String,
    last: Option<NodeId>,
}

impl CandidateWatcher {
    #[must_use]
    pub fn new(host_input_id: impl Into<String>) -> Self {
        Self {
            host_input_id: host_input_id.into(),
            last: None,
        }
    }

    /// Well-known host element first, then the first editable region or value field.
    pub fn resolve(&self, doc: &Document) -> Option<NodeId> {
        doc.get_element_by_id(&self.host_input_id).or_else(|| {
            doc.find_first(doc.body(), |doc, n| {
                doc.element(n).is_some_and(|el| el.content_editable) || doc.tag(n) == Some("textarea")
            })
        })
    }

    pub fn poll(&mut self, doc: &Document) -> Option<CandidateChange> {
        let current = self.resolve(doc);
        if current == self.last {
            return None;
        }
        self.last = current;
        Some(current.map_or(CandidateChange::Lost, CandidateChange::Found))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindOutcome {
    Unchanged,
    Bound {
        previous: Option<NodeId>,
        current: NodeId,
    },
    Unbound {
        previous: NodeId,
    },
}

/// Keeps listeners on exactly one element at a time.
#[derive(Debug, Clone)]
pub struct InputBinder {
    watcher: CandidateWatcher,
    active: Option<NodeId>,
}

impl InputBinder {
    #[must_use]
    pub fn new(host_input_id: impl Into<String>) -> Self {
        Self {
            watcher: CandidateWatcher::new(host_input_id),
            active: None,
        }
    }

    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Re-resolves the host input after a mutation batch (or at start-up).
    pub fn observe(&mut self, doc: &mut Document) -> BindOutcome {
        match self.watcher.poll(doc) {
            Some(CandidateChange::Found(element)) => self.bind(doc, element),
            Some(CandidateChange::Lost) | None => match self.active {
                Some(active) if !doc.is_connected(active) && self.watcher.resolve(doc).is_none() => {
                    self.unbind(doc)
                }
                _ => BindOutcome::Unchanged,
            },
        }
    }

    /// Moves the listeners to `element`. The old element is released before
    /// the new one is wired, within this call.
    pub fn bind(&mut self, doc: &mut Document, element: NodeId) -> BindOutcome {
        if self.active == Some(element) {
            return BindOutcome::Unchanged;
        }
        let previous = self.active.take();
        if let Some(old) = previous {
            for kind in LISTENERS {
                doc.remove_listener(old, kind);
            }
        }
        for kind in LISTENERS {
            doc.add_listener(element, kind);
        }
        self.active = Some(element);
        tracing::debug!(?previous, current = %element, "bound host input");
        BindOutcome::Bound {
            previous,
            current: element,
        }
    }

    pub fn unbind(&mut self, doc: &mut Document) -> BindOutcome {
        let Some(previous) = self.active.take() else {
            return BindOutcome::Unchanged;
        };
        for kind in LISTENERS {
            doc.remove_listener(previous, kind);
        }
        tracing::debug!(previous = %previous, "host input went away");
        BindOutcome::Unbound { previous }
    }

    /// True when `target` sits inside the bound element and the element listens for `kind`.
    pub fn owns(&self, doc: &Document, target: NodeId, kind: ListenerKind) -> bool {
        self.active.is_some() && doc.listening_ancestor(target, kind) == self.active
    }
}
