use crate::domain::snippets::{SnippetSet, StoreChange, StoreSnapshot, TriggerString};

/// In-memory copy of the saved prompts and the trigger.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SnippetCache {
    snippets: SnippetSet,
    trigger: TriggerString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheUpdate {
    pub snippets_changed: bool,
    pub trigger_changed: bool,
}

impl SnippetCache {
    #[must_use]
    pub fn new(snippets: SnippetSet, trigger: TriggerString) -> Self {
        Self { snippets, trigger }
    }

    #[must_use]
    pub fn from_snapshot(snapshot: &StoreSnapshot) -> Self {
        Self {
            snippets: SnippetSet::from_raw(snapshot.snippets.as_ref()),
            trigger: TriggerString::from_raw(snapshot.trigger_symbol.as_ref()),
        }
    }

    /// Replaces whichever values the change carries. The snippet list is swapped wholesale.
    pub fn apply(&mut self, change: &StoreChange) -> CacheUpdate {
        let mut update = CacheUpdate::default();
        if let Some(snippets) = &change.snippets {
            self.snippets = SnippetSet::from_raw(snippets.new_value.as_ref());
            update.snippets_changed = true;
        }
        if let Some(trigger) = &change.trigger_symbol {
            let next = TriggerString::from_raw(trigger.new_value.as_ref());
            update.trigger_changed = next != self.trigger;
            self.trigger = next;
        }
        update
    }

    pub fn snippets(&self) -> &SnippetSet {
        &self.snippets
    }

    pub fn trigger(&self) -> &TriggerString {
        &self.trigger
    }
}
