use std::fmt;
use toml::Value;

pub const DEFAULT_TRIGGER: &str = "!!";

/// Ordered list of saved prompts. Display order is list order; duplicates allowed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SnippetSet(Vec<String>);

impl SnippetSet {
    #[must_use]
    pub fn new(snippets: Vec<String>) -> Self {
        Self(snippets)
    }

    /// Anything that is not an array becomes the empty set; non-string entries are skipped.
    #[must_use]
    pub fn from_raw(raw: Option<&Value>) -> Self {
        match raw {
            Some(Value::Array(items)) => Self(
                items
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect(),
            ),
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.0.clone()
    }
}

impl<S: Into<String>> FromIterator<S> for SnippetSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// The text the user types to summon the list. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerString(String);

impl TriggerString {
    /// Falls back to [`DEFAULT_TRIGGER`] for blank input.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        if raw.trim().is_empty() {
            Self::default()
        } else {
            Self(raw.to_string())
        }
    }

    #[must_use]
    pub fn from_raw(raw: Option<&Value>) -> Self {
        match raw {
            Some(Value::String(s)) => Self::new(s),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for TriggerString {
    fn default() -> Self {
        Self(DEFAULT_TRIGGER.to_string())
    }
}

impl fmt::Display for TriggerString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw values as the persistence collaborator holds them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreSnapshot {
    pub snippets: Option<Value>,
    pub trigger_symbol: Option<Value>,
}

/// A single key's new value; `None` means the key was removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueChange {
    pub new_value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct StoreChange {
    pub snippets: Option<ValueChange>,
    pub trigger_symbol: Option<ValueChange>,
}

impl StoreChange {
    pub fn is_empty(&self) -> bool {
        self.snippets.is_none() && self.trigger_symbol.is_none()
    }

    /// Keys whose values differ between two snapshots.
    #[must_use]
    pub fn between(before: &StoreSnapshot, after: &StoreSnapshot) -> Self {
        let diff = |a: &Option<Value>, b: &Option<Value>| {
            (a != b).then(|| ValueChange {
                new_value: b.clone(),
            })
        };
        Self {
            snippets: diff(&before.snippets, &after.snippets),
            trigger_symbol: diff(&before.trigger_symbol, &after.trigger_symbol),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trigger_defaults() {
        assert_eq!(TriggerString::new("").as_str(), "!!");
        assert_eq!(TriggerString::new("   ").as_str(), "!!");
        assert_eq!(TriggerString::from_raw(None).as_str(), "!!");
        assert_eq!(
            TriggerString::from_raw(Some(&Value::Integer(3))).as_str(),
            "!!"
        );
        assert_eq!(
            TriggerString::from_raw(Some(&Value::String(";;".into()))).as_str(),
            ";;"
        );
    }

    #[test]
    fn test_snippets_from_malformed_values() {
        assert!(SnippetSet::from_raw(None).is_empty());
        assert!(SnippetSet::from_raw(Some(&Value::String("nope".into()))).is_empty());

        let mixed = Value::Array(vec![
            Value::String("a".into()),
            Value::Integer(1),
            Value::String("a".into()),
        ]);
        let set = SnippetSet::from_raw(Some(&mixed));
        assert_eq!(set.to_vec(), vec!["a", "a"]);
    }

    #[test]
    fn test_change_between_snapshots_only_reports_differences() {
        let before = StoreSnapshot {
            snippets: Some(Value::Array(vec![Value::String("a".into())])),
            trigger_symbol: Some(Value::String("!!".into())),
        };
        let after = StoreSnapshot {
            snippets: before.snippets.clone(),
            trigger_symbol: None,
        };
        let change = StoreChange::between(&before, &after);
        assert!(change.snippets.is_none());
        assert_eq!(change.trigger_symbol, Some(ValueChange { new_value: None }));
        assert!(StoreChange::between(&after, &after).is_empty());
    }
}
