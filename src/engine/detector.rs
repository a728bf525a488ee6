use crate::domain::snippets::{SnippetSet, TriggerString};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Open,
    Close,
}

/// Literal suffix match, tolerant of trailing whitespace the editor adds on its own.
pub fn ends_with_trigger(text: &str, trigger: &TriggerString) -> bool {
    let trigger = trigger.as_str();
    text.ends_with(trigger) || text.trim_end().ends_with(trigger)
}

pub fn evaluate(text: &str, trigger: &TriggerString, snippets: &SnippetSet) -> Verdict {
    if !snippets.is_empty() && ends_with_trigger(text, trigger) {
        Verdict::Open
    } else {
        Verdict::Close
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn snippets() -> SnippetSet {
        ["A", "B"].into_iter().collect()
    }

    #[test]
    fn test_trigger_at_end_opens() {
        let trigger = TriggerString::default();
        assert_eq!(evaluate("test!!", &trigger, &snippets()), Verdict::Open);
        assert_eq!(evaluate("test!!\n", &trigger, &snippets()), Verdict::Open);
        assert_eq!(evaluate("test!! x", &trigger, &snippets()), Verdict::Close);
        assert_eq!(evaluate("test!", &trigger, &snippets()), Verdict::Close);
    }

    #[test]
    fn test_empty_snippets_never_open() {
        let trigger = TriggerString::default();
        assert_eq!(
            evaluate("test!!", &trigger, &SnippetSet::default()),
            Verdict::Close
        );
    }

    #[test]
    fn test_trigger_with_trailing_space_matches_literally() {
        let trigger = TriggerString::new("/ ");
        assert_eq!(evaluate("hi / ", &trigger, &snippets()), Verdict::Open);
    }

    #[test]
    fn test_random_triggers_match_only_as_suffix() {
        let alphabet: Vec<char> = "!.*+?^$()[]{}|\\/;:@#".chars().collect();
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let len = rng.gen_range(1..=5);
            let raw: String = (0..len)
                .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
                .collect();
            let trigger = TriggerString::new(&raw);

            let typed = format!("prefix {raw}");
            assert_eq!(evaluate(&typed, &trigger, &snippets()), Verdict::Open);

            let followed = format!("prefix {raw}z");
            assert_eq!(evaluate(&followed, &trigger, &snippets()), Verdict::Close);
        }
    }
}
