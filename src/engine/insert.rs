use crate::domain::dom::{Document, NodeId};
use crate::domain::snippets::TriggerString;
use crate::engine::editor::{CaretPolicy, Editor, InsertError};

/// Removes one trailing literal occurrence of the trigger, ignoring
/// whitespace the editor may have appended after it. Text without the
/// trigger comes back untouched.
pub fn strip_trailing_trigger<'a>(text: &'a str, trigger: &TriggerString) -> &'a str {
    let trigger = trigger.as_str();
    if let Some(stripped) = text.strip_suffix(trigger) {
        return stripped;
    }
    let trimmed = text.trim_end();
    trimmed.strip_suffix(trigger).unwrap_or(text)
}

/// Replaces the trailing trigger in the bound element with `snippet`.
pub fn insert_snippet(
    doc: &mut Document,
    element: NodeId,
    trigger: &TriggerString,
    snippet: &str,
    append_newline: bool,
) -> Result<Editor, InsertError> {
    let editor = Editor::detect(doc, element)?;
    let current = editor.read_text(doc)?;
    let next = format!("{}{}", strip_trailing_trigger(&current, trigger), snippet);
    let caret = if append_newline {
        CaretPolicy::NewLine
    } else {
        CaretPolicy::End
    };
    editor.write_text(doc, &next, caret)?;
    tracing::debug!(
        element = %element,
        shape = editor.shape().label(),
        append_newline,
        "inserted snippet"
    );
    Ok(editor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};

    fn plain_field(doc: &mut Document, value: &str) -> NodeId {
        let field = doc.create_element("textarea");
        doc.set_value(field, value);
        let body = doc.body();
        doc.append_child(body, field);
        field
    }

    #[test]
    fn test_strip_only_one_trailing_occurrence() {
        let trigger = TriggerString::default();
        assert_eq!(strip_trailing_trigger("hello !!", &trigger), "hello ");
        assert_eq!(strip_trailing_trigger("hello !!!", &trigger), "hello !");
        assert_eq!(strip_trailing_trigger("!! hello", &trigger), "!! hello");
        assert_eq!(strip_trailing_trigger("hello !!\n", &trigger), "hello ");
    }

    #[test]
    fn test_strip_treats_metacharacters_literally() {
        let trigger = TriggerString::new(".*");
        assert_eq!(strip_trailing_trigger("abc.*", &trigger), "abc");
        assert_eq!(strip_trailing_trigger("abcx", &trigger), "abcx");
    }

    #[test]
    fn test_plain_field_round_trip() {
        let mut doc = Document::new();
        let field = plain_field(&mut doc, "hello !!");
        insert_snippet(&mut doc, field, &TriggerString::default(), "S", false).unwrap();
        assert_eq!(doc.value(field), Some("hello S"));
        assert_eq!(doc.take_dispatched(), vec![field]);
    }

    #[test]
    fn test_random_snippets_leave_no_trigger_behind() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(42);
        let trigger = TriggerString::default();
        for _ in 0..200 {
            let len = rng.gen_range(0..12);
            let snippet: String = (0..len)
                .map(|_| char::from(rng.gen_range(b'a'..=b'z')))
                .collect();
            let mut doc = Document::new();
            let field = plain_field(&mut doc, "hello !!");
            insert_snippet(&mut doc, field, &trigger, &snippet, false).unwrap();
            let value = doc.value(field).unwrap_or_default();
            assert_eq!(value, format!("hello {snippet}"));
            assert!(!value.contains("!!"));
        }
    }

    #[test]
    fn test_generic_editable_newline() {
        let mut doc = Document::new();
        let region = doc.create_element("div");
        doc.set_content_editable(region, true);
        doc.set_inner_text(region, "note;;");
        let body = doc.body();
        doc.append_child(body, region);

        insert_snippet(&mut doc, region, &TriggerString::new(";;"), "X", true).unwrap();

        assert_eq!(doc.text_content(region), "noteX");
        let last = *doc.children(region).last().unwrap();
        assert_eq!(doc.tag(last), Some("br"));
    }

    #[test]
    fn test_detached_element_is_rejected() {
        let mut doc = Document::new();
        let field = doc.create_element("textarea");
        let err = insert_snippet(&mut doc, field, &TriggerString::default(), "S", false);
        assert_eq!(err, Err(InsertError::Detached(field)));
        assert!(doc.take_dispatched().is_empty());
    }
}
