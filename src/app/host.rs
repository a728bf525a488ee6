//! Simulated chat page the engine is injected into.
//!
//! The page keeps its own model of the composer text, re-renders its input
//! element on demand and edits the composer the way a browser would when the
//! engine lets a key through.

use crate::domain::dom::{Document, NodeId, Rect as DomRect};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

const TRANSCRIPT: &[(&str, &str)] = &[
    ("user", "Can you help me tidy up this release note?"),
    (
        "assistant",
        "Sure. Paste the draft and tell me who the audience is.",
    ),
    ("user", "Engineers on the platform team."),
    (
        "assistant",
        "Got it. Short bullet points, technical tone, no marketing language.",
    ),
];

/// How the page renders its composer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HostShape {
    /// Contenteditable container with one `<p>` per line.
    #[default]
    Rich,
    /// Plain `<textarea>`.
    Plain,
    /// Contenteditable container holding bare text.
    Generic,
}

impl HostShape {
    #[must_use]
    pub fn next(self) -> Self {
        match self {
            HostShape::Rich => HostShape::Plain,
            HostShape::Plain => HostShape::Generic,
            HostShape::Generic => HostShape::Rich,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            HostShape::Rich => "paragraphs",
            HostShape::Plain => "textarea",
            HostShape::Generic => "editable",
        }
    }
}

#[derive(Debug, Clone)]
pub struct HostPage {
    pub document: Document,
    shape: HostShape,
    input_id: String,
    transcript: NodeId,
    composer: NodeId,
    input: NodeId,
    model: String,
    scroll: u16,
    renders: usize,
}

impl HostPage {
    #[must_use]
    pub fn new(shape: HostShape, input_id: &str) -> Self {
        let mut document = Document::new();
        let body = document.body();

        let main = document.create_element("main");
        document.append_child(body, main);

        let transcript = document.create_element("div");
        document.add_class(transcript, "transcript");
        document.append_child(main, transcript);
        for (role, text) in TRANSCRIPT {
            let message = document.create_element("div");
            document.add_class(message, "message");
            document.set_attribute(message, "data-role", role);
            document.set_inner_text(message, text);
            document.append_child(transcript, message);
        }

        let composer = document.create_element("form");
        document.append_child(main, composer);

        let input = build_input(&mut document, shape, input_id, "");
        document.append_child(composer, input);
        document.focus(input);

        Self {
            document,
            shape,
            input_id: input_id.to_string(),
            transcript,
            composer,
            input,
            model: String::new(),
            scroll: 0,
            renders: 1,
        }
    }

    pub fn shape(&self) -> HostShape {
        self.shape
    }

    pub fn input(&self) -> NodeId {
        self.input
    }

    /// Text the page believes is in its composer.
    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    pub fn renders(&self) -> usize {
        self.renders
    }

    /// Where key and input events originate: the caret's paragraph for the
    /// rich shape, the input element otherwise.
    pub fn event_target(&self) -> NodeId {
        match self.shape {
            HostShape::Rich => self.last_paragraph().unwrap_or(self.input),
            HostShape::Plain | HostShape::Generic => self.input,
        }
    }

    /// Reads the composer straight from the document.
    pub fn text(&self) -> String {
        match self.shape {
            HostShape::Plain => self.document.value(self.input).unwrap_or_default().to_string(),
            HostShape::Rich | HostShape::Generic => self.document.inner_text(self.input),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        let text = self.text();
        if text.is_empty() {
            return vec![String::new()];
        }
        text.split('\n').map(str::to_string).collect()
    }

    pub fn sync_model(&mut self) {
        self.model = self.text();
    }

    /// Replaces the input element with a fresh node carrying the same text.
    pub fn rerender(&mut self) {
        let text = self.text();
        let replacement = build_input(&mut self.document, self.shape, &self.input_id, &text);
        let rect = self.document.rect(self.input);
        if self.document.replace_with(self.input, replacement) {
            self.document.set_rect(replacement, rect);
            self.document.focus(replacement);
            self.input = replacement;
            self.renders += 1;
            tracing::debug!(input = %replacement, "host re-rendered its composer");
        }
    }

    pub fn cycle_shape(&mut self) {
        self.shape = self.shape.next();
        self.rerender();
    }

    /// Default handling of a key that reached the page. Returns whether the
    /// composer text changed.
    pub fn apply_key(&mut self, key: &KeyEvent) -> bool {
        if key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
        {
            return false;
        }
        let changed = match key.code {
            KeyCode::Char(c) => {
                self.push_char(c);
                true
            }
            KeyCode::Enter => {
                self.push_newline();
                true
            }
            KeyCode::Backspace => self.pop_char(),
            _ => false,
        };
        if changed {
            self.sync_model();
        }
        changed
    }

    pub fn scroll_by(&mut self, delta: i16) {
        self.scroll = self.scroll.saturating_add_signed(delta);
    }

    /// Mirrors the terminal layout into element boxes so the engine can
    /// place its panel and hit tests land on the right nodes.
    pub fn layout(&mut self, area: Rect, transcript: Rect, composer: Rect) {
        let doc = &mut self.document;
        doc.set_viewport(to_dom(area));
        let body = doc.body();
        doc.set_rect(body, Some(to_dom(area)));
        doc.set_rect(self.transcript, Some(to_dom(transcript)));
        doc.set_rect(self.composer, Some(to_dom(composer)));
        doc.set_rect(self.input, Some(to_dom(composer)));
    }

    pub fn transcript(&self) -> Vec<(String, String)> {
        self.document
            .children(self.transcript)
            .iter()
            .map(|&message| {
                let role = self
                    .document
                    .attribute(message, "data-role")
                    .unwrap_or_default()
                    .to_string();
                (role, self.document.inner_text(message))
            })
            .collect()
    }

    fn last_paragraph(&self) -> Option<NodeId> {
        self.document.query_all(self.input, "p").last().copied()
    }

    fn push_char(&mut self, c: char) {
        match self.shape {
            HostShape::Plain => {
                let mut value = self.text();
                value.push(c);
                self.document.set_value(self.input, &value);
            }
            HostShape::Rich => {
                let paragraph = self.ensure_paragraph();
                let mut text = self.document.inner_text(paragraph);
                text.push(c);
                self.document.set_inner_text(paragraph, &text);
            }
            HostShape::Generic => {
                let mut text = self.document.inner_text(self.input);
                text.push(c);
                self.document.set_inner_text(self.input, &text);
            }
        }
    }

    fn push_newline(&mut self) {
        match self.shape {
            HostShape::Plain => {
                let mut value = self.text();
                value.push('\n');
                self.document.set_value(self.input, &value);
            }
            HostShape::Rich => {
                let paragraph = self.ensure_paragraph();
                let next = empty_paragraph(&mut self.document);
                self.document.insert_after(paragraph, next);
            }
            HostShape::Generic => {
                let mut text = self.document.inner_text(self.input);
                text.push('\n');
                self.document.set_inner_text(self.input, &text);
            }
        }
    }

    fn pop_char(&mut self) -> bool {
        match self.shape {
            HostShape::Plain => {
                let mut value = self.text();
                let popped = value.pop().is_some();
                self.document.set_value(self.input, &value);
                popped
            }
            HostShape::Rich => {
                let paragraphs = self.document.query_all(self.input, "p");
                let Some(&last) = paragraphs.last() else {
                    return false;
                };
                let mut text = self.document.inner_text(last);
                if text.pop().is_some() {
                    self.document.set_inner_text(last, &text);
                    if text.is_empty() {
                        placeholder(&mut self.document, last);
                    }
                    true
                } else if paragraphs.len() > 1 {
                    self.document.remove(last);
                    true
                } else {
                    false
                }
            }
            HostShape::Generic => {
                let mut text = self.document.inner_text(self.input);
                let popped = text.pop().is_some();
                self.document.set_inner_text(self.input, &text);
                popped
            }
        }
    }

    fn ensure_paragraph(&mut self) -> NodeId {
        if let Some(paragraph) = self.last_paragraph() {
            return paragraph;
        }
        let paragraph = empty_paragraph(&mut self.document);
        self.document.append_child(self.input, paragraph);
        paragraph
    }
}

fn build_input(doc: &mut Document, shape: HostShape, id: &str, text: &str) -> NodeId {
    match shape {
        HostShape::Rich => {
            let input = doc.create_element("div");
            doc.set_id(input, id);
            doc.set_content_editable(input, true);
            let lines: Vec<&str> = if text.is_empty() {
                vec![""]
            } else {
                text.split('\n').collect()
            };
            for line in lines {
                let paragraph = empty_paragraph(doc);
                if !line.is_empty() {
                    doc.set_inner_text(paragraph, line);
                }
                doc.append_child(input, paragraph);
            }
            input
        }
        HostShape::Plain => {
            let input = doc.create_element("textarea");
            doc.set_id(input, id);
            doc.set_value(input, text);
            input
        }
        HostShape::Generic => {
            let input = doc.create_element("div");
            doc.set_id(input, id);
            doc.set_content_editable(input, true);
            doc.set_inner_text(input, text);
            input
        }
    }
}

fn empty_paragraph(doc: &mut Document) -> NodeId {
    let paragraph = doc.create_element("p");
    placeholder(doc, paragraph);
    paragraph
}

fn placeholder(doc: &mut Document, paragraph: NodeId) {
    let br = doc.create_element("br");
    doc.append_child(paragraph, br);
}

fn to_dom(rect: Rect) -> DomRect {
    DomRect::new(
        f64::from(rect.x),
        f64::from(rect.y),
        f64::from(rect.width),
        f64::from(rect.height),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_str(page: &mut HostPage, text: &str) {
        for c in text.chars() {
            page.apply_key(&key(KeyCode::Char(c)));
        }
    }

    #[test]
    fn test_typing_in_every_shape() {
        for shape in [HostShape::Rich, HostShape::Plain, HostShape::Generic] {
            let mut page = HostPage::new(shape, "prompt-textarea");
            type_str(&mut page, "hi");
            page.apply_key(&key(KeyCode::Enter));
            type_str(&mut page, "there");
            assert_eq!(page.text(), "hi\nthere", "{shape:?}");
            assert_eq!(page.model(), "hi\nthere", "{shape:?}");
        }
    }

    #[test]
    fn test_rich_backspace_joins_paragraphs() {
        let mut page = HostPage::new(HostShape::Rich, "prompt-textarea");
        type_str(&mut page, "a");
        page.apply_key(&key(KeyCode::Enter));
        assert_eq!(page.document.query_all(page.input(), "p").len(), 2);

        assert!(page.apply_key(&key(KeyCode::Backspace)));
        assert_eq!(page.document.query_all(page.input(), "p").len(), 1);
        assert!(page.apply_key(&key(KeyCode::Backspace)));
        assert_eq!(page.text(), "");
        assert!(!page.apply_key(&key(KeyCode::Backspace)));
    }

    #[test]
    fn test_rerender_replaces_node_and_keeps_text() {
        let mut page = HostPage::new(HostShape::Rich, "prompt-textarea");
        type_str(&mut page, "draft");
        let before = page.input();

        page.rerender();
        assert_ne!(page.input(), before);
        assert!(!page.document.is_connected(before));
        assert_eq!(page.document.get_element_by_id("prompt-textarea"), Some(page.input()));
        assert_eq!(page.text(), "draft");
        assert_eq!(page.renders(), 2);
    }

    #[test]
    fn test_cycle_shape_switches_element_kind() {
        let mut page = HostPage::new(HostShape::Rich, "prompt-textarea");
        type_str(&mut page, "x");
        page.cycle_shape();
        assert_eq!(page.shape(), HostShape::Plain);
        assert_eq!(page.document.tag(page.input()), Some("textarea"));
        assert_eq!(page.text(), "x");
        page.cycle_shape();
        assert_eq!(page.shape(), HostShape::Generic);
        assert!(page.document.is_editable(page.input()));
        assert_eq!(page.text(), "x");
    }

    #[test]
    fn test_ctrl_keys_do_not_edit() {
        let mut page = HostPage::new(HostShape::Plain, "prompt-textarea");
        assert!(!page.apply_key(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::CONTROL)));
        assert_eq!(page.text(), "");
    }

    #[test]
    fn test_layout_feeds_hit_testing() {
        let mut page = HostPage::new(HostShape::Plain, "prompt-textarea");
        page.layout(
            Rect::new(0, 0, 80, 24),
            Rect::new(0, 1, 80, 17),
            Rect::new(0, 18, 80, 5),
        );
        assert_eq!(page.document.hit_test(5.0, 20.0), Some(page.input()));
        assert_eq!(page.transcript().len(), TRANSCRIPT.len());
    }
}
