//! Editor shape adapters.
//!
//! Host pages edit text in one of three structural ways. The shape is sniffed
//! from the element itself, never from the page's identity, and callers only
//! see `read_text` / `write_text`.

use crate::domain::dom::{is_void_tag, Caret, Document, NodeId};
use thiserror::Error;

const PARAGRAPH_TAG: &str = "p";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorShape {
    /// Block containers (`<p>`) inside an editable root; edits target the last one.
    RichParagraph,
    /// Native value-based field (`<textarea>`, `<input>`).
    PlainField,
    /// Any other element accepting text.
    GenericEditable,
}

impl EditorShape {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            EditorShape::RichParagraph => "rich paragraphs",
            EditorShape::PlainField => "plain field",
            EditorShape::GenericEditable => "generic editable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretPolicy {
    /// Caret after the written text.
    End,
    /// A fresh line follows the written text and the caret sits on it.
    NewLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InsertError {
    #[error("element {0} is no longer in the document")]
    Detached(NodeId),
    #[error("element {0} cannot hold text")]
    NotText(NodeId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Editor {
    element: NodeId,
    shape: EditorShape,
}

impl Editor {
    pub fn detect(doc: &Document, element: NodeId) -> Result<Self, InsertError> {
        if !doc.is_connected(element) {
            return Err(InsertError::Detached(element));
        }
        let tag = doc.tag(element).ok_or(InsertError::NotText(element))?;
        if is_void_tag(tag) {
            return Err(InsertError::NotText(element));
        }

        let shape = if !doc.query_all(element, PARAGRAPH_TAG).is_empty() {
            EditorShape::RichParagraph
        } else if doc.is_value_field(element) {
            EditorShape::PlainField
        } else {
            EditorShape::GenericEditable
        };
        Ok(Self { element, shape })
    }

    pub fn element(&self) -> NodeId {
        self.element
    }

    pub fn shape(&self) -> EditorShape {
        self.shape
    }

    fn last_paragraph(&self, doc: &Document) -> Result<NodeId, InsertError> {
        doc.query_all(self.element, PARAGRAPH_TAG)
            .last()
            .copied()
            .ok_or(InsertError::NotText(self.element))
    }

    /// Text the trigger is matched against.
    pub fn read_text(&self, doc: &Document) -> Result<String, InsertError> {
        match self.shape {
            EditorShape::RichParagraph => {
                let paragraph = self.last_paragraph(doc)?;
                Ok(doc.inner_text(paragraph))
            }
            EditorShape::PlainField => Ok(doc.value(self.element).unwrap_or_default().to_string()),
            EditorShape::GenericEditable => {
                let rendered = doc.inner_text(self.element);
                if rendered.is_empty() {
                    Ok(doc.text_content(self.element))
                } else {
                    Ok(rendered)
                }
            }
        }
    }

    /// Replaces the editable text, places the caret, then notifies the host
    /// page with a synthetic input event. The notification always comes last:
    /// hosts that mirror the DOM into their own model read it on that event.
    pub fn write_text(
        &self,
        doc: &mut Document,
        text: &str,
        caret: CaretPolicy,
    ) -> Result<(), InsertError> {
        match self.shape {
            EditorShape::RichParagraph => {
                let paragraph = self.last_paragraph(doc)?;
                doc.set_inner_text(paragraph, text);
                doc.focus(self.element);
                match caret {
                    CaretPolicy::NewLine => {
                        let next = doc.create_element(PARAGRAPH_TAG);
                        let br = doc.create_element("br");
                        doc.append_child(next, br);
                        if doc.insert_after(paragraph, next) {
                            doc.set_caret(Caret {
                                node: next,
                                offset: 0,
                            });
                        } else {
                            caret_at_end(doc, paragraph);
                        }
                    }
                    CaretPolicy::End => caret_at_end(doc, paragraph),
                }
            }
            EditorShape::PlainField => {
                let mut value = text.to_string();
                if caret == CaretPolicy::NewLine {
                    value.push('\n');
                }
                let len = value.chars().count();
                doc.set_value(self.element, &value);
                doc.focus(self.element);
                doc.set_caret(Caret {
                    node: self.element,
                    offset: len,
                });
            }
            EditorShape::GenericEditable => {
                let mut rendered = text.to_string();
                if caret == CaretPolicy::NewLine {
                    rendered.push('\n');
                }
                doc.set_inner_text(self.element, &rendered);
                doc.focus(self.element);
                caret_at_end(doc, self.element);
            }
        }

        doc.dispatch_input(self.element);
        Ok(())
    }
}

fn caret_at_end(doc: &mut Document, node: NodeId) {
    let offset = doc.children(node).len();
    doc.set_caret(Caret { node, offset });
}
