//! Floating suggestion panel.
//!
//! The panel is a single node appended to the document body, created on the
//! first open and reused afterwards. Positioning is viewport-relative: the
//! panel is centered on the bound element and sits above it unless there is
//! not enough room, in which case it drops below.

use crate::domain::dom::{Document, NodeId, Rect};
use crate::domain::snippets::SnippetSet;
use serde::{Deserialize, Serialize};

pub const PANEL_ID: &str = "prompt-helper-panel";
pub const ROW_CLASS: &str = "suggestion-item";
pub const SELECTED_CLASS: &str = "selected";
pub const HINT_CLASS: &str = "tab-hint";
pub const HIDDEN_CLASS: &str = "hidden";
pub const DEFAULT_COMMIT_HINT: &str = "Tab to insert";

/// Panel geometry, in whatever unit the host measures in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelMetrics {
    pub min_width: f64,
    pub max_width: f64,
    /// Share of the bound element's width the panel takes before clamping.
    pub width_ratio: f64,
    pub row_height: f64,
    /// Vertical padding and borders around the rows.
    pub chrome: f64,
    /// Gap between the panel and the bound element.
    pub margin: f64,
    pub max_height: f64,
}

impl Default for PanelMetrics {
    fn default() -> Self {
        Self {
            min_width: 280.0,
            max_width: 800.0,
            width_ratio: 0.6,
            row_height: 36.0,
            chrome: 16.0,
            margin: 8.0,
            max_height: 220.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub rect: Rect,
    pub side: Side,
}

pub fn place(anchor: Rect, viewport: Rect, row_count: usize, metrics: &PanelMetrics) -> Placement {
    let width = (anchor.width * metrics.width_ratio)
        .max(metrics.min_width)
        .min(metrics.max_width)
        .min(viewport.width);
    let height = (row_count as f64 * metrics.row_height + metrics.chrome).min(metrics.max_height);

    let centered = anchor.left() + (anchor.width - width) / 2.0;
    let left = centered
        .min(viewport.right() - width)
        .max(viewport.left());

    let room_above = anchor.top() - viewport.top();
    let (top, side) = if height + metrics.margin <= room_above {
        (anchor.top() - metrics.margin - height, Side::Above)
    } else {
        (anchor.bottom() + metrics.margin, Side::Below)
    };

    Placement {
        rect: Rect::new(left, top, width, height),
        side,
    }
}

#[derive(Debug, Clone)]
pub struct SuggestionOverlay {
    metrics: PanelMetrics,
    hint: String,
    panel: Option<NodeId>,
    anchor: Option<NodeId>,
    rows: Vec<String>,
    row_nodes: Vec<NodeId>,
    selected: Option<usize>,
    visible: bool,
    placement: Option<Placement>,
    scroll_top: usize,
}

impl SuggestionOverlay {
    #[must_use]
    pub fn new(metrics: PanelMetrics, hint: impl Into<String>) -> Self {
        Self {
            metrics,
            hint: hint.into(),
            panel: None,
            anchor: None,
            rows: Vec::new(),
            row_nodes: Vec::new(),
            selected: None,
            visible: false,
            placement: None,
            scroll_top: 0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// `None` when no row is highlighted.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement.filter(|_| self.visible)
    }

    pub fn scroll_top(&self) -> usize {
        self.scroll_top
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    pub fn panel(&self) -> Option<NodeId> {
        self.panel
    }

    pub fn anchor(&self) -> Option<NodeId> {
        self.anchor
    }

    /// How many rows fit inside the panel at once.
    pub fn visible_row_count(&self) -> usize {
        let Some(placement) = self.placement else {
            return 0;
        };
        let usable = (placement.rect.height - self.metrics.chrome).max(0.0);
        let fit = if self.metrics.row_height > 0.0 {
            (usable / self.metrics.row_height).floor() as usize
        } else {
            self.rows.len()
        };
        fit.max(1).min(self.rows.len())
    }

    /// Rebuilds the rows from `snippets` and shows the panel with nothing highlighted.
    pub fn open(&mut self, doc: &mut Document, anchor: NodeId, snippets: &SnippetSet) {
        if snippets.is_empty() {
            self.hide(doc);
            return;
        }

        let panel = self.ensure_panel(doc);
        let stale: Vec<NodeId> = doc.children(panel).to_vec();
        for node in stale {
            doc.remove(node);
        }

        self.rows = snippets.to_vec();
        self.row_nodes = self
            .rows
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let row = doc.create_element("div");
                doc.add_class(row, ROW_CLASS);
                doc.set_attribute(row, "data-index", &index.to_string());
                let label = doc.create_text(text);
                doc.append_child(row, label);
                doc.append_child(panel, row);
                row
            })
            .collect();

        doc.remove_class(panel, HIDDEN_CLASS);
        self.anchor = Some(anchor);
        self.selected = None;
        self.scroll_top = 0;
        self.visible = true;
        self.layout(doc);
    }

    /// Hides the panel and clears the highlight. Safe to call repeatedly.
    pub fn hide(&mut self, doc: &mut Document) {
        if let Some(panel) = self.panel {
            doc.add_class(panel, HIDDEN_CLASS);
            doc.set_rect(panel, None);
            for &row in &self.row_nodes {
                doc.set_rect(row, None);
            }
        }
        self.visible = false;
        self.selected = None;
        self.scroll_top = 0;
    }

    /// Tears the panel node out of the document; the next open recreates it.
    pub fn remove(&mut self, doc: &mut Document) {
        self.hide(doc);
        if let Some(panel) = self.panel.take() {
            doc.remove(panel);
        }
        self.rows.clear();
        self.row_nodes.clear();
        self.anchor = None;
        self.placement = None;
    }

    pub fn select_next(&mut self, doc: &mut Document) {
        let n = self.rows.len();
        if n == 0 {
            return;
        }
        self.selected = Some(self.selected.map_or(0, |i| (i + 1) % n));
        self.refresh_selection(doc);
    }

    pub fn select_prev(&mut self, doc: &mut Document) {
        let n = self.rows.len();
        if n == 0 {
            return;
        }
        self.selected = Some(self.selected.map_or(n - 1, |i| (i + n - 1) % n));
        self.refresh_selection(doc);
    }

    /// True when `node` is the panel or inside it.
    pub fn contains(&self, doc: &Document, node: NodeId) -> bool {
        self.panel.is_some_and(|panel| doc.contains(panel, node))
    }

    /// Row index for a node inside one of the rows.
    pub fn row_at(&self, doc: &Document, node: NodeId) -> Option<usize> {
        self.row_nodes
            .iter()
            .position(|&row| doc.contains(row, node))
    }

    fn ensure_panel(&mut self, doc: &mut Document) -> NodeId {
        if let Some(panel) = self.panel.filter(|&p| doc.is_connected(p)) {
            return panel;
        }
        let panel = doc.create_element("div");
        doc.set_id(panel, PANEL_ID);
        doc.add_class(panel, HIDDEN_CLASS);
        let body = doc.body();
        doc.append_child(body, panel);
        self.panel = Some(panel);
        panel
    }

    /// Moves the highlight marker and the commit hint to the selected row.
    fn refresh_selection(&mut self, doc: &mut Document) {
        for (index, &row) in self.row_nodes.iter().enumerate() {
            let is_selected = self.selected == Some(index);
            doc.toggle_class(row, SELECTED_CLASS, is_selected);

            let hints: Vec<NodeId> = doc
                .children(row)
                .iter()
                .copied()
                .filter(|&c| doc.has_class(c, HINT_CLASS))
                .collect();
            for hint in hints {
                doc.remove(hint);
            }

            if is_selected {
                let span = doc.create_element("span");
                doc.add_class(span, HINT_CLASS);
                let text = doc.create_text(&self.hint);
                doc.append_child(span, text);
                doc.append_child(row, span);
            }
        }
        self.scroll_selected_into_view();
        self.layout(doc);
    }

    /// Nearest-edge scrolling: move the window only as far as needed.
    fn scroll_selected_into_view(&mut self) {
        let Some(selected) = self.selected else {
            return;
        };
        let window = self.visible_row_count().max(1);
        if selected < self.scroll_top {
            self.scroll_top = selected;
        } else if selected >= self.scroll_top + window {
            self.scroll_top = selected + 1 - window;
        }
    }

    fn layout(&mut self, doc: &mut Document) {
        let (Some(panel), Some(anchor)) = (self.panel, self.anchor) else {
            return;
        };
        if !self.visible {
            return;
        }
        let anchor_rect = doc.rect(anchor).unwrap_or_default();
        let placement = place(
            anchor_rect,
            doc.viewport(),
            self.rows.len(),
            &self.metrics,
        );
        self.placement = Some(placement);
        doc.set_rect(panel, Some(placement.rect));

        let window = self.visible_row_count();
        let first_row_y = placement.rect.y + self.metrics.chrome / 2.0;
        for (index, &row) in self.row_nodes.iter().enumerate() {
            let rect = (index >= self.scroll_top && index < self.scroll_top + window).then(|| {
                Rect::new(
                    placement.rect.x,
                    first_row_y + (index - self.scroll_top) as f64 * self.metrics.row_height,
                    placement.rect.width,
                    self.metrics.row_height,
                )
            });
            doc.set_rect(row, rect);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchored(doc: &mut Document, rect: Rect) -> NodeId {
        let el = doc.create_element("div");
        doc.set_content_editable(el, true);
        doc.set_rect(el, Some(rect));
        let body = doc.body();
        doc.append_child(body, el);
        el
    }

    #[test]
    fn test_place_prefers_above() {
        let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);
        let anchor = Rect::new(240.0, 600.0, 800.0, 60.0);
        let placement = place(anchor, viewport, 2, &PanelMetrics::default());
        assert_eq!(placement.side, Side::Above);
        assert_eq!(placement.rect.width, 480.0);
        assert_eq!(placement.rect.height, 88.0);
        assert_eq!(placement.rect.bottom(), 592.0);
        assert_eq!(placement.rect.x, 400.0);
    }

    #[test]
    fn test_place_falls_below_without_room() {
        let viewport = Rect::new(0.0, 0.0, 1280.0, 800.0);
        let anchor = Rect::new(0.0, 50.0, 300.0, 40.0);
        let placement = place(anchor, viewport, 10, &PanelMetrics::default());
        assert_eq!(placement.side, Side::Below);
        assert_eq!(placement.rect.y, 98.0);
        assert_eq!(placement.rect.height, 220.0);
        assert_eq!(placement.rect.width, 280.0);
        assert_eq!(placement.rect.x, 10.0);
    }

    #[test]
    fn test_open_builds_rows_and_resets_selection() {
        let mut doc = Document::new();
        let anchor = anchored(&mut doc, Rect::new(100.0, 500.0, 600.0, 50.0));
        let mut overlay = SuggestionOverlay::new(PanelMetrics::default(), "hint");
        let snippets: SnippetSet = ["A", "B"].into_iter().collect();

        overlay.open(&mut doc, anchor, &snippets);
        overlay.select_next(&mut doc);
        assert_eq!(overlay.selected_index(), Some(0));

        overlay.open(&mut doc, anchor, &snippets);
        assert!(overlay.is_visible());
        assert_eq!(overlay.selected_index(), None);
        assert_eq!(overlay.rows(), ["A", "B"]);

        let panel = overlay.panel().unwrap();
        assert_eq!(doc.get_element_by_id(PANEL_ID), Some(panel));
        assert_eq!(doc.children(panel).len(), 2);
        assert!(!doc.has_class(panel, HIDDEN_CLASS));
    }

    #[test]
    fn test_hint_follows_selection() {
        let mut doc = Document::new();
        let anchor = anchored(&mut doc, Rect::new(100.0, 500.0, 600.0, 50.0));
        let mut overlay = SuggestionOverlay::new(PanelMetrics::default(), "Tab");
        let snippets: SnippetSet = ["A", "B", "C"].into_iter().collect();
        overlay.open(&mut doc, anchor, &snippets);
        let panel = overlay.panel().unwrap();

        overlay.select_prev(&mut doc);
        assert_eq!(overlay.selected_index(), Some(2));
        overlay.select_next(&mut doc);
        assert_eq!(overlay.selected_index(), Some(0));

        let rows = doc.children(panel).to_vec();
        assert!(doc.has_class(rows[0], SELECTED_CLASS));
        assert!(!doc.has_class(rows[2], SELECTED_CLASS));
        let hints: usize = rows
            .iter()
            .map(|&r| {
                doc.children(r)
                    .iter()
                    .filter(|&&c| doc.has_class(c, HINT_CLASS))
                    .count()
            })
            .sum();
        assert_eq!(hints, 1);
        assert_eq!(doc.text_content(rows[0]), "ATab");
    }

    #[test]
    fn test_hide_is_idempotent() {
        let mut doc = Document::new();
        let anchor = anchored(&mut doc, Rect::new(100.0, 500.0, 600.0, 50.0));
        let mut overlay = SuggestionOverlay::new(PanelMetrics::default(), "Tab");
        overlay.hide(&mut doc);
        assert!(!overlay.is_visible());

        let snippets: SnippetSet = ["A"].into_iter().collect();
        overlay.open(&mut doc, anchor, &snippets);
        overlay.select_next(&mut doc);
        overlay.hide(&mut doc);
        overlay.hide(&mut doc);
        assert!(!overlay.is_visible());
        assert_eq!(overlay.selected_index(), None);
        assert_eq!(overlay.placement(), None);
        assert!(doc.has_class(overlay.panel().unwrap(), HIDDEN_CLASS));
    }

    #[test]
    fn test_long_lists_scroll_to_keep_selection_visible() {
        let mut doc = Document::new();
        let anchor = anchored(&mut doc, Rect::new(100.0, 700.0, 600.0, 50.0));
        let mut overlay = SuggestionOverlay::new(PanelMetrics::default(), "Tab");
        let snippets: SnippetSet = (0..10).map(|i| format!("row {i}")).collect();
        overlay.open(&mut doc, anchor, &snippets);

        // (220 - 16) / 36 rows fit.
        assert_eq!(overlay.visible_row_count(), 5);
        for _ in 0..7 {
            overlay.select_next(&mut doc);
        }
        assert_eq!(overlay.selected_index(), Some(6));
        assert_eq!(overlay.scroll_top(), 2);

        overlay.select_prev(&mut doc);
        overlay.select_prev(&mut doc);
        overlay.select_prev(&mut doc);
        overlay.select_prev(&mut doc);
        overlay.select_prev(&mut doc);
        assert_eq!(overlay.selected_index(), Some(1));
        assert_eq!(overlay.scroll_top(), 1);
    }

    #[test]
    fn test_remove_detaches_panel() {
        let mut doc = Document::new();
        let anchor = anchored(&mut doc, Rect::new(100.0, 500.0, 600.0, 50.0));
        let mut overlay = SuggestionOverlay::new(PanelMetrics::default(), "Tab");
        let snippets: SnippetSet = ["A"].into_iter().collect();
        overlay.open(&mut doc, anchor, &snippets);
        let panel = overlay.panel().unwrap();

        overlay.remove(&mut doc);
        assert!(!doc.is_connected(panel));
        assert_eq!(overlay.panel(), None);

        overlay.open(&mut doc, anchor, &snippets);
        assert_ne!(overlay.panel(), Some(panel));
    }
}
