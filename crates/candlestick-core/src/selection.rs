// File: crates/candlestick-core/src/selection.rs
// Summary: Opaque selection identities and single-select state driving mark opacity.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};

/// Opacity of marks that are not part of an active selection.
pub const DIMMED_OPACITY: f32 = 0.3;

/// Host-facing identity of a data point (by category row) or a trend series (by measure).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SelectionId {
    Category { row: usize },
    Measure { query_name: String },
}

impl SelectionId {
    pub fn for_category(row: usize) -> Self {
        Self::Category { row }
    }

    pub fn for_measure(query_name: impl Into<String>) -> Self {
        Self::Measure { query_name: query_name.into() }
    }

    /// Selector object the host stores next to per-instance settings.
    pub fn selector(&self) -> Value {
        match self {
            Self::Category { row } => json!({ "data": [{ "row": row }] }),
            Self::Measure { query_name } => json!({ "metadata": query_name }),
        }
    }
}

impl fmt::Display for SelectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Category { row } => write!(f, "category:{row}"),
            Self::Measure { query_name } => write!(f, "measure:{query_name}"),
        }
    }
}

/// Single-selection set, mirroring what the host's selection manager reports back.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    selected: Vec<SelectionId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `id`, replacing any previous selection; selecting the current
    /// selection again clears it. Returns the ids selected afterwards.
    pub fn toggle(&mut self, id: &SelectionId) -> &[SelectionId] {
        if self.selected.len() == 1 && self.selected[0] == *id {
            self.selected.clear();
        } else {
            self.selected = vec![id.clone()];
        }
        &self.selected
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn ids(&self) -> &[SelectionId] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn contains(&self, id: &SelectionId) -> bool {
        self.selected.contains(id)
    }

    /// Opacity for a mark carrying `id`: full when nothing is selected or the mark is selected.
    pub fn opacity_for(&self, id: &SelectionId) -> f32 {
        if self.is_empty() || self.contains(id) { 1.0 } else { DIMMED_OPACITY }
    }
}
