// File: crates/candlestick-core/src/domain.rs
// Summary: Value domain accumulation (running min/max, forced bounds) and finalization.

use serde::Serialize;

use crate::settings::YAxisSettings;

/// Finalized value domain. Always satisfies `start <= end`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    pub start: f64,
    pub end: f64,
    pub start_forced: bool,
    pub end_forced: bool,
}

impl Default for Domain {
    fn default() -> Self {
        Self { start: 0.0, end: 0.0, start_forced: false, end_forced: false }
    }
}

/// Running domain while rows are transformed. Forced bounds never move.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DomainBuilder {
    start: Option<f64>,
    end: Option<f64>,
    start_forced: bool,
    end_forced: bool,
}

impl DomainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_axis(axis: &YAxisSettings) -> Self {
        Self {
            start: axis.start,
            end: axis.end,
            start_forced: axis.start.is_some(),
            end_forced: axis.end.is_some(),
        }
    }

    /// Fold one open/close/high/low value into the unforced bounds.
    pub fn observe(&mut self, v: f64) {
        if !v.is_finite() {
            return;
        }
        if !self.start_forced {
            self.start = Some(self.start.map_or(v, |s| s.min(v)));
        }
        if !self.end_forced {
            self.end = Some(self.end.map_or(v, |e| e.max(v)));
        }
    }

    /// Resolve fallbacks: unset bounds become 0 and an inverted range is
    /// widened by raising `end` to `start`.
    pub fn finalize(self) -> Domain {
        let start = self.start.unwrap_or(0.0);
        let mut end = self.end.unwrap_or(0.0);
        if start > end {
            end = start;
        }
        Domain { start, end, start_forced: self.start_forced, end_forced: self.end_forced }
    }
}
