//! Viewport-dependent views over engine state.
//!
//! The layout class is a pure function of a width supplied by the client; the
//! engine never sees it.

use serde::Serialize;

use crate::history::HistoryEntry;

/// Entries shown on a narrow screen.
pub const MOBILE_HISTORY_LEN: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    Mobile,
    Tablet,
    Desktop,
}

impl Viewport {
    pub fn from_width(width: u32) -> Self {
        // ---
        match width {
            w if w < 768 => Viewport::Mobile,
            w if w < 1024 => Viewport::Tablet,
            _ => Viewport::Desktop,
        }
    }
}

/// Tail of `entries` to display for `viewport`, oldest first.
pub fn visible_history(entries: &[HistoryEntry], viewport: Viewport) -> &[HistoryEntry] {
    // ---
    match viewport {
        Viewport::Mobile => &entries[entries.len().saturating_sub(MOBILE_HISTORY_LEN)..],
        Viewport::Tablet | Viewport::Desktop => entries,
    }
}
