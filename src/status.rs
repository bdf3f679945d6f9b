//! Listing status normalization and display styling.
//!
//! Upstream feeds disagree on status vocabulary: RESO standard values
//! ("Active Under Contract"), TRREB short codes ("Sc", "Sld", "Lsd"), and
//! free-form display strings all show up in the same field slots. Every
//! consumer funnels through one small canonical enum before coloring,
//! filtering, or display.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::record::{self, RawPropertyRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NormalizedStatus {
    Active,
    UnderContract,
    Pending,
    Sold,
    Leasing,
    Unknown,
}

/// Maps a raw feed status to the canonical enum.
///
/// Matching is case-insensitive on the trimmed input; rules are checked in
/// order and the first match wins. Substring checks are deliberate — feeds
/// decorate statuses ("Active Under Contract - Showing").
pub fn normalize_status(raw: Option<&str>) -> NormalizedStatus {
    let status = raw.unwrap_or("").trim().to_lowercase();

    if status.is_empty() {
        NormalizedStatus::Unknown
    } else if status.contains("leasing") || status.contains("for rent") || status == "lsd" {
        NormalizedStatus::Leasing
    } else if status == "sld" || status == "sold" || status.contains("closed") {
        NormalizedStatus::Sold
    } else if status == "sc" || status.contains("pending") {
        NormalizedStatus::Pending
    } else if status.contains("under contract") || status.contains("active under") {
        NormalizedStatus::UnderContract
    } else if status == "a" || status.contains("active") {
        NormalizedStatus::Active
    } else {
        NormalizedStatus::Unknown
    }
}

/// Narrower normalizer used by the MLS-feed report path.
///
/// Independently evolved from [`normalize_status`]: it knows no lease
/// statuses or TRREB short codes, and anything unrecognized falls back to
/// `Active` instead of `Unknown`. The two are kept as separate named
/// variants until product decides which behavior is authoritative; do not
/// quietly merge them.
pub fn status_from_mls(raw: Option<&str>) -> NormalizedStatus {
    let status = raw.unwrap_or("").trim().to_lowercase();

    if status.contains("closed") || status.contains("sold") {
        NormalizedStatus::Sold
    } else if status.contains("pending") {
        NormalizedStatus::Pending
    } else if status.contains("under contract") {
        NormalizedStatus::UnderContract
    } else {
        NormalizedStatus::Active
    }
}

/// Canonical status of a record, read through the defensive field lookup.
pub fn record_status(record: &RawPropertyRecord) -> NormalizedStatus {
    normalize_status(record::raw_status(record))
}

/// Status as rendered on badges, map markers, and chart legends. `Subject`
/// is display-only emphasis for the CMA subject property; it never comes
/// from feed data and is never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayStatus {
    Listing(NormalizedStatus),
    Subject,
}

/// Badge label plus marker/badge hex color for one display status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusStyle {
    pub label: &'static str,
    pub color: &'static str,
}

const UNKNOWN_STYLE: StatusStyle = StatusStyle {
    label: "Unknown",
    color: "#6b7280",
};

static STATUS_STYLES: Lazy<HashMap<DisplayStatus, StatusStyle>> = Lazy::new(|| {
    use DisplayStatus::Listing;
    use NormalizedStatus::*;

    HashMap::from([
        (Listing(Active), StatusStyle { label: "Active", color: "#22c55e" }),
        (Listing(UnderContract), StatusStyle { label: "Under Contract", color: "#f59e0b" }),
        (Listing(Pending), StatusStyle { label: "Pending", color: "#f97316" }),
        (Listing(Sold), StatusStyle { label: "Sold", color: "#ef4444" }),
        (Listing(Leasing), StatusStyle { label: "Leasing", color: "#3b82f6" }),
        (Listing(Unknown), UNKNOWN_STYLE),
        (DisplayStatus::Subject, StatusStyle { label: "Subject", color: "#8b5cf6" }),
    ])
});

pub fn status_style(status: DisplayStatus) -> StatusStyle {
    STATUS_STYLES.get(&status).copied().unwrap_or(UNKNOWN_STYLE)
}
