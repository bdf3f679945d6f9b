//! Smart search defaults derived from a CMA subject property.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::record::{self, RawPropertyRecord};

const PRICE_BAND: f64 = 0.20;
const SQFT_BAND: f64 = 0.25;
const LOT_BAND: f64 = 0.50;
const YEAR_BUILT_WINDOW: i32 = 10;
// Years at or below this are treated as placeholder/garbage data
const EARLIEST_PLAUSIBLE_YEAR: i32 = 1900;

/// Comp-search filter bounds pre-populated from a subject property.
///
/// Absent fields mean "no constraint". This object seeds the comp search
/// form once and is freely edited by the user afterward.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmartDefaults {
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_sqft: Option<f64>,
    pub max_sqft: Option<f64>,
    pub min_year_built: Option<i32>,
    pub max_year_built: Option<i32>,
    pub min_beds: Option<u32>,
    pub max_beds: Option<u32>,
    pub min_baths: Option<u32>,
    pub max_baths: Option<u32>,
    pub min_lot_acres: Option<f64>,
    pub max_lot_acres: Option<f64>,
}

/// Derives comp-search bounds from the subject. Fields the subject lacks
/// stay unconstrained; a missing subject constrains nothing at all.
pub fn compute_smart_defaults(subject: Option<&RawPropertyRecord>) -> SmartDefaults {
    let Some(subject) = subject else {
        return SmartDefaults::default();
    };

    let mut defaults = SmartDefaults::default();

    if let Some(price) = record::price(subject) {
        defaults.min_price = Some(price * (1.0 - PRICE_BAND));
        defaults.max_price = Some(price * (1.0 + PRICE_BAND));
    }

    if let Some(sqft) = record::living_area(subject) {
        defaults.min_sqft = Some(sqft * (1.0 - SQFT_BAND));
        defaults.max_sqft = Some(sqft * (1.0 + SQFT_BAND));
    }

    if let Some(year) = record::year_built(subject).filter(|y| *y > EARLIEST_PLAUSIBLE_YEAR) {
        defaults.min_year_built = Some(year - YEAR_BUILT_WINDOW);
        defaults.max_year_built = Some(Utc::now().year());
    }

    if let Some(beds) = record::bedrooms(subject).map(|b| b as u32) {
        defaults.min_beds = Some(beds.saturating_sub(1).max(1));
        defaults.max_beds = Some(beds + 1);
    }

    if let Some(baths) = record::bathrooms(subject) {
        defaults.min_baths = Some((baths - 1.0).floor().max(1.0) as u32);
        defaults.max_baths = Some((baths + 1.0).ceil() as u32);
    }

    if let Some(lot) = record::lot_acres(subject) {
        defaults.min_lot_acres = Some(round2(lot * (1.0 - LOT_BAND)));
        defaults.max_lot_acres = Some(round2(lot * (1.0 + LOT_BAND)));
    }

    defaults
}

/// True when the live filter state no longer matches the defaults derived
/// from the subject. Drives the "custom filters applied" indicator.
///
/// Only the bounds users actually tweak are compared: price, sqft, year
/// built, and beds. Comparison is exact; the form stores the same values
/// this module computed, so no tolerance is needed.
pub fn has_custom_filters(current: &SmartDefaults, subject: Option<&RawPropertyRecord>) -> bool {
    let defaults = compute_smart_defaults(subject);

    current.min_price != defaults.min_price
        || current.max_price != defaults.max_price
        || current.min_sqft != defaults.min_sqft
        || current.max_sqft != defaults.max_sqft
        || current.min_year_built != defaults.min_year_built
        || current.max_year_built != defaults.max_year_built
        || current.min_beds != defaults.min_beds
        || current.max_beds != defaults.max_beds
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn no_subject_means_no_constraints() {
        assert_eq!(compute_smart_defaults(None), SmartDefaults::default());
    }

    #[test]
    fn price_band_is_plus_minus_twenty_percent() {
        let subject = json!({ "listPrice": 500000 });
        let defaults = compute_smart_defaults(Some(&subject));

        assert_eq!(defaults.min_price, Some(400000.0));
        assert_eq!(defaults.max_price, Some(600000.0));
    }

    #[test]
    fn sqft_band_is_plus_minus_twenty_five_percent() {
        let subject = json!({ "livingArea": 2000 });
        let defaults = compute_smart_defaults(Some(&subject));

        assert_eq!(defaults.min_sqft, Some(1500.0));
        assert_eq!(defaults.max_sqft, Some(2500.0));
    }

    #[test]
    fn year_built_window_runs_to_current_year() {
        let subject = json!({ "yearBuilt": 1995 });
        let defaults = compute_smart_defaults(Some(&subject));

        assert_eq!(defaults.min_year_built, Some(1985));
        assert_eq!(defaults.max_year_built, Some(Utc::now().year()));
    }

    #[test]
    fn implausible_year_built_is_ignored() {
        let subject = json!({ "yearBuilt": 1900 });
        let defaults = compute_smart_defaults(Some(&subject));

        assert_eq!(defaults.min_year_built, None);
        assert_eq!(defaults.max_year_built, None);
    }

    #[test]
    fn bed_bounds_clamp_at_one() {
        let subject = json!({ "bedroomsTotal": 1 });
        let defaults = compute_smart_defaults(Some(&subject));

        assert_eq!(defaults.min_beds, Some(1));
        assert_eq!(defaults.max_beds, Some(2));
    }

    #[test]
    fn bath_bounds_round_outward_to_whole_baths() {
        let subject = json!({ "bathroomsTotal": 2.5 });
        let defaults = compute_smart_defaults(Some(&subject));

        // floor(1.5) clamped at 1, ceil(3.5)
        assert_eq!(defaults.min_baths, Some(1));
        assert_eq!(defaults.max_baths, Some(4));
    }

    #[test]
    fn lot_band_is_half_to_one_and_a_half_rounded() {
        let subject = json!({ "lotAcres": 1.0 });
        let defaults = compute_smart_defaults(Some(&subject));

        assert_eq!(defaults.min_lot_acres, Some(0.5));
        assert_eq!(defaults.max_lot_acres, Some(1.5));
    }

    #[test]
    fn untouched_filters_are_not_custom() {
        let subject = json!({ "listPrice": 500000, "livingArea": 2000, "bedroomsTotal": 3 });
        let current = compute_smart_defaults(Some(&subject));

        assert!(!has_custom_filters(&current, Some(&subject)));
    }

    #[test]
    fn edited_price_bound_flags_custom_filters() {
        let subject = json!({ "listPrice": 500000 });
        let mut current = compute_smart_defaults(Some(&subject));
        current.max_price = Some(650000.0);

        assert!(has_custom_filters(&current, Some(&subject)));
    }

    #[test]
    fn lot_edits_do_not_flag_custom_filters() {
        // Lot bounds are outside the compared key subset
        let subject = json!({ "lotAcres": 0.25 });
        let mut current = compute_smart_defaults(Some(&subject));
        current.max_lot_acres = Some(2.0);

        assert!(!has_custom_filters(&current, Some(&subject)));
    }
}
