//! Comparable statistics aggregation for CMA reports.

use serde::Serialize;

use crate::record::{self, RawPropertyRecord};

/// Mean / median / range summary for one metric across a comp set.
/// All-zero when the comp set holds no valid sample for the metric; callers
/// render that as "N/A".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricSummary {
    pub average: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

/// Aggregate statistics over a set of comparable properties.
///
/// Ephemeral by design: computed on demand for a report or dashboard view
/// and discarded after render, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Statistics {
    pub comp_count: usize,
    pub price: MetricSummary,
    pub price_per_sqft: MetricSummary,
    pub living_area: MetricSummary,
    pub days_on_market: MetricSummary,
    pub bedrooms: MetricSummary,
    pub bathrooms: MetricSummary,
}

/// Computes per-metric summaries over a comp set. Dirty or partial records
/// simply contribute to fewer metrics; this never fails.
pub fn compute_statistics(properties: &[RawPropertyRecord]) -> Statistics {
    Statistics {
        comp_count: properties.len(),
        price: summarize(collect(properties, record::price)),
        price_per_sqft: summarize(properties.iter().filter_map(price_per_sqft).collect()),
        living_area: summarize(collect(properties, record::living_area)),
        days_on_market: summarize(collect(properties, record::days_on_market)),
        bedrooms: summarize(collect(properties, record::bedrooms)),
        bathrooms: summarize(collect(properties, record::bathrooms)),
    }
}

/// Per-property price over living area, defined only when both are positive.
/// The ratio is derived per comp first, then aggregated like any other metric.
fn price_per_sqft(record: &RawPropertyRecord) -> Option<f64> {
    let price = record::price(record)?;
    let sqft = record::living_area(record)?;
    Some(price / sqft)
}

fn collect(
    properties: &[RawPropertyRecord],
    extract: fn(&RawPropertyRecord) -> Option<f64>,
) -> Vec<f64> {
    properties.iter().filter_map(extract).collect()
}

fn summarize(mut values: Vec<f64>) -> MetricSummary {
    if values.is_empty() {
        return MetricSummary::default();
    }

    // Extraction already rejected NaN/infinite values
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let sum: f64 = values.iter().sum();

    MetricSummary {
        average: sum / values.len() as f64,
        median: median_of_sorted(&values),
        min: values[0],
        max: values[values.len() - 1],
    }
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn comp(price: i64, sqft: i64) -> RawPropertyRecord {
        json!({ "listPrice": price, "livingArea": sqft })
    }

    #[test]
    fn empty_comp_set_yields_all_zero_summaries() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats.comp_count, 0);
        assert_eq!(stats.price, MetricSummary::default());
        assert_eq!(stats.price_per_sqft, MetricSummary::default());
    }

    #[test]
    fn mean_median_and_range_over_odd_count() {
        let comps = vec![comp(300000, 1500), comp(500000, 2500), comp(400000, 2000)];
        let stats = compute_statistics(&comps);

        assert_eq!(stats.price.average, 400000.0);
        assert_eq!(stats.price.median, 400000.0);
        assert_eq!(stats.price.min, 300000.0);
        assert_eq!(stats.price.max, 500000.0);
    }

    #[test]
    fn median_of_even_count_averages_the_two_middles() {
        let comps = vec![
            comp(200000, 1000),
            comp(300000, 1000),
            comp(500000, 1000),
            comp(800000, 1000),
        ];
        let stats = compute_statistics(&comps);
        assert_eq!(stats.price.median, 400000.0);
    }

    #[test]
    fn result_is_invariant_to_input_order() {
        let mut comps = vec![
            comp(550000, 2100),
            comp(310000, 1400),
            comp(725000, 2600),
            comp(480000, 1900),
        ];
        let forward = compute_statistics(&comps);
        comps.reverse();
        let backward = compute_statistics(&comps);
        assert_eq!(forward, backward);
    }

    #[test]
    fn missing_sqft_excluded_from_living_area_and_price_per_sqft() {
        let comps = vec![
            comp(300000, 1500),
            json!({ "listPrice": 900000 }),
            json!({ "listPrice": 600000, "livingArea": 0 }),
        ];
        let stats = compute_statistics(&comps);

        // Only the first comp carries a usable living area
        assert_eq!(stats.living_area.average, 1500.0);
        assert_eq!(stats.price_per_sqft.average, 200.0);
        // All three prices still aggregate
        assert_eq!(stats.price.average, 600000.0);
    }

    #[test]
    fn close_price_backs_up_list_price_in_the_aggregate() {
        let comps = vec![
            json!({ "listPrice": 300000, "livingArea": 1500 }),
            json!({ "listPrice": 500000, "livingArea": 2500 }),
            json!({ "closePrice": 400000, "livingArea": 2000 }),
        ];
        let stats = compute_statistics(&comps);

        assert_eq!(stats.comp_count, 3);
        assert_eq!(stats.price.average, 400000.0);
        assert_eq!(stats.price.median, 400000.0);
        assert_eq!(stats.price_per_sqft.average, 200.0);
        assert_eq!(stats.price_per_sqft.median, 200.0);
    }

    #[test]
    fn fractional_bathrooms_aggregate_as_is() {
        let comps = vec![
            json!({ "bathroomsTotal": 2.5 }),
            json!({ "bathroomsTotal": 3.5 }),
        ];
        let stats = compute_statistics(&comps);
        assert_eq!(stats.bathrooms.average, 3.0);
        assert_eq!(stats.bathrooms.median, 3.0);
        assert_eq!(stats.bathrooms.min, 2.5);
        assert_eq!(stats.bathrooms.max, 3.5);
    }
}
