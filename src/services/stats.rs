use std::collections::BTreeMap;

use crate::{
    error::AppError,
    models::{
        stats::{AdminStats, Tally, TripChain},
        trip::Trip,
    },
};

/// Counts, distance totals and per-day chains over the full trip listing.
///
/// Fails only when a stored distance is text that cannot be summed.
pub fn summarize(trips: &[Trip]) -> Result<AdminStats, AppError> {
    if trips.is_empty() {
        return Ok(AdminStats::default());
    }

    let total_trips = trips.len();
    let mut total_distance = Tally::default();
    let mut mode_stats = BTreeMap::new();
    let mut purpose_stats = BTreeMap::new();
    for trip in trips {
        total_distance.add(trip.distance_amount()?);
        *mode_stats.entry(trip.mode.key_text()).or_insert(0) += 1;
        *purpose_stats.entry(trip.purpose.key_text()).or_insert(0) += 1;
    }

    Ok(AdminStats {
        total_trips,
        total_distance,
        avg_distance: Tally::measured(total_distance.value() / total_trips as f64),
        total_users: 1,
        mode_stats,
        purpose_stats,
        trip_chains: chain_by_day(trips)?,
    })
}

/// One chain per distinct date prefix, in order of first appearance.
fn chain_by_day(trips: &[Trip]) -> Result<Vec<TripChain>, AppError> {
    let mut order: Vec<String> = Vec::new();
    let mut chains: BTreeMap<String, TripChain> = BTreeMap::new();

    for trip in trips {
        let day = trip.date_key();
        let chain = chains.entry(day.clone()).or_insert_with(|| {
            order.push(day);
            TripChain::default()
        });
        chain.length += 1;
        chain.total_distance.add(trip.distance_amount()?);
    }

    Ok(order
        .iter()
        .filter_map(|day| chains.remove(day))
        .collect())
}
