use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

/// Running distance sum. Renders as the integer `0` until a non-zero amount
/// is counted, then as a float.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Tally {
    sum: f64,
    counted: bool,
}

impl Tally {
    /// A computed quantity that always renders as a float.
    pub fn measured(value: f64) -> Self {
        Self {
            sum: value,
            counted: true,
        }
    }

    pub fn add(&mut self, amount: f64) {
        if amount != 0.0 {
            self.sum += amount;
            self.counted = true;
        }
    }

    pub fn value(&self) -> f64 {
        self.sum
    }
}

impl Serialize for Tally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.counted {
            serializer.serialize_f64(self.sum)
        } else {
            serializer.serialize_u64(0)
        }
    }
}

/// Trips sharing one `start_time` date prefix.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripChain {
    pub length: usize,
    pub total_distance: Tally,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminStats {
    pub total_trips: usize,
    pub total_distance: Tally,
    pub avg_distance: Tally,
    /// No user dimension exists; 1 whenever any trip is stored.
    pub total_users: usize,
    pub mode_stats: BTreeMap<String, usize>,
    pub purpose_stats: BTreeMap<String, usize>,
    pub trip_chains: Vec<TripChain>,
}
