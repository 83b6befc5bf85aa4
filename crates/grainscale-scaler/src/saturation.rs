//! Saturation evaluation — the metric formula.
//!
//! The load signal is grains-per-silo with truncating integer
//! division. Zero on either side of the ratio short-circuits: an
//! empty or unknown cluster never reports load and never signals
//! "too many", whatever the bound.

use grainscale_cluster::SaturationSnapshot;

/// Grains per active silo, integer division. Zero if either count
/// is zero.
pub fn compute_metric(snapshot: &SaturationSnapshot) -> u64 {
    if snapshot.grain_count == 0 || snapshot.silo_count == 0 {
        return 0;
    }
    snapshot.grain_count / snapshot.silo_count
}

/// Whether the cluster holds at least `upper_bound` grains per active
/// silo. Always `false` on a zero count, even for `upper_bound == 0`.
pub fn is_over_threshold(snapshot: &SaturationSnapshot, upper_bound: u64) -> bool {
    if snapshot.grain_count == 0 || snapshot.silo_count == 0 {
        return false;
    }
    upper_bound <= snapshot.grain_count / snapshot.silo_count
}
