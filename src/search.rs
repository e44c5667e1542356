//! All-pairs search for the smallest namesake/original distance ratio.
//!
//! Every ordered pair `(i, j)` with `i != j` is visited in index order, so
//! each unordered pair is seen twice. Only a strictly smaller ratio replaces
//! the current best, so the first ordering encountered wins ties. Pairs with
//! a zero distance on either side are not comparisons and are skipped.

use crate::distance::distance_km;
use crate::location::Coordinate;
use crate::record::ResolvedRecord;

/// The best pair found and its distances.
#[derive(Debug, Clone, PartialEq)]
pub struct MinimumRatio {
    pub ratio: f64,
    pub namesake_distance_km: f64,
    pub original_distance_km: f64,
    pub first: ResolvedRecord,
    pub second: ResolvedRecord,
}

impl MinimumRatio {
    /// How many times closer the namesakes are than their originals.
    pub fn inverse(&self) -> f64 {
        1.0 / self.ratio
    }
}

/// Geodesic search. `on_improve` sees each new running best.
pub fn find_minimum_ratio<F>(records: &[ResolvedRecord], on_improve: F) -> Option<MinimumRatio>
where
    F: FnMut(&MinimumRatio),
{
    find_minimum_ratio_by(records, distance_km, on_improve)
}

/// Search with an arbitrary distance function. Records missing either
/// coordinate are ignored.
pub fn find_minimum_ratio_by<D, F>(
    records: &[ResolvedRecord],
    distance: D,
    mut on_improve: F,
) -> Option<MinimumRatio>
where
    D: Fn(Coordinate, Coordinate) -> f64,
    F: FnMut(&MinimumRatio),
{
    let located: Vec<(&ResolvedRecord, Coordinate, Coordinate)> = records
        .iter()
        .filter_map(|r| r.coordinates().map(|(n, o)| (r, n, o)))
        .collect();

    let mut best: Option<MinimumRatio> = None;
    for (i, &(rec_i, namesake_i, original_i)) in located.iter().enumerate() {
        for (j, &(rec_j, namesake_j, original_j)) in located.iter().enumerate() {
            if i == j {
                continue;
            }

            let original_distance = distance(original_i, original_j);
            if original_distance == 0.0 {
                continue; // same original place listed twice
            }
            let namesake_distance = distance(namesake_i, namesake_j);
            if namesake_distance == 0.0 {
                continue;
            }

            let ratio = namesake_distance / original_distance;
            if !ratio.is_finite() {
                continue;
            }
            if best.as_ref().map_or(true, |b| ratio < b.ratio) {
                let candidate = MinimumRatio {
                    ratio,
                    namesake_distance_km: namesake_distance,
                    original_distance_km: original_distance,
                    first: rec_i.clone(),
                    second: rec_j.clone(),
                };
                on_improve(&candidate);
                best = Some(candidate);
            }
        }
    }
    best
}
