use log::{debug, warn};

use super::regression::PowerLawFit;
use crate::domain::Record;

/// Fills missing heat inside one source group from a power-law fit of heat on rank
pub struct HeatImputer {
    min_fit_points: usize,
}

/// Known-heat bounds for one record: `upper` is the smallest known heat at a
/// better rank, `lower` the largest known heat at a worse rank.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct RankBounds {
    upper: Option<i64>,
    lower: Option<i64>,
}

impl HeatImputer {
    pub fn new(min_fit_points: usize) -> Self {
        Self { min_fit_points }
    }

    /// Impute one (date, time, source) group.
    ///
    /// Records whose heat cannot be estimated (too few known points) are
    /// removed from the returned group.
    pub fn impute(&self, mut group: Vec<Record>) -> Vec<Record> {
        if group.iter().all(|r| r.heat.is_some()) {
            return group;
        }

        let known: Vec<(u32, i64)> = group
            .iter()
            .filter_map(|r| r.heat.map(|heat| (r.rank, heat)))
            .collect();

        match PowerLawFit::fit(&known, self.min_fit_points) {
            Some(fit) => {
                debug!("Fitted ln(heat+1) = {:.3} + {:.3} ln(rank+1)", fit.intercept, fit.slope);
                fill_missing(&mut group, &fit);
            }
            None => {
                warn!("Cannot fit heat model on {} known points", known.len());
            }
        }

        drop_missing(group)
    }
}

fn fill_missing(group: &mut [Record], fit: &PowerLawFit) {
    let bounds = rank_bounds(group);

    for (record, bound) in group.iter_mut().zip(bounds) {
        if record.heat.is_some() {
            continue;
        }

        let estimate = clamp_to_bounds(fit.predict(record.rank), bound);
        record.heat = Some(estimate as i64);
    }
}

fn clamp_to_bounds(prediction: f64, bounds: RankBounds) -> f64 {
    let mut value = prediction;
    if let Some(upper) = bounds.upper {
        value = value.min(upper as f64);
    }
    if let Some(lower) = bounds.lower {
        value = value.max(lower as f64);
    }
    value
}

/// Two scans over the group in rank order: ascending accumulates the running
/// minimum of known heat (upper bounds), descending the running maximum
/// (lower bounds). Equal ranks never bound each other.
fn rank_bounds(group: &[Record]) -> Vec<RankBounds> {
    let mut order: Vec<usize> = (0..group.len()).collect();
    order.sort_by_key(|&i| group[i].rank);

    let mut bounds = vec![RankBounds::default(); group.len()];
    let same_rank = |a: &usize, b: &usize| group[*a].rank == group[*b].rank;

    let mut running_min: Option<i64> = None;
    for tier in order.chunk_by(same_rank) {
        for &i in tier {
            bounds[i].upper = running_min;
        }
        for heat in tier.iter().filter_map(|&i| group[i].heat) {
            running_min = Some(running_min.map_or(heat, |m| m.min(heat)));
        }
    }

    let mut running_max: Option<i64> = None;
    for tier in order.chunk_by(same_rank).rev() {
        for &i in tier {
            bounds[i].lower = running_max;
        }
        for heat in tier.iter().filter_map(|&i| group[i].heat) {
            running_max = Some(running_max.map_or(heat, |m| m.max(heat)));
        }
    }

    bounds
}

fn drop_missing(group: Vec<Record>) -> Vec<Record> {
    let (kept, dropped): (Vec<Record>, Vec<Record>) = group.into_iter().partition(|r| r.heat.is_some());

    for record in &dropped {
        warn!("Dropping {} #{} ({}): heat could not be imputed", record.source, record.rank, record.title);
    }

    kept
}
