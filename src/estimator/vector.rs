//! Lane estimator: eight samples per iteration.
//!
//! The scalar branch `if inside { hits += 1 }` becomes a mask and a
//! select, so every lane does the same work:
//!
//! ```text
//! x, y   ← 8 draws each (x lanes 0..7, then y lanes 0..7)
//! r²     = x·x + y·y
//! mask   = r² ≤ 1
//! inc    = select(mask, 1, 0)
//! count8 = count8 + inc
//! ```
//!
//! `count8` is reduced to a scalar only after the loop.

use super::{estimate_from_hits, Estimate, Method, PiEstimator};
use crate::engine::rng::UniformSource;
use crate::lanes::{hit_indicator, Lanes8, LANES};

/// Iterations after which the `f32` accumulator is folded into a `u64`.
///
/// A lane holding at most 2²⁴ is still an exact `f32` integer.
pub const FLUSH_INTERVAL: u64 = 1 << 24;

/// Counts hits eight lanes at a time.
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneEstimator;

impl LaneEstimator {
    /// Number of samples covered by a budget: whole groups of eight only.
    #[must_use]
    pub const fn covered_samples(samples: u64) -> u64 {
        samples - samples % LANES as u64
    }
}

/// Run `groups` iterations and return the per-lane hit accumulator.
///
/// Lanes stay exact only up to 2²⁴ iterations; use [`count_hits_in_blocks`]
/// for longer runs.
pub fn accumulate<S: UniformSource + ?Sized>(groups: u64, source: &mut S) -> Lanes8 {
    let mut count8 = Lanes8::ZERO;
    for _ in 0..groups {
        let x = Lanes8::from_fn(|| source.next_unit());
        let y = Lanes8::from_fn(|| source.next_unit());
        count8 = count8 + hit_indicator(x, y);
    }
    count8
}

/// Run `groups` iterations, folding the lane accumulator into a `u64`
/// every `interval` iterations.
///
/// An `interval` of zero is treated as one.
pub fn count_hits_in_blocks<S: UniformSource + ?Sized>(
    groups: u64,
    interval: u64,
    source: &mut S,
) -> u64 {
    let interval = interval.max(1);
    let mut remaining = groups;
    let mut hits = 0;
    while remaining > 0 {
        let block = remaining.min(interval);
        hits += accumulate(block, source).exact_sum() as u64;
        remaining -= block;
    }
    hits
}

impl PiEstimator for LaneEstimator {
    fn method(&self) -> Method {
        Method::Lanes
    }

    fn count_hits<S: UniformSource + ?Sized>(&self, samples: u64, source: &mut S) -> u64 {
        count_hits_in_blocks(samples / LANES as u64, FLUSH_INTERVAL, source)
    }

    fn estimate<S: UniformSource + ?Sized>(&self, samples: u64, source: &mut S) -> Estimate {
        let covered = Self::covered_samples(samples);
        if covered != samples {
            tracing::warn!(
                samples,
                dropped = samples - covered,
                "sample budget is not a multiple of the lane width"
            );
        }
        let hits = self.count_hits(covered, source);
        estimate_from_hits(Method::Lanes, hits, covered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::{PiRng, SequenceSource};
    use crate::estimator::{inside_unit_circle, ScalarEstimator};

    /// Eight x values followed by eight y values.
    fn group(points: [(f32, f32); LANES]) -> Vec<f32> {
        let mut values: Vec<f32> = points.iter().map(|&(x, _)| x).collect();
        values.extend(points.iter().map(|&(_, y)| y));
        values
    }

    const FIXED_POINTS: [(f32, f32); LANES] = [
        (0.0, 0.0),
        (1.0, 0.0),
        (0.8, 0.8),
        (1.0, 1.0),
        (0.0, 1.0),
        (0.6, 0.6),
        (0.5, 0.5),
        (0.99, 0.2),
    ];

    #[test]
    fn test_fixed_points_match_scalar_predicate() {
        let mut src = SequenceSource::new(group(FIXED_POINTS));
        let count8 = accumulate(1, &mut src).to_array();

        for (lane, &(x, y)) in FIXED_POINTS.iter().enumerate() {
            let expected = if inside_unit_circle(x, y) { 1.0 } else { 0.0 };
            assert_eq!(count8[lane], expected, "lane {lane} for ({x}, {y})");
        }
        assert_eq!(count8[0], 1.0, "(0,0) inside");
        assert_eq!(count8[1], 1.0, "(1,0) on the boundary counts inside");
        assert_eq!(count8[2], 0.0, "(0.8,0.8) outside");
        assert_eq!(count8[3], 0.0, "(1,1) outside");
    }

    #[test]
    fn test_accumulates_across_iterations() {
        let mut src = SequenceSource::new(group(FIXED_POINTS));
        let count8 = accumulate(5, &mut src);
        assert_eq!(count8.to_array(), [5.0, 5.0, 0.0, 0.0, 5.0, 5.0, 5.0, 0.0]);
        assert_eq!(count8.exact_sum(), 25.0);
        assert_eq!(src.draws(), 5 * 16);
    }

    #[test]
    fn test_lane_sum_equals_scalar_count_on_same_points() {
        // Same points, each path reading them in its own order
        let points: Vec<(f32, f32)> = {
            let mut rng = PiRng::new(7);
            (0..800).map(|_| (rng.gen_f32(), rng.gen_f32())).collect()
        };
        let interleaved: Vec<f32> = points.iter().flat_map(|&(x, y)| [x, y]).collect();
        let grouped: Vec<f32> = points
            .chunks(LANES)
            .flat_map(|chunk| {
                let mut g: Vec<f32> = chunk.iter().map(|&(x, _)| x).collect();
                g.extend(chunk.iter().map(|&(_, y)| y));
                g
            })
            .collect();

        let scalar = ScalarEstimator.count_hits(800, &mut SequenceSource::new(interleaved));
        let lanes = LaneEstimator.count_hits(800, &mut SequenceSource::new(grouped));
        let direct = points.iter().filter(|&&(x, y)| inside_unit_circle(x, y)).count() as u64;

        assert_eq!(scalar, direct);
        assert_eq!(lanes, direct);
    }

    #[test]
    fn test_processes_exactly_n_samples() {
        let mut rng = PiRng::new(42);
        let estimate = LaneEstimator.estimate(8_000, &mut rng);
        assert_eq!(estimate.samples, 8_000);
        assert_eq!(rng.draws(), 16_000);
    }

    #[test]
    fn test_partial_group_dropped_from_budget() {
        let mut rng = PiRng::new(42);
        let estimate = LaneEstimator.estimate(8_005, &mut rng);
        assert_eq!(estimate.samples, 8_000);
        assert_eq!(rng.draws(), 16_000);
        assert_eq!(LaneEstimator::covered_samples(7), 0);
        assert_eq!(LaneEstimator::covered_samples(16), 16);
    }

    #[test]
    fn test_all_inside_counts_every_sample() {
        let mut src = SequenceSource::new(vec![0.0]);
        let estimate = LaneEstimator.estimate(1_024, &mut src);
        assert_eq!(estimate.hits, 1_024);
        assert_eq!(estimate.pi, 4.0);
    }

    #[test]
    fn test_reproducibility() {
        let a = LaneEstimator.estimate(80_000, &mut PiRng::new(42));
        let b = LaneEstimator.estimate(80_000, &mut PiRng::new(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_estimate_accuracy() {
        let estimate = LaneEstimator.estimate(1_000_000, &mut PiRng::new(42));
        assert!(
            estimate.absolute_error() < 0.01,
            "Estimate {} too far from π",
            estimate.pi
        );
    }

    #[test]
    fn test_block_folding_stays_exact() {
        // Interval 3: below, at, and past multiples of the block size
        for groups in [1_u64, 2, 3, 4, 6, 7, 10] {
            let mut src = SequenceSource::new(group(FIXED_POINTS));
            let hits = count_hits_in_blocks(groups, 3, &mut src);
            assert_eq!(hits, groups * 5, "{groups} groups");
            assert_eq!(src.draws(), groups * 16);
        }
    }

    #[test]
    fn test_block_folding_matches_single_block() {
        let folded = count_hits_in_blocks(100, 7, &mut PiRng::new(11));
        let single = accumulate(100, &mut PiRng::new(11)).exact_sum() as u64;
        assert_eq!(folded, single);
    }

    #[test]
    fn test_block_folding_zero_interval() {
        let mut src = SequenceSource::new(vec![0.0]);
        assert_eq!(count_hits_in_blocks(4, 0, &mut src), 32);
        assert_eq!(count_hits_in_blocks(0, 3, &mut src), 0);
    }

    #[test]
    fn test_flush_interval_is_exact_in_f32() {
        let max_lane = FLUSH_INTERVAL as f32;
        assert_eq!(max_lane as u64, FLUSH_INTERVAL);
        assert_ne!((max_lane + 1.0) as u64, FLUSH_INTERVAL + 1);
    }
}
