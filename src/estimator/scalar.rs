//! Scalar estimator: one sample per iteration.

use super::{inside_unit_circle, Method, PiEstimator};
use crate::engine::rng::UniformSource;

/// Draws `x` then `y` for every sample and counts the ones inside.
#[derive(Debug, Clone, Copy, Default)]
pub struct ScalarEstimator;

impl PiEstimator for ScalarEstimator {
    fn method(&self) -> Method {
        Method::Scalar
    }

    fn count_hits<S: UniformSource + ?Sized>(&self, samples: u64, source: &mut S) -> u64 {
        let mut hits = 0;
        for _ in 0..samples {
            let x = source.next_unit();
            let y = source.next_unit();
            if inside_unit_circle(x, y) {
                hits += 1;
            }
        }
        hits
    }
}
