//! The benchmark program: lane illustration, then scalar vs lane runs.
//!
//! Output on the writer, in order:
//!
//! ```text
//! v            (8 lanes)
//! w
//! v²
//! w²
//! v² + w²
//! √(v² + w²)
//! Monte Carlo pi = <scalar estimate>
//! time = <seconds> s
//! Monte Carlo pi = <lane estimate>
//! time = <seconds> s
//! ```

use std::io::Write;

use crate::config::BenchConfig;
use crate::display::{format_general, LaneFormat};
use crate::engine::guard::EstimateGuard;
use crate::engine::rng::PiRng;
use crate::error::PiResult;
use crate::estimator::{run_timed, BenchRun, LaneEstimator, ScalarEstimator};
use crate::lanes::capability::LaneCapability;
use crate::lanes::Lanes8;

/// First illustration vector, lane 0 first.
pub const ILLUSTRATION_V: [f32; 8] = [8.0, 7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0];

/// Second illustration vector, lane 0 first.
pub const ILLUSTRATION_W: [f32; 8] = [2.0, 1.0, 2.0, 1.0, 2.0, 1.0, 2.0, 1.0];

/// The six illustration lines: v, w, v², w², v²+w², √(v²+w²).
#[must_use]
pub fn illustration_lines(format: &LaneFormat) -> Vec<String> {
    let v = Lanes8::from_array(ILLUSTRATION_V);
    let w = Lanes8::from_array(ILLUSTRATION_W);
    let v2 = v * v;
    let w2 = w * w;
    let r2 = v2 + w2;
    let r = r2.sqrt();
    [v, w, v2, w2, r2, r]
        .into_iter()
        .map(|lanes| format.render(lanes))
        .collect()
}

/// Two-line report block for one run.
#[must_use]
pub fn format_run(run: &BenchRun, precision: usize) -> String {
    format!(
        "Monte Carlo pi = {}\ntime = {} s\n",
        format_general(run.estimate.pi, precision),
        format_general(run.elapsed_secs, precision)
    )
}

/// Results of both estimator runs.
#[derive(Debug, Clone, Copy)]
pub struct DemoOutcome {
    /// Seed the random source started from.
    pub seed: u64,
    /// Scalar estimator run.
    pub scalar: BenchRun,
    /// Lane estimator run.
    pub lanes: BenchRun,
}

/// Run the full program against `out`.
///
/// The capability check runs first, so nothing is printed on a host that
/// cannot execute the lane kernel.
///
/// # Errors
///
/// Returns error if the configuration is invalid, the lane backend is
/// unavailable, a result fails the guard, or writing fails.
pub fn run(config: &BenchConfig, out: &mut impl Write) -> PiResult<DemoOutcome> {
    config.check()?;
    LaneCapability::detect().ensure_supported(config.allow_portable_lanes)?;

    for line in illustration_lines(&config.lane_format()) {
        out.write_all(line.as_bytes())?;
    }

    let mut rng = config.seed.map_or_else(PiRng::from_entropy, PiRng::new);
    let seed = rng.master_seed();
    tracing::info!(seed, samples = config.samples, "sampling started");

    let mut guard = EstimateGuard::new();

    let scalar = run_timed(&ScalarEstimator, config.samples, &mut rng, &mut guard)?;
    out.write_all(format_run(&scalar, config.precision).as_bytes())?;

    let lanes = run_timed(&LaneEstimator, config.samples, &mut rng, &mut guard)?;
    out.write_all(format_run(&lanes, config.precision).as_bytes())?;
    out.flush()?;

    Ok(DemoOutcome {
        seed,
        scalar,
        lanes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::estimator::{estimate_from_hits, Method};

    fn small_config() -> BenchConfig {
        BenchConfig::builder()
            .samples(80_000)
            .seed(42)
            .allow_portable_lanes(true)
            .build()
            .expect("valid config")
    }

    #[test]
    fn test_illustration_lines() {
        let lines = illustration_lines(&LaneFormat::default());
        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines[0],
            "           8           7           6           5           4           3           2           1\n"
        );
        assert_eq!(
            lines[1],
            "           2           1           2           1           2           1           2           1\n"
        );
        assert_eq!(
            lines[2],
            "          64          49          36          25          16           9           4           1\n"
        );
        assert_eq!(
            lines[4],
            "          68          50          40          26          20          10           8           2\n"
        );
        assert!(lines[5].starts_with("     8.24621     7.07107     6.32456     5.09902"));
        assert!(lines[5].ends_with("     2.82843     1.41421\n"));
    }

    #[test]
    fn test_format_run() {
        let run = BenchRun {
            estimate: estimate_from_hits(Method::Scalar, 78_539_816, 100_000_000),
            elapsed_secs: 1.25,
        };
        assert_eq!(format_run(&run, 6), "Monte Carlo pi = 3.14159\ntime = 1.25 s\n");
    }

    #[test]
    fn test_run_output_layout() {
        let mut out = Vec::new();
        let outcome = run(&small_config(), &mut out).expect("run");
        let text = String::from_utf8(out).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 10);
        assert!(lines[6].starts_with("Monte Carlo pi = "));
        assert!(lines[7].starts_with("time = ") && lines[7].ends_with(" s"));
        assert!(lines[8].starts_with("Monte Carlo pi = "));
        assert!(lines[9].starts_with("time = ") && lines[9].ends_with(" s"));

        assert_eq!(outcome.seed, 42);
        assert_eq!(outcome.scalar.estimate.method, Method::Scalar);
        assert_eq!(outcome.lanes.estimate.method, Method::Lanes);
        assert_eq!(outcome.scalar.estimate.samples, 80_000);
        assert_eq!(outcome.lanes.estimate.samples, 80_000);
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let a = run(&small_config(), &mut std::io::sink()).expect("run");
        let b = run(&small_config(), &mut std::io::sink()).expect("run");
        assert_eq!(a.scalar.estimate, b.scalar.estimate);
        assert_eq!(a.lanes.estimate, b.lanes.estimate);
    }

    #[test]
    fn test_run_rejects_invalid_config() {
        let mut config = small_config();
        config.samples = 12;
        let mut out = Vec::new();
        assert!(run(&config, &mut out).is_err());
        assert!(out.is_empty(), "nothing printed before validation");
    }
}
