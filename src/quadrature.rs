//! Riemann-sum quadrature with a single-entry result cache.
//!
//! The engine remembers only the most recent request. A frame loop may call
//! [`QuadratureEngine::integrate`] every frame with the same parameters and
//! pay for the evaluation once; any change to the function, bounds,
//! partition count or rule replaces the cached result wholesale.
//!
//! # Sample points
//!
//! For partition `i` in `0..n` the sample abscissa is
//! `l + (r - l) * (i + t) / n`, where `t` is `0` (left), `1` (right),
//! `0.5` (midpoint) or a fresh uniform draw from `[0, 1)` (random).

use crate::error::{Error, Result};
use crate::function::Integrand;
use log::{info, trace};
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Policy for choosing the sample point inside each subinterval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuadratureRule {
    /// Left end of each subinterval.
    #[default]
    LeftEndpoint,
    /// Right end of each subinterval.
    RightEndpoint,
    /// Center of each subinterval.
    MidPoint,
    /// A uniformly random point inside each subinterval.
    RandomInSubinterval,
}

impl QuadratureRule {
    /// Every rule, in number-key order.
    pub const ALL: [Self; 4] = [
        Self::LeftEndpoint,
        Self::RightEndpoint,
        Self::MidPoint,
        Self::RandomInSubinterval,
    ];

    /// Short name shown in the plot summary.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::LeftEndpoint => "left",
            Self::RightEndpoint => "right",
            Self::MidPoint => "middle",
            Self::RandomInSubinterval => "random",
        }
    }

    /// Rule bound to the number keys `1`..`4`.
    #[must_use]
    pub const fn from_key(key: u8) -> Option<Self> {
        match key {
            1 => Some(Self::LeftEndpoint),
            2 => Some(Self::RightEndpoint),
            3 => Some(Self::MidPoint),
            4 => Some(Self::RandomInSubinterval),
            _ => None,
        }
    }

    /// Fractional position of the sample inside a subinterval.
    fn offset<R: Rng + ?Sized>(self, rng: &mut R) -> f64 {
        match self {
            Self::LeftEndpoint => 0.0,
            Self::RightEndpoint => 1.0,
            Self::MidPoint => 0.5,
            Self::RandomInSubinterval => rng.gen::<f64>(),
        }
    }
}

impl fmt::Display for QuadratureRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The full parameter tuple of one integration; the cache key.
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationRequest {
    /// [`Integrand::id`] of the integrated function.
    pub function_id: u64,
    /// Lower bound `l`.
    pub lower: f64,
    /// Upper bound `r` (may be below `l`).
    pub upper: f64,
    /// Partition count `n`.
    pub partitions: usize,
    /// Sample-point rule.
    pub rule: QuadratureRule,
}

impl IntegrationRequest {
    /// Bit-exact comparison against an incoming tuple.
    #[must_use]
    pub fn matches(
        &self,
        function_id: u64,
        lower: f64,
        upper: f64,
        partitions: usize,
        rule: QuadratureRule,
    ) -> bool {
        self.function_id == function_id
            && self.lower.to_bits() == lower.to_bits()
            && self.upper.to_bits() == upper.to_bits()
            && self.partitions == partitions
            && self.rule == rule
    }

    /// Signed subinterval width `(r - l) / n`.
    #[must_use]
    pub fn width(&self) -> f64 {
        (self.upper - self.lower) / self.partitions as f64
    }

    /// World-x boundaries of partition `i`.
    #[must_use]
    pub fn partition_bounds(&self, i: usize) -> (f64, f64) {
        let span = self.upper - self.lower;
        let n = self.partitions as f64;
        (
            self.lower + span * i as f64 / n,
            self.lower + span * (i + 1) as f64 / n,
        )
    }

    /// Whether the interval has zero length.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.lower == self.upper
    }
}

/// Samples and estimate produced for one [`IntegrationRequest`].
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationResult {
    request: IntegrationRequest,
    sample_xs: Vec<f64>,
    samples: Vec<f64>,
    estimate: f64,
}

impl IntegrationResult {
    /// The request this result answers.
    #[must_use]
    pub fn request(&self) -> &IntegrationRequest {
        &self.request
    }

    /// Abscissae chosen for each partition.
    #[must_use]
    pub fn sample_xs(&self) -> &[f64] {
        &self.sample_xs
    }

    /// Function value at each sample abscissa; the bar heights.
    #[must_use]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// `sum(sample[i] * (r - l) / n)`, accumulated in partition order.
    #[must_use]
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Number of partitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Always false for a result built by the engine (`n >= 1`).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Riemann-sum integrator remembering its most recent result.
///
/// The random source is injected so tests can seed it and assert exact
/// samples for [`QuadratureRule::RandomInSubinterval`].
///
/// # Example
///
/// ```
/// use riemann_viz::function::Function;
/// use riemann_viz::quadrature::{QuadratureEngine, QuadratureRule};
///
/// let mut engine = QuadratureEngine::seeded(7);
/// let result = engine
///     .integrate(&Function::Square, 1.0, 2.0, 4, QuadratureRule::LeftEndpoint)
///     .unwrap();
/// assert_eq!(result.estimate(), 1.96875);
/// ```
#[derive(Debug, Clone)]
pub struct QuadratureEngine<R = Xoshiro256PlusPlus> {
    rng: R,
    cached: Option<IntegrationResult>,
    recomputations: u64,
}

impl QuadratureEngine<Xoshiro256PlusPlus> {
    /// Engine with a deterministic generator.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::new(Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    /// Engine seeded from OS entropy.
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(Xoshiro256PlusPlus::from_entropy())
    }
}

impl Default for QuadratureEngine<Xoshiro256PlusPlus> {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl<R: Rng> QuadratureEngine<R> {
    /// Engine drawing random offsets from `rng`.
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            cached: None,
            recomputations: 0,
        }
    }

    /// Integrate `function` over `[lower, upper]` with `partitions` subintervals.
    ///
    /// Returns the cached result untouched when the tuple is bit-identical to
    /// the previous call. Otherwise evaluates every partition and replaces the
    /// cache.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPartitionCount`] when `partitions == 0`. The cache is
    /// left as it was.
    pub fn integrate<F: Integrand + ?Sized>(
        &mut self,
        function: &F,
        lower: f64,
        upper: f64,
        partitions: usize,
        rule: QuadratureRule,
    ) -> Result<&IntegrationResult> {
        if partitions == 0 {
            return Err(Error::InvalidPartitionCount { partitions });
        }

        let result = match self.cached.take() {
            Some(cached)
                if cached
                    .request
                    .matches(function.id(), lower, upper, partitions, rule) =>
            {
                trace!("integration cache hit for {}", function.name());
                cached
            }
            _ => {
                let request = IntegrationRequest {
                    function_id: function.id(),
                    lower,
                    upper,
                    partitions,
                    rule,
                };
                let result = compute(function, request, &mut self.rng);
                self.recomputations += 1;
                info!(
                    "integral of {} from {:.6} to {:.6} is {:.6} ({} rule, n = {})",
                    function.name(), lower, upper, result.estimate, rule, partitions
                );
                result
            }
        };

        let result: &IntegrationResult = self.cached.insert(result);
        Ok(result)
    }

    /// The most recent result, if any.
    #[must_use]
    pub fn cached(&self) -> Option<&IntegrationResult> {
        self.cached.as_ref()
    }

    /// Drop the cached result; the next call recomputes.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    /// Number of cache misses served so far.
    #[must_use]
    pub const fn recomputations(&self) -> u64 {
        self.recomputations
    }
}

fn compute<F: Integrand + ?Sized, R: Rng>(
    function: &F,
    request: IntegrationRequest,
    rng: &mut R,
) -> IntegrationResult {
    let l = request.lower;
    let r = request.upper;
    let n = request.partitions as f64;

    let mut sample_xs = Vec::with_capacity(request.partitions);
    let mut samples = Vec::with_capacity(request.partitions);
    let mut estimate = 0.0;

    for i in 0..request.partitions {
        let x = l + (r - l) * (i as f64 + request.rule.offset(rng)) / n;
        let y = function.evaluate_at(x);
        estimate += y * (r - l) / n;
        sample_xs.push(x);
        samples.push(y);
    }

    IntegrationResult {
        request,
        sample_xs,
        samples,
        estimate,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::function::Function;
    use std::cell::Cell;

    struct Counting {
        calls: Cell<usize>,
    }

    impl Counting {
        fn new() -> Self {
            Self { calls: Cell::new(0) }
        }
    }

    impl Integrand for Counting {
        fn evaluate_at(&self, x: f64) -> f64 {
            self.calls.set(self.calls.get() + 1);
            x
        }

        fn name(&self) -> &str {
            "counting"
        }

        fn id(&self) -> u64 {
            100
        }
    }

    /// Constant integrand whose name does not identify it.
    struct Level {
        name: &'static str,
        value: f64,
    }

    impl Integrand for Level {
        fn evaluate_at(&self, _x: f64) -> f64 {
            self.value
        }

        fn name(&self) -> &str {
            self.name
        }

        fn id(&self) -> u64 {
            self.value.to_bits()
        }
    }

    fn independent_sum(samples: &[f64], l: f64, r: f64, n: usize) -> f64 {
        let mut total = 0.0;
        for s in samples {
            total += s * (r - l) / n as f64;
        }
        total
    }

    #[test]
    fn test_square_left_scenario() {
        let mut engine = QuadratureEngine::seeded(1);
        let result = engine
            .integrate(&Function::Square, 1.0, 2.0, 4, QuadratureRule::LeftEndpoint)
            .unwrap();

        assert_eq!(result.sample_xs(), &[1.0, 1.25, 1.5, 1.75]);
        assert_eq!(result.samples(), &[1.0, 1.5625, 2.25, 3.0625]);
        assert_eq!(result.estimate(), 1.96875);
    }

    #[test]
    fn test_cube_midpoint_scenario() {
        let mut engine = QuadratureEngine::seeded(1);
        let result = engine
            .integrate(&Function::Cube, 0.0, 1.0, 1, QuadratureRule::MidPoint)
            .unwrap();

        assert_eq!(result.sample_xs(), &[0.5]);
        assert_eq!(result.samples(), &[0.125]);
        assert_eq!(result.estimate(), 0.125);
    }

    #[test]
    fn test_estimate_matches_independent_sum_for_all_rules() {
        for rule in QuadratureRule::ALL {
            for f in Function::ALL {
                let mut engine = QuadratureEngine::seeded(42);
                let result = engine.integrate(&f, -1.3, 2.7, 11, rule).unwrap();
                assert_eq!(
                    result.estimate(),
                    independent_sum(result.samples(), -1.3, 2.7, 11),
                    "{f} with {rule}"
                );
            }
        }
    }

    #[test]
    fn test_cache_hit_skips_evaluation() {
        let f = Counting::new();
        let mut engine = QuadratureEngine::seeded(3);

        let first = engine
            .integrate(&f, 0.0, 1.0, 8, QuadratureRule::RandomInSubinterval)
            .unwrap()
            .clone();
        assert_eq!(f.calls.get(), 8);

        let second = engine
            .integrate(&f, 0.0, 1.0, 8, QuadratureRule::RandomInSubinterval)
            .unwrap();
        assert_eq!(f.calls.get(), 8);
        assert_eq!(&first, second);
        assert_eq!(engine.recomputations(), 1);
    }

    #[test]
    fn test_any_field_change_recomputes() {
        let f = Counting::new();
        let mut engine = QuadratureEngine::seeded(3);
        let rule = QuadratureRule::LeftEndpoint;

        engine.integrate(&f, 0.0, 1.0, 4, rule).unwrap();
        engine.integrate(&f, 0.5, 1.0, 4, rule).unwrap();
        engine.integrate(&f, 0.5, 2.0, 4, rule).unwrap();
        engine.integrate(&f, 0.5, 2.0, 5, rule).unwrap();
        engine
            .integrate(&f, 0.5, 2.0, 5, QuadratureRule::MidPoint)
            .unwrap();

        assert_eq!(engine.recomputations(), 5);
        assert_eq!(f.calls.get(), 4 + 4 + 4 + 5 + 5);
    }

    #[test]
    fn test_function_change_recomputes() {
        let mut engine = QuadratureEngine::seeded(3);
        let rule = QuadratureRule::LeftEndpoint;
        engine.integrate(&Function::Square, 0.0, 1.0, 4, rule).unwrap();
        let cube = engine.integrate(&Function::Cube, 0.0, 1.0, 4, rule).unwrap();
        assert_eq!(cube.request().function_id, Function::Cube.id());
        assert_eq!(engine.recomputations(), 2);
    }

    #[test]
    fn test_same_name_different_integrand_recomputes() {
        let mut engine = QuadratureEngine::seeded(3);
        let rule = QuadratureRule::LeftEndpoint;
        let low = Level { name: "f", value: 1.0 };
        let high = Level { name: "f", value: 5.0 };

        let first = engine.integrate(&low, 0.0, 1.0, 4, rule).unwrap().estimate();
        let second = engine.integrate(&high, 0.0, 1.0, 4, rule).unwrap().estimate();

        assert_eq!(first, 1.0);
        assert_eq!(second, 5.0);
        assert_eq!(engine.recomputations(), 2);
    }

    #[test]
    fn test_zero_partitions_rejected_without_touching_cache() {
        let mut engine = QuadratureEngine::seeded(3);
        engine
            .integrate(&Function::Square, 0.0, 1.0, 2, QuadratureRule::LeftEndpoint)
            .unwrap();

        let err = engine
            .integrate(&Function::Square, 0.0, 1.0, 0, QuadratureRule::LeftEndpoint)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidPartitionCount { partitions: 0 }));

        let cached = engine.cached().unwrap();
        assert_eq!(cached.request().partitions, 2);
        assert_eq!(engine.recomputations(), 1);
    }

    #[test]
    fn test_left_and_right_are_index_shifted() {
        let mut engine = QuadratureEngine::seeded(0);
        let left = engine
            .integrate(&Function::Sin2, -0.4, 3.1, 9, QuadratureRule::LeftEndpoint)
            .unwrap()
            .clone();
        let right = engine
            .integrate(&Function::Sin2, -0.4, 3.1, 9, QuadratureRule::RightEndpoint)
            .unwrap();

        for i in 0..8 {
            assert_eq!(left.sample_xs()[i + 1], right.sample_xs()[i]);
            assert_eq!(left.samples()[i + 1], right.samples()[i]);
        }
    }

    #[test]
    fn test_midpoint_abscissae() {
        let (l, r, n) = (-2.0, 5.0, 7);
        let mut engine = QuadratureEngine::seeded(0);
        let result = engine
            .integrate(&Function::NegExp, l, r, n, QuadratureRule::MidPoint)
            .unwrap();
        for (i, &x) in result.sample_xs().iter().enumerate() {
            assert_eq!(x, l + (r - l) * (i as f64 + 0.5) / n as f64);
        }
    }

    #[test]
    fn test_degenerate_interval() {
        for rule in QuadratureRule::ALL {
            let mut engine = QuadratureEngine::seeded(11);
            let result = engine.integrate(&Function::NegExp, 0.75, 0.75, 6, rule).unwrap();
            assert_eq!(result.estimate(), 0.0);
            assert!(result.request().is_degenerate());
            for &s in result.samples() {
                assert_eq!(s, Function::NegExp.evaluate(0.75));
            }
        }
    }

    #[test]
    fn test_reversed_interval_flips_sign() {
        let mut engine = QuadratureEngine::seeded(0);
        let forward = engine
            .integrate(&Function::Square, 0.0, 2.0, 10, QuadratureRule::MidPoint)
            .unwrap()
            .estimate();
        let backward = engine
            .integrate(&Function::Square, 2.0, 0.0, 10, QuadratureRule::MidPoint)
            .unwrap()
            .estimate();
        assert!((forward + backward).abs() < 1e-12);
        assert!(forward > 0.0);
    }

    #[test]
    fn test_random_rule_is_deterministic_for_seed() {
        let mut a = QuadratureEngine::seeded(99);
        let mut b = QuadratureEngine::seeded(99);
        let ra = a
            .integrate(&Function::Square, 0.0, 1.0, 16, QuadratureRule::RandomInSubinterval)
            .unwrap();
        let rb = b
            .integrate(&Function::Square, 0.0, 1.0, 16, QuadratureRule::RandomInSubinterval)
            .unwrap();
        assert_eq!(ra, rb);
    }

    #[test]
    fn test_random_samples_stay_inside_subintervals() {
        let mut engine = QuadratureEngine::seeded(5);
        let result = engine
            .integrate(&Function::Cube, 1.0, 3.0, 20, QuadratureRule::RandomInSubinterval)
            .unwrap();
        for (i, &x) in result.sample_xs().iter().enumerate() {
            let (lo, hi) = result.request().partition_bounds(i);
            assert!(x >= lo && x <= hi, "x = {x} outside [{lo}, {hi}]");
        }
    }

    #[test]
    fn test_random_frozen_until_tuple_changes() {
        let mut engine = QuadratureEngine::seeded(5);
        let rule = QuadratureRule::RandomInSubinterval;
        let first = engine.integrate(&Function::Square, 0.0, 1.0, 4, rule).unwrap().clone();
        let again = engine.integrate(&Function::Square, 0.0, 1.0, 4, rule).unwrap().clone();
        assert_eq!(first, again);

        engine.integrate(&Function::Square, 0.0, 1.0, 5, rule).unwrap();
        let back = engine.integrate(&Function::Square, 0.0, 1.0, 4, rule).unwrap();
        assert_ne!(first.sample_xs(), back.sample_xs());
    }

    #[test]
    fn test_invalidate_forces_recompute() {
        let f = Counting::new();
        let mut engine = QuadratureEngine::seeded(0);
        engine.integrate(&f, 0.0, 1.0, 3, QuadratureRule::MidPoint).unwrap();
        engine.invalidate();
        assert!(engine.cached().is_none());
        engine.integrate(&f, 0.0, 1.0, 3, QuadratureRule::MidPoint).unwrap();
        assert_eq!(f.calls.get(), 6);
    }

    #[test]
    fn test_nan_bounds_do_not_panic() {
        let mut engine = QuadratureEngine::seeded(0);
        let result = engine
            .integrate(&Function::Square, f64::NAN, 1.0, 3, QuadratureRule::LeftEndpoint)
            .unwrap();
        assert!(result.estimate().is_nan());
    }

    #[test]
    fn test_partition_bounds_and_width() {
        let request = IntegrationRequest {
            function_id: 0,
            lower: 1.0,
            upper: 2.0,
            partitions: 4,
            rule: QuadratureRule::LeftEndpoint,
        };
        assert_eq!(request.width(), 0.25);
        assert_eq!(request.partition_bounds(0), (1.0, 1.25));
        assert_eq!(request.partition_bounds(3), (1.75, 2.0));
    }

    #[test]
    fn test_rule_keys_and_labels() {
        assert_eq!(QuadratureRule::from_key(1), Some(QuadratureRule::LeftEndpoint));
        assert_eq!(QuadratureRule::from_key(4), Some(QuadratureRule::RandomInSubinterval));
        assert_eq!(QuadratureRule::from_key(0), None);
        assert_eq!(QuadratureRule::from_key(5), None);
        assert_eq!(QuadratureRule::MidPoint.to_string(), "middle");
    }
}
