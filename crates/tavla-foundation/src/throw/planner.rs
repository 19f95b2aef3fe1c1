//! Per-die trajectories for a confirmed throw.
//!
//! Randomness here is visual dispersion only. Face values come from a
//! separate source and are never influenced by a trajectory.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tavla_ui_graphics::Point;

use crate::config::ThrowConfig;
use crate::throw::ThrowIntent;

/// Motion parameters for one die's flight.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DieFlightPlan {
    /// Unit vector.
    pub direction: Point,
    pub distance: f32,
    pub rotation_degrees: f32,
    pub duration_secs: f32,
}

impl DieFlightPlan {
    /// Landing offset from the rest slot.
    pub fn target_offset(&self) -> Point {
        self.direction * self.distance
    }

    pub fn duration_millis(&self) -> u64 {
        (self.duration_secs * 1000.0).round() as u64
    }
}

pub struct ThrowPlanner<R: Rng = SmallRng> {
    config: ThrowConfig,
    rng: R,
}

impl ThrowPlanner<SmallRng> {
    /// Planner seeded from the operating system.
    pub fn new(config: ThrowConfig) -> Self {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    /// Planner with a fixed seed, for reproducible dispersion.
    pub fn with_seed(config: ThrowConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ThrowPlanner<R> {
    /// Accepts any config. Inverted ranges are sampled with their bounds
    /// swapped and non-finite bounds collapse onto the finite one.
    pub fn with_rng(config: ThrowConfig, rng: R) -> Self {
        if let Err(err) = config.validate() {
            log::warn!("planning with an invalid throw config: {err}");
        }
        Self { config, rng }
    }

    pub fn config(&self) -> &ThrowConfig {
        &self.config
    }

    /// Plans both dice. Each die is perturbed independently around the
    /// shared release direction.
    pub fn plan(&mut self, intent: &ThrowIntent) -> [DieFlightPlan; 2] {
        let base = intent.direction();
        let [first_ms, second_ms] = self.config.flight_durations_ms;
        let plans = [self.plan_die(base, first_ms), self.plan_die(base, second_ms)];
        log::info!(
            "planned throw: {:.0}@{:.1}° and {:.0}@{:.1}°",
            plans[0].distance,
            plans[0].direction.angle().to_degrees(),
            plans[1].distance,
            plans[1].direction.angle().to_degrees()
        );
        plans
    }

    fn plan_die(&mut self, base: Point, duration_ms: u64) -> DieFlightPlan {
        let spread = self.config.max_perturbation_degrees;
        let band = self.config.distance_band;

        let perturbation = sample_between(&mut self.rng, -spread, spread).to_radians();
        // Renormalise so float drift from the rotation never leaks out.
        let direction = base.rotated(perturbation).normalized().unwrap_or(base);

        DieFlightPlan {
            direction,
            distance: sample_between(&mut self.rng, band.min, band.max),
            rotation_degrees: sample_between(
                &mut self.rng,
                self.config.min_spin_degrees,
                self.config.max_spin_degrees,
            ),
            duration_secs: duration_ms as f32 / 1000.0,
        }
    }
}

/// Uniform draw between two bounds in either order.
fn sample_between<R: Rng>(rng: &mut R, a: f32, b: f32) -> f32 {
    let (low, high) = if a <= b { (a, b) } else { (b, a) };
    match (low.is_finite(), high.is_finite()) {
        // Drawn in f64 so spans wider than f32 can represent stay finite.
        (true, true) => rng.random_range(f64::from(low)..=f64::from(high)) as f32,
        (true, false) => low,
        (false, true) => high,
        (false, false) => 0.0,
    }
}
