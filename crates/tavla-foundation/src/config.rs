//! Tunables for the throw gesture and its animations.

use std::fmt;

use tavla_animation::SpringSpec;

use crate::throw_constants::*;

/// Range a die's flight distance is drawn from, inclusive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceBand {
    pub min: f32,
    pub max: f32,
}

impl DistanceBand {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    pub const fn standard() -> Self {
        Self::new(THROW_DISTANCE_MIN, THROW_DISTANCE_MAX)
    }

    pub const fn wide() -> Self {
        Self::new(WIDE_THROW_DISTANCE_MIN, WIDE_THROW_DISTANCE_MAX)
    }

    pub fn contains(&self, distance: f32) -> bool {
        distance >= self.min && distance <= self.max
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "standard" => Some(Self::standard()),
            "wide" => Some(Self::wide()),
            other => {
                let (min, max) = other.split_once("..")?;
                Some(Self::new(min.trim().parse().ok()?, max.trim().parse().ok()?))
            }
        }
    }
}

impl Default for DistanceBand {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
    Invalid { field: &'static str, reason: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value } => {
                write!(f, "invalid value {value:?} for {key}")
            }
            ConfigError::Invalid { field, reason } => write!(f, "invalid {field}: {reason}"),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Every tunable of the throw engine. Defaults reproduce the reference feel.
#[derive(Clone, Debug, PartialEq)]
pub struct ThrowConfig {
    /// Units per millisecond.
    pub swipe_threshold: f32,
    pub follow_duration_ms: u64,
    pub press_scale: f32,
    pub max_tilt_degrees: f32,
    pub tilt_per_velocity: f32,
    pub max_perturbation_degrees: f32,
    pub distance_band: DistanceBand,
    pub min_spin_degrees: f32,
    pub max_spin_degrees: f32,
    pub flight_durations_ms: [u64; 2],
    pub bounce_scale: f32,
    pub bounce_duration_ms: u64,
    pub settle_delay_ms: u64,
    pub cancel_spring: SpringSpec,
    pub reset_spring: SpringSpec,
}

impl Default for ThrowConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: SWIPE_THRESHOLD,
            follow_duration_ms: FOLLOW_DURATION_MS,
            press_scale: PRESS_SCALE,
            max_tilt_degrees: MAX_TILT_DEGREES,
            tilt_per_velocity: TILT_PER_VELOCITY,
            max_perturbation_degrees: MAX_PERTURBATION_DEGREES,
            distance_band: DistanceBand::standard(),
            min_spin_degrees: MIN_SPIN_DEGREES,
            max_spin_degrees: MAX_SPIN_DEGREES,
            flight_durations_ms: FLIGHT_DURATIONS_MS,
            bounce_scale: BOUNCE_SCALE,
            bounce_duration_ms: BOUNCE_DURATION_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
            cancel_spring: SpringSpec::with_damping(CANCEL_SPRING_STIFFNESS, CANCEL_SPRING_DAMPING),
            reset_spring: SpringSpec::with_damping(RESET_SPRING_STIFFNESS, RESET_SPRING_DAMPING),
        }
    }
}

impl ThrowConfig {
    pub fn with_swipe_threshold(mut self, threshold: f32) -> Self {
        self.swipe_threshold = threshold;
        self
    }

    pub fn with_follow_duration_ms(mut self, millis: u64) -> Self {
        self.follow_duration_ms = millis;
        self
    }

    pub fn with_distance_band(mut self, band: DistanceBand) -> Self {
        self.distance_band = band;
        self
    }

    pub fn with_flight_durations_ms(mut self, durations: [u64; 2]) -> Self {
        self.flight_durations_ms = durations;
        self
    }

    pub fn with_settle_delay_ms(mut self, millis: u64) -> Self {
        self.settle_delay_ms = millis;
        self
    }

    pub fn with_cancel_spring(mut self, spring: SpringSpec) -> Self {
        self.cancel_spring = spring;
        self
    }

    pub fn with_reset_spring(mut self, spring: SpringSpec) -> Self {
        self.reset_spring = spring;
        self
    }

    pub fn longest_flight_ms(&self) -> u64 {
        self.flight_durations_ms.into_iter().max().unwrap_or(0)
    }

    /// Defaults overridden by `TAVLA_*` environment variables.
    ///
    /// Recognised: `TAVLA_SWIPE_THRESHOLD`, `TAVLA_FOLLOW_MS`,
    /// `TAVLA_SETTLE_DELAY_MS`, `TAVLA_DISTANCE_BAND`
    /// (`standard`, `wide` or `<min>..<max>`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("TAVLA_SWIPE_THRESHOLD") {
            config.swipe_threshold = parse_value("TAVLA_SWIPE_THRESHOLD", &value)?;
        }
        if let Some(value) = lookup("TAVLA_FOLLOW_MS") {
            config.follow_duration_ms = parse_value("TAVLA_FOLLOW_MS", &value)?;
        }
        if let Some(value) = lookup("TAVLA_SETTLE_DELAY_MS") {
            config.settle_delay_ms = parse_value("TAVLA_SETTLE_DELAY_MS", &value)?;
        }
        if let Some(value) = lookup("TAVLA_DISTANCE_BAND") {
            config.distance_band =
                DistanceBand::parse(&value).ok_or_else(|| ConfigError::InvalidValue {
                    key: "TAVLA_DISTANCE_BAND",
                    value: value.clone(),
                })?;
        }

        if let Err(err) = config.validate() {
            log::warn!("rejecting throw config from environment: {err}");
            return Err(err);
        }
        log::debug!("throw config: {config:?}");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.swipe_threshold.is_finite() && self.swipe_threshold > 0.0) {
            return Err(ConfigError::Invalid {
                field: "swipe_threshold",
                reason: "must be a positive number",
            });
        }
        if !(self.distance_band.min > 0.0 && self.distance_band.min <= self.distance_band.max) {
            return Err(ConfigError::Invalid {
                field: "distance_band",
                reason: "min must be positive and not exceed max",
            });
        }
        if self.min_spin_degrees > self.max_spin_degrees {
            return Err(ConfigError::Invalid {
                field: "spin",
                reason: "min spin exceeds max spin",
            });
        }
        if !(0.0..=180.0).contains(&self.max_perturbation_degrees) {
            return Err(ConfigError::Invalid {
                field: "max_perturbation_degrees",
                reason: "must lie within 0..=180",
            });
        }
        if self.settle_delay_ms <= self.longest_flight_ms() {
            return Err(ConfigError::Invalid {
                field: "settle_delay_ms",
                reason: "dice would reset before landing",
            });
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        })
}
