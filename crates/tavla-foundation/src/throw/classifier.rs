use tavla_ui_graphics::{Point, Velocity};

/// Outcome of classifying a release velocity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThrowIntent {
    /// Release velocity, or straight up when the release had no motion.
    pub velocity: Velocity,
    pub speed: f32,
    pub is_upward: bool,
    /// Whether `velocity` replaced a zero release velocity.
    pub substituted: bool,
    threshold: f32,
}

impl ThrowIntent {
    /// A confirmed throw. Anything else is a cancelled drag.
    pub fn is_throw(&self) -> bool {
        self.speed > self.threshold && self.is_upward
    }

    /// Unit direction of travel. Never fails, the zero vector was replaced
    /// during classification.
    pub fn direction(&self) -> Point {
        self.velocity.direction().unwrap_or(Point::UP)
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }
}

/// Classifies a release. `threshold` is in units per millisecond and bounds
/// both the overall speed and the upward component.
pub fn classify(velocity: Velocity, threshold: f32) -> ThrowIntent {
    let substituted = velocity.is_zero() || !velocity.speed().is_finite();
    let velocity = if substituted {
        log::warn!("release velocity {velocity:?} has no direction, substituting straight up");
        Velocity::from(Point::UP)
    } else {
        velocity
    };

    let intent = ThrowIntent {
        velocity,
        speed: velocity.speed(),
        is_upward: velocity.y < -threshold,
        substituted,
        threshold,
    };
    log::debug!(
        "release v=({:.2}, {:.2}) speed={:.2} upward={} throw={}",
        velocity.x,
        velocity.y,
        intent.speed,
        intent.is_upward,
        intent.is_throw()
    );
    intent
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::throw_constants::SWIPE_THRESHOLD;

    #[test]
    fn fast_upward_release_is_a_throw() {
        let intent = classify(Velocity::new(0.0, -5.0), SWIPE_THRESHOLD);
        assert!(intent.is_throw());
        assert_eq!(intent.speed, 5.0);
        assert!(!intent.substituted);
    }

    #[test]
    fn downward_release_is_cancelled() {
        let intent = classify(Velocity::new(2.0, 1.0), SWIPE_THRESHOLD);
        assert!(!intent.is_upward);
        assert!(!intent.is_throw());
    }

    #[test]
    fn fast_sideways_release_is_cancelled() {
        // Speed clears the threshold but the upward component does not.
        let intent = classify(Velocity::new(8.0, -2.0), SWIPE_THRESHOLD);
        assert!(intent.speed > SWIPE_THRESHOLD);
        assert!(!intent.is_throw());
    }

    #[test]
    fn zero_release_is_substituted_and_cancelled() {
        let intent = classify(Velocity::ZERO, SWIPE_THRESHOLD);
        assert!(intent.substituted);
        assert_eq!(intent.velocity, Velocity::new(0.0, -1.0));
        assert_eq!(intent.speed, 1.0);
        assert!(!intent.is_throw());
        assert_eq!(intent.direction(), Point::UP);
    }

    #[test]
    fn classification_matches_threshold_rule() {
        for x in -8..=8 {
            for y in -8..=8 {
                let velocity = Velocity::new(x as f32, y as f32);
                let intent = classify(velocity, SWIPE_THRESHOLD);
                let expected = velocity.speed() > SWIPE_THRESHOLD && velocity.y < -SWIPE_THRESHOLD;
                assert_eq!(intent.is_throw(), expected, "velocity {velocity:?}");
            }
        }
    }
}
