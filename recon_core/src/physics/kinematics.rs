//! # Kinematics
//!
//! Distance, speed, and time relations for a decelerating or closing vehicle.
//!
//! ## Stopping Distance
//!
//! ```text
//! d_reaction = v × t_r
//! d_braking  = v² / (2 × g × f_eff)
//! f_eff      = μ + grade / 100
//! ```
//!
//! `v` in ft/s, `g` in ft/s². Skid-mark speed is the inverse of the braking
//! term: `v = √(2 × g × f_eff × d)`.
//!
//! When `f_eff ≤ 0` (a downhill grade steeper than the road can hold) the
//! vehicle cannot stop by braking alone and both formulas report
//! `UndefinedPhysics` instead of returning a negative or infinite distance.

use serde::{Deserialize, Serialize};

use super::PhysicsCalculator;
use crate::constants::RoadCondition;
use crate::errors::{
    finite_result, require_finite, require_non_negative, require_positive, ReconResult,
};
use crate::units::{fps_to_mph, mph_to_fps};

/// Reaction, braking, and total stopping distance.
///
/// ## JSON Example
///
/// ```json
/// {
///   "reaction_distance_ft": 132.0,
///   "braking_distance_ft": 171.92,
///   "total_distance_ft": 303.92,
///   "effective_friction": 0.7
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrakingDistance {
    /// Distance covered during perception-reaction (ft)
    pub reaction_distance_ft: f64,

    /// Distance covered while braking to a stop (ft)
    pub braking_distance_ft: f64,

    /// Reaction plus braking distance (ft)
    pub total_distance_ft: f64,

    /// Friction coefficient after the grade adjustment
    pub effective_friction: f64,
}

/// Minimum speed implied by a skid of known length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkidSpeedEstimate {
    /// Speed at the start of the skid (mph)
    pub speed_mph: f64,

    /// Speed at the start of the skid (ft/s)
    pub speed_fps: f64,

    /// Friction coefficient after the grade adjustment
    pub effective_friction: f64,
}

/// Average acceleration over a 0-60 mph run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Acceleration {
    /// Average acceleration (ft/s²)
    pub fps2: f64,

    /// Average acceleration in multiples of g
    pub g: f64,
}

/// Outcome of a time-to-collision query.
///
/// A non-closing pair has its own variant so that "never" cannot leak into
/// arithmetic as an infinite float.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TimeToCollision {
    /// The gap closes after `seconds`
    Collision { seconds: f64 },
    /// Closing velocity is zero or negative; the gap never closes
    NoCollision,
}

impl TimeToCollision {
    /// Seconds until contact, if the gap closes
    pub fn seconds(&self) -> Option<f64> {
        match self {
            TimeToCollision::Collision { seconds } => Some(*seconds),
            TimeToCollision::NoCollision => None,
        }
    }

    /// Whether the gap closes at all
    pub fn is_collision(&self) -> bool {
        matches!(self, TimeToCollision::Collision { .. })
    }
}

impl<'c> PhysicsCalculator<'c> {
    /// Reaction, braking, and total stopping distance.
    ///
    /// # Arguments
    ///
    /// * `velocity_mph` - Initial speed (≥ 0)
    /// * `condition` - Road surface
    /// * `grade_percent` - Road grade, positive uphill
    /// * `reaction_time_s` - Perception-reaction time (≥ 0), typically
    ///   [`DEFAULT_REACTION_TIME_S`](super::DEFAULT_REACTION_TIME_S)
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - negative or non-finite speed or reaction time
    /// * `UndefinedPhysics` - effective friction ≤ 0
    pub fn braking_distance(
        &self,
        velocity_mph: f64,
        condition: RoadCondition,
        grade_percent: f64,
        reaction_time_s: f64,
    ) -> ReconResult<BrakingDistance> {
        require_non_negative("velocity_mph", velocity_mph, "Velocity cannot be negative")?;
        require_non_negative(
            "reaction_time_s",
            reaction_time_s,
            "Reaction time cannot be negative",
        )?;
        let effective_friction =
            self.effective_friction("braking_distance", condition, grade_percent)?;

        let v = mph_to_fps(velocity_mph);
        let reaction_distance_ft = v * reaction_time_s;
        let braking_distance_ft = finite_result(
            "braking_distance",
            v * v / (2.0 * self.gravity() * effective_friction),
        )?;
        let total_distance_ft =
            finite_result("braking_distance", reaction_distance_ft + braking_distance_ft)?;

        tracing::debug!(
            velocity_mph,
            %condition,
            grade_percent,
            total_distance_ft,
            "braking distance"
        );

        Ok(BrakingDistance {
            reaction_distance_ft,
            braking_distance_ft,
            total_distance_ft,
            effective_friction,
        })
    }

    /// Total stopping distance on a graded road (ft).
    ///
    /// Same domain and errors as [`braking_distance`](Self::braking_distance).
    pub fn stopping_distance_on_grade(
        &self,
        velocity_mph: f64,
        condition: RoadCondition,
        grade_percent: f64,
        reaction_time_s: f64,
    ) -> ReconResult<f64> {
        self.braking_distance(velocity_mph, condition, grade_percent, reaction_time_s)
            .map(|d| d.total_distance_ft)
    }

    /// Speed implied by a skid mark of `length_ft`.
    ///
    /// Inverse of the braking term of [`braking_distance`](Self::braking_distance).
    /// The result is a minimum speed: any energy lost before the tires locked
    /// is not visible in the mark.
    pub fn speed_from_skid_marks(
        &self,
        length_ft: f64,
        condition: RoadCondition,
        grade_percent: f64,
    ) -> ReconResult<SkidSpeedEstimate> {
        require_non_negative("length_ft", length_ft, "Skid length cannot be negative")?;
        let effective_friction =
            self.effective_friction("speed_from_skid_marks", condition, grade_percent)?;

        let speed_fps = finite_result(
            "speed_from_skid_marks",
            (2.0 * self.gravity() * effective_friction * length_ft).sqrt(),
        )?;
        let speed_mph = fps_to_mph(speed_fps);

        tracing::debug!(length_ft, %condition, grade_percent, speed_mph, "skid mark speed");

        Ok(SkidSpeedEstimate {
            speed_mph,
            speed_fps,
            effective_friction,
        })
    }

    /// Distance covered during a following time gap (ft).
    ///
    /// `reaction_time_s` is typically
    /// [`DEFAULT_FOLLOWING_TIME_S`](super::DEFAULT_FOLLOWING_TIME_S).
    pub fn following_distance(&self, velocity_mph: f64, reaction_time_s: f64) -> ReconResult<f64> {
        require_non_negative("velocity_mph", velocity_mph, "Velocity cannot be negative")?;
        require_non_negative("reaction_time_s", reaction_time_s, "Time gap cannot be negative")?;
        finite_result("following_distance", mph_to_fps(velocity_mph) * reaction_time_s)
    }

    /// Average acceleration for a 0-60 mph time.
    pub fn acceleration_from_zero_to_sixty(&self, seconds: f64) -> ReconResult<Acceleration> {
        require_positive("seconds", seconds, "0-60 time must be positive")?;
        let fps2 = finite_result("acceleration_from_zero_to_sixty", mph_to_fps(60.0) / seconds)?;
        let g = finite_result("acceleration_from_zero_to_sixty", fps2 / self.gravity())?;
        Ok(Acceleration { fps2, g })
    }

    /// Time until a following vehicle reaches a leading one.
    ///
    /// Vehicle 1 closes on vehicle 2 along the same line of travel;
    /// velocities are signed. When `velocity1_mph ≤ velocity2_mph` the gap
    /// never closes and [`TimeToCollision::NoCollision`] is returned.
    pub fn time_to_collision(
        &self,
        distance_ft: f64,
        velocity1_mph: f64,
        velocity2_mph: f64,
    ) -> ReconResult<TimeToCollision> {
        require_non_negative("distance_ft", distance_ft, "Distance cannot be negative")?;
        require_finite("velocity1_mph", velocity1_mph)?;
        require_finite("velocity2_mph", velocity2_mph)?;

        let closing_fps = mph_to_fps(velocity1_mph - velocity2_mph);
        if closing_fps <= 0.0 {
            return Ok(TimeToCollision::NoCollision);
        }
        let seconds = finite_result("time_to_collision", distance_ft / closing_fps)?;
        Ok(TimeToCollision::Collision { seconds })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{DEFAULT_FOLLOWING_TIME_S, DEFAULT_REACTION_TIME_S};
    use proptest::prelude::*;

    fn calc() -> PhysicsCalculator<'static> {
        PhysicsCalculator::standard()
    }

    #[test]
    fn test_braking_distance_sixty_mph_dry() {
        let result = calc()
            .braking_distance(60.0, RoadCondition::DryAsphalt, 0.0, DEFAULT_REACTION_TIME_S)
            .unwrap();

        // 88 fps × 1.5 s
        assert!((result.reaction_distance_ft - 132.0).abs() < 1e-6);
        // 88² / (2 × 32.174 × 0.7) = 7744 / 45.0436
        assert!((result.braking_distance_ft - 171.922).abs() < 0.01);
        assert!((result.total_distance_ft - 303.922).abs() < 0.01);
        assert_eq!(result.effective_friction, 0.7);
    }

    #[test]
    fn test_braking_distance_closed_form_is_exact() {
        for mph in [5.0, 25.0, 44.7, 60.0, 85.0] {
            let v = mph_to_fps(mph);
            let expected = v * v / (2.0 * 32.174 * 0.7);
            let result = calc()
                .braking_distance(mph, RoadCondition::DryAsphalt, 0.0, DEFAULT_REACTION_TIME_S)
                .unwrap();
            assert_eq!(result.braking_distance_ft, expected);
        }
    }

    #[test]
    fn test_uphill_shortens_downhill_lengthens() {
        let flat = calc().braking_distance(50.0, RoadCondition::WetAsphalt, 0.0, 1.5).unwrap();
        let up = calc().braking_distance(50.0, RoadCondition::WetAsphalt, 6.0, 1.5).unwrap();
        let down = calc().braking_distance(50.0, RoadCondition::WetAsphalt, -6.0, 1.5).unwrap();
        assert!(up.braking_distance_ft < flat.braking_distance_ft);
        assert!(down.braking_distance_ft > flat.braking_distance_ft);
        assert_eq!(up.reaction_distance_ft, flat.reaction_distance_ft);
    }

    #[test]
    fn test_braking_distance_undefined_on_steep_downhill() {
        let err = calc()
            .braking_distance(40.0, RoadCondition::Snow, -30.0, 1.5)
            .unwrap_err();
        assert_eq!(err.error_code(), "UNDEFINED_PHYSICS");
    }

    #[test]
    fn test_braking_distance_rejects_negative_inputs() {
        assert_eq!(
            calc()
                .braking_distance(-10.0, RoadCondition::DryAsphalt, 0.0, 1.5)
                .unwrap_err()
                .error_code(),
            "INVALID_INPUT"
        );
        assert!(calc().braking_distance(10.0, RoadCondition::DryAsphalt, 0.0, -1.0).is_err());
        assert!(calc().braking_distance(f64::NAN, RoadCondition::DryAsphalt, 0.0, 1.5).is_err());
    }

    #[test]
    fn test_stopping_distance_on_grade_matches_total() {
        let total = calc()
            .stopping_distance_on_grade(45.0, RoadCondition::Gravel, 3.0, 1.5)
            .unwrap();
        let full = calc().braking_distance(45.0, RoadCondition::Gravel, 3.0, 1.5).unwrap();
        assert_eq!(total, full.total_distance_ft);
    }

    #[test]
    fn test_skid_marks_150_ft_dry() {
        let estimate = calc()
            .speed_from_skid_marks(150.0, RoadCondition::DryAsphalt, 0.0)
            .unwrap();
        // √(2 × 32.174 × 0.7 × 150) = 82.20 fps
        assert!((estimate.speed_fps - 82.197).abs() < 0.01);
        assert!((estimate.speed_mph - 56.04).abs() < 0.01);
    }

    #[test]
    fn test_skid_marks_zero_length() {
        let estimate = calc().speed_from_skid_marks(0.0, RoadCondition::Ice, 0.0).unwrap();
        assert_eq!(estimate.speed_mph, 0.0);
    }

    #[test]
    fn test_skid_marks_undefined_and_invalid() {
        assert_eq!(
            calc()
                .speed_from_skid_marks(80.0, RoadCondition::Ice, -12.0)
                .unwrap_err()
                .error_code(),
            "UNDEFINED_PHYSICS"
        );
        assert_eq!(
            calc()
                .speed_from_skid_marks(-1.0, RoadCondition::Ice, 0.0)
                .unwrap_err()
                .error_code(),
            "INVALID_INPUT"
        );
    }

    #[test]
    fn test_following_distance() {
        let d = calc().following_distance(30.0, DEFAULT_FOLLOWING_TIME_S).unwrap();
        assert!((d - 88.0).abs() < 1e-9);
        assert!(calc().following_distance(-30.0, 2.0).is_err());
    }

    #[test]
    fn test_zero_to_sixty() {
        let a = calc().acceleration_from_zero_to_sixty(8.0).unwrap();
        assert!((a.fps2 - 11.0).abs() < 1e-9);
        assert!((a.g - 11.0 / 32.174).abs() < 1e-12);
        assert!(calc().acceleration_from_zero_to_sixty(0.0).is_err());
    }

    #[test]
    fn test_zero_gravity_acceleration_is_undefined() {
        let constants = crate::constants::PhysicalConstants {
            gravity_fps2: 0.0,
            ..*crate::constants::PhysicalConstants::standard()
        };
        let err = PhysicsCalculator::new(&constants)
            .acceleration_from_zero_to_sixty(8.0)
            .unwrap_err();
        assert_eq!(err.error_code(), "UNDEFINED_PHYSICS");
    }

    #[test]
    fn test_time_to_collision() {
        // 30 mph closing = 44 fps
        let ttc = calc().time_to_collision(220.0, 50.0, 20.0).unwrap();
        assert!((ttc.seconds().unwrap() - 5.0).abs() < 1e-9);
        assert!(ttc.is_collision());

        let ttc = calc().time_to_collision(0.0, 10.0, 0.0).unwrap();
        assert_eq!(ttc.seconds(), Some(0.0));
    }

    #[test]
    fn test_time_to_collision_no_collision() {
        assert_eq!(
            calc().time_to_collision(100.0, 30.0, 30.0).unwrap(),
            TimeToCollision::NoCollision
        );
        assert_eq!(
            calc().time_to_collision(100.0, 20.0, 45.0).unwrap(),
            TimeToCollision::NoCollision
        );
        assert!(calc().time_to_collision(-5.0, 20.0, 0.0).is_err());
    }

    #[test]
    fn test_time_to_collision_serialization() {
        let json = serde_json::to_string(&TimeToCollision::NoCollision).unwrap();
        assert_eq!(json, r#"{"outcome":"no_collision"}"#);
        let json = serde_json::to_string(&TimeToCollision::Collision { seconds: 2.5 }).unwrap();
        assert_eq!(json, r#"{"outcome":"collision","seconds":2.5}"#);
    }

    proptest! {
        #[test]
        fn prop_skid_inverts_braking(mph in 0.5f64..150.0) {
            let braking = calc()
                .braking_distance(mph, RoadCondition::DryAsphalt, 0.0, DEFAULT_REACTION_TIME_S)
                .unwrap();
            let estimate = calc()
                .speed_from_skid_marks(braking.braking_distance_ft, RoadCondition::DryAsphalt, 0.0)
                .unwrap();
            prop_assert!((estimate.speed_mph - mph).abs() < 1e-9 * mph.max(1.0));
        }

        #[test]
        fn prop_no_collision_when_not_closing(
            distance in 0.0f64..5000.0,
            v1 in -100.0f64..100.0,
            extra in 0.0f64..100.0,
        ) {
            let ttc = calc().time_to_collision(distance, v1, v1 + extra).unwrap();
            prop_assert_eq!(ttc, TimeToCollision::NoCollision);
        }

        #[test]
        fn prop_braking_distance_never_negative(
            mph in 0.0f64..200.0,
            grade in -60.0f64..60.0,
        ) {
            match calc().braking_distance(mph, RoadCondition::WetAsphalt, grade, 1.5) {
                Ok(d) => {
                    prop_assert!(d.braking_distance_ft >= 0.0);
                    prop_assert!(d.total_distance_ft.is_finite());
                }
                Err(e) => prop_assert_eq!(e.error_code(), "UNDEFINED_PHYSICS"),
            }
        }
    }
}
