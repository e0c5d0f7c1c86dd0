//! # Dynamics
//!
//! Mass, momentum, and energy relations, including the two collision
//! estimators used in reconstruction reports.
//!
//! ## Crush Energy
//!
//! ```text
//! E = ½ × k × d²        (in·lb, reported in ft·lb)
//! v = √(2 × E / m)
//! ```
//!
//! ## Delta-V
//!
//! One-dimensional impact with coefficient of restitution `e`:
//!
//! ```text
//! v1' = (m1·u1 + m2·u2 + m2·e·(u2 − u1)) / (m1 + m2)
//! v2' = (m1·u1 + m2·u2 + m1·e·(u1 − u2)) / (m1 + m2)
//! Δv  = |v' − u|
//! ```
//!
//! Only the magnitude of each vehicle's velocity change is reported.
//! Consumers use delta-v as an injury-severity proxy; direction of the
//! change is not part of the result.

use serde::{Deserialize, Serialize};

use super::PhysicsCalculator;
use crate::errors::{
    finite_result, require_finite, require_non_negative, require_positive, ReconError, ReconResult,
};
use crate::units::{fps_to_mph, mph_to_fps, FtLb, InLb};

/// Tolerance when checking that axle percentages add up to 100
const AXLE_PERCENT_TOLERANCE: f64 = 0.01;

/// Impact speed implied by crush depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactSpeedEstimate {
    /// Energy absorbed by the deformed structure (ft·lb)
    pub absorbed_energy_ftlb: f64,

    /// Equivalent impact speed (ft/s)
    pub speed_fps: f64,

    /// Equivalent impact speed (mph)
    pub speed_mph: f64,
}

/// Two vehicles at the moment of impact.
///
/// Velocities are signed along the line of impact. Transient input only;
/// nothing in this crate stores a `CollisionPair`.
///
/// ## JSON Example
///
/// ```json
/// {
///   "weight1_lb": 3500.0,
///   "velocity1_mph": 40.0,
///   "weight2_lb": 3000.0,
///   "velocity2_mph": 0.0,
///   "restitution": 0.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionPair {
    pub weight1_lb: f64,
    pub velocity1_mph: f64,
    pub weight2_lb: f64,
    pub velocity2_mph: f64,

    /// Coefficient of restitution: 0 = perfectly inelastic, 1 = perfectly elastic
    #[serde(default)]
    pub restitution: f64,
}

impl CollisionPair {
    /// Perfectly inelastic pair (restitution 0)
    pub fn new(weight1_lb: f64, velocity1_mph: f64, weight2_lb: f64, velocity2_mph: f64) -> Self {
        CollisionPair {
            weight1_lb,
            velocity1_mph,
            weight2_lb,
            velocity2_mph,
            restitution: 0.0,
        }
    }

    /// Set the coefficient of restitution (builder pattern)
    pub fn with_restitution(mut self, restitution: f64) -> Self {
        self.restitution = restitution;
        self
    }

    /// Validate input parameters.
    pub fn validate(&self) -> ReconResult<()> {
        require_positive("weight1_lb", self.weight1_lb, "Weight must be positive")?;
        require_positive("weight2_lb", self.weight2_lb, "Weight must be positive")?;
        require_finite("velocity1_mph", self.velocity1_mph)?;
        require_finite("velocity2_mph", self.velocity2_mph)?;
        require_finite("restitution", self.restitution)?;
        if !(0.0..=1.0).contains(&self.restitution) {
            return Err(ReconError::invalid_input(
                "restitution",
                self.restitution.to_string(),
                "Coefficient of restitution must be between 0 and 1",
            ));
        }
        Ok(())
    }
}

/// Magnitude of each vehicle's velocity change (mph).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeltaV {
    pub vehicle1_mph: f64,
    pub vehicle2_mph: f64,
}

/// Static weight on each axle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxleWeights {
    pub front_lb: f64,
    pub rear_lb: f64,
}

impl<'c> PhysicsCalculator<'c> {
    /// Mass in slugs: `weight / g`.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - weight ≤ 0
    pub fn mass(&self, weight_lb: f64) -> ReconResult<f64> {
        require_positive("weight_lb", weight_lb, "Weight must be positive")?;
        finite_result("mass", weight_lb / self.gravity())
    }

    /// Linear momentum (slug·ft/s), signed with the velocity.
    pub fn momentum(&self, weight_lb: f64, velocity_mph: f64) -> ReconResult<f64> {
        require_non_negative("weight_lb", weight_lb, "Weight cannot be negative")?;
        require_finite("velocity_mph", velocity_mph)?;
        finite_result("momentum", weight_lb / self.gravity() * mph_to_fps(velocity_mph))
    }

    /// Kinetic energy (ft·lb).
    pub fn kinetic_energy(&self, weight_lb: f64, velocity_mph: f64) -> ReconResult<FtLb> {
        require_non_negative("weight_lb", weight_lb, "Weight cannot be negative")?;
        require_finite("velocity_mph", velocity_mph)?;
        let v = mph_to_fps(velocity_mph);
        finite_result("kinetic_energy", 0.5 * (weight_lb / self.gravity()) * v * v).map(FtLb)
    }

    /// Impact speed from crush depth and structural stiffness.
    ///
    /// # Arguments
    ///
    /// * `crush_depth_in` - Maximum residual crush (in, > 0)
    /// * `weight_lb` - Vehicle weight (> 0)
    /// * `stiffness_lb_per_in` - Crush stiffness (> 0), typically
    ///   [`DEFAULT_STIFFNESS_LB_PER_IN`](super::DEFAULT_STIFFNESS_LB_PER_IN)
    pub fn impact_speed_from_damage(
        &self,
        crush_depth_in: f64,
        weight_lb: f64,
        stiffness_lb_per_in: f64,
    ) -> ReconResult<ImpactSpeedEstimate> {
        require_positive("crush_depth_in", crush_depth_in, "Crush depth must be positive")?;
        require_positive("stiffness_lb_per_in", stiffness_lb_per_in, "Stiffness must be positive")?;
        let mass = self.mass(weight_lb)?;

        let absorbed: FtLb =
            InLb(0.5 * stiffness_lb_per_in * crush_depth_in * crush_depth_in).into();
        let speed_fps =
            finite_result("impact_speed_from_damage", (2.0 * absorbed.value() / mass).sqrt())?;
        let speed_mph = fps_to_mph(speed_fps);

        tracing::debug!(
            crush_depth_in,
            weight_lb,
            stiffness_lb_per_in,
            speed_mph,
            "crush energy speed"
        );

        Ok(ImpactSpeedEstimate {
            absorbed_energy_ftlb: absorbed.value(),
            speed_fps,
            speed_mph,
        })
    }

    /// Delta-v for both vehicles of a collision pair.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - non-positive weight, non-finite velocity, or
    ///   restitution outside [0, 1]
    pub fn delta_v(&self, pair: &CollisionPair) -> ReconResult<DeltaV> {
        pair.validate()?;

        let m1 = self.mass(pair.weight1_lb)?;
        let m2 = self.mass(pair.weight2_lb)?;
        let u1 = mph_to_fps(pair.velocity1_mph);
        let u2 = mph_to_fps(pair.velocity2_mph);
        let e = pair.restitution;

        let total_mass = m1 + m2;
        let momentum = m1 * u1 + m2 * u2;
        let v1 = (momentum + m2 * e * (u2 - u1)) / total_mass;
        let v2 = (momentum + m1 * e * (u1 - u2)) / total_mass;

        let vehicle1_mph = finite_result("delta_v", fps_to_mph((v1 - u1).abs()))?;
        let vehicle2_mph = finite_result("delta_v", fps_to_mph((v2 - u2).abs()))?;

        tracing::debug!(
            weight1_lb = pair.weight1_lb,
            weight2_lb = pair.weight2_lb,
            restitution = e,
            vehicle1_mph,
            vehicle2_mph,
            "delta-v"
        );

        Ok(DeltaV {
            vehicle1_mph,
            vehicle2_mph,
        })
    }

    /// Split total weight across the axles.
    ///
    /// Percentages must each lie in [0, 100] and add up to 100.
    pub fn axle_weights(
        &self,
        total_weight_lb: f64,
        front_percent: f64,
        rear_percent: f64,
    ) -> ReconResult<AxleWeights> {
        require_positive("total_weight_lb", total_weight_lb, "Weight must be positive")?;
        for (field, value) in [("front_percent", front_percent), ("rear_percent", rear_percent)] {
            require_finite(field, value)?;
            if !(0.0..=100.0).contains(&value) {
                return Err(ReconError::invalid_input(
                    field,
                    value.to_string(),
                    "Percentage must be between 0 and 100",
                ));
            }
        }
        let sum = front_percent + rear_percent;
        if (sum - 100.0).abs() > AXLE_PERCENT_TOLERANCE {
            return Err(ReconError::invalid_input(
                "front_percent + rear_percent",
                sum.to_string(),
                "Axle percentages must add up to 100",
            ));
        }
        Ok(AxleWeights {
            front_lb: total_weight_lb * front_percent / 100.0,
            rear_lb: total_weight_lb * rear_percent / 100.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::DEFAULT_STIFFNESS_LB_PER_IN;
    use proptest::prelude::*;

    fn calc() -> PhysicsCalculator<'static> {
        PhysicsCalculator::standard()
    }

    #[test]
    fn test_mass() {
        let m = calc().mass(3217.4).unwrap();
        assert!((m - 100.0).abs() < 1e-9);
        assert!(calc().mass(0.0).is_err());
        assert!(calc().mass(-100.0).is_err());
    }

    #[test]
    fn test_momentum_and_energy() {
        // 3217.4 lb = 100 slug; 30 mph = 44 fps
        let p = calc().momentum(3217.4, 30.0).unwrap();
        assert!((p - 4400.0).abs() < 1e-6);
        let p = calc().momentum(3217.4, -30.0).unwrap();
        assert!((p + 4400.0).abs() < 1e-6);

        let ke = calc().kinetic_energy(3217.4, 30.0).unwrap();
        assert!((ke.0 - 96_800.0).abs() < 1e-6);

        assert_eq!(calc().momentum(0.0, 30.0).unwrap(), 0.0);
        assert!(calc().momentum(-1.0, 30.0).is_err());
        assert!(calc().kinetic_energy(-1.0, 30.0).is_err());
    }

    #[test]
    fn test_impact_speed_from_damage() {
        // E = ½ × 150 × 12² = 10800 in·lb = 900 ft·lb; m = 100 slug
        // v = √(2 × 900 / 100) = √18 fps
        let est = calc()
            .impact_speed_from_damage(12.0, 3217.4, DEFAULT_STIFFNESS_LB_PER_IN)
            .unwrap();
        assert!((est.absorbed_energy_ftlb - 900.0).abs() < 1e-9);
        assert!((est.speed_fps - 18.0f64.sqrt()).abs() < 1e-9);
        assert!((est.speed_mph - fps_to_mph(18.0f64.sqrt())).abs() < 1e-9);
    }

    #[test]
    fn test_impact_speed_rejects_non_positive() {
        assert!(calc().impact_speed_from_damage(0.0, 3000.0, 150.0).is_err());
        assert!(calc().impact_speed_from_damage(5.0, 0.0, 150.0).is_err());
        assert!(calc().impact_speed_from_damage(5.0, 3000.0, -1.0).is_err());
    }

    #[test]
    fn test_delta_v_elastic_equal_masses() {
        let pair = CollisionPair::new(3000.0, 30.0, 3000.0, -30.0).with_restitution(1.0);
        let dv = calc().delta_v(&pair).unwrap();
        assert!((dv.vehicle1_mph - 60.0).abs() < 1e-9);
        assert!((dv.vehicle2_mph - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_delta_v_inelastic_rear_end() {
        // Common velocity = 3500 × 40 / 6500 = 21.538 mph
        let pair = CollisionPair::new(3500.0, 40.0, 3000.0, 0.0);
        let dv = calc().delta_v(&pair).unwrap();
        assert!((dv.vehicle1_mph - (40.0 - 140_000.0 / 6500.0)).abs() < 1e-9);
        assert!((dv.vehicle2_mph - 140_000.0 / 6500.0).abs() < 1e-9);
        // Each vehicle's delta-v is proportional to the other's mass share
        assert!((dv.vehicle1_mph / dv.vehicle2_mph - 3000.0 / 3500.0).abs() < 1e-9);
    }

    #[test]
    fn test_delta_v_rejects_bad_restitution() {
        let pair = CollisionPair::new(3000.0, 30.0, 3000.0, 0.0).with_restitution(1.2);
        let err = calc().delta_v(&pair).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
        let pair = CollisionPair::new(3000.0, 30.0, 3000.0, 0.0).with_restitution(-0.1);
        assert!(calc().delta_v(&pair).is_err());
        let pair = CollisionPair::new(0.0, 30.0, 3000.0, 0.0);
        assert!(calc().delta_v(&pair).is_err());
    }

    #[test]
    fn test_collision_pair_json_default_restitution() {
        let pair: CollisionPair = serde_json::from_str(
            r#"{"weight1_lb": 3500, "velocity1_mph": 40, "weight2_lb": 3000, "velocity2_mph": 0}"#,
        )
        .unwrap();
        assert_eq!(pair.restitution, 0.0);
    }

    #[test]
    fn test_axle_weights() {
        let axles = calc().axle_weights(4000.0, 60.0, 40.0).unwrap();
        assert_eq!(axles.front_lb, 2400.0);
        assert_eq!(axles.rear_lb, 1600.0);

        assert!(calc().axle_weights(4000.0, 60.0, 30.0).is_err());
        assert!(calc().axle_weights(4000.0, 120.0, -20.0).is_err());
        assert!(calc().axle_weights(0.0, 50.0, 50.0).is_err());
    }

    proptest! {
        #[test]
        fn prop_mass_round_trip(weight in 1.0f64..200_000.0) {
            let m = calc().mass(weight).unwrap();
            prop_assert!((m * 32.174 - weight).abs() < 1e-9 * weight);
        }

        #[test]
        fn prop_delta_v_conserves_momentum(
            w1 in 100.0f64..80_000.0,
            w2 in 100.0f64..80_000.0,
            v1 in -100.0f64..100.0,
            v2 in -100.0f64..100.0,
            e in 0.0f64..=1.0,
        ) {
            let pair = CollisionPair::new(w1, v1, w2, v2).with_restitution(e);
            let dv = calc().delta_v(&pair).unwrap();
            // Equal and opposite impulses: m1·Δv1 = m2·Δv2
            let lhs = w1 * dv.vehicle1_mph;
            let rhs = w2 * dv.vehicle2_mph;
            prop_assert!((lhs - rhs).abs() <= 1e-6 * lhs.max(rhs).max(1.0));
        }
    }
}
