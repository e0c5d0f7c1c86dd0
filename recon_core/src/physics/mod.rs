//! # Physics Calculator
//!
//! Deterministic reconstruction formulas. Every operation is a pure function
//! of its arguments and the borrowed [`PhysicalConstants`]: the same inputs
//! always produce bit-identical outputs, which is what lets a figure in a
//! printed report be reproduced later.
//!
//! ## Working Units
//!
//! Formulas run in feet, pounds-force, slugs, and seconds. Speeds cross the
//! public boundary in mph and are converted with [`crate::units`].
//!
//! ## Operations
//!
//! - [`kinematics`] - braking and stopping distance, skid-mark speed,
//!   following distance, 0-60 acceleration, time to collision
//! - [`dynamics`] - mass, momentum, kinetic energy, crush-energy impact
//!   speed, collision delta-v, axle weights
//! - [`stability`] - lateral acceleration, rollover threshold, drag force
//!
//! ## Example
//!
//! ```rust
//! use recon_core::constants::RoadCondition;
//! use recon_core::physics::{PhysicsCalculator, DEFAULT_REACTION_TIME_S};
//!
//! let calc = PhysicsCalculator::standard();
//! let stop = calc
//!     .braking_distance(60.0, RoadCondition::DryAsphalt, 0.0, DEFAULT_REACTION_TIME_S)
//!     .unwrap();
//! assert!((stop.reaction_distance_ft - 132.0).abs() < 1e-6);
//! ```

pub mod dynamics;
pub mod kinematics;
pub mod stability;

pub use dynamics::{AxleWeights, CollisionPair, DeltaV, ImpactSpeedEstimate};
pub use kinematics::{Acceleration, BrakingDistance, SkidSpeedEstimate, TimeToCollision};
pub use stability::RolloverThreshold;

use crate::constants::{PhysicalConstants, RoadCondition};
use crate::errors::{require_finite, ReconError, ReconResult};

/// Default perception-reaction time for stopping distance (s)
pub const DEFAULT_REACTION_TIME_S: f64 = 1.5;

/// Default time gap for following distance (s)
pub const DEFAULT_FOLLOWING_TIME_S: f64 = 2.0;

/// Default frontal crush stiffness for damage-based speed (lb/in)
pub const DEFAULT_STIFFNESS_LB_PER_IN: f64 = 150.0;

/// Reconstruction calculator bound to a set of physical constants.
///
/// Cheap to copy; holds only a shared reference.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsCalculator<'c> {
    constants: &'c PhysicalConstants,
}

impl PhysicsCalculator<'static> {
    /// Calculator using the shared standard constants
    pub fn standard() -> Self {
        PhysicsCalculator {
            constants: PhysicalConstants::standard(),
        }
    }
}

impl Default for PhysicsCalculator<'static> {
    fn default() -> Self {
        PhysicsCalculator::standard()
    }
}

impl<'c> PhysicsCalculator<'c> {
    /// Bind a calculator to constants the caller has already validated.
    pub fn new(constants: &'c PhysicalConstants) -> Self {
        PhysicsCalculator { constants }
    }

    /// Validate the constants, then bind a calculator to them.
    pub fn validated(constants: &'c PhysicalConstants) -> ReconResult<Self> {
        constants.validate()?;
        Ok(PhysicsCalculator { constants })
    }

    /// The constants this calculator reads from
    pub fn constants(&self) -> &'c PhysicalConstants {
        self.constants
    }

    /// Gravitational acceleration in ft/s²
    pub fn gravity(&self) -> f64 {
        self.constants.gravity_fps2
    }

    /// Tire/road friction coefficient for a road condition.
    ///
    /// Infallible: the input domain is the closed [`RoadCondition`] set.
    pub fn friction_coefficient(&self, condition: RoadCondition) -> f64 {
        self.constants.friction_coefficient(condition)
    }

    /// Friction plus grade contribution.
    ///
    /// Positive grade (uphill) adds to the available deceleration, negative
    /// grade (downhill) subtracts from it.
    pub(crate) fn effective_friction(
        &self,
        formula: &str,
        condition: RoadCondition,
        grade_percent: f64,
    ) -> ReconResult<f64> {
        require_finite("grade_percent", grade_percent)?;
        let mu = self.friction_coefficient(condition);
        let effective = mu + grade_percent / 100.0;
        if effective <= 0.0 {
            tracing::warn!(
                formula,
                %condition,
                grade_percent,
                effective,
                "effective friction is not positive"
            );
            return Err(ReconError::undefined_physics(
                formula,
                format!(
                    "effective friction {effective} ≤ 0 ({condition} μ={mu}, \
                     grade {grade_percent}%)"
                ),
            ));
        }
        Ok(effective)
    }
}
