//! # Calculation Items
//!
//! JSON-first wrapper around every [`PhysicsCalculator`] operation so that
//! report generators and UI layers can submit a calculation as data and get
//! a typed result back.
//!
//! Each item follows the pattern:
//!
//! - [`Calculation`] - tagged input (`"type": "braking_distance"`, ...)
//! - [`CalculationOutput`] - tagged result
//! - [`Calculation::evaluate`] - pure evaluation against a calculator
//!
//! Optional parameters (reaction time, crush stiffness, ...) fall back to
//! [`CalculationDefaults`] when omitted.
//!
//! ## Example
//!
//! ```rust
//! use recon_core::calculation::{Calculation, CalculationDefaults, CalculationOutput};
//! use recon_core::physics::PhysicsCalculator;
//!
//! let calc: Calculation = serde_json::from_str(
//!     r#"{ "type": "skid_marks", "length_ft": 150.0, "condition": "dry_asphalt" }"#,
//! ).unwrap();
//!
//! let output = calc
//!     .evaluate(&PhysicsCalculator::standard(), &CalculationDefaults::default())
//!     .unwrap();
//! match output {
//!     CalculationOutput::SkidSpeed(estimate) => assert!(estimate.speed_mph > 55.0),
//!     _ => unreachable!(),
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{RoadCondition, VehicleClass};
use crate::damage::DEFAULT_TOTAL_LOSS_THRESHOLD;
use crate::errors::{require_finite, ReconError, ReconResult};
use crate::physics::{
    Acceleration, AxleWeights, BrakingDistance, CollisionPair, DeltaV, ImpactSpeedEstimate,
    PhysicsCalculator, RolloverThreshold, SkidSpeedEstimate, TimeToCollision,
    DEFAULT_FOLLOWING_TIME_S, DEFAULT_REACTION_TIME_S, DEFAULT_STIFFNESS_LB_PER_IN,
};
use crate::units::{fps_to_kph, fps_to_mph, kph_to_mph, mph_to_fps, mph_to_kph};

/// Values used when a calculation omits an optional parameter.
///
/// ## TOML Example
///
/// ```toml
/// reaction_time_s = 1.5
/// following_time_s = 2.0
/// stiffness_lb_per_in = 150.0
/// total_loss_threshold = 0.75
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationDefaults {
    /// Perception-reaction time for stopping distance (s)
    pub reaction_time_s: f64,

    /// Time gap for following distance (s)
    pub following_time_s: f64,

    /// Crush stiffness for damage-based speed (lb/in)
    pub stiffness_lb_per_in: f64,

    /// Repair cost / vehicle value ratio for a total loss
    pub total_loss_threshold: f64,
}

impl Default for CalculationDefaults {
    fn default() -> Self {
        CalculationDefaults {
            reaction_time_s: DEFAULT_REACTION_TIME_S,
            following_time_s: DEFAULT_FOLLOWING_TIME_S,
            stiffness_lb_per_in: DEFAULT_STIFFNESS_LB_PER_IN,
            total_loss_threshold: DEFAULT_TOTAL_LOSS_THRESHOLD,
        }
    }
}

impl CalculationDefaults {
    /// Validate the defaults.
    pub fn validate(&self) -> ReconResult<()> {
        let checks = [
            ("reaction_time_s", self.reaction_time_s, self.reaction_time_s >= 0.0),
            ("following_time_s", self.following_time_s, self.following_time_s >= 0.0),
            ("stiffness_lb_per_in", self.stiffness_lb_per_in, self.stiffness_lb_per_in > 0.0),
            (
                "total_loss_threshold",
                self.total_loss_threshold,
                self.total_loss_threshold > 0.0 && self.total_loss_threshold <= 1.0,
            ),
        ];
        for (key, value, ok) in checks {
            if !(value.is_finite() && ok) {
                return Err(ReconError::invalid_config(key, format!("out of range: {value}")));
            }
        }
        Ok(())
    }
}

/// Unit a speed conversion starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedUnit {
    Mph,
    Fps,
    Kph,
}

/// A single calculation request.
///
/// ## JSON Example
///
/// ```json
/// { "type": "braking_distance", "velocity_mph": 60, "condition": "wet_asphalt" }
/// { "type": "delta_v", "weight1_lb": 3500, "velocity1_mph": 40, "weight2_lb": 3000 }
/// { "type": "time_to_collision", "distance_ft": 250, "velocity1_mph": 55 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Calculation {
    ConvertSpeed {
        value: f64,
        unit: SpeedUnit,
    },
    Mass {
        weight_lb: f64,
    },
    Momentum {
        weight_lb: f64,
        velocity_mph: f64,
    },
    KineticEnergy {
        weight_lb: f64,
        velocity_mph: f64,
    },
    BrakingDistance {
        velocity_mph: f64,
        condition: RoadCondition,
        #[serde(default)]
        grade_percent: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reaction_time_s: Option<f64>,
    },
    StoppingDistanceOnGrade {
        velocity_mph: f64,
        condition: RoadCondition,
        #[serde(default)]
        grade_percent: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reaction_time_s: Option<f64>,
    },
    SkidMarks {
        length_ft: f64,
        condition: RoadCondition,
        #[serde(default)]
        grade_percent: f64,
    },
    ImpactSpeedFromDamage {
        crush_depth_in: f64,
        weight_lb: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        stiffness_lb_per_in: Option<f64>,
    },
    DeltaV(CollisionPair),
    LateralAcceleration {
        velocity_mph: f64,
        turn_radius_ft: f64,
    },
    RolloverSpeed {
        track_width_ft: f64,
        cg_height_ft: f64,
        turn_radius_ft: f64,
    },
    TimeToCollision {
        distance_ft: f64,
        velocity1_mph: f64,
        #[serde(default)]
        velocity2_mph: f64,
    },
    FollowingDistance {
        velocity_mph: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reaction_time_s: Option<f64>,
    },
    ZeroToSixty {
        seconds: f64,
    },
    AxleWeights {
        total_weight_lb: f64,
        front_percent: f64,
        rear_percent: f64,
    },
    DragForce {
        velocity_mph: f64,
        frontal_area_sqft: f64,
        vehicle_class: VehicleClass,
    },
}

/// Result of a [`Calculation`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalculationOutput {
    Speed { mph: f64, fps: f64, kph: f64 },
    Mass { slugs: f64 },
    Momentum { slug_fps: f64 },
    KineticEnergy { ftlb: f64 },
    BrakingDistance(BrakingDistance),
    StoppingDistance { total_distance_ft: f64 },
    SkidSpeed(SkidSpeedEstimate),
    ImpactSpeed(ImpactSpeedEstimate),
    DeltaV(DeltaV),
    LateralAcceleration { g: f64 },
    Rollover(RolloverThreshold),
    TimeToCollision { result: TimeToCollision },
    FollowingDistance { distance_ft: f64 },
    Acceleration(Acceleration),
    AxleWeights(AxleWeights),
    DragForce { lbf: f64 },
}

impl Calculation {
    /// Short name of the calculation type
    pub fn kind(&self) -> &'static str {
        match self {
            Calculation::ConvertSpeed { .. } => "convert_speed",
            Calculation::Mass { .. } => "mass",
            Calculation::Momentum { .. } => "momentum",
            Calculation::KineticEnergy { .. } => "kinetic_energy",
            Calculation::BrakingDistance { .. } => "braking_distance",
            Calculation::StoppingDistanceOnGrade { .. } => "stopping_distance_on_grade",
            Calculation::SkidMarks { .. } => "skid_marks",
            Calculation::ImpactSpeedFromDamage { .. } => "impact_speed_from_damage",
            Calculation::DeltaV(_) => "delta_v",
            Calculation::LateralAcceleration { .. } => "lateral_acceleration",
            Calculation::RolloverSpeed { .. } => "rollover_speed",
            Calculation::TimeToCollision { .. } => "time_to_collision",
            Calculation::FollowingDistance { .. } => "following_distance",
            Calculation::ZeroToSixty { .. } => "zero_to_sixty",
            Calculation::AxleWeights { .. } => "axle_weights",
            Calculation::DragForce { .. } => "drag_force",
        }
    }

    /// Evaluate against a calculator.
    pub fn evaluate(
        &self,
        calc: &PhysicsCalculator<'_>,
        defaults: &CalculationDefaults,
    ) -> ReconResult<CalculationOutput> {
        let output = match *self {
            Calculation::ConvertSpeed { value, unit } => {
                require_finite("value", value)?;
                let mph = match unit {
                    SpeedUnit::Mph => value,
                    SpeedUnit::Fps => fps_to_mph(value),
                    SpeedUnit::Kph => kph_to_mph(value),
                };
                let fps = match unit {
                    SpeedUnit::Fps => value,
                    _ => mph_to_fps(mph),
                };
                let kph = match unit {
                    SpeedUnit::Kph => value,
                    SpeedUnit::Fps => fps_to_kph(value),
                    SpeedUnit::Mph => mph_to_kph(value),
                };
                CalculationOutput::Speed { mph, fps, kph }
            }
            Calculation::Mass { weight_lb } => CalculationOutput::Mass {
                slugs: calc.mass(weight_lb)?,
            },
            Calculation::Momentum { weight_lb, velocity_mph } => CalculationOutput::Momentum {
                slug_fps: calc.momentum(weight_lb, velocity_mph)?,
            },
            Calculation::KineticEnergy {
                weight_lb,
                velocity_mph,
            } => CalculationOutput::KineticEnergy {
                ftlb: calc.kinetic_energy(weight_lb, velocity_mph)?.value(),
            },
            Calculation::BrakingDistance {
                velocity_mph,
                condition,
                grade_percent,
                reaction_time_s,
            } => CalculationOutput::BrakingDistance(calc.braking_distance(
                velocity_mph,
                condition,
                grade_percent,
                reaction_time_s.unwrap_or(defaults.reaction_time_s),
            )?),
            Calculation::StoppingDistanceOnGrade {
                velocity_mph,
                condition,
                grade_percent,
                reaction_time_s,
            } => CalculationOutput::StoppingDistance {
                total_distance_ft: calc.stopping_distance_on_grade(
                    velocity_mph,
                    condition,
                    grade_percent,
                    reaction_time_s.unwrap_or(defaults.reaction_time_s),
                )?,
            },
            Calculation::SkidMarks {
                length_ft,
                condition,
                grade_percent,
            } => CalculationOutput::SkidSpeed(calc.speed_from_skid_marks(
                length_ft,
                condition,
                grade_percent,
            )?),
            Calculation::ImpactSpeedFromDamage {
                crush_depth_in,
                weight_lb,
                stiffness_lb_per_in,
            } => CalculationOutput::ImpactSpeed(calc.impact_speed_from_damage(
                crush_depth_in,
                weight_lb,
                stiffness_lb_per_in.unwrap_or(defaults.stiffness_lb_per_in),
            )?),
            Calculation::DeltaV(ref pair) => CalculationOutput::DeltaV(calc.delta_v(pair)?),
            Calculation::LateralAcceleration {
                velocity_mph,
                turn_radius_ft,
            } => CalculationOutput::LateralAcceleration {
                g: calc.lateral_acceleration(velocity_mph, turn_radius_ft)?,
            },
            Calculation::RolloverSpeed {
                track_width_ft,
                cg_height_ft,
                turn_radius_ft,
            } => CalculationOutput::Rollover(calc.rollover_speed(
                track_width_ft,
                cg_height_ft,
                turn_radius_ft,
            )?),
            Calculation::TimeToCollision {
                distance_ft,
                velocity1_mph,
                velocity2_mph,
            } => CalculationOutput::TimeToCollision {
                result: calc.time_to_collision(distance_ft, velocity1_mph, velocity2_mph)?,
            },
            Calculation::FollowingDistance {
                velocity_mph,
                reaction_time_s,
            } => CalculationOutput::FollowingDistance {
                distance_ft: calc.following_distance(
                    velocity_mph,
                    reaction_time_s.unwrap_or(defaults.following_time_s),
                )?,
            },
            Calculation::ZeroToSixty { seconds } => {
                CalculationOutput::Acceleration(calc.acceleration_from_zero_to_sixty(seconds)?)
            }
            Calculation::AxleWeights {
                total_weight_lb,
                front_percent,
                rear_percent,
            } => CalculationOutput::AxleWeights(calc.axle_weights(
                total_weight_lb,
                front_percent,
                rear_percent,
            )?),
            Calculation::DragForce {
                velocity_mph,
                frontal_area_sqft,
                vehicle_class,
            } => CalculationOutput::DragForce {
                lbf: calc.drag_force(velocity_mph, frontal_area_sqft, vehicle_class)?,
            },
        };
        Ok(output)
    }
}
