//! # recon_core - Accident Reconstruction Calculation Engine
//!
//! `recon_core` provides the deterministic physics and damage-assessment
//! calculations behind collision reconstruction reports. All inputs and
//! outputs are JSON-serializable so that report generators, CLIs, and UI
//! layers can drive the engine with plain data.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions of their inputs and a constants table
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Immutable Records**: Damage-record updates return a new record
//!
//! ## Quick Start
//!
//! ```rust
//! use recon_core::{PhysicsCalculator, RoadCondition};
//!
//! let calc = PhysicsCalculator::standard();
//!
//! // 150 ft of skid on dry asphalt
//! let estimate = calc.speed_from_skid_marks(150.0, RoadCondition::DryAsphalt, 0.0).unwrap();
//! assert!((estimate.speed_mph - 56.0).abs() < 0.1);
//!
//! // Serialize for a report
//! let json = serde_json::to_string_pretty(&estimate).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`physics`] - Kinematics, collision dynamics, and stability formulas
//! - [`damage`] - Damage records, severity, and total-loss assessment
//! - [`calculation`] - Tagged JSON calculation items
//! - [`constants`] - Gravity, friction, drag, and air-density tables
//! - [`units`] - Speed conversions and type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod calculation;
pub mod constants;
pub mod damage;
pub mod errors;
pub mod physics;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculation::{Calculation, CalculationDefaults, CalculationOutput};
pub use constants::{PhysicalConstants, RoadCondition, VehicleClass};
pub use damage::{
    DamageAggregator, DamageSeverity, DamageSummary, DamageZone, DamageZoneObservation, FluidLeak,
    TotalLossReason, VehicleDamageRecord,
};
pub use errors::{ReconError, ReconResult};
pub use physics::PhysicsCalculator;
