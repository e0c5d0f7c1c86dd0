//! # Vehicle Damage
//!
//! Per-zone damage observations, the immutable vehicle damage record, and
//! the aggregator that derives overall severity and total-loss status.
//!
//! ## Overview
//!
//! - [`DamageSeverity`] - Ordered severity scale, NONE through CATASTROPHIC
//! - [`DamageZone`] - The ten body regions an inspector can record
//! - [`DamageZoneObservation`] - One zone's severity, extent, depth, photos, cost
//! - [`VehicleDamageRecord`] - All observations and flags for one vehicle
//! - [`DamageAggregator`] - Total-loss rules and crush-based speed estimate
//!
//! # Example
//!
//! ```
//! use recon_core::damage::{
//!     DamageAggregator, DamageSeverity, DamageZone, DamageZoneObservation,
//!     VehicleDamageRecord, DEFAULT_TOTAL_LOSS_THRESHOLD,
//! };
//!
//! let record = VehicleDamageRecord::new("V1")
//!     .add_zone(DamageZoneObservation::new(DamageZone::Front, DamageSeverity::Major, 90.0, 70.0))
//!     .unwrap()
//!     .set_total_estimated_cost(Some(20_000.0))
//!     .unwrap();
//!
//! let aggregator = DamageAggregator::default();
//! let total_loss = aggregator
//!     .is_total_loss(&record, Some(25_000.0), DEFAULT_TOTAL_LOSS_THRESHOLD)
//!     .unwrap();
//! assert!(total_loss);
//! ```

pub mod aggregator;
pub mod record;
pub mod severity;
pub mod zone;

pub use aggregator::{
    overall_severity,
    DamageAggregator,
    DamageSummary,
    TotalLossReason,
    DEFAULT_TOTAL_LOSS_THRESHOLD,
};
pub use record::VehicleDamageRecord;
pub use severity::DamageSeverity;
pub use zone::{DamageZone, DamageZoneObservation, FluidLeak};
