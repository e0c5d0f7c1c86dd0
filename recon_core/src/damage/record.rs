//! # Vehicle Damage Record
//!
//! A vehicle's damage record is a value: every update returns a new record
//! and leaves the caller's copy untouched, so earlier versions can be kept
//! for audit history.
//!
//! `overall_severity` is a cached derived value. It is recomputed from the
//! zone set on every update and on deserialization; there is no setter.
//!
//! ## Example
//!
//! ```rust
//! use recon_core::damage::{
//!     DamageSeverity, DamageZone, DamageZoneObservation, VehicleDamageRecord,
//! };
//!
//! let v1 = VehicleDamageRecord::new("VIN 1HGCM82633A004352");
//! let v2 = v1
//!     .add_zone(DamageZoneObservation::new(DamageZone::Front, DamageSeverity::Severe, 70.0, 45.0))
//!     .unwrap();
//!
//! assert_eq!(v1.overall_severity(), DamageSeverity::None);
//! assert_eq!(v2.overall_severity(), DamageSeverity::Severe);
//! ```

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::aggregator::overall_severity;
use super::{DamageSeverity, DamageZone, DamageZoneObservation, FluidLeak};
use crate::errors::{require_non_negative, ReconError, ReconResult};

/// Damage observations and condition flags for one vehicle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "StoredDamageRecord")]
pub struct VehicleDamageRecord {
    id: Uuid,
    vehicle_ref: String,
    zones: BTreeMap<DamageZone, DamageZoneObservation>,
    overall_severity: DamageSeverity,
    is_drivable: bool,
    airbags_deployed: bool,
    fluid_leaks: BTreeSet<FluidLeak>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total_estimated_cost: Option<f64>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Wire form of a record. `overall_severity` is accepted but ignored.
#[derive(Deserialize)]
struct StoredDamageRecord {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    #[serde(default)]
    vehicle_ref: String,
    #[serde(default)]
    zones: BTreeMap<DamageZone, DamageZoneObservation>,
    #[serde(default = "default_drivable")]
    is_drivable: bool,
    #[serde(default)]
    airbags_deployed: bool,
    #[serde(default)]
    fluid_leaks: BTreeSet<FluidLeak>,
    #[serde(default)]
    total_estimated_cost: Option<f64>,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

fn default_drivable() -> bool {
    true
}

impl TryFrom<StoredDamageRecord> for VehicleDamageRecord {
    type Error = ReconError;

    fn try_from(stored: StoredDamageRecord) -> ReconResult<Self> {
        let mut zones = BTreeMap::new();
        for (key, observation) in stored.zones {
            if key != observation.zone {
                return Err(ReconError::Serialization {
                    reason: format!(
                        "zone entry '{key}' holds an observation for '{}'",
                        observation.zone
                    ),
                });
            }
            observation.validate()?;
            zones.insert(key, observation.normalized());
        }
        if let Some(cost) = stored.total_estimated_cost {
            validate_total_cost(cost)?;
        }

        let overall_severity = overall_severity(zones.values().map(|z| z.severity));
        Ok(VehicleDamageRecord {
            id: stored.id,
            vehicle_ref: stored.vehicle_ref,
            zones,
            overall_severity,
            is_drivable: stored.is_drivable,
            airbags_deployed: stored.airbags_deployed,
            fluid_leaks: stored.fluid_leaks,
            total_estimated_cost: stored.total_estimated_cost,
            created_at: stored.created_at,
            updated_at: stored.updated_at.unwrap_or(stored.created_at),
        })
    }
}

fn validate_total_cost(cost: f64) -> ReconResult<f64> {
    require_non_negative("total_estimated_cost", cost, "Repair cost must be a non-negative amount")
}

impl VehicleDamageRecord {
    /// Create an empty record: no damage, drivable, no airbags, no leaks.
    pub fn new(vehicle_ref: impl Into<String>) -> Self {
        let now = Utc::now();
        VehicleDamageRecord {
            id: Uuid::new_v4(),
            vehicle_ref: vehicle_ref.into(),
            zones: BTreeMap::new(),
            overall_severity: DamageSeverity::None,
            is_drivable: true,
            airbags_deployed: false,
            fluid_leaks: BTreeSet::new(),
            total_estimated_cost: None,
            created_at: now,
            updated_at: now,
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Record identifier
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Reference to the owning vehicle (VIN, plate, or case vehicle number)
    pub fn vehicle_ref(&self) -> &str {
        &self.vehicle_ref
    }

    /// Observations in zone order
    pub fn zones(&self) -> impl Iterator<Item = &DamageZoneObservation> {
        self.zones.values()
    }

    /// Observation for one zone, if recorded
    pub fn zone(&self, zone: DamageZone) -> Option<&DamageZoneObservation> {
        self.zones.get(&zone)
    }

    /// Number of recorded zones
    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    /// Aggregated severity of the current zone set
    pub fn overall_severity(&self) -> DamageSeverity {
        self.overall_severity
    }

    pub fn is_drivable(&self) -> bool {
        self.is_drivable
    }

    pub fn airbags_deployed(&self) -> bool {
        self.airbags_deployed
    }

    pub fn fluid_leaks(&self) -> &BTreeSet<FluidLeak> {
        &self.fluid_leaks
    }

    /// Total repair-cost estimate.
    ///
    /// The record-level estimate when one was set, otherwise the sum of the
    /// per-zone estimates when at least one zone has one.
    pub fn total_estimated_cost(&self) -> Option<f64> {
        self.total_estimated_cost.or_else(|| {
            self.zones
                .values()
                .filter_map(|z| z.estimated_repair_cost)
                .fold(None, |acc, cost| Some(acc.unwrap_or(0.0) + cost))
        })
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // ------------------------------------------------------------------
    // Updates (each returns a new record)
    // ------------------------------------------------------------------

    /// Record a zone, replacing any existing observation for it.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - negative or non-finite repair cost or crush depth
    pub fn add_zone(&self, observation: DamageZoneObservation) -> ReconResult<Self> {
        observation.validate()?;
        let observation = observation.normalized();
        let mut next = self.clone();
        next.zones.insert(observation.zone, observation);
        Ok(next.refreshed())
    }

    /// Drop a zone's observation. Removing an unrecorded zone is a no-op.
    pub fn remove_zone(&self, zone: DamageZone) -> Self {
        let mut next = self.clone();
        next.zones.remove(&zone);
        next.refreshed()
    }

    /// Append an evidence photo to a recorded zone.
    ///
    /// Duplicate references are kept in order.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - the zone has no observation to attach to
    pub fn add_photo(&self, zone: DamageZone, photo_id: impl Into<String>) -> ReconResult<Self> {
        let mut next = self.clone();
        let observation = next.zones.get_mut(&zone).ok_or_else(|| {
            ReconError::invalid_input("zone", zone.to_string(), "Zone has no recorded observation")
        })?;
        observation.photo_ids.push(photo_id.into());
        Ok(next.touched())
    }

    /// Remove the first matching photo reference from a zone.
    ///
    /// No-op when the zone or the reference is absent.
    pub fn remove_photo(&self, zone: DamageZone, photo_id: &str) -> Self {
        let mut next = self.clone();
        if let Some(observation) = next.zones.get_mut(&zone) {
            if let Some(index) = observation.photo_ids.iter().position(|p| p == photo_id) {
                observation.photo_ids.remove(index);
            }
        }
        next.touched()
    }

    pub fn set_drivability(&self, is_drivable: bool) -> Self {
        let mut next = self.clone();
        next.is_drivable = is_drivable;
        next.touched()
    }

    pub fn set_airbag_deployed(&self, deployed: bool) -> Self {
        let mut next = self.clone();
        next.airbags_deployed = deployed;
        next.touched()
    }

    pub fn add_fluid_leak(&self, leak: FluidLeak) -> Self {
        let mut next = self.clone();
        next.fluid_leaks.insert(leak);
        next.touched()
    }

    pub fn remove_fluid_leak(&self, leak: FluidLeak) -> Self {
        let mut next = self.clone();
        next.fluid_leaks.remove(&leak);
        next.touched()
    }

    /// Set or clear the record-level repair-cost estimate.
    ///
    /// # Errors
    ///
    /// * `InvalidInput` - negative or non-finite cost
    pub fn set_total_estimated_cost(&self, cost: Option<f64>) -> ReconResult<Self> {
        if let Some(value) = cost {
            validate_total_cost(value)?;
        }
        let mut next = self.clone();
        next.total_estimated_cost = cost;
        Ok(next.touched())
    }

    fn refreshed(mut self) -> Self {
        self.overall_severity = overall_severity(self.zones.values().map(|z| z.severity));
        self.touched()
    }

    fn touched(mut self) -> Self {
        // Never move backwards if the wall clock does
        self.updated_at = Utc::now().max(self.updated_at);
        self
    }
}
