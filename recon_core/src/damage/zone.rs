//! Body zones, per-zone observations, and fluid leaks.

use serde::{Deserialize, Serialize};

use super::DamageSeverity;
use crate::errors::{require_non_negative, ReconResult};

/// One of the ten predefined body regions an inspector can record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DamageZone {
    Front,
    FrontLeft,
    FrontRight,
    LeftSide,
    RightSide,
    Rear,
    RearLeft,
    RearRight,
    Roof,
    Undercarriage,
}

impl DamageZone {
    /// All zones in inspection order
    pub const ALL: [DamageZone; 10] = [
        DamageZone::Front,
        DamageZone::FrontLeft,
        DamageZone::FrontRight,
        DamageZone::LeftSide,
        DamageZone::RightSide,
        DamageZone::Rear,
        DamageZone::RearLeft,
        DamageZone::RearRight,
        DamageZone::Roof,
        DamageZone::Undercarriage,
    ];

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            DamageZone::Front => "Front",
            DamageZone::FrontLeft => "Front left",
            DamageZone::FrontRight => "Front right",
            DamageZone::LeftSide => "Left side",
            DamageZone::RightSide => "Right side",
            DamageZone::Rear => "Rear",
            DamageZone::RearLeft => "Rear left",
            DamageZone::RearRight => "Rear right",
            DamageZone::Roof => "Roof",
            DamageZone::Undercarriage => "Undercarriage",
        }
    }
}

impl std::fmt::Display for DamageZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Fluid observed leaking at inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FluidLeak {
    EngineOil,
    Coolant,
    TransmissionFluid,
    BrakeFluid,
    Fuel,
    PowerSteeringFluid,
    WasherFluid,
    Refrigerant,
}

/// Clamp a percentage to [0, 100]; NaN reads as 0.
fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// An inspector's record of damage to one zone.
///
/// `extent_percent` and `depth_percent` are tolerantly clamped to [0, 100]
/// rather than rejected; physical quantities elsewhere in the crate are
/// rejected when out of range.
///
/// ## JSON Example
///
/// ```json
/// {
///   "zone": "front_left",
///   "severity": "SEVERE",
///   "extent_percent": 65.0,
///   "depth_percent": 40.0,
///   "photo_ids": ["IMG_0412", "IMG_0413"],
///   "estimated_repair_cost": 4200.0,
///   "crush_depth_in": 9.5
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageZoneObservation {
    /// Body region
    pub zone: DamageZone,

    /// Inspector's severity rating
    pub severity: DamageSeverity,

    /// Share of the zone's surface that is damaged (0-100)
    pub extent_percent: f64,

    /// Depth of the damage relative to the zone's structure (0-100)
    pub depth_percent: f64,

    /// Evidence photo references in the order they were attached
    #[serde(default)]
    pub photo_ids: Vec<String>,

    /// Estimated repair cost for this zone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_repair_cost: Option<f64>,

    /// Measured residual crush (in), evidence for the crush-energy speed estimate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crush_depth_in: Option<f64>,

    /// Free-text inspector notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl DamageZoneObservation {
    /// Create an observation with extent and depth clamped to [0, 100].
    pub fn new(
        zone: DamageZone,
        severity: DamageSeverity,
        extent_percent: f64,
        depth_percent: f64,
    ) -> Self {
        DamageZoneObservation {
            zone,
            severity,
            extent_percent: clamp_percent(extent_percent),
            depth_percent: clamp_percent(depth_percent),
            photo_ids: Vec::new(),
            estimated_repair_cost: None,
            crush_depth_in: None,
            notes: None,
        }
    }

    /// Attach an evidence photo (builder pattern)
    pub fn with_photo(mut self, photo_id: impl Into<String>) -> Self {
        self.photo_ids.push(photo_id.into());
        self
    }

    /// Set the repair-cost estimate (builder pattern)
    pub fn with_repair_cost(mut self, cost: f64) -> Self {
        self.estimated_repair_cost = Some(cost);
        self
    }

    /// Set the measured crush depth (builder pattern)
    pub fn with_crush_depth(mut self, crush_depth_in: f64) -> Self {
        self.crush_depth_in = Some(crush_depth_in);
        self
    }

    /// Set inspector notes (builder pattern)
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Re-apply the percentage clamp, for observations built field by field
    /// or decoded from JSON.
    pub fn normalized(mut self) -> Self {
        self.extent_percent = clamp_percent(self.extent_percent);
        self.depth_percent = clamp_percent(self.depth_percent);
        self
    }

    /// Check the measured quantities.
    ///
    /// Percentages are clamped rather than checked; repair cost and crush
    /// depth must be finite and non-negative when present.
    pub fn validate(&self) -> ReconResult<()> {
        if let Some(cost) = self.estimated_repair_cost {
            require_non_negative(
                "estimated_repair_cost",
                cost,
                "Repair cost must be a non-negative amount",
            )?;
        }
        if let Some(depth) = self.crush_depth_in {
            require_non_negative("crush_depth_in", depth, "Crush depth cannot be negative")?;
        }
        Ok(())
    }

    /// Whether this zone meets or exceeds a severity level
    pub fn is_at_least(&self, severity: DamageSeverity) -> bool {
        self.severity >= severity
    }
}
