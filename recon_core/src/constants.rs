//! # Physical Constants
//!
//! The read-only constants every reconstruction formula depends on:
//! gravitational acceleration, tire/road friction per road condition, air
//! density, and aerodynamic drag coefficients per vehicle class.
//!
//! A single [`PhysicalConstants`] value is built once and then only ever
//! borrowed. The standard table is available through
//! [`PhysicalConstants::standard`]; hosts that calibrate their own friction
//! values (for example from a drag-sled test) build a custom instance, run
//! [`PhysicalConstants::validate`], and hand it to a
//! [`PhysicsCalculator`](crate::physics::PhysicsCalculator) by reference.
//!
//! ## Standard Values
//!
//! | Quantity              | Value            |
//! |-----------------------|------------------|
//! | g                     | 32.174 ft/s²     |
//! | μ dry asphalt         | 0.70             |
//! | μ wet asphalt         | 0.50             |
//! | μ gravel              | 0.40             |
//! | μ snow                | 0.20             |
//! | μ ice                 | 0.10             |
//! | ρ air (sea level)     | 0.002377 slug/ft³ |

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{ReconError, ReconResult};

/// Standard gravitational acceleration (ft/s²)
pub const GRAVITY_FPS2: f64 = 32.174;

/// Standard sea-level air density (slug/ft³)
pub const AIR_DENSITY_SLUG_FT3: f64 = 0.002377;

static STANDARD: Lazy<PhysicalConstants> = Lazy::new(PhysicalConstants::default);

// ============================================================================
// Road Conditions
// ============================================================================

/// Road surface condition at the scene.
///
/// Closed set: every condition maps to exactly one friction coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadCondition {
    DryAsphalt,
    WetAsphalt,
    Snow,
    Ice,
    Gravel,
}

impl RoadCondition {
    /// All road conditions in table order
    pub const ALL: [RoadCondition; 5] = [
        RoadCondition::DryAsphalt,
        RoadCondition::WetAsphalt,
        RoadCondition::Snow,
        RoadCondition::Ice,
        RoadCondition::Gravel,
    ];

    /// Human-readable name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            RoadCondition::DryAsphalt => "Dry asphalt",
            RoadCondition::WetAsphalt => "Wet asphalt",
            RoadCondition::Snow => "Snow",
            RoadCondition::Ice => "Ice",
            RoadCondition::Gravel => "Gravel",
        }
    }
}

impl std::fmt::Display for RoadCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Friction coefficient per road condition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrictionTable {
    pub dry_asphalt: f64,
    pub wet_asphalt: f64,
    pub snow: f64,
    pub ice: f64,
    pub gravel: f64,
}

impl FrictionTable {
    /// Look up the coefficient for a road condition
    pub fn get(&self, condition: RoadCondition) -> f64 {
        match condition {
            RoadCondition::DryAsphalt => self.dry_asphalt,
            RoadCondition::WetAsphalt => self.wet_asphalt,
            RoadCondition::Snow => self.snow,
            RoadCondition::Ice => self.ice,
            RoadCondition::Gravel => self.gravel,
        }
    }
}

impl Default for FrictionTable {
    fn default() -> Self {
        FrictionTable {
            dry_asphalt: 0.7,
            wet_asphalt: 0.5,
            snow: 0.2,
            ice: 0.1,
            gravel: 0.4,
        }
    }
}

// ============================================================================
// Vehicle Classes
// ============================================================================

/// Body style used to pick an aerodynamic drag coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VehicleClass {
    PassengerCar,
    Suv,
    PickupTruck,
    Van,
    Motorcycle,
    HeavyTruck,
}

impl VehicleClass {
    /// All vehicle classes in table order
    pub const ALL: [VehicleClass; 6] = [
        VehicleClass::PassengerCar,
        VehicleClass::Suv,
        VehicleClass::PickupTruck,
        VehicleClass::Van,
        VehicleClass::Motorcycle,
        VehicleClass::HeavyTruck,
    ];

    /// Human-readable name for reports
    pub fn display_name(&self) -> &'static str {
        match self {
            VehicleClass::PassengerCar => "Passenger car",
            VehicleClass::Suv => "SUV",
            VehicleClass::PickupTruck => "Pickup truck",
            VehicleClass::Van => "Van",
            VehicleClass::Motorcycle => "Motorcycle",
            VehicleClass::HeavyTruck => "Heavy truck",
        }
    }
}

impl std::fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Aerodynamic drag coefficient (Cd) per vehicle class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragTable {
    pub passenger_car: f64,
    pub suv: f64,
    pub pickup_truck: f64,
    pub van: f64,
    pub motorcycle: f64,
    pub heavy_truck: f64,
}

impl DragTable {
    /// Look up the drag coefficient for a vehicle class
    pub fn get(&self, class: VehicleClass) -> f64 {
        match class {
            VehicleClass::PassengerCar => self.passenger_car,
            VehicleClass::Suv => self.suv,
            VehicleClass::PickupTruck => self.pickup_truck,
            VehicleClass::Van => self.van,
            VehicleClass::Motorcycle => self.motorcycle,
            VehicleClass::HeavyTruck => self.heavy_truck,
        }
    }
}

impl Default for DragTable {
    fn default() -> Self {
        DragTable {
            passenger_car: 0.30,
            suv: 0.38,
            pickup_truck: 0.42,
            van: 0.36,
            motorcycle: 0.60,
            heavy_truck: 0.65,
        }
    }
}

// ============================================================================
// Constants Container
// ============================================================================

/// Process-wide physical constants.
///
/// Built once, validated, then shared by reference. Nothing in this crate
/// mutates a `PhysicalConstants` after construction.
///
/// ## TOML Example
///
/// ```toml
/// gravity_fps2 = 32.174
/// air_density_slug_ft3 = 0.002377
///
/// [friction]
/// dry_asphalt = 0.75
/// wet_asphalt = 0.45
/// ```
///
/// Omitted keys fall back to the standard values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicalConstants {
    /// Gravitational acceleration (ft/s²)
    pub gravity_fps2: f64,

    /// Tire/road friction coefficients
    pub friction: FrictionTable,

    /// Air density (slug/ft³)
    pub air_density_slug_ft3: f64,

    /// Drag coefficients
    pub drag: DragTable,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        PhysicalConstants {
            gravity_fps2: GRAVITY_FPS2,
            friction: FrictionTable::default(),
            air_density_slug_ft3: AIR_DENSITY_SLUG_FT3,
            drag: DragTable::default(),
        }
    }
}

impl PhysicalConstants {
    /// The shared standard constants, initialized on first use.
    ///
    /// ```rust
    /// use recon_core::constants::{PhysicalConstants, RoadCondition};
    ///
    /// let constants = PhysicalConstants::standard();
    /// assert_eq!(constants.friction_coefficient(RoadCondition::DryAsphalt), 0.7);
    /// ```
    pub fn standard() -> &'static PhysicalConstants {
        &STANDARD
    }

    /// Friction coefficient for a road condition
    pub fn friction_coefficient(&self, condition: RoadCondition) -> f64 {
        self.friction.get(condition)
    }

    /// Drag coefficient for a vehicle class
    pub fn drag_coefficient(&self, class: VehicleClass) -> f64 {
        self.drag.get(class)
    }

    /// Validate the constants.
    ///
    /// Friction coefficients must lie in (0, 1]; gravity, air density, and
    /// drag coefficients must be positive and finite.
    pub fn validate(&self) -> ReconResult<()> {
        if !(self.gravity_fps2.is_finite() && self.gravity_fps2 > 0.0) {
            return Err(ReconError::invalid_config(
                "gravity_fps2",
                format!("must be positive, got {}", self.gravity_fps2),
            ));
        }
        if !(self.air_density_slug_ft3.is_finite() && self.air_density_slug_ft3 > 0.0) {
            return Err(ReconError::invalid_config(
                "air_density_slug_ft3",
                format!("must be positive, got {}", self.air_density_slug_ft3),
            ));
        }
        for condition in RoadCondition::ALL {
            let mu = self.friction.get(condition);
            // NaN fails both comparisons
            if !(mu > 0.0 && mu <= 1.0) {
                return Err(ReconError::invalid_config(
                    format!("friction.{}", condition_key(condition)),
                    format!("must be in (0, 1], got {mu}"),
                ));
            }
        }
        for class in VehicleClass::ALL {
            let cd = self.drag.get(class);
            if !(cd.is_finite() && cd > 0.0) {
                return Err(ReconError::invalid_config(
                    format!("drag.{}", class_key(class)),
                    format!("must be positive, got {cd}"),
                ));
            }
        }
        Ok(())
    }
}

fn condition_key(condition: RoadCondition) -> &'static str {
    match condition {
        RoadCondition::DryAsphalt => "dry_asphalt",
        RoadCondition::WetAsphalt => "wet_asphalt",
        RoadCondition::Snow => "snow",
        RoadCondition::Ice => "ice",
        RoadCondition::Gravel => "gravel",
    }
}

fn class_key(class: VehicleClass) -> &'static str {
    match class {
        VehicleClass::PassengerCar => "passenger_car",
        VehicleClass::Suv => "suv",
        VehicleClass::PickupTruck => "pickup_truck",
        VehicleClass::Van => "van",
        VehicleClass::Motorcycle => "motorcycle",
        VehicleClass::HeavyTruck => "heavy_truck",
    }
}
