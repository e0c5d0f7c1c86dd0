//! # Cornering Stability and Drag
//!
//! Rollover threshold uses the rigid-vehicle static stability factor:
//!
//! ```text
//! SSF   = t / (2 × h)
//! a_lat = v² / r          (ft/s²)
//! v_crit = √(g × r × SSF)
//! ```
//!
//! `t` is track width and `h` is center-of-gravity height, both in feet.
//! Suspension compliance and tire deflection are ignored, so the result is
//! an upper bound on the real rollover speed.

use serde::{Deserialize, Serialize};

use super::PhysicsCalculator;
use crate::constants::VehicleClass;
use crate::errors::{finite_result, require_non_negative, require_positive, ReconResult};
use crate::units::{fps_to_mph, mph_to_fps};

/// Critical cornering speed for rollover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RolloverThreshold {
    /// Static stability factor t / 2h (lateral g's at tip-up)
    pub static_stability_factor: f64,

    /// Speed at which the inside wheels lift (mph)
    pub critical_speed_mph: f64,
}

impl<'c> PhysicsCalculator<'c> {
    /// Centripetal acceleration in g's for a speed and turn radius.
    pub fn lateral_acceleration(&self, velocity_mph: f64, turn_radius_ft: f64) -> ReconResult<f64> {
        require_non_negative("velocity_mph", velocity_mph, "Velocity cannot be negative")?;
        require_positive("turn_radius_ft", turn_radius_ft, "Turn radius must be positive")?;
        let v = mph_to_fps(velocity_mph);
        finite_result("lateral_acceleration", v * v / turn_radius_ft / self.gravity())
    }

    /// Critical rollover speed for a vehicle on a curve.
    pub fn rollover_speed(
        &self,
        track_width_ft: f64,
        cg_height_ft: f64,
        turn_radius_ft: f64,
    ) -> ReconResult<RolloverThreshold> {
        require_positive("track_width_ft", track_width_ft, "Track width must be positive")?;
        require_positive("cg_height_ft", cg_height_ft, "CG height must be positive")?;
        require_positive("turn_radius_ft", turn_radius_ft, "Turn radius must be positive")?;

        let static_stability_factor = track_width_ft / (2.0 * cg_height_ft);
        let speed_fps = finite_result(
            "rollover_speed",
            (self.gravity() * turn_radius_ft * static_stability_factor).sqrt(),
        )?;

        Ok(RolloverThreshold {
            static_stability_factor,
            critical_speed_mph: fps_to_mph(speed_fps),
        })
    }

    /// Aerodynamic drag force (lbf): ½ × ρ × Cd × A × v².
    pub fn drag_force(
        &self,
        velocity_mph: f64,
        frontal_area_sqft: f64,
        class: VehicleClass,
    ) -> ReconResult<f64> {
        require_non_negative("velocity_mph", velocity_mph, "Velocity cannot be negative")?;
        require_positive("frontal_area_sqft", frontal_area_sqft, "Frontal area must be positive")?;
        let v = mph_to_fps(velocity_mph);
        let cd = self.constants().drag_coefficient(class);
        finite_result(
            "drag_force",
            0.5 * self.constants().air_density_slug_ft3 * cd * frontal_area_sqft * v * v,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn calc() -> PhysicsCalculator<'static> {
        PhysicsCalculator::standard()
    }

    #[test]
    fn test_lateral_acceleration() {
        // 30 mph = 44 fps; 44² / 200 = 9.68 ft/s²
        let g = calc().lateral_acceleration(30.0, 200.0).unwrap();
        assert!((g - 9.68 / 32.174).abs() < 1e-9);
    }

    #[test]
    fn test_lateral_acceleration_rejects_bad_radius() {
        assert_eq!(
            calc().lateral_acceleration(30.0, 0.0).unwrap_err().error_code(),
            "INVALID_INPUT"
        );
        assert!(calc().lateral_acceleration(30.0, -50.0).is_err());
    }

    #[test]
    fn test_rollover_speed() {
        // 5 ft track, 2.5 ft CG → SSF 1.0; v = √(32.174 × 100) fps
        let r = calc().rollover_speed(5.0, 2.5, 100.0).unwrap();
        assert_eq!(r.static_stability_factor, 1.0);
        let expected = fps_to_mph((32.174f64 * 100.0).sqrt());
        assert!((r.critical_speed_mph - expected).abs() < 1e-9);

        // At the critical speed the lateral acceleration equals the SSF
        let g = calc().lateral_acceleration(r.critical_speed_mph, 100.0).unwrap();
        assert!((g - r.static_stability_factor).abs() < 1e-9);
    }

    #[test]
    fn test_taller_vehicle_rolls_sooner() {
        let sedan = calc().rollover_speed(5.2, 1.8, 150.0).unwrap();
        let suv = calc().rollover_speed(5.2, 2.4, 150.0).unwrap();
        assert!(suv.critical_speed_mph < sedan.critical_speed_mph);
    }

    #[test]
    fn test_rollover_rejects_non_positive() {
        assert!(calc().rollover_speed(0.0, 2.0, 100.0).is_err());
        assert!(calc().rollover_speed(5.0, 0.0, 100.0).is_err());
        assert!(calc().rollover_speed(5.0, 2.0, -1.0).is_err());
    }

    #[test]
    fn test_drag_force() {
        // ½ × 0.002377 × 0.30 × 22 × 88²
        let f = calc().drag_force(60.0, 22.0, VehicleClass::PassengerCar).unwrap();
        let expected = 0.5 * 0.002377 * 0.30 * 22.0 * 88.0 * 88.0;
        assert!((f - expected).abs() < 1e-6);
        assert!(calc().drag_force(60.0, 0.0, VehicleClass::Suv).is_err());
        assert_eq!(calc().drag_force(0.0, 22.0, VehicleClass::Suv).unwrap(), 0.0);
    }
}
