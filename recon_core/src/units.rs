//! # Unit Types
//!
//! Type-safe wrappers and conversion helpers for reconstruction units.
//!
//! ## Working Units
//!
//! All formulas in this crate work internally in US customary units:
//! - Length: feet (ft), inches (in)
//! - Force / weight: pounds-force (lb)
//! - Mass: slugs (lb·s²/ft)
//! - Time: seconds
//! - Velocity: feet per second (fps)
//!
//! Public inputs and outputs use miles per hour, which is what police
//! reports and legal documents quote. Kilometres per hour is provided for
//! international reports.
//!
//! ## Example
//!
//! ```rust
//! use recon_core::units::{mph_to_fps, FtLb, InLb};
//!
//! assert!((mph_to_fps(30.0) - 44.0).abs() < 1e-9);
//!
//! let energy: FtLb = InLb(24_000.0).into();
//! assert_eq!(energy.value(), 2_000.0);
//! ```

use serde::{Deserialize, Serialize};

/// Feet per second in one mile per hour (5280 ft / 3600 s)
pub const FPS_PER_MPH: f64 = 5280.0 / 3600.0;

/// Kilometres in one statute mile
pub const KM_PER_MILE: f64 = 1.609344;

// ============================================================================
// Conversion Helpers
// ============================================================================

/// Miles per hour to feet per second
pub fn mph_to_fps(mph: f64) -> f64 {
    mph * FPS_PER_MPH
}

/// Feet per second to miles per hour
pub fn fps_to_mph(fps: f64) -> f64 {
    fps / FPS_PER_MPH
}

/// Miles per hour to kilometres per hour
pub fn mph_to_kph(mph: f64) -> f64 {
    mph * KM_PER_MILE
}

/// Kilometres per hour to miles per hour
pub fn kph_to_mph(kph: f64) -> f64 {
    kph / KM_PER_MILE
}

/// Feet per second to kilometres per hour
pub fn fps_to_kph(fps: f64) -> f64 {
    mph_to_kph(fps_to_mph(fps))
}

/// Kilometres per hour to feet per second
pub fn kph_to_fps(kph: f64) -> f64 {
    mph_to_fps(kph_to_mph(kph))
}

// ============================================================================
// Energy Units
// ============================================================================

/// Energy in foot-pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FtLb(pub f64);

/// Energy in inch-pounds, the unit crush stiffness (lb/in) produces
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InLb(pub f64);

impl From<FtLb> for InLb {
    fn from(ftlb: FtLb) -> Self {
        InLb(ftlb.0 * 12.0)
    }
}

impl From<InLb> for FtLb {
    fn from(inlb: InLb) -> Self {
        FtLb(inlb.0 / 12.0)
    }
}

impl FtLb {
    /// Get the raw f64 value
    pub fn value(self) -> f64 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sixty_mph_is_eighty_eight_fps() {
        assert!((mph_to_fps(60.0) - 88.0).abs() < 1e-9);
        assert!((fps_to_mph(88.0) - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_kph_conversion() {
        assert!((mph_to_kph(100.0) - 160.9344).abs() < 1e-9);
        assert!((kph_to_mph(160.9344) - 100.0).abs() < 1e-9);
        // 88 fps = 60 mph = 96.56 kph
        assert!((fps_to_kph(88.0) - 96.56064).abs() < 1e-6);
        assert!((kph_to_fps(96.56064) - 88.0).abs() < 1e-6);
    }

    #[test]
    fn test_energy_conversion() {
        let ftlb: FtLb = InLb(120.0).into();
        assert_eq!(ftlb.value(), 10.0);
        let inlb: InLb = FtLb(10.0).into();
        assert_eq!(inlb.0, 120.0);
    }

    #[test]
    fn test_energy_serializes_as_number() {
        let json = serde_json::to_string(&FtLb(1250.5)).unwrap();
        assert_eq!(json, "1250.5");
        let roundtrip: FtLb = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, FtLb(1250.5));
    }

    proptest! {
        #[test]
        fn prop_mph_fps_round_trip(x in 0.0f64..1.0e6) {
            let back = mph_to_fps(fps_to_mph(x));
            prop_assert!((back - x).abs() <= 1e-9 * x.max(1.0));
            let forward = fps_to_mph(mph_to_fps(x));
            prop_assert!((forward - x).abs() <= 1e-9 * x.max(1.0));
        }

        #[test]
        fn prop_mph_kph_round_trip(x in 0.0f64..1.0e6) {
            let back = kph_to_mph(mph_to_kph(x));
            prop_assert!((back - x).abs() <= 1e-9 * x.max(1.0));
        }
    }
}
