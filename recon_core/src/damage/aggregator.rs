//! # Damage Aggregation
//!
//! Folds per-zone observations into the figures a report needs: overall
//! severity, the total-loss determination, and (when crush depth was
//! measured) a damage-based impact speed.
//!
//! ## Overall Severity
//!
//! The maximum zone severity, escalated by exactly one level (capped at
//! CATASTROPHIC) when three or more zones are MODERATE or worse. Several
//! independently moderate zones usually mean distributed structural damage
//! that the single worst reading understates.
//!
//! ## Total Loss
//!
//! Ordered rules, first match wins:
//!
//! 1. Overall severity is CATASTROPHIC
//! 2. Repair cost / vehicle value ≥ threshold (both known)
//! 3. Three or more zones SEVERE or worse, even without cost data

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{DamageSeverity, DamageZone, VehicleDamageRecord};
use crate::errors::{ReconError, ReconResult};
use crate::physics::{ImpactSpeedEstimate, PhysicsCalculator, DEFAULT_STIFFNESS_LB_PER_IN};

/// Default repair-cost / vehicle-value ratio for a total loss
pub const DEFAULT_TOTAL_LOSS_THRESHOLD: f64 = 0.75;

/// Zones at MODERATE or worse needed to escalate the overall severity
const ESCALATION_ZONE_COUNT: usize = 3;

/// Zones at SEVERE or worse that make a total loss without cost data
const SEVERE_ZONE_COUNT_FOR_TOTAL_LOSS: usize = 3;

/// Aggregate zone severities into one overall rating.
///
/// # Example
/// ```
/// use recon_core::damage::{overall_severity, DamageSeverity::*};
///
/// assert_eq!(overall_severity(std::iter::empty()), None);
/// assert_eq!(overall_severity([Severe]), Severe);
/// assert_eq!(overall_severity([Moderate, Moderate, Moderate]), Severe);
/// ```
pub fn overall_severity(severities: impl IntoIterator<Item = DamageSeverity>) -> DamageSeverity {
    let mut max = DamageSeverity::None;
    let mut moderate_or_worse = 0usize;
    for severity in severities {
        max = max.max(severity);
        if severity >= DamageSeverity::Moderate {
            moderate_or_worse += 1;
        }
    }
    if moderate_or_worse >= ESCALATION_ZONE_COUNT {
        max.escalate()
    } else {
        max
    }
}

/// Which total-loss rule matched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum TotalLossReason {
    /// Overall severity is CATASTROPHIC
    CatastrophicDamage,
    /// Repair cost reached the threshold share of vehicle value
    CostRatio { ratio: f64, threshold: f64 },
    /// Several zones SEVERE or worse
    MultipleSevereZones { count: usize },
}

/// Report-ready summary of a damage record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DamageSummary {
    pub overall_severity: DamageSeverity,
    pub zone_count: usize,
    /// Number of zones at each recorded severity
    pub severity_counts: BTreeMap<DamageSeverity, usize>,
    pub zones_moderate_or_worse: Vec<DamageZone>,
    pub zones_severe_or_worse: Vec<DamageZone>,
    pub photo_count: usize,
    pub total_estimated_cost: Option<f64>,
    pub is_drivable: bool,
    pub airbags_deployed: bool,
}

/// Damage aggregator bound to a physics calculator for the crush-energy
/// speed estimate.
#[derive(Debug, Clone, Copy)]
pub struct DamageAggregator<'c> {
    calculator: PhysicsCalculator<'c>,
    stiffness_lb_per_in: f64,
}

impl Default for DamageAggregator<'static> {
    fn default() -> Self {
        DamageAggregator::new(PhysicsCalculator::standard())
    }
}

impl<'c> DamageAggregator<'c> {
    pub fn new(calculator: PhysicsCalculator<'c>) -> Self {
        DamageAggregator {
            calculator,
            stiffness_lb_per_in: DEFAULT_STIFFNESS_LB_PER_IN,
        }
    }

    /// Use a different crush stiffness for speed estimates (builder pattern)
    pub fn with_stiffness(mut self, stiffness_lb_per_in: f64) -> Self {
        self.stiffness_lb_per_in = stiffness_lb_per_in;
        self
    }

    /// Overall severity of a record's current zones
    pub fn overall_severity(&self, record: &VehicleDamageRecord) -> DamageSeverity {
        overall_severity(record.zones().map(|z| z.severity))
    }

    /// The first total-loss rule that matches, if any.
    ///
    /// # Arguments
    ///
    /// * `record` - Damage record
    /// * `vehicle_value` - Pre-accident value, if known (> 0)
    /// * `cost_threshold` - Cost ratio in (0, 1], typically
    ///   [`DEFAULT_TOTAL_LOSS_THRESHOLD`]
    pub fn total_loss_reason(
        &self,
        record: &VehicleDamageRecord,
        vehicle_value: Option<f64>,
        cost_threshold: f64,
    ) -> ReconResult<Option<TotalLossReason>> {
        if !(cost_threshold > 0.0 && cost_threshold <= 1.0) {
            return Err(ReconError::invalid_input(
                "cost_threshold",
                cost_threshold.to_string(),
                "Threshold must be in (0, 1]",
            ));
        }
        if let Some(value) = vehicle_value {
            if !(value.is_finite() && value > 0.0) {
                return Err(ReconError::invalid_input(
                    "vehicle_value",
                    value.to_string(),
                    "Vehicle value must be positive",
                ));
            }
        }

        if record.overall_severity() == DamageSeverity::Catastrophic {
            return Ok(Some(TotalLossReason::CatastrophicDamage));
        }

        if let (Some(cost), Some(value)) = (record.total_estimated_cost(), vehicle_value) {
            let ratio = cost / value;
            if ratio >= cost_threshold {
                return Ok(Some(TotalLossReason::CostRatio {
                    ratio,
                    threshold: cost_threshold,
                }));
            }
        }

        let count = record
            .zones()
            .filter(|z| z.is_at_least(DamageSeverity::Severe))
            .count();
        if count >= SEVERE_ZONE_COUNT_FOR_TOTAL_LOSS {
            return Ok(Some(TotalLossReason::MultipleSevereZones { count }));
        }

        Ok(None)
    }

    /// Whether the vehicle is a total loss.
    pub fn is_total_loss(
        &self,
        record: &VehicleDamageRecord,
        vehicle_value: Option<f64>,
        cost_threshold: f64,
    ) -> ReconResult<bool> {
        let reason = self.total_loss_reason(record, vehicle_value, cost_threshold)?;
        tracing::debug!(record = %record.id(), ?reason, "total loss evaluation");
        Ok(reason.is_some())
    }

    /// Impact speed from the deepest recorded crush.
    ///
    /// `Ok(None)` when no zone carries crush-depth evidence.
    pub fn estimate_impact_speed(
        &self,
        record: &VehicleDamageRecord,
        weight_lb: f64,
    ) -> ReconResult<Option<ImpactSpeedEstimate>> {
        let deepest = record
            .zones()
            .filter_map(|z| z.crush_depth_in)
            .fold(None, |acc: Option<f64>, depth| Some(acc.map_or(depth, |d| d.max(depth))));

        match deepest {
            Some(depth) => self
                .calculator
                .impact_speed_from_damage(depth, weight_lb, self.stiffness_lb_per_in)
                .map(Some),
            None => Ok(None),
        }
    }

    /// Summarize a record for reporting.
    pub fn summarize(&self, record: &VehicleDamageRecord) -> DamageSummary {
        let mut severity_counts = BTreeMap::new();
        let mut zones_moderate_or_worse = Vec::new();
        let mut zones_severe_or_worse = Vec::new();
        let mut photo_count = 0;

        for observation in record.zones() {
            *severity_counts.entry(observation.severity).or_insert(0) += 1;
            if observation.is_at_least(DamageSeverity::Moderate) {
                zones_moderate_or_worse.push(observation.zone);
            }
            if observation.is_at_least(DamageSeverity::Severe) {
                zones_severe_or_worse.push(observation.zone);
            }
            photo_count += observation.photo_ids.len();
        }

        DamageSummary {
            overall_severity: record.overall_severity(),
            zone_count: record.zone_count(),
            severity_counts,
            zones_moderate_or_worse,
            zones_severe_or_worse,
            photo_count,
            total_estimated_cost: record.total_estimated_cost(),
            is_drivable: record.is_drivable(),
            airbags_deployed: record.airbags_deployed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::damage::DamageZoneObservation;
    use DamageSeverity::*;

    fn record_with(severities: &[(DamageZone, DamageSeverity)]) -> VehicleDamageRecord {
        severities.iter().fold(VehicleDamageRecord::new("TEST"), |record, &(zone, severity)| {
            record.add_zone(DamageZoneObservation::new(zone, severity, 50.0, 50.0)).unwrap()
        })
    }

    #[test]
    fn test_overall_severity_rules() {
        assert_eq!(overall_severity(std::iter::empty()), None);
        assert_eq!(overall_severity([Severe]), Severe);
        assert_eq!(overall_severity([Minor, Minor, Minor, Minor]), Minor);
        assert_eq!(overall_severity([Moderate, Moderate]), Moderate);
        assert_eq!(overall_severity([Moderate, Moderate, Moderate]), Severe);
        assert_eq!(overall_severity([Moderate, Minor, Major, Severe]), Catastrophic);
        assert_eq!(overall_severity([Catastrophic, Major, Major]), Catastrophic);
    }

    #[test]
    fn test_three_moderate_zones_escalate() {
        let record = record_with(&[
            (DamageZone::Front, Moderate),
            (DamageZone::LeftSide, Moderate),
            (DamageZone::Rear, Moderate),
        ]);
        assert_eq!(record.overall_severity(), Severe);
        assert_eq!(DamageAggregator::default().overall_severity(&record), Severe);
    }

    #[test]
    fn test_total_loss_catastrophic_without_cost() {
        let record = record_with(&[(DamageZone::Roof, Catastrophic)]);
        let agg = DamageAggregator::default();
        assert!(agg.is_total_loss(&record, Option::None, DEFAULT_TOTAL_LOSS_THRESHOLD).unwrap());
        assert_eq!(
            agg.total_loss_reason(&record, Option::None, DEFAULT_TOTAL_LOSS_THRESHOLD).unwrap(),
            Some(TotalLossReason::CatastrophicDamage)
        );
    }

    #[test]
    fn test_total_loss_cost_ratio() {
        let record = record_with(&[(DamageZone::Front, Moderate)])
            .set_total_estimated_cost(Some(20_000.0))
            .unwrap();
        let agg = DamageAggregator::default();
        let reason = agg
            .total_loss_reason(&record, Some(25_000.0), DEFAULT_TOTAL_LOSS_THRESHOLD)
            .unwrap();
        match reason {
            Some(TotalLossReason::CostRatio { ratio, threshold }) => {
                assert!((ratio - 0.8).abs() < 1e-12);
                assert_eq!(threshold, 0.75);
            }
            other => panic!("expected cost ratio, got {other:?}"),
        }

        // Below threshold and no severe zones
        assert!(!agg.is_total_loss(&record, Some(40_000.0), 0.75).unwrap());
        // Cost known but value unknown
        assert!(!agg.is_total_loss(&record, Option::None, 0.75).unwrap());
    }

    #[test]
    fn test_total_loss_three_severe_zones() {
        // Severe ×3 escalates to Major, not Catastrophic; rule (c) decides
        let record = record_with(&[
            (DamageZone::Front, Severe),
            (DamageZone::FrontLeft, Severe),
            (DamageZone::FrontRight, Severe),
        ]);
        assert_eq!(record.overall_severity(), Major);
        let agg = DamageAggregator::default();
        assert_eq!(
            agg.total_loss_reason(&record, Option::None, 0.75).unwrap(),
            Some(TotalLossReason::MultipleSevereZones { count: 3 })
        );
    }

    #[test]
    fn test_not_total_loss() {
        let record = record_with(&[(DamageZone::Front, Severe), (DamageZone::Rear, Severe)]);
        assert!(!DamageAggregator::default().is_total_loss(&record, Option::None, 0.75).unwrap());
    }

    #[test]
    fn test_total_loss_rejects_bad_arguments() {
        let record = record_with(&[]);
        let agg = DamageAggregator::default();
        assert!(agg.is_total_loss(&record, Some(0.0), 0.75).is_err());
        assert!(agg.is_total_loss(&record, Some(10_000.0), 0.0).is_err());
        assert!(agg.is_total_loss(&record, Some(10_000.0), 1.5).is_err());
        assert!(agg.is_total_loss(&record, Some(10_000.0), f64::NAN).is_err());
    }

    #[test]
    fn test_estimate_impact_speed_uses_deepest_crush() {
        let front = DamageZoneObservation::new(DamageZone::Front, Severe, 80.0, 60.0);
        let corner = DamageZoneObservation::new(DamageZone::FrontLeft, Moderate, 40.0, 20.0);
        let record = VehicleDamageRecord::new("V1")
            .add_zone(front.with_crush_depth(12.0))
            .unwrap()
            .add_zone(corner.with_crush_depth(4.0))
            .unwrap()
            .add_zone(DamageZoneObservation::new(DamageZone::Rear, Minor, 10.0, 5.0))
            .unwrap();
        let agg = DamageAggregator::default();
        let est = agg.estimate_impact_speed(&record, 3217.4).unwrap().unwrap();
        let direct = PhysicsCalculator::standard()
            .impact_speed_from_damage(12.0, 3217.4, DEFAULT_STIFFNESS_LB_PER_IN)
            .unwrap();
        assert_eq!(est, direct);

        let stiffer = agg
            .with_stiffness(300.0)
            .estimate_impact_speed(&record, 3217.4)
            .unwrap()
            .unwrap();
        assert!(stiffer.speed_mph > est.speed_mph);
    }

    #[test]
    fn test_estimate_impact_speed_without_evidence() {
        let record = record_with(&[(DamageZone::Front, Severe)]);
        let estimate = DamageAggregator::default().estimate_impact_speed(&record, 3000.0).unwrap();
        assert_eq!(estimate, Option::None);
    }

    #[test]
    fn test_summarize() {
        let front = DamageZoneObservation::new(DamageZone::Front, Severe, 80.0, 60.0);
        let rear = DamageZoneObservation::new(DamageZone::Rear, Moderate, 40.0, 20.0);
        let record = VehicleDamageRecord::new("V1")
            .add_zone(front.with_photo("A").with_photo("B"))
            .unwrap()
            .add_zone(rear.with_photo("C"))
            .unwrap()
            .add_zone(DamageZoneObservation::new(DamageZone::Roof, Minor, 10.0, 5.0))
            .unwrap()
            .set_airbag_deployed(true);
        let summary = DamageAggregator::default().summarize(&record);
        assert_eq!(summary.zone_count, 3);
        assert_eq!(summary.photo_count, 3);
        assert_eq!(summary.severity_counts.get(&Minor), Some(&1));
        assert_eq!(summary.zones_moderate_or_worse, vec![DamageZone::Front, DamageZone::Rear]);
        assert_eq!(summary.zones_severe_or_worse, vec![DamageZone::Front]);
        assert!(summary.airbags_deployed);
        assert_eq!(summary.overall_severity, Severe);
    }
}
