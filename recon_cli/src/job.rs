//! Job files and the JSON report produced from them.
//!
//! ```json
//! {
//!   "label": "Case 26-014, Main St / 3rd Ave",
//!   "calculations": [
//!     { "type": "skid_marks", "label": "V1 skid", "length_ft": 150, "condition": "dry_asphalt" },
//!     { "type": "delta_v", "weight1_lb": 3500, "velocity1_mph": 40, "weight2_lb": 3000 }
//!   ],
//!   "damage": {
//!     "record": { "vehicle_ref": "V1", "zones": { ... } },
//!     "vehicle_value": 25000,
//!     "weight_lb": 3500
//!   }
//! }
//! ```

use recon_core::physics::ImpactSpeedEstimate;
use recon_core::{
    Calculation, CalculationDefaults, CalculationOutput, DamageAggregator, DamageSummary,
    PhysicsCalculator, ReconError, ReconResult, TotalLossReason, VehicleDamageRecord,
};
use serde::{Deserialize, Serialize};

/// A job as read from disk.
///
/// Calculations stay as raw JSON so that one malformed item is reported on
/// its own instead of failing the whole job.
#[derive(Debug, Clone, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub calculations: Vec<serde_json::Value>,
    #[serde(default)]
    pub damage: Option<DamageJob>,
}

#[derive(Debug, Clone, Deserialize)]
struct JobItem {
    #[serde(default)]
    label: Option<String>,
    #[serde(flatten)]
    calculation: Calculation,
}

/// Damage assessment section of a job.
#[derive(Debug, Clone, Deserialize)]
pub struct DamageJob {
    pub record: VehicleDamageRecord,
    #[serde(default)]
    pub vehicle_value: Option<f64>,
    /// Vehicle weight for the crush-energy speed estimate
    #[serde(default)]
    pub weight_lb: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    Ok { output: CalculationOutput },
    Error { error: ReconError },
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemReport {
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<&'static str>,
    #[serde(flatten)]
    pub outcome: ItemOutcome,
}

impl ItemReport {
    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, ItemOutcome::Ok { .. })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DamageReport {
    pub record_id: String,
    pub vehicle_ref: String,
    pub summary: DamageSummary,
    pub total_loss: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_loss_reason: Option<TotalLossReason>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact_speed: Option<ImpactSpeedEstimate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ReconError>,
}

#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub label: String,
    pub succeeded: usize,
    pub failed: usize,
    pub results: Vec<ItemReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub damage: Option<DamageReport>,
}

fn evaluate_item(
    index: usize,
    raw: &serde_json::Value,
    calc: &PhysicsCalculator<'_>,
    defaults: &CalculationDefaults,
) -> ItemReport {
    let item = match JobItem::deserialize(raw) {
        Ok(item) => item,
        Err(e) => {
            tracing::warn!(index, error = %e, "could not decode calculation");
            return ItemReport {
                index,
                label: raw.get("label").and_then(|l| l.as_str()).map(str::to_string),
                kind: None,
                outcome: ItemOutcome::Error { error: e.into() },
            };
        }
    };

    let kind = item.calculation.kind();
    let outcome = match item.calculation.evaluate(calc, defaults) {
        Ok(output) => ItemOutcome::Ok { output },
        Err(error) => {
            tracing::warn!(index, kind, code = error.error_code(), "calculation failed: {error}");
            ItemOutcome::Error { error }
        }
    };

    ItemReport {
        index,
        label: item.label,
        kind: Some(kind),
        outcome,
    }
}

fn assess_damage(
    job: &DamageJob,
    aggregator: &DamageAggregator<'_>,
    threshold: f64,
) -> DamageReport {
    let record = &job.record;
    let mut errors = Vec::new();

    let total_loss_reason = aggregator
        .total_loss_reason(record, job.vehicle_value, threshold)
        .unwrap_or_else(|e| {
            errors.push(e);
            None
        });

    let impact_speed = match job.weight_lb {
        Some(weight_lb) => aggregator
            .estimate_impact_speed(record, weight_lb)
            .unwrap_or_else(|e| {
                errors.push(e);
                None
            }),
        None => None,
    };

    DamageReport {
        record_id: record.id().to_string(),
        vehicle_ref: record.vehicle_ref().to_string(),
        summary: aggregator.summarize(record),
        total_loss: total_loss_reason.is_some(),
        total_loss_reason,
        impact_speed,
        errors,
    }
}

impl Job {
    pub fn from_json(content: &str) -> ReconResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Evaluate every calculation and the damage section.
    ///
    /// Item failures are recorded in the report; this never aborts early.
    pub fn run(&self, calc: &PhysicsCalculator<'_>, defaults: &CalculationDefaults) -> JobReport {
        let results: Vec<ItemReport> = self
            .calculations
            .iter()
            .enumerate()
            .map(|(index, raw)| evaluate_item(index, raw, calc, defaults))
            .collect();

        let succeeded = results.iter().filter(|r| r.is_ok()).count();
        let failed = results.len() - succeeded;

        let damage = self.damage.as_ref().map(|job| {
            let aggregator =
                DamageAggregator::new(*calc).with_stiffness(defaults.stiffness_lb_per_in);
            assess_damage(job, &aggregator, defaults.total_loss_threshold)
        });

        tracing::info!(label = %self.label, succeeded, failed, "job evaluated");

        JobReport {
            label: self.label.clone(),
            succeeded,
            failed,
            results,
            damage,
        }
    }
}
