//! Damage severity scale.

use serde::{Deserialize, Serialize};

/// Ordinal damage severity, NONE (0) through CATASTROPHIC (5).
///
/// The derived ordering is load-bearing: aggregation takes the maximum and
/// escalates by one level, so variant order must stay ascending.
///
/// # Example
/// ```
/// use recon_core::damage::DamageSeverity;
///
/// assert!(DamageSeverity::Severe > DamageSeverity::Moderate);
/// assert_eq!(DamageSeverity::Moderate.escalate(), DamageSeverity::Severe);
/// assert_eq!(DamageSeverity::Catastrophic.escalate(), DamageSeverity::Catastrophic);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DamageSeverity {
    #[default]
    None,
    Minor,
    Moderate,
    Severe,
    Major,
    Catastrophic,
}

impl DamageSeverity {
    /// All levels in ascending order
    pub const ALL: [DamageSeverity; 6] = [
        DamageSeverity::None,
        DamageSeverity::Minor,
        DamageSeverity::Moderate,
        DamageSeverity::Severe,
        DamageSeverity::Major,
        DamageSeverity::Catastrophic,
    ];

    /// Numeric level, 0 through 5
    pub fn level(&self) -> u8 {
        match self {
            DamageSeverity::None => 0,
            DamageSeverity::Minor => 1,
            DamageSeverity::Moderate => 2,
            DamageSeverity::Severe => 3,
            DamageSeverity::Major => 4,
            DamageSeverity::Catastrophic => 5,
        }
    }

    /// Severity for a numeric level; `None` above 5
    pub fn from_level(level: u8) -> Option<Self> {
        Self::ALL.get(usize::from(level)).copied()
    }

    /// One level worse, capped at CATASTROPHIC
    pub fn escalate(self) -> Self {
        match self {
            DamageSeverity::None => DamageSeverity::Minor,
            DamageSeverity::Minor => DamageSeverity::Moderate,
            DamageSeverity::Moderate => DamageSeverity::Severe,
            DamageSeverity::Severe => DamageSeverity::Major,
            DamageSeverity::Major | DamageSeverity::Catastrophic => DamageSeverity::Catastrophic,
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            DamageSeverity::None => "None",
            DamageSeverity::Minor => "Minor",
            DamageSeverity::Moderate => "Moderate",
            DamageSeverity::Severe => "Severe",
            DamageSeverity::Major => "Major",
            DamageSeverity::Catastrophic => "Catastrophic",
        }
    }
}

impl std::fmt::Display for DamageSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
