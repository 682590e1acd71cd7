use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::db::DatabaseError;
use crate::models::enums::{AlertType, DietType, ExerciseType, Period};
use crate::models::Measurement;

// ---------------------------------------------------------------------------
// GlucoseBand
// ---------------------------------------------------------------------------

/// Severity band for a single glucose reading (mg/dL).
///
/// Derived on demand, never stored. The five bands partition the whole
/// numeric range. Shared by the alert classifier and the insulin advisor;
/// the diet/exercise recommendation tiers use their own breakpoints and
/// are deliberately kept separate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GlucoseBand {
    /// Below 70.
    Hypoglycemia,
    /// 70 to 110 inclusive.
    Normal,
    /// 111 to 150 inclusive.
    MediumHigh,
    /// 151 to 200 inclusive.
    High,
    /// Above 200.
    Hyperglycemia,
}

impl GlucoseBand {
    /// Classify a glucose value. Total over all values; out-of-range
    /// readings are the caller's concern, not a classification error.
    pub fn classify(glucose: f64) -> GlucoseBand {
        if glucose < 70.0 {
            GlucoseBand::Hypoglycemia
        } else if glucose <= 110.0 {
            GlucoseBand::Normal
        } else if glucose <= 150.0 {
            GlucoseBand::MediumHigh
        } else if glucose <= 200.0 {
            GlucoseBand::High
        } else {
            GlucoseBand::Hyperglycemia
        }
    }

    /// The alert kind raised for a reading in this band.
    pub fn alert_type(self) -> AlertType {
        match self {
            GlucoseBand::Hypoglycemia => AlertType::Hypoglycemia,
            GlucoseBand::Normal => AlertType::Normal,
            GlucoseBand::MediumHigh => AlertType::MediumHigh,
            GlucoseBand::High => AlertType::High,
            GlucoseBand::Hyperglycemia => AlertType::Hyperglycemia,
        }
    }
}

// ---------------------------------------------------------------------------
// PeriodReadings
// ---------------------------------------------------------------------------

/// One day's glucose readings keyed by period, the input to the
/// time-weighted averager. Any subset of periods may be present.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PeriodReadings {
    pub morning: Option<f64>,
    pub noon: Option<f64>,
    pub afternoon: Option<f64>,
    pub evening: Option<f64>,
    pub night: Option<f64>,
}

impl PeriodReadings {
    /// Build from a day's measurements ordered by time of day.
    ///
    /// When a period holds more than one reading the latest one wins;
    /// readings without a period are skipped. The averager therefore
    /// never sees within-period duplicates.
    pub fn from_measurements(measurements: &[Measurement]) -> PeriodReadings {
        let mut readings = PeriodReadings::default();
        for m in measurements {
            if let Some(period) = m.period {
                readings.set(period, m.glucose_level);
            }
        }
        readings
    }

    pub fn get(&self, period: Period) -> Option<f64> {
        match period {
            Period::Morning => self.morning,
            Period::Noon => self.noon,
            Period::Afternoon => self.afternoon,
            Period::Evening => self.evening,
            Period::Night => self.night,
        }
    }

    pub fn set(&mut self, period: Period, glucose: f64) {
        match period {
            Period::Morning => self.morning = Some(glucose),
            Period::Noon => self.noon = Some(glucose),
            Period::Afternoon => self.afternoon = Some(glucose),
            Period::Evening => self.evening = Some(glucose),
            Period::Night => self.night = Some(glucose),
        }
    }

    pub fn is_empty(&self) -> bool {
        Period::ALL.iter().all(|p| self.get(*p).is_none())
    }
}

// ---------------------------------------------------------------------------
// RecommendationSnapshot
// ---------------------------------------------------------------------------

/// On-demand diet/exercise guidance derived from the latest reading and
/// the day's reported symptoms. Computed, not persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSnapshot {
    pub glucose_level: f64,
    pub diet: DietType,
    pub exercise: Option<ExerciseType>,
}

impl RecommendationSnapshot {
    /// Serialize for export to the presentation layer.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

// ---------------------------------------------------------------------------
// EngineError
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}
