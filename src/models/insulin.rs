use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A daily insulin-dose recommendation derived from the time-weighted
/// glucose average.
///
/// One recommendation conceptually exists per patient per day; each new
/// measurement for that day supersedes it with a fresh row rather than
/// updating in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsulinRecommendation {
    pub id: Uuid,
    pub patient_id: Uuid,
    /// Recommended dose in ml, one of {0, 1, 2, 3}. None when no
    /// measurements existed that day.
    pub recommended_dose: Option<f64>,
    /// Set exactly once when the administration is recorded.
    pub administered_dose: Option<f64>,
    /// Time-weighted average glucose for the day (mg/dL).
    pub average_glucose: Option<f64>,
    /// Stamped at 23:00 of the measurement day.
    pub date: NaiveDateTime,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
