use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::Period;

/// Clock window for each measurement period, inclusive on both ends.
/// Measurements outside every window carry no period and are excluded
/// from the daily weighted average.
pub const PERIOD_WINDOWS: [(Period, (u32, u32), (u32, u32)); 5] = [
    (Period::Morning, (7, 0), (8, 0)),
    (Period::Noon, (12, 0), (13, 0)),
    (Period::Afternoon, (15, 0), (16, 0)),
    (Period::Evening, (18, 0), (19, 0)),
    (Period::Night, (22, 0), (23, 0)),
];

/// Derive the period from a time of day against the fixed clock windows.
pub fn period_from_time(time: NaiveTime) -> Option<Period> {
    for (period, (sh, sm), (eh, em)) in PERIOD_WINDOWS {
        let start = NaiveTime::from_hms_opt(sh, sm, 0).unwrap_or_default();
        // Window end is inclusive up to the full minute.
        let end = NaiveTime::from_hms_opt(eh, em, 59).unwrap_or_default();
        if time >= start && time <= end {
            return Some(period);
        }
    }
    None
}

/// Screening categorisation shown alongside a single reading.
/// Distinct from the alert banding and the recommendation tiers;
/// the three classifiers use different breakpoints on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScreeningCategory {
    Hypoglycemia,
    Normal,
    Prediabetes,
    Diabetes,
}

/// A single blood glucose measurement (mg/dL).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub glucose_level: f64,
    pub measurement_date: NaiveDate,
    pub measurement_time: NaiveTime,
    /// Assigned at creation (supplied or derived from time), immutable after.
    pub period: Option<Period>,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Measurement {
    /// Whether the recorded time actually falls inside the window of the
    /// assigned period.
    pub fn is_valid_period_time(&self) -> bool {
        match self.period {
            Some(period) => period_from_time(self.measurement_time) == Some(period),
            None => false,
        }
    }

    /// Screening category for this reading.
    pub fn screening_category(&self) -> ScreeningCategory {
        if self.glucose_level < 70.0 {
            ScreeningCategory::Hypoglycemia
        } else if self.glucose_level <= 99.0 {
            ScreeningCategory::Normal
        } else if self.glucose_level <= 125.0 {
            ScreeningCategory::Prediabetes
        } else {
            ScreeningCategory::Diabetes
        }
    }
}
