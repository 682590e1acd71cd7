use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::SymptomType;

/// A symptom reported by (or for) a patient on a given day.
/// Read-only input to the diet/exercise recommendation rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Symptom {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub symptom_type: SymptomType,
    /// 1 (mild) to 5 (severe).
    pub severity: i32,
    pub date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
}
