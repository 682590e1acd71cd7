use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{DietType, ExerciseType};

/// A diet adherence entry: what the patient was asked to follow on a day
/// and whether they reported following it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietEntry {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub diet_type: DietType,
    pub date: NaiveDate,
    pub is_followed: bool,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// An exercise adherence entry, mirroring [`DietEntry`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub exercise_type: ExerciseType,
    pub date: NaiveDate,
    pub is_completed: bool,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
