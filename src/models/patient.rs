use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimal patient record anchoring measurements, alerts, symptoms and
/// recommendations. User accounts and doctor assignment live outside
/// this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: Uuid,
    pub name: String,
    pub surname: String,
    pub diabetes_type: Option<String>,
    pub diagnosis_date: Option<NaiveDate>,
    pub created_at: NaiveDateTime,
}
