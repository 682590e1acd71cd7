use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::AlertType;

/// A clinical alert raised for a patient.
///
/// Created once per triggering event and never deleted by the engine;
/// the only mutation is the one-way `is_read` transition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub alert_type: AlertType,
    /// Human-readable text embedding the measured value and, when known,
    /// the period label.
    pub message: String,
    /// Absent for the two measurement-count alert kinds.
    pub glucose_level: Option<f64>,
    pub date: NaiveDateTime,
    pub is_read: bool,
    pub created_at: NaiveDateTime,
}
