use chrono::{NaiveDate, NaiveDateTime};
use uuid::Uuid;

use crate::models::enums::{AlertType, Period};
use crate::models::Alert;

use super::messages::MessageTemplates;
use super::types::GlucoseBand;

/// Build an alert for a single glucose reading.
///
/// Read-state policy: only Normal alerts are created already read. Every
/// other band, including MediumHigh and High, starts unread and waits for
/// clinician review.
pub fn build_glucose_alert(
    patient_id: Uuid,
    glucose: f64,
    period: Option<Period>,
    at: NaiveDateTime,
) -> Alert {
    let band = GlucoseBand::classify(glucose);
    let alert_type = band.alert_type();

    Alert {
        id: Uuid::new_v4(),
        patient_id,
        alert_type,
        message: MessageTemplates::glucose_alert(band, glucose, period),
        glucose_level: Some(glucose),
        date: at,
        is_read: alert_type == AlertType::Normal,
        created_at: at,
    }
}

/// Alert for a day with zero measurements. Carries no glucose value.
pub fn build_missing_measurement_alert(
    patient_id: Uuid,
    date: NaiveDate,
    at: NaiveDateTime,
) -> Alert {
    Alert {
        id: Uuid::new_v4(),
        patient_id,
        alert_type: AlertType::MissingMeasurement,
        message: MessageTemplates::missing_measurement(date),
        glucose_level: None,
        date: at,
        is_read: false,
        created_at: at,
    }
}

/// Alert for a day with one or two measurements (fewer than the three
/// expected). Carries no glucose value.
pub fn build_insufficient_measurement_alert(
    patient_id: Uuid,
    date: NaiveDate,
    at: NaiveDateTime,
) -> Alert {
    Alert {
        id: Uuid::new_v4(),
        patient_id,
        alert_type: AlertType::InsufficientMeasurement,
        message: MessageTemplates::insufficient_measurement(date),
        glucose_level: None,
        date: at,
        is_read: false,
        created_at: at,
    }
}
