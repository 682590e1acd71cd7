use chrono::NaiveDate;

use crate::models::enums::Period;

use super::types::GlucoseBand;

/// Message template builder for alert text.
/// Every message embeds the measured value; period-tagged readings get
/// the period label appended. No error codes reach the reader.
pub struct MessageTemplates;

impl MessageTemplates {
    /// Glucose alert message for a classified reading.
    pub fn glucose_alert(band: GlucoseBand, glucose: f64, period: Option<Period>) -> String {
        let mut message = match band {
            GlucoseBand::Hypoglycemia => format!(
                "Blood glucose dropped below 70 mg/dL. Hypoglycemia risk, rapid \
                 intervention may be required. Reading: {glucose} mg/dL"
            ),
            GlucoseBand::Normal => format!(
                "Blood glucose is within the normal range. No action needed. \
                 Reading: {glucose} mg/dL"
            ),
            GlucoseBand::MediumHigh => format!(
                "Blood glucose is between 111 and 150 mg/dL. The situation should \
                 be followed up. Reading: {glucose} mg/dL"
            ),
            GlucoseBand::High => format!(
                "Blood glucose is between 151 and 200 mg/dL. Diabetes control is \
                 required. Reading: {glucose} mg/dL"
            ),
            GlucoseBand::Hyperglycemia => format!(
                "Blood glucose is above 200 mg/dL. Hyperglycemia, urgent \
                 intervention may be required. Reading: {glucose} mg/dL"
            ),
        };

        if let Some(period) = period {
            message.push_str(&format!(" ({} reading)", period.label()));
        }

        message
    }

    /// Zero measurements recorded on the given day.
    pub fn missing_measurement(date: NaiveDate) -> String {
        format!(
            "The patient recorded no blood glucose measurements on {}. \
             Urgent follow-up is advised.",
            date.format("%d.%m.%Y"),
        )
    }

    /// Fewer than three measurements recorded on the given day.
    pub fn insufficient_measurement(date: NaiveDate) -> String {
        format!(
            "The patient's blood glucose measurement count on {} is \
             insufficient (fewer than 3). The situation should be monitored.",
            date.format("%d.%m.%Y"),
        )
    }
}
