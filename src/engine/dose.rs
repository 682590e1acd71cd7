use super::types::GlucoseBand;

/// Map a daily average glucose to a recommended insulin dose in ml.
///
/// Shares the alert banding: hypoglycemic and normal averages get no
/// insulin, then one ml per band above that. No average (a day without
/// measurements) means no recommendation, not a zero dose.
pub fn recommended_dose(average_glucose: Option<f64>) -> Option<u8> {
    let avg = average_glucose?;
    let dose = match GlucoseBand::classify(avg) {
        GlucoseBand::Hypoglycemia | GlucoseBand::Normal => 0,
        GlucoseBand::MediumHigh => 1,
        GlucoseBand::High => 2,
        GlucoseBand::Hyperglycemia => 3,
    };
    Some(dose)
}
