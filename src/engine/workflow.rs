use std::collections::HashSet;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::Connection;
use uuid::Uuid;

use crate::db;
use crate::models::enums::Period;
use crate::models::{period_from_time, InsulinRecommendation, Measurement};

use super::alerts::{
    build_glucose_alert, build_insufficient_measurement_alert, build_missing_measurement_alert,
};
use super::average::weighted_average;
use super::dose::recommended_dose;
use super::recommend::recommend;
use super::types::{EngineError, PeriodReadings, RecommendationSnapshot};

/// Fewer daily measurements than this raises an insufficient-measurement
/// alert.
const EXPECTED_DAILY_MEASUREMENTS: usize = 3;

/// Hour of day the daily insulin recommendation row is stamped with.
const REVIEW_STAMP_HOUR: u32 = 23;

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Record a new glucose measurement and run the decision chain:
/// persist the measurement, raise the per-reading alert, then recompute
/// the day's insulin recommendation.
///
/// The three writes are independent; a failure partway leaves the
/// earlier ones committed and the next measurement's recompute rederives
/// the day from scratch.
pub fn record_measurement(
    conn: &Connection,
    patient_id: Uuid,
    glucose_level: f64,
    measurement_date: NaiveDate,
    measurement_time: NaiveTime,
    period: Option<Period>,
    notes: Option<String>,
) -> Result<Uuid, EngineError> {
    // Period is fixed at creation: supplied, or derived from the clock.
    let period = period.or_else(|| period_from_time(measurement_time));

    let measurement = Measurement {
        id: Uuid::new_v4(),
        patient_id,
        glucose_level,
        measurement_date,
        measurement_time,
        period,
        notes,
        created_at: now(),
    };
    let measurement_id = db::insert_measurement(conn, &measurement)?;

    let alert = build_glucose_alert(patient_id, glucose_level, period, now());
    db::insert_alert(conn, &alert)?;

    tracing::info!(
        patient_id = %patient_id,
        glucose = glucose_level,
        period = period.map(|p| p.as_str()).unwrap_or("none"),
        alert_type = alert.alert_type.as_str(),
        "Measurement recorded"
    );

    run_daily_review(conn, patient_id, measurement_date)?;

    Ok(measurement_id)
}

/// Recompute the day's insulin recommendation from all of that day's
/// measurements.
///
/// Zero measurements raise a missing-measurement alert and produce no
/// recommendation row. One or two raise an insufficient-measurement
/// alert but the review still continues with what is there. Returns the
/// recommended dose, if any.
pub fn run_daily_review(
    conn: &Connection,
    patient_id: Uuid,
    date: NaiveDate,
) -> Result<Option<u8>, EngineError> {
    let measurements = db::get_measurements_by_date(conn, &patient_id, date)?;

    if measurements.is_empty() {
        let alert = build_missing_measurement_alert(patient_id, date, now());
        db::insert_alert(conn, &alert)?;
        tracing::warn!(patient_id = %patient_id, %date, "No measurements for day");
        return Ok(None);
    }

    if measurements.len() < EXPECTED_DAILY_MEASUREMENTS {
        let alert = build_insufficient_measurement_alert(patient_id, date, now());
        db::insert_alert(conn, &alert)?;
    }

    let readings = PeriodReadings::from_measurements(&measurements);
    let average = weighted_average(&readings);
    let dose = recommended_dose(average);

    // A new row supersedes any earlier recommendation for the day.
    let stamp_time = NaiveTime::from_hms_opt(REVIEW_STAMP_HOUR, 0, 0).unwrap_or(NaiveTime::MIN);
    let stamp = date.and_time(stamp_time);
    let rec = InsulinRecommendation {
        id: Uuid::new_v4(),
        patient_id,
        recommended_dose: dose.map(f64::from),
        administered_dose: None,
        average_glucose: average,
        date: stamp,
        notes: None,
        created_at: now(),
        updated_at: now(),
    };
    db::insert_insulin_recommendation(conn, &rec)?;

    tracing::info!(
        patient_id = %patient_id,
        %date,
        measurements = measurements.len(),
        average = average.unwrap_or(f64::NAN),
        dose = dose.map(i64::from).unwrap_or(-1),
        "Daily insulin review complete"
    );

    Ok(dose)
}

/// Diet/exercise guidance from the latest reading and the day's reported
/// symptoms. None when the patient has no measurements at all.
pub fn current_recommendations(
    conn: &Connection,
    patient_id: Uuid,
    date: NaiveDate,
) -> Result<Option<RecommendationSnapshot>, EngineError> {
    let latest = db::get_latest_measurements(conn, &patient_id, 1)?;
    let Some(latest) = latest.first() else {
        return Ok(None);
    };

    let symptoms: HashSet<_> = db::get_symptom_types_for_day(conn, &patient_id, date)?
        .into_iter()
        .collect();

    let (diet, exercise) = recommend(latest.glucose_level, &symptoms);

    Ok(Some(RecommendationSnapshot {
        glucose_level: latest.glucose_level,
        diet,
        exercise,
    }))
}

/// Record the dose actually administered against an existing
/// recommendation. Returns whether the row was found.
pub fn administer_insulin(
    conn: &Connection,
    recommendation_id: &Uuid,
    administered_dose: f64,
    notes: Option<&str>,
) -> Result<bool, EngineError> {
    let found = db::record_administered_dose(conn, recommendation_id, administered_dose, notes)?;
    if !found {
        tracing::warn!(recommendation_id = %recommendation_id, "Insulin recommendation not found");
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_memory_database;
    use crate::models::enums::{AlertType, DietType, ExerciseType, SymptomType};
    use crate::models::{Patient, Symptom};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn seed_patient(conn: &Connection) -> Uuid {
        let patient = Patient {
            id: Uuid::new_v4(),
            name: "Mehmet".into(),
            surname: "Demir".into(),
            diabetes_type: Some("type_1".into()),
            diagnosis_date: Some(date(1)),
            created_at: date(1).and_time(time(9, 0)),
        };
        db::insert_patient(conn, &patient).unwrap()
    }

    fn seed_symptom(conn: &Connection, patient_id: Uuid, symptom_type: SymptomType, day: NaiveDate) {
        db::insert_symptom(
            conn,
            &Symptom {
                id: Uuid::new_v4(),
                patient_id,
                symptom_type,
                severity: 3,
                date: day,
                notes: None,
                created_at: day.and_time(time(9, 0)),
            },
        )
        .unwrap();
    }

    #[test]
    fn two_measurement_day_end_to_end() {
        let conn = open_memory_database().unwrap();
        let pid = seed_patient(&conn);
        let day = date(10);

        record_measurement(&conn, pid, 80.0, day, time(7, 30), None, None).unwrap();
        record_measurement(&conn, pid, 120.0, day, time(12, 30), None, None).unwrap();

        // Periods were derived from the clock windows.
        let measurements = db::get_measurements_by_date(&conn, &pid, day).unwrap();
        assert_eq!(measurements[0].period, Some(Period::Morning));
        assert_eq!(measurements[1].period, Some(Period::Noon));

        // 2 < 3 measurements: the insufficient alert fired on both reviews.
        let insufficient =
            db::get_alerts_by_type(&conn, &pid, AlertType::InsufficientMeasurement).unwrap();
        assert!(!insufficient.is_empty());

        // Latest review row: average = mean(80, (80+120)/2) = 90, dose 0.
        let recs = db::get_insulin_recommendations_by_date_range(&conn, &pid, day, day).unwrap();
        let last = recs.last().unwrap();
        assert_eq!(last.average_glucose, Some(90.0));
        assert_eq!(last.recommended_dose, Some(0.0));
    }

    #[test]
    fn per_reading_alerts_follow_band_policy() {
        let conn = open_memory_database().unwrap();
        let pid = seed_patient(&conn);
        let day = date(10);

        record_measurement(&conn, pid, 65.0, day, time(7, 30), None, None).unwrap();
        record_measurement(&conn, pid, 95.0, day, time(12, 30), None, None).unwrap();
        record_measurement(&conn, pid, 300.0, day, time(22, 15), None, None).unwrap();

        let alerts = db::get_alerts_for_patient(&conn, &pid).unwrap();
        let find = |t: AlertType| alerts.iter().find(|a| a.alert_type == t).unwrap();

        assert!(!find(AlertType::Hypoglycemia).is_read);
        assert!(find(AlertType::Normal).is_read);
        let hyper = find(AlertType::Hyperglycemia);
        assert!(!hyper.is_read);
        assert!(hyper.message.contains("300"));
        assert!(hyper.message.contains("(night reading)"));
    }

    #[test]
    fn review_of_empty_day_raises_missing_alert_only() {
        let conn = open_memory_database().unwrap();
        let pid = seed_patient(&conn);
        let day = date(10);

        let dose = run_daily_review(&conn, pid, day).unwrap();
        assert_eq!(dose, None);

        let missing = db::get_alerts_by_type(&conn, &pid, AlertType::MissingMeasurement).unwrap();
        assert_eq!(missing.len(), 1);
        assert_eq!(missing[0].glucose_level, None);

        // No recommendation row was written.
        let recs = db::get_insulin_recommendations_by_date_range(&conn, &pid, day, day).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn each_measurement_supersedes_the_days_recommendation() {
        let conn = open_memory_database().unwrap();
        let pid = seed_patient(&conn);
        let day = date(10);

        record_measurement(&conn, pid, 180.0, day, time(7, 30), None, None).unwrap();
        record_measurement(&conn, pid, 180.0, day, time(12, 30), None, None).unwrap();
        record_measurement(&conn, pid, 180.0, day, time(15, 30), None, None).unwrap();

        let recs = db::get_insulin_recommendations_by_date_range(&conn, &pid, day, day).unwrap();
        assert_eq!(recs.len(), 3);
        // A flat 180 day averages to 180 → 2 ml, stamped 23:00.
        let last = recs.last().unwrap();
        assert_eq!(last.recommended_dose, Some(2.0));
        assert_eq!(last.date.time(), time(23, 0));
    }

    #[test]
    fn measurement_outside_windows_has_no_period_but_still_alerts() {
        let conn = open_memory_database().unwrap();
        let pid = seed_patient(&conn);
        let day = date(10);

        record_measurement(&conn, pid, 130.0, day, time(10, 0), None, None).unwrap();

        let measurements = db::get_measurements_by_date(&conn, &pid, day).unwrap();
        assert_eq!(measurements[0].period, None);

        // The reading alert still fired...
        let medium = db::get_alerts_by_type(&conn, &pid, AlertType::MediumHigh).unwrap();
        assert_eq!(medium.len(), 1);
        assert!(!medium[0].message.contains('('));

        // ...but a period-less reading contributes nothing to the average.
        let recs = db::get_insulin_recommendations_by_date_range(&conn, &pid, day, day).unwrap();
        assert_eq!(recs.last().unwrap().average_glucose, None);
        assert_eq!(recs.last().unwrap().recommended_dose, None);
    }

    #[test]
    fn recommendations_use_latest_reading_and_todays_symptoms() {
        let conn = open_memory_database().unwrap();
        let pid = seed_patient(&conn);
        let day = date(10);

        assert!(current_recommendations(&conn, pid, day).unwrap().is_none());

        record_measurement(&conn, pid, 90.0, day, time(7, 30), None, None).unwrap();
        seed_symptom(&conn, pid, SymptomType::Polydipsia, day);

        let snap = current_recommendations(&conn, pid, day).unwrap().unwrap();
        assert_eq!(snap.glucose_level, 90.0);
        assert_eq!(snap.diet, DietType::Balanced);
        assert_eq!(snap.exercise, Some(ExerciseType::Walking));

        // Yesterday's symptoms do not leak into today's snapshot.
        let next_day = date(11);
        record_measurement(&conn, pid, 90.0, next_day, time(7, 30), None, None).unwrap();
        let snap = current_recommendations(&conn, pid, next_day).unwrap().unwrap();
        assert_eq!(snap.diet, DietType::LowSugar);
    }

    #[test]
    fn administer_insulin_records_dose_once() {
        let conn = open_memory_database().unwrap();
        let pid = seed_patient(&conn);
        let day = date(10);

        record_measurement(&conn, pid, 160.0, day, time(7, 30), None, None).unwrap();
        let recs = db::get_insulin_recommendations_by_date_range(&conn, &pid, day, day).unwrap();
        let rec_id = recs[0].id;

        assert!(administer_insulin(&conn, &rec_id, 2.0, Some("self-administered")).unwrap());
        assert!(!administer_insulin(&conn, &Uuid::new_v4(), 2.0, None).unwrap());

        let recs = db::get_insulin_recommendations_by_date_range(&conn, &pid, day, day).unwrap();
        assert_eq!(recs[0].administered_dose, Some(2.0));
    }
}
