use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::DatabaseError;
use crate::models::enums::*;
use crate::models::*;

fn parse_uuid(s: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(s).map_err(|e| DatabaseError::ConstraintViolation(e.to_string()))
}

fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_default()
}

fn parse_time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(s, "%H:%M"))
        .unwrap_or_default()
}

fn parse_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .unwrap_or_default()
}

fn fmt_datetime(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

// ═══════════════════════════════════════════
// Patient Repository
// ═══════════════════════════════════════════

pub fn insert_patient(conn: &Connection, patient: &Patient) -> Result<Uuid, DatabaseError> {
    conn.execute(
        "INSERT INTO patients (id, name, surname, diabetes_type, diagnosis_date, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            patient.id.to_string(),
            patient.name,
            patient.surname,
            patient.diabetes_type,
            patient.diagnosis_date.map(|d| d.to_string()),
            fmt_datetime(patient.created_at),
        ],
    )?;
    Ok(patient.id)
}

pub fn get_patient(conn: &Connection, id: &Uuid) -> Result<Option<Patient>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, name, surname, diabetes_type, diagnosis_date, created_at
         FROM patients WHERE id = ?1",
    )?;

    let result = stmt
        .query_row(params![id.to_string()], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<String>>(3)?,
                row.get::<_, Option<String>>(4)?,
                row.get::<_, String>(5)?,
            ))
        })
        .optional()?;

    match result {
        Some((id, name, surname, diabetes_type, diagnosis_date, created_at)) => {
            Ok(Some(Patient {
                id: parse_uuid(&id)?,
                name,
                surname,
                diabetes_type,
                diagnosis_date: diagnosis_date.as_deref().map(parse_date),
                created_at: parse_datetime(&created_at),
            }))
        }
        None => Ok(None),
    }
}

// ═══════════════════════════════════════════
// Measurement Repository
// ═══════════════════════════════════════════

pub fn insert_measurement(
    conn: &Connection,
    measurement: &Measurement,
) -> Result<Uuid, DatabaseError> {
    conn.execute(
        "INSERT INTO measurements (id, patient_id, glucose_level, measurement_date,
         measurement_time, period, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            measurement.id.to_string(),
            measurement.patient_id.to_string(),
            measurement.glucose_level,
            measurement.measurement_date.to_string(),
            measurement.measurement_time.format("%H:%M:%S").to_string(),
            measurement.period.map(|p| p.as_str()),
            measurement.notes,
            fmt_datetime(measurement.created_at),
        ],
    )?;
    Ok(measurement.id)
}

struct MeasurementRow {
    id: String,
    patient_id: String,
    glucose_level: f64,
    measurement_date: String,
    measurement_time: String,
    period: Option<String>,
    notes: Option<String>,
    created_at: String,
}

fn measurement_from_row(row: MeasurementRow) -> Result<Measurement, DatabaseError> {
    Ok(Measurement {
        id: parse_uuid(&row.id)?,
        patient_id: parse_uuid(&row.patient_id)?,
        glucose_level: row.glucose_level,
        measurement_date: parse_date(&row.measurement_date),
        measurement_time: parse_time(&row.measurement_time),
        period: row.period.as_deref().map(Period::from_str).transpose()?,
        notes: row.notes,
        created_at: parse_datetime(&row.created_at),
    })
}

const MEASUREMENT_COLUMNS: &str = "id, patient_id, glucose_level, measurement_date, \
     measurement_time, period, notes, created_at";

fn map_measurement_rows(
    stmt: &mut rusqlite::Statement<'_>,
    params: impl rusqlite::Params,
) -> Result<Vec<Measurement>, DatabaseError> {
    let rows = stmt.query_map(params, |row| {
        Ok(MeasurementRow {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            glucose_level: row.get(2)?,
            measurement_date: row.get(3)?,
            measurement_time: row.get(4)?,
            period: row.get(5)?,
            notes: row.get(6)?,
            created_at: row.get(7)?,
        })
    })?;

    let mut measurements = Vec::new();
    for row in rows {
        measurements.push(measurement_from_row(row?)?);
    }
    Ok(measurements)
}

/// All measurements for one patient on one day, ordered by time of day.
/// The insulin review relies on this ordering: when a period holds more
/// than one reading, the latest one wins.
pub fn get_measurements_by_date(
    conn: &Connection,
    patient_id: &Uuid,
    date: NaiveDate,
) -> Result<Vec<Measurement>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEASUREMENT_COLUMNS} FROM measurements
         WHERE patient_id = ?1 AND measurement_date = ?2
         ORDER BY measurement_time"
    ))?;
    map_measurement_rows(&mut stmt, params![patient_id.to_string(), date.to_string()])
}

pub fn get_measurements_by_date_range(
    conn: &Connection,
    patient_id: &Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Measurement>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEASUREMENT_COLUMNS} FROM measurements
         WHERE patient_id = ?1 AND measurement_date BETWEEN ?2 AND ?3
         ORDER BY measurement_date, measurement_time"
    ))?;
    map_measurement_rows(
        &mut stmt,
        params![patient_id.to_string(), start.to_string(), end.to_string()],
    )
}

/// Most recent measurements first.
pub fn get_latest_measurements(
    conn: &Connection,
    patient_id: &Uuid,
    limit: u32,
) -> Result<Vec<Measurement>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {MEASUREMENT_COLUMNS} FROM measurements
         WHERE patient_id = ?1
         ORDER BY measurement_date DESC, measurement_time DESC
         LIMIT ?2"
    ))?;
    map_measurement_rows(&mut stmt, params![patient_id.to_string(), limit])
}

/// Plain (unweighted) average glucose over a date range, for trend views.
pub fn get_avg_glucose_by_date_range(
    conn: &Connection,
    patient_id: &Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Option<f64>, DatabaseError> {
    let avg = conn.query_row(
        "SELECT AVG(glucose_level) FROM measurements
         WHERE patient_id = ?1 AND measurement_date BETWEEN ?2 AND ?3",
        params![patient_id.to_string(), start.to_string(), end.to_string()],
        |row| row.get::<_, Option<f64>>(0),
    )?;
    Ok(avg)
}

// ═══════════════════════════════════════════
// Alert Repository
// ═══════════════════════════════════════════

pub fn insert_alert(conn: &Connection, alert: &Alert) -> Result<Uuid, DatabaseError> {
    conn.execute(
        "INSERT INTO alerts (id, patient_id, alert_type, message, glucose_level,
         date, is_read, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            alert.id.to_string(),
            alert.patient_id.to_string(),
            alert.alert_type.as_str(),
            alert.message,
            alert.glucose_level,
            fmt_datetime(alert.date),
            alert.is_read as i32,
            fmt_datetime(alert.created_at),
        ],
    )?;
    Ok(alert.id)
}

/// Mark an alert read. One-way transition; marking an already-read alert
/// again is harmless. Returns whether a row was found.
pub fn mark_alert_read(conn: &Connection, alert_id: &Uuid) -> Result<bool, DatabaseError> {
    let updated = conn.execute(
        "UPDATE alerts SET is_read = 1 WHERE id = ?1",
        params![alert_id.to_string()],
    )?;
    Ok(updated > 0)
}

struct AlertRow {
    id: String,
    patient_id: String,
    alert_type: String,
    message: String,
    glucose_level: Option<f64>,
    date: String,
    is_read: i32,
    created_at: String,
}

fn alert_from_row(row: AlertRow) -> Result<Alert, DatabaseError> {
    Ok(Alert {
        id: parse_uuid(&row.id)?,
        patient_id: parse_uuid(&row.patient_id)?,
        alert_type: AlertType::from_str(&row.alert_type)?,
        message: row.message,
        glucose_level: row.glucose_level,
        date: parse_datetime(&row.date),
        is_read: row.is_read != 0,
        created_at: parse_datetime(&row.created_at),
    })
}

const ALERT_COLUMNS: &str =
    "id, patient_id, alert_type, message, glucose_level, date, is_read, created_at";

fn map_alert_rows(
    stmt: &mut rusqlite::Statement<'_>,
    params: impl rusqlite::Params,
) -> Result<Vec<Alert>, DatabaseError> {
    let rows = stmt.query_map(params, |row| {
        Ok(AlertRow {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            alert_type: row.get(2)?,
            message: row.get(3)?,
            glucose_level: row.get(4)?,
            date: row.get(5)?,
            is_read: row.get(6)?,
            created_at: row.get(7)?,
        })
    })?;

    let mut alerts = Vec::new();
    for row in rows {
        alerts.push(alert_from_row(row?)?);
    }
    Ok(alerts)
}

pub fn get_alerts_for_patient(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<Alert>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ALERT_COLUMNS} FROM alerts WHERE patient_id = ?1 ORDER BY date DESC"
    ))?;
    map_alert_rows(&mut stmt, params![patient_id.to_string()])
}

pub fn get_unread_alerts(
    conn: &Connection,
    patient_id: &Uuid,
) -> Result<Vec<Alert>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ALERT_COLUMNS} FROM alerts
         WHERE patient_id = ?1 AND is_read = 0
         ORDER BY date DESC"
    ))?;
    map_alert_rows(&mut stmt, params![patient_id.to_string()])
}

pub fn get_alerts_by_type(
    conn: &Connection,
    patient_id: &Uuid,
    alert_type: AlertType,
) -> Result<Vec<Alert>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {ALERT_COLUMNS} FROM alerts
         WHERE patient_id = ?1 AND alert_type = ?2
         ORDER BY date DESC"
    ))?;
    map_alert_rows(
        &mut stmt,
        params![patient_id.to_string(), alert_type.as_str()],
    )
}

// ═══════════════════════════════════════════
// Insulin Repository
// ═══════════════════════════════════════════

pub fn insert_insulin_recommendation(
    conn: &Connection,
    rec: &InsulinRecommendation,
) -> Result<Uuid, DatabaseError> {
    conn.execute(
        "INSERT INTO insulin_recommendations (id, patient_id, recommended_dose,
         administered_dose, average_glucose, date, notes, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            rec.id.to_string(),
            rec.patient_id.to_string(),
            rec.recommended_dose,
            rec.administered_dose,
            rec.average_glucose,
            fmt_datetime(rec.date),
            rec.notes,
            fmt_datetime(rec.created_at),
            fmt_datetime(rec.updated_at),
        ],
    )?;
    Ok(rec.id)
}

/// Record the dose actually administered for an existing recommendation.
/// Returns whether a row was found.
pub fn record_administered_dose(
    conn: &Connection,
    recommendation_id: &Uuid,
    administered_dose: f64,
    notes: Option<&str>,
) -> Result<bool, DatabaseError> {
    let updated = conn.execute(
        "UPDATE insulin_recommendations
         SET administered_dose = ?1, notes = ?2, updated_at = datetime('now')
         WHERE id = ?3",
        params![administered_dose, notes, recommendation_id.to_string()],
    )?;
    Ok(updated > 0)
}

struct InsulinRow {
    id: String,
    patient_id: String,
    recommended_dose: Option<f64>,
    administered_dose: Option<f64>,
    average_glucose: Option<f64>,
    date: String,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

fn insulin_from_row(row: InsulinRow) -> Result<InsulinRecommendation, DatabaseError> {
    Ok(InsulinRecommendation {
        id: parse_uuid(&row.id)?,
        patient_id: parse_uuid(&row.patient_id)?,
        recommended_dose: row.recommended_dose,
        administered_dose: row.administered_dose,
        average_glucose: row.average_glucose,
        date: parse_datetime(&row.date),
        notes: row.notes,
        created_at: parse_datetime(&row.created_at),
        updated_at: parse_datetime(&row.updated_at),
    })
}

const INSULIN_COLUMNS: &str = "id, patient_id, recommended_dose, administered_dose, \
     average_glucose, date, notes, created_at, updated_at";

pub fn get_insulin_recommendations_by_date_range(
    conn: &Connection,
    patient_id: &Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<InsulinRecommendation>, DatabaseError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {INSULIN_COLUMNS} FROM insulin_recommendations
         WHERE patient_id = ?1 AND date(date) BETWEEN ?2 AND ?3
         ORDER BY date, rowid"
    ))?;
    let rows = stmt.query_map(
        params![patient_id.to_string(), start.to_string(), end.to_string()],
        |row| {
            Ok(InsulinRow {
                id: row.get(0)?,
                patient_id: row.get(1)?,
                recommended_dose: row.get(2)?,
                administered_dose: row.get(3)?,
                average_glucose: row.get(4)?,
                date: row.get(5)?,
                notes: row.get(6)?,
                created_at: row.get(7)?,
                updated_at: row.get(8)?,
            })
        },
    )?;

    let mut recs = Vec::new();
    for row in rows {
        recs.push(insulin_from_row(row?)?);
    }
    Ok(recs)
}

// ═══════════════════════════════════════════
// Symptom Repository
// ═══════════════════════════════════════════

pub fn insert_symptom(conn: &Connection, symptom: &Symptom) -> Result<Uuid, DatabaseError> {
    conn.execute(
        "INSERT INTO symptoms (id, patient_id, symptom_type, severity, date, notes, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            symptom.id.to_string(),
            symptom.patient_id.to_string(),
            symptom.symptom_type.as_str(),
            symptom.severity,
            symptom.date.to_string(),
            symptom.notes,
            fmt_datetime(symptom.created_at),
        ],
    )?;
    Ok(symptom.id)
}

pub fn get_symptoms_by_date_range(
    conn: &Connection,
    patient_id: &Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Vec<Symptom>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT id, patient_id, symptom_type, severity, date, notes, created_at
         FROM symptoms
         WHERE patient_id = ?1 AND date BETWEEN ?2 AND ?3
         ORDER BY date",
    )?;
    let rows = stmt.query_map(
        params![patient_id.to_string(), start.to_string(), end.to_string()],
        |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, i32>(3)?,
                row.get::<_, String>(4)?,
                row.get::<_, Option<String>>(5)?,
                row.get::<_, String>(6)?,
            ))
        },
    )?;

    let mut symptoms = Vec::new();
    for row in rows {
        let (id, patient_id, symptom_type, severity, date, notes, created_at) = row?;
        symptoms.push(Symptom {
            id: parse_uuid(&id)?,
            patient_id: parse_uuid(&patient_id)?,
            symptom_type: SymptomType::from_str(&symptom_type)?,
            severity,
            date: parse_date(&date),
            notes,
            created_at: parse_datetime(&created_at),
        });
    }
    Ok(symptoms)
}

/// Distinct symptom types reported on one day, the recommendation
/// engine's input.
pub fn get_symptom_types_for_day(
    conn: &Connection,
    patient_id: &Uuid,
    date: NaiveDate,
) -> Result<Vec<SymptomType>, DatabaseError> {
    let mut stmt = conn.prepare(
        "SELECT DISTINCT symptom_type FROM symptoms
         WHERE patient_id = ?1 AND date = ?2",
    )?;
    let rows = stmt.query_map(params![patient_id.to_string(), date.to_string()], |row| {
        row.get::<_, String>(0)
    })?;

    let mut types = Vec::new();
    for row in rows {
        types.push(SymptomType::from_str(&row?)?);
    }
    Ok(types)
}

// ═══════════════════════════════════════════
// Diet / Exercise Repository
// ═══════════════════════════════════════════

pub fn insert_diet_entry(conn: &Connection, entry: &DietEntry) -> Result<Uuid, DatabaseError> {
    conn.execute(
        "INSERT INTO diets (id, patient_id, diet_type, date, is_followed, notes,
         created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            entry.id.to_string(),
            entry.patient_id.to_string(),
            entry.diet_type.as_str(),
            entry.date.to_string(),
            entry.is_followed as i32,
            entry.notes,
            fmt_datetime(entry.created_at),
            fmt_datetime(entry.updated_at),
        ],
    )?;
    Ok(entry.id)
}

pub fn insert_exercise_entry(
    conn: &Connection,
    entry: &ExerciseEntry,
) -> Result<Uuid, DatabaseError> {
    conn.execute(
        "INSERT INTO exercises (id, patient_id, exercise_type, date, is_completed, notes,
         created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
        params![
            entry.id.to_string(),
            entry.patient_id.to_string(),
            entry.exercise_type.as_str(),
            entry.date.to_string(),
            entry.is_completed as i32,
            entry.notes,
            fmt_datetime(entry.created_at),
            fmt_datetime(entry.updated_at),
        ],
    )?;
    Ok(entry.id)
}

/// Percentage of diet entries in the range marked as followed.
/// None when the patient has no entries in the range.
pub fn diet_compliance_percentage(
    conn: &Connection,
    patient_id: &Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Option<f64>, DatabaseError> {
    let pct = conn.query_row(
        "SELECT AVG(is_followed) * 100.0 FROM diets
         WHERE patient_id = ?1 AND date BETWEEN ?2 AND ?3",
        params![patient_id.to_string(), start.to_string(), end.to_string()],
        |row| row.get::<_, Option<f64>>(0),
    )?;
    Ok(pct)
}

/// Percentage of exercise entries in the range marked as completed.
pub fn exercise_compliance_percentage(
    conn: &Connection,
    patient_id: &Uuid,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<Option<f64>, DatabaseError> {
    let pct = conn.query_row(
        "SELECT AVG(is_completed) * 100.0 FROM exercises
         WHERE patient_id = ?1 AND date BETWEEN ?2 AND ?3",
        params![patient_id.to_string(), start.to_string(), end.to_string()],
        |row| row.get::<_, Option<f64>>(0),
    )?;
    Ok(pct)
}
