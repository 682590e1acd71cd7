pub mod adherence;
pub mod alert;
pub mod enums;
pub mod insulin;
pub mod measurement;
pub mod patient;
pub mod symptom;

pub use adherence::{DietEntry, ExerciseEntry};
pub use alert::Alert;
pub use insulin::InsulinRecommendation;
pub use measurement::{period_from_time, Measurement, ScreeningCategory, PERIOD_WINDOWS};
pub use patient::Patient;
pub use symptom::Symptom;
