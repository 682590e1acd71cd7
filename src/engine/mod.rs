//! Clinical decision engine.
//!
//! Pure classification and aggregation functions live in the leaf
//! modules; `workflow` composes them with the repository layer to run
//! the record-measurement and daily-review chains.

pub mod alerts;
pub mod average;
pub mod dose;
pub mod messages;
pub mod recommend;
pub mod types;
pub mod workflow;

pub use alerts::{
    build_glucose_alert, build_insufficient_measurement_alert, build_missing_measurement_alert,
};
pub use average::weighted_average;
pub use dose::recommended_dose;
pub use messages::MessageTemplates;
pub use recommend::recommend;
pub use types::{EngineError, GlucoseBand, PeriodReadings, RecommendationSnapshot};
pub use workflow::{
    administer_insulin, current_recommendations, record_measurement, run_daily_review,
};
