use crate::db::DatabaseError;
use serde::{Deserialize, Serialize};

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Period {
    Morning => "morning",
    Noon => "noon",
    Afternoon => "afternoon",
    Evening => "evening",
    Night => "night",
});

impl Period {
    /// All periods in intra-day order. The cascading daily average walks
    /// this order and the insulin review keys readings by it.
    pub const ALL: [Period; 5] = [
        Period::Morning,
        Period::Noon,
        Period::Afternoon,
        Period::Evening,
        Period::Night,
    ];

    /// Display label used in alert messages.
    pub fn label(&self) -> &'static str {
        match self {
            Period::Morning => "morning",
            Period::Noon => "noon",
            Period::Afternoon => "afternoon",
            Period::Evening => "evening",
            Period::Night => "night",
        }
    }
}

str_enum!(AlertType {
    Hypoglycemia => "hypoglycemia",
    Normal => "normal",
    MediumHigh => "medium_high",
    High => "high",
    Hyperglycemia => "hyperglycemia",
    MissingMeasurement => "missing_measurement",
    InsufficientMeasurement => "insufficient_measurement",
});

impl AlertType {
    /// Short clinician-facing title for list views.
    pub fn title(&self) -> &'static str {
        match self {
            AlertType::Hypoglycemia => "Hypoglycemia risk",
            AlertType::Normal => "Normal level",
            AlertType::MediumHigh => "Follow-up advised",
            AlertType::High => "Monitoring required",
            AlertType::Hyperglycemia => "Urgent attention",
            AlertType::MissingMeasurement => "Missing measurements",
            AlertType::InsufficientMeasurement => "Insufficient measurements",
        }
    }
}

str_enum!(SymptomType {
    Polyuria => "polyuria",
    Polyphagia => "polyphagia",
    Polydipsia => "polydipsia",
    Neuropathy => "neuropathy",
    WeightLoss => "weight_loss",
    Fatigue => "fatigue",
    SlowHealing => "slow_healing",
    BlurredVision => "blurred_vision",
});

impl SymptomType {
    pub fn display_name(&self) -> &'static str {
        match self {
            SymptomType::Polyuria => "Polyuria (frequent urination)",
            SymptomType::Polyphagia => "Polyphagia (excessive hunger)",
            SymptomType::Polydipsia => "Polydipsia (excessive thirst)",
            SymptomType::Neuropathy => "Neuropathy (tingling in hands and feet)",
            SymptomType::WeightLoss => "Weight loss",
            SymptomType::Fatigue => "Fatigue",
            SymptomType::SlowHealing => "Slow-healing wounds",
            SymptomType::BlurredVision => "Blurred vision",
        }
    }
}

str_enum!(DietType {
    LowSugar => "low_sugar",
    NoSugar => "no_sugar",
    Balanced => "balanced",
});

impl DietType {
    pub fn display_name(&self) -> &'static str {
        match self {
            DietType::LowSugar => "Low-sugar diet",
            DietType::NoSugar => "Sugar-free diet",
            DietType::Balanced => "Balanced diet",
        }
    }
}

str_enum!(ExerciseType {
    Walking => "walking",
    Cycling => "cycling",
    Clinical => "clinical",
});

impl ExerciseType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ExerciseType::Walking => "Walking",
            ExerciseType::Cycling => "Cycling",
            ExerciseType::Clinical => "Clinical exercise",
        }
    }
}
