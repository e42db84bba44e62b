//! Built-in field tables for the specialized section kinds.

use healthpro_core::models::definition::{FieldDefinition, SectionDefinition, SectionKind};

const VITALS: &str = "vitalsMap.vitals";
const PHYSIO: &str = "vitalsMap.metadata.physiological_scores";
const BODY: &str = "bodyCompositionData";
const CARDIO: &str = "vitalsMap.metadata.cardiovascular";
const GLUCOSE: &str = "vitalsMap.metadata.glucose_info";
const HEART: &str = "vitalsMap.metadata.heart_scores";

pub const SYSTOLIC_PATH: &str = "vitalsMap.vitals.bp_sys";
pub const DIASTOLIC_PATH: &str = "vitalsMap.vitals.bp_dia";

pub const EXERCISES_PATH: &str = "exercises";

/// How a field's value is pulled out of the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    /// `data_path`, then the fallbacks.
    Paths,
    /// `"<systolic>/<diastolic>"`, present only when both parts are.
    BloodPressure,
}

#[derive(Debug, Clone)]
pub struct LayoutField {
    pub definition: FieldDefinition,
    pub source: ValueSource,
}

impl From<FieldDefinition> for LayoutField {
    fn from(definition: FieldDefinition) -> Self {
        Self {
            definition,
            source: ValueSource::Paths,
        }
    }
}

fn path(prefix: &str, key: &str) -> String {
    format!("{prefix}.{key}")
}

/// The built-in fields for `kind`, in display order.
pub fn builtin_fields(kind: SectionKind) -> Vec<LayoutField> {
    match kind {
        SectionKind::Vitals => vec![
            FieldDefinition::new("heart_rate", "Heart Rate", path(VITALS, "heart_rate"))
                .unit("bpm")
                .into(),
            LayoutField {
                definition: FieldDefinition::new("blood_pressure", "Blood Pressure", SYSTOLIC_PATH)
                    .unit("mmHg"),
                source: ValueSource::BloodPressure,
            },
            FieldDefinition::new("oxygen_saturation", "Oxygen Saturation", path(VITALS, "oxy_sat_prcnt"))
                .unit("%")
                .into(),
            FieldDefinition::new("respiratory_rate", "Respiratory Rate", path(VITALS, "resp_rate"))
                .unit("breaths/min")
                .into(),
        ],
        SectionKind::BodyComposition => vec![
            FieldDefinition::new("bmi", "BMI", path(BODY, "BMI"))
                .fallback(path(PHYSIO, "bmi"))
                .unit("kg/m²")
                .into(),
            FieldDefinition::new("body_fat", "Body Fat %", path(BODY, "BFC"))
                .fallback(path(PHYSIO, "bodyfat"))
                .unit("%")
                .into(),
            FieldDefinition::new("muscle_age", "Muscle Age", path(BODY, "M_Age"))
                .unit("years")
                .into(),
            FieldDefinition::new("bmr", "Basal Metabolic Rate", path(BODY, "BMR"))
                .unit("kcal")
                .into(),
            FieldDefinition::new("lean_mass", "Lean Mass", path(BODY, "LM")).unit("kg").into(),
            FieldDefinition::new("fat_mass", "Fat Mass", path(BODY, "FM")).unit("kg").into(),
            FieldDefinition::new("waist_hip_ratio", "Waist-to-Hip Ratio", path(BODY, "WHR")).into(),
            FieldDefinition::new("total_body_water", "Total Body Water", path(PHYSIO, "tbwp"))
                .unit("%")
                .into(),
        ],
        SectionKind::Cardiovascular => vec![
            FieldDefinition::new("cardiac_output", "Cardiac Output", path(CARDIO, "cardiac_out"))
                .unit("L/min")
                .into(),
            FieldDefinition::new("mean_arterial_pressure", "Mean Arterial Pressure", path(CARDIO, "map"))
                .unit("mmHg")
                .into(),
            FieldDefinition::new("prq", "PRQ", path(CARDIO, "prq")).into(),
            FieldDefinition::new("vo2max", "VO2 Max", path(PHYSIO, "vo2max"))
                .unit("ml/kg/min")
                .into(),
        ],
        SectionKind::Glucose => vec![
            FieldDefinition::new(
                "diabetes_control_score",
                "Diabetes Control Score",
                path(GLUCOSE, "diabetes_control_score"),
            )
            .into(),
            FieldDefinition::new("hba1c", "HbA1c", path(GLUCOSE, "hba1c")).unit("%").into(),
            FieldDefinition::new("status", "Status", path(GLUCOSE, "status")).into(),
        ],
        SectionKind::RiskAssessment => vec![
            FieldDefinition::new("health_risk_score", "Health Risk Score", "vitalsMap.health_risk_score").into(),
            FieldDefinition::new("stress_index", "Stress Index", path(HEART, "stress_index")).into(),
            FieldDefinition::new("sdnn", "Heart Rate Variability", path(HEART, "sdnn"))
                .unit("ms")
                .into(),
            FieldDefinition::new("rmssd", "RMSSD", path(HEART, "rmssd")).unit("ms").into(),
            FieldDefinition::new("pnn50", "pNN50", path(HEART, "pNN50_per")).unit("%").into(),
        ],
        SectionKind::Exercises | SectionKind::Custom => Vec::new(),
    }
}

/// Built-in fields merged with the fields declared on the section.
///
/// A declared field replaces the built-in one with the same id (keeping its
/// value source); new ids are appended in declaration order.
pub fn effective_fields(section: &SectionDefinition) -> Vec<LayoutField> {
    let mut fields = builtin_fields(section.kind);
    for declared in &section.fields {
        match fields.iter_mut().find(|f| f.definition.id == declared.id) {
            Some(existing) => existing.definition = declared.clone(),
            None => fields.push(declared.clone().into()),
        }
    }
    fields
}

/// Placeholder shown when none of a section's fields resolve.
pub fn placeholder(kind: SectionKind) -> &'static str {
    match kind {
        SectionKind::Vitals => "No vital data available",
        SectionKind::Exercises => "No exercise data available",
        SectionKind::Cardiovascular => "No cardiovascular data available",
        SectionKind::Glucose => "No glucose data available",
        SectionKind::BodyComposition | SectionKind::RiskAssessment | SectionKind::Custom => {
            "No data available for this section"
        }
    }
}

pub const NO_CONFIGURATION: &str = "No section configuration available";
