use serde::Serialize;
use serde_json::Value;

use healthpro_core::models::definition::{SectionDefinition, SectionKind};
use healthpro_core::models::record::AssessmentRecord;
use healthpro_core::resolve::{as_number, display_number, display_value};

use crate::field::{DisplayUnit, ResolvedField, render_field};
use crate::layouts::{self, LayoutField, ValueSource};

pub const DEFAULT_ICON: &str = "📊";

#[derive(Debug, Clone, Serialize)]
pub struct RenderableSection {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub content: SectionContent,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SectionContent {
    Fields { fields: Vec<DisplayUnit> },
    Exercises { cards: Vec<ExerciseCard> },
    Empty { message: String },
}

/// One entry of a list-structured section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseCard {
    pub name: String,
    pub score: Option<f64>,
    /// `"85%"`, or `"N/A"` when the entry carries no score.
    pub score_display: String,
    pub analysis: Vec<String>,
    pub recommendations: Vec<String>,
    pub reps_completed: String,
    pub reps_assigned: String,
    pub sets: String,
}

/// Build the renderable content for one section.
///
/// Field- or entry-level gaps never fail: absent values are dropped and an
/// all-absent section becomes a placeholder message.
pub fn assemble_section(section: &SectionDefinition, record: &AssessmentRecord) -> RenderableSection {
    let content = match section.kind {
        SectionKind::Exercises => exercise_cards(record),
        SectionKind::Custom if section.fields.is_empty() => SectionContent::Empty {
            message: layouts::NO_CONFIGURATION.to_string(),
        },
        SectionKind::Vitals
        | SectionKind::BodyComposition
        | SectionKind::Cardiovascular
        | SectionKind::Glucose
        | SectionKind::RiskAssessment
        | SectionKind::Custom => field_grid(section, record),
    };

    RenderableSection {
        id: section.id.clone(),
        title: section.title.clone(),
        icon: section.icon.clone().unwrap_or_else(|| DEFAULT_ICON.to_string()),
        content,
    }
}

fn field_grid(section: &SectionDefinition, record: &AssessmentRecord) -> SectionContent {
    let layout = layouts::effective_fields(section);
    let fields: Vec<DisplayUnit> = layout
        .iter()
        .filter_map(|field| render_field(&resolve_layout_field(field, record)))
        .collect();

    if fields.is_empty() {
        SectionContent::Empty {
            message: layouts::placeholder(section.kind).to_string(),
        }
    } else {
        SectionContent::Fields { fields }
    }
}

fn resolve_layout_field<'a>(field: &'a LayoutField, record: &AssessmentRecord) -> ResolvedField<'a> {
    match field.source {
        ValueSource::Paths => ResolvedField::resolve(&field.definition, record),
        ValueSource::BloodPressure => {
            let (Some(sys), Some(dia)) = (
                record.get(layouts::SYSTOLIC_PATH),
                record.get(layouts::DIASTOLIC_PATH),
            ) else {
                return ResolvedField::with_value(&field.definition, None);
            };
            let mut resolved = ResolvedField::with_value(&field.definition, Some(sys.clone()));
            resolved.value = Some(Value::String(format!(
                "{}/{}",
                display_value(sys),
                display_value(dia)
            )));
            resolved
        }
    }
}

fn exercise_cards(record: &AssessmentRecord) -> SectionContent {
    let entries = match record.get(layouts::EXERCISES_PATH) {
        Some(Value::Array(entries)) if !entries.is_empty() => entries,
        _ => {
            return SectionContent::Empty {
                message: layouts::placeholder(SectionKind::Exercises).to_string(),
            };
        }
    };

    let cards = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| exercise_card(i, entry))
        .collect();
    SectionContent::Exercises { cards }
}

fn exercise_card(index: usize, entry: &Value) -> ExerciseCard {
    let score = entry_value(entry, "analysisScore").and_then(as_number);
    ExerciseCard {
        name: entry_value(entry, "name")
            .map(display_value)
            .unwrap_or_else(|| format!("Exercise {}", index + 1)),
        score,
        score_display: score.map_or_else(|| "N/A".to_string(), |s| format!("{}%", display_number(s))),
        analysis: string_list(entry_value(entry, "analysisList")),
        recommendations: string_list(entry_value(entry, "tipsList")),
        reps_completed: tally(entry, "correctReps"),
        reps_assigned: tally(entry, "assignReps"),
        sets: tally(entry, "totalSets"),
    }
}

fn entry_value<'a>(entry: &'a Value, key: &str) -> Option<&'a Value> {
    entry.get(key).filter(|v| !v.is_null())
}

/// Missing or non-numeric counts show as zero.
fn tally(entry: &Value, key: &str) -> String {
    entry_value(entry, key)
        .and_then(as_number)
        .map_or_else(|| "0".to_string(), display_number)
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter(|v| !v.is_null())
            .map(display_value)
            .collect(),
        Some(other) => vec![display_value(other)],
        None => Vec::new(),
    }
}
