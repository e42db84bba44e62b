use serde::Serialize;
use serde_json::Value;

use healthpro_core::classify::classify;
use healthpro_core::models::definition::{Classification, FieldDefinition, FieldFormat};
use healthpro_core::models::record::AssessmentRecord;
use healthpro_core::resolve::{as_number, display_value};

/// A field definition paired with what the record holds for it.
///
/// Lives for one render pass.
#[derive(Debug, Clone)]
pub struct ResolvedField<'a> {
    pub definition: &'a FieldDefinition,
    /// `None` when no path of the definition resolves.
    pub value: Option<Value>,
    pub classification: Option<Classification>,
}

impl<'a> ResolvedField<'a> {
    /// Resolve `definition` against `record`, then classify the value.
    pub fn resolve(definition: &'a FieldDefinition, record: &AssessmentRecord) -> Self {
        let value = record.get_first(definition.paths()).cloned();
        Self::with_value(definition, value)
    }

    /// Classify an already-resolved value.
    pub fn with_value(definition: &'a FieldDefinition, value: Option<Value>) -> Self {
        let classification = value
            .as_ref()
            .and_then(|v| classify(v, definition.classification.as_ref()));
        Self {
            definition,
            value,
            classification,
        }
    }
}

/// One rendered field card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayUnit {
    pub id: String,
    pub label: String,
    pub value: String,
    /// Omitted entirely when nothing matched.
    pub badge: Option<Classification>,
}

/// Turn a resolved field into a display unit. Absent fields yield `None`.
pub fn render_field(resolved: &ResolvedField<'_>) -> Option<DisplayUnit> {
    let value = resolved.value.as_ref()?;
    let definition = resolved.definition;

    Some(DisplayUnit {
        id: definition.id.clone(),
        label: definition.label.clone(),
        value: format_value(value, definition),
        badge: resolved.classification.clone(),
    })
}

fn format_value(value: &Value, definition: &FieldDefinition) -> String {
    if definition.format == Some(FieldFormat::Percentage)
        && let Some(n) = as_number(value)
    {
        return format!("{n:.1}%");
    }

    match definition.unit.as_deref() {
        Some(unit) if !unit.is_empty() => format!("{} {unit}", display_value(value)),
        _ => display_value(value),
    }
}
