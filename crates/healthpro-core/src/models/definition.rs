use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Declarative description of the report for one assessment type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ReportDefinition {
    pub assessment_id: String,
    pub report_title: String,
    /// Render order.
    pub sections: Vec<SectionDefinition>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SectionDefinition {
    pub id: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: SectionKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default)]
    pub fields: Vec<FieldDefinition>,
}

/// Layout kind of a section.
///
/// Every kind except `Custom` has a built-in field table; `Custom` renders
/// purely from the fields declared in the definition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SectionKind {
    Vitals,
    BodyComposition,
    Exercises,
    Cardiovascular,
    Glucose,
    RiskAssessment,
    #[default]
    Custom,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct FieldDefinition {
    pub id: String,
    pub label: String,
    pub data_path: String,
    /// Tried in order when `data_path` does not resolve.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fallback_paths: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<FieldFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationSpec>,
}

impl FieldDefinition {
    pub fn new(id: impl Into<String>, label: impl Into<String>, data_path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            data_path: data_path.into(),
            fallback_paths: Vec::new(),
            unit: None,
            format: None,
            classification: None,
        }
    }

    pub fn unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn fallback(mut self, path: impl Into<String>) -> Self {
        self.fallback_paths.push(path.into());
        self
    }

    pub fn format(mut self, format: FieldFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn classification(mut self, spec: ClassificationSpec) -> Self {
        self.classification = Some(spec);
        self
    }

    /// `data_path` followed by the fallbacks.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.data_path.as_str()).chain(self.fallback_paths.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum FieldFormat {
    Percentage,
    Plain,
}

/// Ordered severity bands. The first range containing a value wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClassificationSpec {
    pub ranges: Vec<ClassificationRange>,
}

/// One band. A missing bound is open-ended; present bounds are inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ClassificationRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    pub label: String,
    pub color: String,
}

impl ClassificationRange {
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Classification {
    pub label: String,
    pub color: String,
}
