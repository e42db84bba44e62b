use jiff::Zoned;
use jiff::civil::Date;
use serde::Serialize;
use serde_json::Value;

use healthpro_core::models::definition::ReportDefinition;
use healthpro_core::models::record::AssessmentRecord;
use healthpro_core::resolve::{as_number, display_number, display_value};

use crate::layouts::EXERCISES_PATH;
use crate::section::{RenderableSection, assemble_section};

pub const NOT_AVAILABLE: &str = "N/A";

const SUBTITLE: &str = "Comprehensive Health Assessment Report";
const BRAND: &str = "HealthPro Analytics";

const PHYSIO: &str = "vitalsMap.metadata.physiological_scores";
const WELLNESS_PATH: &str = "vitalsMap.wellness_score";

/// Everything the template needs for one report.
#[derive(Debug, Clone, Serialize)]
pub struct RenderableDocument {
    pub title: String,
    pub subtitle: String,
    pub brand: String,
    pub patient: PatientInfo,
    pub headline: HeadlineScore,
    pub sections: Vec<RenderableSection>,
    pub generated_on: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientInfo {
    pub session_id: String,
    pub assessment_type: String,
    pub gender: String,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub bmi: String,
    pub assessment_date: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverallScore {
    Value(f64),
    NotAvailable,
}

impl OverallScore {
    pub fn value(self) -> Option<f64> {
        match self {
            OverallScore::Value(v) => Some(v),
            OverallScore::NotAvailable => None,
        }
    }

    /// `"85%"`, `"72.4%"` or `"N/A"`.
    pub fn display(self) -> String {
        match self {
            OverallScore::Value(v) => format!("{}%", display_number(v)),
            OverallScore::NotAvailable => NOT_AVAILABLE.to_string(),
        }
    }

    /// Headline colour band; `None` for a missing score.
    pub fn band(self) -> Option<ScoreBand> {
        let v = self.value()?;
        Some(if v >= 80.0 {
            ScoreBand::Good
        } else if v >= 60.0 {
            ScoreBand::Warning
        } else {
            ScoreBand::Bad
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Good,
    Warning,
    Bad,
}

impl ScoreBand {
    pub fn color(self) -> &'static str {
        match self {
            ScoreBand::Good => "#10b981",
            ScoreBand::Warning => "#f59e0b",
            ScoreBand::Bad => "#ef4444",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeadlineScore {
    pub value: Option<f64>,
    pub display: String,
    pub band: Option<ScoreBand>,
    pub color: Option<String>,
}

impl From<OverallScore> for HeadlineScore {
    fn from(score: OverallScore) -> Self {
        let band = score.band();
        Self {
            value: score.value(),
            display: score.display(),
            band,
            color: band.map(|b| b.color().to_string()),
        }
    }
}

/// Compose the full document for `record` under `definition`.
///
/// `now` drives age derivation and the generated-on stamp.
pub fn assemble_document(
    record: &AssessmentRecord,
    definition: &ReportDefinition,
    now: &Zoned,
) -> RenderableDocument {
    let sections = definition
        .sections
        .iter()
        .map(|section| assemble_section(section, record))
        .collect();

    RenderableDocument {
        title: definition.report_title.clone(),
        subtitle: SUBTITLE.to_string(),
        brand: BRAND.to_string(),
        patient: patient_info(record, now.date()),
        headline: overall_score(record).into(),
        sections,
        generated_on: now.strftime("%b %-d, %Y, %I:%M %p").to_string(),
    }
}

pub fn patient_info(record: &AssessmentRecord, today: Date) -> PatientInfo {
    let text = |value: Option<&Value>| value.map_or_else(|| NOT_AVAILABLE.to_string(), display_value);
    let with_unit = |value: Option<&Value>, unit: &str| match value {
        Some(v) => format!("{} {unit}", display_value(v)),
        None => NOT_AVAILABLE.to_string(),
    };
    let physio = |key: &str| format!("{PHYSIO}.{key}");

    PatientInfo {
        session_id: text(record.get("session_id")),
        assessment_type: text(record.get("assessment_id")),
        gender: text(record.get("gender")),
        age: patient_age(record, today),
        height: with_unit(record.get_first(["height", physio("height").as_str()]), "cm"),
        weight: with_unit(record.get_first(["weight", physio("weight").as_str()]), "kg"),
        bmi: text(record.get_first(["bodyCompositionData.BMI", physio("bmi").as_str()])),
        assessment_date: assessment_date(record),
    }
}

/// Derived age from the date of birth when present, else the precomputed
/// age, else `"N/A"`. An unparseable date of birth is `"N/A"`.
fn patient_age(record: &AssessmentRecord, today: Date) -> String {
    if let Some(dob) = record.get(&format!("{PHYSIO}.dob")) {
        return dob
            .as_str()
            .and_then(|s| age_on(s, today))
            .map_or_else(|| NOT_AVAILABLE.to_string(), |age| age.to_string());
    }
    record
        .get("bodyCompositionData.Age")
        .map_or_else(|| NOT_AVAILABLE.to_string(), display_value)
}

/// Calendar age on `today` for someone born on `dob`.
///
/// One less than the year difference until the birthday has come round
/// this year. `None` for an unparseable or future date of birth.
pub fn age_on(dob: &str, today: Date) -> Option<i16> {
    let born = parse_date(dob.trim())?;
    let mut age = today.year() - born.year();
    if (today.month(), today.day()) < (born.month(), born.day()) {
        age -= 1;
    }
    (age >= 0).then_some(age)
}

fn parse_date(s: &str) -> Option<Date> {
    if let Ok(date) = s.parse::<Date>() {
        return Some(date);
    }
    if let Ok(ts) = s.parse::<jiff::Timestamp>() {
        return Some(ts.to_zoned(jiff::tz::TimeZone::UTC).date());
    }
    s.parse::<jiff::civil::DateTime>().ok().map(|dt| dt.date())
}

fn assessment_date(record: &AssessmentRecord) -> String {
    match record.timestamp() {
        Ok(Some(ts)) => ts
            .to_zoned(jiff::tz::TimeZone::UTC)
            .date()
            .strftime("%-m/%-d/%Y")
            .to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Headline score, first available of: top-level accuracy, wellness score,
/// precomputed final score, rounded mean of every sub-score.
pub fn overall_score(record: &AssessmentRecord) -> OverallScore {
    record
        .number_at(["accuracy"])
        .or_else(|| record.number_at([WELLNESS_PATH]))
        .or_else(|| record.number_at(["finalScore"]))
        .or_else(|| average_sub_score(record))
        .map_or(OverallScore::NotAvailable, OverallScore::Value)
}

fn average_sub_score(record: &AssessmentRecord) -> Option<f64> {
    let mut scores: Vec<f64> = match record.get(EXERCISES_PATH) {
        Some(Value::Array(entries)) => entries
            .iter()
            .filter_map(|e| e.get("analysisScore").and_then(as_number))
            .collect(),
        _ => Vec::new(),
    };
    if let Some(wellness) = record.number_at([WELLNESS_PATH]) {
        scores.push(wellness);
    }

    if scores.is_empty() {
        return None;
    }
    Some((scores.iter().sum::<f64>() / scores.len() as f64).round())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_common_shapes() {
        let expected = jiff::civil::date(2000, 6, 15);
        assert_eq!(parse_date("2000-06-15"), Some(expected));
        assert_eq!(parse_date("2000-06-15T08:00:00Z"), Some(expected));
        assert_eq!(parse_date("2000-06-15T08:00:00"), Some(expected));
        assert_eq!(parse_date("15/06/2000"), None);
    }

    #[test]
    fn bands() {
        assert_eq!(OverallScore::Value(80.0).band(), Some(ScoreBand::Good));
        assert_eq!(OverallScore::Value(79.9).band(), Some(ScoreBand::Warning));
        assert_eq!(OverallScore::Value(60.0).band(), Some(ScoreBand::Warning));
        assert_eq!(OverallScore::Value(59.9).band(), Some(ScoreBand::Bad));
        assert_eq!(OverallScore::NotAvailable.band(), None);
    }
}
