use std::collections::HashSet;

use healthpro_core::models::definition::{FieldDefinition, ReportDefinition};

use crate::error::RegistryError;

/// Structural checks run on every definition at load time.
pub fn validate_definition(definition: &ReportDefinition) -> Result<(), RegistryError> {
    let invalid = |message: String| RegistryError::Invalid {
        assessment_id: definition.assessment_id.clone(),
        message,
    };

    if definition.assessment_id.trim().is_empty() {
        return Err(invalid("assessment_id is empty".to_string()));
    }
    if definition.sections.is_empty() {
        return Err(invalid("no sections declared".to_string()));
    }

    let mut section_ids = HashSet::new();
    for section in &definition.sections {
        if !section_ids.insert(section.id.as_str()) {
            return Err(invalid(format!("duplicate section id '{}'", section.id)));
        }
        for field in &section.fields {
            validate_field(field).map_err(|msg| invalid(format!("{}.{}: {msg}", section.id, field.id)))?;
        }
    }

    Ok(())
}

fn validate_field(field: &FieldDefinition) -> Result<(), String> {
    for path in field.paths() {
        if !is_well_formed_path(path) {
            return Err(format!("malformed data path '{path}'"));
        }
    }

    let Some(spec) = &field.classification else {
        return Ok(());
    };
    for range in &spec.ranges {
        if range.label.trim().is_empty() {
            return Err("classification range without a label".to_string());
        }
        if let (Some(min), Some(max)) = (range.min, range.max)
            && min > max
        {
            return Err(format!("range '{}' has min {min} > max {max}", range.label));
        }
    }
    Ok(())
}

fn is_well_formed_path(path: &str) -> bool {
    !path.is_empty() && path.split('.').all(|segment| !segment.trim().is_empty())
}
