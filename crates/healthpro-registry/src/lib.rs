//! healthpro-registry
//!
//! Report definitions per assessment type. Pure data: the built-in table is
//! embedded JSON, and deployments may point at their own table instead.
//! Adding an assessment type means adding a definition file, never code.

pub mod error;
pub mod validate;

use std::collections::BTreeMap;
use std::path::Path;

use healthpro_core::models::definition::ReportDefinition;
use tracing::info;

use crate::error::RegistryError;

/// Definitions compiled into the binary, one file per assessment type.
const BUILTIN: &[(&str, &str)] = &[
    ("as_hr_02.json", include_str!("../definitions/as_hr_02.json")),
    ("as_card_01.json", include_str!("../definitions/as_card_01.json")),
    ("as_well_03.json", include_str!("../definitions/as_well_03.json")),
];

/// Read-only table from assessment type id to report definition.
///
/// Built once at startup and shared; there is no runtime mutation.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    definitions: BTreeMap<String, ReportDefinition>,
}

impl Registry {
    /// Build a registry from already-parsed definitions, validating each one.
    pub fn from_definitions(
        definitions: impl IntoIterator<Item = ReportDefinition>,
    ) -> Result<Self, RegistryError> {
        let mut table = BTreeMap::new();
        for definition in definitions {
            validate::validate_definition(&definition)?;
            let id = definition.assessment_id.clone();
            if table.insert(id.clone(), definition).is_some() {
                return Err(RegistryError::Duplicate(id));
            }
        }
        Ok(Self { definitions: table })
    }

    /// The table shipped with the engine.
    pub fn builtin() -> Result<Self, RegistryError> {
        let mut definitions = Vec::with_capacity(BUILTIN.len());
        for (name, contents) in BUILTIN {
            definitions.push(parse_one(name, contents)?);
        }
        Self::from_definitions(definitions)
    }

    /// Parse a JSON array of definitions.
    pub fn from_json(origin: &str, json: &str) -> Result<Self, RegistryError> {
        let definitions: Vec<ReportDefinition> =
            serde_json::from_str(json).map_err(|source| RegistryError::Parse {
                origin: origin.to_string(),
                source,
            })?;
        Self::from_definitions(definitions)
    }

    /// Load from disk.
    ///
    /// A directory is read as one definition per `*.json` file; a plain file
    /// must hold a JSON array of definitions.
    pub fn from_path(path: &Path) -> Result<Self, RegistryError> {
        let io_err = |source| RegistryError::Io {
            path: path.display().to_string(),
            source,
        };

        let registry = if path.is_dir() {
            let mut files: Vec<_> = std::fs::read_dir(path)
                .map_err(io_err)?
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|p| p.extension().is_some_and(|ext| ext == "json"))
                .collect();
            files.sort();

            let mut definitions = Vec::with_capacity(files.len());
            for file in &files {
                let contents = std::fs::read_to_string(file).map_err(|source| RegistryError::Io {
                    path: file.display().to_string(),
                    source,
                })?;
                definitions.push(parse_one(&file.display().to_string(), &contents)?);
            }
            Self::from_definitions(definitions)?
        } else {
            let contents = std::fs::read_to_string(path).map_err(io_err)?;
            Self::from_json(&path.display().to_string(), &contents)?
        };

        info!(
            path = %path.display(),
            assessment_types = registry.len(),
            "loaded report definitions"
        );
        Ok(registry)
    }

    /// Look up the definition for an assessment type.
    pub fn lookup(&self, assessment_id: &str) -> Option<&ReportDefinition> {
        self.definitions.get(assessment_id)
    }

    pub fn all(&self) -> impl Iterator<Item = &ReportDefinition> {
        self.definitions.values()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn parse_one(origin: &str, contents: &str) -> Result<ReportDefinition, RegistryError> {
    serde_json::from_str(contents).map_err(|source| RegistryError::Parse {
        origin: origin.to_string(),
        source,
    })
}
