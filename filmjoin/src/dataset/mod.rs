// Dataset loading - parse the three input tables from YAML or JSON

use crate::error::{FilmJoinError, Result};
use crate::join;
use crate::model::{CastMember, Film, Genre, GenreGroup};
use crate::validation;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEMO_DATASET: &str = include_str!("../../data/demo.yaml");

/// The three flat tables the join works on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub films: Vec<Film>,
    #[serde(default)]
    pub cast: Vec<CastMember>,
}

/// Options controlling how a dataset document is checked on load
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Reject unknown keys instead of warning about them
    pub strict: bool,
}

/// A parsed dataset together with the validation warnings raised on load
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub warnings: Vec<String>,
}

impl Dataset {
    /// The seed dataset: three genres, three films and the cast of
    /// "Nightmare On Elm Street".
    pub fn demo() -> Result<Self> {
        let loaded = parse_dataset_str(DEMO_DATASET, ParseOptions { strict: true })?;
        Ok(loaded.dataset)
    }

    /// Build typed tables from an already validated document. An absent or
    /// null table is empty.
    pub fn from_value(raw: &serde_yaml::Value) -> Result<Self> {
        Ok(Dataset {
            genres: read_table(raw, "genres")?,
            films: read_table(raw, "films")?,
            cast: read_table(raw, "cast")?,
        })
    }

    /// Join the tables into the nested genre view
    pub fn transform(&self) -> Vec<GenreGroup> {
        join::transform(&self.genres, &self.films, &self.cast)
    }
}

/// Read a dataset file (YAML or JSON) and parse it
pub fn load_dataset(path: &Path, options: ParseOptions) -> Result<LoadedDataset> {
    log::debug!("Loading dataset from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    parse_dataset_str(&content, options)
}

/// Parse a dataset document. JSON input works too since it is valid YAML.
///
/// The document is validated as a whole before any typed record is built, so
/// a malformed document fails with `InvalidInput` listing every problem.
pub fn parse_dataset_str(content: &str, options: ParseOptions) -> Result<LoadedDataset> {
    let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
    let mut warnings = validation::validate_and_prepare(&raw, options.strict)?;

    let dataset = Dataset::from_value(&raw)?;

    warnings.extend(validation::check_references(&dataset));
    for warning in &warnings {
        log::warn!("{warning}");
    }

    log::debug!(
        "Parsed dataset: {} genres, {} films, {} cast members",
        dataset.genres.len(),
        dataset.films.len(),
        dataset.cast.len()
    );

    Ok(LoadedDataset { dataset, warnings })
}

/// Non-string record keys are dropped first. Validation has already reported
/// them, and serde's field visitor only accepts string keys.
fn read_table<T: DeserializeOwned>(raw: &serde_yaml::Value, table: &str) -> Result<Vec<T>> {
    let mut value = match raw.get(table) {
        None | Some(serde_yaml::Value::Null) => return Ok(Vec::new()),
        Some(value) => value.clone(),
    };

    if let Some(records) = value.as_sequence_mut() {
        for record in records.iter_mut() {
            if let Some(mapping) = record.as_mapping_mut() {
                mapping.retain(|key, _| key.is_string());
            }
        }
    }

    serde_yaml::from_value(value)
        .map_err(|e| FilmJoinError::InvalidInput(format!("Table '{table}': {e}")))
}
