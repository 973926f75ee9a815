use crate::error::{CliError, Result};
use serde::Deserialize;
use srange::core::coefficient::{Coefficient, CoefficientLaw, CoefficientSet};
use srange::core::stress::Stress;
use srange::core::table::Table;
use srange::engine::error::EngineError;
use srange::engine::states::StressStates;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A case file: the analysis to run and the data it runs on.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileCase {
    #[serde(default)]
    pub analysis: FileAnalysis,
    #[serde(default)]
    pub states: Vec<FileState>,
    #[serde(default)]
    pub torsors: Vec<FileTorsor>,
    #[serde(default)]
    pub coefficients: BTreeMap<String, FileCoefficient>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileAnalysis {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub method: Option<String>,
    pub explorer: Option<String>,
    pub states: Option<FileStateSelection>,
    pub coefficient: Option<String>,
}

/// `states = [0, 2, 5]` or `states = "0-3,7"`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum FileStateSelection {
    Ids(Vec<usize>),
    Expression(String),
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileState {
    pub primary: Vec<f64>,
    pub secondary: Option<Vec<f64>>,
    pub temperature: Option<f64>,
    #[serde(default)]
    pub coef_max: Vec<f64>,
    #[serde(default)]
    pub coef_min: Vec<f64>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileTorsor {
    pub stress: Vec<f64>,
    pub active: Option<bool>,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileCoefficient {
    pub law: String,
    pub value: Option<f64>,
    pub x: Option<Vec<f64>>,
    pub y: Option<Vec<f64>>,
    pub csv: Option<PathBuf>,
}

impl FileCase {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading case file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })
    }

    /// Builds the in-memory states. Consistency is left to
    /// [`StressStates::check_integrity`].
    pub fn build_states(&self) -> Result<StressStates> {
        let mut states = StressStates::new();

        for state in &self.states {
            let primary = Stress::from_slice(&state.primary).map_err(EngineError::from)?;
            let secondary = state
                .secondary
                .as_deref()
                .map(Stress::from_slice)
                .transpose()
                .map_err(EngineError::from)?;
            states.add_stress(primary, secondary);
            if let Some(temperature) = state.temperature {
                states.add_temperature(temperature);
            }
            if !self.torsors.is_empty() || !state.coef_max.is_empty() || !state.coef_min.is_empty()
            {
                states.add_torsor_coefficients(state.coef_max.clone(), state.coef_min.clone());
            }
        }

        for torsor in &self.torsors {
            states.add_torsor(Stress::from_slice(&torsor.stress).map_err(EngineError::from)?);
        }
        if self.torsors.iter().any(|t| t.active.is_some()) {
            states.set_active_torsors(
                self.torsors
                    .iter()
                    .map(|t| t.active.unwrap_or(true))
                    .collect(),
            );
        }

        Ok(states)
    }

    /// Builds the keyed coefficients. CSV paths are relative to `base_dir`.
    pub fn build_coefficients(&self, base_dir: &Path) -> Result<CoefficientSet> {
        let mut set = CoefficientSet::new();
        for (key, coefficient) in &self.coefficients {
            set.insert(key.clone(), coefficient.build(key, base_dir)?);
        }
        Ok(set)
    }
}

impl FileCoefficient {
    fn build(&self, key: &str, base_dir: &Path) -> Result<Coefficient> {
        let law: CoefficientLaw = self.law.parse().map_err(EngineError::from)?;

        if let Some(value) = self.value {
            if law != CoefficientLaw::Constant {
                return Err(CliError::Config(format!(
                    "Coefficient '{}': 'value' is only allowed for the constant law",
                    key
                )));
            }
            return Ok(Coefficient::constant(value));
        }

        let table = match (&self.x, &self.y, &self.csv) {
            (Some(x), Some(y), None) => Table::new(x.clone(), y.clone()),
            (None, None, Some(csv)) => Table::load_csv(&base_dir.join(csv)),
            _ => {
                return Err(CliError::Config(format!(
                    "Coefficient '{}' needs either 'value', both 'x' and 'y', or 'csv'",
                    key
                )));
            }
        }
        .map_err(EngineError::from)?;

        Ok(Coefficient::from_table(law, table))
    }
}
