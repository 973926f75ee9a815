use crate::core::combination::{Combination, CombinationError};
use crate::core::stress::EquivalentStress;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{key}': '{value}'")]
    InvalidValue { key: &'static str, value: String },
}

/// Pair enumeration pattern of a range search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ExplorerKind {
    /// Ordered pairs, self-pairs included.
    Square,
    /// Unordered pairs, self-pairs included.
    #[default]
    Triangular,
    /// Unordered pairs of distinct states.
    SuperiorTriangular,
}

impl ExplorerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExplorerKind::Square => "square",
            ExplorerKind::Triangular => "triangular",
            ExplorerKind::SuperiorTriangular => "superior-triangular",
        }
    }

    pub fn build(&self, ranks: &[usize]) -> Result<Combination, CombinationError> {
        match self {
            ExplorerKind::Square => Combination::square(ranks),
            ExplorerKind::Triangular => Combination::triangular(ranks),
            ExplorerKind::SuperiorTriangular => Combination::superior_triangular(ranks),
        }
    }
}

impl fmt::Display for ExplorerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExplorerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "square" => Ok(ExplorerKind::Square),
            "triangular" => Ok(ExplorerKind::Triangular),
            "superior-triangular" | "superior_triangular" => Ok(ExplorerKind::SuperiorTriangular),
            other => Err(ConfigError::InvalidValue {
                key: "explorer",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StateSelection {
    #[default]
    All,
    List(Vec<usize>),
}

impl StateSelection {
    /// State ids covered by the selection among `nb_states` states.
    pub fn resolve(&self, nb_states: usize) -> Vec<usize> {
        match self {
            StateSelection::All => (0..nb_states).collect(),
            StateSelection::List(ids) => ids.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisType {
    Intensity,
    Range {
        explorer: ExplorerKind,
    },
    /// Range divided by the admissible stress found under `coefficient`
    /// at the states' temperatures.
    RangeRatio {
        explorer: ExplorerKind,
        coefficient: String,
    },
}

impl AnalysisType {
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisType::Intensity => "intensity",
            AnalysisType::Range { .. } => "range",
            AnalysisType::RangeRatio { .. } => "range-ratio",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub method: EquivalentStress,
    pub analysis: AnalysisType,
    pub states: StateSelection,
}

#[derive(Default)]
pub struct SearchConfigBuilder {
    method: Option<EquivalentStress>,
    analysis: Option<AnalysisType>,
    states: Option<StateSelection>,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn method(mut self, method: EquivalentStress) -> Self {
        self.method = Some(method);
        self
    }
    pub fn analysis(mut self, analysis: AnalysisType) -> Self {
        self.analysis = Some(analysis);
        self
    }
    pub fn states(mut self, states: StateSelection) -> Self {
        self.states = Some(states);
        self
    }

    /// Builds the configuration. The state selection defaults to every
    /// state.
    pub fn build(self) -> Result<SearchConfig, ConfigError> {
        Ok(SearchConfig {
            method: self.method.ok_or(ConfigError::MissingParameter("method"))?,
            analysis: self
                .analysis
                .ok_or(ConfigError::MissingParameter("analysis"))?,
            states: self.states.unwrap_or_default(),
        })
    }
}
