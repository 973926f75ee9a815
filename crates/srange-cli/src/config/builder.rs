use super::defaults::DefaultsConfig;
use super::file::{FileAnalysis, FileCase, FileStateSelection};
use super::models::AppConfig;
use crate::cli::RunArgs;
use crate::error::{CliError, Result};
use crate::utils::parser;
use srange::core::coefficient::CoefficientSet;
use srange::core::stress::EquivalentStress;
use srange::engine::config::{AnalysisType, ExplorerKind, SearchConfigBuilder, StateSelection};
use srange::engine::states::StressStates;
use std::path::Path;
use tracing::debug;

/// Reads a case file into states and coefficients, without any analysis
/// settings.
pub fn load_case(path: &Path) -> Result<(StressStates, CoefficientSet)> {
    let case = FileCase::from_file(path)?;
    let states = case.build_states()?;
    let coefficients = case.build_coefficients(case_dir(path))?;
    Ok((states, coefficients))
}

pub fn build_config(args: &RunArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let mut case = FileCase::from_file(&args.case)?;
    apply_set_values(&mut case.analysis, &args.set_values)?;

    let states = case.build_states()?;
    let coefficients = case.build_coefficients(case_dir(&args.case))?;
    let file_analysis = &case.analysis;

    let method: EquivalentStress = args
        .method
        .as_deref()
        .or(file_analysis.method.as_deref())
        .unwrap_or(&defaults.method)
        .parse::<EquivalentStress>()
        .map_err(|e| CliError::Config(format!("{}", e)))?;

    let explorer: ExplorerKind = args
        .explorer
        .as_deref()
        .or(file_analysis.explorer.as_deref())
        .unwrap_or(&defaults.explorer)
        .parse::<ExplorerKind>()
        .map_err(|e| CliError::Config(format!("{}", e)))?;

    let state_selection = match (&args.states, &file_analysis.states) {
        (Some(list), _) => {
            parser::parse_state_selection(list).map_err(|e| CliError::Argument(e.to_string()))?
        }
        (None, Some(FileStateSelection::Ids(ids))) => StateSelection::List(ids.clone()),
        (None, Some(FileStateSelection::Expression(list))) => {
            parser::parse_state_selection(list).map_err(|e| CliError::Config(e.to_string()))?
        }
        (None, None) => StateSelection::All,
    };

    let kind = args
        .analysis
        .as_deref()
        .or(file_analysis.kind.as_deref())
        .unwrap_or(&defaults.analysis);
    let coefficient = args
        .coefficient
        .clone()
        .or_else(|| file_analysis.coefficient.clone());
    let analysis = match kind {
        "intensity" => AnalysisType::Intensity,
        "range" => AnalysisType::Range { explorer },
        "range-ratio" | "range_ratio" => AnalysisType::RangeRatio {
            explorer,
            coefficient: coefficient.ok_or_else(|| {
                CliError::Config(
                    "Analysis 'range-ratio' requires a coefficient key (analysis.coefficient)"
                        .to_string(),
                )
            })?,
        },
        other => {
            return Err(CliError::Config(format!(
                "Unknown analysis type '{}'. Expected 'intensity', 'range' or 'range-ratio'.",
                other
            )));
        }
    };
    debug!(analysis = kind, %method, %explorer, "Resolved analysis settings.");

    let core_config = SearchConfigBuilder::new()
        .method(method)
        .analysis(analysis)
        .states(state_selection)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        case_path: args.case.clone(),
        output_path: args.output.clone(),
        states,
        coefficients,
        core_config,
    })
}

fn case_dir(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new("."))
}

fn apply_set_values(analysis: &mut FileAnalysis, set_values: &[String]) -> Result<()> {
    for kv_pair in set_values {
        let (key, value) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
        let value = value.to_string();

        match key {
            "analysis.type" => analysis.kind = Some(value),
            "analysis.method" => analysis.method = Some(value),
            "analysis.explorer" => analysis.explorer = Some(value),
            "analysis.states" => analysis.states = Some(FileStateSelection::Expression(value)),
            "analysis.coefficient" => analysis.coefficient = Some(value),
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(())
}
