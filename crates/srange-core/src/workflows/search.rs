use crate::core::coefficient::CoefficientSet;
use crate::core::stress::EquivalentStress;
use crate::engine::config::{AnalysisType, SearchConfig};
use crate::engine::container::{StressIntensity, StressRange};
use crate::engine::context::SearchContext;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::states::StressStates;
use serde::Serialize;
use std::sync::atomic::AtomicBool;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SearchOutcome {
    Intensity(StressIntensity),
    Range(StressRange),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SearchReport {
    pub analysis: String,
    pub method: EquivalentStress,
    pub explored_states: usize,
    pub explored_combinations: usize,
    pub outcome: SearchOutcome,
}

#[instrument(skip_all, name = "search_workflow")]
pub fn run(
    states: &mut StressStates,
    config: &SearchConfig,
    coefficients: &CoefficientSet,
    reporter: &ProgressReporter,
    cancel: Option<&AtomicBool>,
) -> Result<SearchReport, EngineError> {
    // === Phase 1: Validation ===
    reporter.report(Progress::PhaseStart { name: "Validation" });
    info!(
        analysis = config.analysis.name(),
        method = %config.method,
        "Starting search workflow."
    );

    states.set_method(config.method);
    states.check_integrity()?;
    let ids = config.states.resolve(states.nb_states());
    if ids.is_empty() {
        return Err(EngineError::InvalidArgument(
            "no state selected for the search".to_string(),
        ));
    }
    reporter.report(Progress::PhaseFinish);

    let mut context = SearchContext::new(reporter);
    if let Some(flag) = cancel {
        context = context.with_cancellation(flag);
    }

    // === Phase 2: Search ===
    reporter.report(Progress::PhaseStart { name: "Search" });
    let (explored_combinations, outcome) = match &config.analysis {
        AnalysisType::Intensity => {
            reporter.report(Progress::TaskStart {
                total_steps: ids.len() as u64,
            });
            let intensity = states.stress_intensity(&ids, &context)?;
            (ids.len(), SearchOutcome::Intensity(intensity))
        }
        AnalysisType::Range { explorer } => {
            let combination = explorer.build(&ids)?;
            reporter.report(Progress::TaskStart {
                total_steps: combination.size() as u64,
            });
            let range = states.stress_range(&combination, &context)?;
            (combination.size(), SearchOutcome::Range(range))
        }
        AnalysisType::RangeRatio {
            explorer,
            coefficient,
        } => {
            let coefficient = coefficients.get(coefficient)?;
            if states.temperatures().is_empty() {
                warn!("No state temperature defined, the range ratio uses a unit divisor.");
            }
            let combination = explorer.build(&ids)?;
            reporter.report(Progress::TaskStart {
                total_steps: combination.size() as u64,
            });
            let range = states.stress_range_ratio(&combination, coefficient, &context)?;
            (combination.size(), SearchOutcome::Range(range))
        }
    };
    reporter.report(Progress::TaskFinish);
    reporter.report(Progress::PhaseFinish);

    if explored_combinations == 0 {
        warn!("The combination space is empty, the reported maximum is zero.");
    }
    let summary = match &outcome {
        SearchOutcome::Intensity(intensity) => {
            info!(
                intensity = intensity.intensity,
                load = intensity.load,
                "Search finished."
            );
            format!(
                "Worst intensity {:.4} at state {}",
                intensity.intensity, intensity.load
            )
        }
        SearchOutcome::Range(range) => {
            info!(
                range = range.range,
                ratio = range.ratio,
                loads = ?range.loads,
                "Search finished."
            );
            format!(
                "Worst ratio {:.4} between states {} and {}",
                range.ratio, range.loads.0, range.loads.1
            )
        }
    };
    reporter.report(Progress::Message(summary));

    Ok(SearchReport {
        analysis: config.analysis.name().to_string(),
        method: config.method,
        explored_states: ids.len(),
        explored_combinations,
        outcome,
    })
}
