use srange::core::coefficient::CoefficientSet;
use srange::engine::config::SearchConfig;
use srange::engine::states::StressStates;
use std::path::PathBuf;

pub struct AppConfig {
    pub case_path: PathBuf,
    pub output_path: Option<PathBuf>,
    pub states: StressStates,
    pub coefficients: CoefficientSet,
    pub core_config: SearchConfig,
}
