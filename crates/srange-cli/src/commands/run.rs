use crate::cli::RunArgs;
use crate::config::{self, AppConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use srange::engine::progress::ProgressReporter;
use srange::workflows::{
    self,
    search::{SearchOutcome, SearchReport},
};
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

pub fn run(args: RunArgs) -> Result<()> {
    let time_limit = args.time_limit.map(parse_time_limit).transpose()?;

    info!("Loading case file and merging CLI overrides...");
    let AppConfig {
        case_path,
        output_path,
        mut states,
        coefficients,
        core_config,
    } = config::build_config(&args)?;

    let reporter = if args.no_progress {
        ProgressReporter::new()
    } else {
        let progress_handler = CliProgressHandler::new();
        ProgressReporter::with_callback(progress_handler.get_callback())
    };

    println!(
        "Running '{}' analysis on {} ({} states, {} torsors)...",
        core_config.analysis.name(),
        case_path.display(),
        states.nb_states(),
        states.nb_torsors()
    );
    info!("Invoking the core search workflow...");

    let cancel = AtomicBool::new(false);
    let report = thread::scope(|scope| {
        let (done_tx, done_rx) = mpsc::channel::<()>();
        if let Some(limit) = time_limit {
            let cancel = &cancel;
            scope.spawn(move || {
                if let Err(RecvTimeoutError::Timeout) = done_rx.recv_timeout(limit) {
                    warn!("Time limit of {:?} reached, cancelling the search.", limit);
                    cancel.store(true, Ordering::Relaxed);
                }
            });
        }

        let result = workflows::search::run(
            &mut states,
            &core_config,
            &coefficients,
            &reporter,
            Some(&cancel),
        );
        drop(done_tx);
        result
    })?;

    print_report(&report);

    if let Some(path) = output_path {
        write_report(&report, &path)?;
        println!("Report written to: {}", path.display());
    }

    Ok(())
}

fn parse_time_limit(seconds: f64) -> Result<Duration> {
    Duration::try_from_secs_f64(seconds).map_err(|_| {
        CliError::Argument(format!(
            "Invalid time limit '{}'. Expected a non-negative number of seconds.",
            seconds
        ))
    })
}

fn print_report(report: &SearchReport) {
    println!(
        "Search complete: {} states, {} combinations explored with '{}'.",
        report.explored_states, report.explored_combinations, report.method
    );
    match &report.outcome {
        SearchOutcome::Intensity(intensity) => {
            println!(
                "✓ Worst stress intensity: {:.4} at state {} (torsor combination {})",
                intensity.intensity, intensity.load, intensity.torsor
            );
        }
        SearchOutcome::Range(range) => {
            println!(
                "✓ Worst stress range: {:.4} (ratio {:.4}, mean {:.4}) between states {} and {}",
                range.range, range.ratio, range.mean, range.loads.0, range.loads.1
            );
            println!(
                "  Torsor combinations: ({}, {})",
                range.torsors.0, range.torsors.1
            );
            if let Some([t1, t2]) = range.temperatures {
                println!("  Temperatures: {} / {}", t1, t2);
            }
        }
    }
}

fn write_report(report: &SearchReport, path: &Path) -> Result<()> {
    let content = toml::to_string(report).map_err(|e| CliError::Other(e.into()))?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    const CASE: &str = r#"
        [analysis]
        type = "range-ratio"
        explorer = "superior-triangular"
        coefficient = "sm"

        [[states]]
        primary = [100.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        temperature = 20.0

        [[states]]
        primary = [-50.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        temperature = 300.0

        [[states]]
        primary = [30.0, 0.0, 0.0, 0.0, 0.0, 0.0]
        temperature = 100.0

        [coefficients.sm]
        law = "linear"
        x = [20.0, 300.0]
        y = [200.0, 140.0]
    "#;

    fn run_args(dir: &Path) -> RunArgs {
        let case = dir.join("case.toml");
        fs::write(&case, CASE).unwrap();
        RunArgs {
            case,
            output: Some(dir.join("report.toml")),
            analysis: None,
            method: None,
            explorer: None,
            coefficient: None,
            states: None,
            time_limit: None,
            no_progress: true,
            set_values: vec![],
        }
    }

    #[test]
    fn run_writes_report_as_toml() {
        let dir = tempdir().unwrap();
        let args = run_args(dir.path());
        let output: PathBuf = args.output.clone().unwrap();

        run(args).unwrap();

        let content = fs::read_to_string(output).unwrap();
        let value: toml::Table = toml::from_str(&content).unwrap();
        assert_eq!(value["analysis"].as_str(), Some("range-ratio"));
        assert_eq!(value["method"].as_str(), Some("tresca"));
        assert_eq!(value["explored-combinations"].as_integer(), Some(3));

        let range = value["outcome"]["range"].as_table().unwrap();
        assert!((range["ratio"].as_float().unwrap() - 0.75).abs() < 1e-9);
        assert_eq!(
            range["loads"].as_array().unwrap(),
            &vec![toml::Value::Integer(0), toml::Value::Integer(1)]
        );
        assert!(range.contains_key("temperatures"));
    }

    #[test]
    fn generous_time_limit_lets_the_search_finish() {
        let dir = tempdir().unwrap();
        let mut args = run_args(dir.path());
        args.time_limit = Some(60.0);
        args.output = None;

        assert!(run(args).is_ok());
    }

    #[test]
    fn negative_time_limit_is_rejected() {
        let dir = tempdir().unwrap();
        let mut args = run_args(dir.path());
        args.time_limit = Some(-1.0);

        assert!(matches!(run(args), Err(CliError::Argument(_))));
    }
}
