use crate::cli::CheckArgs;
use crate::config;
use crate::error::Result;
use tracing::info;

pub fn run(args: CheckArgs) -> Result<()> {
    info!("Checking case file {:?}", &args.case);
    let (states, coefficients) = config::load_case(&args.case)?;
    states.check_integrity()?;

    println!("✓ Case file {} is consistent.", args.case.display());
    println!("  States: {}", states.nb_states());
    println!(
        "  Secondary stresses: {}",
        states.secondary_stresses().len()
    );
    println!("  Torsors: {}", states.nb_torsors());
    println!(
        "  Temperatures: {}",
        if states.temperatures().is_empty() {
            "none"
        } else {
            "per state"
        }
    );
    let mut keys: Vec<_> = coefficients.keys().collect();
    keys.sort_unstable();
    if keys.is_empty() {
        println!("  Coefficients: none");
    } else {
        println!("  Coefficients: {}", keys.join(", "));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use srange::engine::error::EngineError;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn consistent_case_passes() {
        let dir = tempdir().unwrap();
        let case = dir.path().join("case.toml");
        fs::write(
            &case,
            "[[states]]\nprimary = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]\ntemperature = 20.0\n",
        )
        .unwrap();

        assert!(run(CheckArgs { case }).is_ok());
    }

    #[test]
    fn partial_temperatures_fail_the_integrity_check() {
        let dir = tempdir().unwrap();
        let case = dir.path().join("case.toml");
        fs::write(
            &case,
            r#"
            [[states]]
            primary = [1.0, 0.0, 0.0, 0.0, 0.0, 0.0]
            temperature = 20.0

            [[states]]
            primary = [2.0, 0.0, 0.0, 0.0, 0.0, 0.0]
            "#,
        )
        .unwrap();

        assert!(matches!(
            run(CheckArgs { case }),
            Err(CliError::SrangeCore(EngineError::Integrity(_)))
        ));
    }

    #[test]
    fn missing_case_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let case = dir.path().join("absent.toml");
        assert!(matches!(run(CheckArgs { case }), Err(CliError::Io(_))));
    }
}
