//! Command-line front end: the form and the result page.

use super::config::Config;
use super::form::{assemble, FormSchema, Widget};
use crate::api::{Predictor, PredictorConfig};
use crate::error::{DepositorError, Result};
use tracing::info;

/// Print command-line usage information.
pub fn print_usage() {
    println!("Usage:");
    println!("  depositor [--config PATH] [COMMAND] [OPTIONS]\n");
    println!("Commands:");
    println!("  predict [--FIELD VALUE]...   Score one customer record (fields default to the form defaults)");
    println!("  schema                       List form fields, their domains and defaults");
    println!("  info                         Show the loaded model artifact");
    println!("  help                         Show this help\n");
    println!("Options:");
    println!("  --config PATH      TOML configuration (default: config.toml)\n");
    println!("Examples:");
    println!("  depositor predict --age 45 --job technician --duration 420");
    println!("  depositor predict --poutcome success --emp-var-rate -1.8 --cons-conf-idx -42.0");
}

/// Split `--field value` / `--field=value` pairs.
pub fn parse_overrides(args: &[String]) -> Result<Vec<(String, String)>> {
    let mut overrides = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        let flag = arg.strip_prefix("--").ok_or_else(|| {
            DepositorError::invalid_input(format!("expected --FIELD, got {:?}", arg))
        })?;
        match flag.split_once('=') {
            Some((name, value)) => overrides.push((name.to_string(), value.to_string())),
            None => {
                // Values may start with '-', e.g. `--cons-conf-idx -42`.
                let value = iter.next().ok_or_else(|| {
                    DepositorError::invalid_input(format!("missing value for --{}", flag))
                })?;
                overrides.push((flag.to_string(), value.clone()));
            }
        }
    }
    Ok(overrides)
}

fn print_schema() {
    println!("{:<16} {:<36} {:<10} Domain", "Field", "Label", "Default");
    for spec in FormSchema::fields() {
        let kind = match spec.widget {
            Widget::Slider { .. } => "slider",
            Widget::Select(_) => "select",
        };
        println!(
            "{:<16} {:<36} {:<10} {} ({})",
            spec.name,
            spec.label,
            spec.default_text(),
            spec.domain_text(),
            kind
        );
    }
}

fn banner() -> String {
    let rule = "=".repeat(67);
    format!(
        "\n{rule}\n  Predictive Model for Term Deposit Subscription\n{rule}\n\n\
         This app predicts whether a customer will subscribe to a term deposit \
         based on input features from a bank marketing campaign.\n\n"
    )
}

fn run_predict(args: &[String], config: &Config) -> Result<()> {
    let overrides = parse_overrides(args)?;
    let record = assemble(overrides)?;

    let predictor = Predictor::with_config(PredictorConfig::from(config))?;
    let result = predictor.predict(&record)?;
    info!(outcome = %result.outcome, "prediction complete");

    let precision = config.display.precision;
    print!("{}", banner());

    println!("Input features:");
    print!("{}", result.input.to_table()?);

    if config.display.show_encoded {
        println!("\nEncoded features:");
        let encoded: Vec<String> = result.encoded.iter().map(|v| v.to_string()).collect();
        println!("[{}]", encoded.join(", "));
    }

    println!("\nPrediction:");
    println!("{}", result.outcome);

    println!("\nPrediction Probability:");
    println!(
        "[{:.*}, {:.*}]  (Not Subscribed, Subscribed)\n",
        precision, result.probabilities[0], precision, result.probabilities[1]
    );
    Ok(())
}

/// Main entry point for the command-line interface.
///
/// # Arguments
///
/// * `args` - Command-line arguments after global options (command first)
/// * `config` - Loaded configuration
pub fn main_cli(args: &[String], config: &Config) -> Result<()> {
    let command = args.first().map(String::as_str).unwrap_or("predict");
    let rest = args.get(1..).unwrap_or_default();

    match command {
        "predict" => run_predict(rest, config),
        "schema" => {
            print_schema();
            Ok(())
        }
        "info" => {
            let predictor = Predictor::with_config(PredictorConfig::from(config))?;
            println!("{}", predictor.model_info());
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        _ => {
            println!("Unknown command: {}\n", command);
            print_usage();
            Err(DepositorError::invalid_input(format!(
                "unknown command `{}`",
                command
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::artifact::fixtures::{sample_artifact, temp_path};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_overrides_forms() {
        let parsed = parse_overrides(&args(&[
            "--age",
            "45",
            "--job=technician",
            "--cons-conf-idx",
            "-42.5",
        ]))
        .unwrap();

        assert_eq!(
            parsed,
            vec![
                ("age".to_string(), "45".to_string()),
                ("job".to_string(), "technician".to_string()),
                ("cons-conf-idx".to_string(), "-42.5".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_overrides_errors() {
        assert!(parse_overrides(&args(&["age", "45"])).is_err());
        assert!(parse_overrides(&args(&["--age"])).is_err());
    }

    #[test]
    fn test_predict_command_with_artifact() {
        let dir = temp_path("cli-models");
        sample_artifact().save(dir.join("model.json")).unwrap();

        let mut config = Config::default();
        config.model.model_dir = dir.to_string_lossy().into_owned();
        config.model.artifact_file = "model.json".to_string();

        main_cli(&args(&["predict", "--age", "60", "--poutcome", "success"]), &config).unwrap();

        let err = main_cli(&args(&["predict", "--job", "astronaut"]), &config).unwrap_err();
        assert!(err.is_validation());

        main_cli(&args(&["info"]), &config).unwrap();
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_validation_happens_before_model_load() {
        let mut config = Config::default();
        config.model.model_dir = "/nonexistent/depositor".to_string();

        let err = main_cli(&args(&["predict", "--age", "200"]), &config).unwrap_err();
        assert!(matches!(err, DepositorError::OutOfRange { .. }));

        let err = main_cli(&args(&["predict"]), &config).unwrap_err();
        assert!(matches!(err, DepositorError::ArtifactNotFound { .. }));
    }

    #[test]
    fn test_schema_and_unknown_command() {
        let config = Config::default();
        main_cli(&args(&["schema"]), &config).unwrap();
        main_cli(&args(&["help"]), &config).unwrap();
        assert!(main_cli(&args(&["train"]), &config).is_err());
    }

    #[test]
    fn test_banner_describes_app() {
        let lines: Vec<String> = banner().lines().map(str::to_string).collect();
        assert_eq!(lines[2], "  Predictive Model for Term Deposit Subscription");
        assert_eq!(
            lines[5],
            "This app predicts whether a customer will subscribe to a term deposit \
             based on input features from a bank marketing campaign."
        );
    }
}
