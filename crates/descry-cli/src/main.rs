use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use log::LevelFilter;
use std::path::PathBuf;
use std::str::FromStr;

use descry_classifiers::config::ModelType;
use descry_cli::evaluate::{load_evaluate_config, run_evaluate, write_evaluation_report, EvaluateConfig};

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Info)
        .parse_env(env_logger::Env::default().filter_or("DESCRY_LOG", "info"))
        .init();

    let matches = Command::new("descry")
        .version(clap::crate_version!())
        .about("Benchmark classifiers on precomputed image feature descriptors")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("evaluate")
                .about("Train on the train split, predict on the test split, and report accuracy")
                .arg(
                    Arg::new("data_dir")
                        .short('d')
                        .long("data-dir")
                        .help("Directory holding <feature>/train and <feature>/test splits")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("feature")
                        .short('f')
                        .long("feature")
                        .help("Feature family name (subdirectory of the data dir)")
                        .value_parser(clap::builder::NonEmptyStringValueParser::new())
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("model_type")
                        .short('m')
                        .long("model")
                        .help("Classifier family to train")
                        .value_parser(["random-forest", "mlp"])
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to an evaluation JSON configuration file")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output_dir")
                        .short('o')
                        .long("output-dir")
                        .help("Directory the HTML report is written to")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::DirPath),
                )
                .arg(
                    Arg::new("scale")
                        .long("scale")
                        .help("Standardize feature columns before fitting")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no_report")
                        .long("no-report")
                        .help("Disable HTML report generation")
                        .action(ArgAction::SetTrue),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("evaluate", sub_m)) => handle_evaluate(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_evaluate(matches: &ArgMatches) -> Result<()> {
    let mut config = if let Some(config_path) = matches.get_one::<PathBuf>("config") {
        log::info!("Using config: {:?}", config_path);
        load_evaluate_config(config_path)?
    } else {
        EvaluateConfig::default()
    };

    if let Some(data_dir) = matches.get_one::<PathBuf>("data_dir") {
        config.data_dir = data_dir.clone();
    }
    if let Some(feature) = matches.get_one::<String>("feature") {
        config.feature_name = feature.clone();
    }
    if let Some(model_type) = matches.get_one::<String>("model_type") {
        config.model.model_type = ModelType::from_str(model_type).map_err(anyhow::Error::msg)?;
    }
    if let Some(output_dir) = matches.get_one::<PathBuf>("output_dir") {
        config.output_dir = output_dir.clone();
    }
    if matches.get_flag("scale") {
        config.model.scale_features = true;
    }
    if matches.get_flag("no_report") {
        config.write_report = false;
    }

    match run_evaluate(&config) {
        Ok(result) => {
            if config.write_report {
                write_evaluation_report(&result, &config)?;
            }
            println!(
                "{} / {}: accuracy {:.2}%",
                config.feature_name,
                result.model_name,
                result.accuracy * 100.0
            );
            Ok(())
        }
        Err(e) => {
            log::error!("Evaluation failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
