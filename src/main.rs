use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Commands};
use config::Settings;
use indicatif::MultiProgress;
use log::LevelFilter;
use miette::{IntoDiagnostic, WrapErr};
use owo_colors::OwoColorize;
use rename::RuleOutcome;

mod cli;
mod config;
mod optimize;
mod progress_bar;
mod rename;
mod util;

const RULE_WIDTH: usize = 50;

fn main() -> miette::Result<()> {
    let args = Cli::parse();

    let mut binding = env_logger::Builder::new();
    let logger = binding
        .filter_level(LevelFilter::Info)
        .filter_module("asset_tidy", args.verbose.log_level_filter())
        .filter_module("oxipng", LevelFilter::Warn)
        .format_timestamp(None)
        .format_module_path(false)
        .build();

    let level = logger.filter();

    let multi_progress = MultiProgress::new();
    indicatif_log_bridge::LogWrapper::new(multi_progress.clone(), logger)
        .try_init()
        .into_diagnostic()
        .wrap_err("Failed to initialize logging")?;

    log::set_max_level(level);

    let settings = Settings::default();

    match args.command {
        Commands::Rename => rename_assets(&settings).map_err(|e| miette::miette!("{e:#}")),
        Commands::Optimize => {
            optimize_assets(&settings, multi_progress).map_err(|e| miette::miette!("{e:#}"))
        }
        Commands::Completions(args) => {
            generate_completions(args);
            Ok(())
        }
    }
}

fn rename_assets(settings: &Settings) -> anyhow::Result<()> {
    let report = rename::rename_assets(&settings.source_dir, rename::RENAME_RULES)?;

    println!("{}", "-".repeat(RULE_WIDTH));
    for (rule, outcome) in &report.outcomes {
        match outcome {
            RuleOutcome::Renamed { from } => {
                println!("{} {} -> {}", "+".green(), from, rule.target)
            }
            RuleOutcome::TargetExists { matched } => println!(
                "{} {} kept, {} already exists",
                "!".yellow(),
                matched,
                rule.target
            ),
            RuleOutcome::AlreadyRenamed | RuleOutcome::NotFound => {}
        }
    }
    println!("{}", report.bold());

    Ok(())
}

fn optimize_assets(settings: &Settings, multi_progress: MultiProgress) -> anyhow::Result<()> {
    let report = optimize::run(settings, multi_progress)?;

    for failure in &report.failures {
        println!("{} {}: {}", "!".yellow(), failure.file_name, failure.error);
    }
    println!("{}", report.green());

    Ok(())
}

fn generate_completions(args: cli::CompletionsArgs) {
    let mut cmd = Cli::command();
    generate(args.shell, &mut cmd, "asset-tidy", &mut std::io::stdout());
}
