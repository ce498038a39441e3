mod cli;
mod config;
mod convert;
mod docs;
mod error;
mod linter;
mod report;
mod types;

use crate::error::ConvertError;
use clap::Parser;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const FINDINGS: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32, ConvertError> {
    let cli = cli::Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    let config = config::load_config(cli.config.as_deref())?;
    let targets = linter::collect_targets(&cli.files)?;
    let tool_version = linter::detect_version(config.linter_command());
    let entries = linter::run_linter(&config, cli.shell, cli.severity, &targets)?;

    let docs = if cli.no_docs || !config.docs_enabled() {
        docs::RuleDocs::disabled()
    } else {
        match docs::WikiDocSource::new(config.docs_base_url(), config.docs_timeout()) {
            Ok(source) => docs::RuleDocs::with_source(Box::new(source)),
            Err(error) => {
                tracing::warn!(%error, "documentation fetching unavailable; falling back to finding messages");
                docs::RuleDocs::disabled()
            }
        }
    };

    let converter = convert::Converter::new(cli.shell, docs, tool_version);
    let log = converter.convert(&entries);
    report::write_sarif(&cli.output, &log)?;

    let result_count = log
        .runs
        .first()
        .map(|run| run.results.len())
        .unwrap_or_default();
    if !cli.quiet {
        println!(
            "wrote {} result(s) to {}",
            result_count,
            cli.output.display()
        );
    }

    if result_count == 0 {
        Ok(exit_code::SUCCESS)
    } else {
        Ok(exit_code::FINDINGS)
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
