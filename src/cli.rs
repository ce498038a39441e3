use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "shellcheck-sarif",
    version,
    about = "Run ShellCheck and convert its JSON report to SARIF"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Shell dialect passed to the linter
    #[arg(long, value_enum, default_value = "bash")]
    pub shell: Shell,

    /// Minimum severity of findings to report
    #[arg(long, value_enum, default_value = "style")]
    pub severity: Severity,

    /// Path of the SARIF file to write
    #[arg(short, long, default_value = "shellcheck.sarif")]
    pub output: PathBuf,

    /// Explicit config file (overrides shellcheck-sarif.toml discovery)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Skip fetching rule documentation from the wiki
    #[arg(long)]
    pub no_docs: bool,

    /// Files or directories to check
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Shell {
    Bash,
    Sh,
    Dash,
    Ksh,
    Busybox,
}

impl Shell {
    pub fn as_flag(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Sh => "sh",
            Self::Dash => "dash",
            Self::Ksh => "ksh",
            Self::Busybox => "busybox",
        }
    }

    /// SARIF sourceLanguage for scripts written in this dialect.
    pub fn source_language(self) -> &'static str {
        match self {
            Self::Bash => "bash",
            Self::Ksh => "ksh",
            Self::Sh | Self::Dash | Self::Busybox => "shell",
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum Severity {
    Error,
    Warning,
    Info,
    Style,
}

impl Severity {
    pub fn as_flag(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Style => "style",
        }
    }
}
