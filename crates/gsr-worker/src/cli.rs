use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// gsr-worker: global spam registry maintenance and trigger surface.
///
/// Records reports, recomputes risk scores, and sweeps expired rows.
#[derive(Debug, Parser)]
#[command(name = "gsr-worker", version, about, long_about = None, propagate_version = true)]
pub struct Cli {
    /// Config file (TOML). Defaults apply when omitted.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// SQLite database path, overriding `[storage].db_path`.
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Record a human report.
    Ingest(IngestArgs),

    /// Record an automated-block event from a client app.
    #[command(name = "auto-block")]
    AutoBlock(AutoBlockArgs),

    /// Print the current risk profile of a number.
    Check(PhoneArgs),

    /// Recompute one number's score and threat entry.
    Recompute(PhoneArgs),

    /// Recompute every number with unexpired reports.
    #[command(name = "recompute-all")]
    RecomputeAll,

    /// List a country's threat entries, highest score first.
    Threats(ThreatsArgs),

    /// Delete expired reports, scores, and threat entries.
    Sweep,
}

impl Command {
    /// Commands that hash identities and so need the secret.
    pub fn needs_secret(&self) -> bool {
        matches!(self, Self::Ingest(_) | Self::AutoBlock(_))
    }
}

#[derive(Debug, Args)]
pub struct IngestArgs {
    /// Reported number, international format (e.g. +56961234567).
    #[arg(long)]
    pub phone: String,

    /// Reporter identity. Hashed before storage.
    #[arg(long)]
    pub reporter: String,

    /// SPAM, FRAUD, PHISHING, DEBT_COLLECTION, or SALES.
    #[arg(long)]
    pub category: String,

    #[arg(long, default_value = "")]
    pub comment: String,

    /// Recompute the number right after recording.
    #[arg(long)]
    pub recompute: bool,
}

#[derive(Debug, Args)]
pub struct AutoBlockArgs {
    #[arg(long)]
    pub phone: String,

    /// Identity of the blocking app. Hashed before storage.
    #[arg(long)]
    pub app: String,
}

#[derive(Debug, Args)]
pub struct PhoneArgs {
    #[arg(long)]
    pub phone: String,
}

#[derive(Debug, Args)]
pub struct ThreatsArgs {
    /// ISO 3166-1 alpha-2 country code.
    #[arg(long)]
    pub country: String,

    /// Only WARNING or CRITICAL entries.
    #[arg(long)]
    pub tier: Option<String>,
}
