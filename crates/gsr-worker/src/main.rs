mod cli;

use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use clap::Parser;

use gsr_core::cancellation::Cancellable;
use gsr_core::models::RiskTier;
use gsr_core::traits::IIdentityHasher;
use gsr_core::{CancellationToken, GsrConfig};
use gsr_observability::{events, init_tracing};
use gsr_privacy::{global_hasher, init_global_hasher, Blake3IdentityHasher, PhoneNumberNormalizer};
use gsr_registry::{RecomputeOutcome, ReportService, Stores};
use gsr_storage::StorageEngine;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => GsrConfig::from_file(path)
            .with_context(|| format!("failed loading config {}", path.display()))?,
        None => GsrConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.storage.db_path = db.to_string_lossy().into_owned();
    }
    init_tracing(&config.observability);

    let token = CancellationToken::new();
    let on_interrupt = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("interrupt received, cancelling in-flight work");
            on_interrupt.cancel();
        }
    });

    let output = tokio::task::spawn_blocking(move || run(cli.command, config, &token))
        .await
        .context("worker task panicked")??;
    println!("{output}");
    Ok(())
}

fn run(command: Command, config: GsrConfig, token: &CancellationToken) -> Result<String> {
    let store = Arc::new(
        StorageEngine::open(&config.storage)
            .with_context(|| format!("failed opening database {}", config.storage.db_path))?,
    );

    if let Command::Sweep = command {
        return sweep(&store);
    }

    let hasher = identity_hasher(&config, command.needs_secret())?;
    let service = ReportService::new(
        Stores::shared(Arc::clone(&store)),
        Arc::new(PhoneNumberNormalizer::new()),
        hasher,
        config,
    );

    match command {
        Command::Ingest(args) => {
            let report = service
                .ingest_report(&args.phone, &args.reporter, &args.category, &args.comment)
                .context("report rejected")?;
            let mut out = format!("recorded report {} for {}", report.id, report.phone_number);
            if args.recompute {
                let outcome = service.recompute(&report.phone_number, token)?;
                out.push('\n');
                out.push_str(&describe(&outcome));
            }
            Ok(out)
        }
        Command::AutoBlock(args) => {
            let report = service
                .ingest_auto_block(&args.phone, &args.app)
                .context("auto-block event rejected")?;
            Ok(format!("recorded auto-block {} for {}", report.id, report.phone_number))
        }
        Command::Check(args) => {
            let profile = service.check_risk(&args.phone)?;
            Ok(serde_json::to_string_pretty(&profile)?)
        }
        Command::Recompute(args) => {
            let outcome = service
                .recompute(&args.phone, token)
                .with_context(|| format!("recompute failed for {}", args.phone))?;
            Ok(describe(&outcome))
        }
        Command::RecomputeAll => {
            let summary = service.recompute_all(token)?;
            Ok(serde_json::to_string_pretty(&summary)?)
        }
        Command::Threats(args) => {
            let tier = args
                .tier
                .as_deref()
                .map(str::parse::<RiskTier>)
                .transpose()
                .map_err(|e| anyhow!(e))?;
            let entries = service.threats_for_country(&args.country, tier)?;
            Ok(serde_json::to_string_pretty(&entries)?)
        }
        Command::Sweep => sweep(&store),
    }
}

/// Hasher backed by the configured secret. Commands that never hash an
/// identity run without one.
fn identity_hasher(config: &GsrConfig, required: bool) -> Result<Arc<dyn IIdentityHasher>> {
    let var = &config.privacy.secret_env;
    match Blake3IdentityHasher::from_env(var) {
        Ok(hasher) => {
            init_global_hasher(hasher);
            Ok(global_hasher()?)
        }
        Err(e) if required => Err(e).with_context(|| format!("set {var} to the hashing secret")),
        Err(_) => Ok(Arc::new(Blake3IdentityHasher::new(uuid::Uuid::new_v4().as_bytes()))),
    }
}

fn sweep(store: &StorageEngine) -> Result<String> {
    let span = gsr_observability::sweep_span!();
    let _entered = span.enter();

    let swept = store.sweep_expired(Utc::now())?;
    events::expired_rows_swept(swept.reports, swept.scores, swept.threats);
    Ok(serde_json::to_string_pretty(&swept)?)
}

fn describe(outcome: &RecomputeOutcome) -> String {
    match outcome {
        RecomputeOutcome::Persisted { score, breakdown } => format!(
            "{} scored {:.2} ({}) from {} reports, {} distinct reporters, {} velocity hits{}",
            score.phone_number,
            score.score,
            score.tier,
            score.total_reports,
            breakdown.distinct_reporters,
            score.velocity_hit_count,
            if breakdown.swarm_override { ", swarm override" } else { "" },
        ),
        RecomputeOutcome::Purged {
            phone_number,
            reason,
            ..
        } => format!("{phone_number} purged: {}", reason.describe()),
    }
}
