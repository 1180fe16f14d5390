use anyhow::Context;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use woundcare_core::{
    acknowledge_alert, config::load_vital_ranges, config::resolve_vital_ranges,
    constants::VITAL_RANGES_ENV_VAR, parse_alerts_json, render_alerts_json, sort_for_review,
    unacknowledged, Alert, AlertService, AlertSummary, CoreConfig, NonEmptyText, RecordId,
    VitalSignsRange,
};

#[derive(Parser)]
#[command(name = "woundcare")]
#[command(about = "Wound-care vital-signs alerting CLI")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a vital-signs reading (JSON) and print the raised alerts
    Evaluate {
        /// Path to the reading JSON file
        reading: PathBuf,
        /// YAML range file overriding the default ranges
        #[arg(long, env = VITAL_RANGES_ENV_VAR)]
        ranges: Option<PathBuf>,
        /// Evaluation timestamp (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Print the default ranges as YAML
    DefaultRanges,
    /// Validate a YAML range file
    CheckRanges {
        /// Path to the range file
        path: PathBuf,
    },
    /// Print alerts (JSON) in review order with a summary
    Review {
        /// Path to the alerts JSON file
        alerts: PathBuf,
        /// Only list alerts that are not yet acknowledged
        #[arg(long)]
        pending_only: bool,
    },
    /// Acknowledge one alert and print the updated alerts
    Acknowledge {
        /// Path to the alerts JSON file
        alerts: PathBuf,
        /// Alert identifier (32 lowercase hex characters)
        alert_id: String,
        /// Staff member acknowledging the alert
        #[arg(long)]
        by: String,
        /// Acknowledgement timestamp (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
}

#[derive(Serialize)]
struct ReviewReport<'a> {
    alerts: Vec<&'a Alert>,
    summary: AlertSummary,
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("woundcare=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(command) => println!("{}", run(command)?),
        None => println!("Use 'woundcare --help' for commands"),
    }

    Ok(())
}

fn read_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn run(command: Commands) -> anyhow::Result<String> {
    match command {
        Commands::Evaluate {
            reading,
            ranges,
            at,
        } => {
            let config = CoreConfig::new(resolve_vital_ranges(ranges)?)?;
            let service = AlertService::new(config);
            let json = read_file(&reading)?;
            let alerts = service
                .evaluate_json(&json, at.unwrap_or_else(Utc::now))
                .with_context(|| format!("invalid reading in {}", reading.display()))?;
            tracing::info!("raised {} alert(s)", alerts.len());
            Ok(render_alerts_json(&alerts)?)
        }
        Commands::DefaultRanges => Ok(VitalSignsRange::default().render_yaml()?),
        Commands::CheckRanges { path } => {
            load_vital_ranges(&path)?;
            Ok(format!("{}: OK", path.display()))
        }
        Commands::Review {
            alerts,
            pending_only,
        } => {
            let mut alerts = parse_alerts_json(&read_file(&alerts)?)?;
            sort_for_review(&mut alerts);
            let summary = AlertSummary::from_alerts(&alerts);
            if summary.needs_escalation() {
                tracing::warn!(
                    "{} critical alert(s) awaiting acknowledgement",
                    summary.critical_unacknowledged
                );
            }
            let listed: Vec<_> = if pending_only {
                unacknowledged(&alerts)
            } else {
                alerts.iter().collect()
            };
            let report = ReviewReport {
                alerts: listed,
                summary,
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        Commands::Acknowledge {
            alerts,
            alert_id,
            by,
            at,
        } => {
            let mut alerts = parse_alerts_json(&read_file(&alerts)?)?;
            let id = RecordId::parse(&alert_id)?;
            let actor = NonEmptyText::new(by)?;
            acknowledge_alert(&mut alerts, id, actor, at.unwrap_or_else(Utc::now))?;
            Ok(render_alerts_json(&alerts)?)
        }
    }
}
