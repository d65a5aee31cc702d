//! LifeGuard CLI - serve and inspect synthetic health signals
//!
//! Commands:
//! - serve: Run the HTTP service
//! - snapshot: Print a realtime or historical snapshot
//! - risk: Score a snapshot read from a file or stdin
//! - doctor: Diagnose configuration

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lifeguard_signals::api::cors_layer;
use lifeguard_signals::config::ServiceConfig;
use lifeguard_signals::observability::init_tracing;
use lifeguard_signals::startup::{reply_provider, Application};
use lifeguard_signals::types::{SleepBreakdown, TimedValue};
use lifeguard_signals::{
    calculate_risk_score, explain_risk_score, historical_snapshot, realtime_snapshot,
    ComputeError, HealthSignalGenerator, SERVICE_NAME, VERSION,
};

/// LifeGuard - synthetic wearable health signals
#[derive(Parser)]
#[command(name = "lifeguard")]
#[command(author = "LifeGuard Team")]
#[command(version = VERSION)]
#[command(about = "Serve and inspect synthetic wearable health signals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP service
    Serve {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,

        /// Override the configured generator seed
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print a generated snapshot
    Snapshot {
        /// Snapshot to generate
        #[arg(value_enum)]
        kind: SnapshotKind,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,

        /// Output format
        #[arg(long, default_value = "json-pretty")]
        format: OutputFormat,
    },

    /// Compute the risk score of a snapshot
    Risk {
        /// Snapshot JSON file with `heartRate` and `sleep` (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Print intermediate values
        #[arg(long)]
        explain: bool,
    },

    /// Diagnose configuration
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum SnapshotKind {
    /// Realtime dashboard snapshot (includes riskScore)
    Realtime,
    /// Historical dashboard snapshot (includes timestamp)
    Historical,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Compact JSON
    Json,
    /// Pretty-printed JSON
    JsonPretty,
}

/// Subset of a snapshot needed for scoring
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RiskInput {
    heart_rate: Vec<TimedValue>,
    sleep: SleepBreakdown,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), LifeguardCliError> {
    match cli.command {
        Commands::Serve { host, port, seed } => cmd_serve(host, port, seed),
        Commands::Snapshot { kind, seed, format } => cmd_snapshot(kind, seed, format),
        Commands::Risk { input, explain } => cmd_risk(&input, explain),
        Commands::Doctor { json } => cmd_doctor(json),
    }
}

fn cmd_serve(
    host: Option<String>,
    port: Option<u16>,
    seed: Option<u64>,
) -> Result<(), LifeguardCliError> {
    let mut config = ServiceConfig::load()?;
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if seed.is_some() {
        config.generator.seed = seed;
    }

    init_tracing(&config.log.level, config.log.json);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let app = Application::build(config)
            .await
            .map_err(LifeguardCliError::Startup)?;
        app.run_until_stopped().await?;
        Ok::<(), LifeguardCliError>(())
    })
}

fn cmd_snapshot(
    kind: SnapshotKind,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<(), LifeguardCliError> {
    let mut generator = match seed {
        Some(seed) => HealthSignalGenerator::seeded(seed),
        None => HealthSignalGenerator::from_entropy(),
    };

    let value = match kind {
        SnapshotKind::Realtime => serde_json::to_value(realtime_snapshot(&mut generator)?)?,
        SnapshotKind::Historical => serde_json::to_value(historical_snapshot(&mut generator))?,
    };

    let output = match format {
        OutputFormat::Json => serde_json::to_string(&value)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&value)?,
    };
    println!("{}", output);

    Ok(())
}

fn cmd_risk(input: &Path, explain: bool) -> Result<(), LifeguardCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let parsed = parse_risk_input(&input_data)?;

    if explain {
        let breakdown = explain_risk_score(&parsed.heart_rate, &parsed.sleep)?;
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
    } else {
        println!("{}", calculate_risk_score(&parsed.heart_rate, &parsed.sleep)?);
    }

    Ok(())
}

fn parse_risk_input(data: &str) -> Result<RiskInput, LifeguardCliError> {
    Ok(serde_json::from_str(data)?)
}

fn cmd_doctor(json: bool) -> Result<(), LifeguardCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "version".to_string(),
        status: CheckStatus::Ok,
        message: format!("{} {}", SERVICE_NAME, VERSION),
    });

    match ServiceConfig::load() {
        Ok(config) => {
            checks.push(DoctorCheck {
                name: "config".to_string(),
                status: CheckStatus::Ok,
                message: "Configuration loaded".to_string(),
            });

            checks.push(match config.bind_addr() {
                Ok(addr) => DoctorCheck {
                    name: "bind_address".to_string(),
                    status: CheckStatus::Ok,
                    message: format!("Will listen on {}", addr),
                },
                Err(e) => DoctorCheck {
                    name: "bind_address".to_string(),
                    status: CheckStatus::Error,
                    message: format!("Invalid host '{}': {}", config.server.host, e),
                },
            });

            checks.push(match cors_layer(&config.cors.allowed_origins) {
                Ok(_) if config.cors.allowed_origins.is_empty() => DoctorCheck {
                    name: "cors".to_string(),
                    status: CheckStatus::Warning,
                    message: "No allowed origins; browsers will block the dashboard".to_string(),
                },
                Ok(_) => DoctorCheck {
                    name: "cors".to_string(),
                    status: CheckStatus::Ok,
                    message: format!("Allowed origins: {}", config.cors.allowed_origins.join(", ")),
                },
                Err(e) => DoctorCheck {
                    name: "cors".to_string(),
                    status: CheckStatus::Error,
                    message: format!("Invalid origin: {}", e),
                },
            });

            checks.push(match reply_provider(&config) {
                Ok(provider) => DoctorCheck {
                    name: "assistant".to_string(),
                    status: CheckStatus::Ok,
                    message: format!("Reply provider '{}'", provider.name()),
                },
                Err(e) => DoctorCheck {
                    name: "assistant".to_string(),
                    status: CheckStatus::Error,
                    message: e.to_string(),
                },
            });

            checks.push(DoctorCheck {
                name: "generator".to_string(),
                status: CheckStatus::Ok,
                message: match config.generator.seed {
                    Some(seed) => format!("Seeded with {}", seed),
                    None => "Seeded from OS entropy".to_string(),
                },
            });
        }
        Err(e) => checks.push(DoctorCheck {
            name: "config".to_string(),
            status: CheckStatus::Error,
            message: e.to_string(),
        }),
    }

    let report = DoctorReport {
        service: SERVICE_NAME.to_string(),
        version: VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("LifeGuard Doctor Report");
        println!("=======================");
        println!("Service: {}", report.service);
        println!("Version: {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Warning => "[WARN]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(LifeguardCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Error types

#[derive(Debug)]
enum LifeguardCliError {
    Io(io::Error),
    Compute(ComputeError),
    Json(serde_json::Error),
    Config(config::ConfigError),
    Startup(anyhow::Error),
    DoctorFailed,
}

impl From<io::Error> for LifeguardCliError {
    fn from(e: io::Error) -> Self {
        LifeguardCliError::Io(e)
    }
}

impl From<ComputeError> for LifeguardCliError {
    fn from(e: ComputeError) -> Self {
        LifeguardCliError::Compute(e)
    }
}

impl From<serde_json::Error> for LifeguardCliError {
    fn from(e: serde_json::Error) -> Self {
        LifeguardCliError::Json(e)
    }
}

impl From<config::ConfigError> for LifeguardCliError {
    fn from(e: config::ConfigError) -> Self {
        LifeguardCliError::Config(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<LifeguardCliError> for CliError {
    fn from(e: LifeguardCliError) -> Self {
        match e {
            LifeguardCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            LifeguardCliError::Compute(e) => CliError {
                code: "COMPUTE_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Input needs a non-empty heartRate series and a sleep object".to_string()),
            },
            LifeguardCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            LifeguardCliError::Config(e) => CliError {
                code: "CONFIG_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check lifeguard.toml and LIFEGUARD__* variables".to_string()),
            },
            LifeguardCliError::Startup(e) => CliError {
                code: "STARTUP_ERROR".to_string(),
                message: format!("{:#}", e),
                hint: Some("Run 'lifeguard doctor' for details".to_string()),
            },
            LifeguardCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct DoctorReport {
    service: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Warning,
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_malformed_risk_input_is_json_error() {
        let err = parse_risk_input("{\"heartRate\": [").unwrap_err();
        assert_eq!(CliError::from(err).code, "JSON_ERROR");
    }

    #[test]
    fn test_empty_heart_rate_is_compute_error() {
        let parsed =
            parse_risk_input(r#"{"heartRate": [], "sleep": {"deep": 2.0, "light": 4.0, "rem": 1.5, "awake": 0.4}}"#)
                .unwrap();
        let err: LifeguardCliError = calculate_risk_score(&parsed.heart_rate, &parsed.sleep)
            .unwrap_err()
            .into();
        assert_eq!(CliError::from(err).code, "COMPUTE_ERROR");
    }
}
