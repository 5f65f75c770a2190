use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use health_intake::config::AppConfig;
use health_intake::error::AppError;
use health_intake::gateway::{self, AppState};
use health_intake::intake::{CandidateRecord, ValidationEngine, Verdict};
use health_intake::predictor::PredictorClient;
use health_intake::telemetry;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(
    name = "Health Intake Gateway",
    about = "Validate health questionnaire records and relay them to the prediction service",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP gateway (default command)
    Serve(ServeArgs),
    /// Validate a candidate record from a JSON file without submitting it
    Validate(ValidateArgs),
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// Path to a JSON object mapping field names to raw answers
    #[arg(long)]
    input: PathBuf,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::Validate(args) => run_validate(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        engine: Arc::new(ValidationEngine::standard()),
        predictor: Arc::new(PredictorClient::new(&config.predictor)?),
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
    };

    let app = gateway::router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, predictor = %config.predictor.endpoint, "health intake gateway ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn run_validate(args: ValidateArgs) -> Result<(), AppError> {
    let candidate = load_candidate(&args.input)?;
    let engine = ValidationEngine::standard();

    match engine.validate(&candidate) {
        Verdict::Valid(record) => {
            println!("Candidate record is valid.");
            println!("{}", serde_json::to_string_pretty(&record)?);
            Ok(())
        }
        Verdict::Invalid(errors) => {
            println!("Candidate record has {} invalid field(s):", errors.len());
            for (field, message) in &errors {
                println!("- {field}: {message}");
            }
            std::process::exit(1);
        }
    }
}

fn load_candidate(path: &Path) -> Result<CandidateRecord, AppError> {
    let raw = std::fs::read_to_string(path)?;
    let value: serde_json::Value = serde_json::from_str(&raw)?;

    match value.as_object() {
        Some(map) => Ok(CandidateRecord::from_json_map(map)),
        None => Err(AppError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "candidate file must contain a JSON object",
        ))),
    }
}
