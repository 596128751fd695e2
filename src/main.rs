//! Career Path Predictor
//!
//! Web form and CLI for placement prediction from a student profile.
//!
//! # Usage
//!
//! ```bash
//! # Serve the form page on the configured address
//! cargo run --release
//!
//! # One-shot prediction from flags
//! ./career-predictor predict --cgpa 8.5 --projects 5 --dsa 60
//! ```
//!
//! # Environment Variables
//!
//! - `CAREER_PREDICTOR_CONFIG`: Path to a TOML config file
//! - `CAREER_PREDICTOR_ADDR`: Override the server bind address
//! - `CAREER_PREDICTOR_CORS_ORIGINS`: Comma-separated allowed origins
//! - `RUST_LOG`: Logging level (default: info)

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use career_predictor::api::{create_app, PredictorState};
use career_predictor::collector::{CliControls, ProfileCollector};
use career_predictor::config::{self, defaults, PredictorConfig};
use career_predictor::gate::PredictionGate;
use career_predictor::inference::Artifacts;
use career_predictor::render::{render, render_failure};

// ============================================================================
// CLI Arguments
// ============================================================================

#[derive(Parser, Debug)]
#[command(name = "career-predictor")]
#[command(about = "Placement prediction from a student's academic and skill profile")]
#[command(version)]
struct CliArgs {
    /// Path to a TOML config file (overrides CAREER_PREDICTOR_CONFIG)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Override the server address (default: "0.0.0.0:8080")
    #[arg(short, long)]
    addr: Option<String>,

    /// Override the preprocessing pipeline artifact path
    #[arg(long, value_name = "FILE")]
    pipeline: Option<PathBuf>,

    /// Override the classifier artifact path
    #[arg(long, value_name = "FILE")]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Serve the form page and JSON API (default)
    Serve,

    /// Evaluate one profile given as flags and print the result
    Predict(CliControls),
}

// ============================================================================
// Configuration
// ============================================================================

/// Resolve the effective configuration: file, then env, then flags.
fn resolve_config(args: &CliArgs) -> Result<PredictorConfig> {
    let mut cfg = match &args.config {
        Some(path) => PredictorConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => PredictorConfig::load(),
    };

    if let Ok(addr) = std::env::var(defaults::ADDR_ENV_VAR) {
        info!("Server address overridden by {}: {}", defaults::ADDR_ENV_VAR, addr);
        cfg.server.addr = addr;
    }
    if let Some(addr) = &args.addr {
        cfg.server.addr = addr.clone();
    }
    if let Some(path) = &args.pipeline {
        cfg.artifacts.pipeline_path = path.clone();
    }
    if let Some(path) = &args.model {
        cfg.artifacts.model_path = path.clone();
    }

    cfg.validate().context("Invalid configuration")?;
    Ok(cfg)
}

// ============================================================================
// Commands
// ============================================================================

/// Evaluate a single profile from CLI flags.
fn run_predict(controls: &CliControls, artifacts: &Artifacts, positive_class: usize) -> Result<()> {
    let profile = controls.collect().context("Invalid profile")?;
    let mut gate = PredictionGate::from_artifacts(artifacts).with_positive_class(positive_class);

    match gate.evaluate(&profile) {
        Ok(outcome) => {
            println!("{}", render(&outcome));
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Prediction attempt failed");
            println!("{}", render_failure());
            Err(anyhow::anyhow!("prediction failed: {e}"))
        }
    }
}

/// Serve the form page until Ctrl+C.
async fn run_server(addr: &str, artifacts: Artifacts, positive_class: usize) -> Result<()> {
    if !artifacts.all_loaded() {
        warn!("Serving with unavailable artifacts: every prediction will fail until restart");
    }

    let app = create_app(PredictorState::new(artifacts, positive_class));

    info!("🌐 Starting HTTP server on {}...", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    info!("✓ HTTP server listening on {}", addr);
    info!("🎯 Form available at: http://{}", addr);

    // Graceful shutdown via Ctrl+C
    let cancel_token = CancellationToken::new();
    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        tokio::signal::ctrl_c().await.ok();
        info!("🛑 Received Ctrl+C, initiating shutdown...");
        shutdown_token.cancel();
    });

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            cancel_token.cancelled().await;
            info!("[HttpServer] Received shutdown signal");
        })
        .await
        .context("HTTP server error")?;

    info!("[HttpServer] Graceful shutdown complete");
    Ok(())
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = CliArgs::parse();

    let cfg = resolve_config(&args)?;
    config::init(cfg);
    let cfg = config::get();

    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    info!("  Career Path Predictor");
    info!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    let artifacts = Artifacts::load(&cfg.artifacts.pipeline_path, &cfg.artifacts.model_path);
    let positive_class = cfg.model.positive_class_index;

    match &args.command {
        Some(SubCommand::Predict(controls)) => run_predict(controls, &artifacts, positive_class),
        Some(SubCommand::Serve) | None => run_server(&cfg.server.addr, artifacts, positive_class).await,
    }
}
