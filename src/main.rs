//! Signcoach - sign-language practice validation engine
//!
//! Replays recorded detector output against an expected sign and logs a
//! pass/fail verdict per frame, the same decision path the practice app
//! runs live at 15-30 frames per second.
//!
//! Module structure:
//! - `domain/` - Core value types (HandSkeleton, FingerState, RecognitionResult)
//! - `io/` - External interfaces (detector port, reference store)
//! - `services/` - Recognition logic (geometry, rules, similarity, coordinator)
//! - `infra/` - Infrastructure (Config, Metrics)

use clap::Parser;
use signcoach::domain::SignId;
use signcoach::infra::metrics::spawn_reporter;
use signcoach::infra::{Config, Metrics};
use signcoach::io::{ImageFrame, JsonReferenceStore, ReplayDetector};
use signcoach::services::SignRecognizer;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::EnvFilter;

/// Signcoach - sign-language gesture recognition engine
#[derive(Parser, Debug)]
#[command(name = "signcoach", version, about)]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "config/dev.toml")]
    config: String,

    /// JSONL file of recorded detector frames (one {"hands": [...]} per line)
    #[arg(short, long)]
    frames: String,

    /// Sign the practice attempt is validated against
    #[arg(short, long)]
    sign: String,

    /// Override the reference directory from the config file
    #[arg(long)]
    references: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured logging with configurable level via RUST_LOG env var
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::rfc_3339())
        .with_target(false)
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), git_hash = env!("GIT_HASH"), "signcoach starting");

    let args = Args::parse();
    let config = Config::load_from_path(&args.config);

    info!(
        config_file = %config.config_file(),
        session_id = %config.session_id(),
        precision_threshold = %config.precision_threshold(),
        extension_margin = %config.extension_margin(),
        touch_radius = %config.touch_radius(),
        references_dir = %config.references_dir(),
        "config_loaded"
    );

    let references_dir =
        args.references.unwrap_or_else(|| config.references_dir().to_string());

    let detector = Arc::new(ReplayDetector::from_file(&args.frames)?);
    let frame_count = detector.remaining();
    let store = Arc::new(JsonReferenceStore::new(&references_dir));
    let metrics = Arc::new(Metrics::new());

    let recognizer = SignRecognizer::new(&config, detector, store, metrics.clone());

    // Periodic metrics reporting for long replay sessions
    let reporter = spawn_reporter(metrics.clone(), config.metrics_interval_secs());

    let expected = SignId::from(args.sign.as_str());
    if recognizer.load_reference(&expected).await {
        info!(sign = %expected, "reference_active");
    } else {
        info!(sign = %expected, "running_rule_only");
    }

    // The replay detector ignores pixel payloads; one empty frame per
    // recorded line drives the session.
    let frame = ImageFrame::default();
    let mut best_confidence = 0.0f32;
    let mut passed = false;

    for _ in 0..frame_count {
        let result = recognizer.recognize(&expected, &frame).await;
        best_confidence = best_confidence.max(result.confidence);
        passed = passed || result.is_correct;
        println!("{}", serde_json::to_string(&result)?);
    }

    reporter.abort();
    metrics.report();
    info!(
        expected = %expected,
        frames = %frame_count,
        best_confidence = %best_confidence,
        passed = %passed,
        "session_complete"
    );

    recognizer.end_session();
    Ok(())
}
