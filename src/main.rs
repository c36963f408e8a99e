//! Application entry point for the `landslide-monitor` service.
//!
//! This binary orchestrates the startup sequence:
//! - Loading configuration from environment variables or `.env`
//! - Initializing structured logging/tracing
//! - Creating the shared station monitor
//! - Spawning the sensor feed poller when `SENSOR_FEED_URL` is set
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `SERVER_PORT` (optional) – HTTP port (default: 8080)
//! - `SENSOR_FEED_URL` (optional) – latest-snapshot endpoint to poll
//! - `FEED_POLL_SECS` (optional) – poll interval (default: 5)
//! - `STATION_LOCATION` (optional) – station label in reports
//! - `LOG_LEVEL` (optional) – log verbosity (default: `debug`)
//! - `SPAN_EVENTS` (optional) – span event mode for tracing
use std::{env, net::SocketAddr};

use anyhow::Result;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use landslide_monitor::{config, feed, Monitor};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    init_tracing();
    dotenv().ok();

    let cfg = config::load_from_env()?;
    cfg.log_config();

    let monitor = Monitor::shared(cfg.system_info());

    if let Some(url) = cfg.feed_url.clone() {
        let monitor = monitor.clone();
        let interval = cfg.feed_poll_secs;
        tokio::spawn(async move {
            if let Err(e) = feed::run(url, interval, monitor).await {
                tracing::error!("Sensor feed poller stopped: {:#}", e);
            }
        });
    } else {
        tracing::info!("No SENSOR_FEED_URL set; accepting pushed readings only");
    }

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    let app = landslide_monitor::app(monitor);

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---

/// Initialize the global tracing subscriber for structured logging.
///
/// - Color output follows TTY detection unless `FORCE_COLOR` is
///   `1|true|yes` (on) or `0|false|no` (off)
/// - `SPAN_EVENTS`: `"full"` emits ENTER, EXIT and CLOSE; `"enter_exit"` emits
///   ENTER and EXIT; anything else emits CLOSE only
/// - `RUST_LOG` wins when set; otherwise `LOG_LEVEL` picks the level
///
/// Call once at startup before any tracing macros run.
fn init_tracing() {
    // ---
    let span_events = match env::var("SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::FULL,
        Ok("enter_exit") => FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") | Ok("true") | Ok("yes") => true,
        Ok("0") | Ok("false") | Ok("no") => false,
        _ => std::io::stdout().is_terminal(),
    };

    let env_filter = if env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        let level = match env::var("LOG_LEVEL").ok().as_deref() {
            Some("trace") => "trace",
            Some("debug") => "debug",
            Some("info") => "info",
            Some("warn") => "warn",
            Some("error") => "error",
            _ => "debug",
        };
        EnvFilter::new(format!("{level},hyper=warn,reqwest=warn"))
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_span_events(span_events)
        .with_env_filter(env_filter)
        .with_ansi(use_color)
        .compact()
        .init();
}
