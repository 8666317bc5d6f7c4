use scopecast::config::{Config, SourceMode};
use scopecast::error::{Error, Result};
use scopecast::publish::{PublishLoop, ZmqPublisher};
use scopecast::source::{AcquisitionSource, DocumentSource, StreamSource};
use scopecast::transport::TcpTransport;
use std::env;
use std::process::ExitCode;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Parse config path from command line arguments.
///
/// Supports:
/// - `scopecast <path>` (positional)
/// - `scopecast --config <path>` (flag-based)
/// - `scopecast -c <path>` (short flag)
///
/// Runs on built-in defaults if no path is given.
fn parse_config_path() -> Option<String> {
    let args: Vec<String> = env::args().collect();

    // Look for --config or -c flag
    for i in 1..args.len() {
        if (args[i] == "--config" || args[i] == "-c") && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }

    // Fall back to first positional argument (if it doesn't start with -)
    if args.len() > 1 && !args[1].starts_with('-') {
        return Some(args[1].clone());
    }

    None
}

fn main() -> ExitCode {
    let config = match parse_config_path() {
        Some(path) => match Config::from_file(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error loading config {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Config::default(),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    log::info!("scopecast v{} starting...", env!("CARGO_PKG_VERSION"));

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<()> {
    // Set up shutdown signal handler
    let running = Arc::new(AtomicBool::new(true));
    let r = Arc::clone(&running);

    ctrlc::set_handler(move || {
        log::info!("Received shutdown signal");
        r.store(false, Ordering::Relaxed);
    })
    .map_err(|e| Error::Other(format!("Error setting Ctrl-C handler: {}", e)))?;

    let source: Box<dyn AcquisitionSource> = match config.source.mode {
        SourceMode::Stream => {
            log::info!(
                "Acquiring from status socket {}:{}",
                config.source.host,
                config.source.port
            );
            let transport = TcpTransport::connect(
                &config.source.host,
                config.source.port,
                config.source.read_timeout(),
            )?;
            Box::new(StreamSource::new(transport, &config.source.query))
        }
        SourceMode::Document => {
            log::info!("Acquiring from status document {}", config.source.url);
            Box::new(DocumentSource::new(
                &config.source.url,
                config.source.http_timeout(),
            )?)
        }
    };

    let publisher = ZmqPublisher::bind(&config.publish.endpoint, config.publish.send_hwm)?;

    log::info!("scopecast running. Press Ctrl-C to stop.");

    let mut publish_loop =
        PublishLoop::new(source, publisher, config.source.interval(), running);
    publish_loop.run()?;

    log::info!("scopecast stopped");
    Ok(())
}
