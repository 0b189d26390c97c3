use anyhow::{Context as AnyhowContext, Result};
use clap::{Args, Parser, Subcommand};
use config::{BuildInfo, Config, ConfigOverrides};
use fixphrase_core::{decode, encode};
use fixphrase_protocol::{serialize_json_pretty, DecodeEnvelope};
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub mod config;
pub mod http_api;
pub mod wordlist;

/// Time allowed for in-flight requests to drain after a shutdown signal
const SHUTDOWN_GRACE: Duration = Duration::from_secs(10);

fn print_stdout(text: &str) -> Result<()> {
    use std::io::Write;

    let mut stdout = io::stdout().lock();
    if let Err(err) = stdout
        .write_all(text.as_bytes())
        .and_then(|_| stdout.flush())
    {
        if err.kind() == io::ErrorKind::BrokenPipe {
            return Ok(());
        }
        return Err(err.into());
    }
    Ok(())
}

#[derive(Parser)]
#[command(name = "fixphrase")]
#[command(about = "Encode coordinates as four-word phrases and back", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for JSON)
    #[arg(long, global = true)]
    quiet: bool,

    /// Word list JSON file (overrides FIXPHRASE_WORDLIST)
    #[arg(long, global = true)]
    wordlist: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the encode/decode HTTP API
    Serve(ServeArgs),

    /// Encode a coordinate into a phrase
    Encode(EncodeArgs),

    /// Decode a phrase of two to four words
    Decode(DecodeArgs),
}

#[derive(Args)]
struct ServeArgs {
    /// Bind address, e.g. 127.0.0.1:7080 or :7080 (overrides ADDR)
    #[arg(long)]
    addr: Option<String>,
}

#[derive(Args)]
struct EncodeArgs {
    /// Latitude in decimal degrees
    #[arg(allow_negative_numbers = true)]
    lat: f64,

    /// Longitude in decimal degrees
    #[arg(allow_negative_numbers = true)]
    lon: f64,
}

#[derive(Args)]
struct DecodeArgs {
    /// Phrase words, in any order
    #[arg(required = true, num_args = 1..)]
    words: Vec<String>,
}

pub async fn main_entry() -> Result<()> {
    let cli = Cli::parse();

    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();

    let addr = match &cli.command {
        Commands::Serve(args) => args.addr.clone(),
        _ => None,
    };
    let config = Config::from_env(ConfigOverrides {
        addr,
        wordlist: cli.wordlist.clone(),
    });

    match cli.command {
        Commands::Serve(_) => serve(config).await?,
        Commands::Encode(args) => run_encode(args, &config)?,
        Commands::Decode(args) => run_decode(args, &config)?,
    }

    Ok(())
}

fn run_encode(args: EncodeArgs, config: &Config) -> Result<()> {
    let dictionary = wordlist::load_dictionary(&config.wordlist)?;
    let encoded = encode(&dictionary, args.lat, args.lon)?;
    print_stdout(&serialize_json_pretty(&encoded)?)
}

fn run_decode(args: DecodeArgs, config: &Config) -> Result<()> {
    let dictionary = wordlist::load_dictionary(&config.wordlist)?;
    let decoded = decode(&dictionary, &args.words.join(" "))?;
    print_stdout(&serialize_json_pretty(&DecodeEnvelope::from(decoded))?)
}

async fn serve(config: Config) -> Result<()> {
    let build = BuildInfo::current();
    let dictionary = wordlist::load_dictionary(&config.wordlist)?;

    log::info!("starting {}", config.server_name);
    log::info!("repo: {}", config.repo_url);
    log::info!("image: {}", config.ghcr_image);
    log::info!("version={} commit={}", build.version, build.commit);

    let listener = tokio::net::TcpListener::bind(&config.addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.addr))?;
    let local_addr = listener.local_addr()?;

    let state = Arc::new(http_api::AppState::new(dictionary, config, build));
    let app = http_api::build_router(state);

    let (stop_tx, stop_rx) = tokio::sync::oneshot::channel::<()>();
    let server = axum::serve(listener, app).with_graceful_shutdown(async move {
        shutdown_signal().await;
        log::info!("shutdown requested");
        let _ = stop_tx.send(());
    });
    let mut server = tokio::spawn(async move { server.await });
    log::info!(
        "listening on {local_addr} (version={} commit={})",
        build.version,
        build.commit
    );

    // Resolves on a shutdown signal, or early if the server task exits on its own.
    let _ = stop_rx.await;
    match tokio::time::timeout(SHUTDOWN_GRACE, &mut server).await {
        Ok(joined) => joined.context("server task panicked")??,
        Err(_) => {
            log::warn!(
                "graceful shutdown did not finish within {}s; closing",
                SHUTDOWN_GRACE.as_secs()
            );
            server.abort();
        }
    }
    log::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            log::warn!("Failed to listen for Ctrl+C: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                log::warn!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
