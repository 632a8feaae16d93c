mod app_state;
mod cli;
mod host;
mod native;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use splitview_common::{ScreenRect, SplitViewError};
use splitview_config::{LogLevel, ReloadManager, SplitViewConfig};
use splitview_framing::{assess, AssessMode, HttpProbe};
use splitview_session::{FileStore, MemoryStore, SnapshotStore};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use app_state::{frame_resolver, SplitViewApp};
use cli::CliCommand;
use native::NativeHost;

/// Tracing targets that make up this workspace.
const CRATE_TARGETS: [&str; 6] = [
    "splitview",
    "splitview_common",
    "splitview_config",
    "splitview_framing",
    "splitview_session",
    "splitview_tiling",
];

/// Filter directives for a `--log-level` value or the configured level.
///
/// A bare level applies to every workspace crate; anything containing
/// `=` or `,` is taken as a full filter.
fn log_directives(cli: Option<&str>, configured: LogLevel) -> Vec<String> {
    match cli.map(str::trim) {
        Some(raw) if raw.contains('=') || raw.contains(',') => raw
            .split(',')
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string)
            .collect(),
        Some(level) if !level.is_empty() => CRATE_TARGETS
            .iter()
            .map(|target| format!("{target}={level}"))
            .collect(),
        _ => CRATE_TARGETS
            .iter()
            .map(|target| format!("{target}={}", configured.as_directive()))
            .collect(),
    }
}

fn init_logging(cli: Option<&str>, configured: LogLevel) {
    let mut filter = EnvFilter::from_default_env();
    for directive in log_directives(cli, configured) {
        match directive.parse() {
            Ok(d) => filter = filter.add_directive(d),
            Err(e) => eprintln!("ignoring log directive '{directive}': {e}"),
        }
    }
    // stdout carries native messaging frames.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

fn main() -> ExitCode {
    let args = cli::parse();

    let config_path = args
        .config
        .clone()
        .or_else(|| splitview_config::toml_loader::default_config_path().ok());
    let loaded = match &config_path {
        Some(path) => splitview_config::load_config_from(path),
        None => Ok(SplitViewConfig::default()),
    };
    let (config, load_error) = match loaded {
        Ok(config) => (config, None),
        Err(e) => (SplitViewConfig::default(), Some(e)),
    };

    init_logging(args.log_level.as_deref(), config.logging.level);
    tracing::info!("splitview v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(e) = load_error {
        tracing::warn!("Config load failed, using defaults: {e}");
    }
    if !args.caller.is_empty() {
        tracing::info!(caller = ?args.caller, "launched by browser");
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let command = args.command.unwrap_or(CliCommand::Serve);
    match runtime.block_on(run(command, config, config_path)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(
    command: CliCommand,
    config: SplitViewConfig,
    config_path: Option<PathBuf>,
) -> Result<(), SplitViewError> {
    match command {
        CliCommand::Serve => serve(config, config_path).await,
        CliCommand::Probe { urls } => probe(&config, &urls).await,
        CliCommand::Plan { n, size, left, top } => {
            let rects = splitview_tiling::plan(n, ScreenRect::new(left, top, size.0, size.1));
            print_json(&rects)
        }
        CliCommand::Config => {
            println!("{}", splitview_config::config_to_json(&config));
            Ok(())
        }
    }
}

fn http_probe(config: &SplitViewConfig) -> Result<HttpProbe, SplitViewError> {
    HttpProbe::new(&config.framing.user_agent)
        .map_err(|e| SplitViewError::ProbeFailure(e.to_string()))
}

async fn serve(
    config: SplitViewConfig,
    config_path: Option<PathBuf>,
) -> Result<(), SplitViewError> {
    let probe = http_probe(&config)?;
    let store: Arc<dyn SnapshotStore> = match FileStore::default_dir() {
        Ok(dir) => Arc::new(FileStore::new(dir)),
        Err(e) => {
            tracing::warn!("no data directory, state will not be persisted: {e}");
            Arc::new(MemoryStore::new())
        }
    };

    let (host, outbound_rx) = NativeHost::channel();
    let mut app = SplitViewApp::new(config, Arc::new(probe), Arc::new(host.clone()), store);
    let updates = match config_path {
        Some(path) => {
            app = app.with_config_path(path.clone());
            let (_, rx) = ReloadManager::start(path).await;
            Some(rx)
        }
        None => None,
    };
    app.restore();

    native::serve(
        app,
        host,
        outbound_rx,
        tokio::io::stdin(),
        tokio::io::stdout(),
        updates,
    )
    .await;
    Ok(())
}

async fn probe(config: &SplitViewConfig, urls: &[String]) -> Result<(), SplitViewError> {
    let resolver = frame_resolver(config, Arc::new(http_probe(config)?));

    let assessment = assess(&resolver, urls, AssessMode::Complete, &CancellationToken::new())
        .await
        .map_err(|e| SplitViewError::ProbeFailure(e.to_string()))?;
    let report: Vec<serde_json::Value> = urls
        .iter()
        .zip(assessment.verdicts)
        .map(|(url, verdict)| serde_json::json!({ "url": url, "verdict": verdict }))
        .collect();
    print_json(&report)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), SplitViewError> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| SplitViewError::Other(e.to_string()))?;
    println!("{text}");
    Ok(())
}
