//! Recipecast server - recipe, narration, and illustration in the browser.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use recipecast::ExecutionMode;
use recipecast_web::config::IssueLevel;
use recipecast_web::{AppError, AppState, build_pipeline, build_router, load_config, mock_pipeline};
use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Recipe generator web server
#[derive(Parser)]
#[command(name = "recipecast-web")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path
    #[arg(short, long, env = "RECIPECAST_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on (overrides config)
    #[arg(short, long)]
    listen: Option<SocketAddr>,

    /// Run the image call alongside the recipe and narration
    #[arg(long)]
    concurrent: bool,

    /// Serve canned artifacts instead of calling the backends
    #[arg(long)]
    mock: bool,
}

fn main() -> ExitCode {
    // .env feeds both clap's env fallbacks and the config overrides.
    let dotenv_path = dotenv::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("failed to create tokio runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    match rt.block_on(run(cli)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Initialize logging with the given verbosity level.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "recipecast_web={level},recipecast={level},tower_http={},{}",
            if verbosity >= 1 { "debug" } else { "info" },
            if verbosity >= 2 { "debug" } else { "warn" }
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(verbosity >= 2)
        .init();
}

/// Main async entry point.
async fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = load_config(cli.config.as_deref()).await?;

    if let Some(listen) = cli.listen {
        config.server.listen = listen;
    }
    if cli.concurrent {
        config.pipeline.mode = ExecutionMode::Concurrent;
    }

    let issues = config.validate();
    for issue in &issues {
        match issue.level {
            IssueLevel::Error => tracing::error!("{issue}"),
            IssueLevel::Warning if !cli.mock => tracing::warn!("{issue}"),
            IssueLevel::Warning => {}
        }
    }
    if !config.is_valid() {
        return Err(recipecast_web::ConfigError::InvalidValue(
            "configuration has errors, see above".to_owned(),
        )
        .into());
    }

    let pipeline = if cli.mock {
        mock_pipeline(&config)
    } else {
        build_pipeline(&config)?
    };
    let app = build_router(AppState::new(pipeline)?);

    let listener = tokio::net::TcpListener::bind(config.server.listen).await?;
    tracing::info!(addr = %listener.local_addr()?, "recipecast listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down");
        })
        .await?;

    Ok(())
}
