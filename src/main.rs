//! bracket-console entrypoint: the interactive queue console, or the HTTP facade with `--serve`.

use std::{io, net::SocketAddr, path::PathBuf, sync::Arc};

use anyhow::Context;
use axum::Router;
use clap::Parser;
use tokio::{io::BufReader, net::TcpListener};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use bracket_console::{
    config::{AppConfig, tournament_key},
    console::Console,
    dao::{bracket::BracketClient, memory::InMemoryBracket},
    routes,
    state::{AppState, Session, SharedState, queue::RefreshOutcome},
};

#[derive(Parser, Debug)]
#[command(
    name = "bracket-console",
    about = "Show the queue of matches to call and report results to Challonge",
    version
)]
struct Cli {
    #[arg(
        value_name = "TOURNEY",
        required_unless_present = "demo",
        help = "Bracket URL or tournament key, e.g. https://challonge.com/weekly42"
    )]
    tourney: Option<String>,

    #[arg(
        long,
        value_name = "PATH",
        help = "Config file holding Challonge credentials (default: config/app.json)"
    )]
    config: Option<PathBuf>,

    #[arg(long, help = "Run against a built-in four-player round robin instead of Challonge")]
    demo: bool,

    #[arg(long, help = "Serve the HTTP facade instead of the interactive console")]
    serve: bool,

    #[arg(long, env = "PORT", default_value_t = 8080, help = "Port for --serve")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.serve { "info,tower_http=debug" } else { "warn" });

    let client = build_client(&cli)?;
    let (session, outcome) = Session::open(client)
        .await
        .context("loading bracket from the remote service")?;
    info!(open = outcome.open, total = outcome.total, "bracket loaded");

    if cli.serve {
        serve(session, cli.port).await
    } else {
        run_console(session, outcome).await
    }
}

fn build_client(cli: &Cli) -> anyhow::Result<Arc<dyn BracketClient>> {
    if cli.demo {
        info!("using the in-memory demo bracket");
        return Ok(Arc::new(InMemoryBracket::demo()));
    }

    let tourney = cli
        .tourney
        .as_deref()
        .context("a bracket URL or tournament key is required")?;
    let tournament = tournament_key(tourney)?;
    let config = AppConfig::load(cli.config.as_deref())?;
    challonge_client(config, tournament)
}

#[cfg(feature = "challonge")]
fn challonge_client(config: AppConfig, tournament: String) -> anyhow::Result<Arc<dyn BracketClient>> {
    use bracket_console::dao::challonge::{ChallongeClient, ChallongeConfig};

    info!(%tournament, "connecting to Challonge");
    let mut challonge = ChallongeConfig::new(config.username, config.api_key, tournament);
    if let Some(base_url) = config.base_url {
        challonge = challonge.with_base_url(base_url);
    }
    let client = ChallongeClient::new(challonge).context("building Challonge client")?;
    Ok(Arc::new(client))
}

#[cfg(not(feature = "challonge"))]
fn challonge_client(_config: AppConfig, _tournament: String) -> anyhow::Result<Arc<dyn BracketClient>> {
    anyhow::bail!("built without the `challonge` feature; only --demo is available")
}

async fn run_console(session: Session, outcome: RefreshOutcome) -> anyhow::Result<()> {
    let input = BufReader::new(tokio::io::stdin());
    let mut console = Console::new(session, input, io::stdout());
    console.announce(&outcome)?;
    console.run().await.context("console input/output failed")?;
    Ok(())
}

async fn serve(session: Session, port: u16) -> anyhow::Result<()> {
    let app = build_router(AppState::new(session));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, docs = routes::docs::DOCS_PATH, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Log to stderr so the console's own output on stdout stays readable.
fn init_tracing(default_filter: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut term) => {
                tokio::select! {
                    _ = tokio::signal::ctrl_c() => {},
                    _ = term.recv() => {},
                }
            }
            Err(err) => {
                warn!(error = %err, "could not install SIGTERM handler; waiting for Ctrl+C only");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
