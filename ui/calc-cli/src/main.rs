mod commands;
mod terminal;
mod transport;

use std::path::PathBuf;
use std::rc::Rc;

use calc_client::config::DEFAULT_BASE_URL;
use calc_client::{ApiClient, CalcApp, ClientConfig, SessionManager};
use calc_storage::RocksDbTokenStore;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::commands::{Command, HELP};
use crate::terminal::{Prompt, TerminalUi};
use crate::transport::ReqwestTransport;

#[derive(Parser, Debug)]
#[command(name = "calc", about = "Terminal client for the calculations service")]
struct Args {
    /// Service base URL.
    #[arg(long, env = "CALC_API_URL", default_value = DEFAULT_BASE_URL)]
    api_url: String,

    /// Directory holding the persisted access token.
    #[arg(long, env = "CALC_STATE_DIR", default_value = ".calc-client")]
    state_dir: PathBuf,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = ClientConfig::new(&args.api_url);
    info!(
        base_url = %config.base_url,
        state_dir = %args.state_dir.display(),
        "starting calc client"
    );

    let store = RocksDbTokenStore::open_default(&args.state_dir)?;
    let api = ApiClient::new(config, ReqwestTransport::new());
    let prompt = Rc::new(Prompt::stdin());
    let app = CalcApp::new(
        SessionManager::new(api, store),
        TerminalUi::new(prompt.clone()),
    );

    app.start().await;

    while let Some(line) = prompt.read_line("calc> ").await {
        match commands::parse(&line) {
            Ok(Command::Event(event)) => app.handle(event).await,
            Ok(Command::Help) => println!("{HELP}"),
            Ok(Command::Quit) => break,
            Ok(Command::Empty) => {}
            Err(message) => eprintln!("{message}"),
        }
    }

    Ok(())
}
