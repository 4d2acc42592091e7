mod cli;
mod commands;
mod render;

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use dashboard::{Config, CreatePolicy, HttpClient, NavMenu, Registry};

use crate::cli::{Cli, CliError, Command};
use crate::commands::Context;
use crate::render::TerminalNotifier;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let env_file = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    match env_file {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = Config::from_env()?;
    if let Some(base_url) = cli.base_url {
        config.api_base_url = base_url;
    }
    if cli.reload_after_create {
        config.create_policy = CreatePolicy::AppendThenReload;
    }

    let menu = NavMenu::standard()?;
    let registry = Registry::standard()?;
    registry.check_routes(&menu)?;

    let client = HttpClient::new(&config.api_base_url, config.request_timeout)?;
    tracing::debug!(base_url = %client.base_url(), policy = ?config.create_policy, "backoffice ready");

    let ctx = Context {
        menu: &menu,
        registry: &registry,
        transport: Arc::new(client),
        policy: config.create_policy,
        notifier: &TerminalNotifier,
    };
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Menu => commands::menu(&ctx, &mut out),
        Command::Resources => commands::resources(&ctx, &mut out),
        Command::List(args) => commands::list(&ctx, &args, &mut out).await,
        Command::Create(args) => commands::create(&ctx, &args, &mut out).await,
        Command::Export(args) => commands::export(&ctx, &args, &mut out).await,
    }
}
