use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lar_api::RuntimeClient;
use lar_engine::{
    EngineError, Interact, cancel_workflow_run, get_master_key, run_trigger, select_workflow, select_workflow_run,
};
use lar_util::settings::{RunnerSettings, resolve_base_url};
use tracing::error;

mod console;

use console::ConsoleUi;

#[derive(Parser)]
#[command(name = "lar", version, about = "Browse, trigger, and cancel Azure Logic Apps workflows")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pick a workflow and run its first declared trigger
    RunTrigger,
    /// Pick a workflow, pick one of its runs, and cancel it
    CancelRun,
    /// Persist the runtime base URL used by the other commands
    SetUrl {
        /// Base URL of the Logic Apps runtime (e.g. http://localhost:7071)
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::SetUrl { url } => set_url(url),
        Command::RunTrigger => run_trigger_command().await,
        Command::CancelRun => cancel_run_command().await,
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

fn set_url(url: String) -> Result<()> {
    let store = RunnerSettings::load().context("load settings")?;
    store.set_base_url(Some(url.clone())).context("persist base URL")?;
    println!("Runtime base URL set to {url} ({})", store.path().display());
    Ok(())
}

/// Settings are resolved fresh for every command; nothing survives between
/// invocations, including the client itself.
fn build_client() -> Result<RuntimeClient> {
    let base_url = resolve_base_url()?;
    Ok(RuntimeClient::new(&base_url)?)
}

async fn run_trigger_command() -> Result<()> {
    let ui = ConsoleUi::new();
    let client = build_client()?;
    ui.notify("Logic App: run trigger started");

    let outcome = async {
        let key = get_master_key(&client, &ui).await?;
        let Some(workflow) = select_workflow(&client, &ui, &key).await? else {
            return Ok(());
        };
        run_trigger(&client, &ui, &key, &workflow).await
    }
    .await;

    finish("run-trigger", outcome)
}

async fn cancel_run_command() -> Result<()> {
    let ui = ConsoleUi::new();
    let client = build_client()?;

    let outcome = async {
        let key = get_master_key(&client, &ui).await?;
        let Some(workflow) = select_workflow(&client, &ui, &key).await? else {
            return Ok(());
        };
        let Some(run) = select_workflow_run(&client, &ui, &key, &workflow).await? else {
            return Ok(());
        };
        cancel_workflow_run(&client, &ui, &key, &workflow.name, &run).await
    }
    .await;

    finish("cancel-run", outcome)
}

/// Terminate a command. Failures were already shown to the user where they
/// were detected, so they are logged once here and not printed again.
fn finish(command: &str, outcome: Result<(), EngineError>) -> Result<()> {
    match outcome {
        Ok(()) => Ok(()),
        Err(outcome_error) => {
            error!(command, error = %outcome_error, "command failed");
            std::process::exit(1);
        }
    }
}
