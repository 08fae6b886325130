use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use deskflow_core::config::AppConfig;
use deskflow_core::traits::CompletionClient;
use deskflow_engine::ServiceState;
use deskflow_gateway::GatewayServer;

#[derive(Parser)]
#[command(name = "deskflow", version, about = "Customer support triage workflow service")]
struct Cli {
    /// Path to config file
    #[arg(short, long, default_value = "deskflow.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Serve,
    /// Run a single query through the workflow and print the result
    Run {
        /// The customer query to triage
        #[arg(trailing_var_arg = true)]
        query: Vec<String>,
    },
    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("deskflow=info,warn")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load(&cli.config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Config => {
            println!("{}", toml::to_string_pretty(&config)?);
        }
        Commands::Run { query } => {
            let query = query.join(" ");
            if query.trim().is_empty() {
                anyhow::bail!("query must not be empty");
            }
            match initialize_service(&config).await {
                ServiceState::Ready(service) => {
                    let result = service.handle(&query).await;
                    println!("{}", serde_json::to_string_pretty(&result)?);
                }
                ServiceState::NotReady { reason } => {
                    anyhow::bail!("workflow not initialized: {}", reason);
                }
            }
        }
        Commands::Serve => {
            let state = initialize_service(&config).await;
            if !state.is_ready() {
                error!("Workflow initialization failed, serving degraded");
            }

            let server = GatewayServer::new(config.gateway.clone(), state);
            let cancel = CancellationToken::new();
            let cancel_clone = cancel.clone();

            // Graceful shutdown on Ctrl-C
            tokio::spawn(async move {
                tokio::signal::ctrl_c().await.ok();
                info!("Shutting down gateway...");
                cancel_clone.cancel();
            });

            server.run(cancel).await?;
        }
    }

    Ok(())
}

/// Build the completion client and probe it once before handling requests.
async fn initialize_service(config: &AppConfig) -> ServiceState {
    let has_key = config
        .model
        .api_key
        .as_deref()
        .is_some_and(|k| !k.is_empty());
    // A custom base_url (Ollama, vLLM) may not need a key.
    if !has_key && config.model.base_url.is_none() {
        error!("OpenAI API key not configured");
        return ServiceState::NotReady {
            reason: "OpenAI API key not configured".to_string(),
        };
    }

    info!("Starting up customer support workflow...");
    let client: Arc<dyn CompletionClient> = deskflow_llm::create_client(&config.model);
    ServiceState::initialize(client).await
}
