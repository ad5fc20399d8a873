use anyhow::Context;
use clap::{Parser, Subcommand};
use psitone_core::{Credentials, PsitoneConfig};
use psitone_gateway::GatewayServer;
use psitone_memory::Conversation;
use psitone_reasoning::{providers, PromptSynthesizer, ResponseEngine};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod chat;

#[derive(Parser, Debug)]
#[command(name = "psitone", author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config file (missing file means defaults)
    #[arg(short, long, default_value = "psitone.toml", env = "PSITONE_CONFIG")]
    config: PathBuf,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the HTTP API (default)
    Serve {
        /// Override the configured bind host
        #[arg(long)]
        host: Option<String>,
        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },
    /// Talk to the assistant from the terminal
    Chat(chat::ChatArgs),
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_tracing(args.log_json);

    info!("Initializing Psitone...");
    let config = PsitoneConfig::load_or_default(&args.config);

    // Fail fast: a missing credential stops the process before anything binds.
    let credentials = Credentials::resolve(&config.llm)?;
    let gateway = providers::create_gateway(&config.llm, &credentials)
        .context("Failed to initialize generation gateway")?;

    let engine = Arc::new(ResponseEngine::new(
        gateway,
        PromptSynthesizer::new(config.persona.identity.as_str()),
        config.llm.timeout(),
    ));
    let conversation = Arc::new(Conversation::new());
    info!(conversation = %conversation.id(), "Conversation started");

    match args.command.unwrap_or(Command::Serve {
        host: None,
        port: None,
    }) {
        Command::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            GatewayServer::new(engine, conversation, &host, port)
                .serve()
                .await
        }
        Command::Chat(chat_args) => chat::run(engine, conversation, chat_args).await,
    }
}
