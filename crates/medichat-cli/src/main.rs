use anyhow::Result;
use clap::{Parser, Subcommand};
use medichat_application::SessionController;
use medichat_client::HttpConversationClient;
use medichat_core::auth::EnvCredentialProvider;
use medichat_infrastructure::{ConfigService, FileSnapshotStore};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "medichat")]
#[command(about = "Medichat - medical assistant chat client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Open an interactive chat session
    Chat {
        /// Conversation id to resume; omitted resumes the local snapshot
        #[arg(long)]
        conversation: Option<String>,
    },
    /// List conversations
    List,
    /// Rename a conversation
    Rename {
        /// Conversation id
        id: String,
        /// New title
        title: String,
    },
    /// Delete a conversation
    Delete {
        /// Conversation id
        id: String,
    },
}

fn build_controller() -> Result<SessionController> {
    let config = ConfigService::new().get_config();
    let credentials = Arc::new(EnvCredentialProvider::new());
    let client = Arc::new(HttpConversationClient::from_config(&config, credentials));
    let snapshots = Arc::new(FileSnapshotStore::default_location()?);
    Ok(SessionController::new(client, snapshots))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let controller = build_controller()?;

    match cli.command {
        Commands::Chat { conversation } => {
            commands::chat::run(&controller, conversation.as_deref()).await?
        }
        Commands::List => commands::conversations::list(&controller).await?,
        Commands::Rename { id, title } => {
            commands::conversations::rename(&controller, &id, &title).await?
        }
        Commands::Delete { id } => commands::conversations::delete(&controller, &id).await?,
    }

    Ok(())
}
