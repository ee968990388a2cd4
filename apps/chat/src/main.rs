use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use dotenv::dotenv;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_cell::services::session::HELP_TEXT;
use agent_cell::{ChatSession, ClinicalAgent, OpenAiCompletionService, SessionReply};
use conversation_cell::ConversationStore;
use registry_cell::Registry;
use shared_config::AppConfig;

#[derive(Parser)]
#[command(name = "clinic-agent-chat")]
#[command(about = "Clinical assistant with per-patient conversation memory", long_about = None)]
struct Cli {
    /// Directory holding per-patient transcripts
    #[arg(short = 'd', long)]
    conversation_dir: Option<PathBuf>,

    /// Text generation model to use
    #[arg(short = 'M', long)]
    model: Option<String>,

    /// Single message to send, then exit
    #[arg(short = 'm', long)]
    message: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::from_env();
    if let Some(dir) = cli.conversation_dir {
        config.conversation_dir = dir;
    }
    if let Some(model) = cli.model {
        config.openai_model = model;
    }

    info!("Conversation directory: {}", config.conversation_dir.display());

    let agent = ClinicalAgent::new(Arc::new(OpenAiCompletionService::new(&config)));
    let mut session = ChatSession::new(
        agent,
        Registry::seeded(),
        ConversationStore::new(config.conversation_dir.clone()),
    );

    if let Some(message) = cli.message {
        if let SessionReply::Text(reply) = session.handle_line(&message).await {
            println!("{reply}");
        }
        return Ok(());
    }

    print_banner();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("You: ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match session.handle_line(&line).await {
            SessionReply::Quit => break,
            SessionReply::Nothing => continue,
            SessionReply::Text(reply) => println!("\nAgent: {reply}\n"),
        }
    }

    println!("\nGoodbye!");
    Ok(())
}

fn print_banner() {
    let rule = "=".repeat(60);
    println!("\n{rule}");
    println!("Clinical AI Assistant - Patient Memory System");
    println!("Persistent conversation history per patient");
    println!("{rule}\n");
    println!("{HELP_TEXT}");
    println!("{rule}\n");
}
