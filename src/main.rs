use std::sync::Arc;

use clap::Parser;
use mechanic_chat::config::{ChatConfig, ConfigError, ConfigOverrides};
use mechanic_chat::net::{HttpQueryClient, QueryError};
use mechanic_chat::repl::{self, ReplCommand};
use mechanic_chat::state::{SessionStore, SharedStore, StoreSnapshot};
use mechanic_chat::submit::ChatController;
use mechanic_chat::view::{self, TerminalView};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::JoinHandle;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("query client error: {0}")]
    Query(#[from] QueryError),
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "mechanic-chat", about = "Terminal chat client for the Mechanic AI assistant")]
struct Cli {
    /// Query endpoint (overrides MECHANIC_CHAT_ENDPOINT).
    #[arg(long)]
    endpoint: Option<String>,

    /// Give up on a query after this many seconds (default: wait forever).
    #[arg(long)]
    request_timeout_secs: Option<u64>,

    #[arg(long)]
    connect_timeout_secs: Option<u64>,

    /// Log debug output to stderr.
    #[arg(short, long, default_value_t = false)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let config = ChatConfig::from_env()?.with_overrides(ConfigOverrides {
        endpoint: cli.endpoint,
        request_timeout_secs: cli.request_timeout_secs,
        connect_timeout_secs: cli.connect_timeout_secs,
    })?;
    let client = HttpQueryClient::new(&config)?;
    tracing::info!(endpoint = %config.endpoint, "mechanic-chat starting");

    let store = SharedStore::new(SessionStore::new());
    let chat = ChatController::new(store.clone(), Arc::new(client));

    println!("{}", view::render_sidebar(&store.snapshot()));
    println!("type /help for commands");
    let renderer = spawn_renderer(store.subscribe());

    run_repl(&chat).await?;

    renderer.abort();
    Ok(())
}

async fn run_repl(chat: &ChatController) -> Result<(), AppError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match repl::parse_command(&line) {
            ReplCommand::NewChat => {
                chat.new_chat();
            }
            ReplCommand::ListChats => {
                print!("{}", view::render_sidebar(&sidebar_snapshot(chat)));
            }
            ReplCommand::Select(index) => {
                if let Err(e) = chat.select_chat(index) {
                    println!("! {e}");
                }
            }
            ReplCommand::ToggleSidebar => {
                chat.toggle_sidebar();
                print!("{}", view::render_sidebar(&chat.store().snapshot()));
            }
            ReplCommand::Help => println!("{}", repl::HELP),
            ReplCommand::Quit => break,
            ReplCommand::Submit(text) => {
                chat.set_draft(text);
                let _ = chat.submit_draft();
            }
            ReplCommand::Invalid(msg) => println!("! {msg}"),
        }
    }
    Ok(())
}

/// Snapshot for `/chats`: always lists chats, even with the sidebar hidden.
fn sidebar_snapshot(chat: &ChatController) -> StoreSnapshot {
    let mut snapshot = chat.store().snapshot();
    snapshot.sidebar_visible = true;
    snapshot
}

fn spawn_renderer(mut rx: watch::Receiver<StoreSnapshot>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut view = TerminalView::new();
        loop {
            let lines = {
                let snapshot = rx.borrow_and_update();
                view.update(&snapshot)
            };
            for line in lines {
                println!("{line}");
            }
            if rx.changed().await.is_err() {
                break;
            }
        }
    })
}
