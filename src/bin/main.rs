use finance_chat_assistant::{
    config::ChatConfig,
    display::DisplaySurface,
    ledger::{InMemoryLedger, TransactionSource},
    session::ChatSession,
};
use std::io::Write;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Terminal rendering with a typing pause before assistant messages
struct TerminalDisplay {
    typing_delay: Duration,
}

#[async_trait::async_trait]
impl DisplaySurface for TerminalDisplay {
    async fn show(&mut self, text: &str, is_user: bool) {
        if is_user {
            println!("You: {}", text);
            return;
        }

        if !self.typing_delay.is_zero() {
            print!("Assistant is typing...");
            std::io::stdout().flush().ok();
            tokio::time::sleep(self.typing_delay).await;
            print!("\r\x1b[2K");
        }
        println!("Assistant: {}\n", text);
    }
}

fn print_banner(session: &ChatSession) {
    println!("=== Finance Chat ===");
    println!("Signed in as {}", session.user_name());
    println!("Commands: /toggle, /history, /prefs, /quit\n");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let config = ChatConfig::from_env()?;

    let ledger: Box<dyn TransactionSource> = match &config.ledger_path {
        Some(path) => Box::new(InMemoryLedger::load(path, &config.currency).await?),
        None => Box::new(InMemoryLedger::new(config.currency.clone())),
    };

    let mut session = ChatSession::new(config.user_name.clone());
    let mut display = TerminalDisplay {
        typing_delay: config.typing_delay,
    };

    info!(session_id = %session.session_id(), "Terminal chat started");
    print_banner(&session);
    println!("[chat hidden, type /toggle to open]");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        match line.trim() {
            "/quit" | "/exit" => break,
            "/toggle" => {
                let visible = session.toggle();
                println!("[chat {}]", if visible { "open" } else { "hidden" });
            }
            "/history" => print!("{}", session.history().get_formatted_transcript()),
            "/prefs" => println!("{}", serde_json::to_string_pretty(session.preferences())?),
            _ if !session.is_visible() => {
                println!("[chat hidden, type /toggle to open]");
            }
            input => {
                session.submit(input, ledger.as_ref(), &mut display).await;
            }
        }
    }

    info!(turns = session.history().len(), "Terminal chat finished");
    Ok(())
}
