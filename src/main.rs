mod config;
mod conversation;
mod coordinator;
mod quick_actions;
mod repl;
mod responder;

use crate::config::Config;
use crate::coordinator::{Coordinator, ThinkingTime};
use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let mut args: Vec<String> = env::args().collect();
    let _bin = args.remove(0);
    if args.is_empty() {
        print_usage();
        return Ok(());
    }

    match args[0].as_str() {
        "chat" => run_chat(&args[1..]).await,
        "ask" => run_ask(&args[1..]).await,
        "actions" => {
            print_actions();
            Ok(())
        }
        "help" | "-h" | "--help" => {
            print_usage();
            Ok(())
        }
        _ => {
            print_usage();
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_chat(args: &[String]) -> Result<()> {
    let mut config_path: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                let value = args.get(i + 1).context("--config requires a value")?;
                config_path = Some(PathBuf::from(value));
                i += 2;
            }
            "--help" | "-h" => {
                print_chat_usage();
                return Ok(());
            }
            other => {
                return Err(anyhow::anyhow!("unknown chat argument: {other}"));
            }
        }
    }

    let config = Config::load_or_default(config_path.as_deref())?;
    repl::run(config).await
}

async fn run_ask(args: &[String]) -> Result<()> {
    let mut message: Option<String> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut no_delay = false;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--message" => {
                let value = args.get(i + 1).context("--message requires a value")?;
                message = Some(value.to_string());
                i += 2;
            }
            "--config" => {
                let value = args.get(i + 1).context("--config requires a value")?;
                config_path = Some(PathBuf::from(value));
                i += 2;
            }
            "--no-delay" => {
                no_delay = true;
                i += 1;
            }
            "--json" => {
                json = true;
                i += 1;
            }
            "--help" | "-h" => {
                print_ask_usage();
                return Ok(());
            }
            other => {
                return Err(anyhow::anyhow!("unknown ask argument: {other}"));
            }
        }
    }

    let message = message.context("--message is required")?;
    if message.trim().is_empty() {
        anyhow::bail!("--message must not be blank");
    }

    let config = Config::load_or_default(config_path.as_deref())?;
    let thinking = if no_delay {
        ThinkingTime::none()
    } else {
        ThinkingTime {
            min_ms: config.coordinator.thinking_min_ms,
            max_ms: config.coordinator.thinking_max_ms,
        }
    };

    // Nobody renders the event stream in one-shot mode.
    let (events_tx, events_rx) = mpsc::unbounded_channel();
    drop(events_rx);

    let mut coordinator = Coordinator::new(thinking, events_tx);
    coordinator.submit(&message).await;

    let reply = coordinator
        .conversation()
        .messages()
        .last()
        .context("no reply recorded")?;

    if json {
        println!("{}", serde_json::to_string_pretty(reply)?);
    } else {
        println!("{}", reply.content);
    }

    Ok(())
}

fn print_actions() {
    for action in &quick_actions::CATALOGUE {
        println!(
            "{} /{:<11} {:<17} {}",
            action.icon, action.id, action.label, action.query
        );
    }
}

fn print_usage() {
    eprintln!(
        "campus-assistant usage:\n  campus-assistant chat [--config <path>]\n  campus-assistant ask --message <text> [options]\n  campus-assistant actions"
    );
}

fn print_chat_usage() {
    eprintln!("campus-assistant chat options:\n  --config <path>");
}

fn print_ask_usage() {
    eprintln!(
        "campus-assistant ask options:\n  --message <text>\n  --config <path>\n  --no-delay\n  --json"
    );
}
