use crate::config::Config;
use crate::conversation::{Message, Sender};
use crate::coordinator::{ChatEvent, Coordinator, Notice, ThinkingTime};
use crate::quick_actions::{self, QuickAction};
use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use std::borrow::Cow::{self, Borrowed, Owned};
use std::io::{self, Write};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::warn;

const PROMPT: &str = ">> ";
const HEADER_TITLE: &str = "Campus AI Assistant";
const HEADER_TAGLINE: &str = "Your 24/7 campus information companion";
const TYPING_FRAMES: [&str; 3] = ["●", "● ●", "● ● ●"];

/// REPL helper providing completion, highlighting, and hints for the
/// quick-action slash commands.
struct ReplHelper {
    commands: Vec<String>,
}

impl ReplHelper {
    fn new() -> Self {
        let mut commands: Vec<String> = quick_actions::CATALOGUE
            .iter()
            .map(|action| format!("/{}", action.id))
            .collect();
        commands.push("/actions".to_string());
        Self { commands }
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ReplHelper {}

#[derive(Debug)]
enum LineKind<'a> {
    Text(&'a str),
    QuickAction(&'static QuickAction),
    ListActions,
    UnknownCommand,
}

/// Slash input is a button press, not text: a known id submits its preset
/// query, an unknown one is reported and never reaches the responder.
fn classify_line(line: &str) -> LineKind<'_> {
    let command = match line.strip_prefix('/') {
        Some(rest) => rest.trim(),
        None => return LineKind::Text(line),
    };
    if command == "actions" {
        return LineKind::ListActions;
    }
    match quick_actions::find(command) {
        Some(action) => LineKind::QuickAction(action),
        None => LineKind::UnknownCommand,
    }
}

/// Carriage-return dot animation shown while a reply is pending.
struct TypingIndicator {
    label: String,
    active: bool,
    frame: usize,
}

impl TypingIndicator {
    fn new(label: &str) -> Self {
        Self {
            label: label.to_string(),
            active: false,
            frame: 0,
        }
    }

    fn start(&mut self) {
        self.active = true;
        self.frame = 0;
        self.draw();
    }

    fn advance(&mut self) {
        if self.active {
            self.frame += 1;
            self.draw();
        }
    }

    fn draw(&self) {
        let dots = TYPING_FRAMES[self.frame % TYPING_FRAMES.len()];
        print!(
            "\r{} {}",
            self.label.bright_black(),
            format!("{dots:<5}").bright_black()
        );
        let _ = io::stdout().flush();
    }

    fn clear(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let width = self.label.chars().count() + 6;
        print!("\r{}\r", " ".repeat(width));
        let _ = io::stdout().flush();
    }
}

pub async fn run(config: Config) -> Result<()> {
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let (submissions_tx, submissions_rx) = mpsc::unbounded_channel::<String>();

    let thinking = ThinkingTime {
        min_ms: config.coordinator.thinking_min_ms,
        max_ms: config.coordinator.thinking_max_ms,
    };
    let coordinator = Coordinator::new(thinking, events_tx);

    print_banner();
    print_quick_actions();
    for message in coordinator.conversation().messages() {
        render_message(message, &config);
    }

    let coordinator_task = tokio::spawn(coordinator.run(submissions_rx));

    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    loop {
        let readline = rl.readline(PROMPT);

        match readline {
            Ok(line) => {
                let trimmed = line.trim();

                if trimmed == "quit" || trimmed == "exit" {
                    println!("{}", "Goodbye!".bright_green());
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                let text = match classify_line(trimmed) {
                    LineKind::Text(text) => text.to_string(),
                    LineKind::QuickAction(action) => {
                        println!("{}", format!("[{}]", action.label).bright_magenta());
                        action.query.to_string()
                    }
                    LineKind::ListActions => {
                        print_quick_actions();
                        continue;
                    }
                    LineKind::UnknownCommand => {
                        println!("{}", "Unknown command".bright_black());
                        continue;
                    }
                };

                if submissions_tx.send(text).is_err() {
                    warn!("coordinator stopped, leaving chat");
                    break;
                }
                if !drain_cycle(&mut events_rx, &config).await {
                    warn!("event stream closed, leaving chat");
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type 'quit' to exit.".yellow());
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "CTRL-D detected. Exiting...".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        }
    }

    drop(submissions_tx);
    let _ = coordinator_task.await;

    Ok(())
}

/// Renders one submission cycle from the event stream: the echoed user
/// message, the animated typing line for as long as the coordinator is
/// thinking, the bot reply, and the closing notice. Returns false when the
/// stream closes early.
async fn drain_cycle(
    events_rx: &mut mpsc::UnboundedReceiver<ChatEvent>,
    config: &Config,
) -> bool {
    let mut indicator = TypingIndicator::new(&config.assistant.name);
    let mut ticker = tokio::time::interval(Duration::from_millis(250));

    loop {
        tokio::select! {
            event = events_rx.recv() => match event {
                Some(ChatEvent::MessageAppended(message)) => {
                    indicator.clear();
                    render_message(&message, config);
                }
                Some(ChatEvent::Typing(true)) => indicator.start(),
                Some(ChatEvent::Typing(false)) => indicator.clear(),
                Some(ChatEvent::Notified(notice)) => {
                    indicator.clear();
                    render_notice(&notice);
                    return true;
                }
                None => {
                    indicator.clear();
                    return false;
                }
            },
            _ = ticker.tick() => indicator.advance(),
        }
    }
}

fn print_banner() {
    println!("{}", format!("=== {HEADER_TITLE} ===").bright_magenta().bold());
    println!("{}", HEADER_TAGLINE.bright_black());
    println!(
        "{}",
        "Ask about schedules, facilities, dining, library services... \
         Type '/' for quick questions, 'quit' to exit."
            .bright_black()
    );
    println!();
}

fn print_quick_actions() {
    println!("{}", "Quick Questions".bold());
    for action in &quick_actions::CATALOGUE {
        println!(
            "  {} {:<17} {}",
            format!("/{:<11}", action.id).bright_cyan(),
            action.label,
            action.query.bright_black()
        );
    }
    println!();
}

fn render_message(message: &Message, config: &Config) {
    let label = match message.sender {
        Sender::Bot => config.assistant.name.as_str(),
        Sender::User => "You",
    };
    let header = if config.ui.timestamps {
        format!("{} · {}", label, message.timestamp.format("%H:%M"))
    } else {
        label.to_string()
    };
    println!("{}", header.bright_black());
    for line in message.content.lines() {
        match message.sender {
            Sender::Bot => println!("{}", line.bright_blue()),
            Sender::User => println!("{}", line.green()),
        }
    }
    println!();
}

fn render_notice(notice: &Notice) {
    println!(
        "{}",
        format!("{}: {}", notice.title, notice.description).bright_black()
    );
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_passes_through() {
        assert!(matches!(
            classify_line("where is the gym"),
            LineKind::Text("where is the gym")
        ));
    }

    #[test]
    fn test_known_slash_maps_to_preset_query() {
        match classify_line("/dining") {
            LineKind::QuickAction(action) => {
                assert_eq!(action.query, "What are the dining hall hours today?");
            }
            other => panic!("expected quick action, got {other:?}"),
        }
    }

    #[test]
    fn test_slash_id_tolerates_surrounding_spaces() {
        assert!(matches!(
            classify_line("/ events"),
            LineKind::QuickAction(action) if action.id == "events"
        ));
    }

    #[test]
    fn test_unknown_slash_is_not_submitted() {
        assert!(matches!(classify_line("/parking"), LineKind::UnknownCommand));
    }

    #[test]
    fn test_actions_command_lists_catalogue() {
        assert!(matches!(classify_line("/actions"), LineKind::ListActions));
    }

    #[test]
    fn test_helper_knows_every_quick_action() {
        let helper = ReplHelper::new();
        assert_eq!(helper.commands.len(), quick_actions::CATALOGUE.len() + 1);
        for action in &quick_actions::CATALOGUE {
            assert!(helper.commands.contains(&format!("/{}", action.id)));
        }
    }
}
