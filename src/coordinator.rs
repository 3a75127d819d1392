use crate::conversation::{Conversation, Message};
use crate::responder;
use rand::Rng;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::debug;

pub const NOTICE_TITLE: &str = "Response received";
pub const NOTICE_DESCRIPTION: &str = "Campus AI has responded to your query";

/// Simulated thinking time, sampled per reply from `[min_ms, max_ms)`.
/// A zero range disables the pause, which is what tests use.
#[derive(Debug, Clone, Copy)]
pub struct ThinkingTime {
    pub min_ms: u64,
    pub max_ms: u64,
}

impl ThinkingTime {
    pub fn none() -> Self {
        Self { min_ms: 0, max_ms: 0 }
    }

    pub fn sample(&self) -> Duration {
        if self.max_ms > self.min_ms {
            Duration::from_millis(rand::thread_rng().gen_range(self.min_ms..self.max_ms))
        } else {
            Duration::from_millis(self.min_ms)
        }
    }
}

impl Default for ThinkingTime {
    fn default() -> Self {
        Self {
            min_ms: 1000,
            max_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Notice {
    pub title: &'static str,
    pub description: &'static str,
}

/// State mutations, published in the order they happen so a front end can
/// re-render after each one.
#[derive(Debug, Clone)]
pub enum ChatEvent {
    MessageAppended(Message),
    Typing(bool),
    Notified(Notice),
}

pub struct Coordinator {
    conversation: Conversation,
    thinking: ThinkingTime,
    events_tx: mpsc::UnboundedSender<ChatEvent>,
}

impl Coordinator {
    pub fn new(thinking: ThinkingTime, events_tx: mpsc::UnboundedSender<ChatEvent>) -> Self {
        Self {
            conversation: Conversation::new(),
            thinking,
            events_tx,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// One full submission cycle: append the user message, pause for the
    /// sampled thinking time, append the canned reply, emit the notice.
    /// Empty or whitespace-only input changes nothing. Single-flight is the
    /// caller's job: `&mut self` keeps a second cycle from starting while
    /// one is in flight, and the REPL holds new input back until the
    /// pending reply lands.
    pub async fn submit(&mut self, raw_text: &str) {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!("ignoring empty submission");
            return;
        }

        let user = self.conversation.push_user(text).clone();
        self.emit(ChatEvent::MessageAppended(user));

        self.conversation.set_awaiting(true);
        self.emit(ChatEvent::Typing(self.conversation.is_awaiting_response()));

        tokio::time::sleep(self.thinking.sample()).await;

        let reply = responder::respond(text);
        match responder::categorize(text) {
            Some(category) => debug!(category = category.as_str(), "matched canned reply"),
            None => debug!("no rule matched, replying with fallback"),
        }

        let bot = self.conversation.push_bot(reply).clone();
        self.emit(ChatEvent::MessageAppended(bot));

        self.conversation.set_awaiting(false);
        self.emit(ChatEvent::Typing(self.conversation.is_awaiting_response()));

        self.emit(ChatEvent::Notified(Notice {
            title: NOTICE_TITLE,
            description: NOTICE_DESCRIPTION,
        }));
    }

    /// Drives the coordinator from a submission channel, one cycle at a
    /// time and always to completion. Returns when the channel closes.
    pub async fn run(mut self, mut submissions_rx: mpsc::UnboundedReceiver<String>) {
        while let Some(text) = submissions_rx.recv().await {
            self.submit(&text).await;
        }
    }

    fn emit(&self, event: ChatEvent) {
        // a dropped receiver just means nobody is rendering
        let _ = self.events_tx.send(event);
    }
}
