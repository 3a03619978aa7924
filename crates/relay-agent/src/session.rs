use relay_core::{Message, Role, SessionId, Timestamp};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub message_count: usize,
    pub tool_call_count: usize,
    pub iteration_count: usize,
}

/// Conversation state owned by a single invocation.
#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    created_at: Timestamp,
    messages: Vec<Message>,
    stats: SessionStats,
}

impl Session {
    pub fn new() -> Self {
        Self {
            id: SessionId::new(),
            created_at: Timestamp::now(),
            messages: Vec::new(),
            stats: SessionStats::default(),
        }
    }

    /// Replays prior `(query, reply)` pairs as user/assistant turns.
    pub fn from_history<'a>(exchanges: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut session = Self::new();
        for (query, reply) in exchanges {
            session.add_message(Message::user(query));
            session.add_message(Message::assistant(reply));
        }
        session
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn add_message(&mut self, message: Message) {
        self.stats.message_count += 1;
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Returns roughly the last `n` messages, cut at a user turn.
    ///
    /// The window always opens on a user message so tool results never lose
    /// the assistant call they answer. When no user message falls inside the
    /// last `n`, the window widens back to the most recent one.
    pub fn context_window(&self, n: usize) -> Vec<Message> {
        let cut = self.messages.len().saturating_sub(n);
        let is_user = |m: &Message| m.role == Role::User;

        let start = self.messages[cut..]
            .iter()
            .position(is_user)
            .map(|offset| cut + offset)
            .or_else(|| self.messages.iter().rposition(is_user))
            .unwrap_or(cut);

        self.messages[start..].to_vec()
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    pub fn increment_tool_calls(&mut self, count: usize) {
        self.stats.tool_call_count += count;
    }

    pub fn increment_iterations(&mut self) {
        self.stats.iteration_count += 1;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
