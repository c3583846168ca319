/// Append-only text log of everything the player should be told.
///
/// Every message is mirrored to `tracing` at info level. Frontends keep a
/// cursor and read [`since`](Self::since) to render only new lines.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MessageLog {
    messages: Vec<String>,
}

impl MessageLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::info!(target: "rogue::report", "{}", message);
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Messages appended after `cursor` (a previous [`len`](Self::len)).
    pub fn since(&self, cursor: usize) -> &[String] {
        self.messages.get(cursor..).unwrap_or(&[])
    }

    pub fn last(&self) -> Option<&str> {
        self.messages.last().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
