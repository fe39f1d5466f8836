// Copyright 2026 Layne Penney
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Conversation state: the ordered transcript plus the latest usage snapshot.
//!
//! The transcript is append-only except for an explicit [`Conversation::clear`].
//! The usage snapshot reflects the most recent completion response only;
//! appending any message zeroes it, so it is never a running total.

use crate::types::{Message, TokenUsage};

/// Ordered transcript of messages and the most recent token usage.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    usage: TokenUsage,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message. Resets the usage snapshot to zero.
    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
        self.usage = TokenUsage::default();
    }

    /// Record the usage counters from the latest completion response.
    pub fn record_usage(&mut self, usage: TokenUsage) {
        self.usage = usage;
    }

    /// The transcript, in order.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent usage snapshot.
    pub fn usage(&self) -> &TokenUsage {
        &self.usage
    }

    /// Number of messages in the transcript.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Check if the transcript is empty.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Empty the transcript and zero the usage counters.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.usage = TokenUsage::default();
    }
}
