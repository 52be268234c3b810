//! Transient status messages with a two-phase timer.
//!
//! A message is shown, auto-hides after the configured duration, fades out,
//! and is removed either when the host reports the fade animation finished or
//! when a fallback deadline passes. Time is passed in explicitly as the
//! offset from a host-chosen epoch (a monotonic clock reading); the host
//! drives deadlines by calling [`MessageBoard::tick`] from its timer source.
//!
//! ```text
//! show_at ──► Shown ──(hide_at / deadline / newer message)──► Fading
//!                                     │
//!            (animation_finished / fallback deadline) ──► removed
//! ```

#[cfg(test)]
#[path = "message_test.rs"]
mod message_test;

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::consts::MESSAGE_DURATION;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MessageId(pub u64);

/// Timer phase of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessagePhase {
    /// Visible until `hide_at`.
    Shown { hide_at: Duration },
    /// Fading out; force-removed at `remove_at`.
    Fading { remove_at: Duration },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub id: MessageId,
    pub text: String,
    pub is_error: bool,
    pub phase: MessagePhase,
}

/// Transition reported by [`MessageBoard::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "id", rename_all = "snake_case")]
pub enum MessageEvent {
    /// The message started fading out.
    Hidden(MessageId),
    /// The message is gone.
    Removed(MessageId),
}

/// All live messages, oldest first.
#[derive(Debug, Clone)]
pub struct MessageBoard {
    duration: Duration,
    messages: Vec<Message>,
    next_id: u64,
}

impl Default for MessageBoard {
    fn default() -> Self {
        Self::new(MESSAGE_DURATION)
    }
}

impl MessageBoard {
    #[must_use]
    pub fn new(duration: Duration) -> Self {
        Self { duration, messages: Vec::new(), next_id: 1 }
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Show `text`. A message still on screen starts fading.
    pub fn show_at(&mut self, text: impl Into<String>, is_error: bool, now: Duration) -> MessageId {
        self.fade_shown(now);
        let id = MessageId(self.next_id);
        self.next_id += 1;
        let text = text.into();
        debug!(id = id.0, is_error, %text, "message shown");
        self.messages.push(Message { id, text, is_error, phase: MessagePhase::Shown { hide_at: now.saturating_add(self.duration) } });
        id
    }

    /// Start fading the current message. No-op when nothing is shown.
    pub fn hide_at(&mut self, now: Duration) -> Option<MessageId> {
        let remove_at = now.saturating_add(self.duration);
        let message = self.messages.iter_mut().rev().find(|m| matches!(m.phase, MessagePhase::Shown { .. }))?;
        message.phase = MessagePhase::Fading { remove_at };
        debug!(id = message.id.0, "message hidden");
        Some(message.id)
    }

    /// The host finished the fade animation for `id`. Returns whether a
    /// fading message was removed.
    pub fn animation_finished(&mut self, id: MessageId) -> bool {
        let before = self.messages.len();
        self.messages.retain(|m| !(m.id == id && matches!(m.phase, MessagePhase::Fading { .. })));
        before != self.messages.len()
    }

    /// Fire every deadline at or before `now`.
    pub fn tick(&mut self, now: Duration) -> Vec<MessageEvent> {
        let duration = self.duration;
        let mut events = Vec::new();
        for message in &mut self.messages {
            if let MessagePhase::Shown { hide_at } = message.phase {
                if hide_at <= now {
                    message.phase = MessagePhase::Fading { remove_at: hide_at.saturating_add(duration) };
                    events.push(MessageEvent::Hidden(message.id));
                }
            }
        }
        self.messages.retain(|m| match m.phase {
            MessagePhase::Fading { remove_at } if remove_at <= now => {
                events.push(MessageEvent::Removed(m.id));
                false
            }
            _ => true,
        });
        if !events.is_empty() {
            debug!(count = events.len(), "message timers fired");
        }
        events
    }

    /// The message currently on screen, if any.
    #[must_use]
    pub fn current(&self) -> Option<&Message> {
        self.messages.iter().rev().find(|m| matches!(m.phase, MessagePhase::Shown { .. }))
    }

    /// Every live message, including ones still fading.
    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Earliest pending deadline, for hosts that schedule a single timer.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.messages
            .iter()
            .map(|m| match m.phase {
                MessagePhase::Shown { hide_at } => hide_at,
                MessagePhase::Fading { remove_at } => remove_at,
            })
            .min()
    }

    fn fade_shown(&mut self, now: Duration) {
        let remove_at = now.saturating_add(self.duration);
        for message in &mut self.messages {
            if matches!(message.phase, MessagePhase::Shown { .. }) {
                message.phase = MessagePhase::Fading { remove_at };
            }
        }
    }
}
