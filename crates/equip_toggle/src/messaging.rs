//! # Host Messages
//!
//! The host announces lifecycle events from its own threads. They are
//! queued on a bounded channel and handled by whoever owns the
//! [`crate::PluginContext`].
//!
//! ```text
//! host thread ──SaveGame──> MessageSender ──> MessageReceiver ──> PluginContext
//! ```

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use tracing::warn;

/// Default number of messages in flight.
pub const DEFAULT_QUEUE_CAPACITY: usize = 64;

/// A lifecycle event posted by the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HostMessage {
    /// Game data finished loading; the plugin can register its hooks.
    DataLoaded,
    /// The host is writing a save with this name.
    SaveGame(String),
    /// The host is about to load this save file.
    PreLoadGame(String),
    /// The host deleted this save.
    DeleteGame(String),
}

/// Bounded host message channel.
#[derive(Debug)]
pub struct MessageQueue {
    sender: Sender<HostMessage>,
    receiver: Receiver<HostMessage>,
}

impl MessageQueue {
    /// Creates a queue holding at most `capacity` pending messages.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> MessageSender {
        MessageSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> MessageReceiver {
        MessageReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a connected sender and receiver.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (MessageSender, MessageReceiver) {
        let queue = Self::new(capacity);
        (queue.sender(), queue.receiver())
    }
}

impl Default for MessageQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

/// Handle for posting host messages.
#[derive(Clone, Debug)]
pub struct MessageSender {
    sender: Sender<HostMessage>,
}

impl MessageSender {
    /// Posts a message without blocking.
    ///
    /// Returns `false` if the queue is full or nobody is listening.
    #[inline]
    pub fn send(&self, message: HostMessage) -> bool {
        match self.sender.try_send(message) {
            Ok(()) => true,
            Err(TrySendError::Full(message)) => {
                warn!("Host message queue full, dropped {message:?}");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }

    /// Posts a message, waiting for room.
    ///
    /// Save and load messages must not be dropped; hosts post those with
    /// this method.
    #[inline]
    pub fn send_blocking(&self, message: HostMessage) -> bool {
        self.sender.send(message).is_ok()
    }
}

/// Handle for taking host messages.
#[derive(Clone, Debug)]
pub struct MessageReceiver {
    receiver: Receiver<HostMessage>,
}

impl MessageReceiver {
    /// Takes every pending message without blocking.
    #[inline]
    #[must_use]
    pub fn drain(&self) -> Vec<HostMessage> {
        self.receiver.try_iter().collect()
    }

    /// Takes one message without blocking.
    #[inline]
    #[must_use]
    pub fn try_recv(&self) -> Option<HostMessage> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending messages.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }
}
