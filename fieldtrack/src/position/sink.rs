//! Callback contract shared by both position channels.
//!
//! A [`PositionSink`] is what a channel (or a platform watch callback) holds
//! to report what it observed. It is tagged with its [`Channel`] and feeds a
//! bounded mpsc channel consumed by the session dispatcher.
//!
//! Platform callbacks may run on native threads outside the runtime, so the
//! sink never awaits: a full channel drops the sample with a warning.

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

use super::types::{Channel, Position, SourceEvent};

/// Error text used when a watch callback carries neither position nor error.
pub const NO_LOCATION: &str = "no location";

/// Channel-tagged sender implementing `on_position` / `on_error`.
#[derive(Debug, Clone)]
pub struct PositionSink {
    channel: Channel,
    tx: mpsc::Sender<SourceEvent>,
}

impl PositionSink {
    pub fn new(channel: Channel, tx: mpsc::Sender<SourceEvent>) -> Self {
        Self { channel, tx }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    /// Report an observed position. Returns false if the sample was dropped.
    pub fn on_position(&self, position: Position) -> bool {
        self.emit(SourceEvent::Position {
            channel: self.channel,
            position,
        })
    }

    /// Report a non-fatal acquisition error. Returns false if it was dropped.
    pub fn on_error(&self, reason: impl Into<String>) -> bool {
        self.emit(SourceEvent::Error {
            channel: self.channel,
            reason: reason.into(),
        })
    }

    /// Forward a raw watch callback, which carries a position, an error, or
    /// (on some platforms) neither.
    pub fn on_watch_callback(&self, position: Option<Position>, error: Option<String>) -> bool {
        match (position, error) {
            (_, Some(reason)) => self.on_error(reason),
            (Some(position), None) => self.on_position(position),
            (None, None) => self.on_error(NO_LOCATION),
        }
    }

    /// True once the consuming side has gone away (session stopped).
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }

    fn emit(&self, event: SourceEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                tracing::warn!(
                    channel = %self.channel,
                    ?event,
                    "Position event queue full, dropping sample"
                );
                false
            }
            Err(TrySendError::Closed(_)) => {
                tracing::trace!(channel = %self.channel, "Position event after stop ignored");
                false
            }
        }
    }
}
