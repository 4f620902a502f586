//! Session manager - per-connection audio buffering and result routing
//!
//! One entry per connected session: an outbound channel for results, an
//! ordered audio buffer, and a pipeline mutex guaranteeing a single
//! in-flight run per session. Buffers are created on connect, flushed on
//! dispatch, and destroyed on disconnect; nothing survives a session.

use std::collections::HashMap;
use std::sync::Arc;

use domain::SessionId;
use parking_lot::Mutex;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use crate::error::ApplicationError;

/// Buffered chunks per session before a pipeline run dispatches.
///
/// One: latency beats batching for short toddler utterances. Clients that
/// want batching concatenate before sending.
const DISPATCH_THRESHOLD: usize = 1;

/// One inbound audio chunk, ordered by arrival
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioChunk {
    /// Raw audio bytes
    pub data: Vec<u8>,
    /// Client-supplied capture timestamp, milliseconds
    pub timestamp_ms: u64,
}

struct SessionEntry<M> {
    sender: UnboundedSender<M>,
    buffer: Vec<AudioChunk>,
    pipeline_lock: Arc<tokio::sync::Mutex<()>>,
}

/// Registry of live sessions, generic over the outbound message type
pub struct SessionManager<M> {
    sessions: Mutex<HashMap<SessionId, SessionEntry<M>>>,
    dispatch_threshold: usize,
}

impl<M> Default for SessionManager<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> SessionManager<M> {
    /// Create an empty registry with the standard dispatch threshold
    #[must_use]
    pub fn new() -> Self {
        Self::with_dispatch_threshold(DISPATCH_THRESHOLD)
    }

    /// Create a registry that dispatches after `threshold` buffered chunks
    #[must_use]
    pub fn with_dispatch_threshold(threshold: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            dispatch_threshold: threshold.max(1),
        }
    }

    /// Register a new session with its outbound channel
    pub fn connect(&self, id: SessionId, sender: UnboundedSender<M>) {
        let mut sessions = self.sessions.lock();
        sessions.insert(
            id,
            SessionEntry {
                sender,
                buffer: Vec::new(),
                pipeline_lock: Arc::new(tokio::sync::Mutex::new(())),
            },
        );
        debug!(session_id = %id, total = sessions.len(), "Session connected");
    }

    /// Append a chunk; returns the concatenated buffer contents when the
    /// dispatch threshold is reached, leaving the buffer empty.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::SessionNotFound` when the session is
    /// unknown or already closed.
    pub fn push_chunk(
        &self,
        id: SessionId,
        chunk: AudioChunk,
    ) -> Result<Option<Vec<u8>>, ApplicationError> {
        let mut sessions = self.sessions.lock();
        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| ApplicationError::SessionNotFound(id.to_string()))?;

        entry.buffer.push(chunk);
        if entry.buffer.len() < self.dispatch_threshold {
            return Ok(None);
        }

        let mut audio = Vec::new();
        for buffered in entry.buffer.drain(..) {
            audio.extend_from_slice(&buffered.data);
        }
        Ok(Some(audio))
    }

    /// The per-session pipeline mutex; hold its guard for the duration of
    /// one pipeline run so concurrent chunks queue instead of racing.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::SessionNotFound` when the session is
    /// unknown or already closed.
    pub fn pipeline_lock(&self, id: SessionId) -> Result<Arc<tokio::sync::Mutex<()>>, ApplicationError> {
        self.sessions
            .lock()
            .get(&id)
            .map(|entry| Arc::clone(&entry.pipeline_lock))
            .ok_or_else(|| ApplicationError::SessionNotFound(id.to_string()))
    }

    /// Deliver a message to a session; returns false (and logs) when the
    /// session is gone or its channel is closed.
    pub fn send(&self, id: SessionId, message: M) -> bool {
        let sessions = self.sessions.lock();
        match sessions.get(&id) {
            Some(entry) => match entry.sender.send(message) {
                Ok(()) => true,
                Err(_) => {
                    warn!(session_id = %id, "Outbound channel closed, dropping message");
                    false
                },
            },
            None => {
                warn!(session_id = %id, "Message for unknown session dropped");
                false
            },
        }
    }

    /// Remove a session, discarding any buffered audio
    pub fn disconnect(&self, id: SessionId) {
        let mut sessions = self.sessions.lock();
        if let Some(entry) = sessions.remove(&id) {
            debug!(
                session_id = %id,
                discarded_chunks = entry.buffer.len(),
                remaining = sessions.len(),
                "Session disconnected"
            );
        }
    }

    /// Number of live sessions
    #[must_use]
    pub fn active_sessions(&self) -> usize {
        self.sessions.lock().len()
    }
}

impl<M> std::fmt::Debug for SessionManager<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("active_sessions", &self.active_sessions())
            .field("dispatch_threshold", &self.dispatch_threshold)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn chunk(data: &[u8], timestamp_ms: u64) -> AudioChunk {
        AudioChunk {
            data: data.to_vec(),
            timestamp_ms,
        }
    }

    #[tokio::test]
    async fn single_chunk_dispatches_immediately() {
        let manager: SessionManager<String> = SessionManager::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = SessionId::new();
        manager.connect(id, tx);

        let flushed = manager.push_chunk(id, chunk(b"abc", 1)).unwrap();
        assert_eq!(flushed, Some(b"abc".to_vec()));

        // Buffer was cleared; the next chunk flushes alone.
        let flushed = manager.push_chunk(id, chunk(b"def", 2)).unwrap();
        assert_eq!(flushed, Some(b"def".to_vec()));
    }

    #[tokio::test]
    async fn buffered_chunks_concatenate_in_arrival_order() {
        let manager: SessionManager<String> = SessionManager::with_dispatch_threshold(3);
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = SessionId::new();
        manager.connect(id, tx);

        assert_eq!(manager.push_chunk(id, chunk(b"a", 1)).unwrap(), None);
        assert_eq!(manager.push_chunk(id, chunk(b"b", 2)).unwrap(), None);
        let flushed = manager.push_chunk(id, chunk(b"c", 3)).unwrap();
        assert_eq!(flushed, Some(b"abc".to_vec()));
    }

    #[tokio::test]
    async fn unknown_session_is_an_error() {
        let manager: SessionManager<String> = SessionManager::new();
        let err = manager
            .push_chunk(SessionId::new(), chunk(b"a", 1))
            .unwrap_err();
        assert!(matches!(err, ApplicationError::SessionNotFound(_)));
    }

    #[tokio::test]
    async fn pipeline_lock_serializes_runs() {
        let manager: SessionManager<String> = SessionManager::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = SessionId::new();
        manager.connect(id, tx);

        let lock = manager.pipeline_lock(id).unwrap();
        let guard = lock.lock().await;

        // A second run on the same session must queue behind the guard.
        let second = manager.pipeline_lock(id).unwrap();
        assert!(second.try_lock().is_err());

        drop(guard);
        assert!(second.try_lock().is_ok());
    }

    #[tokio::test]
    async fn send_routes_to_the_right_session() {
        let manager: SessionManager<String> = SessionManager::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        let a = SessionId::new();
        let b = SessionId::new();
        manager.connect(a, tx_a);
        manager.connect(b, tx_b);

        assert!(manager.send(a, "for-a".to_string()));
        assert_eq!(rx_a.recv().await, Some("for-a".to_string()));
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn send_to_closed_channel_is_non_fatal() {
        let manager: SessionManager<String> = SessionManager::new();
        let (tx, rx) = mpsc::unbounded_channel();
        let id = SessionId::new();
        manager.connect(id, tx);
        drop(rx);

        assert!(!manager.send(id, "lost".to_string()));
    }

    #[tokio::test]
    async fn disconnect_discards_buffer_and_session() {
        let manager: SessionManager<String> = SessionManager::with_dispatch_threshold(5);
        let (tx, _rx) = mpsc::unbounded_channel();
        let id = SessionId::new();
        manager.connect(id, tx);
        manager.push_chunk(id, chunk(b"a", 1)).unwrap();

        manager.disconnect(id);
        assert_eq!(manager.active_sessions(), 0);
        assert!(manager.push_chunk(id, chunk(b"b", 2)).is_err());
    }
}
