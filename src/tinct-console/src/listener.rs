//! Background key listening.
//!
//! [`KeyListener::spawn`] starts a thread that polls a [`KeySource`] and
//! pushes presses into a bounded channel. The thread checks a cancellation
//! token between polls, so [`KeyListener::stop`] returns within one poll
//! interval.
//!
//! ```
//! use tinct_console::{KeyListener, KeyPress, ScriptedKeys};
//!
//! let listener = KeyListener::spawn(ScriptedKeys::from_text("q"), 8).unwrap();
//! assert_eq!(listener.recv().unwrap(), KeyPress::char('q'));
//! listener.stop().unwrap();
//! ```

use crate::error::{ConsoleError, Result};
use crate::keys::{KeyPress, KeySource, POLL_INTERVAL};
use flume::{Receiver, RecvTimeoutError, SendTimeoutError, Sender, TryRecvError};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Delivers key presses from a background thread.
#[derive(Debug)]
pub struct KeyListener {
    receiver: Receiver<KeyPress>,
    token: CancellationToken,
    handle: Option<JoinHandle<Result<()>>>,
}

impl KeyListener {
    /// Starts listening on `source`. At most `capacity` presses are buffered;
    /// the thread waits for room when the buffer is full.
    pub fn spawn<S>(source: S, capacity: usize) -> Result<Self>
    where
        S: KeySource + 'static,
    {
        let (sender, receiver) = flume::bounded(capacity.max(1));
        let token = CancellationToken::new();
        let thread_token = token.clone();
        let handle = thread::Builder::new()
            .name("tinct-key-listener".into())
            .spawn(move || listen(source, sender, thread_token))?;

        tracing::debug!(capacity, "key listener started");
        Ok(Self {
            receiver,
            token,
            handle: Some(handle),
        })
    }

    /// Blocks for the next key press.
    ///
    /// Fails with [`ConsoleError::ListenerStopped`] once the thread has
    /// exited and every buffered press has been received.
    pub fn recv(&self) -> Result<KeyPress> {
        self.receiver
            .recv()
            .map_err(|_| ConsoleError::ListenerStopped)
    }

    /// The next buffered key press, if any.
    pub fn try_recv(&self) -> Result<Option<KeyPress>> {
        match self.receiver.try_recv() {
            Ok(key) => Ok(Some(key)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ConsoleError::ListenerStopped),
        }
    }

    /// Waits up to `timeout` for a key press.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<Option<KeyPress>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(key) => Ok(Some(key)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(ConsoleError::ListenerStopped),
        }
    }

    /// Iterates over presses until the listener stops.
    pub fn iter(&self) -> flume::Iter<'_, KeyPress> {
        self.receiver.iter()
    }

    /// A clone of the receiving end, e.g. for use in another thread.
    pub fn receiver(&self) -> Receiver<KeyPress> {
        self.receiver.clone()
    }

    /// Token that stops the listener when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.token.clone()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Stops the thread and waits for it, returning any error it hit.
    pub fn stop(mut self) -> Result<()> {
        self.shutdown()
    }

    fn shutdown(&mut self) -> Result<()> {
        self.token.cancel();
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        let result = handle.join().map_err(|_| ConsoleError::ListenerPanicked)?;
        tracing::debug!("key listener stopped");
        result
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        if let Err(error) = self.shutdown() {
            tracing::warn!(%error, "key listener failed");
        }
    }
}

fn listen<S: KeySource>(
    mut source: S,
    sender: Sender<KeyPress>,
    token: CancellationToken,
) -> Result<()> {
    while !token.is_cancelled() {
        let key = match source.poll(POLL_INTERVAL) {
            Ok(Some(key)) => key,
            Ok(None) => continue,
            Err(error) => {
                tracing::warn!(%error, "reading key press failed");
                return Err(error);
            }
        };
        tracing::trace!(?key, "key pressed");
        if !deliver(&sender, key, &token) {
            break;
        }
    }
    Ok(())
}

/// Sends `key`, waiting for room while not cancelled. Returns `false` when
/// the listener should exit.
fn deliver(sender: &Sender<KeyPress>, mut key: KeyPress, token: &CancellationToken) -> bool {
    loop {
        match sender.send_timeout(key, POLL_INTERVAL) {
            Ok(()) => return true,
            Err(SendTimeoutError::Timeout(pending)) => {
                if token.is_cancelled() {
                    return false;
                }
                key = pending;
            }
            Err(SendTimeoutError::Disconnected(_)) => return false,
        }
    }
}
