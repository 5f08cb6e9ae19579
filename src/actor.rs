#![cfg(feature = "std")]

//! Single-owner task for sharing one game session between async callers.
//!
//! The session lives inside a spawned task and every request is queued on a
//! channel, so guesses, hints and resets are applied strictly one at a time.

use async_trait::async_trait;
use log::debug;
use tokio::sync::{mpsc, oneshot};

use crate::clock::Clock;
use crate::game::{GameSession, Hint, SessionError, SessionOutcome, SessionSnapshot};

const COMMAND_BUFFER: usize = 32;

/// Operations a presentation layer drives a game through.
#[async_trait]
pub trait GameApi: Send + Sync {
    async fn guess(&mut self, row: usize, col: usize) -> Result<SessionOutcome, SessionError>;
    async fn hint(&mut self) -> Result<Hint, SessionError>;
    async fn reset(&mut self) -> Result<(), SessionError>;
    async fn snapshot(&self) -> Result<SessionSnapshot, SessionError>;
}

#[async_trait]
impl<C: Clock> GameApi for GameSession<C> {
    async fn guess(&mut self, row: usize, col: usize) -> Result<SessionOutcome, SessionError> {
        GameSession::guess(self, row, col)
    }

    async fn hint(&mut self) -> Result<Hint, SessionError> {
        Ok(GameSession::hint(self))
    }

    async fn reset(&mut self) -> Result<(), SessionError> {
        GameSession::reset(self)
    }

    async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        Ok(GameSession::snapshot(self))
    }
}

enum Command {
    Guess {
        row: usize,
        col: usize,
        reply: oneshot::Sender<Result<SessionOutcome, SessionError>>,
    },
    Hint {
        reply: oneshot::Sender<Hint>,
    },
    Reset {
        reply: oneshot::Sender<Result<(), SessionError>>,
    },
    Snapshot {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    Shutdown,
}

/// Cloneable handle to a session owned by a spawned task.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<Command>,
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::Guess { row, col, .. } => write!(f, "Guess({}, {})", row, col),
            Command::Hint { .. } => write!(f, "Hint"),
            Command::Reset { .. } => write!(f, "Reset"),
            Command::Snapshot { .. } => write!(f, "Snapshot"),
            Command::Shutdown => write!(f, "Shutdown"),
        }
    }
}

/// Move `session` into a new tokio task and return a handle to it.
///
/// The task ends when every handle is dropped or `shutdown` is called.
pub fn spawn_session<C: Clock + 'static>(session: GameSession<C>) -> SessionHandle {
    let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
    tokio::spawn(run(session, rx));
    SessionHandle { tx }
}

async fn run<C: Clock>(mut session: GameSession<C>, mut rx: mpsc::Receiver<Command>) {
    while let Some(cmd) = rx.recv().await {
        debug!("session command {:?}", cmd);
        // a caller that gave up waiting just drops its reply
        match cmd {
            Command::Guess { row, col, reply } => {
                let _ = reply.send(session.guess(row, col));
            }
            Command::Hint { reply } => {
                let _ = reply.send(session.hint());
            }
            Command::Reset { reply } => {
                let _ = reply.send(session.reset());
            }
            Command::Snapshot { reply } => {
                let _ = reply.send(session.snapshot());
            }
            Command::Shutdown => break,
        }
    }
    debug!("session task stopped");
}

impl SessionHandle {
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, SessionError> {
        let (reply, rx) = oneshot::channel();
        self.tx
            .send(make(reply))
            .await
            .map_err(|_| SessionError::Closed)?;
        rx.await.map_err(|_| SessionError::Closed)
    }

    /// Stop the session task. Later requests fail with `Closed`.
    pub async fn shutdown(&self) {
        let _ = self.tx.send(Command::Shutdown).await;
    }

    /// Whether the session task is gone.
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[async_trait]
impl GameApi for SessionHandle {
    async fn guess(&mut self, row: usize, col: usize) -> Result<SessionOutcome, SessionError> {
        self.request(|reply| Command::Guess { row, col, reply })
            .await?
    }

    async fn hint(&mut self) -> Result<Hint, SessionError> {
        self.request(|reply| Command::Hint { reply }).await
    }

    async fn reset(&mut self) -> Result<(), SessionError> {
        self.request(|reply| Command::Reset { reply }).await?
    }

    async fn snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        self.request(|reply| Command::Snapshot { reply }).await
    }
}
