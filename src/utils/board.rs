use chrono::{DateTime, Duration, Utc};
use serenity::all::{ChannelId, MessageId, UserId};
use std::collections::HashMap;
use tokio::sync::{Mutex, watch};

/// How long a claimant has to complete a request.
pub const COMPLETION_WINDOW_HOURS: i64 = 48;

#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    Open,
    Claimed {
        claimant: UserId,
        claimed_at: DateTime<Utc>,
    },
}

/// Progress of the discussion thread opened next to an announcement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ThreadSlot {
    Pending,
    Opened(ChannelId),
    Failed,
}

/// Everything the claim handler needs to know about one posted request.
#[derive(Clone, Debug)]
pub struct RequestSession {
    pub channel: ChannelId,
    pub message: MessageId,
    pub requester: UserId,
    pub thread: watch::Receiver<ThreadSlot>,
    pub opened_at: DateTime<Utc>,
    pub closes_at: Option<DateTime<Utc>>,
    pub state: SessionState,
}

impl RequestSession {
    /// The thread, once the attempt to open it has finished either way.
    pub async fn resolved_thread(&self) -> Option<ChannelId> {
        let mut slot = self.thread.clone();
        let resolved = slot
            .wait_for(|state| *state != ThreadSlot::Pending)
            .await
            .map(|state| *state);

        match resolved {
            Ok(ThreadSlot::Opened(thread)) => Some(thread),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum ClaimAttempt {
    /// This click performed the transition to claimed.
    Won(RequestSession),
    AlreadyClaimed {
        claimant: UserId,
        claimed_at: DateTime<Utc>,
    },
    /// Unknown message, or the listener has expired.
    NotOpen,
}

/// In-memory registry of posted requests keyed by announcement message.
///
/// The mutex is the only thing serializing claim attempts, so every state
/// transition happens while it is held and nothing awaits inside it.
pub struct RequestBoard {
    sessions: Mutex<HashMap<MessageId, RequestSession>>,
    listen_for: Option<Duration>,
}

impl RequestBoard {
    pub fn new(listen_for: Option<Duration>) -> Self {
        RequestBoard {
            sessions: Mutex::new(HashMap::new()),
            listen_for,
        }
    }

    /// Start listening for claims on `message`.
    ///
    /// The returned sender resolves the thread slot; dropping it while still
    /// pending counts as a failed thread.
    pub async fn open(
        &self,
        channel: ChannelId,
        message: MessageId,
        requester: UserId,
        now: DateTime<Utc>,
    ) -> watch::Sender<ThreadSlot> {
        let (thread_tx, thread_rx) = watch::channel(ThreadSlot::Pending);
        let session = RequestSession {
            channel,
            message,
            requester,
            thread: thread_rx,
            opened_at: now,
            closes_at: self.listen_for.map(|window| now + window),
            state: SessionState::Open,
        };

        self.sessions.lock().await.insert(message, session);
        thread_tx
    }

    pub async fn claim(&self, message: MessageId, claimant: UserId, now: DateTime<Utc>) -> ClaimAttempt {
        let mut sessions = self.sessions.lock().await;

        let expired = match sessions.get(&message) {
            None => return ClaimAttempt::NotOpen,
            Some(RequestSession {
                state:
                    SessionState::Claimed {
                        claimant,
                        claimed_at,
                    },
                ..
            }) => {
                return ClaimAttempt::AlreadyClaimed {
                    claimant: *claimant,
                    claimed_at: *claimed_at,
                };
            }
            Some(session) => session.closes_at.is_some_and(|at| at <= now),
        };

        if expired {
            sessions.remove(&message);
            tracing::debug!("[BOARD] Listener for message {} expired", message);
            return ClaimAttempt::NotOpen;
        }

        let Some(session) = sessions.get_mut(&message) else {
            return ClaimAttempt::NotOpen;
        };

        session.state = SessionState::Claimed {
            claimant,
            claimed_at: now,
        };
        // Kept around so late clicks can be told who took it.
        session.closes_at = Some(now + Duration::hours(COMPLETION_WINDOW_HOURS));
        ClaimAttempt::Won(session.clone())
    }

    #[cfg(test)]
    pub async fn get(&self, message: MessageId) -> Option<RequestSession> {
        self.sessions.lock().await.get(&message).cloned()
    }

    /// Drop every session whose window has passed. Returns how many were removed.
    pub async fn sweep(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock().await;
        let before = sessions.len();
        sessions.retain(|_, session| session.closes_at.is_none_or(|at| at > now));
        before - sessions.len()
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
