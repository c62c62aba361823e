use thiserror::Error;

use crate::domain::Message;

use super::store::{MessageStore, StoreError};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("SMS permission has not been granted")]
    NotGranted,
    #[error("SMS permission is already granted")]
    AlreadyGranted,
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug)]
pub struct GrantedInbox {
    epoch: u64,
    seeding: bool,
    pending_simulations: usize,
    store: MessageStore,
}

impl GrantedInbox {
    pub fn is_seeding(&self) -> bool {
        self.seeding
    }

    pub fn pending_simulations(&self) -> usize {
        self.pending_simulations
    }

    pub fn store(&self) -> &MessageStore {
        &self.store
    }
}

#[derive(Debug)]
enum SessionState {
    Ungranted,
    Granted(GrantedInbox),
}

/// Permission lifecycle: ungranted -> granted (-> ungranted on revoke).
/// Each grant opens a new epoch; results tagged with an older epoch are dropped.
#[derive(Debug)]
pub struct Session {
    state: SessionState,
    last_epoch: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SessionState::Ungranted,
            last_epoch: 0,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self.state, SessionState::Granted(_))
    }

    pub fn inbox(&self) -> Option<&GrantedInbox> {
        match &self.state {
            SessionState::Granted(inbox) => Some(inbox),
            SessionState::Ungranted => None,
        }
    }

    pub fn grant(&mut self) -> Result<u64, SessionError> {
        if self.is_granted() {
            return Err(SessionError::AlreadyGranted);
        }
        self.last_epoch += 1;
        self.state = SessionState::Granted(GrantedInbox {
            epoch: self.last_epoch,
            seeding: true,
            pending_simulations: 0,
            store: MessageStore::new(),
        });
        tracing::info!(target: "session", epoch = self.last_epoch, "permission granted");
        Ok(self.last_epoch)
    }

    pub fn revoke(&mut self) -> bool {
        match std::mem::replace(&mut self.state, SessionState::Ungranted) {
            SessionState::Granted(inbox) => {
                tracing::info!(
                    target: "session",
                    epoch = inbox.epoch,
                    dropped = inbox.store.len(),
                    "permission revoked"
                );
                true
            }
            SessionState::Ungranted => false,
        }
    }

    /// Reveals the whole seed batch at once. Messages simulated while seeding
    /// was in flight stay ahead of it. Returns `false` for a stale epoch.
    pub fn publish_seed(&mut self, epoch: u64, batch: Vec<Message>) -> Result<bool, SessionError> {
        let Some(inbox) = self.current_mut(epoch) else {
            return Ok(false);
        };
        if !inbox.seeding {
            tracing::warn!(target: "session", epoch, "seed batch already published");
            return Ok(false);
        }
        inbox.store.extend_batch(batch)?;
        inbox.seeding = false;
        Ok(true)
    }

    pub fn begin_simulation(&mut self) -> Result<u64, SessionError> {
        match &mut self.state {
            SessionState::Granted(inbox) => {
                inbox.pending_simulations += 1;
                Ok(inbox.epoch)
            }
            SessionState::Ungranted => Err(SessionError::NotGranted),
        }
    }

    pub fn complete_simulation(&mut self, epoch: u64, message: Message) -> Result<bool, SessionError> {
        let Some(inbox) = self.current_mut(epoch) else {
            return Ok(false);
        };
        inbox.pending_simulations = inbox.pending_simulations.saturating_sub(1);
        inbox.store.prepend(message)?;
        Ok(true)
    }

    pub fn toggle(&mut self, id: &str) -> Result<Option<&Message>, SessionError> {
        match &mut self.state {
            SessionState::Granted(inbox) => Ok(inbox.store.toggle(id)),
            SessionState::Ungranted => Err(SessionError::NotGranted),
        }
    }

    fn current_mut(&mut self, epoch: u64) -> Option<&mut GrantedInbox> {
        match &mut self.state {
            SessionState::Granted(inbox) if inbox.epoch == epoch => Some(inbox),
            _ => {
                tracing::debug!(target: "session", epoch, "discarding result from a revoked session");
                None
            }
        }
    }
}
