use tracing::debug;

use crate::models::UserAccount;
use crate::storage::Storage;

/// Persisted key holding the signed-in account.
const USER_KEY: &str = "user";

/// The signed-in account, if any. At most one exists; signing in again
/// replaces it outright. Mutations write through to storage.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<UserAccount>,
}

impl Session {
    /// Hydrate from storage; signed out when nothing usable is stored.
    pub fn load(storage: &Storage) -> Self {
        let current: Option<UserAccount> = storage.load(USER_KEY, None);
        if let Some(account) = &current {
            debug!(id = %account.id, "hydrated session");
        }
        Self { current }
    }

    pub fn current(&self) -> Option<&UserAccount> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Replace the signed-in account (last write wins) and persist it.
    /// Validation is the caller's job; the session stores what it is given.
    pub fn sign_in(&mut self, storage: &Storage, account: UserAccount) {
        debug!(id = %account.id, "signed in");
        storage.save(USER_KEY, &account);
        self.current = Some(account);
    }

    /// Forget the signed-in account and drop the persisted key.
    pub fn sign_out(&mut self, storage: &Storage) {
        self.current = None;
        storage.clear(USER_KEY);
    }

    /// Re-persist the current state; the teardown path.
    pub fn flush(&self, storage: &Storage) {
        match &self.current {
            Some(account) => storage.save(USER_KEY, account),
            None => storage.clear(USER_KEY),
        }
    }
}
