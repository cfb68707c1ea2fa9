//! Keeps the admin session in the OS keyring between launches.

use folio_core::auth::{AuthError, AuthResult, AuthSession, SessionPersistence};
use keyring::Entry;

#[derive(Debug, Clone, Copy)]
pub struct KeyringSessionStore {
    service: &'static str,
    account: &'static str,
}

impl Default for KeyringSessionStore {
    fn default() -> Self {
        Self {
            service: "folio",
            account: "supabase_session",
        }
    }
}

fn keyring_failure(error: keyring::Error) -> AuthError {
    AuthError::SecureStorage(error.to_string())
}

impl KeyringSessionStore {
    fn entry(self) -> AuthResult<Entry> {
        Entry::new(self.service, self.account).map_err(keyring_failure)
    }
}

impl SessionPersistence for KeyringSessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        let raw = match self.entry()?.get_password() {
            Ok(raw) => raw,
            Err(keyring::Error::NoEntry) => return Ok(None),
            Err(error) => return Err(keyring_failure(error)),
        };
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        let raw = serde_json::to_string(session)?;
        self.entry()?.set_password(&raw).map_err(keyring_failure)
    }

    fn clear_session(&self) -> AuthResult<()> {
        if let Err(error) = self.entry()?.delete_credential() {
            if !matches!(error, keyring::Error::NoEntry) {
                return Err(keyring_failure(error));
            }
        }
        Ok(())
    }
}
