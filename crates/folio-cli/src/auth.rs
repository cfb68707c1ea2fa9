//! Per-profile admin sessions kept in the OS keychain.

use folio_core::auth::{AuthError, AuthResult, AuthSession, SessionPersistence};

/// One profile's Supabase session.
#[derive(Debug, Clone)]
pub struct SessionStore {
    account: String,
}

impl SessionStore {
    pub fn new(profile_name: &str) -> Self {
        Self {
            account: format!("supabase_session:{profile_name}"),
        }
    }
}

impl SessionPersistence for SessionStore {
    fn load_session(&self) -> AuthResult<Option<AuthSession>> {
        vault::read(&self.account)?
            .map(|raw| serde_json::from_str::<AuthSession>(&raw).map_err(AuthError::from))
            .transpose()
    }

    fn save_session(&self, session: &AuthSession) -> AuthResult<()> {
        vault::write(&self.account, &serde_json::to_string(session)?)
    }

    fn clear_session(&self) -> AuthResult<()> {
        vault::erase(&self.account)
    }
}

pub fn load_stored_session(profile_name: &str) -> AuthResult<Option<AuthSession>> {
    SessionStore::new(profile_name).load_session()
}

pub fn clear_stored_session(profile_name: &str) -> AuthResult<()> {
    SessionStore::new(profile_name).clear_session()
}

#[cfg(not(test))]
mod vault {
    use folio_core::auth::{AuthError, AuthResult};
    use keyring::Entry;

    const SERVICE: &str = "folio-cli";

    fn storage_error(error: keyring::Error) -> AuthError {
        AuthError::SecureStorage(error.to_string())
    }

    fn entry(account: &str) -> AuthResult<Entry> {
        Entry::new(SERVICE, account).map_err(storage_error)
    }

    pub fn read(account: &str) -> AuthResult<Option<String>> {
        match entry(account)?.get_password() {
            Ok(raw) => Ok(Some(raw)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(error) => Err(storage_error(error)),
        }
    }

    pub fn write(account: &str, raw: &str) -> AuthResult<()> {
        entry(account)?.set_password(raw).map_err(storage_error)
    }

    pub fn erase(account: &str) -> AuthResult<()> {
        match entry(account)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(error) => Err(storage_error(error)),
        }
    }
}

/// Process-wide stand-in for the keychain so tests never touch the real one.
#[cfg(test)]
mod vault {
    use std::collections::HashMap;
    use std::sync::{Mutex, OnceLock, PoisonError};

    use folio_core::auth::AuthResult;

    fn entries() -> &'static Mutex<HashMap<String, String>> {
        static ENTRIES: OnceLock<Mutex<HashMap<String, String>>> = OnceLock::new();
        ENTRIES.get_or_init(Mutex::default)
    }

    pub fn read(account: &str) -> AuthResult<Option<String>> {
        let entries = entries().lock().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(account).cloned())
    }

    pub fn write(account: &str, raw: &str) -> AuthResult<()> {
        let mut entries = entries().lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(account.to_string(), raw.to_string());
        Ok(())
    }

    pub fn erase(account: &str) -> AuthResult<()> {
        let mut entries = entries().lock().unwrap_or_else(PoisonError::into_inner);
        entries.remove(account);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use folio_core::auth::AuthUser;
    use pretty_assertions::assert_eq;

    use super::*;

    fn session_for(email: &str) -> AuthSession {
        AuthSession {
            access_token: "token".to_string(),
            refresh_token: "refresh".to_string(),
            expires_at: 1_900_000_000,
            user: AuthUser {
                id: "admin".to_string(),
                email: Some(email.to_string()),
            },
        }
    }

    #[test]
    fn profiles_do_not_share_sessions() {
        let staging = SessionStore::new("auth-test-staging");
        let prod = SessionStore::new("auth-test-prod");
        staging.save_session(&session_for("staging@hyscop.com")).unwrap();

        let restored = load_stored_session("auth-test-staging").unwrap();
        assert_eq!(
            restored.map(|session| session.identity().to_string()),
            Some("staging@hyscop.com".to_string())
        );
        assert_eq!(prod.load_session().unwrap(), None);

        clear_stored_session("auth-test-staging").unwrap();
        assert_eq!(staging.load_session().unwrap(), None);
    }

    #[test]
    fn clearing_an_unknown_profile_succeeds() {
        clear_stored_session("auth-test-missing").unwrap();
    }
}
