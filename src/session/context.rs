use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

use super::store::TokenStore;
use crate::models::{Session, User};
use crate::utils::DomuError;

/// Lifecycle of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Startup check has not run yet
    Loading,
    Anonymous,
    Authenticated,
}

#[derive(Debug, Clone)]
enum SessionState {
    Loading,
    Anonymous,
    Authenticated(Session),
}

/// Shared handle on the authenticated identity
///
/// Created once by the entry point and passed to whoever needs the token.
/// Clones share the same state.
#[derive(Clone)]
pub struct SessionContext {
    state: Arc<RwLock<SessionState>>,
    store: Arc<dyn TokenStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::Loading)),
            store,
        }
    }

    /// Startup check: pick up a stored session, if any
    ///
    /// An unreadable store leaves the context anonymous.
    pub fn restore(&self) -> SessionPhase {
        let restored = match self.store.load() {
            Ok(session) => session,
            Err(e) => {
                tracing::warn!(error = %e, "could not load stored session");
                None
            }
        };

        let mut state = self.state.write();
        *state = match restored {
            Some(session) => {
                tracing::debug!(user_id = %session.user.id, "restored stored session");
                SessionState::Authenticated(session)
            }
            None => SessionState::Anonymous,
        };
        phase_of(&state)
    }

    /// Replace the current session; no local token validation
    pub fn login(&self, token: impl Into<String>, user: User) {
        let session = Session::new(token, user);
        if let Err(e) = self.store.save(&session) {
            tracing::warn!(error = %e, "could not persist session");
        }

        tracing::info!(user_id = %session.user.id, role = %session.user.role, "logged in");
        *self.state.write() = SessionState::Authenticated(session);
    }

    /// Forget the current session
    pub fn logout(&self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!(error = %e, "could not clear stored session");
        }

        *self.state.write() = SessionState::Anonymous;
        tracing::info!("logged out");
    }

    pub fn current(&self) -> Option<Session> {
        match &*self.state.read() {
            SessionState::Authenticated(session) => Some(session.clone()),
            _ => None,
        }
    }

    pub fn token(&self) -> Option<String> {
        self.current().map(|session| session.token)
    }

    pub fn user(&self) -> Option<User> {
        self.current().map(|session| session.user)
    }

    pub fn phase(&self) -> SessionPhase {
        phase_of(&self.state.read())
    }

    pub fn is_loading(&self) -> bool {
        self.phase() == SessionPhase::Loading
    }

    /// Token for a protected endpoint
    pub fn require_token(&self) -> Result<String, DomuError> {
        self.token().ok_or(DomuError::NotAuthenticated)
    }
}

fn phase_of(state: &SessionState) -> SessionPhase {
    match state {
        SessionState::Loading => SessionPhase::Loading,
        SessionState::Anonymous => SessionPhase::Anonymous,
        SessionState::Authenticated(_) => SessionPhase::Authenticated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Role;
    use crate::session::store::{MemoryTokenStore, MockTokenStore};

    fn owner() -> User {
        User {
            id: "u1".to_string(),
            name: "Luis".to_string(),
            role: Role::Owner,
            email: "luis@domu.cl".to_string(),
        }
    }

    #[test]
    fn test_login_then_logout() {
        let context = SessionContext::new(Arc::new(MemoryTokenStore::new()));
        assert!(context.is_loading());
        assert_eq!(context.restore(), SessionPhase::Anonymous);

        context.login("t", owner());
        assert_eq!(context.token().as_deref(), Some("t"));
        assert_eq!(context.user(), Some(owner()));
        assert_eq!(context.phase(), SessionPhase::Authenticated);

        context.logout();
        assert_eq!(context.token(), None);
        assert_eq!(context.user(), None);
        assert!(matches!(context.require_token(), Err(DomuError::NotAuthenticated)));
    }

    #[test]
    fn test_login_replaces_previous_session() {
        let context = SessionContext::new(Arc::new(MemoryTokenStore::new()));
        context.login("first", owner());

        let mut tenant = owner();
        tenant.id = "u2".to_string();
        tenant.role = Role::Tenant;
        context.login("second", tenant.clone());

        assert_eq!(context.current(), Some(Session::new("second", tenant)));
    }

    #[test]
    fn test_clones_share_state() {
        let context = SessionContext::new(Arc::new(MemoryTokenStore::new()));
        let handle = context.clone();

        context.login("t", owner());
        assert_eq!(handle.require_token().unwrap(), "t");
    }

    #[test]
    fn test_restore_picks_up_stored_session() {
        let store = Arc::new(MemoryTokenStore::new());
        SessionContext::new(store.clone()).login("persisted", owner());

        let fresh = SessionContext::new(store);
        assert_eq!(fresh.restore(), SessionPhase::Authenticated);
        assert_eq!(fresh.token().as_deref(), Some("persisted"));
    }

    #[test]
    fn test_store_failures_never_block_login_or_logout() {
        let mut store = MockTokenStore::new();
        store
            .expect_load()
            .returning(|| Err(DomuError::SessionError("disk gone".to_string())));
        store
            .expect_save()
            .times(1)
            .returning(|_| Err(DomuError::SessionError("read-only".to_string())));
        store
            .expect_clear()
            .times(1)
            .returning(|| Err(DomuError::SessionError("read-only".to_string())));

        let context = SessionContext::new(Arc::new(store));
        assert_eq!(context.restore(), SessionPhase::Anonymous);

        context.login("t", owner());
        assert_eq!(context.phase(), SessionPhase::Authenticated);

        context.logout();
        assert_eq!(context.phase(), SessionPhase::Anonymous);
    }
}
