//! Session context: the credential pair and current user, shared by every
//! component through a cloneable handle.
//!
//! All access happens on the UI thread, so the state lives behind
//! `Rc<RefCell<..>>`. Borrows never span an `.await` or a listener call.

use crate::models::{AuthTokens, User};
use log::{debug, info};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// Persistence for the credential pair (browser storage in the app)
pub trait CredentialStorage {
    fn load(&self) -> Option<AuthTokens>;
    fn save(&self, tokens: &AuthTokens);
    fn clear(&self);
}

/// In-memory storage, used natively and in tests
#[derive(Clone, Default)]
pub struct MemoryStorage {
    tokens: Rc<RefCell<Option<AuthTokens>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tokens(tokens: AuthTokens) -> Self {
        Self {
            tokens: Rc::new(RefCell::new(Some(tokens))),
        }
    }

    pub fn stored(&self) -> Option<AuthTokens> {
        self.tokens.borrow().clone()
    }
}

impl CredentialStorage for MemoryStorage {
    fn load(&self) -> Option<AuthTokens> {
        self.stored()
    }

    fn save(&self, tokens: &AuthTokens) {
        *self.tokens.borrow_mut() = Some(tokens.clone());
    }

    fn clear(&self) {
        *self.tokens.borrow_mut() = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    UserUpdated,
    LoggedOut,
    /// Refresh failed; credentials were discarded
    Expired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Rc<dyn Fn(SessionEvent)>;

struct SessionInner {
    tokens: Option<AuthTokens>,
    user: Option<User>,
    storage: Box<dyn CredentialStorage>,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

/// Handle to the process-wide session
#[derive(Clone)]
pub struct Session {
    inner: Rc<RefCell<SessionInner>>,
}

impl Session {
    /// Create the session, restoring persisted credentials if present
    pub fn init(storage: impl CredentialStorage + 'static) -> Self {
        let tokens = storage.load();
        if tokens.is_some() {
            info!("Restored persisted credentials");
        }
        Self {
            inner: Rc::new(RefCell::new(SessionInner {
                tokens,
                user: None,
                storage: Box::new(storage),
                listeners: Vec::new(),
                next_subscription: 0,
            })),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.inner.borrow().tokens.is_some()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.borrow().tokens.as_ref().map(|t| t.access.clone())
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner.borrow().tokens.as_ref().map(|t| t.refresh.clone())
    }

    pub fn user(&self) -> Option<User> {
        self.inner.borrow().user.clone()
    }

    /// Store a fresh credential pair after login
    pub fn establish(&self, tokens: AuthTokens) {
        {
            let mut inner = self.inner.borrow_mut();
            inner.storage.save(&tokens);
            inner.tokens = Some(tokens);
        }
        info!("Session established");
        self.notify(SessionEvent::LoggedIn);
    }

    /// Replace the access credential after a successful refresh
    pub fn update_access(&self, access: String) {
        let mut inner = self.inner.borrow_mut();
        if let Some(tokens) = inner.tokens.as_mut() {
            tokens.access = access;
            let tokens = tokens.clone();
            inner.storage.save(&tokens);
            debug!("Access credential refreshed");
        }
    }

    pub fn set_user(&self, user: User) {
        self.inner.borrow_mut().user = Some(user);
        self.notify(SessionEvent::UserUpdated);
    }

    /// User-initiated teardown
    pub fn logout(&self) {
        if self.clear() {
            info!("Logged out");
            self.notify(SessionEvent::LoggedOut);
        }
    }

    /// Teardown after the credentials stopped working
    pub fn invalidate(&self) {
        if self.clear() {
            info!("Session invalidated");
            self.notify(SessionEvent::Expired);
        }
    }

    pub fn subscribe(&self, listener: impl Fn(SessionEvent) + 'static) -> SubscriptionId {
        let mut inner = self.inner.borrow_mut();
        let id = SubscriptionId(inner.next_subscription);
        inner.next_subscription += 1;
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) {
        self.inner
            .borrow_mut()
            .listeners
            .retain(|(existing, _)| *existing != id);
    }

    /// Returns whether there was anything to clear
    fn clear(&self) -> bool {
        let mut inner = self.inner.borrow_mut();
        let had_session = inner.tokens.is_some() || inner.user.is_some();
        inner.tokens = None;
        inner.user = None;
        inner.storage.clear();
        had_session
    }

    fn notify(&self, event: SessionEvent) {
        let listeners: Vec<Listener> = self
            .inner
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }
}

impl PartialEq for Session {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Session")
            .field("authenticated", &inner.tokens.is_some())
            .field("user", &inner.user.as_ref().map(|u| u.username.as_str()))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens() -> AuthTokens {
        AuthTokens {
            access: "access-1".to_string(),
            refresh: "refresh-1".to_string(),
        }
    }

    #[test]
    fn test_init_restores_persisted_credentials() {
        let session = Session::init(MemoryStorage::with_tokens(tokens()));
        assert!(session.is_authenticated());
        assert_eq!(session.access_token().as_deref(), Some("access-1"));
        assert_eq!(session.refresh_token().as_deref(), Some("refresh-1"));

        let empty = Session::init(MemoryStorage::new());
        assert!(!empty.is_authenticated());
    }

    #[test]
    fn test_establish_and_refresh_persist() {
        let storage = MemoryStorage::new();
        let session = Session::init(storage.clone());
        session.establish(tokens());
        assert_eq!(storage.stored(), Some(tokens()));

        session.update_access("access-2".to_string());
        assert_eq!(session.access_token().as_deref(), Some("access-2"));
        assert_eq!(storage.stored().unwrap().access, "access-2");
        assert_eq!(storage.stored().unwrap().refresh, "refresh-1");
    }

    #[test]
    fn test_invalidate_clears_and_notifies() {
        let storage = MemoryStorage::with_tokens(tokens());
        let session = Session::init(storage.clone());
        let events = Rc::new(RefCell::new(Vec::new()));
        let seen = events.clone();
        let observer = session.clone();
        session.subscribe(move |event| {
            // listeners may read the session while being notified
            seen.borrow_mut().push((event, observer.is_authenticated()));
        });

        session.invalidate();
        assert!(!session.is_authenticated());
        assert_eq!(storage.stored(), None);
        assert_eq!(*events.borrow(), vec![(SessionEvent::Expired, false)]);

        // nothing left to tear down
        session.invalidate();
        session.logout();
        assert_eq!(events.borrow().len(), 1);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let session = Session::init(MemoryStorage::new());
        let count = Rc::new(RefCell::new(0));
        let counter = count.clone();
        let id = session.subscribe(move |_| *counter.borrow_mut() += 1);

        session.establish(tokens());
        session.unsubscribe(id);
        session.logout();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_update_access_without_session_is_ignored() {
        let session = Session::init(MemoryStorage::new());
        session.update_access("stray".to_string());
        assert!(!session.is_authenticated());
    }
}
