//! Anonymous-session auth contracts and an in-memory auth provider.

use std::{cell::RefCell, future::Future, pin::Pin, rc::Rc};

use serde::{Deserialize, Serialize};

use crate::subscription::{Listener, ListenerRegistry, Subscription};

/// Object-safe boxed future used by [`AuthService`] async methods.
pub type AuthFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Authenticated identity handed out by the auth collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Session {
    /// Stable user id; keys the per-user favorites document.
    pub uid: String,
}

impl Session {
    /// Creates a session for `uid`.
    pub fn new(uid: impl Into<String>) -> Self {
        Self { uid: uid.into() }
    }
}

/// Host service that establishes and tracks an anonymous identity.
pub trait AuthService {
    /// Requests a new (or restored) anonymous session.
    fn sign_in_anonymously<'a>(&'a self) -> AuthFuture<'a, Result<Session, String>>;

    /// Ends the current session; listeners observe `None`.
    fn sign_out<'a>(&'a self) -> AuthFuture<'a, Result<(), String>>;

    /// Returns the session known right now, if any.
    fn current_session(&self) -> Option<Session>;

    /// Registers a listener for every auth-state change.
    ///
    /// The listener is invoked once immediately with the current state.
    fn on_auth_state_changed(&self, listener: Listener<Option<Session>>) -> Subscription;
}

#[derive(Debug, Clone, Copy, Default)]
/// Auth service for hosts without a configured backend; sign-in always fails.
pub struct NoopAuthService;

impl AuthService for NoopAuthService {
    fn sign_in_anonymously<'a>(&'a self) -> AuthFuture<'a, Result<Session, String>> {
        Box::pin(async { Err("anonymous sign-in is unavailable on this host".to_string()) })
    }

    fn sign_out<'a>(&'a self) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(async { Ok(()) })
    }

    fn current_session(&self) -> Option<Session> {
        None
    }

    fn on_auth_state_changed(&self, listener: Listener<Option<Session>>) -> Subscription {
        listener(None);
        Subscription::noop()
    }
}

#[derive(Debug, Default)]
struct MemoryAuthInner {
    session: Option<Session>,
    issued: u64,
    sign_in_error: Option<String>,
}

#[derive(Debug, Clone, Default)]
/// In-memory auth provider that mints sequential anonymous uids.
pub struct MemoryAuthService {
    inner: Rc<RefCell<MemoryAuthInner>>,
    listeners: ListenerRegistry<Option<Session>>,
}

impl MemoryAuthService {
    /// Makes every subsequent sign-in fail with `message`.
    pub fn fail_sign_in_with(&self, message: impl Into<String>) {
        self.inner.borrow_mut().sign_in_error = Some(message.into());
    }

    /// Number of live auth-state listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn set_session(&self, session: Option<Session>) {
        self.inner.borrow_mut().session = session.clone();
        self.listeners.emit(session);
    }
}

impl AuthService for MemoryAuthService {
    fn sign_in_anonymously<'a>(&'a self) -> AuthFuture<'a, Result<Session, String>> {
        Box::pin(async move {
            let existing = {
                let inner = self.inner.borrow();
                if let Some(message) = inner.sign_in_error.clone() {
                    return Err(message);
                }
                inner.session.clone()
            };
            if let Some(session) = existing {
                return Ok(session);
            }
            let session = {
                let mut inner = self.inner.borrow_mut();
                inner.issued += 1;
                Session::new(format!("anon-{}", inner.issued))
            };
            self.set_session(Some(session.clone()));
            Ok(session)
        })
    }

    fn sign_out<'a>(&'a self) -> AuthFuture<'a, Result<(), String>> {
        Box::pin(async move {
            self.set_session(None);
            Ok(())
        })
    }

    fn current_session(&self) -> Option<Session> {
        self.inner.borrow().session.clone()
    }

    fn on_auth_state_changed(&self, listener: Listener<Option<Session>>) -> Subscription {
        listener(self.current_session());
        self.listeners.subscribe(listener)
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn memory_auth_notifies_sign_in_and_sign_out() {
        let auth = MemoryAuthService::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _subscription =
            auth.on_auth_state_changed(Rc::new(move |session| sink.borrow_mut().push(session)));

        let session = block_on(auth.sign_in_anonymously()).expect("sign in");
        block_on(auth.sign_out()).expect("sign out");

        assert_eq!(*seen.borrow(), vec![None, Some(session), None]);
    }

    #[test]
    fn repeated_sign_in_reuses_existing_session() {
        let auth = MemoryAuthService::default();
        let first = block_on(auth.sign_in_anonymously()).expect("first");
        let second = block_on(auth.sign_in_anonymously()).expect("second");
        assert_eq!(first, second);
        assert_eq!(first.uid, "anon-1");
    }

    #[test]
    fn failing_sign_in_leaves_session_empty() {
        let auth = MemoryAuthService::default();
        auth.fail_sign_in_with("operation-not-allowed");

        let err = block_on(auth.sign_in_anonymously()).expect_err("sign in fails");

        assert_eq!(err, "operation-not-allowed");
        assert_eq!(auth.current_session(), None);
    }

    #[test]
    fn noop_auth_reports_signed_out_state() {
        let auth = NoopAuthService;
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _subscription =
            auth.on_auth_state_changed(Rc::new(move |session| sink.borrow_mut().push(session)));

        assert!(block_on(auth.sign_in_anonymously()).is_err());
        assert_eq!(*seen.borrow(), vec![None]);
    }
}
