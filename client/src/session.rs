//! The client's single source of truth for authentication state.
//!
//! All mutation happens through the action methods on [`SessionManager`];
//! the UI layer only ever reads. The manager is constructed with its token
//! store and API client injected, so tests can run it against stubs and an
//! application can build a fresh one at startup.

use crate::api::{ApiError, AuthApi};
use crate::models::{LoginRequest, RegisterRequest, SessionUser};
use crate::storage::TokenStore;

/// What the UI is allowed to assume about the session right now.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    /// A persisted token is being validated against the server; protected
    /// content must not render yet.
    Loading,
    /// The server has confirmed this user for this token.
    Authenticated { user: SessionUser, token: String },
    /// No confirmed session. `error` carries the server's message after a
    /// failed login or registration, for display.
    Unauthenticated { error: Option<String> },
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated { .. })
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }
}

/// Owns the session lifecycle: restore on startup, login/register/logout,
/// and global invalidation on any 401.
pub struct SessionManager<S: TokenStore, A: AuthApi> {
    storage: S,
    api: A,
    state: SessionState,
}

impl<S: TokenStore, A: AuthApi> SessionManager<S, A> {
    /// Builds the manager. When the store holds a token the state starts as
    /// `Loading` until [`initialize`](Self::initialize) has validated it.
    pub fn new(storage: S, api: A) -> Self {
        let state = if storage.load().is_some() {
            SessionState::Loading
        } else {
            SessionState::Unauthenticated { error: None }
        };

        Self {
            storage,
            api,
            state,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    pub fn user(&self) -> Option<&SessionUser> {
        match &self.state {
            SessionState::Authenticated { user, .. } => Some(user),
            _ => None,
        }
    }

    /// The token to attach to outbound requests, when a session is active.
    pub fn bearer_token(&self) -> Option<&str> {
        match &self.state {
            SessionState::Authenticated { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SessionState::Unauthenticated { error } => error.as_deref(),
            _ => None,
        }
    }

    /// Validates a persisted token against the server at application start.
    ///
    /// Any failure, an expired token included, purges the stored token and
    /// lands in `Unauthenticated` without an error message: a dead session
    /// is routine, not something to alarm the user about.
    pub async fn initialize(&mut self) -> &SessionState {
        let Some(token) = self.storage.load() else {
            self.state = SessionState::Unauthenticated { error: None };
            return &self.state;
        };

        self.state = SessionState::Loading;
        match self.api.me(&token).await {
            Ok(user) => {
                self.state = SessionState::Authenticated { user, token };
            }
            Err(error) => {
                tracing::debug!("stored session rejected: {}", error);
                self.storage.clear();
                self.state = SessionState::Unauthenticated { error: None };
            }
        }
        &self.state
    }

    /// Logs in with the given credentials.
    pub async fn login(&mut self, request: LoginRequest) -> &SessionState {
        self.state = SessionState::Loading;
        let result = self.api.login(&request).await;
        self.apply_auth_result(result)
    }

    /// Registers a new account; a success is also a login.
    pub async fn register(&mut self, request: RegisterRequest) -> &SessionState {
        self.state = SessionState::Loading;
        let result = self.api.register(&request).await;
        self.apply_auth_result(result)
    }

    /// Ends the session immediately. Tokens are stateless, so there is no
    /// server round-trip: dropping the token is the logout.
    pub fn logout(&mut self) {
        self.storage.clear();
        self.state = SessionState::Unauthenticated { error: None };
    }

    /// Global invalidation hook: call with the error of *any* failed request.
    /// A 401 from anywhere means the token is dead, whatever screen
    /// triggered it. Returns whether the session was invalidated.
    ///
    /// Requests already in flight when this fires simply complete and get
    /// discarded by their callers; nothing here can make them fail twice.
    pub fn handle_unauthorized(&mut self, error: &ApiError) -> bool {
        if !error.is_unauthorized() {
            return false;
        }

        tracing::debug!("session invalidated by an unauthorized response");
        self.storage.clear();
        self.state = SessionState::Unauthenticated { error: None };
        true
    }

    /// Clears a displayed error without touching anything else.
    pub fn reset_error(&mut self) {
        if let SessionState::Unauthenticated { error } = &mut self.state {
            *error = None;
        }
    }

    fn apply_auth_result(&mut self, result: Result<crate::models::AuthSuccess, ApiError>) -> &SessionState {
        match result {
            Ok(success) => {
                self.storage.save(&success.token);
                self.state = SessionState::Authenticated {
                    user: success.user,
                    token: success.token,
                };
            }
            Err(error) => {
                self.storage.clear();
                self.state = SessionState::Unauthenticated {
                    error: Some(error.message),
                };
            }
        }
        &self.state
    }
}
