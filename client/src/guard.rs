//! Client-side route protection.
//!
//! A pure decision function: the router asks what it may render for a
//! protected route given the current session state.

use crate::session::SessionState;

/// What the router should do with a protected route right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// A session restore is still in flight; show a neutral loading
    /// indicator and render nothing protected.
    ShowLoading,
    /// No session. Navigate to the login screen, replacing the current
    /// history entry so "back" does not bounce the user into the guard again.
    RedirectToLogin,
    /// Session confirmed; render the protected layout and its children.
    RenderProtected,
}

/// Maps the session state to a routing decision for protected content.
pub fn evaluate(state: &SessionState) -> RouteDecision {
    match state {
        SessionState::Loading => RouteDecision::ShowLoading,
        SessionState::Unauthenticated { .. } => RouteDecision::RedirectToLogin,
        SessionState::Authenticated { .. } => RouteDecision::RenderProtected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionUser;

    #[test]
    fn decision_follows_the_session_state() {
        assert_eq!(evaluate(&SessionState::Loading), RouteDecision::ShowLoading);

        assert_eq!(
            evaluate(&SessionState::Unauthenticated { error: None }),
            RouteDecision::RedirectToLogin
        );
        assert_eq!(
            evaluate(&SessionState::Unauthenticated {
                error: Some("Incorrect email or password.".to_string())
            }),
            RouteDecision::RedirectToLogin
        );

        let authenticated = SessionState::Authenticated {
            user: SessionUser {
                id: "u-1".to_string(),
                nom: "Alice Martin".to_string(),
                email: "a@x.com".to_string(),
                role: "Seller".to_string(),
                active: true,
            },
            token: "issued-token".to_string(),
        };
        assert_eq!(evaluate(&authenticated), RouteDecision::RenderProtected);
    }
}
