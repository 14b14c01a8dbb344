//! Session expiry checks run on every failed request.

use crate::action_types::FileAction;
use crate::error::ClientError;
use crate::store::{Dispatch, GetState};

/// Hook invoked with the original error before any failure event is
/// dispatched.
pub trait SessionGuard: Send + Sync {
    fn check_session_expiry(
        &self,
        error: &ClientError,
        dispatch: &dyn Dispatch,
        get_state: &dyn GetState,
    );
}

/// Dispatches `LOGOUT_SUCCESS` when a request outside the login routes was
/// rejected with 401 while a user is signed in.
#[derive(Debug, Clone, Default)]
pub struct ForceLogoutGuard;

impl ForceLogoutGuard {
    fn is_login_route(url: &str) -> bool {
        url.contains("/login")
    }
}

impl SessionGuard for ForceLogoutGuard {
    fn check_session_expiry(
        &self,
        error: &ClientError,
        dispatch: &dyn Dispatch,
        get_state: &dyn GetState,
    ) {
        if !error.is_unauthorized() {
            return;
        }
        let Some(url) = error.url() else {
            return;
        };
        if Self::is_login_route(url) {
            return;
        }
        if get_state.current_user_id().is_none() {
            tracing::debug!(target: "postfiles::session", url = %url, "401 without a signed-in user");
            return;
        }
        tracing::warn!(target: "postfiles::session", url = %url, "session expired, logging out");
        dispatch.dispatch(FileAction::LogoutSuccess.into());
    }
}

/// Guard that never acts.
#[derive(Debug, Clone, Default)]
pub struct NoopSessionGuard;

impl SessionGuard for NoopSessionGuard {
    fn check_session_expiry(&self, _: &ClientError, _: &dyn Dispatch, _: &dyn GetState) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn unauthorized(url: &str) -> ClientError {
        ClientError::ApiError {
            code: 401,
            message: "expired".into(),
            server_error_id: None,
            url: Some(url.into()),
        }
    }

    #[test]
    fn logs_out_on_401_outside_login() {
        let store = MemoryStore::new().with_current_user("u1");
        ForceLogoutGuard.check_session_expiry(
            &unauthorized("http://localhost/api/v4/files"),
            &store,
            &store,
        );
        assert_eq!(store.actions(), vec![FileAction::LogoutSuccess]);
    }

    #[test]
    fn ignores_login_route_and_other_statuses() {
        let store = MemoryStore::new().with_current_user("u1");
        ForceLogoutGuard.check_session_expiry(
            &unauthorized("http://localhost/api/v4/users/login"),
            &store,
            &store,
        );
        ForceLogoutGuard.check_session_expiry(
            &ClientError::api_error(500, "boom"),
            &store,
            &store,
        );
        ForceLogoutGuard.check_session_expiry(
            &ClientError::api_error(401, "no url"),
            &store,
            &store,
        );
        assert!(store.history().is_empty());
    }

    #[test]
    fn ignores_401_without_signed_in_user() {
        let store = MemoryStore::new();
        ForceLogoutGuard.check_session_expiry(
            &unauthorized("http://localhost/api/v4/files"),
            &store,
            &store,
        );
        assert!(store.history().is_empty());
    }
}
