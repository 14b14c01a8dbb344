//! Shared request/success/failure plumbing for the actions.

use std::future::Future;
use std::sync::Arc;

use super::errors::log_error;
use crate::action_types::{Dispatched, FileAction};
use crate::error::ClientError;
use crate::session::{ForceLogoutGuard, SessionGuard};
use crate::store::{Dispatch, GetState};
use crate::types::ActionResult;

/// Everything an action needs besides the network client: where events go,
/// where state is read from, and who checks for expired sessions.
#[derive(Clone)]
pub struct ActionContext {
    dispatch: Arc<dyn Dispatch>,
    get_state: Arc<dyn GetState>,
    session: Arc<dyn SessionGuard>,
}

impl ActionContext {
    /// Context with the default [`ForceLogoutGuard`].
    pub fn new(dispatch: Arc<dyn Dispatch>, get_state: Arc<dyn GetState>) -> Self {
        Self {
            dispatch,
            get_state,
            session: Arc::new(ForceLogoutGuard),
        }
    }

    /// Use one store as both sink and state source.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: Dispatch + GetState + 'static,
    {
        Self::new(store.clone(), store)
    }

    pub fn with_session_guard(mut self, session: Arc<dyn SessionGuard>) -> Self {
        self.session = session;
        self
    }

    pub fn dispatch(&self, dispatched: impl Into<Dispatched>) {
        self.dispatch.dispatch(dispatched.into());
    }

    pub fn get_state(&self) -> &dyn GetState {
        self.get_state.as_ref()
    }

    /// Session check, then the failure event and its log event as one batch.
    pub fn report_failure(&self, error: &ClientError, failure: FileAction) {
        self.session
            .check_session_expiry(error, self.dispatch.as_ref(), self.get_state.as_ref());
        self.dispatch(vec![failure, log_error(error)]);
    }
}

impl std::fmt::Debug for ActionContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext").finish_non_exhaustive()
    }
}

type SuccessFn<'a, T> = Box<dyn FnOnce(&T) -> Vec<FileAction> + Send + 'a>;
type FailureFn<'a> = Box<dyn FnOnce(ClientError) -> FileAction + Send + 'a>;

/// The events a client call is bound to.
pub struct ClientFuncBinding<'a, T> {
    request: FileAction,
    on_success: SuccessFn<'a, T>,
    on_failure: FailureFn<'a>,
}

impl<'a, T> ClientFuncBinding<'a, T> {
    /// `on_success` maps the response to the terminal events (applied as one
    /// batch when there is more than one); `on_failure` builds the failure
    /// event from the original error.
    pub fn new(
        request: FileAction,
        on_success: impl FnOnce(&T) -> Vec<FileAction> + Send + 'a,
        on_failure: impl FnOnce(ClientError) -> FileAction + Send + 'a,
    ) -> Self {
        Self {
            request,
            on_success: Box::new(on_success),
            on_failure: Box::new(on_failure),
        }
    }

    /// Bind to a received event and a success event, both carrying the
    /// response, and a failure event.
    pub fn with_kinds(
        request: FileAction,
        received: fn(&T) -> FileAction,
        success: fn(&T) -> FileAction,
        failure: fn(ClientError) -> FileAction,
    ) -> Self
    where
        T: 'a,
    {
        Self::new(
            request,
            move |data| vec![received(data), success(data)],
            failure,
        )
    }
}

/// Run one client call wrapped in its request, terminal and failure events.
///
/// The request event is dispatched before `call` is first polled. On error
/// the session guard runs once with the original error before the
/// failure+log batch is dispatched.
pub async fn bind_client_func<T, F>(
    ctx: &ActionContext,
    binding: ClientFuncBinding<'_, T>,
    call: F,
) -> ActionResult<T>
where
    F: Future<Output = Result<T, ClientError>>,
{
    let ClientFuncBinding {
        request,
        on_success,
        on_failure,
    } = binding;

    let request_kind = request.kind();
    tracing::debug!(target: "postfiles::actions", action = request_kind, "request started");
    ctx.dispatch(request);

    match call.await {
        Ok(data) => {
            let mut actions = on_success(&data);
            tracing::debug!(target: "postfiles::actions", action = request_kind, "request succeeded");
            if actions.len() == 1 {
                ctx.dispatch(actions.remove(0));
            } else {
                ctx.dispatch(actions);
            }
            ActionResult::Data(data)
        }
        Err(error) => {
            let failure = on_failure(error.clone());
            ctx.report_failure(&error, failure);
            ActionResult::Error(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::NoopSessionGuard;
    use crate::store::MemoryStore;
    use crate::types::FilePublicLink;

    fn ctx(store: &Arc<MemoryStore>) -> ActionContext {
        ActionContext::from_store(store.clone()).with_session_guard(Arc::new(NoopSessionGuard))
    }

    fn link_binding<'a>() -> ClientFuncBinding<'a, FilePublicLink> {
        ClientFuncBinding::with_kinds(
            FileAction::GetFilePublicLinkRequest,
            |data| FileAction::ReceivedFilePublicLink { data: data.clone() },
            |data| FileAction::GetFilePublicLinkSuccess { data: data.clone() },
            |error| FileAction::GetFilePublicLinkFailure { error },
        )
    }

    #[tokio::test]
    async fn success_dispatches_request_then_one_batch() {
        let store = Arc::new(MemoryStore::new());
        let res = bind_client_func(&ctx(&store), link_binding(), async {
            Ok(FilePublicLink {
                link: "https://l".into(),
            })
        })
        .await;

        assert!(res.is_data());
        let history = store.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].kinds(), vec!["GET_FILE_PUBLIC_LINK_REQUEST"]);
        assert!(history[1].is_batch());
        assert_eq!(
            history[1].kinds(),
            vec!["RECEIVED_FILE_PUBLIC_LINK", "GET_FILE_PUBLIC_LINK_SUCCESS"]
        );
        assert_eq!(
            history[1].actions()[1],
            FileAction::GetFilePublicLinkSuccess {
                data: FilePublicLink {
                    link: "https://l".into(),
                },
            }
        );
    }

    #[tokio::test]
    async fn failure_dispatches_failure_and_log_batch() {
        let store = Arc::new(MemoryStore::new());
        let res = bind_client_func(&ctx(&store), link_binding(), async {
            Err(ClientError::api_error(404, "gone"))
        })
        .await;

        assert_eq!(res.error(), Some(&ClientError::api_error(404, "gone")));
        let history = store.history();
        assert_eq!(history.len(), 2);
        assert_eq!(
            history[1].kinds(),
            vec!["GET_FILE_PUBLIC_LINK_FAILURE", "LOG_ERROR"]
        );
    }

    #[tokio::test]
    async fn single_terminal_event_is_not_batched() {
        let store = Arc::new(MemoryStore::new());
        let binding = ClientFuncBinding::new(
            FileAction::UploadFilesRequest,
            |_: &u8| vec![FileAction::UploadFilesSuccess],
            |error| FileAction::GetFilePublicLinkFailure { error },
        );
        bind_client_func(&ctx(&store), binding, async { Ok(1u8) }).await;
        assert!(!store.history()[1].is_batch());
    }
}
