//! In-memory store

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use tokio::sync::broadcast;

use super::reducer::{FilesState, reduce};
use super::{Dispatch, GetState};
use crate::action_types::{Dispatched, FileAction};

const SUBSCRIBER_CAPACITY: usize = 256;

/// Dispatched units kept by default. Older units are dropped first.
pub const DEFAULT_HISTORY_LIMIT: usize = 1024;

struct Inner {
    state: FilesState,
    current_user_id: Option<String>,
    history: VecDeque<Dispatched>,
    history_limit: usize,
}

/// Store holding the files slice and a bounded dispatch history.
///
/// Each dispatched unit is reduced, recorded and broadcast to subscribers
/// under one lock, so subscribers see units in history order.
pub struct MemoryStore {
    inner: Mutex<Inner>,
    notify: broadcast::Sender<Dispatched>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_state(FilesState::default())
    }

    /// Start from an existing files slice.
    pub fn with_state(state: FilesState) -> Self {
        let (notify, _) = broadcast::channel(SUBSCRIBER_CAPACITY);
        Self {
            inner: Mutex::new(Inner {
                state,
                current_user_id: None,
                history: VecDeque::new(),
                history_limit: DEFAULT_HISTORY_LIMIT,
            }),
            notify,
        }
    }

    /// Start with `user_id` signed in.
    pub fn with_current_user(self, user_id: impl Into<String>) -> Self {
        self.set_current_user(Some(user_id.into()));
        self
    }

    /// Sign a user in or out. `LOGOUT_SUCCESS` also signs the user out.
    pub fn set_current_user(&self, user_id: Option<String>) {
        self.lock().current_user_id = user_id;
    }

    /// Keep at most `limit` dispatched units; `0` disables the history.
    pub fn with_history_limit(self, limit: usize) -> Self {
        {
            let mut inner = self.lock();
            inner.history_limit = limit;
            let excess = inner.history.len().saturating_sub(limit);
            inner.history.drain(..excess);
        }
        self
    }

    /// Receive every dispatched unit from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<Dispatched> {
        self.notify.subscribe()
    }

    /// The retained dispatched units, oldest first.
    pub fn history(&self) -> Vec<Dispatched> {
        self.lock().history.iter().cloned().collect()
    }

    /// Retained actions, batches flattened.
    pub fn actions(&self) -> Vec<FileAction> {
        self.lock()
            .history
            .iter()
            .flat_map(|d| d.actions().iter().cloned())
            .collect()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("MemoryStore")
            .field("state", &inner.state)
            .field("current_user_id", &inner.current_user_id)
            .field("history", &inner.history.len())
            .field("history_limit", &inner.history_limit)
            .finish()
    }
}

impl Dispatch for MemoryStore {
    fn dispatch(&self, dispatched: Dispatched) {
        let mut inner = self.lock();
        for action in dispatched.actions() {
            reduce(&mut inner.state, action);
            if matches!(action, FileAction::LogoutSuccess) {
                inner.current_user_id = None;
            }
        }
        if inner.history_limit > 0 {
            if inner.history.len() == inner.history_limit {
                inner.history.pop_front();
            }
            inner.history.push_back(dispatched.clone());
        }
        tracing::trace!(target: "postfiles::store", kinds = ?dispatched.kinds(), "dispatched");
        // No subscribers is fine.
        let _ = self.notify.send(dispatched);
    }
}

impl GetState for MemoryStore {
    fn files_state(&self) -> FilesState {
        self.lock().state.clone()
    }

    fn current_user_id(&self) -> Option<String> {
        self.lock().current_user_id.clone()
    }

    fn has_files_for_post(&self, post_id: &str) -> bool {
        self.lock().state.file_ids_by_post_id.contains_key(post_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FileInfo;

    #[tokio::test]
    async fn batch_is_delivered_as_one_unit() {
        let store = MemoryStore::new();
        let mut rx = store.subscribe();

        store.dispatch(Dispatched::Batch(vec![
            FileAction::ReceivedFilesForPost {
                data: vec![FileInfo {
                    id: "f1".into(),
                    ..Default::default()
                }],
                post_id: "p1".into(),
            },
            FileAction::FetchFilesForPostSuccess,
        ]));

        let got = rx.recv().await.unwrap();
        assert_eq!(
            got.kinds(),
            vec!["RECEIVED_FILES_FOR_POST", "FETCH_FILES_FOR_POST_SUCCESS"]
        );
        assert!(store.has_files_for_post("p1"));
        assert_eq!(store.history().len(), 1);
        assert_eq!(store.actions().len(), 2);
    }

    #[test]
    fn seeded_state_is_readable() {
        let mut state = FilesState::default();
        state
            .file_ids_by_post_id
            .insert("p1".into(), Default::default());
        let store = MemoryStore::with_state(state);
        assert!(store.has_files_for_post("p1"));
        assert!(!store.has_files_for_post("p2"));
    }

    #[test]
    fn history_is_bounded() {
        let store = MemoryStore::new().with_history_limit(2);
        store.dispatch(FileAction::FetchFilesForPostRequest.into());
        store.dispatch(FileAction::UploadFilesRequest.into());
        store.dispatch(FileAction::GetFilePublicLinkRequest.into());

        let kinds: Vec<_> = store.history().iter().map(Dispatched::kinds).collect();
        assert_eq!(
            kinds,
            vec![
                vec!["UPLOAD_FILES_REQUEST"],
                vec!["GET_FILE_PUBLIC_LINK_REQUEST"]
            ]
        );
    }

    #[test]
    fn zero_limit_keeps_state_but_no_history() {
        let store = MemoryStore::new().with_history_limit(0);
        store.dispatch(
            FileAction::ReceivedFilesForPost {
                data: Vec::new(),
                post_id: "p1".into(),
            }
            .into(),
        );
        assert!(store.history().is_empty());
        assert!(store.has_files_for_post("p1"));
    }

    #[test]
    fn default_limit_caps_long_runs() {
        let store = MemoryStore::new();
        for _ in 0..DEFAULT_HISTORY_LIMIT + 10 {
            store.dispatch(FileAction::UploadFilesSuccess.into());
        }
        assert_eq!(store.history().len(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn concurrent_dispatches_broadcast_in_history_order() {
        let store = std::sync::Arc::new(MemoryStore::new());
        let mut rx = store.subscribe();

        let handles: Vec<_> = (0..4)
            .map(|t| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for i in 0..25 {
                        store.dispatch(
                            FileAction::ReceivedFilesForPost {
                                data: Vec::new(),
                                post_id: format!("{t}-{i}"),
                            }
                            .into(),
                        );
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let mut broadcast = Vec::new();
        while let Ok(unit) = rx.try_recv() {
            broadcast.push(unit);
        }
        assert_eq!(broadcast.len(), 100);
        assert_eq!(broadcast, store.history());
    }

    #[test]
    fn logout_signs_the_user_out() {
        let store = MemoryStore::new().with_current_user("u1");
        assert_eq!(store.current_user_id().as_deref(), Some("u1"));
        store.dispatch(FileAction::LogoutSuccess.into());
        assert_eq!(store.current_user_id(), None);
    }
}
