//! Store seams
//!
//! The actions only ever write events to a [`Dispatch`] sink and read one
//! index through [`GetState`]. [`MemoryStore`] implements both for tests and
//! simple hosts.

pub mod memory;
pub mod reducer;

pub use memory::MemoryStore;
pub use reducer::{FilesState, reduce};

use crate::action_types::Dispatched;

/// Sink for store events.
///
/// Implementations must apply a [`Dispatched::Batch`] atomically: observers
/// never see part of a batch.
pub trait Dispatch: Send + Sync {
    fn dispatch(&self, dispatched: Dispatched);
}

/// Read surface of the store used by the actions.
pub trait GetState: Send + Sync {
    /// Snapshot of the files slice.
    fn files_state(&self) -> FilesState;

    /// Id of the signed-in user, if any.
    fn current_user_id(&self) -> Option<String>;

    /// Whether the post already has an entry in `file_ids_by_post_id`.
    ///
    /// An entry with an empty set still counts as known.
    fn has_files_for_post(&self, post_id: &str) -> bool {
        self.files_state().file_ids_by_post_id.contains_key(post_id)
    }
}
