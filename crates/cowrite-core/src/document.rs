//! Local document content and reconciliation state

use tracing::debug;

/// A local edit the store decided to publish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalChange {
    /// Full replacement content.
    pub content: String,
    /// The revision the edit was derived from.
    pub client_revision: u64,
}

/// The local view of one document's content.
///
/// The store reconciles edits reported by the editing surface with operations
/// received from other collaborators. The protocol carries full-content
/// snapshots, so reconciliation is last-write-wins: the store's job is to
/// decide which surface reports become outbound operations and to keep a
/// remote apply from being re-reported as a local edit.
///
/// Owned by exactly one document view; remote applies must bracket the
/// surface's replace call with [`begin_remote_apply`](Self::begin_remote_apply)
/// and [`end_remote_apply`](Self::end_remote_apply), with no suspension point
/// in between.
#[derive(Debug, Default)]
pub struct ContentStore {
    last_content: String,
    revision: u64,
    applying_remote: bool,
}

impl ContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed content and revision from a fetched document snapshot.
    pub fn seed(&mut self, content: impl Into<String>, revision: u64) {
        self.last_content = content.into();
        self.revision = revision;
    }

    /// The last content this store recorded, from either a local edit or a
    /// remote apply.
    pub fn content(&self) -> &str {
        &self.last_content
    }

    /// The revision carried on outbound operations.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_applying_remote(&self) -> bool {
        self.applying_remote
    }

    /// Record a content change reported by the editing surface.
    ///
    /// Returns `None` while a remote apply is in progress (the surface is
    /// re-reporting content we just applied) and when the reported content
    /// equals the last recorded content. Otherwise the change is recorded and
    /// returned for transmission.
    pub fn note_local_change(&mut self, new_content: &str) -> Option<LocalChange> {
        if self.applying_remote {
            debug!("suppressing echo of remote apply");
            return None;
        }
        if new_content == self.last_content {
            return None;
        }

        self.last_content = new_content.to_owned();
        Some(LocalChange {
            content: self.last_content.clone(),
            client_revision: self.revision,
        })
    }

    /// Enter suppression before handing remote content to the editing
    /// surface.
    pub fn begin_remote_apply(&mut self) {
        self.applying_remote = true;
    }

    /// Leave suppression once the surface replace has completed, recording
    /// the applied content.
    pub fn end_remote_apply(&mut self, applied: &str) {
        self.last_content = applied.to_owned();
        self.applying_remote = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_change_emitted() {
        let mut store = ContentStore::new();
        store.seed("Hello", 3);

        let change = store.note_local_change("Hello, world").unwrap();

        assert_eq!(change.content, "Hello, world");
        assert_eq!(change.client_revision, 3);
        assert_eq!(store.content(), "Hello, world");
    }

    #[test]
    fn test_identical_content_is_noop() {
        let mut store = ContentStore::new();
        store.seed("Hello", 1);

        assert_eq!(store.note_local_change("Hello"), None);
    }

    #[test]
    fn test_remote_apply_suppresses_echo() {
        let mut store = ContentStore::new();
        store.seed("", 0);

        store.begin_remote_apply();
        // The surface re-reports the replace as a change while suppression
        // is active.
        assert_eq!(store.note_local_change("from remote"), None);
        store.end_remote_apply("from remote");

        // A later report of the same content is identical, so still no-op.
        assert_eq!(store.note_local_change("from remote"), None);
        assert_eq!(store.content(), "from remote");
        assert!(!store.is_applying_remote());
    }

    #[test]
    fn test_edit_after_remote_apply_is_emitted() {
        let mut store = ContentStore::new();
        store.seed("", 7);

        store.begin_remote_apply();
        store.end_remote_apply("remote text");

        let change = store.note_local_change("remote text, plus mine").unwrap();
        assert_eq!(change.content, "remote text, plus mine");
        assert_eq!(change.client_revision, 7);
    }

    #[test]
    fn test_seed_resets_marker() {
        let mut store = ContentStore::new();
        store.note_local_change("scratch");

        store.seed("fetched", 12);

        assert_eq!(store.content(), "fetched");
        assert_eq!(store.revision(), 12);
        assert_eq!(store.note_local_change("fetched"), None);
    }
}
