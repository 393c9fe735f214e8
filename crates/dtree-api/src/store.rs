//! Decision tree persistence.
//!
//! `TreeStore` is the seam a real database plugs into. The service ships
//! with `MemoryStore`, an in-process implementation used by default and by
//! the tests. Stores only ever receive `ValidatedTree`s.

use std::collections::HashMap;

use dtree_core::determinism::tree_fingerprint;
use dtree_core::model::ValidatedTree;
use dtree_core::DtreeError;
use parking_lot::RwLock;
use thiserror::Error;
use time::OffsetDateTime;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to fingerprint tree: {0}")]
    Fingerprint(#[from] DtreeError),

    #[error("storage backend error: {0}")]
    Backend(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone)]
pub struct TreeRecord {
    pub id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    /// Fingerprint of `tree`.
    pub revision: String,
    pub tree: ValidatedTree,
}

#[derive(Debug, Clone)]
pub struct TreeSummary {
    pub id: Uuid,
    pub name: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl From<&TreeRecord> for TreeSummary {
    fn from(r: &TreeRecord) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Fields to change; `None` leaves a field untouched.
#[derive(Debug, Clone, Default)]
pub struct TreePatch {
    pub name: Option<String>,
    pub tree: Option<ValidatedTree>,
}

impl TreePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.tree.is_none()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub skip: usize,
    pub take: usize,
}

pub trait TreeStore: Send + Sync {
    fn insert(&self, name: String, tree: ValidatedTree) -> StoreResult<TreeRecord>;

    fn get(&self, id: Uuid) -> StoreResult<Option<TreeRecord>>;

    /// Most recently updated first.
    fn list(&self, page: Page) -> StoreResult<Vec<TreeSummary>>;

    /// Returns the updated record, or `None` if `id` is unknown.
    fn update(&self, id: Uuid, patch: TreePatch) -> StoreResult<Option<TreeRecord>>;

    /// Returns whether a record was removed.
    fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

#[derive(Debug)]
struct Entry {
    record: TreeRecord,
    /// Write sequence; breaks ties between equal `updated_at` timestamps.
    seq: u64,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<Uuid, Entry>,
    next_seq: u64,
}

impl Inner {
    fn bump(&mut self) -> u64 {
        self.next_seq += 1;
        self.next_seq
    }
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TreeStore for MemoryStore {
    fn insert(&self, name: String, tree: ValidatedTree) -> StoreResult<TreeRecord> {
        let revision = tree_fingerprint(&tree)?;
        let now = OffsetDateTime::now_utc();
        let record = TreeRecord {
            id: Uuid::new_v4(),
            name,
            created_at: now,
            updated_at: now,
            revision,
            tree,
        };

        let mut inner = self.inner.write();
        let seq = inner.bump();
        inner.entries.insert(
            record.id,
            Entry {
                record: record.clone(),
                seq,
            },
        );
        Ok(record)
    }

    fn get(&self, id: Uuid) -> StoreResult<Option<TreeRecord>> {
        Ok(self.inner.read().entries.get(&id).map(|e| e.record.clone()))
    }

    fn list(&self, page: Page) -> StoreResult<Vec<TreeSummary>> {
        let inner = self.inner.read();
        let mut entries: Vec<&Entry> = inner.entries.values().collect();
        entries.sort_by(|a, b| {
            (b.record.updated_at, b.seq).cmp(&(a.record.updated_at, a.seq))
        });

        Ok(entries
            .into_iter()
            .skip(page.skip)
            .take(page.take)
            .map(|e| TreeSummary::from(&e.record))
            .collect())
    }

    fn update(&self, id: Uuid, patch: TreePatch) -> StoreResult<Option<TreeRecord>> {
        let revision = patch.tree.as_ref().map(tree_fingerprint).transpose()?;

        let mut inner = self.inner.write();
        let seq = inner.bump();
        let Some(entry) = inner.entries.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            entry.record.name = name;
        }
        if let (Some(tree), Some(revision)) = (patch.tree, revision) {
            entry.record.tree = tree;
            entry.record.revision = revision;
        }
        entry.record.updated_at = OffsetDateTime::now_utc();
        entry.seq = seq;

        Ok(Some(entry.record.clone()))
    }

    fn delete(&self, id: Uuid) -> StoreResult<bool> {
        Ok(self.inner.write().entries.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dtree_core::validate_tree;
    use serde_json::json;

    fn tree(zoom: f64) -> ValidatedTree {
        validate_tree(&json!({ "nodes": [], "edges": [], "viewport": { "x": 0, "y": 0, "zoom": zoom } }))
            .unwrap()
    }

    #[test]
    fn insert_get_delete() {
        let store = MemoryStore::new();
        let rec = store.insert("first".into(), tree(1.0)).unwrap();
        assert_eq!(rec.revision.len(), 64);

        let got = store.get(rec.id).unwrap().unwrap();
        assert_eq!(got.name, "first");
        assert_eq!(got.tree, rec.tree);

        assert!(store.delete(rec.id).unwrap());
        assert!(!store.delete(rec.id).unwrap());
        assert!(store.get(rec.id).unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn list_orders_by_most_recent_update() {
        let store = MemoryStore::new();
        let a = store.insert("a".into(), tree(1.0)).unwrap();
        store.insert("b".into(), tree(1.0)).unwrap();
        store.insert("c".into(), tree(1.0)).unwrap();

        let names = |v: Vec<TreeSummary>| v.into_iter().map(|s| s.name).collect::<Vec<_>>();
        let all = Page { skip: 0, take: 20 };
        assert_eq!(names(store.list(all).unwrap()), ["c", "b", "a"]);

        store
            .update(a.id, TreePatch { name: Some("a2".into()), tree: None })
            .unwrap()
            .unwrap();
        assert_eq!(names(store.list(all).unwrap()), ["a2", "c", "b"]);

        assert_eq!(names(store.list(Page { skip: 1, take: 1 }).unwrap()), ["c"]);
        assert!(store.list(Page { skip: 5, take: 5 }).unwrap().is_empty());
    }

    #[test]
    fn update_replaces_tree_and_revision() {
        let store = MemoryStore::new();
        let rec = store.insert("t".into(), tree(1.0)).unwrap();

        let updated = store
            .update(rec.id, TreePatch { name: None, tree: Some(tree(2.0)) })
            .unwrap()
            .unwrap();
        assert_eq!(updated.name, "t");
        assert_eq!(updated.tree.viewport().zoom, 2.0);
        assert_ne!(updated.revision, rec.revision);
        assert!(updated.updated_at >= rec.updated_at);
    }

    #[test]
    fn update_unknown_id() {
        let store = MemoryStore::new();
        let out = store.update(Uuid::new_v4(), TreePatch::default()).unwrap();
        assert!(out.is_none());
    }
}
