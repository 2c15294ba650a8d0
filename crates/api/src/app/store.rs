//! In-memory record collections.
//!
//! Stand-in for the relational store the dashboard talks to; business
//! functions only see the [`RecordStore`] trait.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use admissions_core::{DomainError, DomainResult, Entity};

/// Keyed record storage used by business functions.
pub trait RecordStore<V: Entity>: Send + Sync {
    /// Record kind used in error messages ("university not found").
    fn kind(&self) -> &'static str;

    fn get(&self, id: &V::Id) -> Option<V>;

    /// Insert a new record, failing with `AlreadyExists` if the id is taken or an
    /// existing record `clashes` with it.
    fn insert_unique(&self, record: V, clashes: &dyn Fn(&V) -> bool) -> DomainResult<V>;

    /// Replace an existing record, failing with `NotFound` if absent and with
    /// `AlreadyExists` if any other record `clashes` with the new value.
    fn replace_unique(&self, record: V, clashes: &dyn Fn(&V) -> bool) -> DomainResult<V>;

    fn remove(&self, id: &V::Id) -> Option<V>;

    /// All records in id order (creation order for UUIDv7 ids).
    fn list(&self) -> Vec<V>;

    fn insert(&self, record: V) -> DomainResult<V> {
        self.insert_unique(record, &|_: &V| false)
    }

    fn replace(&self, record: V) -> DomainResult<V> {
        self.replace_unique(record, &|_: &V| false)
    }

    fn fetch(&self, id: &V::Id) -> DomainResult<V> {
        self.get(id).ok_or_else(|| DomainError::not_found(self.kind()))
    }

    /// Remove and return a record, failing with `NotFound` if absent.
    fn delete(&self, id: &V::Id) -> DomainResult<V> {
        self.remove(id).ok_or_else(|| DomainError::not_found(self.kind()))
    }
}

impl<V, S> RecordStore<V> for Arc<S>
where
    V: Entity,
    S: RecordStore<V> + ?Sized,
{
    fn kind(&self) -> &'static str {
        (**self).kind()
    }

    fn get(&self, id: &V::Id) -> Option<V> {
        (**self).get(id)
    }

    fn insert_unique(&self, record: V, clashes: &dyn Fn(&V) -> bool) -> DomainResult<V> {
        (**self).insert_unique(record, clashes)
    }

    fn replace_unique(&self, record: V, clashes: &dyn Fn(&V) -> bool) -> DomainResult<V> {
        (**self).replace_unique(record, clashes)
    }

    fn remove(&self, id: &V::Id) -> Option<V> {
        (**self).remove(id)
    }

    fn list(&self) -> Vec<V> {
        (**self).list()
    }
}

/// In-memory collection for tests/dev.
#[derive(Debug)]
pub struct Collection<V: Entity> {
    kind: &'static str,
    inner: RwLock<BTreeMap<V::Id, V>>,
}

impl<V: Entity> Collection<V> {
    /// `kind` names the record type in error messages ("university not found").
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            inner: RwLock::new(BTreeMap::new()),
        }
    }

    /// A collection pre-filled with `records` (later duplicates win).
    pub fn with_records(kind: &'static str, records: impl IntoIterator<Item = V>) -> Self {
        let map = records
            .into_iter()
            .map(|record| (record.id().clone(), record))
            .collect();
        Self {
            kind,
            inner: RwLock::new(map),
        }
    }

    /// First record matching `pred`.
    pub fn find(&self, pred: impl Fn(&V) -> bool) -> Option<V>
    where
        V: Clone,
    {
        self.read().values().find(|v| pred(v)).cloned()
    }

    /// Run `f` while the record `id` is present and pinned.
    ///
    /// Writers of this collection (deletes included) wait until `f` returns.
    /// `None` if the record does not exist.
    pub fn with_present<R>(&self, id: &V::Id, f: impl FnOnce() -> R) -> Option<R> {
        let map = self.read();
        if !map.contains_key(id) {
            return None;
        }
        let out = f();
        drop(map);
        Some(out)
    }

    // A panicking writer cannot leave a half-applied update behind (every
    // mutation is a single map operation), so poisoned locks are recovered.
    fn read(&self) -> RwLockReadGuard<'_, BTreeMap<V::Id, V>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, BTreeMap<V::Id, V>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<V> RecordStore<V> for Collection<V>
where
    V: Entity + Clone + Send + Sync + 'static,
    V::Id: Send + Sync,
{
    fn kind(&self) -> &'static str {
        self.kind
    }

    fn get(&self, id: &V::Id) -> Option<V> {
        self.read().get(id).cloned()
    }

    fn insert_unique(&self, record: V, clashes: &dyn Fn(&V) -> bool) -> DomainResult<V> {
        let mut map = self.write();
        if map.contains_key(record.id()) || map.values().any(clashes) {
            return Err(DomainError::already_exists(self.kind));
        }
        map.insert(record.id().clone(), record.clone());
        Ok(record)
    }

    fn replace_unique(&self, record: V, clashes: &dyn Fn(&V) -> bool) -> DomainResult<V> {
        let mut map = self.write();
        if !map.contains_key(record.id()) {
            return Err(DomainError::not_found(self.kind));
        }
        if map.values().any(|other| other.id() != record.id() && clashes(other)) {
            return Err(DomainError::already_exists(self.kind));
        }
        map.insert(record.id().clone(), record.clone());
        Ok(record)
    }

    fn remove(&self, id: &V::Id) -> Option<V> {
        self.write().remove(id)
    }

    fn list(&self) -> Vec<V> {
        self.read().values().cloned().collect()
    }
}
