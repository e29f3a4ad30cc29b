//! Lock-guarded atom table for stores mutated while being traversed.

use parking_lot::RwLock;

use crate::types::{AtomType, AtomView, Handle};
use super::{AtomTable, HandleSeq, InMemoryAtomTable, StoreError};

/// An [`InMemoryAtomTable`] behind a `parking_lot::RwLock`.
///
/// Enumerations copy the current sequence out under the read lock, so each
/// call sees a consistent snapshot and no lock is held while callers iterate.
#[derive(Debug, Default)]
pub struct SharedAtomTable {
    inner: RwLock<InMemoryAtomTable>,
}

impl SharedAtomTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node.
    pub fn add_node(&self, atom_type: AtomType, name: impl Into<String>) -> Result<Handle, StoreError> {
        self.inner.write().add_node(atom_type, name)
    }

    /// Add a link.
    pub fn add_link(&self, atom_type: AtomType, outgoing: Vec<Handle>) -> Result<Handle, StoreError> {
        self.inner.write().add_link(atom_type, outgoing)
    }

    /// Run a closure against the table under the read lock.
    pub fn with_table<R>(&self, f: impl FnOnce(&InMemoryAtomTable) -> R) -> R {
        f(&self.inner.read())
    }

    /// Unwrap into the inner table.
    pub fn into_inner(self) -> InMemoryAtomTable {
        self.inner.into_inner()
    }
}

impl From<InMemoryAtomTable> for SharedAtomTable {
    fn from(table: InMemoryAtomTable) -> Self {
        Self {
            inner: RwLock::new(table),
        }
    }
}

impl AtomTable for SharedAtomTable {
    fn resolve(&self, handle: Handle) -> Option<AtomView> {
        self.inner.read().resolve(handle)
    }

    fn incoming_set(&self, handle: Handle) -> HandleSeq<'_> {
        let snapshot = self.inner.read().incoming_slice(handle).to_vec();
        Box::new(snapshot.into_iter())
    }

    fn outgoing_set(&self, link: Handle) -> HandleSeq<'_> {
        let snapshot = self.inner.read().outgoing_slice(link).to_vec();
        Box::new(snapshot.into_iter())
    }
}
