//! Atom storage backends.

pub mod memory;
pub mod shared;

use crate::types::{Handle, AtomView};

/// Lazy sequence of handles produced by an enumeration.
pub type HandleSeq<'a> = Box<dyn Iterator<Item = Handle> + 'a>;

/// Handle resolution and incidence enumeration over an atom store.
///
/// Every enumeration call returns a fresh sequence. Handles the store does
/// not know resolve to `None` and enumerate as empty sequences.
pub trait AtomTable: Send + Sync {
    /// Resolve a handle to a view of the live atom.
    fn resolve(&self, handle: Handle) -> Option<AtomView>;

    /// Links whose outgoing tuple contains `handle`.
    fn incoming_set(&self, handle: Handle) -> HandleSeq<'_>;

    /// Members of `link`, in tuple order.
    fn outgoing_set(&self, link: Handle) -> HandleSeq<'_>;
}

pub use memory::{InMemoryAtomTable, StoreError};
pub use shared::SharedAtomTable;
