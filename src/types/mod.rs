//! Core types for the atom store.

pub mod handle;
pub mod atom;

pub use handle::Handle;
pub use atom::{Atom, AtomType, AtomView};
