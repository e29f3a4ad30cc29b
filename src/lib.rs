//! # hypergraph-chase
//!
//! Positional link chasing over a hypergraph atom store.
//!
//! The chaser answers one question:
//!
//! > Given an atom and a link type, which atoms does it reach through links of
//! > that type, when it sits at one tuple position and the answer at another?
//!
//! ## Core Contract
//!
//! 1. Resolve the queried atom through an injected [`AtomTable`]
//! 2. Walk its incoming set, keeping links of exactly the requested type
//! 3. Check the `from` position holds the atom, report the member at `to`
//! 4. Stop as soon as the visitor returns `true`
//!
//! ## Architecture
//!
//! ```text
//! Handle → LinkChaser → incoming_set → type filter → match_positions → visitor
//!              ↓
//!         AtomTable (InMemoryAtomTable or SharedAtomTable)
//! ```
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use hypergraph_chase::{AtomType, InMemoryAtomTable, LinkChaser};
//!
//! let mut table = InMemoryAtomTable::new();
//! let cat = table.add_node(AtomType::ConceptNode, "cat").unwrap();
//! let animal = table.add_node(AtomType::ConceptNode, "animal").unwrap();
//! table.add_link(AtomType::InheritanceLink, vec![cat, animal]).unwrap();
//!
//! let chaser = LinkChaser::new(Arc::new(table));
//! let mut parents = Vec::new();
//! let stopped = chaser
//!     .follow_binary_link(cat, AtomType::InheritanceLink, |h| {
//!         parents.push(h);
//!         false
//!     })
//!     .unwrap();
//!
//! assert!(!stopped);
//! assert_eq!(parents, vec![animal]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod types;
pub mod store;
pub mod chase;

// Re-exports
pub use types::{Atom, AtomType, AtomView, Handle};
pub use store::{AtomTable, HandleSeq, InMemoryAtomTable, SharedAtomTable, StoreError};
pub use chase::{
    match_positions, ChaseConfig, ChaseError, DanglingLinkPolicy, Direction, LinkChaser, LinkMatch,
};
