//! Link chasing.
//!
//! Given an atom, a link type and two tuple positions, the chaser walks the
//! atom's incoming set, keeps links of exactly that type whose `from`
//! position holds the atom, and hands the member at the `to` position to a
//! visitor. The visitor returns `true` to stop the walk.
//!
//! ## Algorithm
//!
//! 1. Resolve the queried handle; abort with [`ChaseError::UnresolvedHandle`] if it does not resolve
//! 2. For each link in the incoming set, in enumeration order:
//!    - Skip it unless its type equals the requested type
//!    - Scan its outgoing tuple once, up to `max(from, to)` (see [`match_positions`])
//!    - If a target was found, call the visitor; `true` ends the walk with `Ok(true)`
//! 3. Return `Ok(false)` once the incoming set is exhausted

pub mod config;
pub mod binary;

use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::store::AtomTable;
use crate::types::{AtomType, Handle};

pub use config::{ChaseConfig, DanglingLinkPolicy};
pub use binary::{Direction, LinkMatch};

/// Error type for link chasing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChaseError {
    /// The queried handle does not resolve; nothing was traversed.
    #[error("Atom not found: {0}")]
    UnresolvedHandle(Handle),
    /// The incoming set of `atom` yielded a link that does not resolve.
    #[error("Incoming set of {atom} contains unresolvable link {link}")]
    DanglingLink {
        /// The queried atom.
        atom: Handle,
        /// The link handle that failed to resolve.
        link: Handle,
    },
}

/// Match one link's outgoing tuple against the positional pattern.
///
/// Returns the member at `to` if the member at `from` is `atom`. The tuple is
/// consumed only up to `max(from, to)`; a tuple too short to cover both
/// positions yields `None`. When `from == to` the atom itself is returned.
pub fn match_positions(
    atom: Handle,
    outgoing: impl IntoIterator<Item = Handle>,
    from: usize,
    to: usize,
) -> Option<Handle> {
    let last = from.max(to);
    let mut target = None;

    for (position, member) in outgoing.into_iter().enumerate() {
        if position == from && member != atom {
            return None;
        }
        if position == to {
            target = Some(member);
        }
        if position == last {
            return target;
        }
    }

    None
}

/// Follows links of a given type from an atom to the atoms they connect it to.
///
/// Holds the atom table it resolves against and no per-call state, so one
/// chaser can serve any number of concurrent calls.
pub struct LinkChaser<T: AtomTable> {
    table: Arc<T>,
    config: ChaseConfig,
}

impl<T: AtomTable> Clone for LinkChaser<T> {
    fn clone(&self) -> Self {
        Self {
            table: Arc::clone(&self.table),
            config: self.config.clone(),
        }
    }
}

impl<T: AtomTable> LinkChaser<T> {
    /// Create a chaser with the default (strict) configuration.
    pub fn new(table: Arc<T>) -> Self {
        Self::with_config(table, ChaseConfig::default())
    }

    /// Create a chaser with an explicit configuration.
    pub fn with_config(table: Arc<T>, config: ChaseConfig) -> Self {
        Self { table, config }
    }

    /// Visit the atom at position `to` of every `link_type` link that has
    /// `atom` at position `from`.
    ///
    /// The visitor returns `true` to stop. Returns `Ok(true)` if it did,
    /// `Ok(false)` if the incoming set ran out first (including when nothing
    /// matched).
    pub fn chase_link<F>(
        &self,
        atom: Handle,
        link_type: AtomType,
        from: usize,
        to: usize,
        mut visitor: F,
    ) -> Result<bool, ChaseError>
    where
        F: FnMut(Handle) -> bool,
    {
        self.try_chase_link_with_link::<ChaseError, _>(atom, link_type, from, to, |target, _| {
            Ok(visitor(target))
        })
    }

    /// Same as [`chase_link`](Self::chase_link), but the visitor also
    /// receives the handle of the matching link.
    pub fn chase_link_with_link<F>(
        &self,
        atom: Handle,
        link_type: AtomType,
        from: usize,
        to: usize,
        mut visitor: F,
    ) -> Result<bool, ChaseError>
    where
        F: FnMut(Handle, Handle) -> bool,
    {
        self.try_chase_link_with_link::<ChaseError, _>(atom, link_type, from, to, |target, link| {
            Ok(visitor(target, link))
        })
    }

    /// Fallible form of [`chase_link_with_link`](Self::chase_link_with_link).
    ///
    /// A visitor error ends the walk and is returned unchanged.
    pub fn try_chase_link_with_link<E, F>(
        &self,
        atom: Handle,
        link_type: AtomType,
        from: usize,
        to: usize,
        mut visitor: F,
    ) -> Result<bool, E>
    where
        E: From<ChaseError>,
        F: FnMut(Handle, Handle) -> Result<bool, E>,
    {
        if self.table.resolve(atom).is_none() {
            debug!(atom = %atom, link_type = %link_type, "Chase aborted: atom does not resolve");
            return Err(ChaseError::UnresolvedHandle(atom).into());
        }

        let mut candidates = 0usize;
        let mut matches = 0usize;

        for link in self.table.incoming_set(atom) {
            let Some(view) = self.table.resolve(link) else {
                match self.config.dangling_links {
                    DanglingLinkPolicy::Fail => {
                        return Err(ChaseError::DanglingLink { atom, link }.into());
                    }
                    DanglingLinkPolicy::Skip => {
                        warn!(atom = %atom, link = %link, "Skipping unresolvable link in incoming set");
                        continue;
                    }
                }
            };

            if view.atom_type != link_type {
                continue;
            }
            candidates += 1;

            let Some(target) = match_positions(atom, self.table.outgoing_set(link), from, to) else {
                continue;
            };
            matches += 1;
            trace!(atom = %atom, link = %link, target = %target, "Link matched");

            if visitor(target, link)? {
                debug!(
                    atom = %atom,
                    link_type = %link_type,
                    candidates,
                    matches,
                    "Chase stopped by visitor"
                );
                return Ok(true);
            }
        }

        debug!(
            atom = %atom,
            link_type = %link_type,
            candidates,
            matches,
            "Chase exhausted incoming set"
        );
        Ok(false)
    }

    /// Get the configuration.
    pub fn config(&self) -> &ChaseConfig {
        &self.config
    }

    /// Get a reference to the atom table.
    pub fn table(&self) -> &T {
        &self.table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{HandleSeq, InMemoryAtomTable};
    use crate::types::AtomView;
    use uuid::Uuid;

    fn h(id: u128) -> Handle {
        Handle::new(Uuid::from_u128(id))
    }

    /// X, Y, Z with INHERITANCE(X,Y) and INHERITANCE(X,Z).
    fn inheritance_fixture() -> (Arc<InMemoryAtomTable>, Handle, Handle, Handle) {
        let mut table = InMemoryAtomTable::new();
        let x = table.add_node(AtomType::ConceptNode, "X").unwrap();
        let y = table.add_node(AtomType::ConceptNode, "Y").unwrap();
        let z = table.add_node(AtomType::ConceptNode, "Z").unwrap();
        table.add_link(AtomType::InheritanceLink, vec![x, y]).unwrap();
        table.add_link(AtomType::InheritanceLink, vec![x, z]).unwrap();
        (Arc::new(table), x, y, z)
    }

    /// Wraps a table and appends a bogus link to every incoming set.
    struct DanglingTable {
        inner: InMemoryAtomTable,
        bogus: Handle,
    }

    impl AtomTable for DanglingTable {
        fn resolve(&self, handle: Handle) -> Option<AtomView> {
            self.inner.resolve(handle)
        }

        fn incoming_set(&self, handle: Handle) -> HandleSeq<'_> {
            Box::new(std::iter::once(self.bogus).chain(self.inner.incoming_set(handle)))
        }

        fn outgoing_set(&self, link: Handle) -> HandleSeq<'_> {
            self.inner.outgoing_set(link)
        }
    }

    #[test]
    fn test_match_positions() {
        let (a, b, c) = (h(1), h(2), h(3));

        assert_eq!(match_positions(a, [a, b], 0, 1), Some(b));
        assert_eq!(match_positions(b, [a, b], 1, 0), Some(a));
        assert_eq!(match_positions(b, [a, b], 0, 1), None);
        assert_eq!(match_positions(a, [a, b, c], 0, 2), Some(c));
        assert_eq!(match_positions(c, [a, b, c], 2, 0), Some(a));
        // from == to reports the atom itself
        assert_eq!(match_positions(b, [a, b], 1, 1), Some(b));
        assert_eq!(match_positions(a, [a, b], 1, 1), None);
    }

    #[test]
    fn test_match_positions_arity_too_small() {
        let (a, b) = (h(1), h(2));

        assert_eq!(match_positions(a, [a, b], 0, 2), None);
        // `to` is reachable but `from` is not: still no match
        assert_eq!(match_positions(a, [b, a], 5, 0), None);
        assert_eq!(match_positions(a, Vec::new(), 0, 0), None);
    }

    #[test]
    fn test_match_positions_stops_at_last_position() {
        let a = h(1);
        let mut consumed = 0;
        let members = [a, h(2), h(3), h(4), h(5)].into_iter().inspect(|_| consumed += 1);

        assert_eq!(match_positions(a, members, 0, 1), Some(h(2)));
        assert_eq!(consumed, 2);
    }

    #[test]
    fn test_collect_all_visits_every_target() {
        let (table, x, y, z) = inheritance_fixture();
        let chaser = LinkChaser::new(table);

        let mut seen = Vec::new();
        let stopped = chaser
            .chase_link(x, AtomType::InheritanceLink, 0, 1, |t| {
                seen.push(t);
                false
            })
            .unwrap();

        assert!(!stopped);
        seen.sort();
        let mut expected = vec![y, z];
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_visitor_true_stops_after_first_match() {
        let (table, x, y, z) = inheritance_fixture();
        let chaser = LinkChaser::new(table);

        let mut seen = Vec::new();
        let stopped = chaser
            .chase_link(x, AtomType::InheritanceLink, 0, 1, |t| {
                seen.push(t);
                true
            })
            .unwrap();

        assert!(stopped);
        assert_eq!(seen.len(), 1);
        assert!(seen[0] == y || seen[0] == z);
    }

    #[test]
    fn test_type_mismatch_is_skipped() {
        let (table, x, _, _) = inheritance_fixture();
        let chaser = LinkChaser::new(table);

        let mut calls = 0;
        let stopped = chaser
            .chase_link(x, AtomType::SimilarityLink, 0, 1, |_| {
                calls += 1;
                true
            })
            .unwrap();

        assert!(!stopped);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_wrong_position_rejects_link() {
        let (table, _, y, _) = inheritance_fixture();
        let chaser = LinkChaser::new(table);

        // Y is at position 1, not 0
        let mut calls = 0;
        let stopped = chaser
            .chase_link(y, AtomType::InheritanceLink, 0, 1, |_| {
                calls += 1;
                false
            })
            .unwrap();

        assert!(!stopped);
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_unresolved_handle_is_an_error() {
        let (table, _, _, _) = inheritance_fixture();
        let chaser = LinkChaser::new(table);

        let mut calls = 0;
        let result = chaser.chase_link(h(999), AtomType::InheritanceLink, 0, 1, |_| {
            calls += 1;
            true
        });

        assert_eq!(result, Err(ChaseError::UnresolvedHandle(h(999))));
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_atom_without_incoming_links() {
        let mut table = InMemoryAtomTable::new();
        let lonely = table.add_node(AtomType::ConceptNode, "lonely").unwrap();
        let chaser = LinkChaser::new(Arc::new(table));

        assert_eq!(chaser.chase_link(lonely, AtomType::InheritanceLink, 0, 1, |_| true), Ok(false));
    }

    #[test]
    fn test_parallel_links_each_visited_with_own_handle() {
        let mut table = InMemoryAtomTable::new();
        let a = table.add_node(AtomType::ConceptNode, "a").unwrap();
        let b = table.add_node(AtomType::ConceptNode, "b").unwrap();
        let l1 = table.add_link(AtomType::MemberLink, vec![a, b]).unwrap();
        let l2 = table.add_link(AtomType::MemberLink, vec![a, b]).unwrap();
        let chaser = LinkChaser::new(Arc::new(table));

        let mut seen = Vec::new();
        chaser
            .chase_link_with_link(a, AtomType::MemberLink, 0, 1, |target, link| {
                seen.push((target, link));
                false
            })
            .unwrap();

        assert_eq!(seen, vec![(b, l1), (b, l2)]);
    }

    #[test]
    fn test_nary_positions() {
        let mut table = InMemoryAtomTable::new();
        let schema = table.add_node(AtomType::PredicateNode, "add").unwrap();
        let args = table.add_node(AtomType::ConceptNode, "args").unwrap();
        let out = table.add_node(AtomType::NumberNode, "3").unwrap();
        let short = table.add_link(AtomType::ExecutionLink, vec![schema, args]).unwrap();
        let full = table.add_link(AtomType::ExecutionLink, vec![schema, args, out]).unwrap();
        let chaser = LinkChaser::new(Arc::new(table));

        let mut seen = Vec::new();
        chaser
            .chase_link_with_link(schema, AtomType::ExecutionLink, 0, 2, |t, l| {
                seen.push((t, l));
                false
            })
            .unwrap();
        assert_eq!(seen, vec![(out, full)]);
        assert_ne!(seen[0].1, short);

        // Non-adjacent, reversed positions
        let mut back = Vec::new();
        chaser
            .chase_link(out, AtomType::ExecutionLink, 2, 0, |t| {
                back.push(t);
                false
            })
            .unwrap();
        assert_eq!(back, vec![schema]);
    }

    #[test]
    fn test_same_from_and_to_reports_atom() {
        let (table, x, _, _) = inheritance_fixture();
        let chaser = LinkChaser::new(table);

        let mut seen = Vec::new();
        chaser
            .chase_link(x, AtomType::InheritanceLink, 0, 0, |t| {
                seen.push(t);
                false
            })
            .unwrap();

        assert_eq!(seen, vec![x, x]);
    }

    #[test]
    fn test_dangling_link_fails_by_default() {
        let (table, x, _, _) = inheritance_fixture();
        let bogus = h(0xdead);
        let chaser = LinkChaser::new(Arc::new(DanglingTable {
            inner: (*table).clone(),
            bogus,
        }));

        let result = chaser.chase_link(x, AtomType::InheritanceLink, 0, 1, |_| false);
        assert_eq!(result, Err(ChaseError::DanglingLink { atom: x, link: bogus }));
    }

    #[test]
    fn test_dangling_link_skipped_when_lenient() {
        let (table, x, _, _) = inheritance_fixture();
        let chaser = LinkChaser::with_config(
            Arc::new(DanglingTable {
                inner: (*table).clone(),
                bogus: h(0xdead),
            }),
            ChaseConfig::lenient(),
        );

        let mut calls = 0;
        let stopped = chaser
            .chase_link(x, AtomType::InheritanceLink, 0, 1, |_| {
                calls += 1;
                false
            })
            .unwrap();

        assert!(!stopped);
        assert_eq!(calls, 2);
    }

    #[derive(Debug, PartialEq)]
    enum VisitError {
        Chase(ChaseError),
        Refused(Handle),
    }

    impl From<ChaseError> for VisitError {
        fn from(e: ChaseError) -> Self {
            Self::Chase(e)
        }
    }

    #[test]
    fn test_visitor_error_propagates_unchanged() {
        let (table, x, _, _) = inheritance_fixture();
        let chaser = LinkChaser::new(table);

        let mut calls = 0;
        let result = chaser.try_chase_link_with_link(x, AtomType::InheritanceLink, 0, 1, |t, _| {
            calls += 1;
            Err::<bool, _>(VisitError::Refused(t))
        });

        assert!(matches!(result, Err(VisitError::Refused(_))));
        assert_eq!(calls, 1);

        let missing = chaser.try_chase_link_with_link(h(999), AtomType::InheritanceLink, 0, 1, |_, _| {
            Ok::<bool, VisitError>(true)
        });
        assert_eq!(missing, Err(VisitError::Chase(ChaseError::UnresolvedHandle(h(999)))));
    }

    #[test]
    fn test_chaser_is_shareable_across_threads() {
        let (table, x, _, _) = inheritance_fixture();
        let chaser = LinkChaser::new(table);

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let chaser = chaser.clone();
                std::thread::spawn(move || {
                    let mut count = 0;
                    chaser
                        .chase_link(x, AtomType::InheritanceLink, 0, 1, |_| {
                            count += 1;
                            false
                        })
                        .unwrap();
                    count
                })
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), 2);
        }
    }
}
