//! Binary-link wrappers and collecting queries on top of [`LinkChaser`].

use serde::{Deserialize, Serialize};

use crate::store::AtomTable;
use crate::types::{AtomType, Handle};
use super::{ChaseError, LinkChaser};

/// Direction in which a binary link is followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// From the source (position 0) to the target (position 1).
    Forward,
    /// From the target (position 1) back to the source (position 0).
    Backward,
}

impl Direction {
    /// `(from, to)` positions for this direction.
    pub fn positions(&self) -> (usize, usize) {
        match self {
            Self::Forward => (0, 1),
            Self::Backward => (1, 0),
        }
    }

    /// The opposite direction.
    pub fn reversed(&self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// A matched link and the atom found at its `to` position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkMatch {
    /// Atom at the `to` position.
    pub target: Handle,
    /// The link that produced the match.
    pub link: Handle,
}

impl<T: AtomTable> LinkChaser<T> {
    /// Follow a binary link in `direction`.
    pub fn follow<F>(
        &self,
        atom: Handle,
        link_type: AtomType,
        direction: Direction,
        visitor: F,
    ) -> Result<bool, ChaseError>
    where
        F: FnMut(Handle) -> bool,
    {
        let (from, to) = direction.positions();
        self.chase_link(atom, link_type, from, to, visitor)
    }

    /// Follow binary links forward: visit the targets of links whose source is `atom`.
    pub fn follow_binary_link<F>(&self, atom: Handle, link_type: AtomType, visitor: F) -> Result<bool, ChaseError>
    where
        F: FnMut(Handle) -> bool,
    {
        self.follow(atom, link_type, Direction::Forward, visitor)
    }

    /// Same as [`follow_binary_link`](Self::follow_binary_link), with the link handle.
    pub fn follow_binary_link_with_link<F>(
        &self,
        atom: Handle,
        link_type: AtomType,
        visitor: F,
    ) -> Result<bool, ChaseError>
    where
        F: FnMut(Handle, Handle) -> bool,
    {
        let (from, to) = Direction::Forward.positions();
        self.chase_link_with_link(atom, link_type, from, to, visitor)
    }

    /// Follow binary links backward: visit the sources of links whose target is `atom`.
    pub fn backtrack_binary_link<F>(&self, atom: Handle, link_type: AtomType, visitor: F) -> Result<bool, ChaseError>
    where
        F: FnMut(Handle) -> bool,
    {
        self.follow(atom, link_type, Direction::Backward, visitor)
    }

    /// Same as [`backtrack_binary_link`](Self::backtrack_binary_link), with the link handle.
    pub fn backtrack_binary_link_with_link<F>(
        &self,
        atom: Handle,
        link_type: AtomType,
        visitor: F,
    ) -> Result<bool, ChaseError>
    where
        F: FnMut(Handle, Handle) -> bool,
    {
        let (from, to) = Direction::Backward.positions();
        self.chase_link_with_link(atom, link_type, from, to, visitor)
    }

    /// The first target found, for relations expected to have a single link.
    pub fn first_target(
        &self,
        atom: Handle,
        link_type: AtomType,
        from: usize,
        to: usize,
    ) -> Result<Option<Handle>, ChaseError> {
        let mut found = None;
        self.chase_link(atom, link_type, from, to, |target| {
            found = Some(target);
            true
        })?;
        Ok(found)
    }

    /// All targets, in incoming-set order.
    pub fn collect_targets(
        &self,
        atom: Handle,
        link_type: AtomType,
        from: usize,
        to: usize,
    ) -> Result<Vec<Handle>, ChaseError> {
        let mut targets = Vec::new();
        self.chase_link(atom, link_type, from, to, |target| {
            targets.push(target);
            false
        })?;
        Ok(targets)
    }

    /// All matches with their link handles, in incoming-set order.
    pub fn collect_matches(
        &self,
        atom: Handle,
        link_type: AtomType,
        from: usize,
        to: usize,
    ) -> Result<Vec<LinkMatch>, ChaseError> {
        let mut matches = Vec::new();
        self.chase_link_with_link(atom, link_type, from, to, |target, link| {
            matches.push(LinkMatch { target, link });
            false
        })?;
        Ok(matches)
    }
}
