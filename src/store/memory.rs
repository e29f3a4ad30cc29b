//! In-memory atom table.

use std::collections::BTreeMap;

use crate::types::{Atom, AtomType, AtomView, Handle};
use super::{AtomTable, HandleSeq};

/// Error type for in-memory store insertions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// An atom with this handle already exists.
    #[error("Duplicate atom handle: {0}")]
    DuplicateHandle(Handle),
    /// A node was requested with a link type.
    #[error("Not a node type: {0}")]
    NotANodeType(AtomType),
    /// A link was requested with a node type.
    #[error("Not a link type: {0}")]
    NotALinkType(AtomType),
    /// A link names a member that is not in the store.
    #[error("Link {link} references unknown atom {member}")]
    MemberNotFound {
        /// The link being inserted.
        link: Handle,
        /// The missing member.
        member: Handle,
    },
    /// Fixture JSON could not be parsed.
    #[error("Invalid atom JSON: {0}")]
    InvalidJson(String),
}

/// In-memory atom table.
///
/// Atoms are kept in a `BTreeMap`; each atom's incoming set is kept in
/// link insertion order, which is the order link chasing visits matches in.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAtomTable {
    /// Atoms by handle.
    atoms: BTreeMap<Handle, Atom>,
    /// Member -> links containing it.
    incoming: BTreeMap<Handle, Vec<Handle>>,
    /// Number of links stored.
    num_links: usize,
}

impl InMemoryAtomTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from atom records. Members must precede their links.
    pub fn from_atoms(atoms: impl IntoIterator<Item = Atom>) -> Result<Self, StoreError> {
        let mut table = Self::new();
        for atom in atoms {
            table.insert(atom)?;
        }
        Ok(table)
    }

    /// Build a table from a JSON array of atom records.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let atoms: Vec<Atom> = serde_json::from_str(json)
            .map_err(|e| StoreError::InvalidJson(e.to_string()))?;
        Self::from_atoms(atoms)
    }

    /// Add a node with a freshly allocated handle.
    pub fn add_node(&mut self, atom_type: AtomType, name: impl Into<String>) -> Result<Handle, StoreError> {
        if !atom_type.is_node() {
            return Err(StoreError::NotANodeType(atom_type));
        }
        let handle = Handle::generate();
        self.insert(Atom::node(handle, atom_type, name))?;
        Ok(handle)
    }

    /// Add a link with a freshly allocated handle.
    pub fn add_link(&mut self, atom_type: AtomType, outgoing: Vec<Handle>) -> Result<Handle, StoreError> {
        if !atom_type.is_link() {
            return Err(StoreError::NotALinkType(atom_type));
        }
        let handle = Handle::generate();
        self.insert(Atom::link(handle, atom_type, outgoing))?;
        Ok(handle)
    }

    /// Insert an atom record under its own handle.
    pub fn insert(&mut self, atom: Atom) -> Result<(), StoreError> {
        if self.atoms.contains_key(&atom.handle) {
            return Err(StoreError::DuplicateHandle(atom.handle));
        }
        if atom.atom_type.is_node() && !atom.outgoing.is_empty() {
            return Err(StoreError::NotALinkType(atom.atom_type));
        }
        if let Some(member) = atom.outgoing.iter().find(|m| !self.atoms.contains_key(m)) {
            return Err(StoreError::MemberNotFound {
                link: atom.handle,
                member: *member,
            });
        }

        if atom.atom_type.is_link() {
            for member in &atom.outgoing {
                let links = self.incoming.entry(*member).or_default();
                // A member repeated in one tuple still lists the link once
                if links.last() != Some(&atom.handle) {
                    links.push(atom.handle);
                }
            }
            self.num_links += 1;
        }

        self.atoms.insert(atom.handle, atom);
        Ok(())
    }

    /// Get an atom record.
    pub fn get(&self, handle: Handle) -> Option<&Atom> {
        self.atoms.get(&handle)
    }

    /// Find a node by type and name.
    pub fn find_node(&self, atom_type: AtomType, name: &str) -> Option<Handle> {
        self.atoms
            .values()
            .find(|a| a.atom_type == atom_type && a.name.as_deref() == Some(name))
            .map(|a| a.handle)
    }

    /// Get all atoms, ordered by handle.
    pub fn all_atoms(&self) -> Vec<&Atom> {
        self.atoms.values().collect()
    }

    /// Get number of atoms.
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    /// Whether the table holds no atoms.
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Get number of links.
    pub fn num_links(&self) -> usize {
        self.num_links
    }

    pub(crate) fn incoming_slice(&self, handle: Handle) -> &[Handle] {
        self.incoming.get(&handle).map(Vec::as_slice).unwrap_or(&[])
    }

    pub(crate) fn outgoing_slice(&self, link: Handle) -> &[Handle] {
        self.atoms
            .get(&link)
            .map(|a| a.outgoing.as_slice())
            .unwrap_or(&[])
    }
}

impl AtomTable for InMemoryAtomTable {
    fn resolve(&self, handle: Handle) -> Option<AtomView> {
        self.atoms.get(&handle).map(Atom::view)
    }

    fn incoming_set(&self, handle: Handle) -> HandleSeq<'_> {
        Box::new(self.incoming_slice(handle).iter().copied())
    }

    fn outgoing_set(&self, link: Handle) -> HandleSeq<'_> {
        Box::new(self.outgoing_slice(link).iter().copied())
    }
}
