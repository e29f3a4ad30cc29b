//! Atom records and the atom type taxonomy.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::handle::Handle;

/// Type tag of an atom.
///
/// The taxonomy is closed. Link chasing compares types for exact equality;
/// no subtype relation is defined or consulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AtomType {
    /// Named concept.
    ConceptNode,
    /// Named predicate.
    PredicateNode,
    /// Word from an input text.
    WordNode,
    /// Numeric literal.
    NumberNode,
    /// Pattern variable.
    VariableNode,
    /// Unordered-intent list of atoms.
    ListLink,
    /// `A` is a kind of `B`.
    InheritanceLink,
    /// `A` is similar to `B`.
    SimilarityLink,
    /// `A` is a member of `B`.
    MemberLink,
    /// Predicate applied to an argument list.
    EvaluationLink,
    /// Schema execution with arguments and output.
    ExecutionLink,
    /// Word or name referring to a concept.
    ReferenceLink,
    /// Atom asserted within a context.
    ContextLink,
    /// `A` implies `B`.
    ImplicationLink,
}

impl AtomType {
    /// All atom types, nodes first.
    pub const ALL: [AtomType; 14] = [
        Self::ConceptNode,
        Self::PredicateNode,
        Self::WordNode,
        Self::NumberNode,
        Self::VariableNode,
        Self::ListLink,
        Self::InheritanceLink,
        Self::SimilarityLink,
        Self::MemberLink,
        Self::EvaluationLink,
        Self::ExecutionLink,
        Self::ReferenceLink,
        Self::ContextLink,
        Self::ImplicationLink,
    ];

    /// Parse an atom type from its name (case-insensitive).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "conceptnode" => Some(Self::ConceptNode),
            "predicatenode" => Some(Self::PredicateNode),
            "wordnode" => Some(Self::WordNode),
            "numbernode" => Some(Self::NumberNode),
            "variablenode" => Some(Self::VariableNode),
            "listlink" => Some(Self::ListLink),
            "inheritancelink" => Some(Self::InheritanceLink),
            "similaritylink" => Some(Self::SimilarityLink),
            "memberlink" => Some(Self::MemberLink),
            "evaluationlink" => Some(Self::EvaluationLink),
            "executionlink" => Some(Self::ExecutionLink),
            "referencelink" => Some(Self::ReferenceLink),
            "contextlink" => Some(Self::ContextLink),
            "implicationlink" => Some(Self::ImplicationLink),
            _ => None,
        }
    }

    /// Whether atoms of this type are nodes.
    pub fn is_node(&self) -> bool {
        matches!(
            self,
            Self::ConceptNode
                | Self::PredicateNode
                | Self::WordNode
                | Self::NumberNode
                | Self::VariableNode
        )
    }

    /// Whether atoms of this type are links.
    pub fn is_link(&self) -> bool {
        !self.is_node()
    }
}

impl fmt::Display for AtomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ConceptNode => "ConceptNode",
            Self::PredicateNode => "PredicateNode",
            Self::WordNode => "WordNode",
            Self::NumberNode => "NumberNode",
            Self::VariableNode => "VariableNode",
            Self::ListLink => "ListLink",
            Self::InheritanceLink => "InheritanceLink",
            Self::SimilarityLink => "SimilarityLink",
            Self::MemberLink => "MemberLink",
            Self::EvaluationLink => "EvaluationLink",
            Self::ExecutionLink => "ExecutionLink",
            Self::ReferenceLink => "ReferenceLink",
            Self::ContextLink => "ContextLink",
            Self::ImplicationLink => "ImplicationLink",
        };
        f.write_str(name)
    }
}

/// A stored atom.
///
/// Nodes carry a name and an empty outgoing tuple. Links carry no name and
/// an ordered outgoing tuple of member handles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Atom {
    /// Identity of the atom.
    pub handle: Handle,
    /// Type tag.
    #[serde(rename = "type")]
    pub atom_type: AtomType,
    /// Node name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ordered member handles (links only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outgoing: Vec<Handle>,
}

impl Atom {
    /// Create a node record.
    pub fn node(handle: Handle, atom_type: AtomType, name: impl Into<String>) -> Self {
        Self {
            handle,
            atom_type,
            name: Some(name.into()),
            outgoing: Vec::new(),
        }
    }

    /// Create a link record.
    pub fn link(handle: Handle, atom_type: AtomType, outgoing: Vec<Handle>) -> Self {
        Self {
            handle,
            atom_type,
            name: None,
            outgoing,
        }
    }

    /// Number of members in the outgoing tuple.
    pub fn arity(&self) -> usize {
        self.outgoing.len()
    }

    /// Read-only view of this atom.
    pub fn view(&self) -> AtomView {
        AtomView {
            handle: self.handle,
            atom_type: self.atom_type,
            arity: self.arity(),
        }
    }
}

/// What handle resolution hands back: identity, type and arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AtomView {
    /// Identity of the atom.
    pub handle: Handle,
    /// Type tag.
    pub atom_type: AtomType,
    /// Length of the outgoing tuple.
    pub arity: usize,
}
