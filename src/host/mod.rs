//! Host compiler trees, seen through the capability set the transform needs.
//!
//! The transform never touches a concrete compiler tree directly. Each host tree is an arena addressed by
//! [`NodeId`]; parent links are plain ids and member lists own their children, so there are no reference cycles.
//!
//! ## Adapters
//!
//! - [`javac`]: `u64` flag words on shared modifier records; annotations hang off the modifier record, so a
//!   multi-variable declaration shares one annotation between all its variables.
//! - [`ecj`]: `i32` modifier words, `char`-array names, inclusive `sourceStart/sourceEnd` positions, and separate
//!   field/method/member-type arrays per type.
//!
//! Mutation is limited to [`HostTree::append_member`], which requires an [`Injection`] token that only the
//! transform can mint.

pub mod ecj;
pub mod javac;

use std::fmt;

use fieldconst_core::{AccessLevel, Modifiers};

/// Declared type of every generated constant.
pub const STRING_TYPE: &str = "java.lang.String";

/// Stable index of a node in a host arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) fn new(index: usize) -> Self {
        NodeId(u32::try_from(index).expect("INVARIANT: host arenas hold fewer than u32::MAX nodes"))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Coarse node classification shared by every host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Type,
    Field,
    Other,
}

/// Source location span (byte offsets, end exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Initializer expression of a field, as far as the transform and printer care.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Initializer {
    /// A string literal; holds the unescaped text.
    StringLiteral(String),
    /// Any other expression, as source text.
    Expression(String),
}

/// Everything a host needs to build one constant declaration.
///
/// `B` is the host-native modifier word (see [`HostTree::to_host_modifier_bits`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec<B> {
    pub name: String,
    pub access_bits: B,
    pub modifiers_extra: Modifiers,
    pub declared_type: String,
    pub initializer_literal: String,
    pub span: Span,
}

/// Permission to append a member to a host tree.
///
/// Only the transform can create one, and only while it processes a single request.
#[derive(Debug)]
pub struct Injection {
    _private: (),
}

impl Injection {
    pub(crate) fn new() -> Self {
        Injection { _private: () }
    }
}

/// Capabilities the transform requires from a host compiler tree.
pub trait HostTree {
    /// Host-native modifier word.
    type ModifierBits: Copy + fmt::Debug;

    /// Top-level type declarations, in source order.
    fn roots(&self) -> Vec<NodeId>;

    fn kind_of(&self, node: NodeId) -> NodeKind;

    fn name_of(&self, node: NodeId) -> Option<String>;

    /// Modifiers in the host-agnostic encoding, including implicit ones (enum constants are static).
    fn modifiers_of(&self, node: NodeId) -> Modifiers;

    fn span_of(&self, node: NodeId) -> Span;

    /// Direct members of a type, in declaration order, followed by generated members in injection order.
    fn members_of(&self, type_node: NodeId) -> Vec<NodeId>;

    fn parent_of(&self, node: NodeId) -> Option<NodeId>;

    /// Annotation usages attached to a declaration.
    fn annotations_of(&self, node: NodeId) -> Vec<NodeId>;

    /// Annotation type name as written (`FieldConstants`, `lombok.FieldConstants`).
    fn annotation_name(&self, annotation: NodeId) -> Option<String>;

    /// Annotation arguments as `(name, source text)` pairs.
    fn annotation_args(&self, annotation: NodeId) -> Vec<(String, String)>;

    /// Declared type of a field, or return type of a method.
    fn declared_type_of(&self, node: NodeId) -> Option<String>;

    fn initializer_of(&self, node: NodeId) -> Option<Initializer>;

    /// Resolve a marker usage to the field node(s) it annotates.
    ///
    /// A multi-variable declaration resolves to every variable it declares. Usages that do not sit on a field
    /// resolve to nothing.
    fn resolve_annotation_to_fields(&self, marker: NodeId) -> Vec<NodeId>;

    fn to_host_modifier_bits(&self, level: AccessLevel) -> Self::ModifierBits;

    /// Append a new field declaration as the last member of `type_node`.
    fn append_member(
        &mut self,
        type_node: NodeId,
        spec: FieldSpec<Self::ModifierBits>,
        token: Injection,
    ) -> NodeId;

    /// Check whether `node` carries an annotation whose name is one of `marker_names`.
    fn has_marker_annotation(&self, node: NodeId, marker_names: &[String]) -> bool {
        self.annotations_of(node).into_iter().any(|annotation| {
            self.annotation_name(annotation)
                .is_some_and(|name| marker_names.iter().any(|marker| *marker == name))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_round_trip() {
        assert_eq!(NodeId::new(7).index(), 7);
        assert_eq!(NodeId::new(3).to_string(), "#3");
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(4, 9).to_string(), "4..9");
    }
}
