//! Adapter for javac-style trees.
//!
//! Shape of the tree:
//! - every declaration points at a [`JcModifiers`] record holding a `u64` flag word and its annotations;
//! - a multi-variable declaration (`int x, y;`) is split into one `VarDef` per variable, all sharing the same
//!   modifier record, so one annotation usage covers every variable;
//! - an annotation node's parent is the first declaration that owns its modifier record;
//! - positions are a start offset plus an end-position table, as javac keeps them.

use std::collections::HashMap;

use fieldconst_core::{AccessLevel, Modifiers};

use super::{FieldSpec, HostTree, Initializer, Injection, NodeId, NodeKind, Span};
use crate::fixture::{AnnotationFixture, FixtureError, MemberFixture, SpanCursor, TypeFixture, UnitFixture, parse_modifiers};

/// javac flag bits.
pub mod flags {
    pub const PUBLIC: u64 = 1;
    pub const PRIVATE: u64 = 1 << 1;
    pub const PROTECTED: u64 = 1 << 2;
    pub const STATIC: u64 = 1 << 3;
    pub const FINAL: u64 = 1 << 4;
    pub const INTERFACE: u64 = 1 << 9;
    pub const ABSTRACT: u64 = 1 << 10;
    pub const ANNOTATION: u64 = 1 << 13;
    pub const ENUM: u64 = 1 << 14;
    /// Set on members the compiler generated itself.
    pub const GENERATED_MEMBER: u64 = 1 << 24;

    /// Flags that have a host-agnostic counterpart.
    pub const STANDARD: u64 = PUBLIC | PRIVATE | PROTECTED | STATIC | FINAL | INTERFACE | ABSTRACT | ANNOTATION | ENUM;
}

/// Index of a modifier record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModsId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JcModifiers {
    pub flags: u64,
    pub annotations: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JcExpression {
    Literal(String),
    Raw(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JcTree {
    ClassDecl {
        mods: ModsId,
        name: String,
        defs: Vec<NodeId>,
    },
    VarDef {
        mods: ModsId,
        name: String,
        vartype: String,
        init: Option<JcExpression>,
    },
    MethodDef {
        mods: ModsId,
        name: String,
        restype: String,
    },
    Annotation {
        annotation_type: String,
        args: Vec<(String, String)>,
        owner: ModsId,
    },
}

#[derive(Debug, Clone)]
struct JavacNode {
    tree: JcTree,
    up: Option<NodeId>,
    pos: usize,
}

/// A javac-style compilation unit.
#[derive(Debug, Clone, Default)]
pub struct JavacTree {
    nodes: Vec<JavacNode>,
    mods: Vec<JcModifiers>,
    end_positions: HashMap<NodeId, usize>,
    roots: Vec<NodeId>,
}

impl JavacTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower a unit fixture into a javac-style tree.
    pub fn from_fixture(unit: &UnitFixture) -> Result<Self, FixtureError> {
        let mut tree = JavacTree::new();
        let mut cursor = SpanCursor::new();
        for ty in &unit.types {
            let id = tree.lower_type(ty, None, &mut cursor)?;
            tree.roots.push(id);
        }
        Ok(tree)
    }

    pub fn tree(&self, node: NodeId) -> &JcTree {
        &self.nodes[node.index()].tree
    }

    pub fn flags(&self, node: NodeId) -> u64 {
        self.mods_of(node).map(|m| self.mods[m.0].flags).unwrap_or(0)
    }

    fn mods_of(&self, node: NodeId) -> Option<ModsId> {
        match self.tree(node) {
            JcTree::ClassDecl { mods, .. } | JcTree::VarDef { mods, .. } | JcTree::MethodDef { mods, .. } => {
                Some(*mods)
            }
            JcTree::Annotation { .. } => None,
        }
    }

    fn push(&mut self, tree: JcTree, up: Option<NodeId>, span: Span) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(JavacNode {
            tree,
            up,
            pos: span.start,
        });
        self.end_positions.insert(id, span.end);
        id
    }

    fn new_mods(&mut self, flags: u64) -> ModsId {
        self.mods.push(JcModifiers {
            flags,
            annotations: Vec::new(),
        });
        ModsId(self.mods.len() - 1)
    }

    fn push_def(&mut self, class: NodeId, def: NodeId) {
        if let JcTree::ClassDecl { defs, .. } = &mut self.nodes[class.index()].tree {
            defs.push(def);
        }
    }

    fn lower_annotations(
        &mut self,
        annotations: &[AnnotationFixture],
        owner: ModsId,
        cursor: &mut SpanCursor,
    ) -> Vec<NodeId> {
        let ids: Vec<NodeId> = annotations
            .iter()
            .map(|a| {
                let span = cursor.take(&a.name);
                self.push(
                    JcTree::Annotation {
                        annotation_type: a.name.clone(),
                        args: a.args_vec(),
                        owner,
                    },
                    None,
                    span,
                )
            })
            .collect();
        self.mods[owner.0].annotations.extend(ids.iter().copied());
        ids
    }

    fn adopt(&mut self, annotations: &[NodeId], owner_decl: NodeId) {
        for a in annotations {
            self.nodes[a.index()].up = Some(owner_decl);
        }
    }

    fn lower_type(
        &mut self,
        ty: &TypeFixture,
        up: Option<NodeId>,
        cursor: &mut SpanCursor,
    ) -> Result<NodeId, FixtureError> {
        let bits = (parse_modifiers(&ty.modifiers)? | ty.kind.modifiers()).bits();
        let mods = self.new_mods(u64::from(bits));
        let span = cursor.take(&ty.name);
        let class = self.push(
            JcTree::ClassDecl {
                mods,
                name: ty.name.clone(),
                defs: Vec::new(),
            },
            up,
            span,
        );
        let annotations = self.lower_annotations(&ty.annotations, mods, cursor);
        self.adopt(&annotations, class);

        for member in &ty.members {
            self.lower_member(member, class, &ty.name, cursor)?;
        }
        Ok(class)
    }

    fn lower_member(
        &mut self,
        member: &MemberFixture,
        class: NodeId,
        class_name: &str,
        cursor: &mut SpanCursor,
    ) -> Result<(), FixtureError> {
        match member {
            MemberFixture::Field {
                names,
                ty,
                modifiers,
                annotations,
                init,
            } => {
                if names.is_empty() {
                    return Err(FixtureError::EmptyDeclaration(class_name.to_string()));
                }
                let mods = self.new_mods(u64::from(parse_modifiers(modifiers)?.bits()));
                let annotation_ids = self.lower_annotations(annotations, mods, cursor);
                for (i, name) in names.iter().enumerate() {
                    let span = cursor.take(name);
                    let var = self.push(
                        JcTree::VarDef {
                            mods,
                            name: name.clone(),
                            vartype: ty.clone(),
                            init: init.clone().map(JcExpression::Raw),
                        },
                        Some(class),
                        span,
                    );
                    if i == 0 {
                        self.adopt(&annotation_ids, var);
                    }
                    self.push_def(class, var);
                }
            }
            MemberFixture::Method {
                name,
                returns,
                modifiers,
                annotations,
            } => {
                let mods = self.new_mods(u64::from(parse_modifiers(modifiers)?.bits()));
                let annotation_ids = self.lower_annotations(annotations, mods, cursor);
                let span = cursor.take(name);
                let method = self.push(
                    JcTree::MethodDef {
                        mods,
                        name: name.clone(),
                        restype: returns.clone(),
                    },
                    Some(class),
                    span,
                );
                self.adopt(&annotation_ids, method);
                self.push_def(class, method);
            }
            MemberFixture::EnumConstant { name } => {
                let mods = self.new_mods(flags::PUBLIC | flags::STATIC | flags::FINAL | flags::ENUM);
                let span = cursor.take(name);
                let constant = self.push(
                    JcTree::VarDef {
                        mods,
                        name: name.clone(),
                        vartype: class_name.to_string(),
                        init: None,
                    },
                    Some(class),
                    span,
                );
                self.push_def(class, constant);
            }
            MemberFixture::Type(nested) => {
                let inner = self.lower_type(nested, Some(class), cursor)?;
                self.push_def(class, inner);
            }
        }
        Ok(())
    }

    fn modifiers_to_flags(modifiers: Modifiers) -> u64 {
        u64::from(modifiers.bits()) & flags::STANDARD
    }
}

impl HostTree for JavacTree {
    type ModifierBits = u64;

    fn roots(&self) -> Vec<NodeId> {
        self.roots.clone()
    }

    fn kind_of(&self, node: NodeId) -> NodeKind {
        match self.tree(node) {
            JcTree::ClassDecl { .. } => NodeKind::Type,
            JcTree::VarDef { .. } => {
                let in_class = self
                    .parent_of(node)
                    .is_some_and(|up| matches!(self.tree(up), JcTree::ClassDecl { .. }));
                if in_class { NodeKind::Field } else { NodeKind::Other }
            }
            JcTree::MethodDef { .. } | JcTree::Annotation { .. } => NodeKind::Other,
        }
    }

    fn name_of(&self, node: NodeId) -> Option<String> {
        match self.tree(node) {
            JcTree::ClassDecl { name, .. } | JcTree::VarDef { name, .. } | JcTree::MethodDef { name, .. } => {
                Some(name.clone())
            }
            JcTree::Annotation { annotation_type, .. } => Some(annotation_type.clone()),
        }
    }

    fn modifiers_of(&self, node: NodeId) -> Modifiers {
        let standard = self.flags(node) & flags::STANDARD;
        Modifiers::from_bits(u32::try_from(standard).unwrap_or(0))
    }

    fn span_of(&self, node: NodeId) -> Span {
        let pos = self.nodes[node.index()].pos;
        let end = self.end_positions.get(&node).copied().unwrap_or(pos);
        Span::new(pos, end)
    }

    fn members_of(&self, type_node: NodeId) -> Vec<NodeId> {
        match self.tree(type_node) {
            JcTree::ClassDecl { defs, .. } => defs.clone(),
            _ => Vec::new(),
        }
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].up
    }

    fn annotations_of(&self, node: NodeId) -> Vec<NodeId> {
        self.mods_of(node)
            .map(|m| self.mods[m.0].annotations.clone())
            .unwrap_or_default()
    }

    fn annotation_name(&self, annotation: NodeId) -> Option<String> {
        match self.tree(annotation) {
            JcTree::Annotation { annotation_type, .. } => Some(annotation_type.clone()),
            _ => None,
        }
    }

    fn annotation_args(&self, annotation: NodeId) -> Vec<(String, String)> {
        match self.tree(annotation) {
            JcTree::Annotation { args, .. } => args.clone(),
            _ => Vec::new(),
        }
    }

    fn declared_type_of(&self, node: NodeId) -> Option<String> {
        match self.tree(node) {
            JcTree::VarDef { vartype, .. } => Some(vartype.clone()),
            JcTree::MethodDef { restype, .. } => Some(restype.clone()),
            _ => None,
        }
    }

    fn initializer_of(&self, node: NodeId) -> Option<Initializer> {
        match self.tree(node) {
            JcTree::VarDef { init: Some(init), .. } => Some(match init {
                JcExpression::Literal(text) => Initializer::StringLiteral(text.clone()),
                JcExpression::Raw(text) => Initializer::Expression(text.clone()),
            }),
            _ => None,
        }
    }

    fn resolve_annotation_to_fields(&self, marker: NodeId) -> Vec<NodeId> {
        let JcTree::Annotation { owner, .. } = self.tree(marker) else {
            return Vec::new();
        };
        let Some(first) = self.parent_of(marker) else {
            return Vec::new();
        };
        if self.kind_of(first) != NodeKind::Field {
            return Vec::new();
        }
        let Some(class) = self.parent_of(first) else {
            return vec![first];
        };
        self.members_of(class)
            .into_iter()
            .filter(|def| matches!(self.tree(*def), JcTree::VarDef { mods, .. } if mods == owner))
            .collect()
    }

    fn to_host_modifier_bits(&self, level: AccessLevel) -> u64 {
        match level {
            AccessLevel::Public => flags::PUBLIC,
            AccessLevel::Protected => flags::PROTECTED,
            AccessLevel::Private => flags::PRIVATE,
            AccessLevel::Package | AccessLevel::None => 0,
        }
    }

    fn append_member(&mut self, type_node: NodeId, spec: FieldSpec<u64>, _token: Injection) -> NodeId {
        let flags = spec.access_bits | Self::modifiers_to_flags(spec.modifiers_extra) | flags::GENERATED_MEMBER;
        let mods = self.new_mods(flags);
        let field = self.push(
            JcTree::VarDef {
                mods,
                name: spec.name,
                vartype: spec.declared_type,
                init: Some(JcExpression::Literal(spec.initializer_literal)),
            },
            Some(type_node),
            spec.span,
        );
        self.push_def(type_node, field);
        field
    }
}
