//! Adapter for ecj-style trees.
//!
//! Shape of the tree:
//! - a type keeps separate `fields`, `methods` and `member_types` arrays, so declaration order is recovered from
//!   `declaration_source_start`;
//! - names are `char` arrays, qualified names are arrays of segments;
//! - positions are inclusive `source_start..=source_end`;
//! - enum constants are field declarations without a type whose initializer allocates the constant; their
//!   modifier word carries none of the implicit modifiers;
//! - a multi-variable declaration becomes one field declaration per variable, all referencing the same annotation
//!   nodes and sharing one `declaration_source_start`;
//! - generated declarations are tagged with [`bits::DO_NOT_TOUCH`] and listed after the declared members.

use fieldconst_core::{AccessLevel, Modifiers};

use super::{FieldSpec, HostTree, Initializer, Injection, NodeId, NodeKind, Span};
use crate::fixture::{AnnotationFixture, FixtureError, MemberFixture, SpanCursor, TypeFixture, UnitFixture, parse_modifiers};

/// ecj access flags (`ClassFileConstants`).
pub mod acc {
    pub const PUBLIC: i32 = 0x0001;
    pub const PRIVATE: i32 = 0x0002;
    pub const PROTECTED: i32 = 0x0004;
    pub const STATIC: i32 = 0x0008;
    pub const FINAL: i32 = 0x0010;
    pub const INTERFACE: i32 = 0x0200;
    pub const ABSTRACT: i32 = 0x0400;
    pub const ANNOTATION: i32 = 0x2000;
    pub const ENUM: i32 = 0x4000;
}

/// Node bits (`ASTNode.bits`).
pub mod bits {
    /// Declaration produced by a transform; other tools must leave it alone.
    pub const DO_NOT_TOUCH: i32 = 1 << 23;
}

/// Split a dotted name into its segments.
fn qualified(name: &str) -> Vec<Vec<char>> {
    name.split('.').map(|segment| segment.chars().collect()).collect()
}

fn join(segments: &[Vec<char>]) -> String {
    segments
        .iter()
        .map(|segment| segment.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(".")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcjExpression {
    StringLiteral(Vec<char>),
    Source(String),
    /// `RED` in `enum Color { RED }`.
    EnumConstantAllocation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EcjAst {
    TypeDeclaration {
        modifiers: i32,
        name: Vec<char>,
        fields: Vec<NodeId>,
        methods: Vec<NodeId>,
        member_types: Vec<NodeId>,
        annotations: Vec<NodeId>,
    },
    FieldDeclaration {
        modifiers: i32,
        name: Vec<char>,
        type_ref: Option<Vec<Vec<char>>>,
        initialization: Option<EcjExpression>,
        annotations: Vec<NodeId>,
    },
    MethodDeclaration {
        modifiers: i32,
        selector: Vec<char>,
        return_type: Vec<Vec<char>>,
        annotations: Vec<NodeId>,
    },
    Annotation {
        type_name: Vec<Vec<char>>,
        member_value_pairs: Vec<(Vec<char>, String)>,
    },
}

#[derive(Debug, Clone)]
struct EclipseNode {
    ast: EcjAst,
    up: Option<NodeId>,
    source_start: usize,
    /// Inclusive.
    source_end: usize,
    declaration_source_start: usize,
    bits: i32,
}

/// An ecj-style compilation unit.
#[derive(Debug, Clone, Default)]
pub struct EcjTree {
    nodes: Vec<EclipseNode>,
    types: Vec<NodeId>,
}

impl EcjTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lower a unit fixture into an ecj-style tree.
    pub fn from_fixture(unit: &UnitFixture) -> Result<Self, FixtureError> {
        let mut tree = EcjTree::new();
        let mut cursor = SpanCursor::new();
        for ty in &unit.types {
            let id = tree.lower_type(ty, None, &mut cursor)?;
            tree.types.push(id);
        }
        Ok(tree)
    }

    pub fn ast(&self, node: NodeId) -> &EcjAst {
        &self.nodes[node.index()].ast
    }

    pub fn bits(&self, node: NodeId) -> i32 {
        self.nodes[node.index()].bits
    }

    fn is_enum_constant(&self, node: NodeId) -> bool {
        matches!(
            self.ast(node),
            EcjAst::FieldDeclaration {
                initialization: Some(EcjExpression::EnumConstantAllocation),
                ..
            }
        )
    }

    fn push(&mut self, ast: EcjAst, up: Option<NodeId>, span: Span, declaration_start: usize) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(EclipseNode {
            ast,
            up,
            source_start: span.start,
            source_end: span.end.saturating_sub(1).max(span.start),
            declaration_source_start: declaration_start,
            bits: 0,
        });
        id
    }

    fn type_arrays_mut(&mut self, type_node: NodeId) -> Option<(&mut Vec<NodeId>, &mut Vec<NodeId>, &mut Vec<NodeId>)> {
        match &mut self.nodes[type_node.index()].ast {
            EcjAst::TypeDeclaration {
                fields,
                methods,
                member_types,
                ..
            } => Some((fields, methods, member_types)),
            _ => None,
        }
    }

    fn lower_annotations(&mut self, annotations: &[AnnotationFixture], cursor: &mut SpanCursor) -> Vec<NodeId> {
        annotations
            .iter()
            .map(|a| {
                let span = cursor.take(&a.name);
                let pairs = a
                    .args_vec()
                    .into_iter()
                    .map(|(name, value)| (name.chars().collect(), value))
                    .collect();
                self.push(
                    EcjAst::Annotation {
                        type_name: qualified(&a.name),
                        member_value_pairs: pairs,
                    },
                    None,
                    span,
                    span.start,
                )
            })
            .collect()
    }

    fn adopt(&mut self, annotations: &[NodeId], owner: NodeId) {
        for a in annotations {
            self.nodes[a.index()].up = Some(owner);
        }
    }

    fn modifier_word(modifiers: Modifiers) -> i32 {
        i32::try_from(modifiers.bits()).unwrap_or(0)
    }

    fn lower_type(
        &mut self,
        ty: &TypeFixture,
        up: Option<NodeId>,
        cursor: &mut SpanCursor,
    ) -> Result<NodeId, FixtureError> {
        let modifiers = Self::modifier_word(parse_modifiers(&ty.modifiers)? | ty.kind.modifiers());
        let span = cursor.take(&ty.name);
        let decl = self.push(
            EcjAst::TypeDeclaration {
                modifiers,
                name: ty.name.chars().collect(),
                fields: Vec::new(),
                methods: Vec::new(),
                member_types: Vec::new(),
                annotations: Vec::new(),
            },
            up,
            span,
            span.start,
        );
        let annotations = self.lower_annotations(&ty.annotations, cursor);
        self.adopt(&annotations, decl);
        if let EcjAst::TypeDeclaration { annotations: slot, .. } = &mut self.nodes[decl.index()].ast {
            *slot = annotations;
        }

        for member in &ty.members {
            self.lower_member(member, decl, cursor)?;
        }
        Ok(decl)
    }

    fn lower_member(&mut self, member: &MemberFixture, decl: NodeId, cursor: &mut SpanCursor) -> Result<(), FixtureError> {
        match member {
            MemberFixture::Field {
                names,
                ty,
                modifiers,
                annotations,
                init,
            } => {
                if names.is_empty() {
                    let type_name = self.name_of(decl).unwrap_or_default();
                    return Err(FixtureError::EmptyDeclaration(type_name));
                }
                let modifiers = Self::modifier_word(parse_modifiers(modifiers)?);
                let annotation_ids = self.lower_annotations(annotations, cursor);
                let mut declaration_start = annotation_ids.first().map(|a| self.nodes[a.index()].source_start);
                for (i, name) in names.iter().enumerate() {
                    let span = cursor.take(name);
                    let start = *declaration_start.get_or_insert(span.start);
                    let field = self.push(
                        EcjAst::FieldDeclaration {
                            modifiers,
                            name: name.chars().collect(),
                            type_ref: Some(qualified(ty)),
                            initialization: init.clone().map(EcjExpression::Source),
                            annotations: annotation_ids.clone(),
                        },
                        Some(decl),
                        span,
                        start,
                    );
                    if i == 0 {
                        self.adopt(&annotation_ids, field);
                    }
                    if let Some((fields, _, _)) = self.type_arrays_mut(decl) {
                        fields.push(field);
                    }
                }
            }
            MemberFixture::Method {
                name,
                returns,
                modifiers,
                annotations,
            } => {
                let modifiers = Self::modifier_word(parse_modifiers(modifiers)?);
                let annotation_ids = self.lower_annotations(annotations, cursor);
                let span = cursor.take(name);
                let start = annotation_ids
                    .first()
                    .map(|a| self.nodes[a.index()].source_start)
                    .unwrap_or(span.start);
                let method = self.push(
                    EcjAst::MethodDeclaration {
                        modifiers,
                        selector: name.chars().collect(),
                        return_type: qualified(returns),
                        annotations: annotation_ids.clone(),
                    },
                    Some(decl),
                    span,
                    start,
                );
                self.adopt(&annotation_ids, method);
                if let Some((_, methods, _)) = self.type_arrays_mut(decl) {
                    methods.push(method);
                }
            }
            MemberFixture::EnumConstant { name } => {
                let span = cursor.take(name);
                let constant = self.push(
                    EcjAst::FieldDeclaration {
                        modifiers: 0,
                        name: name.chars().collect(),
                        type_ref: None,
                        initialization: Some(EcjExpression::EnumConstantAllocation),
                        annotations: Vec::new(),
                    },
                    Some(decl),
                    span,
                    span.start,
                );
                if let Some((fields, _, _)) = self.type_arrays_mut(decl) {
                    fields.push(constant);
                }
            }
            MemberFixture::Type(nested) => {
                let inner = self.lower_type(nested, Some(decl), cursor)?;
                if let Some((_, _, member_types)) = self.type_arrays_mut(decl) {
                    member_types.push(inner);
                }
            }
        }
        Ok(())
    }
}

impl HostTree for EcjTree {
    type ModifierBits = i32;

    fn roots(&self) -> Vec<NodeId> {
        self.types.clone()
    }

    fn kind_of(&self, node: NodeId) -> NodeKind {
        match self.ast(node) {
            EcjAst::TypeDeclaration { .. } => NodeKind::Type,
            EcjAst::FieldDeclaration { .. } => NodeKind::Field,
            EcjAst::MethodDeclaration { .. } | EcjAst::Annotation { .. } => NodeKind::Other,
        }
    }

    fn name_of(&self, node: NodeId) -> Option<String> {
        match self.ast(node) {
            EcjAst::TypeDeclaration { name, .. } | EcjAst::FieldDeclaration { name, .. } => {
                Some(name.iter().collect())
            }
            EcjAst::MethodDeclaration { selector, .. } => Some(selector.iter().collect()),
            EcjAst::Annotation { type_name, .. } => Some(join(type_name)),
        }
    }

    fn modifiers_of(&self, node: NodeId) -> Modifiers {
        if self.is_enum_constant(node) {
            return Modifiers::PUBLIC | Modifiers::STATIC | Modifiers::FINAL | Modifiers::ENUM;
        }
        let word = match self.ast(node) {
            EcjAst::TypeDeclaration { modifiers, .. }
            | EcjAst::FieldDeclaration { modifiers, .. }
            | EcjAst::MethodDeclaration { modifiers, .. } => *modifiers,
            EcjAst::Annotation { .. } => 0,
        };
        Modifiers::from_bits(u32::try_from(word & 0xFFFF).unwrap_or(0))
    }

    fn span_of(&self, node: NodeId) -> Span {
        let n = &self.nodes[node.index()];
        Span::new(n.source_start, n.source_end + 1)
    }

    fn members_of(&self, type_node: NodeId) -> Vec<NodeId> {
        let EcjAst::TypeDeclaration {
            fields,
            methods,
            member_types,
            ..
        } = self.ast(type_node)
        else {
            return Vec::new();
        };

        let (generated, mut declared): (Vec<NodeId>, Vec<NodeId>) = fields
            .iter()
            .chain(methods)
            .chain(member_types)
            .copied()
            .partition(|m| self.bits(*m) & bits::DO_NOT_TOUCH != 0);
        declared.sort_by_key(|m| {
            let n = &self.nodes[m.index()];
            (n.declaration_source_start, n.source_start)
        });
        declared.extend(generated);
        declared
    }

    fn parent_of(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[node.index()].up
    }

    fn annotations_of(&self, node: NodeId) -> Vec<NodeId> {
        match self.ast(node) {
            EcjAst::TypeDeclaration { annotations, .. }
            | EcjAst::FieldDeclaration { annotations, .. }
            | EcjAst::MethodDeclaration { annotations, .. } => annotations.clone(),
            EcjAst::Annotation { .. } => Vec::new(),
        }
    }

    fn annotation_name(&self, annotation: NodeId) -> Option<String> {
        match self.ast(annotation) {
            EcjAst::Annotation { type_name, .. } => Some(join(type_name)),
            _ => None,
        }
    }

    fn annotation_args(&self, annotation: NodeId) -> Vec<(String, String)> {
        match self.ast(annotation) {
            EcjAst::Annotation { member_value_pairs, .. } => member_value_pairs
                .iter()
                .map(|(name, value)| (name.iter().collect(), value.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn declared_type_of(&self, node: NodeId) -> Option<String> {
        match self.ast(node) {
            EcjAst::FieldDeclaration { type_ref: Some(ty), .. } => Some(join(ty)),
            // Enum constants have the enclosing enum as their type.
            EcjAst::FieldDeclaration { type_ref: None, .. } => self.parent_of(node).and_then(|up| self.name_of(up)),
            EcjAst::MethodDeclaration { return_type, .. } => Some(join(return_type)),
            _ => None,
        }
    }

    fn initializer_of(&self, node: NodeId) -> Option<Initializer> {
        match self.ast(node) {
            EcjAst::FieldDeclaration {
                initialization: Some(init),
                ..
            } => match init {
                EcjExpression::StringLiteral(chars) => Some(Initializer::StringLiteral(chars.iter().collect())),
                EcjExpression::Source(text) => Some(Initializer::Expression(text.clone())),
                EcjExpression::EnumConstantAllocation => None,
            },
            _ => None,
        }
    }

    fn resolve_annotation_to_fields(&self, marker: NodeId) -> Vec<NodeId> {
        let Some(annotated) = self.parent_of(marker) else {
            return Vec::new();
        };
        if self.kind_of(annotated) != NodeKind::Field {
            return Vec::new();
        }
        let Some(type_node) = self.parent_of(annotated) else {
            return vec![annotated];
        };
        let group = self.nodes[annotated.index()].declaration_source_start;
        self.members_of(type_node)
            .into_iter()
            .filter(|m| {
                self.kind_of(*m) == NodeKind::Field
                    && self.nodes[m.index()].declaration_source_start == group
                    && self.annotations_of(*m).contains(&marker)
            })
            .collect()
    }

    fn to_host_modifier_bits(&self, level: AccessLevel) -> i32 {
        match level {
            AccessLevel::Public => acc::PUBLIC,
            AccessLevel::Protected => acc::PROTECTED,
            AccessLevel::Private => acc::PRIVATE,
            AccessLevel::Package | AccessLevel::None => 0,
        }
    }

    fn append_member(&mut self, type_node: NodeId, spec: FieldSpec<i32>, _token: Injection) -> NodeId {
        let modifiers = spec.access_bits | Self::modifier_word(spec.modifiers_extra);
        let field = self.push(
            EcjAst::FieldDeclaration {
                modifiers,
                name: spec.name.chars().collect(),
                type_ref: Some(qualified(&spec.declared_type)),
                initialization: Some(EcjExpression::StringLiteral(spec.initializer_literal.chars().collect())),
                annotations: Vec::new(),
            },
            Some(type_node),
            spec.span,
            spec.span.start,
        );
        self.nodes[field.index()].bits |= bits::DO_NOT_TOUCH;
        if let Some((fields, _, _)) = self.type_arrays_mut(type_node) {
            fields.push(field);
        }
        field
    }
}
