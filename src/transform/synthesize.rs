//! Build and inject one constant for one field.

use fieldconst_core::{AccessLevel, Modifiers, PolicyVerdict};

use super::guard;
use crate::config::TransformConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, FieldConstantsError};
use crate::host::{FieldSpec, HostTree, Injection, NodeId, NodeKind, STRING_TYPE};

/// How the field was reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisMode {
    /// The field's own marker usage; problems are reported.
    Direct,
    /// Visited while expanding a type-level usage; fields with their own marker are left to that usage, and a
    /// constant generated for this same field earlier is skipped quietly.
    TypeExpansion,
}

/// Outcome of one synthesis attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Synthesis {
    Injected(NodeId),
    Skipped,
    Rejected,
}

pub(crate) fn report<H: HostTree + ?Sized>(
    tree: &H,
    sink: &mut dyn DiagnosticSink,
    node: NodeId,
    error: FieldConstantsError,
) {
    sink.report(Diagnostic::new(node, tree.span_of(node), error));
}

/// Generate the constant for `field`.
///
/// ## Parameters
/// - `origin`: the node whose position the constant inherits (the marker usage), and where target errors go.
///
/// ## Returns
/// - [`Synthesis::Injected`] with the new member, or why nothing was generated.
///
/// ## Notes
/// - Exactly one member is appended to the owning type on success; nothing is touched otherwise.
pub fn synthesize<H: HostTree + ?Sized>(
    tree: &mut H,
    config: &TransformConfig,
    sink: &mut dyn DiagnosticSink,
    field: NodeId,
    level: AccessLevel,
    origin: NodeId,
    mode: SynthesisMode,
) -> Synthesis {
    if tree.kind_of(field) != NodeKind::Field {
        report(tree, sink, origin, FieldConstantsError::FieldOnly);
        return Synthesis::Rejected;
    }
    if level == AccessLevel::None {
        report(tree, sink, origin, FieldConstantsError::AccessLevelNone);
        return Synthesis::Rejected;
    }
    if mode == SynthesisMode::TypeExpansion && guard::has_marker(tree, field, config.marker_names()) {
        tracing::trace!(%field, "field carries its own marker, leaving it to that usage");
        return Synthesis::Skipped;
    }

    let field_name = tree.name_of(field).unwrap_or_default();
    let constant_name = match config.policy().verdict(&field_name) {
        PolicyVerdict::Fits { constant_name } => constant_name,
        PolicyVerdict::DoesNotFit => {
            report(tree, sink, field, FieldConstantsError::NamingPolicy);
            return Synthesis::Skipped;
        }
    };

    let Some(owner) = tree.parent_of(field) else {
        report(tree, sink, origin, FieldConstantsError::FieldOnly);
        return Synthesis::Rejected;
    };
    if let Some(existing) = guard::existing_field(tree, owner, &constant_name) {
        if mode == SynthesisMode::TypeExpansion && guard::is_constant_for(tree, existing, &field_name) {
            tracing::trace!(%field, "constant already generated");
            return Synthesis::Skipped;
        }
        // Type-level clashes point at the field whose constant is missing.
        let anchor = match mode {
            SynthesisMode::Direct => origin,
            SynthesisMode::TypeExpansion => field,
        };
        report(tree, sink, anchor, FieldConstantsError::AlreadyExists { constant_name });
        return Synthesis::Skipped;
    }

    let spec = FieldSpec {
        name: constant_name,
        access_bits: tree.to_host_modifier_bits(level),
        modifiers_extra: Modifiers::STATIC | Modifiers::FINAL,
        declared_type: STRING_TYPE.to_string(),
        initializer_literal: field_name,
        span: tree.span_of(origin),
    };
    let constant = tree.append_member(owner, spec, Injection::new());
    tracing::debug!(
        "Injected {}.{}",
        tree.name_of(owner).unwrap_or_default(),
        tree.name_of(constant).unwrap_or_default()
    );
    Synthesis::Injected(constant)
}
