//! Type-level expansion: one constant per eligible field of a class or enum.
//!
//! Non-field members (methods, nested types, initializers) are skipped and iteration continues; only direct
//! members are visited.

use fieldconst_core::AccessLevel;

use super::eligibility::is_eligible;
use super::synthesize::{Synthesis, SynthesisMode, report, synthesize};
use super::guard;
use crate::config::TransformConfig;
use crate::diagnostics::{DiagnosticSink, FieldConstantsError};
use crate::host::{HostTree, NodeId, NodeKind};

/// Outcome of expanding one type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expansion {
    /// `skip_if_marker_present` was set and the type carries its own marker.
    AlreadyMarked,
    /// The type was walked; holds the generated constants in visiting order.
    Expanded(Vec<NodeId>),
    /// Not a class or an enum; an error was reported and nothing changed.
    Rejected,
}

impl Expansion {
    pub fn is_success(&self) -> bool {
        !matches!(self, Expansion::Rejected)
    }

    pub fn generated(&self) -> &[NodeId] {
        match self {
            Expansion::Expanded(generated) => generated,
            Expansion::AlreadyMarked | Expansion::Rejected => &[],
        }
    }
}

/// Generate constants for every eligible direct field of `type_node`.
///
/// ## Parameters
/// - `origin`: the marker usage that requested the expansion; errors are reported there and generated constants
///   inherit its position.
/// - `skip_if_marker_present`: return early when `type_node` carries a marker of its own.
pub fn expand<H: HostTree + ?Sized>(
    tree: &mut H,
    config: &TransformConfig,
    sink: &mut dyn DiagnosticSink,
    type_node: NodeId,
    origin: NodeId,
    level: AccessLevel,
    skip_if_marker_present: bool,
) -> Expansion {
    if skip_if_marker_present && guard::has_marker(tree, type_node, config.marker_names()) {
        return Expansion::AlreadyMarked;
    }
    if tree.kind_of(type_node) != NodeKind::Type || tree.modifiers_of(type_node).is_interface_like() {
        report(tree, sink, origin, FieldConstantsError::TargetKind);
        return Expansion::Rejected;
    }

    let mut generated = Vec::new();
    // Snapshot: appended constants are not revisited.
    for member in tree.members_of(type_node) {
        if !is_eligible(tree, member, config.policy()) {
            tracing::trace!(%member, "not eligible, skipping");
            continue;
        }
        if let Synthesis::Injected(constant) =
            synthesize(tree, config, sink, member, level, origin, SynthesisMode::TypeExpansion)
        {
            generated.push(constant);
        }
    }
    Expansion::Expanded(generated)
}
