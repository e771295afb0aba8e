//! The `@FieldConstants` transform.
//!
//! Every marker usage becomes one [`SynthesisRequest`], processed to completion before the next one starts:
//!
//! ```text
//! run ─► dispatch ─┬─► synthesize (field usage, once per declared variable)
//!                  └─► expand ─► eligibility ─► guard ─► synthesize (type usage)
//! ```
//!
//! ## Notes
//!
//! - Mutation only ever appends members to the type that owns the visited fields; existing nodes are never
//!   rewritten. A later request therefore observes every constant injected by an earlier one.
//! - Diagnostics go to the caller's [`DiagnosticSink`]; a problem aborts at most the request that caused it.

pub mod dispatch;
pub mod eligibility;
pub mod expand;
pub mod guard;
pub mod synthesize;

use std::collections::HashSet;

use fieldconst_core::AccessLevel;
use fieldconst_core::access::UnknownAccessLevel;

pub use dispatch::dispatch;
pub use eligibility::is_eligible;
pub use expand::{Expansion, expand};
pub use synthesize::{Synthesis, SynthesisMode, synthesize};

use crate::config::TransformConfig;
use crate::diagnostics::{Diagnostic, DiagnosticSink, FieldConstantsError};
use crate::host::{HostTree, NodeId, NodeKind};

/// Marker argument holding the requested access level.
pub const LEVEL_ARG: &str = "level";
/// Marker argument holding annotations to copy onto generated methods.
pub const ON_METHOD_ARG: &str = "onMethod";

/// What a marker usage is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetKind {
    Field,
    Type,
    Other,
}

/// One marker usage, ready to dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesisRequest {
    pub target: TargetKind,
    pub level: AccessLevel,
    /// The marker usage itself.
    pub origin: NodeId,
    pub on_method: Vec<String>,
}

impl SynthesisRequest {
    /// Read a request from the marker usage `marker`.
    ///
    /// ## Returns
    /// - `Ok(None)` when the usage is not attached to any declaration.
    /// - `Err` when the `level` argument does not name an access level.
    pub fn from_marker<H: HostTree + ?Sized>(tree: &H, marker: NodeId) -> Result<Option<Self>, UnknownAccessLevel> {
        let Some(annotated) = tree.parent_of(marker) else {
            return Ok(None);
        };
        let target = match tree.kind_of(annotated) {
            NodeKind::Field => TargetKind::Field,
            NodeKind::Type => TargetKind::Type,
            NodeKind::Other => TargetKind::Other,
        };

        let mut level = AccessLevel::default();
        let mut on_method = Vec::new();
        for (name, value) in tree.annotation_args(marker) {
            match name.as_str() {
                LEVEL_ARG => level = value.parse()?,
                ON_METHOD_ARG => on_method = split_annotation_list(&value),
                _ => {}
            }
        }
        Ok(Some(Self {
            target,
            level,
            origin: marker,
            on_method,
        }))
    }
}

/// Split `{@A, @B(x)}` (or a single `@A`) into its entries.
fn split_annotation_list(text: &str) -> Vec<String> {
    let inner = text.trim();
    let inner = inner
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(inner);
    inner
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

/// Collect every marker usage of `tree`, in tree order.
///
/// A usage shared by several nodes (a multi-variable declaration) is listed once.
pub fn marker_usages<H: HostTree + ?Sized>(tree: &H, config: &TransformConfig) -> Vec<NodeId> {
    fn visit<H: HostTree + ?Sized>(
        tree: &H,
        node: NodeId,
        markers: &[String],
        seen: &mut HashSet<NodeId>,
        out: &mut Vec<NodeId>,
    ) {
        for annotation in tree.annotations_of(node) {
            let is_marker = tree
                .annotation_name(annotation)
                .is_some_and(|name| markers.iter().any(|m| *m == name));
            if is_marker && seen.insert(annotation) {
                out.push(annotation);
            }
        }
        if tree.kind_of(node) == NodeKind::Type {
            for member in tree.members_of(node) {
                visit(tree, member, markers, seen, out);
            }
        }
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for root in tree.roots() {
        visit(tree, root, config.marker_names(), &mut seen, &mut out);
    }
    out
}

/// Dispatch every marker usage of `tree`.
///
/// Usages are collected before any mutation, so generated members are never themselves visited.
///
/// ## Returns
/// - The total number of constants injected.
#[tracing::instrument(skip_all, fields(roots = tree.roots().len()))]
pub fn run<H: HostTree + ?Sized>(tree: &mut H, config: &TransformConfig, sink: &mut dyn DiagnosticSink) -> usize {
    let mut injected = 0;
    for marker in marker_usages(tree, config) {
        match SynthesisRequest::from_marker(tree, marker) {
            Ok(Some(request)) => injected += dispatch(tree, config, sink, &request),
            Ok(None) => tracing::trace!(%marker, "detached marker usage, skipping"),
            Err(err) => sink.report(Diagnostic::new(
                marker,
                tree.span_of(marker),
                FieldConstantsError::MalformedMarker { detail: err.to_string() },
            )),
        }
    }
    tracing::debug!(injected, "transform finished");
    injected
}
