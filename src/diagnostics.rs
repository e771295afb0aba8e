//! Diagnostics reported by the transform.
//!
//! Nothing here is ever thrown: every problem becomes a [`Diagnostic`] pushed into a [`DiagnosticSink`], and at most
//! the single marker usage being processed yields no generated code.

use std::fmt;

use fieldconst_core::messages;
use miette::{Diagnostic as MietteDiagnostic, GraphicalReportHandler};
use thiserror::Error;

use crate::host::{NodeId, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Every problem the transform can report.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum FieldConstantsError {
    /// A type-level usage on something that is not a class or an enum.
    #[error("{}", messages::TARGET_KIND_MSG)]
    #[diagnostic(
        code(fieldconst::target_kind),
        help("move the annotation to a class, an enum, or a field")
    )]
    TargetKind,

    /// A resolved field target is not a field.
    #[error("{}", messages::FIELD_ONLY_MSG)]
    #[diagnostic(code(fieldconst::field_only))]
    FieldOnly,

    #[error("{}", messages::NAMING_POLICY_MSG)]
    #[diagnostic(
        code(fieldconst::naming_policy),
        severity(Warning),
        help("add the field's prefix to the accessor prefix list, or rename the field")
    )]
    NamingPolicy,

    #[error("{}", messages::ACCESS_LEVEL_NONE_MSG)]
    #[diagnostic(
        code(fieldconst::access_level_none),
        severity(Warning),
        help("use PUBLIC, PROTECTED, PACKAGE or PRIVATE, or remove the annotation")
    )]
    AccessLevelNone,

    #[error("{}", messages::ON_METHOD_ON_TYPE_MSG)]
    #[diagnostic(code(fieldconst::on_method_on_type))]
    OnMethodOnType,

    #[error("{}", messages::already_exists_msg(.constant_name))]
    #[diagnostic(code(fieldconst::already_exists), severity(Warning))]
    AlreadyExists { constant_name: String },

    /// The usage's arguments could not be read.
    #[error("malformed @FieldConstants usage: {detail}")]
    #[diagnostic(code(fieldconst::malformed_marker))]
    MalformedMarker { detail: String },
}

impl FieldConstantsError {
    pub fn severity(&self) -> Severity {
        match self {
            FieldConstantsError::NamingPolicy
            | FieldConstantsError::AccessLevelNone
            | FieldConstantsError::AlreadyExists { .. } => Severity::Warning,
            FieldConstantsError::TargetKind
            | FieldConstantsError::FieldOnly
            | FieldConstantsError::OnMethodOnType
            | FieldConstantsError::MalformedMarker { .. } => Severity::Error,
        }
    }
}

/// One reported problem, anchored at a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub node: NodeId,
    pub span: Span,
    pub error: FieldConstantsError,
}

impl Diagnostic {
    pub fn new(node: NodeId, span: Span, error: FieldConstantsError) -> Self {
        Self { node, span, error }
    }

    pub fn severity(&self) -> Severity {
        self.error.severity()
    }

    pub fn message(&self) -> String {
        self.error.to_string()
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }

    /// Render the diagnostic with miette's graphical handler, followed by its location.
    pub fn render(&self, location: &str) -> String {
        let mut out = String::new();
        if GraphicalReportHandler::new().render_report(&mut out, &self.error).is_err() {
            out = format!("{}: {}\n", self.severity(), self.message());
        }
        out.push_str(&format!("  --> {location} [{}]\n", self.span));
        out
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (at {})", self.severity(), self.message(), self.span)
    }
}

/// Receiver of diagnostics.
///
/// Reporting never fails and never interrupts the transform.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl DiagnosticSink for Vec<Diagnostic> {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.push(diagnostic);
    }
}

/// Sink that forwards to `tracing` as well as collecting.
#[derive(Debug, Default)]
pub struct TracingSink {
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Error => tracing::error!(node = %diagnostic.node, span = %diagnostic.span, "{}", diagnostic.message()),
            Severity::Warning => tracing::warn!(node = %diagnostic.node, span = %diagnostic.span, "{}", diagnostic.message()),
        }
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_catalog() {
        assert_eq!(FieldConstantsError::TargetKind.to_string(), messages::TARGET_KIND_MSG);
        assert_eq!(
            FieldConstantsError::AlreadyExists {
                constant_name: "FOO".to_string()
            }
            .to_string(),
            "Not generating FOO: A field with that name already exists"
        );
    }

    #[test]
    fn test_severity_taxonomy() {
        assert_eq!(FieldConstantsError::TargetKind.severity(), Severity::Error);
        assert_eq!(FieldConstantsError::NamingPolicy.severity(), Severity::Warning);
        assert_eq!(FieldConstantsError::AccessLevelNone.severity(), Severity::Warning);
        assert_eq!(FieldConstantsError::OnMethodOnType.severity(), Severity::Error);
    }

    #[test]
    fn test_miette_codes() {
        let code = FieldConstantsError::AccessLevelNone.code().map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("fieldconst::access_level_none"));
        assert_eq!(
            MietteDiagnostic::severity(&FieldConstantsError::NamingPolicy),
            Some(miette::Severity::Warning)
        );
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut sink: Vec<Diagnostic> = Vec::new();
        sink.report(Diagnostic::new(NodeId::new(0), Span::new(0, 1), FieldConstantsError::FieldOnly));
        assert_eq!(sink.len(), 1);
        assert!(sink[0].is_error());
    }

    #[test]
    fn test_render_includes_location() {
        let diagnostic = Diagnostic::new(NodeId::new(2), Span::new(3, 7), FieldConstantsError::NamingPolicy);
        let rendered = diagnostic.render("Point.mValue");
        assert!(rendered.contains("Point.mValue"));
        assert!(rendered.contains("3..7"));
    }
}
