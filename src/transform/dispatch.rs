//! Route one marker usage to the synthesizer or the type-level expander.

use fieldconst_core::AccessLevel;

use super::eligibility::is_eligible;
use super::expand::expand;
use super::synthesize::{Synthesis, SynthesisMode, report, synthesize};
use super::{SynthesisRequest, TargetKind};
use crate::config::TransformConfig;
use crate::diagnostics::{DiagnosticSink, FieldConstantsError};
use crate::host::{HostTree, NodeKind};

/// Process a single request against `tree`.
///
/// ## Returns
/// - The number of constants injected.
///
/// ## Notes
/// - A type-level usage always expands, even when the type carries a second marker; only fields visited during the
///   expansion are checked for a marker of their own.
/// - A target that is neither a field nor a type is ignored without a diagnostic.
#[tracing::instrument(skip_all, fields(origin = %request.origin, target = ?request.target))]
pub fn dispatch<H: HostTree + ?Sized>(
    tree: &mut H,
    config: &TransformConfig,
    sink: &mut dyn DiagnosticSink,
    request: &SynthesisRequest,
) -> usize {
    tracing::debug!(
        "FieldConstants on {}",
        tree.parent_of(request.origin)
            .and_then(|annotated| tree.name_of(annotated))
            .unwrap_or_default()
    );
    if request.level == AccessLevel::None {
        report(tree, sink, request.origin, FieldConstantsError::AccessLevelNone);
        return 0;
    }

    match request.target {
        TargetKind::Field => {
            let mut injected = 0;
            for field in tree.resolve_annotation_to_fields(request.origin) {
                if tree.kind_of(field) == NodeKind::Field && !is_eligible(tree, field, config.policy()) {
                    tracing::trace!(%field, "not eligible, skipping");
                    continue;
                }
                let outcome = synthesize(
                    tree,
                    config,
                    sink,
                    field,
                    request.level,
                    request.origin,
                    SynthesisMode::Direct,
                );
                if matches!(outcome, Synthesis::Injected(_)) {
                    injected += 1;
                }
            }
            injected
        }
        TargetKind::Type => {
            if !request.on_method.is_empty() {
                report(tree, sink, request.origin, FieldConstantsError::OnMethodOnType);
            }
            let Some(type_node) = tree.parent_of(request.origin) else {
                report(tree, sink, request.origin, FieldConstantsError::TargetKind);
                return 0;
            };
            expand(tree, config, sink, type_node, request.origin, request.level, false)
                .generated()
                .len()
        }
        TargetKind::Other => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::{Diagnostic, Severity};
    use crate::fixture::UnitFixture;
    use crate::host::ecj::EcjTree;
    use crate::host::javac::JavacTree;
    use crate::host::{Initializer, NodeId};

    const UNIT: &str = r#"{ "types": [{ "name": "Person", "members": [
        { "member": "field", "names": ["firstName", "lastName"], "type": "String",
          "annotations": [{ "name": "FieldConstants", "args": { "level": "AccessLevel.PRIVATE" } }] },
        { "member": "field", "names": ["$cache"], "type": "Object",
          "annotations": [{ "name": "FieldConstants" }] },
        { "member": "method", "name": "greet",
          "annotations": [{ "name": "FieldConstants" }] }
    ] }] }"#;

    fn request_for<H: HostTree>(tree: &H, member: usize) -> SynthesisRequest {
        let node = tree.members_of(tree.roots()[0])[member];
        let marker = tree.annotations_of(node)[0];
        SynthesisRequest::from_marker(tree, marker).unwrap().unwrap()
    }

    fn constant_names<H: HostTree>(tree: &H, type_node: NodeId) -> Vec<String> {
        tree.members_of(type_node)
            .into_iter()
            .filter(|m| matches!(tree.initializer_of(*m), Some(Initializer::StringLiteral(_))))
            .filter_map(|m| tree.name_of(m))
            .collect()
    }

    fn check_multi_variable<H: HostTree>(mut tree: H) {
        let config = TransformConfig::default();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let request = request_for(&tree, 0);
        assert_eq!(request.target, TargetKind::Field);
        assert_eq!(request.level, AccessLevel::Private);

        let injected = dispatch(&mut tree, &config, &mut sink, &request);

        assert_eq!(injected, 2);
        assert!(sink.is_empty(), "{sink:?}");
        let root = tree.roots()[0];
        assert_eq!(constant_names(&tree, root), vec!["FIRST_NAME", "LAST_NAME"]);
    }

    #[test]
    fn test_multi_variable_declaration_javac() {
        let unit = UnitFixture::from_json(UNIT).unwrap();
        check_multi_variable(JavacTree::from_fixture(&unit).unwrap());
    }

    #[test]
    fn test_multi_variable_declaration_ecj() {
        let unit = UnitFixture::from_json(UNIT).unwrap();
        check_multi_variable(EcjTree::from_fixture(&unit).unwrap());
    }

    #[test]
    fn test_reserved_field_is_silently_skipped() {
        let unit = UnitFixture::from_json(UNIT).unwrap();
        let mut tree = JavacTree::from_fixture(&unit).unwrap();
        let config = TransformConfig::default();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let request = request_for(&tree, 2);

        assert_eq!(dispatch(&mut tree, &config, &mut sink, &request), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_marker_on_method_is_ignored() {
        let unit = UnitFixture::from_json(UNIT).unwrap();
        let mut tree = JavacTree::from_fixture(&unit).unwrap();
        let config = TransformConfig::default();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let request = request_for(&tree, 3);
        assert_eq!(request.target, TargetKind::Other);

        assert_eq!(dispatch(&mut tree, &config, &mut sink, &request), 0);
        assert!(sink.is_empty());
    }

    #[test]
    fn test_none_level_aborts_with_warning() {
        let unit = UnitFixture::from_json(UNIT).unwrap();
        let mut tree = EcjTree::from_fixture(&unit).unwrap();
        let config = TransformConfig::default();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let mut request = request_for(&tree, 0);
        request.level = AccessLevel::None;
        let before = tree.members_of(tree.roots()[0]).len();

        assert_eq!(dispatch(&mut tree, &config, &mut sink, &request), 0);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].error, FieldConstantsError::AccessLevelNone);
        assert_eq!(sink[0].severity(), Severity::Warning);
        assert_eq!(sink[0].node, request.origin);
        assert_eq!(tree.members_of(tree.roots()[0]).len(), before);
    }

    #[test]
    fn test_on_method_on_type_reports_and_still_expands() {
        let unit = UnitFixture::from_json(
            r#"{ "types": [{ "name": "Item",
                "annotations": [{ "name": "FieldConstants", "args": { "onMethod": "{@Deprecated}" } }],
                "members": [{ "member": "field", "names": ["price"], "type": "int" }] }] }"#,
        )
        .unwrap();
        let mut tree = JavacTree::from_fixture(&unit).unwrap();
        let config = TransformConfig::default();
        let mut sink: Vec<Diagnostic> = Vec::new();
        let root = tree.roots()[0];
        let marker = tree.annotations_of(root)[0];
        let request = SynthesisRequest::from_marker(&tree, marker).unwrap().unwrap();
        assert_eq!(request.target, TargetKind::Type);
        assert_eq!(request.on_method, vec!["@Deprecated"]);

        assert_eq!(dispatch(&mut tree, &config, &mut sink, &request), 1);
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].error, FieldConstantsError::OnMethodOnType);
        assert_eq!(constant_names(&tree, root), vec!["PRICE"]);
    }
}
