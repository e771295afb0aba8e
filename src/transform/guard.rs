//! Duplicate avoidance.
//!
//! A field can be reached both by its own marker and by its enclosing type's marker, and the two usages are
//! dispatched as separate requests. The check runs against the tree as it is when a request is processed, so
//! whichever request comes first generates the constant and the other one observes it.

use crate::host::{HostTree, Initializer, NodeId, NodeKind};

/// Check whether `node` carries a marker usage of its own.
pub fn has_marker<H: HostTree + ?Sized>(tree: &H, node: NodeId, marker_names: &[String]) -> bool {
    tree.has_marker_annotation(node, marker_names)
}

/// Find the field named `name` declared by `type_node`, if any.
pub fn existing_field<H: HostTree + ?Sized>(tree: &H, type_node: NodeId, name: &str) -> Option<NodeId> {
    tree.members_of(type_node)
        .into_iter()
        .find(|&m| tree.kind_of(m) == NodeKind::Field && tree.name_of(m).as_deref() == Some(name))
}

/// Check whether `member` is already the constant for the field named `field_name`.
pub fn is_constant_for<H: HostTree + ?Sized>(tree: &H, member: NodeId, field_name: &str) -> bool {
    matches!(tree.initializer_of(member), Some(Initializer::StringLiteral(value)) if value == field_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TransformConfig;
    use crate::fixture::UnitFixture;
    use crate::host::javac::JavacTree;

    fn tree() -> JavacTree {
        let unit = UnitFixture::from_json(
            r#"{ "types": [{
                "name": "A",
                "annotations": [{ "name": "FieldConstants" }],
                "members": [
                    { "member": "field", "names": ["tagged"], "type": "int",
                      "annotations": [{ "name": "lombok.FieldConstants" }] },
                    { "member": "field", "names": ["other"], "type": "int",
                      "annotations": [{ "name": "Deprecated" }] },
                    { "member": "field", "names": ["TAGGED"], "type": "String", "init": "\"tagged\"" }
                ]
            }] }"#,
        )
        .unwrap();
        JavacTree::from_fixture(&unit).unwrap()
    }

    #[test]
    fn test_has_marker_matches_both_spellings() {
        let tree = tree();
        let config = TransformConfig::default();
        let root = tree.roots()[0];
        let members = tree.members_of(root);
        assert!(has_marker(&tree, root, config.marker_names()));
        assert!(has_marker(&tree, members[0], config.marker_names()));
        assert!(!has_marker(&tree, members[1], config.marker_names()));
    }

    #[test]
    fn test_has_marker_respects_configured_names() {
        let tree = tree();
        let config = TransformConfig::default().with_marker_names(["Deprecated"]);
        let other = tree.members_of(tree.roots()[0])[1];
        assert!(has_marker(&tree, other, config.marker_names()));
    }

    #[test]
    fn test_existing_field() {
        let tree = tree();
        let root = tree.roots()[0];
        assert_eq!(existing_field(&tree, root, "TAGGED"), Some(tree.members_of(root)[2]));
        assert_eq!(existing_field(&tree, root, "MISSING"), None);
    }

    #[test]
    fn test_is_constant_for_matches_generated_constant_only() {
        let mut tree = tree();
        let mut sink: Vec<crate::diagnostics::Diagnostic> = Vec::new();
        crate::transform::run(&mut tree, &TransformConfig::default(), &mut sink);

        let root = tree.roots()[0];
        let other = existing_field(&tree, root, "OTHER").unwrap();
        assert!(is_constant_for(&tree, other, "other"));
        assert!(!is_constant_for(&tree, other, "tagged"));
        // Hand-written source initializers are not string literals of a generated constant.
        assert!(!is_constant_for(&tree, tree.members_of(root)[2], "tagged"));
    }
}
