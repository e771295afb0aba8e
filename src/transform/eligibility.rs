//! Which members may produce a constant.

use fieldconst_core::NamingPolicy;

use crate::host::{HostTree, NodeId, NodeKind};

/// Check whether `field` qualifies for constant generation.
///
/// A member qualifies only if it is a field, it is not static (enum constants count as static), and its name does
/// not start with the reserved internal-field prefix. The accessor prefix list is consulted later, per field, by
/// the synthesizer.
pub fn is_eligible<H: HostTree + ?Sized>(tree: &H, field: NodeId, policy: &NamingPolicy) -> bool {
    if tree.kind_of(field) != NodeKind::Field {
        return false;
    }
    if tree.modifiers_of(field).is_static() {
        return false;
    }
    tree.name_of(field).is_some_and(|name| !policy.is_reserved(&name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::UnitFixture;
    use crate::host::ecj::EcjTree;
    use crate::host::javac::JavacTree;

    const UNIT: &str = r#"{ "types": [{
        "name": "Mixed",
        "kind": "enum",
        "members": [
            { "member": "enum_constant", "name": "ONE" },
            { "member": "field", "names": ["plain"], "type": "int" },
            { "member": "field", "names": ["shared"], "type": "int", "modifiers": ["static"] },
            { "member": "field", "names": ["$lock"], "type": "Object", "modifiers": ["private", "final"] },
            { "member": "method", "name": "plain" },
            { "member": "type", "name": "Nested" }
        ]
    }] }"#;

    fn eligible_names<H: HostTree>(tree: &H) -> Vec<String> {
        let policy = NamingPolicy::default();
        tree.members_of(tree.roots()[0])
            .into_iter()
            .filter(|m| is_eligible(tree, *m, &policy))
            .filter_map(|m| tree.name_of(m))
            .collect()
    }

    #[test]
    fn test_only_plain_instance_fields_qualify_javac() {
        let unit = UnitFixture::from_json(UNIT).unwrap();
        assert_eq!(eligible_names(&JavacTree::from_fixture(&unit).unwrap()), vec!["plain"]);
    }

    #[test]
    fn test_only_plain_instance_fields_qualify_ecj() {
        let unit = UnitFixture::from_json(UNIT).unwrap();
        assert_eq!(eligible_names(&EcjTree::from_fixture(&unit).unwrap()), vec!["plain"]);
    }

    #[test]
    fn test_custom_reserved_prefix() {
        let unit = UnitFixture::from_json(UNIT).unwrap();
        let tree = JavacTree::from_fixture(&unit).unwrap();
        let policy = NamingPolicy::new(Vec::new(), "");
        let lock = tree.members_of(tree.roots()[0])[3];
        assert!(is_eligible(&tree, lock, &policy));
    }
}
