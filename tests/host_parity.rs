//! Parity checks between the javac-style and ecj-style host adapters.
//!
//! The same unit description lowered into either tree must transform identically: same rendering, same
//! diagnostics, same diagnostic spans.

use std::fs;
use std::path::Path;

use fieldconst::cli::Host;
use fieldconst::cli::commands::run_on_host;
use fieldconst::config::TransformConfig;
use fieldconst::fixture::UnitFixture;
use fieldconst::host::ecj::{self, EcjTree};
use fieldconst::host::javac::{self, JavacTree};
use fieldconst::host::{HostTree, NodeKind, STRING_TYPE};
use fieldconst::{AccessLevel, Diagnostic, Modifiers};

fn fixture_names() -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir("tests/fixtures")
        .expect("fixtures directory")
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().to_string()))
        .collect();
    names.sort();
    names
}

fn load(name: &str) -> UnitFixture {
    UnitFixture::load(Path::new(&format!("tests/fixtures/{name}.json"))).expect("fixture loads")
}

#[test]
fn every_fixture_transforms_identically() {
    let names = fixture_names();
    assert!(!names.is_empty());
    for config in [
        TransformConfig::default(),
        TransformConfig::default().with_accessor_prefixes(["m", "_"]),
        TransformConfig::default().with_reserved_prefix(""),
    ] {
        for name in &names {
            let unit = load(name);
            let javac = run_on_host(&unit, Host::Javac, &config).expect("javac lowering");
            let ecj = run_on_host(&unit, Host::Ecj, &config).expect("ecj lowering");

            assert_eq!(javac.rendered, ecj.rendered, "{name}: rendering");
            assert_eq!(javac.comparable(), ecj.comparable(), "{name}: diagnostics");
            assert_eq!(javac.injected, ecj.injected, "{name}: injected");
            let javac_spans: Vec<_> = javac.diagnostics.iter().map(|d| d.span).collect();
            let ecj_spans: Vec<_> = ecj.diagnostics.iter().map(|d| d.span).collect();
            assert_eq!(javac_spans, ecj_spans, "{name}: spans");
        }
    }
}

#[test]
fn generated_constants_have_host_native_encoding() {
    let unit = load("person");
    let config = TransformConfig::default();

    let mut jc = JavacTree::from_fixture(&unit).expect("javac lowering");
    fieldconst::run(&mut jc, &config, &mut Vec::<Diagnostic>::new());
    let mut ec = EcjTree::from_fixture(&unit).expect("ecj lowering");
    fieldconst::run(&mut ec, &config, &mut Vec::<Diagnostic>::new());

    let jc_last = *jc.members_of(jc.roots()[0]).last().expect("members");
    let ec_last = *ec.members_of(ec.roots()[0]).last().expect("members");

    assert_eq!(
        jc.flags(jc_last),
        javac::flags::PUBLIC | javac::flags::STATIC | javac::flags::FINAL | javac::flags::GENERATED_MEMBER
    );
    assert_ne!(ec.bits(ec_last) & ecj::bits::DO_NOT_TOUCH, 0);

    for (kind, mods, ty) in [
        (jc.kind_of(jc_last), jc.modifiers_of(jc_last), jc.declared_type_of(jc_last)),
        (ec.kind_of(ec_last), ec.modifiers_of(ec_last), ec.declared_type_of(ec_last)),
    ] {
        assert_eq!(kind, NodeKind::Field);
        assert_eq!(mods, AccessLevel::Public.modifiers() | Modifiers::STATIC | Modifiers::FINAL);
        assert_eq!(ty.as_deref(), Some(STRING_TYPE));
    }
}

#[test]
fn access_levels_map_to_the_same_modifiers() {
    let jc = JavacTree::new();
    let ec = EcjTree::new();
    for level in AccessLevel::ALL {
        let jc_bits = jc.to_host_modifier_bits(level);
        let ec_bits = ec.to_host_modifier_bits(level);
        assert_eq!(jc_bits as u32, ec_bits as u32, "{level}");
    }
}
