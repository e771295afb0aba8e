//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::path::Path;

use fieldconst_core::to_constant_name;

use super::{CliError, CliResult, ExitCode, Host};
use crate::config::TransformConfig;
use crate::diagnostics::{Diagnostic, TracingSink};
use crate::fixture::UnitFixture;
use crate::host::ecj::EcjTree;
use crate::host::javac::JavacTree;
use crate::host::{HostTree, NodeId};
use crate::{printer, transform};

/// What one host produced for one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostOutcome {
    pub rendered: String,
    pub diagnostics: Vec<Diagnostic>,
    /// Dotted location of each diagnostic, parallel to `diagnostics`.
    pub locations: Vec<String>,
    pub injected: usize,
}

impl HostOutcome {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Diagnostics with every host-specific detail stripped.
    pub fn comparable(&self) -> Vec<(String, String, String)> {
        self.diagnostics
            .iter()
            .zip(&self.locations)
            .map(|(d, location)| (d.severity().to_string(), d.message(), location.clone()))
            .collect()
    }
}

/// Run the transform over `tree` and render the result.
pub fn run_unit<H: HostTree>(mut tree: H, config: &TransformConfig) -> HostOutcome {
    let mut sink = TracingSink::default();
    let injected = transform::run(&mut tree, config, &mut sink);
    let locations = sink.diagnostics.iter().map(|d| location_of(&tree, d.node)).collect();
    HostOutcome {
        rendered: printer::render(&tree, config.print()),
        diagnostics: sink.diagnostics,
        locations,
        injected,
    }
}

/// Lower `unit` into the chosen host and run it.
pub fn run_on_host(unit: &UnitFixture, host: Host, config: &TransformConfig) -> CliResult<HostOutcome> {
    let outcome = match host {
        Host::Javac => run_unit(JavacTree::from_fixture(unit).map_err(lowering_error)?, config),
        Host::Ecj => run_unit(EcjTree::from_fixture(unit).map_err(lowering_error)?, config),
    };
    Ok(outcome)
}

/// Dotted path of declaration names leading to `node` (`Outer.Inner.field`); annotation usages end in `@Name`.
pub fn location_of<H: HostTree + ?Sized>(tree: &H, node: NodeId) -> String {
    let (mut current, suffix) = match tree.annotation_name(node) {
        Some(name) => (tree.parent_of(node), format!("@{name}")),
        None => (Some(node), String::new()),
    };
    let mut parts = Vec::new();
    while let Some(n) = current {
        parts.push(tree.name_of(n).unwrap_or_default());
        current = tree.parent_of(n);
    }
    parts.reverse();
    format!("{}{suffix}", parts.join("."))
}

fn lowering_error(err: crate::fixture::FixtureError) -> CliError {
    CliError::failure(format!("Error: {err}"))
}

fn load_inputs(file: &Path, config: Option<&Path>) -> CliResult<(UnitFixture, TransformConfig)> {
    let unit = UnitFixture::load(file).map_err(|e| CliError::failure(format!("Error: {e}")))?;
    let config = TransformConfig::load_or_default(config).map_err(|e| CliError::failure(format!("Error: {e}")))?;
    Ok((unit, config))
}

/// Transform a unit on one host, print the rendered unit and report diagnostics.
pub fn expand_file(file: &Path, host: Host, config: Option<&Path>) -> CliResult<ExitCode> {
    let (unit, config) = load_inputs(file, config)?;
    let outcome = run_on_host(&unit, host, &config)?;

    print!("{}", outcome.rendered);
    for (diagnostic, location) in outcome.diagnostics.iter().zip(&outcome.locations) {
        eprint!("{}", diagnostic.render(&format!("{}:{location}", file.display())));
    }
    tracing::info!(injected = outcome.injected, "generated constants");

    if outcome.has_errors() {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Print the constant name of each field name, one per line.
pub fn print_names(fields: &[String]) -> CliResult<ExitCode> {
    for field in fields {
        println!("{}", to_constant_name(field));
    }
    Ok(ExitCode::SUCCESS)
}

/// Run both adapters on a unit and report any divergence.
pub fn check_parity(file: &Path, config: Option<&Path>) -> CliResult<ExitCode> {
    let (unit, config) = load_inputs(file, config)?;
    let javac = run_on_host(&unit, Host::Javac, &config)?;
    let ecj = run_on_host(&unit, Host::Ecj, &config)?;

    let mut diverged = false;
    if javac.rendered != ecj.rendered {
        diverged = true;
        println!("rendering differs");
        println!("--- javac\n{}", javac.rendered);
        println!("--- ecj\n{}", ecj.rendered);
    }
    if javac.comparable() != ecj.comparable() {
        diverged = true;
        println!("diagnostics differ");
        for (severity, message, location) in javac.comparable() {
            println!("  javac: {severity}: {message} ({location})");
        }
        for (severity, message, location) in ecj.comparable() {
            println!("  ecj:   {severity}: {message} ({location})");
        }
    }

    if diverged {
        return Err(CliError::failure(format!("Hosts disagree on {}", file.display())));
    }
    println!(
        "{}: hosts agree ({} constants, {} diagnostics)",
        file.display(),
        javac.injected,
        javac.diagnostics.len()
    );
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    const UNIT: &str = r#"{ "types": [{ "name": "Outer", "members": [
        { "member": "type", "name": "Inner", "members": [
            { "member": "field", "names": ["mValue"], "type": "int",
              "annotations": [{ "name": "FieldConstants" }] }
        ] }
    ] }] }"#;

    #[test]
    fn test_location_of_nested_marker() {
        let unit = UnitFixture::from_json(UNIT).unwrap();
        let tree = JavacTree::from_fixture(&unit).unwrap();
        let outer = tree.roots()[0];
        let inner = tree.members_of(outer)[0];
        let field = tree.members_of(inner)[0];
        let marker = tree.annotations_of(field)[0];

        assert_eq!(location_of(&tree, field), "Outer.Inner.mValue");
        assert_eq!(location_of(&tree, marker), "Outer.Inner.mValue@FieldConstants");
    }

    #[test]
    fn test_naming_policy_warning_does_not_fail() {
        let unit = UnitFixture::from_json(UNIT).unwrap();
        let config = TransformConfig::default().with_accessor_prefixes(["f"]);
        for host in [Host::Javac, Host::Ecj] {
            let outcome = run_on_host(&unit, host, &config).unwrap();
            assert_eq!(outcome.injected, 0);
            assert_eq!(outcome.locations, vec!["Outer.Inner.mValue"]);
            assert!(!outcome.has_errors());
        }
    }

    #[test]
    fn test_hosts_agree_on_nested_unit() {
        let unit = UnitFixture::from_json(UNIT).unwrap();
        let config = TransformConfig::default();
        let javac = run_on_host(&unit, Host::Javac, &config).unwrap();
        let ecj = run_on_host(&unit, Host::Ecj, &config).unwrap();
        assert_eq!(javac.rendered, ecj.rendered);
        assert_eq!(javac.comparable(), ecj.comparable());
        assert_eq!(javac.injected, 1);
    }

    #[test]
    fn test_print_names() {
        assert_eq!(print_names(&["a".to_string()]).unwrap(), ExitCode::SUCCESS);
    }
}
