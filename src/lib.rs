#![forbid(unsafe_code)]
//! `@FieldConstants` for Java-like compiler trees.
//!
//! For every eligible instance field of a marked class or enum (or for a marked field directly), the transform
//! injects a `static final String` constant whose name is the field name in upper snake case and whose value is the
//! field name itself. It runs against any compiler tree that implements [`host::HostTree`]; two adapters with
//! different tree shapes ship with the crate.
//!
//! ## Panic Policy
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a bug (logic error), use `.expect("INVARIANT: reason")` with a clear
//!   explanation.

pub mod cli;
pub mod config;
pub mod diagnostics;
pub mod fixture;
pub mod host;
pub mod printer;
pub mod transform;

pub use config::TransformConfig;
pub use diagnostics::{Diagnostic, DiagnosticSink, FieldConstantsError, Severity};
pub use fieldconst_core::{AccessLevel, Modifiers, NamingPolicy, to_constant_name};
pub use host::{HostTree, NodeId};
pub use printer::{PrintConfig, render};
pub use transform::{SynthesisRequest, TargetKind, dispatch, run};
