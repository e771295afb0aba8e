//! Provide shared, pure helpers for the `@FieldConstants` transform.
//!
//! This crate is intentionally small and dependency-light. It holds the pieces of the transform that must behave
//! identically no matter which compiler tree the transform runs against:
//! - the field-name to constant-name conversion,
//! - access levels and the host-agnostic modifier bit set,
//! - the naming policy collaborator (accessor prefixes, reserved internal-field prefix),
//! - the canonical diagnostic texts.
//!
//! ## Notes
//!
//! - This is a “semantic core” crate: **no IO**, no global state, and no compiler-specific types.

pub mod access;
pub mod messages;
pub mod naming;
pub mod policy;

pub use access::{AccessLevel, Modifiers};
pub use naming::to_constant_name;
pub use policy::{NamingPolicy, PolicyVerdict};
