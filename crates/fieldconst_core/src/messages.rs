//! Shared user-facing diagnostic texts.
//!
//! Every host adapter reports exactly these strings so diagnostics stay aligned across compiler trees.

/// Name of the marker annotation as written in source.
pub const MARKER: &str = "@FieldConstants";

/// Type-level usage on something that is not a class or an enum.
pub const TARGET_KIND_MSG: &str = "@FieldConstants is only supported on a class or an enum or a field.";

/// A resolved field target turned out not to be a field.
pub const FIELD_ONLY_MSG: &str = "@FieldConstants is only supported on a class or a field";

/// The field name does not fit the configured accessor prefix list.
pub const NAMING_POLICY_MSG: &str =
    "Not generating constant for this field: It does not fit in your @Accessors prefix list";

/// The usage requested `AccessLevel.NONE`.
pub const ACCESS_LEVEL_NONE_MSG: &str = "@FieldConstants does not work with AccessLevel.NONE.";

/// `onMethod` was supplied on a type-level usage.
pub const ON_METHOD_ON_TYPE_MSG: &str = "'onMethod' is not supported for @FieldConstants on a type.";

/// Render the warning for a constant whose name is already taken by a member of the owning type.
pub fn already_exists_msg(constant_name: &str) -> String {
    format!("Not generating {constant_name}: A field with that name already exists")
}
