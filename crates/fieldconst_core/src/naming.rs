//! Convert field identifiers into constant identifiers.
//!
//! ## Notes
//! - Only ASCII case mapping is applied; non-ASCII characters pass through unchanged.
//! - Every uppercase character after the first gets its own preceding underscore, so runs of capitals are split
//!   letter by letter (`URLValue` becomes `U_R_L_VALUE`).

/// Convert a camel-case field name into the name of its generated constant.
///
/// ## Parameters
/// - `field_name`: the source field identifier, verbatim.
///
/// ## Returns
/// - (`String`): the constant name; empty when `field_name` is empty.
///
/// ## Examples
/// ```rust
/// use fieldconst_core::to_constant_name;
/// assert_eq!(to_constant_name("backgroundColor"), "BACKGROUND_COLOR");
/// assert_eq!(to_constant_name("URLValue"), "U_R_L_VALUE");
/// assert_eq!(to_constant_name(""), "");
/// ```
pub fn to_constant_name(field_name: &str) -> String {
    let mut chars = field_name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut out = String::with_capacity(field_name.len() + field_name.len() / 2);
    out.push(first.to_ascii_uppercase());
    for c in chars {
        if c.is_ascii_uppercase() {
            out.push('_');
        }
        out.push(c.to_ascii_uppercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_word() {
        assert_eq!(to_constant_name("color"), "COLOR");
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(to_constant_name("backgroundColor"), "BACKGROUND_COLOR");
        assert_eq!(to_constant_name("aLongFieldName"), "A_LONG_FIELD_NAME");
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_constant_name(""), "");
    }

    #[test]
    fn test_consecutive_capitals_each_get_underscore() {
        assert_eq!(to_constant_name("URLValue"), "U_R_L_VALUE");
        assert_eq!(to_constant_name("xYZ"), "X_Y_Z");
    }

    #[test]
    fn test_leading_capital_has_no_underscore() {
        assert_eq!(to_constant_name("Name"), "NAME");
    }

    #[test]
    fn test_digits_and_underscores_pass_through() {
        assert_eq!(to_constant_name("value2"), "VALUE2");
        assert_eq!(to_constant_name("snake_case"), "SNAKE_CASE");
        // An existing underscore before a capital is not collapsed.
        assert_eq!(to_constant_name("a_B"), "A__B");
    }

    #[test]
    fn test_non_ascii_untouched() {
        assert_eq!(to_constant_name("größe"), "GRößE");
    }
}
