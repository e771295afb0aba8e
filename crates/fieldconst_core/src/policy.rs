//! Naming policy: which field names may produce a constant.
//!
//! ## Notes
//! - The accessor prefix list mirrors the usual `@Accessors(prefix = ...)` rules: with a non-empty list, a field only
//!   fits when it starts with one of the prefixes and the character after a letter-ending prefix is not lowercase.
//! - The reserved prefix marks compiler-synthesized fields; such fields are never eligible.

use crate::naming::to_constant_name;

/// Default prefix of compiler-internal fields.
pub const DEFAULT_RESERVED_PREFIX: &str = "$";

/// Outcome of checking a field name against the policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PolicyVerdict {
    /// The name fits; carries the constant name to generate.
    Fits { constant_name: String },
    /// The name does not fit the configured prefix list (or yields no usable constant name).
    DoesNotFit,
}

/// Naming policy collaborator consulted once per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamingPolicy {
    accessor_prefixes: Vec<String>,
    reserved_prefix: String,
}

impl Default for NamingPolicy {
    fn default() -> Self {
        Self {
            accessor_prefixes: Vec::new(),
            reserved_prefix: DEFAULT_RESERVED_PREFIX.to_string(),
        }
    }
}

impl NamingPolicy {
    pub fn new(accessor_prefixes: Vec<String>, reserved_prefix: impl Into<String>) -> Self {
        Self {
            accessor_prefixes,
            reserved_prefix: reserved_prefix.into(),
        }
    }

    pub fn accessor_prefixes(&self) -> &[String] {
        &self.accessor_prefixes
    }

    pub fn reserved_prefix(&self) -> &str {
        &self.reserved_prefix
    }

    /// Check whether a field name starts with the reserved internal-field prefix.
    ///
    /// An empty reserved prefix reserves nothing.
    pub fn is_reserved(&self, field_name: &str) -> bool {
        !self.reserved_prefix.is_empty() && field_name.starts_with(&self.reserved_prefix)
    }

    /// Check whether `field_name` fits the accessor prefix list.
    ///
    /// An empty list, or an empty prefix in it, accepts every name. Otherwise the name must be longer than some
    /// prefix, start with it, and not continue in lowercase right after a prefix ending in a letter.
    pub fn fits_prefix(&self, field_name: &str) -> bool {
        if self.accessor_prefixes.is_empty() {
            return true;
        }
        self.accessor_prefixes.iter().any(|prefix| {
            if prefix.is_empty() {
                return true;
            }
            let Some(follow) = field_name.strip_prefix(prefix.as_str()).and_then(|rest| rest.chars().next()) else {
                return false;
            };
            let prefix_ends_in_letter = prefix.chars().last().is_some_and(char::is_alphabetic);
            !(prefix_ends_in_letter && follow.is_lowercase())
        })
    }

    /// Decide whether a field name may produce a constant, and under which name.
    ///
    /// The constant name is always derived from the full field name, prefix included.
    pub fn verdict(&self, field_name: &str) -> PolicyVerdict {
        if !self.fits_prefix(field_name) {
            return PolicyVerdict::DoesNotFit;
        }
        let constant_name = to_constant_name(field_name);
        if constant_name.is_empty() {
            return PolicyVerdict::DoesNotFit;
        }
        PolicyVerdict::Fits { constant_name }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_prefixes(prefixes: &[&str]) -> NamingPolicy {
        NamingPolicy::new(prefixes.iter().map(|p| p.to_string()).collect(), "$")
    }

    #[test]
    fn test_no_prefixes_everything_fits() {
        let policy = NamingPolicy::default();
        assert_eq!(
            policy.verdict("fooBar"),
            PolicyVerdict::Fits {
                constant_name: "FOO_BAR".to_string()
            }
        );
    }

    #[test]
    fn test_empty_name_does_not_fit() {
        assert_eq!(NamingPolicy::default().verdict(""), PolicyVerdict::DoesNotFit);
    }

    #[test]
    fn test_prefix_match_keeps_full_constant_name() {
        let policy = with_prefixes(&["m"]);
        assert_eq!(
            policy.verdict("mName"),
            PolicyVerdict::Fits {
                constant_name: "M_NAME".to_string()
            }
        );
        assert!(policy.fits_prefix("mName"));
    }

    #[test]
    fn test_letter_prefix_followed_by_lowercase_does_not_fit() {
        let policy = with_prefixes(&["f"]);
        assert_eq!(policy.verdict("foo"), PolicyVerdict::DoesNotFit);
        assert!(matches!(policy.verdict("fOo"), PolicyVerdict::Fits { .. }));
    }

    #[test]
    fn test_non_letter_prefix_accepts_lowercase() {
        let policy = with_prefixes(&["_"]);
        assert!(policy.fits_prefix("_count"));
        assert!(!policy.fits_prefix("count"));
    }

    #[test]
    fn test_name_equal_to_prefix_does_not_fit() {
        let policy = with_prefixes(&["m"]);
        assert_eq!(policy.verdict("m"), PolicyVerdict::DoesNotFit);
    }

    #[test]
    fn test_empty_prefix_in_list_accepts_all() {
        let policy = with_prefixes(&["m", ""]);
        assert!(matches!(policy.verdict("plain"), PolicyVerdict::Fits { .. }));
    }

    #[test]
    fn test_reserved_prefix() {
        let policy = NamingPolicy::default();
        assert!(policy.is_reserved("$lock"));
        assert!(!policy.is_reserved("lock"));
        assert!(!NamingPolicy::new(Vec::new(), "").is_reserved("$lock"));
    }
}
