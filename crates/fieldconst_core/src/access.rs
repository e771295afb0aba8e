//! Access levels and the host-agnostic modifier bit set.
//!
//! Bit values follow the JVM access flags so every host can convert its own encoding with a mask.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::str::FromStr;

/// Visibility requested for generated constants.
///
/// `None` is a request-level sentinel meaning "do not generate"; it is never the visibility of a generated member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AccessLevel {
    #[default]
    Public,
    Protected,
    Package,
    Private,
    None,
}

impl AccessLevel {
    pub const ALL: [AccessLevel; 5] = [
        AccessLevel::Public,
        AccessLevel::Protected,
        AccessLevel::Package,
        AccessLevel::Private,
        AccessLevel::None,
    ];

    /// Return the visibility bits for this level.
    ///
    /// `Package` and `None` carry no visibility bit.
    pub fn modifiers(self) -> Modifiers {
        match self {
            AccessLevel::Public => Modifiers::PUBLIC,
            AccessLevel::Protected => Modifiers::PROTECTED,
            AccessLevel::Private => Modifiers::PRIVATE,
            AccessLevel::Package | AccessLevel::None => Modifiers::EMPTY,
        }
    }

    /// Return the canonical source spelling (`PUBLIC`, `PRIVATE`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            AccessLevel::Public => "PUBLIC",
            AccessLevel::Protected => "PROTECTED",
            AccessLevel::Package => "PACKAGE",
            AccessLevel::Private => "PRIVATE",
            AccessLevel::None => "NONE",
        }
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccessLevel.{}", self.as_str())
    }
}

/// Error returned when an access level spelling is not recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownAccessLevel(pub String);

impl fmt::Display for UnknownAccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown access level '{}'", self.0)
    }
}

impl std::error::Error for UnknownAccessLevel {}

impl FromStr for AccessLevel {
    type Err = UnknownAccessLevel;

    /// Accepts `PRIVATE`, `AccessLevel.PRIVATE` and `lombok.AccessLevel.PRIVATE`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.rsplit('.').next().unwrap_or(trimmed);
        AccessLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(bare))
            .ok_or_else(|| UnknownAccessLevel(s.to_string()))
    }
}

/// Host-agnostic modifier bit set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(u32);

impl Modifiers {
    pub const EMPTY: Modifiers = Modifiers(0);
    pub const PUBLIC: Modifiers = Modifiers(0x0001);
    pub const PRIVATE: Modifiers = Modifiers(0x0002);
    pub const PROTECTED: Modifiers = Modifiers(0x0004);
    pub const STATIC: Modifiers = Modifiers(0x0008);
    pub const FINAL: Modifiers = Modifiers(0x0010);
    pub const INTERFACE: Modifiers = Modifiers(0x0200);
    pub const ABSTRACT: Modifiers = Modifiers(0x0400);
    pub const ANNOTATION: Modifiers = Modifiers(0x2000);
    pub const ENUM: Modifiers = Modifiers(0x4000);

    /// Keyword spelling of every modifier that has one, in source order.
    const KEYWORDS: [(Modifiers, &'static str); 6] = [
        (Modifiers::PUBLIC, "public"),
        (Modifiers::PROTECTED, "protected"),
        (Modifiers::PRIVATE, "private"),
        (Modifiers::ABSTRACT, "abstract"),
        (Modifiers::STATIC, "static"),
        (Modifiers::FINAL, "final"),
    ];

    pub const fn from_bits(bits: u32) -> Self {
        Modifiers(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Modifiers) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn intersects(self, other: Modifiers) -> bool {
        self.0 & other.0 != 0
    }

    pub fn is_static(self) -> bool {
        self.contains(Modifiers::STATIC)
    }

    /// Interfaces and annotation types cannot host generated constants.
    pub fn is_interface_like(self) -> bool {
        self.intersects(Modifiers::INTERFACE | Modifiers::ANNOTATION)
    }

    /// Parse a source keyword (`public`, `static`, ...).
    pub fn from_keyword(keyword: &str) -> Option<Modifiers> {
        Self::KEYWORDS
            .iter()
            .find(|(_, kw)| *kw == keyword)
            .map(|(m, _)| *m)
    }

    /// Return the source keywords set in this bit set, in canonical order.
    pub fn keywords(self) -> Vec<&'static str> {
        Self::KEYWORDS
            .iter()
            .filter(|(m, _)| self.contains(*m))
            .map(|(_, kw)| *kw)
            .collect()
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Modifiers) -> Modifiers {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Modifiers) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Modifiers({:#06x} {:?})", self.0, self.keywords())
    }
}
