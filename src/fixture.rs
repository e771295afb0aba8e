//! Compilation unit descriptions used to build host trees.
//!
//! A fixture stands in for the host front-end: it describes the declarations of a unit (types, fields, methods,
//! annotation usages) in JSON, and each adapter lowers it into its own tree shape.
//!
//! ```json
//! {
//!   "types": [{
//!     "name": "Point",
//!     "annotations": [{ "name": "FieldConstants", "args": { "level": "AccessLevel.PRIVATE" } }],
//!     "members": [
//!       { "member": "field", "names": ["x", "y"], "type": "int", "modifiers": ["private"] }
//!     ]
//!   }]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use fieldconst_core::Modifiers;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::host::Span;

/// Errors raised while loading or lowering a fixture.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("cannot read fixture '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid fixture '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown modifier '{0}'")]
    UnknownModifier(String),

    #[error("field declaration in '{0}' declares no variables")]
    EmptyDeclaration(String),
}

/// A compilation unit: a list of top-level types.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UnitFixture {
    #[serde(default)]
    pub types: Vec<TypeFixture>,
}

impl UnitFixture {
    /// Parse a unit from JSON text.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Load a unit from a JSON file.
    pub fn load(path: &Path) -> Result<Self, FixtureError> {
        let text = std::fs::read_to_string(path).map_err(|source| FixtureError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text).map_err(|source| FixtureError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Flavor of a type declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TypeFlavor {
    #[default]
    Class,
    Enum,
    Interface,
    Annotation,
}

impl TypeFlavor {
    /// Modifier bits implied by the flavor.
    pub fn modifiers(self) -> Modifiers {
        match self {
            TypeFlavor::Class => Modifiers::EMPTY,
            TypeFlavor::Enum => Modifiers::ENUM,
            TypeFlavor::Interface => Modifiers::INTERFACE | Modifiers::ABSTRACT,
            TypeFlavor::Annotation => Modifiers::INTERFACE | Modifiers::ANNOTATION | Modifiers::ABSTRACT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeFixture {
    pub name: String,
    #[serde(default)]
    pub kind: TypeFlavor,
    #[serde(default)]
    pub modifiers: Vec<String>,
    #[serde(default)]
    pub annotations: Vec<AnnotationFixture>,
    #[serde(default)]
    pub members: Vec<MemberFixture>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationFixture {
    pub name: String,
    #[serde(default)]
    pub args: BTreeMap<String, String>,
}

impl AnnotationFixture {
    pub fn args_vec(&self) -> Vec<(String, String)> {
        self.args.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "member", rename_all = "snake_case")]
pub enum MemberFixture {
    /// One declaration statement; several names make a multi-variable declaration (`int x, y;`).
    Field {
        names: Vec<String>,
        #[serde(rename = "type")]
        ty: String,
        #[serde(default)]
        modifiers: Vec<String>,
        #[serde(default)]
        annotations: Vec<AnnotationFixture>,
        #[serde(default)]
        init: Option<String>,
    },
    Method {
        name: String,
        #[serde(default = "void_type")]
        returns: String,
        #[serde(default)]
        modifiers: Vec<String>,
        #[serde(default)]
        annotations: Vec<AnnotationFixture>,
    },
    EnumConstant {
        name: String,
    },
    Type(TypeFixture),
}

fn void_type() -> String {
    "void".to_string()
}

/// Parse modifier keywords into the host-agnostic bit set.
pub fn parse_modifiers(keywords: &[String]) -> Result<Modifiers, FixtureError> {
    keywords.iter().try_fold(Modifiers::EMPTY, |acc, kw| {
        Modifiers::from_keyword(kw)
            .map(|m| acc | m)
            .ok_or_else(|| FixtureError::UnknownModifier(kw.clone()))
    })
}

/// Hands out synthetic source positions while a fixture is lowered.
///
/// Both adapters lower a fixture in the same order (type name, type annotations, then members; within a field
/// declaration its annotations before its names), so equal fixtures get equal spans in every host.
#[derive(Debug, Default)]
pub struct SpanCursor {
    next: usize,
}

impl SpanCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a span wide enough for `text` (at least one byte).
    pub fn take(&mut self, text: &str) -> Span {
        let start = self.next;
        let end = start + text.len().max(1);
        self.next = end + 1;
        Span::new(start, end)
    }
}
