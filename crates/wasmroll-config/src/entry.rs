//! Entry point declarations.
//!
//! Entries map a logical output name (the chunk name the bundler emits) to
//! the manifest the build starts from, usually a `Cargo.toml`.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::de::{self, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ConfigError, Result};

/// Entry points as written in a descriptor.
///
/// The table form is what hand-written files use. The list form keeps
/// declaration order explicit. A repeated name is rejected in either form:
/// by resolution for lists, by [`load_from`](crate::load_from) for JSON
/// tables (TOML refuses duplicate keys while parsing). Values built with
/// `serde_json::json!` have already collapsed repeated keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum RawEntries {
    Table(IndexMap<String, String>),
    List(Vec<EntryDecl>),
}

impl Default for RawEntries {
    fn default() -> Self {
        RawEntries::List(Vec::new())
    }
}

/// One `{ name, path }` record of the list form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct EntryDecl {
    pub name: String,
    pub path: String,
}

impl EntryDecl {
    pub fn new(name: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
        }
    }
}

impl RawEntries {
    fn pairs(&self) -> Vec<(&str, &str)> {
        match self {
            RawEntries::Table(map) => map.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect(),
            RawEntries::List(list) => list
                .iter()
                .map(|e| (e.name.as_str(), e.path.as_str()))
                .collect(),
        }
    }
}

/// Validate entry declarations and produce the ordered name -> path map.
///
/// # Errors
///
/// `ConfigError::InvalidEntry` when there are no entries, a name or path is
/// blank, or a name appears twice.
///
/// # Example
///
/// ```
/// use wasmroll_config::{resolve_entry_points, EntryDecl, RawEntries};
///
/// let raw = RawEntries::List(vec![EntryDecl::new("popup", "./Cargo.toml")]);
/// let entries = resolve_entry_points(&raw).unwrap();
/// assert_eq!(entries["popup"].to_str(), Some("./Cargo.toml"));
/// ```
pub fn resolve_entry_points(raw: &RawEntries) -> Result<IndexMap<String, PathBuf>> {
    let pairs = raw.pairs();
    if pairs.is_empty() {
        return Err(ConfigError::invalid_entry(
            "<none>",
            "at least one entry point is required",
        ));
    }

    let mut resolved = IndexMap::with_capacity(pairs.len());
    for (name, path) in pairs {
        if name.trim().is_empty() {
            return Err(ConfigError::invalid_entry(name, "entry name cannot be empty"));
        }
        if path.trim().is_empty() {
            return Err(ConfigError::invalid_entry(name, "entry path cannot be empty"));
        }
        if resolved.contains_key(name) {
            return Err(ConfigError::invalid_entry(name, "entry name is declared twice"));
        }
        tracing::trace!(entry = name, path, "resolved entry point");
        resolved.insert(name.to_string(), PathBuf::from(path));
    }

    Ok(resolved)
}

/// First entry name repeated in the `input` table of a JSON document.
///
/// Map-backed parsers keep only the last value for a repeated key, so this
/// reads the raw text. Documents that fail to parse report nothing; the
/// regular loader produces the error.
pub(crate) fn duplicate_json_entry(content: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct Document {
        #[serde(default)]
        input: Option<EntryKeys>,
    }

    let document: Document = serde_json::from_str(content).ok()?;
    let keys = document.input?.0;
    keys.iter()
        .enumerate()
        .find(|(i, key)| keys[..*i].contains(key))
        .map(|(_, key)| key.clone())
}

/// Keys of the table form, in document order and with repeats.
struct EntryKeys(Vec<String>);

impl<'de> Deserialize<'de> for EntryKeys {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeysVisitor;

        impl<'de> Visitor<'de> for KeysVisitor {
            type Value = EntryKeys;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an entry table or list")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<EntryKeys, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut keys = Vec::new();
                while let Some(key) = map.next_key::<String>()? {
                    map.next_value::<IgnoredAny>()?;
                    keys.push(key);
                }
                Ok(EntryKeys(keys))
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<EntryKeys, A::Error>
            where
                A: SeqAccess<'de>,
            {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(EntryKeys(Vec::new()))
            }

            fn visit_unit<E: de::Error>(self) -> std::result::Result<EntryKeys, E> {
                Ok(EntryKeys(Vec::new()))
            }
        }

        deserializer.deserialize_any(KeysVisitor)
    }
}
