//! Raw plugin list entries and the gates that make them conditional.

use std::borrow::Cow;

use schemars::{JsonSchema, Schema, SchemaGenerator, json_schema};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Condition attached to a plugin entry, evaluated against the watch flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Included only in watch mode
    Watch,
    /// Included only outside watch mode
    NotWatch,
    /// Fixed inclusion, regardless of mode
    Literal(bool),
}

impl Gate {
    pub fn evaluate(self, watch: bool) -> bool {
        match self {
            Gate::Watch => watch,
            Gate::NotWatch => !watch,
            Gate::Literal(value) => value,
        }
    }
}

impl From<Gate> for Value {
    fn from(gate: Gate) -> Self {
        match gate {
            Gate::Watch => Value::from("watch"),
            Gate::NotWatch => Value::from("not-watch"),
            Gate::Literal(value) => Value::Bool(value),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(untagged)]
enum GateRepr {
    Literal(bool),
    Named(NamedGate),
}

#[derive(Debug, Clone, Copy, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
enum NamedGate {
    Watch,
    NotWatch,
}

impl From<GateRepr> for Gate {
    fn from(repr: GateRepr) -> Self {
        match repr {
            GateRepr::Literal(value) => Gate::Literal(value),
            GateRepr::Named(NamedGate::Watch) => Gate::Watch,
            GateRepr::Named(NamedGate::NotWatch) => Gate::NotWatch,
        }
    }
}

/// A plugin reference before resolution: a name plus its untyped options.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPlugin {
    pub name: String,
    pub options: Value,
}

impl RawPlugin {
    pub fn new(name: impl Into<String>, options: Value) -> Self {
        Self {
            name: name.into(),
            options,
        }
    }

    /// Plugin without options (`terser()`)
    pub fn named(name: impl Into<String>) -> Self {
        Self::new(name, Value::Null)
    }
}

/// One entry of the descriptor's plugin list.
///
/// Any value deserializes; entries that are neither a literal nor a
/// well-formed plugin record are kept as [`PluginDecl::Malformed`] so that
/// resolution can report them with their position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum PluginDecl {
    Unconditional(RawPlugin),
    Conditional(Gate, RawPlugin),
    /// A bare `true`/`false`/`null` in the list. `false` and `null` are
    /// no-ops; `true` is not a plugin and fails resolution.
    Literal(bool),
    /// Anything else, as written
    Malformed(Value),
}

impl PluginDecl {
    pub fn always(plugin: RawPlugin) -> Self {
        PluginDecl::Unconditional(plugin)
    }

    pub fn when_watch(plugin: RawPlugin) -> Self {
        PluginDecl::Conditional(Gate::Watch, plugin)
    }

    pub fn unless_watch(plugin: RawPlugin) -> Self {
        PluginDecl::Conditional(Gate::NotWatch, plugin)
    }
}

/// Why an entry could not be read as a plugin declaration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct MalformedEntry {
    /// Gate of the entry, when the `when` key itself was readable
    pub gate: Option<Gate>,
    pub name: String,
    pub reason: String,
}

const UNNAMED: &str = "<unnamed>";

#[derive(Debug, Clone, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
struct PluginRecord {
    name: String,

    #[serde(default)]
    when: Option<GateRepr>,

    #[serde(default)]
    options: Value,
}

/// Classify one raw list entry.
pub(crate) fn parse_entry(value: &Value) -> Result<PluginDecl, MalformedEntry> {
    let map = match value {
        Value::Null => return Ok(PluginDecl::Literal(false)),
        Value::Bool(flag) => return Ok(PluginDecl::Literal(*flag)),
        Value::Object(map) => map,
        other => {
            return Err(MalformedEntry {
                gate: None,
                name: UNNAMED.to_string(),
                reason: format!("expected a plugin table or a boolean, got {other}"),
            });
        }
    };

    let name = map
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or(UNNAMED)
        .to_string();

    let gate = match map.get("when") {
        None | Some(Value::Null) => None,
        Some(when) => match serde_json::from_value::<GateRepr>(when.clone()) {
            Ok(repr) => Some(Gate::from(repr)),
            Err(_) => {
                return Err(MalformedEntry {
                    gate: None,
                    name,
                    reason: format!(
                        "unknown gate {when}; expected \"watch\", \"not-watch\" or a boolean"
                    ),
                });
            }
        },
    };

    let record: PluginRecord =
        serde_json::from_value(value.clone()).map_err(|e| MalformedEntry {
            gate,
            name,
            reason: e.to_string(),
        })?;

    let plugin = RawPlugin::new(record.name, record.options);
    Ok(match gate {
        Some(gate) => PluginDecl::Conditional(gate, plugin),
        None => PluginDecl::Unconditional(plugin),
    })
}

impl From<Value> for PluginDecl {
    fn from(value: Value) -> Self {
        match parse_entry(&value) {
            Ok(decl) => decl,
            Err(_) => PluginDecl::Malformed(value),
        }
    }
}

impl From<PluginDecl> for Value {
    fn from(decl: PluginDecl) -> Self {
        let record = |plugin: RawPlugin, gate: Option<Gate>| {
            let mut map = Map::new();
            map.insert("name".to_string(), Value::String(plugin.name));
            if let Some(gate) = gate {
                map.insert("when".to_string(), gate.into());
            }
            if !plugin.options.is_null() {
                map.insert("options".to_string(), plugin.options);
            }
            Value::Object(map)
        };
        match decl {
            PluginDecl::Literal(value) => Value::Bool(value),
            PluginDecl::Malformed(value) => value,
            PluginDecl::Unconditional(plugin) => record(plugin, None),
            PluginDecl::Conditional(gate, plugin) => record(plugin, Some(gate)),
        }
    }
}

impl JsonSchema for PluginDecl {
    fn schema_name() -> Cow<'static, str> {
        "PluginDecl".into()
    }

    fn json_schema(generator: &mut SchemaGenerator) -> Schema {
        let record = generator.subschema_for::<PluginRecord>();
        json_schema!({
            "anyOf": [
                { "type": ["boolean", "null"] },
                record
            ]
        })
    }
}
