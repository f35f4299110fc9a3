//! Dynamically shaped values: constructor args, attributes, call payloads.
//!
//! A [`Value`] is what a node description carries wherever the toolkit expects
//! an argument. Besides the usual JSON-like shapes it can hold opaque toolkit
//! handles (widgets, variables, commands) so that elements can pass live
//! objects back into the toolkit, e.g. a checkbutton's state variable.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};

use crate::toolkit::{CommandId, VarId, WidgetId};

/// Ordered keyword arguments. Declaration order is preserved.
pub type Kwargs = IndexMap<String, Value>;

// ---------------------------------------------------------------------------
// Value
// ---------------------------------------------------------------------------

/// A single argument value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Map(Kwargs),
    /// Handle to a live toolkit widget.
    Widget(WidgetId),
    /// Handle to a toolkit state variable.
    Var(VarId),
    /// Handle to a registered command callback.
    Command(CommandId),
}

impl Value {
    /// Short name of this value's shape, used in error messages.
    pub fn shape(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Map(_) => "mapping",
            Value::Widget(_) => "widget",
            Value::Var(_) => "variable",
            Value::Command(_) => "command",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Bool(b) => Some(i64::from(*b)),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&Kwargs> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_widget(&self) -> Option<WidgetId> {
        match self {
            Value::Widget(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_var(&self) -> Option<VarId> {
        match self {
            Value::Var(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_command(&self) -> Option<CommandId> {
        match self {
            Value::Command(id) => Some(*id),
            _ => None,
        }
    }

    /// Truthiness as a toolkit state variable would report it.
    ///
    /// Null, `false`, zero, empty strings and empty containers are false.
    pub fn truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Int(n) => *n != 0,
            Value::Float(f) => *f != 0.0,
            Value::Str(s) => !s.is_empty() && s != "0",
            Value::List(items) => !items.is_empty(),
            Value::Map(m) => !m.is_empty(),
            Value::Widget(_) | Value::Var(_) | Value::Command(_) => true,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => write!(f, "{s:?}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Map(map) => {
                f.write_str("{")?;
                for (i, (key, item)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {item}")?;
                }
                f.write_str("}")
            }
            Value::Widget(_) => f.write_str("<widget>"),
            Value::Var(_) => f.write_str("<variable>"),
            Value::Command(_) => f.write_str("<command>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl From<Kwargs> for Value {
    fn from(map: Kwargs) -> Self {
        Value::Map(map)
    }
}

impl From<WidgetId> for Value {
    fn from(id: WidgetId) -> Self {
        Value::Widget(id)
    }
}

impl From<VarId> for Value {
    fn from(id: VarId) -> Self {
        Value::Var(id)
    }
}

impl From<CommandId> for Value {
    fn from(id: CommandId) -> Self {
        Value::Command(id)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(key, item)| (key, Value::from(item)))
                    .collect(),
            ),
        }
    }
}

/// Build a [`Kwargs`] map from `(key, value)` pairs.
pub fn kwargs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Kwargs
where
    K: Into<String>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

// ---------------------------------------------------------------------------
// Deserialize
// ---------------------------------------------------------------------------

// Handles never appear in authored input, only the data shapes do.
impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("any data value")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Deserialize::deserialize(deserializer)
    }

    fn visit_bool<E: de::Error>(self, b: bool) -> Result<Value, E> {
        Ok(Value::Bool(b))
    }

    fn visit_i64<E: de::Error>(self, n: i64) -> Result<Value, E> {
        Ok(Value::Int(n))
    }

    fn visit_u64<E: de::Error>(self, n: u64) -> Result<Value, E> {
        match i64::try_from(n) {
            Ok(n) => Ok(Value::Int(n)),
            Err(_) => Ok(Value::Float(n as f64)),
        }
    }

    fn visit_f64<E: de::Error>(self, x: f64) -> Result<Value, E> {
        Ok(Value::Float(x))
    }

    fn visit_str<E: de::Error>(self, s: &str) -> Result<Value, E> {
        Ok(Value::Str(s.to_owned()))
    }

    fn visit_string<E: de::Error>(self, s: String) -> Result<Value, E> {
        Ok(Value::Str(s))
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::List(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = Kwargs::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, item)) = access.next_entry::<String, Value>()? {
            map.insert(key, item);
        }
        Ok(Value::Map(map))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_json_keeps_map_order() {
        let value = Value::from(json!({"zeta": 1, "alpha": 2, "mid": 3}));
        let keys: Vec<_> = value.as_map().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn from_json_numbers() {
        assert_eq!(Value::from(json!(3)), Value::Int(3));
        assert_eq!(Value::from(json!(1.5)), Value::Float(1.5));
        assert_eq!(Value::from(json!(null)), Value::Null);
    }

    #[test]
    fn deserialize_nested() {
        let value: Value = serde_json::from_str(r#"{"b": [1, "x", true], "a": {"k": null}}"#).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.get_index(0).unwrap().0, "b");
        assert_eq!(
            map["b"],
            Value::List(vec![Value::Int(1), Value::from("x"), Value::Bool(true)])
        );
        assert!(map["a"].as_map().unwrap()["k"].is_null());
    }

    #[test]
    fn truthiness() {
        assert!(!Value::Null.truthy());
        assert!(!Value::Int(0).truthy());
        assert!(Value::Int(1).truthy());
        assert!(!Value::from("").truthy());
        assert!(!Value::from("0").truthy());
        assert!(Value::from("yes").truthy());
        assert!(!Value::List(Vec::new()).truthy());
    }

    #[test]
    fn shape_names() {
        assert_eq!(Value::from("x").shape(), "string");
        assert_eq!(Value::Map(Kwargs::new()).shape(), "mapping");
        assert_eq!(Value::List(Vec::new()).shape(), "list");
    }

    #[test]
    fn display_compact() {
        let value = Value::Map(kwargs([("side", Value::from("left")), ("expand", Value::Bool(false))]));
        assert_eq!(value.to_string(), r#"{side: "left", expand: false}"#);
    }

    #[test]
    fn kwargs_helper() {
        let args = kwargs([("text", "hi")]);
        assert_eq!(args["text"], Value::from("hi"));
    }
}
