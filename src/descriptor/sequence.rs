//! Configuration sequences: ordered method calls applied after attachment.
//!
//! A sequence item is either a mapping of `method: value` pairs or a nested
//! list of items. Nested lists flatten in declaration order, and every pair
//! becomes a [`MethodCall`] shaped by [`Arguments::shaped`](crate::toolkit::Arguments::shaped).

use serde::{Deserialize, Deserializer};

use crate::error::{BuildError, SchemaError};
use crate::toolkit::{MethodCall, Toolkit, WidgetId};
use crate::value::{Kwargs, Value};

// ---------------------------------------------------------------------------
// ConfigSequence
// ---------------------------------------------------------------------------

/// One configuration sequence item.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSequence {
    /// A mapping item: every entry is one call, in declaration order.
    Steps(Vec<MethodCall>),
    /// A list item: each entry is applied in turn.
    Nested(Vec<ConfigSequence>),
}

impl ConfigSequence {
    /// A mapping item built from `(method, value)` pairs.
    pub fn steps<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        ConfigSequence::Steps(
            pairs
                .into_iter()
                .map(|(method, value)| MethodCall::shaped(method, value.into()))
                .collect(),
        )
    }

    /// Flatten into the ordered list of calls.
    pub fn calls(&self) -> Vec<&MethodCall> {
        let mut out = Vec::new();
        self.collect_calls(&mut out);
        out
    }

    fn collect_calls<'a>(&'a self, out: &mut Vec<&'a MethodCall>) {
        match self {
            ConfigSequence::Steps(calls) => out.extend(calls.iter()),
            ConfigSequence::Nested(items) => {
                for item in items {
                    item.collect_calls(out);
                }
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ConfigSequence::Steps(calls) => calls.is_empty(),
            ConfigSequence::Nested(items) => items.iter().all(ConfigSequence::is_empty),
        }
    }

    /// Invoke every call on `widget`, in order. `node_id` labels errors.
    pub fn apply(
        &self,
        toolkit: &mut dyn Toolkit,
        widget: WidgetId,
        node_id: &str,
    ) -> Result<(), BuildError> {
        apply_calls(toolkit, widget, node_id, self.calls())
    }
}

/// Invoke a series of calls on a widget, stopping at the first failure.
pub fn apply_calls<'a>(
    toolkit: &mut dyn Toolkit,
    widget: WidgetId,
    node_id: &str,
    calls: impl IntoIterator<Item = &'a MethodCall>,
) -> Result<(), BuildError> {
    for call in calls {
        tracing::trace!(node = node_id, %call, "invoke");
        toolkit
            .invoke(widget, call)
            .map_err(|source| BuildError::invocation(node_id, &call.method, source))?;
    }
    Ok(())
}

impl TryFrom<Value> for ConfigSequence {
    type Error = SchemaError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Map(mapping) => Ok(ConfigSequence::Steps(MethodCall::from_mapping(mapping))),
            Value::List(items) => items
                .into_iter()
                .map(ConfigSequence::try_from)
                .collect::<Result<Vec<_>, _>>()
                .map(ConfigSequence::Nested),
            other => Err(SchemaError::Invalid(format!(
                "configuration sequence items must be mappings or lists, found {}",
                other.shape()
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for ConfigSequence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ConfigSequence::try_from(value).map_err(serde::de::Error::custom)
    }
}

/// Deserialize a `method: value` mapping (or null) into calls.
pub(crate) fn deserialize_calls<'de, D>(deserializer: D) -> Result<Vec<MethodCall>, D::Error>
where
    D: Deserializer<'de>,
{
    let mapping = Option::<Kwargs>::deserialize(deserializer)?;
    Ok(mapping.map(MethodCall::from_mapping).unwrap_or_default())
}
