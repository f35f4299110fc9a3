//! Method calls: a method name plus a shaped argument payload.
//!
//! Node descriptions say "call `method` with `value`". How `value` turns into
//! arguments depends only on its shape:
//!
//! - a mapping becomes keyword arguments,
//! - a list becomes positional arguments,
//! - anything else becomes a single positional argument.
//!
//! [`Arguments::shaped`] is the one place that rule lives.

use std::fmt;

use crate::value::{Kwargs, Value};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Positional and keyword arguments for one call.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Arguments {
    pub positional: Vec<Value>,
    pub keyword: Kwargs,
}

impl Arguments {
    /// No arguments at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Shape a declared value into arguments.
    pub fn shaped(value: Value) -> Self {
        match value {
            Value::Map(keyword) => Self {
                positional: Vec::new(),
                keyword,
            },
            Value::List(positional) => Self {
                positional,
                keyword: Kwargs::new(),
            },
            single => Self {
                positional: vec![single],
                keyword: Kwargs::new(),
            },
        }
    }

    pub fn positional(values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            positional: values.into_iter().collect(),
            keyword: Kwargs::new(),
        }
    }

    pub fn keyword(keyword: Kwargs) -> Self {
        Self {
            positional: Vec::new(),
            keyword,
        }
    }

    /// Add a positional argument (builder).
    pub fn with_arg(mut self, value: impl Into<Value>) -> Self {
        self.positional.push(value.into());
        self
    }

    /// Add a keyword argument (builder).
    pub fn with_kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.keyword.insert(name.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keyword.is_empty()
    }
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for value in &self.positional {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{value}")?;
        }
        for (name, value) in &self.keyword {
            if !first {
                f.write_str(", ")?;
            }
            first = false;
            write!(f, "{name}={value}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// MethodCall
// ---------------------------------------------------------------------------

/// A single method invocation on a widget.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    pub method: String,
    pub args: Arguments,
}

impl MethodCall {
    pub fn new(method: impl Into<String>, args: Arguments) -> Self {
        Self {
            method: method.into(),
            args,
        }
    }

    /// A call whose arguments are shaped from a declared value.
    pub fn shaped(method: impl Into<String>, value: Value) -> Self {
        Self::new(method, Arguments::shaped(value))
    }

    /// Shape every `(method, value)` entry of a mapping, in order.
    pub fn from_mapping(mapping: Kwargs) -> Vec<MethodCall> {
        mapping
            .into_iter()
            .map(|(method, value)| MethodCall::shaped(method, value))
            .collect()
    }
}

impl fmt::Display for MethodCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.method, self.args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::kwargs;

    #[test]
    fn mapping_becomes_keywords() {
        let args = Arguments::shaped(Value::Map(kwargs([("row", 0), ("column", 1)])));
        assert!(args.positional.is_empty());
        assert_eq!(args.keyword["row"], Value::Int(0));
        assert_eq!(args.keyword["column"], Value::Int(1));
    }

    #[test]
    fn list_becomes_positionals() {
        let args = Arguments::shaped(Value::List(vec![Value::Int(0), Value::from("end")]));
        assert_eq!(args.positional, vec![Value::Int(0), Value::from("end")]);
        assert!(args.keyword.is_empty());
    }

    #[test]
    fn scalar_becomes_single_positional() {
        let args = Arguments::shaped(Value::from("800x600"));
        assert_eq!(args.positional, vec![Value::from("800x600")]);
        assert!(args.keyword.is_empty());
    }

    #[test]
    fn null_is_still_one_argument() {
        let args = Arguments::shaped(Value::Null);
        assert_eq!(args.positional, vec![Value::Null]);
    }

    #[test]
    fn from_mapping_preserves_order() {
        let calls = MethodCall::from_mapping(kwargs([("title", "A"), ("geometry", "1x1")]));
        let names: Vec<_> = calls.iter().map(|c| c.method.as_str()).collect();
        assert_eq!(names, vec!["title", "geometry"]);
    }

    #[test]
    fn display_call() {
        let call = MethodCall::new(
            "add",
            Arguments::none().with_arg("x").with_kwarg("text", "Tab"),
        );
        assert_eq!(call.to_string(), r#"add("x", text="Tab")"#);
    }
}
