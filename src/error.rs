//! Error taxonomy for descriptor loading and tree construction.
//!
//! Nothing here is caught internally: a failure anywhere in a subtree aborts
//! the whole build and surfaces to whoever invoked the builder.

use crate::toolkit::ToolkitError;

/// Malformed node description input.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("malformed node description: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid node description: {0}")]
    Invalid(String),
}

/// Failures while resolving, building or wiring elements.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// No element implementation for a kind, and no fallback allowed.
    #[error("no {scope} registered for kind `{kind}`")]
    Resolution { scope: &'static str, kind: String },

    /// The declared attach strategy is not supported by the widget.
    #[error("node `{id}`: cannot attach `{widget_type}` with `{strategy}`")]
    Attachment {
        id: String,
        widget_type: String,
        strategy: String,
    },

    /// A configuration or hook method is missing on the widget.
    #[error("node `{id}`: cannot invoke `{method}`: {source}")]
    Invocation {
        id: String,
        method: String,
        #[source]
        source: ToolkitError,
    },

    /// A structural requirement of the description is violated.
    #[error("node `{id}`: {message}")]
    Configuration { id: String, message: String },

    /// Any other toolkit failure (unknown widget type, dead widget, ...).
    #[error("node `{id}`: {source}")]
    Toolkit {
        id: String,
        #[source]
        source: ToolkitError,
    },
}

impl BuildError {
    pub(crate) fn configuration(id: impl Into<String>, message: impl Into<String>) -> Self {
        BuildError::Configuration {
            id: id.into(),
            message: message.into(),
        }
    }

    pub(crate) fn toolkit(id: impl Into<String>, source: ToolkitError) -> Self {
        BuildError::Toolkit {
            id: id.into(),
            source,
        }
    }

    /// Map a failed `invoke` into the taxonomy.
    pub(crate) fn invocation(id: impl Into<String>, method: &str, source: ToolkitError) -> Self {
        match source {
            ToolkitError::UnknownMethod { .. } | ToolkitError::InvalidArguments { .. } => {
                BuildError::Invocation {
                    id: id.into(),
                    method: method.to_owned(),
                    source,
                }
            }
            other => BuildError::toolkit(id, other),
        }
    }

    /// Map a failed `attach` into the taxonomy.
    pub(crate) fn attachment(id: impl Into<String>, source: ToolkitError) -> Self {
        match source {
            ToolkitError::UnsupportedAttach {
                widget_type,
                strategy,
            } => BuildError::Attachment {
                id: id.into(),
                widget_type,
                strategy,
            },
            other => BuildError::toolkit(id, other),
        }
    }

    /// The node id this error refers to, when there is one.
    pub fn node_id(&self) -> Option<&str> {
        match self {
            BuildError::Attachment { id, .. }
            | BuildError::Invocation { id, .. }
            | BuildError::Configuration { id, .. }
            | BuildError::Toolkit { id, .. } => Some(id),
            BuildError::Schema(_) | BuildError::Resolution { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_method_maps_to_invocation() {
        let err = BuildError::invocation(
            "main",
            "wobble",
            ToolkitError::UnknownMethod {
                widget_type: "Frame".into(),
                method: "wobble".into(),
            },
        );
        assert!(matches!(err, BuildError::Invocation { ref method, .. } if method == "wobble"));
        assert_eq!(err.node_id(), Some("main"));
    }

    #[test]
    fn dead_widget_is_not_invocation() {
        let err = BuildError::invocation("main", "title", ToolkitError::DeadWidget);
        assert!(matches!(err, BuildError::Toolkit { .. }));
    }

    #[test]
    fn unsupported_attach_maps_to_attachment() {
        let err = BuildError::attachment(
            "root",
            ToolkitError::UnsupportedAttach {
                widget_type: "Tk".into(),
                strategy: "pack".into(),
            },
        );
        assert_eq!(err.to_string(), "node `root`: cannot attach `Tk` with `pack`");
    }

    #[test]
    fn resolution_message() {
        let err = BuildError::Resolution {
            scope: "row strategy",
            kind: "Tree".into(),
        };
        assert_eq!(err.to_string(), "no row strategy registered for kind `Tree`");
        assert!(err.node_id().is_none());
    }
}
