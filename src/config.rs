//! Builder configuration: defaults applied while constructing a tree.

use serde::Deserialize;

/// Widget type used for the root window when the description names none.
pub const DEFAULT_ROOT_WIDGET_TYPE: &str = "Tk";
/// Widget type constructed by the tabbed-register element.
pub const DEFAULT_REGISTER_WIDGET_TYPE: &str = "Notebook";
pub const DEFAULT_GEOMETRY: &str = "600x600";
pub const DEFAULT_TITLE: &str = "Main Window";

// ---------------------------------------------------------------------------
// BindingPolicy
// ---------------------------------------------------------------------------

/// What to do when two nodes declare the same binding name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BindingPolicy {
    /// Fail the build with a configuration error.
    #[default]
    Reject,
    /// Replace the earlier binding and log a warning.
    Overwrite,
}

// ---------------------------------------------------------------------------
// BuilderConfig
// ---------------------------------------------------------------------------

/// Configuration injected into a [`TreeBuilder`](crate::builder::TreeBuilder).
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Widget type for a root node that declares none.
    pub root_widget_type: String,
    /// Geometry applied to the root window before its own configuration.
    pub default_geometry: Option<String>,
    /// Title applied to the root window before its own configuration.
    pub default_title: Option<String>,
    /// Widget type for tabbed registers.
    pub register_widget_type: String,
    /// Attach strategy for nodes that declare none. `None` leaves them unattached.
    pub default_attach_strategy: Option<String>,
    /// Handling of duplicate binding names.
    pub binding_policy: BindingPolicy,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self {
            root_widget_type: DEFAULT_ROOT_WIDGET_TYPE.to_owned(),
            default_geometry: Some(DEFAULT_GEOMETRY.to_owned()),
            default_title: Some(DEFAULT_TITLE.to_owned()),
            register_widget_type: DEFAULT_REGISTER_WIDGET_TYPE.to_owned(),
            default_attach_strategy: None,
            binding_policy: BindingPolicy::default(),
        }
    }
}

impl BuilderConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the root widget type (builder).
    pub fn with_root_widget_type(mut self, widget_type: impl Into<String>) -> Self {
        self.root_widget_type = widget_type.into();
        self
    }

    /// Set the default root geometry (builder). `None` skips the call.
    pub fn with_default_geometry(mut self, geometry: Option<&str>) -> Self {
        self.default_geometry = geometry.map(str::to_owned);
        self
    }

    /// Set the default root title (builder). `None` skips the call.
    pub fn with_default_title(mut self, title: Option<&str>) -> Self {
        self.default_title = title.map(str::to_owned);
        self
    }

    /// Set the register widget type (builder).
    pub fn with_register_widget_type(mut self, widget_type: impl Into<String>) -> Self {
        self.register_widget_type = widget_type.into();
        self
    }

    /// Set the fallback attach strategy (builder).
    pub fn with_default_attach_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.default_attach_strategy = Some(strategy.into());
        self
    }

    /// Set the duplicate-binding policy (builder).
    pub fn with_binding_policy(mut self, policy: BindingPolicy) -> Self {
        self.binding_policy = policy;
        self
    }
}
