//! Toolkit capability contract: the only way the builder touches widgets.
//!
//! A [`Toolkit`] owns every widget it constructs and hands out lightweight
//! [`WidgetId`] handles. The builder never reaches into toolkit internals; it
//! constructs, attaches, assigns attributes, invokes named methods and
//! destroys, all through this trait. State variables ([`VarId`]) and command
//! callbacks ([`CommandId`]) cover what checkbuttons and buttons need.

pub mod call;

use slotmap::new_key_type;

pub use call::{Arguments, MethodCall};

use crate::value::{Kwargs, Value};

new_key_type! {
    /// Handle to a widget owned by a toolkit. Copy, lightweight (u64).
    pub struct WidgetId;
}

new_key_type! {
    /// Handle to a toolkit state variable (e.g. a checkbutton's value).
    pub struct VarId;
}

new_key_type! {
    /// Handle to a command callback registered with a toolkit.
    pub struct CommandId;
}

/// A callback the toolkit fires in response to user interaction.
pub type Command = Box<dyn FnMut()>;

// ---------------------------------------------------------------------------
// ToolkitError
// ---------------------------------------------------------------------------

/// Failures reported by a toolkit implementation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolkitError {
    #[error("unknown widget type `{0}`")]
    UnknownWidgetType(String),
    #[error("`{widget_type}` does not support attach strategy `{strategy}`")]
    UnsupportedAttach {
        widget_type: String,
        strategy: String,
    },
    #[error("`{widget_type}` has no method `{method}`")]
    UnknownMethod { widget_type: String, method: String },
    #[error("invalid arguments for `{method}`: {message}")]
    InvalidArguments { method: String, message: String },
    #[error("widget no longer exists")]
    DeadWidget,
    #[error("variable no longer exists")]
    DeadVariable,
}

// ---------------------------------------------------------------------------
// Toolkit
// ---------------------------------------------------------------------------

/// The capability contract a GUI toolkit exposes to the builder.
///
/// The trait is object safe; the builder works with `&mut dyn Toolkit`.
pub trait Toolkit {
    /// Instantiate a widget of `widget_type` inside `parent` (or top-level when
    /// `None`) with the given constructor keyword arguments.
    fn construct(
        &mut self,
        widget_type: &str,
        parent: Option<WidgetId>,
        args: &Kwargs,
    ) -> Result<WidgetId, ToolkitError>;

    /// Attach `widget` to its parent's layout using `strategy` (`pack`, `grid`, ...).
    ///
    /// Must fail with [`ToolkitError::UnsupportedAttach`] when the widget has
    /// no such operation.
    fn attach(&mut self, widget: WidgetId, strategy: &str, args: &Kwargs)
        -> Result<(), ToolkitError>;

    /// Assign an attribute directly on the widget object.
    fn set_attribute(&mut self, widget: WidgetId, name: &str, value: &Value)
        -> Result<(), ToolkitError>;

    /// Invoke a named method on the widget.
    ///
    /// Must fail with [`ToolkitError::UnknownMethod`] when the widget has no
    /// such method.
    fn invoke(&mut self, widget: WidgetId, call: &MethodCall) -> Result<Value, ToolkitError>;

    /// Destroy the widget and release it (children included).
    fn destroy(&mut self, widget: WidgetId) -> Result<(), ToolkitError>;

    /// Create a state variable holding `initial`.
    fn create_variable(&mut self, initial: Value) -> VarId;

    /// Read a state variable.
    fn variable(&self, var: VarId) -> Result<Value, ToolkitError>;

    /// Overwrite a state variable.
    fn set_variable(&mut self, var: VarId, value: Value) -> Result<(), ToolkitError>;

    /// Register a command callback, returning a handle usable as a `command=` value.
    fn register_command(&mut self, command: Command) -> CommandId;
}
