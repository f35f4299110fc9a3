//! Stand-alone interactive controls: buttons and checkboxes.
//!
//! These build like generic elements but expose a small API for wiring them
//! up after construction.

use std::any::Any;

use super::traits::{BuildContext, Element, ElementCore};
use crate::descriptor::NodeDescriptor;
use crate::error::BuildError;
use crate::toolkit::{Arguments, Command, MethodCall, Toolkit, VarId, WidgetId};
use crate::value::{kwargs, Value};

/// Register `command` and configure it as the widget's `command=` option.
fn configure_command(
    core: &ElementCore,
    toolkit: &mut dyn Toolkit,
    command: Command,
) -> Result<(), BuildError> {
    let id = toolkit.register_command(command);
    let call = MethodCall::new(
        "configure",
        Arguments::keyword(kwargs([("command", Value::Command(id))])),
    );
    core.invoke(toolkit, &call).map(|_| ())
}

// ---------------------------------------------------------------------------
// ButtonElement
// ---------------------------------------------------------------------------

/// A push button outside of list contexts.
#[derive(Debug, Clone)]
pub struct ButtonElement {
    core: ElementCore,
}

impl ButtonElement {
    pub fn new(descriptor: NodeDescriptor) -> Self {
        Self {
            core: ElementCore::new(descriptor),
        }
    }

    /// Set the callback fired when the button is pressed.
    pub fn set_command(
        &self,
        toolkit: &mut dyn Toolkit,
        command: impl FnMut() + 'static,
    ) -> Result<(), BuildError> {
        configure_command(&self.core, toolkit, Box::new(command))
    }
}

impl Element for ButtonElement {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

// ---------------------------------------------------------------------------
// CheckBoxElement
// ---------------------------------------------------------------------------

/// A checkbox outside of list contexts, backed by an int state variable.
#[derive(Debug, Clone)]
pub struct CheckBoxElement {
    core: ElementCore,
    status: Option<VarId>,
}

impl CheckBoxElement {
    pub fn new(descriptor: NodeDescriptor) -> Self {
        Self {
            core: ElementCore::new(descriptor),
            status: None,
        }
    }

    /// The state variable, once built.
    pub fn variable(&self) -> Option<VarId> {
        self.status
    }

    /// Whether the box is currently checked.
    pub fn status(&self, toolkit: &dyn Toolkit) -> Result<bool, BuildError> {
        let var = self
            .status
            .ok_or_else(|| BuildError::configuration(self.core.id(), "checkbox is not built"))?;
        toolkit
            .variable(var)
            .map(|value| value.truthy())
            .map_err(|source| BuildError::toolkit(self.core.id(), source))
    }

    /// Check or uncheck the box.
    pub fn set_status(&self, toolkit: &mut dyn Toolkit, checked: bool) -> Result<(), BuildError> {
        let var = self
            .status
            .ok_or_else(|| BuildError::configuration(self.core.id(), "checkbox is not built"))?;
        toolkit
            .set_variable(var, Value::Int(i64::from(checked)))
            .map_err(|source| BuildError::toolkit(self.core.id(), source))
    }

    /// Set the callback fired when the box is toggled.
    pub fn set_command(
        &self,
        toolkit: &mut dyn Toolkit,
        command: impl FnMut() + 'static,
    ) -> Result<(), BuildError> {
        configure_command(&self.core, toolkit, Box::new(command))
    }
}

impl Element for CheckBoxElement {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn build(&mut self, cx: &mut BuildContext<'_>, target: Option<WidgetId>) -> Result<(), BuildError> {
        self.core.build(cx, target)?;
        let var = cx.toolkit.create_variable(Value::Int(0));
        let call = MethodCall::new(
            "configure",
            Arguments::keyword(kwargs([
                ("variable", Value::Var(var)),
                ("onvalue", Value::Int(1)),
                ("offvalue", Value::Int(0)),
            ])),
        );
        self.core.invoke(cx.toolkit, &call)?;
        self.status = Some(var);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
