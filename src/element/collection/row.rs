//! Collection rows: a container element paired with a content element.

use crate::element::generic::GenericElement;
use crate::element::traits::Element;
use crate::error::BuildError;
use crate::toolkit::{Toolkit, VarId, WidgetId};
use crate::value::{Kwargs, Value};

// ---------------------------------------------------------------------------
// RowSpec
// ---------------------------------------------------------------------------

/// Input for one new row.
#[derive(Debug, Clone, PartialEq)]
pub struct RowSpec {
    /// Id of the row's content element.
    pub id: String,
    /// Text shown by the row.
    pub text: String,
    /// Extra constructor arguments for the content widget.
    pub constructor_args: Kwargs,
}

impl RowSpec {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            constructor_args: Kwargs::new(),
        }
    }

    /// Add a constructor argument for the content widget (builder).
    pub fn with_arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constructor_args.insert(name.into(), value.into());
        self
    }
}

// ---------------------------------------------------------------------------
// CollectionRow
// ---------------------------------------------------------------------------

/// One built row of a collection.
#[derive(Debug, Clone)]
pub struct CollectionRow {
    pub(crate) container: GenericElement,
    pub(crate) content: GenericElement,
    pub(crate) text: String,
    pub(crate) state: Option<VarId>,
}

impl CollectionRow {
    /// Id of the content element.
    pub fn id(&self) -> &str {
        self.content.id()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn container(&self) -> &GenericElement {
        &self.container
    }

    pub fn content(&self) -> &GenericElement {
        &self.content
    }

    /// The content widget, e.g. the row's checkbutton.
    pub fn widget(&self) -> Option<WidgetId> {
        self.content.widget()
    }

    /// The row's state variable, for checkable rows.
    pub fn state(&self) -> Option<VarId> {
        self.state
    }

    /// Checked state, or `None` for rows without state.
    pub fn is_checked(&self, toolkit: &dyn Toolkit) -> Result<Option<bool>, BuildError> {
        let Some(var) = self.state else {
            return Ok(None);
        };
        toolkit
            .variable(var)
            .map(|value| Some(value.truthy()))
            .map_err(|source| BuildError::toolkit(self.id(), source))
    }

    /// Check or uncheck the row.
    pub fn set_checked(&self, toolkit: &mut dyn Toolkit, checked: bool) -> Result<(), BuildError> {
        let var = self
            .state
            .ok_or_else(|| BuildError::configuration(self.id(), "row has no checked state"))?;
        toolkit
            .set_variable(var, Value::Int(i64::from(checked)))
            .map_err(|source| BuildError::toolkit(self.id(), source))
    }

    /// Destroy the content first, then its container.
    pub(crate) fn destroy(&mut self, toolkit: &mut dyn Toolkit) -> Result<(), BuildError> {
        let content = self.content.destroy(toolkit);
        let container = self.container.destroy(toolkit);
        content.and(container)
    }
}
