//! Row strategies and the row-scoped resolver.
//!
//! Every row is a layout-only container with a content widget inside. The
//! container is the same for every collection; the content varies by
//! strategy. Which strategy a collection uses is decided by the collection's
//! own kind, through a [`RowResolver`] that has no fallback.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::row::RowSpec;
use crate::descriptor::NodeDescriptor;
use crate::error::BuildError;
use crate::resolve::ElementKind;
use crate::toolkit::{Toolkit, VarId};
use crate::value::Value;

/// Content descriptor for one row, plus its state variable if checkable.
#[derive(Debug, Clone)]
pub struct RowContent {
    pub descriptor: NodeDescriptor,
    pub state: Option<VarId>,
}

// ---------------------------------------------------------------------------
// RowStrategy
// ---------------------------------------------------------------------------

/// How a collection builds its rows.
pub trait RowStrategy {
    /// Short name, for logs and debugging.
    fn name(&self) -> &str;

    /// Descriptor of the row container: a frame stacked top to bottom that
    /// fills horizontally and never expands.
    fn container(&self, spec: &RowSpec) -> NodeDescriptor {
        NodeDescriptor::new(format!("{}:container", spec.id))
            .with_widget_type("Frame")
            .with_attach_strategy("pack")
            .with_attach_arg("fill", "x")
            .with_attach_arg("side", "top")
            .with_attach_arg("expand", false)
    }

    /// Descriptor of the row content, built inside the container.
    fn content(&self, spec: &RowSpec, toolkit: &mut dyn Toolkit) -> RowContent;

    /// Whether rows carry a checked state.
    fn checkable(&self) -> bool {
        false
    }
}

/// Content packed to the left of its container, not expanding.
fn content_descriptor(spec: &RowSpec, widget_type: &str) -> NodeDescriptor {
    let mut descriptor = NodeDescriptor::new(spec.id.clone())
        .with_widget_type(widget_type)
        .with_constructor_arg("text", spec.text.as_str())
        .with_attach_strategy("pack")
        .with_attach_arg("side", "left")
        .with_attach_arg("expand", false);
    for (name, value) in &spec.constructor_args {
        descriptor.constructor_args.insert(name.clone(), value.clone());
    }
    descriptor
}

/// Plain text rows.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelRows;

impl RowStrategy for LabelRows {
    fn name(&self) -> &str {
        "label"
    }

    fn content(&self, spec: &RowSpec, _toolkit: &mut dyn Toolkit) -> RowContent {
        RowContent {
            descriptor: content_descriptor(spec, "Label"),
            state: None,
        }
    }
}

/// Checkbutton rows, each bound to its own variable. New rows start checked.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckboxRows;

impl RowStrategy for CheckboxRows {
    fn name(&self) -> &str {
        "checkbox"
    }

    fn content(&self, spec: &RowSpec, toolkit: &mut dyn Toolkit) -> RowContent {
        let state = toolkit.create_variable(Value::Int(1));
        let descriptor =
            content_descriptor(spec, "Checkbutton").with_constructor_arg("variable", Value::Var(state));
        RowContent {
            descriptor,
            state: Some(state),
        }
    }

    fn checkable(&self) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// RowResolver
// ---------------------------------------------------------------------------

/// Maps a collection's kind to its row strategy. Unmapped kinds are an error.
#[derive(Clone, Default)]
pub struct RowResolver {
    table: IndexMap<ElementKind, Rc<dyn RowStrategy>>,
}

impl RowResolver {
    /// An empty resolver: every lookup fails until kinds are registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in collection kinds.
    pub fn standard() -> Self {
        Self::new()
            .with(ElementKind::ListBox, LabelRows)
            .with(ElementKind::ListBoxTables, LabelRows)
            .with(ElementKind::ListBoxCheckboxes, CheckboxRows)
    }

    /// Map `kind` to `strategy` (builder). Replaces an existing mapping.
    pub fn with(mut self, kind: ElementKind, strategy: impl RowStrategy + 'static) -> Self {
        self.register(kind, strategy);
        self
    }

    pub fn register(&mut self, kind: ElementKind, strategy: impl RowStrategy + 'static) {
        self.table.insert(kind, Rc::new(strategy));
    }

    pub fn resolve(&self, kind: &ElementKind) -> Result<Rc<dyn RowStrategy>, BuildError> {
        self.table
            .get(kind)
            .cloned()
            .ok_or_else(|| BuildError::Resolution {
                scope: "row strategy",
                kind: kind.to_string(),
            })
    }

    pub fn kinds(&self) -> impl Iterator<Item = &ElementKind> {
        self.table.keys()
    }
}

impl fmt::Debug for RowResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.table.iter().map(|(kind, strategy)| (kind, strategy.name())))
            .finish()
    }
}
