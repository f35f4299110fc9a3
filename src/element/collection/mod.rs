//! Collection elements: list boxes holding a growing list of homogeneous rows.
//!
//! A [`CollectionElement`] builds like any generic widget; rows are added
//! afterwards by application code. Row construction is delegated to a
//! [`RowStrategy`] looked up by the collection's own kind, so plain label
//! lists and checkbox lists share everything except the row content.

pub mod row;
pub mod strategy;

use std::any::Any;

pub use row::{CollectionRow, RowSpec};
pub use strategy::{CheckboxRows, LabelRows, RowContent, RowResolver, RowStrategy};

use super::generic::GenericElement;
use super::traits::{BuildContext, Element, ElementCore};
use crate::config::BuilderConfig;
use crate::descriptor::NodeDescriptor;
use crate::error::BuildError;
use crate::resolve::ElementKind;
use crate::toolkit::{Toolkit, WidgetId};

// ---------------------------------------------------------------------------
// CollectionElement
// ---------------------------------------------------------------------------

/// A list-like element with dynamically added rows.
#[derive(Debug, Clone)]
pub struct CollectionElement {
    core: ElementCore,
    rows: Vec<CollectionRow>,
    row_resolver: RowResolver,
    config: BuilderConfig,
}

impl CollectionElement {
    /// A collection using the standard row resolver.
    pub fn new(descriptor: NodeDescriptor) -> Self {
        Self {
            core: ElementCore::new(descriptor),
            rows: Vec::new(),
            row_resolver: RowResolver::standard(),
            config: BuilderConfig::default(),
        }
    }

    /// Replace the row resolver (builder).
    pub fn with_row_resolver(mut self, resolver: RowResolver) -> Self {
        self.row_resolver = resolver;
        self
    }

    /// The kind rows are resolved by. A collection without a kind is a `ListBox`.
    pub fn kind(&self) -> ElementKind {
        ElementKind::of(self.core.descriptor()).unwrap_or(ElementKind::ListBox)
    }

    pub fn rows(&self) -> &[CollectionRow] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&CollectionRow> {
        self.rows.get(index)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Add a row showing `label`, with an id derived from the collection's.
    pub fn add_row(&mut self, toolkit: &mut dyn Toolkit, label: &str) -> Result<&CollectionRow, BuildError> {
        let spec = RowSpec::new(self.row_id_for(label), label);
        self.add_row_with(toolkit, spec)
    }

    /// Add a row from an explicit spec.
    ///
    /// The container is built inside the collection's widget, the content
    /// inside the container; the row is appended only once both exist.
    pub fn add_row_with(&mut self, toolkit: &mut dyn Toolkit, spec: RowSpec) -> Result<&CollectionRow, BuildError> {
        let strategy = self.row_resolver.resolve(&self.kind())?;
        let parent = self.core.require_widget()?;

        let mut cx = BuildContext::new(toolkit, &self.config);
        let mut container = GenericElement::new(strategy.container(&spec));
        container.build(&mut cx, Some(parent))?;
        let holder = container.core().require_widget()?;

        let content = strategy.content(&spec, cx.toolkit);
        let mut element = GenericElement::new(content.descriptor);
        if let Err(err) = element.build(&mut cx, Some(holder)) {
            if let Err(cleanup) = container.destroy(cx.toolkit) {
                tracing::warn!(row = %spec.id, error = %cleanup, "failed to release row container");
            }
            return Err(err);
        }

        tracing::debug!(
            collection = self.core.id(),
            row = %spec.id,
            strategy = strategy.name(),
            "row added"
        );
        self.rows.push(CollectionRow {
            container,
            content: element,
            text: spec.text,
            state: content.state,
        });
        Ok(&self.rows[self.rows.len() - 1])
    }

    /// Destroy every row and empty the list.
    ///
    /// The list is emptied before any widget is destroyed, so it never holds
    /// destroyed rows. All rows are destroyed even if one fails; the first
    /// failure is returned. Calling it on an empty collection is a no-op.
    pub fn clear(&mut self, toolkit: &mut dyn Toolkit) -> Result<(), BuildError> {
        let rows = std::mem::take(&mut self.rows);
        let mut first_error = None;
        for mut row in rows {
            if let Err(err) = row.destroy(toolkit) {
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Checked state of every row, in row order.
    pub fn row_states(&self, toolkit: &dyn Toolkit) -> Result<Vec<bool>, BuildError> {
        let strategy = self.row_resolver.resolve(&self.kind())?;
        if !strategy.checkable() {
            return Err(BuildError::configuration(
                self.core.id(),
                format!("`{}` rows have no checked state", strategy.name()),
            ));
        }
        self.rows
            .iter()
            .map(|row| row.is_checked(toolkit).map(|state| state.unwrap_or(false)))
            .collect()
    }

    /// Whether at least one row is checked. False for an empty collection.
    pub fn any_checked(&self, toolkit: &dyn Toolkit) -> Result<bool, BuildError> {
        Ok(self.row_states(toolkit)?.into_iter().any(|checked| checked))
    }

    /// Whether every row is checked. True for an empty collection.
    pub fn all_checked(&self, toolkit: &dyn Toolkit) -> Result<bool, BuildError> {
        Ok(self.row_states(toolkit)?.into_iter().all(|checked| checked))
    }

    fn row_id_for(&self, label: &str) -> String {
        let base = format!("generic:{}.{}", self.core.id(), label);
        let taken = |id: &str| self.rows.iter().any(|row| row.id() == id);
        if !taken(&base) {
            return base;
        }
        (2..)
            .map(|n| format!("{base}#{n}"))
            .find(|candidate| !taken(candidate))
            .unwrap_or(base)
    }
}

impl Element for CollectionElement {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn build(&mut self, cx: &mut BuildContext<'_>, target: Option<WidgetId>) -> Result<(), BuildError> {
        self.config = cx.config.clone();
        self.core.build(cx, target)
    }

    fn destroy(&mut self, toolkit: &mut dyn Toolkit) -> Result<(), BuildError> {
        let rows = self.clear(toolkit);
        let own = self.core.destroy(toolkit);
        rows.and(own)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
