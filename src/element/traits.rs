//! Element trait and the shared build machinery behind it.
//!
//! Every element wraps one toolkit widget. [`ElementCore`] holds the parts all
//! elements share (descriptor copy, widget handle, lifecycle state) and knows
//! the generic build path; specialized elements override only the
//! [`Element`] methods they need and reuse the core's steps.

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use super::lifecycle::ElementState;
use crate::builder::registry::BindingRegistry;
use crate::config::BuilderConfig;
use crate::descriptor::{apply_calls, NodeDescriptor};
use crate::error::BuildError;
use crate::toolkit::{MethodCall, Toolkit, ToolkitError, WidgetId};
use crate::value::Value;

/// Shared, single-threaded handle to a built element.
pub type ElementHandle = Rc<RefCell<dyn Element>>;

/// Wrap an element into a shared handle.
pub fn into_handle<E: Element>(element: E) -> ElementHandle {
    Rc::new(RefCell::new(element))
}

// ---------------------------------------------------------------------------
// BuildContext
// ---------------------------------------------------------------------------

/// What an element can reach while it builds.
pub struct BuildContext<'a> {
    pub toolkit: &'a mut dyn Toolkit,
    pub config: &'a BuilderConfig,
}

impl<'a> BuildContext<'a> {
    pub fn new(toolkit: &'a mut dyn Toolkit, config: &'a BuilderConfig) -> Self {
        Self { toolkit, config }
    }
}

// ---------------------------------------------------------------------------
// Element trait
// ---------------------------------------------------------------------------

/// Runtime wrapper around one constructed widget.
///
/// The trait is object safe; the builder works with [`ElementHandle`]s.
pub trait Element: Any + fmt::Debug {
    fn core(&self) -> &ElementCore;

    fn core_mut(&mut self) -> &mut ElementCore;

    /// Construct, attach and configure the widget inside `target`.
    fn build(&mut self, cx: &mut BuildContext<'_>, target: Option<WidgetId>) -> Result<(), BuildError> {
        self.core_mut().build(cx, target)
    }

    /// Runs once every child has been built.
    ///
    /// `children` are the child descriptors in build order; `registry` holds
    /// every binding made so far, children's included.
    fn post_subtree(
        &mut self,
        cx: &mut BuildContext<'_>,
        children: &[NodeDescriptor],
        registry: &BindingRegistry,
    ) -> Result<(), BuildError> {
        let _ = (children, registry);
        self.core().run_post_hook(cx.toolkit)
    }

    /// Release the widget. Idempotent.
    fn destroy(&mut self, toolkit: &mut dyn Toolkit) -> Result<(), BuildError> {
        self.core_mut().destroy(toolkit)
    }

    /// Downcast to `&dyn Any` for runtime type inspection.
    fn as_any(&self) -> &dyn Any;

    /// Downcast to `&mut dyn Any` for mutable runtime type inspection.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn descriptor(&self) -> &NodeDescriptor {
        &self.core().descriptor
    }

    fn id(&self) -> &str {
        &self.core().descriptor.id
    }

    fn widget(&self) -> Option<WidgetId> {
        self.core().widget
    }

    fn state(&self) -> ElementState {
        self.core().state
    }
}

impl dyn Element {
    /// Borrow as a concrete element type.
    pub fn downcast_ref<T: Element>(&self) -> Option<&T> {
        self.as_any().downcast_ref::<T>()
    }

    /// Mutably borrow as a concrete element type.
    pub fn downcast_mut<T: Element>(&mut self) -> Option<&mut T> {
        self.as_any_mut().downcast_mut::<T>()
    }

    pub fn is<T: Element>(&self) -> bool {
        self.as_any().is::<T>()
    }
}

// ---------------------------------------------------------------------------
// ElementCore
// ---------------------------------------------------------------------------

/// State and build steps shared by every element.
#[derive(Debug, Clone)]
pub struct ElementCore {
    descriptor: NodeDescriptor,
    widget: Option<WidgetId>,
    target: Option<WidgetId>,
    state: ElementState,
}

impl ElementCore {
    /// Wrap a descriptor. Children are dropped; the builder walks them.
    pub fn new(descriptor: NodeDescriptor) -> Self {
        let descriptor = if descriptor.children.is_empty() {
            descriptor
        } else {
            descriptor.without_children()
        };
        Self {
            descriptor,
            widget: None,
            target: None,
            state: ElementState::Created,
        }
    }

    pub fn descriptor(&self) -> &NodeDescriptor {
        &self.descriptor
    }

    pub fn id(&self) -> &str {
        &self.descriptor.id
    }

    pub fn widget(&self) -> Option<WidgetId> {
        self.widget
    }

    /// The widget this element was built inside, if any.
    pub fn target(&self) -> Option<WidgetId> {
        self.target
    }

    pub fn state(&self) -> ElementState {
        self.state
    }

    /// The widget, or a configuration error if there is none yet.
    pub fn require_widget(&self) -> Result<WidgetId, BuildError> {
        self.widget.ok_or_else(|| {
            BuildError::configuration(self.id(), "element has no widget (not built or destroyed)")
        })
    }

    /// The generic build: construct, attach, assign attributes, run the sequence.
    pub fn build(&mut self, cx: &mut BuildContext<'_>, target: Option<WidgetId>) -> Result<(), BuildError> {
        let widget_type = self.descriptor.widget_type.clone().ok_or_else(|| {
            BuildError::configuration(self.id(), "no widget_type declared")
        })?;
        self.construct(cx.toolkit, &widget_type, target)?;
        self.attach(cx)?;
        self.configure(cx.toolkit)?;
        self.mark_built();
        Ok(())
    }

    /// Step 1: instantiate `widget_type` in `target` with the constructor args.
    pub fn construct(
        &mut self,
        toolkit: &mut dyn Toolkit,
        widget_type: &str,
        target: Option<WidgetId>,
    ) -> Result<WidgetId, BuildError> {
        let widget = toolkit
            .construct(widget_type, target, &self.descriptor.constructor_args)
            .map_err(|source| BuildError::toolkit(self.id(), source))?;
        self.widget = Some(widget);
        self.target = target;
        Ok(widget)
    }

    /// Step 2: attach with the declared strategy, or the configured default.
    pub fn attach(&self, cx: &mut BuildContext<'_>) -> Result<(), BuildError> {
        let widget = self.require_widget()?;
        let strategy = self
            .descriptor
            .attach_strategy
            .as_deref()
            .or(cx.config.default_attach_strategy.as_deref());
        let Some(strategy) = strategy else {
            tracing::debug!(node = self.id(), "no attach strategy, widget left unattached");
            return Ok(());
        };
        cx.toolkit
            .attach(widget, strategy, &self.descriptor.attach_args)
            .map_err(|source| BuildError::attachment(self.id(), source))
    }

    /// Steps 3 and 4: attributes, then the configuration sequence.
    pub fn configure(&self, toolkit: &mut dyn Toolkit) -> Result<(), BuildError> {
        self.apply_attributes(toolkit)?;
        self.apply_sequence(toolkit)
    }

    pub fn apply_attributes(&self, toolkit: &mut dyn Toolkit) -> Result<(), BuildError> {
        let widget = self.require_widget()?;
        for (name, value) in &self.descriptor.post_construction_attributes {
            toolkit
                .set_attribute(widget, name, value)
                .map_err(|source| BuildError::toolkit(self.id(), source))?;
        }
        Ok(())
    }

    pub fn apply_sequence(&self, toolkit: &mut dyn Toolkit) -> Result<(), BuildError> {
        let Some(sequence) = &self.descriptor.configuration_sequence else {
            return Ok(());
        };
        let widget = self.require_widget()?;
        sequence.apply(toolkit, widget, self.id())
    }

    /// Run the declared post-subtree hook calls.
    pub fn run_post_hook(&self, toolkit: &mut dyn Toolkit) -> Result<(), BuildError> {
        if self.descriptor.post_subtree_hook.is_empty() {
            return Ok(());
        }
        let widget = self.require_widget()?;
        apply_calls(toolkit, widget, self.id(), &self.descriptor.post_subtree_hook)
    }

    /// Invoke a single call on this element's widget.
    pub fn invoke(&self, toolkit: &mut dyn Toolkit, call: &MethodCall) -> Result<Value, BuildError> {
        let widget = self.require_widget()?;
        tracing::trace!(node = self.id(), %call, "invoke");
        toolkit
            .invoke(widget, call)
            .map_err(|source| BuildError::invocation(self.id(), &call.method, source))
    }

    pub fn mark_built(&mut self) {
        self.state = ElementState::Built;
    }

    /// Release the widget. A widget already gone with an ancestor counts as released.
    pub fn destroy(&mut self, toolkit: &mut dyn Toolkit) -> Result<(), BuildError> {
        if let Some(widget) = self.widget.take() {
            match toolkit.destroy(widget) {
                Ok(()) | Err(ToolkitError::DeadWidget) => {}
                Err(source) => {
                    self.widget = Some(widget);
                    return Err(BuildError::toolkit(self.id(), source));
                }
            }
        }
        self.state = ElementState::Destroyed;
        Ok(())
    }
}
