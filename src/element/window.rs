//! Root window element.

use std::any::Any;

use super::traits::{BuildContext, Element, ElementCore};
use crate::descriptor::NodeDescriptor;
use crate::error::BuildError;
use crate::toolkit::{Arguments, MethodCall, WidgetId};
use crate::value::Value;

/// The top-level window.
///
/// Builds the configured root widget type (unless the node names one), applies
/// the default geometry and title, then the node's own attributes and
/// configuration sequence. A window is never attached to a layout.
#[derive(Debug, Clone)]
pub struct WindowElement {
    core: ElementCore,
}

impl WindowElement {
    pub fn new(descriptor: NodeDescriptor) -> Self {
        Self {
            core: ElementCore::new(descriptor),
        }
    }
}

impl Element for WindowElement {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn build(&mut self, cx: &mut BuildContext<'_>, target: Option<WidgetId>) -> Result<(), BuildError> {
        let widget_type = self
            .core
            .descriptor()
            .widget_type
            .clone()
            .unwrap_or_else(|| cx.config.root_widget_type.clone());
        self.core.construct(cx.toolkit, &widget_type, target)?;

        if let Some(geometry) = &cx.config.default_geometry {
            let call = MethodCall::new("geometry", Arguments::positional([Value::from(geometry.as_str())]));
            self.core.invoke(cx.toolkit, &call)?;
        }
        if let Some(title) = &cx.config.default_title {
            let call = MethodCall::new("title", Arguments::positional([Value::from(title.as_str())]));
            self.core.invoke(cx.toolkit, &call)?;
        }

        self.core.configure(cx.toolkit)?;
        self.core.mark_built();
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
