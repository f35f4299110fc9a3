//! Tabbed register element: each bound child becomes a tab.

use std::any::Any;

use super::traits::{BuildContext, Element, ElementCore};
use crate::builder::registry::BindingRegistry;
use crate::descriptor::NodeDescriptor;
use crate::error::BuildError;
use crate::toolkit::{Arguments, MethodCall, WidgetId};
use crate::value::Value;

/// A tabbed container (notebook).
///
/// After its subtree is built, every child page is added as a tab labelled
/// with the child's id. Children are located through their bindings, so each
/// one must declare a `binding_name`.
#[derive(Debug, Clone)]
pub struct RegisterElement {
    core: ElementCore,
    tabs: Vec<String>,
}

impl RegisterElement {
    pub fn new(descriptor: NodeDescriptor) -> Self {
        Self {
            core: ElementCore::new(descriptor),
            tabs: Vec::new(),
        }
    }

    /// Ids of the children added as tabs, in order.
    pub fn tabs(&self) -> &[String] {
        &self.tabs
    }
}

impl Element for RegisterElement {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn build(&mut self, cx: &mut BuildContext<'_>, target: Option<WidgetId>) -> Result<(), BuildError> {
        let widget_type = cx.config.register_widget_type.clone();
        self.core.construct(cx.toolkit, &widget_type, target)?;
        self.core.attach(cx)?;
        self.core.configure(cx.toolkit)?;
        self.core.mark_built();
        Ok(())
    }

    fn post_subtree(
        &mut self,
        cx: &mut BuildContext<'_>,
        children: &[NodeDescriptor],
        registry: &BindingRegistry,
    ) -> Result<(), BuildError> {
        // Validate every child before adding any tab.
        let mut pages = Vec::with_capacity(children.len());
        for child in children {
            let Some(binding) = child.binding_name.as_deref() else {
                return Err(BuildError::configuration(
                    &child.id,
                    format!(
                        "child of register `{}` has no binding_name; register pages must be bound",
                        self.core.id()
                    ),
                ));
            };
            let page = registry.widget(binding).ok_or_else(|| {
                BuildError::configuration(
                    &child.id,
                    format!("binding `{binding}` has no built widget"),
                )
            })?;
            pages.push((child.id.clone(), page));
        }

        for (id, page) in pages {
            let call = MethodCall::new(
                "add",
                Arguments::positional([Value::Widget(page)]).with_kwarg("text", id.as_str()),
            );
            self.core.invoke(cx.toolkit, &call)?;
            self.tabs.push(id);
        }

        self.core.run_post_hook(cx.toolkit)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BindingPolicy, BuilderConfig};
    use crate::element::{into_handle, GenericElement};
    use crate::testing::HeadlessToolkit;

    fn page(tk: &mut HeadlessToolkit, parent: WidgetId, id: &str, registry: &mut BindingRegistry) -> NodeDescriptor {
        let descriptor = NodeDescriptor::new(id).with_widget_type("Frame").with_binding(id.to_lowercase());
        let mut element = GenericElement::new(descriptor.clone());
        let config = BuilderConfig::default();
        element.build(&mut BuildContext::new(tk, &config), Some(parent)).unwrap();
        registry
            .bind(&id.to_lowercase(), into_handle(element), BindingPolicy::Reject)
            .unwrap();
        descriptor
    }

    #[test]
    fn builds_configured_widget_type() {
        let mut tk = HeadlessToolkit::new();
        let config = BuilderConfig::default().with_register_widget_type("Frame");
        let mut register = RegisterElement::new(NodeDescriptor::new("r").with_widget_type("Label"));
        register.build(&mut BuildContext::new(&mut tk, &config), None).unwrap();
        assert_eq!(tk.get(register.widget().unwrap()).unwrap().widget_type, "Frame");
    }

    #[test]
    fn adds_tabs_in_child_order() {
        let mut tk = HeadlessToolkit::new();
        let config = BuilderConfig::default();
        let mut registry = BindingRegistry::new();
        let mut register = RegisterElement::new(NodeDescriptor::new("r"));
        register.build(&mut BuildContext::new(&mut tk, &config), None).unwrap();
        let book = register.widget().unwrap();

        let children = vec![
            page(&mut tk, book, "Second", &mut registry),
            page(&mut tk, book, "First", &mut registry),
        ];
        register
            .post_subtree(&mut BuildContext::new(&mut tk, &config), &children, &registry)
            .unwrap();

        assert_eq!(register.tabs(), ["Second", "First"]);
        let record = tk.get(book).unwrap();
        let calls: Vec<_> = record.calls.iter().map(|c| c.to_string()).collect();
        assert_eq!(calls, vec![r#"add(<widget>, text="Second")"#, r#"add(<widget>, text="First")"#]);
    }

    #[test]
    fn unbound_child_is_rejected_before_any_tab() {
        let mut tk = HeadlessToolkit::new();
        let config = BuilderConfig::default();
        let mut registry = BindingRegistry::new();
        let mut register = RegisterElement::new(NodeDescriptor::new("r"));
        register.build(&mut BuildContext::new(&mut tk, &config), None).unwrap();
        let book = register.widget().unwrap();

        let children = vec![
            page(&mut tk, book, "Bound", &mut registry),
            NodeDescriptor::new("loose").with_widget_type("Frame"),
        ];
        let err = register
            .post_subtree(&mut BuildContext::new(&mut tk, &config), &children, &registry)
            .unwrap_err();
        assert!(matches!(err, BuildError::Configuration { ref id, .. } if id == "loose"));
        assert!(register.tabs().is_empty());
        assert!(tk.get(book).unwrap().tabs.is_empty());
    }

    #[test]
    fn binding_without_widget_is_rejected() {
        let mut tk = HeadlessToolkit::new();
        let config = BuilderConfig::default();
        let mut registry = BindingRegistry::new();
        registry
            .bind(
                "ghost",
                into_handle(GenericElement::new(NodeDescriptor::new("ghost"))),
                BindingPolicy::Reject,
            )
            .unwrap();
        let mut register = RegisterElement::new(NodeDescriptor::new("r"));
        register.build(&mut BuildContext::new(&mut tk, &config), None).unwrap();

        let children = vec![NodeDescriptor::new("ghost").with_binding("ghost")];
        let err = register
            .post_subtree(&mut BuildContext::new(&mut tk, &config), &children, &registry)
            .unwrap_err();
        assert!(err.to_string().contains("binding `ghost` has no built widget"));
    }

    #[test]
    fn declared_post_hook_runs_after_tabs() {
        let mut tk = HeadlessToolkit::new();
        let config = BuilderConfig::default();
        let registry = BindingRegistry::new();
        let mut register = RegisterElement::new(
            NodeDescriptor::new("r").with_post_hook("select", Value::Int(0)),
        );
        register.build(&mut BuildContext::new(&mut tk, &config), None).unwrap();
        register
            .post_subtree(&mut BuildContext::new(&mut tk, &config), &[], &registry)
            .unwrap();
        let record = tk.get(register.widget().unwrap()).unwrap();
        assert_eq!(record.calls.last().unwrap().method, "select");
    }
}
