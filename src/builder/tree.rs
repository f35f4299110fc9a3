//! Depth-first tree construction.

use std::rc::Rc;

use super::registry::BindingRegistry;
use crate::config::BuilderConfig;
use crate::descriptor::NodeDescriptor;
use crate::element::{BuildContext, ElementHandle};
use crate::error::BuildError;
use crate::resolve::{DefaultResolver, Resolver};
use crate::toolkit::{Toolkit, WidgetId};

/// Builds widget trees from node descriptors.
///
/// Each node is resolved to an element and built inside its parent's widget
/// before its children (pre-order); its post-subtree hook runs after all of
/// them (post-order). Elements that declare a `binding_name` are collected in
/// the builder's [`BindingRegistry`].
///
/// ```ignore
/// let mut builder = TreeBuilder::new(BuilderConfig::default());
/// let root = builder.build(&mut toolkit, &descriptor)?;
/// let label = builder.registry().get_attribute("greeting");
/// ```
pub struct TreeBuilder {
    resolver: Box<dyn Resolver>,
    config: BuilderConfig,
    registry: BindingRegistry,
}

impl TreeBuilder {
    /// A builder using the standard resolver.
    pub fn new(config: BuilderConfig) -> Self {
        Self::with_resolver(DefaultResolver::standard(), config)
    }

    /// A builder using a custom resolver.
    pub fn with_resolver(resolver: impl Resolver + 'static, config: BuilderConfig) -> Self {
        Self {
            resolver: Box::new(resolver),
            config,
            registry: BindingRegistry::new(),
        }
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Bindings collected so far.
    pub fn registry(&self) -> &BindingRegistry {
        &self.registry
    }

    pub fn into_registry(self) -> BindingRegistry {
        self.registry
    }

    /// Build `descriptor` and its subtree as a top-level tree.
    pub fn build(
        &mut self,
        toolkit: &mut dyn Toolkit,
        descriptor: &NodeDescriptor,
    ) -> Result<ElementHandle, BuildError> {
        self.build_in(toolkit, descriptor, None)
    }

    /// Build `descriptor` and its subtree inside an existing widget.
    pub fn build_in(
        &mut self,
        toolkit: &mut dyn Toolkit,
        descriptor: &NodeDescriptor,
        target: Option<WidgetId>,
    ) -> Result<ElementHandle, BuildError> {
        let root = self.build_node(toolkit, descriptor, target)?;
        tracing::debug!(
            root = %descriptor.id,
            nodes = descriptor.node_count(),
            bindings = self.registry.len(),
            "tree built"
        );
        Ok(root)
    }

    /// Build a whole description and return the bindings it produced.
    pub fn process_configuration(
        &mut self,
        toolkit: &mut dyn Toolkit,
        descriptor: &NodeDescriptor,
    ) -> Result<BindingRegistry, BuildError> {
        self.build(toolkit, descriptor)?;
        Ok(self.registry.clone())
    }

    fn build_node(
        &mut self,
        toolkit: &mut dyn Toolkit,
        descriptor: &NodeDescriptor,
        target: Option<WidgetId>,
    ) -> Result<ElementHandle, BuildError> {
        let shallow = descriptor.without_children();
        let constructor = self.resolver.resolve(&shallow)?;
        let handle = self.resolver.finalize(&constructor, shallow)?;
        tracing::debug!(
            node = %descriptor.id,
            element = constructor.name(),
            children = descriptor.children.len(),
            "building node"
        );

        let widget = {
            let mut element = handle.borrow_mut();
            let mut cx = BuildContext::new(toolkit, &self.config);
            element.build(&mut cx, target)?;
            element.widget()
        };

        if let Some(name) = &descriptor.binding_name {
            self.registry
                .bind(name, Rc::clone(&handle), self.config.binding_policy)?;
        }

        for child in &descriptor.children {
            self.build_node(toolkit, child, widget)?;
        }

        {
            let mut element = handle.borrow_mut();
            let mut cx = BuildContext::new(toolkit, &self.config);
            element.post_subtree(&mut cx, &descriptor.children, &self.registry)?;
        }
        Ok(handle)
    }
}

impl std::fmt::Debug for TreeBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeBuilder")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BindingPolicy;
    use crate::element::{Element, RegisterElement};
    use crate::resolve::{ElementConstructor, KindTable};
    use crate::testing::{HeadlessToolkit, ToolkitEvent};
    use crate::value::{kwargs, Value};
    use pretty_assertions::assert_eq;

    fn frame(id: &str) -> NodeDescriptor {
        NodeDescriptor::new(id).with_widget_type("Frame").with_attach_strategy("pack")
    }

    #[test]
    fn children_are_built_inside_their_parent() {
        let mut tk = HeadlessToolkit::new();
        let tree = frame("outer").with_child(frame("inner").with_child(
            NodeDescriptor::new("label").with_widget_type("Label").with_attach_strategy("pack"),
        ));
        let root = TreeBuilder::new(BuilderConfig::default()).build(&mut tk, &tree).unwrap();

        let outer = root.borrow().widget().unwrap();
        assert_eq!(tk.parent(outer), None);
        let inner = tk.children(outer)[0];
        let label = tk.children(inner)[0];
        assert_eq!(tk.get(inner).unwrap().widget_type, "Frame");
        assert_eq!(tk.get(label).unwrap().widget_type, "Label");
    }

    #[test]
    fn pre_order_build_post_order_hooks() {
        let mut tk = HeadlessToolkit::new();
        let hook = |id: &str| {
            frame(id)
                .with_constructor_arg("name", id)
                .with_post_hook("configure", Value::Map(kwargs([("relief", "flat")])))
        };
        let tree = hook("a").with_child(hook("b").with_child(hook("c"))).with_child(hook("d"));
        TreeBuilder::new(BuilderConfig::default()).build(&mut tk, &tree).unwrap();

        let name = |widget: WidgetId| {
            tk.get(widget).unwrap().constructor_args["name"].as_str().unwrap().to_owned()
        };
        let order: Vec<String> = tk
            .history()
            .iter()
            .filter_map(|event| match event {
                ToolkitEvent::Constructed { widget, .. } => Some(format!("build {}", name(*widget))),
                ToolkitEvent::Invoked { widget, method } if method == "configure" => {
                    Some(format!("hook {}", name(*widget)))
                }
                _ => None,
            })
            .collect();
        assert_eq!(
            order,
            vec!["build a", "build b", "build c", "hook c", "hook b", "build d", "hook d", "hook a"]
        );
    }

    #[test]
    fn bindings_are_collected() {
        let mut tk = HeadlessToolkit::new();
        let tree = frame("main")
            .with_binding("main")
            .with_child(frame("side").with_binding("side"))
            .with_child(frame("unbound"));
        let registry = TreeBuilder::new(BuilderConfig::default())
            .process_configuration(&mut tk, &tree)
            .unwrap();
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["main", "side"]);
        let side = registry.widget("side").unwrap();
        assert_eq!(tk.parent(side), registry.widget("main"));
    }

    #[test]
    fn duplicate_binding_policy() {
        let tree = frame("p")
            .with_child(frame("first").with_binding("pane"))
            .with_child(frame("second").with_binding("pane"));

        let mut tk = HeadlessToolkit::new();
        let err = TreeBuilder::new(BuilderConfig::default())
            .build(&mut tk, &tree)
            .unwrap_err();
        assert!(matches!(err, BuildError::Configuration { ref id, .. } if id == "second"));

        let mut tk = HeadlessToolkit::new();
        let config = BuilderConfig::default().with_binding_policy(BindingPolicy::Overwrite);
        let mut builder = TreeBuilder::new(config);
        builder.build(&mut tk, &tree).unwrap();
        assert_eq!(builder.registry().get_attribute("pane").unwrap().borrow().id(), "second");
    }

    #[test]
    fn error_aborts_remaining_siblings() {
        let mut tk = HeadlessToolkit::new();
        let tree = frame("p")
            .with_child(NodeDescriptor::new("broken").with_widget_type("Hologram"))
            .with_child(frame("never"));
        let err = TreeBuilder::new(BuilderConfig::default())
            .build(&mut tk, &tree)
            .unwrap_err();
        assert_eq!(err.node_id(), Some("broken"));
        assert_eq!(tk.query_by_type("Frame").len(), 1);
    }

    #[test]
    fn register_pages_become_tabs() {
        let mut tk = HeadlessToolkit::new();
        let tree = NodeDescriptor::new("tabs")
            .with_kind("RegisterElement")
            .with_attach_strategy("pack")
            .with_child(frame("General").with_binding("general"))
            .with_child(frame("Advanced").with_binding("advanced"));
        let root = TreeBuilder::new(BuilderConfig::default()).build(&mut tk, &tree).unwrap();

        let element = root.borrow();
        let register = element.downcast_ref::<RegisterElement>().unwrap();
        assert_eq!(register.tabs(), ["General", "Advanced"]);
        let record = tk.get(register.widget().unwrap()).unwrap();
        assert_eq!(record.widget_type, "Notebook");
        assert_eq!(record.tabs.len(), 2);
        assert_eq!(record.tabs[0].text, "General");
    }

    #[test]
    fn register_with_unbound_child_adds_no_tab() {
        let mut tk = HeadlessToolkit::new();
        let tree = NodeDescriptor::new("tabs")
            .with_kind("RegisterElement")
            .with_child(frame("bound").with_binding("bound"))
            .with_child(frame("loose"));
        let err = TreeBuilder::new(BuilderConfig::default())
            .build(&mut tk, &tree)
            .unwrap_err();
        assert!(matches!(err, BuildError::Configuration { ref id, .. } if id == "loose"));
        let notebook = tk.query_by_type("Notebook")[0];
        assert!(tk.get(notebook).unwrap().tabs.is_empty());
    }

    #[test]
    fn build_in_existing_widget() {
        let mut tk = HeadlessToolkit::new();
        let host = tk.construct("Frame", None, &Default::default()).unwrap();
        let mut builder = TreeBuilder::new(BuilderConfig::default());
        let handle = builder.build_in(&mut tk, &frame("child"), Some(host)).unwrap();
        assert_eq!(tk.parent(handle.borrow().widget().unwrap()), Some(host));
    }

    #[test]
    fn custom_resolver_is_used() {
        let mut tk = HeadlessToolkit::new();
        let resolver = DefaultResolver::new(KindTable::strict().with("Pane", ElementConstructor::generic()));
        let mut builder = TreeBuilder::with_resolver(resolver, BuilderConfig::default());

        builder.build(&mut tk, &frame("ok").with_kind("Pane")).unwrap();
        let err = builder.build(&mut tk, &frame("plain")).unwrap_err();
        assert!(matches!(err, BuildError::Resolution { .. }));
    }
}
