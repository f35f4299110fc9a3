//! Node descriptors: the declarative description of one widget and its subtree.

use serde::{Deserialize, Deserializer};

use super::sequence::{deserialize_calls, ConfigSequence};
use crate::error::SchemaError;
use crate::toolkit::MethodCall;
use crate::value::{Kwargs, Value};

// ---------------------------------------------------------------------------
// NodeDescriptor
// ---------------------------------------------------------------------------

/// Declarative description of one widget and its children.
///
/// Descriptors are plain data. Every direct child inherits the parent's
/// `children_attach_strategy` as its own `attach_strategy` unless it declares
/// one itself; this happens once, when the tree is constructed (by
/// deserialization or by [`with_child`](Self::with_child)).
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "RawNode")]
pub struct NodeDescriptor {
    /// Identifier, unique within its enclosing scope.
    pub id: String,
    /// Element kind tag. `None` selects the generic element.
    pub kind: Option<String>,
    /// Toolkit primitive to instantiate (`Frame`, `Label`, ...).
    pub widget_type: Option<String>,
    /// How this node attaches to its parent's layout (`pack`, `grid`, `place`).
    pub attach_strategy: Option<String>,
    /// Attach strategy forced onto direct children that declare none.
    pub children_attach_strategy: Option<String>,
    /// Keyword arguments for widget construction.
    pub constructor_args: Kwargs,
    /// Attributes assigned directly after construction.
    pub post_construction_attributes: Kwargs,
    /// Keyword arguments for the attach call. Empty means a bare call.
    pub attach_args: Kwargs,
    /// Method calls applied after attachment.
    pub configuration_sequence: Option<ConfigSequence>,
    /// Method calls applied once the whole subtree is built.
    pub post_subtree_hook: Vec<MethodCall>,
    /// Register the built element under this name.
    pub binding_name: Option<String>,
    /// Child nodes, in order.
    pub children: Vec<NodeDescriptor>,
}

impl NodeDescriptor {
    /// Create a descriptor with the given id and no other settings.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Load a descriptor tree from an already-parsed mapping.
    pub fn from_raw(raw: serde_json::Value) -> Result<Self, SchemaError> {
        Ok(serde_json::from_value(raw)?)
    }

    /// Set the kind tag (builder).
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Set the toolkit widget type (builder).
    pub fn with_widget_type(mut self, widget_type: impl Into<String>) -> Self {
        self.widget_type = Some(widget_type.into());
        self
    }

    /// Set the attach strategy (builder). Overrides any inherited value.
    pub fn with_attach_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.attach_strategy = Some(strategy.into());
        self
    }

    /// Set the strategy for children (builder).
    ///
    /// Children already added without their own strategy pick it up too.
    pub fn with_children_attach_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.children_attach_strategy = Some(strategy.into());
        self.propagate_attach_strategy();
        self
    }

    /// Add a constructor keyword argument (builder).
    pub fn with_constructor_arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.constructor_args.insert(name.into(), value.into());
        self
    }

    /// Add a post-construction attribute (builder).
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.post_construction_attributes
            .insert(name.into(), value.into());
        self
    }

    /// Add an attach-call keyword argument (builder).
    pub fn with_attach_arg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attach_args.insert(name.into(), value.into());
        self
    }

    /// Append a configuration sequence item (builder).
    pub fn with_sequence(mut self, item: ConfigSequence) -> Self {
        self.configuration_sequence = Some(match self.configuration_sequence.take() {
            None => item,
            Some(ConfigSequence::Nested(mut items)) => {
                items.push(item);
                ConfigSequence::Nested(items)
            }
            Some(existing) => ConfigSequence::Nested(vec![existing, item]),
        });
        self
    }

    /// Append a post-subtree hook call (builder).
    pub fn with_post_hook(mut self, method: impl Into<String>, value: impl Into<Value>) -> Self {
        self.post_subtree_hook
            .push(MethodCall::shaped(method, value.into()));
        self
    }

    /// Set the binding name (builder).
    pub fn with_binding(mut self, name: impl Into<String>) -> Self {
        self.binding_name = Some(name.into());
        self
    }

    /// Append a child (builder), applying the inherited attach strategy.
    pub fn with_child(mut self, mut child: NodeDescriptor) -> Self {
        if child.attach_strategy.is_none() {
            child.attach_strategy = self.children_attach_strategy.clone();
        }
        self.children.push(child);
        self
    }

    /// A copy of this node without its children, as kept by an element.
    pub fn without_children(&self) -> NodeDescriptor {
        NodeDescriptor {
            id: self.id.clone(),
            kind: self.kind.clone(),
            widget_type: self.widget_type.clone(),
            attach_strategy: self.attach_strategy.clone(),
            children_attach_strategy: self.children_attach_strategy.clone(),
            constructor_args: self.constructor_args.clone(),
            post_construction_attributes: self.post_construction_attributes.clone(),
            attach_args: self.attach_args.clone(),
            configuration_sequence: self.configuration_sequence.clone(),
            post_subtree_hook: self.post_subtree_hook.clone(),
            binding_name: self.binding_name.clone(),
            children: Vec::new(),
        }
    }

    /// Depth-first search for a descendant (or self) by id.
    pub fn find(&self, id: &str) -> Option<&NodeDescriptor> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Number of nodes in this subtree, self included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(NodeDescriptor::node_count)
            .sum::<usize>()
    }

    fn propagate_attach_strategy(&mut self) {
        let Some(strategy) = self.children_attach_strategy.as_ref() else {
            return;
        };
        for child in &mut self.children {
            if child.attach_strategy.is_none() {
                child.attach_strategy = Some(strategy.clone());
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// Wire shape of a descriptor. Legacy key names are accepted as aliases.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RawNode {
    id: String,
    #[serde(default, alias = "class_ui")]
    kind: Option<String>,
    #[serde(default, alias = "module")]
    widget_type: Option<String>,
    #[serde(default, alias = "loader")]
    attach_strategy: Option<String>,
    #[serde(default, alias = "children_loader")]
    children_attach_strategy: Option<String>,
    #[serde(default, alias = "arguments", deserialize_with = "nullable")]
    constructor_args: Kwargs,
    #[serde(default, alias = "attributes", deserialize_with = "nullable")]
    post_construction_attributes: Kwargs,
    #[serde(default, alias = "loader_arguments", deserialize_with = "nullable")]
    attach_args: Kwargs,
    #[serde(default, alias = "sequence_methods")]
    configuration_sequence: Option<ConfigSequence>,
    #[serde(default, alias = "post_hook", deserialize_with = "deserialize_calls")]
    post_subtree_hook: Vec<MethodCall>,
    #[serde(default, alias = "bind_to")]
    binding_name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    children: Vec<NodeDescriptor>,
}

impl From<RawNode> for NodeDescriptor {
    fn from(raw: RawNode) -> Self {
        let mut node = NodeDescriptor {
            id: raw.id,
            kind: raw.kind,
            widget_type: raw.widget_type,
            attach_strategy: raw.attach_strategy,
            children_attach_strategy: raw.children_attach_strategy,
            constructor_args: raw.constructor_args,
            post_construction_attributes: raw.post_construction_attributes,
            attach_args: raw.attach_args,
            configuration_sequence: raw.configuration_sequence,
            post_subtree_hook: raw.post_subtree_hook,
            binding_name: raw.binding_name,
            children: raw.children,
        };
        node.propagate_attach_strategy();
        node
    }
}

/// Treat an explicit `null` like an absent key.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn minimal_node() {
        let node = NodeDescriptor::from_raw(json!({"id": "root"})).unwrap();
        assert_eq!(node, NodeDescriptor::new("root"));
    }

    #[test]
    fn children_inherit_attach_strategy() {
        let node = NodeDescriptor::from_raw(json!({
            "id": "root",
            "children_attach_strategy": "grid",
            "children": [
                {"id": "a", "widget_type": "Label"},
                {"id": "b", "widget_type": "Label", "attach_strategy": "place"}
            ]
        }))
        .unwrap();
        assert_eq!(node.children[0].attach_strategy.as_deref(), Some("grid"));
        assert_eq!(node.children[1].attach_strategy.as_deref(), Some("place"));
    }

    #[test]
    fn propagation_is_one_level_only() {
        let node = NodeDescriptor::from_raw(json!({
            "id": "root",
            "children_attach_strategy": "pack",
            "children": [{"id": "a", "children": [{"id": "b"}]}]
        }))
        .unwrap();
        assert_eq!(node.children[0].attach_strategy.as_deref(), Some("pack"));
        assert_eq!(node.children[0].children[0].attach_strategy, None);
    }

    #[test]
    fn legacy_keys_are_accepted() {
        let node = NodeDescriptor::from_raw(json!({
            "id": "root",
            "module": "Frame",
            "class_ui": "ListBox",
            "loader": "pack",
            "children_loader": "grid",
            "arguments": {"bg": "white"},
            "attributes": {"name": "x"},
            "loader_arguments": {"fill": "x"},
            "sequence_methods": {"configure": {"bd": 1}},
            "post_hook": {"update": []},
            "bind_to": "main",
            "children": [{"id": "c"}]
        }))
        .unwrap();
        assert_eq!(node.widget_type.as_deref(), Some("Frame"));
        assert_eq!(node.kind.as_deref(), Some("ListBox"));
        assert_eq!(node.attach_strategy.as_deref(), Some("pack"));
        assert_eq!(node.constructor_args["bg"], Value::from("white"));
        assert_eq!(node.post_construction_attributes["name"], Value::from("x"));
        assert_eq!(node.attach_args["fill"], Value::from("x"));
        assert_eq!(node.post_subtree_hook[0].method, "update");
        assert_eq!(node.binding_name.as_deref(), Some("main"));
        assert_eq!(node.children[0].attach_strategy.as_deref(), Some("grid"));
    }

    #[test]
    fn nulls_are_absent() {
        let node = NodeDescriptor::from_raw(json!({
            "id": "root",
            "arguments": null,
            "children": null,
            "post_hook": null,
            "bind_to": null
        }))
        .unwrap();
        assert!(node.constructor_args.is_empty());
        assert!(node.children.is_empty());
        assert!(node.post_subtree_hook.is_empty());
        assert!(node.binding_name.is_none());
    }

    #[test]
    fn unknown_key_is_schema_error() {
        let err = NodeDescriptor::from_raw(json!({"id": "root", "colour": "red"})).unwrap_err();
        assert!(matches!(err, SchemaError::Malformed(_)));
        assert!(err.to_string().contains("colour"));
    }

    #[test]
    fn unknown_key_in_child_is_schema_error() {
        let err = NodeDescriptor::from_raw(json!({
            "id": "root",
            "children": [{"id": "a", "bogus": 1}]
        }));
        assert!(err.is_err());
    }

    #[test]
    fn attachment_target_is_not_authored() {
        assert!(NodeDescriptor::from_raw(json!({"id": "r", "master": "x"})).is_err());
        assert!(NodeDescriptor::from_raw(json!({"id": "r", "attachment_target": "x"})).is_err());
    }

    #[test]
    fn non_mapping_child_is_schema_error() {
        let err = NodeDescriptor::from_raw(json!({"id": "root", "children": ["label"]}));
        assert!(err.is_err());
    }

    #[test]
    fn missing_id_is_schema_error() {
        assert!(NodeDescriptor::from_raw(json!({"widget_type": "Frame"})).is_err());
    }

    #[test]
    fn bad_sequence_item_is_schema_error() {
        let err = NodeDescriptor::from_raw(json!({
            "id": "root",
            "configuration_sequence": [42]
        }))
        .unwrap_err();
        assert!(err.to_string().contains("mappings or lists"));
    }

    #[test]
    fn builder_propagates_on_with_child() {
        let node = NodeDescriptor::new("root")
            .with_children_attach_strategy("pack")
            .with_child(NodeDescriptor::new("a"))
            .with_child(NodeDescriptor::new("b").with_attach_strategy("grid"));
        assert_eq!(node.children[0].attach_strategy.as_deref(), Some("pack"));
        assert_eq!(node.children[1].attach_strategy.as_deref(), Some("grid"));
    }

    #[test]
    fn builder_propagates_to_existing_children() {
        let node = NodeDescriptor::new("root")
            .with_child(NodeDescriptor::new("a"))
            .with_children_attach_strategy("place");
        assert_eq!(node.children[0].attach_strategy.as_deref(), Some("place"));
    }

    #[test]
    fn with_sequence_appends() {
        let node = NodeDescriptor::new("w")
            .with_sequence(ConfigSequence::steps([("a", 1)]))
            .with_sequence(ConfigSequence::steps([("b", 2)]))
            .with_sequence(ConfigSequence::steps([("c", 3)]));
        let names: Vec<_> = node
            .configuration_sequence
            .as_ref()
            .unwrap()
            .calls()
            .iter()
            .map(|c| c.method.clone())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn without_children_keeps_everything_else() {
        let node = NodeDescriptor::new("root")
            .with_widget_type("Frame")
            .with_binding("main")
            .with_child(NodeDescriptor::new("a"));
        let shallow = node.without_children();
        assert!(shallow.children.is_empty());
        assert_eq!(shallow.widget_type.as_deref(), Some("Frame"));
        assert_eq!(shallow.binding_name.as_deref(), Some("main"));
    }

    #[test]
    fn find_and_count() {
        let node = NodeDescriptor::new("root")
            .with_child(NodeDescriptor::new("a").with_child(NodeDescriptor::new("deep")))
            .with_child(NodeDescriptor::new("b"));
        assert_eq!(node.node_count(), 4);
        assert_eq!(node.find("deep").map(|n| n.id.as_str()), Some("deep"));
        assert!(node.find("missing").is_none());
    }
}
