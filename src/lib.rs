//! # blueprint-ui
//!
//! A declarative widget-tree builder: describe a GUI as a tree of node
//! descriptors, and blueprint-ui resolves, constructs, attaches and configures
//! the widgets through a pluggable toolkit, exposing the ones you named.
//!
//! ## Core Systems
//!
//! - **[`value`]**: dynamically shaped argument payloads
//! - **[`descriptor`]**: node descriptors and configuration sequences
//! - **[`toolkit`]**: the capability contract a GUI toolkit implements
//! - **[`element`]**: runtime wrappers around constructed widgets, including
//!   collections with dynamic rows
//! - **[`resolve`]**: kind tags to element constructors
//! - **[`builder`]**: depth-first tree construction and the binding registry
//! - **[`config`]**: defaults injected into the builder
//! - **[`testing`]**: a headless toolkit and snapshot helpers
//!
//! ## Example
//!
//! ```
//! use blueprint_ui::prelude::*;
//! use blueprint_ui::testing::HeadlessToolkit;
//!
//! let tree = NodeDescriptor::new("main")
//!     .with_widget_type("Frame")
//!     .with_children_attach_strategy("pack")
//!     .with_child(
//!         NodeDescriptor::new("label")
//!             .with_widget_type("Label")
//!             .with_constructor_arg("text", "hi")
//!             .with_binding("greeting"),
//!     );
//!
//! let mut toolkit = HeadlessToolkit::new();
//! let mut builder = TreeBuilder::new(BuilderConfig::default());
//! builder.build(&mut toolkit, &tree).unwrap();
//! assert!(builder.registry().get_attribute("greeting").is_some());
//! ```

extern crate self as blueprint_ui;

// Foundation
pub mod error;
pub mod value;

// Schema and contract
pub mod descriptor;
pub mod toolkit;

// Elements and construction
pub mod builder;
pub mod config;
pub mod element;
pub mod resolve;

// Testing support
pub mod testing;

// Proc macros (feature-gated)
#[cfg(feature = "macros")]
pub use blueprint_ui_macros::node;

/// Commonly used types, for glob import.
pub mod prelude {
    pub use crate::builder::{BindingRegistry, TreeBuilder};
    pub use crate::config::{BindingPolicy, BuilderConfig};
    pub use crate::descriptor::{ConfigSequence, NodeDescriptor};
    pub use crate::element::{
        ButtonElement, CheckBoxElement, CollectionElement, Element, ElementHandle,
        RegisterElement,
    };
    pub use crate::error::{BuildError, SchemaError};
    pub use crate::resolve::{DefaultResolver, ElementKind, Resolver};
    pub use crate::toolkit::{Arguments, MethodCall, Toolkit, WidgetId};
    pub use crate::value::{kwargs, Kwargs, Value};
}
