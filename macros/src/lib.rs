//! Proc macros for blueprint-ui: `node!` RSX descriptor authoring.
//!
//! This crate is not meant to be used directly. Enable the `macros` feature on `blueprint-ui`.

use proc_macro::TokenStream;

mod node_macro;

/// RSX-style node descriptor macro.
///
/// Transforms JSX-like syntax into a `NodeDescriptor` builder chain.
///
/// # Syntax
///
/// - `<WidgetType id="..." />`: self-closing node (no children)
/// - `<WidgetType id="..."> ... </WidgetType>`: node with children
///
/// The tag becomes the node's `widget_type`. Exactly one root element is allowed.
///
/// # Attributes
///
/// - `id="value"` (required) becomes `NodeDescriptor::new("value")`
/// - `kind`, `attach`, `children_attach` and `bind` set the node's kind,
///   attach strategy, children attach strategy and binding name
/// - `attach:name=value` becomes an attach argument
/// - `set:name=value` becomes a post-construction attribute
/// - any other `name=value` becomes a constructor argument
///
/// Values are literals or braced expressions (`width={2 * n}`).
///
/// # Example
///
/// ```ignore
/// let tree = node! {
///     <Frame id="main" children_attach="pack" bind="main">
///         <Label id="title" text="Files" attach:side="top" />
///         <Frame id="files" kind="ListBoxCheckboxes" bind="files" />
///     </Frame>
/// };
/// ```
#[proc_macro]
pub fn node(input: TokenStream) -> TokenStream {
    node_macro::node_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
