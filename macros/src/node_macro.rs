//! RSX node! macro: parse JSX-like syntax and generate NodeDescriptor builder code.

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{braced, Error, Expr, Ident, Lit, LitStr, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// Right-hand side of an attribute: a literal or a braced expression.
#[derive(Clone)]
pub(crate) enum AttrValue {
    Lit(Lit),
    Expr(Expr),
}

impl AttrValue {
    fn to_tokens(&self) -> TokenStream {
        match self {
            AttrValue::Lit(lit) => quote! { #lit },
            AttrValue::Expr(expr) => quote! { #expr },
        }
    }

    /// The value as a string literal, for attributes that only take strings.
    fn as_str_lit(&self, name: &Ident) -> Result<LitStr> {
        match self {
            AttrValue::Lit(Lit::Str(lit)) => Ok(lit.clone()),
            _ => Err(Error::new(
                name.span(),
                format!("`{name}` takes a string literal"),
            )),
        }
    }
}

/// A parsed RSX attribute: `name=value` or `namespace:name=value`.
#[derive(Clone)]
pub(crate) struct Attribute {
    pub namespace: Option<Ident>,
    pub name: Ident,
    pub value: AttrValue,
}

impl std::fmt::Debug for Attribute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Attribute")
            .field("namespace", &self.namespace.as_ref().map(ToString::to_string))
            .field("name", &self.name.to_string())
            .finish_non_exhaustive()
    }
}

/// A parsed RSX element: `<Tag attrs... />` or `<Tag attrs...> children </Tag>`.
#[derive(Clone)]
pub(crate) struct Element {
    pub tag: Ident,
    pub attrs: Vec<Attribute>,
    pub children: Vec<Element>,
    pub self_closing: bool,
}

impl std::fmt::Debug for Element {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag.to_string())
            .field("attrs", &self.attrs)
            .field("children", &self.children)
            .field("self_closing", &self.self_closing)
            .finish()
    }
}

/// The top-level node! input: exactly one root element.
#[derive(Debug)]
struct NodeInput {
    root: Element,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for NodeInput {
    fn parse(input: ParseStream) -> Result<Self> {
        if input.is_empty() {
            return Err(Error::new(
                Span::call_site(),
                "node! macro requires a root element",
            ));
        }
        let root = parse_element(input)?;
        if !input.is_empty() {
            return Err(input.error("node! macro takes exactly one root element"));
        }
        Ok(NodeInput { root })
    }
}

fn parse_value(input: ParseStream) -> Result<AttrValue> {
    if input.peek(syn::token::Brace) {
        let content;
        braced!(content in input);
        Ok(AttrValue::Expr(content.parse()?))
    } else {
        Ok(AttrValue::Lit(input.parse()?))
    }
}

/// Parse a single RSX element from the token stream.
pub(crate) fn parse_element(input: ParseStream) -> Result<Element> {
    input.parse::<Token![<]>()?;
    let tag: Ident = input.parse()?;

    let mut attrs = Vec::new();
    loop {
        if input.peek(Token![/]) {
            input.parse::<Token![/]>()?;
            input.parse::<Token![>]>()?;
            return Ok(Element {
                tag,
                attrs,
                children: Vec::new(),
                self_closing: true,
            });
        }

        if input.peek(Token![>]) {
            input.parse::<Token![>]>()?;
            break;
        }

        // `name = value` or `namespace:name = value`
        let first: Ident = input.call(syn::ext::IdentExt::parse_any)?;
        let (namespace, name) = if input.peek(Token![:]) {
            input.parse::<Token![:]>()?;
            let name: Ident = input.call(syn::ext::IdentExt::parse_any)?;
            (Some(first), name)
        } else {
            (None, first)
        };
        input.parse::<Token![=]>()?;
        let value = parse_value(input)?;
        attrs.push(Attribute {
            namespace,
            name,
            value,
        });
    }

    let mut children = Vec::new();
    loop {
        if input.peek(Token![<]) && input.peek2(Token![/]) {
            input.parse::<Token![<]>()?;
            input.parse::<Token![/]>()?;
            let closing_tag: Ident = input.parse()?;
            if closing_tag != tag {
                return Err(Error::new(
                    closing_tag.span(),
                    format!(
                        "mismatched closing tag: expected `</{}>`, found `</{}>`",
                        tag, closing_tag
                    ),
                ));
            }
            input.parse::<Token![>]>()?;
            break;
        }

        if input.peek(Token![<]) {
            children.push(parse_element(input)?);
        } else {
            return Err(input.error("expected `<` to start a child element or `</` to close the parent"));
        }
    }

    Ok(Element {
        tag,
        attrs,
        children,
        self_closing: false,
    })
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Generate the builder chain for one element and its children.
fn generate_element(elem: &Element) -> Result<TokenStream> {
    let tag = elem.tag.to_string();

    let id = elem
        .attrs
        .iter()
        .find(|a| a.namespace.is_none() && a.name == "id")
        .ok_or_else(|| Error::new(elem.tag.span(), format!("`<{tag}>` is missing an `id` attribute")))?;
    let id = id.value.as_str_lit(&id.name)?;

    let mut builder_calls = vec![quote! { .with_widget_type(#tag) }];

    for attr in &elem.attrs {
        let name = attr.name.to_string();
        let value = attr.value.to_tokens();

        let call = match attr.namespace.as_ref().map(ToString::to_string).as_deref() {
            Some("attach") => quote! { .with_attach_arg(#name, #value) },
            Some("set") => quote! { .with_attribute(#name, #value) },
            Some(other) => {
                return Err(Error::new(
                    attr.name.span(),
                    format!("unknown attribute namespace `{other}` (expected `attach` or `set`)"),
                ));
            }
            None => match name.as_str() {
                "id" => continue,
                "kind" => {
                    let lit = attr.value.as_str_lit(&attr.name)?;
                    quote! { .with_kind(#lit) }
                }
                "attach" => {
                    let lit = attr.value.as_str_lit(&attr.name)?;
                    quote! { .with_attach_strategy(#lit) }
                }
                "children_attach" => {
                    let lit = attr.value.as_str_lit(&attr.name)?;
                    quote! { .with_children_attach_strategy(#lit) }
                }
                "bind" => {
                    let lit = attr.value.as_str_lit(&attr.name)?;
                    quote! { .with_binding(#lit) }
                }
                _ => quote! { .with_constructor_arg(#name, #value) },
            },
        };
        builder_calls.push(call);
    }

    for child in &elem.children {
        let child_code = generate_element(child)?;
        builder_calls.push(quote! { .with_child(#child_code) });
    }

    Ok(quote! {
        blueprint_ui::descriptor::NodeDescriptor::new(#id) #(#builder_calls)*
    })
}

/// Entry point: generate code for the entire node! macro.
pub(crate) fn node_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: NodeInput = syn::parse2(input)?;
    generate_element(&parsed.root)
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn parse_root(tokens: TokenStream) -> Result<Element> {
        syn::parse2::<NodeInput>(tokens).map(|input| input.root)
    }

    // -----------------------------------------------------------------------
    // Parsing tests
    // -----------------------------------------------------------------------

    #[test]
    fn parse_self_closing_element() {
        let elem = parse_root(quote! { <Label id="greeting" text="hi" /> }).unwrap();
        assert_eq!(elem.tag.to_string(), "Label");
        assert!(elem.self_closing);
        assert!(elem.children.is_empty());
        assert_eq!(elem.attrs.len(), 2);
        assert_eq!(elem.attrs[1].name.to_string(), "text");
    }

    #[test]
    fn parse_element_with_children() {
        let elem = parse_root(quote! {
            <Frame id="main">
                <Label id="a" />
                <Button id="b" />
            </Frame>
        })
        .unwrap();
        assert!(!elem.self_closing);
        assert_eq!(elem.children.len(), 2);
        assert_eq!(elem.children[1].tag.to_string(), "Button");
    }

    #[test]
    fn parse_namespaced_and_expression_attributes() {
        let elem = parse_root(quote! {
            <Label id="l" attach:side="left" set:name="x" width={4 * 10} />
        })
        .unwrap();
        assert_eq!(elem.attrs[1].namespace.as_ref().unwrap().to_string(), "attach");
        assert_eq!(elem.attrs[2].namespace.as_ref().unwrap().to_string(), "set");
        assert!(matches!(elem.attrs[3].value, AttrValue::Expr(_)));
    }

    #[test]
    fn parse_error_mismatched_closing_tag() {
        let err = parse_root(quote! {
            <Frame id="f">
                <Label id="x" />
            </Label>
        })
        .unwrap_err();
        assert!(err.to_string().contains("mismatched closing tag"));
    }

    #[test]
    fn parse_error_multiple_roots() {
        let err = parse_root(quote! { <Frame id="a" /> <Frame id="b" /> }).unwrap_err();
        assert!(err.to_string().contains("exactly one root"));
    }

    #[test]
    fn parse_error_empty() {
        let err = parse_root(quote! {}).unwrap_err();
        assert!(err.to_string().contains("requires a root element"));
    }

    // -----------------------------------------------------------------------
    // Code generation tests
    // -----------------------------------------------------------------------

    #[test]
    fn codegen_descriptor_chain() {
        let code = node_impl(quote! { <Label id="greeting" text="hi" bind="greeting" /> })
            .unwrap()
            .to_string();
        assert!(code.contains("NodeDescriptor :: new (\"greeting\")"), "{code}");
        assert!(code.contains("with_widget_type (\"Label\")"), "{code}");
        assert!(code.contains("with_constructor_arg (\"text\" , \"hi\")"), "{code}");
        assert!(code.contains("with_binding (\"greeting\")"), "{code}");
    }

    #[test]
    fn codegen_reserved_attributes() {
        let code = node_impl(quote! {
            <Frame id="f" kind="ListBoxCheckboxes" attach="grid" children_attach="pack" />
        })
        .unwrap()
        .to_string();
        assert!(code.contains("with_kind (\"ListBoxCheckboxes\")"));
        assert!(code.contains("with_attach_strategy (\"grid\")"));
        assert!(code.contains("with_children_attach_strategy (\"pack\")"));
    }

    #[test]
    fn codegen_namespaces() {
        let code = node_impl(quote! { <Label id="l" attach:fill="x" set:name="n" /> })
            .unwrap()
            .to_string();
        assert!(code.contains("with_attach_arg (\"fill\" , \"x\")"));
        assert!(code.contains("with_attribute (\"name\" , \"n\")"));
    }

    #[test]
    fn codegen_children() {
        let code = node_impl(quote! {
            <Frame id="f">
                <Label id="a" />
            </Frame>
        })
        .unwrap()
        .to_string();
        assert!(code.contains("with_child (blueprint_ui :: descriptor :: NodeDescriptor :: new (\"a\")"));
    }

    #[test]
    fn codegen_missing_id_is_error() {
        let err = node_impl(quote! { <Frame /> }).unwrap_err();
        assert!(err.to_string().contains("missing an `id`"));
    }

    #[test]
    fn codegen_non_string_reserved_is_error() {
        let err = node_impl(quote! { <Frame id="f" bind=3 /> }).unwrap_err();
        assert!(err.to_string().contains("`bind` takes a string literal"));
    }

    #[test]
    fn codegen_unknown_namespace_is_error() {
        let err = node_impl(quote! { <Frame id="f" grid:row=0 /> }).unwrap_err();
        assert!(err.to_string().contains("unknown attribute namespace `grid`"));
    }
}
