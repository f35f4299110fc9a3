//! Kind tables and the resolver trait.
//!
//! A [`KindTable`] maps [`ElementKind`]s to element constructors and decides
//! what happens to kinds it does not know: fall back to a constructor, or
//! fail with a resolution error. [`Resolver`] wraps a table behind two hooks,
//! `resolve` and `finalize`, so the latter can be overridden on its own.

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use super::kind::ElementKind;
use crate::descriptor::NodeDescriptor;
use crate::element::{
    into_handle, ButtonElement, CheckBoxElement, CollectionElement, ElementHandle,
    GenericElement, RegisterElement, WindowElement,
};
use crate::error::BuildError;

// ---------------------------------------------------------------------------
// ElementConstructor
// ---------------------------------------------------------------------------

/// A named function turning a shallow descriptor into an element.
#[derive(Clone)]
pub struct ElementConstructor {
    name: String,
    construct: Rc<dyn Fn(NodeDescriptor) -> ElementHandle>,
}

impl ElementConstructor {
    pub fn new(name: impl Into<String>, construct: impl Fn(NodeDescriptor) -> ElementHandle + 'static) -> Self {
        Self {
            name: name.into(),
            construct: Rc::new(construct),
        }
    }

    /// The generic element, used for nodes without a (known) kind.
    pub fn generic() -> Self {
        Self::new("generic", |d| into_handle(GenericElement::new(d)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn construct(&self, descriptor: NodeDescriptor) -> ElementHandle {
        (self.construct)(descriptor)
    }
}

impl fmt::Debug for ElementConstructor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ElementConstructor").field(&self.name).finish()
    }
}

// ---------------------------------------------------------------------------
// KindTable
// ---------------------------------------------------------------------------

/// Kind → constructor table with an optional fallback.
#[derive(Debug, Clone, Default)]
pub struct KindTable {
    entries: IndexMap<ElementKind, ElementConstructor>,
    fallback: Option<ElementConstructor>,
}

impl KindTable {
    /// A table that must map every kind; unmapped kinds fail to resolve.
    pub fn strict() -> Self {
        Self::default()
    }

    /// An empty table that resolves everything to `fallback`.
    pub fn with_fallback(fallback: ElementConstructor) -> Self {
        Self {
            entries: IndexMap::new(),
            fallback: Some(fallback),
        }
    }

    /// The built-in element family, falling back to the generic element.
    pub fn standard() -> Self {
        let mut table = Self::with_fallback(ElementConstructor::generic());
        table.register(
            ElementKind::Root,
            ElementConstructor::new("window", |d| into_handle(WindowElement::new(d))),
        );
        for kind in [
            ElementKind::ListBox,
            ElementKind::ListBoxTables,
            ElementKind::ListBoxCheckboxes,
        ] {
            table.register(
                kind,
                ElementConstructor::new("collection", |d| into_handle(CollectionElement::new(d))),
            );
        }
        table.register(
            ElementKind::Button,
            ElementConstructor::new("button", |d| into_handle(ButtonElement::new(d))),
        );
        table.register(
            ElementKind::CheckBox,
            ElementConstructor::new("checkbox", |d| into_handle(CheckBoxElement::new(d))),
        );
        table.register(
            ElementKind::Register,
            ElementConstructor::new("register", |d| into_handle(RegisterElement::new(d))),
        );
        table
    }

    /// Map `kind` to `constructor`, replacing an existing mapping.
    pub fn register(&mut self, kind: impl Into<ElementKind>, constructor: ElementConstructor) {
        self.entries.insert(kind.into(), constructor);
    }

    /// Map `kind` to `constructor` (builder).
    pub fn with(mut self, kind: impl Into<ElementKind>, constructor: ElementConstructor) -> Self {
        self.register(kind, constructor);
        self
    }

    pub fn set_fallback(&mut self, fallback: Option<ElementConstructor>) {
        self.fallback = fallback;
    }

    pub fn fallback(&self) -> Option<&ElementConstructor> {
        self.fallback.as_ref()
    }

    pub fn contains(&self, kind: &ElementKind) -> bool {
        self.entries.contains_key(kind)
    }

    /// Look up the constructor for `kind`; `None` means "no kind declared".
    pub fn lookup(&self, kind: Option<&ElementKind>) -> Result<ElementConstructor, BuildError> {
        kind.and_then(|k| self.entries.get(k))
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| BuildError::Resolution {
                scope: "element",
                kind: kind.map_or_else(|| "<none>".to_owned(), ToString::to_string),
            })
    }
}

// ---------------------------------------------------------------------------
// Resolver
// ---------------------------------------------------------------------------

/// Maps a node descriptor to the element that will build it.
pub trait Resolver {
    /// Pick the constructor for `descriptor`'s kind.
    fn resolve(&self, descriptor: &NodeDescriptor) -> Result<ElementConstructor, BuildError>;

    /// Turn the resolved constructor into an element.
    ///
    /// Override to wrap or post-process elements without redeclaring the
    /// kind table.
    fn finalize(
        &self,
        constructor: &ElementConstructor,
        descriptor: NodeDescriptor,
    ) -> Result<ElementHandle, BuildError> {
        Ok(constructor.construct(descriptor))
    }
}

/// Resolver backed by a [`KindTable`].
#[derive(Debug, Clone)]
pub struct DefaultResolver {
    table: KindTable,
}

impl DefaultResolver {
    pub fn new(table: KindTable) -> Self {
        Self { table }
    }

    /// The standard table: built-in elements, generic fallback.
    pub fn standard() -> Self {
        Self::new(KindTable::standard())
    }

    pub fn table(&self) -> &KindTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut KindTable {
        &mut self.table
    }

    /// Extend the table (builder).
    pub fn with(mut self, kind: impl Into<ElementKind>, constructor: ElementConstructor) -> Self {
        self.table.register(kind, constructor);
        self
    }
}

impl Default for DefaultResolver {
    fn default() -> Self {
        Self::standard()
    }
}

impl Resolver for DefaultResolver {
    fn resolve(&self, descriptor: &NodeDescriptor) -> Result<ElementConstructor, BuildError> {
        let kind = ElementKind::of(descriptor);
        let constructor = self.table.lookup(kind.as_ref())?;
        tracing::trace!(node = %descriptor.id, constructor = constructor.name(), "resolved");
        Ok(constructor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::Element;
    use std::cell::Cell;

    fn resolve(resolver: &dyn Resolver, descriptor: NodeDescriptor) -> ElementHandle {
        let ctor = resolver.resolve(&descriptor).unwrap();
        resolver.finalize(&ctor, descriptor).unwrap()
    }

    #[test]
    fn builtin_kinds() {
        let resolver = DefaultResolver::standard();
        let cases: [(&str, &str); 7] = [
            ("root", "window"),
            ("ListBox", "collection"),
            ("ListBoxTables", "collection"),
            ("ListBoxCheckboxes", "collection"),
            ("Button", "button"),
            ("CheckBox", "checkbox"),
            ("RegisterElement", "register"),
        ];
        for (tag, name) in cases {
            let ctor = resolver.resolve(&NodeDescriptor::new("n").with_kind(tag)).unwrap();
            assert_eq!(ctor.name(), name, "kind {tag}");
        }
    }

    #[test]
    fn concrete_types() {
        let resolver = DefaultResolver::standard();
        let handle = resolve(&resolver, NodeDescriptor::new("r").with_kind("RegisterElement"));
        assert!(handle.borrow().is::<RegisterElement>());
        let handle = resolve(&resolver, NodeDescriptor::new("l").with_kind("ListBoxCheckboxes"));
        assert!(handle.borrow().is::<CollectionElement>());
    }

    #[test]
    fn missing_or_unknown_kind_is_generic() {
        let resolver = DefaultResolver::standard();
        let handle = resolve(&resolver, NodeDescriptor::new("plain"));
        assert!(handle.borrow().is::<GenericElement>());
        let handle = resolve(&resolver, NodeDescriptor::new("odd").with_kind("Sparkline"));
        assert!(handle.borrow().is::<GenericElement>());
        assert_eq!(handle.borrow().id(), "odd");
    }

    #[test]
    fn strict_table_rejects_unknown_kinds() {
        let resolver = DefaultResolver::new(KindTable::strict().with("Button", ElementConstructor::generic()));
        let err = resolver
            .resolve(&NodeDescriptor::new("x").with_kind("Gauge"))
            .unwrap_err();
        assert!(matches!(err, BuildError::Resolution { scope: "element", ref kind } if kind == "Gauge"));
        let err = resolver.resolve(&NodeDescriptor::new("x")).unwrap_err();
        assert_eq!(err.to_string(), "no element registered for kind `<none>`");
    }

    #[test]
    fn register_extends_standard_table() {
        let resolver = DefaultResolver::standard().with(
            "Gauge",
            ElementConstructor::new("gauge", |d| into_handle(ButtonElement::new(d))),
        );
        assert!(resolver.table().contains(&ElementKind::Custom("Gauge".into())));
        let handle = resolve(&resolver, NodeDescriptor::new("g").with_kind("Gauge"));
        assert!(handle.borrow().is::<ButtonElement>());
    }

    #[test]
    fn finalize_is_overridable_alone() {
        struct Counting {
            inner: DefaultResolver,
            finalized: Cell<usize>,
        }
        impl Resolver for Counting {
            fn resolve(&self, descriptor: &NodeDescriptor) -> Result<ElementConstructor, BuildError> {
                self.inner.resolve(descriptor)
            }
            fn finalize(
                &self,
                constructor: &ElementConstructor,
                descriptor: NodeDescriptor,
            ) -> Result<ElementHandle, BuildError> {
                self.finalized.set(self.finalized.get() + 1);
                Ok(constructor.construct(descriptor.with_attribute("finalized", true)))
            }
        }

        let resolver = Counting {
            inner: DefaultResolver::standard(),
            finalized: Cell::new(0),
        };
        let handle = resolve(&resolver, NodeDescriptor::new("b").with_kind("Button"));
        assert_eq!(resolver.finalized.get(), 1);
        assert!(handle.borrow().is::<ButtonElement>());
        assert!(handle
            .borrow()
            .descriptor()
            .post_construction_attributes
            .contains_key("finalized"));
    }
}
