//! Binding registry: named access to elements after a build.

use indexmap::IndexMap;

use crate::config::BindingPolicy;
use crate::element::{Element, ElementHandle};
use crate::error::BuildError;
use crate::toolkit::WidgetId;

/// Insertion-ordered `binding name → element` map.
///
/// Populated while a tree builds; application code reads it afterwards to
/// reach the elements it declared a `binding_name` for.
#[derive(Clone, Default)]
pub struct BindingRegistry {
    entries: IndexMap<String, ElementHandle>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The element bound under `name`.
    pub fn get_attribute(&self, name: &str) -> Option<ElementHandle> {
        self.entries.get(name).cloned()
    }

    /// Copy `bindings` in, replacing entries with the same name.
    pub fn add_attribute(&mut self, bindings: impl IntoIterator<Item = (String, ElementHandle)>) {
        self.entries.extend(bindings);
    }

    /// Bind `element` under `name`, following `policy` on collisions.
    pub fn bind(
        &mut self,
        name: &str,
        element: ElementHandle,
        policy: BindingPolicy,
    ) -> Result<(), BuildError> {
        if let Some(existing) = self.entries.get(name) {
            let previous = existing.borrow().id().to_owned();
            let id = element.borrow().id().to_owned();
            match policy {
                BindingPolicy::Reject => {
                    return Err(BuildError::configuration(
                        id,
                        format!("binding `{name}` is already taken by node `{previous}`"),
                    ));
                }
                BindingPolicy::Overwrite => {
                    tracing::warn!(binding = name, previous = %previous, node = %id, "binding overwritten");
                }
            }
        }
        self.entries.insert(name.to_owned(), element);
        Ok(())
    }

    /// Widget of the element bound under `name`, if bound and built.
    pub fn widget(&self, name: &str) -> Option<WidgetId> {
        self.entries.get(name).and_then(|handle| handle.borrow().widget())
    }

    /// Run `f` on the element bound under `name` as a concrete type.
    ///
    /// Returns `None` when the name is unbound or the element is not a `T`.
    pub fn with<T: Element, R>(&self, name: &str, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        let handle = self.entries.get(name)?;
        let mut element = handle.borrow_mut();
        element.downcast_mut::<T>().map(f)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ElementHandle)> {
        self.entries.iter().map(|(name, handle)| (name.as_str(), handle))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl std::fmt::Debug for BindingRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_map()
            .entries(
                self.entries
                    .iter()
                    .map(|(name, handle)| (name, handle.borrow().id().to_owned())),
            )
            .finish()
    }
}

impl IntoIterator for BindingRegistry {
    type Item = (String, ElementHandle);
    type IntoIter = indexmap::map::IntoIter<String, ElementHandle>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
