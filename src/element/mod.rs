//! Element system: the trait, lifecycle, and the built-in element family.

pub mod traits;
pub mod lifecycle;
pub mod generic;
pub mod window;
pub mod register;
pub mod controls;
pub mod collection;

pub use traits::{into_handle, BuildContext, Element, ElementCore, ElementHandle};
pub use lifecycle::ElementState;
pub use generic::GenericElement;
pub use window::WindowElement;
pub use register::RegisterElement;
pub use controls::{ButtonElement, CheckBoxElement};
pub use collection::{CollectionElement, CollectionRow, RowResolver, RowSpec, RowStrategy};
