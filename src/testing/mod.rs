//! Headless testing support: an in-memory toolkit and snapshot helpers.
//!
//! Use the [`HeadlessToolkit`] to build descriptor trees without a windowing
//! system and inspect every widget afterwards. Use [`tree_to_string`] to
//! capture the resulting widget tree as plain text for snapshot assertions.

pub mod catalog;
pub mod headless;
pub mod query;
pub mod snapshot;

pub use catalog::WidgetClass;
pub use headless::{Attachment, HeadlessToolkit, Tab, ToolkitEvent, WidgetRecord};
pub use snapshot::{subtree_to_string, tree_to_string};
