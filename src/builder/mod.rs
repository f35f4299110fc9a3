//! Tree builder and the binding registry it fills.

pub mod registry;
pub mod tree;

pub use registry::BindingRegistry;
pub use tree::TreeBuilder;
