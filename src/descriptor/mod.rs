//! Node descriptors: the declarative schema consumed by the tree builder.

pub mod node;
pub mod sequence;

pub use node::NodeDescriptor;
pub use sequence::{apply_calls, ConfigSequence};
