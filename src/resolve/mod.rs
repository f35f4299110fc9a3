//! Resolution: from a node's kind tag to the element that builds it.

pub mod kind;
pub mod factory;

pub use kind::ElementKind;
pub use factory::{DefaultResolver, ElementConstructor, KindTable, Resolver};
