//! Generic element: the default for nodes without a kind.

use std::any::Any;

use super::traits::{Element, ElementCore};
use crate::descriptor::NodeDescriptor;

/// Builds any toolkit widget through the generic path; no extra behavior.
#[derive(Debug, Clone)]
pub struct GenericElement {
    core: ElementCore,
}

impl GenericElement {
    pub fn new(descriptor: NodeDescriptor) -> Self {
        Self {
            core: ElementCore::new(descriptor),
        }
    }
}

impl Element for GenericElement {
    fn core(&self) -> &ElementCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut ElementCore {
        &mut self.core
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
