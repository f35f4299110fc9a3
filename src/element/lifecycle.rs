//! Element lifecycle: created, built, destroyed.

/// Where an element is in its lifecycle.
///
/// An element starts `Created` (no widget), becomes `Built` once its widget
/// is constructed, attached and configured, and ends `Destroyed` after its
/// widget was released. A failed build leaves it `Created`, possibly with a
/// widget already constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementState {
    #[default]
    Created,
    Built,
    Destroyed,
}

impl ElementState {
    pub fn is_built(self) -> bool {
        self == ElementState::Built
    }

    pub fn is_destroyed(self) -> bool {
        self == ElementState::Destroyed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_created() {
        assert_eq!(ElementState::default(), ElementState::Created);
        assert!(!ElementState::Created.is_built());
    }

    #[test]
    fn predicates() {
        assert!(ElementState::Built.is_built());
        assert!(ElementState::Destroyed.is_destroyed());
        assert!(!ElementState::Built.is_destroyed());
    }
}
