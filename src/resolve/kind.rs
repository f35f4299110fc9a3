//! Element kinds: the closed set of built-in kind tags plus custom ones.

use std::fmt;

use crate::descriptor::NodeDescriptor;

/// A node's kind tag, parsed.
///
/// Built-in tags map to the element family shipped with the crate; any other
/// tag is kept as [`ElementKind::Custom`] so resolvers can be extended without
/// touching this enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// `root`: the top-level window.
    Root,
    /// `ListBox`: a collection of label rows.
    ListBox,
    /// `ListBoxTables`: a collection of label rows used for table listings.
    ListBoxTables,
    /// `ListBoxCheckboxes`: a collection of checkbox rows.
    ListBoxCheckboxes,
    /// `Button`: a push button with a settable command.
    Button,
    /// `CheckBox`: a stand-alone checkbox.
    CheckBox,
    /// `RegisterElement`: a tabbed register whose children become tabs.
    Register,
    Custom(String),
}

impl ElementKind {
    /// Parse a kind tag. Never fails: unknown tags become `Custom`.
    pub fn parse(tag: &str) -> Self {
        match tag {
            "root" => ElementKind::Root,
            "ListBox" => ElementKind::ListBox,
            "ListBoxTables" => ElementKind::ListBoxTables,
            "ListBoxCheckboxes" => ElementKind::ListBoxCheckboxes,
            "Button" => ElementKind::Button,
            "CheckBox" => ElementKind::CheckBox,
            "RegisterElement" => ElementKind::Register,
            other => ElementKind::Custom(other.to_owned()),
        }
    }

    /// The kind declared by a descriptor, if any.
    pub fn of(descriptor: &NodeDescriptor) -> Option<Self> {
        descriptor.kind.as_deref().map(ElementKind::parse)
    }

    /// The tag as written in node descriptions.
    pub fn as_str(&self) -> &str {
        match self {
            ElementKind::Root => "root",
            ElementKind::ListBox => "ListBox",
            ElementKind::ListBoxTables => "ListBoxTables",
            ElementKind::ListBoxCheckboxes => "ListBoxCheckboxes",
            ElementKind::Button => "Button",
            ElementKind::CheckBox => "CheckBox",
            ElementKind::Register => "RegisterElement",
            ElementKind::Custom(tag) => tag,
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(
            self,
            ElementKind::ListBox | ElementKind::ListBoxTables | ElementKind::ListBoxCheckboxes
        )
    }
}

impl From<&str> for ElementKind {
    fn from(tag: &str) -> Self {
        ElementKind::parse(tag)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
