//! Widget classes known to the headless toolkit.
//!
//! A small tk-like catalogue: each class lists the attach strategies it
//! supports and the methods it answers to. Top-level windows cannot be
//! attached to a layout.

/// Geometry managers for ordinary widgets.
const LAYOUT: &[&str] = &["pack", "grid", "place"];

/// Methods every widget answers to.
const COMMON: &[&str] = &[
    "configure",
    "config",
    "cget",
    "keys",
    "bind",
    "focus_set",
    "update",
    "update_idletasks",
];

/// Static description of one widget class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetClass {
    pub name: &'static str,
    pub attach: &'static [&'static str],
    pub methods: &'static [&'static str],
}

impl WidgetClass {
    pub fn supports_attach(&self, strategy: &str) -> bool {
        self.attach.contains(&strategy)
    }

    pub fn has_method(&self, method: &str) -> bool {
        COMMON.contains(&method) || self.methods.contains(&method)
    }

    /// Whether this class is a top-level window.
    pub fn is_toplevel(&self) -> bool {
        self.attach.is_empty()
    }
}

const WINDOW_METHODS: &[&str] = &[
    "geometry",
    "title",
    "resizable",
    "minsize",
    "maxsize",
    "protocol",
    "attributes",
    "iconbitmap",
    "mainloop",
];

/// The full catalogue.
pub const CATALOG: &[WidgetClass] = &[
    WidgetClass {
        name: "Tk",
        attach: &[],
        methods: WINDOW_METHODS,
    },
    WidgetClass {
        name: "Toplevel",
        attach: &[],
        methods: WINDOW_METHODS,
    },
    WidgetClass {
        name: "Frame",
        attach: LAYOUT,
        methods: &[],
    },
    WidgetClass {
        name: "LabelFrame",
        attach: LAYOUT,
        methods: &[],
    },
    WidgetClass {
        name: "Label",
        attach: LAYOUT,
        methods: &[],
    },
    WidgetClass {
        name: "Button",
        attach: LAYOUT,
        methods: &["invoke", "flash"],
    },
    WidgetClass {
        name: "Checkbutton",
        attach: LAYOUT,
        methods: &["select", "deselect", "toggle", "invoke", "flash"],
    },
    WidgetClass {
        name: "Entry",
        attach: LAYOUT,
        methods: &["insert", "delete", "get", "icursor"],
    },
    WidgetClass {
        name: "Listbox",
        attach: LAYOUT,
        methods: &["insert", "delete", "get", "size", "curselection"],
    },
    WidgetClass {
        name: "Notebook",
        attach: LAYOUT,
        methods: &["add", "tabs", "select", "index"],
    },
];

/// Look up a class by name.
pub fn lookup(name: &str) -> Option<&'static WidgetClass> {
    CATALOG.iter().find(|class| class.name == name)
}
