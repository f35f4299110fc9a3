//! Snapshot rendering helpers.
//!
//! Turn a headless widget tree into indented plain text, one widget per line,
//! for snapshot-style assertions.

use std::fmt::Write;

use super::headless::{HeadlessToolkit, WidgetRecord};
use crate::toolkit::WidgetId;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render every top-level tree of the toolkit.
///
/// Each line is `<widget type>`, followed by its options (constructor
/// arguments, then configured options that override or extend them), its
/// attachment in brackets, and its notebook tabs. Children are indented by
/// two spaces per level. The final line has no trailing newline.
///
/// # Examples
///
/// ```ignore
/// use blueprint_ui::testing::{tree_to_string, HeadlessToolkit};
///
/// let output = tree_to_string(&toolkit);
/// assert!(output.starts_with("Tk"));
/// ```
pub fn tree_to_string(toolkit: &HeadlessToolkit) -> String {
    toolkit
        .roots()
        .iter()
        .map(|&root| subtree_to_string(toolkit, root))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render the tree rooted at `widget`. Empty if the widget is gone.
pub fn subtree_to_string(toolkit: &HeadlessToolkit, widget: WidgetId) -> String {
    let mut lines = Vec::new();
    render_into(toolkit, widget, 0, &mut lines);
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn render_into(toolkit: &HeadlessToolkit, widget: WidgetId, depth: usize, lines: &mut Vec<String>) {
    let Some(record) = toolkit.get(widget) else {
        return;
    };
    lines.push(format!("{}{}", "  ".repeat(depth), describe(record)));
    for &child in toolkit.children(widget) {
        render_into(toolkit, child, depth + 1, lines);
    }
}

fn describe(record: &WidgetRecord) -> String {
    let mut line = record.widget_type.clone();

    let names = record
        .constructor_args
        .keys()
        .chain(record.options.keys().filter(|k| !record.constructor_args.contains_key(*k)));
    for name in names {
        if let Some(value) = record.option(name) {
            let _ = write!(line, " {name}={value}");
        }
    }

    if let Some(attachment) = &record.attachment {
        let _ = write!(line, " [{}", attachment.strategy);
        for (name, value) in &attachment.args {
            let _ = write!(line, " {name}={value}");
        }
        line.push(']');
    }

    if !record.tabs.is_empty() {
        let tabs: Vec<_> = record.tabs.iter().map(|tab| format!("{:?}", tab.text)).collect();
        let _ = write!(line, " tabs=[{}]", tabs.join(", "));
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::{Arguments, MethodCall, Toolkit};
    use crate::value::{kwargs, Kwargs, Value};

    #[test]
    fn empty_toolkit() {
        assert_eq!(tree_to_string(&HeadlessToolkit::new()), "");
    }

    #[test]
    fn nested_tree() {
        let mut tk = HeadlessToolkit::new();
        let root = tk.construct("Tk", None, &Kwargs::new()).unwrap();
        let frame = tk.construct("Frame", Some(root), &Kwargs::new()).unwrap();
        tk.attach(frame, "pack", &kwargs([("fill", "x")])).unwrap();
        let label = tk.construct("Label", Some(frame), &kwargs([("text", "hi")])).unwrap();
        tk.invoke(
            label,
            &MethodCall::new("configure", Arguments::keyword(kwargs([("fg", "red")]))),
        )
        .unwrap();

        insta::assert_snapshot!(tree_to_string(&tk), @r#"
        Tk
          Frame [pack fill="x"]
            Label text="hi" fg="red"
        "#);
    }

    #[test]
    fn configured_option_overrides_constructor_arg() {
        let mut tk = HeadlessToolkit::new();
        let label = tk.construct("Label", None, &kwargs([("text", "old")])).unwrap();
        tk.invoke(
            label,
            &MethodCall::new("config", Arguments::keyword(kwargs([("text", "new")]))),
        )
        .unwrap();
        assert_eq!(subtree_to_string(&tk, label), r#"Label text="new""#);
    }

    #[test]
    fn notebook_tabs() {
        let mut tk = HeadlessToolkit::new();
        let book = tk.construct("Notebook", None, &Kwargs::new()).unwrap();
        let page = tk.construct("Frame", Some(book), &Kwargs::new()).unwrap();
        tk.invoke(
            book,
            &MethodCall::new(
                "add",
                Arguments::positional([Value::Widget(page)]).with_kwarg("text", "General"),
            ),
        )
        .unwrap();
        assert_eq!(tree_to_string(&tk), "Notebook tabs=[\"General\"]\n  Frame");
    }
}
