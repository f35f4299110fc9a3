//! Headless queries: by widget type, by option, generic predicate, traversal.

use super::headless::{HeadlessToolkit, WidgetRecord};
use crate::toolkit::WidgetId;
use crate::value::Value;

impl HeadlessToolkit {
    /// All live widgets of `widget_type`, in arena order.
    pub fn query_by_type(&self, widget_type: &str) -> Vec<WidgetId> {
        self.query_all(|record| record.widget_type == widget_type)
    }

    /// All live widgets whose current `name` option equals `value`.
    ///
    /// Looks at configured options first, then constructor arguments.
    pub fn query_by_option(&self, name: &str, value: &Value) -> Vec<WidgetId> {
        self.query_all(|record| record.option(name) == Some(value))
    }

    /// All live widgets matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&WidgetRecord) -> bool) -> Vec<WidgetId> {
        self.widgets
            .iter()
            .filter(|(_, record)| predicate(record))
            .map(|(widget, _)| widget)
            .collect()
    }

    /// Pre-order depth-first traversal starting from `start`.
    pub fn walk_depth_first(&self, start: WidgetId) -> Vec<WidgetId> {
        let mut result = Vec::new();
        let mut stack = vec![start];
        while let Some(current) = stack.pop() {
            if !self.contains(current) {
                continue;
            }
            result.push(current);
            // Reverse so the first child is visited first.
            stack.extend(self.children(current).iter().rev());
        }
        result
    }

    /// Ancestors of `widget`, nearest first.
    pub fn ancestors(&self, widget: WidgetId) -> Vec<WidgetId> {
        std::iter::successors(self.parent(widget), |&current| self.parent(current)).collect()
    }
}
