//! In-memory toolkit: a slotmap arena of widget records.
//!
//! [`HeadlessToolkit`] implements [`Toolkit`] without any windowing system.
//! Every widget is a [`WidgetRecord`] in a single `SlotMap`; parent/child
//! links live in a secondary map so destroying a widget removes its whole
//! subtree in O(subtree size). Records keep everything the builder did to a
//! widget (constructor args, attachment, attributes, option state, call log)
//! so tests can assert on it.

use std::collections::VecDeque;

use slotmap::{SecondaryMap, SlotMap};

use super::catalog::{self, WidgetClass};
use crate::toolkit::{Command, CommandId, MethodCall, Toolkit, ToolkitError, VarId, WidgetId};
use crate::value::{Kwargs, Value};

/// Empty slice returned for widgets without children.
const EMPTY_CHILDREN: &[WidgetId] = &[];

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// How a widget was attached to its parent's layout.
#[derive(Debug, Clone, PartialEq)]
pub struct Attachment {
    pub strategy: String,
    pub args: Kwargs,
}

/// One page of a notebook.
#[derive(Debug, Clone, PartialEq)]
pub struct Tab {
    pub widget: WidgetId,
    pub text: String,
}

/// Everything known about one headless widget.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetRecord {
    pub widget_type: String,
    pub parent: Option<WidgetId>,
    pub constructor_args: Kwargs,
    pub attachment: Option<Attachment>,
    /// Directly assigned attributes.
    pub attributes: Kwargs,
    /// Option state set through `configure`/`config` and window methods.
    pub options: Kwargs,
    /// Every method invoked on the widget, in order.
    pub calls: Vec<MethodCall>,
    /// Notebook pages.
    pub tabs: Vec<Tab>,
    /// Entry text.
    pub text: String,
    /// Listbox items.
    pub items: Vec<Value>,
}

impl WidgetRecord {
    fn new(widget_type: &str, parent: Option<WidgetId>, constructor_args: &Kwargs) -> Self {
        Self {
            widget_type: widget_type.to_owned(),
            parent,
            constructor_args: constructor_args.clone(),
            attachment: None,
            attributes: Kwargs::new(),
            options: Kwargs::new(),
            calls: Vec::new(),
            tabs: Vec::new(),
            text: String::new(),
            items: Vec::new(),
        }
    }

    /// Current value of an option: configured state first, then constructor args.
    pub fn option(&self, name: &str) -> Option<&Value> {
        self.options
            .get(name)
            .or_else(|| self.constructor_args.get(name))
    }
}

/// Journal entry; the toolkit keeps one per operation, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolkitEvent {
    Constructed { widget: WidgetId, widget_type: String },
    Attached { widget: WidgetId, strategy: String },
    AttributeSet { widget: WidgetId, name: String },
    Invoked { widget: WidgetId, method: String },
    Destroyed { widget: WidgetId },
}

// ---------------------------------------------------------------------------
// HeadlessToolkit
// ---------------------------------------------------------------------------

/// A [`Toolkit`] that keeps widgets in memory.
#[derive(Default)]
pub struct HeadlessToolkit {
    pub(crate) widgets: SlotMap<WidgetId, WidgetRecord>,
    children: SecondaryMap<WidgetId, Vec<WidgetId>>,
    roots: Vec<WidgetId>,
    variables: SlotMap<VarId, Value>,
    commands: SlotMap<CommandId, Command>,
    history: Vec<ToolkitEvent>,
}

impl HeadlessToolkit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Immutable access to a widget's record.
    pub fn get(&self, widget: WidgetId) -> Option<&WidgetRecord> {
        self.widgets.get(widget)
    }

    pub fn contains(&self, widget: WidgetId) -> bool {
        self.widgets.contains_key(widget)
    }

    pub fn parent(&self, widget: WidgetId) -> Option<WidgetId> {
        self.widgets.get(widget).and_then(|record| record.parent)
    }

    /// Children of a widget in creation order. Empty if it has none or is gone.
    pub fn children(&self, widget: WidgetId) -> &[WidgetId] {
        self.children
            .get(widget)
            .map(Vec::as_slice)
            .unwrap_or(EMPTY_CHILDREN)
    }

    /// Live top-level widgets in creation order.
    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Everything done through the toolkit so far.
    pub fn history(&self) -> &[ToolkitEvent] {
        &self.history
    }

    /// Fire a registered command, as a user interaction would.
    pub fn fire_command(&mut self, command: CommandId) -> bool {
        match self.commands.get_mut(command) {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    fn record_mut(&mut self, widget: WidgetId) -> Result<&mut WidgetRecord, ToolkitError> {
        self.widgets.get_mut(widget).ok_or(ToolkitError::DeadWidget)
    }

    fn class_of(&self, widget: WidgetId) -> Result<&'static WidgetClass, ToolkitError> {
        let record = self.widgets.get(widget).ok_or(ToolkitError::DeadWidget)?;
        catalog::lookup(&record.widget_type)
            .ok_or_else(|| ToolkitError::UnknownWidgetType(record.widget_type.clone()))
    }

    /// Fire the command bound through `command=`, if any.
    fn fire_bound_command(&mut self, widget: WidgetId) -> Result<Value, ToolkitError> {
        let command = self
            .get(widget)
            .and_then(|record| record.option("command"))
            .and_then(Value::as_command);
        if let Some(command) = command {
            self.fire_command(command);
        }
        Ok(Value::Null)
    }

    /// Set a checkbutton's variable to its on or off value.
    fn set_check(&mut self, widget: WidgetId, on: Option<bool>) -> Result<Value, ToolkitError> {
        let record = self.widgets.get(widget).ok_or(ToolkitError::DeadWidget)?;
        let Some(var) = record.option("variable").and_then(Value::as_var) else {
            return Ok(Value::Null);
        };
        let onvalue = record.option("onvalue").cloned().unwrap_or(Value::Int(1));
        let offvalue = record.option("offvalue").cloned().unwrap_or(Value::Int(0));
        let on = match on {
            Some(on) => on,
            None => self.variable(var)? != onvalue,
        };
        self.set_variable(var, if on { onvalue } else { offvalue })?;
        Ok(Value::Null)
    }

    fn dispatch(
        &mut self,
        widget: WidgetId,
        class: &'static WidgetClass,
        call: &MethodCall,
    ) -> Result<Value, ToolkitError> {
        let args = &call.args;
        let invalid = |message: &str| ToolkitError::InvalidArguments {
            method: call.method.clone(),
            message: message.to_owned(),
        };

        match (class.name, call.method.as_str()) {
            (_, "configure" | "config") => {
                if !args.positional.is_empty() {
                    return Err(invalid("expected keyword arguments only"));
                }
                let record = self.record_mut(widget)?;
                for (name, value) in &args.keyword {
                    record.options.insert(name.clone(), value.clone());
                }
                Ok(Value::Null)
            }
            (_, "cget") => {
                let name = args
                    .positional
                    .first()
                    .and_then(Value::as_str)
                    .ok_or_else(|| invalid("expected an option name"))?;
                let record = self.widgets.get(widget).ok_or(ToolkitError::DeadWidget)?;
                Ok(record.option(name).cloned().unwrap_or_default())
            }
            (_, "keys") => {
                let record = self.widgets.get(widget).ok_or(ToolkitError::DeadWidget)?;
                let mut keys: Vec<Value> = record.constructor_args.keys().map(|k| Value::from(k.as_str())).collect();
                for name in record.options.keys() {
                    if !record.constructor_args.contains_key(name) {
                        keys.push(Value::from(name.as_str()));
                    }
                }
                Ok(Value::List(keys))
            }
            ("Tk" | "Toplevel", method @ ("title" | "geometry")) => {
                let record = self.record_mut(widget)?;
                match args.positional.first() {
                    Some(value) => {
                        record.options.insert(method.to_owned(), value.clone());
                        Ok(Value::Null)
                    }
                    None => Ok(record.options.get(method).cloned().unwrap_or_default()),
                }
            }
            ("Checkbutton", "select") => self.set_check(widget, Some(true)),
            ("Checkbutton", "deselect") => self.set_check(widget, Some(false)),
            ("Checkbutton", "toggle") => self.set_check(widget, None),
            ("Checkbutton", "invoke") => {
                self.set_check(widget, None)?;
                self.fire_bound_command(widget)
            }
            ("Button", "invoke") => self.fire_bound_command(widget),
            ("Notebook", "add") => {
                let page = args
                    .positional
                    .first()
                    .and_then(Value::as_widget)
                    .ok_or_else(|| invalid("expected a child widget"))?;
                if !self.widgets.contains_key(page) {
                    return Err(ToolkitError::DeadWidget);
                }
                let text = args
                    .keyword
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned();
                self.record_mut(widget)?.tabs.push(Tab { widget: page, text });
                Ok(Value::Null)
            }
            ("Notebook", "tabs") => {
                let record = self.widgets.get(widget).ok_or(ToolkitError::DeadWidget)?;
                Ok(Value::List(record.tabs.iter().map(|tab| Value::Widget(tab.widget)).collect()))
            }
            ("Entry", "insert") => {
                let text = args
                    .positional
                    .get(1)
                    .and_then(Value::as_str)
                    .ok_or_else(|| invalid("expected an index and a string"))?
                    .to_owned();
                let record = self.record_mut(widget)?;
                let at = entry_index(args.positional.first(), record.text.chars().count());
                let byte = record
                    .text
                    .char_indices()
                    .nth(at)
                    .map_or(record.text.len(), |(i, _)| i);
                record.text.insert_str(byte, &text);
                Ok(Value::Null)
            }
            ("Entry", "delete") => {
                let record = self.record_mut(widget)?;
                let len = record.text.chars().count();
                let first = entry_index(args.positional.first(), len);
                let last = match args.positional.get(1) {
                    Some(value) => entry_index(Some(value), len),
                    None => (first + 1).min(len),
                };
                record.text = record
                    .text
                    .chars()
                    .enumerate()
                    .filter(|(i, _)| *i < first || *i >= last)
                    .map(|(_, c)| c)
                    .collect();
                Ok(Value::Null)
            }
            ("Entry", "get") => Ok(Value::from(self.get(widget).map(|r| r.text.clone()).unwrap_or_default())),
            ("Listbox", "insert") => {
                let (index, items) = args
                    .positional
                    .split_first()
                    .ok_or_else(|| invalid("expected an index"))?;
                let record = self.record_mut(widget)?;
                let at = entry_index(Some(index), record.items.len());
                for (offset, item) in items.iter().enumerate() {
                    record.items.insert(at + offset, item.clone());
                }
                Ok(Value::Null)
            }
            ("Listbox", "delete") => {
                let record = self.record_mut(widget)?;
                let len = record.items.len();
                let first = entry_index(args.positional.first(), len);
                let last = match args.positional.get(1) {
                    Some(value) => (entry_index(Some(value), len) + 1).min(len),
                    None => (first + 1).min(len),
                };
                if first < last {
                    record.items.drain(first..last);
                }
                Ok(Value::Null)
            }
            ("Listbox", "get") => {
                let record = self.widgets.get(widget).ok_or(ToolkitError::DeadWidget)?;
                let index = entry_index(args.positional.first(), record.items.len());
                Ok(record.items.get(index).cloned().unwrap_or_default())
            }
            ("Listbox", "size") => {
                let record = self.widgets.get(widget).ok_or(ToolkitError::DeadWidget)?;
                Ok(Value::Int(i64::try_from(record.items.len()).unwrap_or(i64::MAX)))
            }
            // Accepted and logged, no modelled behavior.
            _ => Ok(Value::Null),
        }
    }
}

/// Resolve a tk-style index (`0`, `"3"`, `"end"`) against a length.
fn entry_index(index: Option<&Value>, len: usize) -> usize {
    let index = match index {
        Some(Value::Int(i)) => usize::try_from(*i).unwrap_or(0),
        Some(Value::Str(s)) if s == "end" => len,
        Some(Value::Str(s)) => s.parse().unwrap_or(len),
        _ => 0,
    };
    index.min(len)
}

impl Toolkit for HeadlessToolkit {
    fn construct(
        &mut self,
        widget_type: &str,
        parent: Option<WidgetId>,
        args: &Kwargs,
    ) -> Result<WidgetId, ToolkitError> {
        if catalog::lookup(widget_type).is_none() {
            return Err(ToolkitError::UnknownWidgetType(widget_type.to_owned()));
        }
        if let Some(parent) = parent {
            if !self.widgets.contains_key(parent) {
                return Err(ToolkitError::DeadWidget);
            }
        }

        let widget = self.widgets.insert(WidgetRecord::new(widget_type, parent, args));
        self.children.insert(widget, Vec::new());
        match parent.and_then(|p| self.children.get_mut(p)) {
            Some(siblings) => siblings.push(widget),
            None => self.roots.push(widget),
        }
        self.history.push(ToolkitEvent::Constructed {
            widget,
            widget_type: widget_type.to_owned(),
        });
        Ok(widget)
    }

    fn attach(&mut self, widget: WidgetId, strategy: &str, args: &Kwargs) -> Result<(), ToolkitError> {
        let class = self.class_of(widget)?;
        if !class.supports_attach(strategy) {
            return Err(ToolkitError::UnsupportedAttach {
                widget_type: class.name.to_owned(),
                strategy: strategy.to_owned(),
            });
        }
        self.record_mut(widget)?.attachment = Some(Attachment {
            strategy: strategy.to_owned(),
            args: args.clone(),
        });
        self.history.push(ToolkitEvent::Attached {
            widget,
            strategy: strategy.to_owned(),
        });
        Ok(())
    }

    fn set_attribute(&mut self, widget: WidgetId, name: &str, value: &Value) -> Result<(), ToolkitError> {
        self.record_mut(widget)?
            .attributes
            .insert(name.to_owned(), value.clone());
        self.history.push(ToolkitEvent::AttributeSet {
            widget,
            name: name.to_owned(),
        });
        Ok(())
    }

    fn invoke(&mut self, widget: WidgetId, call: &MethodCall) -> Result<Value, ToolkitError> {
        let class = self.class_of(widget)?;
        if !class.has_method(&call.method) {
            return Err(ToolkitError::UnknownMethod {
                widget_type: class.name.to_owned(),
                method: call.method.clone(),
            });
        }
        self.record_mut(widget)?.calls.push(call.clone());
        self.history.push(ToolkitEvent::Invoked {
            widget,
            method: call.method.clone(),
        });
        self.dispatch(widget, class, call)
    }

    fn destroy(&mut self, widget: WidgetId) -> Result<(), ToolkitError> {
        let record = self.widgets.get(widget).ok_or(ToolkitError::DeadWidget)?;

        match record.parent {
            Some(parent) => {
                if let Some(siblings) = self.children.get_mut(parent) {
                    siblings.retain(|&child| child != widget);
                }
            }
            None => self.roots.retain(|&root| root != widget),
        }

        let mut to_remove = VecDeque::from([widget]);
        while let Some(current) = to_remove.pop_front() {
            if let Some(kids) = self.children.remove(current) {
                to_remove.extend(kids);
            }
            self.widgets.remove(current);
        }
        self.history.push(ToolkitEvent::Destroyed { widget });
        Ok(())
    }

    fn create_variable(&mut self, initial: Value) -> VarId {
        self.variables.insert(initial)
    }

    fn variable(&self, var: VarId) -> Result<Value, ToolkitError> {
        self.variables.get(var).cloned().ok_or(ToolkitError::DeadVariable)
    }

    fn set_variable(&mut self, var: VarId, value: Value) -> Result<(), ToolkitError> {
        let slot = self.variables.get_mut(var).ok_or(ToolkitError::DeadVariable)?;
        *slot = value;
        Ok(())
    }

    fn register_command(&mut self, command: Command) -> CommandId {
        self.commands.insert(command)
    }
}

impl std::fmt::Debug for HeadlessToolkit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessToolkit")
            .field("widgets", &self.widgets.len())
            .field("variables", &self.variables.len())
            .field("commands", &self.commands.len())
            .finish()
    }
}
