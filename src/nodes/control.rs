//! Drop-down controls attached to nodes
//!
//! A control carries user-chosen state that is not a socket: the user
//! picks an entry, the bound callback forwards the selection to the
//! backend, and the backend may later replace the option list wholesale.
//! Option lists are often placeholders at construction time because the
//! valid set is only known after the backend has inspected external
//! state.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

/// A label/value pair in a drop-down option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: i64,
    pub text: String,
}

impl SelectOption {
    pub fn new(value: i64, text: impl Into<String>) -> Self {
        Self {
            value,
            text: text.into(),
        }
    }
}

/// Callback invoked with the selected value on user interaction.
pub type SelectCallback = Box<dyn FnMut(i64)>;

/// A named drop-down bound to one node.
pub struct DropDownControl {
    name: String,
    label: String,
    options: Vec<SelectOption>,
    selected: Option<i64>,
    on_select: Option<SelectCallback>,
}

impl DropDownControl {
    /// Create a control with an initial (possibly placeholder) option list.
    pub fn new(
        name: impl Into<String>,
        label: impl Into<String>,
        options: Vec<SelectOption>,
    ) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            options,
            selected: None,
            on_select: None,
        }
    }

    /// Bind the callback fired on every user selection.
    pub fn with_callback(mut self, callback: impl FnMut(i64) + 'static) -> Self {
        self.on_select = Some(Box::new(callback));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    pub fn selected(&self) -> Option<i64> {
        self.selected
    }

    /// Record a user selection and fire the bound callback exactly once.
    ///
    /// A value outside the current option list is tolerated: the backend
    /// may have narrowed the list while the user was interacting. The raw
    /// value is kept and re-resolved on the next option update.
    pub fn select(&mut self, value: i64) {
        if !self.options.iter().any(|o| o.value == value) {
            debug!(
                "control `{}`: selection {} not in current options",
                self.name, value
            );
        }
        self.selected = Some(value);
        if let Some(callback) = self.on_select.as_mut() {
            callback(value);
        }
    }

    /// Replace the option list, resolving a selection that is no longer
    /// present to the first option.
    pub fn set_options(&mut self, options: Vec<SelectOption>) {
        self.options = options;
        let still_valid = self
            .selected
            .is_some_and(|sel| self.options.iter().any(|o| o.value == sel));
        if !still_valid {
            let fallback = self.options.first().map(|o| o.value);
            if self.selected.is_some() && self.selected != fallback {
                debug!(
                    "control `{}`: selection reset to {:?} after option update",
                    self.name, fallback
                );
            }
            self.selected = fallback;
        }
    }

    /// Merge persisted state when the node's visual representation is
    /// attached. Absent pieces leave the placeholders in place.
    pub fn restore(&mut self, options: Option<Vec<SelectOption>>, selected: Option<i64>) {
        if let Some(options) = options {
            self.options = options;
        }
        if selected.is_some() {
            self.selected = selected;
        }
    }
}

impl fmt::Debug for DropDownControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DropDownControl")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("options", &self.options)
            .field("selected", &self.selected)
            .finish_non_exhaustive()
    }
}

/// Ordered, name-addressable collection of controls owned by one node.
#[derive(Debug, Default)]
pub struct ControlSet {
    controls: Vec<DropDownControl>,
}

impl ControlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a control. Names are expected to be unique per node; lookups
    /// return the first match.
    pub fn add(&mut self, control: DropDownControl) -> &mut Self {
        self.controls.push(control);
        self
    }

    pub fn get(&self, name: &str) -> Option<&DropDownControl> {
        self.controls.iter().find(|c| c.name() == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut DropDownControl> {
        self.controls.iter_mut().find(|c| c.name() == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DropDownControl> {
        self.controls.iter()
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }
}
