//! Product form submission gate for required selections.
//!
//! Revalidation only happens at submit time. Any change to a select clears its
//! error mark, whether or not the new value is valid.

#[cfg(test)]
#[path = "submit_gate_test.rs"]
mod submit_gate_test;

/// Base class shared by every gated select.
pub const SELECT_CLASS: &str = "product-customizer__select";
/// Modifier class marking a select as erroneous.
pub const SELECT_ERROR_CLASS: &str = "product-customizer__select--error";

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum GateError {
    #[error("Please select a {label} option.")]
    MissingSelection { label: String },
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectField {
    pub name: String,
    /// Lowercase noun used in the notice, e.g. `"ribbon"`.
    pub label: String,
    pub required: bool,
    pub value: String,
    pub has_error: bool,
}

impl SelectField {
    pub fn new(name: impl Into<String>, label: impl Into<String>, required: bool) -> Self {
        Self { name: name.into(), label: label.into(), required, ..Self::default() }
    }

    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.required && self.value.is_empty()
    }

    /// Class list for rendering.
    #[must_use]
    pub fn class(&self) -> String {
        if self.has_error {
            format!("{SELECT_CLASS} {SELECT_ERROR_CLASS}")
        } else {
            SELECT_CLASS.to_owned()
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmitGate {
    fields: Vec<SelectField>,
    /// Name of the field whose emptiness blocks submission.
    designated: String,
}

impl SubmitGate {
    pub fn new(fields: Vec<SelectField>, designated: impl Into<String>) -> Self {
        Self { fields, designated: designated.into() }
    }

    #[must_use]
    pub fn field(&self, name: &str) -> Option<&SelectField> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Decide whether the form may submit.
    ///
    /// `live_value` is the designated control's value read at submit time; it
    /// replaces whatever the last change event recorded, since restored or
    /// scripted values arrive without one. `None` falls back to the recorded
    /// value. A required, empty designated field is marked erroneous and
    /// blocks. A missing designated field never blocks.
    pub fn check_submit(&mut self, live_value: Option<&str>) -> Result<(), GateError> {
        let designated = self.designated.as_str();
        let Some(field) = self.fields.iter_mut().find(|field| field.name == designated) else {
            return Ok(());
        };
        if let Some(live) = live_value {
            live.clone_into(&mut field.value);
        }
        if !field.is_missing() {
            return Ok(());
        }
        field.has_error = true;
        Err(GateError::MissingSelection { label: field.label.clone() })
    }

    /// Record a new value and clear the field's error mark.
    pub fn on_change(&mut self, name: &str, value: impl Into<String>) {
        if let Some(field) = self.fields.iter_mut().find(|field| field.name == name) {
            field.value = value.into();
            field.has_error = false;
        }
    }
}
