//! Contracts between the controller and whatever draws the form.
//!
//! A [`FieldView`] carries the capabilities every control binds to: the
//! current value, the error to surface, whether it is required or disabled,
//! and [`FieldView::on_change`] to feed input back into the controller.

use agrolead_shared::Locale;
use serde::{Serialize, Serializer};

use crate::{
    Certification, ChoiceOption, ControlKind, Field, FieldSpec, FormController, LeadError,
    Section, registry,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Binding {
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub required: bool,
    pub disabled: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputType {
    Text,
    Email,
    Tel,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Control {
    Input { input_type: InputType },
    TextArea,
    Select { options: Vec<ChoiceOption> },
    Chips {
        options: Vec<ChoiceOption>,
        selected: Vec<String>,
    },
    Composite(CompositeSelector),
}

/// Rich dropdown with a native-select fallback. Both representations read
/// the same selected index, so they cannot disagree on the value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CompositeSelector {
    field: Field,
    options: Vec<ChoiceOption>,
    selected: Option<usize>,
}

impl CompositeSelector {
    pub fn new(field: Field, options: Vec<ChoiceOption>, value: &str) -> Self {
        let selected = options.iter().position(|o| o.value.eq_ignore_ascii_case(value));
        Self {
            field,
            options,
            selected,
        }
    }

    pub fn options(&self) -> &[ChoiceOption] {
        &self.options
    }

    pub fn select(&mut self, value: &str) -> Result<(), LeadError> {
        if value.is_empty() {
            self.selected = None;
            return Ok(());
        }
        let index = self
            .options
            .iter()
            .position(|o| o.value.eq_ignore_ascii_case(value))
            .ok_or_else(|| LeadError::UnknownOption {
                field: self.field,
                value: value.to_owned(),
            })?;
        self.selected = Some(index);
        Ok(())
    }

    /// Value of the accessible `<select>` fallback.
    pub fn native_value(&self) -> &str {
        self.selected_option().map_or("", |o| o.value.as_str())
    }

    /// Option highlighted by the rich dropdown.
    pub fn selected_option(&self) -> Option<&ChoiceOption> {
        self.selected.and_then(|i| self.options.get(i))
    }
}

impl Serialize for CompositeSelector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Repr<'a> {
            options: &'a [ChoiceOption],
            value: &'a str,
            #[serde(skip_serializing_if = "Option::is_none")]
            selected: Option<&'a ChoiceOption>,
        }

        Repr {
            options: &self.options,
            value: self.native_value(),
            selected: self.selected_option(),
        }
        .serialize(serializer)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub field: Field,
    pub section: Section,
    pub label: String,
    pub control: Control,
    pub binding: Binding,
}

impl FieldView {
    pub fn new(spec: &FieldSpec, form: &FormController, locale: Locale) -> Self {
        let value = form.value(spec.field).unwrap_or_default();
        let options = || registry::options(spec.field, locale).unwrap_or_default();
        let control = match spec.control {
            ControlKind::Text => Control::Input {
                input_type: InputType::Text,
            },
            ControlKind::Email => Control::Input {
                input_type: InputType::Email,
            },
            ControlKind::Phone => Control::Input {
                input_type: InputType::Tel,
            },
            ControlKind::TextArea => Control::TextArea,
            ControlKind::Select => Control::Select { options: options() },
            ControlKind::Chips => Control::Chips {
                options: options(),
                selected: registry::split_joined(value)
                    .into_iter()
                    .map(str::to_owned)
                    .collect(),
            },
            ControlKind::Composite => {
                Control::Composite(CompositeSelector::new(spec.field, options(), value))
            }
        };

        Self {
            field: spec.field,
            section: spec.section,
            label: spec.field.label(locale),
            control,
            binding: Binding {
                value: value.to_owned(),
                error: form.errors().first(spec.field).map(|e| e.message(locale)),
                required: spec.required,
                disabled: form.status().is_submitting(),
            },
        }
    }

    /// Feeds user input back into the form. Selectors only accept their own
    /// options; chips toggle the given value.
    pub fn on_change(&self, form: &mut FormController, input: &str) -> Result<(), LeadError> {
        match &self.control {
            Control::Input { .. } | Control::TextArea => form.set(self.field, input),
            Control::Select { options } => self.choose(form, options, input),
            Control::Composite(selector) => self.choose(form, selector.options(), input),
            Control::Chips { .. } => {
                let certification: Certification =
                    input.parse().map_err(|_| self.unknown(input))?;
                form.toggle_certification(certification)
            }
        }
    }

    fn choose(
        &self,
        form: &mut FormController,
        options: &[ChoiceOption],
        input: &str,
    ) -> Result<(), LeadError> {
        if input.is_empty() && !self.binding.required {
            return form.set(self.field, input);
        }
        // Same leniency as the schema's parsing; the canonical value is stored.
        let option = options
            .iter()
            .find(|o| o.value.eq_ignore_ascii_case(input))
            .ok_or_else(|| self.unknown(input))?;
        form.set(self.field, option.value.as_str())
    }

    fn unknown(&self, input: &str) -> LeadError {
        LeadError::UnknownOption {
            field: self.field,
            value: input.to_owned(),
        }
    }
}

impl FormController {
    /// Views for the active schema, in layout order.
    pub fn views(&self, locale: Locale) -> Vec<FieldView> {
        self.current_fields()
            .iter()
            .map(|spec| FieldView::new(spec, self, locale))
            .collect()
    }
}
