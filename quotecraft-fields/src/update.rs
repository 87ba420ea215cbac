//! Scoped field updates.
//!
//! Each [`FieldChange`] targets exactly one attribute. Applying a change
//! returns a new [`FieldConfig`] with the same id and kind; every attribute
//! the change does not name is carried over unchanged. A change aimed at an
//! attribute the field's kind does not have is ignored.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::ids::{IdGenerator, OptionId};
use crate::types::{FieldConfig, FieldOption, NumericRange};
use crate::variable_name::synced_variable_name;

/// Which numeric bound a [`FieldChange::Numeric`] targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumericAttr {
    Min,
    Max,
    Step,
    DefaultValue,
}

impl NumericAttr {
    fn slot(self, range: &mut NumericRange) -> &mut Option<f64> {
        match self {
            NumericAttr::Min => &mut range.min,
            NumericAttr::Max => &mut range.max,
            NumericAttr::Step => &mut range.step,
            NumericAttr::DefaultValue => &mut range.default_value,
        }
    }
}

/// A single-attribute edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "set", rename_all = "snake_case")]
pub enum FieldChange {
    /// New label. The variable name follows if it was in sync.
    Label { value: String },
    HelpText { value: Option<String> },
    Required { value: bool },
    /// Direct variable name edit. Never touches the label.
    VariableName { value: String },
    /// Number and slider fields.
    Numeric {
        attr: NumericAttr,
        value: Option<f64>,
    },
    /// Number and text fields.
    Placeholder { value: Option<String> },
    /// Append a blank option with a fresh id.
    AddOption,
    OptionLabel { index: usize, value: String },
    OptionValue { index: usize, value: String },
    RemoveOption { index: usize },
}

impl FieldConfig {
    /// Produce the field that results from applying `change`.
    ///
    /// `ids` is only consulted when a new option is added.
    pub fn with_change(&self, change: &FieldChange, ids: &dyn IdGenerator) -> FieldConfig {
        let mut next = self.clone();
        match change {
            FieldChange::Label { value } => {
                let base = next.base_mut();
                base.variable_name = synced_variable_name(&base.label, &base.variable_name, value);
                base.label = value.clone();
            }
            FieldChange::HelpText { value } => next.base_mut().help_text = value.clone(),
            FieldChange::Required { value } => next.base_mut().required = *value,
            FieldChange::VariableName { value } => next.base_mut().variable_name = value.clone(),
            FieldChange::Numeric { attr, value } => match next.range_mut() {
                Some(range) => *attr.slot(range) = *value,
                None => trace!(kind = %self.kind(), ?attr, "numeric change ignored"),
            },
            FieldChange::Placeholder { value } => match next.placeholder_mut() {
                Some(slot) => *slot = value.clone(),
                None => trace!(kind = %self.kind(), "placeholder change ignored"),
            },
            FieldChange::AddOption
            | FieldChange::OptionLabel { .. }
            | FieldChange::OptionValue { .. }
            | FieldChange::RemoveOption { .. } => match next.options_mut() {
                Some(options) => *options = apply_option_change(options, change, ids),
                None => trace!(kind = %self.kind(), "option change ignored"),
            },
        }
        next
    }
}

fn apply_option_change(
    options: &[FieldOption],
    change: &FieldChange,
    ids: &dyn IdGenerator,
) -> Vec<FieldOption> {
    match change {
        FieldChange::AddOption => add_option(options, OptionId::generate(ids)),
        FieldChange::OptionLabel { index, value } => update_option(options, *index, |option| {
            option.label = value.clone();
        }),
        FieldChange::OptionValue { index, value } => update_option(options, *index, |option| {
            option.value = value.clone();
        }),
        FieldChange::RemoveOption { index } => remove_option(options, *index),
        _ => options.to_vec(),
    }
}

/// Append a blank option with `id`.
pub fn add_option(options: &[FieldOption], id: OptionId) -> Vec<FieldOption> {
    let mut next = options.to_vec();
    next.push(FieldOption::blank(id));
    next
}

/// Replace the option at `index` with the result of `edit`. Every other
/// option keeps its position and content. Out of range is a no-op.
pub fn update_option(
    options: &[FieldOption],
    index: usize,
    edit: impl FnOnce(&mut FieldOption),
) -> Vec<FieldOption> {
    let mut next = options.to_vec();
    match next.get_mut(index) {
        Some(option) => edit(option),
        None => trace!(index, len = options.len(), "option update out of range"),
    }
    next
}

/// Remove the option at `index`; later options shift left. Removing the last
/// remaining option leaves an empty list. Out of range is a no-op.
pub fn remove_option(options: &[FieldOption], index: usize) -> Vec<FieldOption> {
    if index >= options.len() {
        trace!(index, len = options.len(), "option removal out of range");
        return options.to_vec();
    }
    let mut next = options.to_vec();
    next.remove(index);
    next
}

/// Read a numeric form input.
///
/// Leading whitespace is skipped and the longest numeric prefix is used, so
/// `"12abc"` reads as `12`. Text with no numeric prefix clears the value.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let prefix = &text[..numeric_prefix_len(text)];
    if prefix.is_empty() {
        return None;
    }
    match prefix.trim_start_matches(['+', '-']) {
        "Infinity" if prefix.starts_with('-') => Some(f64::NEG_INFINITY),
        "Infinity" => Some(f64::INFINITY),
        _ => prefix.parse::<f64>().ok().filter(|v| !v.is_nan()),
    }
}

/// Byte length of the decimal literal at the start of `text`: sign, digits,
/// fraction, exponent. Zero when there is none.
fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut i = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    if text[i..].starts_with("Infinity") {
        return i + "Infinity".len();
    }

    let int_end = digits_from(i);
    let mut end = int_end;
    let mut seen_digit = int_end > i;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        seen_digit |= frac_end > end + 1;
        end = frac_end;
    }
    if !seen_digit {
        return 0;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    end
}

/// Read a help text form input. The empty string is kept as an empty help
/// text rather than clearing it.
pub fn help_text_from_input(raw: &str) -> Option<String> {
    Some(raw.to_string())
}

/// Read a placeholder form input. The empty string clears the value.
pub fn placeholder_from_input(raw: &str) -> Option<String> {
    if raw.is_empty() {
        None
    } else {
        Some(raw.to_string())
    }
}
