//! Core field types.
//!
//! A [`FieldConfig`] is a tagged union over [`FieldKind`]: every variant
//! carries the shared [`BaseAttributes`] plus the attributes specific to its
//! kind. Serialized form is the persisted field list: a `type` tag, camelCase
//! attribute names, absent optionals omitted.

use serde::{Deserialize, Serialize};

use quotecraft_reorder::Keyed;

use crate::ids::{FieldId, OptionId};
use crate::kind::FieldKind;

/// One choice in a dropdown, radio or checkbox field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldOption {
    pub id: OptionId,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub value: String,
}

impl FieldOption {
    /// A blank option, as appended by "add option".
    pub fn blank(id: OptionId) -> Self {
        Self {
            id,
            label: String::new(),
            value: String::new(),
        }
    }
}

/// Attributes shared by every field kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseAttributes {
    pub id: FieldId,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub variable_name: String,
}

/// Numeric bounds shared by number inputs and sliders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<f64>,
}

/// Dropdown, radio and checkbox fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceField {
    #[serde(flatten)]
    pub base: BaseAttributes,
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberField {
    #[serde(flatten)]
    pub base: BaseAttributes,
    #[serde(flatten)]
    pub range: NumericRange,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderField {
    #[serde(flatten)]
    pub base: BaseAttributes,
    #[serde(flatten)]
    pub range: NumericRange,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    #[serde(flatten)]
    pub base: BaseAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
}

/// Image select fields carry only the base attributes for now.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSelectField {
    #[serde(flatten)]
    pub base: BaseAttributes,
}

/// A configured calculator input.
///
/// The kind is fixed for the field's lifetime: every update produces a value
/// of the same variant with the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldConfig {
    Dropdown(ChoiceField),
    Radio(ChoiceField),
    Checkbox(ChoiceField),
    Number(NumberField),
    Slider(SliderField),
    Text(TextField),
    ImageSelect(ImageSelectField),
}

impl FieldConfig {
    /// Build a field of `kind` with default kind-specific attributes.
    pub fn new(kind: FieldKind, base: BaseAttributes) -> Self {
        match kind {
            FieldKind::Dropdown => Self::Dropdown(ChoiceField::empty(base)),
            FieldKind::Radio => Self::Radio(ChoiceField::empty(base)),
            FieldKind::Checkbox => Self::Checkbox(ChoiceField::empty(base)),
            FieldKind::Number => Self::Number(NumberField {
                base,
                range: NumericRange::default(),
                placeholder: None,
            }),
            FieldKind::Slider => Self::Slider(SliderField {
                base,
                range: NumericRange::default(),
            }),
            FieldKind::Text => Self::Text(TextField {
                base,
                placeholder: None,
            }),
            FieldKind::ImageSelect => Self::ImageSelect(ImageSelectField { base }),
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Dropdown(_) => FieldKind::Dropdown,
            Self::Radio(_) => FieldKind::Radio,
            Self::Checkbox(_) => FieldKind::Checkbox,
            Self::Number(_) => FieldKind::Number,
            Self::Slider(_) => FieldKind::Slider,
            Self::Text(_) => FieldKind::Text,
            Self::ImageSelect(_) => FieldKind::ImageSelect,
        }
    }

    pub fn base(&self) -> &BaseAttributes {
        match self {
            Self::Dropdown(f) | Self::Radio(f) | Self::Checkbox(f) => &f.base,
            Self::Number(f) => &f.base,
            Self::Slider(f) => &f.base,
            Self::Text(f) => &f.base,
            Self::ImageSelect(f) => &f.base,
        }
    }

    pub(crate) fn base_mut(&mut self) -> &mut BaseAttributes {
        match self {
            Self::Dropdown(f) | Self::Radio(f) | Self::Checkbox(f) => &mut f.base,
            Self::Number(f) => &mut f.base,
            Self::Slider(f) => &mut f.base,
            Self::Text(f) => &mut f.base,
            Self::ImageSelect(f) => &mut f.base,
        }
    }

    pub fn id(&self) -> &FieldId {
        &self.base().id
    }

    pub fn label(&self) -> &str {
        &self.base().label
    }

    pub fn variable_name(&self) -> &str {
        &self.base().variable_name
    }

    pub fn help_text(&self) -> Option<&str> {
        self.base().help_text.as_deref()
    }

    pub fn is_required(&self) -> bool {
        self.base().required
    }

    /// Option list, for option-bearing kinds.
    pub fn options(&self) -> Option<&[FieldOption]> {
        match self {
            Self::Dropdown(f) | Self::Radio(f) | Self::Checkbox(f) => Some(&f.options),
            _ => None,
        }
    }

    pub(crate) fn options_mut(&mut self) -> Option<&mut Vec<FieldOption>> {
        match self {
            Self::Dropdown(f) | Self::Radio(f) | Self::Checkbox(f) => Some(&mut f.options),
            _ => None,
        }
    }

    /// Numeric bounds, for number and slider fields.
    pub fn range(&self) -> Option<&NumericRange> {
        match self {
            Self::Number(f) => Some(&f.range),
            Self::Slider(f) => Some(&f.range),
            _ => None,
        }
    }

    pub(crate) fn range_mut(&mut self) -> Option<&mut NumericRange> {
        match self {
            Self::Number(f) => Some(&mut f.range),
            Self::Slider(f) => Some(&mut f.range),
            _ => None,
        }
    }

    /// Placeholder, for number and text fields.
    pub fn placeholder(&self) -> Option<&str> {
        match self {
            Self::Number(f) => f.placeholder.as_deref(),
            Self::Text(f) => f.placeholder.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn placeholder_mut(&mut self) -> Option<&mut Option<String>> {
        match self {
            Self::Number(f) => Some(&mut f.placeholder),
            Self::Text(f) => Some(&mut f.placeholder),
            _ => None,
        }
    }
}

impl ChoiceField {
    fn empty(base: BaseAttributes) -> Self {
        Self {
            base,
            options: Vec::new(),
        }
    }
}

impl Keyed for FieldConfig {
    type Key = FieldId;

    fn key(&self) -> &FieldId {
        self.id()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base(id: &str, label: &str) -> BaseAttributes {
        BaseAttributes {
            id: FieldId::parse(id).unwrap(),
            label: label.into(),
            help_text: None,
            required: false,
            variable_name: crate::derive_variable_name(label),
        }
    }

    #[test]
    fn kind_matches_constructor() {
        for kind in FieldKind::ALL {
            let field = FieldConfig::new(kind, base("f-1", "Field"));
            assert_eq!(field.kind(), kind);
            assert_eq!(field.options().is_some(), kind.has_options());
            assert_eq!(field.range().is_some(), kind.has_numeric_range());
        }
    }

    #[test]
    fn dropdown_serializes_with_type_tag_and_camel_case() {
        let mut field = FieldConfig::new(FieldKind::Dropdown, base("f-1", "Project Type"));
        field.base_mut().help_text = Some("Pick one".into());
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "dropdown",
                "id": "f-1",
                "label": "Project Type",
                "helpText": "Pick one",
                "required": false,
                "variableName": "project_type",
                "options": []
            })
        );
    }

    #[test]
    fn number_omits_absent_optionals() {
        let field = FieldConfig::new(FieldKind::Number, base("f-2", "Quantity"));
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], "number");
        assert!(value.get("min").is_none());
        assert!(value.get("placeholder").is_none());
    }

    #[test]
    fn slider_reads_persisted_document() {
        let field: FieldConfig = serde_json::from_value(json!({
            "type": "slider",
            "id": "abc",
            "label": "Hours",
            "required": true,
            "variableName": "hours",
            "min": 0,
            "max": 40,
            "step": 0.5,
            "defaultValue": 8
        }))
        .unwrap();
        assert_eq!(field.kind(), FieldKind::Slider);
        assert!(field.is_required());
        let range = field.range().unwrap();
        assert_eq!(range.min, Some(0.0));
        assert_eq!(range.max, Some(40.0));
        assert_eq!(range.step, Some(0.5));
        assert_eq!(range.default_value, Some(8.0));
    }

    #[test]
    fn yaml_document_loads_image_select() {
        let yaml = "type: image_select\nid: img-1\nlabel: Finish\nvariableName: finish\n";
        let field: FieldConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(field.kind(), FieldKind::ImageSelect);
        assert_eq!(field.variable_name(), "finish");
        assert!(!field.is_required());
    }

    #[test]
    fn keyed_by_field_id() {
        let field = FieldConfig::new(FieldKind::Text, base("f-9", "Name"));
        assert_eq!(field.key().as_str(), "f-9");
    }
}
