//! The closed set of field kinds and their human-facing labels.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FieldsError;

/// The kind of input a field renders as. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Dropdown,
    Radio,
    Checkbox,
    Number,
    Slider,
    Text,
    ImageSelect,
}

impl FieldKind {
    /// Every kind, in palette order.
    pub const ALL: [FieldKind; 7] = [
        FieldKind::Dropdown,
        FieldKind::Radio,
        FieldKind::Checkbox,
        FieldKind::Number,
        FieldKind::Slider,
        FieldKind::Text,
        FieldKind::ImageSelect,
    ];

    /// Wire name of the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Dropdown => "dropdown",
            FieldKind::Radio => "radio",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Number => "number",
            FieldKind::Slider => "slider",
            FieldKind::Text => "text",
            FieldKind::ImageSelect => "image_select",
        }
    }

    /// Label a freshly added field of this kind starts with.
    pub fn default_label(&self) -> &'static str {
        match self {
            FieldKind::Dropdown => "Dropdown",
            FieldKind::Radio => "Radio Button",
            FieldKind::Checkbox => "Checkbox",
            FieldKind::Number => "Number Input",
            FieldKind::Slider => "Slider",
            FieldKind::Text => "Text Input",
            FieldKind::ImageSelect => "Image Select",
        }
    }

    /// Whether fields of this kind carry an option list.
    pub fn has_options(&self) -> bool {
        matches!(
            self,
            FieldKind::Dropdown | FieldKind::Radio | FieldKind::Checkbox
        )
    }

    /// Whether fields of this kind carry min/max/step/default.
    pub fn has_numeric_range(&self) -> bool {
        matches!(self, FieldKind::Number | FieldKind::Slider)
    }

    /// Whether fields of this kind carry a placeholder.
    pub fn has_placeholder(&self) -> bool {
        matches!(self, FieldKind::Number | FieldKind::Text)
    }
}

impl std::fmt::Display for FieldKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldKind {
    type Err = FieldsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| FieldsError::unknown_kind(s))
    }
}

/// Mapping from kind to the human-readable label new fields start with.
///
/// Kinds without an override fall back to [`FieldKind::default_label`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KindLabels {
    overrides: BTreeMap<FieldKind, String>,
}

impl KindLabels {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the label for one kind.
    pub fn with_label(mut self, kind: FieldKind, label: impl Into<String>) -> Self {
        self.overrides.insert(kind, label.into());
        self
    }

    pub fn label_for(&self, kind: FieldKind) -> &str {
        self.overrides
            .get(&kind)
            .map(String::as_str)
            .unwrap_or_else(|| kind.default_label())
    }

    /// All kinds with their effective labels, in palette order.
    pub fn palette(&self) -> impl Iterator<Item = (FieldKind, &str)> + '_ {
        FieldKind::ALL
            .into_iter()
            .map(move |kind| (kind, self.label_for(kind)))
    }
}

impl From<BTreeMap<FieldKind, String>> for KindLabels {
    fn from(overrides: BTreeMap<FieldKind, String>) -> Self {
        Self { overrides }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in FieldKind::ALL {
            assert_eq!(kind.as_str().parse::<FieldKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_kind_is_an_error() {
        let err = "color".parse::<FieldKind>().unwrap_err();
        assert!(matches!(err, FieldsError::UnknownKind { .. }));
    }

    #[test]
    fn serde_name_matches_as_str() {
        let json = serde_json::to_string(&FieldKind::ImageSelect).unwrap();
        assert_eq!(json, "\"image_select\"");
    }

    #[test]
    fn only_choice_kinds_have_options() {
        let with_options: Vec<_> = FieldKind::ALL
            .into_iter()
            .filter(FieldKind::has_options)
            .collect();
        assert_eq!(
            with_options,
            vec![FieldKind::Dropdown, FieldKind::Radio, FieldKind::Checkbox]
        );
    }

    #[test]
    fn labels_fall_back_to_defaults() {
        let labels = KindLabels::new().with_label(FieldKind::Text, "Short Answer");
        assert_eq!(labels.label_for(FieldKind::Text), "Short Answer");
        assert_eq!(labels.label_for(FieldKind::Radio), "Radio Button");
    }

    #[test]
    fn palette_lists_every_kind_in_order() {
        let labels = KindLabels::new();
        let palette: Vec<_> = labels.palette().collect();
        assert_eq!(palette.len(), 7);
        assert_eq!(palette[0], (FieldKind::Dropdown, "Dropdown"));
        assert_eq!(palette[6], (FieldKind::ImageSelect, "Image Select"));
    }

    #[test]
    fn labels_deserialize_from_yaml_map() {
        let labels: KindLabels =
            serde_yaml_ng::from_str("number: Quantity\nimage_select: Pick an image\n").unwrap();
        assert_eq!(labels.label_for(FieldKind::Number), "Quantity");
        assert_eq!(labels.label_for(FieldKind::ImageSelect), "Pick an image");
    }
}
