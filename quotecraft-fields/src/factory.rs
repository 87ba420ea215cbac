//! Construction of new fields.

use tracing::debug;

use crate::ids::{FieldId, IdGenerator, UlidIds};
use crate::kind::{FieldKind, KindLabels};
use crate::types::{BaseAttributes, FieldConfig};
use crate::variable_name::derive_variable_name;

/// Creates fields from palette selections.
///
/// Bundles the two collaborators field creation needs: an id source and the
/// kind-to-label mapping.
pub struct FieldFactory {
    labels: KindLabels,
    ids: Box<dyn IdGenerator>,
}

impl FieldFactory {
    pub fn new(labels: KindLabels, ids: Box<dyn IdGenerator>) -> Self {
        Self { labels, ids }
    }

    pub fn labels(&self) -> &KindLabels {
        &self.labels
    }

    pub fn ids(&self) -> &dyn IdGenerator {
        self.ids.as_ref()
    }

    /// A new field of `kind`: fresh id, the kind's label, not required, a
    /// variable name derived from the label, and an empty option list for
    /// option-bearing kinds.
    pub fn create(&self, kind: FieldKind) -> FieldConfig {
        let label = self.labels.label_for(kind).to_string();
        let base = BaseAttributes {
            id: FieldId::generate(self.ids.as_ref()),
            variable_name: derive_variable_name(&label),
            label,
            help_text: None,
            required: false,
        };
        debug!(id = %base.id, %kind, "created field");
        FieldConfig::new(kind, base)
    }
}

impl Default for FieldFactory {
    fn default() -> Self {
        Self::new(KindLabels::default(), Box::new(UlidIds::new()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::SequentialIds;

    fn factory() -> FieldFactory {
        FieldFactory::new(KindLabels::default(), Box::new(SequentialIds::new("f")))
    }

    #[test]
    fn create_sets_initial_attributes() {
        let field = factory().create(FieldKind::Number);
        assert_eq!(field.id().as_str(), "f-1");
        assert_eq!(field.label(), "Number Input");
        assert_eq!(field.variable_name(), "number_input");
        assert!(!field.is_required());
        assert_eq!(field.help_text(), None);
        assert_eq!(field.range(), Some(&Default::default()));
    }

    #[test]
    fn option_kinds_start_with_empty_options() {
        let factory = factory();
        for kind in [FieldKind::Dropdown, FieldKind::Radio, FieldKind::Checkbox] {
            let field = factory.create(kind);
            assert_eq!(field.options().map(<[_]>::len), Some(0));
        }
    }

    #[test]
    fn each_field_gets_a_distinct_id() {
        let factory = FieldFactory::default();
        let a = factory.create(FieldKind::Text);
        let b = factory.create(FieldKind::Text);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn label_overrides_drive_variable_name() {
        let factory = FieldFactory::new(
            KindLabels::new().with_label(FieldKind::Slider, "Hours per Week"),
            Box::new(SequentialIds::new("f")),
        );
        let field = factory.create(FieldKind::Slider);
        assert_eq!(field.label(), "Hours per Week");
        assert_eq!(field.variable_name(), "hours_per_week");
    }
}
