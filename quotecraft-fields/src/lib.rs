//! Field model for QuoteCraft calculators
//!
//! `quotecraft-fields` defines what a calculator field *is*: a closed set of
//! kinds, a shared attribute set, kind-specific attributes, and the rules for
//! creating and updating them. It holds no editor state and performs no I/O.
//!
//! # Architecture
//!
//! - **Tagged union**: [`FieldConfig`] has one variant per [`FieldKind`]; shared
//!   attributes live in [`BaseAttributes`] and are reached through accessors
//! - **Value updates**: [`FieldConfig::with_change`] returns a new field; id and
//!   kind never change
//! - **Derived names**: [`derive_variable_name`] turns labels into formula-safe
//!   identifiers and [`synced_variable_name`] decides when a label edit carries
//!   the variable name along
//! - **Collaborators as traits**: id minting is an [`IdGenerator`], default
//!   labels are a [`KindLabels`] mapping

pub mod diagnostics;
pub mod error;
pub mod factory;
pub mod ids;
pub mod kind;
pub mod types;
pub mod update;
pub mod variable_name;

pub use diagnostics::{diagnose, FieldDiagnostic};
pub use error::{FieldsError, Result};
pub use factory::FieldFactory;
pub use ids::{FieldId, IdGenerator, OptionId, SequentialIds, UlidIds};
pub use kind::{FieldKind, KindLabels};
pub use types::{
    BaseAttributes, ChoiceField, FieldConfig, FieldOption, ImageSelectField, NumberField,
    NumericRange, SliderField, TextField,
};
pub use update::{
    add_option, help_text_from_input, parse_numeric, placeholder_from_input, remove_option,
    update_option, FieldChange, NumericAttr,
};
pub use variable_name::{derive_variable_name, is_in_sync, is_machine_safe, synced_variable_name};
