//! Non-blocking checks over a field list.
//!
//! Diagnostics describe problems a later formula step would trip over. They
//! never reject an edit or a save.

use std::collections::HashMap;

use serde::Serialize;

use crate::ids::FieldId;
use crate::types::FieldConfig;
use crate::variable_name::is_machine_safe;

/// One problem found in a field list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "problem", rename_all = "snake_case")]
pub enum FieldDiagnostic {
    /// Two or more fields share an id.
    DuplicateId { id: FieldId },
    /// The field has no variable name, so formulas cannot refer to it.
    EmptyVariableName { id: FieldId },
    /// The variable name is not lowercase alphanumerics joined by single underscores.
    UnsafeVariableName { id: FieldId, variable_name: String },
    /// Several fields use the same variable name.
    SharedVariableName {
        variable_name: String,
        ids: Vec<FieldId>,
    },
}

impl std::fmt::Display for FieldDiagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DuplicateId { id } => write!(f, "duplicate field id: {id}"),
            Self::EmptyVariableName { id } => write!(f, "field {id} has no variable name"),
            Self::UnsafeVariableName { id, variable_name } => {
                write!(f, "field {id} has unsafe variable name '{variable_name}'")
            }
            Self::SharedVariableName { variable_name, ids } => {
                let ids: Vec<&str> = ids.iter().map(FieldId::as_str).collect();
                write!(
                    f,
                    "variable name '{variable_name}' is used by fields {}",
                    ids.join(", ")
                )
            }
        }
    }
}

/// Check `fields` and report every problem, in field order.
pub fn diagnose(fields: &[FieldConfig]) -> Vec<FieldDiagnostic> {
    let mut problems = Vec::new();

    let mut seen_ids: HashMap<&FieldId, usize> = HashMap::new();
    for field in fields {
        let count = seen_ids.entry(field.id()).or_insert(0);
        *count += 1;
        if *count == 2 {
            problems.push(FieldDiagnostic::DuplicateId {
                id: field.id().clone(),
            });
        }
    }

    let mut by_name: Vec<(&str, Vec<FieldId>)> = Vec::new();
    for field in fields {
        let name = field.variable_name();
        if name.is_empty() {
            problems.push(FieldDiagnostic::EmptyVariableName {
                id: field.id().clone(),
            });
            continue;
        }
        if !is_machine_safe(name) {
            problems.push(FieldDiagnostic::UnsafeVariableName {
                id: field.id().clone(),
                variable_name: name.to_string(),
            });
        }
        match by_name.iter_mut().find(|(n, _)| *n == name) {
            Some((_, ids)) => ids.push(field.id().clone()),
            None => by_name.push((name, vec![field.id().clone()])),
        }
    }

    problems.extend(
        by_name
            .into_iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(name, ids)| FieldDiagnostic::SharedVariableName {
                variable_name: name.to_string(),
                ids,
            }),
    );

    problems
}
